//! Menu overlay: score display, play button and music toggle.
//!
//! ## States
//!
//! | State    | `touchable` | Entered by |
//! |----------|-------------|------------|
//! | `Shown`  | `true`      | `show()`   |
//! | `Hidden` | `false`     | `hide()`   |
//!
//! The menu never changes state on its own when touched; `handle_touch`
//! only reports which button was hit and the scene decides what happens.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuState {
    Hidden,
    Shown,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuAction {
    None,
    Play,
    ToggleMusic,
}

/// Axis-aligned rectangle in terminal cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub w: u16,
    pub h: u16,
}

impl Rect {
    pub fn contains(&self, col: u16, row: u16) -> bool {
        col >= self.x && col < self.x + self.w && row >= self.y && row < self.y + self.h
    }

    /// The cell in the middle, used when a key stands in for a tap.
    pub fn center(&self) -> (u16, u16) {
        (self.x + self.w / 2, self.y + self.h / 2)
    }
}

/// Where the menu's widgets sit for a given screen size.  Shared by the
/// renderer and by touch routing so the two never disagree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MenuLayout {
    pub panel: Rect,
    pub play: Rect,
    pub music: Rect,
}

impl MenuLayout {
    pub const PANEL_W: u16 = 30;
    pub const PANEL_H: u16 = 11;

    pub fn for_size(width: u16, height: u16) -> Self {
        let pw = Self::PANEL_W.min(width);
        let ph = Self::PANEL_H.min(height);
        let px = (width - pw) / 2;
        let py = (height - ph) / 2;

        let play_w = 12.min(pw);
        let play = Rect {
            x: px + (pw - play_w) / 2,
            y: py + ph.saturating_sub(4),
            w: play_w,
            h: 1,
        };
        let music_w = 9.min(pw);
        let music = Rect {
            x: px + (pw - music_w) / 2,
            y: py + ph.saturating_sub(2),
            w: music_w,
            h: 1,
        };
        Self {
            panel: Rect { x: px, y: py, w: pw, h: ph },
            play,
            music,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Menu {
    /// Score of the last finished game.
    pub score: u32,
    pub top_score: u32,
    /// Input is ignored while false.
    pub touchable: bool,
    pub music_playing: bool,
    state: MenuState,
}

impl Menu {
    /// A freshly launched game starts with the menu up.
    pub fn new(top_score: u32, music_playing: bool) -> Self {
        Self {
            score: 0,
            top_score,
            touchable: true,
            music_playing,
            state: MenuState::Shown,
        }
    }

    pub fn show(&mut self) {
        self.state = MenuState::Shown;
        self.touchable = true;
    }

    pub fn hide(&mut self) {
        self.state = MenuState::Hidden;
        self.touchable = false;
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    pub fn is_shown(&self) -> bool {
        self.state == MenuState::Shown
    }

    /// Store the score of a finished game.  Returns `true` if it beat the
    /// top score.
    pub fn record_score(&mut self, score: u32) -> bool {
        self.score = score;
        if score > self.top_score {
            self.top_score = score;
            true
        } else {
            false
        }
    }

    pub fn handle_touch(&self, col: u16, row: u16, layout: &MenuLayout) -> MenuAction {
        if !self.touchable {
            return MenuAction::None;
        }
        if layout.play.contains(col, row) {
            MenuAction::Play
        } else if layout.music.contains(col, row) {
            MenuAction::ToggleMusic
        } else {
            MenuAction::None
        }
    }
}
