//! All game entity types. Pure data, plus the trail a projectile owns.

use std::collections::VecDeque;

use glam::Vec2;

use crate::config::GameConfig;
use crate::menu::Menu;

/// Identifies one physical body for the lifetime of a game session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub u32);

#[derive(Clone, Debug, PartialEq)]
pub enum GameStatus {
    Playing,
    /// Also the idle state before the first game.
    GameOver,
}

// ── Trail ─────────────────────────────────────────────────────────────────────

/// Decorative particle trail following a projectile.
#[derive(Clone, Debug, PartialEq)]
pub struct Trail {
    points: VecDeque<Vec2>,
    capacity: usize,
    /// Emitter birth rate on/off.
    emitting: bool,
}

impl Trail {
    pub fn new(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
            emitting: true,
        }
    }

    /// Attach the newest end of the trail to `pos`.  A trail that stopped
    /// emitting loses its oldest point instead of growing.
    pub fn follow(&mut self, pos: Vec2) {
        if !self.emitting {
            self.points.pop_front();
            return;
        }
        if self.capacity == 0 {
            return;
        }
        if self.points.len() == self.capacity {
            self.points.pop_front();
        }
        self.points.push_back(pos);
    }

    /// An idle trail stops growing: `follow` drops its oldest point instead
    /// of recording a new one, and the renderer draws it dimmed.
    pub fn set_emitting(&mut self, emitting: bool) {
        self.emitting = emitting;
    }

    pub fn is_emitting(&self) -> bool {
        self.emitting
    }

    /// Oldest point first.
    pub fn points(&self) -> impl Iterator<Item = &Vec2> {
        self.points.iter()
    }

    pub fn head(&self) -> Option<Vec2> {
        self.points.back().copied()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

/// A cannon ball.
#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    pub id: BodyId,
    pub pos: Vec2,
    /// Cells per second.
    pub vel: Vec2,
    pub radius: f32,
    /// Wall contacts so far.
    pub bounces: u32,
    pub trail: Option<Trail>,
}

impl Projectile {
    pub fn new(id: BodyId, pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self {
            id,
            pos,
            vel,
            radius,
            bounces: 0,
            trail: None,
        }
    }

    pub fn with_trail(mut self, trail: Trail) -> Self {
        self.trail = Some(trail);
        self
    }

    /// Move the trail emitter to the current position.  Call once per tick,
    /// after integration.
    pub fn update_trail(&mut self) {
        if let Some(trail) = self.trail.as_mut() {
            trail.follow(self.pos);
        }
    }
}

// ── Targets ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HaloKind {
    Normal,
    /// Raises the point value by one when shot.
    Multiplier,
    /// Clears every halo on screen when shot.
    Bomb,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Halo {
    pub id: BodyId,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub kind: HaloKind,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PowerUpKind {
    /// Restores one destroyed shield.
    Shield,
    /// Switches the cannon into multi mode.
    MultiShot,
}

/// A bonus target drifting horizontally across the field.
#[derive(Clone, Debug, PartialEq)]
pub struct PowerUp {
    pub id: BodyId,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub kind: PowerUpKind,
}

// ── Defences ──────────────────────────────────────────────────────────────────

/// One barrier block above the life bar.  `slot` is its fixed position
/// index so a restored shield returns to the same place.
#[derive(Clone, Debug, PartialEq)]
pub struct Shield {
    pub id: BodyId,
    pub slot: usize,
    pub center: Vec2,
    pub half_width: f32,
}

/// The line a halo must never reach.
#[derive(Clone, Debug, PartialEq)]
pub struct LifeBar {
    pub y: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Cannon {
    pub pos: Vec2,
    /// Radians from straight up, positive to the right.
    pub angle: f32,
    /// +1.0 or -1.0.
    pub turn_dir: f32,
}

impl Cannon {
    /// Unit vector along the barrel (y grows downward).
    pub fn direction(&self) -> Vec2 {
        Vec2::new(self.angle.sin(), -self.angle.cos())
    }
}

/// A brief visual explosion rendered for a few frames.
#[derive(Clone, Debug, PartialEq)]
pub struct Explosion {
    pub pos: Vec2,
    /// Remaining frames to display.
    pub frames: u32,
}

// ── Play field ────────────────────────────────────────────────────────────────

/// Play-area rectangle in cells.  Balls and halos bounce off `left`/`right`;
/// the top and bottom are open.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Bounds {
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.left && p.x <= self.right && p.y >= self.top && p.y <= self.bottom
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }
}

// ── Host notifications ────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SoundCue {
    Laser,
    Explosion,
    Bounce,
    Zap,
    ShieldUp,
    /// Game over.
    Deep,
}

/// Things the host should react to: audio requests and persistence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    Sound(SoundCue),
    /// Start (`true`) or stop background music.
    Music(bool),
    NewTopScore(u32),
    GameOver { score: u32 },
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire scene.  Cloneable so the pure update functions in `compute`
/// can return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub cannon: Cannon,
    pub balls: Vec<Projectile>,
    pub halos: Vec<Halo>,
    pub shields: Vec<Shield>,
    /// Destroyed shields waiting to be restored by a power-up.
    pub shield_pool: Vec<Shield>,
    pub life_bar: Option<LifeBar>,
    pub power_ups: Vec<PowerUp>,
    pub explosions: Vec<Explosion>,
    /// Frames until each pending volley shot leaves the barrel.
    pub pending_shots: Vec<u32>,
    pub menu: Menu,

    pub ammo: u32,
    pub score: u32,
    /// Points per hit; never below 1.
    pub point_value: u32,
    pub multi_mode: bool,
    pub game_paused: bool,
    pub status: GameStatus,

    pub kill_count: u32,
    /// Multiplies the halo spawn timer; grows with every spawn.
    pub halo_spawn_rate: f32,
    pub halo_timer: f32,
    pub ammo_timer: f32,
    pub shield_up_timer: f32,

    pub frame: u64,
    pub bounds: Bounds,
    pub width: u16,
    pub height: u16,
    pub next_id: u32,
    pub events: Vec<GameEvent>,
    pub config: GameConfig,
}

impl GameState {
    pub fn alloc_id(&mut self) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn ball(&self, id: BodyId) -> Option<&Projectile> {
        self.balls.iter().find(|b| b.id == id)
    }

    pub fn halo(&self, id: BodyId) -> Option<&Halo> {
        self.halos.iter().find(|h| h.id == id)
    }

    pub fn is_playing(&self) -> bool {
        self.status == GameStatus::Playing
    }
}
