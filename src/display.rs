//! Rendering layer — all terminal output lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! game state.  No game logic is performed; this module only translates
//! state into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use glam::Vec2;
use space_cannon::entities::{GameState, HaloKind, PowerUpKind};
use space_cannon::menu::{MenuLayout, Rect};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_POINTS: Color = Color::Cyan;
const C_HUD_AMMO: Color = Color::White;
const C_MULTI: Color = Color::Green;
const C_CANNON: Color = Color::White;
const C_BALL: Color = Color::White;
const C_TRAIL: Color = Color::DarkYellow;
const C_TRAIL_IDLE: Color = Color::DarkGrey;
const C_HALO: Color = Color::Cyan;
const C_HALO_MULTIPLIER: Color = Color::Yellow;
const C_HALO_BOMB: Color = Color::Red;
const C_SHIELD: Color = Color::Blue;
const C_LIFE_BAR: Color = Color::Green;
const C_POWER_SHIELD: Color = Color::Blue;
const C_POWER_MULTI: Color = Color::Green;
const C_HINT: Color = Color::DarkGrey;

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, state)?;
    draw_hud(out, state)?;

    draw_defences(out, state)?;
    draw_cannon(out, state)?;
    draw_power_ups(out, state)?;
    draw_halos(out, state)?;
    draw_balls(out, state)?;
    draw_explosions(out, state)?;
    draw_controls_hint(out, state)?;

    if state.menu.is_shown() {
        draw_menu(out, state)?;
    } else if state.game_paused {
        draw_paused(out, state)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, state.height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

/// Screen cell for a world position, if it is on screen.
fn cell(state: &GameState, pos: Vec2) -> Option<(u16, u16)> {
    let x = pos.x.round();
    let y = pos.y.round();
    if x < 0.0 || y < 0.0 || x >= state.width as f32 || y >= state.height as f32 {
        None
    } else {
        Some((x as u16, y as u16))
    }
}

/// Print `text` centred on a world position; skipped when off screen.
fn put_centered<W: Write>(
    out: &mut W,
    state: &GameState,
    pos: Vec2,
    text: &str,
    color: Color,
) -> std::io::Result<()> {
    let half = text.chars().count() as f32 / 2.0;
    if let Some((x, y)) = cell(state, Vec2::new(pos.x - half + 0.5, pos.y)) {
        out.queue(cursor::MoveTo(x, y))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(text))?;
    }
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    let w = state.width as usize;
    let h = state.height;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(state.width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    // Score — left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score: {:>6}", state.score)))?;

    // Point value — centre
    let points = format!("Points: x{}", state.point_value);
    let px = (state.width / 2).saturating_sub(points.len() as u16 / 2);
    out.queue(cursor::MoveTo(px, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_POINTS))?;
    out.queue(Print(&points))?;

    // Ammo — right
    let max = state.config.max_ammo as usize;
    let have = (state.ammo as usize).min(max);
    let pips = format!("{}{}", "●".repeat(have), "○".repeat(max - have));
    let label = if state.multi_mode { "MULTI " } else { "Ammo: " };
    let text_len = (label.len() + max) as u16;
    let ax = state.width.saturating_sub(text_len + 1);
    out.queue(cursor::MoveTo(ax, 0))?;
    out.queue(style::SetForegroundColor(if state.multi_mode {
        C_MULTI
    } else {
        C_HUD_AMMO
    }))?;
    out.queue(Print(label))?;
    out.queue(Print(&pips))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_defences<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    for shield in &state.shields {
        let cells = (shield.half_width * 2.0).round() as usize + 1;
        put_centered(out, state, shield.center, &"▀".repeat(cells), C_SHIELD)?;
    }
    if let Some(bar) = &state.life_bar {
        if let Some((_, y)) = cell(state, Vec2::new(0.0, bar.y)) {
            let from = state.bounds.left as u16;
            let len = state.bounds.width().max(0.0) as usize;
            out.queue(cursor::MoveTo(from, y))?;
            out.queue(style::SetForegroundColor(C_LIFE_BAR))?;
            out.queue(Print("═".repeat(len)))?;
        }
    }
    Ok(())
}

fn draw_cannon<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    let cannon = &state.cannon;
    let dir = cannon.direction();
    let barrel = if dir.x.abs() < 0.38 {
        "|"
    } else if dir.y.abs() < 0.38 {
        "-"
    } else if dir.x > 0.0 {
        "/"
    } else {
        "\\"
    };
    let color = if state.multi_mode { C_MULTI } else { C_CANNON };

    let steps = state.config.cannon_length.round().max(1.0) as i32;
    for i in 1..=steps {
        let p = cannon.pos + dir * i as f32;
        put_centered(out, state, p, barrel, color)?;
    }
    put_centered(out, state, cannon.pos, "(█)", color)?;
    put_centered(out, state, cannon.pos + Vec2::Y, "▀▀▀▀▀", color)?;
    Ok(())
}

fn draw_balls<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    for ball in &state.balls {
        if let Some(trail) = &ball.trail {
            let color = if trail.is_emitting() { C_TRAIL } else { C_TRAIL_IDLE };
            for p in trail.points() {
                put_centered(out, state, *p, "·", color)?;
            }
        }
        put_centered(out, state, ball.pos, "●", C_BALL)?;
    }
    Ok(())
}

fn draw_halos<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    for halo in &state.halos {
        let (sprite, color) = match halo.kind {
            HaloKind::Normal => ("(o)", C_HALO),
            HaloKind::Multiplier => ("(x)", C_HALO_MULTIPLIER),
            HaloKind::Bomb => ("(*)", C_HALO_BOMB),
        };
        put_centered(out, state, halo.pos, sprite, color)?;
    }
    Ok(())
}

fn draw_power_ups<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    for power_up in &state.power_ups {
        let (sprite, color) = match power_up.kind {
            PowerUpKind::Shield => ("[S]", C_POWER_SHIELD),
            PowerUpKind::MultiShot => ("[M]", C_POWER_MULTI),
        };
        put_centered(out, state, power_up.pos, sprite, color)?;
    }
    Ok(())
}

fn draw_explosions<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    for e in &state.explosions {
        let (sprite, color) = if e.frames % 2 == 0 {
            ("\\|/", Color::Yellow)
        } else {
            ("-*-", Color::Red)
        };
        put_centered(out, state, e.pos, sprite, color)?;
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, state.height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("SPACE : Fire   P : Pause   M : Music   Q : Quit"))?;
    Ok(())
}

// ── Overlays ──────────────────────────────────────────────────────────────────

fn clear_rect<W: Write>(out: &mut W, rect: &Rect) -> std::io::Result<()> {
    for row in rect.y..rect.y + rect.h {
        out.queue(cursor::MoveTo(rect.x, row))?;
        out.queue(Print(" ".repeat(rect.w as usize)))?;
    }
    Ok(())
}

fn print_in<W: Write>(
    out: &mut W,
    rect: &Rect,
    row: u16,
    text: &str,
    color: Color,
) -> std::io::Result<()> {
    let col = rect.x + (rect.w / 2).saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

fn draw_menu<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    let layout = MenuLayout::for_size(state.width, state.height);
    let panel = layout.panel;
    clear_rect(out, &panel)?;

    let inner = panel.w.saturating_sub(2) as usize;
    out.queue(style::SetForegroundColor(Color::Cyan))?;
    out.queue(cursor::MoveTo(panel.x, panel.y))?;
    out.queue(Print(format!("╔{}╗", "═".repeat(inner))))?;
    for row in panel.y + 1..panel.y + panel.h.saturating_sub(1) {
        out.queue(cursor::MoveTo(panel.x, row))?;
        out.queue(Print("║"))?;
        out.queue(cursor::MoveTo(panel.x + panel.w.saturating_sub(1), row))?;
        out.queue(Print("║"))?;
    }
    out.queue(cursor::MoveTo(panel.x, panel.y + panel.h.saturating_sub(1)))?;
    out.queue(Print(format!("╚{}╝", "═".repeat(inner))))?;

    let menu = &state.menu;
    print_in(out, &panel, panel.y + 1, "S P A C E   C A N N O N", Color::Cyan)?;
    print_in(out, &panel, panel.y + 3, &format!("Score: {:>6}", menu.score), Color::Yellow)?;
    print_in(out, &panel, panel.y + 4, &format!("Best:  {:>6}", menu.top_score), Color::Yellow)?;

    let play_color = if menu.touchable { Color::Green } else { Color::DarkGrey };
    print_in(out, &layout.play, layout.play.y, "[  PLAY  ]", play_color)?;

    let music = if menu.music_playing { "♪ ON " } else { "♪ OFF" };
    print_in(out, &layout.music, layout.music.y, &format!("[{}]", music), Color::White)?;

    Ok(())
}

fn draw_paused<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    let lines: &[(&str, Color)] = &[
        ("╔══════════════╗", Color::Yellow),
        ("║    PAUSED    ║", Color::Yellow),
        ("╚══════════════╝", Color::Yellow),
        ("P - Resume  Q - Quit", Color::White),
    ];

    let cx = state.width / 2;
    let start_row = (state.height / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    Ok(())
}
