//! Pure game-logic functions for the scene.
//!
//! Every public transition takes an immutable reference to the current
//! `GameState` (and, where needed, an RNG handle) and returns a brand-new
//! `GameState`.  Side effects are limited to the injected RNG and to the
//! `events` queue the host drains with `take_events`.

use glam::Vec2;
use log::{debug, info};
use rand::Rng;

use crate::config::GameConfig;
use crate::entities::{
    BodyId, Bounds, Cannon, Explosion, GameEvent, GameState, GameStatus, Halo, HaloKind,
    LifeBar, PowerUp, PowerUpKind, Projectile, Shield, SoundCue, Trail,
};
use crate::menu::{Menu, MenuAction, MenuLayout};
use crate::physics::{self, Body, Contact, ContactObserver};

// ── Layout ───────────────────────────────────────────────────────────────────

/// Smallest terminal the play field fits in.
pub const MIN_WIDTH: u16 = 30;
pub const MIN_HEIGHT: u16 = 16;

fn play_bounds(width: u16, height: u16) -> Bounds {
    Bounds {
        left: 1.0,
        right: width as f32 - 1.0,
        top: 2.0,
        bottom: height as f32 - 2.0,
    }
}

fn cannon_pos(width: u16, height: u16) -> Vec2 {
    Vec2::new(width as f32 / 2.0, height as f32 - 4.0)
}

fn life_bar_y(height: u16) -> f32 {
    height as f32 - 3.0
}

fn shield_row(height: u16) -> f32 {
    height as f32 - 6.0
}

fn shield_center(bounds: &Bounds, row: f32, slot: usize, count: usize) -> Vec2 {
    let spacing = bounds.width() / count as f32;
    Vec2::new(bounds.left + spacing * (slot as f32 + 0.5), row)
}

fn build_shields(state: &mut GameState) {
    let count = state.config.shield_count;
    let half_width = state.config.shield_half_width;
    let row = shield_row(state.height);
    let bounds = state.bounds;
    let mut shields = Vec::with_capacity(count);
    for slot in 0..count {
        shields.push(Shield {
            id: state.alloc_id(),
            slot,
            center: shield_center(&bounds, row, slot, count),
            half_width,
        });
    }
    state.shields = shields;
    state.shield_pool.clear();
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the scene as it looks on launch: menu up, nothing in play.
pub fn init_state(config: GameConfig, width: u16, height: u16, top_score: u32) -> GameState {
    let width = width.max(MIN_WIDTH);
    let height = height.max(MIN_HEIGHT);
    let music = config.music_on_start;
    let mut events = Vec::new();
    if music {
        events.push(GameEvent::Music(true));
    }
    GameState {
        cannon: Cannon {
            pos: cannon_pos(width, height),
            angle: 0.0,
            turn_dir: 1.0,
        },
        balls: Vec::new(),
        halos: Vec::new(),
        shields: Vec::new(),
        shield_pool: Vec::new(),
        life_bar: None,
        power_ups: Vec::new(),
        explosions: Vec::new(),
        pending_shots: Vec::new(),
        menu: Menu::new(top_score, music),
        ammo: config.max_ammo,
        score: 0,
        point_value: 1,
        multi_mode: false,
        game_paused: false,
        status: GameStatus::GameOver,
        kill_count: 0,
        halo_spawn_rate: 1.0,
        halo_timer: 0.0,
        ammo_timer: 0.0,
        shield_up_timer: 0.0,
        frame: 0,
        bounds: play_bounds(width, height),
        width,
        height,
        next_id: 0,
        events,
        config,
    }
}

/// Reset everything for a fresh round and hide the menu.
pub fn new_game(state: &GameState) -> GameState {
    let mut next = state.clone();
    next.ammo = next.config.max_ammo;
    next.score = 0;
    next.point_value = 1;
    next.multi_mode = false;
    next.game_paused = false;
    next.status = GameStatus::Playing;
    next.kill_count = 0;
    next.halo_spawn_rate = 1.0;
    next.halo_timer = 0.0;
    next.ammo_timer = 0.0;
    next.shield_up_timer = 0.0;
    next.balls.clear();
    next.halos.clear();
    next.power_ups.clear();
    next.explosions.clear();
    next.pending_shots.clear();
    build_shields(&mut next);
    next.life_bar = Some(LifeBar { y: life_bar_y(next.height) });
    next.menu.hide();
    info!("new game (top score {})", next.menu.top_score);
    next
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

fn launch_ball(state: &mut GameState) {
    let dir = state.cannon.direction();
    let pos = state.cannon.pos + dir * state.config.cannon_length;
    let vel = dir * state.config.shot_speed;
    let id = state.alloc_id();
    let ball = Projectile::new(id, pos, vel, state.config.ball_radius)
        .with_trail(Trail::new(state.config.trail_length));
    state.balls.push(ball);
    state.events.push(GameEvent::Sound(SoundCue::Laser));
}

/// Fire the cannon.  A no-op unless a game is running, unpaused, and there
/// is enough ammo for the shot.
pub fn fire(state: &GameState) -> GameState {
    if !state.is_playing() || state.game_paused {
        return state.clone();
    }
    let cost = if state.multi_mode {
        state.config.multi_shot_cost
    } else {
        1
    };
    if state.ammo == 0 || state.ammo < cost {
        return state.clone();
    }

    let mut next = state.clone();
    next.ammo -= cost;
    launch_ball(&mut next);

    if next.multi_mode {
        let delay = next.config.volley_delay_frames();
        for i in 1..next.config.multi_volley {
            next.pending_shots.push(delay * i);
        }
        if next.ammo < cost {
            next.multi_mode = false;
            next.ammo = next.config.max_ammo;
            debug!("multi mode spent");
        }
    }
    next
}

/// Pause or resume play.  Only meaningful while a round is running.
/// Ball trails go idle while paused so the renderer can dim them.
pub fn set_paused(state: &GameState, paused: bool) -> GameState {
    if !state.is_playing() || state.menu.is_shown() || state.game_paused == paused {
        return state.clone();
    }
    let mut next = state.clone();
    next.game_paused = paused;
    for ball in &mut next.balls {
        if let Some(trail) = ball.trail.as_mut() {
            trail.set_emitting(!paused);
        }
    }
    next
}

pub fn toggle_pause(state: &GameState) -> GameState {
    set_paused(state, !state.game_paused)
}

pub fn toggle_music(state: &GameState) -> GameState {
    let mut next = state.clone();
    next.menu.music_playing = !next.menu.music_playing;
    next.events.push(GameEvent::Music(next.menu.music_playing));
    next
}

/// Route a tap at a terminal cell to the menu.
pub fn touch_menu(state: &GameState, col: u16, row: u16) -> GameState {
    let layout = MenuLayout::for_size(state.width, state.height);
    match state.menu.handle_touch(col, row, &layout) {
        MenuAction::Play => new_game(state),
        MenuAction::ToggleMusic => toggle_music(state),
        MenuAction::None => state.clone(),
    }
}

/// Re-lay the scene for a new terminal size.  Fixed furniture (cannon,
/// shields, life bar) moves to its spot for the new size; bodies in flight
/// are pulled back inside the field.
pub fn resize(state: &GameState, width: u16, height: u16) -> GameState {
    let width = width.max(MIN_WIDTH);
    let height = height.max(MIN_HEIGHT);
    if width == state.width && height == state.height {
        return state.clone();
    }
    let mut next = state.clone();
    next.width = width;
    next.height = height;
    let bounds = play_bounds(width, height);
    next.bounds = bounds;
    next.cannon.pos = cannon_pos(width, height);
    if let Some(bar) = next.life_bar.as_mut() {
        bar.y = life_bar_y(height);
    }

    let row = shield_row(height);
    let count = next.config.shield_count;
    for shield in next.shields.iter_mut().chain(next.shield_pool.iter_mut()) {
        shield.center = shield_center(&bounds, row, shield.slot, count);
    }

    for ball in &mut next.balls {
        ball.pos.x = ball.pos.x.clamp(bounds.left, bounds.right);
        ball.pos.y = ball.pos.y.min(bounds.bottom);
    }
    for halo in &mut next.halos {
        halo.pos.x = halo.pos.x.clamp(bounds.left, bounds.right);
    }
    for power_up in &mut next.power_ups {
        power_up.pos.y = power_up.pos.y.clamp(bounds.top, bounds.bottom);
    }
    debug!("resized to {}x{}", width, height);
    next
}

/// Hand the accumulated host events over, leaving the queue empty.
pub fn take_events(state: &mut GameState) -> Vec<GameEvent> {
    std::mem::take(&mut state.events)
}

// ── Spawning ─────────────────────────────────────────────────────────────────

fn explode(state: &mut GameState, pos: Vec2) {
    state.explosions.push(Explosion {
        pos,
        frames: state.config.explosion_frames,
    });
    state.events.push(GameEvent::Sound(SoundCue::Explosion));
}

fn spawn_halo(state: &mut GameState, rng: &mut impl Rng) {
    let cfg = &state.config;
    let r = cfg.halo_radius;
    let (lo, hi) = (state.bounds.left + r, state.bounds.right - r);
    let x = if lo < hi {
        rng.gen_range(lo..hi)
    } else {
        (state.bounds.left + state.bounds.right) / 2.0
    };
    let angle = rng
        .gen_range(cfg.halo_angle_min_degrees..cfg.halo_angle_max_degrees)
        .to_radians();
    let vel = Vec2::new(angle.cos(), angle.sin()) * cfg.halo_speed;

    let kind = if state.halos.len() == cfg.bomb_halo_count {
        HaloKind::Bomb
    } else if state.score >= cfg.multiplier_min_score
        && cfg.multiplier_chance > 0
        && rng.gen_ratio(1, cfg.multiplier_chance)
    {
        HaloKind::Multiplier
    } else {
        HaloKind::Normal
    };

    let pos = Vec2::new(x, state.bounds.top + r);
    let id = state.alloc_id();
    state.halos.push(Halo { id, pos, vel, radius: r, kind });
    state.halo_spawn_rate =
        (state.halo_spawn_rate + state.config.halo_spawn_accel).min(state.config.halo_spawn_rate_max);
    debug!("spawned {:?} halo {:?} at x={:.1}", kind, id, x);
}

/// Launch a power-up just outside one side wall, drifting across at row `y`.
fn spawn_power_up(state: &mut GameState, kind: PowerUpKind, y: f32) {
    let r = state.config.power_up_radius;
    let speed = state.config.power_up_speed;
    let (pos, vel) = match kind {
        PowerUpKind::MultiShot => (Vec2::new(state.bounds.left - r, y), Vec2::new(speed, 0.0)),
        PowerUpKind::Shield => (Vec2::new(state.bounds.right + r, y), Vec2::new(-speed, 0.0)),
    };
    let id = state.alloc_id();
    state.power_ups.push(PowerUp { id, pos, vel, radius: r, kind });
    debug!("spawned {:?} power-up {:?}", kind, id);
}

/// Rows power-ups may drift along: below the HUD, well above the shields.
fn power_up_rows(state: &GameState) -> (f32, f32) {
    let top = state.bounds.top + 2.0;
    let bottom = (shield_row(state.height) - 3.0).max(top + 1.0);
    (top, bottom)
}

// ── Contact rules ────────────────────────────────────────────────────────────

fn ball_hits_halo(state: &mut GameState, ball: BodyId, halo: BodyId) {
    let Some(hi) = state.halos.iter().position(|h| h.id == halo) else {
        return;
    };
    let Some(bi) = state.balls.iter().position(|b| b.id == ball) else {
        return;
    };
    let halo = state.halos.remove(hi);
    state.balls.remove(bi);

    state.score += state.point_value;
    explode(state, halo.pos);

    match halo.kind {
        HaloKind::Normal => {}
        HaloKind::Multiplier => state.point_value += 1,
        HaloKind::Bomb => {
            let rest: Vec<Halo> = state.halos.drain(..).collect();
            for other in rest {
                explode(state, other.pos);
            }
        }
    }
    debug!(
        "{:?} halo hit: score {} point value {}",
        halo.kind, state.score, state.point_value
    );

    state.kill_count += 1;
    let every = state.config.multi_power_up_kills;
    if every > 0 && state.kill_count % every == 0 {
        let (top, bottom) = power_up_rows(state);
        spawn_power_up(state, PowerUpKind::MultiShot, (top + bottom) / 2.0);
    }
}

fn ball_hits_edge(state: &mut GameState, ball: BodyId) {
    let max_bounces = state.config.max_bounces;
    let Some(bi) = state.balls.iter().position(|b| b.id == ball) else {
        return;
    };
    state.balls[bi].bounces += 1;
    if state.balls[bi].bounces > max_bounces {
        state.balls.remove(bi);
        state.point_value = 1;
        debug!("ball {:?} worn out", ball);
    }
    state.events.push(GameEvent::Sound(SoundCue::Bounce));
}

fn halo_hits_shield(state: &mut GameState, halo: BodyId, shield: BodyId) {
    let Some(hi) = state.halos.iter().position(|h| h.id == halo) else {
        return;
    };
    let Some(si) = state.shields.iter().position(|s| s.id == shield) else {
        return;
    };
    let halo = state.halos.remove(hi);
    let shield = state.shields.remove(si);
    explode(state, halo.pos);
    debug!("shield slot {} destroyed", shield.slot);
    state.shield_pool.push(shield);
}

fn halo_hits_life_bar(state: &mut GameState, halo: BodyId) {
    if state.life_bar.is_none() {
        return;
    }
    let Some(hi) = state.halos.iter().position(|h| h.id == halo) else {
        return;
    };
    let halo = state.halos.remove(hi);
    explode(state, halo.pos);
    state.life_bar = None;
}

fn ball_hits_power_up(state: &mut GameState, ball: BodyId, power_up: BodyId) {
    let Some(pi) = state.power_ups.iter().position(|p| p.id == power_up) else {
        return;
    };
    let Some(bi) = state.balls.iter().position(|b| b.id == ball) else {
        return;
    };
    let power_up = state.power_ups.remove(pi);
    state.balls.remove(bi);

    match power_up.kind {
        PowerUpKind::Shield => {
            if !state.shield_pool.is_empty() {
                let shield = state.shield_pool.remove(0);
                debug!("shield slot {} restored", shield.slot);
                state.shields.push(shield);
            }
        }
        PowerUpKind::MultiShot => {
            state.multi_mode = true;
            state.ammo = state.config.max_ammo;
            debug!("multi mode on");
        }
    }
    state.events.push(GameEvent::Sound(SoundCue::ShieldUp));
}

impl ContactObserver for GameState {
    fn on_contact(&mut self, a: Body, b: Body) {
        if !self.is_playing() || self.game_paused {
            return;
        }
        match Contact::new(a, b).ordered() {
            (Body::Halo(halo), Body::Ball(ball)) => ball_hits_halo(self, ball, halo),
            (Body::Halo(halo), Body::Edge) => {
                if self.halo(halo).is_some() {
                    self.events.push(GameEvent::Sound(SoundCue::Zap));
                }
            }
            (Body::Halo(halo), Body::Shield(shield)) => halo_hits_shield(self, halo, shield),
            (Body::Halo(halo), Body::LifeBar) => halo_hits_life_bar(self, halo),
            (Body::Ball(ball), Body::Edge) => ball_hits_edge(self, ball),
            (Body::Ball(ball), Body::PowerUp(power_up)) => ball_hits_power_up(self, ball, power_up),
            _ => {}
        }
    }
}

// ── Per-frame tick (nearly pure — RNG is injected) ──────────────────────────

fn sweep_cannon(cannon: &mut Cannon, config: &GameConfig, dt: f32) {
    let max = config.cannon_sweep_degrees.to_radians();
    cannon.angle += config.cannon_turn_degrees_per_sec.to_radians() * dt * cannon.turn_dir;
    if cannon.angle > max {
        cannon.angle = max;
        cannon.turn_dir = -1.0;
    } else if cannon.angle < -max {
        cannon.angle = -max;
        cannon.turn_dir = 1.0;
    }
}

fn decay_explosions(explosions: &mut Vec<Explosion>) {
    for e in explosions.iter_mut() {
        e.frames = e.frames.saturating_sub(1);
    }
    explosions.retain(|e| e.frames > 0);
}

fn end_game(state: &mut GameState) {
    state.status = GameStatus::GameOver;
    state.game_paused = false;
    state.multi_mode = false;
    let halos: Vec<Halo> = state.halos.drain(..).collect();
    for halo in halos {
        explode(state, halo.pos);
    }
    state.balls.clear();
    state.power_ups.clear();
    state.pending_shots.clear();
    state.shields.clear();
    state.shield_pool.clear();
    state.life_bar = None;

    let score = state.score;
    let new_top = state.menu.record_score(score);
    state.events.push(GameEvent::Sound(SoundCue::Deep));
    state.events.push(GameEvent::GameOver { score });
    if new_top {
        state.events.push(GameEvent::NewTopScore(score));
        info!("new top score {}", score);
    }
    state.menu.show();
    info!("game over: score {}", score);
}

/// Advance the simulation by one frame.  All randomness comes through `rng`
/// so callers control determinism (useful for tests with a seeded RNG).
pub fn tick(state: &GameState, rng: &mut impl Rng) -> GameState {
    if state.game_paused {
        return state.clone();
    }
    let mut next = state.clone();
    let dt = next.config.dt();
    next.frame += 1;

    decay_explosions(&mut next.explosions);
    sweep_cannon(&mut next.cannon, &state.config, dt);

    if !next.is_playing() {
        return next;
    }

    // ── 1. Delayed volley shots ──────────────────────────────────────────────
    let mut due = 0;
    next.pending_shots.retain_mut(|frames| {
        *frames = frames.saturating_sub(1);
        if *frames == 0 {
            due += 1;
            false
        } else {
            true
        }
    });
    for _ in 0..due {
        launch_ball(&mut next);
    }

    // ── 2. Physics, then contact rules ───────────────────────────────────────
    let contacts = physics::step(&mut next, dt);
    physics::dispatch(&contacts, &mut next);

    // ── 3. Remove bodies that left the field ─────────────────────────────────
    let bounds = next.bounds;
    let before = next.balls.len();
    next.balls.retain(|b| bounds.contains(b.pos));
    if next.balls.len() < before {
        next.point_value = 1;
    }
    next.halos.retain(|h| h.pos.y - h.radius <= bounds.bottom);
    next.power_ups.retain(|p| {
        let gone_right = p.vel.x > 0.0 && p.pos.x - p.radius > bounds.right;
        let gone_left = p.vel.x < 0.0 && p.pos.x + p.radius < bounds.left;
        !(gone_right || gone_left)
    });

    // ── 4. Trails follow their balls ─────────────────────────────────────────
    for ball in &mut next.balls {
        ball.update_trail();
    }

    // ── 5. Timers ────────────────────────────────────────────────────────────
    if next.multi_mode {
        next.ammo_timer = 0.0;
    } else {
        next.ammo_timer += dt;
        let regen = next.config.ammo_regen_secs;
        while next.ammo_timer >= regen {
            next.ammo_timer -= regen;
            next.ammo = (next.ammo + 1).min(next.config.max_ammo);
        }
    }

    next.halo_timer += dt * next.halo_spawn_rate;
    if next.halo_timer >= next.config.halo_spawn_secs {
        next.halo_timer -= next.config.halo_spawn_secs;
        spawn_halo(&mut next, rng);
    }

    next.shield_up_timer += dt;
    if next.shield_up_timer >= next.config.shield_power_up_secs {
        next.shield_up_timer -= next.config.shield_power_up_secs;
        if !next.shield_pool.is_empty() {
            let (top, bottom) = power_up_rows(&next);
            let y = rng.gen_range(top..=bottom);
            spawn_power_up(&mut next, PowerUpKind::Shield, y);
        }
    }

    // ── 6. Life bar gone → round over ────────────────────────────────────────
    if next.life_bar.is_none() {
        end_game(&mut next);
    }

    next
}
