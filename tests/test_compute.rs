use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

use space_cannon::compute::*;
use space_cannon::config::GameConfig;
use space_cannon::entities::*;
use space_cannon::menu::MenuLayout;
use space_cannon::physics::{Body, ContactObserver};

// 40×24 terminal: field x 1..39, y 2..22, cannon (20, 20), life bar y 21.
fn make_state() -> GameState {
    let mut s = new_game(&init_state(GameConfig::default(), 40, 24, 0));
    take_events(&mut s);
    s
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn add_ball(s: &mut GameState, pos: Vec2, vel: Vec2) -> BodyId {
    let id = s.alloc_id();
    s.balls
        .push(Projectile::new(id, pos, vel, 0.5).with_trail(Trail::new(4)));
    id
}

fn add_halo(s: &mut GameState, pos: Vec2, kind: HaloKind) -> BodyId {
    let id = s.alloc_id();
    s.halos.push(Halo { id, pos, vel: Vec2::ZERO, radius: 1.0, kind });
    id
}

fn add_power_up(s: &mut GameState, kind: PowerUpKind) -> BodyId {
    let id = s.alloc_id();
    s.power_ups.push(PowerUp {
        id,
        pos: Vec2::new(20.0, 8.0),
        vel: Vec2::ZERO,
        radius: 1.0,
        kind,
    });
    id
}

// ── init_state / new_game ─────────────────────────────────────────────────────

#[test]
fn init_state_starts_at_menu() {
    let s = init_state(GameConfig::default(), 40, 24, 77);
    assert_eq!(s.status, GameStatus::GameOver);
    assert!(s.menu.is_shown());
    assert!(s.menu.touchable);
    assert_eq!(s.menu.top_score, 77);
    assert!(s.balls.is_empty() && s.halos.is_empty());
    assert_eq!(s.cannon.pos, Vec2::new(20.0, 20.0));
}

#[test]
fn init_state_requests_music_when_configured() {
    let s = init_state(GameConfig::default(), 40, 24, 0);
    assert_eq!(s.events, vec![GameEvent::Music(true)]);

    let quiet = GameConfig { music_on_start: false, ..GameConfig::default() };
    let s = init_state(quiet, 40, 24, 0);
    assert!(s.events.is_empty());
    assert!(!s.menu.music_playing);
}

#[test]
fn init_state_clamps_tiny_terminals() {
    let s = init_state(GameConfig::default(), 10, 5, 0);
    assert_eq!(s.width, MIN_WIDTH);
    assert_eq!(s.height, MIN_HEIGHT);
}

#[test]
fn new_game_resets_round() {
    let mut s = make_state();
    s.score = 99;
    s.ammo = 1;
    s.point_value = 4;
    s.multi_mode = true;
    s.status = GameStatus::GameOver;
    s.menu.show();

    let s2 = new_game(&s);
    assert_eq!(s2.status, GameStatus::Playing);
    assert_eq!(s2.ammo, 5);
    assert_eq!(s2.score, 0);
    assert_eq!(s2.point_value, 1);
    assert!(!s2.multi_mode);
    assert_eq!(s2.shields.len(), 6);
    assert!(s2.shield_pool.is_empty());
    assert!(s2.life_bar.is_some());
    assert!(!s2.menu.is_shown());
    assert!(!s2.menu.touchable);
}

// ── fire ──────────────────────────────────────────────────────────────────────

#[test]
fn fire_scenario_five_rounds() {
    let mut s = make_state();
    assert_eq!(s.ammo, 5);
    for _ in 0..3 {
        s = fire(&s);
    }
    assert_eq!(s.ammo, 2);
    for _ in 0..3 {
        s = fire(&s);
    }
    assert_eq!(s.ammo, 0);
    assert_eq!(s.balls.len(), 5); // the sixth shot was refused
}

#[test]
fn fire_never_goes_below_zero() {
    let mut s = make_state();
    for _ in 0..50 {
        let before = s.ammo;
        s = fire(&s);
        assert!(s.ammo <= before);
    }
    assert_eq!(s.ammo, 0);
    assert_eq!(s.balls.len(), 5);
}

#[test]
fn fire_launches_along_barrel() {
    let s = make_state(); // cannon angle 0 → straight up
    let s2 = fire(&s);
    let b = &s2.balls[0];
    assert_eq!(b.pos, Vec2::new(20.0, 18.0));
    assert_eq!(b.vel, Vec2::new(0.0, -30.0));
    assert_eq!(b.bounces, 0);
    assert!(b.trail.is_some());
    assert!(s2.events.contains(&GameEvent::Sound(SoundCue::Laser)));
}

#[test]
fn fire_refused_at_menu() {
    let s = init_state(GameConfig::default(), 40, 24, 0);
    let s2 = fire(&s);
    assert_eq!(s2.ammo, s.ammo);
    assert!(s2.balls.is_empty());
}

#[test]
fn fire_refused_while_paused() {
    let s = set_paused(&make_state(), true);
    let s2 = fire(&s);
    assert_eq!(s2.ammo, 5);
    assert!(s2.balls.is_empty());
}

#[test]
fn fire_does_not_mutate_original() {
    let s = make_state();
    let _ = fire(&s);
    assert!(s.balls.is_empty());
    assert_eq!(s.ammo, 5);
}

#[test]
fn multi_mode_fires_a_volley() {
    let mut s = make_state();
    s.multi_mode = true;
    let mut s = fire(&s);
    assert_eq!(s.ammo, 4);
    assert_eq!(s.balls.len(), 1);
    assert_eq!(s.pending_shots.len(), 4);

    let mut rng = seeded_rng();
    for _ in 0..s.config.volley_delay_frames() {
        s = tick(&s, &mut rng);
    }
    assert_eq!(s.balls.len(), 2);
    assert_eq!(s.pending_shots.len(), 3);
}

#[test]
fn multi_mode_cost_is_configurable() {
    let config = GameConfig { multi_shot_cost: 2, ..GameConfig::default() };
    let mut s = new_game(&init_state(config, 40, 24, 0));
    s.multi_mode = true;
    s.ammo = 3;
    let s = fire(&s);
    // 1 left cannot pay for another volley: multi mode ends and ammo refills
    assert!(!s.multi_mode);
    assert_eq!(s.ammo, 5);
    let s2 = fire(&s);
    assert_eq!(s2.ammo, 4);
    assert_eq!(s2.balls.len(), s.balls.len() + 1);
}

#[test]
fn multi_mode_with_uneven_cost_never_strands_the_player() {
    let config = GameConfig { multi_shot_cost: 3, ..GameConfig::default() };
    let mut s = new_game(&init_state(config, 40, 24, 0));
    s.multi_mode = true;
    s.ammo = s.config.max_ammo;
    let mut rng = seeded_rng();
    for _ in 0..200 {
        s = fire(&s);
        s = tick(&s, &mut rng);
        if !s.is_playing() {
            break;
        }
        assert!(s.ammo > 0 || !s.multi_mode, "multi mode stuck with ammo {}", s.ammo);
        if s.multi_mode {
            assert!(s.ammo >= s.config.multi_shot_cost);
        }
    }
}

#[test]
fn multi_mode_ends_when_spent() {
    let mut s = make_state();
    s.multi_mode = true;
    s.ammo = 1;
    let s2 = fire(&s);
    assert!(!s2.multi_mode);
    assert_eq!(s2.ammo, 5);
}

// ── pause ─────────────────────────────────────────────────────────────────────

#[test]
fn paused_ticks_change_nothing() {
    let mut s = make_state();
    for _ in 0..3 {
        s = fire(&s);
    }
    s.score = 30;
    let s = set_paused(&s, true);
    assert!(s.game_paused);

    let mut rng = seeded_rng();
    let mut t = s.clone();
    for _ in 0..200 {
        t = tick(&t, &mut rng);
    }
    assert_eq!(t.score, 30);
    assert_eq!(t.ammo, 2);
    assert_eq!(t.frame, s.frame);
    assert_eq!(t.balls, s.balls);
}

#[test]
fn paused_contacts_do_not_score() {
    let mut s = make_state();
    let ball = add_ball(&mut s, Vec2::new(10.0, 10.0), Vec2::ZERO);
    let halo = add_halo(&mut s, Vec2::new(10.0, 10.0), HaloKind::Normal);
    let mut s = set_paused(&s, true);
    s.on_contact(Body::Ball(ball), Body::Halo(halo));
    assert_eq!(s.score, 0);
    assert_eq!(s.halos.len(), 1);
}

#[test]
fn pause_toggles_trail_emitters() {
    let s = fire(&make_state());
    let paused = toggle_pause(&s);
    assert!(paused.game_paused);
    assert!(!paused.balls[0].trail.as_ref().unwrap().is_emitting());
    let resumed = toggle_pause(&paused);
    assert!(!resumed.game_paused);
    assert!(resumed.balls[0].trail.as_ref().unwrap().is_emitting());
}

#[test]
fn paused_frames_leave_trail_in_place() {
    let mut rng = seeded_rng();
    let mut s = fire(&make_state());
    for _ in 0..3 {
        s = tick(&s, &mut rng);
    }
    let before: Vec<Vec2> = s.balls[0].trail.as_ref().unwrap().points().copied().collect();
    assert!(!before.is_empty());

    let mut paused = toggle_pause(&s);
    for _ in 0..10 {
        paused = tick(&paused, &mut rng);
    }
    let trail = paused.balls[0].trail.as_ref().unwrap();
    assert!(!trail.is_emitting());
    assert_eq!(trail.points().copied().collect::<Vec<_>>(), before);
}

// ── resize ────────────────────────────────────────────────────────────────────

#[test]
fn resize_relays_furniture() {
    let s = resize(&make_state(), 60, 30);
    assert_eq!((s.width, s.height), (60, 30));
    assert_eq!(s.bounds.right, 59.0);
    assert_eq!(s.bounds.bottom, 28.0);
    assert_eq!(s.cannon.pos, Vec2::new(30.0, 26.0));
    assert_eq!(s.life_bar.as_ref().unwrap().y, 27.0);
    for shield in &s.shields {
        assert_eq!(shield.center.y, 24.0);
        assert!(s.bounds.contains(shield.center));
    }
    let xs: Vec<f32> = s.shields.iter().map(|sh| sh.center.x).collect();
    assert!(xs.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn resize_moves_pooled_shields_too() {
    let mut s = make_state();
    let gone = s.shields.remove(5);
    s.shield_pool.push(gone);
    let s = resize(&s, 60, 30);
    assert_eq!(s.shield_pool[0].slot, 5);
    assert!(s.shield_pool[0].center.x > s.shields[4].center.x);
    assert_eq!(s.shield_pool[0].center.y, 24.0);
}

#[test]
fn resize_pulls_bodies_into_smaller_field() {
    let mut s = resize(&make_state(), 80, 30);
    add_ball(&mut s, Vec2::new(70.0, 27.0), Vec2::new(0.0, -30.0));
    add_halo(&mut s, Vec2::new(75.0, 10.0), HaloKind::Normal);
    let s = resize(&s, 40, 24);
    assert!(s.bounds.contains(s.balls[0].pos));
    assert!(s.halos[0].pos.x <= s.bounds.right);

    let mut rng = seeded_rng();
    let next = tick(&s, &mut rng);
    assert_eq!(next.balls.len(), 1);
}

#[test]
fn resize_clamps_to_minimum_and_keeps_score() {
    let mut s = make_state();
    s.score = 7;
    let s = resize(&s, 10, 5);
    assert_eq!((s.width, s.height), (MIN_WIDTH, MIN_HEIGHT));
    assert_eq!(s.score, 7);
    assert!(s.is_playing());
}

#[test]
fn pause_ignored_at_menu() {
    let s = init_state(GameConfig::default(), 40, 24, 0);
    assert!(!set_paused(&s, true).game_paused);
}

// ── contacts: scoring ─────────────────────────────────────────────────────────

#[test]
fn scoring_adds_point_value() {
    let mut s = make_state();
    s.point_value = 10;

    let ball = add_ball(&mut s, Vec2::new(10.0, 10.0), Vec2::ZERO);
    let halo = add_halo(&mut s, Vec2::new(10.0, 10.0), HaloKind::Normal);
    s.on_contact(Body::Ball(ball), Body::Halo(halo));
    assert_eq!(s.score, 10);

    let ball = add_ball(&mut s, Vec2::new(30.0, 10.0), Vec2::ZERO);
    let halo = add_halo(&mut s, Vec2::new(30.0, 10.0), HaloKind::Normal);
    s.on_contact(Body::Halo(halo), Body::Ball(ball)); // either order
    assert_eq!(s.score, 20);

    assert!(s.balls.is_empty());
    assert!(s.halos.is_empty());
    assert_eq!(s.explosions.len(), 2);
    assert_eq!(s.kill_count, 2);
}

#[test]
fn multiplier_halo_raises_point_value_after_scoring() {
    let mut s = make_state();
    let ball = add_ball(&mut s, Vec2::new(10.0, 10.0), Vec2::ZERO);
    let halo = add_halo(&mut s, Vec2::new(10.0, 10.0), HaloKind::Multiplier);
    s.on_contact(Body::Ball(ball), Body::Halo(halo));
    assert_eq!(s.score, 1);
    assert_eq!(s.point_value, 2);
}

#[test]
fn bomb_halo_clears_the_screen() {
    let mut s = make_state();
    for x in [5.0, 12.0, 28.0] {
        add_halo(&mut s, Vec2::new(x, 6.0), HaloKind::Normal);
    }
    let ball = add_ball(&mut s, Vec2::new(20.0, 10.0), Vec2::ZERO);
    let bomb = add_halo(&mut s, Vec2::new(20.0, 10.0), HaloKind::Bomb);
    s.on_contact(Body::Ball(ball), Body::Halo(bomb));
    assert!(s.halos.is_empty());
    assert_eq!(s.score, 1); // only the bomb itself scores
    assert_eq!(s.explosions.len(), 4);
}

#[test]
fn destroyed_ball_cannot_score_twice() {
    let mut s = make_state();
    let ball = add_ball(&mut s, Vec2::new(10.0, 10.0), Vec2::ZERO);
    let h1 = add_halo(&mut s, Vec2::new(10.0, 10.0), HaloKind::Normal);
    let h2 = add_halo(&mut s, Vec2::new(10.5, 10.0), HaloKind::Normal);
    s.on_contact(Body::Ball(ball), Body::Halo(h1));
    s.on_contact(Body::Ball(ball), Body::Halo(h2));
    assert_eq!(s.score, 1);
    assert_eq!(s.halos.len(), 1);
}

#[test]
fn every_tenth_kill_sends_a_multi_shot_power_up() {
    let mut s = make_state();
    s.kill_count = 9;
    let ball = add_ball(&mut s, Vec2::new(10.0, 10.0), Vec2::ZERO);
    let halo = add_halo(&mut s, Vec2::new(10.0, 10.0), HaloKind::Normal);
    s.on_contact(Body::Ball(ball), Body::Halo(halo));
    assert_eq!(s.power_ups.len(), 1);
    assert_eq!(s.power_ups[0].kind, PowerUpKind::MultiShot);
    assert!(s.power_ups[0].vel.x > 0.0);
}

// ── contacts: bounces, shields, power-ups ────────────────────────────────────

#[test]
fn ball_wears_out_after_max_bounces() {
    let mut s = make_state();
    s.point_value = 3;
    let ball = add_ball(&mut s, Vec2::new(2.0, 10.0), Vec2::ZERO);
    for n in 1..=3 {
        s.on_contact(Body::Ball(ball), Body::Edge);
        assert_eq!(s.ball(ball).unwrap().bounces, n);
    }
    assert_eq!(s.point_value, 3);

    s.on_contact(Body::Edge, Body::Ball(ball));
    assert!(s.ball(ball).is_none());
    assert_eq!(s.point_value, 1);
}

#[test]
fn halo_destroys_shield() {
    let mut s = make_state();
    let shield = s.shields[0].clone();
    let halo = add_halo(&mut s, shield.center, HaloKind::Normal);
    s.on_contact(Body::Shield(shield.id), Body::Halo(halo));
    assert_eq!(s.shields.len(), 5);
    assert_eq!(s.shield_pool, vec![shield]);
    assert!(s.halos.is_empty());
    assert_eq!(s.score, 0);
}

#[test]
fn shield_power_up_restores_pooled_shield() {
    let mut s = make_state();
    let lost = s.shields.remove(2);
    s.shield_pool.push(lost.clone());
    let power_up = add_power_up(&mut s, PowerUpKind::Shield);
    let ball = add_ball(&mut s, Vec2::new(20.0, 8.0), Vec2::ZERO);
    s.on_contact(Body::PowerUp(power_up), Body::Ball(ball));
    assert!(s.shield_pool.is_empty());
    assert!(s.shields.contains(&lost));
    assert!(s.power_ups.is_empty());
    assert!(s.balls.is_empty());
}

#[test]
fn multi_shot_power_up_enters_multi_mode() {
    let mut s = make_state();
    s.ammo = 1;
    let power_up = add_power_up(&mut s, PowerUpKind::MultiShot);
    let ball = add_ball(&mut s, Vec2::new(20.0, 8.0), Vec2::ZERO);
    s.on_contact(Body::Ball(ball), Body::PowerUp(power_up));
    assert!(s.multi_mode);
    assert_eq!(s.ammo, 5);
}

#[test]
fn unknown_pairs_are_ignored() {
    let mut s = make_state();
    let before = s.clone();
    s.on_contact(Body::Shield(s.shields[0].id), Body::Edge);
    s.on_contact(Body::LifeBar, Body::Edge);
    s.on_contact(Body::Ball(BodyId(9999)), Body::Halo(BodyId(9998)));
    s.on_contact(Body::Halo(BodyId(9998)), Body::LifeBar);
    assert_eq!(s.score, before.score);
    assert_eq!(s.shields, before.shields);
    assert!(s.life_bar.is_some());
    assert!(s.events.is_empty());
}

// ── tick ──────────────────────────────────────────────────────────────────────

#[test]
fn tick_moves_ball_and_trail_follows() {
    let s = fire(&make_state());
    let s2 = tick(&s, &mut seeded_rng());
    let b = &s2.balls[0];
    assert_eq!(s2.frame, s.frame + 1);
    assert!(b.pos.y < s.balls[0].pos.y);
    assert_eq!(b.trail.as_ref().unwrap().head(), Some(b.pos));
}

#[test]
fn tick_ball_leaving_top_resets_point_value() {
    let mut s = make_state();
    s.point_value = 5;
    add_ball(&mut s, Vec2::new(20.0, 2.5), Vec2::new(0.0, -30.0));
    let s2 = tick(&s, &mut seeded_rng());
    assert!(s2.balls.is_empty());
    assert_eq!(s2.point_value, 1);
}

#[test]
fn tick_ball_bounces_off_wall() {
    let mut s = make_state();
    let ball = add_ball(&mut s, Vec2::new(1.8, 10.0), Vec2::new(-15.0, 0.0));
    let s2 = tick(&s, &mut seeded_rng());
    let b = s2.ball(ball).unwrap();
    assert_eq!(b.bounces, 1);
    assert!(b.vel.x > 0.0);
    assert!(s2.events.contains(&GameEvent::Sound(SoundCue::Bounce)));
}

#[test]
fn tick_ball_hits_halo_scores() {
    let mut s = make_state();
    add_ball(&mut s, Vec2::new(20.0, 14.0), Vec2::new(0.0, -30.0));
    add_halo(&mut s, Vec2::new(20.0, 12.0), HaloKind::Normal);
    let s2 = tick(&s, &mut seeded_rng());
    assert_eq!(s2.score, 1);
    assert!(s2.halos.is_empty());
    assert!(s2.balls.is_empty());
}

#[test]
fn tick_regenerates_ammo() {
    let mut s = make_state();
    for _ in 0..3 {
        s = fire(&s);
    }
    assert_eq!(s.ammo, 2);
    let mut rng = seeded_rng();
    for _ in 0..31 {
        s = tick(&s, &mut rng);
    }
    assert_eq!(s.ammo, 3);
}

#[test]
fn tick_no_regeneration_in_multi_mode() {
    let mut s = make_state();
    s.multi_mode = true;
    s.ammo = 2;
    let mut rng = seeded_rng();
    for _ in 0..90 {
        s = tick(&s, &mut rng);
    }
    assert_eq!(s.ammo, 2);
}

#[test]
fn tick_spawns_halos_over_time() {
    let mut s = make_state();
    let mut rng = seeded_rng();
    for _ in 0..65 {
        s = tick(&s, &mut rng);
    }
    assert_eq!(s.halos.len(), 1);
    let h = &s.halos[0];
    assert!(h.vel.y > 0.0, "halos fall");
    assert!(h.pos.x >= s.bounds.left && h.pos.x <= s.bounds.right);
    assert!(s.halo_spawn_rate > 1.0);
}

#[test]
fn fifth_halo_on_screen_is_a_bomb() {
    let mut s = make_state();
    for x in [5.0, 12.0, 26.0, 33.0] {
        add_halo(&mut s, Vec2::new(x, 5.0), HaloKind::Normal);
    }
    s.halo_timer = s.config.halo_spawn_secs;
    let s2 = tick(&s, &mut seeded_rng());
    assert_eq!(s2.halos.len(), 5);
    assert_eq!(s2.halos[4].kind, HaloKind::Bomb);
}

#[test]
fn spawn_rate_is_capped() {
    let mut s = make_state();
    s.halo_spawn_rate = 1.499;
    s.halo_timer = s.config.halo_spawn_secs;
    let s2 = tick(&s, &mut seeded_rng());
    assert_eq!(s2.halo_spawn_rate, 1.5);
}

#[test]
fn shield_power_up_only_when_pool_has_shields() {
    let mut s = make_state();
    s.shield_up_timer = s.config.shield_power_up_secs;
    let s2 = tick(&s, &mut seeded_rng());
    assert!(s2.power_ups.is_empty());

    let lost = s.shields.remove(0);
    s.shield_pool.push(lost);
    let s3 = tick(&s, &mut seeded_rng());
    assert_eq!(s3.power_ups.len(), 1);
    assert_eq!(s3.power_ups[0].kind, PowerUpKind::Shield);
}

#[test]
fn tick_halo_reaching_life_bar_ends_game() {
    let mut s = make_state();
    s.shields.clear();
    s.score = 42;
    s.menu.top_score = 10;
    let id = s.alloc_id();
    s.halos.push(Halo {
        id,
        pos: Vec2::new(20.0, 19.9),
        vel: Vec2::new(0.0, 4.0),
        radius: 1.0,
        kind: HaloKind::Normal,
    });
    let s2 = tick(&s, &mut seeded_rng());
    assert_eq!(s2.status, GameStatus::GameOver);
    assert!(s2.menu.is_shown());
    assert!(s2.menu.touchable);
    assert_eq!(s2.menu.score, 42);
    assert_eq!(s2.menu.top_score, 42);
    assert!(s2.events.contains(&GameEvent::GameOver { score: 42 }));
    assert!(s2.events.contains(&GameEvent::NewTopScore(42)));
    assert!(s2.life_bar.is_none());
    assert!(s2.halos.is_empty());
}

#[test]
fn top_score_never_drops() {
    let mut s = make_state();
    s.shields.clear();
    s.score = 3;
    s.menu.top_score = 100;
    s.life_bar = None; // halo already got through this tick
    let s2 = tick(&s, &mut seeded_rng());
    assert_eq!(s2.status, GameStatus::GameOver);
    assert_eq!(s2.menu.top_score, 100);
    assert_eq!(s2.menu.score, 3);
    assert!(!s2
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::NewTopScore(_))));
}

#[test]
fn cannon_sweep_stays_in_range() {
    let mut s = init_state(GameConfig::default(), 40, 24, 0);
    let max = s.config.cannon_sweep_degrees.to_radians();
    let mut rng = seeded_rng();
    let mut reversed = false;
    for _ in 0..200 {
        s = tick(&s, &mut rng);
        assert!(s.cannon.angle.abs() <= max + 1e-5);
        reversed |= s.cannon.turn_dir < 0.0;
    }
    assert!(reversed);
}

// ── menu routing & events ────────────────────────────────────────────────────

#[test]
fn touch_play_starts_a_game() {
    let s = init_state(GameConfig::default(), 40, 24, 0);
    let (col, row) = MenuLayout::for_size(40, 24).play.center();
    let s2 = touch_menu(&s, col, row);
    assert_eq!(s2.status, GameStatus::Playing);
    assert!(!s2.menu.is_shown());
}

#[test]
fn touch_ignored_while_menu_hidden() {
    let s = make_state();
    let (col, row) = MenuLayout::for_size(40, 24).music.center();
    let s2 = touch_menu(&s, col, row);
    assert_eq!(s2.menu, s.menu);
}

#[test]
fn toggle_music_emits_event() {
    let s = make_state();
    let s2 = toggle_music(&s);
    assert!(!s2.menu.music_playing);
    assert_eq!(s2.events, vec![GameEvent::Music(false)]);
}

#[test]
fn take_events_empties_queue() {
    let mut s = fire(&make_state());
    let events = take_events(&mut s);
    assert_eq!(events, vec![GameEvent::Sound(SoundCue::Laser)]);
    assert!(s.events.is_empty());
}
