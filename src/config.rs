//! Gameplay tunables.
//!
//! Every field has a default matching the classic Space Cannon feel, so a
//! config file only needs the values it wants to change.  Distances are in
//! terminal cells, speeds in cells per second, times in seconds.

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // ── Cannon & shots ───────────────────────────────────────────────────────
    /// Max swing either side of vertical.
    pub cannon_sweep_degrees: f32,
    pub cannon_turn_degrees_per_sec: f32,
    /// Barrel length; balls spawn at the muzzle.
    pub cannon_length: f32,
    pub shot_speed: f32,
    pub ball_radius: f32,
    /// Ball is removed on the bounce after this many.
    pub max_bounces: u32,
    pub trail_length: usize,

    // ── Ammo ─────────────────────────────────────────────────────────────────
    pub max_ammo: u32,
    pub ammo_regen_secs: f32,
    pub multi_shot_cost: u32,
    /// Balls launched per trigger in multi mode.
    pub multi_volley: u32,
    pub multi_volley_delay_secs: f32,

    // ── Halos ────────────────────────────────────────────────────────────────
    pub halo_radius: f32,
    pub halo_speed: f32,
    /// Heading range, measured from +x with y pointing down.
    pub halo_angle_min_degrees: f32,
    pub halo_angle_max_degrees: f32,
    pub halo_spawn_secs: f32,
    pub halo_spawn_accel: f32,
    pub halo_spawn_rate_max: f32,
    /// A halo spawned while this many are on screen becomes a bomb.
    pub bomb_halo_count: usize,
    pub multiplier_min_score: u32,
    /// One in N halos is a multiplier once the score allows it.
    pub multiplier_chance: u32,

    // ── Defences & power-ups ─────────────────────────────────────────────────
    pub shield_count: usize,
    pub shield_half_width: f32,
    pub shield_power_up_secs: f32,
    pub multi_power_up_kills: u32,
    pub power_up_radius: f32,
    pub power_up_speed: f32,

    // ── Presentation ─────────────────────────────────────────────────────────
    pub explosion_frames: u32,
    pub music_on_start: bool,
    pub fps: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            cannon_sweep_degrees: 80.0,
            cannon_turn_degrees_per_sec: 90.0,
            cannon_length: 2.0,
            shot_speed: 30.0,
            ball_radius: 0.5,
            max_bounces: 3,
            trail_length: 6,

            max_ammo: 5,
            ammo_regen_secs: 1.0,
            multi_shot_cost: 1,
            multi_volley: 5,
            multi_volley_delay_secs: 0.1,

            halo_radius: 1.0,
            halo_speed: 4.0,
            halo_angle_min_degrees: 20.0,
            halo_angle_max_degrees: 160.0,
            halo_spawn_secs: 2.0,
            halo_spawn_accel: 0.01,
            halo_spawn_rate_max: 1.5,
            bomb_halo_count: 4,
            multiplier_min_score: 10,
            multiplier_chance: 6,

            shield_count: 6,
            shield_half_width: 2.0,
            shield_power_up_secs: 15.0,
            multi_power_up_kills: 10,
            power_up_radius: 1.0,
            power_up_speed: 6.0,

            explosion_frames: 6,
            music_on_start: true,
            fps: 30,
        }
    }
}

impl GameConfig {
    /// Read a JSON config file; missing fields fall back to defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: GameConfig = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_ammo == 0 {
            bail!("max_ammo must be at least 1");
        }
        if self.multi_shot_cost == 0 {
            bail!("multi_shot_cost must be at least 1");
        }
        if self.multi_shot_cost > self.max_ammo {
            bail!(
                "multi_shot_cost ({}) exceeds max_ammo ({})",
                self.multi_shot_cost,
                self.max_ammo
            );
        }
        if self.multi_volley == 0 {
            bail!("multi_volley must be at least 1");
        }
        if self.fps == 0 {
            bail!("fps must be at least 1");
        }
        if self.halo_angle_min_degrees >= self.halo_angle_max_degrees {
            bail!(
                "halo angle range is empty ({} >= {})",
                self.halo_angle_min_degrees,
                self.halo_angle_max_degrees
            );
        }
        let positive = [
            ("shot_speed", self.shot_speed),
            ("halo_speed", self.halo_speed),
            ("power_up_speed", self.power_up_speed),
            ("ammo_regen_secs", self.ammo_regen_secs),
            ("halo_spawn_secs", self.halo_spawn_secs),
            ("shield_power_up_secs", self.shield_power_up_secs),
            ("ball_radius", self.ball_radius),
            ("halo_radius", self.halo_radius),
            ("power_up_radius", self.power_up_radius),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                bail!("{name} must be positive, got {value}");
            }
        }
        Ok(())
    }

    /// Seconds per frame.
    pub fn dt(&self) -> f32 {
        1.0 / self.fps as f32
    }

    /// Whole frames between the shots of one multi-mode volley.
    pub fn volley_delay_frames(&self) -> u32 {
        (self.multi_volley_delay_secs * self.fps as f32).round().max(1.0) as u32
    }
}
