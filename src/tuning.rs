//! Data-driven game balance
//!
//! Every knob the simulation reads lives here so a JSON override can retune the
//! game without touching code. Missing fields keep their defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure to read a balance override
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("invalid tuning json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value: {0}")]
    Invalid(&'static str),
}

/// Game balance parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Session ===
    /// Lives at the start of a session
    pub starting_lives: u8,
    /// Base entity speed at level 1
    pub starting_game_speed: f32,
    /// Score needed per level
    pub level_threshold: u64,
    /// Game speed added per level gained
    pub speed_per_level: f32,

    // === Scoring ===
    pub enemy_kill_score: u64,
    pub coin_score: u64,
    /// Coins awarded per collected coin
    pub coin_value: u64,
    /// Score points per XP point
    pub xp_divisor: u64,

    // === Player ===
    pub player_speed: f32,
    pub boosted_speed: f32,

    // === Projectiles ===
    pub projectile_speed: f32,

    // === Spawning ===
    /// Enemy spawn chance per tick, multiplied by level
    pub enemy_chance_per_level: f64,
    /// Extra enemy speed drawn from [0, spread)
    pub enemy_speed_spread: f32,
    /// Coin spawn chance per tick
    pub coin_chance: f64,
    /// Power-up drop chance per tick
    pub power_up_chance: f64,

    // === Power-ups ===
    /// Effect duration (seconds of play)
    pub power_up_duration: f32,

    // === Particles ===
    pub explosion_particles: usize,
    /// Explosion velocity range is [-spread/2, spread/2] per axis
    pub explosion_spread: f32,
    pub sparkle_particles: usize,
    pub sparkle_spread: f32,
    /// Life lost per tick
    pub particle_decay: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            starting_lives: 3,
            starting_game_speed: 2.0,
            level_threshold: 2000,
            speed_per_level: 0.5,

            enemy_kill_score: 100,
            coin_score: 50,
            coin_value: 1,
            xp_divisor: 10,

            player_speed: 5.0,
            boosted_speed: 8.0,

            projectile_speed: 8.0,

            enemy_chance_per_level: 0.02,
            enemy_speed_spread: 2.0,
            coin_chance: 0.01,
            power_up_chance: 0.003,

            power_up_duration: 5.0,

            explosion_particles: 10,
            explosion_spread: 10.0,
            sparkle_particles: 5,
            sparkle_spread: 5.0,
            particle_decay: 0.02,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override on top of the defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values that would break session invariants
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.level_threshold == 0 {
            return Err(TuningError::Invalid("level_threshold must be positive"));
        }
        if self.xp_divisor == 0 {
            return Err(TuningError::Invalid("xp_divisor must be positive"));
        }
        if self.starting_lives == 0 {
            return Err(TuningError::Invalid("starting_lives must be positive"));
        }
        if self.particle_decay <= 0.0 {
            return Err(TuningError::Invalid("particle_decay must be positive"));
        }
        Ok(())
    }

    /// Self if valid, otherwise the defaults
    pub fn checked(self) -> Self {
        match self.validate() {
            Ok(()) => self,
            Err(e) => {
                log::warn!("Ignoring tuning override ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Level for a given score (1-based)
    pub fn level_for_score(&self, score: u64) -> u32 {
        (score / self.level_threshold.max(1)) as u32 + 1
    }

    /// Tuning with every random spawn disabled (scripted scenarios, tests)
    pub fn without_spawns() -> Self {
        Self {
            enemy_chance_per_level: 0.0,
            coin_chance: 0.0,
            power_up_chance: 0.0,
            ..Self::default()
        }
    }
}
