//! Space Adventure - A vertical space shooter arcade game
//!
//! Core modules:
//! - `sim`: Simulation (entities, collisions, spawning, power-ups, game state)
//! - `renderer`: Draw stage behind a 2D surface abstraction
//! - `platform`: Browser/native platform abstraction
//! - `persistence`: Progression storage with default fallback
//! - `progression`: Player advancement (XP, coins, best score)
//! - `tuning`: Data-driven game balance
//! - `game`: Orchestrates simulation, progression and notifications
//! - `highscores`, `ranking`: Local leaderboard and read-only ranking queries
//! - `audio`: Procedural sound effects (Web Audio on wasm)

pub mod audio;
pub mod game;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod progression;
pub mod ranking;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use game::Game;
pub use highscores::HighScores;
pub use progression::{Progression, ProgressionRecord};
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one display frame at 60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Playfield dimensions (logical units)
    pub const PLAYFIELD_HEIGHT: f32 = 500.0;
    pub const PLAYFIELD_MAX_WIDTH: f32 = 350.0;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 30.0;
    /// Distance from the bottom edge to the player's spawn point
    pub const PLAYER_SPAWN_OFFSET: f32 = 50.0;
    pub const PLAYER_HEALTH: u32 = 100;

    /// Enemy box
    pub const ENEMY_SIZE: f32 = 30.0;

    /// Projectile box
    pub const PROJECTILE_WIDTH: f32 = 4.0;
    pub const PROJECTILE_HEIGHT: f32 = 10.0;
    /// Horizontal spacing of multi-shot side projectiles
    pub const MULTI_SHOT_SPREAD: f32 = 10.0;

    /// Coin box
    pub const COIN_SIZE: f32 = 20.0;
    /// Coin spin per tick (radians, visual only)
    pub const COIN_SPIN: f32 = 0.1;

    /// Power-up box
    pub const POWER_UP_SIZE: f32 = 24.0;

    /// Shield ring radius around the player
    pub const SHIELD_RADIUS: f32 = 25.0;
}
