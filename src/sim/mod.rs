//! Simulation module
//!
//! All gameplay logic lives here. This module must stay presentation-free:
//! - Seeded RNG only
//! - Effect timers on the simulation clock, never wall-clock callbacks
//! - No rendering or platform dependencies

pub mod collision;
pub mod effects;
pub mod entity;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Aabb, Bounds, collides};
pub use effects::ActiveEffects;
pub use entity::{
    Coin, Enemy, EnemyKind, Particle, ParticleTint, Player, Playfield, PowerUp, PowerUpKind,
    Projectile,
};
pub use state::{GameEvent, GamePhase, GameState, Session};
pub use tick::{TickInput, tick};
