//! Entity records
//!
//! Plain data for everything that lives on the playfield. Behaviour lives in
//! `tick`; these types only know their own geometry.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{Aabb, Bounds};
use crate::consts::*;

/// The bounded space entities move within
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Default for Playfield {
    fn default() -> Self {
        Self {
            width: PLAYFIELD_MAX_WIDTH,
            height: PLAYFIELD_HEIGHT,
        }
    }
}

impl Playfield {
    /// Playfield for a container of the given width (capped at the max width)
    pub fn new(width: f32) -> Self {
        Self {
            width: width.clamp(PLAYER_SIZE, PLAYFIELD_MAX_WIDTH),
            height: PLAYFIELD_HEIGHT,
        }
    }

    /// Clamp a box position so the whole box stays inside the playfield
    pub fn clamp_box(&self, pos: Vec2, size: Vec2) -> Vec2 {
        Vec2::new(
            pos.x.clamp(0.0, (self.width - size.x).max(0.0)),
            pos.y.clamp(0.0, (self.height - size.y).max(0.0)),
        )
    }
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    /// Movement per tick
    pub speed: f32,
    pub health: u32,
    pub shield: bool,
    pub multi_shot: bool,
    pub speed_boost: bool,
}

impl Player {
    pub fn new(playfield: &Playfield, speed: f32) -> Self {
        let size = Vec2::splat(PLAYER_SIZE);
        let pos = Vec2::new(
            playfield.width / 2.0,
            playfield.height - PLAYER_SPAWN_OFFSET,
        );
        Self {
            pos: playfield.clamp_box(pos, size),
            size,
            speed,
            health: PLAYER_HEALTH,
            shield: false,
            multi_shot: false,
            speed_boost: false,
        }
    }

    /// Where the centre projectile of a volley starts
    pub fn muzzle(&self) -> Vec2 {
        Vec2::new(
            self.pos.x + self.size.x / 2.0 - PROJECTILE_WIDTH / 2.0,
            self.pos.y,
        )
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }
}

/// Enemy variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EnemyKind {
    #[default]
    Basic,
}

/// A descending enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    pub size: Vec2,
    /// Downward movement per tick
    pub speed: f32,
    pub kind: EnemyKind,
}

/// A player shot travelling upward
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub size: Vec2,
    /// Upward movement per tick
    pub speed: f32,
}

impl Projectile {
    pub fn new(pos: Vec2, speed: f32) -> Self {
        Self {
            pos,
            size: Vec2::new(PROJECTILE_WIDTH, PROJECTILE_HEIGHT),
            speed,
        }
    }
}

/// A spinning coin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coin {
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    /// Visual spin angle (radians), only ever increases
    pub rotation: f32,
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    Shield,
    Speed,
    Multi,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [PowerUpKind::Shield, PowerUpKind::Speed, PowerUpKind::Multi];

    pub fn as_str(&self) -> &'static str {
        match self {
            PowerUpKind::Shield => "shield",
            PowerUpKind::Speed => "speed",
            PowerUpKind::Multi => "multi",
        }
    }

    /// Parse the identifier used by the power-up buttons
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "shield" => Some(PowerUpKind::Shield),
            "speed" => Some(PowerUpKind::Speed),
            "multi" | "multishot" | "multi-shot" => Some(PowerUpKind::Multi),
            _ => None,
        }
    }

    /// Toast shown on activation
    pub fn activation_message(&self) -> &'static str {
        match self {
            PowerUpKind::Shield => "Shield activated!",
            PowerUpKind::Speed => "Speed boost!",
            PowerUpKind::Multi => "Multi-shot activated!",
        }
    }
}

/// A falling power-up capsule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub kind: PowerUpKind,
}

/// Particle colour family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleTint {
    /// Red, from destroyed enemies
    Explosion,
    /// Gold, from collected coins
    Sparkle,
}

/// A cosmetic particle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// 0-1, decreases every tick
    pub life: f32,
    pub tint: ParticleTint,
}

impl Particle {
    /// A burst of `count` particles at `origin`, each with a velocity drawn
    /// from `[-spread/2, spread/2]` on both axes
    pub fn burst<R: Rng + ?Sized>(
        rng: &mut R,
        origin: Vec2,
        count: usize,
        spread: f32,
        tint: ParticleTint,
    ) -> Vec<Particle> {
        (0..count)
            .map(|_| {
                let vx = (rng.random::<f32>() - 0.5) * spread;
                let vy = (rng.random::<f32>() - 0.5) * spread;
                Particle {
                    pos: origin,
                    vel: Vec2::new(vx, vy),
                    life: 1.0,
                    tint,
                }
            })
            .collect()
    }
}

macro_rules! impl_bounds {
    ($($ty:ty),*) => {
        $(impl Bounds for $ty {
            fn bounds(&self) -> Aabb {
                Aabb::new(self.pos, self.size)
            }
        })*
    };
}

impl_bounds!(Player, Enemy, Projectile, Coin, PowerUp);

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_player_spawns_bottom_center() {
        let field = Playfield::new(350.0);
        let player = Player::new(&field, 5.0);
        assert_eq!(player.pos, Vec2::new(175.0, 450.0));
        assert!(!player.shield && !player.multi_shot && !player.speed_boost);
    }

    #[test]
    fn test_playfield_width_is_capped() {
        assert_eq!(Playfield::new(1024.0).width, PLAYFIELD_MAX_WIDTH);
        assert_eq!(Playfield::new(300.0).width, 300.0);
        assert_eq!(Playfield::new(300.0).height, PLAYFIELD_HEIGHT);
    }

    #[test]
    fn test_muzzle_is_centered() {
        let mut player = Player::new(&Playfield::default(), 5.0);
        player.pos = Vec2::new(100.0, 400.0);
        assert_eq!(player.muzzle(), Vec2::new(113.0, 400.0));
    }

    #[test]
    fn test_burst_velocity_range() {
        let mut rng = Pcg32::seed_from_u64(7);
        let particles = Particle::burst(
            &mut rng,
            Vec2::new(10.0, 20.0),
            50,
            10.0,
            ParticleTint::Explosion,
        );
        assert_eq!(particles.len(), 50);
        for p in &particles {
            assert_eq!(p.pos, Vec2::new(10.0, 20.0));
            assert_eq!(p.life, 1.0);
            assert!(p.vel.x >= -5.0 && p.vel.x <= 5.0);
            assert!(p.vel.y >= -5.0 && p.vel.y <= 5.0);
        }
    }

    #[test]
    fn test_power_up_kind_parse() {
        assert_eq!(PowerUpKind::from_str("Shield"), Some(PowerUpKind::Shield));
        assert_eq!(PowerUpKind::from_str("multi"), Some(PowerUpKind::Multi));
        assert_eq!(PowerUpKind::from_str("laser"), None);
        for kind in PowerUpKind::ALL {
            assert_eq!(PowerUpKind::from_str(kind.as_str()), Some(kind));
        }
    }
}
