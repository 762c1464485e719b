//! Probabilistic spawning
//!
//! Each roll is independent per tick. Enemy pressure scales with level through
//! the spawn chance alone.

use glam::Vec2;
use rand::Rng;

use super::entity::{Coin, Enemy, EnemyKind, Playfield, PowerUp, PowerUpKind};
use crate::consts::*;
use crate::tuning::Tuning;

/// Random x for a box of `width` so it spawns fully inside the playfield
fn spawn_x<R: Rng + ?Sized>(rng: &mut R, playfield: &Playfield, width: f32) -> f32 {
    rng.random::<f32>() * (playfield.width - width).max(0.0)
}

/// Roll for an enemy: chance `enemy_chance_per_level * level`
pub fn roll_enemy<R: Rng + ?Sized>(
    rng: &mut R,
    playfield: &Playfield,
    tuning: &Tuning,
    level: u32,
    game_speed: f32,
) -> Option<Enemy> {
    let chance = tuning.enemy_chance_per_level * level as f64;
    if rng.random::<f64>() >= chance {
        return None;
    }
    Some(spawn_enemy(rng, playfield, tuning, game_speed))
}

/// Place an enemy just above the top edge
pub fn spawn_enemy<R: Rng + ?Sized>(
    rng: &mut R,
    playfield: &Playfield,
    tuning: &Tuning,
    game_speed: f32,
) -> Enemy {
    let x = spawn_x(rng, playfield, ENEMY_SIZE);
    let speed = game_speed + rng.random::<f32>() * tuning.enemy_speed_spread;
    Enemy {
        pos: Vec2::new(x, -ENEMY_SIZE),
        size: Vec2::splat(ENEMY_SIZE),
        speed,
        kind: EnemyKind::Basic,
    }
}

/// Roll for a coin: fixed chance per tick
pub fn roll_coin<R: Rng + ?Sized>(
    rng: &mut R,
    playfield: &Playfield,
    tuning: &Tuning,
    game_speed: f32,
) -> Option<Coin> {
    if rng.random::<f64>() >= tuning.coin_chance {
        return None;
    }
    let x = spawn_x(rng, playfield, COIN_SIZE);
    Some(Coin {
        pos: Vec2::new(x, -COIN_SIZE),
        size: Vec2::splat(COIN_SIZE),
        speed: game_speed,
        rotation: 0.0,
    })
}

/// Roll for a power-up drop of a random kind
pub fn roll_power_up<R: Rng + ?Sized>(
    rng: &mut R,
    playfield: &Playfield,
    tuning: &Tuning,
    game_speed: f32,
) -> Option<PowerUp> {
    if rng.random::<f64>() >= tuning.power_up_chance {
        return None;
    }
    let kind = PowerUpKind::ALL[rng.random_range(0..PowerUpKind::ALL.len())];
    let x = spawn_x(rng, playfield, POWER_UP_SIZE);
    Some(PowerUp {
        pos: Vec2::new(x, -POWER_UP_SIZE),
        size: Vec2::splat(POWER_UP_SIZE),
        speed: game_speed,
        kind,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_enemy_spawns_above_top_within_width() {
        let mut rng = Pcg32::seed_from_u64(1);
        let field = Playfield::new(300.0);
        let tuning = Tuning::default();
        for _ in 0..200 {
            let enemy = spawn_enemy(&mut rng, &field, &tuning, 2.0);
            assert_eq!(enemy.pos.y, -ENEMY_SIZE);
            assert!(enemy.pos.x >= 0.0 && enemy.pos.x + enemy.size.x <= field.width);
            assert!(enemy.speed >= 2.0 && enemy.speed < 4.0);
        }
    }

    #[test]
    fn test_zero_chance_never_spawns() {
        let mut rng = Pcg32::seed_from_u64(2);
        let field = Playfield::default();
        let tuning = Tuning::without_spawns();
        for _ in 0..1000 {
            assert!(roll_enemy(&mut rng, &field, &tuning, 10, 2.0).is_none());
            assert!(roll_coin(&mut rng, &field, &tuning, 2.0).is_none());
            assert!(roll_power_up(&mut rng, &field, &tuning, 2.0).is_none());
        }
    }

    #[test]
    fn test_certain_chance_always_spawns() {
        let mut rng = Pcg32::seed_from_u64(3);
        let field = Playfield::default();
        let tuning = Tuning {
            enemy_chance_per_level: 0.5,
            coin_chance: 1.0,
            ..Tuning::default()
        };
        // 0.5 * level 2 == 1.0
        for _ in 0..100 {
            assert!(roll_enemy(&mut rng, &field, &tuning, 2, 2.0).is_some());
            let coin = roll_coin(&mut rng, &field, &tuning, 3.5).unwrap();
            assert_eq!(coin.speed, 3.5);
            assert_eq!(coin.rotation, 0.0);
        }
    }

    #[test]
    fn test_enemy_rate_scales_with_level() {
        let field = Playfield::default();
        let tuning = Tuning::default();
        let count = |level: u32| {
            let mut rng = Pcg32::seed_from_u64(42);
            (0..10_000)
                .filter(|_| roll_enemy(&mut rng, &field, &tuning, level, 2.0).is_some())
                .count()
        };
        let level1 = count(1);
        let level3 = count(3);
        // ~200 vs ~600 expected
        assert!(level1 > 100 && level1 < 300, "level 1 spawned {level1}");
        assert!(level3 > 2 * level1, "level 3 spawned {level3}");
    }

    #[test]
    fn test_same_seed_same_spawns() {
        let field = Playfield::default();
        let tuning = Tuning::default();
        let mut a = Pcg32::seed_from_u64(99);
        let mut b = Pcg32::seed_from_u64(99);
        for _ in 0..50 {
            let ea = spawn_enemy(&mut a, &field, &tuning, 2.0);
            let eb = spawn_enemy(&mut b, &field, &tuning, 2.0);
            assert_eq!(ea.pos, eb.pos);
            assert_eq!(ea.speed, eb.speed);
        }
    }
}
