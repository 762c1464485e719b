//! Simulation tick
//!
//! One call advances the playfield by one frame. Stage order matters: later
//! stages read what earlier ones wrote.

use glam::Vec2;

use super::collision::{Bounds, collides};
use super::entity::{Particle, ParticleTint, PowerUpKind};
use super::spawner;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::COIN_SPIN;

/// Input snapshot for a single tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Fire one volley this tick
    pub fire: bool,
}

impl TickInput {
    /// Unit movement direction (screen coordinates, +y is down)
    pub fn direction(&self) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.left {
            dir.x -= 1.0;
        }
        if self.right {
            dir.x += 1.0;
        }
        if self.up {
            dir.y -= 1.0;
        }
        if self.down {
            dir.y += 1.0;
        }
        dir
    }
}

/// Advance the game state by one tick. `dt` is the elapsed time in seconds and
/// only drives power-up timers; movement is per tick.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // Don't tick unless playing
    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;
    state.clock += dt.max(0.0) as f64;

    state.expire_effects();
    if input.fire {
        state.shoot();
    }

    move_player(state, input);
    advance_entities(state);
    cull(state);

    resolve_player_enemies(state);
    if state.phase != GamePhase::Playing {
        // Session is final once lives run out
        return;
    }
    resolve_projectile_enemies(state);
    resolve_player_coins(state);
    resolve_player_power_ups(state);

    spawn(state);
    state.check_level_up();
}

/// Apply held directions, keeping the whole ship on the playfield
fn move_player(state: &mut GameState, input: &TickInput) {
    let player = &mut state.player;
    let pos = player.pos + input.direction() * player.speed;
    player.pos = state.playfield.clamp_box(pos, player.size);
}

fn advance_entities(state: &mut GameState) {
    for enemy in &mut state.enemies {
        enemy.pos.y += enemy.speed;
    }
    for projectile in &mut state.projectiles {
        projectile.pos.y -= projectile.speed;
    }
    for coin in &mut state.coins {
        coin.pos.y += coin.speed;
        coin.rotation += COIN_SPIN;
    }
    for power_up in &mut state.power_ups {
        power_up.pos.y += power_up.speed;
    }
    let decay = state.tuning.particle_decay;
    for particle in &mut state.particles {
        particle.pos += particle.vel;
        particle.life -= decay;
    }
}

/// Drop everything that left the playfield or burnt out
fn cull(state: &mut GameState) {
    let height = state.playfield.height;
    state.enemies.retain(|e| e.pos.y <= height);
    state.projectiles.retain(|p| p.pos.y >= 0.0);
    state.coins.retain(|c| c.pos.y <= height);
    state.power_ups.retain(|p| p.pos.y <= height);
    state.particles.retain(|p| p.life > 0.0);
}

fn explode(state: &mut GameState, at: Vec2) {
    let burst = Particle::burst(
        &mut state.rng,
        at,
        state.tuning.explosion_particles,
        state.tuning.explosion_spread,
        ParticleTint::Explosion,
    );
    state.particles.extend(burst);
    state.emit(GameEvent::EnemyDestroyed);
}

fn sparkle(state: &mut GameState, at: Vec2) {
    let burst = Particle::burst(
        &mut state.rng,
        at,
        state.tuning.sparkle_particles,
        state.tuning.sparkle_spread,
        ParticleTint::Sparkle,
    );
    state.particles.extend(burst);
}

/// Rammed enemies always die; the player only loses a life without a shield
fn resolve_player_enemies(state: &mut GameState) {
    let player_box = state.player.bounds();
    let mut hits = Vec::new();
    state.enemies.retain(|enemy| {
        if collides(&player_box, enemy) {
            hits.push(enemy.pos);
            false
        } else {
            true
        }
    });

    for at in hits {
        if !state.player.shield && state.phase == GamePhase::Playing {
            state.lose_life();
        }
        explode(state, at);
    }
}

/// Each projectile takes out at most one enemy per tick (first match wins)
fn resolve_projectile_enemies(state: &mut GameState) {
    let enemies = &mut state.enemies;
    let mut kills = Vec::new();
    state.projectiles.retain(|projectile| {
        match enemies.iter().position(|enemy| collides(projectile, enemy)) {
            Some(index) => {
                kills.push(enemies.remove(index).pos);
                false
            }
            None => true,
        }
    });

    for at in kills {
        state.add_score(state.tuning.enemy_kill_score);
        explode(state, at);
    }
}

fn resolve_player_coins(state: &mut GameState) {
    let player_box = state.player.bounds();
    let mut collected = Vec::new();
    state.coins.retain(|coin| {
        if collides(&player_box, coin) {
            collected.push(coin.pos);
            false
        } else {
            true
        }
    });

    for at in collected {
        state.add_score(state.tuning.coin_score);
        state.emit(GameEvent::CoinCollected {
            value: state.tuning.coin_value,
        });
        sparkle(state, at);
    }
}

fn resolve_player_power_ups(state: &mut GameState) {
    let player_box = state.player.bounds();
    let mut collected: Vec<PowerUpKind> = Vec::new();
    state.power_ups.retain(|power_up| {
        if collides(&player_box, power_up) {
            collected.push(power_up.kind);
            false
        } else {
            true
        }
    });

    for kind in collected {
        state.activate_power_up(kind);
    }
}

fn spawn(state: &mut GameState) {
    let level = state.session.level;
    let speed = state.session.game_speed;

    if let Some(enemy) =
        spawner::roll_enemy(&mut state.rng, &state.playfield, &state.tuning, level, speed)
    {
        state.enemies.push(enemy);
    }
    if let Some(coin) = spawner::roll_coin(&mut state.rng, &state.playfield, &state.tuning, speed) {
        state.coins.push(coin);
    }
    if let Some(power_up) =
        spawner::roll_power_up(&mut state.rng, &state.playfield, &state.tuning, speed)
    {
        log::debug!("{} power-up dropped", power_up.kind.as_str());
        state.power_ups.push(power_up);
    }
}
