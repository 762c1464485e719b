//! Game state and core simulation types
//!
//! `GameState` is the whole context a tick needs: entities, session counters,
//! timed effects, phase and the seeded RNG. Nothing here is global.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::effects::{ActiveEffects, apply_capability};
use super::entity::{Coin, Enemy, Particle, Player, Playfield, PowerUp, PowerUpKind, Projectile};
use crate::consts::MULTI_SHOT_SPREAD;
use crate::tuning::Tuning;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Start screen, nothing simulated yet
    Menu,
    /// Active gameplay
    Playing,
    /// Frozen by the player
    Paused,
    /// Run ended (lives exhausted)
    GameOver,
}

/// Something that happened during a tick, for the UI and progression sink
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Points added to the session score
    ScoreAwarded { points: u64, total: u64 },
    /// Currency picked up
    CoinCollected { value: u64 },
    /// Enemy destroyed (by a shot or by ramming the player)
    EnemyDestroyed,
    /// Projectiles launched by one shot
    ShotFired { count: usize },
    /// Unshielded hit
    LifeLost { remaining: u8 },
    PowerUpActivated(PowerUpKind),
    PowerUpExpired(PowerUpKind),
    /// Score crossed a level threshold
    LevelUp { level: u32 },
    /// Lives reached zero
    GameOver { score: u64, level: u32 },
}

/// Per-run counters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub score: u64,
    /// Always `score / level_threshold + 1`
    pub level: u32,
    pub lives: u8,
    /// Base entity speed
    pub game_speed: f32,
}

impl Session {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            score: 0,
            level: 1,
            lives: tuning.starting_lives,
            game_speed: tuning.starting_game_speed,
        }
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub playfield: Playfield,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub session: Session,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub coins: Vec<Coin>,
    pub power_ups: Vec<PowerUp>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    pub effects: ActiveEffects,
    /// Simulation clock (seconds of play), drives effect expiry
    pub clock: f64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub(crate) rng: Pcg32,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64, playfield: Playfield) -> Self {
        Self::with_rng(Pcg32::seed_from_u64(seed), playfield, Tuning::default())
    }

    /// Create a game state around an existing RNG and balance. Invalid
    /// balance falls back to the defaults.
    pub fn with_rng(rng: Pcg32, playfield: Playfield, tuning: Tuning) -> Self {
        let tuning = tuning.checked();
        let player = Player::new(&playfield, tuning.player_speed);
        Self {
            playfield,
            session: Session::new(&tuning),
            tuning,
            phase: GamePhase::Menu,
            player,
            enemies: Vec::new(),
            projectiles: Vec::new(),
            coins: Vec::new(),
            power_ups: Vec::new(),
            particles: Vec::new(),
            effects: ActiveEffects::default(),
            clock: 0.0,
            time_ticks: 0,
            rng,
            events: Vec::new(),
        }
    }

    /// Replace the RNG (e.g. a fresh seed for a new run)
    pub fn reseed(&mut self, seed: u64) {
        self.rng = Pcg32::seed_from_u64(seed);
    }

    // === Phase transitions ===

    /// Menu -> Playing
    pub fn start(&mut self) -> bool {
        if self.phase != GamePhase::Menu {
            log::debug!("start ignored in {:?}", self.phase);
            return false;
        }
        self.reset();
        self.phase = GamePhase::Playing;
        true
    }

    /// Playing -> Paused
    pub fn pause(&mut self) -> bool {
        if self.phase != GamePhase::Playing {
            log::debug!("pause ignored in {:?}", self.phase);
            return false;
        }
        self.phase = GamePhase::Paused;
        true
    }

    /// Paused -> Playing
    pub fn resume(&mut self) -> bool {
        if self.phase != GamePhase::Paused {
            log::debug!("resume ignored in {:?}", self.phase);
            return false;
        }
        self.phase = GamePhase::Playing;
        true
    }

    /// Pause toggle (pause button / Escape)
    pub fn toggle_pause(&mut self) -> bool {
        match self.phase {
            GamePhase::Playing => self.pause(),
            GamePhase::Paused => self.resume(),
            _ => false,
        }
    }

    /// GameOver or Paused -> Playing with a fresh session
    pub fn restart(&mut self) -> bool {
        if !matches!(self.phase, GamePhase::GameOver | GamePhase::Paused) {
            log::debug!("restart ignored in {:?}", self.phase);
            return false;
        }
        self.reset();
        self.phase = GamePhase::Playing;
        true
    }

    /// Discard the session and every entity
    fn reset(&mut self) {
        self.session = Session::new(&self.tuning);
        self.player = Player::new(&self.playfield, self.tuning.player_speed);
        self.enemies.clear();
        self.projectiles.clear();
        self.coins.clear();
        self.power_ups.clear();
        self.particles.clear();
        self.effects.clear();
        self.clock = 0.0;
        self.time_ticks = 0;
        self.events.clear();
    }

    // === Player actions ===

    /// Fire one volley (three projectiles with multi-shot)
    pub fn shoot(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        let origin = self.player.muzzle();
        let speed = self.tuning.projectile_speed;
        self.projectiles.push(Projectile::new(origin, speed));

        let mut count = 1;
        if self.player.multi_shot {
            for dx in [-MULTI_SHOT_SPREAD, MULTI_SHOT_SPREAD] {
                let mut pos = origin;
                pos.x += dx;
                self.projectiles.push(Projectile::new(pos, speed));
            }
            count = 3;
        }
        self.emit(GameEvent::ShotFired { count });
    }

    /// Activate a power-up directly (power-up buttons)
    pub fn use_power_up(&mut self, kind: PowerUpKind) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.activate_power_up(kind);
    }

    pub(crate) fn activate_power_up(&mut self, kind: PowerUpKind) {
        self.effects
            .activate(kind, self.clock, self.tuning.power_up_duration);
        apply_capability(&mut self.player, kind, true, &self.tuning);
        log::debug!("{} active until {:.2}", kind.as_str(), self.clock + self.tuning.power_up_duration as f64);
        self.emit(GameEvent::PowerUpActivated(kind));
    }

    /// Revert every effect that has run its course
    pub(crate) fn expire_effects(&mut self) {
        for kind in self.effects.expire(self.clock) {
            apply_capability(&mut self.player, kind, false, &self.tuning);
            self.emit(GameEvent::PowerUpExpired(kind));
        }
    }

    // === Session bookkeeping ===

    pub(crate) fn add_score(&mut self, points: u64) {
        self.session.score += points;
        let total = self.session.score;
        self.emit(GameEvent::ScoreAwarded { points, total });
    }

    pub(crate) fn lose_life(&mut self) {
        self.session.lives = self.session.lives.saturating_sub(1);
        self.emit(GameEvent::LifeLost {
            remaining: self.session.lives,
        });
        if self.session.lives == 0 && self.phase == GamePhase::Playing {
            self.phase = GamePhase::GameOver;
            log::info!(
                "Game over: score {} at level {}",
                self.session.score,
                self.session.level
            );
            self.emit(GameEvent::GameOver {
                score: self.session.score,
                level: self.session.level,
            });
        }
    }

    /// Recompute level from score, speeding the game up on each level gained
    pub(crate) fn check_level_up(&mut self) {
        let new_level = self.tuning.level_for_score(self.session.score);
        if new_level > self.session.level {
            let gained = new_level - self.session.level;
            self.session.level = new_level;
            self.session.game_speed += self.tuning.speed_per_level * gained as f32;
            log::info!(
                "Level {} (game speed {:.1})",
                new_level,
                self.session.game_speed
            );
            self.emit(GameEvent::LevelUp { level: new_level });
        }
    }

    // === Events ===

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take every event produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playing() -> GameState {
        let mut state = GameState::with_rng(
            Pcg32::seed_from_u64(1),
            Playfield::default(),
            Tuning::without_spawns(),
        );
        assert!(state.start());
        state
    }

    #[test]
    fn test_initial_phase_is_menu() {
        let state = GameState::new(5, Playfield::default());
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.session.lives, 3);
        assert_eq!(state.session.level, 1);
        assert_eq!(state.session.game_speed, 2.0);
    }

    #[test]
    fn test_phase_transitions() {
        let mut state = playing();
        assert!(!state.start());
        assert!(!state.resume());
        assert!(state.pause());
        assert_eq!(state.phase, GamePhase::Paused);
        assert!(!state.pause());
        assert!(state.resume());
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(!state.restart());
    }

    #[test]
    fn test_toggle_pause() {
        let mut state = playing();
        assert!(state.toggle_pause());
        assert_eq!(state.phase, GamePhase::Paused);
        assert!(state.toggle_pause());
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_game_over_when_lives_run_out() {
        let mut state = playing();
        state.lose_life();
        state.lose_life();
        assert_eq!(state.phase, GamePhase::Playing);
        state.lose_life();
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.session.lives, 0);

        // Further hits cannot go negative or re-trigger game over
        state.lose_life();
        assert_eq!(state.session.lives, 0);
        let game_overs = state
            .drain_events()
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
        assert_eq!(game_overs, 1);
    }

    #[test]
    fn test_restart_resets_session() {
        let mut state = playing();
        state.add_score(4500);
        state.check_level_up();
        state.shoot();
        state.use_power_up(PowerUpKind::Shield);
        for _ in 0..3 {
            state.lose_life();
        }
        assert_eq!(state.phase, GamePhase::GameOver);

        assert!(state.restart());
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.session, Session::new(&state.tuning));
        assert!(state.projectiles.is_empty());
        assert!(!state.player.shield);
        assert!(!state.effects.is_active(PowerUpKind::Shield));
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_shoot_single() {
        let mut state = playing();
        state.shoot();
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.projectiles[0].pos, state.player.muzzle());
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::ShotFired { count: 1 }]
        );
    }

    #[test]
    fn test_shoot_multi() {
        let mut state = playing();
        state.use_power_up(PowerUpKind::Multi);
        state.shoot();
        assert_eq!(state.projectiles.len(), 3);
        let x = state.player.muzzle().x;
        let mut xs: Vec<f32> = state.projectiles.iter().map(|p| p.pos.x).collect();
        xs.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(xs, vec![x - 10.0, x, x + 10.0]);
    }

    #[test]
    fn test_actions_ignored_outside_playing() {
        let mut state = GameState::new(1, Playfield::default());
        state.shoot();
        state.use_power_up(PowerUpKind::Shield);
        assert!(state.projectiles.is_empty());
        assert!(!state.player.shield);

        state.start();
        state.pause();
        state.shoot();
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_level_up_bumps_speed_once() {
        let mut state = playing();
        state.add_score(1999);
        state.check_level_up();
        assert_eq!(state.session.level, 1);
        state.add_score(1);
        state.check_level_up();
        state.check_level_up();
        assert_eq!(state.session.level, 2);
        assert_eq!(state.session.game_speed, 2.5);
        let level_ups = state
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::LevelUp { .. }))
            .count();
        assert_eq!(level_ups, 1);
    }
}
