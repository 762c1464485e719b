//! Game orchestrator
//!
//! Ties one `GameState` to the player's `Progression`: every frame runs the
//! simulation, then forwards what happened (XP, coins, the end of a run) to
//! the progression sink and queues toast notifications for the UI.

use crate::persistence::ProgressionStore;
use crate::progression::{Progression, RunSummary, ShopError, ship_cost};
use crate::ranking::{ACHIEVEMENT_XP, earned_achievements};
use crate::sim::{GameEvent, GamePhase, GameState, Playfield, PowerUpKind, TickInput, tick};
use crate::tuning::Tuning;
use crate::ui::{Hud, Notification};

use rand::SeedableRng;
use rand_pcg::Pcg32;

pub struct Game<S: ProgressionStore> {
    state: GameState,
    progression: Progression<S>,
    notifications: Vec<Notification>,
    /// Seconds of actual play this run (paused time excluded)
    seconds_played: f64,
    /// Set once the current run has been written to progression
    last_run: Option<RunSummary>,
}

impl<S: ProgressionStore> Game<S> {
    pub fn new(seed: u64, playfield: Playfield, tuning: Tuning, store: S) -> Self {
        Self {
            state: GameState::with_rng(Pcg32::seed_from_u64(seed), playfield, tuning),
            progression: Progression::open(store),
            notifications: Vec::new(),
            seconds_played: 0.0,
            last_run: None,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn progression(&self) -> &Progression<S> {
        &self.progression
    }

    pub fn progression_mut(&mut self) -> &mut Progression<S> {
        &mut self.progression
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn hud(&self) -> Hud {
        Hud::from_state(&self.state)
    }

    /// Summary of the finished run, once game over has been recorded
    pub fn last_run(&self) -> Option<RunSummary> {
        self.last_run
    }

    pub fn seconds_played(&self) -> f64 {
        self.seconds_played
    }

    // === Lifecycle ===

    /// Start screen submitted
    pub fn start(&mut self, name: &str) -> bool {
        if !self.state.start() {
            return false;
        }
        self.progression.set_name(name);
        self.begin_run();
        log::info!("{} started a run", self.progression.record().name);
        true
    }

    pub fn pause(&mut self) -> bool {
        self.state.pause()
    }

    pub fn resume(&mut self) -> bool {
        self.state.resume()
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.state.toggle_pause()
    }

    /// Fresh run with a new seed (from game over or the pause menu)
    pub fn restart(&mut self, seed: u64) -> bool {
        if !self.state.restart() {
            return false;
        }
        self.state.reseed(seed);
        self.begin_run();
        log::info!("Run restarted with seed {}", seed);
        true
    }

    fn begin_run(&mut self) {
        self.seconds_played = 0.0;
        self.last_run = None;
    }

    // === Actions ===

    pub fn shoot(&mut self) {
        self.state.shoot();
    }

    pub fn use_power_up(&mut self, kind: PowerUpKind) {
        self.state.use_power_up(kind);
    }

    /// Buy a ship from the shop catalog
    pub fn buy_ship(&mut self, id: &str) -> bool {
        let result = match ship_cost(id) {
            Some(cost) => self.progression.buy_ship(id, cost),
            None => Err(ShopError::UnknownShip(id.to_string())),
        };
        self.shop_outcome(result, format!("{} purchased!", id))
    }

    pub fn equip_ship(&mut self, id: &str) -> bool {
        let result = self.progression.equip_ship(id);
        self.shop_outcome(result, format!("{} equipped!", id))
    }

    fn shop_outcome(&mut self, result: Result<(), ShopError>, success: String) -> bool {
        match result {
            Ok(()) => {
                self.notify(Notification::success(success));
                true
            }
            Err(e) => {
                log::info!("Shop refused: {}", e);
                self.notify(Notification::error(e.to_string()));
                false
            }
        }
    }

    /// Advance one simulation step and settle its events. Returns the events
    /// so the caller can drive audio and effects.
    pub fn frame(&mut self, input: &TickInput, dt: f32) -> Vec<GameEvent> {
        if self.state.phase == GamePhase::Playing {
            self.seconds_played += dt as f64;
        }
        tick(&mut self.state, input, dt);
        self.settle()
    }

    /// Forward pending events to progression and notifications. Also picks up
    /// events raised outside `frame` (shots, power-up buttons).
    pub fn settle(&mut self) -> Vec<GameEvent> {
        let events = self.state.drain_events();
        for event in &events {
            self.handle(event);
        }
        events
    }

    fn handle(&mut self, event: &GameEvent) {
        match *event {
            GameEvent::ScoreAwarded { points, .. } => {
                let divisor = self.state.tuning.xp_divisor.max(1);
                self.add_xp(points / divisor);
            }
            GameEvent::CoinCollected { value } => self.progression.add_coins(value),
            GameEvent::LevelUp { level } => {
                self.notify(Notification::success(format!("Level {}!", level)));
            }
            GameEvent::PowerUpActivated(kind) => {
                self.notify(Notification::info(kind.activation_message()));
            }
            GameEvent::GameOver { score, level } => self.finish_run(score, level),
            _ => {}
        }
    }

    fn add_xp(&mut self, amount: u64) {
        if let Some(level) = self.progression.add_xp(amount) {
            self.notify(Notification::success(format!(
                "Level Up! You've reached level {}!",
                level
            )));
        }
    }

    fn finish_run(&mut self, score: u64, level: u32) {
        if self.last_run.is_some() {
            return;
        }
        let summary = self
            .progression
            .finish_run(score, level, self.seconds_played);
        if summary.new_best {
            self.notify(Notification::success("New Best Score!"));
        }
        self.last_run = Some(summary);

        for name in earned_achievements(self.progression.record()) {
            if self.progression.unlock_achievement(name) {
                self.add_xp(ACHIEVEMENT_XP);
                self.notify(Notification::success(format!(
                    "{} completed! +{} XP",
                    name, ACHIEVEMENT_XP
                )));
            }
        }
    }

    fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    /// Take queued toasts
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{JsonStore, MemoryStore};
    use crate::sim::Enemy;
    use crate::sim::EnemyKind;
    use glam::Vec2;

    fn game() -> Game<JsonStore<MemoryStore>> {
        Game::new(
            7,
            Playfield::default(),
            Tuning::without_spawns(),
            JsonStore::new(MemoryStore::new()),
        )
    }

    fn ram_player(game: &mut Game<JsonStore<MemoryStore>>) {
        let pos = game.state().player.pos;
        game.state_mut().enemies.push(Enemy {
            pos,
            size: Vec2::splat(30.0),
            speed: 0.0,
            kind: EnemyKind::Basic,
        });
    }

    #[test]
    fn test_start_sets_name() {
        let mut game = game();
        assert!(game.start("  Vega  "));
        assert_eq!(game.phase(), GamePhase::Playing);
        assert_eq!(game.progression().record().name, "Vega");
        assert!(!game.start("Again"));
    }

    #[test]
    fn test_power_up_button_notifies() {
        let mut game = game();
        game.start("");
        game.use_power_up(PowerUpKind::Speed);
        game.settle();
        let notes = game.take_notifications();
        assert_eq!(notes, vec![Notification::info("Speed boost!")]);
        assert!(game.take_notifications().is_empty());
    }

    #[test]
    fn test_game_over_recorded_once() {
        let mut game = game();
        game.start("Ace");
        for _ in 0..3 {
            ram_player(&mut game);
            game.frame(&TickInput::default(), 1.0 / 60.0);
        }
        assert_eq!(game.phase(), GamePhase::GameOver);
        let record = game.progression().record();
        assert_eq!(record.games_played, 1);
        assert!(record.achievements.contains(&"First Steps".to_string()));
        assert_eq!(record.xp, ACHIEVEMENT_XP);

        // Frozen frames do not record the run again
        game.frame(&TickInput::default(), 1.0 / 60.0);
        assert_eq!(game.progression().record().games_played, 1);
        assert!(game.last_run().is_some());
    }

    #[test]
    fn test_shop_toasts() {
        let mut game = game();
        assert!(!game.buy_ship("fighter"));
        assert!(!game.buy_ship("submarine"));
        game.progression_mut().add_coins(600);
        assert!(game.buy_ship("fighter"));
        assert!(game.equip_ship("fighter"));
        assert!(!game.equip_ship("ufo"));

        let notes = game.take_notifications();
        assert_eq!(
            notes,
            vec![
                Notification::error("Not enough coins!"),
                Notification::error("No ship called submarine"),
                Notification::success("fighter purchased!"),
                Notification::success("fighter equipped!"),
                Notification::error("ufo not owned"),
            ]
        );
        let record = game.progression().record();
        assert_eq!(record.coins, 100);
        assert_eq!(record.inventory.equipped, "fighter");
    }

    #[test]
    fn test_score_feeds_xp() {
        let mut game = game();
        game.start("Ace");
        game.state_mut().add_score(250);
        game.settle();
        assert_eq!(game.progression().record().xp, 25);
    }

    #[test]
    fn test_play_time_excludes_pause() {
        let mut game = game();
        game.start("Ace");
        game.frame(&TickInput::default(), 0.5);
        game.pause();
        game.frame(&TickInput::default(), 0.5);
        assert_eq!(game.seconds_played(), 0.5);
    }

    #[test]
    fn test_restart_clears_run() {
        let mut game = game();
        game.start("Ace");
        game.pause();
        assert!(game.restart(99));
        assert_eq!(game.phase(), GamePhase::Playing);
        assert_eq!(game.seconds_played(), 0.0);
        assert_eq!(game.hud().lives, 3);
    }
}
