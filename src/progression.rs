//! Player progression
//!
//! Everything that outlives a single run: XP and account level, coins, best
//! score, games played, play time, owned ships and settings. Every change is
//! written through to the store immediately.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::persistence::{ProgressionStore, StoreError};
use crate::settings::Settings;

/// XP needed per account level
pub const XP_PER_LEVEL: u64 = 1000;
/// Name used when the player leaves the field blank
pub const DEFAULT_PLAYER_NAME: &str = "Player";
/// Ship every player owns
pub const STARTER_SHIP: &str = "classic";
/// Shop catalog: ship id and price in coins
pub const SHIPS: [(&str, u64); 3] = [(STARTER_SHIP, 0), ("fighter", 500), ("ufo", 1000)];

/// Price of a ship in the shop catalog
pub fn ship_cost(id: &str) -> Option<u64> {
    SHIPS.iter().find(|(ship, _)| *ship == id).map(|&(_, cost)| cost)
}

/// Owned and equipped cosmetics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Inventory {
    pub ships: BTreeSet<String>,
    pub equipped: String,
}

impl Default for Inventory {
    fn default() -> Self {
        Self {
            ships: BTreeSet::from([STARTER_SHIP.to_string()]),
            equipped: STARTER_SHIP.to_string(),
        }
    }
}

/// Persisted player record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProgressionRecord {
    pub name: String,
    /// Account level (from XP, not the in-run level)
    pub level: u32,
    pub xp: u64,
    pub coins: u64,
    pub best_score: u64,
    pub games_played: u64,
    /// Minutes
    pub total_play_time: u64,
    /// Unlocked achievement ids
    pub achievements: Vec<String>,
    pub inventory: Inventory,
    pub settings: Settings,
}

impl Default for ProgressionRecord {
    fn default() -> Self {
        Self {
            name: DEFAULT_PLAYER_NAME.to_string(),
            level: 1,
            xp: 0,
            coins: 0,
            best_score: 0,
            games_played: 0,
            total_play_time: 0,
            achievements: Vec::new(),
            inventory: Inventory::default(),
            settings: Settings::default(),
        }
    }
}

impl ProgressionRecord {
    /// XP into the current level, out of `XP_PER_LEVEL`
    pub fn xp_into_level(&self) -> u64 {
        self.xp % XP_PER_LEVEL
    }

    /// Fraction of the XP bar filled (0-1)
    pub fn xp_fraction(&self) -> f32 {
        self.xp_into_level() as f32 / XP_PER_LEVEL as f32
    }
}

/// Normalize a player-entered name
pub fn sanitize_name(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        DEFAULT_PLAYER_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Shop refusal
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShopError {
    #[error("Not enough coins!")]
    NotEnoughCoins { cost: u64, coins: u64 },
    #[error("{0} already owned")]
    AlreadyOwned(String),
    #[error("{0} not owned")]
    NotOwned(String),
    #[error("No ship called {0}")]
    UnknownShip(String),
}

/// Outcome of a finished run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub score: u64,
    pub level: u32,
    pub new_best: bool,
    pub minutes_played: u64,
}

/// Progression record bound to its store
#[derive(Debug)]
pub struct Progression<S: ProgressionStore> {
    store: S,
    record: ProgressionRecord,
}

impl<S: ProgressionStore> Progression<S> {
    /// Load the stored record, falling back to defaults when it is missing or
    /// corrupt. The (possibly fresh) record is written back right away.
    pub fn open(store: S) -> Self {
        let record = match store.get() {
            Ok(record) => {
                log::info!("Loaded progression for {}", record.name);
                record
            }
            Err(StoreError::Missing(_)) => {
                log::info!("No progression found, starting fresh");
                ProgressionRecord::default()
            }
            Err(e) => {
                log::warn!("Discarding unreadable progression: {}", e);
                ProgressionRecord::default()
            }
        };
        let mut progression = Self { store, record };
        progression.save();
        progression
    }

    pub fn record(&self) -> &ProgressionRecord {
        &self.record
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn settings(&self) -> &Settings {
        &self.record.settings
    }

    /// Write the record through; failures are logged, never fatal
    pub fn save(&mut self) {
        if let Err(e) = self.store.set(&self.record) {
            log::warn!("Failed to save progression: {}", e);
        }
    }

    pub fn set_name(&mut self, name: &str) {
        self.record.name = sanitize_name(name);
        self.save();
    }

    /// Add XP; returns the new account level if it went up
    pub fn add_xp(&mut self, amount: u64) -> Option<u32> {
        if amount == 0 {
            return None;
        }
        self.record.xp += amount;
        let new_level = (self.record.xp / XP_PER_LEVEL) as u32 + 1;
        let level_up = if new_level > self.record.level {
            self.record.level = new_level;
            log::info!("Account level {}", new_level);
            Some(new_level)
        } else {
            None
        };
        self.save();
        level_up
    }

    pub fn add_coins(&mut self, amount: u64) {
        if amount == 0 {
            return;
        }
        self.record.coins += amount;
        self.save();
    }

    /// Returns true if `score` is a new best
    pub fn update_best_score(&mut self, score: u64) -> bool {
        if score > self.record.best_score {
            self.record.best_score = score;
            self.save();
            true
        } else {
            false
        }
    }

    /// Record a finished run: best score, games played and play time, saved
    /// in a single write
    pub fn finish_run(&mut self, score: u64, level: u32, seconds_played: f64) -> RunSummary {
        let new_best = score > self.record.best_score;
        if new_best {
            self.record.best_score = score;
        }
        let minutes_played = (seconds_played.max(0.0) / 60.0).floor() as u64;
        self.record.games_played += 1;
        self.record.total_play_time += minutes_played;
        self.save();
        log::info!(
            "Run finished: score {} (best {}), games played {}",
            score,
            self.record.best_score,
            self.record.games_played
        );
        RunSummary {
            score,
            level,
            new_best,
            minutes_played,
        }
    }

    /// Toggle a preference by its UI label
    pub fn update_setting(&mut self, name: &str, enabled: bool) -> bool {
        let changed = self.record.settings.set_by_name(name, enabled);
        if changed {
            self.save();
        }
        changed
    }

    /// Buy a ship with coins
    pub fn buy_ship(&mut self, id: &str, cost: u64) -> Result<(), ShopError> {
        if self.record.inventory.ships.contains(id) {
            return Err(ShopError::AlreadyOwned(id.to_string()));
        }
        if self.record.coins < cost {
            return Err(ShopError::NotEnoughCoins {
                cost,
                coins: self.record.coins,
            });
        }
        self.record.coins -= cost;
        self.record.inventory.ships.insert(id.to_string());
        self.save();
        log::info!("Bought {} for {} coins", id, cost);
        Ok(())
    }

    pub fn equip_ship(&mut self, id: &str) -> Result<(), ShopError> {
        if !self.record.inventory.ships.contains(id) {
            return Err(ShopError::NotOwned(id.to_string()));
        }
        self.record.inventory.equipped = id.to_string();
        self.save();
        Ok(())
    }

    pub fn unlock_achievement(&mut self, id: &str) -> bool {
        if self.record.achievements.iter().any(|a| a == id) {
            return false;
        }
        self.record.achievements.push(id.to_string());
        self.save();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{JsonStore, MemoryStore, PROGRESSION_KEY};

    fn fresh() -> Progression<JsonStore<MemoryStore>> {
        Progression::open(JsonStore::new(MemoryStore::new()))
    }

    #[test]
    fn test_open_writes_defaults() {
        let progression = fresh();
        assert_eq!(progression.record(), &ProgressionRecord::default());
        assert_eq!(progression.store().backend().writes(), 1);
    }

    #[test]
    fn test_corrupt_save_falls_back() {
        let backend = MemoryStore::new().with_entry(PROGRESSION_KEY, "][");
        let progression = Progression::open(JsonStore::new(backend));
        assert_eq!(progression.record().name, DEFAULT_PLAYER_NAME);
        // Default record replaced the corrupt one
        assert!(progression.store().get().is_ok());
    }

    #[test]
    fn test_xp_levels() {
        let mut progression = fresh();
        assert_eq!(progression.add_xp(990), None);
        assert_eq!(progression.add_xp(10), Some(2));
        assert_eq!(progression.add_xp(2500), Some(4));
        assert_eq!(progression.record().xp_into_level(), 500);
        assert_eq!(progression.record().xp_fraction(), 0.5);
    }

    #[test]
    fn test_best_score() {
        let mut progression = fresh();
        assert!(progression.update_best_score(300));
        assert!(!progression.update_best_score(300));
        assert!(!progression.update_best_score(100));
        assert_eq!(progression.record().best_score, 300);
    }

    #[test]
    fn test_finish_run() {
        let mut progression = fresh();
        let writes = progression.store().backend().writes();
        let summary = progression.finish_run(1500, 1, 185.0);
        assert!(summary.new_best);
        assert_eq!(summary.minutes_played, 3);
        let record = progression.record();
        assert_eq!(record.best_score, 1500);
        assert_eq!(record.games_played, 1);
        assert_eq!(record.total_play_time, 3);
        assert_eq!(progression.store().backend().writes(), writes + 1);

        let summary = progression.finish_run(900, 1, 30.0);
        assert!(!summary.new_best);
        assert_eq!(progression.record().games_played, 2);
        assert_eq!(progression.record().best_score, 1500);
    }

    #[test]
    fn test_names() {
        assert_eq!(sanitize_name("  Zed "), "Zed");
        assert_eq!(sanitize_name("   "), DEFAULT_PLAYER_NAME);
        let mut progression = fresh();
        progression.set_name("");
        assert_eq!(progression.record().name, DEFAULT_PLAYER_NAME);
    }

    #[test]
    fn test_record_uses_camel_case_keys() {
        let json = serde_json::to_string(&ProgressionRecord::default()).unwrap();
        assert!(json.contains("\"bestScore\""));
        assert!(json.contains("\"gamesPlayed\""));
        assert!(json.contains("\"totalPlayTime\""));
    }

    #[test]
    fn test_shop() {
        let mut progression = fresh();
        progression.add_coins(300);
        assert_eq!(
            progression.buy_ship("stealth", 500),
            Err(ShopError::NotEnoughCoins { cost: 500, coins: 300 })
        );
        assert_eq!(progression.equip_ship("stealth"), Err(ShopError::NotOwned("stealth".into())));
        assert!(progression.buy_ship("stealth", 250).is_ok());
        assert_eq!(progression.record().coins, 50);
        assert_eq!(
            progression.buy_ship("stealth", 10),
            Err(ShopError::AlreadyOwned("stealth".into()))
        );
        progression.equip_ship("stealth").unwrap();
        assert_eq!(progression.record().inventory.equipped, "stealth");
    }

    #[test]
    fn test_achievements_unlock_once() {
        let mut progression = fresh();
        assert!(progression.unlock_achievement("first_blood"));
        assert!(!progression.unlock_achievement("first_blood"));
        assert_eq!(progression.record().achievements.len(), 1);
    }
}
