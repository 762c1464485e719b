//! Local high score table
//!
//! Keeps the ten best runs on this device and serves them as a leaderboard.

use serde::{Deserialize, Serialize};

use crate::persistence::{KeyValueStore, StoreError, load_json, save_json};
use crate::ranking::{QueryError, RankingEntry, RankingSource};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// Storage key for the table
pub const HIGH_SCORES_KEY: &str = "highScores";

/// A single run on the table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub name: String,
    pub score: u64,
    /// In-run level reached
    pub level: u32,
    /// Unix timestamp (ms)
    pub timestamp: f64,
}

/// Best runs, sorted by descending score
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rank (1-based) `score` would take, if it makes the table at all.
    /// Ties rank below existing entries.
    pub fn rank_for(&self, score: u64) -> Option<usize> {
        if score == 0 {
            return None;
        }
        let rank = self.entries.partition_point(|e| e.score >= score) + 1;
        (rank <= MAX_HIGH_SCORES).then_some(rank)
    }

    /// Insert a run; returns its rank, or None if it didn't make the table
    pub fn add_score(&mut self, name: &str, score: u64, level: u32, timestamp: f64) -> Option<usize> {
        let rank = self.rank_for(score)?;
        self.entries.insert(
            rank - 1,
            HighScoreEntry {
                name: name.to_string(),
                score,
                level,
                timestamp,
            },
        );
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(rank)
    }

    /// Load from a backend, starting empty when nothing usable is stored
    pub fn load<K: KeyValueStore + ?Sized>(backend: &K) -> Self {
        match load_json::<Self, K>(backend, HIGH_SCORES_KEY) {
            Ok(mut scores) => {
                scores.entries.sort_by(|a, b| b.score.cmp(&a.score));
                scores.entries.truncate(MAX_HIGH_SCORES);
                log::info!("Loaded {} high scores", scores.entries.len());
                scores
            }
            Err(StoreError::Missing(_)) => {
                log::info!("No high scores found, starting fresh");
                Self::new()
            }
            Err(e) => {
                log::warn!("Discarding unreadable high scores: {}", e);
                Self::new()
            }
        }
    }

    pub fn save<K: KeyValueStore + ?Sized>(&self, backend: &mut K) -> Result<(), StoreError> {
        save_json(backend, HIGH_SCORES_KEY, self)?;
        log::debug!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }
}

impl RankingSource for HighScores {
    fn rankings(&self) -> Result<Vec<RankingEntry>, QueryError> {
        Ok(self
            .entries
            .iter()
            .map(|e| RankingEntry {
                name: e.name.clone(),
                score: e.score,
                level: e.level,
                trend: None,
            })
            .collect())
    }
}

/// Relative age of a timestamp, both in Unix ms
pub fn format_age(now: f64, timestamp: f64) -> String {
    let mins = ((now - timestamp).max(0.0) / 60_000.0).floor() as u64;
    let hours = mins / 60;
    let days = hours / 24;

    if days >= 1 {
        if days == 1 {
            "Yesterday".to_string()
        } else {
            format!("{} days ago", days)
        }
    } else if hours >= 1 {
        if hours == 1 {
            "1 hour ago".to_string()
        } else {
            format!("{} hours ago", hours)
        }
    } else if mins >= 1 {
        if mins == 1 {
            "1 min ago".to_string()
        } else {
            format!("{} mins ago", mins)
        }
    } else {
        "Just now".to_string()
    }
}
