//! Leaderboard and achievement queries
//!
//! The game core only reads these lists. Remote fetches and the local
//! high-score table both sit behind the same traits, and a failed query turns
//! into a placeholder view instead of an error screen.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::persistence::ProgressionStore;
use crate::progression::{Progression, ProgressionRecord};

/// XP granted when an achievement unlocks
pub const ACHIEVEMENT_XP: u64 = 100;

/// Achievements that can unlock on this device
pub const LOCAL_ACHIEVEMENTS: [(&str, &str); 3] = [
    ("First Steps", "Complete your first game"),
    ("Collector", "Collect 100 coins"),
    ("Master", "Reach level 10"),
];

/// Query failure
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("rankings unavailable: {0}")]
    Unavailable(String),
    #[error("malformed response: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Rank movement since the last period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Same,
    /// Anything newer than this client knows about
    #[serde(other)]
    Unknown,
}

impl Trend {
    pub fn arrow(&self) -> &'static str {
        match self {
            Trend::Up => "↑",
            Trend::Down => "↓",
            Trend::Same => "–",
            Trend::Unknown => "",
        }
    }
}

/// One leaderboard row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingEntry {
    pub name: String,
    pub score: u64,
    pub level: u32,
    #[serde(default)]
    pub trend: Option<Trend>,
}

/// One achievement row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub unlocked: bool,
}

/// Read-only leaderboard source
pub trait RankingSource {
    fn rankings(&self) -> Result<Vec<RankingEntry>, QueryError>;
}

/// Read-only achievement source
pub trait AchievementSource {
    fn achievements(&self) -> Result<Vec<Achievement>, QueryError>;
}

/// Decode a leaderboard payload
pub fn parse_rankings(json: &str) -> Result<Vec<RankingEntry>, QueryError> {
    Ok(serde_json::from_str(json)?)
}

/// Decode an achievements payload
pub fn parse_achievements(json: &str) -> Result<Vec<Achievement>, QueryError> {
    Ok(serde_json::from_str(json)?)
}

/// What a list screen should show
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListView<T> {
    Loaded(Vec<T>),
    Empty,
    Failed(String),
}

impl<T> ListView<T> {
    pub fn from_result(result: Result<Vec<T>, QueryError>) -> Self {
        match result {
            Ok(items) if items.is_empty() => ListView::Empty,
            Ok(items) => ListView::Loaded(items),
            Err(e) => {
                log::warn!("List query failed: {}", e);
                ListView::Failed(e.to_string())
            }
        }
    }

    /// Placeholder text for non-loaded states
    pub fn placeholder(&self, what: &str) -> Option<String> {
        match self {
            ListView::Loaded(_) => None,
            ListView::Empty => Some(format!("No {} available", what)),
            ListView::Failed(_) => Some(format!("Failed to load {}", what)),
        }
    }
}

/// Medal for the top three positions (1-based)
pub fn medal(position: usize) -> Option<&'static str> {
    match position {
        1 => Some("🥇"),
        2 => Some("🥈"),
        3 => Some("🥉"),
        _ => None,
    }
}

/// Unlock progress over a list of achievements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AchievementSummary {
    pub unlocked: usize,
    pub total: usize,
    /// Rounded percentage
    pub percent: u32,
}

impl AchievementSummary {
    pub fn of(achievements: &[Achievement]) -> Self {
        let total = achievements.len();
        let unlocked = achievements.iter().filter(|a| a.unlocked).count();
        let percent = if total == 0 {
            0
        } else {
            ((unlocked as f64 / total as f64) * 100.0).round() as u32
        };
        Self {
            unlocked,
            total,
            percent,
        }
    }
}

/// Achievement names a record has earned, checked after every run
pub fn earned_achievements(record: &ProgressionRecord) -> Vec<&'static str> {
    let mut earned = Vec::new();
    if record.games_played >= 1 {
        earned.push("First Steps");
    }
    if record.coins >= 100 {
        earned.push("Collector");
    }
    if record.level >= 10 {
        earned.push("Master");
    }
    earned
}

/// Mark achievements the player has unlocked locally
pub fn merge_unlocked(achievements: &mut [Achievement], record: &ProgressionRecord) {
    for achievement in achievements {
        if record.achievements.iter().any(|a| *a == achievement.name) {
            achievement.unlocked = true;
        }
    }
}

/// The local catalog with the player's unlocks marked
impl<S: ProgressionStore> AchievementSource for Progression<S> {
    fn achievements(&self) -> Result<Vec<Achievement>, QueryError> {
        let mut list: Vec<Achievement> = LOCAL_ACHIEVEMENTS
            .iter()
            .map(|(name, description)| Achievement {
                name: name.to_string(),
                description: description.to_string(),
                unlocked: false,
            })
            .collect();
        merge_unlocked(&mut list, self.record());
        Ok(list)
    }
}
