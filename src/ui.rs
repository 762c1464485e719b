//! HUD snapshot, toast notifications and display formatting

use crate::progression::ProgressionRecord;
use crate::ranking::{RankingEntry, medal};
use crate::sim::GameState;

const HEART: &str = "❤️";

/// Values shown in the in-game header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hud {
    pub score: u64,
    pub level: u32,
    pub lives: u8,
}

impl Hud {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            score: state.session.score,
            level: state.session.level,
            lives: state.session.lives,
        }
    }

    /// One heart per remaining life
    pub fn lives_display(&self) -> String {
        HEART.repeat(self.lives as usize)
    }
}

/// Toast style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Info,
    Error,
}

impl NotificationKind {
    /// CSS class suffix
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Success => "success",
            NotificationKind::Info => "info",
            NotificationKind::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NotificationKind::Success,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NotificationKind::Info,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NotificationKind::Error,
        }
    }
}

/// Compact number: 1234 -> "1.2K", 3_400_000 -> "3.4M"
pub fn format_number(n: u64) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}

/// Minutes as "{h}h {m}m"
pub fn format_play_time(minutes: u64) -> String {
    format!("{}h {}m", minutes / 60, minutes % 60)
}

/// One leaderboard line, e.g. "🥇 Vega 12.0K (Lv 6) ↑"
pub fn ranking_line(position: usize, entry: &RankingEntry) -> String {
    let place = match medal(position) {
        Some(m) => m.to_string(),
        None => format!("#{}", position),
    };
    let mut line = format!(
        "{} {} {} (Lv {})",
        place,
        entry.name,
        format_number(entry.score),
        entry.level
    );
    let arrow = entry.trend.map(|t| t.arrow()).unwrap_or("");
    if !arrow.is_empty() {
        line.push(' ');
        line.push_str(arrow);
    }
    line
}

/// Profile card lines
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileView {
    pub name: String,
    pub level: u32,
    pub coins: String,
    pub best_score: String,
    pub games_played: String,
    pub play_time: String,
    /// XP bar fill, 0-100
    pub xp_percent: f32,
}

impl ProfileView {
    pub fn from_record(record: &ProgressionRecord) -> Self {
        Self {
            name: record.name.clone(),
            level: record.level,
            coins: format_number(record.coins),
            best_score: format_number(record.best_score),
            games_played: format_number(record.games_played),
            play_time: format_play_time(record.total_play_time),
            xp_percent: record.xp_fraction() * 100.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Playfield;

    #[test]
    fn test_hud_from_state() {
        let mut state = GameState::new(1, Playfield::default());
        state.start();
        let hud = Hud::from_state(&state);
        assert_eq!(hud, Hud { score: 0, level: 1, lives: 3 });
        assert_eq!(hud.lives_display(), "❤️❤️❤️");
    }

    #[test]
    fn test_no_lives_no_hearts() {
        let hud = Hud { score: 10, level: 1, lives: 0 };
        assert_eq!(hud.lives_display(), "");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1234), "1.2K");
        assert_eq!(format_number(3_400_000), "3.4M");
    }

    #[test]
    fn test_ranking_line() {
        use crate::ranking::Trend;

        let mut entry = RankingEntry {
            name: "Vega".to_string(),
            score: 12_000,
            level: 6,
            trend: Some(Trend::Up),
        };
        assert_eq!(ranking_line(1, &entry), "🥇 Vega 12.0K (Lv 6) ↑");
        entry.trend = Some(Trend::Unknown);
        assert_eq!(ranking_line(4, &entry), "#4 Vega 12.0K (Lv 6)");
        entry.trend = None;
        assert_eq!(ranking_line(2, &entry), "🥈 Vega 12.0K (Lv 6)");
    }

    #[test]
    fn test_format_play_time() {
        assert_eq!(format_play_time(0), "0h 0m");
        assert_eq!(format_play_time(135), "2h 15m");
    }

    #[test]
    fn test_profile_view() {
        let record = ProgressionRecord {
            coins: 1500,
            xp: 2250,
            level: 3,
            total_play_time: 61,
            ..Default::default()
        };
        let view = ProfileView::from_record(&record);
        assert_eq!(view.coins, "1.5K");
        assert_eq!(view.play_time, "1h 1m");
        assert_eq!(view.xp_percent, 25.0);
        assert_eq!(view.level, 3);
    }
}
