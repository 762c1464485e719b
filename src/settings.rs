//! Player preferences
//!
//! Stored inside the progression record rather than under their own key.

use serde::{Deserialize, Serialize};

/// Toggleable preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SettingKey {
    Sound,
    Music,
    Notifications,
}

impl SettingKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SettingKey::Sound => "sound",
            SettingKey::Music => "music",
            SettingKey::Notifications => "notifications",
        }
    }

    /// Parse a setting label as shown in the settings list ("Sound Effects",
    /// "Music", "Notifications")
    pub fn from_str(s: &str) -> Option<Self> {
        let key: String = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_lowercase();
        match key.as_str() {
            "sound" | "sounds" | "soundeffects" | "sfx" => Some(SettingKey::Sound),
            "music" | "backgroundmusic" => Some(SettingKey::Music),
            "notifications" | "notification" => Some(SettingKey::Notifications),
            _ => None,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Sound effects
    pub sound: bool,
    /// Background music
    pub music: bool,
    /// Toast notifications
    pub notifications: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound: true,
            music: true,
            notifications: false,
        }
    }
}

impl Settings {
    pub fn get(&self, key: SettingKey) -> bool {
        match key {
            SettingKey::Sound => self.sound,
            SettingKey::Music => self.music,
            SettingKey::Notifications => self.notifications,
        }
    }

    pub fn set(&mut self, key: SettingKey, enabled: bool) {
        match key {
            SettingKey::Sound => self.sound = enabled,
            SettingKey::Music => self.music = enabled,
            SettingKey::Notifications => self.notifications = enabled,
        }
        log::info!(
            "{}: {}",
            key.as_str(),
            if enabled { "enabled" } else { "disabled" }
        );
    }

    /// Set a preference by its UI label. Returns false for unknown labels.
    pub fn set_by_name(&mut self, name: &str, enabled: bool) -> bool {
        match SettingKey::from_str(name) {
            Some(key) => {
                self.set(key, enabled);
                true
            }
            None => {
                log::warn!("Unknown setting '{}'", name);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(settings.sound);
        assert!(settings.music);
        assert!(!settings.notifications);
    }

    #[test]
    fn test_set_by_label() {
        let mut settings = Settings::default();
        assert!(settings.set_by_name("Sound Effects", false));
        assert!(!settings.sound);
        assert!(settings.set_by_name("Notifications", true));
        assert!(settings.get(SettingKey::Notifications));
        assert!(!settings.set_by_name("Vibration", true));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str(r#"{ "music": false }"#).unwrap();
        assert!(settings.sound);
        assert!(!settings.music);
        assert!(!settings.notifications);
    }
}
