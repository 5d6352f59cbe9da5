//! Match configuration, persisted as JSON
//!
//! Loaded once at startup and live-edited from the settings menu. A missing
//! or malformed file falls back to built-in defaults and is written back, so
//! the rest of the game only ever sees a resolved config.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// AI skill tiers, ordered weakest to strongest
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(into = "u8", from = "u8")]
pub enum AiDifficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    VeryHard,
    Unbeatable,
}

impl AiDifficulty {
    pub const COUNT: i32 = 5;

    /// Clamp an arbitrary index to the nearest valid tier
    pub fn from_index(index: i32) -> Self {
        match index.clamp(0, Self::COUNT - 1) {
            0 => AiDifficulty::Easy,
            1 => AiDifficulty::Medium,
            2 => AiDifficulty::Hard,
            3 => AiDifficulty::VeryHard,
            _ => AiDifficulty::Unbeatable,
        }
    }

    pub fn index(self) -> i32 {
        self as i32
    }

    /// Move up or down a tier, saturating at the ends
    pub fn step(self, delta: i32) -> Self {
        Self::from_index(self.index() + delta)
    }

    /// Settings-menu label
    pub fn label(self) -> &'static str {
        match self {
            AiDifficulty::Easy => "EASY",
            AiDifficulty::Medium => "NORMAL",
            AiDifficulty::Hard => "HARD",
            AiDifficulty::VeryHard => "VERYHARD",
            AiDifficulty::Unbeatable => "UNBEATABLE",
        }
    }
}

impl From<AiDifficulty> for u8 {
    fn from(difficulty: AiDifficulty) -> Self {
        difficulty as u8
    }
}

impl From<u8> for AiDifficulty {
    fn from(index: u8) -> Self {
        Self::from_index(index as i32)
    }
}

/// Round to one decimal, the precision the settings menu edits in
fn round1(value: f32) -> f32 {
    (value * 10.0).round() / 10.0
}

/// Match tuning and audio preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub ball_speed: f32,
    pub paddle_speed: f32,
    #[serde(rename = "paddle_friction")]
    pub paddle_damping: f32,
    pub ai_difficulty: AiDifficulty,
    pub music_enabled: bool,
    pub music_volume: f32,
    pub sfx_volume: f32,
    pub game_duration_secs: f32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            ball_speed: 1.4,
            paddle_speed: 1.0,
            paddle_damping: 1.0,
            ai_difficulty: AiDifficulty::Medium,
            music_enabled: true,
            music_volume: 1.0,
            sfx_volume: 1.0,
            game_duration_secs: 30.0,
        }
    }
}

/// On-disk wrapper; values live under a "settings" key
#[derive(Debug, Default, Serialize, Deserialize)]
struct ConfigFile {
    settings: MatchConfig,
}

impl MatchConfig {
    /// Load from `path`, falling back to defaults (and persisting them) when
    /// the file is missing or unparseable.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(text) => match serde_json::from_str::<ConfigFile>(&text) {
                Ok(file) => {
                    log::info!("loaded config from {}", path.display());
                    file.settings
                }
                Err(err) => {
                    log::warn!("config {} unparseable ({err}), using defaults", path.display());
                    let config = Self::default();
                    if let Err(err) = config.save(path) {
                        log::warn!("could not rewrite {}: {err}", path.display());
                    }
                    config
                }
            },
            Err(_) => {
                log::info!("no config at {}, writing defaults", path.display());
                let config = Self::default();
                if let Err(err) = config.save(path) {
                    log::warn!("could not write {}: {err}", path.display());
                }
                config
            }
        }
    }

    /// Write to `path`, creating parent directories as needed
    pub fn save(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let mut on_disk = self.clone();
        on_disk.round_all();
        let file = ConfigFile { settings: on_disk };
        let json = serde_json::to_string_pretty(&file)?;
        fs::write(path, json)
    }

    fn round_all(&mut self) {
        self.ball_speed = round1(self.ball_speed);
        self.paddle_speed = round1(self.paddle_speed);
        self.paddle_damping = round1(self.paddle_damping);
        self.music_volume = round1(self.music_volume);
        self.sfx_volume = round1(self.sfx_volume);
    }

    // Clamped setters: the settings menu steps values through these, so
    // stored values never leave their legal ranges.

    pub fn set_ball_speed(&mut self, value: f32) {
        self.ball_speed = round1(value.clamp(0.5, 3.0));
    }

    pub fn set_paddle_speed(&mut self, value: f32) {
        self.paddle_speed = round1(value.clamp(0.5, 3.0));
    }

    pub fn set_paddle_damping(&mut self, value: f32) {
        self.paddle_damping = round1(value.clamp(0.8, 2.0));
    }

    pub fn set_music_volume(&mut self, value: f32) {
        self.music_volume = round1(value.clamp(0.0, 1.0));
    }

    pub fn set_sfx_volume(&mut self, value: f32) {
        self.sfx_volume = round1(value.clamp(0.0, 1.0));
    }

    pub fn set_game_duration(&mut self, secs: f32) {
        self.game_duration_secs = secs.round().clamp(5.0, 600.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_index_clamps() {
        assert_eq!(AiDifficulty::from_index(-3), AiDifficulty::Easy);
        assert_eq!(AiDifficulty::from_index(2), AiDifficulty::Hard);
        assert_eq!(AiDifficulty::from_index(99), AiDifficulty::Unbeatable);
        assert_eq!(AiDifficulty::from(9u8), AiDifficulty::Unbeatable);
    }

    #[test]
    fn test_difficulty_step_saturates() {
        assert_eq!(AiDifficulty::Easy.step(-1), AiDifficulty::Easy);
        assert_eq!(AiDifficulty::Easy.step(1), AiDifficulty::Medium);
        assert_eq!(AiDifficulty::Unbeatable.step(1), AiDifficulty::Unbeatable);
    }

    #[test]
    fn test_setters_clamp() {
        let mut config = MatchConfig::default();

        config.set_ball_speed(0.1);
        assert_eq!(config.ball_speed, 0.5);
        config.set_ball_speed(9.9);
        assert_eq!(config.ball_speed, 3.0);

        config.set_paddle_damping(0.0);
        assert_eq!(config.paddle_damping, 0.8);

        config.set_game_duration(2.0);
        assert_eq!(config.game_duration_secs, 5.0);
        config.set_game_duration(10_000.0);
        assert_eq!(config.game_duration_secs, 600.0);

        config.set_music_volume(1.45);
        assert_eq!(config.music_volume, 1.0);
    }

    #[test]
    fn test_stepping_by_tenths_stays_on_grid() {
        let mut config = MatchConfig::default();
        config.set_ball_speed(0.5);
        for _ in 0..7 {
            config.set_ball_speed(config.ball_speed + 0.1);
        }
        assert_eq!(config.ball_speed, 1.2);
    }

    #[test]
    fn test_json_round_trip() {
        let mut config = MatchConfig::default();
        config.set_ball_speed(2.3);
        config.ai_difficulty = AiDifficulty::VeryHard;

        let json = serde_json::to_string(&ConfigFile {
            settings: config.clone(),
        })
        .unwrap();
        // difficulty serializes as its ordinal, like the settings file expects
        assert!(json.contains("\"ai_difficulty\":3") || json.contains("\"ai_difficulty\": 3"));

        let back: ConfigFile = serde_json::from_str(&json).unwrap();
        assert_eq!(back.settings, config);
    }

    #[test]
    fn test_load_falls_back_and_persists() {
        let dir = std::env::temp_dir().join("pixel_pong_config_test");
        let path = dir.join("config.json");
        let _ = fs::remove_file(&path);
        fs::create_dir_all(&dir).unwrap();
        fs::write(&path, "{ not json").unwrap();

        let config = MatchConfig::load(&path);
        assert_eq!(config, MatchConfig::default());

        // the defaults were written back, so a second load parses cleanly
        let reloaded = MatchConfig::load(&path);
        assert_eq!(reloaded, config);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_missing_fields_fill_with_defaults() {
        let file: ConfigFile =
            serde_json::from_str(r#"{"settings": {"ball_speed": 2.0}}"#).unwrap();
        assert_eq!(file.settings.ball_speed, 2.0);
        assert_eq!(file.settings.paddle_speed, 1.0);
        assert_eq!(file.settings.ai_difficulty, AiDifficulty::Medium);
    }
}
