//! Playback configuration resource.
//!
//! Settings for the headless driver loaded from an INI file. Missing keys
//! keep their defaults.
//!
//! # Configuration File Format
//!
//! ```ini
//! [audio]
//! enabled = true
//! sound_distance = 12
//!
//! [simulation]
//! tick_ms = 16
//! duration_ms = 3000
//! time_scale = 1.0
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

use crate::components::animationinstance::DEFAULT_SOUND_DISTANCE;

const DEFAULT_AUDIO_ENABLED: bool = true;
const DEFAULT_TICK_MS: u64 = 16;
const DEFAULT_DURATION_MS: u64 = 3000;
const DEFAULT_TIME_SCALE: f32 = 1.0;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct PlaybackConfig {
    /// Start sounds through the audio thread.
    pub audio_enabled: bool,
    /// Audible distance handed to the sound factory, in tiles.
    pub sound_distance: i32,
    /// Simulated frame length.
    pub tick_ms: u64,
    /// Stop simulating after this much world time even if effects remain.
    pub duration_ms: u64,
    pub time_scale: f32,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaybackConfig {
    pub fn new() -> Self {
        Self {
            audio_enabled: DEFAULT_AUDIO_ENABLED,
            sound_distance: DEFAULT_SOUND_DISTANCE,
            tick_ms: DEFAULT_TICK_MS,
            duration_ms: DEFAULT_DURATION_MS,
            time_scale: DEFAULT_TIME_SCALE,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current values. Returns an error if the
    /// file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;

        // [audio] section
        if let Some(enabled) = config.getbool("audio", "enabled").ok().flatten() {
            self.audio_enabled = enabled;
        }
        if let Some(distance) = config.getint("audio", "sound_distance").ok().flatten() {
            self.sound_distance = distance as i32;
        }

        // [simulation] section
        if let Some(tick) = config.getuint("simulation", "tick_ms").ok().flatten() {
            self.tick_ms = tick.max(1);
        }
        if let Some(duration) = config.getuint("simulation", "duration_ms").ok().flatten() {
            self.duration_ms = duration;
        }
        if let Some(scale) = config.getfloat("simulation", "time_scale").ok().flatten() {
            self.time_scale = scale as f32;
        }

        info!(
            "Loaded config: audio={} distance={} tick={}ms duration={}ms scale={}",
            self.audio_enabled, self.sound_distance, self.tick_ms, self.duration_ms, self.time_scale
        );

        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        config.set("audio", "enabled", Some(self.audio_enabled.to_string()));
        config.set("audio", "sound_distance", Some(self.sound_distance.to_string()));

        config.set("simulation", "tick_ms", Some(self.tick_ms.to_string()));
        config.set("simulation", "duration_ms", Some(self.duration_ms.to_string()));
        config.set("simulation", "time_scale", Some(self.time_scale.to_string()));

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("fxplayer-{}-{}.ini", name, std::process::id()))
    }

    #[test]
    fn test_defaults() {
        let config = PlaybackConfig::new();
        assert!(config.audio_enabled);
        assert_eq!(config.sound_distance, 12);
        assert_eq!(config.tick_ms, 16);
    }

    #[test]
    fn test_missing_file_is_error_and_keeps_defaults() {
        let mut config = PlaybackConfig::with_path("/nonexistent/fxplayer.ini");
        assert!(config.load_from_file().is_err());
        assert_eq!(config.duration_ms, 3000);
    }

    #[test]
    fn test_partial_file_overrides_only_present_keys() {
        let path = temp_path("partial");
        std::fs::write(&path, "[simulation]\ntick_ms = 10\n[audio]\nenabled = false\n").unwrap();
        let mut config = PlaybackConfig::with_path(&path);
        config.load_from_file().unwrap();
        assert_eq!(config.tick_ms, 10);
        assert!(!config.audio_enabled);
        assert_eq!(config.duration_ms, 3000);
        assert_eq!(config.sound_distance, 12);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_path("save");
        let mut saved = PlaybackConfig::with_path(&path);
        saved.sound_distance = 20;
        saved.duration_ms = 500;
        saved.time_scale = 0.5;
        saved.save_to_file().unwrap();

        let mut loaded = PlaybackConfig::with_path(&path);
        loaded.load_from_file().unwrap();
        assert_eq!(loaded, saved);
        let _ = std::fs::remove_file(&path);
    }
}
