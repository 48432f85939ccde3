//! Game settings
//!
//! Every tunable lives here and is threaded through the simulation
//! constructors. Loaded from an optional JSON file; missing keys fall back
//! to the defaults in [`crate::consts`].

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Error, Result};

/// Game settings/tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Playfield ===
    pub screen_width: f32,
    pub screen_height: f32,

    // === Player ===
    pub player_radius: f32,
    pub player_start: Vec2,
    /// Pixels moved per tick per held direction key
    pub normal_speed: f32,
    /// Pixels per tick while the slow key is held
    pub slow_speed: f32,

    // === Obstacles ===
    pub obstacle_size: f32,
    /// Spawn timer period; `None` disables spawning entirely
    pub spawn_interval_ms: Option<u64>,
    pub spawn_batch: u32,
    /// Inclusive fall speed range (pixels per tick)
    pub fall_speed_min: u32,
    pub fall_speed_max: u32,
    pub obstacle_color_max: u8,

    // === Loop ===
    pub tick_rate_hz: u32,
    /// Fixed RNG seed for reproducible runs (random if unset)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,

            player_radius: PLAYER_RADIUS,
            player_start: Vec2::new(PLAYER_START_X, PLAYER_START_Y),
            normal_speed: NORMAL_SPEED,
            slow_speed: SLOW_SPEED,

            obstacle_size: OBSTACLE_SIZE,
            spawn_interval_ms: Some(SPAWN_INTERVAL_MS),
            spawn_batch: SPAWN_BATCH,
            fall_speed_min: FALL_SPEED_MIN,
            fall_speed_max: FALL_SPEED_MAX,
            obstacle_color_max: OBSTACLE_COLOR_MAX,

            tick_rate_hz: TICK_RATE_HZ,
            seed: None,
        }
    }
}

impl Settings {
    /// Environment variable naming an optional settings file
    pub const ENV_VAR: &'static str = "DODGEFALL_SETTINGS";

    /// Parse settings from a JSON string and validate them
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load and validate the file named by [`Settings::ENV_VAR`], or use defaults
    pub fn from_env() -> Result<Self> {
        match std::env::var_os(Self::ENV_VAR) {
            Some(path) => Self::load(path),
            None => {
                log::info!("Using default settings");
                Ok(Self::default())
            }
        }
    }

    /// Reject settings the player clamp or spawner cannot work with
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: String| Err(Error::InvalidSettings { reason });

        if !(self.screen_width > 0.0 && self.screen_height > 0.0) {
            return invalid(format!(
                "screen must have positive size, got {}x{}",
                self.screen_width, self.screen_height
            ));
        }
        if !(self.player_radius > 0.0) {
            return invalid(format!("player_radius must be positive, got {}", self.player_radius));
        }
        if self.player_radius * 2.0 > self.screen_width.min(self.screen_height) {
            return invalid(format!(
                "player of radius {} does not fit a {}x{} screen",
                self.player_radius, self.screen_width, self.screen_height
            ));
        }
        if !(self.obstacle_size > 0.0) {
            return invalid(format!("obstacle_size must be positive, got {}", self.obstacle_size));
        }
        if self.fall_speed_min > self.fall_speed_max {
            return invalid(format!(
                "fall speed range {}..={} is empty",
                self.fall_speed_min, self.fall_speed_max
            ));
        }
        if self.spawn_interval_ms == Some(0) {
            return invalid("spawn_interval_ms must be positive (use null to disable)".into());
        }
        if self.tick_rate_hz == 0 {
            return invalid("tick_rate_hz must be positive".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.screen_width, 400.0);
        assert_eq!(settings.screen_height, 600.0);
        assert_eq!(settings.spawn_interval_ms, Some(100));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "seed": 7, "spawn_batch": 2 }"#).unwrap();
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.spawn_batch, 2);
        assert_eq!(settings.player_radius, PLAYER_RADIUS);
        assert_eq!(settings.player_start, Vec2::new(200.0, 550.0));
    }

    #[test]
    fn test_null_interval_disables_spawning() {
        let settings = Settings::from_json(r#"{ "spawn_interval_ms": null }"#).unwrap();
        assert_eq!(settings.spawn_interval_ms, None);
    }

    #[test]
    fn test_rejects_oversized_player() {
        let settings = Settings {
            player_radius: 250.0,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(Error::InvalidSettings { .. })
        ));
    }

    #[test]
    fn test_rejects_inverted_speed_range() {
        let result = Settings::from_json(r#"{ "fall_speed_min": 6, "fall_speed_max": 2 }"#);
        assert!(matches!(result, Err(Error::InvalidSettings { .. })));
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let path = std::env::temp_dir().join(format!("dodgefall-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "screen_width": 0 }"#).unwrap();
        let result = Settings::load(&path);
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(result, Err(Error::InvalidSettings { .. })));
    }

    #[test]
    fn test_malformed_json() {
        let result = Settings::from_json("{ not json");
        assert!(matches!(result, Err(Error::Settings(_))));
    }
}
