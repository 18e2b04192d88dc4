//! Game tuning and field geometry
//!
//! Read-only once an engine is built. Defaults match the arcade tuning; a
//! JSON file may override any subset of fields.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading or validating a [`GameConfig`]
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}

/// Tuning values for one game session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Field ===
    pub field_width: f32,
    pub field_height: f32,

    // === Player ===
    pub player_width: f32,
    pub player_height: f32,
    /// Vertical position of the player's top edge
    pub player_y: f32,
    /// Horizontal displacement per move
    pub player_speed: f32,

    // === Obstacles ===
    pub obstacle_speed: f32,
    pub obstacle_speed_per_level: f32,
    pub obstacle_min_size: f32,
    pub obstacle_max_size: f32,
    pub obstacle_spawn_y: f32,
    pub cull_margin: f32,
    /// Spawn chance per tick (not per second)
    pub spawn_rate: f64,
    pub spawn_rate_per_level: f64,
    pub max_obstacles: usize,

    // === Progression ===
    pub starting_lives: u8,
    pub ms_per_point: f64,
    pub points_per_level: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,

            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            player_y: PLAYER_Y,
            player_speed: PLAYER_SPEED,

            obstacle_speed: OBSTACLE_SPEED,
            obstacle_speed_per_level: OBSTACLE_SPEED_PER_LEVEL,
            obstacle_min_size: OBSTACLE_MIN_SIZE,
            obstacle_max_size: OBSTACLE_MAX_SIZE,
            obstacle_spawn_y: OBSTACLE_SPAWN_Y,
            cull_margin: CULL_MARGIN,
            spawn_rate: SPAWN_RATE,
            spawn_rate_per_level: SPAWN_RATE_PER_LEVEL,
            max_obstacles: MAX_OBSTACLES,

            starting_lives: STARTING_LIVES,
            ms_per_point: MS_PER_POINT,
            points_per_level: POINTS_PER_LEVEL,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load a config file, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("Using default config ({}): {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Check that the values describe a playable field
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
            ConfigError::Invalid {
                field,
                reason: reason.into(),
            }
        }

        if !(self.field_width > 0.0) {
            return Err(invalid("field_width", "must be positive"));
        }
        if !(self.field_height > 0.0) {
            return Err(invalid("field_height", "must be positive"));
        }
        if !(self.player_width > 0.0) || self.player_width > self.field_width {
            return Err(invalid("player_width", "must fit inside the field"));
        }
        if !(self.player_height > 0.0) {
            return Err(invalid("player_height", "must be positive"));
        }
        if !(self.player_speed >= 0.0) {
            return Err(invalid("player_speed", "must not be negative"));
        }
        if !(self.obstacle_speed >= 0.0) || !(self.obstacle_speed_per_level >= 0.0) {
            return Err(invalid("obstacle_speed", "must not be negative"));
        }
        if !(self.obstacle_min_size > 0.0) || self.obstacle_min_size > self.obstacle_max_size {
            return Err(invalid(
                "obstacle_min_size",
                "must be positive and no larger than obstacle_max_size",
            ));
        }
        if self.obstacle_max_size > self.field_width {
            return Err(invalid("obstacle_max_size", "must fit inside the field"));
        }
        if !(self.cull_margin >= 0.0) {
            return Err(invalid("cull_margin", "must not be negative"));
        }
        if !(0.0..=1.0).contains(&self.spawn_rate) {
            return Err(invalid("spawn_rate", "must be a probability in [0, 1]"));
        }
        if !(self.spawn_rate_per_level >= 0.0) {
            return Err(invalid("spawn_rate_per_level", "must not be negative"));
        }
        if self.max_obstacles == 0 {
            return Err(invalid("max_obstacles", "must be at least 1"));
        }
        if !(1..=MAX_LIVES).contains(&self.starting_lives) {
            return Err(invalid(
                "starting_lives",
                format!("must be between 1 and {}", MAX_LIVES),
            ));
        }
        if !(self.ms_per_point > 0.0) {
            return Err(invalid("ms_per_point", "must be positive"));
        }
        if self.points_per_level == 0 {
            return Err(invalid("points_per_level", "must be at least 1"));
        }
        Ok(())
    }

    /// Rightmost x the player may occupy
    #[inline]
    pub fn player_max_x(&self) -> f32 {
        self.field_width - self.player_width
    }

    /// Horizontal spawn position that centers the player
    #[inline]
    pub fn player_start_x(&self) -> f32 {
        self.field_width / 2.0 - self.player_width / 2.0
    }

    /// Obstacles at or below this y are discarded
    #[inline]
    pub fn cull_y(&self) -> f32 {
        self.field_height + self.cull_margin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.player_start_x(), 380.0);
        assert_eq!(config.player_max_x(), 760.0);
        assert_eq!(config.cull_y(), 650.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = GameConfig::from_json(r#"{ "max_obstacles": 4, "player_speed": 12.0 }"#)
            .expect("partial config should parse");
        assert_eq!(config.max_obstacles, 4);
        assert_eq!(config.player_speed, 12.0);
        assert_eq!(config.field_width, FIELD_WIDTH);
        assert_eq!(config.starting_lives, STARTING_LIVES);
    }

    #[test]
    fn test_rejects_bad_probability() {
        let err = GameConfig::from_json(r#"{ "spawn_rate": 1.5 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "spawn_rate",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_player_wider_than_field() {
        let config = GameConfig {
            field_width: 30.0,
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_starting_lives_capped() {
        for lives in [0u8, MAX_LIVES + 1, u8::MAX] {
            let config = GameConfig {
                starting_lives: lives,
                ..GameConfig::default()
            };
            assert!(matches!(
                config.validate(),
                Err(ConfigError::Invalid {
                    field: "starting_lives",
                    ..
                })
            ));
        }
        let one = GameConfig {
            starting_lives: 1,
            ..GameConfig::default()
        };
        assert!(one.validate().is_ok());
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = GameConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = GameConfig::load_or_default("/definitely/not/a/real/config.json");
        assert_eq!(config, GameConfig::default());
    }
}
