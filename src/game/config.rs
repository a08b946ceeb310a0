//! Game Configuration
//!
//! Tunables for the simulation. `Default` carries the shipped values;
//! JSON files and the environment can override them.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Serialize, Deserialize};
use thiserror::Error;

use crate::scene::Color;

/// Environment variable naming a JSON config file.
pub const CONFIG_ENV: &str = "CUBE_CHASE_CONFIG";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config JSON is malformed.
    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value is out of range.
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Simulation tunables.
///
/// Distances are world units, per-frame quantities are applied once per
/// display frame, rates are radians per second of elapsed time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Horizontal distance moved per frame at full input.
    pub player_speed: f32,
    /// Avatar radius; also the resting height above the ground.
    pub player_size: f32,
    /// Pickup cube edge length.
    pub cube_size: f32,
    /// Half-extent of the playable square on X and Z.
    pub world_size: f32,
    /// Number of pickup slots.
    pub num_cubes: usize,
    /// Inner radius of the pickup spawn band.
    pub cube_spawn_distance: f32,
    /// Width of the pickup spawn band.
    pub cube_spawn_band: f32,
    /// Camera orbit radius around the avatar.
    pub camera_distance: f32,
    /// Camera height above the avatar.
    pub camera_height: f32,
    /// Fraction of the remaining distance the camera covers each frame.
    pub camera_smoothing: f32,
    /// Camera orbit angular rate (rad/s).
    pub camera_orbit_rate: f32,
    /// Vertical velocity lost per frame.
    pub gravity: f32,
    /// Vertical velocity set by a jump.
    pub jump_velocity: f32,
    /// Score awarded per collection.
    pub score_per_pickup: u32,
    /// Delay between collection and respawn.
    pub respawn_delay_ms: u64,
    /// Pickup bob amplitude.
    pub float_amplitude: f32,
    /// Pickup bob angular rate (rad/s).
    pub float_rate: f32,
    /// Initial health (display only).
    pub starting_health: u32,
    /// Avatar sphere color.
    pub avatar_color: Color,
    /// Slot colors, assigned round-robin.
    pub palette: Vec<Color>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_speed: 0.15,
            player_size: 0.5,
            cube_size: 0.4,
            world_size: 50.0,
            num_cubes: 20,
            cube_spawn_distance: 5.0,
            cube_spawn_band: 10.0,
            camera_distance: 8.0,
            camera_height: 5.0,
            camera_smoothing: 0.1,
            camera_orbit_rate: 0.3, // 0.0003 per ms
            gravity: 0.01,
            jump_velocity: 0.25,
            score_per_pickup: 10,
            respawn_delay_ms: 500,
            float_amplitude: 0.3,
            float_rate: 1.0, // 0.001 per ms
            starting_health: 100,
            avatar_color: Color::AVATAR,
            palette: Color::PALETTE.to_vec(),
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config. Missing fields keep defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Load from `CUBE_CHASE_CONFIG` if set, defaults otherwise.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Check every value is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("player_speed", self.player_speed),
            ("player_size", self.player_size),
            ("cube_size", self.cube_size),
            ("world_size", self.world_size),
            ("gravity", self.gravity),
            ("jump_velocity", self.jump_velocity),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(invalid(format!("{name} must be positive, got {value}")));
            }
        }

        let non_negative = [
            ("cube_spawn_distance", self.cube_spawn_distance),
            ("cube_spawn_band", self.cube_spawn_band),
            ("camera_distance", self.camera_distance),
            ("float_amplitude", self.float_amplitude),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(invalid(format!("{name} must be non-negative, got {value}")));
            }
        }

        let finite = [
            ("camera_height", self.camera_height),
            ("camera_orbit_rate", self.camera_orbit_rate),
            ("float_rate", self.float_rate),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(invalid(format!("{name} must be finite, got {value}")));
            }
        }

        if !(self.camera_smoothing > 0.0 && self.camera_smoothing <= 1.0) {
            return Err(invalid(format!(
                "camera_smoothing must be in (0, 1], got {}",
                self.camera_smoothing
            )));
        }
        if self.num_cubes == 0 {
            return Err(invalid("num_cubes must be at least 1".into()));
        }
        if self.palette.is_empty() {
            return Err(invalid("palette must not be empty".into()));
        }
        if self.spawn_band().1 > self.world_size {
            return Err(invalid(format!(
                "spawn band reaches {} but world_size is {}",
                self.spawn_band().1,
                self.world_size
            )));
        }
        Ok(())
    }

    /// Distance below which the avatar touches a pickup.
    #[inline]
    pub fn collection_radius(&self) -> f32 {
        self.player_size + self.cube_size
    }

    /// Avatar height when grounded.
    #[inline]
    pub fn resting_height(&self) -> f32 {
        self.player_size
    }

    /// Pickup anchor height before the bob offset.
    #[inline]
    pub fn pickup_rest_height(&self) -> f32 {
        self.cube_size / 2.0
    }

    /// Radial spawn band `[min, max)` measured from the origin.
    #[inline]
    pub fn spawn_band(&self) -> (f32, f32) {
        (self.cube_spawn_distance, self.cube_spawn_distance + self.cube_spawn_band)
    }

    /// Collection-to-respawn delay.
    #[inline]
    pub fn respawn_delay(&self) -> Duration {
        Duration::from_millis(self.respawn_delay_ms)
    }

    /// Color for a slot. An empty palette falls back to [`Color::PALETTE`].
    pub fn slot_color(&self, slot: usize) -> Color {
        match self.palette.len() {
            0 => Color::PALETTE[slot % Color::PALETTE.len()],
            len => self.palette[slot % len],
        }
    }
}

fn invalid(message: String) -> ConfigError {
    ConfigError::Invalid(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert!((config.collection_radius() - 0.9).abs() < 1e-6);
        assert_eq!(config.spawn_band(), (5.0, 15.0));
        assert_eq!(config.respawn_delay(), Duration::from_millis(500));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = GameConfig::from_json(r#"{ "num_cubes": 4, "score_per_pickup": 25 }"#)
            .expect("valid config");
        assert_eq!(config.num_cubes, 4);
        assert_eq!(config.score_per_pickup, 25);
        assert_eq!(config.player_speed, 0.15);
    }

    #[test]
    fn test_palette_round_trip_as_integers() {
        let config = GameConfig::from_json(r#"{ "palette": [16711680, 255] }"#).expect("valid");
        assert_eq!(config.palette, vec![Color(0xff0000), Color(0x0000ff)]);
        assert_eq!(config.slot_color(3), Color(0x0000ff));
    }

    #[test]
    fn test_rejects_bad_values() {
        let cases = [
            r#"{ "player_speed": 0 }"#,
            r#"{ "num_cubes": 0 }"#,
            r#"{ "palette": [] }"#,
            r#"{ "camera_smoothing": 1.5 }"#,
            r#"{ "cube_spawn_band": -1 }"#,
            r#"{ "world_size": 10 }"#,
        ];
        for json in cases {
            assert!(
                matches!(GameConfig::from_json(json), Err(ConfigError::Invalid(_))),
                "{json} should be rejected"
            );
        }
    }

    #[test]
    fn test_rejects_non_finite_rates() {
        let cases = [
            GameConfig { camera_height: f32::INFINITY, ..GameConfig::default() },
            GameConfig { camera_orbit_rate: f32::NAN, ..GameConfig::default() },
            GameConfig { float_rate: f32::NEG_INFINITY, ..GameConfig::default() },
        ];
        for config in cases {
            assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
        }
        // Negative rates just orbit the other way.
        let reversed = GameConfig { camera_orbit_rate: -0.3, ..GameConfig::default() };
        assert!(reversed.validate().is_ok());
    }

    #[test]
    fn test_empty_palette_slot_color() {
        let config = GameConfig { palette: Vec::new(), ..GameConfig::default() };
        assert!(config.validate().is_err());
        assert_eq!(config.slot_color(7), Color::PALETTE[1]);
    }

    #[test]
    fn test_avatar_color_from_json() {
        assert_eq!(GameConfig::default().avatar_color, Color(0x00ff00));
        let config = GameConfig::from_json(r#"{ "avatar_color": 16776960 }"#).expect("valid");
        assert_eq!(config.avatar_color, Color(0xffff00));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(GameConfig::from_json("{ nope"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file() {
        let err = GameConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
