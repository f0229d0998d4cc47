//! Rumble configuration resource.
//!
//! Holds the tunables that turn gameplay notifications into rumbles: the
//! boost coefficient, the damage-to-level mapping and the damage and death
//! envelope shapes. Values can be loaded from and saved to an INI file.
//!
//! # Configuration File Format
//!
//! ```ini
//! [rumble]
//! boost_rumble_coefficient = 0.0085
//! damage_to_rumble_coefficient = 0.01
//! damage_rumble_attack_time = 0.0
//! damage_rumble_sustain_time = 0.15
//! damage_rumble_decay_time = 0.25
//! death_rumble_max_level = 1.0
//! death_rumble_attack_time = 0.0
//! death_rumble_sustain_time = 0.5
//! death_rumble_decay_time = 1.5
//! death_rumble_on_destroyed = true
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::{info, warn};
use std::path::PathBuf;

use crate::resources::rumble::RumbleShape;

const SECTION: &str = "rumble";

/// Default safe values for startup
const DEFAULT_BOOST_RUMBLE_COEFFICIENT: f32 = 0.0085;
const DEFAULT_DAMAGE_TO_RUMBLE_COEFFICIENT: f32 = 0.01;
const DEFAULT_DAMAGE_RUMBLE_ATTACK_TIME: f32 = 0.0;
const DEFAULT_DAMAGE_RUMBLE_SUSTAIN_TIME: f32 = 0.15;
const DEFAULT_DAMAGE_RUMBLE_DECAY_TIME: f32 = 0.25;
const DEFAULT_DEATH_RUMBLE_MAX_LEVEL: f32 = 1.0;
const DEFAULT_DEATH_RUMBLE_ATTACK_TIME: f32 = 0.0;
const DEFAULT_DEATH_RUMBLE_SUSTAIN_TIME: f32 = 0.5;
const DEFAULT_DEATH_RUMBLE_DECAY_TIME: f32 = 1.5;
const DEFAULT_DEATH_RUMBLE_ON_DESTROYED: bool = true;
const DEFAULT_CONFIG_PATH: &str = "./rumble.ini";

/// Rumble tunables.
///
/// Observers and systems that produce rumbles read this resource. When it is
/// missing they fall back to [`RumbleConfig::new`].
#[derive(Resource, Debug, Clone)]
pub struct RumbleConfig {
    /// Multiplier from engine boost to continuous rumble level.
    pub boost_rumble_coefficient: f32,
    /// Multiplier from damage amount to damage rumble level.
    pub damage_to_rumble_coefficient: f32,
    pub damage_rumble_attack_time: f32,
    pub damage_rumble_sustain_time: f32,
    pub damage_rumble_decay_time: f32,
    pub death_rumble_max_level: f32,
    pub death_rumble_attack_time: f32,
    pub death_rumble_sustain_time: f32,
    pub death_rumble_decay_time: f32,
    /// Add the death rumble when the focused vehicle is destroyed.
    pub death_rumble_on_destroyed: bool,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for RumbleConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl RumbleConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            boost_rumble_coefficient: DEFAULT_BOOST_RUMBLE_COEFFICIENT,
            damage_to_rumble_coefficient: DEFAULT_DAMAGE_TO_RUMBLE_COEFFICIENT,
            damage_rumble_attack_time: DEFAULT_DAMAGE_RUMBLE_ATTACK_TIME,
            damage_rumble_sustain_time: DEFAULT_DAMAGE_RUMBLE_SUSTAIN_TIME,
            damage_rumble_decay_time: DEFAULT_DAMAGE_RUMBLE_DECAY_TIME,
            death_rumble_max_level: DEFAULT_DEATH_RUMBLE_MAX_LEVEL,
            death_rumble_attack_time: DEFAULT_DEATH_RUMBLE_ATTACK_TIME,
            death_rumble_sustain_time: DEFAULT_DEATH_RUMBLE_SUSTAIN_TIME,
            death_rumble_decay_time: DEFAULT_DEATH_RUMBLE_DECAY_TIME,
            death_rumble_on_destroyed: DEFAULT_DEATH_RUMBLE_ON_DESTROYED,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing or unparsable values retain their current values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;

        let float_fields: [(&str, &mut f32); 9] = [
            ("boost_rumble_coefficient", &mut self.boost_rumble_coefficient),
            (
                "damage_to_rumble_coefficient",
                &mut self.damage_to_rumble_coefficient,
            ),
            ("damage_rumble_attack_time", &mut self.damage_rumble_attack_time),
            (
                "damage_rumble_sustain_time",
                &mut self.damage_rumble_sustain_time,
            ),
            ("damage_rumble_decay_time", &mut self.damage_rumble_decay_time),
            ("death_rumble_max_level", &mut self.death_rumble_max_level),
            ("death_rumble_attack_time", &mut self.death_rumble_attack_time),
            ("death_rumble_sustain_time", &mut self.death_rumble_sustain_time),
            ("death_rumble_decay_time", &mut self.death_rumble_decay_time),
        ];
        for (key, field) in float_fields {
            match config.getfloat(SECTION, key) {
                Ok(Some(value)) => *field = value as f32,
                Ok(None) => {}
                Err(e) => warn!("Ignoring [{}] {}: {}", SECTION, key, e),
            }
        }

        match config.getbool(SECTION, "death_rumble_on_destroyed") {
            Ok(Some(value)) => self.death_rumble_on_destroyed = value,
            Ok(None) => {}
            Err(e) => warn!("Ignoring [{}] death_rumble_on_destroyed: {}", SECTION, e),
        }

        info!(
            "Loaded rumble config: boost={}, damage={}, death={:?}, death_on_destroyed={}",
            self.boost_rumble_coefficient,
            self.damage_to_rumble_coefficient,
            self.death_rumble_shape(),
            self.death_rumble_on_destroyed
        );

        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        let entries = [
            ("boost_rumble_coefficient", self.boost_rumble_coefficient.to_string()),
            (
                "damage_to_rumble_coefficient",
                self.damage_to_rumble_coefficient.to_string(),
            ),
            ("damage_rumble_attack_time", self.damage_rumble_attack_time.to_string()),
            ("damage_rumble_sustain_time", self.damage_rumble_sustain_time.to_string()),
            ("damage_rumble_decay_time", self.damage_rumble_decay_time.to_string()),
            ("death_rumble_max_level", self.death_rumble_max_level.to_string()),
            ("death_rumble_attack_time", self.death_rumble_attack_time.to_string()),
            ("death_rumble_sustain_time", self.death_rumble_sustain_time.to_string()),
            ("death_rumble_decay_time", self.death_rumble_decay_time.to_string()),
            (
                "death_rumble_on_destroyed",
                self.death_rumble_on_destroyed.to_string(),
            ),
        ];
        for (key, value) in entries {
            config.set(SECTION, key, Some(value));
        }

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved rumble config to {:?}", self.config_path);

        Ok(())
    }

    /// Rumble level for a hit of `damage`, clamped to `[0, 1]`.
    pub fn damage_rumble_level(&self, damage: f32) -> f32 {
        (damage * self.damage_to_rumble_coefficient).clamp(0.0, 1.0)
    }

    /// Envelope for a hit of `damage`.
    pub fn damage_rumble_shape(&self, damage: f32) -> RumbleShape {
        RumbleShape::new(
            self.damage_rumble_level(damage),
            self.damage_rumble_attack_time,
            self.damage_rumble_sustain_time,
            self.damage_rumble_decay_time,
        )
    }

    /// Envelope for the focused vehicle being destroyed.
    pub fn death_rumble_shape(&self) -> RumbleShape {
        RumbleShape::new(
            self.death_rumble_max_level,
            self.death_rumble_attack_time,
            self.death_rumble_sustain_time,
            self.death_rumble_decay_time,
        )
    }

    /// Continuous rumble level for an engine boost sample.
    pub fn boost_rumble_level(&self, boost: f32) -> f32 {
        boost * self.boost_rumble_coefficient
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn temp_config_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "vehicle_rumble_{}_{}.ini",
            name,
            std::process::id()
        ))
    }

    #[test]
    fn test_defaults() {
        let cfg = RumbleConfig::new();
        assert!(approx_eq(cfg.boost_rumble_coefficient, 0.0085));
        assert!(approx_eq(cfg.damage_rumble_sustain_time, 0.15));
        assert!(approx_eq(cfg.damage_rumble_decay_time, 0.25));
        assert!(cfg.death_rumble_on_destroyed);
        assert_eq!(cfg.config_path, PathBuf::from(DEFAULT_CONFIG_PATH));
    }

    #[test]
    fn test_with_path_keeps_defaults() {
        let cfg = RumbleConfig::with_path("/tmp/other.ini");
        assert_eq!(cfg.config_path, PathBuf::from("/tmp/other.ini"));
        assert!(approx_eq(cfg.boost_rumble_coefficient, 0.0085));
    }

    #[test]
    fn test_damage_rumble_level_is_clamped() {
        let mut cfg = RumbleConfig::new();
        cfg.damage_to_rumble_coefficient = 0.02;
        assert!(approx_eq(cfg.damage_rumble_level(10.0), 0.2));
        assert!(approx_eq(cfg.damage_rumble_level(1000.0), 1.0));
        assert!(approx_eq(cfg.damage_rumble_level(-5.0), 0.0));
    }

    #[test]
    fn test_damage_rumble_shape_uses_configured_times() {
        let cfg = RumbleConfig::new();
        let shape = cfg.damage_rumble_shape(50.0);
        assert!(approx_eq(shape.max_level, 0.5));
        assert!(approx_eq(shape.attack_time, 0.0));
        assert!(approx_eq(shape.sustain_time, 0.15));
        assert!(approx_eq(shape.decay_time, 0.25));
    }

    #[test]
    fn test_death_rumble_shape() {
        let mut cfg = RumbleConfig::new();
        cfg.death_rumble_max_level = 0.9;
        cfg.death_rumble_decay_time = 2.0;
        let shape = cfg.death_rumble_shape();
        assert!(approx_eq(shape.max_level, 0.9));
        assert!(approx_eq(shape.decay_time, 2.0));
    }

    #[test]
    fn test_boost_rumble_level() {
        let cfg = RumbleConfig::new();
        assert!(approx_eq(cfg.boost_rumble_level(100.0), 0.85));
    }

    #[test]
    fn test_load_missing_file_is_error() {
        let mut cfg = RumbleConfig::with_path(temp_config_path("missing_does_not_exist"));
        assert!(cfg.load_from_file().is_err());
        assert!(approx_eq(cfg.boost_rumble_coefficient, 0.0085));
    }

    #[test]
    fn test_save_then_load_preserves_values() {
        let path = temp_config_path("save_load");
        let mut cfg = RumbleConfig::with_path(&path);
        cfg.boost_rumble_coefficient = 0.5;
        cfg.death_rumble_sustain_time = 3.0;
        cfg.death_rumble_on_destroyed = false;
        cfg.save_to_file().unwrap();

        let mut loaded = RumbleConfig::with_path(&path);
        loaded.load_from_file().unwrap();
        let _ = std::fs::remove_file(&path);

        assert!(approx_eq(loaded.boost_rumble_coefficient, 0.5));
        assert!(approx_eq(loaded.death_rumble_sustain_time, 3.0));
        assert!(!loaded.death_rumble_on_destroyed);
    }

    #[test]
    fn test_load_partial_file_keeps_other_defaults() {
        let path = temp_config_path("partial");
        std::fs::write(&path, "[rumble]\ndamage_to_rumble_coefficient = 0.05\n").unwrap();

        let mut cfg = RumbleConfig::with_path(&path);
        cfg.load_from_file().unwrap();
        let _ = std::fs::remove_file(&path);

        assert!(approx_eq(cfg.damage_to_rumble_coefficient, 0.05));
        assert!(approx_eq(cfg.boost_rumble_coefficient, 0.0085));
        assert!(cfg.death_rumble_on_destroyed);
    }

    #[test]
    fn test_load_ignores_invalid_values() {
        let path = temp_config_path("invalid");
        std::fs::write(
            &path,
            "[rumble]\nboost_rumble_coefficient = lots\ndeath_rumble_max_level = 0.75\n",
        )
        .unwrap();

        let mut cfg = RumbleConfig::with_path(&path);
        cfg.load_from_file().unwrap();
        let _ = std::fs::remove_file(&path);

        assert!(approx_eq(cfg.boost_rumble_coefficient, 0.0085));
        assert!(approx_eq(cfg.death_rumble_max_level, 0.75));
    }
}
