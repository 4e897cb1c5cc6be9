//! Policy thresholds and their TOML file form.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Energy percent below which the bot recharges when not under attack.
    /// Also the energy reserve kept when topping up a critical shield.
    pub battery_low: u8,
    pub battery_top_up: u8,
    pub shield_top_up: u8,
    pub shield_damaged: u8,
    pub shield_serious: u8,
    pub serious_injury: u8,
    pub safe_distance: f64,
    pub attack_range: f64,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            battery_low: 20,
            battery_top_up: 90,
            shield_top_up: 60,
            shield_damaged: 10,
            shield_serious: 10,
            serious_injury: 30,
            safe_distance: 5.0,
            attack_range: 4.0,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("config encode error: {0}")]
    Encode(#[from] toml::ser::Error),
    #[error("threshold `{field}` is {value}, must be at most 100")]
    PercentOutOfRange { field: &'static str, value: u8 },
    #[error("distance `{field}` is {value}, must be finite and non-negative")]
    InvalidDistance { field: &'static str, value: f64 },
    #[error("attack range {attack_range} exceeds safe distance {safe_distance}")]
    RangeBeyondSafeDistance { attack_range: f64, safe_distance: f64 },
}

impl PolicyConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    /// Load `path` when one is given, otherwise use the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn write_atomic(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp_path = path.with_extension("toml.tmp");
        fs::write(&tmp_path, toml::to_string_pretty(self)?)?;
        fs::rename(&tmp_path, path)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let percents = [
            ("battery_low", self.battery_low),
            ("battery_top_up", self.battery_top_up),
            ("shield_top_up", self.shield_top_up),
            ("shield_damaged", self.shield_damaged),
            ("shield_serious", self.shield_serious),
            ("serious_injury", self.serious_injury),
        ];
        if let Some((field, value)) = percents.into_iter().find(|(_, value)| *value > 100) {
            tracing::warn!(field, value, "rejecting policy config");
            return Err(ConfigError::PercentOutOfRange { field, value });
        }
        let distances = [("safe_distance", self.safe_distance), ("attack_range", self.attack_range)];
        for (field, value) in distances {
            if !value.is_finite() || value < 0.0 {
                tracing::warn!(field, value, "rejecting policy config");
                return Err(ConfigError::InvalidDistance { field, value });
            }
        }
        if self.attack_range > self.safe_distance {
            tracing::warn!(
                attack_range = self.attack_range,
                safe_distance = self.safe_distance,
                "rejecting policy config"
            );
            return Err(ConfigError::RangeBeyondSafeDistance {
                attack_range: self.attack_range,
                safe_distance: self.safe_distance,
            });
        }
        Ok(())
    }
}
