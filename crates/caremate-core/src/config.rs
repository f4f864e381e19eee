//! TOML-based application configuration.
//!
//! Carries the pieces of behavior the caregiver can tune:
//! - The named reference zone used for all day-boundary math
//! - Calming sequence defaults
//!
//! Configuration is stored at `~/.config/caremate/config.toml`.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::scheduler::CalmingConfig;
use crate::stats::DayWindows;

/// Analytics configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// Named reference zone for civil-day math. Fixed by policy rather than
    /// read from the device, so aggregates stay reproducible when the user
    /// travels or changes locale.
    #[serde(default = "default_reference_zone")]
    pub reference_zone: String,
}

impl AnalyticsConfig {
    /// Parse the configured zone name.
    pub fn zone(&self) -> Result<Tz, ConfigError> {
        Tz::from_str(self.reference_zone.trim()).map_err(|_| ConfigError::InvalidValue {
            key: "analytics.reference_zone".to_string(),
            message: format!("unknown time zone '{}'", self.reference_zone),
        })
    }

    /// Day-window calculator for the configured zone.
    pub fn day_windows(&self) -> Result<DayWindows, ConfigError> {
        Ok(DayWindows::with_zone(self.zone()?))
    }
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            reference_zone: default_reference_zone(),
        }
    }
}

/// Calming sequence configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalmingSection {
    #[serde(default = "default_calming_interval")]
    pub interval_minutes: i64,
    #[serde(default = "default_calming_count")]
    pub count: usize,
    #[serde(default)]
    pub start_immediately: bool,
}

impl CalmingSection {
    /// Sequence config with this section's values and no fixed seed.
    pub fn to_config(&self) -> CalmingConfig {
        CalmingConfig {
            interval_minutes: self.interval_minutes,
            start_immediately: self.start_immediately,
            count: self.count,
            seed: None,
        }
    }
}

impl Default for CalmingSection {
    fn default() -> Self {
        Self {
            interval_minutes: default_calming_interval(),
            count: default_calming_count(),
            start_immediately: false,
        }
    }
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/caremate/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub analytics: AnalyticsConfig,
    #[serde(default)]
    pub calming: CalmingSection,
}

impl Config {
    /// Parse configuration from a TOML string.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        toml::from_str(raw).map_err(|e| ConfigError::ParseFailed(e.to_string()))
    }

    /// Load configuration from `path`. A missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&raw)
    }

    /// Default config file location (`~/.config/caremate/config.toml`).
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("caremate").join("config.toml"))
    }
}

// Default functions
fn default_reference_zone() -> String {
    "Europe/Rome".to_string()
}
fn default_calming_interval() -> i64 {
    10
}
fn default_calming_count() -> usize {
    3
}
