//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub removal: RemovalConfig,
    pub logging: LoggingConfig,
}

/// Driver removal policy configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RemovalConfig {
    /// Hours before the event below which a removal is high impact
    pub imminent_window_hours: f64,
    /// Hours before the event below which only emergency removals make sense
    pub emergency_window_hours: f64,
    /// Disband a carpool whose last driver was removed, even if passengers remain
    pub disband_when_driverless: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Directory for the daily rolling log file; stderr only when unset
    pub file_path: Option<String>,
    pub json: bool,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        Self::from_file("carpoolbuddy")
    }

    /// Load settings from the given file (extension optional) layered under
    /// `CARPOOLBUDDY__*` environment variables
    pub fn from_file(path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("CARPOOLBUDDY")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::CarpoolBuddyError> {
        super::validation::validate_settings(self)
    }
}

impl Default for RemovalConfig {
    fn default() -> Self {
        Self {
            imminent_window_hours: 24.0,
            emergency_window_hours: 2.0,
            disband_when_driverless: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_path: None,
            json: false,
        }
    }
}
