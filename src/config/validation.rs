//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{CarpoolBuddyError, Result};
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_removal_config(&settings.removal)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate removal policy configuration
fn validate_removal_config(config: &super::RemovalConfig) -> Result<()> {
    let windows = [
        ("Imminent", config.imminent_window_hours),
        ("Emergency", config.emergency_window_hours),
    ];
    for (name, hours) in windows {
        if !hours.is_finite() || hours <= 0.0 {
            return Err(CarpoolBuddyError::Config(
                format!("{} window must be a finite number of hours greater than 0", name)
            ));
        }
    }

    if config.emergency_window_hours >= config.imminent_window_hours {
        return Err(CarpoolBuddyError::Config(
            "Emergency window must be shorter than the imminent window".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(CarpoolBuddyError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(CarpoolBuddyError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    if let Some(path) = &config.file_path {
        if path.trim().is_empty() {
            return Err(CarpoolBuddyError::Config(
                "Log file path must not be blank".to_string()
            ));
        }
    }

    Ok(())
}
