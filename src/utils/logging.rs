//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the CarpoolBuddy binary. The library itself only emits `tracing` events.

use tracing::{info, warn, debug};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};
use crate::config::LoggingConfig;
use crate::models::{Authority, RemovalResult};
use crate::utils::errors::{CarpoolBuddyError, Result};

/// Initialize logging based on configuration
///
/// Logs go to stderr so that stdout stays reserved for JSON output. The
/// returned guard must be held for the lifetime of the program when a file
/// appender is configured.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_new(&config.level)
        .map_err(|e| CarpoolBuddyError::Config(format!("Invalid log filter: {}", e)))?;

    let stderr_layer = if config.json {
        fmt::layer().json().with_writer(std::io::stderr).boxed()
    } else {
        fmt::layer().with_writer(std::io::stderr).boxed()
    };

    let (file_layer, guard) = match &config.file_path {
        Some(dir) => {
            let file_appender = tracing_appender::rolling::daily(dir, "carpoolbuddy.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = fmt::layer().with_ansi(false).with_writer(non_blocking).boxed();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| CarpoolBuddyError::Config(format!("Logging already initialized: {}", e)))?;

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log an authority decision
pub fn log_authority_decision(actor: &str, carpool_id: &str, target_id: &str, authority: &Authority) {
    if authority.can_remove {
        info!(
            actor = actor,
            carpool_id = carpool_id,
            target_id = target_id,
            restrictions = authority.restrictions.len(),
            "Driver removal authorized"
        );
    } else {
        debug!(
            actor = actor,
            carpool_id = carpool_id,
            target_id = target_id,
            reason = authority.reason.as_deref(),
            "Driver removal denied"
        );
    }
}

/// Log the outcome of an executed removal
pub fn log_removal_outcome(carpool_id: &str, removed_by: &str, result: &RemovalResult) {
    if result.disbanded {
        warn!(
            carpool_id = carpool_id,
            removed_by = removed_by,
            notifications = result.notifications.len(),
            "Carpool disbanded after driver removal"
        );
    } else {
        info!(
            carpool_id = carpool_id,
            removed_by = removed_by,
            notifications = result.notifications.len(),
            "Driver removed from carpool"
        );
    }
}
