//! Error handling for CarpoolBuddy
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy. Authority denials are not
//! errors; they are returned as `Authority` values.

use thiserror::Error;

/// Main error type for CarpoolBuddy
#[derive(Error, Debug)]
pub enum CarpoolBuddyError {
    #[error("Participant {participant_id} not found in carpool {carpool_id}")]
    ParticipantNotFound { participant_id: String, carpool_id: String },

    #[error("Carpool {carpool_id} is full (capacity {max_capacity})")]
    CarpoolFull { carpool_id: String, max_capacity: u32 },

    #[error("{email} has already joined this carpool")]
    AlreadyJoined { email: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for CarpoolBuddyError {
    fn from(err: config::ConfigError) -> Self {
        CarpoolBuddyError::Config(err.to_string())
    }
}

/// Result type alias for CarpoolBuddy operations
pub type Result<T> = std::result::Result<T, CarpoolBuddyError>;

impl CarpoolBuddyError {
    /// Check if the error is recoverable
    ///
    /// A missing participant means the caller's snapshot disagrees with what
    /// it displayed; retrying with the same snapshot yields the same error.
    pub fn is_recoverable(&self) -> bool {
        match self {
            CarpoolBuddyError::ParticipantNotFound { .. } => false,
            CarpoolBuddyError::CarpoolFull { .. } => false,
            CarpoolBuddyError::AlreadyJoined { .. } => false,
            CarpoolBuddyError::Config(_) => false,
            CarpoolBuddyError::InvalidInput(_) => false,
            CarpoolBuddyError::Serialization(_) => false,
            CarpoolBuddyError::Io(_) => true,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CarpoolBuddyError::ParticipantNotFound { .. } => ErrorSeverity::Critical,
            CarpoolBuddyError::Config(_) => ErrorSeverity::Critical,
            CarpoolBuddyError::CarpoolFull { .. } => ErrorSeverity::Warning,
            CarpoolBuddyError::AlreadyJoined { .. } => ErrorSeverity::Warning,
            CarpoolBuddyError::InvalidInput(_) => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
