//! CarpoolBuddy
//!
//! Core of an event carpool coordinator. Given plain Event, Carpool and
//! Participant records, it decides who may remove a driver from a carpool,
//! computes the resulting carpool (or its disbandment) and builds the
//! notifications the removal produces. Rendering, storage and delivery are
//! left to the caller.

#![allow(non_snake_case)]

pub mod config;
pub mod services;
pub mod models;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{CarpoolBuddyError, Result};

// Re-export main components for easy access
pub use services::{
    ServiceFactory, RemovalService, RemovalPolicy, CarpoolService,
    create_removal_request, evaluate_removal_authority, execute_driver_removal,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
