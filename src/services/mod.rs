//! Services module
//!
//! This module contains business logic services

pub mod carpool;
pub mod notification;
pub mod removal;

// Re-export commonly used services
pub use carpool::{CarpoolService, JoinCarpoolRequest};
pub use notification::{NotificationService, MessageTemplate, NotificationRequest};
pub use removal::{
    RemovalService, RemovalPolicy, create_removal_request, evaluate_removal_authority,
    execute_driver_removal,
};

use crate::config::settings::Settings;
use crate::utils::errors::Result;

/// Service factory for creating and managing all services
#[derive(Debug, Clone)]
pub struct ServiceFactory {
    pub removal_service: RemovalService,
    pub carpool_service: CarpoolService,
}

impl ServiceFactory {
    /// Create a new ServiceFactory from validated settings
    pub fn new(settings: &Settings) -> Result<Self> {
        settings.validate()?;

        Ok(Self {
            removal_service: RemovalService::new(settings),
            carpool_service: CarpoolService::new(),
        })
    }
}
