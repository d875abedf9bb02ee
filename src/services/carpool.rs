//! Carpool membership service
//!
//! This service implements the join path, which is where the capacity
//! invariant of a carpool is enforced.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use crate::models::{Carpool, Participant, ParticipantRole};
use crate::utils::errors::{CarpoolBuddyError, Result};
use crate::utils::helpers::{generate_uuid, is_valid_email};

/// Data a prospective participant supplies when joining
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinCarpoolRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub role: ParticipantRole,
    #[serde(default)]
    pub vehicle_info: Option<String>,
    #[serde(default)]
    pub pickup_location: Option<String>,
}

/// Carpool service for membership operations
#[derive(Debug, Clone, Default)]
pub struct CarpoolService;

impl CarpoolService {
    pub fn new() -> Self {
        Self
    }

    /// Append a new participant to `carpool`, returning the updated carpool
    pub fn join(&self, carpool: &Carpool, request: JoinCarpoolRequest, now: DateTime<Utc>) -> Result<Carpool> {
        if !is_valid_email(&request.email) {
            return Err(CarpoolBuddyError::InvalidInput(format!("Invalid email: {}", request.email)));
        }

        if carpool.find_participant_by_email(&request.email).is_some() {
            return Err(CarpoolBuddyError::AlreadyJoined { email: request.email });
        }

        if carpool.is_full() {
            warn!(carpool_id = %carpool.id, max_capacity = carpool.max_capacity, "Join rejected, carpool is full");
            return Err(CarpoolBuddyError::CarpoolFull {
                carpool_id: carpool.id.clone(),
                max_capacity: carpool.max_capacity,
            });
        }

        // Vehicle details only mean something for drivers
        let vehicle_info = if request.role.is_driver() { request.vehicle_info } else { None };

        let participant = Participant {
            id: generate_uuid(),
            name: request.name,
            email: request.email,
            phone: request.phone,
            role: request.role,
            vehicle_info,
            pickup_location: request.pickup_location,
            joined_at: now,
        };

        info!(carpool_id = %carpool.id, participant_id = %participant.id, role = %participant.role, "Participant joined carpool");

        let mut updated = carpool.clone();
        updated.participants.push(participant);
        Ok(updated)
    }
}
