//! Driver removal verdicts, results and requests

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use super::carpool::Carpool;
use super::notification::RemovalNotification;

/// The evaluator's verdict on whether an actor may remove a driver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Authority {
    pub can_remove: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub requires_confirmation: bool,
    /// Advisory caveats; never a cause for denial on their own
    #[serde(default)]
    pub restrictions: Vec<String>,
}

impl Authority {
    pub fn denied(reason: impl Into<String>) -> Self {
        Self {
            can_remove: false,
            reason: Some(reason.into()),
            requires_confirmation: false,
            restrictions: Vec::new(),
        }
    }

    pub fn granted(restrictions: Vec<String>) -> Self {
        Self {
            can_remove: true,
            reason: None,
            requires_confirmation: true,
            restrictions,
        }
    }

    /// Whether a UI must obtain explicit human confirmation before executing
    pub fn needs_human_confirmation(&self) -> bool {
        self.requires_confirmation || !self.restrictions.is_empty()
    }
}

/// Outcome of an executed removal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemovalResult {
    /// `None` when the carpool was disbanded
    pub updated_carpool: Option<Carpool>,
    pub notifications: Vec<RemovalNotification>,
    pub disbanded: bool,
}

/// How close the event is, measured against the configured windows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventUrgency {
    Normal,
    /// Inside the imminent window (24 hours by default)
    Imminent,
    /// Inside the emergency window (2 hours by default)
    Emergency,
}

/// Preview of what a removal would do, for a confirmation dialog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemovalImpact {
    pub remaining_drivers: usize,
    pub affected_passengers: usize,
    pub will_disband: bool,
    pub hours_until_event: f64,
    pub urgency: EventUrgency,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemovalRequestStatus {
    Pending,
    Approved,
    Rejected,
}

/// A deferred-approval removal. Only construction is provided here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemovalRequest {
    pub id: String,
    pub carpool_id: String,
    pub target_participant_id: String,
    pub requested_by: String,
    pub reason: String,
    pub timestamp: DateTime<Utc>,
    pub status: RemovalRequestStatus,
}
