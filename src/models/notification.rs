//! Removal notification model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NotificationKind {
    DriverRemoved,
    CarpoolDisbanded,
    DriverNeeded,
    RemovalRequest,
}

/// A notice produced by a removal. Delivery and storage happen elsewhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemovalNotification {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub carpool_id: String,
    pub event_id: String,
    /// Email of the participant this notice is addressed to
    pub recipient: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub read: bool,
}

impl RemovalNotification {
    pub fn mark_read(&mut self) {
        self.read = true;
    }
}
