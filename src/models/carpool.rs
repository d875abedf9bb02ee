//! Carpool and participant models

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

/// Which leg(s) of the trip a participant covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParticipantRole {
    DriveBoth,
    DriveTo,
    DriveFrom,
    Passenger,
}

impl ParticipantRole {
    pub fn is_driver(self) -> bool {
        match self {
            ParticipantRole::DriveBoth | ParticipantRole::DriveTo | ParticipantRole::DriveFrom => true,
            ParticipantRole::Passenger => false,
        }
    }

    /// Whether this participant drives the leg towards the event
    pub fn covers_trip_to(self) -> bool {
        matches!(self, ParticipantRole::DriveBoth | ParticipantRole::DriveTo)
    }

    /// Whether this participant drives the leg back from the event
    pub fn covers_trip_from(self) -> bool {
        matches!(self, ParticipantRole::DriveBoth | ParticipantRole::DriveFrom)
    }
}

impl std::fmt::Display for ParticipantRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParticipantRole::DriveBoth => write!(f, "drive both"),
            ParticipantRole::DriveTo => write!(f, "drive to"),
            ParticipantRole::DriveFrom => write!(f, "drive from"),
            ParticipantRole::Passenger => write!(f, "passenger"),
        }
    }
}

/// Which legs a carpool covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CarpoolType {
    RoundTrip,
    ToEvent,
    FromEvent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub id: String,
    pub name: String,
    /// Contact email, also the participant's identity
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub role: ParticipantRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_info: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pickup_location: Option<String>,
    pub joined_at: DateTime<Utc>,
}

impl Participant {
    pub fn is_driver(&self) -> bool {
        self.role.is_driver()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Carpool {
    pub id: String,
    pub event_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub carpool_type: CarpoolType,
    pub max_capacity: u32,
    /// Participants in join order
    #[serde(default)]
    pub participants: Vec<Participant>,
    pub created_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by_participant: Option<Participant>,
    pub created_at: DateTime<Utc>,
}

impl Carpool {
    pub fn drivers(&self) -> impl Iterator<Item = &Participant> {
        self.participants.iter().filter(|p| p.is_driver())
    }

    pub fn passengers(&self) -> impl Iterator<Item = &Participant> {
        self.participants.iter().filter(|p| !p.is_driver())
    }

    pub fn driver_count(&self) -> usize {
        self.drivers().count()
    }

    pub fn find_participant(&self, participant_id: &str) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == participant_id)
    }

    pub fn find_participant_by_email(&self, email: &str) -> Option<&Participant> {
        self.participants.iter().find(|p| p.email == email)
    }

    /// Whether `email` belongs to a participant holding any driver role
    pub fn is_driver(&self, email: &str) -> bool {
        self.drivers().any(|p| p.email == email)
    }

    pub fn is_created_by(&self, email: &str) -> bool {
        self.created_by == email
    }

    pub fn available_spots(&self) -> u32 {
        let taken = u32::try_from(self.participants.len()).unwrap_or(u32::MAX);
        self.max_capacity.saturating_sub(taken)
    }

    pub fn is_full(&self) -> bool {
        self.available_spots() == 0
    }

    /// A carpool without participants no longer exists
    pub fn is_disbanded(&self) -> bool {
        self.participants.is_empty()
    }

    /// Degraded state: passengers remain but nobody drives
    pub fn needs_driver(&self) -> bool {
        !self.participants.is_empty() && self.driver_count() == 0
    }

    /// Whether some driver covers the leg to the event, and one the leg back,
    /// as far as this carpool's type requires
    pub fn legs_covered(&self) -> bool {
        let to = self.drivers().any(|p| p.role.covers_trip_to());
        let from = self.drivers().any(|p| p.role.covers_trip_from());
        match self.carpool_type {
            CarpoolType::RoundTrip => to && from,
            CarpoolType::ToEvent => to,
            CarpoolType::FromEvent => from,
        }
    }
}
