//! Test data helpers for creating events, participants and carpools

use chrono::{Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};
use CarpoolBuddy::models::{Carpool, CarpoolType, Event, Participant, ParticipantRole};

pub const EVENT_CREATOR: &str = "organizer@example.com";
pub const CARPOOL_CREATOR: &str = "creator@example.com";
pub const OUTSIDER: &str = "stranger@example.com";

/// Fixed wall-clock "now" all time-based tests are measured from
pub fn test_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 2, 10)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

/// An event starting `hours` after [`test_now`]
pub fn event_in_hours(hours: i64) -> Event {
    let start = test_now() + Duration::hours(hours);
    Event {
        id: "event-1".to_string(),
        name: "Tech Conference 2025".to_string(),
        date: start.date(),
        time: start.time(),
        end_date: None,
        end_time: None,
        location: "Convention Center Downtown".to_string(),
        description: "Annual technology conference".to_string(),
        created_by: EVENT_CREATOR.to_string(),
        created_at: Utc.with_ymd_and_hms(2025, 1, 10, 10, 0, 0).unwrap(),
    }
}

/// Participant whose email is `<id>@example.com`
pub fn participant(id: &str, role: ParticipantRole) -> Participant {
    Participant {
        id: id.to_string(),
        name: format!("{} Tester", id),
        email: email_of(id),
        phone: None,
        role,
        vehicle_info: role.is_driver().then(|| "2023 Honda Civic - Blue".to_string()),
        pickup_location: None,
        joined_at: Utc.with_ymd_and_hms(2025, 1, 11, 9, 0, 0).unwrap(),
    }
}

pub fn email_of(id: &str) -> String {
    format!("{}@example.com", id)
}

/// Builder for test carpools
#[derive(Debug, Clone)]
pub struct TestCarpool {
    participants: Vec<Participant>,
    created_by: String,
    max_capacity: u32,
}

impl TestCarpool {
    pub fn new() -> Self {
        Self {
            participants: Vec::new(),
            created_by: CARPOOL_CREATOR.to_string(),
            max_capacity: 4,
        }
    }

    pub fn with_driver(mut self, id: &str) -> Self {
        self.participants.push(participant(id, ParticipantRole::DriveBoth));
        self
    }

    pub fn with_participant(mut self, id: &str, role: ParticipantRole) -> Self {
        self.participants.push(participant(id, role));
        self
    }

    pub fn with_passenger(mut self, id: &str) -> Self {
        self.participants.push(participant(id, ParticipantRole::Passenger));
        self
    }

    pub fn with_creator(mut self, email: &str) -> Self {
        self.created_by = email.to_string();
        self
    }

    pub fn with_capacity(mut self, max_capacity: u32) -> Self {
        self.max_capacity = max_capacity;
        self
    }

    pub fn build(self) -> Carpool {
        Carpool {
            id: "carpool-1".to_string(),
            event_id: "event-1".to_string(),
            name: "Downtown Carpool".to_string(),
            carpool_type: CarpoolType::RoundTrip,
            max_capacity: self.max_capacity,
            participants: self.participants,
            created_by: self.created_by,
            created_by_participant: None,
            created_at: Utc.with_ymd_and_hms(2025, 1, 11, 9, 0, 0).unwrap(),
        }
    }
}
