//! Event model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

/// An event that carpools are organized for
///
/// `date` and `time` are the wall-clock start of the event as entered by its
/// creator; no timezone is attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub name: String,
    pub date: NaiveDate,
    #[serde(with = "wall_clock")]
    pub time: NaiveTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "wall_clock::option")]
    pub end_time: Option<NaiveTime>,
    pub location: String,
    #[serde(default)]
    pub description: String,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

impl Event {
    /// Scheduled start as a wall-clock timestamp
    pub fn starts_at(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }

    /// Scheduled end, if one was given. A bare end time falls on the start date.
    pub fn ends_at(&self) -> Option<NaiveDateTime> {
        match (self.end_date, self.end_time) {
            (Some(date), Some(time)) => Some(date.and_time(time)),
            (Some(date), None) => Some(date.and_time(self.time)),
            (None, Some(time)) => Some(self.date.and_time(time)),
            (None, None) => None,
        }
    }

    /// Fractional hours from `now` until the event starts; negative once started
    pub fn hours_until_start(&self, now: NaiveDateTime) -> f64 {
        let remaining = self.starts_at().signed_duration_since(now);
        remaining.num_milliseconds() as f64 / 3_600_000.0
    }

    pub fn is_created_by(&self, email: &str) -> bool {
        self.created_by == email
    }
}

/// `HH:MM` (de)serialization; seconds are accepted on input
mod wall_clock {
    use chrono::NaiveTime;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    fn parse(raw: &str) -> Result<NaiveTime, chrono::ParseError> {
        NaiveTime::parse_from_str(raw, FORMAT)
            .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
    }

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(D::Error::custom)
    }

    pub mod option {
        use chrono::NaiveTime;
        use serde::{de::Error, Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(time: &Option<NaiveTime>, serializer: S) -> Result<S::Ok, S::Error> {
            match time {
                Some(time) => super::serialize(time, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveTime>, D::Error> {
            match Option::<String>::deserialize(deserializer)? {
                Some(raw) if raw.is_empty() => Ok(None),
                Some(raw) => super::parse(&raw).map(Some).map_err(D::Error::custom),
                None => Ok(None),
            }
        }
    }
}
