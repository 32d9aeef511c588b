use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// A personal calendar event, independent of the rotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: Option<i64>,
    pub title: String,
    pub timestamp: NaiveDateTime,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub completed: bool,
}

impl Event {
    /// New, not yet completed event. Sub-second precision is dropped.
    pub fn new(title: &str, timestamp: NaiveDateTime) -> Self {
        Event {
            id: None,
            title: title.to_string(),
            timestamp: timestamp.with_nanosecond(0).unwrap_or(timestamp),
            location: None,
            notes: None,
            completed: false,
        }
    }

    pub fn with_location(mut self, location: &str) -> Self {
        self.location = Some(location.to_string());
        self
    }

    pub fn with_notes(mut self, notes: &str) -> Self {
        self.notes = Some(notes.to_string());
        self
    }

    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }
}
