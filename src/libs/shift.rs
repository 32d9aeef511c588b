//! Shift type definitions.
//!
//! A shift type is the leaf entity of the rotation engine: a named, colored
//! time window such as "Day" (08:00–16:00) or "Night" (22:00–06:00).
//!
//! ## Work hours
//!
//! Work hours are derived from the time window unless given explicitly. A window
//! whose end is earlier than its start crosses midnight and is wrapped into the
//! next day, so `22:00–06:00` is 8 hours. Equal start and end yields 0 hours.
//! Rest minutes are informational and are not subtracted.

use crate::libs::color::Color;
use crate::libs::error::{NameKind, RotaError};
use chrono::{NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Stable identity of a shift type. Cycles and overrides refer to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShiftTypeId(pub Uuid);

impl ShiftTypeId {
    pub fn new() -> Self {
        ShiftTypeId(Uuid::new_v4())
    }
}

impl Default for ShiftTypeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ShiftTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for ShiftTypeId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(ShiftTypeId)
    }
}

/// Hours between two times of day, wrapping across midnight when `end < start`.
pub fn span_hours(start: NaiveTime, end: NaiveTime) -> f64 {
    let mut seconds = (end - start).num_seconds();
    if seconds < 0 {
        seconds += SECONDS_PER_DAY;
    }
    seconds as f64 / 3600.0
}

/// A named, colored time window that cycles are built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftType {
    pub id: ShiftTypeId,
    pub name: String,
    pub color: Color,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub work_hours: f64,
    pub rest_minutes: Option<u32>,
    pub notes: Option<String>,
    /// Display ordering key. Defaults to the creation timestamp.
    pub order: i64,
}

impl ShiftType {
    /// Creates a shift type with work hours derived from its window.
    ///
    /// # Arguments
    ///
    /// * `name` - Display name
    /// * `color` - Color used in calendar and exports
    /// * `start` - Start of the window
    /// * `end` - End of the window; earlier than `start` means it ends the next day
    ///
    /// # Returns
    ///
    /// A shift type with a fresh id and the current timestamp as its order.
    pub fn new(name: &str, color: Color, start: NaiveTime, end: NaiveTime) -> Self {
        ShiftType {
            id: ShiftTypeId::new(),
            name: name.to_string(),
            color,
            start,
            end,
            work_hours: span_hours(start, end),
            rest_minutes: None,
            notes: None,
            order: Utc::now().timestamp(),
        }
    }

    /// Overrides the computed work hours, e.g. for an "Off" shift spanning a day.
    pub fn with_work_hours(mut self, hours: f64) -> Self {
        self.work_hours = hours;
        self
    }

    pub fn with_rest_minutes(mut self, minutes: u32) -> Self {
        self.rest_minutes = Some(minutes);
        self
    }

    pub fn with_notes(mut self, notes: &str) -> Self {
        self.notes = Some(notes.to_string());
        self
    }

    pub fn with_order(mut self, order: i64) -> Self {
        self.order = order;
        self
    }

    /// Moves the time window and recomputes work hours from it.
    pub fn set_times(&mut self, start: NaiveTime, end: NaiveTime) {
        self.start = start;
        self.end = end;
        self.work_hours = span_hours(start, end);
    }

    /// Rejects a blank name.
    pub fn validate(&self) -> Result<(), RotaError> {
        if self.name.trim().is_empty() {
            return Err(RotaError::EmptyName(NameKind::ShiftType));
        }
        Ok(())
    }
}
