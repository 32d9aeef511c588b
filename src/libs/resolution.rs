//! Tagged results of resolving a date against a cycle.
//!
//! Resolution never fails. When data is missing or inconsistent the engine
//! either reports why nothing applies ([`Resolution::Unresolved`]) or, on the
//! paths that substitute a default, says so explicitly
//! ([`Resolution::Defaulted`]) so callers and tests can tell a correctly
//! resolved day from one that fell back.

use crate::libs::color::Color;
use crate::libs::shift::{ShiftType, ShiftTypeId};
use chrono::{NaiveDate, NaiveTime};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnresolvedReason {
    /// The cycle has no shifts or no pattern.
    EmptyCycle,
    /// The date is earlier than the cycle's start date.
    BeforeStart,
    /// The pattern entry for this position does not index into the shifts.
    PatternIndexOutOfRange { position: usize, index: usize },
    /// The pattern is shorter than the cycle length at this position.
    MissingPatternEntry { position: usize },
    /// The shift this position used was deleted and nothing replaced it.
    Unassigned { position: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultReason {
    /// The pattern entry was out of range; the first shift was substituted.
    PatternIndexOutOfRange { position: usize, index: usize },
    /// No pattern entry existed for the position; the first shift was substituted.
    MissingPatternEntry { position: usize },
    /// A per-day selection was left blank; slot 0 was used.
    NoSelection,
    /// An override selected a shift the cycle does not own; the pattern shift was kept.
    OverrideShiftMissing(ShiftTypeId),
    /// A per-day selection named an unknown shift; slot 0 was used.
    UnknownSelection(ShiftTypeId),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution<'a> {
    Resolved(&'a ShiftType),
    Defaulted(&'a ShiftType, DefaultReason),
    Unresolved(UnresolvedReason),
}

impl<'a> Resolution<'a> {
    /// The shift only when it was resolved without substitution.
    pub fn resolved(&self) -> Option<&'a ShiftType> {
        match *self {
            Resolution::Resolved(shift) => Some(shift),
            _ => None,
        }
    }

    /// The shift whether resolved or defaulted.
    pub fn shift(&self) -> Option<&'a ShiftType> {
        match *self {
            Resolution::Resolved(shift) | Resolution::Defaulted(shift, _) => Some(shift),
            Resolution::Unresolved(_) => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolution::Resolved(_))
    }

    pub fn is_defaulted(&self) -> bool {
        matches!(self, Resolution::Defaulted(..))
    }
}

/// A resolved date with the day's override composed on top.
#[derive(Debug, Clone, PartialEq)]
pub struct DayView<'a> {
    pub date: NaiveDate,
    /// Zero-indexed cycle position.
    pub position: usize,
    /// What the rotation pattern says.
    pub base: &'a ShiftType,
    /// What should be displayed: `Resolved` with the override's shift or the
    /// base shift, `Defaulted` when the override's shift is unknown.
    pub effective: Resolution<'a>,
    pub color: Color,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub hours: f64,
    pub overridden: bool,
}

impl<'a> DayView<'a> {
    pub fn shift(&self) -> &'a ShiftType {
        self.effective.shift().unwrap_or(self.base)
    }
}
