//! Per-day customisation of a cycle position.
//!
//! An override never changes what the rotation resolves to; it is an overlay the
//! presentation layer composes on top of the resolved shift (see
//! [`ShiftCycle::day_view`](crate::libs::cycle::ShiftCycle::day_view)).

use crate::libs::color::Color;
use crate::libs::shift::{span_hours, ShiftType, ShiftTypeId};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Customisation of one cycle day. Each field is optional and applies on
/// its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyOverride {
    pub id: Uuid,
    /// 1-indexed cycle position this override applies to.
    pub day_number: u32,
    pub selected_shift_id: Option<ShiftTypeId>,
    pub custom_start: Option<NaiveTime>,
    pub custom_end: Option<NaiveTime>,
    pub custom_color: Option<Color>,
}

impl DailyOverride {
    /// Empty override for a 1-indexed day.
    ///
    /// # Arguments
    ///
    /// * `day_number` - Cycle day, starting at 1
    pub fn new(day_number: u32) -> Self {
        DailyOverride {
            id: Uuid::new_v4(),
            day_number,
            selected_shift_id: None,
            custom_start: None,
            custom_end: None,
            custom_color: None,
        }
    }

    pub fn with_shift(mut self, shift_id: ShiftTypeId) -> Self {
        self.selected_shift_id = Some(shift_id);
        self
    }

    /// Sets the custom window. `None` for either end keeps the shift's own
    /// time.
    pub fn with_times(mut self, start: Option<NaiveTime>, end: Option<NaiveTime>) -> Self {
        self.custom_start = start;
        self.custom_end = end;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.custom_color = Some(color);
        self
    }

    /// True when the override carries no customisation at all.
    pub fn is_empty(&self) -> bool {
        self.selected_shift_id.is_none()
            && self.custom_start.is_none()
            && self.custom_end.is_none()
            && self.custom_color.is_none()
    }

    pub fn has_custom_time(&self) -> bool {
        self.custom_start.is_some() || self.custom_end.is_some()
    }

    /// Effective time window for `shift` on a day this override applies to.
    pub fn times_for(&self, shift: &ShiftType) -> (NaiveTime, NaiveTime) {
        (self.custom_start.unwrap_or(shift.start), self.custom_end.unwrap_or(shift.end))
    }

    /// Hours worked on a day this override applies to.
    ///
    /// With any custom time the window is recomputed (a missing bound falls
    /// back to the shift's own); otherwise the shift's stored hours are used.
    pub fn hours_for(&self, shift: &ShiftType) -> f64 {
        if self.has_custom_time() {
            let (start, end) = self.times_for(shift);
            span_hours(start, end)
        } else {
            shift.work_hours
        }
    }
}
