//! Shift statistics over a date range.

use crate::libs::calendar::{month_bounds, year_bounds};
use crate::libs::cycle::ShiftCycle;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Totals for the days of a range that resolve to a shift.
///
/// Counts are keyed by shift name, so two shift types sharing a name are
/// merged. Hours include any custom override time for the day's position.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ShiftStatistics {
    pub total_days: usize,
    pub total_hours: f64,
    pub shift_counts: BTreeMap<String, usize>,
    pub hours_by_shift: BTreeMap<String, f64>,
}

impl ShiftStatistics {
    pub fn average_hours_per_day(&self) -> f64 {
        if self.total_days == 0 {
            return 0.0;
        }
        self.total_hours / self.total_days as f64
    }

    /// Percentage of counted days spent on `name`.
    pub fn share(&self, name: &str) -> f64 {
        if self.total_days == 0 {
            return 0.0;
        }
        let count = self.shift_counts.get(name).copied().unwrap_or(0);
        count as f64 * 100.0 / self.total_days as f64
    }

    fn record(&mut self, name: &str, hours: f64) {
        self.total_days += 1;
        self.total_hours += hours;
        *self.shift_counts.entry(name.to_string()).or_insert(0) += 1;
        *self.hours_by_shift.entry(name.to_string()).or_insert(0.0) += hours;
    }
}

/// Aggregates `cycle` over `[start, end]`.
///
/// Days before the cycle start, unassigned days and ranges with
/// `start > end` contribute nothing.
///
/// # Arguments
///
/// * `cycle` - Cycle whose pattern shifts are counted
/// * `start` - First date, inclusive
/// * `end` - Last date, inclusive
///
/// # Returns
///
/// Day counts and hours per shift name plus the overall totals.
pub fn aggregate(cycle: &ShiftCycle, start: NaiveDate, end: NaiveDate) -> ShiftStatistics {
    let mut stats = ShiftStatistics::default();
    for (date, shift) in cycle.resolve_range(start, end) {
        let hours = match cycle.cycle_position(date) {
            Some(position) => cycle.hours_at(position, shift),
            None => shift.work_hours,
        };
        stats.record(&shift.name, hours);
    }
    stats
}

/// Preset ranges offered in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RangeKind {
    #[default]
    Month,
    Year,
}

/// A concrete date range to report on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsRange {
    Month { year: i32, month: u32 },
    Year(i32),
    Custom { from: NaiveDate, to: NaiveDate },
}

impl StatsRange {
    /// The range of `kind` that contains `today`.
    pub fn around(kind: RangeKind, today: NaiveDate) -> Self {
        match kind {
            RangeKind::Month => StatsRange::Month {
                year: today.year(),
                month: today.month(),
            },
            RangeKind::Year => StatsRange::Year(today.year()),
        }
    }

    /// Inclusive bounds, or `None` for an invalid month or year.
    pub fn bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        match *self {
            StatsRange::Month { year, month } => month_bounds(year, month),
            StatsRange::Year(year) => year_bounds(year),
            StatsRange::Custom { from, to } => Some((from, to)),
        }
    }
}
