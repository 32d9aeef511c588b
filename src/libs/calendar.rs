//! Calendar-day arithmetic on the proleptic Gregorian calendar.
//!
//! Everything in the rotation engine works in whole calendar days. Time-of-day
//! is stripped before any subtraction so that 23:59 and 00:01 on consecutive
//! days are one day apart.

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};

/// First day of the week for calendar grids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Monday,
    Sunday,
}

impl WeekStart {
    pub fn weekday(self) -> Weekday {
        match self {
            WeekStart::Monday => Weekday::Mon,
            WeekStart::Sunday => Weekday::Sun,
        }
    }

    /// Weekday headers in grid order.
    pub fn headers(self) -> [Weekday; 7] {
        let mut headers = [self.weekday(); 7];
        for i in 1..headers.len() {
            headers[i] = headers[i - 1].succ();
        }
        headers
    }
}

/// Calendar date of a moment.
pub fn truncate(moment: NaiveDateTime) -> NaiveDate {
    moment.date()
}

/// Whole days from `from` to `to`; negative when `to` is earlier.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// `None` when the result would leave chrono's representable range.
pub fn add_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    if days >= 0 {
        date.checked_add_days(Days::new(days as u64))
    } else {
        date.checked_sub_days(Days::new(days.unsigned_abs()))
    }
}

/// First and last day of a month, or `None` for an invalid month.
pub fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((first, next.pred_opt()?))
}

pub fn year_bounds(year: i32) -> Option<(NaiveDate, NaiveDate)> {
    Some((NaiveDate::from_ymd_opt(year, 1, 1)?, NaiveDate::from_ymd_opt(year, 12, 31)?))
}

/// Month laid out for a 7-column grid: leading `None`s up to the first day's
/// column, then every day of the month.
pub fn month_grid(year: i32, month: u32, week_start: WeekStart) -> Vec<Option<NaiveDate>> {
    let Some((first, last)) = month_bounds(year, month) else {
        return Vec::new();
    };
    let leading = (first.weekday().num_days_from_monday() + 7 - week_start.weekday().num_days_from_monday()) % 7;

    let mut grid = vec![None; leading as usize];
    grid.extend(first.iter_days().take_while(|day| *day <= last).map(Some));
    grid
}
