//! Shift cycle: the rotation engine.
//!
//! A cycle is a repeating pattern of shift assignments anchored at a start
//! date. For any date on or after the start, the cycle position is
//! `days_since_start mod length` and the pattern entry at that position names
//! the shift (by index into the cycle's own shift list).
//!
//! ```text
//!  start 2024-01-01, length 3, pattern [0, 1, 2], shifts [Day, Night, Off]
//!
//!  date        01  02  03  04  05  06
//!  position     0   1   2   0   1   2
//!  shift      Day Ngt Off Day Ngt Off
//! ```
//!
//! Per-day overrides are kept on the cycle but never change what
//! [`ShiftCycle::resolve_shift`] returns; [`ShiftCycle::day_view`] composes
//! them on top for display.

use crate::libs::calendar::{add_days, days_between};
use crate::libs::daily_override::DailyOverride;
use crate::libs::error::{NameKind, RotaError};
use crate::libs::resolution::{DayView, DefaultReason, Resolution, UnresolvedReason};
use crate::libs::shift::{ShiftType, ShiftTypeId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Shortest allowed cycle, in days.
pub const MIN_CYCLE_LENGTH: u32 = 1;
/// Longest allowed cycle, in days.
pub const MAX_CYCLE_LENGTH: u32 = 30;

/// Pattern entry whose shift slot was removed. Never a valid index, so the
/// day resolves to no shift.
pub const UNASSIGNED_SLOT: usize = usize::MAX;

/// Stable identity of a cycle, independent of its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CycleId(pub Uuid);

impl CycleId {
    pub fn new() -> Self {
        CycleId(Uuid::new_v4())
    }
}

impl Default for CycleId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CycleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for CycleId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(CycleId)
    }
}

/// Pattern built from per-day shift selections, with the days that had to
/// fall back to slot 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternSelection {
    pub pattern: Vec<usize>,
    /// `(zero-indexed day, reason)` for every substituted entry.
    pub defaulted: Vec<(usize, DefaultReason)>,
}

/// A named, repeating rotation of shifts.
///
/// The cycle owns copies of the shift types it uses; the registry keeps
/// those copies in step when a shift type is edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftCycle {
    pub id: CycleId,
    pub name: String,
    pub length: u32,
    pub start_date: NaiveDate,
    /// Index into `shifts` for each cycle position.
    pub pattern: Vec<usize>,
    pub shifts: Vec<ShiftType>,
    pub is_active: bool,
    pub daily_overrides: Vec<DailyOverride>,
    pub members: Vec<String>,
    pub notes: Option<String>,
}

impl ShiftCycle {
    /// Builds an inactive cycle whose length is the pattern length.
    ///
    /// # Arguments
    ///
    /// * `name` - Display name, must not be blank
    /// * `start_date` - Date of cycle day 1
    /// * `shifts` - Shift types the pattern indexes into
    /// * `pattern` - One index into `shifts` per cycle day
    ///
    /// # Returns
    ///
    /// The validated cycle, or the first invariant it breaks.
    pub fn new(name: &str, start_date: NaiveDate, shifts: Vec<ShiftType>, pattern: Vec<usize>) -> Result<Self, RotaError> {
        let cycle = ShiftCycle {
            id: CycleId::new(),
            name: name.to_string(),
            length: pattern.len() as u32,
            start_date,
            pattern,
            shifts,
            is_active: false,
            daily_overrides: Vec::new(),
            members: Vec::new(),
            notes: None,
        };
        cycle.validate()?;
        Ok(cycle)
    }

    /// Checks every structural invariant of a single cycle.
    pub fn validate(&self) -> Result<(), RotaError> {
        if self.name.trim().is_empty() {
            return Err(RotaError::EmptyName(NameKind::Cycle));
        }
        validate_length(self.length)?;
        if self.pattern.len() != self.length as usize {
            return Err(RotaError::PatternLengthMismatch {
                expected: self.length as usize,
                actual: self.pattern.len(),
            });
        }
        if let Some((day, &index)) = self
            .pattern
            .iter()
            .enumerate()
            .find(|&(_, &index)| index != UNASSIGNED_SLOT && index >= self.shifts.len())
        {
            return Err(RotaError::PatternIndexOutOfRange {
                day: day + 1,
                index,
                available: self.shifts.len(),
            });
        }

        let mut seen = HashSet::new();
        for daily in &self.daily_overrides {
            check_override_day(daily.day_number, self.length)?;
            if !seen.insert(daily.day_number) {
                return Err(RotaError::DuplicateOverrideDay(daily.day_number));
            }
        }
        Ok(())
    }

    /// Zero-indexed cycle position of `date`, or `None` before the start date
    /// or for a zero-length cycle.
    pub fn cycle_position(&self, date: NaiveDate) -> Option<usize> {
        if self.length == 0 {
            return None;
        }
        let days_since_start = days_between(self.start_date, date);
        if days_since_start < 0 {
            return None;
        }
        Some(days_since_start.rem_euclid(self.length as i64) as usize)
    }

    /// Resolves `date` to the pattern's shift, explaining any miss.
    pub fn resolve(&self, date: NaiveDate) -> Resolution<'_> {
        if self.shifts.is_empty() || self.pattern.is_empty() || self.length == 0 {
            return Resolution::Unresolved(UnresolvedReason::EmptyCycle);
        }
        let Some(position) = self.cycle_position(date) else {
            return Resolution::Unresolved(UnresolvedReason::BeforeStart);
        };
        let Some(&index) = self.pattern.get(position) else {
            return Resolution::Unresolved(UnresolvedReason::MissingPatternEntry { position });
        };
        if index == UNASSIGNED_SLOT {
            return Resolution::Unresolved(UnresolvedReason::Unassigned { position });
        }
        match self.shifts.get(index) {
            Some(shift) => Resolution::Resolved(shift),
            None => Resolution::Unresolved(UnresolvedReason::PatternIndexOutOfRange { position, index }),
        }
    }

    /// The shift the rotation assigns to `date`, without applying overrides.
    pub fn resolve_shift(&self, date: NaiveDate) -> Option<&ShiftType> {
        self.resolve(date).resolved()
    }

    /// Like [`resolve`](Self::resolve), but substitutes the first shift when
    /// the pattern points outside the shift list.
    pub fn resolve_with_fallback(&self, date: NaiveDate) -> Resolution<'_> {
        let resolution = self.resolve(date);
        let reason = match resolution {
            Resolution::Unresolved(UnresolvedReason::PatternIndexOutOfRange { position, index }) => {
                DefaultReason::PatternIndexOutOfRange { position, index }
            }
            Resolution::Unresolved(UnresolvedReason::MissingPatternEntry { position }) => DefaultReason::MissingPatternEntry { position },
            _ => return resolution,
        };
        match self.shifts.first() {
            Some(first) => Resolution::Defaulted(first, reason),
            None => resolution,
        }
    }

    /// Every day in `[start, end]` that resolves to a shift.
    ///
    /// The iterator is lazy and restartable (clone it or call again). Days
    /// before the start date, and unassigned days, are skipped.
    ///
    /// # Arguments
    ///
    /// * `start` - First date, inclusive
    /// * `end` - Last date, inclusive
    ///
    /// # Returns
    ///
    /// `(date, shift)` pairs in date order; empty when `start > end`.
    pub fn resolve_range(&self, start: NaiveDate, end: NaiveDate) -> ShiftRange<'_> {
        // Days before the cycle starts never resolve.
        let first = start.max(self.start_date);
        ShiftRange {
            cycle: self,
            next: Some(first),
            end,
        }
    }

    /// Hours worked on a day at `position` with `shift`, honouring any custom
    /// override time for that position.
    pub fn hours_at(&self, position: usize, shift: &ShiftType) -> f64 {
        match self.override_at(position) {
            Some(daily) => daily.hours_for(shift),
            None => shift.work_hours,
        }
    }

    /// Resolution with the day's override composed on top.
    ///
    /// # Arguments
    ///
    /// * `date` - Calendar date to look up
    ///
    /// # Returns
    ///
    /// `None` when the rotation itself assigns nothing to `date`. Otherwise
    /// the base shift, the effective one and the override's time and color.
    pub fn day_view(&self, date: NaiveDate) -> Option<DayView<'_>> {
        let base = self.resolve_shift(date)?;
        let position = self.cycle_position(date)?;
        let daily = self.override_at(position);

        let effective = match daily.and_then(|d| d.selected_shift_id) {
            Some(id) => match self.shift_by_id(id) {
                Some(selected) => Resolution::Resolved(selected),
                None => Resolution::Defaulted(base, DefaultReason::OverrideShiftMissing(id)),
            },
            None => Resolution::Resolved(base),
        };
        let shift = effective.shift().unwrap_or(base);
        let (start, end) = daily.map(|d| d.times_for(shift)).unwrap_or((shift.start, shift.end));

        Some(DayView {
            date,
            position,
            base,
            effective,
            color: daily.and_then(|d| d.custom_color).unwrap_or(shift.color),
            start,
            end,
            hours: daily.map(|d| d.hours_for(shift)).unwrap_or(shift.work_hours),
            overridden: daily.is_some_and(|d| !d.is_empty()),
        })
    }

    /// Owned copy of the shift type `id`, if the cycle uses it.
    pub fn shift_by_id(&self, id: ShiftTypeId) -> Option<&ShiftType> {
        self.shifts.iter().find(|shift| shift.id == id)
    }

    pub fn uses_shift_type(&self, id: ShiftTypeId) -> bool {
        self.shifts.iter().any(|shift| shift.id == id)
    }

    /// Removes a shift type from the cycle's shift list without disturbing
    /// the other days.
    ///
    /// Pattern entries that pointed at the removed slot become
    /// [`UNASSIGNED_SLOT`]; entries pointing past it move down by one so they
    /// keep naming the same shift.
    ///
    /// # Arguments
    ///
    /// * `id` - Shift type to unlink
    ///
    /// # Returns
    ///
    /// `true` when the cycle owned a copy of the shift type.
    pub fn unlink_shift(&mut self, id: ShiftTypeId) -> bool {
        if !self.uses_shift_type(id) {
            return false;
        }
        let slots = self
            .shifts
            .drain(..)
            .map(|shift| if shift.id == id { None } else { Some(shift) })
            .collect();
        let (shifts, pattern) = compact_slots(slots, &self.pattern);
        self.shifts = shifts;
        self.pattern = pattern;
        true
    }

    /// Refreshes the owned copy of a shift type. Returns whether one was found.
    pub fn replace_shift(&mut self, updated: &ShiftType) -> bool {
        match self.shifts.iter_mut().find(|shift| shift.id == updated.id) {
            Some(shift) => {
                *shift = updated.clone();
                true
            }
            None => false,
        }
    }

    /// Override for a 1-indexed day number.
    pub fn override_for(&self, day_number: u32) -> Option<&DailyOverride> {
        self.daily_overrides.iter().find(|daily| daily.day_number == day_number)
    }

    /// Override for a zero-indexed cycle position.
    pub fn override_at(&self, position: usize) -> Option<&DailyOverride> {
        self.override_for(position as u32 + 1)
    }

    /// One entry per cycle day, with empty overrides for days that have none.
    pub fn daily_settings(&self) -> Vec<DailyOverride> {
        (1..=self.length)
            .map(|day| self.override_for(day).cloned().unwrap_or_else(|| DailyOverride::new(day)))
            .collect()
    }

    /// Inserts or replaces the override for its day. An empty override clears
    /// the day instead.
    ///
    /// # Arguments
    ///
    /// * `daily` - Override carrying its own 1-indexed `day_number`
    ///
    /// # Returns
    ///
    /// [`RotaError::OverrideDayOutOfRange`] when the day is outside the cycle.
    pub fn set_override(&mut self, daily: DailyOverride) -> Result<(), RotaError> {
        check_override_day(daily.day_number, self.length)?;
        self.daily_overrides.retain(|existing| existing.day_number != daily.day_number);
        if !daily.is_empty() {
            self.daily_overrides.push(daily);
            self.daily_overrides.sort_by_key(|existing| existing.day_number);
        }
        Ok(())
    }

    /// Removes the override of a 1-indexed day. Returns whether there was one.
    pub fn clear_override(&mut self, day_number: u32) -> bool {
        let before = self.daily_overrides.len();
        self.daily_overrides.retain(|existing| existing.day_number != day_number);
        before != self.daily_overrides.len()
    }

    /// Changes the cycle length and cascades to pattern and overrides.
    ///
    /// Shrinking drops trailing pattern entries and overrides past the new
    /// end; growing pads the pattern with slot 0 and leaves the new days
    /// without overrides. Overrides within both lengths are untouched.
    ///
    /// # Arguments
    ///
    /// * `length` - New length in days, within
    ///   [`MIN_CYCLE_LENGTH`]..=[`MAX_CYCLE_LENGTH`]
    pub fn set_length(&mut self, length: u32) -> Result<(), RotaError> {
        validate_length(length)?;
        self.pattern.resize(length as usize, 0);
        self.daily_overrides.retain(|daily| daily.day_number <= length);
        self.length = length;
        Ok(())
    }

    /// Replaces the whole pattern.
    ///
    /// The cycle is left untouched when the new pattern fails validation, so a
    /// caller can keep using it after an error.
    ///
    /// # Arguments
    ///
    /// * `pattern` - One index into `shifts` per cycle day; its length must match
    ///   the current cycle length
    ///
    /// # Returns
    ///
    /// `Ok(())` when the pattern was applied, otherwise the validation error.
    pub fn set_pattern(&mut self, pattern: Vec<usize>) -> Result<(), RotaError> {
        let previous = std::mem::replace(&mut self.pattern, pattern);
        if let Err(e) = self.validate() {
            self.pattern = previous;
            return Err(e);
        }
        Ok(())
    }

    /// Maps per-day shift selections to pattern indices into `shifts`.
    /// Missing or unknown selections fall back to slot 0 and are reported.
    pub fn pattern_from_selection(shifts: &[ShiftType], selections: &[Option<ShiftTypeId>]) -> PatternSelection {
        let mut defaulted = Vec::new();
        let pattern = selections
            .iter()
            .enumerate()
            .map(|(day, selection)| match selection {
                Some(id) => match shifts.iter().position(|shift| shift.id == *id) {
                    Some(index) => index,
                    None => {
                        defaulted.push((day, DefaultReason::UnknownSelection(*id)));
                        0
                    }
                },
                None => {
                    defaulted.push((day, DefaultReason::NoSelection));
                    0
                }
            })
            .collect();
        PatternSelection { pattern, defaulted }
    }
}

/// Closes the gaps in a slot list whose entries may have been unlinked.
///
/// Stored patterns index the slot list as it was before any gap appeared.
/// The returned pattern is rewritten against the compacted list: entries of
/// an empty slot become [`UNASSIGNED_SLOT`], entries already out of range
/// stay out of range.
///
/// # Arguments
///
/// * `slots` - Shift of each slot, `None` where the shift type is gone
/// * `pattern` - Pattern indexing `slots`
///
/// # Returns
///
/// The surviving shifts in slot order and the remapped pattern.
pub fn compact_slots(slots: Vec<Option<ShiftType>>, pattern: &[usize]) -> (Vec<ShiftType>, Vec<usize>) {
    let mut remap = Vec::with_capacity(slots.len());
    let mut shifts = Vec::with_capacity(slots.len());
    for slot in slots {
        match slot {
            Some(shift) => {
                remap.push(Some(shifts.len()));
                shifts.push(shift);
            }
            None => remap.push(None),
        }
    }

    let pattern = pattern
        .iter()
        .map(|&index| remap.get(index).copied().flatten().unwrap_or(UNASSIGNED_SLOT))
        .collect();
    (shifts, pattern)
}

fn validate_length(length: u32) -> Result<(), RotaError> {
    if !(MIN_CYCLE_LENGTH..=MAX_CYCLE_LENGTH).contains(&length) {
        return Err(RotaError::InvalidCycleLength(length));
    }
    Ok(())
}

fn check_override_day(day: u32, length: u32) -> Result<(), RotaError> {
    if day == 0 || day > length {
        return Err(RotaError::OverrideDayOutOfRange { day, length });
    }
    Ok(())
}

/// Day-by-day walk over a date range, yielding resolvable days only.
#[derive(Debug, Clone)]
pub struct ShiftRange<'a> {
    cycle: &'a ShiftCycle,
    next: Option<NaiveDate>,
    end: NaiveDate,
}

impl<'a> Iterator for ShiftRange<'a> {
    type Item = (NaiveDate, &'a ShiftType);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let date = self.next.filter(|date| *date <= self.end)?;
            self.next = add_days(date, 1);
            if let Some(shift) = self.cycle.resolve_shift(date) {
                return Some((date, shift));
            }
        }
    }
}
