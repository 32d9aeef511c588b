//! The `cycles` table and its children, `cycle_shifts` and `daily_overrides`.
//!
//! A cycle row carries the pattern and members as JSON text. Its shift list is
//! stored as numbered slots pointing at `shift_types`, so the cycle's owned
//! copies are rebuilt from the current shift type rows on load.

use crate::db::shift_types::{uuid_column, ShiftTypes};
use crate::libs::color::Color;
use crate::libs::cycle::{compact_slots, CycleId, ShiftCycle};
use crate::libs::daily_override::DailyOverride;
use crate::libs::shift::{ShiftType, ShiftTypeId};
use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveTime};
use rusqlite::{params, Connection};
use std::collections::HashMap;
use uuid::Uuid;

const UPSERT_CYCLE: &str = "INSERT INTO cycles
    (id, name, length, start_date, pattern, is_active, members, notes)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
    ON CONFLICT(id) DO UPDATE SET
        name = excluded.name,
        length = excluded.length,
        start_date = excluded.start_date,
        pattern = excluded.pattern,
        is_active = excluded.is_active,
        members = excluded.members,
        notes = excluded.notes";
const DELETE_CYCLE: &str = "DELETE FROM cycles WHERE id = ?1";
const SELECT_ALL_CYCLES: &str = "SELECT id, name, length, start_date, pattern, is_active, members, notes FROM cycles ORDER BY name";

const DELETE_CYCLE_SHIFTS: &str = "DELETE FROM cycle_shifts WHERE cycle_id = ?1";
const INSERT_CYCLE_SHIFT: &str = "INSERT INTO cycle_shifts (cycle_id, slot, shift_type_id) VALUES (?1, ?2, ?3)";
const SELECT_CYCLE_SHIFTS: &str = "SELECT slot, shift_type_id FROM cycle_shifts WHERE cycle_id = ?1 ORDER BY slot";

const DELETE_OVERRIDES: &str = "DELETE FROM daily_overrides WHERE cycle_id = ?1";
const INSERT_OVERRIDE: &str = "INSERT INTO daily_overrides
    (id, cycle_id, day_number, selected_shift_id, custom_start, custom_end,
     color_red, color_green, color_blue, color_alpha)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)";
const SELECT_OVERRIDES: &str = "SELECT id, day_number, selected_shift_id, custom_start, custom_end,
    color_red, color_green, color_blue, color_alpha
    FROM daily_overrides WHERE cycle_id = ?1 ORDER BY day_number";

struct CycleRow {
    id: Uuid,
    name: String,
    length: u32,
    start_date: NaiveDate,
    pattern: String,
    is_active: bool,
    members: String,
    notes: Option<String>,
}

struct OverrideRow {
    id: Uuid,
    day_number: u32,
    selected_shift_id: Option<String>,
    custom_start: Option<NaiveTime>,
    custom_end: Option<NaiveTime>,
    channels: [Option<f64>; 4],
}

/// Reads and writes cycles with their slots and overrides.
pub struct Cycles<'a> {
    conn: &'a Connection,
}

impl<'a> Cycles<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Writes the cycle row and replaces its slots and overrides. Callers
    /// wrap this in a transaction.
    pub fn upsert(&self, cycle: &ShiftCycle) -> Result<()> {
        let id = cycle.id.to_string();
        self.conn.execute(
            UPSERT_CYCLE,
            params![
                id,
                cycle.name,
                cycle.length,
                cycle.start_date,
                serde_json::to_string(&cycle.pattern)?,
                cycle.is_active,
                serde_json::to_string(&cycle.members)?,
                cycle.notes,
            ],
        )?;

        self.conn.execute(DELETE_CYCLE_SHIFTS, params![id])?;
        for (slot, shift) in cycle.shifts.iter().enumerate() {
            self.conn
                .execute(INSERT_CYCLE_SHIFT, params![id, slot as i64, shift.id.to_string()])?;
        }

        self.conn.execute(DELETE_OVERRIDES, params![id])?;
        for daily in &cycle.daily_overrides {
            let channels = daily.custom_color.map(Color::to_channels);
            let channel = |i: usize| channels.map(|c| c[i]);
            self.conn.execute(
                INSERT_OVERRIDE,
                params![
                    daily.id.to_string(),
                    id,
                    daily.day_number,
                    daily.selected_shift_id.map(|s| s.to_string()),
                    daily.custom_start,
                    daily.custom_end,
                    channel(0),
                    channel(1),
                    channel(2),
                    channel(3),
                ],
            )?;
        }
        Ok(())
    }

    /// Returns the number of deleted rows. Slots and overrides go with it.
    pub fn delete(&self, id: CycleId) -> Result<usize> {
        Ok(self.conn.execute(DELETE_CYCLE, params![id.to_string()])?)
    }

    /// Loads every cycle, ordered by name.
    ///
    /// Each slot is resolved against the current `shift_types` rows. Slots
    /// whose shift type was deleted are dropped and the pattern entries using
    /// them become [`UNASSIGNED_SLOT`](crate::libs::cycle::UNASSIGNED_SLOT), so
    /// the remaining days keep their shifts.
    ///
    /// # Returns
    ///
    /// The assembled cycles, or an error for malformed pattern or member JSON.
    pub fn list(&self) -> Result<Vec<ShiftCycle>> {
        let shift_types: HashMap<ShiftTypeId, ShiftType> = ShiftTypes::new(self.conn)
            .list()?
            .into_iter()
            .map(|shift| (shift.id, shift))
            .collect();

        let rows = {
            let mut stmt = self.conn.prepare(SELECT_ALL_CYCLES)?;
            let rows = stmt
                .query_map([], |row| {
                    Ok(CycleRow {
                        id: uuid_column(row, 0)?,
                        name: row.get(1)?,
                        length: row.get(2)?,
                        start_date: row.get(3)?,
                        pattern: row.get(4)?,
                        is_active: row.get(5)?,
                        members: row.get(6)?,
                        notes: row.get(7)?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;
            rows
        };

        rows.into_iter().map(|row| self.assemble(row, &shift_types)).collect()
    }

    fn assemble(&self, row: CycleRow, shift_types: &HashMap<ShiftTypeId, ShiftType>) -> Result<ShiftCycle> {
        let id = row.id.to_string();
        let pattern: Vec<usize> =
            serde_json::from_str(&row.pattern).with_context(|| format!("malformed pattern for cycle '{}'", row.name))?;
        let members: Vec<String> =
            serde_json::from_str(&row.members).with_context(|| format!("malformed members for cycle '{}'", row.name))?;

        let mut stmt = self.conn.prepare(SELECT_CYCLE_SHIFTS)?;
        let slot_rows = stmt
            .query_map(params![id], |r| Ok((r.get::<_, i64>(0)?, r.get::<_, Option<String>>(1)?)))?
            .collect::<Result<Vec<_>, _>>()?;

        // Slots are kept at their stored position so the pattern still lines up.
        let mut slots: Vec<Option<ShiftType>> = Vec::with_capacity(slot_rows.len());
        for (slot, shift_type_id) in slot_rows {
            let position = usize::try_from(slot).with_context(|| format!("negative slot {} in cycle '{}'", slot, row.name))?;
            if slots.len() <= position {
                slots.resize(position + 1, None);
            }
            let shift = match shift_type_id {
                Some(text) => {
                    let shift_id = ShiftTypeId(Uuid::parse_str(&text)?);
                    shift_types.get(&shift_id).cloned()
                }
                None => None,
            };
            if shift.is_none() {
                tracing::warn!("cycle '{}' slot {} points at a deleted shift type; its days are unassigned", row.name, slot);
            }
            slots[position] = shift;
        }
        let (shifts, pattern) = compact_slots(slots, &pattern);

        let mut stmt = self.conn.prepare(SELECT_OVERRIDES)?;
        let override_rows = stmt
            .query_map(params![id], |r| {
                Ok(OverrideRow {
                    id: uuid_column(r, 0)?,
                    day_number: r.get(1)?,
                    selected_shift_id: r.get(2)?,
                    custom_start: r.get(3)?,
                    custom_end: r.get(4)?,
                    channels: [r.get(5)?, r.get(6)?, r.get(7)?, r.get(8)?],
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut daily_overrides = Vec::with_capacity(override_rows.len());
        for r in override_rows {
            let custom_color = match r.channels {
                [Some(red), Some(green), Some(blue), Some(alpha)] => Some(Color::from_channels(red, green, blue, alpha)?),
                _ => None,
            };
            let selected_shift_id = match r.selected_shift_id {
                Some(text) => Some(ShiftTypeId(Uuid::parse_str(&text)?)),
                None => None,
            };
            daily_overrides.push(DailyOverride {
                id: r.id,
                day_number: r.day_number,
                selected_shift_id,
                custom_start: r.custom_start,
                custom_end: r.custom_end,
                custom_color,
            });
        }

        Ok(ShiftCycle {
            id: CycleId(row.id),
            name: row.name,
            length: row.length,
            start_date: row.start_date,
            pattern,
            shifts,
            is_active: row.is_active,
            daily_overrides,
            members,
            notes: row.notes,
        })
    }
}
