use crate::libs::color::Color;
use crate::libs::shift::{ShiftType, ShiftTypeId};
use anyhow::Result;
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use uuid::Uuid;

const UPSERT_SHIFT_TYPE: &str = "INSERT INTO shift_types
    (id, name, color, color_alpha, start_time, end_time, work_hours, rest_minutes, notes, sort_order)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
    ON CONFLICT(id) DO UPDATE SET
        name = excluded.name,
        color = excluded.color,
        color_alpha = excluded.color_alpha,
        start_time = excluded.start_time,
        end_time = excluded.end_time,
        work_hours = excluded.work_hours,
        rest_minutes = excluded.rest_minutes,
        notes = excluded.notes,
        sort_order = excluded.sort_order";
const DELETE_SHIFT_TYPE: &str = "DELETE FROM shift_types WHERE id = ?1";
const SELECT_ALL_SHIFT_TYPES: &str = "SELECT id, name, color, color_alpha, start_time, end_time, work_hours, rest_minutes, notes, sort_order
    FROM shift_types ORDER BY sort_order, name";
const SELECT_SHIFT_TYPE_BY_ID: &str = "SELECT id, name, color, color_alpha, start_time, end_time, work_hours, rest_minutes, notes, sort_order
    FROM shift_types WHERE id = ?1";

/// Reads a UUID stored as text.
pub(crate) fn uuid_column(row: &Row, idx: usize) -> rusqlite::Result<Uuid> {
    let text: String = row.get(idx)?;
    Uuid::parse_str(&text).map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn shift_type_from_row(row: &Row) -> rusqlite::Result<ShiftType> {
    let packed: i64 = row.get(2)?;
    let alpha: u8 = row.get(3)?;
    Ok(ShiftType {
        id: ShiftTypeId(uuid_column(row, 0)?),
        name: row.get(1)?,
        color: Color::from_packed(packed as u32).with_alpha(alpha),
        start: row.get(4)?,
        end: row.get(5)?,
        work_hours: row.get(6)?,
        rest_minutes: row.get(7)?,
        notes: row.get(8)?,
        order: row.get(9)?,
    })
}

/// The `shift_types` table, on a plain connection or inside a transaction.
pub struct ShiftTypes<'a> {
    conn: &'a Connection,
}

impl<'a> ShiftTypes<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Inserts a shift type or overwrites the row with the same id.
    ///
    /// # Arguments
    ///
    /// * `shift` - Shift type to write; the color goes into `color` and
    ///   `color_alpha`
    pub fn upsert(&self, shift: &ShiftType) -> Result<()> {
        self.conn.execute(
            UPSERT_SHIFT_TYPE,
            params![
                shift.id.to_string(),
                shift.name,
                shift.color.to_packed() as i64,
                shift.color.alpha,
                shift.start,
                shift.end,
                shift.work_hours,
                shift.rest_minutes,
                shift.notes,
                shift.order,
            ],
        )?;
        Ok(())
    }

    /// Returns the number of deleted rows.
    pub fn delete(&self, id: ShiftTypeId) -> Result<usize> {
        Ok(self.conn.execute(DELETE_SHIFT_TYPE, params![id.to_string()])?)
    }

    pub fn get(&self, id: ShiftTypeId) -> Result<Option<ShiftType>> {
        self.conn
            .query_row(SELECT_SHIFT_TYPE_BY_ID, params![id.to_string()], shift_type_from_row)
            .optional()
            .map_err(Into::into)
    }

    /// Every shift type, ordered by `sort_order` then name.
    pub fn list(&self) -> Result<Vec<ShiftType>> {
        let mut stmt = self.conn.prepare(SELECT_ALL_SHIFT_TYPES)?;
        let shifts = stmt.query_map([], shift_type_from_row)?.collect::<Result<Vec<_>, _>>()?;
        Ok(shifts)
    }
}
