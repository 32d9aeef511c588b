//! Personal events stored next to the rotation.
//!
//! Events are plain calendar entries with an optional location and notes.
//! They are independent of cycles; the calendar and `rota event` show them
//! alongside the day's shift.

use crate::db::db::Db;
use crate::libs::event::Event;
use crate::libs::messages::Message;
use crate::msg_error_anyhow;
use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{params, Connection, OptionalExtension, Row};

const INSERT_EVENT: &str = "INSERT INTO events (title, timestamp, location, notes, completed) VALUES (?1, ?2, ?3, ?4, ?5)";
const UPDATE_EVENT_COMPLETED: &str = "UPDATE events SET completed = ?2 WHERE id = ?1";
const DELETE_EVENT: &str = "DELETE FROM events WHERE id = ?1";
const SELECT_EVENT_BY_ID: &str = "SELECT id, title, timestamp, location, notes, completed FROM events WHERE id = ?1";
const SELECT_EVENTS_BY_DATE: &str =
    "SELECT id, title, timestamp, location, notes, completed FROM events WHERE date(timestamp) = ?1 ORDER BY timestamp";
const SELECT_EVENTS_BETWEEN: &str = "SELECT id, title, timestamp, location, notes, completed FROM events
    WHERE date(timestamp) BETWEEN ?1 AND ?2 ORDER BY timestamp";
const SELECT_UPCOMING_EVENTS: &str = "SELECT id, title, timestamp, location, notes, completed FROM events
    WHERE timestamp > ?1 ORDER BY timestamp LIMIT ?2";

fn event_from_row(row: &Row) -> rusqlite::Result<Event> {
    Ok(Event {
        id: row.get(0)?,
        title: row.get(1)?,
        timestamp: row.get(2)?,
        location: row.get(3)?,
        notes: row.get(4)?,
        completed: row.get(5)?,
    })
}

/// Database operations on the `events` table.
pub struct Events {
    conn: Connection,
}

impl Events {
    /// Opens the events table in the user's database.
    pub fn new() -> Result<Self> {
        Ok(Self::from_db(Db::new()?))
    }

    pub fn from_db(db: Db) -> Self {
        Self { conn: db.conn }
    }

    /// Stores a new event. The `id` field of `event` is ignored.
    ///
    /// # Arguments
    ///
    /// * `event` - Event to insert
    ///
    /// # Returns
    ///
    /// The row id assigned to the event.
    pub fn insert(&mut self, event: &Event) -> Result<i64> {
        self.conn.execute(
            INSERT_EVENT,
            params![event.title, event.timestamp, event.location, event.notes, event.completed],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn get(&mut self, id: i64) -> Result<Option<Event>> {
        self.conn
            .query_row(SELECT_EVENT_BY_ID, params![id], event_from_row)
            .optional()
            .map_err(Into::into)
    }

    /// Marks an event done or not done.
    ///
    /// # Arguments
    ///
    /// * `id` - Row id of the event
    /// * `completed` - New state
    ///
    /// # Returns
    ///
    /// An error when no event has that id.
    pub fn set_completed(&mut self, id: i64, completed: bool) -> Result<()> {
        let affected = self.conn.execute(UPDATE_EVENT_COMPLETED, params![id, completed])?;
        if affected == 0 {
            return Err(msg_error_anyhow!(Message::EventNotFound(id)));
        }
        Ok(())
    }

    /// Deletes an event. Unknown ids are an error.
    pub fn delete(&mut self, id: i64) -> Result<()> {
        let affected = self.conn.execute(DELETE_EVENT, params![id])?;
        if affected == 0 {
            return Err(msg_error_anyhow!(Message::EventNotFound(id)));
        }
        Ok(())
    }

    pub fn fetch_for_date(&mut self, date: NaiveDate) -> Result<Vec<Event>> {
        let mut stmt = self.conn.prepare(SELECT_EVENTS_BY_DATE)?;
        let events = stmt.query_map(params![date], event_from_row)?.collect::<Result<Vec<_>, _>>()?;
        Ok(events)
    }

    /// Events whose date falls in `[from, to]`, in time order.
    ///
    /// # Arguments
    ///
    /// * `from` - First date, inclusive
    /// * `to` - Last date, inclusive
    pub fn fetch_between(&mut self, from: NaiveDate, to: NaiveDate) -> Result<Vec<Event>> {
        let mut stmt = self.conn.prepare(SELECT_EVENTS_BETWEEN)?;
        let events = stmt.query_map(params![from, to], event_from_row)?.collect::<Result<Vec<_>, _>>()?;
        Ok(events)
    }

    /// Events strictly after `now`, soonest first.
    pub fn upcoming(&mut self, now: NaiveDateTime, limit: usize) -> Result<Vec<Event>> {
        let mut stmt = self.conn.prepare(SELECT_UPCOMING_EVENTS)?;
        let events = stmt
            .query_map(params![now, limit as i64], event_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(events)
    }
}
