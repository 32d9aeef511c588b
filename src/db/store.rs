use crate::db::cycles::Cycles;
use crate::db::db::Db;
use crate::db::shift_types::ShiftTypes;
use crate::libs::cycle::ShiftCycle;
use crate::libs::shift::ShiftType;
use crate::libs::store::{CycleStore, Entity, EntityRef};
use anyhow::Result;
use rusqlite::Connection;
use std::path::Path;

/// [`CycleStore`] backed by the SQLite database. Each batch is one
/// transaction.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn new() -> Result<Self> {
        Ok(Self::from_db(Db::new()?))
    }

    /// Opens the database at `path`, migrating it if needed.
    ///
    /// # Arguments
    ///
    /// * `path` - SQLite file, created when missing
    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self::from_db(Db::open(path)?))
    }

    pub fn from_db(db: Db) -> Self {
        Self { conn: db.conn }
    }
}

impl CycleStore for SqliteStore {
    fn load_all_shift_types(&mut self) -> Result<Vec<ShiftType>> {
        ShiftTypes::new(&self.conn).list()
    }

    fn load_all_cycles(&mut self) -> Result<Vec<ShiftCycle>> {
        Cycles::new(&self.conn).list()
    }

    fn save(&mut self, entities: &[Entity]) -> Result<()> {
        let tx = self.conn.transaction()?;
        for entity in entities {
            match entity {
                Entity::ShiftType(shift) => ShiftTypes::new(&tx).upsert(shift)?,
                Entity::Cycle(cycle) => Cycles::new(&tx).upsert(cycle)?,
            }
        }
        tx.commit()?;
        tracing::debug!("saved {} entit(ies)", entities.len());
        Ok(())
    }

    fn delete(&mut self, entity: EntityRef) -> Result<()> {
        let deleted = match entity {
            EntityRef::ShiftType(id) => ShiftTypes::new(&self.conn).delete(id)?,
            EntityRef::Cycle(id) => Cycles::new(&self.conn).delete(id)?,
        };
        tracing::debug!("deleted {:?} ({} row(s))", entity, deleted);
        Ok(())
    }
}
