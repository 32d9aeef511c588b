//! Versioned schema migrations.
//!
//! Each migration runs once, inside the same transaction as every other
//! pending migration, and is recorded in the `migrations` table. New schema
//! changes are appended with the next version number; applied migrations are
//! never edited.

use crate::libs::messages::Message;
use crate::{msg_debug, msg_error, msg_info, msg_success};
use anyhow::Result;
use rusqlite::{params, Connection, Transaction};

const MIGRATIONS_TABLE: &str = "
CREATE TABLE IF NOT EXISTS migrations (
    id INTEGER PRIMARY KEY,
    version INTEGER NOT NULL UNIQUE,
    name TEXT NOT NULL,
    applied_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";

#[derive(Debug, Clone)]
struct Migration {
    version: u32,
    name: &'static str,
    up: fn(&Transaction) -> Result<()>,
}

/// Ordered list of schema migrations.
///
/// Versions start at 1 and increase by one. The `migrations` table records
/// which ones a database has applied.
pub struct MigrationManager {
    migrations: Vec<Migration>,
}

impl MigrationManager {
    pub fn new() -> Self {
        let mut manager = Self { migrations: Vec::new() };
        manager.register_migrations();
        manager
    }

    fn register_migrations(&mut self) {
        self.add_migration(1, "create_rotation_tables", |tx| {
            tx.execute(
                "CREATE TABLE IF NOT EXISTS shift_types (
                    id TEXT NOT NULL PRIMARY KEY,
                    name TEXT NOT NULL,
                    color INTEGER NOT NULL,
                    start_time TEXT NOT NULL,
                    end_time TEXT NOT NULL,
                    work_hours REAL NOT NULL,
                    rest_minutes INTEGER,
                    notes TEXT,
                    sort_order INTEGER NOT NULL
                )",
                [],
            )?;

            tx.execute(
                "CREATE TABLE IF NOT EXISTS cycles (
                    id TEXT NOT NULL PRIMARY KEY,
                    name TEXT NOT NULL UNIQUE,
                    length INTEGER NOT NULL CHECK (length BETWEEN 1 AND 30),
                    start_date DATE NOT NULL,
                    pattern TEXT NOT NULL,
                    is_active BOOLEAN NOT NULL DEFAULT FALSE,
                    members TEXT NOT NULL DEFAULT '[]',
                    notes TEXT
                )",
                [],
            )?;

            // Slots of a cycle's shift list. Deleting a shift type only
            // unlinks it; deleting a cycle drops its slots.
            tx.execute(
                "CREATE TABLE IF NOT EXISTS cycle_shifts (
                    cycle_id TEXT NOT NULL,
                    slot INTEGER NOT NULL,
                    shift_type_id TEXT,
                    PRIMARY KEY (cycle_id, slot),
                    FOREIGN KEY (cycle_id) REFERENCES cycles(id) ON DELETE CASCADE,
                    FOREIGN KEY (shift_type_id) REFERENCES shift_types(id) ON DELETE SET NULL
                )",
                [],
            )?;

            tx.execute(
                "CREATE TABLE IF NOT EXISTS daily_overrides (
                    id TEXT NOT NULL PRIMARY KEY,
                    cycle_id TEXT NOT NULL,
                    day_number INTEGER NOT NULL,
                    selected_shift_id TEXT,
                    custom_start TEXT,
                    custom_end TEXT,
                    color_red REAL,
                    color_green REAL,
                    color_blue REAL,
                    color_alpha REAL,
                    UNIQUE (cycle_id, day_number),
                    FOREIGN KEY (cycle_id) REFERENCES cycles(id) ON DELETE CASCADE,
                    FOREIGN KEY (selected_shift_id) REFERENCES shift_types(id) ON DELETE SET NULL
                )",
                [],
            )?;

            tx.execute("CREATE INDEX IF NOT EXISTS idx_cycles_active ON cycles(is_active)", [])?;
            tx.execute("CREATE INDEX IF NOT EXISTS idx_cycle_shifts_shift ON cycle_shifts(shift_type_id)", [])?;
            tx.execute("CREATE INDEX IF NOT EXISTS idx_daily_overrides_cycle ON daily_overrides(cycle_id)", [])?;
            Ok(())
        });

        self.add_migration(2, "add_events", |tx| {
            tx.execute(
                "CREATE TABLE IF NOT EXISTS events (
                    id INTEGER PRIMARY KEY,
                    title TEXT NOT NULL,
                    timestamp TIMESTAMP NOT NULL,
                    location TEXT,
                    notes TEXT,
                    completed BOOLEAN NOT NULL DEFAULT FALSE
                )",
                [],
            )?;
            tx.execute("CREATE INDEX IF NOT EXISTS idx_events_timestamp ON events(timestamp)", [])?;
            Ok(())
        });

        // The packed color has no room for alpha; rows written before this
        // migration are opaque.
        self.add_migration(3, "add_shift_type_color_alpha", |tx| {
            tx.execute(
                "ALTER TABLE shift_types ADD COLUMN color_alpha INTEGER NOT NULL DEFAULT 255",
                [],
            )?;
            Ok(())
        });
    }

    fn add_migration(&mut self, version: u32, name: &'static str, up: fn(&Transaction) -> Result<()>) {
        self.migrations.push(Migration { version, name, up });
    }

    /// Highest registered version, 0 when none are registered.
    pub fn latest_version(&self) -> u32 {
        self.migrations.last().map(|m| m.version).unwrap_or(0)
    }

    /// Applies every migration newer than the database's version.
    ///
    /// All pending migrations run in one transaction, so a failing step leaves
    /// the schema at its previous version.
    ///
    /// # Arguments
    ///
    /// * `conn` - Connection to migrate
    ///
    /// # Returns
    ///
    /// The error of the first migration that failed.
    pub fn run_migrations(&self, conn: &mut Connection) -> Result<()> {
        conn.execute(MIGRATIONS_TABLE, [])?;

        let current_version = self.get_current_version(conn)?;
        let pending: Vec<&Migration> = self.migrations.iter().filter(|m| m.version > current_version).collect();

        if pending.is_empty() {
            msg_debug!(Message::DatabaseUpToDate);
            return Ok(());
        }

        msg_debug!(Message::MigrationsFound(pending.len()));

        let tx = conn.transaction()?;
        for migration in pending {
            msg_debug!(Message::RunningMigration(migration.version, migration.name.to_string()));

            if let Err(e) = (migration.up)(&tx) {
                msg_error!(Message::MigrationFailed(migration.version, e.to_string()));
                return Err(e);
            }
            tx.execute(
                "INSERT INTO migrations (version, name) VALUES (?1, ?2)",
                params![migration.version, migration.name],
            )?;
        }
        tx.commit()?;

        msg_debug!(Message::DatabaseVersion(self.latest_version()));
        Ok(())
    }

    fn get_current_version(&self, conn: &Connection) -> Result<u32> {
        let version: Option<u32> = conn.query_row("SELECT MAX(version) FROM migrations", [], |row| row.get(0))?;
        Ok(version.unwrap_or(0))
    }

    pub fn is_migration_applied(&self, conn: &Connection, version: u32) -> Result<bool> {
        let count: i32 = conn.query_row("SELECT COUNT(*) FROM migrations WHERE version = ?1", params![version], |row| row.get(0))?;
        Ok(count > 0)
    }

    /// `(version, name, applied_at)` for every applied migration.
    pub fn get_migration_history(&self, conn: &Connection) -> Result<Vec<(u32, String, String)>> {
        let mut stmt = conn.prepare("SELECT version, name, applied_at FROM migrations ORDER BY version")?;
        let history = stmt
            .query_map([], |row| Ok((row.get::<_, u32>(0)?, row.get::<_, String>(1)?, row.get::<_, String>(2)?)))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(history)
    }
}

impl Default for MigrationManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Brings the schema of `conn` up to date.
pub fn init_with_migrations(conn: &mut Connection) -> Result<()> {
    let manager = MigrationManager::new();
    manager.run_migrations(conn)?;
    Ok(())
}

pub fn get_db_version(conn: &Connection) -> Result<u32> {
    let manager = MigrationManager::new();
    manager.get_current_version(conn)
}

/// Whether `conn` is behind the latest registered version.
///
/// # Returns
///
/// `true` for an empty database as well.
pub fn needs_migration(conn: &Connection) -> Result<bool> {
    let manager = MigrationManager::new();
    let current = manager.get_current_version(conn)?;
    Ok(current < manager.latest_version())
}

/// Prints the migration state, used by `rota init --status`.
pub fn report_status(conn: &Connection) -> Result<()> {
    let manager = MigrationManager::new();
    msg_info!(Message::DatabaseVersion(manager.get_current_version(conn)?));
    if needs_migration(conn)? {
        msg_info!(Message::DatabaseNeedsUpdate);
    } else {
        msg_success!(Message::DatabaseUpToDate);
    }
    msg_info!(Message::MigrationHistory);
    for (version, name, applied_at) in manager.get_migration_history(conn)? {
        msg_info!(Message::MigrationEntry(version, name, applied_at));
    }
    Ok(())
}
