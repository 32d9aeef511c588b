pub mod alarm;
pub mod calendar;
pub mod cycle;
pub mod event;
pub mod export;
pub mod init;
pub mod shift;
pub mod stats;

use crate::db::store::SqliteStore;
use crate::libs::cycle::{CycleId, ShiftCycle};
use crate::libs::messages::Message;
use crate::libs::registry::CycleRegistry;
use crate::libs::shift::{ShiftType, ShiftTypeId};
use crate::msg_error_anyhow;
use anyhow::Result;
use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Manage shift types")]
    Shift(shift::ShiftArgs),
    #[command(about = "Manage shift cycles")]
    Cycle(cycle::CycleArgs),
    #[command(about = "Show a month of the active cycle")]
    Calendar(calendar::CalendarArgs),
    #[command(about = "Work-hour statistics for a range")]
    Stats(stats::StatsArgs),
    #[command(about = "Export the schedule or statistics")]
    Export(export::ExportArgs),
    #[command(about = "Manage personal events")]
    Event(event::EventArgs),
    #[command(about = "Manage shift-aware alarms")]
    Alarm(alarm::AlarmArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Parses the command line and runs the chosen subcommand.
    ///
    /// # Returns
    ///
    /// The subcommand's error, which `main` reports.
    pub fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Shift(args) => shift::cmd(args),
            Commands::Cycle(args) => cycle::cmd(args),
            Commands::Calendar(args) => calendar::cmd(args),
            Commands::Stats(args) => stats::cmd(args),
            Commands::Export(args) => export::cmd(args),
            Commands::Event(args) => event::cmd(args),
            Commands::Alarm(args) => alarm::cmd(args),
        }
    }
}

/// Registry over the user's database.
pub(crate) fn open_registry() -> Result<CycleRegistry<SqliteStore>> {
    Ok(CycleRegistry::open(SqliteStore::new()?)?)
}

/// `YYYY-MM-DD` or `today`.
pub(crate) fn parse_date(date_str: &str) -> Result<NaiveDate> {
    if date_str.eq_ignore_ascii_case("today") {
        Ok(Local::now().date_naive())
    } else {
        Ok(NaiveDate::parse_from_str(date_str, "%Y-%m-%d")?)
    }
}

/// `HH:MM`.
pub(crate) fn parse_time(time_str: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(time_str, "%H:%M").map_err(|_| msg_error_anyhow!(Message::InvalidTime(time_str.to_string())))
}

/// `YYYY-MM-DD HH:MM`.
pub(crate) fn parse_datetime(value: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M").map_err(|_| msg_error_anyhow!(Message::InvalidDateTime(value.to_string())))
}

/// `YYYY-MM` to `(year, month)`.
pub(crate) fn parse_month(month_str: &str) -> Result<(i32, u32)> {
    use chrono::Datelike;
    let first = NaiveDate::parse_from_str(&format!("{}-01", month_str), "%Y-%m-%d")
        .map_err(|_| msg_error_anyhow!(Message::InvalidMonth(month_str.to_string())))?;
    Ok((first.year(), first.month()))
}

/// Looks a shift type up by name, then by id.
///
/// # Arguments
///
/// * `registry` - Registry to search
/// * `key` - Shift type name or UUID
///
/// # Returns
///
/// The shift type, or a `ShiftTypeNotFound` message error.
pub(crate) fn find_shift<'a>(registry: &'a CycleRegistry<SqliteStore>, key: &str) -> Result<&'a ShiftType> {
    registry
        .shift_type_by_name(key)
        .or_else(|| key.parse::<ShiftTypeId>().ok().and_then(|id| registry.shift_type(id)))
        .ok_or_else(|| msg_error_anyhow!(Message::ShiftTypeNotFound(key.to_string())))
}

/// Looks a cycle up by name, then by id.
pub(crate) fn find_cycle<'a>(registry: &'a CycleRegistry<SqliteStore>, key: &str) -> Result<&'a ShiftCycle> {
    registry
        .cycle_by_name(key)
        .or_else(|| key.parse::<CycleId>().ok().and_then(|id| registry.cycle(id)))
        .ok_or_else(|| msg_error_anyhow!(Message::CycleNotFound(key.to_string())))
}

/// The named cycle, or the active one when no name is given.
pub(crate) fn cycle_or_active<'a>(registry: &'a CycleRegistry<SqliteStore>, key: Option<&str>) -> Result<&'a ShiftCycle> {
    match key {
        Some(key) => find_cycle(registry, key),
        None => registry.active().ok_or_else(|| msg_error_anyhow!(Message::NoActiveCycle)),
    }
}
