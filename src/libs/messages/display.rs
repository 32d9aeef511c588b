//! Text for every [`Message`].
//!
//! All user-facing wording lives in this one match, so a new variant fails to
//! compile until it is given text here. Prefixes such as ✅ or ❌ are added by
//! the `msg_*` macros, never by the text itself.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === SHIFT TYPE MESSAGES ===
            Message::ShiftTypeCreated(name, hours) => format!("Shift type '{}' created ({} per shift)", name, hours),
            Message::ShiftTypeUpdated(name, 0) => format!("Shift type '{}' updated", name),
            Message::ShiftTypeUpdated(name, cycles) => format!("Shift type '{}' updated in {} cycle(s)", name, cycles),
            Message::ShiftTypeDeleted(name) => format!("Shift type '{}' deleted", name),
            Message::ShiftTypeNotFound(key) => format!("Shift type '{}' not found", key),
            Message::ShiftTypesHeader => "Shift types:".to_string(),
            Message::NoShiftTypes => "No shift types yet. Add one with 'rota shift add'".to_string(),
            Message::ConfirmDeleteShiftType(name) => format!("Delete shift type '{}'?", name),

            // === CYCLE MESSAGES ===
            Message::CycleCreated(name, length) => format!("Cycle '{}' created with {} day(s)", name, length),
            Message::CycleUpdated(name) => format!("Cycle '{}' updated", name),
            Message::CycleDeleted(name) => format!("Cycle '{}' deleted", name),
            Message::CycleActivated(name) => format!("Cycle '{}' is now active", name),
            Message::CycleDeactivated(name) => format!("Cycle '{}' deactivated", name),
            Message::CycleNotFound(key) => format!("Cycle '{}' not found", key),
            Message::CycleNowActive => "It is the active cycle".to_string(),
            Message::CyclesHeader => "Cycles:".to_string(),
            Message::CycleHeader(name, start, length) => format!("Cycle '{}', {} days from {}", name, length, start),
            Message::CycleLengthChanged(name, length) => format!("Cycle '{}' now has {} day(s)", name, length),
            Message::CycleLengthRange => "Cycle length must be between 1 and 30 days".to_string(),
            Message::NoCycles => "No cycles yet. Create one with 'rota cycle create'".to_string(),
            Message::NoActiveCycle => "No active cycle. Activate one with 'rota cycle activate' or pass --cycle".to_string(),
            Message::NoShiftsSelected => "A cycle needs at least one day".to_string(),
            Message::UnknownShiftForDay(day, given, fallback) => {
                format!("Day {}: unknown shift '{}', using '{}'", day, given, fallback)
            }
            Message::OverridesDropped(count) => format!("{} daily override(s) beyond the new length removed", count),
            Message::OverrideSet(name, day) => format!("Override for day {} of '{}' saved", day, name),
            Message::OverrideCleared(name, day) => format!("Override for day {} of '{}' cleared", day, name),
            Message::NoOverrideForDay(day) => format!("Day {} has no override", day),
            Message::ConfirmDeleteCycle(name) => format!("Delete cycle '{}'?", name),
            Message::PromptCycleLength => "Cycle length in days".to_string(),
            Message::PromptShiftForDay(day) => format!("Shift for day {}", day),

            // === CALENDAR MESSAGES ===
            Message::CalendarHeader(name, year, month) => format!("{} {:04}-{:02}", name, year, month),
            Message::TodayShift(shift, window) => format!("Today: {} {}", shift, window),
            Message::NoShiftToday => "No shift today".to_string(),
            Message::UpcomingEventsHeader => "Upcoming events:".to_string(),

            // === STATISTICS & EXPORT MESSAGES ===
            Message::NoShiftsInRange(from, to) => format!("No scheduled days between {} and {}", from, to),
            Message::InvalidRange => "Invalid date range".to_string(),
            Message::ExportCompleted(path) => format!("Exported to {}", path),

            // === EVENT MESSAGES ===
            Message::EventCreated(title, id) => format!("Event '{}' added (#{})", title, id),
            Message::EventUpdated(id) => format!("Event #{} updated", id),
            Message::EventDeleted(id) => format!("Event #{} deleted", id),
            Message::EventNotFound(id) => format!("Event #{} not found", id),
            Message::EventsHeader => "Events:".to_string(),
            Message::NoEvents => "No events".to_string(),

            // === ALARM MESSAGES ===
            Message::AlarmCreated(time) => format!("Alarm set for {}", time),
            Message::AlarmToggled(number, true) => format!("Alarm {} enabled", number),
            Message::AlarmToggled(number, false) => format!("Alarm {} disabled", number),
            Message::AlarmDeleted(number) => format!("Alarm {} deleted", number),
            Message::AlarmNotFound(number) => format!("Alarm {} not found", number),
            Message::AlarmsHeader => "Alarms:".to_string(),
            Message::AlarmsWithoutShift(count) => format!("{} alarm(s) point at a deleted shift type and will not fire", count),
            Message::NoAlarms => "No alarms".to_string(),
            Message::UpcomingAlarmsHeader => "Upcoming alarms:".to_string(),
            Message::NoUpcomingAlarms => "No upcoming alarms".to_string(),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved".to_string(),
            Message::ConfigModuleCycle => "Cycle defaults".to_string(),
            Message::ConfigModuleCalendar => "Calendar".to_string(),
            Message::ConfigModuleStatistics => "Statistics".to_string(),
            Message::PromptSelectModules => "Select sections to configure".to_string(),
            Message::PromptDefaultCycleLength => "Default cycle length in days".to_string(),
            Message::PromptDefaultShiftHours => "Default shift length in hours".to_string(),
            Message::PromptWeekStart => "First day of the week".to_string(),
            Message::PromptUpcomingEvents => "Upcoming events shown under the calendar".to_string(),
            Message::PromptDefaultRange => "Default statistics range".to_string(),

            // === DATABASE MESSAGES ===
            Message::DatabaseUpToDate => "Database is up to date".to_string(),
            Message::DatabaseNeedsUpdate => "Database has pending migrations".to_string(),
            Message::DatabaseVersion(version) => format!("Database version: {}", version),
            Message::MigrationsFound(count) => format!("Found {} pending migration(s)", count),
            Message::RunningMigration(version, name) => format!("Running migration v{}: {}", version, name),
            Message::MigrationFailed(version, error) => format!("Migration v{} failed: {}", version, error),
            Message::MigrationHistory => "Migration history:".to_string(),
            Message::MigrationEntry(version, name, applied_at) => format!("  v{} {} ({})", version, name, applied_at),

            // === INPUT MESSAGES ===
            Message::InvalidTime(value) => format!("Invalid time '{}', expected HH:MM", value),
            Message::InvalidDateTime(value) => format!("Invalid date and time '{}', expected YYYY-MM-DD HH:MM", value),
            Message::InvalidMonth(value) => format!("Invalid month '{}', expected YYYY-MM", value),

            // === GENERAL MESSAGES ===
            Message::OperationCancelled => "Operation cancelled".to_string(),
        };
        write!(f, "{}", text)
    }
}
