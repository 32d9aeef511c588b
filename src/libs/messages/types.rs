#[derive(Debug, Clone)]
pub enum Message {
    // === SHIFT TYPE MESSAGES ===
    ShiftTypeCreated(String, String), // name, hours
    ShiftTypeUpdated(String, usize),  // name, cycles touched
    ShiftTypeDeleted(String),
    ShiftTypeNotFound(String),
    ShiftTypesHeader,
    NoShiftTypes,
    ConfirmDeleteShiftType(String),

    // === CYCLE MESSAGES ===
    CycleCreated(String, usize), // name, length
    CycleUpdated(String),
    CycleDeleted(String),
    CycleActivated(String),
    CycleDeactivated(String),
    CycleNotFound(String),
    CycleNowActive,
    CyclesHeader,
    CycleHeader(String, String, u32), // name, start date, length
    CycleLengthChanged(String, u32),
    CycleLengthRange,
    NoCycles,
    NoActiveCycle,
    NoShiftsSelected,
    UnknownShiftForDay(usize, String, String), // day, given name, fallback name
    OverridesDropped(usize),
    OverrideSet(String, u32),
    OverrideCleared(String, u32),
    NoOverrideForDay(u32),
    ConfirmDeleteCycle(String),
    PromptCycleLength,
    PromptShiftForDay(u32),

    // === CALENDAR MESSAGES ===
    CalendarHeader(String, i32, u32), // cycle, year, month
    TodayShift(String, String),       // shift, window
    NoShiftToday,
    UpcomingEventsHeader,

    // === STATISTICS & EXPORT MESSAGES ===
    NoShiftsInRange(String, String),
    InvalidRange,
    ExportCompleted(String),

    // === EVENT MESSAGES ===
    EventCreated(String, i64),
    EventUpdated(i64),
    EventDeleted(i64),
    EventNotFound(i64),
    EventsHeader,
    NoEvents,

    // === ALARM MESSAGES ===
    AlarmCreated(String),
    AlarmToggled(usize, bool),
    AlarmDeleted(usize),
    AlarmNotFound(usize),
    AlarmsHeader,
    AlarmsWithoutShift(usize),
    NoAlarms,
    UpcomingAlarmsHeader,
    NoUpcomingAlarms,

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigModuleCycle,
    ConfigModuleCalendar,
    ConfigModuleStatistics,
    PromptSelectModules,
    PromptDefaultCycleLength,
    PromptDefaultShiftHours,
    PromptWeekStart,
    PromptUpcomingEvents,
    PromptDefaultRange,

    // === DATABASE MESSAGES ===
    DatabaseUpToDate,
    DatabaseNeedsUpdate,
    DatabaseVersion(u32),
    MigrationsFound(usize),
    RunningMigration(u32, String),
    MigrationFailed(u32, String),
    MigrationHistory,
    MigrationEntry(u32, String, String), // version, name, applied at

    // === INPUT MESSAGES ===
    InvalidTime(String),
    InvalidDateTime(String),
    InvalidMonth(String),

    // === GENERAL MESSAGES ===
    OperationCancelled,
}
