use super::{find_cycle, find_shift, open_registry, parse_date, parse_time};
use crate::{
    db::store::SqliteStore,
    libs::{
        color::Color,
        config::Config,
        cycle::{ShiftCycle, MAX_CYCLE_LENGTH, MIN_CYCLE_LENGTH},
        daily_override::DailyOverride,
        messages::Message,
        registry::CycleRegistry,
        resolution::DefaultReason,
        shift::{ShiftType, ShiftTypeId},
        view::View,
    },
    msg_error_anyhow, msg_info, msg_print, msg_success, msg_warning,
};
use anyhow::Result;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

#[derive(Debug, Args)]
pub struct CycleArgs {
    #[command(subcommand)]
    command: CycleCommand,
}

#[derive(Debug, Subcommand)]
enum CycleCommand {
    /// Create a cycle
    Create {
        name: String,
        /// First day of the cycle (YYYY-MM-DD or 'today')
        #[arg(short, long, default_value = "today")]
        start: String,
        /// Shift of each cycle day, comma separated (e.g. Day,Night,Off).
        /// Prompts for every day when omitted
        #[arg(short, long, value_delimiter = ',')]
        days: Vec<String>,
        /// People following this cycle, comma separated
        #[arg(short, long, value_delimiter = ',')]
        members: Vec<String>,
        #[arg(long)]
        notes: Option<String>,
        /// Make it the active cycle
        #[arg(short, long)]
        activate: bool,
    },
    /// List cycles; the active one is marked with *
    List,
    /// Show a cycle day by day
    Show {
        /// Name or id; the active cycle when omitted
        cycle: Option<String>,
    },
    /// Change a cycle's name, start, days, members or notes
    Edit {
        cycle: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(short, long)]
        start: Option<String>,
        #[arg(short, long, value_delimiter = ',')]
        days: Vec<String>,
        #[arg(short, long, value_delimiter = ',')]
        members: Vec<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Make a cycle the only active one
    Activate { cycle: String },
    /// Deactivate a cycle
    Deactivate { cycle: String },
    /// Delete an inactive cycle
    Delete {
        cycle: String,
        #[arg(short, long)]
        yes: bool,
    },
    /// Change the cycle length; extra days repeat the first shift
    Length { cycle: String, length: u32 },
    /// Customize one cycle day
    Override {
        cycle: String,
        /// Cycle day, 1-indexed
        day: u32,
        /// Shift shown instead of the pattern's
        #[arg(long)]
        shift: Option<String>,
        #[arg(short, long)]
        start: Option<String>,
        #[arg(short, long)]
        end: Option<String>,
        #[arg(short, long)]
        color: Option<Color>,
    },
    /// Remove a day's customization
    ClearOverride { cycle: String, day: u32 },
}

/// Dispatches `rota cycle` subcommands.
pub fn cmd(args: CycleArgs) -> Result<()> {
    match args.command {
        CycleCommand::Create {
            name,
            start,
            days,
            members,
            notes,
            activate,
        } => handle_create(name, start, days, members, notes, activate),
        CycleCommand::List => handle_list(),
        CycleCommand::Show { cycle } => handle_show(cycle),
        CycleCommand::Edit {
            cycle,
            name,
            start,
            days,
            members,
            notes,
        } => handle_edit(cycle, name, start, days, members, notes),
        CycleCommand::Activate { cycle } => handle_activate(cycle),
        CycleCommand::Deactivate { cycle } => handle_deactivate(cycle),
        CycleCommand::Delete { cycle, yes } => handle_delete(cycle, yes),
        CycleCommand::Length { cycle, length } => handle_length(cycle, length),
        CycleCommand::Override {
            cycle,
            day,
            shift,
            start,
            end,
            color,
        } => handle_override(cycle, day, shift, start, end, color),
        CycleCommand::ClearOverride { cycle, day } => handle_clear_override(cycle, day),
    }
}

/// Shift list and pattern from per-day shift names. Unknown names fall back
/// to the first shift with a warning.
fn pattern_from_names(registry: &CycleRegistry<SqliteStore>, days: &[String]) -> Result<(Vec<ShiftType>, Vec<usize>)> {
    let mut shifts: Vec<ShiftType> = Vec::new();
    let mut selections: Vec<Option<ShiftTypeId>> = Vec::with_capacity(days.len());
    for day in days {
        match find_shift(registry, day.trim()) {
            Ok(shift) => {
                if !shifts.iter().any(|s| s.id == shift.id) {
                    shifts.push(shift.clone());
                }
                selections.push(Some(shift.id));
            }
            Err(_) => selections.push(None),
        }
    }
    if shifts.is_empty() {
        return Err(msg_error_anyhow!(Message::NoShiftsSelected));
    }

    let selection = ShiftCycle::pattern_from_selection(&shifts, &selections);
    for (day, reason) in &selection.defaulted {
        if let DefaultReason::NoSelection = reason {
            msg_warning!(Message::UnknownShiftForDay(day + 1, days[*day].clone(), shifts[0].name.clone()));
        }
    }
    Ok((shifts, selection.pattern))
}

/// Asks for the cycle length, then the shift of each day.
fn prompt_days(registry: &CycleRegistry<SqliteStore>) -> Result<Vec<String>> {
    if registry.shift_types().is_empty() {
        return Err(msg_error_anyhow!(Message::NoShiftTypes));
    }
    let length: u32 = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptCycleLength.to_string())
        .default(Config::read()?.cycle().default_length)
        .validate_with(|value: &u32| -> Result<(), String> {
            if (MIN_CYCLE_LENGTH..=MAX_CYCLE_LENGTH).contains(value) {
                Ok(())
            } else {
                Err(Message::CycleLengthRange.to_string())
            }
        })
        .interact_text()?;

    let names: Vec<&str> = registry.shift_types().iter().map(|s| s.name.as_str()).collect();
    let mut days = Vec::with_capacity(length as usize);
    for day in 1..=length {
        let choice = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptShiftForDay(day).to_string())
            .items(&names)
            .default(0)
            .interact()?;
        days.push(names[choice].to_string());
    }
    Ok(days)
}

fn handle_create(name: String, start: String, days: Vec<String>, members: Vec<String>, notes: Option<String>, activate: bool) -> Result<()> {
    let mut registry = open_registry()?;
    let start_date = parse_date(&start)?;
    let days = if days.is_empty() { prompt_days(&registry)? } else { days };
    let (shifts, pattern) = pattern_from_names(&registry, &days)?;

    let mut cycle = ShiftCycle::new(&name, start_date, shifts, pattern)?;
    cycle.members = members;
    cycle.notes = notes;

    let id = registry.create_cycle(cycle, activate)?;
    msg_success!(Message::CycleCreated(name, days.len()));
    if registry.cycle(id).is_some_and(|c| c.is_active) {
        msg_info!(Message::CycleNowActive);
    }
    Ok(())
}

fn handle_list() -> Result<()> {
    let registry = open_registry()?;
    if registry.cycles().is_empty() {
        msg_info!(Message::NoCycles);
        return Ok(());
    }

    msg_print!(Message::CyclesHeader, true);
    View::cycles(registry.cycles())
}

fn handle_show(key: Option<String>) -> Result<()> {
    let registry = open_registry()?;
    let cycle = super::cycle_or_active(&registry, key.as_deref())?;

    msg_print!(Message::CycleHeader(cycle.name.clone(), cycle.start_date.to_string(), cycle.length), true);
    View::cycle_days(cycle)
}

fn handle_edit(
    key: String,
    name: Option<String>,
    start: Option<String>,
    days: Vec<String>,
    members: Vec<String>,
    notes: Option<String>,
) -> Result<()> {
    let mut registry = open_registry()?;
    let mut cycle = find_cycle(&registry, &key)?.clone();

    if let Some(name) = name {
        cycle.name = name;
    }
    if let Some(start) = start {
        cycle.start_date = parse_date(&start)?;
    }
    if !days.is_empty() {
        let (shifts, pattern) = pattern_from_names(&registry, &days)?;
        cycle.length = pattern.len() as u32;
        cycle.shifts = shifts;
        cycle.pattern = pattern;
        cycle.daily_overrides.retain(|daily| daily.day_number <= cycle.length);
    }
    if !members.is_empty() {
        cycle.members = members;
    }
    if let Some(notes) = notes {
        cycle.notes = if notes.is_empty() { None } else { Some(notes) };
    }

    let name = cycle.name.clone();
    registry.update_cycle(cycle)?;
    msg_success!(Message::CycleUpdated(name));
    Ok(())
}

fn handle_activate(key: String) -> Result<()> {
    let mut registry = open_registry()?;
    let cycle = find_cycle(&registry, &key)?;
    let (id, name) = (cycle.id, cycle.name.clone());

    registry.activate(id)?;
    msg_success!(Message::CycleActivated(name));
    Ok(())
}

fn handle_deactivate(key: String) -> Result<()> {
    let mut registry = open_registry()?;
    let cycle = find_cycle(&registry, &key)?;
    let (id, name) = (cycle.id, cycle.name.clone());

    registry.deactivate(id)?;
    msg_success!(Message::CycleDeactivated(name));
    Ok(())
}

fn handle_delete(key: String, yes: bool) -> Result<()> {
    let mut registry = open_registry()?;
    let cycle = find_cycle(&registry, &key)?;
    let (id, name) = (cycle.id, cycle.name.clone());

    if !yes
        && !Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmDeleteCycle(name.clone()).to_string())
            .default(false)
            .interact()?
    {
        msg_info!(Message::OperationCancelled);
        return Ok(());
    }

    registry.delete_cycle(id)?;
    msg_success!(Message::CycleDeleted(name));
    Ok(())
}

fn handle_length(key: String, length: u32) -> Result<()> {
    let mut registry = open_registry()?;
    let cycle = find_cycle(&registry, &key)?;
    let (id, name, dropped) = (
        cycle.id,
        cycle.name.clone(),
        cycle.daily_overrides.iter().filter(|daily| daily.day_number > length).count(),
    );

    registry.set_cycle_length(id, length)?;
    msg_success!(Message::CycleLengthChanged(name, length));
    if dropped > 0 {
        msg_warning!(Message::OverridesDropped(dropped));
    }
    Ok(())
}

fn handle_override(
    key: String,
    day: u32,
    shift: Option<String>,
    start: Option<String>,
    end: Option<String>,
    color: Option<Color>,
) -> Result<()> {
    let mut registry = open_registry()?;
    let cycle = find_cycle(&registry, &key)?;
    let (id, name) = (cycle.id, cycle.name.clone());

    let mut daily = cycle.override_for(day).cloned().unwrap_or_else(|| DailyOverride::new(day));
    if let Some(shift) = shift {
        daily.selected_shift_id = Some(find_shift(&registry, &shift)?.id);
    }
    if let Some(start) = start {
        daily.custom_start = Some(parse_time(&start)?);
    }
    if let Some(end) = end {
        daily.custom_end = Some(parse_time(&end)?);
    }
    if let Some(color) = color {
        daily.custom_color = Some(color);
    }

    registry.set_override(id, daily)?;
    msg_success!(Message::OverrideSet(name, day));
    Ok(())
}

fn handle_clear_override(key: String, day: u32) -> Result<()> {
    let mut registry = open_registry()?;
    let cycle = find_cycle(&registry, &key)?;
    let (id, name) = (cycle.id, cycle.name.clone());

    if registry.clear_override(id, day)? {
        msg_success!(Message::OverrideCleared(name, day));
    } else {
        msg_info!(Message::NoOverrideForDay(day));
    }
    Ok(())
}
