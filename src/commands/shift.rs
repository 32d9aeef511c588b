use super::{find_shift, open_registry, parse_time};
use crate::{
    libs::{
        color::Color,
        config::Config,
        formatter::format_hours,
        messages::Message,
        shift::ShiftType,
        view::View,
    },
    msg_info, msg_print, msg_success,
};
use anyhow::Result;
use chrono::{Duration, NaiveTime};
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Args)]
pub struct ShiftArgs {
    #[command(subcommand)]
    command: ShiftCommand,
}

#[derive(Debug, Subcommand)]
enum ShiftCommand {
    /// Add a shift type
    Add {
        name: String,
        /// Start time, HH:MM
        #[arg(short, long)]
        start: String,
        /// End time, HH:MM. Defaults to start plus the configured shift length
        #[arg(short, long)]
        end: Option<String>,
        /// Work hours, when they differ from the time window
        #[arg(long)]
        hours: Option<f64>,
        /// Color name or #rrggbb
        #[arg(short, long)]
        color: Option<Color>,
        /// Rest minutes within the shift
        #[arg(long)]
        rest: Option<u32>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// List shift types
    List,
    /// Edit a shift type; changes propagate to every cycle using it
    Edit {
        /// Name or id
        shift: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(short, long)]
        start: Option<String>,
        #[arg(short, long)]
        end: Option<String>,
        #[arg(long)]
        hours: Option<f64>,
        #[arg(short, long)]
        color: Option<Color>,
        #[arg(long)]
        rest: Option<u32>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Delete a shift type no cycle uses
    Delete {
        /// Name or id
        shift: String,
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

pub fn cmd(args: ShiftArgs) -> Result<()> {
    match args.command {
        ShiftCommand::Add {
            name,
            start,
            end,
            hours,
            color,
            rest,
            notes,
        } => handle_add(name, start, end, hours, color, rest, notes),
        ShiftCommand::List => handle_list(),
        ShiftCommand::Edit {
            shift,
            name,
            start,
            end,
            hours,
            color,
            rest,
            notes,
        } => handle_edit(shift, name, start, end, hours, color, rest, notes),
        ShiftCommand::Delete { shift, yes } => handle_delete(shift, yes),
    }
}

fn default_end(start: NaiveTime, hours: f64) -> NaiveTime {
    let (end, _) = start.overflowing_add_signed(Duration::minutes((hours * 60.0).round() as i64));
    end
}

#[allow(clippy::too_many_arguments)]
fn handle_add(
    name: String,
    start: String,
    end: Option<String>,
    hours: Option<f64>,
    color: Option<Color>,
    rest: Option<u32>,
    notes: Option<String>,
) -> Result<()> {
    let mut registry = open_registry()?;
    let start = parse_time(&start)?;
    let end = match end {
        Some(end) => parse_time(&end)?,
        None => default_end(start, Config::read()?.cycle().default_shift_hours),
    };

    let mut shift = ShiftType::new(&name, color.unwrap_or_default(), start, end);
    if let Some(hours) = hours {
        shift = shift.with_work_hours(hours);
    }
    if let Some(rest) = rest {
        shift = shift.with_rest_minutes(rest);
    }
    if let Some(notes) = notes {
        shift = shift.with_notes(&notes);
    }

    let work_hours = shift.work_hours;
    registry.add_shift_type(shift)?;
    msg_success!(Message::ShiftTypeCreated(name, format_hours(work_hours)));
    Ok(())
}

fn handle_list() -> Result<()> {
    let registry = open_registry()?;
    if registry.shift_types().is_empty() {
        msg_info!(Message::NoShiftTypes);
        return Ok(());
    }

    msg_print!(Message::ShiftTypesHeader, true);
    View::shift_types(registry.shift_types(), |shift| registry.cycles_using(shift.id).len())
}

#[allow(clippy::too_many_arguments)]
fn handle_edit(
    key: String,
    name: Option<String>,
    start: Option<String>,
    end: Option<String>,
    hours: Option<f64>,
    color: Option<Color>,
    rest: Option<u32>,
    notes: Option<String>,
) -> Result<()> {
    let mut registry = open_registry()?;
    let mut shift = find_shift(&registry, &key)?.clone();

    if let Some(name) = name {
        shift.name = name;
    }
    if start.is_some() || end.is_some() {
        let start = start.as_deref().map(parse_time).transpose()?.unwrap_or(shift.start);
        let end = end.as_deref().map(parse_time).transpose()?.unwrap_or(shift.end);
        shift.set_times(start, end);
    }
    if let Some(hours) = hours {
        shift.work_hours = hours;
    }
    if let Some(color) = color {
        shift.color = color;
    }
    if let Some(rest) = rest {
        shift.rest_minutes = Some(rest);
    }
    if let Some(notes) = notes {
        shift.notes = if notes.is_empty() { None } else { Some(notes) };
    }

    let cycles = registry.cycles_using(shift.id).len();
    let name = shift.name.clone();
    registry.update_shift_type(shift)?;
    msg_success!(Message::ShiftTypeUpdated(name, cycles));
    Ok(())
}

fn handle_delete(key: String, yes: bool) -> Result<()> {
    let mut registry = open_registry()?;
    let shift = find_shift(&registry, &key)?;
    let (id, name) = (shift.id, shift.name.clone());

    if !yes
        && !Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmDeleteShiftType(name.clone()).to_string())
            .default(false)
            .interact()?
    {
        msg_info!(Message::OperationCancelled);
        return Ok(());
    }

    registry.delete_shift_type(id)?;
    msg_success!(Message::ShiftTypeDeleted(name));
    Ok(())
}

