use super::{find_shift, open_registry, parse_time};
use crate::{
    libs::{
        alarm::{Alarm, Alarms, Repeat, Sound},
        messages::Message,
        view::View,
    },
    msg_error_anyhow, msg_info, msg_print, msg_success, msg_warning,
};
use anyhow::Result;
use chrono::{Local, Weekday};
use clap::{Args, Subcommand};
use uuid::Uuid;

#[derive(Debug, Args)]
pub struct AlarmArgs {
    #[command(subcommand)]
    command: AlarmCommand,
}

#[derive(Debug, Subcommand)]
enum AlarmCommand {
    /// Add an alarm; one-off unless --weekly or --shift is given
    Add {
        /// Time of day, HH:MM
        time: String,
        #[arg(short, long)]
        label: Option<String>,
        /// Weekdays, comma separated (mon,tue,...)
        #[arg(short, long, value_delimiter = ',', conflicts_with = "shift")]
        weekly: Vec<Weekday>,
        /// Fire on days of this shift in the active cycle
        #[arg(short, long)]
        shift: Option<String>,
        #[arg(long, value_enum, default_value = "default")]
        sound: Sound,
    },
    /// List alarms
    List,
    /// Enable or disable an alarm
    Toggle {
        /// Number shown by `alarm list`
        number: usize,
    },
    /// Delete an alarm
    Delete { number: usize },
    /// Show upcoming firing times
    Next {
        #[arg(short, long, default_value_t = 5)]
        count: usize,
    },
}

pub fn cmd(args: AlarmArgs) -> Result<()> {
    match args.command {
        AlarmCommand::Add {
            time,
            label,
            weekly,
            shift,
            sound,
        } => handle_add(time, label, weekly, shift, sound),
        AlarmCommand::List => handle_list(),
        AlarmCommand::Toggle { number } => handle_toggle(number),
        AlarmCommand::Delete { number } => handle_delete(number),
        AlarmCommand::Next { count } => handle_next(count),
    }
}

fn alarm_id(alarms: &Alarms, number: usize) -> Result<Uuid> {
    number
        .checked_sub(1)
        .and_then(|index| alarms.list().get(index))
        .map(|alarm| alarm.id)
        .ok_or_else(|| msg_error_anyhow!(Message::AlarmNotFound(number)))
}

fn handle_add(time: String, label: Option<String>, weekly: Vec<Weekday>, shift: Option<String>, sound: Sound) -> Result<()> {
    let time = parse_time(&time)?;
    let repeat = match shift {
        Some(shift) => {
            let registry = open_registry()?;
            Repeat::Shift {
                shift_type_id: find_shift(&registry, &shift)?.id,
            }
        }
        None if !weekly.is_empty() => {
            let mut days = weekly;
            days.sort_by_key(|day| day.num_days_from_monday());
            days.dedup();
            Repeat::Weekly { days }
        }
        None => Repeat::Once,
    };

    let mut alarm = Alarm::new(time, repeat).with_sound(sound);
    if let Some(label) = label {
        alarm = alarm.with_label(&label);
    }

    let mut alarms = Alarms::load()?;
    alarms.add(alarm);
    alarms.save()?;
    msg_success!(Message::AlarmCreated(time.format("%H:%M").to_string()));
    Ok(())
}

fn handle_list() -> Result<()> {
    let alarms = Alarms::load()?;
    if alarms.list().is_empty() {
        msg_info!(Message::NoAlarms);
        return Ok(());
    }

    let registry = open_registry()?;
    let known: Vec<_> = registry.shift_types().iter().map(|shift| shift.id).collect();
    let orphaned = alarms.orphaned(&known).count();

    msg_print!(Message::AlarmsHeader, true);
    View::alarms(alarms.list(), |repeat| match repeat {
        Repeat::Once => "once".to_string(),
        Repeat::Weekly { days } => days.iter().map(|d| d.to_string()).collect::<Vec<_>>().join(" "),
        Repeat::Shift { shift_type_id } => registry
            .shift_type(*shift_type_id)
            .map(|shift| format!("shift: {}", shift.name))
            .unwrap_or_else(|| "shift: ?".to_string()),
    })?;
    if orphaned > 0 {
        msg_warning!(Message::AlarmsWithoutShift(orphaned));
    }
    Ok(())
}

fn handle_toggle(number: usize) -> Result<()> {
    let mut alarms = Alarms::load()?;
    let id = alarm_id(&alarms, number)?;
    let enabled = alarms.toggle(id).ok_or_else(|| msg_error_anyhow!(Message::AlarmNotFound(number)))?;
    alarms.save()?;
    msg_success!(Message::AlarmToggled(number, enabled));
    Ok(())
}

fn handle_delete(number: usize) -> Result<()> {
    let mut alarms = Alarms::load()?;
    let id = alarm_id(&alarms, number)?;
    alarms.remove(id);
    alarms.save()?;
    msg_success!(Message::AlarmDeleted(number));
    Ok(())
}

fn handle_next(count: usize) -> Result<()> {
    let alarms = Alarms::load()?;
    let registry = open_registry()?;
    let now = Local::now().naive_local();

    let mut rows: Vec<(String, chrono::NaiveDateTime)> = alarms
        .list()
        .iter()
        .flat_map(|alarm| {
            let label = alarm.label.clone().unwrap_or_else(|| alarm.time.format("%H:%M").to_string());
            alarm
                .next_occurrences(now, registry.active(), count)
                .into_iter()
                .map(move |moment| (label.clone(), moment))
        })
        .collect();
    rows.sort_by_key(|(_, moment)| *moment);
    rows.truncate(count);

    if rows.is_empty() {
        msg_info!(Message::NoUpcomingAlarms);
        return Ok(());
    }
    msg_print!(Message::UpcomingAlarmsHeader, true);
    View::occurrences(&rows)
}
