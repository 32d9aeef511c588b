use super::{cycle_or_active, open_registry, parse_month};
use crate::{
    db::events::Events,
    libs::{config::Config, formatter::format_window, messages::Message, view::View},
    msg_info, msg_print,
};
use anyhow::Result;
use chrono::{Datelike, Local};
use clap::Args;

#[derive(Debug, Args)]
pub struct CalendarArgs {
    /// Month to show, YYYY-MM; the current month when omitted
    #[arg(short, long)]
    month: Option<String>,
    /// Cycle name or id; the active cycle when omitted
    #[arg(short, long)]
    cycle: Option<String>,
}

/// Prints a month grid of a cycle, today's shift and upcoming events.
///
/// # Arguments
///
/// * `args` - Month (`YYYY-MM`, current month by default) and cycle (the
///   active one by default)
///
/// # Examples
///
/// ```bash
/// rota calendar
/// rota calendar --month 2024-02 --cycle "Team B"
/// ```
pub fn cmd(args: CalendarArgs) -> Result<()> {
    let config = Config::read()?.calendar();
    let registry = open_registry()?;
    let cycle = cycle_or_active(&registry, args.cycle.as_deref())?;

    let now = Local::now().naive_local();
    let today = now.date();
    let (year, month) = match args.month {
        Some(month) => parse_month(&month)?,
        None => (today.year(), today.month()),
    };

    msg_print!(Message::CalendarHeader(cycle.name.clone(), year, month), true);
    View::calendar(Some(cycle), year, month, config.week_starts_on, today)?;

    match cycle.day_view(today) {
        Some(view) => msg_info!(Message::TodayShift(view.shift().name.clone(), format_window(view.start, view.end))),
        None => msg_info!(Message::NoShiftToday),
    }

    if config.upcoming_events > 0 {
        let events = Events::new()?.upcoming(now, config.upcoming_events)?;
        if !events.is_empty() {
            msg_print!(Message::UpcomingEventsHeader, true);
            View::events(&events)?;
        }
    }
    Ok(())
}
