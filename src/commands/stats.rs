use super::{cycle_or_active, open_registry, parse_date, parse_month};
use crate::{
    libs::{
        config::Config,
        messages::Message,
        statistics::{aggregate, StatsRange},
        view::View,
    },
    msg_error_anyhow, msg_info,
};
use anyhow::Result;
use chrono::Local;
use clap::Args;

#[derive(Debug, Args)]
pub struct StatsArgs {
    /// Month, YYYY-MM
    #[arg(short, long, conflicts_with_all = ["year", "from"])]
    month: Option<String>,
    /// Whole year
    #[arg(short, long, conflicts_with = "from")]
    year: Option<i32>,
    /// Custom range start (YYYY-MM-DD or 'today'); requires --to
    #[arg(long, requires = "to")]
    from: Option<String>,
    #[arg(long, requires = "from")]
    to: Option<String>,
    /// Cycle name or id; the active cycle when omitted
    #[arg(short, long)]
    cycle: Option<String>,
}

/// Range from explicit flags, else the configured default around today.
pub(crate) fn range_from_args(month: Option<&str>, year: Option<i32>, from: Option<&str>, to: Option<&str>) -> Result<StatsRange> {
    if let Some(month) = month {
        let (year, month) = parse_month(month)?;
        return Ok(StatsRange::Month { year, month });
    }
    if let Some(year) = year {
        return Ok(StatsRange::Year(year));
    }
    if let (Some(from), Some(to)) = (from, to) {
        return Ok(StatsRange::Custom {
            from: parse_date(from)?,
            to: parse_date(to)?,
        });
    }
    let kind = Config::read()?.statistics().default_range;
    Ok(StatsRange::around(kind, Local::now().date_naive()))
}

/// Shows work-hour totals and the shift distribution for a range.
pub fn cmd(args: StatsArgs) -> Result<()> {
    let registry = open_registry()?;
    let cycle = cycle_or_active(&registry, args.cycle.as_deref())?;

    let range = range_from_args(args.month.as_deref(), args.year, args.from.as_deref(), args.to.as_deref())?;
    let (from, to) = range.bounds().ok_or_else(|| msg_error_anyhow!(Message::InvalidRange))?;

    let stats = aggregate(cycle, from, to);
    if stats.total_days == 0 {
        msg_info!(Message::NoShiftsInRange(from.to_string(), to.to_string()));
        return Ok(());
    }
    View::statistics(cycle, from, to, &stats)
}
