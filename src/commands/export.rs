use super::{cycle_or_active, open_registry, stats::range_from_args};
use crate::{
    libs::{
        export::{ExportData, ExportFormat, Exporter},
        messages::Message,
    },
    msg_error_anyhow, msg_success,
};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// What to export
    #[arg(short, long, value_enum, default_value = "schedule")]
    data: ExportData,
    #[arg(short, long, value_enum, default_value = "csv")]
    format: ExportFormat,
    /// Output file; rota_export_<timestamp>.<ext> when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Month, YYYY-MM
    #[arg(short, long, conflicts_with_all = ["year", "from"])]
    month: Option<String>,
    #[arg(short, long, conflicts_with = "from")]
    year: Option<i32>,
    #[arg(long, requires = "to")]
    from: Option<String>,
    #[arg(long, requires = "from")]
    to: Option<String>,
    /// Cycle name or id; the active cycle when omitted
    #[arg(short, long)]
    cycle: Option<String>,
}

/// Exports the schedule, statistics or both for a date range.
///
/// The range comes from `--month`, `--year` or `--from`/`--to`, falling back
/// to the configured default range around today.
///
/// # Arguments
///
/// * `args` - What to export, its format, range, cycle and output file
///
/// # Returns
///
/// An error when no cycle matches or the file cannot be written.
pub fn cmd(args: ExportArgs) -> Result<()> {
    let registry = open_registry()?;
    let cycle = cycle_or_active(&registry, args.cycle.as_deref())?;

    let range = range_from_args(args.month.as_deref(), args.year, args.from.as_deref(), args.to.as_deref())?;
    let (from, to) = range.bounds().ok_or_else(|| msg_error_anyhow!(Message::InvalidRange))?;

    let exporter = Exporter::new(args.format, args.output);
    exporter.export(args.data, cycle, from, to)?;
    msg_success!(Message::ExportCompleted(exporter.output_path().display().to_string()));
    Ok(())
}
