//! Schedule and statistics export to CSV or JSON.

use crate::libs::cycle::ShiftCycle;
use crate::libs::formatter::format_time;
use crate::libs::statistics::{aggregate, ShiftStatistics};
use anyhow::Result;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Output file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportData {
    /// One row per day with the effective shift.
    Schedule,
    /// Totals and per-shift distribution.
    Stats,
    All,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportDay {
    pub date: NaiveDate,
    pub weekday: String,
    pub shift: String,
    pub start: String,
    pub end: String,
    pub hours: f64,
    pub color: String,
    pub overridden: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportShiftStat {
    pub name: String,
    pub days: usize,
    pub hours: f64,
    pub share: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportStats {
    pub cycle: String,
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub total_days: usize,
    pub total_hours: f64,
    pub average_hours: f64,
    pub shifts: Vec<ExportShiftStat>,
}

#[derive(Debug, Serialize)]
struct ExportAll<'a> {
    schedule: &'a [ExportDay],
    stats: &'a ExportStats,
}

/// Effective schedule for `[from, to]`, overrides applied.
///
/// # Arguments
///
/// * `cycle` - Cycle to export
/// * `from` - First date, inclusive
/// * `to` - Last date, inclusive
///
/// # Returns
///
/// One row per day that resolves to a shift. Days before the start date
/// and unassigned days are left out.
pub fn schedule_rows(cycle: &ShiftCycle, from: NaiveDate, to: NaiveDate) -> Vec<ExportDay> {
    cycle
        .resolve_range(from, to)
        .filter_map(|(date, _)| cycle.day_view(date))
        .map(|view| ExportDay {
            date: view.date,
            weekday: view.date.format("%a").to_string(),
            shift: view.shift().name.clone(),
            start: format_time(view.start),
            end: format_time(view.end),
            hours: view.hours,
            color: view.color.to_hex(),
            overridden: view.overridden,
        })
        .collect()
}

/// Totals and per-shift distribution for `[from, to]`.
///
/// # Returns
///
/// Shift entries sorted by name, with unused shifts left out.
pub fn stats_summary(cycle: &ShiftCycle, from: NaiveDate, to: NaiveDate) -> ExportStats {
    let stats: ShiftStatistics = aggregate(cycle, from, to);
    let shifts = stats
        .shift_counts
        .iter()
        .map(|(name, &days)| ExportShiftStat {
            name: name.clone(),
            days,
            hours: stats.hours_by_shift.get(name).copied().unwrap_or(0.0),
            share: stats.share(name),
        })
        .collect();

    ExportStats {
        cycle: cycle.name.clone(),
        from,
        to,
        total_days: stats.total_days,
        total_hours: stats.total_hours,
        average_hours: stats.average_hours_per_day(),
        shifts,
    }
}

/// Writes schedules and statistics to a CSV or JSON file.
pub struct Exporter {
    format: ExportFormat,
    output_path: PathBuf,
}

impl Exporter {
    /// Without an explicit path the file is `rota_export_<timestamp>.<ext>`
    /// in the current directory.
    pub fn new(format: ExportFormat, output_path: Option<PathBuf>) -> Self {
        let default_name = format!("rota_export_{}", Local::now().format("%Y%m%d_%H%M%S"));
        let extension = match format {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        };
        let output_path = output_path.unwrap_or_else(|| PathBuf::from(format!("{}.{}", default_name, extension)));

        Self { format, output_path }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Writes `data` for `[from, to]` of `cycle` to the output path.
    ///
    /// # Arguments
    ///
    /// * `data` - What to write; `All` puts the schedule and the statistics in
    ///   one file
    /// * `cycle` - Cycle to export
    /// * `from` - First date, inclusive
    /// * `to` - Last date, inclusive
    ///
    /// # Returns
    ///
    /// An error when the file cannot be created or serialization fails.
    pub fn export(&self, data: ExportData, cycle: &ShiftCycle, from: NaiveDate, to: NaiveDate) -> Result<()> {
        match data {
            ExportData::Schedule => {
                let days = schedule_rows(cycle, from, to);
                match self.format {
                    ExportFormat::Csv => self.schedule_csv(&days),
                    ExportFormat::Json => self.write_json(&days),
                }
            }
            ExportData::Stats => {
                let stats = stats_summary(cycle, from, to);
                match self.format {
                    ExportFormat::Csv => self.stats_csv(&stats),
                    ExportFormat::Json => self.write_json(&stats),
                }
            }
            ExportData::All => {
                let days = schedule_rows(cycle, from, to);
                let stats = stats_summary(cycle, from, to);
                match self.format {
                    ExportFormat::Csv => self.all_csv(&days, &stats),
                    ExportFormat::Json => self.write_json(&ExportAll {
                        schedule: &days,
                        stats: &stats,
                    }),
                }
            }
        }
    }

    fn write_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        File::create(&self.output_path)?.write_all(json.as_bytes())?;
        Ok(())
    }

    fn schedule_csv(&self, days: &[ExportDay]) -> Result<()> {
        let mut wtr = csv::Writer::from_path(&self.output_path)?;
        write_schedule(&mut wtr, days)?;
        wtr.flush()?;
        Ok(())
    }

    fn stats_csv(&self, stats: &ExportStats) -> Result<()> {
        let mut wtr = csv::WriterBuilder::new().flexible(true).from_path(&self.output_path)?;
        write_stats(&mut wtr, stats)?;
        wtr.flush()?;
        Ok(())
    }

    fn all_csv(&self, days: &[ExportDay], stats: &ExportStats) -> Result<()> {
        let mut wtr = csv::WriterBuilder::new().flexible(true).from_path(&self.output_path)?;
        wtr.write_record(["SCHEDULE"])?;
        write_schedule(&mut wtr, days)?;
        wtr.write_record([""])?;
        wtr.write_record(["STATISTICS"])?;
        write_stats(&mut wtr, stats)?;
        wtr.flush()?;
        Ok(())
    }
}

fn write_schedule<W: Write>(wtr: &mut csv::Writer<W>, days: &[ExportDay]) -> Result<()> {
    wtr.write_record(["Date", "Weekday", "Shift", "Start", "End", "Hours", "Color", "Overridden"])?;
    for day in days {
        wtr.write_record([
            day.date.to_string(),
            day.weekday.clone(),
            day.shift.clone(),
            day.start.clone(),
            day.end.clone(),
            format!("{:.2}", day.hours),
            day.color.clone(),
            day.overridden.to_string(),
        ])?;
    }
    Ok(())
}

fn write_stats<W: Write>(wtr: &mut csv::Writer<W>, stats: &ExportStats) -> Result<()> {
    wtr.write_record(["Cycle", stats.cycle.as_str()])?;
    wtr.write_record(["From", stats.from.to_string().as_str()])?;
    wtr.write_record(["To", stats.to.to_string().as_str()])?;
    wtr.write_record(["Total Days", stats.total_days.to_string().as_str()])?;
    wtr.write_record(["Total Hours", format!("{:.2}", stats.total_hours).as_str()])?;
    wtr.write_record(["Average Hours", format!("{:.2}", stats.average_hours).as_str()])?;
    wtr.write_record(["Shift", "Days", "Hours", "Share"])?;
    for shift in &stats.shifts {
        wtr.write_record([
            shift.name.clone(),
            shift.days.to_string(),
            format!("{:.2}", shift.hours),
            format!("{:.1}%", shift.share),
        ])?;
    }
    Ok(())
}
