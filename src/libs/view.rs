use crate::libs::alarm::{Alarm, Repeat};
use crate::libs::calendar::{month_grid, WeekStart};
use crate::libs::cycle::{ShiftCycle, UNASSIGNED_SLOT};
use crate::libs::event::Event;
use crate::libs::formatter::{format_hours, format_percent, format_time, format_window};
use crate::libs::shift::ShiftType;
use crate::libs::statistics::ShiftStatistics;
use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};
use prettytable::{row, Cell, Row, Table};

pub struct View {}

impl View {
    pub fn shift_types(shifts: &[ShiftType], usage: impl Fn(&ShiftType) -> usize) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["#", "NAME", "COLOR", "TIME", "HOURS", "REST", "CYCLES", "NOTES"]);
        for (i, shift) in shifts.iter().enumerate() {
            table.add_row(row![
                i + 1,
                shift.name,
                shift.color,
                format_window(shift.start, shift.end),
                format_hours(shift.work_hours),
                shift.rest_minutes.map(|m| format!("{}m", m)).unwrap_or_default(),
                usage(shift),
                shift.notes.clone().unwrap_or_default()
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn cycles(cycles: &[ShiftCycle]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["", "NAME", "START", "LENGTH", "SHIFTS", "OVERRIDES", "MEMBERS"]);
        for cycle in cycles {
            table.add_row(row![
                if cycle.is_active { "*" } else { "" },
                cycle.name,
                cycle.start_date,
                cycle.length,
                cycle.shifts.iter().map(|s| s.name.as_str()).collect::<Vec<_>>().join(", "),
                cycle.daily_overrides.len(),
                cycle.members.join(", ")
            ]);
        }
        table.printstd();

        Ok(())
    }

    /// One row per cycle day: the pattern's shift and any override on top.
    pub fn cycle_days(cycle: &ShiftCycle) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["DAY", "SHIFT", "OVERRIDE", "TIME", "COLOR"]);
        for (position, &index) in cycle.pattern.iter().enumerate() {
            let base = cycle.shifts.get(index);
            let daily = cycle.override_at(position);
            let effective = daily
                .and_then(|d| d.selected_shift_id)
                .and_then(|id| cycle.shift_by_id(id))
                .or(base);

            let over = match daily.and_then(|d| d.selected_shift_id) {
                Some(id) => cycle.shift_by_id(id).map(|s| s.name.clone()).unwrap_or_else(|| format!("? {}", id)),
                None if daily.is_some() => "custom".to_string(),
                None => String::new(),
            };
            let (time, color) = match effective {
                Some(shift) => {
                    let (start, end) = daily.map(|d| d.times_for(shift)).unwrap_or((shift.start, shift.end));
                    let color = daily.and_then(|d| d.custom_color).unwrap_or(shift.color);
                    (format_window(start, end), color.to_string())
                }
                None => (String::new(), String::new()),
            };

            let shift = match base {
                Some(shift) => shift.name.clone(),
                None if index == UNASSIGNED_SLOT => "-".to_string(),
                None => format!("? slot {}", index),
            };
            table.add_row(row![
                position + 1,
                shift,
                over,
                time,
                color
            ]);
        }
        table.printstd();

        Ok(())
    }

    /// Month grid with the effective shift of each day.
    pub fn calendar(cycle: Option<&ShiftCycle>, year: i32, month: u32, week_start: WeekStart, today: NaiveDate) -> Result<()> {
        let mut table = Table::new();

        table.add_row(Row::new(week_start.headers().iter().map(|day| Cell::new(&day.to_string())).collect()));

        let grid = month_grid(year, month, week_start);
        for week in grid.chunks(7) {
            let mut cells: Vec<Cell> = week
                .iter()
                .map(|slot| match slot {
                    Some(date) => Cell::new(&Self::calendar_cell(cycle, *date, today)),
                    None => Cell::new(""),
                })
                .collect();
            cells.resize_with(7, || Cell::new(""));
            table.add_row(Row::new(cells));
        }
        table.printstd();

        Ok(())
    }

    fn calendar_cell(cycle: Option<&ShiftCycle>, date: NaiveDate, today: NaiveDate) -> String {
        let marker = if date == today { "*" } else { "" };
        let day = format!("{}{}", date.format("%d"), marker);
        match cycle.and_then(|c| c.day_view(date)) {
            Some(view) => {
                let edited = if view.overridden { "'" } else { "" };
                format!("{}\n{}{}", day, view.shift().name, edited)
            }
            None => day,
        }
    }

    pub fn statistics(cycle: &ShiftCycle, from: NaiveDate, to: NaiveDate, stats: &ShiftStatistics) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["SHIFT", "DAYS", "HOURS", "SHARE"]);
        for (name, count) in &stats.shift_counts {
            table.add_row(row![
                name,
                count,
                format_hours(stats.hours_by_shift.get(name).copied().unwrap_or(0.0)),
                format_percent(stats.share(name))
            ]);
        }
        table.add_row(row!["TOTAL", stats.total_days, format_hours(stats.total_hours), ""]);
        table.add_row(row!["AVG / DAY", "", format_hours(stats.average_hours_per_day()), ""]);

        println!("{} ({} - {})", cycle.name, from, to);
        table.printstd();

        Ok(())
    }

    pub fn events(events: &[Event]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "DATE", "TIME", "TITLE", "LOCATION", "DONE"]);
        for event in events {
            table.add_row(row![
                event.id.unwrap_or(0),
                event.timestamp.date(),
                format_time(event.timestamp.time()),
                event.title,
                event.location.clone().unwrap_or_default(),
                if event.completed { "x" } else { "" }
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn alarms(alarms: &[Alarm], shift_name: impl Fn(&Repeat) -> String) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["#", "TIME", "LABEL", "REPEAT", "SOUND", "ON"]);
        for (i, alarm) in alarms.iter().enumerate() {
            table.add_row(row![
                i + 1,
                format_time(alarm.time),
                alarm.label.clone().unwrap_or_default(),
                shift_name(&alarm.repeat),
                alarm.sound,
                if alarm.enabled { "on" } else { "off" }
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn occurrences(rows: &[(String, NaiveDateTime)]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ALARM", "FIRES AT"]);
        for (label, moment) in rows {
            table.add_row(row![label, moment.format("%Y-%m-%d %a %H:%M")]);
        }
        table.printstd();

        Ok(())
    }
}
