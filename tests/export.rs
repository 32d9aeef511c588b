#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};
    use rota::libs::color::Color;
    use rota::libs::cycle::ShiftCycle;
    use rota::libs::daily_override::DailyOverride;
    use rota::libs::export::{schedule_rows, stats_summary, ExportData, ExportDay, ExportFormat, ExportStats, Exporter};
    use rota::libs::shift::ShiftType;
    use std::fs;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    struct ExportTestContext {
        temp_dir: TempDir,
        cycle: ShiftCycle,
    }

    impl TestContext for ExportTestContext {
        fn setup() -> Self {
            let shifts = vec![
                ShiftType::new("Day", Color::rgb(0xff, 0xcc, 0x00), time(8, 0), time(16, 0)),
                ShiftType::new("Night", Color::rgb(0x58, 0x56, 0xd6), time(22, 0), time(6, 0)),
                ShiftType::new("Off", Color::rgb(0x8e, 0x8e, 0x93), time(0, 0), time(0, 0)),
            ];
            let off = shifts[2].id;
            let mut cycle = ShiftCycle::new("Team A", date(2024, 1, 1), shifts, vec![0, 1, 2]).unwrap();
            cycle.set_override(DailyOverride::new(2).with_shift(off)).unwrap();

            ExportTestContext {
                temp_dir: tempfile::tempdir().unwrap(),
                cycle,
            }
        }
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_schedule_rows_show_effective_shift(ctx: &mut ExportTestContext) {
        let rows = schedule_rows(&ctx.cycle, date(2023, 12, 31), date(2024, 1, 3));

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].shift, "Day");
        assert_eq!(rows[0].weekday, "Mon");
        assert_eq!(rows[0].start, "08:00");
        assert!(!rows[0].overridden);
        assert_eq!(rows[1].shift, "Off");
        assert!(rows[1].overridden);
        assert_eq!(rows[1].color, "#8e8e93");
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_stats_summary(ctx: &mut ExportTestContext) {
        let stats = stats_summary(&ctx.cycle, date(2024, 1, 1), date(2024, 1, 6));

        assert_eq!(stats.cycle, "Team A");
        assert_eq!(stats.total_days, 6);
        assert_eq!(stats.total_hours, 32.0);
        let names: Vec<&str> = stats.shifts.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Day", "Night", "Off"]);
        assert!(stats.shifts.iter().all(|s| s.days == 2));
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_schedule_csv(ctx: &mut ExportTestContext) {
        let path = ctx.temp_dir.path().join("schedule.csv");
        let exporter = Exporter::new(ExportFormat::Csv, Some(path.clone()));
        exporter
            .export(ExportData::Schedule, &ctx.cycle, date(2024, 1, 1), date(2024, 1, 3))
            .unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Date,Weekday,Shift,Start,End,Hours,Color,Overridden");
        assert_eq!(lines[1], "2024-01-01,Mon,Day,08:00,16:00,8.00,#ffcc00,false");
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_json_export(ctx: &mut ExportTestContext) {
        let schedule_path = ctx.temp_dir.path().join("schedule.json");
        Exporter::new(ExportFormat::Json, Some(schedule_path.clone()))
            .export(ExportData::Schedule, &ctx.cycle, date(2024, 1, 1), date(2024, 1, 31))
            .unwrap();
        let days: Vec<ExportDay> = serde_json::from_str(&fs::read_to_string(&schedule_path).unwrap()).unwrap();
        assert_eq!(days.len(), 31);

        let stats_path = ctx.temp_dir.path().join("stats.json");
        Exporter::new(ExportFormat::Json, Some(stats_path.clone()))
            .export(ExportData::Stats, &ctx.cycle, date(2024, 1, 1), date(2024, 1, 31))
            .unwrap();
        let stats: ExportStats = serde_json::from_str(&fs::read_to_string(&stats_path).unwrap()).unwrap();
        assert_eq!(stats.total_days, 31);
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_combined_csv(ctx: &mut ExportTestContext) {
        let path = ctx.temp_dir.path().join("all.csv");
        Exporter::new(ExportFormat::Csv, Some(path.clone()))
            .export(ExportData::All, &ctx.cycle, date(2024, 1, 1), date(2024, 1, 6))
            .unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("SCHEDULE\n"));
        assert!(content.contains("STATISTICS"));
        assert!(content.contains("Total Days,6"));
        assert!(content.contains("Total Hours,32.00"));
    }

    #[test]
    fn test_default_output_name() {
        let exporter = Exporter::new(ExportFormat::Json, None);
        let name = exporter.output_path().to_string_lossy().to_string();

        assert!(name.starts_with("rota_export_"));
        assert!(name.ends_with(".json"));
    }
}
