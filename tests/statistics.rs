#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};
    use rota::libs::calendar::add_days;
    use rota::libs::color::Color;
    use rota::libs::cycle::ShiftCycle;
    use rota::libs::daily_override::DailyOverride;
    use rota::libs::shift::ShiftType;
    use rota::libs::statistics::{aggregate, RangeKind, StatsRange};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn three_day_cycle() -> ShiftCycle {
        let shifts = vec![
            ShiftType::new("Day", Color::BLUE, time(8, 0), time(16, 0)),
            ShiftType::new("Night", Color::BLUE, time(22, 0), time(6, 0)),
            ShiftType::new("Off", Color::BLUE, time(0, 0), time(0, 0)),
        ];
        ShiftCycle::new("Team A", date(2024, 1, 1), shifts, vec![0, 1, 2]).unwrap()
    }

    #[test]
    fn test_aggregate_six_days() {
        let cycle = three_day_cycle();
        let stats = aggregate(&cycle, date(2024, 1, 1), date(2024, 1, 6));

        assert_eq!(stats.total_days, 6);
        assert_eq!(stats.total_hours, 32.0);
        assert_eq!(stats.shift_counts.get("Day"), Some(&2));
        assert_eq!(stats.shift_counts.get("Night"), Some(&2));
        assert_eq!(stats.shift_counts.get("Off"), Some(&2));
        assert_eq!(stats.shift_counts.len(), 3);
        assert_eq!(stats.hours_by_shift.get("Night"), Some(&16.0));
        assert!((stats.average_hours_per_day() - 32.0 / 6.0).abs() < 1e-9);
        assert!((stats.share("Day") - 100.0 / 3.0).abs() < 1e-9);
        assert_eq!(stats.share("Missing"), 0.0);
    }

    #[test]
    fn test_empty_ranges() {
        let cycle = three_day_cycle();

        let before = aggregate(&cycle, date(2023, 1, 1), date(2023, 12, 31));
        assert_eq!(before.total_days, 0);
        assert_eq!(before.total_hours, 0.0);
        assert!(before.shift_counts.is_empty());
        assert_eq!(before.average_hours_per_day(), 0.0);

        let reversed = aggregate(&cycle, date(2024, 1, 6), date(2024, 1, 1));
        assert_eq!(reversed.total_days, 0);
    }

    #[test]
    fn test_single_day_matches_resolution() {
        let cycle = three_day_cycle();
        for offset in -3..10 {
            let day = add_days(date(2024, 1, 1), offset).unwrap();
            let stats = aggregate(&cycle, day, day);
            assert!(stats.total_days <= 1);
            assert_eq!(stats.total_days == 1, cycle.resolve_shift(day).is_some());
        }
    }

    #[test]
    fn test_hours_are_additive() {
        let mut cycle = three_day_cycle();
        cycle
            .set_override(DailyOverride::new(2).with_times(Some(time(23, 0)), Some(time(5, 30))))
            .unwrap();

        let from = date(2023, 12, 25);
        let to = date(2024, 2, 10);
        let whole = aggregate(&cycle, from, to).total_hours;

        let mut sum = 0.0;
        let mut day = from;
        while day <= to {
            sum += aggregate(&cycle, day, day).total_hours;
            day = add_days(day, 1).unwrap();
        }
        assert!((whole - sum).abs() < 1e-9);
    }

    #[test]
    fn test_override_time_recomputes_hours() {
        let mut cycle = three_day_cycle();
        cycle
            .set_override(DailyOverride::new(1).with_times(Some(time(8, 0)), Some(time(12, 0))))
            .unwrap();

        let stats = aggregate(&cycle, date(2024, 1, 1), date(2024, 1, 3));
        assert_eq!(stats.total_hours, 4.0 + 8.0);
        assert_eq!(stats.hours_by_shift.get("Day"), Some(&4.0));
    }

    #[test]
    fn test_override_shift_selection_does_not_change_counts() {
        let mut cycle = three_day_cycle();
        let off = cycle.shifts[2].id;
        cycle.set_override(DailyOverride::new(2).with_shift(off)).unwrap();

        let stats = aggregate(&cycle, date(2024, 1, 1), date(2024, 1, 3));
        assert_eq!(stats.shift_counts.get("Night"), Some(&1));
        assert_eq!(stats.shift_counts.get("Off"), Some(&1));
    }

    #[test]
    fn test_counts_are_keyed_by_name() {
        let shifts = vec![
            ShiftType::new("Day", Color::BLUE, time(8, 0), time(16, 0)),
            ShiftType::new("Day", Color::BLUE, time(10, 0), time(14, 0)),
        ];
        let cycle = ShiftCycle::new("Aliased", date(2024, 1, 1), shifts, vec![0, 1]).unwrap();

        let stats = aggregate(&cycle, date(2024, 1, 1), date(2024, 1, 4));
        assert_eq!(stats.shift_counts.len(), 1);
        assert_eq!(stats.shift_counts.get("Day"), Some(&4));
        assert_eq!(stats.total_hours, 8.0 + 4.0 + 8.0 + 4.0);
    }

    #[test]
    fn test_range_bounds() {
        assert_eq!(
            StatsRange::Month { year: 2024, month: 2 }.bounds(),
            Some((date(2024, 2, 1), date(2024, 2, 29)))
        );
        assert_eq!(
            StatsRange::Month { year: 2023, month: 12 }.bounds(),
            Some((date(2023, 12, 1), date(2023, 12, 31)))
        );
        assert_eq!(StatsRange::Month { year: 2023, month: 13 }.bounds(), None);
        assert_eq!(StatsRange::Year(2024).bounds(), Some((date(2024, 1, 1), date(2024, 12, 31))));

        let custom = StatsRange::Custom {
            from: date(2024, 3, 5),
            to: date(2024, 3, 1),
        };
        assert_eq!(custom.bounds(), Some((date(2024, 3, 5), date(2024, 3, 1))));
    }

    #[test]
    fn test_range_around_today() {
        let today = date(2024, 7, 19);

        assert_eq!(StatsRange::around(RangeKind::Month, today), StatsRange::Month { year: 2024, month: 7 });
        assert_eq!(StatsRange::around(RangeKind::Year, today), StatsRange::Year(2024));
        assert_eq!(RangeKind::default(), RangeKind::Month);
    }
}
