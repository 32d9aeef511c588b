#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Weekday};
    use rota::libs::alarm::{Alarm, Alarms, Repeat, Sound};
    use rota::libs::color::Color;
    use rota::libs::cycle::ShiftCycle;
    use rota::libs::daily_override::DailyOverride;
    use rota::libs::shift::{ShiftType, ShiftTypeId};
    use std::path::PathBuf;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_time(time(h, min))
    }

    fn three_day_cycle() -> ShiftCycle {
        let shifts = vec![
            ShiftType::new("Day", Color::BLUE, time(8, 0), time(16, 0)),
            ShiftType::new("Night", Color::BLUE, time(22, 0), time(6, 0)),
            ShiftType::new("Off", Color::BLUE, time(0, 0), time(0, 0)),
        ];
        ShiftCycle::new("Team A", NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), shifts, vec![0, 1, 2]).unwrap()
    }

    #[test]
    fn test_once_fires_today_or_tomorrow() {
        let alarm = Alarm::new(time(7, 0), Repeat::Once);

        assert_eq!(alarm.next_occurrences(at(2024, 1, 1, 6, 0), None, 5), vec![at(2024, 1, 1, 7, 0)]);
        assert_eq!(alarm.next_occurrences(at(2024, 1, 1, 7, 0), None, 5), vec![at(2024, 1, 2, 7, 0)]);
        assert_eq!(alarm.next_occurrences(at(2024, 1, 1, 23, 0), None, 5), vec![at(2024, 1, 2, 7, 0)]);
    }

    #[test]
    fn test_weekly() {
        let alarm = Alarm::new(
            time(6, 30),
            Repeat::Weekly {
                days: vec![Weekday::Mon, Weekday::Thu],
            },
        );

        // 2024-01-01 is a Monday.
        let next = alarm.next_occurrences(at(2024, 1, 1, 7, 0), None, 3);
        assert_eq!(next, vec![at(2024, 1, 4, 6, 30), at(2024, 1, 8, 6, 30), at(2024, 1, 11, 6, 30)]);

        let empty = Alarm::new(time(6, 30), Repeat::Weekly { days: vec![] });
        assert!(empty.next_occurrences(at(2024, 1, 1, 7, 0), None, 3).is_empty());
    }

    #[test]
    fn test_shift_alarm_follows_rotation() {
        let cycle = three_day_cycle();
        let night = cycle.shifts[1].id;
        let alarm = Alarm::new(time(20, 0), Repeat::Shift { shift_type_id: night });

        let next = alarm.next_occurrences(at(2024, 1, 1, 0, 0), Some(&cycle), 3);
        assert_eq!(next, vec![at(2024, 1, 2, 20, 0), at(2024, 1, 5, 20, 0), at(2024, 1, 8, 20, 0)]);

        assert!(alarm.next_occurrences(at(2024, 1, 1, 0, 0), None, 3).is_empty());
    }

    #[test]
    fn test_shift_alarm_uses_effective_shift() {
        let mut cycle = three_day_cycle();
        let (night, off) = (cycle.shifts[1].id, cycle.shifts[2].id);
        cycle.set_override(DailyOverride::new(2).with_shift(off)).unwrap();

        let night_alarm = Alarm::new(time(20, 0), Repeat::Shift { shift_type_id: night });
        assert!(night_alarm.next_occurrences(at(2024, 1, 1, 0, 0), Some(&cycle), 3).is_empty());

        let off_alarm = Alarm::new(time(10, 0), Repeat::Shift { shift_type_id: off });
        let next = off_alarm.next_occurrences(at(2024, 1, 1, 0, 0), Some(&cycle), 2);
        assert_eq!(next, vec![at(2024, 1, 2, 10, 0), at(2024, 1, 3, 10, 0)]);
    }

    #[test]
    fn test_before_cycle_start_is_skipped() {
        let cycle = three_day_cycle();
        let day = cycle.shifts[0].id;
        let alarm = Alarm::new(time(7, 0), Repeat::Shift { shift_type_id: day });

        let next = alarm.next_occurrences(at(2023, 12, 30, 12, 0), Some(&cycle), 1);
        assert_eq!(next, vec![at(2024, 1, 1, 7, 0)]);
    }

    #[test]
    fn test_disabled_alarm_never_fires() {
        let mut alarm = Alarm::new(time(7, 0), Repeat::Once);
        alarm.enabled = false;

        assert!(alarm.next_occurrences(at(2024, 1, 1, 6, 0), None, 5).is_empty());
        assert!(Alarm::new(time(7, 0), Repeat::Once)
            .next_occurrences(at(2024, 1, 1, 6, 0), None, 0)
            .is_empty());
    }

    struct AlarmTestContext {
        _temp_dir: TempDir,
        path: PathBuf,
    }

    impl TestContext for AlarmTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let path = temp_dir.path().join("alarms.json");
            AlarmTestContext { _temp_dir: temp_dir, path }
        }
    }

    #[test_context(AlarmTestContext)]
    #[test]
    fn test_alarms_file(ctx: &mut AlarmTestContext) {
        let mut alarms = Alarms::load_from(&ctx.path).unwrap();
        assert!(alarms.list().is_empty());

        let wake = alarms.add(Alarm::new(time(6, 0), Repeat::Once).with_label("wake up").with_sound(Sound::Bell));
        let gone = ShiftTypeId::new();
        alarms.add(Alarm::new(time(21, 0), Repeat::Shift { shift_type_id: gone }));
        alarms.save_to(&ctx.path).unwrap();

        let mut loaded = Alarms::load_from(&ctx.path).unwrap();
        assert_eq!(loaded.list(), alarms.list());
        assert_eq!(loaded.list()[0].sound, Sound::Bell);
        assert_eq!(loaded.orphaned(&[]).count(), 1);
        assert_eq!(loaded.orphaned(&[gone]).count(), 0);

        assert_eq!(loaded.toggle(wake), Some(false));
        assert_eq!(loaded.toggle(wake), Some(true));
        assert_eq!(loaded.remove(wake).map(|a| a.time), Some(time(6, 0)));
        assert!(loaded.remove(wake).is_none());
        assert_eq!(loaded.list().len(), 1);
    }

    #[test_context(AlarmTestContext)]
    #[test]
    fn test_missing_sound_defaults(ctx: &mut AlarmTestContext) {
        let json = r#"[{
            "id": "67e55044-10b1-426f-9247-bb680e5fe0c8",
            "time": "07:15:00",
            "label": null,
            "repeat": { "kind": "weekly", "days": ["Mon", "Fri"] },
            "enabled": true
        }]"#;
        std::fs::write(&ctx.path, json).unwrap();

        let alarms = Alarms::load_from(&ctx.path).unwrap();
        let alarm = &alarms.list()[0];
        assert_eq!(alarm.sound, Sound::Default);
        assert_eq!(
            alarm.repeat,
            Repeat::Weekly {
                days: vec![Weekday::Mon, Weekday::Fri]
            }
        );
    }
}
