#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};
    use rota::db::db::Db;
    use rota::db::events::Events;
    use rota::libs::event::Event;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, min, 0).unwrap()
    }

    struct EventTestContext {
        _temp_dir: TempDir,
        events: Events,
    }

    impl TestContext for EventTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db = Db::open(&temp_dir.path().join("rota.db")).unwrap();
            EventTestContext {
                _temp_dir: temp_dir,
                events: Events::from_db(db),
            }
        }
    }

    #[test_context(EventTestContext)]
    #[test]
    fn test_insert_and_get(ctx: &mut EventTestContext) {
        let event = Event::new("Dentist", at(2024, 3, 5, 14, 30))
            .with_location("Main St 4")
            .with_notes("bring card");
        let id = ctx.events.insert(&event).unwrap();

        let stored = ctx.events.get(id).unwrap().unwrap();
        assert_eq!(stored.id, Some(id));
        assert_eq!(stored.title, "Dentist");
        assert_eq!(stored.timestamp, at(2024, 3, 5, 14, 30));
        assert_eq!(stored.location.as_deref(), Some("Main St 4"));
        assert_eq!(stored.notes.as_deref(), Some("bring card"));
        assert!(!stored.completed);
        assert_eq!(stored.date(), NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());

        assert!(ctx.events.get(id + 100).unwrap().is_none());
    }

    #[test_context(EventTestContext)]
    #[test]
    fn test_fetch_by_day_and_range(ctx: &mut EventTestContext) {
        ctx.events.insert(&Event::new("Late", at(2024, 3, 5, 20, 0))).unwrap();
        ctx.events.insert(&Event::new("Early", at(2024, 3, 5, 7, 0))).unwrap();
        ctx.events.insert(&Event::new("Next day", at(2024, 3, 6, 9, 0))).unwrap();
        ctx.events.insert(&Event::new("Later", at(2024, 3, 20, 9, 0))).unwrap();

        let day = ctx.events.fetch_for_date(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()).unwrap();
        let titles: Vec<&str> = day.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Early", "Late"]);

        let range = ctx
            .events
            .fetch_between(
                NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
                NaiveDate::from_ymd_opt(2024, 3, 6).unwrap(),
            )
            .unwrap();
        assert_eq!(range.len(), 3);
    }

    #[test_context(EventTestContext)]
    #[test]
    fn test_upcoming(ctx: &mut EventTestContext) {
        ctx.events.insert(&Event::new("Past", at(2024, 3, 1, 9, 0))).unwrap();
        ctx.events.insert(&Event::new("Soon", at(2024, 3, 5, 12, 0))).unwrap();
        ctx.events.insert(&Event::new("Later", at(2024, 3, 9, 12, 0))).unwrap();
        ctx.events.insert(&Event::new("Much later", at(2024, 4, 1, 12, 0))).unwrap();

        let upcoming = ctx.events.upcoming(at(2024, 3, 5, 11, 59), 2).unwrap();
        let titles: Vec<&str> = upcoming.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Soon", "Later"]);
    }

    #[test_context(EventTestContext)]
    #[test]
    fn test_complete_and_delete(ctx: &mut EventTestContext) {
        let id = ctx.events.insert(&Event::new("Gym", at(2024, 3, 5, 18, 0))).unwrap();

        ctx.events.set_completed(id, true).unwrap();
        assert!(ctx.events.get(id).unwrap().unwrap().completed);
        ctx.events.set_completed(id, false).unwrap();
        assert!(!ctx.events.get(id).unwrap().unwrap().completed);

        ctx.events.delete(id).unwrap();
        assert!(ctx.events.get(id).unwrap().is_none());
        assert!(ctx.events.delete(id).is_err());
        assert!(ctx.events.set_completed(id, true).is_err());
    }

    #[test]
    fn test_new_event_drops_sub_seconds() {
        let moment = at(2024, 3, 5, 14, 30) + chrono::Duration::milliseconds(250);
        let event = Event::new("Call", moment);

        assert_eq!(event.timestamp, at(2024, 3, 5, 14, 30));
        assert!(event.id.is_none());
    }
}
