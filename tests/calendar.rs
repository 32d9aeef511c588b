#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Weekday};
    use rota::libs::calendar::{add_days, days_between, month_bounds, month_grid, truncate, year_bounds, WeekStart};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_days_between_ignores_time_of_day() {
        let late = date(2024, 1, 1).and_hms_opt(23, 59, 0).unwrap();
        let early = date(2024, 1, 2).and_hms_opt(0, 1, 0).unwrap();

        assert_eq!(days_between(truncate(late), truncate(early)), 1);
        assert_eq!(days_between(date(2024, 1, 10), date(2024, 1, 1)), -9);
        assert_eq!(days_between(date(2024, 2, 28), date(2024, 3, 1)), 2);
        assert_eq!(days_between(date(2023, 2, 28), date(2023, 3, 1)), 1);
    }

    #[test]
    fn test_add_days() {
        assert_eq!(add_days(date(2024, 12, 31), 1), Some(date(2025, 1, 1)));
        assert_eq!(add_days(date(2024, 3, 1), -1), Some(date(2024, 2, 29)));
        assert_eq!(add_days(date(2024, 3, 1), 0), Some(date(2024, 3, 1)));
        assert_eq!(add_days(NaiveDate::MAX, 1), None);
    }

    #[test]
    fn test_month_and_year_bounds() {
        assert_eq!(month_bounds(2024, 2), Some((date(2024, 2, 1), date(2024, 2, 29))));
        assert_eq!(month_bounds(2023, 2), Some((date(2023, 2, 1), date(2023, 2, 28))));
        assert_eq!(month_bounds(2024, 12), Some((date(2024, 12, 1), date(2024, 12, 31))));
        assert_eq!(month_bounds(2024, 0), None);
        assert_eq!(year_bounds(2024), Some((date(2024, 1, 1), date(2024, 12, 31))));
    }

    #[test]
    fn test_month_grid_monday_start() {
        // 2024-02-01 is a Thursday.
        let grid = month_grid(2024, 2, WeekStart::Monday);

        assert_eq!(grid.len(), 3 + 29);
        assert!(grid[..3].iter().all(Option::is_none));
        assert_eq!(grid[3], Some(date(2024, 2, 1)));
        assert_eq!(grid.last().copied().flatten(), Some(date(2024, 2, 29)));
    }

    #[test]
    fn test_month_grid_sunday_start() {
        let grid = month_grid(2024, 2, WeekStart::Sunday);
        assert_eq!(grid.iter().take_while(|slot| slot.is_none()).count(), 4);

        // 2024-09-01 is a Sunday.
        let grid = month_grid(2024, 9, WeekStart::Sunday);
        assert_eq!(grid[0], Some(date(2024, 9, 1)));
        assert_eq!(month_grid(2024, 9, WeekStart::Monday)[6], Some(date(2024, 9, 1)));

        assert!(month_grid(2024, 13, WeekStart::Monday).is_empty());
    }

    #[test]
    fn test_week_headers() {
        assert_eq!(WeekStart::Monday.headers()[0], Weekday::Mon);
        assert_eq!(WeekStart::Monday.headers()[6], Weekday::Sun);
        assert_eq!(WeekStart::Sunday.headers()[0], Weekday::Sun);
        assert_eq!(WeekStart::Sunday.headers()[6], Weekday::Sat);
    }
}
