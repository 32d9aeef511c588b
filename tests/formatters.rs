#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveTime};
    use rota::libs::formatter::{format_duration, format_hours, format_percent, format_time, format_window};

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_format_hours() {
        assert_eq!(format_hours(8.0), "8h");
        assert_eq!(format_hours(7.5), "7.5h");
        assert_eq!(format_hours(0.25), "0.25h");
        assert_eq!(format_hours(0.0), "0h");
        assert_eq!(format_hours(160.0), "160h");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(&Duration::minutes(90)), "01:30");
        assert_eq!(format_duration(&Duration::hours(12)), "12:00");
        assert_eq!(format_duration(&Duration::minutes(-5)), "00:00");
    }

    #[test]
    fn test_format_window() {
        assert_eq!(format_time(time(6, 5)), "06:05");
        assert_eq!(format_window(time(8, 0), time(16, 0)), "08:00-16:00");
        assert_eq!(format_window(time(22, 0), time(6, 0)), "22:00-06:00 (+1)");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(33.3333), "33.3%");
        assert_eq!(format_percent(100.0), "100.0%");
    }
}
