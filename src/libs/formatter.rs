//! Text formatting for hours, times and shift windows.

use chrono::{Duration, NaiveTime};

/// `8h`, `7.5h`, `0h`. At most two decimals, trailing zeros dropped.
pub fn format_hours(hours: f64) -> String {
    let text = format!("{:.2}", hours);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    format!("{}h", text)
}

/// `HH:MM`, clamped at zero.
pub fn format_duration(duration: &Duration) -> String {
    let hours = duration.num_hours();
    let mins = duration.num_minutes() % 60;
    format!("{:02}:{:02}", hours.max(0), mins.max(0))
}

pub fn format_time(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// `22:00-06:00 (+1)` for windows that end on the next day.
pub fn format_window(start: NaiveTime, end: NaiveTime) -> String {
    let suffix = if end < start { " (+1)" } else { "" };
    format!("{}-{}{}", format_time(start), format_time(end), suffix)
}

/// `37.5%`, one decimal.
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}
