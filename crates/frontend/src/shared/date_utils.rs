//! Utilities for date and time formatting
//!
//! Provides consistent date/time formatting across the dashboard

use chrono::{DateTime, Local, TimeZone, Utc};

/// Format an instant as DD.MM.YYYY HH:MM:SS in the given timezone
/// Example: 2024-03-15T14:02:26.123Z (UTC) -> "15.03.2024 14:02:26"
pub fn format_datetime_in<Tz: TimeZone>(timestamp: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    timestamp
        .with_timezone(tz)
        .format("%d.%m.%Y %H:%M:%S")
        .to_string()
}

/// Format an instant as DD.MM.YYYY HH:MM:SS in the browser's local time
pub fn format_datetime(timestamp: &DateTime<Utc>) -> String {
    format_datetime_in(timestamp, &Local)
}

/// Short "time since" label: "just now", "5min", "3h", "2d"
///
/// Timestamps in the future (backend clock ahead of ours) read as "just now".
pub fn format_relative(timestamp: &DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - *timestamp).num_minutes();
    if minutes < 1 {
        return "just now".to_string();
    }
    if minutes < 60 {
        return format!("{}min", minutes);
    }
    let hours = minutes / 60;
    if hours < 24 {
        return format!("{}h", hours);
    }
    format!("{}d", hours / 24)
}
