//! Relative timestamps for history listings.

use chrono::{Local, TimeZone, Utc};

const MINUTE_MS: i64 = 60_000;
const HOUR_MS: i64 = 3_600_000;
const DAY_MS: i64 = 86_400_000;

/// Current time in epoch milliseconds.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Describes how long ago `timestamp_ms` was relative to `now_ms`.
///
/// Under a minute is "just now", then whole minutes, then whole hours; a day or
/// more shows the local date with hours and minutes.
pub fn format_time_ago(timestamp_ms: i64, now_ms: i64) -> String {
    let diff = now_ms - timestamp_ms;
    if diff < MINUTE_MS {
        "just now".to_string()
    } else if diff < HOUR_MS {
        format!("{} minutes ago", diff / MINUTE_MS)
    } else if diff < DAY_MS {
        format!("{} hours ago", diff / HOUR_MS)
    } else {
        match Local.timestamp_millis_opt(timestamp_ms).single() {
            Some(date) => date.format("%Y/%m/%d %H:%M").to_string(),
            None => timestamp_ms.to_string(),
        }
    }
}
