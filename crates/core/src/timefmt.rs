//! Human-facing time formatting

use chrono::{DateTime, Local, TimeZone};

/// Format elapsed time as a relative phrase ("5 minutes ago")
pub fn time_ago(timestamp: i64, now: i64) -> String {
    let seconds = now.saturating_sub(timestamp);

    if seconds < 60 {
        "just now".to_string()
    } else if seconds < 3600 {
        let minutes = seconds / 60;
        format!("{} minute{} ago", minutes, plural(minutes))
    } else if seconds < 86400 {
        let hours = seconds / 3600;
        format!("{} hour{} ago", hours, plural(hours))
    } else if seconds < 604800 {
        let days = seconds / 86400;
        format!("{} day{} ago", days, plural(days))
    } else {
        let weeks = seconds / 604800;
        format!("{} week{} ago", weeks, plural(weeks))
    }
}

/// Format a timestamp as an absolute local time ("2024-01-03 14:30:00")
pub fn format_timestamp(timestamp: i64) -> String {
    let dt: Option<DateTime<Local>> = Local.timestamp_opt(timestamp, 0).single();
    match dt {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => "unknown".to_string(),
    }
}

fn plural(n: i64) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_ago_buckets() {
        let now = 1_700_000_000;
        assert_eq!(time_ago(now, now), "just now");
        assert_eq!(time_ago(now - 59, now), "just now");
        assert_eq!(time_ago(now - 60, now), "1 minute ago");
        assert_eq!(time_ago(now - 120, now), "2 minutes ago");
        assert_eq!(time_ago(now - 3600, now), "1 hour ago");
        assert_eq!(time_ago(now - 7200, now), "2 hours ago");
        assert_eq!(time_ago(now - 86400, now), "1 day ago");
        assert_eq!(time_ago(now - 3 * 86400, now), "3 days ago");
        assert_eq!(time_ago(now - 604800, now), "1 week ago");
        assert_eq!(time_ago(now - 3 * 604800, now), "3 weeks ago");
    }

    #[test]
    fn test_time_ago_future_timestamp() {
        // A clock that moved backwards reads as "just now", never a panic.
        let now = 1_700_000_000;
        assert_eq!(time_ago(now + 500, now), "just now");
    }
}
