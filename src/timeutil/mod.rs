use chrono::{DateTime, Datelike, Days, Local, TimeZone, Utc};

/// Sentinel for items that have never been clicked, or whose last-click
/// timestamp cannot be parsed.
pub const NEVER_CLICKED: &str = "Never clicked";

/// Most recent week boundary as epoch milliseconds: the most recent Sunday
/// at local midnight, or today's midnight when "now" is itself a Sunday.
pub fn start_of_week_ms(now: DateTime<Local>) -> i64 {
    let days_back = now.weekday().num_days_from_sunday() as u64;
    let sunday = now.date_naive() - Days::new(days_back);
    let midnight = sunday.and_hms_opt(0, 0, 0).unwrap();

    // Local midnight can be skipped or doubled by a DST transition; take the
    // earliest valid instant, falling back to UTC.
    midnight
        .and_local_timezone(Local)
        .earliest()
        .map(|dt| dt.timestamp_millis())
        .unwrap_or_else(|| midnight.and_utc().timestamp_millis())
}

/// Human-readable gap between a string-encoded epoch-ms timestamp and now.
/// Null or unparseable input degrades to the sentinel rather than failing.
pub fn format_time_elapsed(timestamp: Option<&str>, now: DateTime<Utc>) -> String {
    let Some(raw) = timestamp else {
        return NEVER_CLICKED.to_string();
    };
    let Ok(ms) = raw.trim().parse::<i64>() else {
        return NEVER_CLICKED.to_string();
    };
    let Some(then) = Utc.timestamp_millis_opt(ms).single() else {
        return NEVER_CLICKED.to_string();
    };

    let seconds = (now - then).num_seconds().max(0);
    format!("{} ago", distance_phrase(seconds))
}

fn distance_phrase(seconds: i64) -> String {
    let minutes = seconds / 60;
    let hours = minutes / 60;
    let days = hours / 24;
    let months = days / 30;

    if seconds < 30 {
        "less than a minute".to_string()
    } else if seconds < 90 {
        "1 minute".to_string()
    } else if minutes < 45 {
        format!("{} minutes", minutes)
    } else if minutes < 90 {
        "about 1 hour".to_string()
    } else if hours < 24 {
        format!("about {} hours", hours)
    } else if hours < 48 {
        "1 day".to_string()
    } else if days < 30 {
        format!("{} days", days)
    } else if days < 60 {
        "about 1 month".to_string()
    } else if days < 365 {
        format!("{} months", months)
    } else if days < 730 {
        "about 1 year".to_string()
    } else {
        format!("about {} years", days / 365)
    }
}
