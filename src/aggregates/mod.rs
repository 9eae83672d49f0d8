use chrono::{DateTime, Local, Utc};

use crate::models::{ActivityView, ItemLogEntry};
use crate::timeutil::{format_time_elapsed, start_of_week_ms};

/// All-time score for an item, summed over activity-view rows whose
/// denormalized `title` matches. The match is by display title, not id, so
/// items sharing a title pool their scores.
pub fn cumulative_score(activity: &[ActivityView], title: &str) -> f64 {
    activity
        .iter()
        .filter(|row| row.title.as_deref() == Some(title))
        .map(|row| row.score)
        .sum()
}

/// Weekly progress display value: net score since the most recent Sunday
/// midnight, scaled and inverted into `100 - round(net/7 * 100)`. Zero
/// activity yields 100; the result is deliberately unclamped and can leave
/// [0, 100] when scores diverge from the assumed one-per-day range.
pub fn weekly_progress(log: &[ItemLogEntry], now: DateTime<Local>) -> i64 {
    let start_of_week = start_of_week_ms(now);
    let net: f64 = log
        .iter()
        .map(|entry| {
            let ts = entry.timestamp.parse::<i64>().unwrap_or(0);
            if ts >= start_of_week {
                entry.score
            } else {
                0.0
            }
        })
        .sum();
    100 - ((net / 7.0) * 100.0).round() as i64
}

/// Timestamp of the most recent "click" row, if any. Rows are scanned in
/// the order given; the item-activity query already sorts newest first.
pub fn last_click_timestamp(log: &[ItemLogEntry]) -> Option<&str> {
    log.iter()
        .find(|entry| entry.activity_type == "click")
        .map(|entry| entry.timestamp.as_str())
}

/// Human-readable gap since the last click, or the "never" sentinel.
pub fn time_since_last_click(log: &[ItemLogEntry], now: DateTime<Utc>) -> String {
    format_time_elapsed(last_click_timestamp(log), now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeutil::NEVER_CLICKED;
    use chrono::TimeZone;

    fn view_row(title: &str, score: f64) -> ActivityView {
        ActivityView {
            timestamp: "1700000000000".to_string(),
            title: Some(title.to_string()),
            activity_type: "click".to_string(),
            score,
            category_name: None,
            activity_json: None,
            item_id: None,
        }
    }

    fn log_entry(timestamp: i64, activity_type: &str, score: f64) -> ItemLogEntry {
        ItemLogEntry {
            timestamp: timestamp.to_string(),
            activity_type: activity_type.to_string(),
            score,
        }
    }

    #[test]
    fn test_cumulative_score_matches_by_title() {
        let activity = vec![
            view_row("glass-water", 1.0),
            view_row("glass-water", 1.0),
            view_row("glass-water", -1.0),
            view_row("person-running", 5.0),
        ];
        assert_eq!(cumulative_score(&activity, "glass-water"), 1.0);
        assert_eq!(cumulative_score(&activity, "person-running"), 5.0);
        assert_eq!(cumulative_score(&activity, "pen"), 0.0);
    }

    #[test]
    fn test_weekly_progress_no_activity_is_100() {
        let now = Local.with_ymd_and_hms(2025, 6, 18, 12, 0, 0).unwrap();
        assert_eq!(weekly_progress(&[], now), 100);
    }

    #[test]
    fn test_weekly_progress_net_seven_is_zero() {
        let now = Local.with_ymd_and_hms(2025, 6, 18, 12, 0, 0).unwrap();
        let ts = now.timestamp_millis();
        let log: Vec<ItemLogEntry> =
            (0..7).map(|_| log_entry(ts, "click", 1.0)).collect();
        assert_eq!(weekly_progress(&log, now), 0);
    }

    #[test]
    fn test_weekly_progress_net_minus_seven_is_200() {
        let now = Local.with_ymd_and_hms(2025, 6, 18, 12, 0, 0).unwrap();
        let ts = now.timestamp_millis();
        let log: Vec<ItemLogEntry> =
            (0..7).map(|_| log_entry(ts, "unclick", -1.0)).collect();
        assert_eq!(weekly_progress(&log, now), 200);
    }

    #[test]
    fn test_weekly_progress_ignores_rows_before_sunday() {
        let now = Local.with_ymd_and_hms(2025, 6, 18, 12, 0, 0).unwrap();
        let before_week = start_of_week_ms(now) - 1;
        let in_week = start_of_week_ms(now) + 1;

        let log = vec![
            log_entry(before_week, "click", 1.0),
            log_entry(in_week, "click", 1.0),
        ];
        // Only the in-week +1 counts: 100 - round(1/7 * 100) = 86.
        assert_eq!(weekly_progress(&log, now), 86);
    }

    #[test]
    fn test_last_click_skips_unclicks() {
        let log = vec![
            log_entry(1_700_000_300_000, "unclick", -1.0),
            log_entry(1_700_000_200_000, "click", 1.0),
            log_entry(1_700_000_100_000, "click", 1.0),
        ];
        assert_eq!(last_click_timestamp(&log), Some("1700000200000"));
    }

    #[test]
    fn test_time_since_last_click_sentinel_when_no_clicks() {
        let log = vec![log_entry(1_700_000_000_000, "unclick", -1.0)];
        assert_eq!(time_since_last_click(&log, Utc::now()), NEVER_CLICKED);
        assert_eq!(time_since_last_click(&[], Utc::now()), NEVER_CLICKED);
    }

    #[test]
    fn test_time_since_last_click_unparseable_degrades() {
        let log = vec![ItemLogEntry {
            timestamp: "garbage".to_string(),
            activity_type: "click".to_string(),
            score: 1.0,
        }];
        assert_eq!(time_since_last_click(&log, Utc::now()), NEVER_CLICKED);
    }
}
