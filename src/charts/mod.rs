use chrono::{DateTime, Local, NaiveDate, TimeZone};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::ActivityView;

/// Values above this are already milliseconds; below, seconds.
const MS_THRESHOLD: i64 = 1_000_000_000_000;

/// Bar and timeline series cap at the most recent week of buckets.
const MAX_RECENT_DAYS: usize = 7;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub x: String,
    pub y: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEntry {
    pub time: String,
    pub activity_type: String,
    pub score: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TimelineDay {
    pub date: String,
    pub activities: Vec<TimelineEntry>,
}

/// Shaped series for the activity charts: full daily-score line, last-7-days
/// bars, per-day timeline, and activity-type distribution.
#[derive(Debug, Clone, Serialize)]
pub struct ChartData {
    pub line: Vec<ChartPoint>,
    pub bar: Vec<ChartPoint>,
    pub timeline: Vec<TimelineDay>,
    pub pie: Vec<ChartPoint>,
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Local>> {
    let n = raw.trim().parse::<i64>().ok()?;
    let ms = if n > MS_THRESHOLD { n } else { n * 1000 };
    Local.timestamp_millis_opt(ms).single()
}

/// Bucket activity rows into display series. Returns None when no row has a
/// parseable timestamp. Daily scores are clamped to zero for display; the
/// log itself keeps the negatives.
pub fn shape_activity(data: &[ActivityView]) -> Option<ChartData> {
    let valid: Vec<(DateTime<Local>, &ActivityView)> = data
        .iter()
        .filter_map(|row| parse_timestamp(&row.timestamp).map(|dt| (dt, row)))
        .collect();
    if valid.is_empty() {
        return None;
    }

    // Net score per local calendar day, in date order.
    let mut daily_scores: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for (dt, row) in &valid {
        *daily_scores.entry(dt.date_naive()).or_insert(0.0) += row.score;
    }

    let line: Vec<ChartPoint> = daily_scores
        .iter()
        .map(|(date, score)| ChartPoint {
            x: date.to_string(),
            y: score.max(0.0),
        })
        .collect();

    let skip = line.len().saturating_sub(MAX_RECENT_DAYS);
    let bar: Vec<ChartPoint> = line.iter().skip(skip).cloned().collect();

    let recent_dates: Vec<NaiveDate> = daily_scores
        .keys()
        .copied()
        .collect::<Vec<_>>()
        .into_iter()
        .skip(skip)
        .collect();

    let timeline: Vec<TimelineDay> = recent_dates
        .into_iter()
        .map(|date| TimelineDay {
            date: date.to_string(),
            activities: valid
                .iter()
                .filter(|(dt, _)| dt.date_naive() == date)
                .map(|(dt, row)| TimelineEntry {
                    time: dt.format("%H:%M").to_string(),
                    activity_type: row.activity_type.clone(),
                    score: row.score,
                })
                .collect(),
        })
        .collect();

    let mut type_counts: BTreeMap<&str, f64> = BTreeMap::new();
    for (_, row) in &valid {
        *type_counts.entry(row.activity_type.as_str()).or_insert(0.0) += 1.0;
    }
    let pie: Vec<ChartPoint> = type_counts
        .into_iter()
        .map(|(activity_type, count)| ChartPoint {
            x: activity_type.to_string(),
            y: count,
        })
        .collect();

    Some(ChartData {
        line,
        bar,
        timeline,
        pie,
    })
}
