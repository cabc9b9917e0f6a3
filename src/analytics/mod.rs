//! Sentiment analytics and display formatting
//!
//! Pure data transforms between raw pipeline records and the shapes
//! the dashboard renders. No I/O here; everything is testable in
//! isolation.

use chrono::{DateTime, NaiveDate, Utc};

use crate::api::types::{DailySentimentRecord, MarketReturnRecord, Timeline};

/// Parallel label/score/date sequences shaped from raw daily records
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineParts {
    pub labels: Vec<String>,
    pub sentiment: Vec<f64>,
    pub dates: Vec<String>,
}

/// Derive the 0-100 fear index from a sequence of sentiment scores.
///
/// `fear = clamp(round((1 - mean(scores)) * 50), 0, 100)` — lower mean
/// sentiment means higher fear. An empty sequence reads as neutral
/// mood (50).
pub fn calculate_fear_index(scores: &[f64]) -> u8 {
    if scores.is_empty() {
        return 50;
    }

    let mean = scores.iter().sum::<f64>() / scores.len() as f64;
    ((1.0 - mean) * 50.0).round().clamp(0.0, 100.0) as u8
}

/// Mood label for a fear index value
pub fn fear_index_label(fear_index: u8) -> &'static str {
    match fear_index {
        0..=19 => "Extreme Greed",
        20..=39 => "Greed",
        40..=59 => "Moderate Fear",
        60..=79 => "Fear",
        _ => "Extreme Fear",
    }
}

/// Format a sentiment score with explicit sign and two decimals
pub fn format_sentiment_score(score: f64) -> String {
    // Normalize -0.0 so the zero case always reads "+0.00"
    let score = if score == 0.0 { 0.0 } else { score };
    if score >= 0.0 {
        format!("+{:.2}", score)
    } else {
        format!("{:.2}", score)
    }
}

/// Format a percentage return with two decimals and a trailing `%`
pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", value)
}

/// Human-readable relative time between `timestamp` and `now`
pub fn format_time_ago(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - timestamp).num_seconds().max(0);

    if seconds < 60 {
        "Just now".to_string()
    } else if seconds < 3600 {
        format!("{} min ago", seconds / 60)
    } else if seconds < 86_400 {
        format!("{} hours ago", seconds / 3600)
    } else {
        format!("{} days ago", seconds / 86_400)
    }
}

/// Three-letter weekday label for a "YYYY-MM-DD" date string.
///
/// Unparseable dates fall back to the raw string so a bad record shows
/// up on the axis instead of shifting the alignment.
pub fn weekday_label(date: &str) -> String {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|day| day.format("%a").to_string())
        .unwrap_or_else(|_| date.to_string())
}

/// Shape raw per-day sentiment records into parallel sequences
pub fn process_sentiment_timeline(records: &[DailySentimentRecord]) -> TimelineParts {
    TimelineParts {
        labels: records.iter().map(|r| weekday_label(&r.date)).collect(),
        sentiment: records.iter().map(|r| r.average_score).collect(),
        dates: records.iter().map(|r| r.date.clone()).collect(),
    }
}

/// Inner-join sentiment and market-return records on exact date string.
///
/// Sentiment days with no matching return day are dropped entirely;
/// return fractions are scaled to percent.
pub fn process_correlation_data(
    sentiment: &[DailySentimentRecord],
    returns: &[MarketReturnRecord],
) -> Timeline {
    let mut timeline = Timeline {
        labels: Vec::new(),
        sentiment: Vec::new(),
        sp500: Vec::new(),
    };

    for record in sentiment {
        if let Some(matched) = returns.iter().find(|r| r.date == record.date) {
            timeline.labels.push(weekday_label(&record.date));
            timeline.sentiment.push(record.average_score);
            timeline.sp500.push(matched.daily_return * 100.0);
        }
    }

    timeline
}
