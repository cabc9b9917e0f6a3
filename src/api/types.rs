//! Dashboard API data types and structures

use serde::{Deserialize, Serialize};

/// Connection status for the backend feed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Connected,
    Disconnected,
    Loading,
}

/// News article sentiment classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    /// Lowercase label as used by the backend and the score mapping
    pub fn label(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Neutral => "neutral",
            Sentiment::Negative => "negative",
        }
    }
}

/// Date-aligned parallel sequences of sentiment score and market return
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    /// Three-letter weekday labels, ordered by date
    pub labels: Vec<String>,
    /// Sentiment scores, index-aligned with labels
    pub sentiment: Vec<f64>,
    /// Market returns in percent, index-aligned with labels
    pub sp500: Vec<f64>,
}

impl Timeline {
    /// Number of aligned data points
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// A timeline may only be handed to the charts when all three
    /// sequences are non-empty and index-aligned.
    pub fn is_render_ready(&self) -> bool {
        !self.labels.is_empty()
            && self.labels.len() == self.sentiment.len()
            && self.labels.len() == self.sp500.len()
    }
}

/// Per-class article counts for the distribution strip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentCounts {
    pub positive: u32,
    pub neutral: u32,
    pub negative: u32,
}

impl SentimentCounts {
    pub fn total(&self) -> u32 {
        self.positive + self.neutral + self.negative
    }
}

/// Aggregated sentiment data for the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentSummary {
    /// Latest average sentiment score in [-1, 1]
    pub current_sentiment: f64,
    pub sentiment_counts: SentimentCounts,
    pub timeline: Timeline,
}

/// Sentiment/market correlation summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationSummary {
    /// Share of days where sentiment matched market direction, 0-100
    pub correlation_percentage: u8,
    /// Market-mood fear index, 0-100
    pub fear_index: u8,
    /// Matched sentiment/return days
    pub matches: Timeline,
}

/// Single news feed entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub sentiment: Sentiment,
    pub source: String,
    /// Relative time string, e.g. "2 hours ago"
    pub time: String,
    #[serde(default)]
    pub url: Option<String>,
}

/// Pipeline performance metrics reported by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub articles_analyzed: u32,
    pub processing_speed: String,
    /// Active sources as "used/total"
    pub active_sources: String,
    pub last_update: String,
}

/// Raw per-day sentiment record from the aggregation pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySentimentRecord {
    /// Date as "YYYY-MM-DD"
    pub date: String,
    pub average_score: f64,
}

/// Raw per-day market return record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketReturnRecord {
    /// Date as "YYYY-MM-DD"
    #[serde(rename = "Date")]
    pub date: String,
    /// Daily return as a fraction (0.008 = 0.8%)
    #[serde(rename = "Return")]
    pub daily_return: f64,
}

/// Result of one full refresh cycle
///
/// Any of the optional fields may be absent: the fetchers degrade to
/// `None`/empty on data they cannot shape, and the dashboard renders
/// whatever arrived.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardBundle {
    pub sentiment: Option<SentimentSummary>,
    pub correlation: Option<CorrelationSummary>,
    pub news: Vec<NewsItem>,
    pub performance: Option<PerformanceMetrics>,
}

/// Errors surfaced by the shared request helper
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("HTTP error {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeline_render_ready() {
        let timeline = Timeline {
            labels: vec!["Mon".to_string(), "Tue".to_string()],
            sentiment: vec![0.1, -0.2],
            sp500: vec![0.5, -0.3],
        };
        assert!(timeline.is_render_ready());

        let empty = Timeline {
            labels: vec![],
            sentiment: vec![],
            sp500: vec![],
        };
        assert!(!empty.is_render_ready());

        let misaligned = Timeline {
            labels: vec!["Mon".to_string()],
            sentiment: vec![0.1, 0.2],
            sp500: vec![0.5],
        };
        assert!(!misaligned.is_render_ready());
    }

    #[test]
    fn test_sentiment_deserializes_lowercase() {
        let item: NewsItem = serde_json::from_str(
            r#"{"title":"T","sentiment":"negative","source":"Reuters","time":"2 hours ago"}"#,
        )
        .unwrap();
        assert_eq!(item.sentiment, Sentiment::Negative);
        assert_eq!(item.url, None);
    }

    #[test]
    fn test_market_return_record_field_names() {
        let record: MarketReturnRecord =
            serde_json::from_str(r#"{"Date":"2024-03-01","Return":0.008}"#).unwrap();
        assert_eq!(record.date, "2024-03-01");
        assert!((record.daily_return - 0.008).abs() < f64::EPSILON);
    }

    #[test]
    fn test_sentiment_counts_total() {
        let counts = SentimentCounts {
            positive: 142,
            neutral: 89,
            negative: 76,
        };
        assert_eq!(counts.total(), 307);
    }
}
