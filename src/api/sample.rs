//! Sample data feed
//! Used when no backend is reachable and in CI environments where real
//! network connections are restricted

use anyhow::Result;
use async_trait::async_trait;
use chrono::Local;
use std::time::Duration;
use tokio::time::sleep;

use super::feed::DataFeed;
use super::types::{
    CorrelationSummary, NewsItem, PerformanceMetrics, Sentiment, SentimentCounts,
    SentimentSummary, Timeline,
};

/// Canned data feed mirroring one week of pipeline output
pub struct SampleFeed;

impl SampleFeed {
    pub fn new() -> Self {
        Self
    }

    /// The canonical sample week used across the dashboard
    pub fn sample_timeline() -> Timeline {
        Timeline {
            labels: ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"]
                .into_iter()
                .map(str::to_string)
                .collect(),
            sentiment: vec![0.15, -0.08, 0.23, 0.31, -0.12, 0.19, 0.23],
            sp500: vec![0.8, -0.5, 1.2, 1.8, -0.7, 0.9, 1.1],
        }
    }

    fn sample_news() -> Vec<NewsItem> {
        vec![
            NewsItem {
                title: "Fed Signals Potential Rate Cut Amid Economic Concerns".to_string(),
                sentiment: Sentiment::Negative,
                source: "Reuters".to_string(),
                time: "2 hours ago".to_string(),
                url: None,
            },
            NewsItem {
                title: "Tech Stocks Rally on Strong Earnings Reports".to_string(),
                sentiment: Sentiment::Positive,
                source: "Bloomberg".to_string(),
                time: "4 hours ago".to_string(),
                url: None,
            },
            NewsItem {
                title: "Market Volatility Expected to Continue".to_string(),
                sentiment: Sentiment::Neutral,
                source: "CNBC".to_string(),
                time: "6 hours ago".to_string(),
                url: None,
            },
            NewsItem {
                title: "Consumer Confidence Index Shows Improvement".to_string(),
                sentiment: Sentiment::Positive,
                source: "WSJ".to_string(),
                time: "8 hours ago".to_string(),
                url: None,
            },
        ]
    }
}

impl Default for SampleFeed {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DataFeed for SampleFeed {
    async fn fetch_sentiment_summary(
        &self,
        _date_range: u32,
        _source: &str,
    ) -> Result<Option<SentimentSummary>> {
        // Simulate API delay
        sleep(Duration::from_millis(10)).await;

        Ok(Some(SentimentSummary {
            current_sentiment: 0.23,
            sentiment_counts: SentimentCounts {
                positive: 142,
                neutral: 89,
                negative: 76,
            },
            timeline: Self::sample_timeline(),
        }))
    }

    async fn fetch_correlation_data(&self, _date_range: u32) -> Result<Option<CorrelationSummary>> {
        sleep(Duration::from_millis(10)).await;

        Ok(Some(CorrelationSummary {
            correlation_percentage: 68,
            fear_index: 34,
            matches: Self::sample_timeline(),
        }))
    }

    async fn fetch_recent_news(&self, limit: usize, source: &str) -> Result<Vec<NewsItem>> {
        sleep(Duration::from_millis(10)).await;

        let mut items = Self::sample_news();
        if source != "all" {
            items.retain(|item| item.source.eq_ignore_ascii_case(source));
        }
        items.truncate(limit);
        Ok(items)
    }

    async fn fetch_performance_metrics(&self) -> Result<Option<PerformanceMetrics>> {
        sleep(Duration::from_millis(5)).await;

        Ok(Some(PerformanceMetrics {
            articles_analyzed: 234,
            processing_speed: "1.2s avg".to_string(),
            active_sources: "7/9".to_string(),
            last_update: Local::now().format("%H:%M:%S").to_string(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sample_sentiment_summary() {
        let feed = SampleFeed::new();
        let summary = feed
            .fetch_sentiment_summary(30, "all")
            .await
            .unwrap()
            .unwrap();

        assert!((summary.current_sentiment - 0.23).abs() < f64::EPSILON);
        assert_eq!(summary.sentiment_counts.total(), 307);
        assert!(summary.timeline.is_render_ready());
        assert_eq!(summary.timeline.len(), 7);
    }

    #[tokio::test]
    async fn test_sample_news_limit_and_filter() {
        let feed = SampleFeed::new();

        let all = feed.fetch_recent_news(10, "all").await.unwrap();
        assert_eq!(all.len(), 4);

        let limited = feed.fetch_recent_news(2, "all").await.unwrap();
        assert_eq!(limited.len(), 2);

        let reuters = feed.fetch_recent_news(10, "Reuters").await.unwrap();
        assert_eq!(reuters.len(), 1);
        assert_eq!(reuters[0].sentiment, Sentiment::Negative);
    }

    #[tokio::test]
    async fn test_sample_correlation() {
        let feed = SampleFeed::new();
        let correlation = feed.fetch_correlation_data(30).await.unwrap().unwrap();
        assert_eq!(correlation.correlation_percentage, 68);
        assert_eq!(correlation.fear_index, 34);
        assert!(correlation.matches.is_render_ready());
    }
}
