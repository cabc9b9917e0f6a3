//! Data feed abstraction over the live backend and the sample data set

use anyhow::Result;
use async_trait::async_trait;
use tracing::warn;

use super::rest::ApiClient;
use super::types::{CorrelationSummary, NewsItem, PerformanceMetrics, SentimentSummary};

/// The four independent fetch operations driving a refresh cycle.
///
/// Implementations swallow their own shape/decode problems and degrade
/// to `Ok(None)` / `Ok(vec![])`; only transport-level failures from the
/// shared request helper propagate as errors. Callers must treat `None`
/// as a valid, expected value for any of the four results.
#[async_trait]
pub trait DataFeed: Send + Sync {
    async fn fetch_sentiment_summary(
        &self,
        date_range: u32,
        source: &str,
    ) -> Result<Option<SentimentSummary>>;

    async fn fetch_correlation_data(&self, date_range: u32) -> Result<Option<CorrelationSummary>>;

    async fn fetch_recent_news(&self, limit: usize, source: &str) -> Result<Vec<NewsItem>>;

    async fn fetch_performance_metrics(&self) -> Result<Option<PerformanceMetrics>>;
}

/// Live feed backed by the REST client
pub struct RestFeed {
    client: ApiClient,
}

impl RestFeed {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DataFeed for RestFeed {
    async fn fetch_sentiment_summary(
        &self,
        date_range: u32,
        source: &str,
    ) -> Result<Option<SentimentSummary>> {
        let summary = self.client.get_sentiment_summary(date_range, source).await?;

        // A summary whose timeline is mis-shaped is unusable by the
        // charts; degrade to None rather than hand it downstream.
        if !summary.timeline.is_render_ready() {
            warn!(
                "Discarding sentiment summary with misaligned timeline ({} labels, {} scores, {} returns)",
                summary.timeline.labels.len(),
                summary.timeline.sentiment.len(),
                summary.timeline.sp500.len()
            );
            return Ok(None);
        }

        Ok(Some(summary))
    }

    async fn fetch_correlation_data(&self, date_range: u32) -> Result<Option<CorrelationSummary>> {
        let correlation = self.client.get_correlation_data(date_range).await?;

        if correlation.correlation_percentage > 100 || correlation.fear_index > 100 {
            warn!(
                "Discarding correlation summary with out-of-range values ({}%, fear {})",
                correlation.correlation_percentage, correlation.fear_index
            );
            return Ok(None);
        }

        Ok(Some(correlation))
    }

    async fn fetch_recent_news(&self, limit: usize, source: &str) -> Result<Vec<NewsItem>> {
        let mut items = self.client.get_recent_news(limit, source).await?;
        items.truncate(limit);
        Ok(items)
    }

    async fn fetch_performance_metrics(&self) -> Result<Option<PerformanceMetrics>> {
        let metrics = self.client.get_performance_metrics().await?;
        Ok(Some(metrics))
    }
}
