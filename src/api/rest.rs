//! Backend REST API client implementation

use serde::de::DeserializeOwned;
use tracing::{debug, info};

use super::types::{
    CorrelationSummary, FeedError, MarketReturnRecord, NewsItem, PerformanceMetrics,
    SentimentSummary,
};
use crate::config::ApiConfig;

/// Dashboard backend REST client
///
/// All endpoint methods go through [`ApiClient::get_json`], the shared
/// request helper: it is the one place transport and HTTP-status
/// failures are turned into [`FeedError`] and handed back to the
/// caller.
pub struct ApiClient {
    base_url: String,
    paths: EndpointPaths,
    client: reqwest::Client,
    timeout: std::time::Duration,
}

#[derive(Debug, Clone)]
struct EndpointPaths {
    sentiment_summary: String,
    correlation_data: String,
    news_feed: String,
    market_returns: String,
    performance_metrics: String,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            paths: EndpointPaths {
                sentiment_summary: config.sentiment_summary_path.clone(),
                correlation_data: config.correlation_data_path.clone(),
                news_feed: config.news_feed_path.clone(),
                market_returns: config.market_returns_path.clone(),
                performance_metrics: config.performance_metrics_path.clone(),
            },
            client: reqwest::Client::new(),
            timeout: std::time::Duration::from_secs(config.timeout_seconds),
        }
    }

    /// Generic request helper: GET a path, check the status, parse JSON
    pub async fn get_json<T: DeserializeOwned>(&self, path_and_query: &str) -> Result<T, FeedError> {
        let url = format!("{}{}", self.base_url, path_and_query);

        debug!("Fetching {}", url);

        let response = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(FeedError::Status { status, body });
        }

        let value = response.json::<T>().await?;
        Ok(value)
    }

    /// Get the aggregated sentiment summary
    pub async fn get_sentiment_summary(
        &self,
        date_range: u32,
        source: &str,
    ) -> Result<SentimentSummary, FeedError> {
        let path = format!(
            "{}?days={}&source={}",
            self.paths.sentiment_summary, date_range, source
        );
        let summary: SentimentSummary = self.get_json(&path).await?;

        info!(
            "Fetched sentiment summary: current {:.2}, {} timeline points",
            summary.current_sentiment,
            summary.timeline.len()
        );

        Ok(summary)
    }

    /// Get the correlation summary
    pub async fn get_correlation_data(
        &self,
        date_range: u32,
    ) -> Result<CorrelationSummary, FeedError> {
        let path = format!("{}?days={}", self.paths.correlation_data, date_range);
        self.get_json(&path).await
    }

    /// Get the most recent news items
    pub async fn get_recent_news(
        &self,
        limit: usize,
        source: &str,
    ) -> Result<Vec<NewsItem>, FeedError> {
        let path = format!("{}?limit={}&source={}", self.paths.news_feed, limit, source);
        self.get_json(&path).await
    }

    /// Get raw per-day market return records
    pub async fn get_market_returns(
        &self,
        date_range: u32,
    ) -> Result<Vec<MarketReturnRecord>, FeedError> {
        let path = format!("{}?days={}", self.paths.market_returns, date_range);
        self.get_json(&path).await
    }

    /// Get pipeline performance metrics
    pub async fn get_performance_metrics(&self) -> Result<PerformanceMetrics, FeedError> {
        let path = self.paths.performance_metrics.clone();
        self.get_json(&path).await
    }
}
