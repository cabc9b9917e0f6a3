//! Integration tests for the REST data access layer

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use marketmood::api::types::FeedError;
use marketmood::api::{ApiClient, DataFeed, RestFeed};
use marketmood::config::ApiConfig;

fn api_config(server: &MockServer) -> ApiConfig {
    ApiConfig {
        base_url: format!("{}/api", server.uri()),
        ..ApiConfig::default()
    }
}

#[tokio::test]
async fn test_request_helper_parses_success_response() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/metrics/performance"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "articles_analyzed": 234,
            "processing_speed": "1.2s avg",
            "active_sources": "7/9",
            "last_update": "12:00:00"
        })))
        .mount(&server)
        .await;

    let client = ApiClient::new(&api_config(&server));
    let metrics = client.get_performance_metrics().await.unwrap();

    assert_eq!(metrics.articles_analyzed, 234);
    assert_eq!(metrics.active_sources, "7/9");
}

#[tokio::test]
async fn test_request_helper_rejects_non_success_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/metrics/performance"))
        .respond_with(ResponseTemplate::new(503).set_body_string("backend unavailable"))
        .mount(&server)
        .await;

    let client = ApiClient::new(&api_config(&server));
    let error = client.get_performance_metrics().await.unwrap_err();

    match error {
        FeedError::Status { status, body } => {
            assert_eq!(status, 503);
            assert!(body.contains("unavailable"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_feed_propagates_request_helper_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/sentiment/summary"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let feed = RestFeed::new(ApiClient::new(&api_config(&server)));
    let result = feed.fetch_sentiment_summary(30, "all").await;

    // the helper path is the one place failures reach the orchestrator
    assert!(result.is_err());
}

#[tokio::test]
async fn test_sentiment_query_parameters_are_forwarded() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/sentiment/summary"))
        .and(query_param("days", "7"))
        .and(query_param("source", "reuters.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "current_sentiment": 0.23,
            "sentiment_counts": {"positive": 142, "neutral": 89, "negative": 76},
            "timeline": {
                "labels": ["Mon", "Tue"],
                "sentiment": [0.15, -0.08],
                "sp500": [0.8, -0.5]
            }
        })))
        .mount(&server)
        .await;

    let feed = RestFeed::new(ApiClient::new(&api_config(&server)));
    let summary = feed
        .fetch_sentiment_summary(7, "reuters.com")
        .await
        .unwrap()
        .expect("summary should be present");

    assert!((summary.current_sentiment - 0.23).abs() < f64::EPSILON);
    assert_eq!(summary.sentiment_counts.positive, 142);
    assert_eq!(summary.timeline.len(), 2);
}

#[tokio::test]
async fn test_misaligned_timeline_is_swallowed_to_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/sentiment/summary"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "current_sentiment": 0.1,
            "sentiment_counts": {"positive": 1, "neutral": 1, "negative": 1},
            "timeline": {
                "labels": ["Mon", "Tue", "Wed"],
                "sentiment": [0.1],
                "sp500": []
            }
        })))
        .mount(&server)
        .await;

    let feed = RestFeed::new(ApiClient::new(&api_config(&server)));
    let summary = feed.fetch_sentiment_summary(30, "all").await.unwrap();

    assert!(summary.is_none());
}

#[tokio::test]
async fn test_out_of_range_correlation_is_swallowed_to_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/correlation/data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "correlation_percentage": 180,
            "fear_index": 34,
            "matches": {"labels": [], "sentiment": [], "sp500": []}
        })))
        .mount(&server)
        .await;

    let feed = RestFeed::new(ApiClient::new(&api_config(&server)));
    let correlation = feed.fetch_correlation_data(30).await.unwrap();

    assert!(correlation.is_none());
}

#[tokio::test]
async fn test_news_fetch_truncates_to_limit() {
    let server = MockServer::start().await;

    let items: Vec<_> = (0..5)
        .map(|idx| {
            json!({
                "title": format!("Story {idx}"),
                "sentiment": "neutral",
                "source": "Reuters",
                "time": "1 hours ago"
            })
        })
        .collect();

    Mock::given(method("GET"))
        .and(path("/api/news/recent"))
        .and(query_param("limit", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(items)))
        .mount(&server)
        .await;

    let feed = RestFeed::new(ApiClient::new(&api_config(&server)));
    let news = feed.fetch_recent_news(3, "all").await.unwrap();

    assert_eq!(news.len(), 3);
    assert_eq!(news[0].title, "Story 0");
}

#[tokio::test]
async fn test_market_returns_use_backend_field_names() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/sp500/returns"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"Date": "2024-03-04", "Return": 0.008},
            {"Date": "2024-03-05", "Return": -0.005}
        ])))
        .mount(&server)
        .await;

    let client = ApiClient::new(&api_config(&server));
    let returns = client.get_market_returns(30).await.unwrap();

    assert_eq!(returns.len(), 2);
    assert_eq!(returns[0].date, "2024-03-04");
    assert!((returns[1].daily_return + 0.005).abs() < f64::EPSILON);
}
