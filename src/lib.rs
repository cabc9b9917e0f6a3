//! MarketMood Sentiment Dashboard Library
//!
//! A terminal dashboard correlating financial-news sentiment with
//! market returns, built with Rust, focusing on a resilient refresh
//! loop and clear at-a-glance visuals.

pub mod analytics;
pub mod api;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod ui;

use anyhow::Result;

/// Application result type for consistent error handling
pub type AppResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Initialize tracing subscriber for logging
///
/// Log lines go to a rolling file rather than stdout so they never
/// corrupt the alternate-screen TUI. The returned guard must be kept
/// alive for the lifetime of the process.
pub fn init_logging(
    level: &str,
    file_path: &str,
) -> Result<tracing_appender::non_blocking::WorkerGuard> {
    use std::path::Path;
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let path = Path::new(file_path);
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(directory)
        .map_err(|e| anyhow::anyhow!("Failed to create log directory: {}", e))?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "marketmood.log".to_string());

    let appender = tracing_appender::rolling::never(directory, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("marketmood={}", level).into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
        .init();

    Ok(guard)
}
