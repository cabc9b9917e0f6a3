//! Configuration management module
//!
//! Handles loading, validation, and management of application configuration.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::path::Path;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Default date range in days
    pub date_range_days: u32,

    /// Default data source filter ("all" or a source domain)
    pub data_source: String,

    /// Maximum news items requested per refresh
    pub news_limit: usize,

    /// Logging level
    pub log_level: String,

    /// File-based logging configuration
    pub log: LogConfig,

    /// Backend API configuration
    pub api: ApiConfig,

    /// Refresh and retry configuration
    pub refresh: RefreshConfig,

    /// Chart color palette
    pub chart: ChartConfig,

    /// Source domain to display name mapping
    #[serde(default = "default_sources")]
    pub sources: BTreeMap<String, String>,

    /// Sentiment label to numeric score mapping
    #[serde(default = "default_sentiment_scores")]
    pub sentiment_scores: BTreeMap<String, i8>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Base URL of the backend API
    pub base_url: String,

    /// Sentiment summary endpoint path
    pub sentiment_summary_path: String,

    /// Correlation data endpoint path
    pub correlation_data_path: String,

    /// News feed endpoint path
    pub news_feed_path: String,

    /// Market returns endpoint path
    pub market_returns_path: String,

    /// Performance metrics endpoint path
    pub performance_metrics_path: String,

    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RefreshConfig {
    /// Enable the auto-refresh timers
    pub auto_refresh: bool,

    /// Refresh when the terminal regains focus after going stale
    pub refresh_on_focus: bool,

    /// Short-period timer: performance metrics only (milliseconds)
    pub real_time_ms: u64,

    /// Long-period timer: full dashboard reload (milliseconds)
    pub metrics_ms: u64,

    /// News feed refresh interval (milliseconds)
    pub news_feed_ms: u64,

    /// Consecutive retry attempts before giving up until the next trigger
    pub retry_attempts: u32,

    /// Fixed delay before a scheduled retry (milliseconds)
    pub retry_delay_ms: u64,

    /// Staleness threshold for focus-triggered refresh (seconds)
    pub stale_after_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Primary series color (hex)
    pub primary: String,

    /// Secondary series color (hex)
    pub secondary: String,

    /// Positive accent color (hex)
    pub success: String,

    /// Warning accent color (hex)
    pub warning: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LogConfig {
    /// Absolute or relative path to the rolling log file
    pub file_path: String,
}

fn default_sources() -> BTreeMap<String, String> {
    [
        ("bloomberg.com", "Bloomberg"),
        ("cnbc.com", "CNBC"),
        ("reuters.com", "Reuters"),
        ("marketwatch.com", "MarketWatch"),
        ("wsj.com", "Wall Street Journal"),
        ("ft.com", "Financial Times"),
        ("forbes.com", "Forbes"),
        ("investopedia.com", "Investopedia"),
        ("financialpost.com", "Financial Post"),
    ]
    .into_iter()
    .map(|(domain, name)| (domain.to_string(), name.to_string()))
    .collect()
}

fn default_sentiment_scores() -> BTreeMap<String, i8> {
    [("positive", 1), ("neutral", 0), ("negative", -1)]
        .into_iter()
        .map(|(label, score)| (label.to_string(), score))
        .collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            date_range_days: 30,
            data_source: "all".to_string(),
            news_limit: 10,
            log_level: "info".to_string(),
            log: LogConfig::default(),
            api: ApiConfig::default(),
            refresh: RefreshConfig::default(),
            chart: ChartConfig::default(),
            sources: default_sources(),
            sentiment_scores: default_sentiment_scores(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000/api".to_string(),
            sentiment_summary_path: "/sentiment/summary".to_string(),
            correlation_data_path: "/correlation/data".to_string(),
            news_feed_path: "/news/recent".to_string(),
            market_returns_path: "/sp500/returns".to_string(),
            performance_metrics_path: "/metrics/performance".to_string(),
            timeout_seconds: 10,
        }
    }
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            auto_refresh: true,
            refresh_on_focus: true,
            real_time_ms: 30_000,
            metrics_ms: 60_000,
            news_feed_ms: 120_000,
            retry_attempts: 3,
            retry_delay_ms: 5_000,
            stale_after_secs: 300,
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            primary: "#3b82f6".to_string(),
            secondary: "#dc2626".to_string(),
            success: "#10b981".to_string(),
            warning: "#f59e0b".to_string(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            file_path: "logs/marketmood.log".to_string(),
        }
    }
}

/// Parse a `#rrggbb` hex color string into RGB components
pub fn parse_hex_color(value: &str) -> Option<(u8, u8, u8)> {
    let digits = value.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
    let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
    let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
    Some((r, g, b))
}

impl Config {
    /// Load configuration from file with environment variable overrides
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let mut config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;

        // Apply environment variable overrides
        config.apply_env_overrides();

        config.validate()?;
        Ok(config)
    }

    /// Apply environment variable overrides to configuration
    pub fn apply_env_overrides(&mut self) {
        // MARKETMOOD_DATE_RANGE_DAYS - default date range
        if let Ok(days) = env::var("MARKETMOOD_DATE_RANGE_DAYS") {
            if let Ok(value) = days.parse::<u32>() {
                self.date_range_days = value;
            }
        }

        // MARKETMOOD_DATA_SOURCE - default source filter
        if let Ok(source) = env::var("MARKETMOOD_DATA_SOURCE") {
            if !source.trim().is_empty() {
                self.data_source = source;
            }
        }

        // MARKETMOOD_NEWS_LIMIT - news items per refresh
        if let Ok(limit) = env::var("MARKETMOOD_NEWS_LIMIT") {
            if let Ok(value) = limit.parse::<usize>() {
                self.news_limit = value;
            }
        }

        // MARKETMOOD_LOG_LEVEL - logging level
        if let Ok(log_level) = env::var("MARKETMOOD_LOG_LEVEL") {
            self.log_level = log_level;
        }

        // MARKETMOOD_LOG_FILE_PATH - logging destination file
        if let Ok(file_path) = env::var("MARKETMOOD_LOG_FILE_PATH") {
            if !file_path.trim().is_empty() {
                self.log.file_path = file_path;
            }
        }

        // MARKETMOOD_API_BASE_URL - backend API base URL
        if let Ok(base_url) = env::var("MARKETMOOD_API_BASE_URL") {
            self.api.base_url = base_url;
        }

        // MARKETMOOD_API_TIMEOUT_SECONDS - request timeout
        if let Ok(timeout) = env::var("MARKETMOOD_API_TIMEOUT_SECONDS") {
            if let Ok(value) = timeout.parse::<u64>() {
                self.api.timeout_seconds = value;
            }
        }

        // MARKETMOOD_AUTO_REFRESH - auto-refresh toggle
        if let Ok(auto) = env::var("MARKETMOOD_AUTO_REFRESH") {
            self.refresh.auto_refresh = auto.parse().unwrap_or(self.refresh.auto_refresh);
        }

        // MARKETMOOD_REFRESH_ON_FOCUS - focus refresh toggle
        if let Ok(on_focus) = env::var("MARKETMOOD_REFRESH_ON_FOCUS") {
            self.refresh.refresh_on_focus =
                on_focus.parse().unwrap_or(self.refresh.refresh_on_focus);
        }

        // MARKETMOOD_REAL_TIME_MS - performance metrics interval
        if let Ok(interval) = env::var("MARKETMOOD_REAL_TIME_MS") {
            if let Ok(value) = interval.parse::<u64>() {
                self.refresh.real_time_ms = value;
            }
        }

        // MARKETMOOD_METRICS_MS - full reload interval
        if let Ok(interval) = env::var("MARKETMOOD_METRICS_MS") {
            if let Ok(value) = interval.parse::<u64>() {
                self.refresh.metrics_ms = value;
            }
        }

        // MARKETMOOD_RETRY_ATTEMPTS - retry attempt cap
        if let Ok(attempts) = env::var("MARKETMOOD_RETRY_ATTEMPTS") {
            if let Ok(value) = attempts.parse::<u32>() {
                self.refresh.retry_attempts = value;
            }
        }

        // MARKETMOOD_RETRY_DELAY_MS - retry delay
        if let Ok(delay) = env::var("MARKETMOOD_RETRY_DELAY_MS") {
            if let Ok(value) = delay.parse::<u64>() {
                self.refresh.retry_delay_ms = value;
            }
        }
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        Ok(())
    }

    /// Load configuration with fallback to default
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        Self::load_from_file(path).unwrap_or_else(|err| {
            tracing::warn!("Failed to load config: {}, using defaults", err);
            Self::default()
        })
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.date_range_days == 0 {
            anyhow::bail!("Date range must be greater than 0 days");
        }

        if self.news_limit == 0 {
            anyhow::bail!("News limit must be greater than 0");
        }

        if self.api.base_url.trim().is_empty() {
            anyhow::bail!("API base URL must not be empty");
        }

        if self.api.timeout_seconds == 0 {
            anyhow::bail!("Timeout must be greater than 0");
        }

        if self.refresh.real_time_ms == 0 || self.refresh.metrics_ms == 0 {
            anyhow::bail!("Refresh intervals must be greater than 0");
        }

        if self.refresh.retry_delay_ms == 0 {
            anyhow::bail!("Retry delay must be greater than 0");
        }

        if self.log.file_path.trim().is_empty() {
            anyhow::bail!("Log file path must not be empty");
        }

        for (name, value) in [
            ("chart.primary", &self.chart.primary),
            ("chart.secondary", &self.chart.secondary),
            ("chart.success", &self.chart.success),
            ("chart.warning", &self.chart.warning),
        ] {
            if parse_hex_color(value).is_none() {
                anyhow::bail!("Invalid hex color for {}: {}", name, value);
            }
        }

        Ok(())
    }

    /// Display name for a source domain, falling back to the raw domain
    pub fn source_display_name<'a>(&'a self, domain: &'a str) -> &'a str {
        self.sources
            .get(domain)
            .map(String::as_str)
            .unwrap_or(domain)
    }

    /// Numeric score for a sentiment label, defaulting to neutral
    pub fn sentiment_score(&self, label: &str) -> i8 {
        self.sentiment_scores.get(label).copied().unwrap_or(0)
    }

    /// Display formatted configuration
    pub fn display(&self) -> Result<()> {
        println!("Current configuration:");
        println!("{:#?}", self);
        Ok(())
    }

    /// Display configuration summary
    pub fn display_summary(&self) -> Result<()> {
        println!("Configuration loaded successfully");
        Ok(())
    }

    /// Display configuration management help
    pub fn display_help() -> Result<()> {
        println!("Configuration management commands:");
        println!("  marketmood config show    - Show current configuration");
        println!("  marketmood config set <key> <value> - Set configuration value");
        println!("  marketmood config reset   - Reset to default configuration");
        Ok(())
    }

    /// Handle configuration command
    pub fn handle_command(action: &Option<crate::cli::ConfigAction>) -> Result<()> {
        match action {
            Some(crate::cli::ConfigAction::Show) => {
                let config = Config::load_or_default("config.toml");
                config.display()?;
            }
            Some(crate::cli::ConfigAction::Set { key, value }) => {
                println!("Config set command: {} = {}", key, value);
                println!("Note: Config set functionality not yet implemented");
            }
            Some(crate::cli::ConfigAction::Reset) => {
                let default_config = Config::default();
                default_config.display()?;
            }
            None => {
                Config::display_help()?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.date_range_days, 30);
        assert_eq!(config.data_source, "all");
        assert_eq!(config.refresh.retry_attempts, 3);
    }

    #[test]
    fn test_hex_color_parsing() {
        assert_eq!(parse_hex_color("#3b82f6"), Some((0x3b, 0x82, 0xf6)));
        assert_eq!(parse_hex_color("#FFFFFF"), Some((255, 255, 255)));
        assert_eq!(parse_hex_color("3b82f6"), None);
        assert_eq!(parse_hex_color("#3b82f"), None);
        assert_eq!(parse_hex_color("#zzzzzz"), None);
    }

    #[test]
    fn test_source_display_name() {
        let config = Config::default();
        assert_eq!(config.source_display_name("reuters.com"), "Reuters");
        assert_eq!(config.source_display_name("example.org"), "example.org");
    }

    #[test]
    fn test_sentiment_score_mapping() {
        let config = Config::default();
        assert_eq!(config.sentiment_score("positive"), 1);
        assert_eq!(config.sentiment_score("neutral"), 0);
        assert_eq!(config.sentiment_score("negative"), -1);
        assert_eq!(config.sentiment_score("unknown"), 0);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let serialized = toml::to_string(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(config.date_range_days, deserialized.date_range_days);
        assert_eq!(config.api.base_url, deserialized.api.base_url);
        assert_eq!(config.sources, deserialized.sources);
    }

    #[test]
    fn test_config_file_operations() {
        let config = Config::default();
        let temp_file = NamedTempFile::new().unwrap();

        // Test save
        config.save_to_file(temp_file.path()).unwrap();

        // Test load
        let loaded_config = Config::load_from_file(temp_file.path()).unwrap();
        assert_eq!(config.date_range_days, loaded_config.date_range_days);
        assert_eq!(config.chart.primary, loaded_config.chart.primary);
    }

    #[test]
    fn test_validation_rejects_bad_color() {
        let mut config = Config::default();
        config.chart.primary = "blue".to_string();
        assert!(config.validate().is_err());
    }
}
