//! User Interface module
//!
//! Provides both TUI (Terminal User Interface) and simple CLI output capabilities.

/// Chart instance lifecycle
pub mod charts;

/// TUI application state and rendering
pub mod tui;

/// Simple CLI output functions
pub mod cli;

/// UI event/render loop management
pub mod ui_manager;

use chrono::{DateTime, Utc};
use ratatui::style::Color;
use std::time::{Duration, Instant};

use crate::api::types::{
    ConnectionStatus, CorrelationSummary, DashboardBundle, NewsItem, PerformanceMetrics,
    SentimentSummary,
};
use crate::config::{ChartConfig, Config, parse_hex_color};
use charts::{ChartAnchors, ChartSet};

/// Selectable date ranges in days
pub const DATE_RANGE_OPTIONS: [u32; 3] = [7, 30, 90];

/// How long the manual refresh control stays disabled after use
pub const REFRESH_CONTROL_HOLD: Duration = Duration::from_millis(1000);

/// One selectable data source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceOption {
    /// Source domain, or "all"
    pub domain: String,
    /// Human-readable display name
    pub display: String,
}

/// Chart color palette resolved from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub primary: Color,
    pub secondary: Color,
    pub success: Color,
    pub warning: Color,
}

impl Palette {
    pub fn from_config(chart: &ChartConfig) -> Self {
        Self {
            primary: hex_color(&chart.primary, Color::Blue),
            secondary: hex_color(&chart.secondary, Color::Red),
            success: hex_color(&chart.success, Color::Green),
            warning: hex_color(&chart.warning, Color::Yellow),
        }
    }
}

fn hex_color(value: &str, fallback: Color) -> Color {
    parse_hex_color(value)
        .map(|(r, g, b)| Color::Rgb(r, g, b))
        .unwrap_or(fallback)
}

/// Application state for UI components
#[derive(Debug)]
pub struct AppState {
    pub should_quit: bool,
    pub focused: bool,
    pub is_loading: bool,
    pub connection_status: ConnectionStatus,
    pub last_update: Option<DateTime<Utc>>,
    pub sentiment: Option<SentimentSummary>,
    pub correlation: Option<CorrelationSummary>,
    pub news: Vec<NewsItem>,
    pub performance: Option<PerformanceMetrics>,
    pub date_range_days: u32,
    pub data_source: String,
    pub source_options: Vec<SourceOption>,
    pub charts: ChartSet,
    pub palette: Palette,
    refresh_hold_until: Option<Instant>,
}

impl AppState {
    /// Create new application state
    pub fn new(config: &Config) -> Self {
        let mut source_options = vec![SourceOption {
            domain: "all".to_string(),
            display: "All Sources".to_string(),
        }];
        source_options.extend(config.sources.iter().map(|(domain, display)| SourceOption {
            domain: domain.clone(),
            display: display.clone(),
        }));

        let mut charts = ChartSet::new(ChartAnchors::default());
        charts.init_charts();

        Self {
            should_quit: false,
            focused: true,
            is_loading: false,
            connection_status: ConnectionStatus::Connected,
            last_update: None,
            sentiment: None,
            correlation: None,
            news: Vec::new(),
            performance: None,
            date_range_days: config.date_range_days,
            data_source: config.data_source.clone(),
            source_options,
            charts,
            palette: Palette::from_config(&config.chart),
            refresh_hold_until: None,
        }
    }

    /// Advance the date-range selector, returning the new value
    pub fn cycle_date_range(&mut self) -> u32 {
        let position = DATE_RANGE_OPTIONS
            .iter()
            .position(|days| *days == self.date_range_days);
        let next = match position {
            Some(index) => DATE_RANGE_OPTIONS[(index + 1) % DATE_RANGE_OPTIONS.len()],
            None => DATE_RANGE_OPTIONS[0],
        };
        self.date_range_days = next;
        next
    }

    /// Advance the data-source selector, returning the new domain
    pub fn cycle_data_source(&mut self) -> String {
        if self.source_options.is_empty() {
            return self.data_source.clone();
        }

        let position = self
            .source_options
            .iter()
            .position(|option| option.domain == self.data_source)
            .unwrap_or(0);
        let next = (position + 1) % self.source_options.len();
        self.data_source = self.source_options[next].domain.clone();
        self.data_source.clone()
    }

    /// Display name of the active data source
    pub fn data_source_display(&self) -> &str {
        self.source_options
            .iter()
            .find(|option| option.domain == self.data_source)
            .map(|option| option.display.as_str())
            .unwrap_or(self.data_source.as_str())
    }

    /// Whether the manual refresh control can fire
    pub fn refresh_control_ready(&self, now: Instant) -> bool {
        match self.refresh_hold_until {
            Some(until) => now >= until,
            None => true,
        }
    }

    /// Disable the manual refresh control for the hold duration
    pub fn hold_refresh_control(&mut self, now: Instant) {
        self.refresh_hold_until = Some(now + REFRESH_CONTROL_HOLD);
    }

    /// Apply a full refresh result to every dashboard region
    pub fn apply_snapshot(&mut self, bundle: DashboardBundle, last_update: Option<DateTime<Utc>>) {
        // Both charts are fed from the sentiment summary's timeline;
        // CorrelationSummary::matches is summary data, not a series source.
        if let Some(summary) = &bundle.sentiment {
            if summary.timeline.is_render_ready() {
                self.charts.update_sentiment_chart(&summary.timeline);
                self.charts.update_correlation_chart(&summary.timeline);
            }
        }

        // Absent results leave the previous region content in place;
        // the news feed is replaced wholesale, empty or not.
        if bundle.sentiment.is_some() {
            self.sentiment = bundle.sentiment;
        }
        if bundle.correlation.is_some() {
            self.correlation = bundle.correlation;
        }
        self.news = bundle.news;
        if bundle.performance.is_some() {
            self.performance = bundle.performance;
        }
        self.last_update = last_update;
    }

    /// Apply a performance-metrics-only update
    pub fn apply_performance(
        &mut self,
        metrics: PerformanceMetrics,
        last_update: Option<DateTime<Utc>>,
    ) {
        self.performance = Some(metrics);
        self.last_update = last_update;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::SampleFeed;
    use crate::api::types::SentimentCounts;

    fn app() -> AppState {
        AppState::new(&Config::default())
    }

    #[test]
    fn test_date_range_cycling() {
        let mut app = app();
        assert_eq!(app.date_range_days, 30);
        assert_eq!(app.cycle_date_range(), 90);
        assert_eq!(app.cycle_date_range(), 7);
        assert_eq!(app.cycle_date_range(), 30);
    }

    #[test]
    fn test_data_source_cycling_wraps() {
        let mut app = app();
        assert_eq!(app.data_source, "all");
        assert_eq!(app.data_source_display(), "All Sources");

        let option_count = app.source_options.len();
        for _ in 0..option_count {
            app.cycle_data_source();
        }
        assert_eq!(app.data_source, "all");
    }

    #[test]
    fn test_refresh_control_hold() {
        let mut app = app();
        let now = Instant::now();
        assert!(app.refresh_control_ready(now));

        app.hold_refresh_control(now);
        assert!(!app.refresh_control_ready(now));
        assert!(app.refresh_control_ready(now + REFRESH_CONTROL_HOLD));
    }

    #[test]
    fn test_apply_snapshot_updates_charts() {
        let mut app = app();
        let timeline = SampleFeed::sample_timeline();

        let bundle = DashboardBundle {
            sentiment: Some(SentimentSummary {
                current_sentiment: 0.23,
                sentiment_counts: SentimentCounts {
                    positive: 1,
                    neutral: 2,
                    negative: 3,
                },
                timeline: timeline.clone(),
            }),
            correlation: None,
            news: Vec::new(),
            performance: None,
        };

        app.apply_snapshot(bundle, Some(Utc::now()));

        assert_eq!(
            app.charts.sentiment().unwrap().sentiment,
            timeline.sentiment
        );
        assert_eq!(app.charts.correlation().unwrap().sp500, timeline.sp500);
        assert!(app.last_update.is_some());
    }

    #[test]
    fn test_palette_falls_back_on_bad_hex() {
        let mut chart = ChartConfig::default();
        chart.primary = "nonsense".to_string();
        let palette = Palette::from_config(&chart);
        assert_eq!(palette.primary, Color::Blue);
        assert_eq!(palette.secondary, Color::Rgb(0xdc, 0x26, 0x26));
    }
}
