//! Chart instance lifecycle management
//!
//! The two chart handles live here, decoupled from the widgets that
//! draw them. Create destroys any prior instance; update replaces the
//! series in place and never recreates the instance; every operation
//! is a silent no-op when the target pane anchor is absent.

use tracing::warn;

use crate::api::types::Timeline;

/// Which chart pane anchors exist in the active layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartAnchors {
    pub sentiment: bool,
    pub correlation: bool,
}

impl Default for ChartAnchors {
    fn default() -> Self {
        Self {
            sentiment: true,
            correlation: true,
        }
    }
}

/// Sentiment-over-time line chart state
#[derive(Debug, Clone, PartialEq)]
pub struct SentimentChartState {
    instance: u64,
    pub labels: Vec<String>,
    pub sentiment: Vec<f64>,
}

impl SentimentChartState {
    pub fn instance_id(&self) -> u64 {
        self.instance
    }
}

/// Sentiment-vs-return grouped bar chart state
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationChartState {
    instance: u64,
    pub labels: Vec<String>,
    pub sentiment: Vec<f64>,
    pub sp500: Vec<f64>,
}

impl CorrelationChartState {
    pub fn instance_id(&self) -> u64 {
        self.instance
    }
}

/// Owner of both chart instances
#[derive(Debug, Default)]
pub struct ChartSet {
    anchors: ChartAnchors,
    next_instance: u64,
    dirty: bool,
    sentiment: Option<SentimentChartState>,
    correlation: Option<CorrelationChartState>,
}

impl ChartSet {
    pub fn new(anchors: ChartAnchors) -> Self {
        Self {
            anchors,
            ..Self::default()
        }
    }

    /// Create both charts (initial setup)
    pub fn init_charts(&mut self) {
        self.create_sentiment_chart();
        self.create_correlation_chart();
    }

    /// Create the sentiment chart, destroying any prior instance
    pub fn create_sentiment_chart(&mut self) {
        if !self.anchors.sentiment {
            return;
        }

        self.sentiment = None;
        self.next_instance += 1;
        self.sentiment = Some(SentimentChartState {
            instance: self.next_instance,
            labels: Vec::new(),
            sentiment: Vec::new(),
        });
        self.dirty = true;
    }

    /// Create the correlation chart, destroying any prior instance
    pub fn create_correlation_chart(&mut self) {
        if !self.anchors.correlation {
            return;
        }

        self.correlation = None;
        self.next_instance += 1;
        self.correlation = Some(CorrelationChartState {
            instance: self.next_instance,
            labels: Vec::new(),
            sentiment: Vec::new(),
            sp500: Vec::new(),
        });
        self.dirty = true;
    }

    /// Replace the sentiment chart's series in place
    pub fn update_sentiment_chart(&mut self, data: &Timeline) {
        let Some(chart) = self.sentiment.as_mut() else {
            return;
        };

        if data.labels.len() != data.sentiment.len() {
            warn!(
                "Ignoring misaligned sentiment timeline ({} labels, {} scores)",
                data.labels.len(),
                data.sentiment.len()
            );
            return;
        }

        chart.labels = data.labels.clone();
        chart.sentiment = data.sentiment.clone();
        self.dirty = true;
    }

    /// Replace the correlation chart's series in place
    pub fn update_correlation_chart(&mut self, data: &Timeline) {
        let Some(chart) = self.correlation.as_mut() else {
            return;
        };

        if !data.is_render_ready() && !data.is_empty() {
            warn!(
                "Ignoring misaligned correlation timeline ({} labels, {} scores, {} returns)",
                data.labels.len(),
                data.sentiment.len(),
                data.sp500.len()
            );
            return;
        }

        chart.labels = data.labels.clone();
        chart.sentiment = data.sentiment.clone();
        chart.sp500 = data.sp500.clone();
        self.dirty = true;
    }

    /// Destroy both chart instances (teardown)
    pub fn destroy_all(&mut self) {
        self.sentiment = None;
        self.correlation = None;
        self.dirty = true;
    }

    /// Mark both charts for redraw at the new geometry
    pub fn resize_all(&mut self) {
        if self.sentiment.is_some() || self.correlation.is_some() {
            self.dirty = true;
        }
    }

    /// Consume the dirty flag; true when a redraw is due
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn sentiment(&self) -> Option<&SentimentChartState> {
        self.sentiment.as_ref()
    }

    pub fn correlation(&self) -> Option<&CorrelationChartState> {
        self.correlation.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_timeline() -> Timeline {
        Timeline {
            labels: vec!["Mon".to_string(), "Tue".to_string()],
            sentiment: vec![0.15, -0.08],
            sp500: vec![0.8, -0.5],
        }
    }

    #[test]
    fn test_create_destroys_prior_instance() {
        let mut charts = ChartSet::new(ChartAnchors::default());

        charts.create_sentiment_chart();
        let first = charts.sentiment().unwrap().instance_id();

        charts.create_sentiment_chart();
        let second = charts.sentiment().unwrap().instance_id();

        assert_ne!(first, second);
    }

    #[test]
    fn test_update_is_idempotent_and_keeps_instance() {
        let mut charts = ChartSet::new(ChartAnchors::default());
        charts.init_charts();

        let timeline = sample_timeline();
        charts.update_sentiment_chart(&timeline);
        let instance = charts.sentiment().unwrap().instance_id();
        let series = charts.sentiment().unwrap().sentiment.clone();

        charts.update_sentiment_chart(&timeline);
        assert_eq!(charts.sentiment().unwrap().instance_id(), instance);
        assert_eq!(charts.sentiment().unwrap().sentiment, series);

        charts.update_correlation_chart(&timeline);
        let correlation_instance = charts.correlation().unwrap().instance_id();
        charts.update_correlation_chart(&timeline);
        assert_eq!(
            charts.correlation().unwrap().instance_id(),
            correlation_instance
        );
        assert_eq!(charts.correlation().unwrap().sp500, timeline.sp500);
    }

    #[test]
    fn test_update_before_create_is_noop() {
        let mut charts = ChartSet::new(ChartAnchors::default());
        charts.update_sentiment_chart(&sample_timeline());
        assert!(charts.sentiment().is_none());
    }

    #[test]
    fn test_missing_anchor_tolerance() {
        let mut charts = ChartSet::new(ChartAnchors {
            sentiment: false,
            correlation: false,
        });

        // none of these may panic, and no instance may appear
        charts.init_charts();
        charts.update_sentiment_chart(&sample_timeline());
        charts.update_correlation_chart(&sample_timeline());
        charts.resize_all();
        charts.destroy_all();

        assert!(charts.sentiment().is_none());
        assert!(charts.correlation().is_none());
    }

    #[test]
    fn test_misaligned_update_is_ignored() {
        let mut charts = ChartSet::new(ChartAnchors::default());
        charts.init_charts();
        charts.update_sentiment_chart(&sample_timeline());

        let bad = Timeline {
            labels: vec!["Mon".to_string()],
            sentiment: vec![0.1, 0.2, 0.3],
            sp500: vec![],
        };
        charts.update_sentiment_chart(&bad);

        assert_eq!(charts.sentiment().unwrap().labels.len(), 2);
    }

    #[test]
    fn test_destroy_and_dirty_tracking() {
        let mut charts = ChartSet::new(ChartAnchors::default());
        charts.init_charts();
        assert!(charts.take_dirty());
        assert!(!charts.take_dirty());

        charts.update_sentiment_chart(&sample_timeline());
        assert!(charts.take_dirty());

        charts.destroy_all();
        assert!(charts.sentiment().is_none());
        assert!(charts.correlation().is_none());

        // resize after destroy stays quiet
        assert!(charts.take_dirty());
        charts.resize_all();
        assert!(!charts.take_dirty());
    }
}
