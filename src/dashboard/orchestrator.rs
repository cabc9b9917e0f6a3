//! Refresh orchestrator for the dashboard lifecycle
//!
//! Owns the dashboard context, coordinates the four-way data fetch,
//! and drives timed and focus-triggered re-fetches.

use anyhow::Result;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::api::feed::DataFeed;
use crate::api::types::{ConnectionStatus, DashboardBundle};
use crate::config::Config;

use super::events::{DashboardEvent, EventChannel, RefreshReason, SurfaceEvent};
use super::presenter::Presenter;
use super::state::{DashboardState, LoadState, RefreshStats};
use super::timers::ScheduledTask;

/// Main orchestrator for the dashboard refresh lifecycle
pub struct DashboardOrchestrator {
    /// Application configuration
    config: Config,
    /// Dashboard context, threaded through every cycle
    state: DashboardState,
    /// Refresh statistics
    stats: RefreshStats,
    /// Refresh cycle state machine
    load_state: LoadState,
    /// Data feed (live REST or sample)
    feed: Arc<dyn DataFeed>,
    /// Display surface adapter
    presenter: Box<dyn Presenter>,
    /// Orchestrator-bound event channel
    events: EventChannel,
    /// Surface channel for shutdown forwarding
    surface_tx: Option<tokio::sync::mpsc::UnboundedSender<SurfaceEvent>>,
    /// Whether the terminal currently has focus
    visible: bool,
    /// Consecutive failed cycles since the last success
    consecutive_failures: u32,
    /// Pending retry, at most one at a time
    retry_timer: Option<ScheduledTask>,
    /// Auto-refresh interval timers
    refresh_timers: Vec<ScheduledTask>,
    /// Set once shutdown has been requested
    shutdown: bool,
}

impl DashboardOrchestrator {
    /// Create a new orchestrator around a feed and a display surface
    pub fn new(config: Config, feed: Arc<dyn DataFeed>, presenter: Box<dyn Presenter>) -> Self {
        let state = DashboardState::new(&config);

        Self {
            config,
            state,
            stats: RefreshStats::default(),
            load_state: LoadState::Idle,
            feed,
            presenter,
            events: EventChannel::new(),
            surface_tx: None,
            visible: true,
            consecutive_failures: 0,
            retry_timer: None,
            refresh_timers: Vec::new(),
            shutdown: false,
        }
    }

    /// Attach the surface channel so shutdown reaches the UI task
    pub fn attach_surface(&mut self, surface_tx: tokio::sync::mpsc::UnboundedSender<SurfaceEvent>) {
        self.surface_tx = Some(surface_tx);
    }

    /// Event sender for UI wiring and timers
    pub fn event_sender(&self) -> tokio::sync::mpsc::UnboundedSender<DashboardEvent> {
        self.events.event_tx()
    }

    /// Initialize the dashboard: controls, auto-refresh, first load
    pub fn initialize(&mut self) -> Result<()> {
        info!("Initializing dashboard orchestrator");

        self.presenter.render_controls(&self.state);

        if self.config.refresh.auto_refresh {
            self.start_auto_refresh();
        }

        self.events.send_event(DashboardEvent::RefreshRequested {
            reason: RefreshReason::Startup,
        })?;

        Ok(())
    }

    /// Run the orchestrator event loop until shutdown
    pub async fn run(&mut self) -> Result<()> {
        info!("Starting dashboard event loop");

        while !self.shutdown {
            match self.events.next_event().await {
                Some(event) => self.handle_event(event).await?,
                None => {
                    warn!("Dashboard event channel closed");
                    break;
                }
            }
        }

        info!("Dashboard event loop terminated");
        Ok(())
    }

    /// Process a single pending event, if any arrives before the timeout.
    ///
    /// Returns whether an event was processed.
    pub async fn tick(&mut self, timeout: Duration) -> Result<bool> {
        match tokio::time::timeout(timeout, self.events.next_event()).await {
            Ok(Some(event)) => {
                self.handle_event(event).await?;
                Ok(true)
            }
            Ok(None) | Err(_) => Ok(false),
        }
    }

    /// Handle a dashboard event
    pub async fn handle_event(&mut self, event: DashboardEvent) -> Result<()> {
        debug!("Handling dashboard event: {:?}", event);

        match event {
            DashboardEvent::RefreshRequested { reason } => {
                if reason == RefreshReason::Retry {
                    self.retry_timer = None;
                }
                self.load_dashboard_data(reason).await;
            }
            DashboardEvent::MetricsTick => {
                if !self.state.is_loading && self.visible {
                    self.refresh_performance_metrics().await;
                } else {
                    debug!("Skipping metrics tick (loading or unfocused)");
                }
            }
            DashboardEvent::FullRefreshTick => {
                if !self.state.is_loading && self.visible {
                    self.load_dashboard_data(RefreshReason::Timer).await;
                } else {
                    debug!("Skipping full refresh tick (loading or unfocused)");
                }
            }
            DashboardEvent::DateRangeChanged { days } => {
                info!("Date range changed to {} days", days);
                self.state.date_range_days = days;
                self.presenter.render_controls(&self.state);
                self.load_dashboard_data(RefreshReason::ControlChanged).await;
            }
            DashboardEvent::DataSourceChanged { source } => {
                info!("Data source changed to {}", source);
                self.state.data_source = source;
                self.presenter.render_controls(&self.state);
                self.load_dashboard_data(RefreshReason::ControlChanged).await;
            }
            DashboardEvent::FocusChanged { focused } => {
                self.visible = focused;
                if focused {
                    self.handle_focus_regained().await;
                }
            }
            DashboardEvent::Error { message } => {
                error!("Dashboard error: {}", message);
                self.presenter.show_error(&message);
            }
            DashboardEvent::ShutdownRequested => {
                info!("Shutdown requested");
                self.teardown();
                if let Some(surface_tx) = &self.surface_tx {
                    let _ = surface_tx.send(SurfaceEvent::ShutdownRequested);
                }
                self.shutdown = true;
            }
        }

        Ok(())
    }

    /// Run one full refresh cycle and push the outcome to the surface.
    ///
    /// The loading indicator is always cleared on exit, success or
    /// failure.
    pub async fn load_dashboard_data(&mut self, reason: RefreshReason) {
        info!("Loading dashboard data ({:?})", reason);

        self.load_state = LoadState::Loading;
        self.state.is_loading = true;
        self.state.connection_status = ConnectionStatus::Loading;
        self.presenter.show_loading(true);
        self.presenter.set_connection_status(ConnectionStatus::Loading);

        let result = self.run_refresh_cycle().await;

        match result {
            Ok(bundle) => {
                self.state.last_update = Some(Utc::now());
                self.state.connection_status = ConnectionStatus::Connected;
                self.load_state = LoadState::Success;
                self.consecutive_failures = 0;
                self.stats.cycles_completed += 1;

                self.presenter.render_snapshot(&bundle, self.state.last_update);
                self.presenter.set_connection_status(ConnectionStatus::Connected);
            }
            Err(e) => {
                error!("Failed to load dashboard data: {:#}", e);
                self.state.connection_status = ConnectionStatus::Disconnected;
                self.load_state = LoadState::Error;
                self.stats.cycles_failed += 1;

                self.presenter.show_error("Failed to load data. Retrying...");
                self.presenter
                    .set_connection_status(ConnectionStatus::Disconnected);
                self.schedule_retry();
            }
        }

        self.state.is_loading = false;
        self.presenter.show_loading(false);
    }

    /// Issue the four data fetches concurrently; all-or-nothing join
    async fn run_refresh_cycle(&self) -> Result<DashboardBundle> {
        let (sentiment, correlation, news, performance) = tokio::try_join!(
            self.feed
                .fetch_sentiment_summary(self.state.date_range_days, &self.state.data_source),
            self.feed.fetch_correlation_data(self.state.date_range_days),
            self.feed
                .fetch_recent_news(self.config.news_limit, &self.state.data_source),
            self.feed.fetch_performance_metrics(),
        )?;

        Ok(DashboardBundle {
            sentiment,
            correlation,
            news,
            performance,
        })
    }

    /// Refresh performance metrics only (short-period auto-refresh)
    async fn refresh_performance_metrics(&mut self) {
        match self.feed.fetch_performance_metrics().await {
            Ok(Some(metrics)) => {
                self.stats.metrics_refreshes += 1;
                self.presenter
                    .render_performance(&metrics, self.state.last_update);
            }
            Ok(None) => {
                debug!("Performance metrics unavailable");
            }
            Err(e) => {
                error!("Performance metrics auto-refresh failed: {:#}", e);
            }
        }
    }

    /// Schedule exactly one retry after the configured fixed delay.
    ///
    /// Replaces any pending retry; held as a cancellable handle so it
    /// dies with the orchestrator at teardown.
    fn schedule_retry(&mut self) {
        self.consecutive_failures += 1;

        if self.consecutive_failures > self.config.refresh.retry_attempts {
            warn!(
                "Retry attempts exhausted ({}), waiting for next trigger",
                self.config.refresh.retry_attempts
            );
            return;
        }

        let delay = Duration::from_millis(self.config.refresh.retry_delay_ms);
        info!(
            "Scheduling refresh retry {}/{} in {:?}",
            self.consecutive_failures, self.config.refresh.retry_attempts, delay
        );

        self.retry_timer = Some(ScheduledTask::once(
            "refresh-retry",
            delay,
            self.events.event_tx(),
            DashboardEvent::RefreshRequested {
                reason: RefreshReason::Retry,
            },
        ));
        self.stats.retries_scheduled += 1;
    }

    /// Start the two auto-refresh interval timers
    fn start_auto_refresh(&mut self) {
        let real_time = Duration::from_millis(self.config.refresh.real_time_ms);
        let full_cycle = Duration::from_millis(self.config.refresh.metrics_ms);

        info!(
            "Auto-refresh enabled: metrics every {:?}, full reload every {:?}",
            real_time, full_cycle
        );

        self.refresh_timers.push(ScheduledTask::interval(
            "metrics-refresh",
            real_time,
            self.events.event_tx(),
            DashboardEvent::MetricsTick,
        ));
        self.refresh_timers.push(ScheduledTask::interval(
            "full-refresh",
            full_cycle,
            self.events.event_tx(),
            DashboardEvent::FullRefreshTick,
        ));
    }

    /// Refresh immediately when focus returns after the staleness threshold
    async fn handle_focus_regained(&mut self) {
        if !self.config.refresh.refresh_on_focus {
            return;
        }

        let Some(last_update) = self.state.last_update else {
            return;
        };

        let stale_after = chrono::Duration::seconds(self.config.refresh.stale_after_secs as i64);
        if Utc::now() - last_update > stale_after {
            info!("Focus regained after staleness threshold, refreshing");
            self.load_dashboard_data(RefreshReason::FocusRegained).await;
        }
    }

    /// Cancel all scheduled tasks
    pub fn teardown(&mut self) {
        self.retry_timer = None;
        self.refresh_timers.clear();
    }

    /// Get the dashboard context
    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    /// Get refresh statistics
    pub fn stats(&self) -> &RefreshStats {
        &self.stats
    }

    /// Get the refresh cycle state
    pub fn load_state(&self) -> LoadState {
        self.load_state
    }

    /// Whether a retry is currently scheduled
    pub fn has_pending_retry(&self) -> bool {
        self.retry_timer
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }
}

impl Drop for DashboardOrchestrator {
    fn drop(&mut self) {
        if !self.shutdown {
            debug!("DashboardOrchestrator dropped without explicit shutdown");
        }
    }
}
