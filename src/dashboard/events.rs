//! Event channels for asynchronous dashboard processing

use anyhow::Result;
use chrono::{DateTime, Utc};
use tokio::sync::mpsc;

use crate::api::types::{ConnectionStatus, DashboardBundle, PerformanceMetrics};

/// What triggered a refresh request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshReason {
    Startup,
    Manual,
    Shortcut,
    Timer,
    Retry,
    FocusRegained,
    ControlChanged,
}

/// Events flowing into the orchestrator (UI actions, timer ticks)
#[derive(Debug, Clone)]
pub enum DashboardEvent {
    /// Run a full refresh cycle
    RefreshRequested { reason: RefreshReason },
    /// Short-period timer: refresh performance metrics only
    MetricsTick,
    /// Long-period timer: re-run the full refresh cycle
    FullRefreshTick,
    /// Date range selector changed
    DateRangeChanged { days: u32 },
    /// Data source selector changed
    DataSourceChanged { source: String },
    /// Terminal focus gained or lost
    FocusChanged { focused: bool },
    /// Error raised by a background task
    Error { message: String },
    /// Shutdown request
    ShutdownRequested,
}

/// Events flowing from the orchestrator to the UI surface
#[derive(Debug, Clone)]
pub enum SurfaceEvent {
    /// Loading indicator changed
    LoadingChanged { loading: bool },
    /// Connection status indicator changed
    StatusChanged { status: ConnectionStatus },
    /// Visible error banner
    ErrorMessage { message: String },
    /// Full refresh result for all dashboard regions
    Snapshot {
        bundle: DashboardBundle,
        last_update: Option<DateTime<Utc>>,
    },
    /// Performance metrics only (short-period refresh)
    PerformanceUpdate {
        metrics: PerformanceMetrics,
        last_update: Option<DateTime<Utc>>,
    },
    /// Selector values changed
    ControlsChanged { date_range_days: u32, source: String },
    /// Shutdown request
    ShutdownRequested,
}

/// Event channel for orchestrator-bound events
pub struct EventChannel {
    /// Event sender
    event_tx: mpsc::UnboundedSender<DashboardEvent>,
    /// Event receiver
    event_rx: Option<mpsc::UnboundedReceiver<DashboardEvent>>,
}

impl Clone for EventChannel {
    fn clone(&self) -> Self {
        Self {
            event_tx: self.event_tx.clone(),
            event_rx: None, // Receivers cannot be cloned
        }
    }
}

impl EventChannel {
    /// Create a new EventChannel
    pub fn new() -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        Self {
            event_tx,
            event_rx: Some(event_rx),
        }
    }

    /// Send event to channel
    pub fn send_event(&self, event: DashboardEvent) -> Result<()> {
        self.event_tx
            .send(event)
            .map_err(|e| anyhow::anyhow!("Failed to send event: {}", e))
    }

    /// Get next event from channel
    pub async fn next_event(&mut self) -> Option<DashboardEvent> {
        if let Some(event_rx) = &mut self.event_rx {
            event_rx.recv().await
        } else {
            None
        }
    }

    /// Get event sender for external use
    pub fn event_tx(&self) -> mpsc::UnboundedSender<DashboardEvent> {
        self.event_tx.clone()
    }

    /// Check if channel is closed
    pub fn is_closed(&self) -> bool {
        self.event_tx.is_closed()
    }
}

impl Default for EventChannel {
    fn default() -> Self {
        Self::new()
    }
}
