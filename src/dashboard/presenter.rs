//! Presentation adapter between the orchestrator and the display layer

use chrono::{DateTime, Utc};
use tokio::sync::mpsc::UnboundedSender;
use tracing::error;

use super::events::SurfaceEvent;
use super::state::DashboardState;
use crate::api::types::{ConnectionStatus, DashboardBundle, PerformanceMetrics};

/// Display surface the orchestrator pushes updates into.
///
/// The orchestrator never touches widgets or terminal state directly;
/// everything it wants shown goes through this adapter, which keeps
/// the data transforms testable without a terminal.
pub trait Presenter: Send {
    /// Toggle the loading indicator
    fn show_loading(&mut self, loading: bool);

    /// Update the connection status indicator
    fn set_connection_status(&mut self, status: ConnectionStatus);

    /// Surface a visible error message
    fn show_error(&mut self, message: &str);

    /// Push a full refresh result into every dashboard region
    fn render_snapshot(&mut self, bundle: &DashboardBundle, last_update: Option<DateTime<Utc>>);

    /// Push a performance-metrics-only update
    fn render_performance(&mut self, metrics: &PerformanceMetrics, last_update: Option<DateTime<Utc>>);

    /// Reflect the current selector values
    fn render_controls(&mut self, state: &DashboardState);
}

/// Presenter that forwards updates to the UI over the surface channel
pub struct ChannelPresenter {
    surface_tx: UnboundedSender<SurfaceEvent>,
}

impl ChannelPresenter {
    pub fn new(surface_tx: UnboundedSender<SurfaceEvent>) -> Self {
        Self { surface_tx }
    }

    fn send(&self, event: SurfaceEvent) {
        if let Err(e) = self.surface_tx.send(event) {
            error!("Failed to forward surface event: {}", e);
        }
    }
}

impl Presenter for ChannelPresenter {
    fn show_loading(&mut self, loading: bool) {
        self.send(SurfaceEvent::LoadingChanged { loading });
    }

    fn set_connection_status(&mut self, status: ConnectionStatus) {
        self.send(SurfaceEvent::StatusChanged { status });
    }

    fn show_error(&mut self, message: &str) {
        self.send(SurfaceEvent::ErrorMessage {
            message: message.to_string(),
        });
    }

    fn render_snapshot(&mut self, bundle: &DashboardBundle, last_update: Option<DateTime<Utc>>) {
        self.send(SurfaceEvent::Snapshot {
            bundle: bundle.clone(),
            last_update,
        });
    }

    fn render_performance(
        &mut self,
        metrics: &PerformanceMetrics,
        last_update: Option<DateTime<Utc>>,
    ) {
        self.send(SurfaceEvent::PerformanceUpdate {
            metrics: metrics.clone(),
            last_update,
        });
    }

    fn render_controls(&mut self, state: &DashboardState) {
        self.send(SurfaceEvent::ControlsChanged {
            date_range_days: state.date_range_days,
            source: state.data_source.clone(),
        });
    }
}
