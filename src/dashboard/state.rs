//! Dashboard state and refresh statistics

use chrono::{DateTime, Utc};

use crate::api::types::ConnectionStatus;
use crate::config::Config;

/// Refresh cycle state tracking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Success,
    Error,
}

/// The dashboard's single mutable context, constructed once at startup
/// and threaded through the orchestrator. Mutated only by the refresh
/// cycle; read by event wiring and display updates.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// Active date range in days
    pub date_range_days: u32,
    /// Active source filter ("all" or a source domain)
    pub data_source: String,
    /// Whether a refresh cycle is in flight
    pub is_loading: bool,
    /// Timestamp of the last successful full refresh
    pub last_update: Option<DateTime<Utc>>,
    /// Connection status shown by the status indicator
    pub connection_status: ConnectionStatus,
}

impl DashboardState {
    pub fn new(config: &Config) -> Self {
        Self {
            date_range_days: config.date_range_days,
            data_source: config.data_source.clone(),
            is_loading: false,
            last_update: None,
            connection_status: ConnectionStatus::Connected,
        }
    }
}

/// Refresh statistics for monitoring
#[derive(Debug, Clone)]
pub struct RefreshStats {
    pub started_at: DateTime<Utc>,
    pub cycles_completed: u64,
    pub cycles_failed: u64,
    pub retries_scheduled: u64,
    pub metrics_refreshes: u64,
}

impl Default for RefreshStats {
    fn default() -> Self {
        Self {
            started_at: Utc::now(),
            cycles_completed: 0,
            cycles_failed: 0,
            retries_scheduled: 0,
            metrics_refreshes: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_from_config() {
        let config = Config::default();
        let state = DashboardState::new(&config);

        assert_eq!(state.date_range_days, 30);
        assert_eq!(state.data_source, "all");
        assert!(!state.is_loading);
        assert!(state.last_update.is_none());
        assert_eq!(state.connection_status, ConnectionStatus::Connected);
    }
}
