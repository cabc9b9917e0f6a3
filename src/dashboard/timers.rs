//! Cancellable handles for scheduled background tasks

use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

use super::events::DashboardEvent;
use tokio::sync::mpsc::UnboundedSender;

/// Abort-on-drop handle for a scheduled task.
///
/// Holding the handle keeps the task alive; dropping it cancels the
/// task, so pending retries and interval timers cannot outlive their
/// orchestrator.
pub struct ScheduledTask {
    label: &'static str,
    handle: JoinHandle<()>,
}

impl ScheduledTask {
    /// Fire a single event after a fixed delay
    pub fn once(
        label: &'static str,
        delay: Duration,
        tx: UnboundedSender<DashboardEvent>,
        event: DashboardEvent,
    ) -> Self {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(event);
        });

        debug!("Scheduled task '{}' in {:?}", label, delay);
        Self { label, handle }
    }

    /// Fire an event every `period`, starting one period from now
    pub fn interval(
        label: &'static str,
        period: Duration,
        tx: UnboundedSender<DashboardEvent>,
        event: DashboardEvent,
    ) -> Self {
        let handle = tokio::spawn(async move {
            let start = tokio::time::Instant::now() + period;
            let mut ticker = tokio::time::interval_at(start, period);
            loop {
                ticker.tick().await;
                if tx.send(event.clone()).is_err() {
                    break;
                }
            }
        });

        debug!("Started interval task '{}' every {:?}", label, period);
        Self { label, handle }
    }

    /// Whether the underlying task has already completed
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    pub fn label(&self) -> &'static str {
        self.label
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        self.handle.abort();
        debug!("Cancelled scheduled task '{}'", self.label);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::events::{DashboardEvent, RefreshReason};
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_once_fires_after_delay() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let _task = ScheduledTask::once(
            "test-once",
            Duration::from_millis(20),
            tx,
            DashboardEvent::RefreshRequested {
                reason: RefreshReason::Retry,
            },
        );

        let event = tokio::time::timeout(Duration::from_millis(500), rx.recv())
            .await
            .expect("timer did not fire")
            .expect("channel closed");

        assert!(matches!(
            event,
            DashboardEvent::RefreshRequested {
                reason: RefreshReason::Retry
            }
        ));
    }

    #[tokio::test]
    async fn test_dropped_task_never_fires() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let task = ScheduledTask::once(
            "test-cancel",
            Duration::from_millis(30),
            tx,
            DashboardEvent::MetricsTick,
        );
        drop(task);

        let outcome = tokio::time::timeout(Duration::from_millis(100), rx.recv()).await;
        // channel closes without an event once the aborted task's sender drops
        assert!(matches!(outcome, Ok(None)));
    }

    #[tokio::test]
    async fn test_interval_fires_repeatedly() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let _task = ScheduledTask::interval(
            "test-interval",
            Duration::from_millis(10),
            tx,
            DashboardEvent::FullRefreshTick,
        );

        for _ in 0..3 {
            let event = tokio::time::timeout(Duration::from_millis(500), rx.recv())
                .await
                .expect("interval did not fire")
                .expect("channel closed");
            assert!(matches!(event, DashboardEvent::FullRefreshTick));
        }
    }
}
