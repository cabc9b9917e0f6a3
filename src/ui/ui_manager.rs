//! UI Manager for the interactive terminal interface

use anyhow::Result;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crossterm::event::{self, Event};

use crate::config::Config;
use crate::dashboard::events::{DashboardEvent, SurfaceEvent};

use super::tui::{Tui, UiAction, handle_key_event};
use super::AppState;

/// Render cadence when no event forces a redraw
const RENDER_INTERVAL: Duration = Duration::from_millis(250);

/// UI Manager for managing the terminal interface
pub struct UiManager {
    /// Surface event sender (orchestrator -> UI)
    surface_tx: mpsc::UnboundedSender<SurfaceEvent>,
    /// Surface event receiver
    surface_rx: Option<mpsc::UnboundedReceiver<SurfaceEvent>>,
    /// Dashboard event sender (UI -> orchestrator)
    dashboard_tx: Option<mpsc::UnboundedSender<DashboardEvent>>,
    /// Application state
    app_state: AppState,
    /// UI rendering state
    render_state: RenderState,
    /// TUI terminal handle
    tui: Option<Tui>,
    /// Time of the last successful render
    last_render: Instant,
}

/// UI rendering state
#[derive(Debug, Clone)]
pub struct RenderState {
    pub should_quit: bool,
    pub should_redraw: bool,
    pub last_render_time: u64,
    pub render_count: u64,
    pub error_message: Option<String>,
    pub info_message: Option<String>,
}

impl Default for RenderState {
    fn default() -> Self {
        Self {
            should_quit: false,
            should_redraw: true,
            last_render_time: 0,
            render_count: 0,
            error_message: None,
            info_message: None,
        }
    }
}

impl UiManager {
    /// Create a new UiManager
    pub fn new(config: &Config) -> Self {
        let (surface_tx, surface_rx) = mpsc::unbounded_channel();

        Self {
            surface_tx,
            surface_rx: Some(surface_rx),
            dashboard_tx: None,
            app_state: AppState::new(config),
            render_state: RenderState::default(),
            tui: None,
            last_render: Instant::now(),
        }
    }

    /// Surface event sender for the orchestrator's presenter
    pub fn surface_sender(&self) -> mpsc::UnboundedSender<SurfaceEvent> {
        self.surface_tx.clone()
    }

    /// Wire the orchestrator's event channel into the UI
    pub fn attach_dashboard(&mut self, dashboard_tx: mpsc::UnboundedSender<DashboardEvent>) {
        self.dashboard_tx = Some(dashboard_tx);
    }

    fn dispatch(&self, event: DashboardEvent) {
        if let Some(dashboard_tx) = &self.dashboard_tx {
            if let Err(e) = dashboard_tx.send(event) {
                error!("Failed to dispatch dashboard event: {}", e);
            }
        }
    }

    /// Run the UI manager loop
    pub async fn run(&mut self) -> Result<()> {
        info!("Starting UI manager");

        let surface_shutdown_tx = self.surface_tx.clone();
        let dashboard_shutdown_tx = self.dashboard_tx.clone();

        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for Ctrl+C: {}", e);
                return;
            }

            tracing::info!("Ctrl+C received, initiating shutdown");
            let _ = surface_shutdown_tx.send(SurfaceEvent::ShutdownRequested);
            if let Some(tx) = dashboard_shutdown_tx {
                let _ = tx.send(DashboardEvent::ShutdownRequested);
            }
        });

        self.tui =
            Some(Tui::new().map_err(|e| anyhow::anyhow!("Failed to initialise terminal: {}", e))?);
        self.render_state.should_redraw = true;
        self.last_render = Instant::now()
            .checked_sub(RENDER_INTERVAL)
            .unwrap_or_else(Instant::now);

        while !self.render_state.should_quit && !self.app_state.should_quit {
            // Process async events from the orchestrator
            self.process_surface_events()?;

            // Handle terminal input (non-blocking)
            self.poll_terminal_events()?;

            // Render on dirty state or cadence tick
            let now = Instant::now();
            let charts_dirty = self.app_state.charts.take_dirty();
            if self.render_state.should_redraw
                || charts_dirty
                || now.duration_since(self.last_render) >= RENDER_INTERVAL
            {
                if let Some(tui) = self.tui.as_mut() {
                    self.render_state.render_count += 1;
                    self.render_state.last_render_time = std::time::SystemTime::now()
                        .duration_since(std::time::UNIX_EPOCH)
                        .unwrap()
                        .as_millis() as u64;

                    tui.draw(&mut self.app_state, &self.render_state)
                        .map_err(|e| anyhow::anyhow!("Failed to render frame: {}", e))?;
                }
                self.render_state.should_redraw = false;
                self.last_render = now;
            }

            // Prevent busy loop
            tokio::time::sleep(Duration::from_millis(16)).await;
        }

        if let Some(tui) = self.tui.as_mut() {
            tui.restore()
                .map_err(|e| anyhow::anyhow!("Failed to restore terminal state: {}", e))?;
        }

        info!("UI manager stopped");
        Ok(())
    }

    /// Drain and apply pending surface events
    fn process_surface_events(&mut self) -> Result<()> {
        let mut events_to_process = Vec::new();
        if let Some(surface_rx) = &mut self.surface_rx {
            while let Ok(event) = surface_rx.try_recv() {
                events_to_process.push(event);
            }
        }

        for event in events_to_process {
            self.handle_surface_event(event);
            self.render_state.should_redraw = true;
        }

        Ok(())
    }

    /// Apply a single surface event to the application state
    pub fn handle_surface_event(&mut self, event: SurfaceEvent) {
        debug!("Handling surface event: {:?}", event);

        match event {
            SurfaceEvent::LoadingChanged { loading } => {
                self.app_state.is_loading = loading;
            }
            SurfaceEvent::StatusChanged { status } => {
                self.app_state.connection_status = status;
            }
            SurfaceEvent::ErrorMessage { message } => {
                self.render_state.error_message = Some(message);
            }
            SurfaceEvent::Snapshot {
                bundle,
                last_update,
            } => {
                self.render_state.error_message = None;
                self.render_state.info_message = None;
                self.app_state.apply_snapshot(bundle, last_update);
            }
            SurfaceEvent::PerformanceUpdate {
                metrics,
                last_update,
            } => {
                self.app_state.apply_performance(metrics, last_update);
            }
            SurfaceEvent::ControlsChanged {
                date_range_days,
                source,
            } => {
                self.app_state.date_range_days = date_range_days;
                self.app_state.data_source = source;
            }
            SurfaceEvent::ShutdownRequested => {
                info!("UI received shutdown request");
                self.render_state.should_quit = true;
            }
        }
    }

    /// Poll for keyboard/terminal events and translate into dashboard events
    fn poll_terminal_events(&mut self) -> Result<()> {
        while event::poll(Duration::from_millis(0))? {
            match event::read()? {
                Event::Key(key_event) => {
                    let action = handle_key_event(&mut self.app_state, key_event);
                    self.render_state.should_redraw = true;

                    match action {
                        UiAction::None => {}
                        UiAction::QuitRequested => {
                            self.render_state.should_quit = true;
                            self.dispatch(DashboardEvent::ShutdownRequested);
                        }
                        UiAction::Dispatch(event) => {
                            self.dispatch(event);
                        }
                    }
                }
                Event::Resize(_, _) => {
                    self.app_state.charts.resize_all();
                    self.render_state.should_redraw = true;
                }
                Event::FocusGained => {
                    self.app_state.focused = true;
                    self.dispatch(DashboardEvent::FocusChanged { focused: true });
                }
                Event::FocusLost => {
                    self.app_state.focused = false;
                    self.dispatch(DashboardEvent::FocusChanged { focused: false });
                }
                Event::Mouse(_) | Event::Paste(_) => {}
            }
        }

        if self.app_state.should_quit {
            self.render_state.should_quit = true;
        }

        Ok(())
    }

    /// Graceful shutdown
    pub async fn shutdown(&mut self) -> Result<()> {
        info!("Shutting down UI manager");

        self.render_state.should_quit = true;
        self.app_state.should_quit = true;
        self.app_state.charts.destroy_all();

        if let Some(tui) = self.tui.as_mut() {
            if let Err(e) = tui.restore() {
                warn!("Failed to restore terminal during shutdown: {}", e);
            }
        }

        Ok(())
    }

    /// Get application state
    pub fn app_state(&self) -> &AppState {
        &self.app_state
    }

    /// Get render statistics
    pub fn render_state(&self) -> &RenderState {
        &self.render_state
    }
}
