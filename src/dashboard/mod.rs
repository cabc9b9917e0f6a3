//! Dashboard refresh lifecycle module
//!
//! Contains the orchestrator, its state, the event channels, and the
//! presentation adapter seam.

pub mod events;
pub mod orchestrator;
pub mod presenter;
pub mod state;
pub mod timers;

pub use events::{DashboardEvent, EventChannel, RefreshReason, SurfaceEvent};
pub use orchestrator::DashboardOrchestrator;
pub use presenter::{ChannelPresenter, Presenter};
pub use state::{DashboardState, LoadState, RefreshStats};
pub use timers::ScheduledTask;
