use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Instant;

use super::UiAction;
use crate::dashboard::events::{DashboardEvent, RefreshReason};
use crate::ui::AppState;

/// Handle keyboard events for the TUI, returning actions for the orchestrator
pub fn handle_key_event(app: &mut AppState, key_event: KeyEvent) -> UiAction {
    if key_event.kind == KeyEventKind::Release {
        return UiAction::None;
    }

    // Global shortcuts first
    if key_event.modifiers.contains(KeyModifiers::CONTROL) {
        match key_event.code {
            KeyCode::Char('c') | KeyCode::Char('d') => {
                app.should_quit = true;
                return UiAction::QuitRequested;
            }
            // The documented refresh shortcut; the modifier guard keeps
            // a plain 'r' from double-firing it
            KeyCode::Char('r') => {
                return UiAction::Dispatch(DashboardEvent::RefreshRequested {
                    reason: RefreshReason::Shortcut,
                });
            }
            _ => {}
        }
        return UiAction::None;
    }

    match key_event.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            app.should_quit = true;
            UiAction::QuitRequested
        }
        // Manual refresh control, disabled for a short hold after use
        KeyCode::Char('r') => {
            let now = Instant::now();
            if app.refresh_control_ready(now) {
                app.hold_refresh_control(now);
                UiAction::Dispatch(DashboardEvent::RefreshRequested {
                    reason: RefreshReason::Manual,
                })
            } else {
                UiAction::None
            }
        }
        KeyCode::Char('d') | KeyCode::Char('D') => {
            let days = app.cycle_date_range();
            UiAction::Dispatch(DashboardEvent::DateRangeChanged { days })
        }
        KeyCode::Char('s') | KeyCode::Char('S') => {
            let source = app.cycle_data_source();
            UiAction::Dispatch(DashboardEvent::DataSourceChanged { source })
        }
        _ => UiAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_quit_keys() {
        let mut app = AppState::new(&Config::default());
        let action = handle_key_event(&mut app, key(KeyCode::Char('q'), KeyModifiers::NONE));
        assert!(matches!(action, UiAction::QuitRequested));
        assert!(app.should_quit);
    }

    #[test]
    fn test_ctrl_r_dispatches_shortcut_refresh() {
        let mut app = AppState::new(&Config::default());
        let action = handle_key_event(&mut app, key(KeyCode::Char('r'), KeyModifiers::CONTROL));
        assert!(matches!(
            action,
            UiAction::Dispatch(DashboardEvent::RefreshRequested {
                reason: RefreshReason::Shortcut
            })
        ));
    }

    #[test]
    fn test_manual_refresh_respects_hold() {
        let mut app = AppState::new(&Config::default());

        let first = handle_key_event(&mut app, key(KeyCode::Char('r'), KeyModifiers::NONE));
        assert!(matches!(
            first,
            UiAction::Dispatch(DashboardEvent::RefreshRequested {
                reason: RefreshReason::Manual
            })
        ));

        // second press inside the hold window is swallowed
        let second = handle_key_event(&mut app, key(KeyCode::Char('r'), KeyModifiers::NONE));
        assert!(matches!(second, UiAction::None));
    }

    #[test]
    fn test_selector_keys_dispatch_changes() {
        let mut app = AppState::new(&Config::default());

        let range = handle_key_event(&mut app, key(KeyCode::Char('d'), KeyModifiers::NONE));
        assert!(matches!(
            range,
            UiAction::Dispatch(DashboardEvent::DateRangeChanged { days: 90 })
        ));

        let source = handle_key_event(&mut app, key(KeyCode::Char('s'), KeyModifiers::NONE));
        match source {
            UiAction::Dispatch(DashboardEvent::DataSourceChanged { source }) => {
                assert_ne!(source, "all");
            }
            _ => panic!("expected data source change"),
        }
    }
}
