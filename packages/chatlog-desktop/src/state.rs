//! Centralized application state
//!
//! Wraps the viewer state machine from `chatlog_core` so it can live as a
//! GPUI global, alongside the settings the UI needs at render time.

use chatlog_core::{ViewerConfig, ViewerState};
use gpui::*;
use std::time::Duration;

/// Centralized application state
pub struct AppState {
    pub viewer: ViewerState,
    /// Delay before scrolling freshly loaded messages into view
    pub scroll_settle: Duration,
}

impl AppState {
    pub fn new(config: &ViewerConfig) -> Self {
        Self {
            viewer: ViewerState::new(config.theme),
            scroll_settle: config.scroll_settle(),
        }
    }
}

impl Global for AppState {}

/// Initialize application state
pub fn init(config: &ViewerConfig, cx: &mut App) {
    cx.set_global(AppState::new(config));
    tracing::debug!("Application state initialized");
}

/// Read the viewer state
pub fn viewer(cx: &App) -> &ViewerState {
    &cx.global::<AppState>().viewer
}
