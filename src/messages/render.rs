//! Render state - data structure sent from App layer to UI for rendering

use crate::messages::ui_events::AppTab;
use crate::models::{Notification, SleepStatus};

/// Complete state needed by the UI to render
#[derive(Debug, Clone, Default)]
pub struct RenderState {
    // Tab
    pub active_tab: AppTab,

    // Status screen
    pub sleep_status: Option<SleepStatus>,
    pub statement: String,
    pub is_loading: bool,
    pub error: Option<String>,

    // Latest notification overrides the displayed title/body while present
    pub notification: Option<Notification>,

    // Notifications screen
    pub notifications: Vec<Notification>,
    pub notifications_scroll: u16,
    pub stream_connected: bool,
    pub push_registered: bool,

    // Popups
    pub show_help: bool,
}
