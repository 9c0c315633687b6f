//! App state - pure data structure with no I/O logic

use std::time::{Duration, Instant};

use crate::config::Config;
use crate::constants::ERROR_TTL_SECS;
use crate::messages::ui_events::AppTab;
use crate::messages::RenderState;
use crate::models::{Notification, SleepStatus, StatusSnapshot};

/// A transient on-screen error with a fixed time-to-live
#[derive(Clone, Debug)]
pub struct ErrorNotice {
    pub text: String,
    pub set_at: Instant,
}

impl ErrorNotice {
    pub fn new(text: impl Into<String>) -> Self {
        ErrorNotice {
            text: text.into(),
            set_at: Instant::now(),
        }
    }

    pub fn expired(&self, now: Instant) -> bool {
        now.duration_since(self.set_at) >= Duration::from_secs(ERROR_TTL_SECS)
    }
}

/// Main application state - pure data, no I/O
pub struct AppState {
    // Tab navigation
    pub active_tab: AppTab,

    // Status snapshot (last successful fetch, never locally mutated)
    pub sleep_status: Option<SleepStatus>,
    pub statement: String,

    // Fetch/toggle lifecycle
    pub is_loading: bool,
    pub next_request_id: u64,
    pub pending_fetch_id: Option<u64>,
    pub pending_toggle_id: Option<u64>,
    pub error: Option<ErrorNotice>,

    // Push registration (one-shot per session)
    pub has_subscribed: bool,
    pub push_registered: bool,

    // Notification stream
    pub stream_id: Option<u64>,
    pub stream_connected: bool,
    pub notification: Option<Notification>,
    pub notifications: Vec<Notification>,
    pub notifications_scroll: u16,

    // Popups
    pub show_help: bool,

    // Configuration
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        AppState {
            active_tab: AppTab::Status,
            sleep_status: None,
            statement: String::new(),
            is_loading: false,
            next_request_id: 1,
            pending_fetch_id: None,
            pending_toggle_id: None,
            error: None,
            has_subscribed: false,
            push_registered: false,
            stream_id: None,
            stream_connected: false,
            notification: None,
            notifications: Vec::new(),
            notifications_scroll: 0,
            show_help: false,
            config,
        }
    }

    /// Generate a unique request ID
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    /// Replace the snapshot wholesale (fetch is the source of truth)
    pub fn replace_snapshot(&mut self, snapshot: StatusSnapshot) {
        self.sleep_status = Some(snapshot.sleep_status);
        self.statement = snapshot.statement;
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        RenderState {
            active_tab: self.active_tab,
            sleep_status: self.sleep_status,
            statement: self.statement.clone(),
            is_loading: self.is_loading,
            error: self.error.as_ref().map(|e| e.text.clone()),
            notification: self.notification.clone(),
            notifications: self.notifications.clone(),
            notifications_scroll: self.notifications_scroll,
            stream_connected: self.stream_connected,
            push_registered: self.push_registered,
            show_help: self.show_help,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
