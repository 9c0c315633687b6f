//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

/// Default base URL for the status backend
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Default URL for the notification stream
pub const DEFAULT_NOTIFY_URL: &str = "ws://localhost:3000/notify";

/// Seconds a transient error message stays on screen
pub const ERROR_TTL_SECS: u64 = 5;

/// Application name
#[allow(dead_code)]
pub const APP_NAME: &str = "Cribwatch TUI";

/// Application version
#[allow(dead_code)]
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
