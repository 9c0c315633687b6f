//! # Cribwatch TUI
//!
//! A two-screen terminal client for a shared sleep-status board.
//!
//! ## Features
//! - Live sleep-status display with a toggle switch
//! - Manual refresh, re-fetch as the source of truth after every toggle
//! - Push notifications over a notification stream
//! - One-shot push-token registration with the backend
//! - Transient, self-clearing error messages
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (State machine)
//! - Network Layer (Tokio runtime)

pub mod models;
pub mod config;
pub mod ui;
pub mod messages;
pub mod app;
pub mod network;
pub mod constants;

// Re-export commonly used types
pub use models::{Notification, PushToken, SleepStatus, StatusSnapshot};
pub use config::Config;
pub use messages::{UiEvent, NetworkCommand, NetworkResponse, RenderState};
pub use app::{AppState, AppActor};
pub use network::NetworkActor;
