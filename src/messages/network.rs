//! Network messages - communication between App and Network layers

use crate::models::{Notification, PushToken, SleepStatus, StatusSnapshot};

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone)]
pub enum NetworkCommand {
    /// Fetch the current status snapshot from the backend
    FetchStatus { id: u64 },
    /// Ask the backend to flip the sleep flag to `target`
    ToggleSleep { id: u64, target: SleepStatus },
    /// Register the push token with the backend (best-effort)
    Subscribe { id: u64, token: PushToken },
    /// Open the notification stream
    OpenNotificationStream { id: u64 },
    /// Shutdown the network actor
    Shutdown,
}

/// Responses sent from Network layer to App layer
#[derive(Debug, Clone)]
pub enum NetworkResponse {
    /// Status fetch succeeded
    Status {
        id: u64,
        snapshot: StatusSnapshot,
        time_ms: u64,
    },
    /// Status fetch failed (transport error, non-2xx, or bad payload)
    StatusError {
        id: u64,
        message: String,
        time_ms: u64,
    },
    /// Toggle accepted by the backend (2xx)
    ToggleAccepted { id: u64, time_ms: u64 },
    /// Backend reported the flag is already in the requested state (304)
    ToggleUnchanged { id: u64 },
    /// Toggle failed
    ToggleError { id: u64, message: String },
    /// Push token registration succeeded
    Subscribed { id: u64 },
    /// Push token registration failed (logged only, never surfaced)
    SubscribeError { id: u64, message: String },

    // Notification stream
    /// Stream opened and issued the device push token
    TokenIssued { id: u64, token: PushToken },
    /// A notification arrived on the stream
    Notification { id: u64, notification: Notification },
    /// Stream closed by the server or on shutdown
    StreamClosed { id: u64 },
    /// Stream error
    StreamError { id: u64, error: String },
}

impl NetworkResponse {
    /// Get the request ID from the response
    pub fn id(&self) -> u64 {
        match self {
            NetworkResponse::Status { id, .. } => *id,
            NetworkResponse::StatusError { id, .. } => *id,
            NetworkResponse::ToggleAccepted { id, .. } => *id,
            NetworkResponse::ToggleUnchanged { id } => *id,
            NetworkResponse::ToggleError { id, .. } => *id,
            NetworkResponse::Subscribed { id } => *id,
            NetworkResponse::SubscribeError { id, .. } => *id,
            NetworkResponse::TokenIssued { id, .. } => *id,
            NetworkResponse::Notification { id, .. } => *id,
            NetworkResponse::StreamClosed { id } => *id,
            NetworkResponse::StreamError { id, .. } => *id,
        }
    }

    /// Check if this is a terminal response (no more messages expected for this id)
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            NetworkResponse::Status { .. }
                | NetworkResponse::StatusError { .. }
                | NetworkResponse::ToggleAccepted { .. }
                | NetworkResponse::ToggleUnchanged { .. }
                | NetworkResponse::ToggleError { .. }
                | NetworkResponse::Subscribed { .. }
                | NetworkResponse::SubscribeError { .. }
                | NetworkResponse::StreamClosed { .. }
                | NetworkResponse::StreamError { .. }
        )
    }
}
