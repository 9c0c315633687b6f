//! Command handlers - business logic for processing UI events

use std::time::Instant;

use crate::app::state::ErrorNotice;
use crate::app::AppState;
use crate::messages::ui_events::AppTab;
use crate::messages::{NetworkCommand, NetworkResponse};

impl AppState {
    // ========================
    // Navigation
    // ========================

    pub fn switch_tab(&mut self, tab: AppTab) {
        self.active_tab = tab;
    }

    pub fn scroll_up(&mut self) {
        self.notifications_scroll = self.notifications_scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.notifications_scroll = self.notifications_scroll.saturating_add(1);
    }

    // ========================
    // Help popup
    // ========================

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }

    // ========================
    // Status fetch
    // ========================

    /// Prepare a status fetch. Refused while another request is in flight.
    pub fn prepare_fetch(&mut self) -> Option<NetworkCommand> {
        if self.is_loading {
            return None;
        }

        self.is_loading = true;
        let id = self.next_id();
        self.pending_fetch_id = Some(id);

        Some(NetworkCommand::FetchStatus { id })
    }

    // ========================
    // Toggle
    // ========================

    /// Prepare a toggle to the opposite of the displayed state.
    ///
    /// Refused until a first snapshot has been fetched, and while any
    /// request is in flight.
    pub fn prepare_toggle(&mut self) -> Option<NetworkCommand> {
        if self.is_loading {
            return None;
        }
        let current = self.sleep_status?;

        self.is_loading = true;
        let id = self.next_id();
        self.pending_toggle_id = Some(id);

        Some(NetworkCommand::ToggleSleep {
            id,
            target: current.toggled(),
        })
    }

    // ========================
    // Notification stream
    // ========================

    /// Prepare opening the notification stream, if it is not already open.
    pub fn prepare_stream(&mut self) -> Option<NetworkCommand> {
        if self.stream_connected || self.stream_id.is_some() {
            return None;
        }

        let id = self.next_id();
        self.stream_id = Some(id);
        Some(NetworkCommand::OpenNotificationStream { id })
    }

    /// Reopen the stream after it closed (explicit user action)
    pub fn reopen_stream(&mut self) -> Option<NetworkCommand> {
        if self.stream_connected {
            return None;
        }
        self.stream_id = None;
        self.prepare_stream()
    }

    pub fn clear_notification(&mut self) {
        self.notification = None;
    }

    // ========================
    // Errors
    // ========================

    pub fn set_error(&mut self, text: impl Into<String>) {
        self.error = Some(ErrorNotice::new(text));
    }

    /// Drop the error notice once its TTL has elapsed
    pub fn expire_error(&mut self, now: Instant) {
        if self.error.as_ref().is_some_and(|e| e.expired(now)) {
            self.error = None;
        }
    }

    // ========================
    // Response handling
    // ========================

    /// Process a network response. May return a follow-up command
    /// (resync fetch after a toggle, subscribe after a token is issued).
    pub fn handle_response(&mut self, response: NetworkResponse) -> Option<NetworkCommand> {
        match response {
            NetworkResponse::Status { id, snapshot, time_ms } => {
                if self.pending_fetch_id == Some(id) {
                    tracing::debug!(id, time_ms, "Status fetched");
                    self.replace_snapshot(snapshot);
                    self.pending_fetch_id = None;
                    self.is_loading = false;
                }
                None
            }
            NetworkResponse::StatusError { id, message, time_ms } => {
                if self.pending_fetch_id == Some(id) {
                    tracing::warn!(id, time_ms, %message, "Status fetch failed");
                    // Prior snapshot stays untouched
                    self.set_error(message);
                    self.pending_fetch_id = None;
                    self.is_loading = false;
                }
                None
            }
            NetworkResponse::ToggleAccepted { id, time_ms } => {
                if self.pending_toggle_id == Some(id) {
                    tracing::info!(id, time_ms, "Toggle accepted, resyncing");
                    self.pending_toggle_id = None;
                    self.is_loading = false;
                    // Re-fetch is the source of truth, no optimistic update
                    return self.prepare_fetch();
                }
                None
            }
            NetworkResponse::ToggleUnchanged { id } => {
                if self.pending_toggle_id == Some(id) {
                    self.pending_toggle_id = None;
                    self.is_loading = false;
                    self.set_error("Already in that state");
                }
                None
            }
            NetworkResponse::ToggleError { id, message } => {
                if self.pending_toggle_id == Some(id) {
                    tracing::warn!(id, %message, "Toggle failed");
                    self.pending_toggle_id = None;
                    self.is_loading = false;
                    self.set_error(message);
                }
                None
            }
            NetworkResponse::TokenIssued { id, token } => {
                if self.stream_id != Some(id) {
                    return None;
                }
                self.stream_connected = true;
                if self.has_subscribed {
                    return None;
                }
                // One-shot per session, even across stream reopens
                self.has_subscribed = true;
                let id = self.next_id();
                Some(NetworkCommand::Subscribe { id, token })
            }
            NetworkResponse::Subscribed { id } => {
                tracing::info!(id, "Push token registered");
                self.push_registered = true;
                None
            }
            NetworkResponse::SubscribeError { id, message } => {
                // Best-effort: logged only, never surfaced to the user
                tracing::warn!(id, %message, "Push token registration failed");
                None
            }
            NetworkResponse::Notification { id, notification } => {
                if self.stream_id == Some(id) {
                    tracing::info!(title = %notification.title, "Notification received");
                    self.notification = Some(notification.clone());
                    self.notifications.push(notification);
                }
                None
            }
            NetworkResponse::StreamClosed { id } => {
                if self.stream_id == Some(id) {
                    tracing::info!(id, "Notification stream closed");
                    self.stream_connected = false;
                    self.stream_id = None;
                }
                None
            }
            NetworkResponse::StreamError { id, error } => {
                if self.stream_id == Some(id) {
                    tracing::warn!(id, %error, "Notification stream error");
                    self.stream_connected = false;
                    self.stream_id = None;
                }
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Notification, PushToken, SleepStatus, StatusSnapshot};
    use std::time::Duration;

    fn snapshot(status: SleepStatus, statement: &str) -> StatusSnapshot {
        StatusSnapshot {
            sleep_status: status,
            statement: statement.to_string(),
        }
    }

    fn fetched_state(status: SleepStatus) -> AppState {
        let mut state = AppState::default();
        let cmd = state.prepare_fetch().unwrap();
        let id = match cmd {
            NetworkCommand::FetchStatus { id } => id,
            other => panic!("unexpected command: {:?}", other),
        };
        state.handle_response(NetworkResponse::Status {
            id,
            snapshot: snapshot(status, "resting"),
            time_ms: 10,
        });
        state
    }

    #[test]
    fn test_fetch_replaces_snapshot() {
        let state = fetched_state(SleepStatus::Sleeping);
        assert_eq!(state.sleep_status, Some(SleepStatus::Sleeping));
        assert_eq!(state.statement, "resting");
        assert!(!state.is_loading);
    }

    #[test]
    fn test_failed_fetch_keeps_prior_snapshot() {
        let mut state = fetched_state(SleepStatus::Awake);
        let id = match state.prepare_fetch().unwrap() {
            NetworkCommand::FetchStatus { id } => id,
            other => panic!("unexpected command: {:?}", other),
        };
        state.handle_response(NetworkResponse::StatusError {
            id,
            message: "Failed to fetch sleep status".to_string(),
            time_ms: 5,
        });
        assert_eq!(state.sleep_status, Some(SleepStatus::Awake));
        assert_eq!(state.statement, "resting");
        assert!(state.error.is_some());
        assert!(!state.is_loading);
    }

    #[test]
    fn test_toggle_targets_opposite_state() {
        let mut state = fetched_state(SleepStatus::Awake);
        match state.prepare_toggle().unwrap() {
            NetworkCommand::ToggleSleep { target, .. } => {
                assert_eq!(target, SleepStatus::Sleeping);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_toggle_refused_before_first_fetch() {
        let mut state = AppState::default();
        assert!(state.prepare_toggle().is_none());
    }

    #[test]
    fn test_accepted_toggle_issues_exactly_one_resync_fetch() {
        let mut state = fetched_state(SleepStatus::Awake);
        let id = match state.prepare_toggle().unwrap() {
            NetworkCommand::ToggleSleep { id, .. } => id,
            other => panic!("unexpected command: {:?}", other),
        };
        let follow_up = state.handle_response(NetworkResponse::ToggleAccepted { id, time_ms: 8 });
        assert!(matches!(follow_up, Some(NetworkCommand::FetchStatus { .. })));
        // Replaying the same response must not trigger another fetch
        let replay = state.handle_response(NetworkResponse::ToggleAccepted { id, time_ms: 8 });
        assert!(replay.is_none());
        // Displayed status unchanged until the resync fetch lands
        assert_eq!(state.sleep_status, Some(SleepStatus::Awake));
    }

    #[test]
    fn test_unchanged_toggle_sets_already_error() {
        let mut state = fetched_state(SleepStatus::Sleeping);
        let id = match state.prepare_toggle().unwrap() {
            NetworkCommand::ToggleSleep { id, .. } => id,
            other => panic!("unexpected command: {:?}", other),
        };
        let follow_up = state.handle_response(NetworkResponse::ToggleUnchanged { id });
        assert!(follow_up.is_none());
        assert_eq!(state.error.as_ref().unwrap().text, "Already in that state");
        assert_eq!(state.sleep_status, Some(SleepStatus::Sleeping));
    }

    #[test]
    fn test_requests_refused_while_loading() {
        let mut state = fetched_state(SleepStatus::Awake);
        assert!(state.prepare_fetch().is_some());
        assert!(state.prepare_fetch().is_none());
        assert!(state.prepare_toggle().is_none());
    }

    #[test]
    fn test_error_expires_after_ttl() {
        let mut state = AppState::default();
        state.set_error("Failed to fetch sleep status");

        let set_at = state.error.as_ref().unwrap().set_at;
        state.expire_error(set_at + Duration::from_secs(4));
        assert!(state.error.is_some());
        state.expire_error(set_at + Duration::from_secs(5));
        assert!(state.error.is_none());
    }

    #[test]
    fn test_subscribe_fires_at_most_once_per_session() {
        let mut state = AppState::default();
        let stream_id = match state.prepare_stream().unwrap() {
            NetworkCommand::OpenNotificationStream { id } => id,
            other => panic!("unexpected command: {:?}", other),
        };

        let token = PushToken("device-abc".to_string());
        let first = state.handle_response(NetworkResponse::TokenIssued {
            id: stream_id,
            token: token.clone(),
        });
        assert!(matches!(first, Some(NetworkCommand::Subscribe { .. })));

        // Stream drops and the user reopens it; the token comes again
        state.handle_response(NetworkResponse::StreamClosed { id: stream_id });
        let stream_id = match state.reopen_stream().unwrap() {
            NetworkCommand::OpenNotificationStream { id } => id,
            other => panic!("unexpected command: {:?}", other),
        };
        let second = state.handle_response(NetworkResponse::TokenIssued {
            id: stream_id,
            token,
        });
        assert!(second.is_none());
    }

    #[test]
    fn test_notification_overrides_and_logs() {
        let mut state = AppState::default();
        let stream_id = match state.prepare_stream().unwrap() {
            NetworkCommand::OpenNotificationStream { id } => id,
            other => panic!("unexpected command: {:?}", other),
        };
        state.handle_response(NetworkResponse::TokenIssued {
            id: stream_id,
            token: PushToken("t".to_string()),
        });

        let note = Notification {
            title: "Nap time".to_string(),
            body: "Out like a light".to_string(),
            received_at: chrono::Utc::now(),
        };
        state.handle_response(NetworkResponse::Notification {
            id: stream_id,
            notification: note,
        });
        assert_eq!(state.notification.as_ref().unwrap().title, "Nap time");
        assert_eq!(state.notifications.len(), 1);

        state.clear_notification();
        assert!(state.notification.is_none());
        assert_eq!(state.notifications.len(), 1);
    }

    #[test]
    fn test_stale_response_ignored() {
        let mut state = fetched_state(SleepStatus::Awake);
        // Response for an id that is not pending
        state.handle_response(NetworkResponse::Status {
            id: 999,
            snapshot: snapshot(SleepStatus::Sleeping, "stale"),
            time_ms: 1,
        });
        assert_eq!(state.sleep_status, Some(SleepStatus::Awake));
        assert_eq!(state.statement, "resting");
    }
}
