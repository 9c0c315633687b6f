//! App actor - message loop processing UI events and network responses

use std::time::{Duration, Instant};

use tokio::sync::mpsc;

use crate::app::state::AppState;
use crate::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};

/// How often the actor wakes up to expire the transient error message
const TICK_INTERVAL: Duration = Duration::from_millis(250);

/// App actor that processes UI events and network responses
pub struct AppActor {
    state: AppState,
    network_tx: mpsc::UnboundedSender<NetworkCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
}

impl AppActor {
    pub fn new(
        state: AppState,
        network_tx: mpsc::UnboundedSender<NetworkCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
    ) -> Self {
        AppActor {
            state,
            network_tx,
            render_tx,
        }
    }

    /// Run the actor message loop
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut net_rx: mpsc::UnboundedReceiver<NetworkResponse>,
    ) {
        // Fetch on mount and open the notification stream
        if let Some(cmd) = self.state.prepare_fetch() {
            let _ = self.network_tx.send(cmd);
        }
        if let Some(cmd) = self.state.prepare_stream() {
            let _ = self.network_tx.send(cmd);
        }
        let _ = self.render_tx.send(self.state.to_render_state());

        let mut tick = tokio::time::interval(TICK_INTERVAL);

        loop {
            tokio::select! {
                Some(event) = ui_rx.recv() => {
                    if self.handle_ui_event(event) {
                        // Quit signal received
                        let _ = self.network_tx.send(NetworkCommand::Shutdown);
                        break;
                    }
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                Some(response) = net_rx.recv() => {
                    tracing::trace!(
                        id = response.id(),
                        terminal = response.is_terminal(),
                        "Network response"
                    );
                    if let Some(follow_up) = self.state.handle_response(response) {
                        let _ = self.network_tx.send(follow_up);
                    }
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                _ = tick.tick() => {
                    let had_error = self.state.error.is_some();
                    self.state.expire_error(Instant::now());
                    if had_error && self.state.error.is_none() {
                        let _ = self.render_tx.send(self.state.to_render_state());
                    }
                }
                else => break,
            }
        }
    }

    /// Handle a UI event, returns true if quit was requested
    fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        match event {
            // Tab switching
            UiEvent::SwitchTab(tab) => self.state.switch_tab(tab),

            // Status actions
            UiEvent::ToggleSleep => {
                if let Some(cmd) = self.state.prepare_toggle() {
                    let _ = self.network_tx.send(cmd);
                }
            }
            UiEvent::Refresh => {
                if let Some(cmd) = self.state.prepare_fetch() {
                    let _ = self.network_tx.send(cmd);
                }
            }

            // Notifications
            UiEvent::ScrollUp => self.state.scroll_up(),
            UiEvent::ScrollDown => self.state.scroll_down(),
            UiEvent::ClearNotification => self.state.clear_notification(),
            UiEvent::ReopenStream => {
                if let Some(cmd) = self.state.reopen_stream() {
                    let _ = self.network_tx.send(cmd);
                }
            }

            // Popups
            UiEvent::ToggleHelp => self.state.toggle_help(),
            UiEvent::CloseHelp => self.state.close_help(),

            // System
            UiEvent::Quit => return true,
        }

        false
    }
}
