//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Application tabs
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub enum AppTab {
    #[default]
    Status,
    Notifications,
}

/// Events generated from user input in the UI layer
#[derive(Debug, Clone)]
pub enum UiEvent {
    // Tab navigation
    SwitchTab(AppTab),

    // Status actions
    ToggleSleep,
    Refresh,

    // Notifications
    ScrollUp,
    ScrollDown,
    ClearNotification,
    ReopenStream,

    // Popups
    ToggleHelp,
    CloseHelp,

    // System
    Quit,
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(key: KeyEvent, active_tab: AppTab, show_help: bool) -> Option<UiEvent> {
    use crossterm::event::KeyEventKind;

    if key.kind != KeyEventKind::Press {
        return None;
    }

    // Global Ctrl shortcuts
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if key.code == KeyCode::Char('c') {
            return Some(UiEvent::Quit);
        }
    }

    // Help popup swallows everything
    if show_help {
        return Some(UiEvent::CloseHelp);
    }

    // Tab switching: 1 and 2 keys
    match key.code {
        KeyCode::Char('1') => return Some(UiEvent::SwitchTab(AppTab::Status)),
        KeyCode::Char('2') => return Some(UiEvent::SwitchTab(AppTab::Notifications)),
        _ => {}
    }

    match active_tab {
        AppTab::Status => handle_status_tab_keys(key),
        AppTab::Notifications => handle_notifications_tab_keys(key),
    }
}

/// Handle keys for the Status tab
fn handle_status_tab_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Char('q') => Some(UiEvent::Quit),
        KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
        KeyCode::Char('t') | KeyCode::Enter | KeyCode::Char(' ') => Some(UiEvent::ToggleSleep),
        KeyCode::Char('r') => Some(UiEvent::Refresh),
        _ => None,
    }
}

/// Handle keys for the Notifications tab
fn handle_notifications_tab_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Char('q') => Some(UiEvent::Quit),
        KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
        KeyCode::Up => Some(UiEvent::ScrollUp),
        KeyCode::Down => Some(UiEvent::ScrollDown),
        KeyCode::Char('c') => Some(UiEvent::ClearNotification),
        KeyCode::Char('o') => Some(UiEvent::ReopenStream),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_toggle_key_on_status_tab() {
        let event = key_to_ui_event(press(KeyCode::Char('t')), AppTab::Status, false);
        assert!(matches!(event, Some(UiEvent::ToggleSleep)));
    }

    #[test]
    fn test_any_key_closes_help() {
        let event = key_to_ui_event(press(KeyCode::Char('t')), AppTab::Status, true);
        assert!(matches!(event, Some(UiEvent::CloseHelp)));
    }

    #[test]
    fn test_tab_switch_keys() {
        let event = key_to_ui_event(press(KeyCode::Char('2')), AppTab::Status, false);
        assert!(matches!(event, Some(UiEvent::SwitchTab(AppTab::Notifications))));
    }
}
