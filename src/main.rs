//! Cribwatch TUI - Actor-based sleep-status client
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - central state machine processing events
//! - Network Layer (Tokio) - async HTTP execution and notification stream

mod models;
mod config;
mod ui;
mod messages;
mod app;
mod network;
mod constants;

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::*,
};
use tokio::sync::mpsc;

use app::AppActor;
use app::AppState;
use config::Config;
use messages::ui_events::{key_to_ui_event, AppTab};
use messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
use network::NetworkActor;
use ui::{notification_line, status_color, status_label, switch_glyph};

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging to file
    let file_appender = tracing_appender::rolling::never(".", "cribwatch.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    let config = Config::load();

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel::<NetworkCommand>();
    let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel::<NetworkResponse>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn network actor
    let network_actor = NetworkActor::new(config.clone(), net_resp_tx);
    tokio::spawn(network_actor.run(net_cmd_rx));

    // Spawn app actor
    let app_actor = AppActor::new(AppState::new(config), net_cmd_tx, render_tx);
    tokio::spawn(app_actor.run(ui_rx, net_resp_rx));

    // Run UI loop (synchronous with async polling)
    run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await?;

    Ok(())
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();

    loop {
        // Draw with current state
        terminal.draw(|f| draw_ui(f, &current_state))?;

        // Poll for events with timeout
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Some(event) =
                    key_to_ui_event(key, current_state.active_tab, current_state.show_help)
                {
                    if matches!(event, UiEvent::Quit) {
                        let _ = ui_tx.send(event);
                        break;
                    }
                    let _ = ui_tx.send(event);
                }
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState) {
    let area = f.area();

    // Main layout with tab bar
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),  // Tab bar
            Constraint::Min(0),     // Content
            Constraint::Length(1),  // Status bar
        ])
        .split(area);

    draw_tab_bar(f, state, main_chunks[0]);

    match state.active_tab {
        AppTab::Status => draw_status_tab(f, state, main_chunks[1]),
        AppTab::Notifications => draw_notifications_tab(f, state, main_chunks[1]),
    }

    draw_status_bar(f, state, main_chunks[2]);

    if state.show_help {
        draw_help_popup(f, area);
    }
}

fn draw_tab_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let tabs = vec![
        Span::styled(
            " 1:Status ",
            if state.active_tab == AppTab::Status {
                Style::default().fg(Color::Black).bg(Color::Cyan).bold()
            } else {
                Style::default().fg(Color::Gray)
            },
        ),
        Span::raw(" "),
        Span::styled(
            " 2:Notifications ",
            if state.active_tab == AppTab::Notifications {
                Style::default().fg(Color::Black).bg(Color::Yellow).bold()
            } else {
                Style::default().fg(Color::Gray)
            },
        ),
        Span::styled(
            if state.stream_connected { " [*]" } else { "" },
            Style::default().fg(Color::Green),
        ),
    ];

    let tab_line = Line::from(tabs);
    f.render_widget(Paragraph::new(tab_line), area);
}

fn draw_status_tab(f: &mut Frame, state: &RenderState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),     // Statement / notification
            Constraint::Length(5),  // Switch
            Constraint::Length(3),  // Error line
        ])
        .split(area);

    draw_message_panel(f, state, chunks[0]);
    draw_switch_panel(f, state, chunks[1]);
    draw_error_line(f, state, chunks[2]);
}

fn draw_message_panel(f: &mut Frame, state: &RenderState, area: Rect) {
    let accent = status_color(state.sleep_status);

    // An incoming notification overrides the statement while present
    let (title, body) = match &state.notification {
        Some(note) => (note.title.clone(), note.body.clone()),
        None => (String::new(), state.statement.clone()),
    };

    let mut lines: Vec<Line> = Vec::new();
    if !title.is_empty() {
        lines.push(Line::from(Span::styled(
            title,
            Style::default().fg(Color::Yellow).bold(),
        )));
        lines.push(Line::from(""));
    }
    if state.is_loading && body.is_empty() {
        lines.push(Line::from(Span::styled(
            "Loading...",
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        lines.push(Line::from(body));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent))
        .title(if state.is_loading { " Status [...] " } else { " Status " });

    let panel = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .alignment(Alignment::Center);
    f.render_widget(panel, area);
}

fn draw_switch_panel(f: &mut Frame, state: &RenderState, area: Rect) {
    let accent = status_color(state.sleep_status);

    let lines = vec![
        Line::from(Span::styled(
            status_label(state.sleep_status),
            Style::default().fg(accent).bold(),
        )),
        Line::from(Span::styled(
            switch_glyph(state.sleep_status),
            Style::default().fg(accent),
        )),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Sleep switch (t:toggle r:refresh) ");

    let panel = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center);
    f.render_widget(panel, area);
}

fn draw_error_line(f: &mut Frame, state: &RenderState, area: Rect) {
    let content = match &state.error {
        Some(message) => Line::from(Span::styled(
            message.clone(),
            Style::default().fg(Color::Red),
        )),
        None => Line::from(""),
    };

    let panel = Paragraph::new(content)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);
    f.render_widget(panel, area);
}

fn draw_notifications_tab(f: &mut Frame, state: &RenderState, area: Rect) {
    let connected = if state.stream_connected {
        " [+] Connected"
    } else {
        " [-] Disconnected (o:reopen)"
    };
    let registered = if state.push_registered { " | token registered" } else { "" };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Notifications{}{} (↑/↓ scroll, c:clear) ", connected, registered));

    let mut lines: Vec<Line> = state.notifications.iter().map(notification_line).collect();

    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "No notifications yet.",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let log = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((state.notifications_scroll, 0));
    f.render_widget(log, area);
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let status = if state.is_loading {
        " Loading... "
    } else {
        " 1/2:tabs | t:toggle | r:refresh | ?:help | q:quit "
    };

    let bar = Paragraph::new(status).style(Style::default().fg(Color::DarkGray));
    f.render_widget(bar, area);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);

    let help_text = r#"
 CRIBWATCH TUI - Keyboard Shortcuts

 NAVIGATION
   1 / 2              Switch tabs

 STATUS
   t / Enter / Space  Toggle sleep status
   r                  Refresh from the backend

 NOTIFICATIONS
   ↑ / ↓              Scroll log
   c                  Clear the current notification
   o                  Reopen the notification stream

 GENERAL
   ?                  Toggle this help
   q / Ctrl+C         Quit

 Press any key to close...
"#;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let help = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
