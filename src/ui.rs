use ratatui::prelude::*;

use crate::models::{Notification, SleepStatus};

/// Accent color for the current status (night blue while sleeping)
pub fn status_color(status: Option<SleepStatus>) -> Color {
    match status {
        Some(SleepStatus::Sleeping) => Color::Blue,
        Some(SleepStatus::Awake) => Color::Cyan,
        None => Color::DarkGray,
    }
}

/// Label for the switch panel
pub fn status_label(status: Option<SleepStatus>) -> &'static str {
    match status {
        Some(s) => s.as_str(),
        None => "Unknown",
    }
}

/// Big-switch rendering for the status screen: [ ]--- awake, ---[*] sleeping
pub fn switch_glyph(status: Option<SleepStatus>) -> &'static str {
    match status {
        Some(SleepStatus::Sleeping) => "────────[*]",
        Some(SleepStatus::Awake) => "[ ]────────",
        None => "───────────",
    }
}

/// One log line per notification, newest last
pub fn notification_line(note: &Notification) -> Line<'static> {
    let stamp = note.received_at.format("%H:%M:%S").to_string();
    Line::from(vec![
        Span::styled(format!("{} ", stamp), Style::default().fg(Color::DarkGray)),
        Span::styled(note.title.clone(), Style::default().fg(Color::Yellow).bold()),
        Span::raw("  "),
        Span::raw(note.body.clone()),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_switch_glyph_tracks_status() {
        assert!(switch_glyph(Some(SleepStatus::Sleeping)).ends_with("[*]"));
        assert!(switch_glyph(Some(SleepStatus::Awake)).starts_with("[ ]"));
    }
}
