//! Floating notification banner, anchored top-center.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::notifications::{NotificationQueue, Severity};

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Info => Color::Cyan,
        Severity::Warning => Color::Yellow,
        Severity::Error => Color::Red,
        Severity::Success => Color::Green,
    }
}

/// Render the open notification, if any.
pub fn render(frame: &mut Frame, notifications: &NotificationQueue) {
    if !notifications.is_open() {
        return;
    }
    let notification = notifications.current();
    let color = severity_color(notification.severity);

    let area = top_center(frame.area(), notification.message.len() as u16 + 10);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));
    let text = Paragraph::new(Line::from(vec![
        Span::styled(
            format!(" {} ", notification.severity.as_str()),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::raw(notification.message.clone()),
        Span::styled("  [Esc] dismiss", Style::default().fg(Color::DarkGray)),
    ]))
    .alignment(Alignment::Center)
    .block(block);

    frame.render_widget(text, area);
}

fn top_center(area: Rect, width: u16) -> Rect {
    let width = width.min(area.width).max(20);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(area);
    Rect {
        height: 3.min(area.height),
        ..horizontal[1]
    }
}
