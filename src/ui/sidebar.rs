//! Step-progress sidebar shown on every screen.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::workflow::Step;

/// Render the step list with completion marks, the active highlight,
/// and the cursor for the currently selected row.
pub fn render(frame: &mut Frame, area: Rect, steps: &[Step], selected: usize) {
    let block = Block::default()
        .title(" Workflow ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = Vec::with_capacity(steps.len() * 2);
    for step in steps {
        let cursor = if step.index == selected { "> " } else { "  " };
        let mark = if step.completed { " ✓" } else { "  " };

        let label_style = if step.active {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else if step.completed {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        lines.push(Line::from(vec![
            Span::styled(cursor, Style::default().fg(Color::Yellow)),
            Span::styled(format!("{} ", step.sublabel), Style::default().fg(Color::Cyan)),
            Span::styled(step.label, label_style),
            Span::styled(mark, Style::default().fg(Color::Green)),
        ]));
        lines.push(Line::default());
    }

    frame.render_widget(Paragraph::new(lines), inner);
}
