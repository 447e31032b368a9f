//! Per-step screen bodies.
//!
//! These are presentation only: static copy for each stage of the
//! walkthrough, plus the cross-app navigation context panel when the
//! screen has accepted an external event.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::bridge::NavigationContext;
use crate::workflow::WorkflowStep;

/// Render the content area for the active screen.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    step: WorkflowStep,
    user_name: &str,
    context: Option<&NavigationContext>,
) {
    let block = Block::default()
        .title(format!(" {} ", step.label()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(2), // Title
            Constraint::Min(4),    // Body
            Constraint::Length(6), // Navigation context
            Constraint::Length(1), // Footer
        ])
        .split(inner);

    let title = Paragraph::new(Line::from(Span::styled(
        page_title(step, user_name),
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    let body = Paragraph::new(body_lines(step))
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Left);
    frame.render_widget(body, chunks[1]);

    render_context_panel(frame, chunks[2], context);

    let footer = Paragraph::new(Line::from(vec![
        Span::styled("↑/↓", Style::default().fg(Color::Yellow)),
        Span::raw(" select  "),
        Span::styled("Enter", Style::default().fg(Color::Yellow)),
        Span::raw(" open  "),
        Span::styled("1-6", Style::default().fg(Color::Yellow)),
        Span::raw(" jump  "),
        Span::styled("Esc", Style::default().fg(Color::Yellow)),
        Span::raw(" dismiss  "),
        Span::styled("q", Style::default().fg(Color::Yellow)),
        Span::raw(" quit"),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(footer, chunks[3]);
}

fn page_title(step: WorkflowStep, user_name: &str) -> String {
    match step {
        WorkflowStep::Welcome => format!("Welcome, {user_name}!"),
        WorkflowStep::FinancialStatementScan => "Financial Statement Scan".to_string(),
        WorkflowStep::OperationalDocxScan => "Covenant Monitoring - DSCR Trend".to_string(),
        WorkflowStep::Y14ReportGeneration => "Y-14 Report Generation".to_string(),
        WorkflowStep::CovenantMonitoring => "Covenant Monitoring".to_string(),
        WorkflowStep::BenefitsSummary => {
            "Benefits Summary of Smart Glasses + AI in Covenant Monitoring".to_string()
        }
    }
}

fn body_lines(step: WorkflowStep) -> Vec<Line<'static>> {
    match step {
        WorkflowStep::Welcome => vec![
            Line::from("This walkthrough follows a commercial loan through six stages of"),
            Line::from("automated covenant monitoring."),
            Line::default(),
            Line::from("Use the sidebar to move between stages."),
        ],
        WorkflowStep::FinancialStatementScan => vec![
            Line::from("Scanned financial statements feed the borrower's income, leverage,"),
            Line::from("and liquidity figures into the covenant model."),
        ],
        WorkflowStep::OperationalDocxScan => vec![
            Line::from(Span::styled(
                "Alert",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Potential breach detected - DSCR dropped below covenant level.",
                Style::default().fg(Color::Red),
            )),
            Line::from("Immediate attention required for corrective action planning."),
            Line::default(),
            Line::from(Span::styled(
                "Q3 Highlight",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from("Debt service coverage trended down across the quarter."),
        ],
        WorkflowStep::Y14ReportGeneration => vec![
            Line::from("Regulatory Y-14 schedules are assembled from the scanned inputs"),
            Line::from("and queued for review."),
        ],
        WorkflowStep::CovenantMonitoring => vec![
            Line::from("Active covenants are tracked against the latest scan results."),
            Line::from("Breaches raise alerts on the DSCR trend screen."),
        ],
        WorkflowStep::BenefitsSummary => vec![
            Line::from("Faster covenant checks, earlier breach detection, and a shorter"),
            Line::from("path from document to decision."),
        ],
    }
}

fn render_context_panel(frame: &mut Frame, area: Rect, context: Option<&NavigationContext>) {
    let Some(context) = context else {
        return;
    };

    let block = Block::default()
        .title(" Cross-app navigation ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = vec![
        Line::from(vec![
            Span::styled("From: ", Style::default().fg(Color::Gray)),
            Span::styled(
                context.source_app_id.clone(),
                Style::default().fg(Color::Green),
            ),
            Span::styled("  at ", Style::default().fg(Color::Gray)),
            Span::raw(context.timestamp.clone()),
        ]),
        Line::from(vec![
            Span::styled("Referrer: ", Style::default().fg(Color::Gray)),
            Span::raw(context.referrer.clone()),
            Span::styled("  Action: ", Style::default().fg(Color::Gray)),
            Span::raw(context.action.clone()),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}
