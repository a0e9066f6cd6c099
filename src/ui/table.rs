// Tab content rendering: overview prose and data tables.

use ratatui::{prelude::*, widgets::*};

use crate::app::Tab;
use crate::pipeline::TabData;

/// Overview tab: the repo_info summary block above the `gh repo view`
/// body text.
pub fn draw_overview(frame: &mut Frame, data: &TabData, area: Rect) {
    let summary_height = data.summary.lines().count() as u16 + 1;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(summary_height), Constraint::Min(1)])
        .split(area);

    let summary = Paragraph::new(data.summary.as_str()).style(Style::default().fg(Color::Cyan));
    frame.render_widget(summary, chunks[0]);

    let body = Paragraph::new(data.body.as_str()).wrap(Wrap { trim: false });
    frame.render_widget(body, chunks[1]);
}

/// Data tabs: one summary line above the table.
pub fn draw_table(frame: &mut Frame, tab: Tab, data: &TabData, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(area);

    let summary = Paragraph::new(data.summary.as_str());
    frame.render_widget(summary, chunks[0]);

    let Some(columns) = tab.columns() else {
        return;
    };

    let header = Row::new(columns).style(Style::default().add_modifier(Modifier::BOLD));
    let rows: Vec<Row> = data.rows.iter().map(|row| Row::new(row.clone())).collect();

    let widths = [
        Constraint::Length(8),
        Constraint::Length(16),
        Constraint::Length(12),
        Constraint::Length(26),
        Constraint::Min(10),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .row_highlight_style(Style::default().bg(Color::DarkGray));

    frame.render_widget(table, chunks[1]);
}
