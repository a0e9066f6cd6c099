// UI module for rendering the TUI.
// Side lists, tab bar, tab content, status bar, and help overlay.

mod list;
mod table;
mod tabs;

use ratatui::{prelude::*, widgets::*};

use crate::app::{App, Tab};
use crate::gh::CommandRunner;
use crate::state::LoadingState;

/// Main draw function that renders the entire UI.
pub fn draw<F: CommandRunner>(frame: &mut Frame, app: &mut App<F>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // Main area
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    let main = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(28), // Side lists
            Constraint::Min(1),     // Tabbed content
        ])
        .split(chunks[0]);

    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(40), Constraint::Min(1)])
        .split(main[0]);

    list::draw_owners(frame, app, side[0]);
    list::draw_repos(frame, app, side[1]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(main[1]);

    tabs::draw_tabs(frame, app, right[0]);
    draw_content(frame, app, right[1]);

    draw_status_bar(frame, chunks[1]);

    if app.show_help {
        draw_help_overlay(frame);
    }
}

/// Draw the active tab's content area.
fn draw_content<F: CommandRunner>(frame: &mut Frame, app: &mut App<F>, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", app.active_tab.title()));

    match &app.content {
        LoadingState::Idle => {
            let text = Paragraph::new("Select a repository")
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::DarkGray))
                .block(block);
            frame.render_widget(text, area);
        }
        LoadingState::Loading => {
            let text = Paragraph::new("Please wait...")
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Yellow))
                .block(block);
            frame.render_widget(text, area);
        }
        LoadingState::Error(e) => {
            let text = Paragraph::new(format!("❌ {}", e))
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Red))
                .block(block);
            frame.render_widget(text, area);
        }
        LoadingState::Loaded(data) => {
            let inner = block.inner(area);
            frame.render_widget(block, area);
            match app.active_tab {
                Tab::Overview => table::draw_overview(frame, data, inner),
                tab => table::draw_table(frame, tab, data, inner),
            }
        }
    }
}

/// Draw the status bar with keybinding hints.
fn draw_status_bar(frame: &mut Frame, area: Rect) {
    let hints = vec![
        Span::raw(" ↑↓ "),
        Span::styled("Navigate", Style::default().fg(Color::DarkGray)),
        Span::raw("  ←→ "),
        Span::styled("Pane", Style::default().fg(Color::DarkGray)),
        Span::raw("  ↵ "),
        Span::styled("Select", Style::default().fg(Color::DarkGray)),
        Span::raw("  Tab/OIPA "),
        Span::styled("Switch", Style::default().fg(Color::DarkGray)),
        Span::raw("  r "),
        Span::styled("Refresh", Style::default().fg(Color::DarkGray)),
        Span::raw("  ? "),
        Span::styled("Help", Style::default().fg(Color::DarkGray)),
        Span::raw("  q "),
        Span::styled("Quit", Style::default().fg(Color::DarkGray)),
    ];
    frame.render_widget(Paragraph::new(Line::from(hints)), area);
}

/// Draw the help overlay.
fn draw_help_overlay(frame: &mut Frame) {
    let area = frame.area();

    let popup_width = 52;
    let popup_height = 15;
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    frame.render_widget(Clear, popup_area);

    let entry = |keys: &'static str, action: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {:<14}", keys), Style::default().fg(Color::Cyan)),
            Span::raw(action),
        ])
    };

    let help_text = vec![
        Line::from(vec![Span::styled(
            "Keyboard Shortcuts",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        entry("↑/↓ or j/k", "Navigate focused list"),
        entry("←/→ or h/l", "Focus owners / repositories"),
        entry("Enter", "Select owner or repository"),
        entry("Tab/BackTab", "Cycle tabs"),
        entry("O I P A", "Overview / Issues / PRs / Actions"),
        entry("r", "Refresh current tab (skip cache)"),
        entry("?", "Show/hide this help"),
        entry("q", "Quit"),
        Line::from(""),
        Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::DarkGray)),
            Span::styled("Esc", Style::default().fg(Color::Yellow)),
            Span::styled(" to close", Style::default().fg(Color::DarkGray)),
        ]),
    ];

    let help_paragraph = Paragraph::new(help_text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Help ")
            .title_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
    );

    frame.render_widget(help_paragraph, popup_area);
}
