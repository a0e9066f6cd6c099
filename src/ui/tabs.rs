// Tab bar rendering with visual indication of the active tab.

use ratatui::{prelude::*, widgets::*};

use crate::app::{App, Tab};
use crate::gh::CommandRunner;

/// Draw the tab bar above the content area.
pub fn draw_tabs<F: CommandRunner>(frame: &mut Frame, app: &App<F>, area: Rect) {
    let tabs = [Tab::Overview, Tab::Issues, Tab::PullRequests, Tab::Actions];

    let tab_titles: Vec<Line> = tabs
        .iter()
        .map(|tab| {
            let style = if *tab == app.active_tab {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            Line::from(Span::styled(tab.title(), style))
        })
        .collect();

    let selected_index = tabs.iter().position(|t| *t == app.active_tab).unwrap_or(0);

    let tabs_widget = Tabs::new(tab_titles)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" hubdeck ")
                .title_style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
        )
        .select(selected_index)
        .highlight_style(Style::default().fg(Color::Yellow))
        .divider(Span::raw(" │ "));

    frame.render_widget(tabs_widget, area);
}
