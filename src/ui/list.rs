// Side list rendering for owners and repositories.

use ratatui::{prelude::*, widgets::*};

use crate::app::{App, Pane};
use crate::gh::CommandRunner;
use crate::state::SelectableList;

pub fn draw_owners<F: CommandRunner>(frame: &mut Frame, app: &mut App<F>, area: Rect) {
    let focused = app.focus == Pane::Owners;
    render_list(frame, &mut app.owners, " Organizations ", focused, area);
}

pub fn draw_repos<F: CommandRunner>(frame: &mut Frame, app: &mut App<F>, area: Rect) {
    let focused = app.focus == Pane::Repos;
    render_list(frame, &mut app.repos, " Repositories ", focused, area);
}

fn render_list(
    frame: &mut Frame,
    list: &mut SelectableList,
    title: &str,
    focused: bool,
    area: Rect,
) {
    let border_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let items: Vec<ListItem> = list
        .items
        .iter()
        .map(|item| ListItem::new(item.as_str()))
        .collect();

    let widget = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(title),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    frame.render_stateful_widget(widget, area, &mut list.list_state);
}
