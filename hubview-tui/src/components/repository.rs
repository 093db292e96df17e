use crate::theme::Theme;
use hubview_core::{github::Repository, state::AppState};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
};

/// `In Repository:` header followed by the issue list, in response order.
pub fn draw(f: &mut Frame, area: Rect, repository: &Repository, state: &AppState, theme: &Theme) {
    let chunks = Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).split(area);

    let header = Line::from(vec![
        Span::styled("In Repository: ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(repository.name.as_str()),
        Span::raw(" "),
        Span::styled(repository.url.as_str(), Style::default().fg(theme.link)),
    ]);
    f.render_widget(Paragraph::new(header), chunks[0]);

    // Zero issues render as an empty list
    let items: Vec<ListItem> = repository
        .issues()
        .map(|issue| {
            ListItem::new(Line::from(vec![
                Span::raw(issue.title.as_str()),
                Span::raw("  "),
                Span::styled(issue.url.as_str(), Style::default().fg(theme.link)),
            ]))
        })
        .collect();

    let list = List::new(items)
        .highlight_style(
            Style::default()
                .bg(theme.accent)
                .fg(theme.highlight_fg)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▸ ");

    let mut list_state = ListState::default();
    list_state.select(state.issue_selected);
    f.render_stateful_widget(list, chunks[1], &mut list_state);
}
