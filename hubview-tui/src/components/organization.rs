use super::repository;
use crate::theme::Theme;
use hubview_core::{
    github::{GraphQLError, Organization, join_messages},
    state::AppState,
};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

pub const ERROR_PREFIX: &str = "Something went wrong:";
pub const EMPTY_MESSAGE: &str = "No information yet ...";

/// Either the error line or the organization with its repository.
/// Errors replace the whole view; nothing of the organization is drawn then.
pub fn draw(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    if let Some(errors) = &state.errors {
        draw_errors(f, area, errors, theme);
    } else if let Some(organization) = &state.organization {
        draw_organization(f, area, organization, state, theme);
    } else {
        let empty = Paragraph::new(Span::styled(
            EMPTY_MESSAGE,
            Style::default()
                .fg(theme.muted)
                .add_modifier(Modifier::ITALIC),
        ));
        f.render_widget(empty, area);
    }
}

fn draw_errors(f: &mut Frame, area: Rect, errors: &[GraphQLError], theme: &Theme) {
    let line = Line::from(vec![
        Span::styled(
            ERROR_PREFIX,
            Style::default()
                .fg(theme.error)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(join_messages(errors)),
    ]);
    f.render_widget(Paragraph::new(line).wrap(Wrap { trim: false }), area);
}

fn draw_organization(
    f: &mut Frame,
    area: Rect,
    organization: &Organization,
    state: &AppState,
    theme: &Theme,
) {
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .split(area);

    let header = Line::from(vec![
        Span::styled(
            "Issues from Organization: ",
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(organization.name.as_deref().unwrap_or_default()),
        Span::raw(" "),
        Span::styled(organization.url.as_str(), Style::default().fg(theme.link)),
    ]);
    f.render_widget(Paragraph::new(header), chunks[0]);

    if let Some(repo) = &organization.repository {
        repository::draw(f, chunks[2], repo, state, theme);
    }
}
