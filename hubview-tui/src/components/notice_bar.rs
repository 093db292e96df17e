use crate::theme::Theme;
use hubview_core::state::AppState;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::Span,
    widgets::Paragraph,
};

pub fn draw(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    if let Some(notice) = &state.notice {
        let line = Paragraph::new(Span::styled(
            format!(" Error: {notice}"),
            Style::default()
                .fg(theme.error)
                .add_modifier(Modifier::BOLD),
        ));
        f.render_widget(line, area);
    }
}
