use crate::theme::Theme;
use hubview_core::{
    config::{Command, KeysConfig},
    state::Mode,
};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

const HINTS: &[(Command, &str)] = &[
    (Command::MoveDown, "select"),
    (Command::OpenIssue, "open"),
    (Command::Refetch, "refetch"),
    (Command::ShowHelp, "help"),
    (Command::Quit, "quit"),
];

/// One-line key hints, built from the active bindings so remaps show up.
pub fn draw(f: &mut Frame, area: Rect, theme: &Theme, keys: &KeysConfig) {
    let keymap = keys.keymap_for_mode(&Mode::Form);
    let mut spans = Vec::new();
    for (command, label) in HINTS {
        let Some(key) = KeysConfig::find_key(&keymap, command) else {
            continue;
        };
        if !spans.is_empty() {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(
            key.to_string(),
            Style::default()
                .fg(theme.hint)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            format!(": {label}"),
            Style::default().fg(theme.muted),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
