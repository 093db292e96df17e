use crate::theme::Theme;
use hubview_core::{
    config::{Command, KeysConfig},
    keyboard::KeyEvent,
    state::Mode,
};
use ratatui::{
    Frame,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem},
};

/// Help overlay listing every binding active while editing the form.
pub fn draw(f: &mut Frame, theme: &Theme, keys: &KeysConfig) {
    let popup_area = super::centered_rect(70, 80, f.area());
    f.render_widget(Clear, popup_area);

    let rows = KeysConfig::rows(&keys.keymap_for_mode(&Mode::Form));
    let overlay_keymap = keys.keymap_for_mode(&Mode::Help);
    let close_key = KeysConfig::find_key(&overlay_keymap, &Command::Cancel)
        .map_or_else(|| "esc".to_string(), |k| k.to_string());

    let title = format!(" {} bindings ({close_key}: close) ", rows.len());
    let list = List::new(build_items(&rows, theme)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(theme.accent)),
    );
    f.render_widget(list, popup_area);
}

fn build_items(rows: &[(KeyEvent, Command)], theme: &Theme) -> Vec<ListItem<'static>> {
    rows.iter()
        .map(|(key, command)| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:<11}", key.to_string()),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!(" {}", command.description())),
                Span::styled(format!("  ({command})"), Style::default().fg(theme.muted)),
            ]))
        })
        .collect()
}
