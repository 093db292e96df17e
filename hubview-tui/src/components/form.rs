use crate::theme::Theme;
use hubview_core::{
    config::{Command, KeysConfig},
    state::{AppState, Mode},
};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

pub const LABEL: &str = "Show open issues for https://github.com/";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct VisibleSlice {
    start: usize,
    end: usize,
    cursor_col: u16,
}

/// Window of `text` that fits in `max_width` columns while keeping the cursor visible.
fn visible_slice(text: &str, cursor_pos: usize, max_width: u16) -> VisibleSlice {
    if max_width == 0 || text.is_empty() {
        return VisibleSlice {
            start: 0,
            end: 0,
            cursor_col: 0,
        };
    }

    let graphemes: Vec<(usize, &str)> = text.grapheme_indices(true).collect();
    let mut boundaries: Vec<usize> = graphemes.iter().map(|(i, _)| *i).collect();
    boundaries.push(text.len());

    let cursor = cursor_pos.min(text.len());
    let boundary_idx = match boundaries.binary_search(&cursor) {
        Ok(idx) => idx,
        Err(idx) => idx.saturating_sub(1),
    };

    let mut prefix_widths = Vec::with_capacity(boundaries.len());
    let mut width = 0;
    prefix_widths.push(0);
    for (_, grapheme) in &graphemes {
        width += grapheme.width();
        prefix_widths.push(width);
    }

    let cursor_col = prefix_widths[boundary_idx];
    let max_width = max_width as usize;
    let max_cursor_col = max_width.saturating_sub(1);
    let scroll_col = cursor_col.saturating_sub(max_cursor_col);

    let start_index = prefix_widths
        .iter()
        .take_while(|&&col| col <= scroll_col)
        .count()
        .saturating_sub(1)
        .min(graphemes.len().saturating_sub(1));

    let mut end_index = start_index;
    let mut visible_width = 0;
    while let Some((_, grapheme)) = graphemes.get(end_index) {
        let g_width = grapheme.width();
        if visible_width + g_width > max_width {
            break;
        }
        visible_width += g_width;
        end_index += 1;
    }

    let cursor_col = cursor_col
        .saturating_sub(prefix_widths[start_index])
        .min(max_cursor_col);

    VisibleSlice {
        start: boundaries[start_index],
        end: boundaries[end_index],
        cursor_col: u16::try_from(cursor_col).unwrap_or(u16::MAX),
    }
}

/// The path field: label as the block title, submit key as the bottom title.
pub fn draw(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme, keys: &KeysConfig) {
    let keymap = keys.keymap_for_mode(&Mode::Form);
    let submit_key = KeysConfig::find_key(&keymap, &Command::Submit)
        .map_or_else(|| "enter".to_string(), |k| k.to_string());

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            format!(" {LABEL} "),
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ))
        .title_bottom(Line::from(Span::styled(
            format!(" {submit_key}: search "),
            Style::default().fg(theme.hint),
        )))
        .border_style(Style::default().fg(theme.accent));
    let inner = block.inner(area);

    let text = state.path();
    let slice = visible_slice(text, state.input.cursor, inner.width);
    let content = Line::from(Span::raw(&text[slice.start..slice.end]));
    f.render_widget(Paragraph::new(content).block(block), area);

    if state.mode == Mode::Form && inner.width > 0 && inner.height > 0 {
        let cursor_x = inner.x.saturating_add(slice.cursor_col);
        f.set_cursor_position((cursor_x, inner.y));
    }
}
