use ratatui::layout::{Constraint, Layout, Rect};

pub mod footer;
pub mod form;
pub mod help;
pub mod notice_bar;
pub mod organization;
pub mod repository;

/// Helper function to center a rect within another rect
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Percentage(percent_y.min(100)),
        Constraint::Fill(1),
    ])
    .split(r);

    Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Percentage(percent_x.min(100)),
        Constraint::Fill(1),
    ])
    .split(popup_layout[1])[1]
}
