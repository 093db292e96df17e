use hubview_core::{
    github::GraphQLProvider,
    state::{AppState, Mode},
};
use std::sync::Arc;

use super::{EventSender, spawn::spawn_issue_fetch};

/// Fetch whatever is in the path field right now, valid or not.
pub(super) fn handle_submit(
    state: &mut AppState,
    provider: &Arc<dyn GraphQLProvider>,
    sender: &EventSender,
) {
    let ticket = state.begin_fetch();
    log::info!("submit path={:?} seq={}", ticket.path, ticket.seq);
    spawn_issue_fetch(provider, sender, ticket);
}

pub(super) fn handle_refetch(
    state: &mut AppState,
    provider: &Arc<dyn GraphQLProvider>,
    sender: &EventSender,
) {
    let ticket = state.begin_refetch();
    log::info!("refetch path={:?} seq={}", ticket.path, ticket.seq);
    spawn_issue_fetch(provider, sender, ticket);
}

/// URL of the highlighted issue, if any. Opening it is left to the caller.
pub(super) fn handle_open_issue(state: &mut AppState) -> Option<String> {
    if let Some(issue) = state.selected_issue() {
        return Some(issue.url.clone());
    }
    state.notice = Some("No issue selected".to_string());
    None
}

pub(super) fn handle_show_help(state: &mut AppState) {
    state.mode = match state.mode {
        Mode::Help => Mode::Form,
        Mode::Form => Mode::Help,
    };
}

pub(super) fn handle_close_overlay(state: &mut AppState) {
    state.mode = Mode::Form;
}

pub(super) fn handle_input_push(state: &mut AppState, c: char) {
    state.input.insert_char(c);
}

pub(super) fn handle_input_pop(state: &mut AppState) {
    state.input.backspace();
}

pub(super) fn handle_input_delete_forward(state: &mut AppState) {
    state.input.delete_forward_char();
}

pub(super) fn handle_input_delete_word(state: &mut AppState) {
    state.input.delete_word();
}

pub(super) fn handle_input_delete_to_start(state: &mut AppState) {
    state.input.delete_to_start();
}
