use hubview_core::{event::AppEvent, github::GraphQLProvider, state::FetchTicket};
use std::{
    sync::{Arc, atomic::Ordering},
    thread,
};

use super::EventSender;

/// Run one issues query off the UI thread. The completion carries the ticket's
/// sequence number so the loop can drop it if a newer fetch was issued.
pub(super) fn spawn_issue_fetch(
    provider: &Arc<dyn GraphQLProvider>,
    sender: &EventSender,
    ticket: FetchTicket,
) {
    let provider = Arc::clone(provider);
    let sender = sender.clone();
    thread::spawn(move || {
        if sender.cancel.load(Ordering::Relaxed) {
            return;
        }
        log::debug!(
            "fetching issues seq={} path={:?}",
            ticket.seq,
            ticket.path
        );
        let outcome = provider.fetch_issues(&ticket.variables);
        if sender.cancel.load(Ordering::Relaxed) {
            return;
        }
        sender.send(AppEvent::FetchCompleted {
            seq: ticket.seq,
            path: ticket.path,
            outcome,
        });
    });
}
