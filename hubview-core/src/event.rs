use crate::github::FetchOutcome;

/// Events that arrive asynchronously from background tasks.
/// These get merged into the main event loop alongside keyboard input.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// An issues query finished. `seq` identifies which fetch it answers.
    FetchCompleted {
        seq: u64,
        path: String,
        outcome: FetchOutcome,
    },
}
