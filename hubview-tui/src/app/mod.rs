mod actions;
mod spawn;

use crate::{components, keymap, theme::Theme};
use actions::{
    handle_close_overlay, handle_input_delete_forward, handle_input_delete_to_start,
    handle_input_delete_word, handle_input_pop, handle_input_push, handle_open_issue,
    handle_refetch, handle_show_help, handle_submit,
};
use crossterm::event::{self, Event, KeyEventKind};
use hubview_core::{
    action::Action,
    config::KeysConfig,
    event::AppEvent,
    github::GraphQLProvider,
    state::{AppState, Mode},
};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders},
};
use spawn::spawn_issue_fetch;
use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
        mpsc,
    },
    time::{Duration, Instant},
};

/// Handle for dispatching background work
#[derive(Clone)]
pub struct EventSender {
    tx: mpsc::Sender<AppEvent>,
    cancel: Arc<AtomicBool>,
}

impl EventSender {
    /// Send an event from a background thread to the main loop
    pub fn send(&self, event: AppEvent) {
        let _ = self.tx.send(event);
    }
}

/// Side effects an action asks the loop to perform
#[derive(Debug, PartialEq, Eq)]
enum Effect {
    Quit,
    OpenUrl(String),
}

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn run(
    terminal: &mut DefaultTerminal,
    state: &mut AppState,
    provider: &Arc<dyn GraphQLProvider>,
    theme: &Theme,
    keys: &KeysConfig,
) -> anyhow::Result<()> {
    let (tx, rx) = mpsc::channel::<AppEvent>();
    let cancel = Arc::new(AtomicBool::new(false));
    let event_sender = EventSender {
        tx,
        cancel: Arc::clone(&cancel),
    };
    let spinner_start = Instant::now();

    mount(state, provider, &event_sender);

    loop {
        terminal.draw(|f| draw(f, state, theme, keys, &spinner_start))?;

        // Check background channel (non-blocking)
        if let Ok(app_event) = rx.try_recv() {
            process_app_event(app_event, state);
            continue;
        }

        // Poll terminal events with a timeout so we can update spinner + check channel
        if event::poll(Duration::from_millis(80))?
            && let Event::Key(key) = event::read()?
        {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            // Clear notice on any keypress
            state.notice = None;

            let Some(action) = keymap::resolve_action(key, state, keys) else {
                continue;
            };
            match process_action(&action, state, provider, &event_sender) {
                Some(Effect::Quit) => {
                    // Signal cancellation to background threads
                    cancel.store(true, Ordering::Relaxed);
                    return Ok(());
                }
                Some(Effect::OpenUrl(url)) => open_url(state, &url),
                None => {}
            }
        }
    }
}

/// The single automatic fetch for the initial path.
fn mount(state: &mut AppState, provider: &Arc<dyn GraphQLProvider>, sender: &EventSender) {
    let ticket = state.begin_fetch();
    log::info!("initial fetch path={:?}", ticket.path);
    spawn_issue_fetch(provider, sender, ticket);
}

fn open_url(state: &mut AppState, url: &str) {
    log::info!("opening {url}");
    if let Err(e) = open::that(url) {
        log::warn!("failed to open {url}: {e}");
        state.notice = Some(format!("Failed to open {url}: {e}"));
    }
}

fn draw(f: &mut Frame, state: &AppState, theme: &Theme, keys: &KeysConfig, spinner_start: &Instant) {
    let notice_height = u16::from(state.notice.is_some());
    let chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(3),
        Constraint::Length(1),
        Constraint::Length(notice_height),
    ])
    .split(f.area());

    components::form::draw(f, chunks[0], state, theme, keys);
    draw_result(f, chunks[1], state, theme, spinner_start);
    components::footer::draw(f, chunks[2], theme, keys);
    if notice_height > 0 {
        components::notice_bar::draw(f, chunks[3], state, theme);
    }

    if state.mode == Mode::Help {
        components::help::draw(f, theme, keys);
    }
}

fn spinner_frame(start: &Instant) -> &'static str {
    let elapsed = usize::try_from(start.elapsed().as_millis()).unwrap_or(usize::MAX);
    SPINNER_FRAMES[(elapsed / 80) % SPINNER_FRAMES.len()]
}

/// Bordered result area. The title names the path on display and spins while
/// the latest fetch is in flight.
fn draw_result(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme, spinner_start: &Instant) {
    let path = state.last_submitted.as_deref().unwrap_or_default();
    let title = if state.loading {
        Line::from(vec![
            Span::raw(" "),
            Span::styled(
                spinner_frame(spinner_start),
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(" Loading {path} ")),
        ])
    } else {
        Line::from(format!(" {path} "))
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(theme.border));
    let inner = block.inner(area);
    f.render_widget(block, area);

    components::organization::draw(f, inner, state, theme);
}

/// Handle events from background tasks
fn process_app_event(event: AppEvent, state: &mut AppState) {
    match event {
        AppEvent::FetchCompleted { seq, path, outcome } => {
            if state.complete_fetch(seq, outcome) {
                log::debug!("applied fetch seq={seq} path={path:?}");
            } else {
                log::debug!("dropped stale fetch seq={seq} path={path:?}");
            }
        }
    }
}

fn process_action(
    action: &Action,
    state: &mut AppState,
    provider: &Arc<dyn GraphQLProvider>,
    sender: &EventSender,
) -> Option<Effect> {
    match action {
        Action::Quit => return Some(Effect::Quit),

        Action::Submit => handle_submit(state, provider, sender),
        Action::Refetch => handle_refetch(state, provider, sender),

        Action::InputPush(c) => handle_input_push(state, *c),
        Action::InputPop => handle_input_pop(state),
        Action::InputDeleteForward => handle_input_delete_forward(state),
        Action::InputDeleteWord => handle_input_delete_word(state),
        Action::InputDeleteToStart => handle_input_delete_to_start(state),

        Action::CursorLeft => state.input.cursor_left(),
        Action::CursorRight => state.input.cursor_right(),
        Action::CursorStart => state.input.cursor_start(),
        Action::CursorEnd => state.input.cursor_end(),

        Action::MoveSelection(delta) => state.move_issue_selection(*delta),
        Action::MoveTop => state.move_issue_to_top(),
        Action::MoveBottom => state.move_issue_to_bottom(),
        Action::OpenIssue => return handle_open_issue(state).map(Effect::OpenUrl),

        Action::ShowHelp => handle_show_help(state),
        Action::CloseOverlay => handle_close_overlay(state),
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::test_support::render_to_string;
    use hubview_core::{
        FetchOutcome, IssuesQueryVariables,
        config::DEFAULT_PATH,
        github::{
            GraphQLError, Issue, IssueConnection, IssueEdge, Organization, Repository,
            mock::MockGraphQLProvider,
        },
    };

    struct Harness {
        mock: Arc<MockGraphQLProvider>,
        provider: Arc<dyn GraphQLProvider>,
        sender: EventSender,
        rx: mpsc::Receiver<AppEvent>,
    }

    impl Harness {
        fn new(outcomes: Vec<FetchOutcome>) -> Self {
            let mock = Arc::new(MockGraphQLProvider::with_outcomes(outcomes));
            let provider: Arc<dyn GraphQLProvider> = mock.clone();
            let (tx, rx) = mpsc::channel();
            let sender = EventSender {
                tx,
                cancel: Arc::new(AtomicBool::new(false)),
            };
            Self {
                mock,
                provider,
                sender,
                rx,
            }
        }

        fn act(&self, action: Action, state: &mut AppState) -> Option<Effect> {
            process_action(&action, state, &self.provider, &self.sender)
        }

        /// Wait for the background thread and feed its event to the state
        fn settle(&self, state: &mut AppState) {
            let event = self.rx.recv_timeout(Duration::from_secs(1)).unwrap();
            process_app_event(event, state);
        }
    }

    fn organization(issue_count: u32) -> Organization {
        Organization {
            name: Some("Org".to_string()),
            url: "https://github.com/org".to_string(),
            repository: Some(Repository {
                name: "repo".to_string(),
                url: "https://github.com/org/repo".to_string(),
                issues: IssueConnection {
                    edges: (1..=issue_count)
                        .map(|n| IssueEdge {
                            node: Issue {
                                id: format!("I_{n}"),
                                title: format!("Issue {n}"),
                                url: format!("https://github.com/org/repo/issues/{n}"),
                            },
                        })
                        .collect(),
                },
            }),
        }
    }

    #[test]
    fn test_mount_issues_one_request_for_default_path() {
        let harness = Harness::new(vec![FetchOutcome::Data(Some(organization(2)))]);
        let mut state = AppState::new(DEFAULT_PATH);

        mount(&mut state, &harness.provider, &harness.sender);
        assert!(state.loading);
        harness.settle(&mut state);

        assert_eq!(
            harness.mock.calls(),
            vec![IssuesQueryVariables::new(
                "the-road-to-learn-react",
                "the-road-to-learn-react"
            )]
        );
        assert!(!state.loading);
        assert_eq!(state.issues().len(), 2);
        assert!(harness.rx.try_recv().is_err());
    }

    #[test]
    fn test_edit_then_submit_issues_exactly_one_request() {
        let harness = Harness::new(vec![FetchOutcome::GraphQLErrors(vec![GraphQLError {
            message: "Could not resolve".to_string(),
        }])]);
        let mut state = AppState::new(DEFAULT_PATH);

        harness.act(Action::InputDeleteToStart, &mut state);
        for c in "x/y".chars() {
            harness.act(Action::InputPush(c), &mut state);
        }
        // Path follows the field before anything is sent
        assert_eq!(state.path(), "x/y");
        assert!(harness.mock.calls().is_empty());

        harness.act(Action::Submit, &mut state);
        harness.settle(&mut state);

        assert_eq!(harness.mock.calls(), vec![IssuesQueryVariables::new("x", "y")]);
        assert_eq!(state.path(), "x/y");
        assert!(state.errors.is_some());
        assert!(harness.rx.try_recv().is_err());
    }

    #[test]
    fn test_submit_sends_invalid_path_unchanged() {
        let harness = Harness::new(vec![]);
        let mut state = AppState::new("no-slash");
        harness.act(Action::Submit, &mut state);
        harness.settle(&mut state);
        assert_eq!(
            harness.mock.calls(),
            vec![IssuesQueryVariables {
                organization: Some("no-slash".to_string()),
                repository: None,
            }]
        );
    }

    #[test]
    fn test_stale_completion_is_ignored() {
        let mut state = AppState::new("a/a");
        let older = state.begin_fetch();
        let newer = state.begin_fetch();

        process_app_event(
            AppEvent::FetchCompleted {
                seq: newer.seq,
                path: newer.path,
                outcome: FetchOutcome::Data(Some(organization(1))),
            },
            &mut state,
        );
        process_app_event(
            AppEvent::FetchCompleted {
                seq: older.seq,
                path: older.path,
                outcome: FetchOutcome::TransportFailure("timed out".to_string()),
            },
            &mut state,
        );

        assert!(state.errors.is_none());
        assert_eq!(state.issues().len(), 1);
    }

    #[test]
    fn test_refetch_reuses_submitted_path() {
        let harness = Harness::new(vec![]);
        let mut state = AppState::new("a/b");
        harness.act(Action::Submit, &mut state);
        harness.settle(&mut state);

        harness.act(Action::InputPush('c'), &mut state);
        harness.act(Action::Refetch, &mut state);
        harness.settle(&mut state);

        assert_eq!(
            harness.mock.calls(),
            vec![
                IssuesQueryVariables::new("a", "b"),
                IssuesQueryVariables::new("a", "b")
            ]
        );
    }

    #[test]
    fn test_open_issue_returns_selected_url() {
        let harness = Harness::new(vec![FetchOutcome::Data(Some(organization(3)))]);
        let mut state = AppState::new("org/repo");
        harness.act(Action::Submit, &mut state);
        harness.settle(&mut state);

        harness.act(Action::MoveSelection(1), &mut state);
        assert_eq!(
            harness.act(Action::OpenIssue, &mut state),
            Some(Effect::OpenUrl(
                "https://github.com/org/repo/issues/2".to_string()
            ))
        );
    }

    #[test]
    fn test_borrowed_action_can_be_replayed() {
        let harness = Harness::new(vec![FetchOutcome::Data(Some(organization(3)))]);
        let mut state = AppState::new("org/repo");
        harness.act(Action::Submit, &mut state);
        harness.settle(&mut state);

        let down = Action::MoveSelection(1);
        for _ in 0..2 {
            process_action(&down, &mut state, &harness.provider, &harness.sender);
        }
        assert_eq!(down, Action::MoveSelection(1));
        assert_eq!(
            harness.act(Action::OpenIssue, &mut state),
            Some(Effect::OpenUrl(
                "https://github.com/org/repo/issues/3".to_string()
            ))
        );
    }

    #[test]
    fn test_open_issue_without_selection_sets_notice() {
        let harness = Harness::new(vec![]);
        let mut state = AppState::new("org/repo");
        assert_eq!(harness.act(Action::OpenIssue, &mut state), None);
        assert!(state.notice.is_some());
    }

    #[test]
    fn test_quit_and_help_toggle() {
        let harness = Harness::new(vec![]);
        let mut state = AppState::new("org/repo");
        assert_eq!(harness.act(Action::Quit, &mut state), Some(Effect::Quit));

        harness.act(Action::ShowHelp, &mut state);
        assert_eq!(state.mode, Mode::Help);
        harness.act(Action::CloseOverlay, &mut state);
        assert_eq!(state.mode, Mode::Form);
    }

    #[test]
    fn test_draw_shows_loading_then_result() {
        let mut state = AppState::new("org/repo");
        let ticket = state.begin_fetch();
        let start = Instant::now();
        let theme = Theme::default();
        let keys = KeysConfig::default();

        let loading = render_to_string(90, 16, |f, _| draw(f, &state, &theme, &keys, &start));
        assert!(loading.contains("Loading org/repo"), "got:\n{loading}");
        assert!(loading.contains("No information yet ..."));

        state.complete_fetch(ticket.seq, FetchOutcome::Data(Some(organization(0))));
        let done = render_to_string(90, 16, |f, _| draw(f, &state, &theme, &keys, &start));
        assert!(!done.contains("Loading"));
        assert!(done.contains("Issues from Organization: Org"));
        assert!(done.contains("In Repository: repo"));
    }

    #[test]
    fn test_draw_renders_transport_failure_as_error() {
        let mut state = AppState::new("org/repo");
        let ticket = state.begin_fetch();
        state.complete_fetch(
            ticket.seq,
            FetchOutcome::TransportFailure("connection refused".to_string()),
        );
        let output = render_to_string(90, 16, |f, _| {
            draw(
                f,
                &state,
                &Theme::default(),
                &KeysConfig::default(),
                &Instant::now(),
            );
        });
        assert!(output.contains("Something went wrong:connection refused"));
    }
}
