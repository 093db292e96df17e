use crate::{
    github::{FetchOutcome, GraphQLError, Issue, Organization},
    query::IssuesQueryVariables,
};
use unicode_segmentation::UnicodeSegmentation;

/// Single-line text field with a byte cursor that always sits on a grapheme boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    pub text: String,
    pub cursor: usize,
}

#[derive(Clone, Copy)]
struct GraphemeSpan {
    start: usize,
    end: usize,
    is_separator: bool,
}

impl TextInput {
    /// Cursor starts at the end, like a pre-filled form field.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.len();
        Self { text, cursor }
    }

    fn grapheme_spans(&self) -> Vec<GraphemeSpan> {
        self.text
            .grapheme_indices(true)
            .map(|(start, grapheme)| GraphemeSpan {
                start,
                end: start + grapheme.len(),
                // `/` splits organization from repository, so word motions stop there
                is_separator: grapheme.chars().all(|c| c.is_whitespace() || c == '/'),
            })
            .collect()
    }

    fn grapheme_boundaries(&self) -> Vec<usize> {
        let mut boundaries: Vec<usize> = self.text.grapheme_indices(true).map(|(i, _)| i).collect();
        boundaries.push(self.text.len());
        boundaries
    }

    fn boundary_index_at_or_before(boundaries: &[usize], cursor: usize) -> usize {
        match boundaries.binary_search(&cursor) {
            Ok(idx) => idx,
            Err(idx) => idx.saturating_sub(1),
        }
    }

    fn clamp_cursor_to_boundary(&mut self, boundaries: &[usize]) -> usize {
        let cursor = self.cursor.min(self.text.len());
        let idx = Self::boundary_index_at_or_before(boundaries, cursor);
        self.cursor = boundaries.get(idx).copied().unwrap_or(0);
        idx
    }

    fn prev_word_boundary(&self, from: usize) -> usize {
        let spans = self.grapheme_spans();
        if spans.is_empty() {
            return 0;
        }
        let mut boundaries: Vec<usize> = spans.iter().map(|s| s.start).collect();
        boundaries.push(self.text.len());
        let cursor = from.min(self.text.len());
        let mut grapheme_idx =
            Self::boundary_index_at_or_before(&boundaries, cursor).saturating_sub(1);

        while let Some(span) = spans.get(grapheme_idx) {
            if !span.is_separator {
                break;
            }
            if grapheme_idx == 0 {
                return 0;
            }
            grapheme_idx -= 1;
        }

        while let Some(span) = spans.get(grapheme_idx) {
            if span.is_separator {
                return span.end;
            }
            if grapheme_idx == 0 {
                return 0;
            }
            grapheme_idx -= 1;
        }

        0
    }

    /// Move cursor left by one grapheme cluster (UTF-8 safe)
    pub fn cursor_left(&mut self) {
        let boundaries = self.grapheme_boundaries();
        let idx = self.clamp_cursor_to_boundary(&boundaries);
        if idx > 0 {
            self.cursor = boundaries[idx - 1];
        }
    }

    /// Move cursor right by one grapheme cluster (UTF-8 safe)
    pub fn cursor_right(&mut self) {
        let boundaries = self.grapheme_boundaries();
        let idx = self.clamp_cursor_to_boundary(&boundaries);
        if idx + 1 < boundaries.len() {
            self.cursor = boundaries[idx + 1];
        }
    }

    pub fn cursor_start(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor = self.text.len();
    }

    /// Insert a character at the current cursor position
    pub fn insert_char(&mut self, c: char) {
        let boundaries = self.grapheme_boundaries();
        self.clamp_cursor_to_boundary(&boundaries);
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Remove the grapheme cluster before the cursor (UTF-8 safe)
    pub fn backspace(&mut self) -> bool {
        let boundaries = self.grapheme_boundaries();
        let idx = self.clamp_cursor_to_boundary(&boundaries);
        if idx == 0 {
            return false;
        }
        let prev = boundaries[idx - 1];
        self.text.drain(prev..self.cursor);
        self.cursor = prev;
        true
    }

    /// Remove the grapheme cluster at cursor position (UTF-8 safe)
    pub fn delete_forward_char(&mut self) -> bool {
        let boundaries = self.grapheme_boundaries();
        let idx = self.clamp_cursor_to_boundary(&boundaries);
        if idx + 1 >= boundaries.len() {
            return false;
        }
        let end = boundaries[idx + 1];
        self.text.drain(self.cursor..end);
        true
    }

    /// Delete word backwards from cursor position
    pub fn delete_word(&mut self) {
        if self.text.is_empty() || self.cursor == 0 {
            return;
        }
        let boundaries = self.grapheme_boundaries();
        self.clamp_cursor_to_boundary(&boundaries);
        let new_cursor = self.prev_word_boundary(self.cursor);

        self.text.drain(new_cursor..self.cursor);
        self.cursor = new_cursor;
    }

    pub fn delete_to_start(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let boundaries = self.grapheme_boundaries();
        self.clamp_cursor_to_boundary(&boundaries);
        self.text.drain(..self.cursor);
        self.cursor = 0;
    }
}

/// What mode the app is in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Editing the path, browsing the result
    Form,
    /// Key binding overlay
    Help,
}

/// A fetch that has been issued and not yet completed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub seq: u64,
    pub path: String,
    pub variables: IssuesQueryVariables,
}

/// Central application state. Components read from this, actions modify it.
///
/// `organization` and `errors` always come from the same completion: the latest
/// issued fetch. Completions of superseded fetches are dropped.
#[derive(Debug, Clone)]
pub struct AppState {
    pub input: TextInput,
    pub organization: Option<Organization>,
    pub errors: Option<Vec<GraphQLError>>,

    pub mode: Mode,
    /// A fetch is in flight whose result will be accepted
    pub loading: bool,
    /// Path of the latest issued fetch, reused by refetch
    pub last_submitted: Option<String>,
    pub issue_selected: Option<usize>,
    /// Transient message for local failures (e.g. browser launch), cleared on the next key
    pub notice: Option<String>,

    next_seq: u64,
    latest_seq: Option<u64>,
}

impl AppState {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            input: TextInput::new(path),
            organization: None,
            errors: None,
            mode: Mode::Form,
            loading: false,
            last_submitted: None,
            issue_selected: None,
            notice: None,
            next_seq: 0,
            latest_seq: None,
        }
    }

    pub fn path(&self) -> &str {
        &self.input.text
    }

    /// Issue a fetch for the current path. Supersedes any fetch still in flight.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        let path = self.input.text.clone();
        self.begin_fetch_for(path)
    }

    /// Issue a fetch for the last submitted path, falling back to the current one.
    pub fn begin_refetch(&mut self) -> FetchTicket {
        let path = self
            .last_submitted
            .clone()
            .unwrap_or_else(|| self.input.text.clone());
        self.begin_fetch_for(path)
    }

    fn begin_fetch_for(&mut self, path: String) -> FetchTicket {
        self.next_seq += 1;
        let seq = self.next_seq;
        self.latest_seq = Some(seq);
        self.loading = true;
        self.last_submitted = Some(path.clone());
        FetchTicket {
            seq,
            variables: IssuesQueryVariables::from_path(&path),
            path,
        }
    }

    pub fn is_latest(&self, seq: u64) -> bool {
        self.latest_seq == Some(seq)
    }

    /// Apply a completed fetch. Returns `false` and leaves state untouched when
    /// a newer fetch has been issued since.
    pub fn complete_fetch(&mut self, seq: u64, outcome: FetchOutcome) -> bool {
        if !self.is_latest(seq) {
            return false;
        }
        self.loading = false;
        match outcome {
            FetchOutcome::Data(organization) => {
                self.organization = organization;
                self.errors = None;
            }
            FetchOutcome::GraphQLErrors(errors) => {
                self.organization = None;
                self.errors = Some(errors);
            }
            FetchOutcome::TransportFailure(message) => {
                self.organization = None;
                self.errors = Some(vec![GraphQLError { message }]);
            }
        }
        self.issue_selected = if self.issues().is_empty() { None } else { Some(0) };
        true
    }

    /// Issues of the displayed repository, in response order
    pub fn issues(&self) -> Vec<&Issue> {
        self.organization
            .as_ref()
            .and_then(|org| org.repository.as_ref())
            .map(|repo| repo.issues().collect())
            .unwrap_or_default()
    }

    pub fn selected_issue(&self) -> Option<&Issue> {
        self.issue_selected
            .and_then(|idx| self.issues().get(idx).copied())
    }

    /// Move issue selection by delta, clamping to bounds
    pub fn move_issue_selection(&mut self, delta: i32) {
        let len = self.issues().len();
        if len == 0 {
            return;
        }
        let current = self.issue_selected.unwrap_or(0);
        if delta > 0 {
            self.issue_selected = Some(
                current
                    .saturating_add(delta.unsigned_abs() as usize)
                    .min(len - 1),
            );
        } else {
            self.issue_selected = Some(current.saturating_sub(delta.unsigned_abs() as usize));
        }
    }

    pub fn move_issue_to_top(&mut self) {
        if !self.issues().is_empty() {
            self.issue_selected = Some(0);
        }
    }

    pub fn move_issue_to_bottom(&mut self) {
        let len = self.issues().len();
        if len > 0 {
            self.issue_selected = Some(len - 1);
        }
    }
}
