use super::{FetchOutcome, provider::GraphQLProvider};
use crate::query::IssuesQueryVariables;
use std::{collections::VecDeque, sync::Mutex};

/// Replays queued outcomes in order, then `Data(None)`. Every call is recorded.
#[derive(Default)]
pub struct MockGraphQLProvider {
    pub outcomes: Mutex<VecDeque<FetchOutcome>>,
    pub calls: Mutex<Vec<IssuesQueryVariables>>,
}

impl MockGraphQLProvider {
    pub fn with_outcomes(outcomes: impl IntoIterator<Item = FetchOutcome>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into_iter().collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<IssuesQueryVariables> {
        self.calls.lock().unwrap().clone()
    }
}

impl GraphQLProvider for MockGraphQLProvider {
    fn fetch_issues(&self, variables: &IssuesQueryVariables) -> FetchOutcome {
        self.calls.lock().unwrap().push(variables.clone());
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(FetchOutcome::Data(None))
    }
}
