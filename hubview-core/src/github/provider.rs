use super::FetchOutcome;
use crate::query::IssuesQueryVariables;

pub trait GraphQLProvider: Send + Sync {
    /// Run the issues query once. Blocking; callers run it off the UI thread.
    fn fetch_issues(&self, variables: &IssuesQueryVariables) -> FetchOutcome;
}
