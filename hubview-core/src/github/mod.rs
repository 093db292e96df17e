pub mod client;
pub mod mock;
pub mod provider;
pub mod types;

pub use client::{ClientConfig, HttpGraphQLClient, TransportError};
pub use provider::GraphQLProvider;
pub use types::{
    GraphQLError, GraphQLResponse, Issue, IssueConnection, IssueEdge, IssuesData,
    IssuesQueryResult, Organization, Repository,
};

/// Every way a fetch can end. Both failure channels are explicit variants so the
/// caller has to handle them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The query succeeded. `None` when GitHub returned `organization: null` without errors.
    Data(Option<Organization>),
    /// The server answered with a GraphQL error list; any partial data is dropped.
    GraphQLErrors(Vec<GraphQLError>),
    /// The request never produced a GraphQL envelope.
    TransportFailure(String),
}

impl From<IssuesQueryResult> for FetchOutcome {
    fn from(result: IssuesQueryResult) -> Self {
        match result.errors {
            Some(errors) if !errors.is_empty() => FetchOutcome::GraphQLErrors(errors),
            _ => FetchOutcome::Data(result.organization),
        }
    }
}

/// Map a response envelope into view state: `data.organization` and `errors`,
/// passed through as they arrived.
///
/// A REST-style body (`{"message": "Bad credentials"}`, which GitHub sends with
/// a 401) has no `errors` array; its message becomes the single error.
pub fn resolve_issues_query(response: GraphQLResponse<IssuesData>) -> IssuesQueryResult {
    let errors = match (response.errors, response.message) {
        (Some(errors), _) => Some(errors),
        (None, Some(message)) => Some(vec![GraphQLError { message }]),
        (None, None) => None,
    };
    IssuesQueryResult {
        organization: response.data.and_then(|d| d.organization),
        errors,
    }
}

/// Join error messages the way the UI shows them.
pub fn join_messages(errors: &[GraphQLError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
