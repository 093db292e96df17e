//! Response shapes for the issues query. Field names mirror the GraphQL schema.

use serde::{Deserialize, Serialize};

/// GraphQL response envelope
#[derive(Debug, Deserialize)]
pub struct GraphQLResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Option<Vec<GraphQLError>>,
    /// Set on REST-style error bodies such as a 401 `Bad credentials`
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphQLError {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct IssuesData {
    pub organization: Option<Organization>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    /// Display name; GitHub allows organizations without one
    pub name: Option<String>,
    pub url: String,
    pub repository: Option<Repository>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
    pub url: String,
    pub issues: IssueConnection,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueConnection {
    pub edges: Vec<IssueEdge>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueEdge {
    pub node: Issue,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub id: String,
    pub title: String,
    pub url: String,
}

/// Mapped view of one response: `{organization, errors}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IssuesQueryResult {
    pub organization: Option<Organization>,
    pub errors: Option<Vec<GraphQLError>>,
}

impl Repository {
    pub fn issues(&self) -> impl Iterator<Item = &Issue> {
        self.issues.edges.iter().map(|edge| &edge.node)
    }
}
