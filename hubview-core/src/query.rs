//! The one GraphQL query hubview sends, and its variables.

use serde::Serialize;

/// Organization, one of its repositories, and that repository's last five issues.
///
/// Organization and repository are always passed as variables, never spliced
/// into the query text.
pub const ISSUES_OF_REPOSITORY_QUERY: &str = r"
  query($organization: String!, $repository: String!) {
    organization(login: $organization) {
      name
      url
      repository(name: $repository) {
        name
        url
        issues(last: 5) {
          edges {
            node {
              id
              title
              url
            }
          }
        }
      }
    }
  }
";

/// Variables for [`ISSUES_OF_REPOSITORY_QUERY`].
///
/// A missing half serializes as `null`; GitHub answers that with a GraphQL error
/// rather than the client refusing to send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssuesQueryVariables {
    pub organization: Option<String>,
    pub repository: Option<String>,
}

impl IssuesQueryVariables {
    pub fn new(organization: impl Into<String>, repository: impl Into<String>) -> Self {
        Self {
            organization: Some(organization.into()),
            repository: Some(repository.into()),
        }
    }

    /// Split an `organization/repository` path on its first `/`.
    ///
    /// No validation is done: `"org"` has no repository, `""` asks for
    /// organization `""`, and `"org/a/b"` asks for repository `"a/b"`.
    pub fn from_path(path: &str) -> Self {
        match path.split_once('/') {
            Some((organization, repository)) => Self {
                organization: Some(organization.to_string()),
                repository: Some(repository.to_string()),
            },
            None => Self {
                organization: Some(path.to_string()),
                repository: None,
            },
        }
    }
}

/// JSON body sent with `POST` to the GraphQL endpoint
#[derive(Debug, Serialize)]
pub struct GraphQLRequest<'a, V: Serialize> {
    pub query: &'a str,
    pub variables: &'a V,
}

impl<'a> GraphQLRequest<'a, IssuesQueryVariables> {
    pub fn issues_of_repository(variables: &'a IssuesQueryVariables) -> Self {
        Self {
            query: ISSUES_OF_REPOSITORY_QUERY,
            variables,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_path_splits_org_and_repo() {
        let vars = IssuesQueryVariables::from_path("orgA/repoA");
        assert_eq!(vars, IssuesQueryVariables::new("orgA", "repoA"));
    }

    #[test]
    fn test_from_path_splits_on_first_slash_only() {
        let vars = IssuesQueryVariables::from_path("org/repo/extra");
        assert_eq!(vars.organization.as_deref(), Some("org"));
        assert_eq!(vars.repository.as_deref(), Some("repo/extra"));
    }

    #[test]
    fn test_from_path_without_slash_has_no_repository() {
        let vars = IssuesQueryVariables::from_path("lonely");
        assert_eq!(vars.organization.as_deref(), Some("lonely"));
        assert_eq!(vars.repository, None);
    }

    #[test]
    fn test_from_path_empty_sends_empty_organization() {
        let vars = IssuesQueryVariables::from_path("");
        assert_eq!(vars.organization.as_deref(), Some(""));
        assert_eq!(vars.repository, None);

        let value = serde_json::to_value(&vars).unwrap();
        assert_eq!(value, json!({ "organization": "", "repository": null }));
    }

    #[test]
    fn test_from_path_trailing_slash_gives_empty_repository() {
        let vars = IssuesQueryVariables::from_path("org/");
        assert_eq!(vars.repository.as_deref(), Some(""));
    }

    #[test]
    fn test_request_body_shape() {
        let vars = IssuesQueryVariables::new("x", "y");
        let body = serde_json::to_value(GraphQLRequest::issues_of_repository(&vars)).unwrap();
        assert_eq!(
            body["variables"],
            json!({ "organization": "x", "repository": "y" })
        );
        assert_eq!(body["query"], ISSUES_OF_REPOSITORY_QUERY);
    }

    #[test]
    fn test_missing_variables_serialize_as_null() {
        let vars = IssuesQueryVariables::from_path("lonely");
        let value = serde_json::to_value(&vars).unwrap();
        assert_eq!(value, json!({ "organization": "lonely", "repository": null }));
    }

    #[test]
    fn test_query_uses_variables_and_last_five() {
        assert!(ISSUES_OF_REPOSITORY_QUERY.contains("login: $organization"));
        assert!(ISSUES_OF_REPOSITORY_QUERY.contains("name: $repository"));
        assert!(ISSUES_OF_REPOSITORY_QUERY.contains("issues(last: 5)"));
    }
}
