use hubview_core::{
    FetchOutcome, IssuesQueryVariables,
    github::{GraphQLProvider, IssuesQueryResult, Organization, join_messages},
};
use serde::Serialize;
use std::fmt::Write;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Clone)]
pub struct CliError {
    message: String,
    code: u8,
}

impl CliError {
    pub fn system(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: 2,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn code(&self) -> u8 {
        self.code
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(value: anyhow::Error) -> Self {
        Self::system(format!("{value:#}"))
    }
}

/// How a completed fetch should end the process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStatus {
    Found,
    QueryErrors,
}

impl FetchStatus {
    pub fn exit_code(self) -> u8 {
        match self {
            FetchStatus::Found => 0,
            FetchStatus::QueryErrors => 1,
        }
    }
}

/// Run the issues query once and print it. GraphQL errors are output, not
/// failures of the command; transport failures are.
pub fn cmd_fetch(provider: &dyn GraphQLProvider, path: &str, json: bool) -> CliResult<FetchStatus> {
    let variables = IssuesQueryVariables::from_path(path);
    log::info!("fetch path={path:?}");

    let (result, status) = match provider.fetch_issues(&variables) {
        FetchOutcome::Data(organization) => (
            IssuesQueryResult {
                organization,
                errors: None,
            },
            FetchStatus::Found,
        ),
        FetchOutcome::GraphQLErrors(errors) => (
            IssuesQueryResult {
                organization: None,
                errors: Some(errors),
            },
            FetchStatus::QueryErrors,
        ),
        FetchOutcome::TransportFailure(message) => return Err(CliError::system(message)),
    };

    if json {
        print_json(&result)?;
    } else {
        print!("{}", format_result(&result));
    }
    Ok(status)
}

/// Plain-text rendition of the organization and repository fragments.
pub fn format_result(result: &IssuesQueryResult) -> String {
    if let Some(errors) = &result.errors {
        return format!("Something went wrong:{}\n", join_messages(errors));
    }
    match &result.organization {
        Some(organization) => format_organization(organization),
        None => "No information yet ...\n".to_string(),
    }
}

fn format_organization(organization: &Organization) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Issues from Organization: {} {}",
        organization.name.as_deref().unwrap_or_default(),
        organization.url
    );
    if let Some(repo) = &organization.repository {
        let _ = writeln!(out, "In Repository: {} {}", repo.name, repo.url);
        for issue in repo.issues() {
            let _ = writeln!(out, "  - {} {}", issue.title, issue.url);
        }
    }
    out
}

fn print_json<T: Serialize>(value: &T) -> CliResult<()> {
    println!(
        "{}",
        serde_json::to_string(value).map_err(|e| CliError::system(e.to_string()))?
    );
    Ok(())
}

pub fn print_error(error: &CliError, json: bool) {
    if json {
        let payload = serde_json::json!({ "error": error.message() });
        eprintln!("{payload}");
    } else {
        eprintln!("{}", error.message());
    }
}
