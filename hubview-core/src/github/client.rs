use super::{
    FetchOutcome, GraphQLProvider, resolve_issues_query,
    types::{GraphQLResponse, IssuesData},
};
use crate::query::{GraphQLRequest, IssuesQueryVariables};
use reqwest::header::{ACCEPT, AUTHORIZATION};

/// Where to send queries and how to authenticate. Built once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub token: Option<String>,
    pub user_agent: String,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token,
            user_agent: concat!("hubview/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("could not build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("GitHub responded with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("could not decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Blocking GraphQL client over reqwest
pub struct HttpGraphQLClient {
    config: ClientConfig,
    http: reqwest::blocking::Client,
}

impl HttpGraphQLClient {
    pub fn new(config: ClientConfig) -> Result<Self, TransportError> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(TransportError::Build)?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// POST the issues query and parse the envelope.
    ///
    /// An error status still counts as a response when its body parses as an
    /// envelope, so `401 {"message": "Bad credentials"}` reaches the UI as a
    /// GraphQL-level error.
    pub fn post_issues_query(
        &self,
        variables: &IssuesQueryVariables,
    ) -> Result<GraphQLResponse<IssuesData>, TransportError> {
        let url = &self.config.base_url;
        let mut request = self
            .http
            .post(url)
            .header(ACCEPT, "application/json")
            .json(&GraphQLRequest::issues_of_repository(variables));
        if let Some(token) = &self.config.token {
            request = request.header(AUTHORIZATION, format!("bearer {token}"));
        }

        let response = request.send().map_err(|source| TransportError::Request {
            url: url.clone(),
            source,
        })?;
        let status = response.status();
        let body = response.text().map_err(|source| TransportError::Request {
            url: url.clone(),
            source,
        })?;
        log::debug!("graphql response status={status} bytes={}", body.len());

        match serde_json::from_str::<GraphQLResponse<IssuesData>>(&body) {
            Ok(envelope)
                if status.is_success()
                    || envelope.errors.is_some()
                    || envelope.message.is_some() =>
            {
                Ok(envelope)
            }
            Ok(_) => Err(TransportError::Status {
                status: status.as_u16(),
                body,
            }),
            Err(_) if !status.is_success() => Err(TransportError::Status {
                status: status.as_u16(),
                body,
            }),
            Err(e) => Err(TransportError::Decode(e)),
        }
    }
}

impl GraphQLProvider for HttpGraphQLClient {
    fn fetch_issues(&self, variables: &IssuesQueryVariables) -> FetchOutcome {
        match self.post_issues_query(variables) {
            Ok(envelope) => resolve_issues_query(envelope).into(),
            Err(e) => {
                log::error!("issues query failed: {e}");
                FetchOutcome::TransportFailure(e.to_string())
            }
        }
    }
}
