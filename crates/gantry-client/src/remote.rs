//! GraphQL mutation client.
//!
//! Posts mutation documents to a Phoenix-compatible collector over HTTP.
//! The wire format is plain GraphQL-over-HTTP: a JSON body with `query`
//! and `variables`, and a response carrying `data` and/or `errors`.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use gantry_actions::{ClearProjectInput, MutationError, MutationResult, ProjectMutations};
use gantry_core::ProjectId;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::error::{ClientError, ClientResult};

/// Connection establishment timeout, separate from the per-request timeout.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

const DELETE_PROJECT_MUTATION: &str = "\
mutation DeleteProject($projectId: ID!) {
  deleteProject(id: $projectId) {
    __typename
  }
}";

const CLEAR_PROJECT_MUTATION: &str = "\
mutation ClearProject($input: ClearProjectInput!) {
  clearProject(input: $input) {
    __typename
  }
}";

const REMOVE_PROJECT_DATA_MUTATION: &str = "\
mutation RemoveProjectData($input: RemoveProjectDataInput!) {
  removeProjectData(input: $input) {
    __typename
  }
}";

/// A GraphQL-over-HTTP request body.
#[derive(Debug, Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
    variables: Value,
}

/// GraphQL mutation client for a remote collector.
///
/// Implements [`ProjectMutations`] for the delete and clear operations the
/// dispatcher routes, plus an inherent [`remove_project_data`] used by the
/// remove-data sub-form flow.
///
/// [`remove_project_data`]: RemoteMutations::remove_project_data
#[derive(Debug, Clone)]
pub struct RemoteMutations {
    client: Client,
    endpoint: Url,
}

impl RemoteMutations {
    /// Create a client for the given endpoint with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] if the endpoint is not a valid URL or the
    /// HTTP client cannot be built (e.g. TLS backend unavailable on minimal
    /// Linux containers).
    pub fn new(endpoint: &str, timeout: Duration) -> ClientResult<Self> {
        let endpoint = Url::parse(endpoint).map_err(|e| ClientError::InvalidEndpoint {
            url: endpoint.to_owned(),
            message: e.to_string(),
        })?;

        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(CONNECT_TIMEOUT)
            .user_agent(concat!("gantry/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ClientError::HttpClient(e.to_string()))?;

        Ok(Self { client, endpoint })
    }

    /// The endpoint this client posts to.
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Remove traces and evaluations recorded before the cutoff, keeping
    /// the project itself.
    ///
    /// This is not part of [`ProjectMutations`] because the dispatcher never
    /// routes the remove-data action; the sub-form calls it directly with
    /// the cutoff it collected.
    ///
    /// # Errors
    ///
    /// Returns a [`MutationError`] if the request fails or the remote
    /// rejects the mutation.
    pub async fn remove_project_data(
        &self,
        id: &ProjectId,
        before: DateTime<Utc>,
    ) -> MutationResult<()> {
        let variables = serde_json::json!({
            "input": {
                "projectId": id.as_str(),
                "endDate": before.to_rfc3339(),
            }
        });
        self.execute("removeProjectData", REMOVE_PROJECT_DATA_MUTATION, variables)
            .await
    }

    /// Post one mutation document and fold the response into a result.
    async fn execute(
        &self,
        operation: &str,
        query: &'static str,
        variables: Value,
    ) -> MutationResult<()> {
        debug!(operation, endpoint = %self.endpoint, "posting GraphQL mutation");

        let request = GraphQlRequest { query, variables };
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await
            .map_err(|e| MutationError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MutationError::Transport(format!(
                "HTTP {}: {body}",
                status.as_u16()
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| MutationError::Transport(e.to_string()))?;

        parse_graphql_response(&body)
    }
}

#[async_trait]
impl ProjectMutations for RemoteMutations {
    async fn delete_project(&self, id: &ProjectId) -> MutationResult<()> {
        let variables = serde_json::json!({ "projectId": id.as_str() });
        self.execute("deleteProject", DELETE_PROJECT_MUTATION, variables)
            .await
    }

    async fn clear_project(&self, input: ClearProjectInput) -> MutationResult<()> {
        let variables = serde_json::json!({ "input": input });
        self.execute("clearProject", CLEAR_PROJECT_MUTATION, variables)
            .await
    }
}

/// Fold a GraphQL response body into a mutation result.
///
/// The `errors` array wins over `data`: a populated first error becomes
/// [`MutationError::Rejected`] with that error's message. A response with
/// neither errors nor usable data is a transport-level failure.
fn parse_graphql_response(body: &Value) -> MutationResult<()> {
    if let Some(errors) = body.get("errors").and_then(Value::as_array) {
        if let Some(first) = errors.first() {
            let message = first
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("unknown GraphQL error");
            return Err(MutationError::Rejected {
                message: message.to_owned(),
            });
        }
    }

    match body.get("data") {
        Some(data) if !data.is_null() => Ok(()),
        _ => Err(MutationError::Transport(
            "GraphQL response carried no data".to_owned(),
        )),
    }
}
