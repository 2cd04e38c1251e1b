//! tracker::jira
//!
//! Jira implementation of [`IssueTracker`] using the REST API (v2).
//!
//! # Design
//!
//! One `GET /rest/api/2/issue/{key}?fields=issuetype,summary` per lookup,
//! authenticated with HTTP basic auth. Only `fields.issuetype.name` and
//! `fields.summary` are read from the response.
//!
//! # Example
//!
//! ```ignore
//! use releasenotes::auth::Credentials;
//! use releasenotes::tracker::{IssueTracker, JiraTracker};
//!
//! let jira = JiraTracker::new("https://jira.example.com", Credentials::new("jdoe", "secret"));
//! let issue = jira.get_issue("ABC-42").await?;
//! println!("{}: {}", issue.issue_type, issue.summary);
//! ```

use async_trait::async_trait;
use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use tracing::debug;

use super::traits::{IssueTracker, TrackerError, TrackerIssue};
use crate::auth::Credentials;

/// User-Agent header value for API requests.
const USER_AGENT_VALUE: &str = "releasenotes-cli";

/// Fields requested for each issue.
const ISSUE_FIELDS: &str = "issuetype,summary";

/// Jira tracker client.
pub struct JiraTracker {
    /// HTTP client for making requests
    client: Client,
    /// Server base URL without a trailing slash
    server: String,
    /// Basic-auth credentials
    credentials: Credentials,
}

// Custom Debug to avoid exposing credentials
impl std::fmt::Debug for JiraTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JiraTracker")
            .field("server", &self.server)
            .field("username", &self.credentials.username())
            .finish()
    }
}

impl JiraTracker {
    /// Create a client for `server` (e.g. `https://jira.example.com`).
    pub fn new(server: impl Into<String>, credentials: Credentials) -> Self {
        let server = server.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            server,
            credentials,
        }
    }

    /// Get the server base URL.
    pub fn server(&self) -> &str {
        &self.server
    }

    /// Build URL for an issue resource.
    fn issue_url(&self, key: &str) -> String {
        format!("{}/rest/api/2/issue/{}", self.server, key)
    }

    /// Map a non-success response to an error.
    async fn handle_error_response(
        key: &str,
        response: Response,
        status: StatusCode,
    ) -> TrackerError {
        let message = match response.json::<JiraErrorResponse>().await {
            Ok(err) if !err.error_messages.is_empty() => err.error_messages.join("; "),
            _ => "Unknown error".to_string(),
        };

        match status {
            StatusCode::UNAUTHORIZED => TrackerError::AuthFailed("Invalid username or password".into()),
            StatusCode::FORBIDDEN => TrackerError::AuthFailed(format!("Permission denied: {}", message)),
            StatusCode::NOT_FOUND => TrackerError::NotFound(key.to_string()),
            StatusCode::TOO_MANY_REQUESTS => TrackerError::RateLimited,
            _ if status.is_server_error() => TrackerError::ApiError {
                status: status.as_u16(),
                message: format!("Jira server error: {}", message),
            },
            _ => TrackerError::ApiError {
                status: status.as_u16(),
                message,
            },
        }
    }
}

#[async_trait]
impl IssueTracker for JiraTracker {
    fn name(&self) -> &'static str {
        "jira"
    }

    async fn get_issue(&self, key: &str) -> Result<TrackerIssue, TrackerError> {
        let url = self.issue_url(key);
        debug!(%url, "fetching issue");

        let response = self
            .client
            .get(&url)
            .query(&[("fields", ISSUE_FIELDS)])
            .basic_auth(self.credentials.username(), Some(self.credentials.password()))
            .header(ACCEPT, "application/json")
            .header(USER_AGENT, USER_AGENT_VALUE)
            .send()
            .await
            .map_err(|e| TrackerError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::handle_error_response(key, response, status).await);
        }

        let issue: JiraIssue = response.json().await.map_err(|e| TrackerError::ApiError {
            status: status.as_u16(),
            message: format!("Failed to parse response: {}", e),
        })?;

        Ok(TrackerIssue {
            key: issue.key.unwrap_or_else(|| key.to_string()),
            issue_type: issue.fields.issuetype.name,
            summary: issue.fields.summary,
        })
    }
}

// =============================================================================
// Jira API Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct JiraIssue {
    key: Option<String>,
    fields: JiraFields,
}

#[derive(Debug, Deserialize)]
struct JiraFields {
    issuetype: JiraIssueType,
    summary: String,
}

#[derive(Debug, Deserialize)]
struct JiraIssueType {
    name: String,
}

#[derive(Debug, Deserialize)]
struct JiraErrorResponse {
    #[serde(rename = "errorMessages", default)]
    error_messages: Vec<String>,
}
