//! tracker::traits
//!
//! IssueTracker trait definition for looking up issue metadata.
//!
//! # Design
//!
//! The `IssueTracker` trait is async because lookups involve network I/O.
//! Callers await lookups one at a time; implementations need not support
//! concurrent requests.
//!
//! # Example
//!
//! ```ignore
//! use releasenotes::tracker::{IssueTracker, TrackerError};
//!
//! async fn describe(tracker: &dyn IssueTracker) -> Result<(), TrackerError> {
//!     let issue = tracker.get_issue("ABC-42").await?;
//!     println!("{} [{}] {}", issue.key, issue.issue_type, issue.summary);
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use thiserror::Error;

/// Errors from tracker operations.
///
/// Messages never include credentials.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TrackerError {
    /// Authentication failed (bad credentials, insufficient permissions).
    #[error("authentication failed: {0}")]
    AuthFailed(String),

    /// The requested issue was not found.
    #[error("issue not found: {0}")]
    NotFound(String),

    /// Rate limit exceeded.
    #[error("rate limited")]
    RateLimited,

    /// API returned an error.
    #[error("API error: {status} - {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
    },

    /// Network or connection error.
    #[error("network error: {0}")]
    NetworkError(String),
}

/// Issue metadata returned by a tracker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerIssue {
    /// Issue key as reported by the tracker
    pub key: String,
    /// Issue type name (e.g. "Bug", "User story")
    pub issue_type: String,
    /// Short title
    pub summary: String,
}

/// An issue-tracking service.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`.
///
/// # Error Handling
///
/// `get_issue` failures are not retried by callers; one failure aborts the
/// run.
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Get the tracker name (e.g., "jira").
    fn name(&self) -> &'static str;

    /// Look up an issue's type and summary.
    ///
    /// # Errors
    ///
    /// - `AuthFailed` if the credentials are rejected
    /// - `NotFound` if the issue doesn't exist or is not visible
    /// - `ApiError` / `NetworkError` for anything else
    async fn get_issue(&self, key: &str) -> Result<TrackerIssue, TrackerError>;
}
