//! tracker::mock
//!
//! Mock tracker implementation for deterministic testing.
//!
//! # Design
//!
//! The mock tracker serves issues from memory, records every lookup, and can
//! be configured to fail for specific keys.
//!
//! # Example
//!
//! ```
//! use releasenotes::tracker::mock::MockTracker;
//! use releasenotes::tracker::IssueTracker;
//!
//! # tokio_test::block_on(async {
//! let tracker = MockTracker::new().with_issue("ABC-42", "Bug", "Login fails");
//!
//! let issue = tracker.get_issue("ABC-42").await.unwrap();
//! assert_eq!(issue.issue_type, "Bug");
//! assert_eq!(tracker.requests(), vec!["ABC-42".to_string()]);
//! # });
//! ```

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::traits::{IssueTracker, TrackerError, TrackerIssue};

/// Mock tracker for testing.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping.
#[derive(Debug, Clone, Default)]
pub struct MockTracker {
    /// Internal state shared across clones.
    inner: Arc<Mutex<MockTrackerInner>>,
}

/// Internal mutable state.
#[derive(Debug, Default)]
struct MockTrackerInner {
    /// Known issues by key.
    issues: HashMap<String, TrackerIssue>,
    /// Keys whose lookup fails with the given error.
    failures: HashMap<String, TrackerError>,
    /// Recorded lookups, in order.
    requests: Vec<String>,
}

impl MockTracker {
    /// Create a mock tracker with no issues.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an issue.
    pub fn with_issue(self, key: &str, issue_type: &str, summary: &str) -> Self {
        {
            let mut inner = self.inner.lock().unwrap();
            inner.issues.insert(
                key.to_string(),
                TrackerIssue {
                    key: key.to_string(),
                    issue_type: issue_type.to_string(),
                    summary: summary.to_string(),
                },
            );
        }
        self
    }

    /// Make lookups of `key` fail with `error`.
    pub fn fail_on(self, key: &str, error: TrackerError) -> Self {
        {
            let mut inner = self.inner.lock().unwrap();
            inner.failures.insert(key.to_string(), error);
        }
        self
    }

    /// Keys looked up so far, in order.
    pub fn requests(&self) -> Vec<String> {
        let inner = self.inner.lock().unwrap();
        inner.requests.clone()
    }
}

#[async_trait]
impl IssueTracker for MockTracker {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn get_issue(&self, key: &str) -> Result<TrackerIssue, TrackerError> {
        let mut inner = self.inner.lock().unwrap();
        inner.requests.push(key.to_string());

        if let Some(error) = inner.failures.get(key) {
            return Err(error.clone());
        }

        inner
            .issues
            .get(key)
            .cloned()
            .ok_or_else(|| TrackerError::NotFound(key.to_string()))
    }
}
