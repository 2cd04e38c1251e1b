//! engine::resolve
//!
//! Issue metadata resolution: turn extracted issue keys into grouped records.
//!
//! # Design
//!
//! The resolver holds an optional tracker session. With a session, every key
//! is looked up (one request at a time, in set order) and grouped by the
//! tracker's issue type. Without one, every key is grouped under
//! "Unknown" and carries its browse URL instead of a summary.
//!
//! Any lookup failure aborts resolution; no partial groups are returned.
//!
//! # Example
//!
//! ```
//! use releasenotes::core::config::Settings;
//! use releasenotes::core::types::{IssueKey, IssueSet};
//! use releasenotes::engine::MetadataResolver;
//! use releasenotes::tracker::mock::MockTracker;
//!
//! # tokio_test::block_on(async {
//! let settings = Settings::default();
//! let tracker = MockTracker::new().with_issue("ABC-42", "Bug", "Login fails");
//! let resolver = MetadataResolver::with_tracker(&settings, Box::new(tracker));
//!
//! let issues: IssueSet = [IssueKey::new("ABC-42")].into_iter().collect();
//! let groups = resolver.resolve_all(&issues).await.unwrap();
//! assert_eq!(groups.get("Bug").unwrap().len(), 1);
//! # });
//! ```

use tracing::debug;

use crate::auth::{AuthError, CredentialProvider};
use crate::core::config::Settings;
use crate::core::types::{Classification, IssueGroups, IssueRecord, IssueSet, IssueTitle};
use crate::tracker::{IssueTracker, JiraTracker, TrackerError};

/// Resolves issue keys to classified records.
pub struct MetadataResolver {
    /// Tracker session, if credentials were supplied
    tracker: Option<Box<dyn IssueTracker>>,
    /// Tracker base URL used for browse links
    server_url: String,
}

impl std::fmt::Debug for MetadataResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetadataResolver")
            .field("tracker", &self.tracker.as_ref().map(|t| t.name()))
            .field("server_url", &self.server_url)
            .finish()
    }
}

impl MetadataResolver {
    /// Build a resolver with no tracker session.
    pub fn unauthenticated(settings: &Settings) -> Self {
        Self {
            tracker: None,
            server_url: settings.server_url.clone(),
        }
    }

    /// Build a resolver around an existing tracker.
    pub fn with_tracker(settings: &Settings, tracker: Box<dyn IssueTracker>) -> Self {
        Self {
            tracker: Some(tracker),
            server_url: settings.server_url.clone(),
        }
    }

    /// Ask `provider` for credentials and open a Jira session if any are given.
    ///
    /// # Errors
    ///
    /// Returns `AuthError` if the provider fails (e.g. a cancelled prompt).
    pub fn connect(settings: &Settings, provider: &dyn CredentialProvider) -> Result<Self, AuthError> {
        match provider.credentials()? {
            Some(credentials) => {
                debug!(server = %settings.server_url, username = credentials.username(), "opening tracker session");
                let jira = JiraTracker::new(settings.server_url.clone(), credentials);
                Ok(Self::with_tracker(settings, Box::new(jira)))
            }
            None => {
                debug!("no credentials supplied; resolving issues without the tracker");
                Ok(Self::unauthenticated(settings))
            }
        }
    }

    /// Whether a tracker session is open.
    pub fn is_authenticated(&self) -> bool {
        self.tracker.is_some()
    }

    /// Resolve every key in `issues`, grouping by classification.
    ///
    /// # Errors
    ///
    /// Returns the first `TrackerError` encountered.
    pub async fn resolve_all(&self, issues: &IssueSet) -> Result<IssueGroups, TrackerError> {
        let mut groups = IssueGroups::new();

        for key in issues {
            let record = match &self.tracker {
                Some(tracker) => {
                    let issue = tracker.get_issue(key.as_str()).await?;
                    debug!(key = %key, issue_type = %issue.issue_type, "resolved issue");
                    IssueRecord {
                        key: key.clone(),
                        classification: Classification::new(issue.issue_type),
                        title: IssueTitle::Summary(issue.summary),
                    }
                }
                None => IssueRecord {
                    key: key.clone(),
                    classification: Classification::unknown(),
                    title: IssueTitle::BrowseUrl(key.browse_url(&self.server_url)),
                },
            };
            groups.insert(record);
        }

        Ok(groups)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{Credentials, StaticCredentials};
    use crate::core::types::IssueKey;
    use crate::tracker::mock::MockTracker;

    fn issues(keys: &[&str]) -> IssueSet {
        keys.iter().map(|k| IssueKey::new(*k)).collect()
    }

    fn settings() -> Settings {
        Settings {
            server_url: "https://jira.test".to_string(),
            ..Settings::default()
        }
    }

    mod unauthenticated {
        use super::*;

        #[tokio::test]
        async fn everything_is_unknown() {
            let resolver = MetadataResolver::unauthenticated(&settings());
            let groups = resolver
                .resolve_all(&issues(&["ABC-1", "abc-2"]))
                .await
                .unwrap();

            assert_eq!(groups.len(), 1);
            let records = groups.get("Unknown").unwrap();
            assert_eq!(records.len(), 2);
            assert_eq!(
                records[1].title,
                IssueTitle::BrowseUrl("https://jira.test/browse/abc-2".into())
            );
        }

        #[tokio::test]
        async fn empty_set_gives_empty_groups() {
            let resolver = MetadataResolver::unauthenticated(&settings());
            let groups = resolver.resolve_all(&IssueSet::new()).await.unwrap();
            assert!(groups.is_empty());
        }

        #[test]
        fn connect_without_credentials() {
            let resolver =
                MetadataResolver::connect(&settings(), &StaticCredentials::none()).unwrap();
            assert!(!resolver.is_authenticated());
        }
    }

    mod authenticated {
        use super::*;

        #[tokio::test]
        async fn groups_by_issue_type() {
            let tracker = MockTracker::new()
                .with_issue("ABC-1", "Bug", "Crash")
                .with_issue("ABC-2", "User story", "Export")
                .with_issue("ABC-3", "Bug", "Typo");
            let resolver = MetadataResolver::with_tracker(&settings(), Box::new(tracker.clone()));

            let groups = resolver
                .resolve_all(&issues(&["ABC-1", "ABC-2", "ABC-3"]))
                .await
                .unwrap();

            let names: Vec<_> = groups.iter().map(|g| g.classification.as_str()).collect();
            assert_eq!(names, vec!["Bug", "User story"]);
            assert_eq!(groups.get("Bug").unwrap().len(), 2);
            assert_eq!(
                groups.get("User story").unwrap()[0].title,
                IssueTitle::Summary("Export".into())
            );
            assert_eq!(tracker.requests(), vec!["ABC-1", "ABC-2", "ABC-3"]);
        }

        #[tokio::test]
        async fn one_lookup_per_issue() {
            let tracker = MockTracker::new().with_issue("ABC-1", "Bug", "Crash");
            let resolver = MetadataResolver::with_tracker(&settings(), Box::new(tracker.clone()));
            resolver.resolve_all(&issues(&["ABC-1"])).await.unwrap();
            assert_eq!(tracker.requests().len(), 1);
        }

        #[tokio::test]
        async fn failure_aborts() {
            let tracker = MockTracker::new()
                .with_issue("ABC-1", "Bug", "Crash")
                .with_issue("ABC-3", "Bug", "Typo")
                .fail_on("ABC-2", TrackerError::RateLimited);
            let resolver = MetadataResolver::with_tracker(&settings(), Box::new(tracker.clone()));

            let result = resolver
                .resolve_all(&issues(&["ABC-1", "ABC-2", "ABC-3"]))
                .await;
            assert_eq!(result, Err(TrackerError::RateLimited));
            assert_eq!(tracker.requests(), vec!["ABC-1", "ABC-2"]);
        }

        #[test]
        fn connect_with_credentials() {
            let provider = StaticCredentials::new(Credentials::new("jdoe", "secret"));
            let resolver = MetadataResolver::connect(&settings(), &provider).unwrap();
            assert!(resolver.is_authenticated());
            assert!(format!("{:?}", resolver).contains("jira"));
        }
    }
}
