//! Integration tests for the Jira tracker client and metadata resolution.
//!
//! HTTP behavior is exercised against a local wiremock server.

use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use releasenotes::auth::{Credentials, StaticCredentials};
use releasenotes::core::config::Settings;
use releasenotes::core::types::{IssueKey, IssueSet, IssueTitle};
use releasenotes::engine::MetadataResolver;
use releasenotes::tracker::{IssueTracker, JiraTracker, TrackerError};

/// base64("jdoe:secret")
const BASIC_AUTH: &str = "Basic amRvZTpzZWNyZXQ=";

fn issue_body(key: &str, issue_type: &str, summary: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "10001",
        "key": key,
        "fields": {
            "issuetype": { "id": "1", "name": issue_type, "subtask": false },
            "summary": summary
        }
    })
}

async fn mount_issue(server: &MockServer, key: &str, issue_type: &str, summary: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/rest/api/2/issue/{}", key)))
        .and(query_param("fields", "issuetype,summary"))
        .and(header("Authorization", BASIC_AUTH))
        .respond_with(ResponseTemplate::new(200).set_body_json(issue_body(key, issue_type, summary)))
        .expect(1)
        .mount(server)
        .await;
}

fn jira(server: &MockServer) -> JiraTracker {
    JiraTracker::new(server.uri(), Credentials::new("jdoe", "secret"))
}

// =============================================================================
// JiraTracker
// =============================================================================

mod jira_client {
    use super::*;

    #[tokio::test]
    async fn fetches_type_and_summary() {
        let server = MockServer::start().await;
        mount_issue(&server, "ABC-42", "Bug", "Login fails").await;

        let issue = jira(&server).get_issue("ABC-42").await.unwrap();
        assert_eq!(issue.key, "ABC-42");
        assert_eq!(issue.issue_type, "Bug");
        assert_eq!(issue.summary, "Login fails");
    }

    #[tokio::test]
    async fn unauthorized_is_auth_failed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let err = jira(&server).get_issue("ABC-1").await.unwrap_err();
        assert!(matches!(err, TrackerError::AuthFailed(_)));
        assert!(!err.to_string().contains("secret"));
    }

    #[tokio::test]
    async fn forbidden_is_auth_failed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let err = jira(&server).get_issue("ABC-1").await.unwrap_err();
        assert!(matches!(err, TrackerError::AuthFailed(_)));
    }

    #[tokio::test]
    async fn missing_issue_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "errorMessages": ["Issue Does Not Exist"],
                "errors": {}
            })))
            .mount(&server)
            .await;

        let err = jira(&server).get_issue("ABC-404").await.unwrap_err();
        assert_eq!(err, TrackerError::NotFound("ABC-404".into()));
    }

    #[tokio::test]
    async fn rate_limited() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let err = jira(&server).get_issue("ABC-1").await.unwrap_err();
        assert_eq!(err, TrackerError::RateLimited);
    }

    #[tokio::test]
    async fn other_status_carries_error_messages() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "errorMessages": ["Field 'x' does not exist", "Try again"]
            })))
            .mount(&server)
            .await;

        let err = jira(&server).get_issue("ABC-1").await.unwrap_err();
        assert_eq!(
            err,
            TrackerError::ApiError {
                status: 400,
                message: "Field 'x' does not exist; Try again".into(),
            }
        );
    }

    #[tokio::test]
    async fn server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = jira(&server).get_issue("ABC-1").await.unwrap_err();
        assert!(matches!(err, TrackerError::ApiError { status: 503, .. }));
    }

    #[tokio::test]
    async fn malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
            .mount(&server)
            .await;

        let err = jira(&server).get_issue("ABC-1").await.unwrap_err();
        assert!(matches!(err, TrackerError::ApiError { status: 200, .. }));
    }

    #[tokio::test]
    async fn unreachable_server_is_network_error() {
        let server = MockServer::start().await;
        let uri = server.uri();
        drop(server);

        let tracker = JiraTracker::new(uri, Credentials::new("jdoe", "secret"));
        let err = tracker.get_issue("ABC-1").await.unwrap_err();
        assert!(matches!(err, TrackerError::NetworkError(_)));
    }
}

// =============================================================================
// MetadataResolver over Jira
// =============================================================================

mod resolver {
    use super::*;

    fn settings(server: &MockServer) -> Settings {
        Settings {
            server_url: server.uri(),
            ..Settings::default()
        }
    }

    #[tokio::test]
    async fn groups_jira_issues_by_type() {
        let server = MockServer::start().await;
        mount_issue(&server, "ABC-1", "Bug", "Crash on start").await;
        mount_issue(&server, "ABC-2", "User story", "Export to CSV").await;
        mount_issue(&server, "ABC-3", "Bug", "Typo").await;

        let provider = StaticCredentials::new(Credentials::new("jdoe", "secret"));
        let resolver = MetadataResolver::connect(&settings(&server), &provider).unwrap();
        let issues: IssueSet = ["ABC-1", "ABC-2", "ABC-3"]
            .into_iter()
            .map(IssueKey::new)
            .collect();

        let groups = resolver.resolve_all(&issues).await.unwrap();

        let names: Vec<_> = groups.iter().map(|g| g.classification.as_str()).collect();
        assert_eq!(names, vec!["Bug", "User story"]);
        let bugs = groups.get("Bug").unwrap();
        assert_eq!(bugs.len(), 2);
        assert_eq!(bugs[1].title, IssueTitle::Summary("Typo".into()));
    }

    #[tokio::test]
    async fn first_failure_aborts() {
        let server = MockServer::start().await;
        mount_issue(&server, "ABC-1", "Bug", "Crash on start").await;
        Mock::given(method("GET"))
            .and(path("/rest/api/2/issue/ABC-2"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let provider = StaticCredentials::new(Credentials::new("jdoe", "secret"));
        let resolver = MetadataResolver::connect(&settings(&server), &provider).unwrap();
        let issues: IssueSet = ["ABC-1", "ABC-2"].into_iter().map(IssueKey::new).collect();

        let result = resolver.resolve_all(&issues).await;
        assert!(matches!(result, Err(TrackerError::ApiError { status: 500, .. })));
    }

    #[tokio::test]
    async fn without_credentials_no_requests_are_made() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let resolver =
            MetadataResolver::connect(&settings(&server), &StaticCredentials::none()).unwrap();
        let issues: IssueSet = ["ABC-1"].into_iter().map(IssueKey::new).collect();

        let groups = resolver.resolve_all(&issues).await.unwrap();
        assert_eq!(groups.get("Unknown").unwrap().len(), 1);
    }
}
