//! engine::pipeline
//!
//! The end-to-end release notes pipeline.
//!
//! # Stages
//!
//! ```text
//! resolve tag window -> commits since tag -> extract issue keys
//!     -> connect to tracker -> resolve metadata -> render
//! ```
//!
//! Each stage logs one `[INFO]` progress line. The pipeline never prints the
//! report itself; it returns the rendered text.

use thiserror::Error;
use tracing::debug;

use super::resolve::MetadataResolver;
use crate::auth::{AuthError, CredentialProvider};
use crate::core::config::Settings;
use crate::core::issues::{commits_since, ExtractError, IssueExtractor};
use crate::core::tags::{resolver_for, TagError};
use crate::git::{GitError, GitQuery};
use crate::tracker::TrackerError;
use crate::ui::output::{self, Verbosity};
use crate::ui::report;

/// Errors that abort a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Tag window could not be resolved.
    #[error(transparent)]
    Tags(#[from] TagError),

    /// The commit query could not be run.
    #[error(transparent)]
    Git(#[from] GitError),

    /// The issue prefix is not a valid pattern.
    #[error(transparent)]
    Extract(#[from] ExtractError),

    /// Credentials could not be obtained.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// A tracker lookup failed.
    #[error("failed to retrieve issue details: {0}")]
    Tracker(#[from] TrackerError),
}

/// Run the pipeline with a resolver built from `credentials`.
///
/// # Errors
///
/// Returns the first failing stage's error. Nothing is rendered on failure.
pub async fn generate(
    settings: &Settings,
    git: &dyn GitQuery,
    credentials: &dyn CredentialProvider,
    verbosity: Verbosity,
) -> Result<String, PipelineError> {
    generate_with(settings, git, verbosity, || {
        MetadataResolver::connect(settings, credentials)
    })
    .await
}

/// Run the pipeline with a caller-supplied resolver.
///
/// `connect` is called after the issue keys are extracted, so the
/// credential prompt appears after the progress lines that precede it.
pub async fn generate_with<F>(
    settings: &Settings,
    git: &dyn GitQuery,
    verbosity: Verbosity,
    connect: F,
) -> Result<String, PipelineError>
where
    F: FnOnce() -> Result<MetadataResolver, AuthError>,
{
    output::info(
        format!("Looking for commits since {} last tags", settings.tags_back),
        verbosity,
    );
    let tag = resolver_for(settings.git_mode).resolve(git, settings.tags_back)?;

    output::info(
        format!(
            "Extracting commits since tag: {}, since timestamp: {}.",
            tag.name, tag.timestamp
        ),
        verbosity,
    );
    let commits = commits_since(git, &tag.timestamp)?;

    let extractor = IssueExtractor::new(&settings.issue_prefix)?;
    output::info(format!("Filtering {} issues", extractor.pattern()), verbosity);
    let issues = extractor.extract(&commits);
    debug!(count = issues.len(), "extracted issue keys");

    output::info("Connecting to JIRA to retrieve the issue titles.", verbosity);
    let resolver = connect()?;
    let groups = resolver.resolve_all(&issues).await?;

    Ok(report::render(&groups, settings.output, &settings.server_url))
}
