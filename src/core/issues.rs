//! core::issues
//!
//! Commit window query and issue reference extraction.
//!
//! An issue reference is `<prefix><digits>`, where the prefix is a
//! configurable regex fragment matched case-insensitively. Matches keep the
//! casing found in the commit text and are deduplicated by exact string.
//!
//! # Example
//!
//! ```
//! use releasenotes::core::issues::IssueExtractor;
//!
//! let extractor = IssueExtractor::new("ABC-").unwrap();
//! let issues = extractor.extract("Fix bug ABC-42\nabc-7: tidy up\nABC-42 again\n");
//! let keys: Vec<_> = issues.iter().map(|k| k.as_str()).collect();
//! assert_eq!(keys, vec!["ABC-42", "abc-7"]);
//! ```

use regex::{Regex, RegexBuilder};
use thiserror::Error;

use crate::core::types::{IssueKey, IssueSet};
use crate::git::{GitError, GitQuery};

/// Errors from building an issue extractor.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The configured prefix is not a valid regex fragment.
    #[error("invalid issue prefix pattern '{prefix}': {message}")]
    InvalidPrefix {
        /// The offending prefix
        prefix: String,
        /// Regex compiler message
        message: String,
    },
}

/// Finds issue references in commit text.
#[derive(Debug, Clone)]
pub struct IssueExtractor {
    pattern: String,
    regex: Regex,
}

impl IssueExtractor {
    /// Build an extractor for `prefix` followed by one or more digits.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::InvalidPrefix`] if the combined pattern does
    /// not compile.
    pub fn new(prefix: &str) -> Result<Self, ExtractError> {
        let pattern = format!("{}[0-9]+", prefix);
        let regex = RegexBuilder::new(&pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| ExtractError::InvalidPrefix {
                prefix: prefix.to_string(),
                message: e.to_string(),
            })?;
        Ok(Self { pattern, regex })
    }

    /// The full pattern, e.g. `ABC-[0-9]+`.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Collect every distinct matching substring, in first-seen order.
    pub fn extract(&self, commit_text: &str) -> IssueSet {
        self.regex
            .find_iter(commit_text)
            .map(|m| IssueKey::new(m.as_str()))
            .collect()
    }
}

/// Commit subject lines for commits dated at or after `timestamp`, one per line.
///
/// The output follows the [`GitQuery`] contract: error text from git is
/// returned as if it were the log.
pub fn commits_since(git: &dyn GitQuery, timestamp: &str) -> Result<String, GitError> {
    let since = format!("--since={}", timestamp);
    git.run(&["log", "--pretty=format:%s", &since])
}
