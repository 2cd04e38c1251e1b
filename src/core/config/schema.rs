//! core::config::schema
//!
//! Configuration file schema.
//!
//! The same schema is used for the global file and the repository file;
//! every field is optional and unset fields fall through to the next
//! precedence level.
//!
//! # Example
//!
//! ```toml
//! server = "https://jira.example.com"
//! issue_prefix = "[Ss][Tt][Aa]-"
//! tags_back = 1
//! output = "markdown"
//! git_mode = "ref"
//! username = "jdoe"
//! ```

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::core::issues::IssueExtractor;
use crate::core::tags::GitMode;

/// Contents of a `releasenotes` TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Issue tracker base URL
    pub server: Option<String>,

    /// Issue key prefix as a regex fragment (digits are appended)
    pub issue_prefix: Option<String>,

    /// Default number of tags back
    pub tags_back: Option<u32>,

    /// Default output style ("markdown" or anything else for html)
    pub output: Option<String>,

    /// Tag listing strategy
    pub git_mode: Option<GitMode>,

    /// Tracker username; skips the username prompt
    pub username: Option<String>,
}

impl FileConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(server) = &self.server {
            if server.trim().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "server cannot be empty".to_string(),
                ));
            }
        }

        if let Some(prefix) = &self.issue_prefix {
            IssueExtractor::new(prefix).map_err(|e| ConfigError::InvalidValue(e.to_string()))?;
        }

        if self.tags_back == Some(0) {
            return Err(ConfigError::InvalidValue(
                "tags_back must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Overlay `other` on top of `self`; fields set in `other` win.
    pub fn merged_with(&self, other: &FileConfig) -> FileConfig {
        FileConfig {
            server: other.server.clone().or_else(|| self.server.clone()),
            issue_prefix: other
                .issue_prefix
                .clone()
                .or_else(|| self.issue_prefix.clone()),
            tags_back: other.tags_back.or(self.tags_back),
            output: other.output.clone().or_else(|| self.output.clone()),
            git_mode: other.git_mode.or(self.git_mode),
            username: other.username.clone().or_else(|| self.username.clone()),
        }
    }
}
