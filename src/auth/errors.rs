//! auth::errors
//!
//! Credential error types.
//!
//! # Example
//!
//! ```
//! use releasenotes::auth::AuthError;
//!
//! let err = AuthError::PasswordRequired("jdoe".to_string());
//! assert!(err.to_string().contains("jdoe"));
//! ```

use thiserror::Error;

use crate::ui::prompts::PromptError;

/// Errors from obtaining credentials.
///
/// # Security
///
/// Error messages never include passwords.
#[derive(Debug, Error)]
pub enum AuthError {
    /// A username is known but no password could be obtained.
    #[error("a password is required for '{0}'; set RELEASENOTES_PASSWORD or run interactively")]
    PasswordRequired(String),

    /// The user cancelled a prompt.
    #[error("authentication cancelled by user")]
    Cancelled,

    /// A prompt failed.
    #[error("prompt failed: {0}")]
    Prompt(String),
}

impl From<PromptError> for AuthError {
    fn from(err: PromptError) -> Self {
        match err {
            PromptError::Cancelled => AuthError::Cancelled,
            other => AuthError::Prompt(other.to_string()),
        }
    }
}
