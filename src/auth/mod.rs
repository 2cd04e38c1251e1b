//! auth - Issue tracker credentials
//!
//! # Architecture
//!
//! Credentials are obtained through the [`CredentialProvider`] capability,
//! which is handed to the metadata resolver. The resolver never talks to a
//! terminal itself, so it can be exercised with [`StaticCredentials`].
//!
//! Credentials live only in memory for one run. They are never written to
//! disk or the environment.
//!
//! # Security
//!
//! Passwords must never appear in logs, errors, or debug output. All types
//! in this module implement custom Debug to redact them.
//!
//! # Example
//!
//! ```
//! use releasenotes::auth::{CredentialProvider, Credentials, StaticCredentials};
//!
//! let provider = StaticCredentials::new(Credentials::new("jdoe", "secret"));
//! let creds = provider.credentials().unwrap().unwrap();
//! assert_eq!(creds.username(), "jdoe");
//! assert!(!format!("{:?}", creds).contains("secret"));
//! ```

mod errors;
mod provider;

pub use errors::AuthError;
pub use provider::{PromptCredentials, StaticCredentials, PASSWORD_PROMPT, USERNAME_PROMPT};

/// Basic-auth credentials for the issue tracker.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    /// Create credentials.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// The username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// The password. Do not log or print it.
    pub fn password(&self) -> &str {
        &self.password
    }
}

// Custom Debug to avoid exposing the password
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Capability: supply optional tracker credentials.
///
/// `Ok(None)` means "run unauthenticated"; every issue then resolves to the
/// "Unknown" classification with a browse link.
pub trait CredentialProvider {
    /// Obtain credentials, possibly by asking the user.
    fn credentials(&self) -> Result<Option<Credentials>, AuthError>;
}
