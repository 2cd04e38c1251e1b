//! auth::provider
//!
//! Credential providers.
//!
//! - [`StaticCredentials`] hands out a fixed answer (tests, non-interactive runs)
//! - [`PromptCredentials`] asks for a username (skippable) and a masked password

use super::errors::AuthError;
use super::{CredentialProvider, Credentials};
use crate::ui::prompts::{PromptError, Prompter, TerminalPrompter};

/// Prompt shown for the username.
pub const USERNAME_PROMPT: &str = "Enter your JIRA username (Enter to skip): ";

/// Prompt shown for the password.
pub const PASSWORD_PROMPT: &str = "Enter your JIRA password: ";

/// A provider with a fixed answer.
#[derive(Debug, Clone, Default)]
pub struct StaticCredentials(Option<Credentials>);

impl StaticCredentials {
    /// Always supply these credentials.
    pub fn new(credentials: Credentials) -> Self {
        Self(Some(credentials))
    }

    /// Never supply credentials (unauthenticated run).
    pub fn none() -> Self {
        Self(None)
    }
}

impl CredentialProvider for StaticCredentials {
    fn credentials(&self) -> Result<Option<Credentials>, AuthError> {
        Ok(self.0.clone())
    }
}

/// Asks the user for credentials.
///
/// A preset username skips the username prompt and a preset password skips
/// the password prompt. An empty username means "skip authentication".
/// Without an interactive terminal and without a preset username the run is
/// unauthenticated.
pub struct PromptCredentials<P: Prompter = TerminalPrompter> {
    prompter: P,
    username: Option<String>,
    password: Option<String>,
}

impl PromptCredentials<TerminalPrompter> {
    /// Prompt on the terminal (when `interactive`).
    pub fn terminal(interactive: bool) -> Self {
        Self::with_prompter(TerminalPrompter::new(interactive))
    }
}

impl<P: Prompter> PromptCredentials<P> {
    /// Prompt through a custom prompter.
    pub fn with_prompter(prompter: P) -> Self {
        Self {
            prompter,
            username: None,
            password: None,
        }
    }

    /// Use this username instead of asking.
    pub fn username(mut self, username: Option<String>) -> Self {
        self.username = username.filter(|u| !u.is_empty());
        self
    }

    /// Use this password instead of asking.
    pub fn password(mut self, password: Option<String>) -> Self {
        self.password = password;
        self
    }
}

// Custom Debug to avoid exposing a preset password
impl<P: Prompter> std::fmt::Debug for PromptCredentials<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PromptCredentials")
            .field("username", &self.username)
            .field("has_password", &self.password.is_some())
            .finish()
    }
}

impl<P: Prompter> CredentialProvider for PromptCredentials<P> {
    fn credentials(&self) -> Result<Option<Credentials>, AuthError> {
        let username = match &self.username {
            Some(user) => user.clone(),
            None => match self.prompter.input(USERNAME_PROMPT) {
                Ok(user) => user.trim().to_string(),
                Err(PromptError::NotInteractive) => return Ok(None),
                Err(e) => return Err(e.into()),
            },
        };

        if username.is_empty() {
            return Ok(None);
        }

        let password = match &self.password {
            Some(pass) => pass.clone(),
            None => match self.prompter.password(PASSWORD_PROMPT) {
                Ok(pass) => pass,
                Err(PromptError::NotInteractive) => {
                    return Err(AuthError::PasswordRequired(username))
                }
                Err(e) => return Err(e.into()),
            },
        };

        Ok(Some(Credentials::new(username, password)))
    }
}
