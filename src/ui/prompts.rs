//! ui::prompts
//!
//! Interactive prompts.
//!
//! # Design
//!
//! Prompts are only shown in interactive mode. In non-interactive mode every
//! prompt fails with [`PromptError::NotInteractive`] and callers decide on a
//! fallback. Prompting goes through the [`Prompter`] trait so callers can be
//! exercised without a terminal.
//!
//! Prompt text is written to stderr. Stdout carries only `[INFO]` lines and
//! the report.

use std::io::{self, BufRead, Write};

use thiserror::Error;

/// Errors from prompts.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("prompt cancelled by user")]
    Cancelled,

    #[error("not in interactive mode")]
    NotInteractive,

    #[error("IO error: {0}")]
    IoError(String),
}

/// Something that can ask the user for text.
pub trait Prompter {
    /// Prompt for a line of text. The trailing newline is removed.
    fn input(&self, message: &str) -> Result<String, PromptError>;

    /// Prompt for masked input (passwords). The input is not echoed.
    fn password(&self, message: &str) -> Result<String, PromptError>;
}

/// Prompts on the controlling terminal.
#[derive(Debug, Clone, Copy)]
pub struct TerminalPrompter {
    interactive: bool,
}

impl TerminalPrompter {
    /// Create a prompter. When `interactive` is false every prompt fails.
    pub fn new(interactive: bool) -> Self {
        Self { interactive }
    }
}

impl Prompter for TerminalPrompter {
    fn input(&self, message: &str) -> Result<String, PromptError> {
        if !self.interactive {
            return Err(PromptError::NotInteractive);
        }

        read_line_with_prompt(&mut io::stdin().lock(), &mut io::stderr(), message)
    }

    fn password(&self, message: &str) -> Result<String, PromptError> {
        if !self.interactive {
            return Err(PromptError::NotInteractive);
        }

        rpassword::prompt_password(message).map_err(|e| PromptError::IoError(e.to_string()))
    }
}

/// Write `message` to `writer`, then read one line from `reader`.
///
/// EOF before any input (Ctrl-D) is [`PromptError::Cancelled`].
fn read_line_with_prompt<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    message: &str,
) -> Result<String, PromptError> {
    write!(writer, "{}", message).map_err(|e| PromptError::IoError(e.to_string()))?;
    writer
        .flush()
        .map_err(|e| PromptError::IoError(e.to_string()))?;

    let mut line = String::new();
    let read = reader
        .read_line(&mut line)
        .map_err(|e| PromptError::IoError(e.to_string()))?;
    if read == 0 {
        return Err(PromptError::Cancelled);
    }

    Ok(trim_newline(&line).to_string())
}

fn trim_newline(line: &str) -> &str {
    line.strip_suffix("\r\n")
        .or_else(|| line.strip_suffix('\n'))
        .unwrap_or(line)
}
