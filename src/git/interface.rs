//! git::interface
//!
//! Git interface implementation.
//!
//! # Output Contract
//!
//! [`GitQuery::run`] returns whatever text the tool produced. When `git`
//! writes anything to its error stream, that error text is returned *in place
//! of* standard output, exactly as if it were a successful result. Callers
//! cannot tell the two apart by type; downstream parsers see the error text
//! as malformed input. Only a failure to start `git` at all is reported as a
//! [`GitError`].
//!
//! No timeout is applied to subprocess calls.

use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;
use tracing::{debug, warn};

/// Errors from Git operations.
#[derive(Debug, Error)]
pub enum GitError {
    /// Not inside a Git repository.
    #[error("not a git repository: {path}")]
    NotARepo {
        /// The path that was searched
        path: PathBuf,
    },

    /// Repository is bare (no working directory).
    #[error("bare repository not supported")]
    BareRepo,

    /// The git executable could not be started.
    #[error("failed to run git: {message}")]
    Spawn {
        /// Description of the failure
        message: String,
    },
}

/// Read-only text queries against a repository.
///
/// Arguments are passed to `git` verbatim (do not include `git` itself).
pub trait GitQuery {
    /// Run a query and return its raw text output.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::Spawn`] only when the process cannot be started.
    /// Error text written by `git` is returned as `Ok`.
    fn run(&self, args: &[&str]) -> Result<String, GitError>;
}

/// A discovered repository, queried through the `git` executable.
#[derive(Debug, Clone)]
pub struct Git {
    /// Working directory queries run in
    work_dir: PathBuf,
    /// Path to the git executable
    program: String,
}

impl Git {
    /// Open the repository containing `path`.
    ///
    /// Uses `git2::Repository::discover`, so `path` can be any directory
    /// inside the working tree.
    ///
    /// # Errors
    ///
    /// - [`GitError::NotARepo`] if no repository is found
    /// - [`GitError::BareRepo`] if the repository has no working directory
    pub fn open(path: &Path) -> Result<Self, GitError> {
        let repo = git2::Repository::discover(path).map_err(|_| GitError::NotARepo {
            path: path.to_path_buf(),
        })?;

        if repo.is_bare() {
            return Err(GitError::BareRepo);
        }

        let work_dir = repo.workdir().ok_or(GitError::BareRepo)?.to_path_buf();
        debug!(work_dir = %work_dir.display(), "opened repository");

        Ok(Self {
            work_dir,
            program: "git".to_string(),
        })
    }

    /// Use a different git executable (e.g. an absolute path).
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Root of the working tree.
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }
}

impl GitQuery for Git {
    fn run(&self, args: &[&str]) -> Result<String, GitError> {
        debug!(program = %self.program, ?args, "running git query");

        let output = Command::new(&self.program)
            .args(args)
            .current_dir(&self.work_dir)
            .output()
            .map_err(|e| GitError::Spawn {
                message: e.to_string(),
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.is_empty() {
            warn!(?args, stderr = %stderr.trim_end(), "git wrote to stderr; using it as output");
            return Ok(stderr.into_owned());
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
