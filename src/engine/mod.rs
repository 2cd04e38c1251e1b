//! engine
//!
//! Orchestrates a release notes run.
//!
//! # Architecture
//!
//! The engine wires the core stages together:
//!
//! 1. **Tags**: resolve the tag window ([`crate::core::tags`])
//! 2. **Commits**: list commit subjects since the tag ([`crate::core::issues`])
//! 3. **Extract**: collect distinct issue keys
//! 4. **Resolve**: look up issue metadata ([`resolve`])
//! 5. **Render**: produce the report ([`crate::ui::report`])
//!
//! # Invariants
//!
//! - The repository is only read, never written
//! - Tracker lookups happen one at a time; the first failure aborts the run
//! - Nothing is rendered unless every stage succeeded

pub mod pipeline;
pub mod resolve;

pub use pipeline::{generate, generate_with, PipelineError};
pub use resolve::MetadataResolver;

use std::path::PathBuf;

use crate::ui::output::Verbosity;

/// Execution context for a run.
///
/// Contains global settings derived from CLI flags.
#[derive(Debug, Clone)]
pub struct Context {
    /// Working directory override.
    pub cwd: Option<PathBuf>,
    /// Debug diagnostics enabled (tracing filter only).
    pub debug: bool,
    /// Quiet mode (report only).
    pub quiet: bool,
    /// Interactive prompts enabled.
    pub interactive: bool,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            cwd: None,
            debug: false,
            quiet: false,
            interactive: true,
        }
    }
}

impl Context {
    /// Output verbosity for this run.
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet)
    }
}
