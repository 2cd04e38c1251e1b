//! releasenotes - Release notes from the issue keys in your git history
//!
//! releasenotes finds the commits made since a release tag, collects the
//! issue keys mentioned in their subjects, optionally looks each issue up in
//! Jira, and prints the issues grouped by type as markdown or html.
//!
//! # Architecture
//!
//! The codebase follows a layered architecture:
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to engine)
//! - [`engine`] - Runs the pipeline: tags -> commits -> issues -> metadata -> report
//! - [`core`] - Domain types, configuration, tag and issue extraction
//! - [`git`] - Read-only queries through the `git` executable
//! - [`tracker`] - Abstraction for issue trackers (Jira)
//! - [`auth`] - Credential providers for the tracker
//! - [`ui`] - Console output, prompts and report rendering
//!
//! # Guarantees
//!
//! 1. The repository is never modified
//! 2. Credentials are never written to disk or logged
//! 3. A failed tracker lookup aborts the run before anything is printed

pub mod auth;
pub mod cli;
pub mod core;
pub mod engine;
pub mod git;
pub mod tracker;
pub mod ui;
