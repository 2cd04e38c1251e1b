//! tracker
//!
//! Abstraction for issue-tracking services.
//!
//! # Architecture
//!
//! The `IssueTracker` trait defines the read-only lookup the pipeline needs:
//! an issue's type and summary. Tracker failures are not retried; the first
//! failure aborts the run before anything is rendered.
//!
//! # Modules
//!
//! - `traits`: Core `IssueTracker` trait and response types
//! - [`jira`]: Jira REST implementation with basic auth
//! - [`mock`]: Mock implementation for deterministic testing

pub mod jira;
pub mod mock;
mod traits;

pub use jira::JiraTracker;
pub use traits::*;
