//! ui
//!
//! User interaction utilities.
//!
//! # Modules
//!
//! - [`output`] - Progress lines, warnings, and errors
//! - [`prompts`] - Interactive prompts (username, masked password)
//! - [`report`] - Release notes rendering (markdown and html)
//!
//! # Design
//!
//! All console output and prompts go through this module so quiet and
//! non-interactive modes are handled in one place.

pub mod output;
pub mod prompts;
pub mod report;
