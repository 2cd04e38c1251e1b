//! core
//!
//! Core domain types, configuration, and the text-processing steps of the
//! release notes pipeline.
//!
//! # Modules
//!
//! - [`types`] - Strong types: TagRef, IssueKey, IssueGroups, etc.
//! - [`tags`] - Tag window resolution (ref and log strategies)
//! - [`issues`] - Commit window query and issue reference extraction
//! - [`config`] - Configuration schema, loading, and resolved settings
//!
//! # Design Principles
//!
//! - Parsing is pure; git access goes through [`crate::git::GitQuery`]
//! - Settings are resolved once and passed in, never read from globals

pub mod config;
pub mod issues;
pub mod tags;
pub mod types;
