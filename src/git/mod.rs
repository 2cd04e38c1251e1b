//! git
//!
//! Single interface for all Git operations.
//!
//! # Architecture
//!
//! This module is the **only doorway** to Git. Repository discovery uses the
//! `git2` crate; tag and log queries run the `git` executable as a read-only
//! subprocess and hand back its raw text output. No other module spawns
//! `git` or imports `git2`.
//!
//! # Responsibilities
//!
//! - Repository discovery (find the working directory to run queries in)
//! - Text queries against the repository via [`GitQuery`]
//!
//! # Example
//!
//! ```ignore
//! use releasenotes::git::{Git, GitQuery};
//! use std::path::Path;
//!
//! let git = Git::open(Path::new("."))?;
//! let tags = git.run(&["tag", "--list"])?;
//! println!("{}", tags);
//! ```

mod interface;

pub use interface::{Git, GitError, GitQuery};
