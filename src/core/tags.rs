//! core::tags
//!
//! Tag window resolution: find the release tag `N` tags back and the commit
//! timestamp that bounds the commit range.
//!
//! # Strategies
//!
//! Two interchangeable [`TagWindowResolver`] implementations exist, selected
//! by [`GitMode`]:
//!
//! - [`RefTagResolver`] (`ref`) lists tag refs via `git for-each-ref` and
//!   orders them by the date of the tagged commit, newest first.
//! - [`LogTagResolver`] (`log`) walks tag-decorated commits via `git log
//!   --simplify-by-decoration`. Use it when tag ordering from refs is off.
//!
//! Both parse the limited output the same way: the *last* `tag: <name>`
//! annotation and the *last* `YYYY-MM-DD HH:MM:SS +ZZZZ` timestamp found are
//! the oldest tag of the requested window.
//!
//! # Example
//!
//! ```
//! use releasenotes::core::tags::parse_tag_window;
//!
//! let out = "2024-03-01 10:00:00 +0000 (tag: v1.1)\n\
//!            2024-02-01 09:00:00 +0000 (tag: v1.0)\n";
//! let tag = parse_tag_window(out).unwrap();
//! assert_eq!(tag.name, "v1.0");
//! assert_eq!(tag.timestamp, "2024-02-01 09:00:00 +0000");
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::core::types::TagRef;
use crate::git::{GitError, GitQuery};

/// Errors from tag window resolution.
#[derive(Debug, Error)]
pub enum TagError {
    /// The repository has no tags (or the query produced no timestamps).
    #[error("No tags found in the current project.")]
    NoTags,

    /// A timestamp was found but no tag annotation to go with it.
    #[error("could not find a tag name in git output: {output}")]
    Malformed {
        /// The text that failed to parse
        output: String,
    },

    /// The git query could not be run.
    #[error(transparent)]
    Git(#[from] GitError),
}

/// How tags are listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GitMode {
    /// `git for-each-ref` over `refs/tags`
    #[default]
    Ref,
    /// `git log --tags --simplify-by-decoration`
    Log,
}

impl GitMode {
    /// Mode name as used in configuration.
    pub fn name(&self) -> &'static str {
        match self {
            GitMode::Ref => "ref",
            GitMode::Log => "log",
        }
    }
}

impl fmt::Display for GitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for GitMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ref" => Ok(GitMode::Ref),
            "log" => Ok(GitMode::Log),
            other => Err(format!("invalid git mode '{}', must be one of: ref, log", other)),
        }
    }
}

/// Capability: resolve the tag `tags_back` releases back.
pub trait TagWindowResolver {
    /// Which listing strategy this is.
    fn mode(&self) -> GitMode;

    /// Resolve the `tags_back`-th most recent tag (1 = latest).
    ///
    /// If the repository has fewer than `tags_back` tags, the oldest tag is
    /// returned.
    ///
    /// # Errors
    ///
    /// - [`TagError::NoTags`] if no tag could be found
    /// - [`TagError::Malformed`] if the output has a timestamp but no tag name
    fn resolve(&self, git: &dyn GitQuery, tags_back: u32) -> Result<TagRef, TagError>;
}

/// Resolve tags from sorted tag refs.
#[derive(Debug, Clone, Copy, Default)]
pub struct RefTagResolver;

impl TagWindowResolver for RefTagResolver {
    fn mode(&self) -> GitMode {
        GitMode::Ref
    }

    fn resolve(&self, git: &dyn GitQuery, tags_back: u32) -> Result<TagRef, TagError> {
        // Annotated tags carry the commit date on the peeled object, lightweight
        // tags on the ref itself; exactly one of each pair of fields is non-empty.
        let output = git.run(&[
            "for-each-ref",
            "--format=%(*committerdate:unix)%(committerdate:unix) %(*committerdate:iso)%(committerdate:iso) (tag: %(refname:short))",
            "refs/tags",
        ])?;
        debug!(mode = "ref", tags_back, "tag listing:\n{}", output);

        let window = newest_by_commit_date(&output, tags_back as usize);
        if window.is_empty() {
            return parse_tag_window(&output);
        }
        parse_tag_window(&window.join("\n"))
    }
}

/// Order `<unix seconds> <listing line>` entries newest commit first and keep
/// the first `limit` listing lines. Lines without a leading number are dropped.
fn newest_by_commit_date(output: &str, limit: usize) -> Vec<&str> {
    let mut entries: Vec<(i64, &str)> = output
        .lines()
        .filter_map(|line| {
            let (seconds, rest) = line.split_once(' ')?;
            Some((seconds.parse().ok()?, rest))
        })
        .collect();

    entries.sort_by_key(|(seconds, _)| std::cmp::Reverse(*seconds));
    entries.into_iter().take(limit).map(|(_, rest)| rest).collect()
}

/// Resolve tags from the decorated commit log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogTagResolver;

impl TagWindowResolver for LogTagResolver {
    fn mode(&self) -> GitMode {
        GitMode::Log
    }

    fn resolve(&self, git: &dyn GitQuery, tags_back: u32) -> Result<TagRef, TagError> {
        let output = git.run(&[
            "log",
            "--tags",
            "--simplify-by-decoration",
            "--decorate=short",
            "--pretty=format:%ai %d",
        ])?;
        debug!(mode = "log", tags_back, "decorated log:\n{}", output);

        // Branch-only decorations also survive simplification; count only
        // commits that carry a tag.
        let window: Vec<&str> = output
            .lines()
            .filter(|line| tag_name_regex().is_match(line))
            .take(tags_back as usize)
            .collect();

        if window.is_empty() {
            // Fall through to the parser so error text from git is reported
            // the same way in both modes.
            return parse_tag_window(&output);
        }
        parse_tag_window(&window.join("\n"))
    }
}

/// Get the resolver for a mode.
pub fn resolver_for(mode: GitMode) -> Box<dyn TagWindowResolver> {
    match mode {
        GitMode::Ref => Box::new(RefTagResolver),
        GitMode::Log => Box::new(LogTagResolver),
    }
}

fn timestamp_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[0-9-:]+ [0-9-:]+ [0-9-:+]+").expect("static regex"))
}

fn tag_name_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"tag:\s*([^,)]+)").expect("static regex"))
}

/// Parse a limited tag listing into the oldest tag of the window.
///
/// # Errors
///
/// - [`TagError::NoTags`] if no timestamp appears in `output`
/// - [`TagError::Malformed`] if a timestamp appears but no `tag:` annotation
pub fn parse_tag_window(output: &str) -> Result<TagRef, TagError> {
    let timestamp = timestamp_regex()
        .find_iter(output)
        .last()
        .map(|m| m.as_str().to_string())
        .ok_or(TagError::NoTags)?;

    let name = tag_name_regex()
        .captures_iter(output)
        .last()
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|name| !name.is_empty())
        .ok_or_else(|| TagError::Malformed {
            output: output.trim().to_string(),
        })?;

    Ok(TagRef { name, timestamp })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Returns canned output and records the arguments it was called with.
    struct CannedGit {
        output: String,
        calls: RefCell<Vec<Vec<String>>>,
    }

    impl CannedGit {
        fn new(output: &str) -> Self {
            Self {
                output: output.to_string(),
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl GitQuery for CannedGit {
        fn run(&self, args: &[&str]) -> Result<String, GitError> {
            self.calls
                .borrow_mut()
                .push(args.iter().map(|s| s.to_string()).collect());
            Ok(self.output.clone())
        }
    }

    mod parse {
        use super::*;

        #[test]
        fn single_ref_line() {
            let tag = parse_tag_window("2015-11-05 13:14:46 +0100 (tag: 4.5.0)\n").unwrap();
            assert_eq!(tag.name, "4.5.0");
            assert_eq!(tag.timestamp, "2015-11-05 13:14:46 +0100");
        }

        #[test]
        fn last_entry_wins() {
            let out = "2024-03-01 10:00:00 +0000 (tag: v1.2)\n\
                       2024-02-01 10:00:00 +0000 (tag: v1.1)\n\
                       2024-01-01 10:00:00 -0500 (tag: v1.0)\n";
            let tag = parse_tag_window(out).unwrap();
            assert_eq!(tag.name, "v1.0");
            assert_eq!(tag.timestamp, "2024-01-01 10:00:00 -0500");
        }

        #[test]
        fn log_decoration_with_branches() {
            let out = "2024-03-01 10:00:00 +0000  (HEAD -> main, tag: v2.0, origin/main)";
            let tag = parse_tag_window(out).unwrap();
            assert_eq!(tag.name, "v2.0");
        }

        #[test]
        fn name_is_trimmed() {
            let tag = parse_tag_window("2024-01-01 10:00:00 +0000 (tag:   v1.0  )").unwrap();
            assert_eq!(tag.name, "v1.0");
        }

        #[test]
        fn empty_output_is_no_tags() {
            assert!(matches!(parse_tag_window(""), Err(TagError::NoTags)));
        }

        #[test]
        fn git_error_text_is_no_tags() {
            let out = "fatal: not a git repository (or any of the parent directories): .git\n";
            assert!(matches!(parse_tag_window(out), Err(TagError::NoTags)));
        }

        #[test]
        fn timestamp_without_tag_is_malformed() {
            let out = "2024-01-01 10:00:00 +0000  (HEAD -> main)";
            assert!(matches!(
                parse_tag_window(out),
                Err(TagError::Malformed { .. })
            ));
        }

        #[test]
        fn no_tags_message() {
            assert_eq!(
                TagError::NoTags.to_string(),
                "No tags found in the current project."
            );
        }
    }

    mod git_mode {
        use super::*;

        #[test]
        fn parse() {
            assert_eq!("ref".parse::<GitMode>().unwrap(), GitMode::Ref);
            assert_eq!("LOG".parse::<GitMode>().unwrap(), GitMode::Log);
            assert!("svn".parse::<GitMode>().is_err());
        }

        #[test]
        fn default_is_ref() {
            assert_eq!(GitMode::default(), GitMode::Ref);
        }

        #[test]
        fn resolver_for_matches_mode() {
            assert_eq!(resolver_for(GitMode::Ref).mode(), GitMode::Ref);
            assert_eq!(resolver_for(GitMode::Log).mode(), GitMode::Log);
        }
    }

    mod ref_resolver {
        use super::*;

        #[test]
        fn lists_all_tag_refs() {
            let git = CannedGit::new("1704103200 2024-01-01 10:00:00 +0000 (tag: v1.0)\n");
            let tag = RefTagResolver.resolve(&git, 3).unwrap();
            assert_eq!(tag.name, "v1.0");
            assert_eq!(tag.timestamp, "2024-01-01 10:00:00 +0000");

            let calls = git.calls.borrow();
            assert_eq!(calls.len(), 1);
            assert_eq!(calls[0][0], "for-each-ref");
            assert!(calls[0].contains(&"refs/tags".to_string()));
            assert!(!calls[0].iter().any(|arg| arg.starts_with("--count")));
        }

        #[test]
        fn orders_by_commit_date_not_listing_order() {
            // v0.9 sorts first by name but points at the oldest commit.
            let git = CannedGit::new(
                "1701424800 2023-12-01 10:00:00 +0000 (tag: v0.9)\n\
                 1704103200 2024-01-01 10:00:00 +0000 (tag: v1.0)\n\
                 1706781600 2024-02-01 10:00:00 +0000 (tag: v1.1)\n",
            );
            let latest = RefTagResolver.resolve(&git, 1).unwrap();
            assert_eq!(latest.name, "v1.1");
            assert_eq!(latest.timestamp, "2024-02-01 10:00:00 +0000");

            let second = RefTagResolver.resolve(&git, 2).unwrap();
            assert_eq!(second.name, "v1.0");

            let oldest = RefTagResolver.resolve(&git, 10).unwrap();
            assert_eq!(oldest.name, "v0.9");
        }

        #[test]
        fn newest_by_commit_date_skips_unparseable_lines() {
            let out = "warning: something\n1704103200 2024-01-01 10:00:00 +0000 (tag: v1.0)";
            assert_eq!(
                newest_by_commit_date(out, 5),
                vec!["2024-01-01 10:00:00 +0000 (tag: v1.0)"]
            );
        }

        #[test]
        fn no_tags() {
            let git = CannedGit::new("");
            assert!(matches!(
                RefTagResolver.resolve(&git, 1),
                Err(TagError::NoTags)
            ));
        }
    }

    mod log_resolver {
        use super::*;

        #[test]
        fn skips_branch_only_decorations() {
            let git = CannedGit::new(
                "2024-04-01 10:00:00 +0000  (origin/feature)\n\
                 2024-03-01 10:00:00 +0000  (tag: v1.1)\n\
                 2024-02-01 10:00:00 +0000  (HEAD -> main)\n\
                 2024-01-01 10:00:00 +0000  (tag: v1.0)",
            );
            let tag = LogTagResolver.resolve(&git, 2).unwrap();
            assert_eq!(tag.name, "v1.0");
            assert_eq!(tag.timestamp, "2024-01-01 10:00:00 +0000");
        }

        #[test]
        fn limits_to_window() {
            let git = CannedGit::new(
                "2024-03-01 10:00:00 +0000  (tag: v1.2)\n\
                 2024-02-01 10:00:00 +0000  (tag: v1.1)\n\
                 2024-01-01 10:00:00 +0000  (tag: v1.0)",
            );
            let tag = LogTagResolver.resolve(&git, 1).unwrap();
            assert_eq!(tag.name, "v1.2");
        }

        #[test]
        fn no_tags() {
            let git = CannedGit::new("");
            assert!(matches!(
                LogTagResolver.resolve(&git, 1),
                Err(TagError::NoTags)
            ));
        }
    }
}
