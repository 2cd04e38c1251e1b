//! core::types
//!
//! Strong types for the release notes data model.
//!
//! # Types
//!
//! - [`TagRef`] - A release tag and the commit timestamp it points at
//! - [`IssueKey`] - An issue reference exactly as it appeared in a commit
//! - [`IssueSet`] - Distinct issue keys in first-seen order
//! - [`Classification`] - Tracker-assigned issue type used for grouping
//! - [`IssueRecord`] - A resolved issue ready for rendering
//! - [`IssueGroups`] - Records grouped by classification, in insertion order
//!
//! # Examples
//!
//! ```
//! use releasenotes::core::types::{Classification, IssueGroups, IssueKey, IssueRecord, IssueTitle};
//!
//! let key = IssueKey::new("abc-42");
//! assert_eq!(key.display(), "ABC-42");
//!
//! let mut groups = IssueGroups::new();
//! groups.insert(IssueRecord {
//!     key,
//!     classification: Classification::unknown(),
//!     title: IssueTitle::BrowseUrl("https://jira.example.com/browse/abc-42".into()),
//! });
//! assert_eq!(groups.len(), 1);
//! assert_eq!(groups.iter().next().unwrap().classification.plural(), "Unknowns");
//! ```

use std::collections::HashSet;
use std::fmt;

/// A release tag resolved from the repository.
///
/// The timestamp is kept in the tool-native textual form (for example
/// `2015-11-05 13:14:46 +0100`) so it can be handed back to `git log --since`
/// without conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRef {
    /// Tag name with surrounding whitespace trimmed
    pub name: String,
    /// Commit timestamp of the tagged commit
    pub timestamp: String,
}

/// An issue reference such as `ABC-42`.
///
/// Keys keep the casing found in the commit text. Two keys that differ only
/// in case are distinct values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IssueKey(String);

impl IssueKey {
    /// Wrap a raw key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The key as found in the commit text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The key as shown in the report (uppercased).
    pub fn display(&self) -> String {
        self.0.to_uppercase()
    }

    /// Tracker page for this key, keeping its original casing.
    pub fn browse_url(&self, server_url: &str) -> String {
        format!("{}/browse/{}", server_url, self.0)
    }
}

impl fmt::Display for IssueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Distinct issue keys in the order they were first seen.
///
/// Deduplication is exact (case-sensitive) string equality.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueSet {
    keys: Vec<IssueKey>,
    seen: HashSet<String>,
}

impl IssueSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a key. Returns `false` if an identical key was already present.
    pub fn insert(&mut self, key: IssueKey) -> bool {
        if self.seen.insert(key.as_str().to_string()) {
            self.keys.push(key);
            true
        } else {
            false
        }
    }

    /// Check whether an exact key is present.
    pub fn contains(&self, key: &str) -> bool {
        self.seen.contains(key)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Check if no keys were found.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Iterate keys in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &IssueKey> {
        self.keys.iter()
    }
}

impl<'a> IntoIterator for &'a IssueSet {
    type Item = &'a IssueKey;
    type IntoIter = std::slice::Iter<'a, IssueKey>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys.iter()
    }
}

impl FromIterator<IssueKey> for IssueSet {
    fn from_iter<I: IntoIterator<Item = IssueKey>>(iter: I) -> Self {
        let mut set = IssueSet::new();
        for key in iter {
            set.insert(key);
        }
        set
    }
}

/// Classification name used when no tracker session is available.
pub const UNKNOWN_CLASSIFICATION: &str = "Unknown";

/// Issue type name as assigned by the tracker (e.g. "Bug", "User story").
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Classification(String);

impl Classification {
    /// Wrap a tracker type name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The fallback classification for unauthenticated runs.
    pub fn unknown() -> Self {
        Self(UNKNOWN_CLASSIFICATION.to_string())
    }

    /// The classification name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Pluralized name used as a group heading.
    ///
    /// "User story" becomes "User stories"; every other name gets an `s`.
    pub fn plural(&self) -> String {
        if self.0 == "User story" {
            "User stories".to_string()
        } else {
            format!("{}s", self.0)
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What an issue line shows after the key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueTitle {
    /// Summary text fetched from the tracker
    Summary(String),
    /// Browse URL used when the tracker was not consulted
    BrowseUrl(String),
}

impl IssueTitle {
    /// The text to display.
    pub fn text(&self) -> &str {
        match self {
            IssueTitle::Summary(s) | IssueTitle::BrowseUrl(s) => s,
        }
    }

    /// Whether the text came from the tracker.
    pub fn is_summary(&self) -> bool {
        matches!(self, IssueTitle::Summary(_))
    }
}

/// A resolved issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueRecord {
    pub key: IssueKey,
    pub classification: Classification,
    pub title: IssueTitle,
}

/// One classification and its records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueGroup {
    pub classification: Classification,
    pub records: Vec<IssueRecord>,
}

/// Records grouped by classification.
///
/// Groups appear in the order their classification was first inserted, and
/// records within a group keep insertion order. Nothing is sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueGroups {
    groups: Vec<IssueGroup>,
}

impl IssueGroups {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record to the group for its classification.
    pub fn insert(&mut self, record: IssueRecord) {
        match self
            .groups
            .iter_mut()
            .find(|g| g.classification == record.classification)
        {
            Some(group) => group.records.push(record),
            None => self.groups.push(IssueGroup {
                classification: record.classification.clone(),
                records: vec![record],
            }),
        }
    }

    /// Get the records for a classification.
    pub fn get(&self, classification: &str) -> Option<&[IssueRecord]> {
        self.groups
            .iter()
            .find(|g| g.classification.as_str() == classification)
            .map(|g| g.records.as_slice())
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Check if there are no groups.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of records across all groups.
    pub fn record_count(&self) -> usize {
        self.groups.iter().map(|g| g.records.len()).sum()
    }

    /// Iterate groups in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &IssueGroup> {
        self.groups.iter()
    }

    /// Iterate every record key across all groups.
    pub fn keys(&self) -> impl Iterator<Item = &IssueKey> {
        self.groups
            .iter()
            .flat_map(|g| g.records.iter().map(|r| &r.key))
    }
}
