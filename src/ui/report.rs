//! ui::report
//!
//! Pure functions for rendering the grouped release notes.
//!
//! # Design
//!
//! The renderer takes immutable inputs (grouped records, layout, tracker URL)
//! and returns the report as a string. Groups are emitted in map order; each
//! group starts with a blank line and a pluralized heading.
//!
//! # Example Output
//!
//! ```markdown
//!
//! ### Bugs
//!  - [ABC-42](https://jira.example.com/browse/ABC-42) - Login fails on Safari
//!
//! ### User stories
//!  - [ABC-7](https://jira.example.com/browse/ABC-7) - Export to CSV
//! ```

use std::fmt;

use crate::core::types::{IssueGroups, IssueRecord, IssueTitle};

/// Line printed before the report.
pub const REPORT_HEADER: &str = "Printing release notes:";

/// Report layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputStyle {
    /// `### Heading` and ` - [KEY](url) - title` list items
    #[default]
    Markdown,
    /// `<h2>` headings and `<ul>` lists
    Html,
}

impl OutputStyle {
    /// Select a layout by name.
    ///
    /// Exactly `"markdown"` selects Markdown; any other value selects Html.
    pub fn parse(name: &str) -> Self {
        if name == "markdown" {
            OutputStyle::Markdown
        } else {
            OutputStyle::Html
        }
    }

    /// Layout name.
    pub fn name(&self) -> &'static str {
        match self {
            OutputStyle::Markdown => "markdown",
            OutputStyle::Html => "html",
        }
    }
}

impl fmt::Display for OutputStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Render grouped records.
///
/// Returns an empty string when there are no groups. Otherwise every line,
/// including the last, ends with `\n`.
///
/// # Example
///
/// ```
/// use releasenotes::core::types::{Classification, IssueGroups, IssueKey, IssueRecord, IssueTitle};
/// use releasenotes::ui::report::{render, OutputStyle};
///
/// let mut groups = IssueGroups::new();
/// groups.insert(IssueRecord {
///     key: IssueKey::new("ABC-42"),
///     classification: Classification::new("Bug"),
///     title: IssueTitle::Summary("Login fails".into()),
/// });
///
/// let out = render(&groups, OutputStyle::Markdown, "https://jira.example.com");
/// assert_eq!(
///     out,
///     "\n### Bugs\n - [ABC-42](https://jira.example.com/browse/ABC-42) - Login fails\n"
/// );
/// ```
pub fn render(groups: &IssueGroups, style: OutputStyle, server_url: &str) -> String {
    let mut lines = Vec::new();

    for group in groups.iter() {
        lines.push(String::new());
        let heading = group.classification.plural();

        match style {
            OutputStyle::Markdown => {
                lines.push(format!("### {}", heading));
                for record in &group.records {
                    lines.push(markdown_item(record, server_url));
                }
            }
            OutputStyle::Html => {
                lines.push(format!("<h2>{}</h2>", escape_html(&heading)));
                lines.push("<ul>".to_string());
                for record in &group.records {
                    lines.push(html_item(record, server_url));
                }
                lines.push("</ul>".to_string());
            }
        }
    }

    if lines.is_empty() {
        return String::new();
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn markdown_item(record: &IssueRecord, server_url: &str) -> String {
    format!(
        " - [{}]({}) - {}",
        record.key.display(),
        record.key.browse_url(server_url),
        record.title.text()
    )
}

fn html_item(record: &IssueRecord, server_url: &str) -> String {
    let link = format!(
        "<a href='{}'>{}</a>",
        escape_html(&record.key.browse_url(server_url)),
        record.key.display()
    );

    match &record.title {
        IssueTitle::Summary(summary) => {
            format!("    <li>[{}] - {}</li>", link, escape_html(summary))
        }
        IssueTitle::BrowseUrl(_) => format!("    <li>[{}]</li>", link),
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
