//! ui::output
//!
//! Console output.
//!
//! # Design
//!
//! Progress lines and the final report share standard output. Progress
//! lines carry an `[INFO] ` prefix and are suppressed in quiet mode; the
//! report itself is always printed. Errors go to stderr.
//!
//! Diagnostic detail (`--debug`) is a `tracing` concern and never changes
//! what is printed here.

use std::fmt::Display;

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Quiet mode - report only
    Quiet,
    /// Normal mode - progress lines and report
    Normal,
}

impl Verbosity {
    /// Create verbosity from the quiet flag.
    pub fn from_flags(quiet: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else {
            Verbosity::Normal
        }
    }
}

/// Format a progress line.
pub fn format_info(message: impl Display) -> String {
    format!("[INFO] {}", message)
}

/// Print a progress line (respects quiet mode).
pub fn info(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", format_info(message));
    }
}

/// Print a message (always shown).
pub fn print(message: impl Display) {
    println!("{}", message);
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_from_flags() {
        assert_eq!(Verbosity::from_flags(false), Verbosity::Normal);
        assert_eq!(Verbosity::from_flags(true), Verbosity::Quiet);
    }

    #[test]
    fn info_prefix() {
        assert_eq!(
            format_info("Looking for commits since 1 last tags"),
            "[INFO] Looking for commits since 1 last tags"
        );
    }
}
