//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Flags
//!
//! - `[TAGS_BACK]` / `--tags <N>` / `-t <N>`: How many tags back to start from
//! - `--output <STYLE>` / `-o <STYLE>`: `markdown` or `html`
//! - `--server`, `--prefix`, `--git-mode`: Override configured values
//! - `--user <NAME>`: Tracker username (also `RELEASENOTES_USER`)
//! - `--cwd <path>`: Run as if in that directory
//! - `--debug`: Enable debug logging
//! - `--no-interactive`: Never prompt
//! - `--quiet` / `-q`: Report only

use clap::Parser;
use std::io::IsTerminal;
use std::path::PathBuf;

use crate::core::config::Overrides;
use crate::core::tags::GitMode;

/// Environment variable holding the tracker password.
pub const PASSWORD_ENV: &str = "RELEASENOTES_PASSWORD";

/// Generate release notes from the issue keys referenced in commits since a tag
#[derive(Parser, Debug)]
#[command(name = "releasenotes")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "\
EXAMPLES:
    # Issues fixed since the latest tag, as markdown
    releasenotes

    # Issues since the tag two releases back, as html
    releasenotes -t 2 -o html

    # Without contacting the tracker
    releasenotes --no-interactive

The command must be run inside a git repository.")]
pub struct Cli {
    /// How many tags back to start from
    #[arg(value_name = "TAGS_BACK", conflicts_with = "tags", value_parser = clap::value_parser!(u32).range(1..))]
    pub tags_back: Option<u32>,

    /// How many tags back to start from [default: 1]
    #[arg(short = 't', long = "tags", value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pub tags: Option<u32>,

    /// Output style: markdown or html [default: markdown]
    #[arg(short, long, value_name = "STYLE")]
    pub output: Option<String>,

    /// Issue tracker base URL
    #[arg(long, value_name = "URL")]
    pub server: Option<String>,

    /// Issue key prefix pattern (followed by digits)
    #[arg(long, value_name = "REGEX")]
    pub prefix: Option<String>,

    /// How to list tags: ref or log
    #[arg(long, value_name = "MODE")]
    pub git_mode: Option<GitMode>,

    /// Tracker username; skips the username prompt
    #[arg(long = "user", value_name = "NAME", env = "RELEASENOTES_USER")]
    pub user: Option<String>,

    /// Run as if releasenotes was started in this directory
    #[arg(long)]
    pub cwd: Option<PathBuf>,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_interactive: bool,

    /// Print the report only
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }

    /// Determine if interactive mode is enabled.
    ///
    /// Returns true unless `--no-interactive` was given or stdin is not a TTY.
    pub fn interactive(&self) -> bool {
        !self.no_interactive && std::io::stdin().is_terminal()
    }

    /// Tags back from either the positional argument or `--tags`.
    pub fn tags_back(&self) -> Option<u32> {
        self.tags_back.or(self.tags)
    }

    /// Values that override configuration files.
    pub fn overrides(&self) -> Overrides {
        Overrides {
            server: self.server.clone(),
            issue_prefix: self.prefix.clone(),
            tags_back: self.tags_back(),
            output: self.output.clone(),
            git_mode: self.git_mode,
            username: self.user.clone(),
        }
    }
}
