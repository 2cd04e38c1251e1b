//! core::config
//!
//! Configuration loading and the resolved [`Settings`] passed to the pipeline.
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Global config file
//! 3. Repo config file
//! 4. CLI flags ([`Overrides`])
//!
//! # Global Config Locations
//!
//! Searched in order, first match wins:
//! 1. `$RELEASENOTES_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/releasenotes/config.toml`
//! 3. `~/.releasenotes/config.toml`
//!
//! # Repo Config Location
//!
//! `.releasenotes.toml` at the root of the working tree.
//!
//! # Example
//!
//! ```no_run
//! use releasenotes::core::config::{Config, Overrides, Settings};
//! use std::path::Path;
//!
//! let config = Config::load(Some(Path::new("/path/to/repo"))).unwrap();
//! let settings = Settings::resolve(&config, &Overrides::default()).unwrap();
//! println!("Tracker: {}", settings.server_url);
//! ```

pub mod schema;

pub use schema::FileConfig;

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::core::tags::GitMode;
use crate::ui::report::OutputStyle;

/// Default issue tracker base URL.
pub const DEFAULT_SERVER: &str = "https://jira.example.com";

/// Default issue key prefix: an uppercase Jira project key starting at a word
/// boundary, followed by a dash.
///
/// The key part opts out of case-insensitive matching so lowercase words such
/// as `utf-8` or `sha-256` are not taken for issues.
pub const DEFAULT_ISSUE_PREFIX: &str = r"\b(?-i:[A-Z][A-Z0-9]+)-";

/// Default number of tags back.
pub const DEFAULT_TAGS_BACK: u32 = 1;

/// Repository config file name.
pub const REPO_CONFIG_FILE: &str = ".releasenotes.toml";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Configuration as read from disk, before CLI overrides.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Global configuration
    pub global: FileConfig,
    /// Repository configuration (if present)
    pub repo: Option<FileConfig>,
    /// Path to the global config file (if loaded)
    global_path: Option<PathBuf>,
    /// Path to the repo config file (if loaded)
    repo_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// If `repo_root` is provided, also loads `<repo_root>/.releasenotes.toml`.
    ///
    /// # Errors
    ///
    /// Returns an error if config files exist but cannot be parsed or hold
    /// invalid values. Missing config files are not an error.
    pub fn load(repo_root: Option<&Path>) -> Result<Config, ConfigError> {
        Self::load_files(Self::find_global().as_deref(), repo_root)
    }

    /// Load configuration from an explicit global file and repository root.
    pub fn load_files(
        global_path: Option<&Path>,
        repo_root: Option<&Path>,
    ) -> Result<Config, ConfigError> {
        let (global, global_path) = match global_path {
            Some(path) if path.exists() => (Self::read_file(path)?, Some(path.to_path_buf())),
            _ => (FileConfig::default(), None),
        };

        let repo_file = repo_root.map(|root| root.join(REPO_CONFIG_FILE));
        let (repo, repo_path) = match repo_file {
            Some(path) if path.exists() => (Some(Self::read_file(&path)?), Some(path)),
            _ => (None, None),
        };

        global.validate()?;
        if let Some(ref r) = repo {
            r.validate()?;
        }

        debug!(?global_path, ?repo_path, "loaded configuration");

        Ok(Config {
            global,
            repo,
            global_path,
            repo_path,
        })
    }

    /// Find the global config file, if any.
    fn find_global() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("RELEASENOTES_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("releasenotes/config.toml");
            if path.exists() {
                return Some(path);
            }
        }

        dirs::home_dir()
            .map(|home| home.join(".releasenotes/config.toml"))
            .filter(|path| path.exists())
    }

    /// Read and parse a config file.
    fn read_file(path: &Path) -> Result<FileConfig, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Global and repo files merged; repo wins.
    pub fn effective(&self) -> FileConfig {
        match &self.repo {
            Some(repo) => self.global.merged_with(repo),
            None => self.global.clone(),
        }
    }

    /// Path of the global file that was loaded.
    pub fn global_path(&self) -> Option<&Path> {
        self.global_path.as_deref()
    }

    /// Path of the repository file that was loaded.
    pub fn repo_path(&self) -> Option<&Path> {
        self.repo_path.as_deref()
    }
}

/// Values given on the command line. `None` means "not given".
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub server: Option<String>,
    pub issue_prefix: Option<String>,
    pub tags_back: Option<u32>,
    pub output: Option<String>,
    pub git_mode: Option<GitMode>,
    pub username: Option<String>,
}

/// Immutable, fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Tracker base URL without a trailing slash
    pub server_url: String,
    /// Issue key prefix regex fragment
    pub issue_prefix: String,
    /// How many tags back (>= 1)
    pub tags_back: u32,
    /// Report layout
    pub output: OutputStyle,
    /// Tag listing strategy
    pub git_mode: GitMode,
    /// Preset tracker username
    pub username: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER.to_string(),
            issue_prefix: DEFAULT_ISSUE_PREFIX.to_string(),
            tags_back: DEFAULT_TAGS_BACK,
            output: OutputStyle::Markdown,
            git_mode: GitMode::Ref,
            username: None,
        }
    }
}

impl Settings {
    /// Apply defaults, config files and CLI overrides.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if an override is invalid.
    pub fn resolve(config: &Config, overrides: &Overrides) -> Result<Settings, ConfigError> {
        let cli = FileConfig {
            server: overrides.server.clone(),
            issue_prefix: overrides.issue_prefix.clone(),
            tags_back: overrides.tags_back,
            output: overrides.output.clone(),
            git_mode: overrides.git_mode,
            username: overrides.username.clone(),
        };
        cli.validate()?;

        let merged = config.effective().merged_with(&cli);
        let defaults = Settings::default();

        Ok(Settings {
            server_url: merged
                .server
                .map(|s| s.trim().trim_end_matches('/').to_string())
                .unwrap_or(defaults.server_url),
            issue_prefix: merged.issue_prefix.unwrap_or(defaults.issue_prefix),
            tags_back: merged.tags_back.unwrap_or(defaults.tags_back),
            output: merged
                .output
                .as_deref()
                .map(OutputStyle::parse)
                .unwrap_or(defaults.output),
            git_mode: merged.git_mode.unwrap_or(defaults.git_mode),
            username: merged.username.filter(|u| !u.is_empty()),
        })
    }
}
