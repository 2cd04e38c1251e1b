//! cli
//!
//! Command-line interface layer for releasenotes.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments
//! - Set up diagnostic logging
//! - Assemble settings from config files and flags
//! - Delegate the run to [`crate::engine`] and print the report
//!
//! # Architecture
//!
//! The CLI layer is thin. Argument errors and `--help` are handled by clap
//! before any git or network call is made.

pub mod args;

pub use args::Cli;

use anyhow::{Context as _, Result};
use tracing_subscriber::EnvFilter;

use crate::auth::PromptCredentials;
use crate::core::config::{Config, Settings};
use crate::engine::{self, Context};
use crate::git::Git;
use crate::ui::output;
use crate::ui::report::REPORT_HEADER;

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();
    init_tracing(cli.debug);

    let ctx = Context {
        cwd: cli.cwd.clone(),
        debug: cli.debug,
        quiet: cli.quiet,
        interactive: cli.interactive(),
    };

    generate(&cli, &ctx)
}

/// Install the stderr diagnostics subscriber. `RUST_LOG` takes precedence.
fn init_tracing(debug: bool) {
    let default = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn generate(cli: &Cli, ctx: &Context) -> Result<()> {
    let cwd = match &ctx.cwd {
        Some(path) => path.clone(),
        None => std::env::current_dir().context("Failed to determine current directory")?,
    };

    let git = Git::open(&cwd)?;
    let config = Config::load(Some(git.work_dir())).context("Failed to load configuration")?;
    let settings = Settings::resolve(&config, &cli.overrides())?;
    tracing::debug!(?settings, "resolved settings");

    let credentials = PromptCredentials::terminal(ctx.interactive)
        .username(settings.username.clone())
        .password(std::env::var(args::PASSWORD_ENV).ok());

    let rt = tokio::runtime::Runtime::new()?;
    let report = rt.block_on(engine::generate(
        &settings,
        &git,
        &credentials,
        ctx.verbosity(),
    ))?;

    if !ctx.quiet {
        output::print(REPORT_HEADER);
    }
    print!("{}", report);

    Ok(())
}
