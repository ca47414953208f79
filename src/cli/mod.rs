//! Command-line interface for atelier.
//!
//! Each command lives in its own module with its own argument struct and
//! execution logic:
//!
//! - `init` - detect and persist the project configuration
//! - `add` - install components from the registry
//!
//! # Global Options
//!
//! All commands support:
//! - `--verbose` - enable debug output
//! - `--quiet` - suppress everything except errors
//! - `--no-progress` - disable spinners for automation
//!
//! ```bash
//! atelier init -y
//! atelier add button card
//! atelier --verbose add --all
//! ```
//!
//! Interactive questions go through the [`prompt::Prompt`] collaborator; the
//! commands never talk to the terminal for input directly, which keeps them
//! testable and makes non-TTY behavior (CI, pipes) uniform.

mod add;
mod init;
pub mod prompt;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Top-level CLI structure.
///
/// Uses the `clap` derive API for parsing, help text, and validation. The
/// global flags configure logging and progress output before any command
/// runs.
#[derive(Parser)]
#[command(
    name = "atelier",
    about = "Pull UI components from a shared registry into your project",
    version,
    author,
    long_about = "Atelier installs UI component source files from a shared registry into \
                  your project, using a persisted or auto-detected project configuration \
                  to put every file in the right place."
)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Disable spinners and progress output
    #[arg(long, global = true)]
    no_progress: bool,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Initialize the project with a persisted atelier configuration
    Init(init::InitCommand),

    /// Add components from the registry to the project
    Add(add::AddCommand),
}

impl Cli {
    /// Execute the parsed command.
    ///
    /// Sets up logging and progress behavior from the global flags, then
    /// dispatches to the selected subcommand with a terminal prompt.
    pub async fn execute(self) -> Result<()> {
        self.init_logging();
        if self.no_progress {
            crate::utils::progress::disable();
        }

        let terminal = prompt::TerminalPrompt;
        match self.command {
            Commands::Init(command) => command.execute(&terminal).await,
            Commands::Add(command) => command.execute(&terminal).await,
        }
    }

    /// Initialize the tracing subscriber according to the verbosity flags.
    ///
    /// `--verbose` forces debug level, `--quiet` drops everything below
    /// error, and the default honors `RUST_LOG` with an `info` fallback.
    fn init_logging(&self) {
        let filter = if self.verbose {
            EnvFilter::new("debug")
        } else if self.quiet {
            EnvFilter::new("error")
        } else {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .without_time()
            .with_writer(std::io::stderr)
            .try_init();
    }
}
