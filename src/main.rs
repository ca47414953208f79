//! Atelier CLI entry point.
//!
//! Parses command-line arguments, executes the selected command, and converts
//! any unrecovered error into a user-friendly report with a non-zero exit.

use anyhow::Result;
use atelier_cli::cli::Cli;
use atelier_cli::core::user_friendly_error;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute().await {
        Ok(()) => Ok(()),
        Err(error) => {
            // Attach context and remediation suggestions before display
            let context = user_friendly_error(error);
            context.display();
            std::process::exit(1);
        }
    }
}
