//! Add components from the registry to the project.
//!
//! ```bash
//! atelier add button card     # install named components
//! atelier add --all           # install everything in the index
//! atelier add                 # pick from an interactive selection
//! atelier add button -o       # overwrite existing files without asking
//! ```
//!
//! Components install strictly sequentially, in the order given. A failing
//! component is recorded and its siblings still proceed; the command exits
//! non-zero at the end if anything failed.

use crate::cli::prompt::Prompt;
use crate::config::{self, ResolvedPaths};
use crate::installer;
use crate::registry::{self, RegistryClient, RegistrySource};
use crate::utils::progress::Spinner;
use anyhow::{Result, bail};
use clap::Args;
use colored::Colorize;

/// Command to install components from the registry.
#[derive(Args)]
pub struct AddCommand {
    /// The components to add
    components: Vec<String>,

    /// Overwrite existing files without prompting
    #[arg(short, long)]
    overwrite: bool,

    /// Install all components available in the registry
    #[arg(short, long)]
    all: bool,
}

impl AddCommand {
    /// Execute the add command in the current directory.
    pub async fn execute(self, prompt: &dyn Prompt) -> Result<()> {
        let cwd = std::env::current_dir()?;

        let project_config = match config::load(&cwd) {
            Some(found) => found,
            None => {
                println!(
                    "{}",
                    "No configuration found. Auto-detecting project structure...".yellow()
                );
                let detected = config::auto_detect(&cwd)?;
                println!("  components: {}", detected.aliases.components);
                println!("  utils:      {}", detected.aliases.utils);
                println!(
                    "  typescript: {}",
                    if detected.tsx { "yes" } else { "no" }
                );
                println!(
                    "Tip: run {} to persist and customize these settings.",
                    "atelier init".cyan()
                );
                println!();
                detected
            }
        };

        let paths = project_config.resolve_paths(&cwd);
        let source = registry::source::resolve(&project_config);
        let client = RegistryClient::new();

        let requested = self
            .requested_components(&client, &source, prompt)
            .await?;
        let Some(requested) = requested else {
            println!("No components selected.");
            return Ok(());
        };

        let spinner = Spinner::new("Installing components...");
        let mut failures: Vec<(String, anyhow::Error)> = Vec::new();

        for name in &requested {
            spinner.set_message(format!("Installing {name}..."));
            if let Err(err) = self
                .install_one(&client, &source, &paths, name, prompt)
                .await
            {
                failures.push((name.clone(), err));
            }
        }

        if failures.is_empty() {
            spinner.finish_and_clear();
            println!("{} Added {} component(s).", "✓".green(), requested.len());
            println!();
            println!("Import them through your components alias:");
            println!(
                "  {}",
                format!(
                    "import {{ Button }} from '{}/ui/button'",
                    project_config.aliases.components
                )
                .cyan()
            );
            Ok(())
        } else {
            spinner.finish_and_clear();
            for (name, err) in &failures {
                eprintln!("{} {name}: {err:#}", "✗".red());
            }
            bail!(
                "Failed to install {} of {} component(s)",
                failures.len(),
                requested.len()
            );
        }
    }

    /// Figure out which components to install: the named ones, everything,
    /// or an interactive selection. `None` means the user selected nothing.
    async fn requested_components(
        &self,
        client: &RegistryClient,
        source: &RegistrySource,
        prompt: &dyn Prompt,
    ) -> Result<Option<Vec<String>>> {
        if self.all {
            let index = client.fetch_index(source).await?;
            return Ok(Some(index.into_iter().map(|entry| entry.name).collect()));
        }

        if !self.components.is_empty() {
            return Ok(Some(self.components.clone()));
        }

        let index = client.fetch_index(source).await?;
        if index.is_empty() {
            bail!("No components available in the registry");
        }

        let names: Vec<String> = index.into_iter().map(|entry| entry.name).collect();
        let selected = prompt.select_many("Which components would you like to add?", &names)?;
        Ok(if selected.is_empty() {
            None
        } else {
            Some(selected)
        })
    }

    async fn install_one(
        &self,
        client: &RegistryClient,
        source: &RegistrySource,
        paths: &ResolvedPaths,
        name: &str,
        prompt: &dyn Prompt,
    ) -> Result<installer::InstallResult> {
        // Components import the class-merge helper, so it must exist first.
        installer::ensure_utils_file(paths)?;
        let manifest = client.fetch_component(source, name).await?;
        installer::install_component(&manifest, paths, self.overwrite, prompt)
    }
}
