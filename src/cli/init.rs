//! Initialize a project for atelier.
//!
//! The `init` command auto-detects the project's conventions, optionally lets
//! the user adjust them, writes the persisted `atelier.json`, installs the
//! styling toolchain packages through the project's package manager, and
//! scaffolds the shared utils file plus the `ui/` directory.
//!
//! ```bash
//! atelier init        # interactive
//! atelier init --yes  # accept the detected defaults
//! ```
//!
//! Package installation honors the `ATELIER_SKIP_PACKAGE_INSTALL` environment
//! variable so CI runs and tests can initialize a project without a
//! JavaScript toolchain present.

use crate::cli::prompt::Prompt;
use crate::config::{self, BaseColor, ProjectConfig, Style};
use crate::constants::{
    CONFIG_FILE_NAME, SCHEMA_URL, SKIP_PACKAGE_INSTALL_ENV, STYLING_PACKAGES,
    TYPESCRIPT_DEV_PACKAGES,
};
use crate::core::AtelierError;
use crate::installer;
use crate::utils::fs::ensure_dir;
use crate::utils::progress::Spinner;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::Path;
use tracing::info;

const BASE_COLORS: &[(&str, BaseColor)] = &[
    ("slate", BaseColor::Slate),
    ("gray", BaseColor::Gray),
    ("zinc", BaseColor::Zinc),
    ("neutral", BaseColor::Neutral),
    ("stone", BaseColor::Stone),
];

/// Command to initialize a project with a persisted configuration.
#[derive(Args)]
pub struct InitCommand {
    /// Skip prompts and accept the detected defaults
    #[arg(short = 'y', long)]
    yes: bool,
}

impl InitCommand {
    /// Execute the init command in the current directory.
    ///
    /// # Errors
    ///
    /// Fails when the directory holds no `package.json`
    /// ([`AtelierError::ProjectNotRecognized`]), when the configuration
    /// cannot be written, or when package installation fails.
    pub async fn execute(self, prompt: &dyn Prompt) -> Result<()> {
        let cwd = std::env::current_dir()?;

        println!("{}", "Welcome to atelier!".bold());
        println!();

        if config::load(&cwd).is_some()
            && !self.yes
            && !prompt.confirm("Configuration already exists. Overwrite?", false)?
        {
            println!("Cancelled.");
            return Ok(());
        }

        let mut project_config = config::auto_detect(&cwd)?;
        project_config.schema = Some(SCHEMA_URL.to_string());
        if !self.yes {
            project_config = customize(project_config, prompt)?;
        }

        config::persist(&cwd, &project_config)?;
        println!("  {} {CONFIG_FILE_NAME}", "✓".green());

        // Scaffold the pieces components rely on.
        let paths = project_config.resolve_paths(&cwd);
        installer::ensure_utils_file(&paths)?;
        ensure_dir(&paths.components.join("ui"))?;

        install_styling_packages(&cwd, project_config.tsx).await?;

        println!();
        println!("{}", "Success! Your project has been configured.".green());
        println!();
        println!("Next steps:");
        println!("  1. Add components: {}", "atelier add button".cyan());
        println!("  2. Import them from your project and go build something.");
        println!();

        Ok(())
    }
}

/// Walk the detected configuration through the interactive questions,
/// mirroring the persisted fields one by one.
fn customize(detected: ProjectConfig, prompt: &dyn Prompt) -> Result<ProjectConfig> {
    let style = match prompt.select_one(
        "Which style would you like to use?",
        &["default", "new-york"],
        0,
    )? {
        1 => Style::NewYork,
        _ => Style::Default,
    };

    let color_names: Vec<&str> = BASE_COLORS.iter().map(|(name, _)| *name).collect();
    let color_choice = prompt.select_one("Which base color would you like to use?", &color_names, 0)?;
    let base_color = BASE_COLORS
        .get(color_choice)
        .map_or_else(BaseColor::default, |(_, color)| *color);

    let tailwind_config = prompt.input(
        "Where is your tailwind config file?",
        &detected.tailwind.config,
    )?;
    let tailwind_css = prompt.input("Where is your global CSS file?", &detected.tailwind.css)?;
    let css_variables = prompt.confirm("Use CSS variables for theming?", true)?;

    let components = prompt.input(
        "Configure the import alias for components:",
        &detected.aliases.components,
    )?;
    let utils = prompt.input(
        "Configure the import alias for utils:",
        &detected.aliases.utils,
    )?;

    let rsc = prompt.confirm("Are you using React Server Components?", detected.rsc)?;
    let tsx = prompt.confirm("Are you using TypeScript?", detected.tsx)?;

    let mut config = detected;
    config.style = style;
    config.tailwind.config = tailwind_config;
    config.tailwind.css = tailwind_css;
    config.tailwind.base_color = base_color;
    config.tailwind.css_variables = css_variables;
    config.aliases.components = components;
    config.aliases.utils = utils;
    config.rsc = rsc;
    config.tsx = tsx;
    Ok(config)
}

/// Install the styling toolchain with the project's package manager.
async fn install_styling_packages(project_root: &Path, tsx: bool) -> Result<()> {
    if std::env::var(SKIP_PACKAGE_INSTALL_ENV).is_ok() {
        info!("Skipping styling package installation ({SKIP_PACKAGE_INSTALL_ENV} is set)");
        return Ok(());
    }

    let manager = detect_package_manager(project_root);
    let spinner = Spinner::new(format!("Installing styling dependencies with {manager}..."));

    let outcome = async {
        run_package_manager(manager, project_root, STYLING_PACKAGES, false).await?;
        if tsx {
            run_package_manager(manager, project_root, TYPESCRIPT_DEV_PACKAGES, true).await?;
        }
        Ok::<(), anyhow::Error>(())
    }
    .await;

    match outcome {
        Ok(()) => {
            spinner.finish_with_message("Styling dependencies installed");
            Ok(())
        }
        Err(err) => {
            spinner.finish_and_clear();
            Err(err)
        }
    }
}

/// Pick the package manager by the lockfile present at the project root.
fn detect_package_manager(project_root: &Path) -> &'static str {
    if project_root.join("pnpm-lock.yaml").exists() {
        "pnpm"
    } else if project_root.join("yarn.lock").exists() {
        "yarn"
    } else if project_root.join("bun.lockb").exists() {
        "bun"
    } else {
        "npm"
    }
}

async fn run_package_manager(
    manager: &str,
    project_root: &Path,
    packages: &[&str],
    dev: bool,
) -> Result<()> {
    let program = which::which(manager).map_err(|_| AtelierError::PackageInstallFailed {
        reason: format!("package manager '{manager}' not found in PATH"),
    })?;

    let mut command = tokio::process::Command::new(program);
    command.current_dir(project_root).arg("add");
    if dev {
        command.arg("-D");
    }
    command.args(packages);

    let output = command.output().await?;
    if !output.status.success() {
        return Err(AtelierError::PackageInstallFailed {
            reason: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
        .into());
    }
    Ok(())
}
