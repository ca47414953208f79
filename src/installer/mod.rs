//! Component installation into the project tree.
//!
//! Two responsibilities: making sure the shared utils helper exists, and
//! materializing a component manifest's files at their resolved destination.
//!
//! Every file of a component lands flat inside the `ui` subdirectory of the
//! components directory; any directory portion of a manifest filename is
//! discarded. Conflicts with existing files go through the injected
//! [`Prompt`] collaborator unless overwriting was forced, and a declined
//! overwrite skips only that file, not the rest of the component. Writes are
//! atomic per file, so an aborted install never leaves a half-written
//! component file behind.

use crate::cli::prompt::Prompt;
use crate::config::ResolvedPaths;
use crate::core::AtelierError;
use crate::registry::ComponentManifest;
use crate::utils::fs::safe_write;
use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Bootstrap snippet for the shared utils file: the class-name merge helper
/// every component imports.
pub const UTILS_TEMPLATE: &str = "import { clsx, type ClassValue } from 'clsx'
import { twMerge } from 'tailwind-merge'

export function cn(...inputs: ClassValue[]) {
  return twMerge(clsx(inputs))
}
";

/// Outcome of installing one component.
#[derive(Debug, Default)]
pub struct InstallResult {
    /// Files written, in manifest order
    pub written: Vec<PathBuf>,
    /// Files left untouched after a declined overwrite
    pub skipped: Vec<PathBuf>,
}

/// Write the utils bootstrap file if it does not exist yet.
///
/// Idempotent: an existing file is never touched, whatever its content.
pub fn ensure_utils_file(paths: &ResolvedPaths) -> Result<()> {
    if paths.utils.exists() {
        return Ok(());
    }
    debug!("Writing class-merge helper to {}", paths.utils.display());
    safe_write(&paths.utils, UTILS_TEMPLATE)
}

/// Install one component's files into `{components}/ui/`.
///
/// # Errors
///
/// Returns [`AtelierError::InstallFailed`] naming the component when a file
/// cannot be written or the conflict prompt fails. Sibling components of a
/// multi-component request are unaffected; the caller's loop decides whether
/// to continue.
pub fn install_component(
    manifest: &ComponentManifest,
    paths: &ResolvedPaths,
    overwrite: bool,
    prompt: &dyn Prompt,
) -> Result<InstallResult> {
    let ui_dir = paths.components.join("ui");
    let mut result = InstallResult::default();

    for file in &manifest.files {
        // Flatten: only the basename decides the destination.
        let Some(basename) = Path::new(&file.name).file_name() else {
            return Err(install_failed(
                manifest,
                format!("manifest entry '{}' has no file name", file.name),
            ));
        };
        let destination = ui_dir.join(basename);

        if destination.exists() && !overwrite {
            let replace = prompt
                .confirm(
                    &format!("{} already exists. Overwrite?", basename.to_string_lossy()),
                    false,
                )
                .map_err(|err| install_failed(manifest, format!("{err:#}")))?;
            if !replace {
                debug!("Keeping existing file {}", destination.display());
                result.skipped.push(destination);
                continue;
            }
        }

        safe_write(&destination, &file.content)
            .map_err(|err| install_failed(manifest, format!("{err:#}")))?;
        result.written.push(destination);
    }

    Ok(result)
}

fn install_failed(manifest: &ComponentManifest, reason: String) -> anyhow::Error {
    AtelierError::InstallFailed {
        component: manifest.name.clone(),
        reason,
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::prompt::test_support::StaticPrompt;
    use crate::registry::ComponentFile;
    use std::fs;
    use tempfile::tempdir;

    fn paths_for(root: &Path) -> ResolvedPaths {
        ResolvedPaths {
            tailwind_config: root.join("tailwind.config.ts"),
            tailwind_css: root.join("app/globals.css"),
            utils: root.join("src/lib/utils"),
            components: root.join("src/components"),
            ui: None,
        }
    }

    fn manifest(files: Vec<(&str, &str)>) -> ComponentManifest {
        ComponentManifest {
            name: "alert".to_string(),
            description: String::new(),
            dependencies: Vec::new(),
            files: files
                .into_iter()
                .map(|(name, content)| ComponentFile {
                    name: name.to_string(),
                    content: content.to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_ensure_utils_file_writes_once() {
        let temp = tempdir().unwrap();
        let paths = paths_for(temp.path());

        ensure_utils_file(&paths).unwrap();
        assert_eq!(fs::read_to_string(&paths.utils).unwrap(), UTILS_TEMPLATE);

        // Second call must not clobber local edits.
        fs::write(&paths.utils, "customized").unwrap();
        ensure_utils_file(&paths).unwrap();
        assert_eq!(fs::read_to_string(&paths.utils).unwrap(), "customized");
    }

    #[test]
    fn test_install_writes_files_into_ui_dir() {
        let temp = tempdir().unwrap();
        let paths = paths_for(temp.path());
        let prompt = StaticPrompt::answering(true);

        let result =
            install_component(&manifest(vec![("alert.tsx", "X")]), &paths, false, &prompt)
                .unwrap();

        let destination = paths.components.join("ui").join("alert.tsx");
        assert_eq!(result.written, vec![destination.clone()]);
        assert_eq!(fs::read_to_string(destination).unwrap(), "X");
        assert!(prompt.asked.lock().unwrap().is_empty());
    }

    #[test]
    fn test_install_flattens_nested_manifest_names() {
        let temp = tempdir().unwrap();
        let paths = paths_for(temp.path());
        let prompt = StaticPrompt::answering(true);

        install_component(
            &manifest(vec![("nested/dir/button.tsx", "B")]),
            &paths,
            false,
            &prompt,
        )
        .unwrap();

        let flat = paths.components.join("ui").join("button.tsx");
        assert!(flat.exists());
        assert!(!paths.components.join("ui").join("nested").exists());
    }

    #[test]
    fn test_declined_overwrite_skips_only_that_file() {
        let temp = tempdir().unwrap();
        let paths = paths_for(temp.path());
        let ui_dir = paths.components.join("ui");
        fs::create_dir_all(&ui_dir).unwrap();
        fs::write(ui_dir.join("alert.tsx"), "original").unwrap();

        let prompt = StaticPrompt::answering(false);
        let result = install_component(
            &manifest(vec![("alert.tsx", "replacement"), ("alert-title.tsx", "T")]),
            &paths,
            false,
            &prompt,
        )
        .unwrap();

        // Existing bytes untouched, the other file still installed.
        assert_eq!(
            fs::read_to_string(ui_dir.join("alert.tsx")).unwrap(),
            "original"
        );
        assert_eq!(
            fs::read_to_string(ui_dir.join("alert-title.tsx")).unwrap(),
            "T"
        );
        assert_eq!(result.skipped.len(), 1);
        assert_eq!(result.written.len(), 1);
        assert_eq!(prompt.asked.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_forced_overwrite_never_prompts() {
        let temp = tempdir().unwrap();
        let paths = paths_for(temp.path());
        let ui_dir = paths.components.join("ui");
        fs::create_dir_all(&ui_dir).unwrap();
        fs::write(ui_dir.join("alert.tsx"), "original").unwrap();

        let prompt = StaticPrompt::answering(false);
        install_component(&manifest(vec![("alert.tsx", "forced")]), &paths, true, &prompt)
            .unwrap();

        assert_eq!(
            fs::read_to_string(ui_dir.join("alert.tsx")).unwrap(),
            "forced"
        );
        assert!(prompt.asked.lock().unwrap().is_empty());
    }

    #[test]
    fn test_nameless_manifest_entry_fails_with_component_name() {
        let temp = tempdir().unwrap();
        let paths = paths_for(temp.path());
        let prompt = StaticPrompt::answering(true);

        let err = install_component(&manifest(vec![("..", "X")]), &paths, false, &prompt)
            .unwrap_err();
        match err.downcast_ref::<AtelierError>() {
            Some(AtelierError::InstallFailed { component, .. }) => {
                assert_eq!(component, "alert");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
