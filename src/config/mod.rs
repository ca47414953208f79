//! Project configuration: loading, auto-detection, and persistence.
//!
//! The configuration lives in an `atelier.json` file at the project root. At
//! the start of each invocation the resolver tries, in order:
//!
//! 1. [`load`] - read and validate the persisted file. Any failure (absent,
//!    unreadable, malformed, incomplete) yields `None`; an invalid file must
//!    behave exactly like no file.
//! 2. [`auto_detect`] - infer a configuration from project conventions: the
//!    package manifest decides server-component support and default styling
//!    paths, and the TypeScript/JavaScript compiler config contributes the
//!    `@/*` path alias.
//!
//! Auto-detection has one fatal case: no `package.json` means there is no
//! project to work with ([`AtelierError::ProjectNotRecognized`]).
//!
//! [`persist`] is the single place where persisted state is mutated; it
//! overwrites `atelier.json` atomically during `atelier init`.

pub mod schema;

pub use schema::{Aliases, BaseColor, ProjectConfig, ResolvedPaths, Style, TailwindSettings};

use crate::constants::{CONFIG_FILE_NAME, DEFAULT_COMPONENTS_ALIAS, DEFAULT_UTILS_ALIAS};
use crate::core::AtelierError;
use crate::utils::fs::safe_write;
use anyhow::Result;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Load the persisted configuration from `atelier.json`, if usable.
///
/// Returns `None` when the file is absent, unreadable, not JSON, or fails
/// validation. This is intentional: a broken configuration file triggers
/// auto-detection, never a fatal error.
pub fn load(project_root: &Path) -> Option<ProjectConfig> {
    let config_path = project_root.join(CONFIG_FILE_NAME);
    if !config_path.exists() {
        debug!("No {CONFIG_FILE_NAME} at {}", project_root.display());
        return None;
    }

    let raw = match fs::read_to_string(&config_path) {
        Ok(raw) => raw,
        Err(err) => {
            warn!("Could not read {}: {err}", config_path.display());
            return None;
        }
    };

    let value: Value = match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(err) => {
            warn!("Ignoring malformed {CONFIG_FILE_NAME}: {err}");
            return None;
        }
    };

    match ProjectConfig::validate(value) {
        Ok(config) => Some(config),
        Err(err) => {
            warn!("Ignoring invalid {CONFIG_FILE_NAME}: {err}");
            None
        }
    }
}

/// Infer a configuration from the project's conventions.
///
/// Reads `package.json` to decide framework defaults: a `next` dependency
/// implies React Server Components, a TypeScript tailwind config, and an
/// `app/globals.css` stylesheet. TypeScript support is assumed when a
/// `tsconfig.json` exists or `typescript` is a dependency. Import aliases are
/// derived from the `@/*` mapping in `tsconfig.json`/`jsconfig.json`.
///
/// # Errors
///
/// Returns [`AtelierError::ProjectNotRecognized`] when `package.json` is
/// absent or unreadable. Callers should treat this as fatal and point the
/// user at `atelier init`.
pub fn auto_detect(project_root: &Path) -> Result<ProjectConfig> {
    let package_json = project_root.join("package.json");
    if !package_json.exists() {
        return Err(AtelierError::ProjectNotRecognized.into());
    }

    let package: Value = fs::read_to_string(&package_json)
        .ok()
        .and_then(|raw| serde_json::from_str(&raw).ok())
        .ok_or(AtelierError::ProjectNotRecognized)?;

    let is_next = has_dependency(&package, "next");
    let tsx =
        project_root.join("tsconfig.json").exists() || has_dependency(&package, "typescript");
    let (components, utils) = detect_aliases(project_root);

    let (tailwind_config, tailwind_css) = if is_next {
        ("tailwind.config.ts", "app/globals.css")
    } else {
        ("tailwind.config.js", "src/index.css")
    };

    debug!(
        "Auto-detected project: next={is_next} tsx={tsx} components={components} utils={utils}"
    );

    Ok(ProjectConfig {
        schema: None,
        style: Style::default(),
        tailwind: TailwindSettings {
            config: tailwind_config.to_string(),
            css: tailwind_css.to_string(),
            base_color: BaseColor::default(),
            css_variables: true,
        },
        rsc: is_next,
        tsx,
        aliases: Aliases {
            components,
            utils,
            ui: None,
        },
        registry_url: None,
    })
}

/// Serialize the configuration to `atelier.json`, overwriting any existing
/// content. The only persisted-state mutation in the pipeline.
pub fn persist(project_root: &Path, config: &ProjectConfig) -> Result<()> {
    let config_path = project_root.join(CONFIG_FILE_NAME);
    let serialized = serde_json::to_string_pretty(config)?;
    safe_write(&config_path, &format!("{serialized}\n"))
}

fn has_dependency(package: &Value, name: &str) -> bool {
    ["dependencies", "devDependencies"]
        .iter()
        .any(|section| package.get(section).and_then(|deps| deps.get(name)).is_some())
}

/// Derive the components/utils aliases from the compiler config's `@/*` path
/// mapping. Falls back to the defaults when the mapping is absent, unreadable,
/// or points at the conventional `src` root.
fn detect_aliases(project_root: &Path) -> (String, String) {
    let defaults = (
        DEFAULT_COMPONENTS_ALIAS.to_string(),
        DEFAULT_UTILS_ALIAS.to_string(),
    );

    let Some(compiler_config) = ["tsconfig.json", "jsconfig.json"]
        .iter()
        .map(|name| project_root.join(name))
        .find(|path| path.exists())
    else {
        return defaults;
    };

    let Some(mapping) = fs::read_to_string(&compiler_config)
        .ok()
        .and_then(|raw| serde_json::from_str::<Value>(&raw).ok())
        .and_then(|config| {
            Some(
                config
                    .get("compilerOptions")?
                    .get("paths")?
                    .get("@/*")?
                    .get(0)?
                    .as_str()?
                    .to_string(),
            )
        })
    else {
        return defaults;
    };

    let base = mapping
        .trim_start_matches("./")
        .trim_end_matches("/*")
        .trim_matches('/');

    if base.is_empty() || base == "src" {
        defaults
    } else {
        (format!("@/{base}/components"), format!("@/{base}/lib/utils"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    fn write(root: &Path, name: &str, content: &str) {
        fs::write(root.join(name), content).unwrap();
    }

    #[test]
    fn test_load_missing_file_is_none() {
        let temp = tempdir().unwrap();
        assert!(load(temp.path()).is_none());
    }

    #[test]
    fn test_load_malformed_json_is_none() {
        let temp = tempdir().unwrap();
        write(temp.path(), CONFIG_FILE_NAME, "{ not json");
        assert!(load(temp.path()).is_none());
    }

    #[test]
    fn test_load_incomplete_config_is_none() {
        // A config missing the required tailwind paths behaves like no config.
        let temp = tempdir().unwrap();
        write(
            temp.path(),
            CONFIG_FILE_NAME,
            r#"{ "style": "default", "tailwind": { "baseColor": "slate" } }"#,
        );
        assert!(load(temp.path()).is_none());
    }

    #[test]
    fn test_load_valid_config() {
        let temp = tempdir().unwrap();
        write(
            temp.path(),
            CONFIG_FILE_NAME,
            r#"{
                "style": "new-york",
                "tailwind": { "config": "tailwind.config.ts", "css": "app/globals.css" },
                "rsc": "true",
                "aliases": { "components": "@/components", "utils": "@/lib/utils" }
            }"#,
        );

        let config = load(temp.path()).expect("config should load");
        assert_eq!(config.style, Style::NewYork);
        assert!(config.rsc);
    }

    #[test]
    fn test_auto_detect_without_package_json_fails() {
        let temp = tempdir().unwrap();
        let err = auto_detect(temp.path()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<AtelierError>(),
            Some(AtelierError::ProjectNotRecognized)
        ));
    }

    #[test]
    fn test_auto_detect_next_project() {
        let temp = tempdir().unwrap();
        write(
            temp.path(),
            "package.json",
            r#"{ "dependencies": { "next": "14.0.0" } }"#,
        );

        let config = auto_detect(temp.path()).unwrap();
        assert!(config.rsc);
        assert_eq!(config.tailwind.config, "tailwind.config.ts");
        assert_eq!(config.tailwind.css, "app/globals.css");
        assert!(!config.tsx); // no tsconfig, no typescript dependency
    }

    #[test]
    fn test_auto_detect_plain_project_defaults() {
        let temp = tempdir().unwrap();
        write(temp.path(), "package.json", r#"{ "dependencies": {} }"#);

        let config = auto_detect(temp.path()).unwrap();
        assert!(!config.rsc);
        assert_eq!(config.tailwind.config, "tailwind.config.js");
        assert_eq!(config.tailwind.css, "src/index.css");
        assert_eq!(config.aliases.components, "@/components");
        assert_eq!(config.aliases.utils, "@/lib/utils");
    }

    #[test]
    fn test_auto_detect_typescript_via_tsconfig() {
        let temp = tempdir().unwrap();
        write(temp.path(), "package.json", "{}");
        write(temp.path(), "tsconfig.json", "{}");

        let config = auto_detect(temp.path()).unwrap();
        assert!(config.tsx);
    }

    #[test]
    fn test_detect_aliases_src_mapping_keeps_defaults() {
        let temp = tempdir().unwrap();
        write(temp.path(), "package.json", "{}");
        write(
            temp.path(),
            "tsconfig.json",
            &json!({ "compilerOptions": { "paths": { "@/*": ["./src/*"] } } }).to_string(),
        );

        let config = auto_detect(temp.path()).unwrap();
        assert_eq!(config.aliases.components, "@/components");
        assert_eq!(config.aliases.utils, "@/lib/utils");
    }

    #[test]
    fn test_detect_aliases_custom_base() {
        let temp = tempdir().unwrap();
        write(temp.path(), "package.json", "{}");
        write(
            temp.path(),
            "jsconfig.json",
            &json!({ "compilerOptions": { "paths": { "@/*": ["./app/*"] } } }).to_string(),
        );

        let config = auto_detect(temp.path()).unwrap();
        assert_eq!(config.aliases.components, "@/app/components");
        assert_eq!(config.aliases.utils, "@/app/lib/utils");
    }

    #[test]
    fn test_detect_aliases_malformed_compiler_config_keeps_defaults() {
        let temp = tempdir().unwrap();
        write(temp.path(), "package.json", "{}");
        write(temp.path(), "tsconfig.json", "{ broken");

        let config = auto_detect(temp.path()).unwrap();
        assert_eq!(config.aliases.components, "@/components");
    }

    #[test]
    fn test_persist_round_trip() {
        let temp = tempdir().unwrap();
        write(temp.path(), "package.json", "{}");

        let mut config = auto_detect(temp.path()).unwrap();
        config.schema = Some(crate::constants::SCHEMA_URL.to_string());
        persist(temp.path(), &config).unwrap();

        let loaded = load(temp.path()).expect("persisted config should load");
        assert_eq!(loaded, config);

        let raw = fs::read_to_string(temp.path().join(CONFIG_FILE_NAME)).unwrap();
        assert!(raw.contains("\"$schema\""));
        assert!(raw.contains("\"tailwind\""));
    }

    #[test]
    fn test_persist_overwrites_existing() {
        let temp = tempdir().unwrap();
        write(temp.path(), "package.json", "{}");
        write(temp.path(), CONFIG_FILE_NAME, "stale");

        let config = auto_detect(temp.path()).unwrap();
        persist(temp.path(), &config).unwrap();

        let raw = fs::read_to_string(temp.path().join(CONFIG_FILE_NAME)).unwrap();
        assert!(!raw.contains("stale"));
    }
}
