//! Schema for the persisted project configuration.
//!
//! [`ProjectConfig`] mirrors the on-disk shape of `atelier.json`: styling
//! choices under a nested `tailwind` object, import aliases under `aliases`,
//! and a handful of top-level flags. Deserialization goes through
//! [`ProjectConfig::validate`], which coerces loosely-typed values from older
//! or hand-edited files before handing the structure to serde.
//!
//! Validation is deliberately forgiving about everything except the two
//! required styling paths: a file missing `tailwind.config` or `tailwind.css`
//! usually means an interrupted or legacy write, and callers are expected to
//! treat that the same as "no configuration found".
//!
//! [`ResolvedPaths`] is the derived, never-persisted companion: the alias
//! strings resolved to absolute filesystem locations for a concrete project
//! root.

use crate::constants::{DEFAULT_COMPONENTS_ALIAS, DEFAULT_UTILS_ALIAS};
use crate::core::AtelierError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Visual style variant of the installed components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Style {
    /// The default look
    #[default]
    Default,
    /// The denser "new-york" look
    NewYork,
}

/// Base color palette used by the styling toolchain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BaseColor {
    /// Slate palette (the default)
    #[default]
    Slate,
    /// Gray palette
    Gray,
    /// Zinc palette
    Zinc,
    /// Neutral palette
    Neutral,
    /// Stone palette
    Stone,
}

/// Styling toolchain settings, persisted under the `tailwind` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TailwindSettings {
    /// Project-relative path of the tailwind config file. Required.
    pub config: String,
    /// Project-relative path of the global stylesheet. Required.
    pub css: String,
    /// Base color palette
    #[serde(default)]
    pub base_color: BaseColor,
    /// Whether theming uses CSS variables
    #[serde(default = "default_true")]
    pub css_variables: bool,
}

/// Import-path aliases, persisted under the `aliases` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aliases {
    /// Alias for the components directory, e.g. `@/components`
    #[serde(default = "default_components_alias")]
    pub components: String,
    /// Alias for the shared utils file, e.g. `@/lib/utils`
    #[serde(default = "default_utils_alias")]
    pub utils: String,
    /// Optional dedicated alias for the `ui` subdirectory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ui: Option<String>,
}

impl Default for Aliases {
    fn default() -> Self {
        Self {
            components: default_components_alias(),
            utils: default_utils_alias(),
            ui: None,
        }
    }
}

/// Persisted or inferred project settings.
///
/// Built fresh at the start of each invocation, never mutated in place, and
/// never cached across runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    /// Optional `$schema` reference written for editor tooling
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    /// Component style variant
    #[serde(default)]
    pub style: Style,
    /// Styling toolchain settings
    pub tailwind: TailwindSettings,
    /// Whether the project uses React Server Components
    #[serde(default)]
    pub rsc: bool,
    /// Whether the project uses TypeScript
    #[serde(default = "default_true")]
    pub tsx: bool,
    /// Import-path aliases
    #[serde(default)]
    pub aliases: Aliases,
    /// Optional custom registry base URL (takes priority over everything else)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry_url: Option<String>,
}

/// Absolute filesystem locations derived from a [`ProjectConfig`].
///
/// Computed once per configuration by [`ProjectConfig::resolve_paths`];
/// never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    /// Location of the tailwind config file
    pub tailwind_config: PathBuf,
    /// Location of the global stylesheet
    pub tailwind_css: PathBuf,
    /// Location of the shared utils file
    pub utils: PathBuf,
    /// Location of the components directory
    pub components: PathBuf,
    /// Location of the dedicated ui directory, when an alias is configured
    pub ui: Option<PathBuf>,
}

impl ProjectConfig {
    /// Validate an untyped JSON value into a `ProjectConfig`.
    ///
    /// Boolean-shaped fields (`rsc`, `tsx`, `tailwind.cssVariables`) are
    /// coerced before deserialization: real booleans pass through, the strings
    /// `"true"`/`"false"` coerce to their boolean, and anything else resets to
    /// the field's default. The coercion is idempotent and never leaves a
    /// non-boolean behind.
    ///
    /// # Errors
    ///
    /// Returns [`AtelierError::ConfigInvalid`] when the value is not an
    /// object, when `tailwind.config` or `tailwind.css` is absent or empty,
    /// or when the remaining structure fails to deserialize. Callers treat
    /// this identically to "no configuration found".
    pub fn validate(raw: Value) -> Result<Self, AtelierError> {
        let mut raw = raw;
        let Some(root) = raw.as_object_mut() else {
            return Err(AtelierError::ConfigInvalid {
                reason: "configuration is not a JSON object".to_string(),
            });
        };

        coerce_bool_field(root, "rsc", false);
        coerce_bool_field(root, "tsx", true);

        let Some(tailwind) = root.get_mut("tailwind").and_then(Value::as_object_mut) else {
            return Err(AtelierError::ConfigInvalid {
                reason: "missing required section `tailwind`".to_string(),
            });
        };
        for key in ["config", "css"] {
            match tailwind.get(key).and_then(Value::as_str) {
                Some(value) if !value.is_empty() => {}
                _ => {
                    return Err(AtelierError::ConfigInvalid {
                        reason: format!("missing required field `tailwind.{key}`"),
                    });
                }
            }
        }
        coerce_bool_field(tailwind, "cssVariables", true);

        serde_json::from_value(raw).map_err(|err| AtelierError::ConfigInvalid {
            reason: err.to_string(),
        })
    }

    /// Resolve the alias strings to absolute paths under `project_root`.
    ///
    /// Pure string substitution, no filesystem access: the `@/` prefix maps
    /// to the project's `src/` directory and the tailwind paths join the
    /// project root directly.
    #[must_use]
    pub fn resolve_paths(&self, project_root: &Path) -> ResolvedPaths {
        ResolvedPaths {
            tailwind_config: project_root.join(&self.tailwind.config),
            tailwind_css: project_root.join(&self.tailwind.css),
            utils: resolve_alias(&self.aliases.utils, project_root),
            components: resolve_alias(&self.aliases.components, project_root),
            ui: self
                .aliases
                .ui
                .as_deref()
                .map(|alias| resolve_alias(alias, project_root)),
        }
    }
}

/// Map an import alias to a filesystem path under `project_root`.
fn resolve_alias(alias: &str, project_root: &Path) -> PathBuf {
    match alias.strip_prefix("@/") {
        Some(rest) => project_root.join("src").join(rest),
        None => project_root.join(alias),
    }
}

/// Coerce a boolean-shaped field in place.
fn coerce_bool_field(object: &mut Map<String, Value>, key: &str, default: bool) {
    let coerced = match object.get(key) {
        Some(Value::Bool(value)) => *value,
        Some(Value::String(value)) if value == "true" => true,
        Some(Value::String(value)) if value == "false" => false,
        _ => default,
    };
    object.insert(key.to_string(), Value::Bool(coerced));
}

fn default_true() -> bool {
    true
}

fn default_components_alias() -> String {
    DEFAULT_COMPONENTS_ALIAS.to_string()
}

fn default_utils_alias() -> String {
    DEFAULT_UTILS_ALIAS.to_string()
}
