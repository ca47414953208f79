//! Registry source resolution.
//!
//! Decides, once per run, where the registry lives. The candidates form an
//! explicit ordered list evaluated short-circuit, highest priority first:
//!
//! 1. `registryUrl` from the project configuration
//! 2. the `ATELIER_REGISTRY_URL` environment override
//! 3. the development registry directory next to the built binary, but only
//!    if it exists and contains a readable `index.json`
//! 4. the built-in default remote base URL
//!
//! A candidate is a local directory iff its string does not begin with an
//! HTTP scheme; no other heuristic is applied.

use crate::config::ProjectConfig;
use crate::constants::{DEFAULT_REGISTRY_URL, REGISTRY_TOKEN_ENV, REGISTRY_URL_ENV};
use std::path::PathBuf;
use tracing::debug;

/// Where a resolved source points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation {
    /// A directory on the local filesystem
    Local(PathBuf),
    /// A remote HTTP(S) base URL, without trailing slash
    Remote(String),
}

/// A resolved registry location, optionally paired with a private-access
/// credential. Recomputed each run from configuration, environment, and
/// filesystem probing; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrySource {
    /// The location the client will query
    pub location: SourceLocation,
    /// Credential for the authenticated fallback, from `ATELIER_REGISTRY_TOKEN`
    pub token: Option<String>,
}

/// Resolve the registry source for this invocation.
#[must_use]
pub fn resolve(config: &ProjectConfig) -> RegistrySource {
    let candidates = [
        config.registry_url.clone(),
        env_override(),
        development_registry_dir().map(|dir| dir.to_string_lossy().into_owned()),
    ];

    let raw = candidates
        .into_iter()
        .flatten()
        .next()
        .unwrap_or_else(|| DEFAULT_REGISTRY_URL.to_string());

    let location = classify(&raw);
    debug!("Resolved registry source: {location:?}");

    RegistrySource {
        location,
        token: registry_token(),
    }
}

/// Read the private-access credential from the environment, if set.
#[must_use]
pub fn registry_token() -> Option<String> {
    std::env::var(REGISTRY_TOKEN_ENV)
        .ok()
        .filter(|token| !token.is_empty())
}

fn env_override() -> Option<String> {
    std::env::var(REGISTRY_URL_ENV)
        .ok()
        .filter(|value| !value.is_empty())
}

/// Tag a raw candidate as local or remote. Anything not starting with an
/// HTTP scheme is a local path, so local paths must never look like URLs.
fn classify(raw: &str) -> SourceLocation {
    if raw.starts_with("http://") || raw.starts_with("https://") {
        SourceLocation::Remote(raw.trim_end_matches('/').to_string())
    } else {
        SourceLocation::Local(PathBuf::from(raw))
    }
}

/// Locate the in-repository registry used during development.
///
/// A debug build runs from `target/{profile}/atelier`, so the repository root
/// is two levels above the executable's directory. The directory only
/// qualifies when its `index.json` is actually present; probing must not
/// assume it exists.
fn development_registry_dir() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    let repo_root = exe.parent()?.parent()?.parent()?;
    let dir = repo_root.join("registry");
    dir.join("index.json").is_file().then_some(dir)
}
