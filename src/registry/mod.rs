//! Registry access: index and component manifest fetching.
//!
//! The registry is a catalog of installable components, reachable either as a
//! local directory or as a remote HTTP base URL serving static JSON:
//! `{base}/index.json` enumerates the components and
//! `{base}/components/{name}.json` holds one manifest each.
//!
//! # Fallback chain
//!
//! [`RegistryClient`] treats a local source as a best-effort shortcut, never
//! the sole source of truth: any read or parse failure falls through to the
//! default remote location. On the remote path, an unauthenticated request is
//! always attempted first; a 404 or a transport-level failure triggers a
//! single authenticated retry through the GitHub contents API when a
//! credential is configured ([`github`]). When that retry fails too, the
//! original error is surfaced so the root cause is never masked.
//!
//! # Response-status policy
//!
//! | Status        | Outcome                                                        |
//! |---------------|----------------------------------------------------------------|
//! | 2xx           | parse JSON; a non-array index payload decodes as empty         |
//! | 404           | `RegistryNotFound`/`ComponentNotFound`, or authenticated retry |
//! | 401/403       | `AuthenticationFailed` naming the credential variable          |
//! | other non-2xx | `TransportError` with the status code                          |
//! | no response   | `NetworkError`, or authenticated retry                         |

mod github;
pub mod source;

pub use source::{RegistrySource, SourceLocation};

use crate::constants::DEFAULT_REGISTRY_URL;
use crate::core::AtelierError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// One installable unit as listed in the registry index.
///
/// `name` is the unique lookup key across the whole registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryIndexEntry {
    /// Unique component name
    pub name: String,
    /// Human-readable description
    #[serde(default)]
    pub description: String,
    /// Names of components this one depends on, in order
    #[serde(default)]
    pub dependencies: Vec<String>,
}

/// A single file belonging to a component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentFile {
    /// Relative filename within the component
    pub name: String,
    /// Literal text written verbatim at install time
    pub content: String,
}

/// The full description of one component: metadata plus its files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentManifest {
    /// Unique component name
    pub name: String,
    /// Human-readable description
    #[serde(default)]
    pub description: String,
    /// Names of components this one depends on, in order
    #[serde(default)]
    pub dependencies: Vec<String>,
    /// Files to materialize, in order
    #[serde(default)]
    pub files: Vec<ComponentFile>,
}

/// Client for fetching the registry index and component manifests.
pub struct RegistryClient {
    http: reqwest::Client,
}

impl Default for RegistryClient {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistryClient {
    /// Create a client with the transport's default timeout behavior.
    #[must_use]
    pub fn new() -> Self {
        let http = reqwest::Client::builder()
            .user_agent(concat!("atelier/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_default();
        Self { http }
    }

    /// Fetch the registry index from the resolved source.
    ///
    /// # Errors
    ///
    /// Propagates the remote-path failures described in the module docs.
    /// Local read failures are swallowed and escalate to the remote path.
    pub async fn fetch_index(&self, source: &RegistrySource) -> Result<Vec<RegistryIndexEntry>> {
        if let SourceLocation::Local(dir) = &source.location {
            let index_path = dir.join("index.json");
            match read_local_json(&index_path).and_then(parse_index) {
                Ok(entries) => return Ok(entries),
                Err(err) => {
                    debug!(
                        "Local registry index unavailable at {} ({err}), trying remote",
                        index_path.display()
                    );
                }
            }
        }

        self.fetch_remote_index(&remote_base(source), source.token.as_deref())
            .await
    }

    /// Fetch one component's manifest from the resolved source.
    ///
    /// # Errors
    ///
    /// Returns [`AtelierError::ComponentNotFound`] when the component does not
    /// exist at the remote location (after the authenticated retry, if any).
    /// A local source lacking the manifest falls through to the remote path.
    pub async fn fetch_component(
        &self,
        source: &RegistrySource,
        name: &str,
    ) -> Result<ComponentManifest> {
        if let SourceLocation::Local(dir) = &source.location {
            let manifest_path = dir.join("components").join(format!("{name}.json"));
            let local = read_local_json(&manifest_path)
                .and_then(|payload| serde_json::from_value(payload).map_err(Into::into));
            match local {
                Ok(manifest) => return Ok(manifest),
                Err(err) => {
                    debug!(
                        "Local manifest unavailable at {} ({err}), trying remote",
                        manifest_path.display()
                    );
                }
            }
        }

        self.fetch_remote_component(&remote_base(source), source.token.as_deref(), name)
            .await
    }

    async fn fetch_remote_index(
        &self,
        base: &str,
        token: Option<&str>,
    ) -> Result<Vec<RegistryIndexEntry>> {
        let url = format!("{base}/index.json");
        let payload = self
            .fetch_json(&url, base, token, "index.json", |url| {
                AtelierError::RegistryNotFound { url }
            })
            .await?;
        parse_index(payload)
    }

    async fn fetch_remote_component(
        &self,
        base: &str,
        token: Option<&str>,
        name: &str,
    ) -> Result<ComponentManifest> {
        let url = format!("{base}/components/{name}.json");
        let api_file = format!("components/{name}.json");
        let component = name.to_string();
        let payload = self
            .fetch_json(&url, base, token, &api_file, move |_| {
                AtelierError::ComponentNotFound { name: component }
            })
            .await?;
        serde_json::from_value(payload)
            .with_context(|| format!("Invalid component manifest from {url}"))
    }

    /// Perform one unauthenticated GET with the full status policy, retrying
    /// through the contents API on 404 or transport failure when a credential
    /// is available. `not_found` builds the error surfaced for a 404.
    async fn fetch_json(
        &self,
        url: &str,
        base: &str,
        token: Option<&str>,
        api_file: &str,
        not_found: impl FnOnce(String) -> AtelierError,
    ) -> Result<Value> {
        let response = match self
            .http
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                let original = AtelierError::NetworkError {
                    url: url.to_string(),
                    reason: err.to_string(),
                };
                return self.authenticated_retry(base, token, api_file, original).await;
            }
        };

        let status = response.status();
        if status.is_success() {
            return response
                .json()
                .await
                .with_context(|| format!("Registry returned a non-JSON body: {url}"));
        }

        match status.as_u16() {
            404 => {
                let original = not_found(url.to_string());
                self.authenticated_retry(base, token, api_file, original).await
            }
            401 | 403 => Err(AtelierError::AuthenticationFailed {
                url: url.to_string(),
            }
            .into()),
            code => Err(AtelierError::TransportError {
                url: url.to_string(),
                status: code,
            }
            .into()),
        }
    }

    /// Single authenticated retry. Without a credential, or when the retry
    /// fails, the original error wins.
    async fn authenticated_retry(
        &self,
        base: &str,
        token: Option<&str>,
        api_file: &str,
        original: AtelierError,
    ) -> Result<Value> {
        let Some(token) = token else {
            return Err(original.into());
        };

        match github::fetch_registry_file(&self.http, base, token, api_file).await {
            Ok(payload) => Ok(payload),
            Err(err) => {
                debug!("Authenticated registry fallback failed: {err:#}");
                Err(original.into())
            }
        }
    }
}

/// The remote base consulted when a source is remote, or when a local source
/// falls through.
fn remote_base(source: &RegistrySource) -> String {
    match &source.location {
        SourceLocation::Remote(url) => url.clone(),
        SourceLocation::Local(_) => DEFAULT_REGISTRY_URL.to_string(),
    }
}

fn read_local_json(path: &Path) -> Result<Value> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Decode an index payload. A non-array body is tolerated as an empty index
/// rather than treated as a hard error.
fn parse_index(payload: Value) -> Result<Vec<RegistryIndexEntry>> {
    match payload {
        Value::Array(_) => {
            serde_json::from_value(payload).context("Invalid registry index entry")
        }
        _ => Ok(Vec::new()),
    }
}
