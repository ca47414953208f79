//! Authenticated fallback against the GitHub contents API.
//!
//! The public registry is served from `raw.githubusercontent.com`, which
//! answers 404 for private repositories. When a credential is configured, the
//! client retries such failures here: the repository coordinates are parsed
//! out of the registry base URL (or fall back to the built-in defaults), and
//! the file is requested through `api.github.com`, whose responses wrap the
//! payload in base64.

use crate::constants::{
    DEFAULT_REGISTRY_BRANCH, DEFAULT_REGISTRY_OWNER, DEFAULT_REGISTRY_PATH, DEFAULT_REGISTRY_REPO,
};
use anyhow::{Context, Result, bail};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde_json::Value;
use tracing::debug;

const RAW_HOST_PREFIX: &str = "https://raw.githubusercontent.com/";
const API_BASE: &str = "https://api.github.com";

/// Repository coordinates extracted from a registry base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RepoCoordinates {
    pub owner: String,
    pub repo: String,
    pub branch: String,
    /// Path of the registry directory within the repository
    pub path: String,
}

impl RepoCoordinates {
    /// Parse coordinates from a base URL of the expected shape
    /// `https://raw.githubusercontent.com/{owner}/{repo}/{branch}/{path...}`.
    pub(crate) fn from_base_url(base: &str) -> Option<Self> {
        let rest = base.strip_prefix(RAW_HOST_PREFIX)?;
        let mut segments = rest.split('/').filter(|segment| !segment.is_empty());

        let owner = segments.next()?.to_string();
        let repo = segments.next()?.to_string();
        let branch = segments.next()?.to_string();
        let path = segments.collect::<Vec<_>>().join("/");
        let path = if path.is_empty() {
            DEFAULT_REGISTRY_PATH.to_string()
        } else {
            path
        };

        Some(Self {
            owner,
            repo,
            branch,
            path,
        })
    }

    /// Built-in coordinates used when the base URL has an unexpected shape.
    pub(crate) fn fallback() -> Self {
        Self {
            owner: DEFAULT_REGISTRY_OWNER.to_string(),
            repo: DEFAULT_REGISTRY_REPO.to_string(),
            branch: DEFAULT_REGISTRY_BRANCH.to_string(),
            path: DEFAULT_REGISTRY_PATH.to_string(),
        }
    }
}

/// Fetch a registry file (e.g. `index.json` or `components/alert.json`)
/// through the authenticated contents API and return its decoded JSON.
///
/// Errors from this path are internal: the caller preserves the original
/// unauthenticated failure when the fallback does not work out.
pub(crate) async fn fetch_registry_file(
    http: &reqwest::Client,
    base: &str,
    token: &str,
    file: &str,
) -> Result<Value> {
    let coords = RepoCoordinates::from_base_url(base).unwrap_or_else(RepoCoordinates::fallback);
    let url = format!(
        "{API_BASE}/repos/{}/{}/contents/{}/{file}?ref={}",
        coords.owner, coords.repo, coords.path, coords.branch
    );
    debug!("Retrying via authenticated contents API: {url}");

    let response = http
        .get(&url)
        .header(reqwest::header::ACCEPT, "application/vnd.github+json")
        .bearer_auth(token)
        .send()
        .await
        .with_context(|| format!("Contents API request failed: {url}"))?;

    let status = response.status();
    if !status.is_success() {
        bail!("Contents API returned {status} for {url}");
    }

    let payload: Value = response
        .json()
        .await
        .with_context(|| format!("Contents API returned a non-JSON body: {url}"))?;

    let encoded = payload
        .get("content")
        .and_then(Value::as_str)
        .context("Contents API response has no `content` field")?;

    let decoded = decode_content(encoded)?;
    serde_json::from_str(&decoded).context("Decoded contents payload is not valid JSON")
}

/// Decode a base64 payload from the contents API.
///
/// The API hard-wraps the encoded text with embedded newlines, so all
/// whitespace is stripped before decoding.
pub(crate) fn decode_content(encoded: &str) -> Result<String> {
    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = STANDARD
        .decode(compact.as_bytes())
        .context("Contents API payload is not valid base64")?;
    String::from_utf8(bytes).context("Contents API payload is not valid UTF-8")
}
