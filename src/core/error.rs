//! Error handling for atelier
//!
//! The error system is designed around two principles:
//! 1. **Strongly-typed errors** for precise handling in code
//! 2. **User-friendly messages** with actionable suggestions for CLI users
//!
//! It consists of two main types:
//! - [`AtelierError`] - enumerated error types for all failure cases
//! - [`ErrorContext`] - wrapper that adds suggestions and details for display
//!
//! # Error Categories
//!
//! - **Project detection**: [`AtelierError::ProjectNotRecognized`]
//! - **Configuration**: [`AtelierError::ConfigInvalid`]
//! - **Registry access**: [`AtelierError::RegistryNotFound`],
//!   [`AtelierError::ComponentNotFound`], [`AtelierError::AuthenticationFailed`],
//!   [`AtelierError::TransportError`], [`AtelierError::NetworkError`]
//! - **Installation**: [`AtelierError::InstallFailed`],
//!   [`AtelierError::PackageInstallFailed`]
//!
//! Recoverable conditions never reach this module: a missing or invalid
//! `atelier.json` is handled by the config resolver (it falls back to
//! auto-detection), and a failed local registry read silently escalates to the
//! remote path. Everything that does surface here is terminal for the current
//! operation and is reported through [`user_friendly_error`] before the
//! process exits non-zero.
//!
//! # Examples
//!
//! ```rust,no_run
//! use atelier_cli::core::{AtelierError, user_friendly_error};
//!
//! fn lookup() -> Result<(), AtelierError> {
//!     Err(AtelierError::ComponentNotFound { name: "button".to_string() })
//! }
//!
//! if let Err(e) = lookup() {
//!     let ctx = user_friendly_error(anyhow::Error::from(e));
//!     ctx.display(); // colored error with a remediation suggestion
//! }
//! ```

use crate::constants::REGISTRY_TOKEN_ENV;
use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for atelier operations.
///
/// Each variant represents a specific failure mode and carries the context
/// needed to render an actionable message. Variants map one-to-one onto the
/// failure taxonomy of the installation pipeline; transient conditions that
/// the pipeline recovers from on its own (invalid persisted config, local
/// registry read failures) are only ever logged, not raised.
#[derive(Error, Debug)]
pub enum AtelierError {
    /// No `package.json` was found in the project directory.
    ///
    /// This is the one fatal case of configuration auto-detection: without a
    /// package manifest there is no project to install into.
    #[error("No package.json found in the current directory")]
    ProjectNotRecognized,

    /// A persisted configuration file exists but fails validation.
    ///
    /// Callers treat this exactly like a missing configuration and fall back
    /// to auto-detection; the variant exists so the condition can be logged
    /// with its cause.
    #[error("Invalid configuration: {reason}")]
    ConfigInvalid {
        /// Why validation rejected the file
        reason: String,
    },

    /// The registry index could not be found at the resolved location.
    #[error("Registry not found at {url}")]
    RegistryNotFound {
        /// URL of the index that returned 404
        url: String,
    },

    /// A named component does not exist in the registry.
    #[error("Component '{name}' not found in registry")]
    ComponentNotFound {
        /// Name of the missing component
        name: String,
    },

    /// The registry rejected the request with 401 or 403.
    #[error("Authentication failed for registry request: {url}")]
    AuthenticationFailed {
        /// URL of the rejected request
        url: String,
    },

    /// The registry answered with an unexpected HTTP status.
    #[error("Registry request to {url} failed with status {status}")]
    TransportError {
        /// URL of the failed request
        url: String,
        /// HTTP status code of the response
        status: u16,
    },

    /// No response was received at all (DNS, connection refused, timeout).
    #[error("Cannot reach registry at {url}: {reason}")]
    NetworkError {
        /// URL that could not be reached
        url: String,
        /// Transport-level failure description
        reason: String,
    },

    /// Installing a single component failed.
    ///
    /// Sibling components in a multi-component request are unaffected; the
    /// `add` command records the failure and keeps going.
    #[error("Failed to install component '{component}': {reason}")]
    InstallFailed {
        /// Name of the component whose installation failed
        component: String,
        /// Cause of the failure
        reason: String,
    },

    /// The styling package installation step of `init` failed.
    #[error("Package installation failed: {reason}")]
    PackageInstallFailed {
        /// Output or cause reported by the package manager
        reason: String,
    },

    /// I/O error from [`std::io::Error`]
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON (de)serialization error from [`serde_json::Error`]
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Wrapper that pairs an error with user-facing remediation text.
///
/// The CLI converts every unrecovered error into an `ErrorContext` before
/// display so that the message, an optional detail line, and an optional
/// suggestion render consistently.
pub struct ErrorContext {
    /// The underlying error chain
    pub error: anyhow::Error,
    /// One-line remediation hint, rendered after the message
    pub suggestion: Option<String>,
    /// Supporting detail, rendered dimmed
    pub details: Option<String>,
}

impl ErrorContext {
    /// Wrap an error with no suggestion or details.
    pub fn new(error: impl Into<anyhow::Error>) -> Self {
        Self {
            error: error.into(),
            suggestion: None,
            details: None,
        }
    }

    /// Attach a remediation suggestion.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Attach a detail line.
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error to stderr with color, including the cause chain.
    pub fn display(&self) {
        eprintln!("{} {}", "error:".red().bold(), self.error);

        for cause in self.error.chain().skip(1) {
            eprintln!("  {} {cause}", "caused by:".dimmed());
        }

        if let Some(details) = &self.details {
            eprintln!("  {}", details.dimmed());
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!();
            eprintln!("{} {suggestion}", "hint:".yellow().bold());
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;
        if let Some(details) = &self.details {
            write!(f, "\n{details}")?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nhint: {suggestion}")?;
        }
        Ok(())
    }
}

/// Convert any error into an [`ErrorContext`] with a contextual suggestion.
///
/// Known [`AtelierError`] variants get a tailored remediation hint; everything
/// else is passed through unchanged.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    let suggestion = match error.downcast_ref::<AtelierError>() {
        Some(AtelierError::ProjectNotRecognized) => Some(
            "Run this command inside a project with a package.json, then run 'atelier init' \
             to configure it"
                .to_string(),
        ),
        Some(AtelierError::RegistryNotFound { .. }) => Some(format!(
            "If the registry is private, set {REGISTRY_TOKEN_ENV} to a token with read access; \
             otherwise make the registry public or check the configured URL"
        )),
        Some(AtelierError::ComponentNotFound { .. }) => Some(format!(
            "Run 'atelier add' with no arguments to list available components. If the registry \
             is private, set {REGISTRY_TOKEN_ENV}"
        )),
        Some(AtelierError::AuthenticationFailed { .. }) => Some(format!(
            "Set {REGISTRY_TOKEN_ENV} to a token that can read the registry repository"
        )),
        Some(AtelierError::NetworkError { .. }) => {
            Some("Check your internet connection and the registry URL".to_string())
        }
        Some(AtelierError::PackageInstallFailed { .. }) => Some(
            "Install the styling packages manually, or re-run 'atelier init' once the package \
             manager is available"
                .to_string(),
        ),
        _ => None,
    };

    let context = ErrorContext::new(error);
    match suggestion {
        Some(suggestion) => context.with_suggestion(suggestion),
        None => context,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_not_found_message() {
        let err = AtelierError::ComponentNotFound {
            name: "button".to_string(),
        };
        assert_eq!(err.to_string(), "Component 'button' not found in registry");
    }

    #[test]
    fn test_user_friendly_error_attaches_token_hint() {
        let ctx = user_friendly_error(
            AtelierError::AuthenticationFailed {
                url: "https://example.com/index.json".to_string(),
            }
            .into(),
        );
        let suggestion = ctx.suggestion.expect("suggestion");
        assert!(suggestion.contains(REGISTRY_TOKEN_ENV));
    }

    #[test]
    fn test_user_friendly_error_passes_unknown_through() {
        let ctx = user_friendly_error(anyhow::anyhow!("something else"));
        assert!(ctx.suggestion.is_none());
        assert_eq!(ctx.error.to_string(), "something else");
    }

    #[test]
    fn test_display_includes_suggestion() {
        let ctx = ErrorContext::new(anyhow::anyhow!("boom")).with_suggestion("try again");
        let rendered = format!("{ctx}");
        assert!(rendered.contains("boom"));
        assert!(rendered.contains("hint: try again"));
    }
}
