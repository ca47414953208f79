//! Atelier - a registry-backed UI component installer
//!
//! Atelier pulls UI component source files from a shared registry into a
//! project's own tree. A persisted configuration (`atelier.json`) - or, in
//! its absence, auto-detected project conventions - decides where installed
//! files land and which import paths they reference.
//!
//! # Pipeline
//!
//! Every invocation flows through the same stages:
//!
//! 1. [`config`] - load the persisted configuration, or infer one from the
//!    package manifest and path-alias config. An invalid persisted file
//!    behaves exactly like a missing one.
//! 2. [`registry::source`] - resolve where the registry lives, in strict
//!    priority order: configured URL, environment override, local
//!    development directory, built-in default.
//! 3. [`registry`] - fetch the index and component manifests, with a
//!    local-to-remote fall-through and an authenticated contents-API retry
//!    for private sources.
//! 4. [`installer`] - materialize component files into the project,
//!    resolving conflicts through an injected confirmation collaborator.
//!
//! Everything runs on a single logical thread: fetches and writes are
//! strictly sequential, and any unrecovered error aborts the invocation with
//! a non-zero exit.
//!
//! # Modules
//!
//! - [`cli`] - command-line interface (`init`, `add`) and the prompt
//!   collaborator
//! - [`config`] - configuration schema, validation, loading, detection
//! - [`registry`] - source resolution and registry client
//! - [`installer`] - file materialization and conflict handling
//! - [`core`] - error taxonomy and user-facing error reporting
//! - [`utils`] - atomic file writes and progress output
//! - [`constants`] - file names, environment variables, registry defaults

pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod installer;
pub mod registry;
pub mod utils;
