//! Core types shared across the atelier pipeline.
//!
//! Currently this is the error taxonomy and its user-facing reporting layer;
//! see [`error`] for the full design.

pub mod error;

pub use error::{AtelierError, ErrorContext, user_friendly_error};
