//! Error types for catalog loading and configuration parsing.
//!
//! The assignment engine itself is infallible: it always returns a
//! solution and reports failures in aggregate (unassigned runs, score).
//! Errors only arise in the plumbing around it.

use thiserror::Error;

/// Errors raised while reading catalogs or engine configuration.
#[derive(Debug, Error)]
pub enum TransitError {
    /// Underlying I/O failure (missing file, unreadable stream).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON document.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A timetable or run names a route template that does not exist.
    #[error("unknown route template '{0}'")]
    UnknownRoute(String),
}

/// Result alias used across the crate's fallible plumbing.
pub type TransitResult<T> = Result<T, TransitError>;
