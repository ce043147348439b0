//! # Loader Errors

use thiserror::Error;

/// Failure to retrieve source text before parsing begins.
#[derive(Debug, Error)]
#[error("Failed to fetch '{path}': {message}")]
pub struct FetchError {
    pub path: String,
    pub message: String,
}

impl FetchError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { path: path.into(), message: message.into() }
    }
}

/// Errors surfaced by the loading pipeline.
///
/// Most malformed input is tolerated silently (skipped lines, degenerate
/// primitives, rejected textures); only a dangling prototype reference
/// and a failed fetch abort a load.
#[derive(Debug, Error)]
pub enum LoadError {
    /// `protoinstance` referenced a name never defined
    #[error("Unknown prototype '{name}'")]
    UnknownPrototype { name: String },

    /// Source text retrieval failed
    #[error(transparent)]
    Fetch(#[from] FetchError),
}
