//! # Mesh Errors

use thiserror::Error;

/// Errors raised by geometry construction.
///
/// Most geometry problems in this pipeline are handled locally (silent
/// skips, triangulator fallback); errors only surface where an internal
/// precondition is violated.
#[derive(Debug, Error)]
pub enum MeshError {
    /// Degenerate geometry parameters
    #[error("Degenerate geometry: {message}")]
    DegenerateGeometry { message: String },
}

impl MeshError {
    /// Creates a degenerate geometry error.
    pub fn degenerate(message: impl Into<String>) -> Self {
        Self::DegenerateGeometry { message: message.into() }
    }
}
