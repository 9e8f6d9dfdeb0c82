//! Error types for ray queries.

use thiserror::Error;

/// Errors reported when a query's inputs violate the caller contract.
///
/// A ray that misses everything is not an error; neither is degenerate
/// geometry such as a zero-area triangle, which simply never reports a hit.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RaycastError {
    /// Ray origin or direction is non-finite, or the direction has zero length.
    #[error("ray has a non-finite origin or a zero-length direction")]
    DegenerateRay,

    /// Maximum distance must be strictly positive.
    #[error("max distance must be > 0, got {0}")]
    InvalidMaxDistance(f64),

    /// A mesh collider carries no mesh data.
    #[error("entry {entry}: mesh collider has no mesh data")]
    MissingMesh {
        /// Index of the offending entry in scan order.
        entry: usize,
    },

    /// Mesh data is inconsistent.
    #[error("entry {entry}: malformed mesh: {reason}")]
    MalformedMesh {
        /// Index of the offending entry in scan order.
        entry: usize,
        /// What is wrong with the mesh.
        reason: String,
    },

    /// Shape dimensions or transform are invalid.
    #[error("entry {entry}: invalid shape: {reason}")]
    InvalidShape {
        /// Index of the offending entry in scan order.
        entry: usize,
        /// What is wrong with the shape.
        reason: String,
    },
}

/// Result type for ray queries.
pub type Result<T> = std::result::Result<T, RaycastError>;
