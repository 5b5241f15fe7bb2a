//! Errors raised while assembling a document

/// Failure to add a geometry to a document.
///
/// Every variant is raised before the document is mutated, so a failed
/// geometry never leaves views, accessors or bytes behind.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AssembleError {
    /// Per-name color policy has no entry for this geometry name
    #[error("no material color configured for geometry \"{0}\"")]
    MissingMaterialKey(String),

    /// Geometry has no vertices or no indices and empty meshes are rejected
    #[error("geometry \"{0}\" is empty (no vertices or no triangles)")]
    EmptyGeometry(String),

    /// Geometry arrays violate the triangle list invariants
    #[error("geometry \"{name}\" is invalid: {reason}")]
    InvalidGeometry { name: String, reason: String },
}

/// Result alias for assembly operations
pub type Result<T> = std::result::Result<T, AssembleError>;
