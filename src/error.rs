use thiserror::Error;

/// Top-level error type for the polygeo kernel.
#[derive(Debug, Error)]
pub enum PolygeoError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Topology(#[from] TopologyError),
}

/// Errors related to geometric constructions.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("zero-length vector")]
    ZeroVector,
}

/// Errors related to polygon structure and bookkeeping.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("hole index {index} is out of range (polygon has {count} holes)")]
    HoleOutOfRange { index: usize, count: usize },

    #[error("vertex index {index} is out of range (polygon has {count} vertices)")]
    VertexOutOfRange { index: usize, count: usize },
}

/// Convenience type alias for results using [`PolygeoError`].
pub type Result<T> = std::result::Result<T, PolygeoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_convert_and_display() {
        let err: PolygeoError = TopologyError::HoleOutOfRange { index: 2, count: 1 }.into();
        assert_eq!(err.to_string(), "hole index 2 is out of range (polygon has 1 holes)");
        let err: PolygeoError = GeometryError::ZeroVector.into();
        assert!(matches!(err, PolygeoError::Geometry(GeometryError::ZeroVector)));
    }
}
