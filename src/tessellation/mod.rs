mod faceter;

pub use faceter::Faceter;

/// Parameters controlling how arcs are replaced by chords.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FacetParams {
    /// Maximum allowed distance between a chord and its arc.
    pub tolerance: f64,
    /// Minimum number of chords per arc.
    pub min_segments: usize,
    /// Maximum number of chords per arc.
    pub max_segments: usize,
}

impl Default for FacetParams {
    fn default() -> Self {
        Self {
            tolerance: 0.01,
            min_segments: 1,
            max_segments: 1024,
        }
    }
}

impl FacetParams {
    #[must_use]
    pub fn with_tolerance(tolerance: f64) -> Self {
        Self {
            tolerance,
            ..Self::default()
        }
    }
}
