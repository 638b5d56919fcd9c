mod arc;
mod line;
mod linear_eq;

pub use arc::Arc;
pub use line::Line;
pub use linear_eq::LinearEquation;

use crate::geometry::Point;
use crate::intersect::Position;
use crate::math::Vector3;

/// Shared queries of bounded 1D entities (segments and arcs).
pub trait Curve {
    fn start_point(&self) -> Point;

    fn end_point(&self) -> Point;

    /// Point halfway along the curve.
    fn midpoint(&self) -> Point;

    /// 3D length of the curve.
    fn length(&self) -> f64;

    /// Classifies `p` against the curve in XY.
    fn position_of_2d(&self, p: &Point, prec: f64) -> Position;

    /// Unit tangent in the direction of travel at a point on the curve.
    fn tangent_at(&self, p: &Point) -> Option<Vector3>;
}
