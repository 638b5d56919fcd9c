use std::ops::{Deref, DerefMut};

use crate::geometry::Point;

/// A polygon vertex.
///
/// `sweep` belongs to the edge that ends at this vertex: zero for a straight
/// edge, otherwise the signed arc sweep. `id` is stable within one polygon
/// shape; 0 marks an anonymous vertex.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PolyPoint {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub point: Point,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "crate::geometry::point::is_zero_attr")
    )]
    pub sweep: f64,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "is_anonymous"))]
    pub id: u32,
}

#[cfg(feature = "serde")]
#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_anonymous(id: &u32) -> bool {
    *id == 0
}

impl PolyPoint {
    #[must_use]
    pub const fn new(point: Point, sweep: f64, id: u32) -> Self {
        Self { point, sweep, id }
    }

    /// A straight-edge vertex on the `z = 0` plane.
    #[must_use]
    pub const fn xy(x: f64, y: f64) -> Self {
        Self::new(Point::xy(x, y), 0.0, 0)
    }

    #[must_use]
    pub fn with_sweep(mut self, sweep: f64) -> Self {
        self.sweep = sweep;
        self
    }

    /// Whether the incoming edge is an arc.
    #[must_use]
    pub fn is_arc(&self) -> bool {
        self.sweep != 0.0
    }
}

impl From<Point> for PolyPoint {
    fn from(point: Point) -> Self {
        Self::new(point, 0.0, 0)
    }
}

impl Deref for PolyPoint {
    type Target = Point;

    fn deref(&self) -> &Point {
        &self.point
    }
}

impl DerefMut for PolyPoint {
    fn deref_mut(&mut self) -> &mut Point {
        &mut self.point
    }
}
