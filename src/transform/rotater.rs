use crate::geometry::Point;
use crate::math::matrix::{rotation_x, rotation_y, rotation_z};
use crate::math::{Matrix3, Vector3};

/// Coordinate axis of a single-axis rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Right-handed rotation about one coordinate axis through the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotater {
    axis: Axis,
    angle: f64,
}

impl Rotater {
    #[must_use]
    pub fn new(axis: Axis, angle: f64) -> Self {
        Self { axis, angle }
    }

    #[must_use]
    pub fn identity(axis: Axis) -> Self {
        Self { axis, angle: 0.0 }
    }

    #[must_use]
    pub fn axis(&self) -> Axis {
        self.axis
    }

    #[must_use]
    pub fn angle(&self) -> f64 {
        self.angle
    }

    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.angle == 0.0
    }

    #[must_use]
    pub fn matrix(&self) -> Matrix3 {
        match self.axis {
            Axis::X => rotation_x(self.angle),
            Axis::Y => rotation_y(self.angle),
            Axis::Z => rotation_z(self.angle),
        }
    }

    /// Turns this rotation into its inverse.
    pub fn reverse(&mut self) {
        self.angle = -self.angle;
    }

    #[must_use]
    pub fn apply_vector(&self, v: &Vector3) -> Vector3 {
        if self.is_identity() {
            *v
        } else {
            self.matrix() * v
        }
    }

    #[must_use]
    pub fn apply_point(&self, p: &Point) -> Point {
        Point::from(self.apply_vector(&p.coords()))
    }
}
