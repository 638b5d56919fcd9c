use std::cmp::Ordering;
use std::ops::{Add, AddAssign, Sub};

use crate::math::tolerance::{is_equal, is_less};
use crate::math::{Matrix4, Vector3};

/// A position in 3D space.
///
/// 2D operations ignore `z`. Equality under tolerance is a distance test; the
/// tolerant ordering is lexicographic on `(x, y, z)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "crate::geometry::point::is_zero_attr")
    )]
    pub z: f64,
}

#[cfg(feature = "serde")]
#[allow(clippy::trivially_copy_pass_by_ref)]
pub(crate) fn is_zero_attr(value: &f64) -> bool {
    *value == 0.0
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// A point on the `z = 0` plane.
    #[must_use]
    pub const fn xy(x: f64, y: f64) -> Self {
        Self { x, y, z: 0.0 }
    }

    /// Position vector from the origin.
    #[must_use]
    pub fn coords(&self) -> Vector3 {
        Vector3::new(self.x, self.y, self.z)
    }

    /// 3D distance to `other`.
    #[must_use]
    pub fn length_from(&self, other: &Point) -> f64 {
        (other - self).norm()
    }

    /// Distance to `other` in the XY plane.
    #[must_use]
    pub fn length_from_2d(&self, other: &Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    #[must_use]
    pub fn is_equal(&self, other: &Point, prec: f64) -> bool {
        self.length_from(other) <= prec
    }

    #[must_use]
    pub fn is_equal_2d(&self, other: &Point, prec: f64) -> bool {
        self.length_from_2d(other) <= prec
    }

    /// Tolerant lexicographic ordering on `(x, y, z)`.
    #[must_use]
    pub fn compare(&self, other: &Point, prec: f64) -> Ordering {
        for (a, b) in [(self.x, other.x), (self.y, other.y), (self.z, other.z)] {
            if is_less(a, b, prec) {
                return Ordering::Less;
            }
            if is_less(b, a, prec) {
                return Ordering::Greater;
            }
        }
        Ordering::Equal
    }

    /// Tolerant lexicographic ordering on `(x, y)` only.
    #[must_use]
    pub fn compare_2d(&self, other: &Point, prec: f64) -> Ordering {
        if is_equal(self.x, other.x, prec) {
            if is_equal(self.y, other.y, prec) {
                Ordering::Equal
            } else if self.y < other.y {
                Ordering::Less
            } else {
                Ordering::Greater
            }
        } else if self.x < other.x {
            Ordering::Less
        } else {
            Ordering::Greater
        }
    }

    /// Azimuth of the XY direction from `self` to `other`.
    #[must_use]
    pub fn azimuth_to(&self, other: &Point) -> f64 {
        (other.y - self.y).atan2(other.x - self.x)
    }

    /// Elevation angle of the direction from `self` to `other`.
    #[must_use]
    pub fn altitude_to(&self, other: &Point) -> f64 {
        let horizontal = self.length_from_2d(other);
        (other.z - self.z).atan2(horizontal)
    }

    #[must_use]
    pub fn midpoint(&self, other: &Point) -> Point {
        Point::new(
            (self.x + other.x) * 0.5,
            (self.y + other.y) * 0.5,
            (self.z + other.z) * 0.5,
        )
    }

    /// Linear interpolation towards `other`; `t = 0` is `self`, `t = 1` is `other`.
    #[must_use]
    pub fn lerp(&self, other: &Point, t: f64) -> Point {
        *self + (other - self) * t
    }

    /// Moves this point by `length` in the XY direction `azimuth`.
    pub fn move_polar(&mut self, length: f64, azimuth: f64) {
        let (s, c) = azimuth.sin_cos();
        self.x += length * c;
        self.y += length * s;
    }

    /// Moves this point by `length` along the direction `(azimuth, altitude)`.
    pub fn move_polar_3d(&mut self, length: f64, azimuth: f64, altitude: f64) {
        let (sa, ca) = azimuth.sin_cos();
        let (se, ce) = altitude.sin_cos();
        self.x += length * ce * ca;
        self.y += length * ce * sa;
        self.z += length * se;
    }

    /// Copy of this point moved by `length` in the XY direction `azimuth`.
    #[must_use]
    pub fn moved_polar(&self, length: f64, azimuth: f64) -> Point {
        let mut p = *self;
        p.move_polar(length, azimuth);
        p
    }

    /// Applies an affine transform.
    #[must_use]
    pub fn transform(&self, matrix: &Matrix4) -> Point {
        let p = matrix.transform_point(&nalgebra::Point3::new(self.x, self.y, self.z));
        Point::new(p.x, p.y, p.z)
    }

    /// Copy with `z` replaced.
    #[must_use]
    pub fn with_z(&self, z: f64) -> Point {
        Point::new(self.x, self.y, z)
    }
}

impl From<Vector3> for Point {
    fn from(v: Vector3) -> Self {
        Point::new(v.x, v.y, v.z)
    }
}

impl Sub for Point {
    type Output = Vector3;

    fn sub(self, rhs: Point) -> Vector3 {
        Vector3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Sub<&Point> for &Point {
    type Output = Vector3;

    fn sub(self, rhs: &Point) -> Vector3 {
        *self - *rhs
    }
}

impl Add<Vector3> for Point {
    type Output = Point;

    fn add(self, rhs: Vector3) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub<Vector3> for Point {
    type Output = Point;

    fn sub(self, rhs: Vector3) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl AddAssign<Vector3> for Point {
    fn add_assign(&mut self, rhs: Vector3) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}
