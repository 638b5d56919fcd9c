use crate::geometry::Point;
use crate::intersect::Position;
use crate::math::tolerance::is_parallel_angle;
use crate::math::{Vector3, EPS};

/// Angular slack below which two equations are considered parallel.
const PARALLEL_PREC: f64 = 1e-10;

/// Implicit 2D line `a·x + b·y + c = 0`.
///
/// The normal `(a, b)` points to the left of the direction the equation was
/// built with, and is scaled so its larger component has magnitude 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearEquation {
    a: f64,
    b: f64,
    c: f64,
}

impl LinearEquation {
    /// The equation through `p0` and `p1`, directed from `p0` to `p1`.
    ///
    /// Returns `None` if the points coincide in XY.
    #[must_use]
    pub fn from_points(p0: &Point, p1: &Point) -> Option<Self> {
        Self::from_direction(&(p1 - p0), p0)
    }

    /// The equation through `p` with the XY direction of `dir`.
    ///
    /// Returns `None` if `dir` has no XY component.
    #[must_use]
    pub fn from_direction(dir: &Vector3, p: &Point) -> Option<Self> {
        let (dx, dy) = (dir.x, dir.y);
        if dx.abs() <= EPS * EPS && dy.abs() <= EPS * EPS {
            return None;
        }
        let scale = 1.0 / dx.abs().max(dy.abs());
        let a = -dy * scale;
        let b = dx * scale;
        Some(Self {
            a,
            b,
            c: -a * p.x - b * p.y,
        })
    }

    #[must_use]
    pub fn coefficients(&self) -> (f64, f64, f64) {
        (self.a, self.b, self.c)
    }

    /// Unit XY direction of the line.
    #[must_use]
    pub fn direction(&self) -> Vector3 {
        let len = self.a.hypot(self.b);
        Vector3::new(self.b / len, -self.a / len, 0.0)
    }

    /// Direction angle of the line in `(-π, π]`.
    #[must_use]
    pub fn inclination(&self) -> f64 {
        (-self.a).atan2(self.b)
    }

    /// Signed distance from the line; positive on the left.
    #[must_use]
    pub fn signed_length_to(&self, p: &Point) -> f64 {
        (self.a * p.x + self.b * p.y + self.c) / self.a.hypot(self.b)
    }

    /// Perpendicular distance from the line.
    #[must_use]
    pub fn length_to(&self, p: &Point) -> f64 {
        self.signed_length_to(p).abs()
    }

    /// `Left`, `Along` or `Right` of the directed line.
    #[must_use]
    pub fn position_of(&self, p: &Point, prec: f64) -> Position {
        let len = self.signed_length_to(p);
        if !len.is_finite() {
            Position::Undefined
        } else if len.abs() <= prec {
            Position::Along
        } else if len > 0.0 {
            Position::Left
        } else {
            Position::Right
        }
    }

    /// The crossing point of two equations, or `None` if they are parallel.
    #[must_use]
    pub fn intersection_with(&self, other: &LinearEquation) -> Option<Point> {
        if is_parallel_angle(self.inclination(), other.inclination(), PARALLEL_PREC) {
            return None;
        }
        let det = self.a * other.b - other.a * self.b;
        if det == 0.0 {
            return None;
        }
        let x = (self.b * other.c - other.b * self.c) / det;
        let y = (other.a * self.c - self.a * other.c) / det;
        Some(Point::xy(x, y))
    }

    /// The perpendicular through `p`, directed along this line's left normal.
    #[must_use]
    pub fn perpendicular(&self, p: &Point) -> LinearEquation {
        let a = -self.b;
        let b = self.a;
        LinearEquation {
            a,
            b,
            c: -a * p.x - b * p.y,
        }
    }

    /// The parallel through `p`, with the same direction.
    #[must_use]
    pub fn parallel(&self, p: &Point) -> LinearEquation {
        LinearEquation {
            a: self.a,
            b: self.b,
            c: -self.a * p.x - self.b * p.y,
        }
    }

    /// Foot of the perpendicular from `p`; keeps `p.z`.
    #[must_use]
    pub fn closest_point_to(&self, p: &Point) -> Point {
        let value = self.a * p.x + self.b * p.y + self.c;
        let norm_sq = self.a * self.a + self.b * self.b;
        Point::new(
            p.x - self.a * value / norm_sq,
            p.y - self.b * value / norm_sq,
            p.z,
        )
    }
}
