use crate::geometry::Point;
use crate::intersect::Position;
use crate::math::tolerance::{is_greater, is_less};

/// Nine anchor positions on the XY footprint of a box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    BottomLeft,
    BottomCentre,
    BottomRight,
    CentreLeft,
    Centre,
    CentreRight,
    TopLeft,
    TopCentre,
    TopRight,
}

/// Axis-aligned bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Point,
    pub max: Point,
}

impl BoundingBox {
    /// A box spanning both corners in any order.
    #[must_use]
    pub fn new(a: Point, b: Point) -> Self {
        Self {
            min: Point::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: Point::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    /// A zero-size box at `point`.
    #[must_use]
    pub fn from_point(point: Point) -> Self {
        Self {
            min: point,
            max: point,
        }
    }

    /// Bounds of a point set, or `None` if it is empty.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point>) -> Option<Self> {
        let mut iter = points.into_iter();
        let mut bounds = Self::from_point(*iter.next()?);
        for p in iter {
            bounds.merge_point(p);
        }
        Some(bounds)
    }

    pub fn merge_point(&mut self, p: &Point) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.min.z = self.min.z.min(p.z);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
        self.max.z = self.max.z.max(p.z);
    }

    pub fn merge(&mut self, other: &BoundingBox) {
        self.merge_point(&other.min);
        self.merge_point(&other.max);
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    #[must_use]
    pub fn depth(&self) -> f64 {
        self.max.y - self.min.y
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.max.z - self.min.z
    }

    #[must_use]
    pub fn centre(&self) -> Point {
        self.min.midpoint(&self.max)
    }

    /// Length of the 3D diagonal.
    #[must_use]
    pub fn diagonal(&self) -> f64 {
        self.min.length_from(&self.max)
    }

    /// The anchor point on the box footprint, at mid height.
    #[must_use]
    pub fn anchor(&self, anchor: Anchor) -> Point {
        let c = self.centre();
        let (x, y) = match anchor {
            Anchor::BottomLeft => (self.min.x, self.min.y),
            Anchor::BottomCentre => (c.x, self.min.y),
            Anchor::BottomRight => (self.max.x, self.min.y),
            Anchor::CentreLeft => (self.min.x, c.y),
            Anchor::Centre => (c.x, c.y),
            Anchor::CentreRight => (self.max.x, c.y),
            Anchor::TopLeft => (self.min.x, self.max.y),
            Anchor::TopCentre => (c.x, self.max.y),
            Anchor::TopRight => (self.max.x, self.max.y),
        };
        Point::new(x, y, c.z)
    }

    /// The eight corners, bottom face first.
    #[must_use]
    pub fn corners(&self) -> [Point; 8] {
        let (a, b) = (self.min, self.max);
        [
            Point::new(a.x, a.y, a.z),
            Point::new(b.x, a.y, a.z),
            Point::new(b.x, b.y, a.z),
            Point::new(a.x, b.y, a.z),
            Point::new(a.x, a.y, b.z),
            Point::new(b.x, a.y, b.z),
            Point::new(b.x, b.y, b.z),
            Point::new(a.x, b.y, b.z),
        ]
    }

    /// Copy grown by `amount` on every side.
    #[must_use]
    pub fn expanded(&self, amount: f64) -> Self {
        Self {
            min: Point::new(self.min.x - amount, self.min.y - amount, self.min.z - amount),
            max: Point::new(self.max.x + amount, self.max.y + amount, self.max.z + amount),
        }
    }

    /// `Inside`, `Along` (on the boundary) or `Outside`, ignoring `z`.
    #[must_use]
    pub fn position_of_2d(&self, p: &Point, prec: f64) -> Position {
        classify_axes(&[(p.x, self.min.x, self.max.x), (p.y, self.min.y, self.max.y)], prec)
    }

    /// `Inside`, `Along` (on a face) or `Outside`.
    #[must_use]
    pub fn position_of_3d(&self, p: &Point, prec: f64) -> Position {
        classify_axes(
            &[
                (p.x, self.min.x, self.max.x),
                (p.y, self.min.y, self.max.y),
                (p.z, self.min.z, self.max.z),
            ],
            prec,
        )
    }

    /// Whether `other` lies within this box in XY.
    #[must_use]
    pub fn encloses_2d(&self, other: &BoundingBox, prec: f64) -> bool {
        self.position_of_2d(&other.min, prec) != Position::Outside
            && self.position_of_2d(&other.max, prec) != Position::Outside
    }

    #[must_use]
    pub fn encloses_3d(&self, other: &BoundingBox, prec: f64) -> bool {
        self.position_of_3d(&other.min, prec) != Position::Outside
            && self.position_of_3d(&other.max, prec) != Position::Outside
    }

    /// Whether the XY footprints share any point.
    #[must_use]
    pub fn overlaps_2d(&self, other: &BoundingBox, prec: f64) -> bool {
        !(is_less(self.max.x, other.min.x, prec)
            || is_greater(self.min.x, other.max.x, prec)
            || is_less(self.max.y, other.min.y, prec)
            || is_greater(self.min.y, other.max.y, prec))
    }

    #[must_use]
    pub fn overlaps_3d(&self, other: &BoundingBox, prec: f64) -> bool {
        self.overlaps_2d(other, prec)
            && !(is_less(self.max.z, other.min.z, prec) || is_greater(self.min.z, other.max.z, prec))
    }
}

fn classify_axes(axes: &[(f64, f64, f64)], prec: f64) -> Position {
    let mut on_boundary = false;
    for &(value, lo, hi) in axes {
        if is_less(value, lo, prec) || is_greater(value, hi, prec) {
            return Position::Outside;
        }
        if !is_greater(value, lo, prec) || !is_less(value, hi, prec) {
            on_boundary = true;
        }
    }
    if on_boundary {
        Position::Along
    } else {
        Position::Inside
    }
}
