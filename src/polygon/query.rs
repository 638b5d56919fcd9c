use super::intersect::{intersect_edges, is_line_reflection};
use super::{PolyEdge, Polygon, Rotation};
use crate::geometry::{BoundingBox, Line, LinearEquation, Point};
use crate::intersect::{Position, PositionMask, Role, XList};
use crate::math::polygon_2d::{signed_area, widest_gap_direction};
use crate::math::{VectorExt, EPS};

/// Fractions of the bounds height tried by [`Polygon::internal_point`].
const PROBE_ROWS: [f64; 7] = [0.5, 0.25, 0.75, 0.125, 0.375, 0.625, 0.875];

impl Polygon {
    /// Whether this boundary can enclose an area (or, if open, trace a path).
    ///
    /// A closed polygon needs three vertices, or two joined by an arc.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        let n = self.len();
        if !self.is_closed() {
            return n >= 2;
        }
        n >= 3 || (n == 2 && self.vertices().iter().any(|v| v.is_arc()))
    }

    /// [`Polygon::is_valid`] for every part, with no edge crossing or
    /// touching another edge except at the vertex two neighbours share.
    #[must_use]
    pub fn is_valid_strict(&self) -> bool {
        self.parts().all(|part| part.is_valid() && !part.has_self_contact(EPS))
    }

    fn has_self_contact(&self, prec: f64) -> bool {
        let edges: Vec<PolyEdge> = self.edges().collect();
        let n = edges.len();
        for i in 0..n {
            for j in i + 1..n {
                let mut list = XList::with_masks(PositionMask::WITHIN, PositionMask::WITHIN);
                intersect_edges(&mut list, &edges[i], &edges[j], prec);
                list.remove_duplicates(prec);
                let shared = if n == 2 {
                    2
                } else if j == i + 1 || (self.is_closed() && i == 0 && j == n - 1) {
                    1
                } else {
                    0
                };
                if list.len() > shared {
                    return true;
                }
            }
        }
        false
    }

    /// Area enclosed by the boundary, arc segments included; 0 when open.
    ///
    /// With `is_net` the holes are subtracted. Unless `is_signed`, the result
    /// is non-negative; otherwise it takes the outer boundary's sign, positive
    /// for anticlockwise.
    #[must_use]
    pub fn area(&self, is_net: bool, is_signed: bool) -> f64 {
        let outer = self.boundary_area();
        let mut magnitude = outer.abs();
        if is_net {
            magnitude -= self.holes().iter().map(|h| h.boundary_area().abs()).sum::<f64>();
        }
        if is_signed && outer < 0.0 {
            -magnitude
        } else {
            magnitude
        }
    }

    fn boundary_area(&self) -> f64 {
        if !self.is_closed() || !self.is_valid() {
            return 0.0;
        }
        let coords: Vec<(f64, f64)> = self.vertices().iter().map(|v| (v.x, v.y)).collect();
        let bulges: f64 = self.edges().filter_map(|e| e.as_arc()).map(|a| a.area(true)).sum();
        signed_area(&coords) + bulges
    }

    /// Winding sense, or `None` for an invalid or zero-area boundary.
    #[must_use]
    pub fn direction(&self) -> Option<Rotation> {
        if !self.is_valid() || !self.is_closed() {
            return None;
        }
        let area = self.boundary_area();
        if area > 0.0 {
            Some(Rotation::Anticlockwise)
        } else if area < 0.0 {
            Some(Rotation::Clockwise)
        } else {
            None
        }
    }

    /// Bounds of the outer boundary, arcs included.
    #[must_use]
    pub fn bounds(&self) -> Option<BoundingBox> {
        let mut bounds = BoundingBox::from_points(self.vertices().iter().map(|v| &v.point))?;
        for edge in self.edges().filter(PolyEdge::is_arc) {
            bounds.merge(&edge.bounds());
        }
        Some(bounds)
    }

    /// Total 3D length of the boundary's edges.
    #[must_use]
    pub fn perimeter(&self) -> f64 {
        self.edges().map(|e| e.length_3d()).sum()
    }

    /// Walks `length` along the boundary from the first vertex.
    ///
    /// Returns the point reached and the index of the vertex starting the edge
    /// it lies on. Closed boundaries wrap; open ones clamp at their ends.
    #[must_use]
    pub fn trace_perimeter(&self, length: f64) -> Option<(Point, usize)> {
        let total = self.perimeter();
        let first = self.vertex(0)?;
        if total <= 0.0 {
            return Some((first.point, 0));
        }
        let mut remaining = if self.is_closed() {
            length.rem_euclid(total)
        } else if length <= 0.0 {
            return Some((first.point, 0));
        } else {
            length
        };
        let count = self.edge_count();
        for (k, edge) in self.edges().enumerate() {
            let len = edge.length_3d();
            if remaining <= len || k + 1 == count {
                let t = if len > 0.0 { remaining / len } else { 0.0 };
                return Some((edge.point_at(t), k));
            }
            remaining -= len;
        }
        None
    }

    /// Classifies `p` as `Inside`, `Along` the boundary (any part) or `Outside`.
    ///
    /// Holes count as outside. Returns `Undefined` for an invalid polygon.
    #[must_use]
    pub fn position_of(&self, p: &Point, prec: f64) -> Position {
        if !self.is_valid() || !self.is_closed() {
            return Position::Undefined;
        }
        let Some(bounds) = self.bounds() else {
            return Position::Undefined;
        };
        if bounds.position_of_2d(p, prec) == Position::Outside {
            return Position::Outside;
        }
        if self
            .parts()
            .flat_map(Polygon::edges)
            .any(|e| e.position_of_2d(p, prec).is_within())
        {
            return Position::Along;
        }
        let azimuth = widest_gap_direction(self.parts().flat_map(Polygon::edges).map(|e| e.origin.azimuth_to(&e.end)));
        let reach = bounds.diagonal() + p.length_from_2d(&bounds.centre()) + 1.0;
        let ray = Line::new(*p, p.moved_polar(reach, azimuth));
        let Some(ray_eq) = ray.equation() else {
            return Position::Undefined;
        };
        let ray_dir = ray.direction();

        let mut list = XList::with_masks(PositionMask::WITHIN, PositionMask::WITHIN);
        self.intersections_with_line(&mut list, &ray, prec);
        list.remove_duplicates(prec);

        let mut crossings = 0;
        for x in &list {
            let (Some(part), Some(k)) = (x.part(Role::Target), x.vertex(Role::Target)) else {
                continue;
            };
            let Some(polygon) = self.part(part as usize) else {
                continue;
            };
            let k = k as usize;
            let position = x.position(Role::Target);
            if position.is_vertex() {
                let at = if position == Position::Origin { k } else { k + 1 };
                if polygon.is_reflection_at(at, &ray_eq, false, prec) {
                    continue;
                }
            } else if let Some(edge) = polygon.edge(k) {
                let tangent = edge.tangent_at(&x.point);
                if edge.is_arc() && tangent.is_some_and(|t| t.is_parallel(&ray_dir, EPS)) {
                    continue;
                }
            }
            crossings += 1;
        }
        if crossings % 2 == 1 {
            Position::Inside
        } else {
            Position::Outside
        }
    }

    /// Whether the edges either side of vertex `at` stay on one side of `line`.
    pub(crate) fn is_reflection_at(&self, at: usize, line: &LinearEquation, is_hole: bool, prec: f64) -> bool {
        let n = self.len();
        if n == 0 {
            return false;
        }
        let at = at % n;
        let (Some(before), Some(after)) = (self.edge((at + n - 1) % n), self.edge(at)) else {
            return false;
        };
        is_line_reflection(&before.midpoint(), &self.vertices()[at].point, &after.midpoint(), line, is_hole, prec)
    }

    /// A point strictly inside the polygon (clear of any hole), if one is found.
    #[must_use]
    pub fn internal_point(&self, prec: f64) -> Option<Point> {
        let bounds = self.bounds()?;
        let z = self.vertex(0)?.z;
        for fraction in PROBE_ROWS {
            let y = bounds.min.y + bounds.depth() * fraction;
            let probe = Line::new(Point::new(bounds.min.x - 1.0, y, z), Point::new(bounds.max.x + 1.0, y, z));
            let mut list = XList::with_masks(PositionMask::WITHIN, PositionMask::ANY);
            self.intersections_with_line(&mut list, &probe, prec);
            list.sort_along_line(&probe);
            let hits: Vec<Point> = list.iter().map(|x| x.point).collect();
            for pair in hits.windows(2) {
                if pair[0].is_equal_2d(&pair[1], prec) {
                    continue;
                }
                let mid = pair[0].midpoint(&pair[1]);
                if self.position_of(&mid, prec) == Position::Inside {
                    return Some(mid);
                }
            }
        }
        None
    }

    /// Whether `p` is inside the polygon or on its boundary.
    #[must_use]
    pub fn encloses_point(&self, p: &Point, prec: f64) -> bool {
        matches!(self.position_of(p, prec), Position::Inside | Position::Along)
    }

    /// Whether `other` lies entirely within this polygon; shared boundary is allowed.
    #[must_use]
    pub fn encloses(&self, other: &Polygon, prec: f64) -> bool {
        let (Some(own), Some(theirs)) = (self.bounds(), other.bounds()) else {
            return false;
        };
        if !self.is_valid() || !other.is_valid() || !own.encloses_2d(&theirs, prec) {
            return false;
        }
        if other.vertices().iter().any(|v| self.position_of(v, prec) == Position::Outside) {
            return false;
        }
        // Every piece of the other boundary between crossings must stay in.
        let mut list = XList::with_masks(PositionMask::WITHIN, PositionMask::WITHIN);
        other.intersections_with_polygon(&mut list, self, prec);
        for (k, edge) in other.edges().enumerate() {
            let mut cuts: Vec<Point> = list
                .iter()
                .filter(|x| x.part(Role::Target) == Some(0) && x.vertex(Role::Target) == Some(k as u32))
                .map(|x| x.point)
                .collect();
            cuts.sort_by(|a, b| edge.origin.length_from_2d(a).total_cmp(&edge.origin.length_from_2d(b)));
            let mut rest = edge;
            for cut in &cuts {
                let mut head = rest;
                if let Some(tail) = head.split(cut, prec) {
                    if self.position_of(&head.midpoint(), prec) == Position::Outside {
                        return false;
                    }
                    rest = tail;
                }
            }
            if self.position_of(&rest.midpoint(), prec) == Position::Outside {
                return false;
            }
        }
        self.holes()
            .iter()
            .filter_map(|h| h.internal_point(prec))
            .all(|p| other.position_of(&p, prec) != Position::Inside)
    }

    /// Whether the two polygons share any point, touching included.
    #[must_use]
    pub fn overlaps(&self, other: &Polygon, prec: f64) -> bool {
        let (Some(own), Some(theirs)) = (self.bounds(), other.bounds()) else {
            return false;
        };
        if !self.is_valid() || !other.is_valid() || !own.overlaps_2d(&theirs, prec) {
            return false;
        }
        let touches = |a: &Polygon, b: &Polygon| a.vertices().iter().any(|v| b.position_of(v, prec) != Position::Outside);
        if touches(other, self) || touches(self, other) {
            return true;
        }
        let mut list = XList::with_masks(PositionMask::WITHIN, PositionMask::WITHIN);
        if self.intersections_with_polygon(&mut list, other, prec) > 0 {
            return true;
        }
        let inside = |a: &Polygon, b: &Polygon| {
            a.internal_point(prec)
                .is_some_and(|p| b.position_of(&p, prec) == Position::Inside)
        };
        inside(self, other) || inside(other, self)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI};

    use approx::assert_relative_eq;

    use super::*;
    use crate::polygon::tests::square;
    use crate::polygon::PolyPoint;

    fn triangle() -> Polygon {
        Polygon::from_points([Point::xy(1.0, 2.0), Point::xy(3.0, 2.0), Point::xy(1.0, 4.0)])
    }

    /// The lower unit half-disc: an arc from (-1,0) to (1,0), closed by the diameter.
    fn half_disc() -> Polygon {
        Polygon::from_vertices(vec![PolyPoint::xy(-1.0, 0.0), PolyPoint::xy(1.0, 0.0).with_sweep(PI)])
    }

    #[test]
    fn triangle_area_and_direction() {
        let t = triangle();
        assert_relative_eq!(t.area(false, true), 2.0, epsilon = 1e-12);
        assert_eq!(t.direction(), Some(Rotation::Anticlockwise));
        let mut open = t.clone();
        open.set_closed(false);
        assert_relative_eq!(open.area(false, false), 0.0);
        assert!(open.direction().is_none());
    }

    #[test]
    fn arc_edge_area_and_bounds() {
        let lens = Polygon::from_vertices(vec![PolyPoint::xy(1.0, 0.0), PolyPoint::xy(-1.0, 0.0).with_sweep(PI)]);
        assert!(lens.is_valid());
        // Half disc above the diameter plus the flat closing edge.
        assert_relative_eq!(lens.area(false, true), FRAC_PI_2, epsilon = 1e-9);
        let b = lens.bounds().unwrap();
        assert_relative_eq!(b.max.y, 1.0, epsilon = 1e-9);
        assert_relative_eq!(b.min.y, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn net_area_subtracts_holes() {
        let mut outer = square(0.0, 0.0, 10.0);
        outer.add_hole(square(2.0, 2.0, 2.0));
        assert_relative_eq!(outer.area(false, false), 100.0, epsilon = 1e-9);
        assert_relative_eq!(outer.area(true, false), 96.0, epsilon = 1e-9);
    }

    #[test]
    fn classification() {
        let t = triangle();
        assert_eq!(t.position_of(&Point::xy(2.0, 2.5), EPS), Position::Inside);
        assert_eq!(t.position_of(&Point::xy(5.0, 6.0), EPS), Position::Outside);
        assert_eq!(t.position_of(&Point::xy(2.0, 2.0), EPS), Position::Along);
        assert_eq!(t.position_of(&Point::xy(2.9, 3.9), EPS), Position::Outside);
        assert_eq!(Polygon::new().position_of(&Point::default(), EPS), Position::Undefined);
    }

    #[test]
    fn classification_with_hole_and_arc() {
        let mut outer = square(0.0, 0.0, 10.0);
        outer.add_hole(square(2.0, 2.0, 2.0));
        assert_eq!(outer.position_of(&Point::xy(3.0, 3.0), EPS), Position::Outside);
        assert_eq!(outer.position_of(&Point::xy(5.0, 5.0), EPS), Position::Inside);
        assert_eq!(outer.position_of(&Point::xy(4.0, 3.0), EPS), Position::Along);

        let disc = half_disc();
        assert_eq!(disc.position_of(&Point::xy(0.0, -0.5), EPS), Position::Inside);
        assert_eq!(disc.position_of(&Point::xy(0.0, 0.5), EPS), Position::Outside);
        assert_eq!(disc.position_of(&Point::xy(0.0, -1.0), EPS), Position::Along);
    }

    #[test]
    fn concave_vertex_on_ray() {
        // An L shape whose reflex corner is easily hit by a diagonal ray.
        let l = Polygon::from_points([
            Point::xy(0.0, 0.0),
            Point::xy(4.0, 0.0),
            Point::xy(4.0, 2.0),
            Point::xy(2.0, 2.0),
            Point::xy(2.0, 4.0),
            Point::xy(0.0, 4.0),
        ]);
        assert_eq!(l.position_of(&Point::xy(1.0, 1.0), EPS), Position::Inside);
        assert_eq!(l.position_of(&Point::xy(3.0, 3.0), EPS), Position::Outside);
        assert_eq!(l.position_of(&Point::xy(1.0, 3.0), EPS), Position::Inside);
    }

    #[test]
    fn trace_wraps_and_clamps() {
        let sq = square(0.0, 0.0, 2.0);
        let (p, k) = sq.trace_perimeter(3.0).unwrap();
        assert!(p.is_equal(&Point::xy(2.0, 1.0), 1e-12));
        assert_eq!(k, 1);
        let (p, k) = sq.trace_perimeter(9.0).unwrap();
        assert!(p.is_equal(&Point::xy(1.0, 0.0), 1e-12));
        assert_eq!(k, 0);
        let mut open = sq.clone();
        open.set_closed(false);
        let (p, k) = open.trace_perimeter(100.0).unwrap();
        assert!(p.is_equal(&Point::xy(0.0, 2.0), 1e-12));
        assert_eq!(k, 2);
        assert_relative_eq!(sq.perimeter(), 8.0);
    }

    #[test]
    fn internal_point_avoids_hole() {
        let mut outer = square(0.0, 0.0, 10.0);
        outer.add_hole(square(2.0, 2.0, 6.0));
        let p = outer.internal_point(EPS).unwrap();
        assert_eq!(outer.position_of(&p, EPS), Position::Inside);
        assert!(outer.encloses_point(&Point::xy(0.0, 5.0), EPS));
    }

    #[test]
    fn enclosure() {
        let big = square(0.0, 0.0, 10.0);
        let small = square(2.0, 2.0, 2.0);
        let straddling = square(8.0, 8.0, 4.0);
        assert!(big.encloses(&small, EPS));
        assert!(!small.encloses(&big, EPS));
        assert!(!big.encloses(&straddling, EPS));
        assert!(big.encloses(&big.clone(), EPS));

        let mut holed = big.clone();
        holed.add_hole(square(1.0, 1.0, 4.0));
        assert!(!holed.encloses(&small, EPS));
    }

    #[test]
    fn overlap_and_touch() {
        let t = triangle();
        let mut moved = t.clone();
        moved.translate(&crate::math::Vector3::new(1.0, 1.0, 0.0));
        assert_ne!(moved, t);
        assert!(t.overlaps(&moved, EPS));
        assert!(square(0.0, 0.0, 4.0).overlaps(&square(2.0, 2.0, 4.0), EPS));
        assert!(!square(0.0, 0.0, 1.0).overlaps(&square(3.0, 0.0, 1.0), EPS));

        // A cross: neither holds a vertex of the other.
        let wide = Polygon::from_points([Point::xy(0.0, 2.0), Point::xy(6.0, 2.0), Point::xy(6.0, 4.0), Point::xy(0.0, 4.0)]);
        let tall = Polygon::from_points([Point::xy(2.0, 0.0), Point::xy(4.0, 0.0), Point::xy(4.0, 6.0), Point::xy(2.0, 6.0)]);
        assert!(wide.overlaps(&tall, EPS));
    }

    #[test]
    fn strict_validity() {
        assert!(square(0.0, 0.0, 1.0).is_valid_strict());
        let bowtie = Polygon::from_points([Point::xy(0.0, 0.0), Point::xy(4.0, 4.0), Point::xy(0.0, 4.0), Point::xy(4.0, 0.0)]);
        assert!(bowtie.is_valid());
        assert!(!bowtie.is_valid_strict());
        assert!(!Polygon::from_points([Point::xy(0.0, 0.0), Point::xy(1.0, 0.0)]).is_valid());
    }
}
