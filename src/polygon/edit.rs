use super::{PolyPoint, Polygon, Rotation};
use crate::geometry::Plane;
use crate::math::{Matrix4, Vector3};
use crate::tessellation::{FacetParams, Faceter};
use crate::transform::{Level, Leveller};

impl Polygon {
    /// Reverses the traversal of the outer boundary, negating arc sweeps so
    /// every edge keeps its shape. Holes are left alone.
    pub fn reverse(&mut self) {
        let n = self.vertices.len();
        if n == 0 {
            return;
        }
        let reversed: Vec<PolyPoint> = (0..n)
            .map(|j| {
                let v = self.vertices[n - 1 - j];
                let sweep = if j == 0 && !self.is_closed {
                    0.0
                } else {
                    -self.vertices[(n - j) % n].sweep
                };
                v.with_sweep(sweep)
            })
            .collect();
        self.vertices = reversed;
    }

    /// Makes the outer boundary run in `rotation`. With `invert_holes` every
    /// hole is made to run the opposite way.
    ///
    /// Boundaries without a direction (no area) are left as they are.
    pub fn set_direction(&mut self, rotation: Rotation, invert_holes: bool) {
        if self.direction().is_some_and(|d| d != rotation) {
            self.reverse();
        }
        if invert_holes {
            for hole in &mut self.holes {
                hole.set_direction(rotation.opposite(), false);
            }
        }
    }

    /// Removes any vertex that coincides in XY with the one before it, in
    /// every part. When the last vertex meets the first, the first goes.
    pub fn remove_duplicates_2d(&mut self, prec: f64) {
        self.remove_own_duplicates_2d(prec);
        for hole in &mut self.holes {
            hole.remove_own_duplicates_2d(prec);
        }
    }

    fn remove_own_duplicates_2d(&mut self, prec: f64) {
        let mut i = 1;
        while i < self.vertices.len() {
            if self.vertices[i].is_equal_2d(&self.vertices[i - 1], prec) {
                self.vertices.remove(i);
            } else {
                i += 1;
            }
        }
        while self.is_closed
            && self.vertices.len() > 1
            && self.vertices[0].is_equal_2d(&self.vertices[self.vertices.len() - 1], prec)
        {
            self.vertices.remove(0);
        }
    }

    /// Replaces every arc edge with straight chords. New vertices get fresh
    /// ids; the vertex closing each arc keeps its own.
    pub fn facet(&mut self, params: &FacetParams) {
        let mut changed = self.facet_own(params);
        for hole in &mut self.holes {
            changed |= hole.facet_own(params);
        }
        if changed {
            self.renumber(false);
        }
    }

    fn facet_own(&mut self, params: &FacetParams) -> bool {
        let n = self.vertices.len();
        let mut faceted = Vec::with_capacity(n);
        let mut changed = false;
        for i in 0..n {
            let v = self.vertices[i];
            let arc = (i > 0 || self.is_closed)
                .then(|| self.edge((i + n - 1) % n))
                .flatten()
                .and_then(|e| e.as_arc());
            let Some(arc) = arc else {
                faceted.push(v);
                continue;
            };
            let chords = Faceter::new(arc, *params);
            let last = chords.len().saturating_sub(1);
            faceted.extend(chords.take(last).map(|p| PolyPoint::new(p, 0.0, 0)));
            faceted.push(v.with_sweep(0.0));
            changed = true;
        }
        if changed {
            self.vertices = faceted;
        }
        changed
    }

    /// Drops every vertex onto `plane`. Returns `false`, leaving the polygon
    /// untouched, when the plane is vertical.
    pub fn align_to(&mut self, plane: &Plane) -> bool {
        if plane.height_at(0.0, 0.0).is_none() {
            return false;
        }
        for v in self.vertices_mut_all() {
            if let Some(z) = plane.height_at(v.x, v.y) {
                v.z = z;
            }
        }
        true
    }

    /// Puts every vertex at height `z`.
    pub fn set_base_level(&mut self, z: f64) {
        for v in self.vertices_mut_all() {
            v.z = z;
        }
    }

    pub fn translate(&mut self, offset: &Vector3) {
        for v in self.vertices_mut_all() {
            v.point += *offset;
        }
    }

    /// Applies an affine transform to every vertex. A mirroring transform
    /// flips the sense of every arc.
    pub fn transform(&mut self, matrix: &Matrix4) {
        let mirrored = matrix.fixed_view::<3, 3>(0, 0).determinant() < 0.0;
        for v in self.vertices_mut_all() {
            v.point = v.point.transform(matrix);
            if mirrored {
                v.sweep = -v.sweep;
            }
        }
    }

    fn vertices_mut_all(&mut self) -> impl Iterator<Item = &mut PolyPoint> + '_ {
        self.vertices
            .iter_mut()
            .chain(self.holes.iter_mut().flat_map(|h| h.vertices.iter_mut()))
    }
}

impl Level for Polygon {
    fn level(&mut self, leveller: &Leveller) {
        for v in self.vertices_mut_all() {
            v.point.level(leveller);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI};

    use approx::assert_relative_eq;

    use super::*;
    use crate::geometry::Point;
    use crate::math::{matrix, EPS};
    use crate::polygon::tests::square;

    fn bulged_triangle() -> Polygon {
        Polygon::from_vertices(vec![
            PolyPoint::xy(0.0, 0.0).with_sweep(FRAC_PI_2),
            PolyPoint::xy(1.0, 0.0),
            PolyPoint::xy(0.0, 1.0),
        ])
    }

    #[test]
    fn reverse_keeps_arc_shape() {
        let mut p = Polygon::from_vertices(vec![
            PolyPoint::xy(0.0, 0.0),
            PolyPoint::xy(1.0, 0.0),
            PolyPoint::xy(0.0, 1.0).with_sweep(FRAC_PI_2),
        ]);
        let area = p.area(false, true);
        p.reverse();
        assert_relative_eq!(p.area(false, true), -area, epsilon = 1e-12);
        assert!(p.vertices()[0].point.is_equal(&Point::xy(0.0, 1.0), 0.0));
        assert_relative_eq!(p.vertices()[1].sweep, -FRAC_PI_2);
    }

    #[test]
    fn reverse_open_polyline() {
        let mut p = Polygon::from_vertices(vec![
            PolyPoint::xy(0.0, 0.0),
            PolyPoint::xy(2.0, 0.0).with_sweep(PI),
            PolyPoint::xy(3.0, 0.0),
        ]);
        p.set_closed(false);
        p.reverse();
        assert_relative_eq!(p.vertices()[0].sweep, 0.0);
        assert_relative_eq!(p.vertices()[1].sweep, 0.0);
        assert_relative_eq!(p.vertices()[2].sweep, -PI);
    }

    #[test]
    fn direction_with_holes() {
        let mut p = square(0.0, 0.0, 10.0);
        p.add_hole(square(2.0, 2.0, 2.0));
        p.set_direction(Rotation::Clockwise, true);
        assert_eq!(p.direction(), Some(Rotation::Clockwise));
        assert_eq!(p.holes()[0].direction(), Some(Rotation::Anticlockwise));
        p.set_direction(Rotation::Anticlockwise, false);
        assert_eq!(p.direction(), Some(Rotation::Anticlockwise));
        assert_eq!(p.holes()[0].direction(), Some(Rotation::Anticlockwise));
    }

    #[test]
    fn duplicates_removed_including_wrap() {
        let mut p = Polygon::from_points([
            Point::xy(0.0, 0.0),
            Point::xy(1.0, 0.0),
            Point::xy(1.0, 0.0),
            Point::xy(1.0, 1.0),
            Point::xy(0.0, 0.0),
        ]);
        let last_id = p.vertices()[4].id;
        p.remove_duplicates_2d(EPS);
        assert_eq!(p.len(), 3);
        assert_eq!(p.vertices()[2].id, last_id);
    }

    #[test]
    fn facet_bulged_triangle() {
        let mut p = bulged_triangle();
        let original = p.area(false, false);
        p.facet(&FacetParams::with_tolerance(0.01));
        assert!(p.len() > 3);
        assert!(p.vertices().iter().all(|v| !v.is_arc()));
        assert!(p.area(false, false) < original);
        assert!(original - p.area(false, false) < 0.01 * FRAC_PI_2);
        let mut ids: Vec<u32> = p.vertices().iter().map(|v| v.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), p.len());
        assert!(ids.iter().all(|&id| id > 0));
    }

    #[test]
    fn align_and_base_level() {
        let mut p = square(0.0, 0.0, 1.0);
        let tilted = Plane::from_points(&Point::new(0.0, 0.0, 1.0), &Point::new(1.0, 0.0, 2.0), &Point::new(0.0, 1.0, 1.0))
            .unwrap();
        assert!(p.align_to(&tilted));
        for v in p.vertices() {
            assert_relative_eq!(v.z, 1.0 + v.x, epsilon = 1e-9);
        }
        let vertical = Plane::new(0.0, &Vector3::x()).unwrap();
        assert!(!p.align_to(&vertical));
        p.set_base_level(3.0);
        assert!(p.vertices().iter().all(|v| v.z == 3.0));
    }

    #[test]
    fn mirror_flips_sweeps() {
        let mut p = bulged_triangle();
        let area = p.area(false, true);
        p.transform(&matrix::scaling(-1.0, 1.0, 1.0));
        assert_relative_eq!(p.area(false, true), -area, epsilon = 1e-9);
        assert_relative_eq!(p.vertices()[0].sweep, -FRAC_PI_2);
    }

    #[test]
    fn translate_moves_holes() {
        let mut p = square(0.0, 0.0, 4.0);
        p.add_hole(square(1.0, 1.0, 1.0));
        p.translate(&Vector3::new(1.0, 2.0, 3.0));
        assert!(p.holes()[0].vertices()[0].point.is_equal(&Point::new(2.0, 3.0, 3.0), 1e-12));
    }

    #[test]
    fn level_round_trip() {
        let mut p = square(0.0, 0.0, 2.0);
        let before = p.clone();
        let leveller = Leveller::new(&Vector3::new(1.0, 1.0, 1.0).normalize());
        p.level(&leveller);
        p.level(&leveller.reversed());
        for (a, b) in p.vertices().iter().zip(before.vertices()) {
            assert!(a.point.is_equal(&b.point, 1e-9));
        }
    }
}
