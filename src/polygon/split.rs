use std::collections::HashSet;

use tracing::{debug, instrument};

use super::assemble::{build_polygons, chain_loops, cut_boundary, Fragment};
use super::select::{classify_fragment, select_fragments, FragmentClass, Region};
use super::{PolyPoint, Polygon, Rotation};
use crate::geometry::Line;
use crate::intersect::{Position, PositionMask, Role, XList};
use crate::math::{Vector3, VectorExt};

/// The pieces of a polygon either side of a line.
///
/// `left` lies left of the line's direction once that direction is turned to
/// point rightwards (positive x, or straight up for a vertical line).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineSplit {
    pub left: Vec<Polygon>,
    pub right: Vec<Polygon>,
}

/// The pieces of a polygon inside and outside a blade polygon.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PolygonSplit {
    pub inside: Vec<Polygon>,
    pub outside: Vec<Polygon>,
}

/// Ids of the vertices sitting on a contact, per part.
fn contact_ids(list: &XList, role: Role, parts: usize) -> Vec<HashSet<u32>> {
    let mut ids = vec![HashSet::new(); parts];
    for x in list {
        if let (Some(part), Some(id)) = (x.part(role), x.vertex(role)) {
            if let Some(set) = ids.get_mut(part as usize) {
                set.insert(id);
            }
        }
    }
    ids
}

/// Every part of `polygon` cut at its contact vertices.
fn fragments_of(polygon: &Polygon, cuts: &[HashSet<u32>]) -> Vec<Fragment> {
    polygon
        .parts()
        .zip(cuts)
        .flat_map(|(part, ids)| cut_boundary(part, ids))
        .collect()
}

/// A working copy with its material on the right: outer boundary clockwise,
/// holes anticlockwise.
fn material_right(polygon: &Polygon) -> Polygon {
    let mut copy = polygon.clone();
    copy.set_direction(Rotation::Clockwise, true);
    copy.renumber(false);
    copy
}

impl Polygon {
    /// Cuts the polygon along the infinite carrier of `line`.
    ///
    /// Holes the line misses end up in whichever piece encloses them. An
    /// invalid polygon or a line without XY extent yields nothing.
    #[instrument(level = "debug", skip_all, fields(vertices = self.len(), holes = self.hole_count()))]
    #[must_use]
    pub fn split_with_line(&self, line: &Line, prec: f64) -> LineSplit {
        let (Some(bounds), Some(dir)) = (self.bounds(), line.direction().unit()) else {
            return LineSplit::default();
        };
        if !self.is_valid() || !self.is_closed() || dir.x.hypot(dir.y) <= prec {
            return LineSplit::default();
        }
        let dir = Vector3::new(dir.x, dir.y, 0.0).normalize();
        let dir = if dir.x > prec || (dir.x.abs() <= prec && dir.y > 0.0) { dir } else { -dir };

        let mut target = material_right(self);
        let reach = bounds.diagonal() + line.origin.length_from_2d(&bounds.centre()) + 1.0;
        let blade = Line::new(line.origin - dir * reach, line.origin + dir * reach);
        let Some(blade_eq) = blade.equation() else {
            return LineSplit::default();
        };

        let mut list = XList::with_masks(PositionMask::WITHIN, PositionMask::ANY);
        target.intersections_with_line(&mut list, &blade, prec);
        list.remove_duplicates(prec);
        target.insert_intersection_vertices(&mut list, Role::Target, prec);
        list.sort_along_line(&blade);
        debug!(contacts = list.len(), "line contacts");

        let cuts = contact_ids(&list, Role::Target, target.hole_count() + 1);
        let mut left = Vec::new();
        let mut right = Vec::new();
        for fragment in fragments_of(&target, &cuts) {
            let Some((mid, tangent)) = fragment.midpoint() else {
                continue;
            };
            match blade_eq.position_of(&mid, prec) {
                Position::Left => left.push(fragment),
                Position::Right => right.push(fragment),
                // Runs along the line bound the side their material is on.
                _ if tangent.dot(&dir) > 0.0 => right.push(fragment),
                _ => left.push(fragment),
            }
        }

        let contacts: Vec<PolyPoint> = list
            .iter()
            .map(|x| PolyPoint::from(x.point))
            .fold(Vec::new(), |mut acc, p| {
                if acc.last().map_or(true, |q: &PolyPoint| !q.is_equal_2d(&p, prec)) {
                    acc.push(p);
                }
                acc
            });
        for pair in contacts.windows(2) {
            if target.position_of(&pair[0].midpoint(&pair[1]), prec) == Position::Inside {
                right.push(Fragment::chord(pair[0], pair[1]));
                left.push(Fragment::chord(pair[1], pair[0]));
            }
        }

        let split = LineSplit {
            left: build_polygons(chain_loops(&left, prec), prec),
            right: build_polygons(chain_loops(&right, prec), prec),
        };
        debug!(left = split.left.len(), right = split.right.len(), "line split done");
        split
    }

    /// Splits the polygon into the parts inside and outside `blade`.
    ///
    /// The blade's holes count as outside it. If either polygon is invalid,
    /// the whole target is returned as outside.
    #[instrument(level = "debug", skip_all, fields(vertices = self.len(), blade_vertices = blade.len()))]
    #[must_use]
    pub fn split_with_polygon(&self, blade: &Polygon, prec: f64) -> PolygonSplit {
        if !self.is_valid() || !self.is_closed() {
            return PolygonSplit::default();
        }
        if !blade.is_valid() || !blade.is_closed() {
            return PolygonSplit {
                inside: Vec::new(),
                outside: vec![self.clone()],
            };
        }
        let mut shell = blade.clone();
        let blade_holes = shell.release_holes();
        let (mut inside, mut outside) = split_by_boundary(self, &shell, prec);
        for hole in blade_holes {
            let mut kept = Vec::new();
            for piece in inside {
                let (in_hole, clear) = split_by_boundary(&piece, &hole, prec);
                outside.extend(in_hole);
                kept.extend(clear);
            }
            inside = kept;
        }
        debug!(inside = inside.len(), outside = outside.len(), "polygon split done");
        PolygonSplit { inside, outside }
    }
}

/// Splits `target` by the outer boundary of `blade`.
fn split_by_boundary(target: &Polygon, blade: &Polygon, prec: f64) -> (Vec<Polygon>, Vec<Polygon>) {
    let mut target = material_right(target);
    let mut blade = material_right(blade);
    blade.release_holes();

    let mut list = XList::with_masks(PositionMask::WITHIN, PositionMask::WITHIN);
    target.collect_poly_contacts(&mut blade, &mut list, prec);
    debug!(contacts = list.len(), "polygon contacts");

    let target_cuts = contact_ids(&list, Role::Target, target.hole_count() + 1);
    let blade_cuts = contact_ids(&list, Role::Blade, 1);
    let mut classified: Vec<(Role, FragmentClass, Fragment)> = fragments_of(&target, &target_cuts)
        .into_iter()
        .map(|f| (Role::Target, classify_fragment(&f, &blade, prec), f))
        .collect();
    classified.extend(
        fragments_of(&blade, &blade_cuts)
            .into_iter()
            .map(|f| (Role::Blade, classify_fragment(&f, &target, prec), f)),
    );

    let inside = select_fragments(&classified, Region::Inside);
    let outside = select_fragments(&classified, Region::Outside);
    (
        build_polygons(chain_loops(&inside, prec), prec),
        build_polygons(chain_loops(&outside, prec), prec),
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::geometry::Point;
    use crate::math::EPS;
    use crate::polygon::tests::square;

    fn total_area(polygons: &[Polygon]) -> f64 {
        polygons.iter().map(|p| p.area(true, false)).sum()
    }

    #[test]
    fn square_by_diagonal() {
        let sq = square(0.0, 0.0, 10.0);
        let split = sq.split_with_line(&Line::new(Point::xy(0.0, 0.0), Point::xy(10.0, 10.0)), EPS);
        assert_eq!(split.left.len(), 1);
        assert_eq!(split.right.len(), 1);
        assert_relative_eq!(split.left[0].area(true, false), 50.0, epsilon = 1e-9);
        assert_relative_eq!(split.right[0].area(true, false), 50.0, epsilon = 1e-9);
        assert!(split.left[0].encloses_point(&Point::xy(2.0, 8.0), EPS));
        assert_eq!(split.left[0].direction(), Some(Rotation::Anticlockwise));
    }

    #[test]
    fn reversed_line_gives_same_sides() {
        let sq = square(0.0, 0.0, 10.0);
        let split = sq.split_with_line(&Line::new(Point::xy(10.0, 4.0), Point::xy(0.0, 4.0)), EPS);
        assert_relative_eq!(total_area(&split.left), 60.0, epsilon = 1e-9);
        assert_relative_eq!(total_area(&split.right), 40.0, epsilon = 1e-9);
    }

    #[test]
    fn missing_line_routes_whole_polygon() {
        let sq = square(0.0, 0.0, 2.0);
        let split = sq.split_with_line(&Line::new(Point::xy(0.0, 5.0), Point::xy(1.0, 5.0)), EPS);
        assert!(split.left.is_empty());
        assert_eq!(split.right.len(), 1);
        assert_relative_eq!(split.right[0].area(true, false), 4.0, epsilon = 1e-9);
    }

    #[test]
    fn line_along_an_edge() {
        let sq = square(0.0, 0.0, 2.0);
        let split = sq.split_with_line(&Line::new(Point::xy(0.0, 0.0), Point::xy(2.0, 0.0)), EPS);
        assert!(split.right.is_empty());
        assert_eq!(split.left.len(), 1);
    }

    #[test]
    fn concave_cut_makes_three_pieces() {
        // A U shape cut across both arms.
        let u = Polygon::from_points([
            Point::xy(0.0, 0.0),
            Point::xy(6.0, 0.0),
            Point::xy(6.0, 6.0),
            Point::xy(4.0, 6.0),
            Point::xy(4.0, 2.0),
            Point::xy(2.0, 2.0),
            Point::xy(2.0, 6.0),
            Point::xy(0.0, 6.0),
        ]);
        let split = u.split_with_line(&Line::new(Point::xy(0.0, 4.0), Point::xy(6.0, 4.0)), EPS);
        assert_eq!(split.left.len(), 2);
        assert_eq!(split.right.len(), 1);
        assert_relative_eq!(total_area(&split.left), 8.0, epsilon = 1e-9);
        assert_relative_eq!(total_area(&split.right), 20.0, epsilon = 1e-9);
    }

    #[test]
    fn overlapping_squares() {
        let a = square(0.0, 0.0, 4.0);
        let b = square(2.0, 2.0, 4.0);
        let split = a.split_with_polygon(&b, EPS);
        assert_eq!(split.inside.len(), 1);
        assert_relative_eq!(split.inside[0].area(true, false), 4.0, epsilon = 1e-9);
        assert_eq!(split.outside.len(), 1);
        assert_relative_eq!(split.outside[0].area(true, false), 12.0, epsilon = 1e-9);
    }

    #[test]
    fn blade_inside_target_becomes_hole() {
        let a = square(0.0, 0.0, 10.0);
        let b = square(3.0, 3.0, 2.0);
        let split = a.split_with_polygon(&b, EPS);
        assert_eq!(split.inside.len(), 1);
        assert_relative_eq!(split.inside[0].area(true, false), 4.0, epsilon = 1e-9);
        assert_eq!(split.outside.len(), 1);
        assert_eq!(split.outside[0].hole_count(), 1);
        assert_relative_eq!(split.outside[0].area(true, false), 96.0, epsilon = 1e-9);
    }

    #[test]
    fn disjoint_and_enclosed_targets() {
        let a = square(0.0, 0.0, 2.0);
        let far = a.split_with_polygon(&square(5.0, 5.0, 1.0), EPS);
        assert!(far.inside.is_empty());
        assert_eq!(far.outside.len(), 1);
        let within = a.split_with_polygon(&square(-1.0, -1.0, 4.0), EPS);
        assert_eq!(within.inside.len(), 1);
        assert!(within.outside.is_empty());
    }

    #[test]
    fn blade_holes_move_material_outside() {
        let a = square(0.0, 0.0, 4.0);
        let mut blade = square(-1.0, -1.0, 6.0);
        blade.add_hole(square(1.0, 1.0, 2.0));
        let split = a.split_with_polygon(&blade, EPS);
        assert_relative_eq!(total_area(&split.inside), 12.0, epsilon = 1e-9);
        assert_relative_eq!(total_area(&split.outside), 4.0, epsilon = 1e-9);
    }
}
