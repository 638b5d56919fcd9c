//! Intersections between lines and arcs.
//!
//! Every function offers its candidate points to an [`XList`] through
//! [`create_intersect`]; the first entity plays the target role and the second
//! the blade (exchanged if the list's filters are swapped). The `_2d` variants
//! work on XY projections; the `_3d` variants handle entities in different
//! planes.

use super::{Position, XList, XPoint};
use crate::geometry::{Arc, Curve, Line, Point};
use crate::math::{VectorExt, EPS};

/// Classifies `point` with one closure per role and offers it to `list`.
pub fn create_intersect(
    list: &mut XList,
    point: Point,
    target: impl Fn(&Point) -> Position,
    blade: impl Fn(&Point) -> Position,
) -> bool {
    let x = XPoint::with_positions(point, target(&point), blade(&point));
    list.insert(x)
}

/// Number of points kept.
pub fn line_with_line_2d(list: &mut XList, a: &Line, b: &Line, prec: f64) -> usize {
    let (Some(ea), Some(eb)) = (a.equation(), b.equation()) else {
        return 0;
    };
    let classify_a = |p: &Point| a.position_of_2d(p, prec);
    let classify_b = |p: &Point| b.position_of_2d(p, prec);
    match ea.intersection_with(&eb) {
        Some(x) => usize::from(create_intersect(list, a.closest_point_to_2d(&x), classify_a, classify_b)),
        None => {
            if ea.length_to(&b.origin) > prec {
                return 0;
            }
            // Collinear: the overlap, if any, is bounded by endpoints.
            [a.origin, a.end, b.origin, b.end]
                .into_iter()
                .filter(|p| create_intersect(list, *p, classify_a, classify_b))
                .count()
        }
    }
}

pub fn line_with_arc_2d(list: &mut XList, line: &Line, arc: &Arc, prec: f64) -> usize {
    let flat_line = Line::new(line.origin.with_z(0.0), line.end.with_z(0.0));
    let Some(flat_arc) = flatten(arc) else {
        return 0;
    };
    flat_arc
        .line_crossings(&flat_line, prec)
        .into_iter()
        .filter(|p| {
            let p = line.closest_point_to_2d(p);
            create_intersect(list, p, |q| line.position_of_2d(q, prec), |q| arc.position_of_2d(q, prec))
        })
        .count()
}

pub fn arc_with_line_2d(list: &mut XList, arc: &Arc, line: &Line, prec: f64) -> usize {
    list.swap_filters();
    let count = line_with_arc_2d(list, line, arc, prec);
    list.swap_filters();
    count
}

pub fn arc_with_arc_2d(list: &mut XList, a: &Arc, b: &Arc, prec: f64) -> usize {
    let (Some(fa), Some(fb)) = (flatten(a), flatten(b)) else {
        return 0;
    };
    let classify_a = |p: &Point| a.position_of_2d(p, prec);
    let classify_b = |p: &Point| b.position_of_2d(p, prec);
    if fa.centre().is_equal_2d(fb.centre(), prec) {
        if (a.radius() - b.radius()).abs() > prec {
            return 0;
        }
        // Same circle: any overlap is bounded by endpoints.
        return [a.start_point(), a.end_point(), b.start_point(), b.end_point()]
            .into_iter()
            .filter(|p| create_intersect(list, p.with_z(a.centre().z), classify_a, classify_b))
            .count();
    }
    fa.circle_crossings(&fb, prec)
        .into_iter()
        .filter(|p| create_intersect(list, p.with_z(a.centre().z), classify_a, classify_b))
        .count()
}

/// 3D crossing of two coplanar lines.
pub fn line_with_line_3d(list: &mut XList, a: &Line, b: &Line, prec: f64) -> usize {
    a.intersection_with_3d(b, prec).map_or(0, |x| {
        usize::from(create_intersect(
            list,
            x,
            |p| a.position_of_3d(p, prec),
            |p| b.position_of_3d(p, prec),
        ))
    })
}

/// 3D line/arc crossing; handles lines outside the arc's plane.
pub fn line_with_arc_3d(list: &mut XList, line: &Line, arc: &Arc, prec: f64) -> usize {
    arc.line_crossings(line, prec)
        .into_iter()
        .filter(|p| {
            create_intersect(list, *p, |q| line.position_of_3d(q, prec), |q| arc.position_of_3d(q, prec))
        })
        .count()
}

/// 3D arc/arc crossing; arcs in different planes meet on the planes' common line.
pub fn arc_with_arc_3d(list: &mut XList, a: &Arc, b: &Arc, prec: f64) -> usize {
    a.circle_crossings(b, prec)
        .into_iter()
        .filter(|p| create_intersect(list, *p, |q| a.position_of_3d(q, prec), |q| b.position_of_3d(q, prec)))
        .count()
}

/// The XY projection of a horizontal arc, or `None` for a tilted one.
fn flatten(arc: &Arc) -> Option<Arc> {
    if !arc.normal().is_parallel(&crate::math::Vector3::z(), EPS) {
        return None;
    }
    Arc::new(
        arc.centre().with_z(0.0),
        arc.radius(),
        arc.start_angle(),
        arc.sweep(),
        arc.normal(),
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI, TAU};

    use super::*;
    use crate::intersect::{PositionMask, Role};

    fn within() -> XList {
        XList::with_masks(PositionMask::WITHIN, PositionMask::WITHIN)
    }

    #[test]
    fn crossing_segments() {
        let mut list = within();
        let a = Line::new(Point::xy(0.0, 0.0), Point::xy(4.0, 4.0));
        let b = Line::new(Point::xy(0.0, 4.0), Point::xy(4.0, 0.0));
        assert_eq!(line_with_line_2d(&mut list, &a, &b, EPS), 1);
        let x = list.get(0).unwrap();
        assert!(x.point.is_equal(&Point::xy(2.0, 2.0), 1e-9));
        assert_eq!(x.position(Role::Target), Position::Along);
    }

    #[test]
    fn touching_and_missing_segments() {
        let a = Line::new(Point::xy(0.0, 0.0), Point::xy(4.0, 0.0));
        let touch = Line::new(Point::xy(4.0, 0.0), Point::xy(4.0, 3.0));
        let miss = Line::new(Point::xy(5.0, -1.0), Point::xy(5.0, 1.0));
        let mut list = within();
        assert_eq!(line_with_line_2d(&mut list, &a, &touch, EPS), 1);
        assert_eq!(list.get(0).unwrap().position(Role::Target), Position::End);
        assert_eq!(list.get(0).unwrap().position(Role::Blade), Position::Origin);
        assert_eq!(line_with_line_2d(&mut list, &a, &miss, EPS), 0);
    }

    #[test]
    fn collinear_overlap_reports_bounds() {
        let a = Line::new(Point::xy(0.0, 0.0), Point::xy(4.0, 0.0));
        let b = Line::new(Point::xy(2.0, 0.0), Point::xy(6.0, 0.0));
        let mut list = within();
        assert_eq!(line_with_line_2d(&mut list, &a, &b, EPS), 2);
        list.sort_by_coordinates(EPS);
        assert!(list.get(0).unwrap().point.is_equal(&Point::xy(2.0, 0.0), EPS));
        assert!(list.get(1).unwrap().point.is_equal(&Point::xy(4.0, 0.0), EPS));
    }

    #[test]
    fn line_through_semicircle() {
        let arc = Arc::new_2d(Point::xy(0.0, 0.0), 1.0, 0.0, PI).unwrap();
        let line = Line::new(Point::xy(-2.0, 0.5), Point::xy(2.0, 0.5));
        let mut list = within();
        assert_eq!(line_with_arc_2d(&mut list, &line, &arc, EPS), 2);

        let below = Line::new(Point::xy(-2.0, -0.5), Point::xy(2.0, -0.5));
        let mut list = within();
        assert_eq!(line_with_arc_2d(&mut list, &below, &arc, EPS), 0);

        let mut any = XList::new();
        assert_eq!(arc_with_line_2d(&mut any, &arc, &below, EPS), 2);
        assert_eq!(any.get(0).unwrap().position(Role::Target), Position::Radial);
    }

    #[test]
    fn overlapping_circles() {
        let a = Arc::new_2d(Point::xy(0.0, 0.0), 1.0, 0.0, TAU).unwrap();
        let b = Arc::new_2d(Point::xy(1.0, 0.0), 1.0, FRAC_PI_2, PI).unwrap();
        let mut list = within();
        assert_eq!(arc_with_arc_2d(&mut list, &a, &b, EPS), 2);

        let same = Arc::new_2d(Point::xy(0.0, 0.0), 1.0, FRAC_PI_2, PI).unwrap();
        let quarter = Arc::new_2d(Point::xy(0.0, 0.0), 1.0, 0.0, PI).unwrap();
        let mut list = within();
        assert!(arc_with_arc_2d(&mut list, &quarter, &same, EPS) >= 2);
        assert!(list.iter().any(|x| x.point.is_equal(&quarter.end_point(), 1e-9)));
    }

    #[test]
    fn pierce_tilted_arc() {
        let wall = Arc::new(Point::xy(0.0, 0.0), 1.0, 0.0, TAU, &crate::math::Vector3::y()).unwrap();
        let line = Line::new(Point::new(0.0, -1.0, 1.0), Point::new(0.0, 1.0, 1.0));
        let mut list = XList::with_masks(PositionMask::ANY, PositionMask::WITHIN);
        assert_eq!(line_with_arc_3d(&mut list, &line, &wall, EPS), 1);
        assert!(list.get(0).unwrap().point.is_equal(&Point::new(0.0, 0.0, 1.0), 1e-9));

        let floor = Arc::new_2d(Point::xy(0.0, 0.0), 1.0, 0.0, TAU).unwrap();
        let mut list = within();
        assert_eq!(arc_with_arc_3d(&mut list, &floor, &wall, EPS), 2);
    }
}
