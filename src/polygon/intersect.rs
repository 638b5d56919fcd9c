use super::{PolyEdge, PolyPoint, Polygon};
use crate::geometry::{Arc, Line, LinearEquation, Point};
use crate::intersect::engine::{arc_with_arc_2d, arc_with_line_2d, line_with_arc_2d, line_with_line_2d};
use crate::intersect::{Position, Role, XList, XPoint};

/// Offers the crossings of two polygon edges to `list`; `a` is the target.
pub(crate) fn intersect_edges(list: &mut XList, a: &PolyEdge, b: &PolyEdge, prec: f64) -> usize {
    match (a.as_arc(), b.as_arc()) {
        (None, None) => line_with_line_2d(list, &a.as_line(), &b.as_line(), prec),
        (None, Some(arc)) => line_with_arc_2d(list, &a.as_line(), &arc, prec),
        (Some(arc), None) => arc_with_line_2d(list, &arc, &b.as_line(), prec),
        (Some(x), Some(y)) => arc_with_arc_2d(list, &x, &y, prec),
    }
}

/// Whether a boundary merely touches `blade` at `at` instead of crossing it,
/// judged from the midpoints of the edges arriving at and leaving `at`.
///
/// Runs lying along the blade on both sides are reflections. Edges staying
/// on one side reflect for outer boundaries but not for holes. With one edge
/// along the blade, the contact reflects when the boundary turns inwards:
/// right for an outer boundary, left for a hole.
pub(crate) fn is_line_reflection(
    before: &Point,
    at: &Point,
    after: &Point,
    blade: &LinearEquation,
    is_hole: bool,
    prec: f64,
) -> bool {
    let side_before = blade.position_of(before, prec);
    let side_after = blade.position_of(after, prec);
    match (side_before, side_after) {
        (Position::Along, Position::Along) => true,
        (Position::Along, _) | (_, Position::Along) => {
            let Some(turn) = LinearEquation::from_points(before, at) else {
                return false;
            };
            let inner = if is_hole { Position::Left } else { Position::Right };
            turn.position_of(after, prec) == inner
        }
        (a, b) => a == b && !is_hole,
    }
}

impl Polygon {
    /// Offers every crossing of this polygon's edges (target) with `line`
    /// (blade) to `list`, tagged with the edge index and part.
    pub fn intersections_with_line(&self, list: &mut XList, line: &Line, prec: f64) -> usize {
        self.for_each_edge(list, |list, edge| match edge.as_arc() {
            Some(arc) => arc_with_line_2d(list, &arc, line, prec),
            None => line_with_line_2d(list, &edge.as_line(), line, prec),
        })
    }

    /// As [`Polygon::intersections_with_line`] for an arc blade.
    pub fn intersections_with_arc(&self, list: &mut XList, arc: &Arc, prec: f64) -> usize {
        self.for_each_edge(list, |list, edge| match edge.as_arc() {
            Some(own) => arc_with_arc_2d(list, &own, arc, prec),
            None => line_with_arc_2d(list, &edge.as_line(), arc, prec),
        })
    }

    /// As [`Polygon::intersections_with_line`] for an edge blade.
    pub fn intersections_with_edge(&self, list: &mut XList, blade: &PolyEdge, prec: f64) -> usize {
        self.for_each_edge(list, |list, edge| intersect_edges(list, edge, blade, prec))
    }

    /// Offers every crossing between the edges of both polygons, holes
    /// included, tagging each role with its edge index and part.
    pub fn intersections_with_polygon(&self, list: &mut XList, blade: &Polygon, prec: f64) -> usize {
        let mut count = 0;
        for (q, blade_part) in blade.parts().enumerate() {
            for (m, blade_edge) in blade_part.edges().enumerate() {
                list.set_source(Role::Blade, Some(m as u32), Some(q as u32));
                count += self.intersections_with_edge(list, &blade_edge, prec);
            }
        }
        list.set_source(Role::Blade, None, None);
        count
    }

    fn for_each_edge(&self, list: &mut XList, mut offer: impl FnMut(&mut XList, &PolyEdge) -> usize) -> usize {
        let mut count = 0;
        for (p, part) in self.parts().enumerate() {
            for (k, edge) in part.edges().enumerate() {
                list.set_source(Role::Target, Some(k as u32), Some(p as u32));
                count += offer(list, &edge);
            }
        }
        list.set_source(Role::Target, None, None);
        count
    }

    /// Rewrites the `role` side of every intersection from an edge index to a
    /// vertex id, inserting a vertex wherever the point lies along an edge.
    ///
    /// Afterwards each intersection sits on the vertex it names, with
    /// position `Origin`.
    pub(crate) fn insert_intersection_vertices(&mut self, list: &mut XList, role: Role, prec: f64) {
        // Edge indices shift as vertices go in, so pin them to ids first.
        for x in list.iter_mut() {
            let (Some(part), Some(k)) = (x.part(role), x.vertex(role)) else {
                continue;
            };
            let Some(polygon) = self.part(part as usize) else {
                continue;
            };
            let k = k as isize;
            let at = if x.position(role) == Position::End { k + 1 } else { k };
            x.set_vertex(role, polygon.vertex(at).map(|v| v.id));
        }
        list.remove_duplicates(prec);
        for x in list.iter_mut() {
            let (Some(part), Some(id)) = (x.part(role), x.vertex(role)) else {
                continue;
            };
            if x.position(role).is_vertex() {
                x.set_position(role, Position::Origin);
                continue;
            }
            if let Some(id) = self.insert_after_id(part as usize, id, &x.point, prec) {
                x.set_vertex(role, Some(id));
                x.set_position(role, Position::Origin);
            }
        }
    }

    /// Places a vertex at `p` on the first edge at or after vertex `from` that
    /// holds it, reusing a vertex already there. Returns the vertex's id.
    pub(super) fn insert_after_id(&mut self, part: usize, from: u32, p: &Point, prec: f64) -> Option<u32> {
        let polygon = self.part(part)?;
        let start = polygon.vertices().iter().position(|v| v.id == from)?;
        let count = polygon.edge_count();
        let mut found = None;
        for step in 0..count {
            let k = (start + step) % polygon.len();
            let edge = polygon.edge(k)?;
            match edge.position_of_2d(p, prec) {
                Position::Origin => return Some(polygon.vertices()[k].id),
                Position::End => return polygon.vertex(k as isize + 1).map(|v| v.id),
                Position::Along => {
                    found = Some((k, edge));
                    break;
                }
                _ => {}
            }
        }
        let (k, mut edge) = found?;
        let offcut = edge.split(p, prec)?;
        let id = self.allocate_id();
        let polygon = self.part_mut(part)?;
        let n = polygon.len();
        polygon.vertices[(k + 1) % n].sweep = offcut.end.sweep;
        polygon.vertices.insert(k + 1, PolyPoint::new(edge.end.point, edge.end.sweep, id));
        Some(id)
    }

    /// Intersects this polygon (target) with `blade`, inserting a vertex into
    /// each boundary wherever they cross along an edge.
    ///
    /// `list` receives one entry per contact, both roles naming the vertex id
    /// at the contact. Contacts where the blade only touches the target are
    /// dropped. Returns whether the two outer boundaries meet.
    pub fn intersect_poly_with_poly(&mut self, blade: &mut Polygon, list: &mut XList, prec: f64) -> bool {
        self.collect_poly_contacts(blade, list, prec);
        list.retain(|x| !blade.is_polygon_reflection(x, self, prec));
        list.iter()
            .any(|x| x.part(Role::Target) == Some(0) && x.part(Role::Blade) == Some(0))
    }

    /// Enumerates, deduplicates and pins the contacts of two polygons, keeping
    /// reflections.
    pub(crate) fn collect_poly_contacts(&mut self, blade: &mut Polygon, list: &mut XList, prec: f64) {
        self.intersections_with_polygon(list, blade, prec);
        list.remove_duplicates(prec);
        self.insert_intersection_vertices(list, Role::Target, prec);
        blade.insert_intersection_vertices(list, Role::Blade, prec);
    }

    /// Whether the blade boundary (this polygon) only touches `target` at `x`:
    /// the blade edges either side of the contact are both inside the target,
    /// or both not inside.
    fn is_polygon_reflection(&self, x: &XPoint, target: &Polygon, prec: f64) -> bool {
        let (Some(part), Some(id)) = (x.part(Role::Blade), x.vertex(Role::Blade)) else {
            return false;
        };
        let Some(polygon) = self.part(part as usize) else {
            return false;
        };
        let Some(at) = polygon.vertices().iter().position(|v| v.id == id) else {
            return false;
        };
        let n = polygon.len();
        let (Some(before), Some(after)) = (polygon.edge((at + n - 1) % n), polygon.edge(at)) else {
            return false;
        };
        let inside = |e: &PolyEdge| target.position_of(&e.midpoint(), prec) == Position::Inside;
        inside(&before) == inside(&after)
    }

    /// Intersects this polygon with `line`, inserting a vertex wherever the
    /// line crosses along an edge and dropping contacts where the boundary
    /// only touches the line. Returns the number of contacts kept.
    pub fn intersect_with_line(&mut self, line: &Line, list: &mut XList, prec: f64) -> usize {
        let Some(eq) = line.equation() else {
            return 0;
        };
        self.intersections_with_line(list, line, prec);
        list.remove_duplicates(prec);
        self.insert_intersection_vertices(list, Role::Target, prec);
        list.retain(|x| {
            let (Some(part), Some(id)) = (x.part(Role::Target), x.vertex(Role::Target)) else {
                return true;
            };
            let Some(polygon) = self.part(part as usize) else {
                return true;
            };
            polygon
                .vertices()
                .iter()
                .position(|v| v.id == id)
                .map_or(true, |at| !polygon.is_reflection_at(at, &eq, polygon.is_hole(), prec))
        });
        list.len()
    }
}
