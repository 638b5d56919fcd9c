use tracing::{debug, instrument, warn};

use super::intersect::intersect_edges;
use super::{PolyEdge, Polygon, Rotation};
use crate::geometry::Point;
use crate::intersect::{PositionMask, XList};

/// A point where edge `first` meets the later, non-neighbouring part of edge `second`.
struct Crossing {
    first: usize,
    second: usize,
    point: Point,
}

/// The first contact between two edges that is not the vertex they share.
fn find_crossing(polygon: &Polygon, prec: f64) -> Option<Crossing> {
    let edges: Vec<PolyEdge> = polygon.edges().collect();
    let n = edges.len();
    for i in 0..n {
        for j in i + 1..n {
            let mut shared = Vec::with_capacity(2);
            if j == i + 1 {
                shared.push(edges[i].end.point);
            }
            if i == 0 && j == n - 1 {
                shared.push(edges[i].origin);
            }
            let mut list = XList::with_masks(PositionMask::WITHIN, PositionMask::WITHIN);
            intersect_edges(&mut list, &edges[i], &edges[j], prec);
            list.remove_duplicates(prec);
            let hit = list
                .iter()
                .find(|x| !shared.iter().any(|s| s.is_equal_2d(&x.point, prec)));
            if let Some(x) = hit {
                return Some(Crossing {
                    first: i,
                    second: j,
                    point: x.point,
                });
            }
        }
    }
    None
}

/// Splits `polygon` into two loops at `crossing`, or `None` if no vertex
/// could be placed there.
fn split_at(mut polygon: Polygon, crossing: &Crossing, prec: f64) -> Option<(Polygon, Polygon)> {
    let first_id = polygon.vertices()[crossing.first].id;
    let second_id = polygon.vertices()[crossing.second].id;
    // The later edge goes first so the earlier one keeps its index.
    let b = polygon.insert_after_id(0, second_id, &crossing.point, prec)?;
    let a = polygon.insert_after_id(0, first_id, &crossing.point, prec)?;
    let index = |id: u32| polygon.vertices().iter().position(|v| v.id == id);
    let (mut a, mut b) = (index(a)?, index(b)?);
    if a == b {
        return None;
    }
    if a > b {
        std::mem::swap(&mut a, &mut b);
    }
    let vertices = polygon.vertices();
    let inner = vertices[a + 1..=b].to_vec();
    let outer = vertices[b + 1..].iter().chain(&vertices[..=a]).copied().collect();
    Some((Polygon::from_vertices(inner), Polygon::from_vertices(outer)))
}

impl Polygon {
    /// Breaks a self-crossing polygon into simple pieces.
    ///
    /// The outer boundary is cut at each crossing in turn until no crossing
    /// remains; pieces of negligible area are dropped. Holes are resolved the
    /// same way and then cut out of every piece. Pieces run the way the
    /// original did, or anticlockwise if it had no direction.
    #[instrument(level = "debug", skip_all, fields(vertices = self.len(), holes = self.hole_count()))]
    #[must_use]
    pub fn resolve_self_intersect(&self, prec: f64) -> Vec<Polygon> {
        if !self.is_valid() || !self.is_closed() {
            return Vec::new();
        }
        let rotation = self.direction().unwrap_or(Rotation::Anticlockwise);
        let mut outer = self.clone();
        let holes = outer.release_holes();
        outer.renumber(false);
        outer.remove_duplicates_2d(prec);

        let mut budget = self.len() * self.len();
        let mut pending = vec![outer];
        let mut pieces = Vec::new();
        // Lobes of a crossing boundary can cancel out, so only finished
        // pieces are judged by their area.
        let is_piece = |p: &Polygon| p.area(false, false) >= 10.0 * prec;
        while let Some(polygon) = pending.pop() {
            if !polygon.is_valid() {
                continue;
            }
            if budget == 0 {
                warn!(remaining = pending.len() + 1, "self-intersection budget exhausted; pieces left unresolved");
                pending.push(polygon);
                pieces.extend(pending.drain(..).filter(|p| p.is_valid() && is_piece(p)));
                break;
            }
            let split = find_crossing(&polygon, prec).and_then(|c| split_at(polygon.clone(), &c, prec));
            match split {
                Some((first, second)) => {
                    budget -= 1;
                    pending.push(first);
                    pending.push(second);
                }
                None if is_piece(&polygon) => pieces.push(polygon),
                None => {}
            }
        }

        for hole in holes {
            for resolved in hole.resolve_self_intersect(prec) {
                pieces = pieces
                    .iter()
                    .flat_map(|piece| piece.split_with_polygon(&resolved, prec).outside)
                    .collect();
            }
        }
        for piece in &mut pieces {
            piece.set_direction(rotation, true);
            piece.renumber(false);
        }
        debug!(pieces = pieces.len(), "self-intersection resolved");
        pieces
    }
}
