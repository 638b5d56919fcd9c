use std::collections::HashSet;
use std::f64::consts::PI;

use tracing::warn;

use super::{PolyEdge, PolyPoint, Polygon, Rotation};
use crate::geometry::Point;
use crate::intersect::Position;
use crate::math::Vector3;

/// An open run of boundary from one cut vertex to the next.
///
/// The first vertex's sweep is unused; each later vertex carries the sweep of
/// the edge arriving at it, as in a polygon.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Fragment {
    pub path: Vec<PolyPoint>,
}

impl Fragment {
    pub fn new(path: Vec<PolyPoint>) -> Self {
        Self { path }
    }

    /// A straight two-point fragment.
    pub fn chord(from: PolyPoint, to: PolyPoint) -> Self {
        Self::new(vec![from.with_sweep(0.0), to.with_sweep(0.0)])
    }

    pub fn start(&self) -> Option<Point> {
        self.path.first().map(|v| v.point)
    }

    pub fn end(&self) -> Option<Point> {
        self.path.last().map(|v| v.point)
    }

    pub fn edges(&self) -> impl Iterator<Item = PolyEdge> + '_ {
        self.path.windows(2).map(|w| PolyEdge::new(w[0].point, w[1]))
    }

    /// The same run traversed backwards.
    pub fn reversed(&self) -> Fragment {
        let m = self.path.len();
        let path = (0..m)
            .map(|j| {
                let v = self.path[m - 1 - j];
                let sweep = if j == 0 { 0.0 } else { -self.path[m - j].sweep };
                v.with_sweep(sweep)
            })
            .collect();
        Fragment::new(path)
    }

    /// Point halfway along the run and the direction of travel there.
    pub fn midpoint(&self) -> Option<(Point, Vector3)> {
        let total: f64 = self.edges().map(|e| e.length_2d()).sum();
        let mut remaining = total * 0.5;
        for edge in self.edges() {
            let len = edge.length_2d();
            if remaining <= len && len > 0.0 {
                let p = edge.point_at(remaining / len);
                return edge.tangent_at(&p).map(|t| (p, t));
            }
            remaining -= len;
        }
        None
    }

    fn start_tangent(&self) -> Option<Vector3> {
        self.edges().next().and_then(|e| e.start_tangent())
    }

    fn end_tangent(&self) -> Option<Vector3> {
        self.edges().last().and_then(|e| e.end_tangent())
    }
}

/// Cuts one closed boundary into fragments at the vertices whose ids are in `cuts`.
///
/// A boundary with no cut comes back whole, as a fragment that ends where it
/// starts.
pub(crate) fn cut_boundary(part: &Polygon, cuts: &HashSet<u32>) -> Vec<Fragment> {
    let n = part.len();
    if n < 2 {
        return Vec::new();
    }
    let vertices = part.vertices();
    let marks: Vec<usize> = (0..n).filter(|&i| cuts.contains(&vertices[i].id)).collect();
    if marks.is_empty() {
        let mut path = vertices.to_vec();
        path[0].sweep = 0.0;
        path.push(vertices[0]);
        return vec![Fragment::new(path)];
    }
    marks
        .iter()
        .enumerate()
        .map(|(k, &from)| {
            let to = marks[(k + 1) % marks.len()];
            let steps = if to > from { to - from } else { to + n - from };
            let mut path: Vec<PolyPoint> = (0..=steps).map(|s| vertices[(from + s) % n]).collect();
            path[0].sweep = 0.0;
            Fragment::new(path)
        })
        .collect()
}

/// Signed turn from `incoming` to `outgoing` in `(-π, π]`; negative turns right.
fn turn_angle(incoming: &Vector3, outgoing: &Vector3) -> f64 {
    let cross = incoming.x * outgoing.y - incoming.y * outgoing.x;
    let dot = incoming.x * outgoing.x + incoming.y * outgoing.y;
    let angle = cross.atan2(dot);
    if angle <= -PI + 1e-12 {
        PI
    } else {
        angle
    }
}

/// Chains fragments end to start into closed loops.
///
/// Where several fragments leave a junction, the sharpest right turn is
/// taken. Chains that cannot be closed are dropped.
pub(crate) fn chain_loops(fragments: &[Fragment], prec: f64) -> Vec<Polygon> {
    let mut used = vec![false; fragments.len()];
    let mut loops = Vec::new();
    for first in 0..fragments.len() {
        if used[first] {
            continue;
        }
        used[first] = true;
        let mut chain = fragments[first].clone();
        let Some(start) = chain.start() else {
            continue;
        };
        loop {
            let Some(end) = chain.end() else {
                break;
            };
            if chain.path.len() > 2 && end.is_equal_2d(&start, prec) {
                loops.push(close_chain(chain.path));
                break;
            }
            let incoming = chain.end_tangent();
            let next = fragments
                .iter()
                .enumerate()
                .filter(|(i, f)| !used[*i] && f.start().is_some_and(|s| s.is_equal_2d(&end, prec)))
                .min_by(|(_, a), (_, b)| {
                    let turn = |f: &Fragment| match (incoming, f.start_tangent()) {
                        (Some(i), Some(o)) => turn_angle(&i, &o),
                        _ => PI,
                    };
                    turn(a).total_cmp(&turn(b))
                })
                .map(|(i, _)| i);
            let Some(next) = next else {
                warn!(x = end.x, y = end.y, "boundary walk could not be closed; chain dropped");
                break;
            };
            used[next] = true;
            chain.path.extend_from_slice(&fragments[next].path[1..]);
        }
    }
    loops
}

/// The closed polygon of a chain whose last point repeats its first.
fn close_chain(mut path: Vec<PolyPoint>) -> Polygon {
    if let Some(last) = path.pop() {
        path[0].sweep = last.sweep;
    }
    for v in &mut path {
        v.id = 0;
    }
    Polygon::from_vertices(path)
}

/// Turns loops into polygons: clockwise loops are outer boundaries,
/// anticlockwise loops become holes of the smallest outer enclosing them.
///
/// Results run anticlockwise with clockwise holes.
pub(crate) fn build_polygons(loops: Vec<Polygon>, prec: f64) -> Vec<Polygon> {
    let mut outers = Vec::new();
    let mut holes = Vec::new();
    for l in loops {
        let area = l.area(false, true);
        if area.abs() <= prec {
            continue;
        }
        if area < 0.0 {
            outers.push(l);
        } else {
            holes.push(l);
        }
    }
    let sizes: Vec<f64> = outers.iter().map(|o| o.area(false, false)).collect();
    for hole in holes {
        let host = (0..outers.len())
            .filter(|&i| encloses_loop(&outers[i], &hole, prec))
            .min_by(|&a, &b| sizes[a].total_cmp(&sizes[b]));
        match host {
            Some(i) => outers[i].add_hole(hole),
            None => warn!(vertices = hole.len(), "hole loop has no enclosing boundary; dropped"),
        }
    }
    for outer in &mut outers {
        outer.set_direction(Rotation::Anticlockwise, true);
        outer.renumber(false);
    }
    outers
}

/// Whether the loop `hole` lies inside `outer`, judged at the first probe
/// point that is not on `outer`'s boundary.
fn encloses_loop(outer: &Polygon, hole: &Polygon, prec: f64) -> bool {
    let probes = hole
        .vertices()
        .iter()
        .map(|v| v.point)
        .chain(hole.edges().map(|e| e.midpoint()));
    for p in probes {
        match outer.position_of(&p, prec) {
            Position::Along => continue,
            position => return position == Position::Inside,
        }
    }
    false
}
