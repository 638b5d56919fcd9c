//! Polygons with straight and arc edges, optional holes, and the
//! intersection, split and repair operations built on them.

mod assemble;
mod edit;
mod intersect;
mod poly_edge;
mod poly_point;
mod query;
mod resolve;
mod select;
mod split;

use std::collections::HashSet;

pub use poly_edge::PolyEdge;
pub use poly_point::PolyPoint;
pub use split::{LineSplit, PolygonSplit};

use crate::error::{Result, TopologyError};
use crate::geometry::{BoundingBox, Point};

/// Winding sense of a closed boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rotation {
    Clockwise,
    Anticlockwise,
}

impl Rotation {
    #[must_use]
    pub fn opposite(self) -> Rotation {
        match self {
            Rotation::Clockwise => Rotation::Anticlockwise,
            Rotation::Anticlockwise => Rotation::Clockwise,
        }
    }
}

/// Location of a vertex: `part` 0 is the outer boundary, `k` is hole `k - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexRef {
    pub part: usize,
    pub index: usize,
}

/// A polygon or polyline of [`PolyPoint`]s.
///
/// When closed, an implicit edge runs from the last vertex back to the first.
/// Only an outer boundary holds holes; holes are always closed and never hold
/// holes themselves. Vertex ids are unique across the outer boundary and its
/// holes, and `top_id` is never below any of them.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Polygon {
    #[cfg_attr(feature = "serde", serde(default))]
    top_id: u32,
    #[cfg_attr(feature = "serde", serde(rename = "vertex", default))]
    vertices: Vec<PolyPoint>,
    #[cfg_attr(feature = "serde", serde(default = "default_closed"))]
    is_closed: bool,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "is_false"))]
    is_hole: bool,
    #[cfg_attr(feature = "serde", serde(rename = "hole", default, skip_serializing_if = "Vec::is_empty"))]
    holes: Vec<Polygon>,
}

#[cfg(feature = "serde")]
fn default_closed() -> bool {
    true
}

#[cfg(feature = "serde")]
#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_false(value: &bool) -> bool {
    !*value
}

impl Default for Polygon {
    fn default() -> Self {
        Self::new()
    }
}

impl Polygon {
    /// An empty closed polygon.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            top_id: 0,
            vertices: Vec::with_capacity(capacity),
            is_closed: true,
            is_hole: false,
            holes: Vec::new(),
        }
    }

    /// A closed polygon of straight edges with ids `1..=n`.
    #[must_use]
    pub fn from_points(points: impl IntoIterator<Item = Point>) -> Self {
        let mut polygon = Self::new();
        for p in points {
            polygon.push_point(p);
        }
        polygon
    }

    /// A closed polygon taking the vertices as given; anonymous or repeated
    /// ids are replaced.
    #[must_use]
    pub fn from_vertices(vertices: Vec<PolyPoint>) -> Self {
        let mut polygon = Self::new();
        polygon.vertices = vertices;
        polygon.renumber(false);
        polygon
    }

    /// The anticlockwise rectangle of a box's XY footprint at its base,
    /// rotated by `angle` about the box centre.
    #[must_use]
    pub fn from_box(bounds: &BoundingBox, angle: f64) -> Self {
        let centre = bounds.centre().with_z(bounds.min.z);
        let (s, c) = angle.sin_cos();
        let corners = [
            (bounds.min.x, bounds.min.y),
            (bounds.max.x, bounds.min.y),
            (bounds.max.x, bounds.max.y),
            (bounds.min.x, bounds.max.y),
        ];
        Self::from_points(corners.into_iter().map(|(x, y)| {
            let (dx, dy) = (x - centre.x, y - centre.y);
            Point::new(centre.x + dx * c - dy * s, centre.y + dx * s + dy * c, centre.z)
        }))
    }

    #[must_use]
    pub fn vertices(&self) -> &[PolyPoint] {
        &self.vertices
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.is_closed
    }

    pub fn set_closed(&mut self, is_closed: bool) {
        self.is_closed = is_closed;
    }

    #[must_use]
    pub fn is_hole(&self) -> bool {
        self.is_hole
    }

    #[must_use]
    pub fn top_id(&self) -> u32 {
        self.top_id
    }

    /// Vertex at a wrapping index; `-1` is the last vertex.
    #[must_use]
    pub fn vertex(&self, index: isize) -> Option<&PolyPoint> {
        let i = self.wrap(index)?;
        self.vertices.get(i)
    }

    pub fn vertex_mut(&mut self, index: isize) -> Option<&mut PolyPoint> {
        let i = self.wrap(index)?;
        self.vertices.get_mut(i)
    }

    #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    fn wrap(&self, index: isize) -> Option<usize> {
        let n = self.vertices.len() as isize;
        (n > 0).then(|| index.rem_euclid(n) as usize)
    }

    /// Appends a straight-edge vertex and returns its new id.
    pub fn push_point(&mut self, point: Point) -> u32 {
        let id = self.allocate_id();
        self.vertices.push(PolyPoint::new(point, 0.0, id));
        id
    }

    /// Appends a vertex, allocating an id if it is anonymous or its id is
    /// already taken.
    pub fn push(&mut self, mut vertex: PolyPoint) -> u32 {
        if vertex.id == 0 || self.ids().any(|id| id == vertex.id) {
            vertex.id = self.allocate_id();
        } else {
            self.top_id = self.top_id.max(vertex.id);
        }
        self.vertices.push(vertex);
        vertex.id
    }

    /// Inserts a vertex before `index` (or appends at `len()`) and returns its id.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::VertexOutOfRange`] if `index > len()`.
    pub fn insert_vertex(&mut self, index: usize, point: Point, sweep: f64) -> Result<u32> {
        if index > self.vertices.len() {
            return Err(TopologyError::VertexOutOfRange {
                index,
                count: self.vertices.len(),
            }
            .into());
        }
        let id = self.allocate_id();
        self.vertices.insert(index, PolyPoint::new(point, sweep, id));
        Ok(id)
    }

    /// # Errors
    ///
    /// Returns [`TopologyError::VertexOutOfRange`] for a bad index.
    pub fn remove_vertex(&mut self, index: usize) -> Result<PolyPoint> {
        if index >= self.vertices.len() {
            return Err(TopologyError::VertexOutOfRange {
                index,
                count: self.vertices.len(),
            }
            .into());
        }
        Ok(self.vertices.remove(index))
    }

    /// Number of edges of this boundary (holes excluded).
    #[must_use]
    pub fn edge_count(&self) -> usize {
        let n = self.vertices.len();
        if n < 2 {
            0
        } else if self.is_closed {
            n
        } else {
            n - 1
        }
    }

    /// The edge leaving vertex `k`.
    #[must_use]
    pub fn edge(&self, k: usize) -> Option<PolyEdge> {
        if k >= self.edge_count() {
            return None;
        }
        let n = self.vertices.len();
        Some(PolyEdge::new(self.vertices[k].point, self.vertices[(k + 1) % n]))
    }

    pub fn edges(&self) -> impl Iterator<Item = PolyEdge> + '_ {
        (0..self.edge_count()).filter_map(move |k| self.edge(k))
    }

    /// The outer boundary followed by every hole.
    pub fn parts(&self) -> impl Iterator<Item = &Polygon> + '_ {
        std::iter::once(self).chain(self.holes.iter())
    }

    /// Part 0 is this boundary, part `k` is hole `k - 1`.
    #[must_use]
    pub fn part(&self, part: usize) -> Option<&Polygon> {
        match part {
            0 => Some(self),
            k => self.holes.get(k - 1),
        }
    }

    pub fn part_mut(&mut self, part: usize) -> Option<&mut Polygon> {
        match part {
            0 => Some(self),
            k => self.holes.get_mut(k - 1),
        }
    }

    /// A fresh id, unique within this polygon and its holes. Holes count
    /// their own allocations, so the outer boundary takes the highest
    /// counter of any part.
    pub fn allocate_id(&mut self) -> u32 {
        self.top_id = self.holes.iter().map(|h| h.top_id).fold(self.top_id, u32::max) + 1;
        self.top_id
    }

    fn ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.parts().flat_map(|part| part.vertices.iter().map(|v| v.id))
    }

    /// Gives every anonymous or repeated vertex a fresh id; with `restart`
    /// every vertex is renumbered from 1.
    pub fn renumber(&mut self, restart: bool) {
        if restart {
            self.top_id = 0;
        }
        let mut top = self.top_id;
        for v in self.vertices.iter().chain(self.holes.iter().flat_map(|h| h.vertices.iter())) {
            top = top.max(v.id);
        }
        if !restart {
            self.top_id = top;
        }
        let mut seen = HashSet::new();
        let mut next = self.top_id;
        let parts = std::iter::once(&mut self.vertices).chain(self.holes.iter_mut().map(|h| &mut h.vertices));
        for vertices in parts {
            for v in vertices.iter_mut() {
                if restart || v.id == 0 || !seen.insert(v.id) {
                    next += 1;
                    v.id = next;
                    seen.insert(next);
                }
            }
        }
        self.top_id = next;
        for hole in &mut self.holes {
            hole.top_id = next;
        }
    }

    /// Searches the outer boundary, then each hole, for vertex `id`.
    #[must_use]
    pub fn find_vertex_by_id(&self, id: u32) -> Option<VertexRef> {
        self.find_vertex(|v| v.id == id)
    }

    #[must_use]
    pub fn find_vertex_by_location(&self, p: &Point, prec: f64) -> Option<VertexRef> {
        self.find_vertex(|v| v.point.is_equal(p, prec))
    }

    fn find_vertex(&self, matches: impl Fn(&PolyPoint) -> bool) -> Option<VertexRef> {
        self.parts().enumerate().find_map(|(part, polygon)| {
            polygon
                .vertices
                .iter()
                .position(&matches)
                .map(|index| VertexRef { part, index })
        })
    }

    #[must_use]
    pub fn holes(&self) -> &[Polygon] {
        &self.holes
    }

    #[must_use]
    pub fn hole_count(&self) -> usize {
        self.holes.len()
    }

    /// # Errors
    ///
    /// Returns [`TopologyError::HoleOutOfRange`] for a bad index.
    pub fn hole(&self, index: usize) -> Result<&Polygon> {
        let count = self.holes.len();
        self.holes
            .get(index)
            .ok_or_else(|| TopologyError::HoleOutOfRange { index, count }.into())
    }

    /// The hole comes back with this polygon's id counter, so ids it
    /// allocates stay unique across every part.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::HoleOutOfRange`] for a bad index.
    pub fn hole_mut(&mut self, index: usize) -> Result<&mut Polygon> {
        let count = self.holes.len();
        let top = self.ids().fold(self.top_id, u32::max);
        let hole = self
            .holes
            .get_mut(index)
            .ok_or(TopologyError::HoleOutOfRange { index, count })?;
        hole.top_id = top;
        Ok(hole)
    }

    /// Adopts `hole` as a hole of this polygon; any holes it carried are dropped.
    pub fn add_hole(&mut self, mut hole: Polygon) {
        hole.is_hole = true;
        hole.is_closed = true;
        hole.holes.clear();
        self.holes.push(hole);
        self.renumber(false);
    }

    /// # Errors
    ///
    /// Returns [`TopologyError::HoleOutOfRange`] for a bad index.
    pub fn remove_hole(&mut self, index: usize) -> Result<Polygon> {
        let count = self.holes.len();
        if index >= count {
            return Err(TopologyError::HoleOutOfRange { index, count }.into());
        }
        let mut hole = self.holes.remove(index);
        hole.is_hole = false;
        Ok(hole)
    }

    /// Hands every hole to the caller as a standalone polygon.
    pub fn release_holes(&mut self) -> Vec<Polygon> {
        let mut holes = std::mem::take(&mut self.holes);
        for hole in &mut holes {
            hole.is_hole = false;
        }
        holes
    }
}
