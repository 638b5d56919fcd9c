use std::cmp::Ordering;

use super::{PositionMask, Role, XPoint};
use crate::geometry::{Line, Point};

/// Acceptance rule and metadata stamped on incoming points for one role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct XFilter {
    pub mask: PositionMask,
    pub vertex: Option<u32>,
    pub part: Option<u32>,
}

/// Filtered, insertion-ordered collection of intersections.
///
/// Points are stamped with the current per-role vertex and part, then kept
/// only if each role's position passes that role's mask. After
/// [`XList::swap_filters`] incoming points are read with target and blade
/// exchanged.
#[derive(Debug, Clone, Default)]
pub struct XList {
    filters: [XFilter; 2],
    is_swapped: bool,
    points: Vec<XPoint>,
}

impl XList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty list accepting target positions in `target` and blade positions
    /// in `blade`.
    #[must_use]
    pub fn with_masks(target: PositionMask, blade: PositionMask) -> Self {
        let mut list = Self::new();
        list.filters[Role::Target.index()].mask = target;
        list.filters[Role::Blade.index()].mask = blade;
        list
    }

    #[must_use]
    pub fn filter(&self, role: Role) -> &XFilter {
        &self.filters[role.index()]
    }

    pub fn filter_mut(&mut self, role: Role) -> &mut XFilter {
        &mut self.filters[role.index()]
    }

    pub fn set_mask(&mut self, role: Role, mask: PositionMask) {
        self.filter_mut(role).mask = mask;
    }

    /// Sets the vertex and part stamped on points for `role`.
    pub fn set_source(&mut self, role: Role, vertex: Option<u32>, part: Option<u32>) {
        let filter = self.filter_mut(role);
        filter.vertex = vertex;
        filter.part = part;
    }

    /// Toggles whether incoming points have their roles exchanged.
    pub fn swap_filters(&mut self) {
        self.is_swapped = !self.is_swapped;
    }

    #[must_use]
    pub fn is_swapped(&self) -> bool {
        self.is_swapped
    }

    /// Offers a point to the list; returns whether it was kept.
    ///
    /// Roles are exchanged before the sources are stamped, so a source set
    /// for a role always lands on that role of the stored point.
    pub fn insert(&mut self, mut point: XPoint) -> bool {
        if self.is_swapped {
            point.swap_roles();
        }
        for role in [Role::Target, Role::Blade] {
            let filter = self.filters[role.index()];
            if filter.vertex.is_some() {
                point.set_vertex(role, filter.vertex);
            }
            if filter.part.is_some() {
                point.set_part(role, filter.part);
            }
        }
        let accepted = [Role::Target, Role::Blade]
            .into_iter()
            .all(|role| self.filters[role.index()].mask.accepts(point.position(role)));
        if accepted {
            self.points.push(point);
        }
        accepted
    }

    /// Appends every point of `other` without filtering.
    pub fn append(&mut self, other: XList) {
        self.points.extend(other.points);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&XPoint> {
        self.points.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut XPoint> {
        self.points.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, XPoint> {
        self.points.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, XPoint> {
        self.points.iter_mut()
    }

    #[must_use]
    pub fn points(&self) -> &[XPoint] {
        &self.points
    }

    /// Removes and returns the point at `index`.
    pub fn erase(&mut self, index: usize) -> Option<XPoint> {
        (index < self.points.len()).then(|| self.points.remove(index))
    }

    pub fn retain(&mut self, keep: impl FnMut(&XPoint) -> bool) {
        self.points.retain(keep);
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Hands the points over to the caller.
    #[must_use]
    pub fn into_vec(self) -> Vec<XPoint> {
        self.points
    }

    pub fn sort_by(&mut self, compare: impl FnMut(&XPoint, &XPoint) -> Ordering) {
        self.points.sort_by(compare);
    }

    /// Tolerant lexicographic order on `(x, y)`.
    pub fn sort_by_coordinates(&mut self, prec: f64) {
        self.points.sort_by(|a, b| a.point.compare_2d(&b.point, prec));
    }

    /// Orders points by a scalar key, smallest first.
    pub fn sort_by_distance(&mut self, key: impl Fn(&Point) -> f64) {
        self.points.sort_by(|a, b| key(&a.point).total_cmp(&key(&b.point)));
    }

    /// Orders points by their projection on `line`, from origin towards end.
    pub fn sort_along_line(&mut self, line: &Line) {
        let d = line.direction();
        let o = line.origin;
        self.sort_by_distance(|p| (p.x - o.x) * d.x + (p.y - o.y) * d.y);
    }

    /// Drops points that repeat an earlier one: same target and blade parts and
    /// coordinates equal within `prec`. The first occurrence is kept.
    pub fn remove_duplicates(&mut self, prec: f64) {
        let mut kept: Vec<XPoint> = Vec::with_capacity(self.points.len());
        for x in self.points.drain(..) {
            let duplicate = kept.iter().any(|k| {
                k.part(Role::Target) == x.part(Role::Target)
                    && k.part(Role::Blade) == x.part(Role::Blade)
                    && k.point.is_equal(&x.point, prec)
            });
            if !duplicate {
                kept.push(x);
            }
        }
        self.points = kept;
    }
}

impl IntoIterator for XList {
    type Item = XPoint;
    type IntoIter = std::vec::IntoIter<XPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}

impl<'a> IntoIterator for &'a XList {
    type Item = &'a XPoint;
    type IntoIter = std::slice::Iter<'a, XPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intersect::Position;
    use crate::math::EPS;

    fn x(px: f64, py: f64, target: Position, blade: Position) -> XPoint {
        XPoint::with_positions(Point::xy(px, py), target, blade)
    }

    #[test]
    fn masks_filter_each_role() {
        let mut list = XList::with_masks(PositionMask::WITHIN, PositionMask::ANY);
        assert!(list.insert(x(0.0, 0.0, Position::Along, Position::After)));
        assert!(!list.insert(x(1.0, 0.0, Position::Before, Position::Along)));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn swapped_filters_exchange_roles() {
        let mut list = XList::with_masks(PositionMask::WITHIN, PositionMask::from(Position::Inside));
        list.set_source(Role::Target, Some(7), Some(0));
        list.swap_filters();
        // Computed as (first, second) = (Inside, Origin); read swapped.
        assert!(list.insert(x(0.0, 0.0, Position::Inside, Position::Origin)));
        let p = list.get(0).copied().unwrap_or_else(|| XPoint::new(Point::default()));
        assert_eq!(p.position(Role::Target), Position::Origin);
        assert_eq!(p.vertex(Role::Target), Some(7));
        assert_eq!(p.part(Role::Target), Some(0));
        assert_eq!(p.vertex(Role::Blade), None);
    }

    #[test]
    fn duplicates_need_matching_parts() {
        let mut list = XList::new();
        list.set_source(Role::Target, None, Some(0));
        list.insert(x(1.0, 1.0, Position::Along, Position::Along));
        list.insert(x(1.0, 1.000_001, Position::End, Position::Along));
        list.set_source(Role::Target, None, Some(1));
        list.insert(x(1.0, 1.0, Position::Along, Position::Along));
        list.remove_duplicates(EPS);
        assert_eq!(list.len(), 2);
        assert_eq!(list.points()[0].position(Role::Target), Position::Along);
    }

    #[test]
    fn sorting_and_erasing() {
        let mut list = XList::new();
        for px in [3.0, -1.0, 2.0] {
            list.insert(x(px, px, Position::Along, Position::Along));
        }
        list.sort_by_coordinates(EPS);
        let xs: Vec<f64> = list.iter().map(|p| p.point.x).collect();
        assert_eq!(xs, vec![-1.0, 2.0, 3.0]);

        list.sort_along_line(&Line::new(Point::xy(0.0, 0.0), Point::xy(-1.0, -1.0)));
        assert_eq!(list.points()[0].point.x, 3.0);
        assert!(list.erase(5).is_none());
        assert_eq!(list.erase(0).map(|p| p.point.x), Some(3.0));
        assert_eq!(list.into_vec().len(), 2);
    }
}
