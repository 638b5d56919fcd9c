use super::Position;
use crate::geometry::Point;

/// Which side of an intersection a piece of metadata belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// The entity being cut or classified.
    Target,
    /// The entity doing the cutting.
    Blade,
}

impl Role {
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Role::Target => 0,
            Role::Blade => 1,
        }
    }

    #[must_use]
    pub const fn other(self) -> Role {
        match self {
            Role::Target => Role::Blade,
            Role::Blade => Role::Target,
        }
    }
}

/// Per-role metadata of an intersection.
///
/// `part` is 0 for an outer boundary and `k` for hole `k - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct XInfo {
    pub position: Position,
    pub vertex: Option<u32>,
    pub part: Option<u32>,
}

impl XInfo {
    #[must_use]
    pub fn new(position: Position) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }
}

/// An intersection point carrying one [`XInfo`] per role.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct XPoint {
    pub point: Point,
    info: [XInfo; 2],
}

impl XPoint {
    #[must_use]
    pub fn new(point: Point) -> Self {
        Self {
            point,
            info: [XInfo::default(); 2],
        }
    }

    #[must_use]
    pub fn with_positions(point: Point, target: Position, blade: Position) -> Self {
        Self {
            point,
            info: [XInfo::new(target), XInfo::new(blade)],
        }
    }

    #[must_use]
    pub fn info(&self, role: Role) -> &XInfo {
        &self.info[role.index()]
    }

    pub fn info_mut(&mut self, role: Role) -> &mut XInfo {
        &mut self.info[role.index()]
    }

    #[must_use]
    pub fn position(&self, role: Role) -> Position {
        self.info(role).position
    }

    pub fn set_position(&mut self, role: Role, position: Position) {
        self.info_mut(role).position = position;
    }

    #[must_use]
    pub fn vertex(&self, role: Role) -> Option<u32> {
        self.info(role).vertex
    }

    pub fn set_vertex(&mut self, role: Role, vertex: Option<u32>) {
        self.info_mut(role).vertex = vertex;
    }

    #[must_use]
    pub fn part(&self, role: Role) -> Option<u32> {
        self.info(role).part
    }

    pub fn set_part(&mut self, role: Role, part: Option<u32>) {
        self.info_mut(role).part = part;
    }

    /// Exchanges the target and blade metadata.
    pub fn swap_roles(&mut self) {
        self.info.swap(0, 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_index_their_own_slot() {
        let mut x = XPoint::with_positions(Point::xy(1.0, 2.0), Position::Along, Position::Inside);
        x.set_vertex(Role::Target, Some(4));
        x.set_part(Role::Blade, Some(0));
        assert_eq!(x.position(Role::Target), Position::Along);
        assert_eq!(x.vertex(Role::Target), Some(4));
        assert_eq!(x.vertex(Role::Blade), None);

        x.swap_roles();
        assert_eq!(x.position(Role::Blade), Position::Along);
        assert_eq!(x.vertex(Role::Blade), Some(4));
        assert_eq!(x.part(Role::Target), Some(0));
        assert_eq!(Role::Target.other(), Role::Blade);
    }
}
