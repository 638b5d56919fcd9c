use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};

/// Relative position of a point with respect to a reference entity.
///
/// One enum covers every geometric context (edge, area, side, plane), but each
/// variant owns a distinct bit so masks never alias across contexts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u16)]
pub enum Position {
    /// Unknown or not applicable.
    #[default]
    Undefined = 0,
    /// On the carrier, before the origin.
    Before = 0x0001,
    /// Coincident with the origin.
    Origin = 0x0002,
    /// Strictly between origin and end.
    Along = 0x0004,
    /// Coincident with the end.
    End = 0x0008,
    /// On the carrier, past the end.
    After = 0x0010,
    /// On an arc's full circle, outside its sweep.
    Radial = 0x0020,
    /// Outside an area or circle.
    Outside = 0x0040,
    /// Inside an area or circle.
    Inside = 0x0080,
    /// Left of a directed line.
    Left = 0x0100,
    /// Right of a directed line.
    Right = 0x0200,
    /// On the side a plane normal points to.
    Front = 0x0400,
    /// Behind a plane.
    Back = 0x0800,
}

impl Position {
    #[must_use]
    pub const fn bits(self) -> u16 {
        self as u16
    }

    /// Whether the point is on the entity itself, endpoints included.
    #[must_use]
    pub fn is_within(self) -> bool {
        PositionMask::WITHIN.contains(self)
    }

    /// Whether the point coincides with an endpoint.
    #[must_use]
    pub fn is_vertex(self) -> bool {
        PositionMask::VERTEX.contains(self)
    }

    /// The mirror position across the reference (left ↔ right, inside ↔ outside,
    /// front ↔ back, origin ↔ end, before ↔ after).
    #[must_use]
    pub fn opposite(self) -> Position {
        match self {
            Position::Before => Position::After,
            Position::After => Position::Before,
            Position::Origin => Position::End,
            Position::End => Position::Origin,
            Position::Outside => Position::Inside,
            Position::Inside => Position::Outside,
            Position::Left => Position::Right,
            Position::Right => Position::Left,
            Position::Front => Position::Back,
            Position::Back => Position::Front,
            other => other,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A set of [`Position`]s used to filter intersections.
///
/// The empty mask accepts anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PositionMask(u16);

impl PositionMask {
    /// Accepts every position.
    pub const ANY: PositionMask = PositionMask(0);
    pub const WITHIN: PositionMask =
        PositionMask(Position::Along.bits() | Position::End.bits() | Position::Origin.bits());
    pub const VERTEX: PositionMask = PositionMask(Position::End.bits() | Position::Origin.bits());
    pub const FORMER: PositionMask = PositionMask(Position::Along.bits() | Position::Origin.bits());
    pub const LATTER: PositionMask = PositionMask(Position::Along.bits() | Position::End.bits());
    pub const ALL: PositionMask = PositionMask(
        Position::Before.bits()
            | Position::Origin.bits()
            | Position::Along.bits()
            | Position::End.bits()
            | Position::After.bits()
            | Position::Radial.bits(),
    );

    #[must_use]
    pub const fn bits(self) -> u16 {
        self.0
    }

    #[must_use]
    pub const fn is_any(self) -> bool {
        self.0 == 0
    }

    /// Whether `position` passes this filter.
    #[must_use]
    pub const fn accepts(self, position: Position) -> bool {
        self.is_any() || self.contains(position)
    }

    /// Whether `position` is a member of this set.
    #[must_use]
    pub const fn contains(self, position: Position) -> bool {
        self.0 & position.bits() != 0
    }
}

impl From<Position> for PositionMask {
    fn from(position: Position) -> Self {
        PositionMask(position.bits())
    }
}

impl BitOr for PositionMask {
    type Output = PositionMask;

    fn bitor(self, rhs: PositionMask) -> PositionMask {
        PositionMask(self.0 | rhs.0)
    }
}

impl BitOr<Position> for PositionMask {
    type Output = PositionMask;

    fn bitor(self, rhs: Position) -> PositionMask {
        PositionMask(self.0 | rhs.bits())
    }
}

impl BitOr for Position {
    type Output = PositionMask;

    fn bitor(self, rhs: Position) -> PositionMask {
        PositionMask(self.bits() | rhs.bits())
    }
}

impl BitOrAssign<Position> for PositionMask {
    fn bitor_assign(&mut self, rhs: Position) {
        self.0 |= rhs.bits();
    }
}

impl BitAnd for PositionMask {
    type Output = PositionMask;

    fn bitand(self, rhs: PositionMask) -> PositionMask {
        PositionMask(self.0 & rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combinators_match_their_members() {
        assert!(PositionMask::WITHIN.contains(Position::Along));
        assert!(PositionMask::WITHIN.contains(Position::Origin));
        assert!(!PositionMask::WITHIN.contains(Position::After));
        assert!(PositionMask::FORMER.contains(Position::Origin));
        assert!(!PositionMask::FORMER.contains(Position::End));
        assert!(PositionMask::LATTER.contains(Position::End));
        assert!(PositionMask::ALL.contains(Position::Radial));
        assert!(!PositionMask::ALL.contains(Position::Inside));
    }

    #[test]
    fn empty_mask_accepts_anything() {
        assert!(PositionMask::ANY.accepts(Position::Undefined));
        assert!(PositionMask::ANY.accepts(Position::Left));
        assert!(!PositionMask::WITHIN.accepts(Position::Undefined));
    }

    #[test]
    fn contexts_do_not_alias() {
        let side = Position::Left | Position::Right;
        assert!(!side.contains(Position::Outside));
        assert!(!side.contains(Position::Back));
        assert_eq!(Position::Inside.opposite(), Position::Outside);
        assert_eq!(Position::Along.opposite(), Position::Along);
    }
}
