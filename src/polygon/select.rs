use super::assemble::Fragment;
use super::Polygon;
use crate::intersect::{Position, Role};

/// Which output of a polygon split a fragment is being considered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Region {
    /// Target ∩ blade.
    Inside,
    /// Target − blade.
    Outside,
}

/// Where a boundary fragment lies relative to the other polygon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FragmentClass {
    Inside,
    Outside,
    /// On the other boundary, running the same way.
    Coincident,
    /// On the other boundary, running the opposite way.
    Opposed,
}

/// Decision about whether to keep a fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum KeepDecision {
    Keep,
    KeepFlipped,
    Discard,
}

/// Decides whether a fragment belongs to an output region.
///
/// Both boundaries run with their material on the right.
///
/// | Fragment    | vs other   | Inside  | Outside     |
/// |-------------|------------|---------|-------------|
/// | from target | inside     | keep    | discard     |
/// | from target | outside    | discard | keep        |
/// | from target | coincident | keep    | discard     |
/// | from target | opposed    | discard | keep        |
/// | from blade  | inside     | keep    | keep (flip) |
/// | from blade  | elsewhere  | discard | discard     |
#[allow(clippy::match_same_arms)]
#[must_use]
pub(crate) fn should_keep_fragment(source: Role, class: FragmentClass, region: Region) -> KeepDecision {
    match (source, class, region) {
        (Role::Target, FragmentClass::Inside, Region::Inside) => KeepDecision::Keep,
        (Role::Target, FragmentClass::Inside, Region::Outside) => KeepDecision::Discard,
        (Role::Target, FragmentClass::Outside, Region::Inside) => KeepDecision::Discard,
        (Role::Target, FragmentClass::Outside, Region::Outside) => KeepDecision::Keep,
        (Role::Target, FragmentClass::Coincident, Region::Inside) => KeepDecision::Keep,
        (Role::Target, FragmentClass::Coincident, Region::Outside) => KeepDecision::Discard,
        (Role::Target, FragmentClass::Opposed, Region::Inside) => KeepDecision::Discard,
        (Role::Target, FragmentClass::Opposed, Region::Outside) => KeepDecision::Keep,

        (Role::Blade, FragmentClass::Inside, Region::Inside) => KeepDecision::Keep,
        (Role::Blade, FragmentClass::Inside, Region::Outside) => KeepDecision::KeepFlipped,
        // The target's copy of a shared boundary is the one kept.
        (Role::Blade, _, _) => KeepDecision::Discard,
    }
}

/// Classifies a fragment by its midpoint against `other`.
///
/// A midpoint on the other boundary is resolved by comparing the fragment's
/// direction with the other boundary's direction there.
pub(crate) fn classify_fragment(fragment: &Fragment, other: &Polygon, prec: f64) -> FragmentClass {
    let Some((mid, tangent)) = fragment.midpoint() else {
        return FragmentClass::Outside;
    };
    match other.position_of(&mid, prec) {
        Position::Inside => FragmentClass::Inside,
        Position::Along => {
            let along = other
                .parts()
                .flat_map(Polygon::edges)
                .find(|e| e.position_of_2d(&mid, prec).is_within())
                .and_then(|e| e.tangent_at(&mid));
            match along {
                Some(t) if t.dot(&tangent) < 0.0 => FragmentClass::Opposed,
                _ => FragmentClass::Coincident,
            }
        }
        _ => FragmentClass::Outside,
    }
}

/// Applies the keep decisions for one region, flipping where required.
pub(crate) fn select_fragments(
    classified: &[(Role, FragmentClass, Fragment)],
    region: Region,
) -> Vec<Fragment> {
    classified
        .iter()
        .filter_map(|(role, class, fragment)| match should_keep_fragment(*role, *class, region) {
            KeepDecision::Keep => Some(fragment.clone()),
            KeepDecision::KeepFlipped => Some(fragment.reversed()),
            KeepDecision::Discard => None,
        })
        .collect()
}
