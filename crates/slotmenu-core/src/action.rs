//! Interaction vocabularies: [`GridAction`] and [`BarAction`].
//!
//! The two sets are separate types on purpose: a handler registered under a
//! grid action can never fire for a fixed-bar event, and vice versa. The
//! engine is generic over [`ActionKind`], so mixing them fails to compile
//! instead of failing at dispatch.

use std::fmt::Debug;
use std::hash::Hash;

// ---------------------------------------------------------------------------
// ActionKind
// ---------------------------------------------------------------------------

/// Marker trait for interaction vocabularies usable as handler-map keys.
pub trait ActionKind: Copy + Eq + Hash + Debug + 'static {}

// ---------------------------------------------------------------------------
// GridAction
// ---------------------------------------------------------------------------

/// An interaction kind delivered for a modal grid surface.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GridAction {
    /// Primary (left) click.
    Primary,
    /// Secondary (right) click.
    Secondary,
    /// Middle click.
    Middle,
    /// Primary click with the shift modifier held.
    ShiftPrimary,
    /// Secondary click with the shift modifier held.
    ShiftSecondary,
    /// A drag across the slot.
    Drag,
}

impl ActionKind for GridAction {}

// ---------------------------------------------------------------------------
// BarAction
// ---------------------------------------------------------------------------

/// An interaction kind delivered for a fixed action-row (hotbar) surface.
///
/// These arrive as generic world-interaction and discard events, not as
/// grid clicks; the targeted variants carry a target payload in their
/// [`ClickContext`](crate::context::ClickContext).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BarAction {
    /// Primary interaction with nothing targeted.
    Primary,
    /// Secondary interaction with nothing targeted.
    Secondary,
    /// Primary interaction on a target (carries a target payload).
    PrimaryTargeted,
    /// Secondary interaction on a target (carries a target payload).
    SecondaryTargeted,
    /// The viewer discarded the selected row item.
    Discard,
}

impl ActionKind for BarAction {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn actions_work_as_map_keys() {
        let mut m = HashMap::new();
        m.insert(GridAction::Primary, 1);
        m.insert(GridAction::Primary, 2);
        assert_eq!(m.len(), 1);
        assert_eq!(m[&GridAction::Primary], 2);
    }

    #[test]
    fn vocabularies_are_distinct_types() {
        // A map keyed by one vocabulary cannot accept the other; this is
        // enforced by the type system, so the test only documents it.
        let mut grid: HashMap<GridAction, ()> = HashMap::new();
        let mut bar: HashMap<BarAction, ()> = HashMap::new();
        grid.insert(GridAction::Secondary, ());
        bar.insert(BarAction::Discard, ());
        assert_eq!(grid.len(), 1);
        assert_eq!(bar.len(), 1);
    }
}
