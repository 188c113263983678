//! Combination search.
//!
//! Enumerates every conflict-free [`ScheduleCombination`] of a list of
//! course units, choosing exactly one selected offering per unit.
//!
//! The engine is pure: it reads an explicit [`Selection`] snapshot and never
//! touches the units. Use [`Selection::snapshot`] to honour the offerings'
//! own selection flags, or build a selection directly.
//!
//! [`ScheduleCombination`]: crate::models::ScheduleCombination

mod combiner;
mod selection;

pub use combiner::{find_combinations, Combiner, SearchOutcome};
pub use selection::Selection;
