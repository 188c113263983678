//! Schedule combination (search result) model.

use serde::{Deserialize, Serialize};

use super::CourseOffering;

/// One complete timetable: exactly one offering per unit, aligned to the
/// unit order given to the search.
///
/// Combinations are owned snapshots. Changing selection flags on the source
/// units afterwards does not alter them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScheduleCombination {
    offerings: Vec<CourseOffering>,
}

impl ScheduleCombination {
    /// Wraps an ordered list of offerings.
    pub fn new(offerings: Vec<CourseOffering>) -> Self {
        Self { offerings }
    }

    /// Offerings in unit order.
    #[inline]
    pub fn offerings(&self) -> &[CourseOffering] {
        &self.offerings
    }

    /// Number of offerings (= number of units).
    #[inline]
    pub fn len(&self) -> usize {
        self.offerings.len()
    }

    /// Whether the combination holds no offerings.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.offerings.is_empty()
    }

    /// Offering chosen for the unit at `unit_index`.
    pub fn get(&self, unit_index: usize) -> Option<&CourseOffering> {
        self.offerings.get(unit_index)
    }

    /// Offering identifiers in unit order.
    pub fn ids(&self) -> Vec<&str> {
        self.offerings.iter().map(CourseOffering::id).collect()
    }

    /// Whether the unit at `unit_index` was given the offering `id`.
    pub fn contains(&self, unit_index: usize, id: &str) -> bool {
        self.get(unit_index).is_some_and(|o| o.id() == id)
    }

    /// Whether no two offerings collide.
    pub fn is_valid(&self) -> bool {
        self.offerings.iter().enumerate().all(|(i, a)| {
            self.offerings[i + 1..]
                .iter()
                .all(|b| !a.collides_with(b))
        })
    }
}
