//! Explicit offering selection passed into the search.

use serde::{Deserialize, Serialize};

use crate::models::CourseUnit;

/// Which offerings of each unit may appear in a combination.
///
/// Indexed `[unit][offering]`, aligned to the units the selection was built
/// from. Positions outside the table count as not selected.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Selection {
    flags: Vec<Vec<bool>>,
}

impl Selection {
    /// Reads every offering's selection flag once.
    pub fn snapshot(units: &[CourseUnit]) -> Self {
        Self {
            flags: units
                .iter()
                .map(|u| u.offerings().iter().map(|o| o.is_selected()).collect())
                .collect(),
        }
    }

    /// Selects every offering, ignoring the entity flags.
    pub fn all(units: &[CourseUnit]) -> Self {
        Self {
            flags: units
                .iter()
                .map(|u| vec![true; u.offering_count()])
                .collect(),
        }
    }

    /// Builds a selection from raw flags.
    pub fn from_flags(flags: Vec<Vec<bool>>) -> Self {
        Self { flags }
    }

    /// Whether offering `offering` of unit `unit` is selected.
    pub fn is_selected(&self, unit: usize, offering: usize) -> bool {
        self.flags
            .get(unit)
            .and_then(|row| row.get(offering))
            .copied()
            .unwrap_or(false)
    }

    /// Sets one flag. Returns `false` if the position does not exist.
    pub fn set(&mut self, unit: usize, offering: usize, selected: bool) -> bool {
        match self.flags.get_mut(unit).and_then(|row| row.get_mut(offering)) {
            Some(flag) => {
                *flag = selected;
                true
            }
            None => false,
        }
    }

    /// Indices of the selected offerings of `unit`, in order.
    pub fn selected_indices(&self, unit: usize) -> Vec<usize> {
        self.flags
            .get(unit)
            .map(|row| {
                row.iter()
                    .enumerate()
                    .filter_map(|(i, &on)| on.then_some(i))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Upper bound on the number of combinations: product of selected counts,
    /// saturating at `u128::MAX`.
    pub fn unpruned_size(&self) -> u128 {
        if self.flags.is_empty() {
            return 0;
        }
        self.flags
            .iter()
            .map(|row| row.iter().filter(|&&on| on).count() as u128)
            .fold(1u128, u128::saturating_mul)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CourseOffering;

    fn units() -> Vec<CourseUnit> {
        let mut a = CourseUnit::new("A");
        a.add_offering(CourseOffering::new("1").unwrap()).unwrap();
        a.add_offering(CourseOffering::new("2").unwrap()).unwrap();
        let mut b = CourseUnit::new("B");
        b.add_offering(CourseOffering::new("X").unwrap()).unwrap();
        vec![a, b]
    }

    #[test]
    fn test_snapshot_reads_flags() {
        let mut units = units();
        units[0].offering_mut("1").unwrap().deselect();
        let sel = Selection::snapshot(&units);
        assert!(!sel.is_selected(0, 0));
        assert!(sel.is_selected(0, 1));
        assert!(sel.is_selected(1, 0));

        // Later flag changes do not leak into the snapshot.
        units[0].offering_mut("1").unwrap().select();
        assert!(!sel.is_selected(0, 0));
    }

    #[test]
    fn test_all_and_set() {
        let units = units();
        let mut sel = Selection::all(&units);
        assert_eq!(sel.selected_indices(0), vec![0, 1]);
        assert!(sel.set(0, 1, false));
        assert_eq!(sel.selected_indices(0), vec![0]);
        assert!(!sel.set(3, 0, false));
        assert!(!sel.is_selected(9, 9));
        assert!(sel.selected_indices(9).is_empty());
    }

    #[test]
    fn test_unpruned_size() {
        let units = units();
        assert_eq!(Selection::all(&units).unpruned_size(), 2);
        assert_eq!(Selection::default().unpruned_size(), 0);
    }

    #[test]
    fn test_unpruned_size_saturates() {
        // 100^20 = 10^40 exceeds u128::MAX (about 3.4 * 10^38).
        let wide = Selection::from_flags(vec![vec![true; 100]; 20]);
        assert_eq!(wide.unpruned_size(), u128::MAX);

        let mut flags = vec![vec![true; 100]; 20];
        flags[7] = vec![false; 100];
        assert_eq!(Selection::from_flags(flags).unpruned_size(), 0);
    }
}
