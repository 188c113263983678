//! Backtracking combination search.
//!
//! # Algorithm
//!
//! 1. Walk units in input order, depth-first.
//! 2. At depth `i`, try each selected offering of unit `i` in stored order.
//! 3. Reject a candidate if it collides with any offering already on the
//!    path (full prefix check, not just the previous unit).
//! 4. At the last unit, emit the path as a fresh [`ScheduleCombination`].
//!
//! The path is a stack of offering indices. Siblings push and pop the same
//! stack, and emitted combinations own cloned offerings, so no two branches
//! share in-flight state.
//!
//! Results come out in lexicographic order of (unit, offering index),
//! restricted to selected offerings.
//!
//! # Complexity
//! Worst case ∏ selected(i) leaves; each candidate costs a pairwise block
//! check against the prefix. Pruning cuts a subtree at its first conflict.

use crate::config::SearchConfig;
use crate::models::{CourseOffering, CourseUnit, ScheduleCombination};

use super::Selection;

/// Result of one search call.
#[derive(Debug, Clone, Default)]
pub struct SearchOutcome {
    /// Valid combinations, in deterministic order.
    pub combinations: Vec<ScheduleCombination>,
    /// Candidate branches examined.
    pub explored: u64,
    /// Whether the branch limit stopped the search early.
    pub truncated: bool,
}

/// Exhaustive conflict-free combination finder.
///
/// # Example
///
/// ```
/// use u_timetable::models::{CourseBlock, CourseOffering, CourseUnit};
/// use u_timetable::search::{Combiner, Selection};
///
/// let mut unit = CourseUnit::new("Algebra");
/// unit.add_offering(
///     CourseOffering::new("A").unwrap()
///         .with_block(CourseBlock::parse("lunes", "14:00", "16:00").unwrap()),
/// ).unwrap();
/// let units = vec![unit];
///
/// let outcome = Combiner::new().search(&units, &Selection::snapshot(&units));
/// assert_eq!(outcome.combinations.len(), 1);
/// assert!(!outcome.truncated);
/// ```
#[derive(Debug, Clone)]
pub struct Combiner {
    branch_limit: Option<u64>,
}

impl Combiner {
    /// Creates a combiner with the default branch limit.
    pub fn new() -> Self {
        Self::from_config(&SearchConfig::default())
    }

    /// Creates a combiner from configuration.
    pub fn from_config(config: &SearchConfig) -> Self {
        Self {
            branch_limit: config.max_branches,
        }
    }

    /// Caps the number of candidate branches examined.
    pub fn with_branch_limit(mut self, limit: u64) -> Self {
        self.branch_limit = Some(limit);
        self
    }

    /// Removes the branch cap.
    pub fn unbounded(mut self) -> Self {
        self.branch_limit = None;
        self
    }

    /// Finds every valid combination of the selected offerings.
    ///
    /// An empty unit list, or any unit with no selected offering, yields no
    /// combinations.
    pub fn search(&self, units: &[CourseUnit], selection: &Selection) -> SearchOutcome {
        let candidates: Vec<Vec<usize>> = (0..units.len())
            .map(|u| {
                selection
                    .selected_indices(u)
                    .into_iter()
                    .filter(|&o| o < units[u].offering_count())
                    .collect()
            })
            .collect();

        tracing::debug!(
            units = units.len(),
            upper_bound = %selection.unpruned_size(),
            "searching combinations"
        );

        let mut walk = Walk {
            units,
            candidates: &candidates,
            path: Vec::with_capacity(units.len()),
            outcome: SearchOutcome::default(),
            limit: self.branch_limit,
        };
        if !units.is_empty() {
            walk.descend(0);
        }

        let outcome = walk.outcome;
        if outcome.truncated {
            tracing::warn!(
                explored = outcome.explored,
                found = outcome.combinations.len(),
                "branch limit reached, search stopped early"
            );
        } else {
            tracing::info!(
                units = units.len(),
                combinations = outcome.combinations.len(),
                explored = outcome.explored,
                "search finished"
            );
        }
        outcome
    }
}

impl Default for Combiner {
    fn default() -> Self {
        Self::new()
    }
}

/// In-flight search state.
struct Walk<'a> {
    units: &'a [CourseUnit],
    candidates: &'a [Vec<usize>],
    /// Chosen offering index per unit of the current prefix.
    path: Vec<usize>,
    outcome: SearchOutcome,
    limit: Option<u64>,
}

impl<'a> Walk<'a> {
    /// Returns `false` once the branch limit stops the search.
    fn descend(&mut self, depth: usize) -> bool {
        let candidates = self.candidates;
        for &index in &candidates[depth] {
            if self.limit.is_some_and(|limit| self.outcome.explored >= limit) {
                self.outcome.truncated = true;
                return false;
            }
            self.outcome.explored += 1;

            let candidate = self.offering(depth, index);
            if self.conflicts_with_prefix(candidate) {
                continue;
            }

            self.path.push(index);
            let keep_going = if depth + 1 == self.units.len() {
                self.emit();
                true
            } else {
                self.descend(depth + 1)
            };
            self.path.pop();

            if !keep_going {
                return false;
            }
        }
        true
    }

    fn offering(&self, unit: usize, index: usize) -> &'a CourseOffering {
        &self.units[unit].offerings()[index]
    }

    fn conflicts_with_prefix(&self, candidate: &CourseOffering) -> bool {
        self.path
            .iter()
            .enumerate()
            .any(|(unit, &index)| self.offering(unit, index).collides_with(candidate))
    }

    fn emit(&mut self) {
        let offerings = self
            .path
            .iter()
            .enumerate()
            .map(|(unit, &index)| self.offering(unit, index).clone())
            .collect();
        self.outcome
            .combinations
            .push(ScheduleCombination::new(offerings));
    }
}

/// Finds all valid combinations using each offering's current selection flag.
///
/// The search is exhaustive and ignores the branch limit. Use [`Combiner`]
/// directly to bound it and observe [`SearchOutcome::truncated`].
pub fn find_combinations(units: &[CourseUnit]) -> Vec<ScheduleCombination> {
    Combiner::new()
        .unbounded()
        .search(units, &Selection::snapshot(units))
        .combinations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CourseBlock;

    fn offering(id: &str, slots: &[(&str, &str, &str)]) -> CourseOffering {
        slots.iter().fold(CourseOffering::new(id).unwrap(), |off, (d, s, e)| {
            off.with_block(CourseBlock::parse(d, s, e).unwrap())
        })
    }

    fn unit(name: &str, offerings: Vec<CourseOffering>) -> CourseUnit {
        let mut unit = CourseUnit::new(name);
        for off in offerings {
            unit.add_offering(off).unwrap();
        }
        unit
    }

    fn ids(combos: &[ScheduleCombination]) -> Vec<Vec<&str>> {
        combos.iter().map(|c| c.ids()).collect()
    }

    /// U1: A=[Mon 14-16], B=[Mon 12-14]; U2: X=[Mon 13-15], Y=[Tue 9-10].
    fn worked_scenario() -> Vec<CourseUnit> {
        vec![
            unit(
                "U1",
                vec![
                    offering("A", &[("lunes", "14:00", "16:00")]),
                    offering("B", &[("lunes", "12:00", "14:00")]),
                ],
            ),
            unit(
                "U2",
                vec![
                    offering("X", &[("lunes", "13:00", "15:00")]),
                    offering("Y", &[("martes", "09:00", "10:00")]),
                ],
            ),
        ]
    }

    #[test]
    fn test_worked_scenario() {
        let units = worked_scenario();
        let combos = find_combinations(&units);
        // A×X overlap 14-15; B×X overlap 13-14.
        assert_eq!(ids(&combos), vec![vec!["A", "Y"], vec!["B", "Y"]]);
        assert!(combos.iter().all(ScheduleCombination::is_valid));
    }

    #[test]
    fn test_deselect_between_calls() {
        let mut units = worked_scenario();
        let before = find_combinations(&units);

        units[0].offering_mut("A").unwrap().deselect();
        let after = find_combinations(&units);

        assert_eq!(ids(&after), vec![vec!["B", "Y"]]);
        assert!(after.iter().all(|c| !c.contains(0, "A")));
        // Earlier results are untouched snapshots.
        assert_eq!(ids(&before), vec![vec!["A", "Y"], vec!["B", "Y"]]);
        assert!(before[0].get(0).unwrap().is_selected());
    }

    #[test]
    fn test_explicit_selection_overrides_flags() {
        let mut units = worked_scenario();
        units[0].offering_mut("A").unwrap().deselect();

        let outcome = Combiner::new().search(&units, &Selection::all(&units));
        assert_eq!(outcome.combinations.len(), 2);

        let mut sel = Selection::all(&units);
        sel.set(1, 1, false);
        assert!(Combiner::new().search(&units, &sel).combinations.is_empty());
    }

    #[test]
    fn test_non_adjacent_conflict_is_pruned() {
        // U1 and U3 collide; U2 is free. A last-element-only check would
        // accept [P, Q, R].
        let units = vec![
            unit("U1", vec![offering("P", &[("lunes", "08:00", "10:00")])]),
            unit("U2", vec![offering("Q", &[("martes", "08:00", "10:00")])]),
            unit(
                "U3",
                vec![
                    offering("R", &[("lunes", "09:00", "11:00")]),
                    offering("S", &[("lunes", "10:00", "12:00")]),
                ],
            ),
        ];
        let combos = find_combinations(&units);
        assert_eq!(ids(&combos), vec![vec!["P", "Q", "S"]]);
    }

    #[test]
    fn test_lexicographic_order() {
        let free = |id: &str, day: &str| offering(id, &[(day, "08:00", "09:00")]);
        let units = vec![
            unit("U1", vec![free("A", "lunes"), free("B", "martes")]),
            unit("U2", vec![free("X", "miercoles"), free("Y", "jueves"), free("Z", "viernes")]),
        ];
        let combos = find_combinations(&units);
        assert_eq!(
            ids(&combos),
            vec![
                vec!["A", "X"],
                vec!["A", "Y"],
                vec!["A", "Z"],
                vec!["B", "X"],
                vec!["B", "Y"],
                vec!["B", "Z"],
            ]
        );
    }

    #[test]
    fn test_unit_without_selection_yields_empty() {
        let mut units = worked_scenario();
        for off in units[1].offerings_mut() {
            off.deselect();
        }
        assert!(find_combinations(&units).is_empty());
    }

    #[test]
    fn test_no_units_yields_empty() {
        let outcome = Combiner::new().search(&[], &Selection::default());
        assert!(outcome.combinations.is_empty());
        assert_eq!(outcome.explored, 0);
        assert!(!outcome.truncated);
    }

    #[test]
    fn test_branch_limit_truncates() {
        // 3 x 3 mutually free offerings: 3 + 9 = 12 branches unbounded.
        let day = ["lunes", "martes", "miercoles"];
        let units: Vec<CourseUnit> = (0..2)
            .map(|u| {
                unit(
                    &format!("U{u}"),
                    (0..3)
                        .map(|i| {
                            let start = format!("{:02}:00", 8 + u * 3 + i);
                            let end = format!("{:02}:30", 8 + u * 3 + i);
                            offering(&format!("{u}{i}"), &[(day[i], start.as_str(), end.as_str())])
                        })
                        .collect(),
                )
            })
            .collect();
        let sel = Selection::all(&units);

        let full = Combiner::new().unbounded().search(&units, &sel);
        assert_eq!(full.combinations.len(), 9);
        assert_eq!(full.explored, 12);
        assert!(!full.truncated);

        let capped = Combiner::new().with_branch_limit(5).search(&units, &sel);
        assert!(capped.truncated);
        assert_eq!(capped.explored, 5);
        // Branches: 00, 00x10, 00x11, 00x12, 01 -> three complete results.
        assert_eq!(capped.combinations.len(), 3);
    }

    #[test]
    fn test_find_combinations_ignores_default_limit() {
        // 1001 x 1001 candidates exceed the default cap; only the last
        // offering of the second unit is free.
        let first = unit(
            "U0",
            (0..1001)
                .map(|i| offering(&format!("A{i}"), &[("lunes", "08:00", "10:00")]))
                .collect(),
        );
        let mut busy: Vec<CourseOffering> = (0..1000)
            .map(|i| offering(&format!("B{i}"), &[("lunes", "09:00", "11:00")]))
            .collect();
        busy.push(offering("free", &[("martes", "08:00", "10:00")]));
        let units = vec![first, unit("U1", busy)];

        let capped = Combiner::new().search(&units, &Selection::snapshot(&units));
        assert!(capped.truncated);
        assert!(capped.combinations.len() < 1001);

        let combos = find_combinations(&units);
        assert_eq!(combos.len(), 1001);
        assert!(combos.iter().all(|c| c.contains(1, "free")));
        assert_eq!(combos[1000].ids(), vec!["A1000", "free"]);
    }

    #[test]
    fn test_original_three_subject_fixture() {
        let linalg = unit(
            "Algebra Lineal",
            vec![
                offering("A", &[("lunes", "14:00", "16:00"), ("jueves", "14:00", "16:00"), ("viernes", "09:00", "11:00")]),
                offering("B", &[("lunes", "12:00", "14:00"), ("miercoles", "10:00", "12:00"), ("jueves", "12:00", "14:00")]),
                offering("C", &[("lunes", "08:00", "10:00"), ("jueves", "11:00", "13:00"), ("viernes", "10:00", "12:00")]),
                offering("D", &[("lunes", "10:00", "12:00"), ("miercoles", "10:00", "12:00"), ("jueves", "10:00", "12:00")]),
            ],
        );
        let mate = unit(
            "Matematica II",
            vec![
                offering("A", &[("martes", "15:00", "17:00"), ("miercoles", "15:00", "17:00"), ("viernes", "10:00", "12:00")]),
                offering("B", &[("lunes", "12:00", "14:00"), ("martes", "13:00", "15:00"), ("viernes", "12:00", "14:00")]),
                offering("C", &[("martes", "14:00", "16:00"), ("miercoles", "12:00", "14:00"), ("viernes", "14:00", "16:00")]),
                offering("D", &[("lunes", "09:00", "11:00"), ("martes", "12:00", "14:00"), ("viernes", "10:00", "12:00")]),
            ],
        );
        let imag = unit("Imagenes", vec![offering("S", &[("jueves", "08:00", "10:00")])]);

        let units = vec![linalg, mate, imag];
        let combos = find_combinations(&units);
        assert!(combos.iter().all(ScheduleCombination::is_valid));
        assert!(combos.iter().all(|c| c.len() == 3));

        // Brute force over all 16 pairs agrees with the search.
        let mut expected = Vec::new();
        for a in units[0].offerings() {
            for b in units[1].offerings() {
                let c = &units[2].offerings()[0];
                let combo = ScheduleCombination::new(vec![a.clone(), b.clone(), c.clone()]);
                if combo.is_valid() {
                    expected.push(combo);
                }
            }
        }
        assert_eq!(combos, expected);
        assert!(!combos.is_empty());
    }
}
