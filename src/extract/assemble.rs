//! Offering assembly.
//!
//! # Algorithm
//!
//! 1. Parse theory, practice and (optional) seminar tables into block maps.
//! 2. For each practice row, in row order:
//!    - read the offering id (`Comisiones`) and the composite `Oblig.` field;
//!    - classify each component as a theory or seminar reference;
//!    - resolve every reference, then the offering's own practice blocks;
//!    - attach theory blocks, seminar blocks, practice blocks, in that order.
//! 3. Any unresolved reference is a row error; all are reported together.
//!
//! A practice row repeating an already assembled offering id adds no new
//! offering (its blocks were grouped under that id in step 1).

use std::collections::HashSet;

use crate::config::ExtractConfig;
use crate::models::{CourseBlock, CourseOffering, CourseUnit};

use super::blocks::{parse_blocks, BlockMap};
use super::reference::{split_references, Reference};
use super::{Category, ExtractError, ExtractResult, RowError, RowErrorKind, Table};

const OFFERING_ID: &str = "Comisiones";
const OBLIGATORY: &str = "Oblig.";

/// Builds a course unit from its category tables.
///
/// `seminar` may be absent; a reference to a seminar block is then a
/// row error.
pub fn extract_unit(
    name: impl Into<String>,
    theory: &Table,
    practice: &Table,
    seminar: Option<&Table>,
    config: &ExtractConfig,
) -> ExtractResult<CourseUnit> {
    let mut unit = CourseUnit::new(name);

    let theory_blocks = parse_blocks(theory, config)?;
    let practice_blocks = parse_blocks(practice, config)?;
    let seminar_blocks = seminar.map(|t| parse_blocks(t, config)).transpose()?;

    let id_col = practice.require_column(OFFERING_ID)?;
    let oblig_col = practice.require_column(OBLIGATORY)?;

    let resolver = Resolver {
        theory: &theory_blocks,
        practice: &practice_blocks,
        seminar: seminar_blocks.as_ref(),
    };

    let mut seen = HashSet::new();
    let mut errors = Vec::new();

    for row in 0..practice.row_count() {
        let report = |kind: RowErrorKind| RowError::new(&practice.name, row + 1, kind);

        let id = practice.cell(row, id_col);
        if id.is_empty() {
            errors.push(report(RowErrorKind::MissingValue {
                column: OFFERING_ID.into(),
            }));
            continue;
        }
        if !seen.insert(id.to_string()) {
            continue;
        }

        let references = split_references(practice.cell(row, oblig_col), &config.reference_delimiter);
        if references.is_empty() {
            errors.push(report(RowErrorKind::MissingValue {
                column: OBLIGATORY.into(),
            }));
            continue;
        }

        match resolver.offering(id, &references) {
            Ok(offering) => {
                if let Err(source) = unit.add_offering(offering) {
                    errors.push(report(RowErrorKind::Invalid {
                        column: OFFERING_ID.into(),
                        source,
                    }));
                }
            }
            Err(kinds) => errors.extend(kinds.into_iter().map(report)),
        }
    }

    if !errors.is_empty() {
        return Err(ExtractError::Rows {
            table: practice.name.clone(),
            errors,
        });
    }

    tracing::debug!(
        unit = %unit.name,
        offerings = unit.offering_count(),
        seminars = seminar.is_some(),
        "assembled unit"
    );
    Ok(unit)
}

/// Looks references up in the category block maps.
struct Resolver<'a> {
    theory: &'a BlockMap,
    practice: &'a BlockMap,
    seminar: Option<&'a BlockMap>,
}

impl Resolver<'_> {
    fn offering(&self, id: &str, references: &[Reference]) -> Result<CourseOffering, Vec<RowErrorKind>> {
        let mut theory = Vec::new();
        let mut seminar = Vec::new();
        let mut problems = Vec::new();

        for reference in references {
            let found = match reference.category {
                Category::Theory => self.lookup(self.theory, reference),
                Category::Seminar => match self.seminar {
                    Some(map) => self.lookup(map, reference),
                    None => Err(RowErrorKind::NoSeminarTable {
                        key: reference.key.clone(),
                    }),
                },
                Category::Practice => self.lookup(self.practice, reference),
            };
            match (found, reference.category) {
                (Ok(blocks), Category::Theory) => theory.extend_from_slice(blocks),
                (Ok(blocks), _) => seminar.extend_from_slice(blocks),
                (Err(kind), _) => problems.push(kind),
            }
        }

        let own = Reference {
            category: Category::Practice,
            key: id.to_string(),
        };
        let practice = self.lookup(self.practice, &own).map_err(|kind| {
            problems.push(kind);
        });

        if !problems.is_empty() {
            return Err(problems);
        }

        let mut offering = CourseOffering::new(id)
            .map_err(|source| vec![RowErrorKind::Invalid { column: OFFERING_ID.into(), source }])?;
        let practice: &[CourseBlock] = practice.unwrap_or_default();
        for block in theory.into_iter().chain(seminar).chain(practice.iter().cloned()) {
            offering.add_block(block);
        }
        Ok(offering)
    }

    fn lookup<'m>(&self, map: &'m BlockMap, reference: &Reference) -> Result<&'m [CourseBlock], RowErrorKind> {
        map.get(&reference.key)
            .map(Vec::as_slice)
            .ok_or_else(|| RowErrorKind::UnknownReference {
                category: reference.category,
                key: reference.key.clone(),
            })
    }
}
