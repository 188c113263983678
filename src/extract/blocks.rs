//! Per-category block extraction.
//!
//! Each row of a theory, practice or seminar table describes one block:
//!
//! | column | meaning | required |
//! |--------|---------|----------|
//! | first column | block identifier | yes |
//! | `Dia` | weekday | yes |
//! | `Inicio` / `Fin` | `hh?mm` times | yes |
//! | `Profesor` | teacher | no |
//! | `Observ.` | observation | no |
//!
//! Rows sharing an identifier contribute several blocks to that key.

use std::collections::BTreeMap;

use crate::config::ExtractConfig;
use crate::models::{CourseBlock, ModelError, TimeOfDay, Weekday};

use super::{ExtractError, ExtractResult, RowError, RowErrorKind, Table};

pub(crate) const DAY: &str = "Dia";
pub(crate) const START: &str = "Inicio";
pub(crate) const END: &str = "Fin";
pub(crate) const TEACHER: &str = "Profesor";
pub(crate) const OBSERVATION: &str = "Observ.";

/// Blocks of one table keyed by row identifier.
pub type BlockMap = BTreeMap<String, Vec<CourseBlock>>;

/// Parses every row of `table` into blocks.
///
/// All row problems are collected; if any row fails the whole table fails
/// with [`ExtractError::Rows`].
pub fn parse_blocks(table: &Table, config: &ExtractConfig) -> ExtractResult<BlockMap> {
    let day_col = table.require_column(DAY)?;
    let start_col = table.require_column(START)?;
    let end_col = table.require_column(END)?;
    let teacher_col = table.column(TEACHER);
    let observation_col = table.column(OBSERVATION);
    let id_header = table.first_header().unwrap_or_default().to_string();

    let mut blocks = BlockMap::new();
    let mut errors = Vec::new();

    for row in 0..table.row_count() {
        let mut row_errors = Vec::new();
        let mut invalid = |column: &str, source: ModelError| {
            row_errors.push(RowErrorKind::Invalid {
                column: column.to_string(),
                source,
            });
        };

        let id = table.cell(row, 0);
        let weekday = table
            .cell(row, day_col)
            .parse::<Weekday>()
            .map_err(|e| invalid(DAY, e))
            .ok();
        let start = TimeOfDay::parse(table.cell(row, start_col))
            .map_err(|e| invalid(START, e))
            .ok();
        let end = TimeOfDay::parse(table.cell(row, end_col))
            .map_err(|e| invalid(END, e))
            .ok();

        let block = match (weekday, start, end) {
            (Some(weekday), Some(start), Some(end)) => CourseBlock::new(weekday, start, end)
                .map_err(|e| invalid(END, e))
                .ok(),
            _ => None,
        };

        if id.is_empty() {
            row_errors.push(RowErrorKind::MissingValue {
                column: id_header.clone(),
            });
        }

        match block {
            Some(mut block) if row_errors.is_empty() => {
                block.teacher = teacher_col.and_then(|c| normalize_teacher(table.cell(row, c), config));
                block.observation =
                    observation_col.and_then(|c| normalize_observation(table.cell(row, c), config));
                blocks.entry(id.to_string()).or_default().push(block);
            }
            _ => errors.extend(
                row_errors
                    .into_iter()
                    .map(|kind| RowError::new(&table.name, row + 1, kind)),
            ),
        }
    }

    if !errors.is_empty() {
        return Err(ExtractError::Rows {
            table: table.name.clone(),
            errors,
        });
    }

    tracing::debug!(
        table = %table.name,
        rows = table.row_count(),
        keys = blocks.len(),
        "parsed blocks"
    );
    Ok(blocks)
}

/// Blank and placeholder teacher values mean "unknown".
fn normalize_teacher(value: &str, config: &ExtractConfig) -> Option<String> {
    let value = value.trim();
    (!value.is_empty() && !config.is_teacher_placeholder(value)).then(|| value.to_string())
}

/// Drops placeholder observations and splits the rest into one line per
/// period- or hyphen-separated part.
pub fn normalize_observation(value: &str, config: &ExtractConfig) -> Option<String> {
    if config.is_placeholder(value) {
        return None;
    }
    let lines: Vec<&str> = value
        .split(['.', '-'])
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect();
    (!lines.is_empty()).then(|| lines.join("\n"))
}
