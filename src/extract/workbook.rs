//! Workbook sources.
//!
//! A unit workbook has sheets `TEO` (theory) and `COM` (practice), and
//! optionally `SEM` (seminars). The unit name is the file stem. Row 1 of
//! each sheet is the header row.

use std::path::{Path, PathBuf};

use umya_spreadsheet::{Spreadsheet, Worksheet};

use crate::config::ExtractConfig;
use crate::models::CourseUnit;

use super::{extract_unit, Category, ExtractError, ExtractResult, Table};

/// Reads one unit workbook.
pub fn read_workbook(path: impl AsRef<Path>, config: &ExtractConfig) -> ExtractResult<CourseUnit> {
    let path = path.as_ref();
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().trim().to_string())
        .unwrap_or_default();

    let book = umya_spreadsheet::reader::xlsx::read(path).map_err(|e| ExtractError::Workbook {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    unit_from_book(&name, &book, path, config).map_err(|e| e.in_unit(&name))
}

fn unit_from_book(
    name: &str,
    book: &Spreadsheet,
    path: &Path,
    config: &ExtractConfig,
) -> ExtractResult<CourseUnit> {
    let required = |category: Category| {
        section(book, category).ok_or_else(|| ExtractError::MissingSection {
            path: path.display().to_string(),
            section: category.section().to_string(),
        })
    };
    let theory = required(Category::Theory)?;
    let practice = required(Category::Practice)?;
    let seminar = section(book, Category::Seminar);

    tracing::debug!(
        unit = name,
        theory_rows = theory.row_count(),
        practice_rows = practice.row_count(),
        seminar_rows = seminar.as_ref().map_or(0, Table::row_count),
        "read workbook"
    );
    extract_unit(name, &theory, &practice, seminar.as_ref(), config)
}

fn section(book: &Spreadsheet, category: Category) -> Option<Table> {
    book.get_sheet_by_name(category.section())
        .map(|sheet| sheet_table(category.section(), sheet))
}

/// Converts a worksheet into a [`Table`], reading the used range.
fn sheet_table(name: &str, sheet: &Worksheet) -> Table {
    let (max_col, max_row) = sheet.get_highest_column_and_row();
    let headers = (1..=max_col).map(|col| sheet.get_value((col, 1)));
    let mut table = Table::new(name, headers);
    for row in 2..=max_row {
        table.push_row((1..=max_col).map(|col| sheet.get_value((col, row))));
    }
    table
}

/// Reads every workbook in `dir`, in file-name order.
///
/// Files without the configured extension, and office lock files (`~$*`),
/// are skipped.
pub fn extract_from_directory(
    dir: impl AsRef<Path>,
    config: &ExtractConfig,
) -> ExtractResult<Vec<CourseUnit>> {
    let dir = dir.as_ref();
    let mut paths: Vec<PathBuf> = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if is_workbook(&path, config) {
            paths.push(path);
        } else {
            tracing::warn!(path = %path.display(), "skipping non-workbook entry");
        }
    }
    paths.sort();

    let units = paths
        .iter()
        .map(|p| read_workbook(p, config))
        .collect::<ExtractResult<Vec<_>>>()?;
    tracing::info!(dir = %dir.display(), units = units.len(), "extracted directory");
    Ok(units)
}

fn is_workbook(path: &Path, config: &ExtractConfig) -> bool {
    let extension_matches = path
        .extension()
        .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case(&config.workbook_extension));
    let lock_file = path
        .file_name()
        .is_some_and(|n| n.to_string_lossy().starts_with("~$"));
    path.is_file() && extension_matches && !lock_file
}
