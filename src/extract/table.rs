//! Normalized tabular input.
//!
//! Every source (workbook sheet, web table) is reduced to a [`Table`]:
//! a header row plus string cells. Column lookup is case-, whitespace- and
//! accent-insensitive, so `"Dia"`, `" DÍA "` and `"día"` all match.

use super::{ExtractError, ExtractResult};

/// A header row plus data rows of trimmed text cells.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Table {
    /// Name used in diagnostics (sheet name or header of the first column).
    pub name: String,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Creates a table with the given headers and no rows.
    pub fn new<S: Into<String>>(name: impl Into<String>, headers: impl IntoIterator<Item = S>) -> Self {
        Self {
            name: name.into(),
            headers: headers.into_iter().map(|h| h.into().trim().to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Appends a row. Rows whose cells are all blank are dropped.
    pub fn push_row<S: Into<String>>(&mut self, cells: impl IntoIterator<Item = S>) {
        let row: Vec<String> = cells.into_iter().map(|c| c.into().trim().to_string()).collect();
        if row.iter().any(|c| !c.is_empty()) {
            self.rows.push(row);
        }
    }

    /// Appends a row (builder form).
    pub fn with_row<S: Into<String>>(mut self, cells: impl IntoIterator<Item = S>) -> Self {
        self.push_row(cells);
        self
    }

    /// Header texts.
    #[inline]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Header of the first column, if any.
    pub fn first_header(&self) -> Option<&str> {
        self.headers.first().map(String::as_str)
    }

    /// Number of data rows.
    #[inline]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Data rows.
    pub fn rows(&self) -> impl Iterator<Item = &[String]> {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Index of the column whose header folds to the same key as `name`.
    pub fn column(&self, name: &str) -> Option<usize> {
        let wanted = fold_key(name);
        self.headers.iter().position(|h| fold_key(h) == wanted)
    }

    /// Like [`Table::column`], failing with a structural error.
    pub fn require_column(&self, name: &str) -> ExtractResult<usize> {
        self.column(name).ok_or_else(|| ExtractError::MissingColumn {
            table: self.name.clone(),
            column: name.to_string(),
        })
    }

    /// Cell text, or `""` if the row is shorter than `column`.
    pub fn cell(&self, row: usize, column: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .map_or("", String::as_str)
    }

    /// All cells, headers first, joined by single spaces.
    pub fn text(&self) -> String {
        self.headers
            .iter()
            .chain(self.rows.iter().flatten())
            .filter(|c| !c.is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Lookup key for a header: trimmed, lower-case, Spanish accents removed,
/// inner whitespace collapsed.
pub fn fold_key(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .map(|c| match c {
            'á' | 'Á' => 'a',
            'é' | 'É' => 'e',
            'í' | 'Í' => 'i',
            'ó' | 'Ó' => 'o',
            'ú' | 'Ú' | 'ü' | 'Ü' => 'u',
            'ñ' | 'Ñ' => 'n',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}
