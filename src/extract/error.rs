//! Extraction errors.
//!
//! Row-level problems are collected per table and reported together in
//! [`ExtractError::Rows`]. Everything else aborts immediately.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::ModelError;

/// Block category a table or reference belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Theory lectures (`TEO`, "Teóricos").
    Theory,
    /// Practice classes; one row per offering (`COM`, "Comisiones").
    Practice,
    /// Seminars (`SEM`, "Seminarios"). Optional.
    Seminar,
}

impl Category {
    /// Workbook sheet name.
    pub fn section(self) -> &'static str {
        match self {
            Category::Theory => "TEO",
            Category::Practice => "COM",
            Category::Seminar => "SEM",
        }
    }

    /// First-column header of the matching web table.
    pub fn web_header(self) -> &'static str {
        match self {
            Category::Theory => "Teóricos",
            Category::Practice => "Comisiones",
            Category::Seminar => "Seminarios",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::Theory => "theory",
            Category::Practice => "practice",
            Category::Seminar => "seminar",
        };
        f.write_str(label)
    }
}

/// Coarse classification of every extraction failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed or out-of-range values.
    Validation,
    /// Missing section, table, title or column.
    Structural,
    /// A composite key component did not resolve to a block.
    Reference,
    /// The source itself could not be read or fetched.
    Source,
}

/// A problem with one row of a table.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{table} row {row}: {kind}")]
pub struct RowError {
    /// Table name.
    pub table: String,
    /// 1-based data row (header excluded).
    pub row: usize,
    /// What went wrong.
    pub kind: RowErrorKind,
}

impl RowError {
    /// Creates a row error.
    pub fn new(table: impl Into<String>, row: usize, kind: RowErrorKind) -> Self {
        Self {
            table: table.into(),
            row,
            kind,
        }
    }

    /// Classification of this row error.
    pub fn error_kind(&self) -> ErrorKind {
        match self.kind {
            RowErrorKind::Invalid { .. } | RowErrorKind::MissingValue { .. } => {
                ErrorKind::Validation
            }
            RowErrorKind::UnknownReference { .. } | RowErrorKind::NoSeminarTable { .. } => {
                ErrorKind::Reference
            }
        }
    }
}

/// Row error details.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RowErrorKind {
    /// A cell failed entity validation.
    #[error("column '{column}': {source}")]
    Invalid {
        /// Offending column.
        column: String,
        /// Underlying invariant violation.
        #[source]
        source: ModelError,
    },
    /// A required cell is blank.
    #[error("column '{column}' is empty")]
    MissingValue {
        /// Offending column.
        column: String,
    },
    /// A reference names no known block.
    #[error("{category} reference '{key}' not found")]
    UnknownReference {
        /// Category the key was looked up in.
        category: Category,
        /// Unresolved key.
        key: String,
    },
    /// A seminar reference appeared but no seminar table was supplied.
    #[error("seminar reference '{key}' but the unit has no seminar table")]
    NoSeminarTable {
        /// Unresolved key.
        key: String,
    },
}

/// Extraction failed.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// A required workbook sheet is absent.
    #[error("workbook '{path}' has no '{section}' sheet")]
    MissingSection {
        /// Workbook path.
        path: String,
        /// Sheet name.
        section: String,
    },
    /// A required web table is absent.
    #[error("page has no '{0}' table")]
    MissingTable(String),
    /// A required column is absent.
    #[error("table '{table}' has no '{column}' column")]
    MissingColumn {
        /// Table name.
        table: String,
        /// Column name.
        column: String,
    },
    /// The page title does not carry `( <number> - <name> )`.
    #[error("page title does not match '( <number> - <name> )'")]
    MissingTitle,
    /// One or more rows of a table are invalid.
    #[error("table '{table}' has {} invalid row(s): {}", .errors.len(), join_rows(.errors))]
    Rows {
        /// Table name.
        table: String,
        /// Every row problem found.
        errors: Vec<RowError>,
    },
    /// Failure while extracting a named unit.
    #[error("unit '{unit}': {source}")]
    InUnit {
        /// Unit name.
        unit: String,
        /// Underlying failure.
        #[source]
        source: Box<ExtractError>,
    },
    /// Workbook could not be decoded.
    #[error("failed to read workbook '{path}': {message}")]
    Workbook {
        /// Workbook path.
        path: String,
        /// Decoder message.
        message: String,
    },
    /// Page could not be parsed.
    #[error("failed to parse page: {0}")]
    Html(String),
    /// File system error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// Network error.
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl ExtractError {
    /// Attaches the unit name.
    pub fn in_unit(self, unit: impl Into<String>) -> Self {
        ExtractError::InUnit {
            unit: unit.into(),
            source: Box::new(self),
        }
    }

    /// Classification of this error.
    ///
    /// A row report counts as a validation error if any row is invalid,
    /// otherwise as a reference error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ExtractError::MissingSection { .. }
            | ExtractError::MissingTable(_)
            | ExtractError::MissingColumn { .. }
            | ExtractError::MissingTitle => ErrorKind::Structural,
            ExtractError::Rows { errors, .. } => {
                if errors
                    .iter()
                    .any(|e| e.error_kind() == ErrorKind::Validation)
                {
                    ErrorKind::Validation
                } else {
                    ErrorKind::Reference
                }
            }
            ExtractError::InUnit { source, .. } => source.kind(),
            ExtractError::Workbook { .. }
            | ExtractError::Html(_)
            | ExtractError::Io(_)
            | ExtractError::Http(_) => ErrorKind::Source,
        }
    }

    /// Row errors carried by this error, if any.
    pub fn row_errors(&self) -> &[RowError] {
        match self {
            ExtractError::Rows { errors, .. } => errors,
            ExtractError::InUnit { source, .. } => source.row_errors(),
            _ => &[],
        }
    }
}

fn join_rows(errors: &[RowError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Extraction result type.
pub type ExtractResult<T> = Result<T, ExtractError>;
