//! Table extraction.
//!
//! Turns loosely structured source tables into [`CourseUnit`]s.
//!
//! # Pipeline
//!
//! ```text
//! workbook sheet / web table ──▶ Table ──▶ BlockMap (per category)
//!                                              │
//!                  practice rows + Oblig. ─────┴──▶ CourseOffering ──▶ CourseUnit
//! ```
//!
//! # Sources
//!
//! - **Workbook**: sheets `TEO`, `COM`, optional `SEM` ([`read_workbook`],
//!   [`extract_from_directory`]).
//! - **Web page**: a title table plus tables keyed by first header cell
//!   ([`extract_from_html`], [`fetch_unit`]).
//!
//! # Errors
//!
//! Structural problems abort at once. Row problems are collected per table
//! and reported together; see [`ExtractError::kind`].
//!
//! [`CourseUnit`]: crate::models::CourseUnit

mod assemble;
mod blocks;
mod error;
mod reference;
mod source;
mod table;
mod web;
mod workbook;

pub use assemble::extract_unit;
pub use blocks::{normalize_observation, parse_blocks, BlockMap};
pub use error::{Category, ErrorKind, ExtractError, ExtractResult, RowError, RowErrorKind};
pub use reference::{classify_reference, is_theory_reference, split_references, Reference};
pub use source::{extract_from_source, Source};
pub use table::{fold_key, Table};
pub use web::{extract_from_html, fetch_unit, parse_html_tables, parse_title};
pub use workbook::{extract_from_directory, read_workbook};
