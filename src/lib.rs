//! Weekly timetable combiner.
//!
//! Finds every conflict-free way of taking one offering from each of a set of
//! course units, and builds those units from workbook or web page tables.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Weekday`, `TimeOfDay`, `CourseBlock`,
//!   `CourseOffering`, `CourseUnit`, `ScheduleCombination`
//! - **`search`**: Backtracking enumeration of valid combinations
//! - **`extract`**: Table extraction from `.xlsx` workbooks and HTML pages
//! - **`config`**: TOML-backed extraction and search settings
//! - **`display`**: Text rendering used by presentation layers
//!
//! # Example
//!
//! ```
//! use u_timetable::models::{CourseBlock, CourseOffering, CourseUnit};
//! use u_timetable::search::find_combinations;
//!
//! let block = |day, start, end| CourseBlock::parse(day, start, end).unwrap();
//! let algebra = CourseUnit::new("Algebra")
//!     .with_offering(CourseOffering::new("A").unwrap().with_block(block("LUNES", "14:00", "16:00")))
//!     .unwrap();
//! let images = CourseUnit::new("Imagenes")
//!     .with_offering(CourseOffering::new("X").unwrap().with_block(block("LUNES", "15:00", "17:00")))
//!     .unwrap()
//!     .with_offering(CourseOffering::new("Y").unwrap().with_block(block("MARTES", "15:00", "17:00")))
//!     .unwrap();
//!
//! let combos = find_combinations(&[algebra, images]);
//! assert_eq!(combos.len(), 1);
//! assert_eq!(combos[0].ids(), vec!["A", "Y"]);
//! ```

pub mod config;
pub mod display;
pub mod extract;
pub mod models;
pub mod search;
