//! Timetable domain models.
//!
//! Provides the temporal primitives and entities the search consumes.
//!
//! # Domain Mappings
//!
//! | u-timetable | University | Original term |
//! |-------------|------------|---------------|
//! | CourseUnit | Course | Materia / Subject |
//! | CourseOffering | Section | Comisión |
//! | CourseBlock | Meeting slot | Teórico / Seminario / Práctico |
//! | ScheduleCombination | Weekly timetable | Combinación |

mod block;
mod combination;
mod error;
mod offering;
mod time;
mod unit;

pub use block::CourseBlock;
pub use combination::ScheduleCombination;
pub use error::ModelError;
pub use offering::CourseOffering;
pub use time::{TimeOfDay, Weekday};
pub use unit::CourseUnit;
