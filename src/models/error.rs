//! Entity construction errors.
//!
//! Every invariant of the temporal primitives and entities is checked on
//! construction. A value that exists is valid.

use thiserror::Error;

use super::{TimeOfDay, Weekday};

/// An entity invariant was violated during construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// Time text has fewer than four significant characters.
    #[error("time text '{0}' is too short (expected hh?mm)")]
    TooShort(String),
    /// Hour or minute digits are not numeric.
    #[error("time text '{0}' has a non-numeric hour or minute")]
    NotNumeric(String),
    /// Hour is outside 0..=23.
    #[error("hour must be in range 0..=23, got {0}")]
    HourOutOfRange(u32),
    /// Minute is outside 0..=59.
    #[error("minute must be in range 0..=59, got {0}")]
    MinuteOutOfRange(u32),
    /// Weekday text is not one of the six teaching days.
    #[error("'{0}' is not a valid weekday")]
    UnknownWeekday(String),
    /// Block start is not strictly before its end.
    #[error("block on {weekday} starts at {start} but ends at {end}")]
    EmptyInterval {
        /// Day of the rejected block.
        weekday: Weekday,
        /// Rejected start.
        start: TimeOfDay,
        /// Rejected end.
        end: TimeOfDay,
    },
    /// Offering identifier is blank.
    #[error("offering identifier must not be empty")]
    EmptyOfferingId,
    /// Two offerings of the same unit share an identifier.
    #[error("unit '{unit}' already has an offering '{id}'")]
    DuplicateOfferingId {
        /// Unit name.
        unit: String,
        /// Repeated identifier.
        id: String,
    },
}
