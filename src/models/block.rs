//! Course block model.
//!
//! A block is one weekly slot: a weekday plus a half-open time interval
//! `[start, end)`, with optional teacher and observation metadata.
//!
//! # Collision
//! Two blocks collide iff they share a weekday and one block's start lies
//! inside the other's interval:
//!
//! ```text
//! other.start <= self.start < other.end  ||  self.start <= other.start < self.end
//! ```
//!
//! For non-empty intervals this is exactly the half-open overlap test
//! `self.start < other.end && other.start < self.end`: whichever block starts
//! later has its start inside the earlier block iff they overlap. Nesting is
//! caught (the inner start lies in the outer span); touching ends are not.

use serde::{Deserialize, Serialize};

use super::{ModelError, TimeOfDay, Weekday};

/// One weekday/time-interval slot of an offering.
///
/// Equality compares weekday and times only; teacher and observation are
/// metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "BlockFields")]
pub struct CourseBlock {
    weekday: Weekday,
    start: TimeOfDay,
    end: TimeOfDay,
    /// Teacher in charge, if known.
    pub teacher: Option<String>,
    /// Free-text note, possibly multi-line.
    pub observation: Option<String>,
}

/// Wire form of [`CourseBlock`], checked on the way in.
#[derive(Deserialize)]
struct BlockFields {
    weekday: Weekday,
    start: TimeOfDay,
    end: TimeOfDay,
    #[serde(default)]
    teacher: Option<String>,
    #[serde(default)]
    observation: Option<String>,
}

impl TryFrom<BlockFields> for CourseBlock {
    type Error = ModelError;

    fn try_from(fields: BlockFields) -> Result<Self, Self::Error> {
        let mut block = CourseBlock::new(fields.weekday, fields.start, fields.end)?;
        block.teacher = fields.teacher;
        block.observation = fields.observation;
        Ok(block)
    }
}

impl CourseBlock {
    /// Creates a block. Fails unless `start < end`.
    pub fn new(weekday: Weekday, start: TimeOfDay, end: TimeOfDay) -> Result<Self, ModelError> {
        if start >= end {
            return Err(ModelError::EmptyInterval {
                weekday,
                start,
                end,
            });
        }
        Ok(Self {
            weekday,
            start,
            end,
            teacher: None,
            observation: None,
        })
    }

    /// Parses weekday and time texts, then creates the block.
    pub fn parse(weekday: &str, start: &str, end: &str) -> Result<Self, ModelError> {
        Self::new(
            weekday.parse()?,
            TimeOfDay::parse(start)?,
            TimeOfDay::parse(end)?,
        )
    }

    /// Sets the teacher.
    pub fn with_teacher(mut self, teacher: impl Into<String>) -> Self {
        self.teacher = Some(teacher.into());
        self
    }

    /// Sets the observation.
    pub fn with_observation(mut self, observation: impl Into<String>) -> Self {
        self.observation = Some(observation.into());
        self
    }

    /// Day of the week.
    #[inline]
    pub fn weekday(&self) -> Weekday {
        self.weekday
    }

    /// Interval start (inclusive).
    #[inline]
    pub fn start(&self) -> TimeOfDay {
        self.start
    }

    /// Interval end (exclusive).
    #[inline]
    pub fn end(&self) -> TimeOfDay {
        self.end
    }

    /// Length of the block in minutes.
    pub fn duration_minutes(&self) -> u32 {
        self.start.duration_until(self.end)
    }

    /// Whether the two blocks overlap in time on the same weekday.
    pub fn collides_with(&self, other: &Self) -> bool {
        if self.weekday != other.weekday {
            return false;
        }
        (other.start <= self.start && self.start < other.end)
            || (self.start <= other.start && other.start < self.end)
    }
}

impl PartialEq for CourseBlock {
    fn eq(&self, other: &Self) -> bool {
        self.weekday == other.weekday && self.start == other.start && self.end == other.end
    }
}

impl Eq for CourseBlock {}
