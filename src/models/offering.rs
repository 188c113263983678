//! Course offering ("comisión") model.
//!
//! An offering is one concrete timetable option for a course unit: a
//! labelled set of blocks that must all be attended together.

use serde::{Deserialize, Serialize};

use super::{CourseBlock, ModelError};

/// One timetable option of a course unit.
///
/// The selection flag belongs to the external selection UI. The search
/// engine never writes it; see [`crate::search::Selection`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "OfferingFields")]
pub struct CourseOffering {
    id: String,
    /// Blocks in attachment order.
    pub blocks: Vec<CourseBlock>,
    selected: bool,
}

#[derive(Deserialize)]
struct OfferingFields {
    id: String,
    #[serde(default)]
    blocks: Vec<CourseBlock>,
    #[serde(default = "selected_by_default")]
    selected: bool,
}

fn selected_by_default() -> bool {
    true
}

impl TryFrom<OfferingFields> for CourseOffering {
    type Error = ModelError;

    fn try_from(fields: OfferingFields) -> Result<Self, Self::Error> {
        let mut offering = CourseOffering::new(fields.id)?;
        offering.blocks = fields.blocks;
        offering.selected = fields.selected;
        Ok(offering)
    }
}

impl CourseOffering {
    /// Creates an empty, selected offering. The identifier must not be blank.
    pub fn new(id: impl Into<String>) -> Result<Self, ModelError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ModelError::EmptyOfferingId);
        }
        Ok(Self {
            id,
            blocks: Vec::new(),
            selected: true,
        })
    }

    /// Adds a block (builder form).
    pub fn with_block(mut self, block: CourseBlock) -> Self {
        self.blocks.push(block);
        self
    }

    /// Appends a block.
    pub fn add_block(&mut self, block: CourseBlock) {
        self.blocks.push(block);
    }

    /// Offering identifier.
    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Whether any block of `self` collides with any block of `other`.
    pub fn collides_with(&self, other: &Self) -> bool {
        self.blocks
            .iter()
            .any(|a| other.blocks.iter().any(|b| a.collides_with(b)))
    }

    /// Marks the offering as eligible for combination.
    pub fn select(&mut self) {
        self.selected = true;
    }

    /// Excludes the offering from future combinations.
    pub fn deselect(&mut self) {
        self.selected = false;
    }

    /// Current selection flag.
    #[inline]
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Total weekly minutes across all blocks.
    pub fn weekly_minutes(&self) -> u32 {
        self.blocks.iter().map(CourseBlock::duration_minutes).sum()
    }
}
