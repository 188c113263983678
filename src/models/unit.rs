//! Course unit ("materia") model.

use serde::{Deserialize, Serialize};

use super::{CourseOffering, ModelError};

/// A course with several alternative offerings.
///
/// Offering order is extraction order and drives search iteration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "UnitFields")]
pub struct CourseUnit {
    /// Display name.
    pub name: String,
    offerings: Vec<CourseOffering>,
}

#[derive(Deserialize)]
struct UnitFields {
    name: String,
    #[serde(default)]
    offerings: Vec<CourseOffering>,
}

impl TryFrom<UnitFields> for CourseUnit {
    type Error = ModelError;

    fn try_from(fields: UnitFields) -> Result<Self, Self::Error> {
        fields
            .offerings
            .into_iter()
            .try_fold(CourseUnit::new(fields.name), CourseUnit::with_offering)
    }
}

impl CourseUnit {
    /// Creates a unit with no offerings.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            offerings: Vec::new(),
        }
    }

    /// Appends an offering. Identifiers must be unique within the unit.
    pub fn add_offering(&mut self, offering: CourseOffering) -> Result<(), ModelError> {
        if self.offering(offering.id()).is_some() {
            return Err(ModelError::DuplicateOfferingId {
                unit: self.name.clone(),
                id: offering.id().to_string(),
            });
        }
        self.offerings.push(offering);
        Ok(())
    }

    /// Adds an offering (builder form).
    pub fn with_offering(mut self, offering: CourseOffering) -> Result<Self, ModelError> {
        self.add_offering(offering)?;
        Ok(self)
    }

    /// All offerings in order.
    #[inline]
    pub fn offerings(&self) -> &[CourseOffering] {
        &self.offerings
    }

    /// Mutable access for toggling selection flags.
    pub fn offerings_mut(&mut self) -> &mut [CourseOffering] {
        &mut self.offerings
    }

    /// Finds an offering by identifier.
    pub fn offering(&self, id: &str) -> Option<&CourseOffering> {
        self.offerings.iter().find(|o| o.id() == id)
    }

    /// Finds an offering by identifier for mutation.
    pub fn offering_mut(&mut self, id: &str) -> Option<&mut CourseOffering> {
        self.offerings.iter_mut().find(|o| o.id() == id)
    }

    /// Offerings whose selection flag is set, in order.
    pub fn selected_offerings(&self) -> Vec<&CourseOffering> {
        self.offerings.iter().filter(|o| o.is_selected()).collect()
    }

    /// Number of offerings.
    pub fn offering_count(&self) -> usize {
        self.offerings.len()
    }
}
