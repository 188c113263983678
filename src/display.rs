//! Text rendering for presentation layers.
//!
//! Entities stay free of display concerns; render and export collaborators
//! use these impls and helpers.
//!
//! ```text
//! Comision A
//! LUNES
//! 14:00 - 16:00
//! Prof.: Perez
//! Obser.: Aula 3
//! ```

use std::fmt;

use crate::config::ExtractConfig;
use crate::models::{CourseBlock, CourseOffering, CourseUnit, ScheduleCombination};

/// Wraps `name` onto two lines if it is longer than `width` characters.
///
/// [`unit_title`] applies it with the configured width.
///
/// The break goes at the space closest to the middle. Names without spaces
/// are returned unchanged.
pub fn wrap_name(name: &str, width: usize) -> String {
    let name = name.trim();
    let length = name.chars().count();
    if length <= width {
        return name.to_string();
    }

    let middle = length / 2;
    let split = name
        .char_indices()
        .enumerate()
        .filter(|(_, (_, c))| *c == ' ')
        .min_by_key(|(pos, _)| pos.abs_diff(middle))
        .map(|(_, (byte, _))| byte);

    match split {
        Some(byte) => format!("{}\n{}", name[..byte].trim_end(), name[byte..].trim_start()),
        None => name.to_string(),
    }
}

/// Unit name wrapped at [`ExtractConfig::name_wrap_width`].
pub fn unit_title(unit: &CourseUnit, config: &ExtractConfig) -> String {
    wrap_name(&unit.name, config.name_wrap_width)
}

impl fmt::Display for CourseBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{} - {}", self.weekday(), self.start(), self.end())?;
        write!(f, "\nProf.: {}", self.teacher.as_deref().unwrap_or_default())?;
        if let Some(observation) = &self.observation {
            write!(f, "\nObser.: {observation}")?;
        }
        Ok(())
    }
}

impl fmt::Display for CourseOffering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Comision {}", self.id())?;
        for block in &self.blocks {
            write!(f, "\n{block}")?;
        }
        Ok(())
    }
}

impl fmt::Display for CourseUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "_".repeat(self.name.chars().count());
        writeln!(f, "{rule}\n{}\n{rule}", self.name)?;
        for offering in self.offerings() {
            writeln!(f, "{offering}")?;
        }
        Ok(())
    }
}

impl fmt::Display for ScheduleCombination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.ids().join(", "))
    }
}
