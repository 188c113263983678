//! Composite reference field (`Oblig.`) handling.
//!
//! A practice row lists the theory and seminar blocks an offering must also
//! attend, e.g. `"IV - S2"`. Textual order is not reliable; the format is.
//! Theory identifiers are small Roman numerals, anything else is a seminar.

use once_cell::sync::Lazy;
use regex::Regex;

use super::Category;

/// `I`..`XXXIX`: up to three `X`, then `IX`, `IV`, or `V?I{0,3}`.
static THEORY_ID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^X{0,3}(?:IX|IV|V?I{0,3})$").expect("THEORY_ID pattern is valid")
});

/// One resolved component of a composite reference field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    /// Category the identifier must be looked up in.
    pub category: Category,
    /// Block identifier.
    pub key: String,
}

/// Whether `id` reads as a theory (Roman numeral) identifier.
pub fn is_theory_reference(id: &str) -> bool {
    let id = id.trim();
    !id.is_empty() && THEORY_ID.is_match(id)
}

/// Classifies one identifier as a theory or seminar reference.
pub fn classify_reference(id: &str) -> Reference {
    let key = id.trim().to_string();
    let category = if is_theory_reference(&key) {
        Category::Theory
    } else {
        Category::Seminar
    };
    Reference { category, key }
}

/// Splits a composite field on `delimiter` and classifies each component.
/// Blank components are dropped.
pub fn split_references(field: &str, delimiter: &str) -> Vec<Reference> {
    let parts: Vec<&str> = if delimiter.is_empty() {
        vec![field]
    } else {
        field.split(delimiter).collect()
    };
    parts
        .into_iter()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(classify_reference)
        .collect()
}
