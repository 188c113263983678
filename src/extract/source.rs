//! Source dispatch.

use std::path::{Path, PathBuf};

use crate::config::ExtractConfig;
use crate::models::CourseUnit;

use super::{extract_from_directory, fetch_unit, read_workbook, ExtractResult};

/// Where course units come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Every workbook in a directory, one unit each.
    Directory(PathBuf),
    /// A single unit workbook.
    Workbook(PathBuf),
    /// A single unit page.
    Url(String),
}

impl Source {
    /// Interprets a user-supplied location: `http(s)://` URLs are pages,
    /// existing directories are directories, anything else a workbook path.
    pub fn detect(location: &str) -> Self {
        let trimmed = location.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Source::Url(trimmed.to_string())
        } else if Path::new(trimmed).is_dir() {
            Source::Directory(PathBuf::from(trimmed))
        } else {
            Source::Workbook(PathBuf::from(trimmed))
        }
    }
}

/// Extracts all units available from `source`.
pub fn extract_from_source(source: &Source, config: &ExtractConfig) -> ExtractResult<Vec<CourseUnit>> {
    match source {
        Source::Directory(dir) => extract_from_directory(dir, config),
        Source::Workbook(path) => Ok(vec![read_workbook(path, config)?]),
        Source::Url(url) => Ok(vec![fetch_unit(url, config)?]),
    }
}
