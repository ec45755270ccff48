//! Scanner module - Discover and load source unit documents

mod unit;

use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

use crate::error::InputError;

pub use unit::SourceUnit;

/// File name suffix of unit documents found by directory walks.
pub const UNIT_SUFFIX: &str = ".tree.json";

/// Expand the given paths into unit documents.
///
/// Files are taken as given; directories are walked recursively for
/// `*.tree.json`, sorted by name so runs are reproducible.
pub fn discover(paths: &[PathBuf]) -> Result<Vec<PathBuf>, InputError> {
    let mut found = Vec::new();

    for path in paths {
        if path.is_file() {
            found.push(path.clone());
            continue;
        }
        if !path.is_dir() {
            return Err(InputError::NotFound(path.display().to_string()));
        }

        for entry in WalkDir::new(path)
            .sort_by_file_name()
            .into_iter()
            .filter_map(Result::ok)
        {
            if entry.file_type().is_file() && is_unit_document(entry.path()) {
                found.push(entry.into_path());
            }
        }
    }

    debug!(count = found.len(), "Discovered source units");
    Ok(found)
}

fn is_unit_document(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|name| name.ends_with(UNIT_SUFFIX))
}

/// Load every document, in order.
pub async fn load_units(paths: &[PathBuf]) -> Result<Vec<SourceUnit>, InputError> {
    let mut units = Vec::with_capacity(paths.len());
    for path in paths {
        units.push(SourceUnit::load(path).await?);
    }
    Ok(units)
}
