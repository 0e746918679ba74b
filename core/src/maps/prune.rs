//! Finding map files that no zone in the lookup refers to.
//!
//! Map packs ship thousands of files for zones a given server never uses.

use std::fs;
use std::path::{Path, PathBuf};

use super::ZoneLookup;
use crate::error::MapError;

fn is_lookup_file(name: &str) -> bool {
    name.eq_ignore_ascii_case("map_keys.json") || name.eq_ignore_ascii_case("map_keys.ini")
}

/// Whether `stem` (lower-cased, no extension) belongs to a known zone,
/// either as the base file or as `<code>_<layer>`.
fn is_known(stem: &str, codes: &[String]) -> bool {
    codes.iter().any(|code| {
        stem == code
            || stem
                .strip_prefix(code.as_str())
                .is_some_and(|rest| rest.starts_with('_'))
    })
}

/// `.txt` files in `dir` that belong to no zone in `lookup`, sorted.
pub fn stale_map_files(dir: &Path, lookup: &ZoneLookup) -> Result<Vec<PathBuf>, MapError> {
    let entries = fs::read_dir(dir).map_err(|e| MapError::DirectoryUnreadable {
        path: dir.to_path_buf(),
        source: e,
    })?;
    let codes: Vec<String> = lookup.codes().map(str::to_lowercase).collect();

    let mut stale: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| {
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                return false;
            };
            if is_lookup_file(name) {
                return false;
            }
            let lower = name.to_lowercase();
            match lower.strip_suffix(".txt") {
                Some(stem) => !is_known(stem, &codes),
                None => false,
            }
        })
        .collect();
    stale.sort();
    Ok(stale)
}

/// Delete `files`, returning how many were removed. Failures are logged and
/// skipped.
pub fn remove_files(files: &[PathBuf]) -> usize {
    files
        .iter()
        .filter(|path| match fs::remove_file(path) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(file = %path.display(), error = %e, "Failed to delete map file");
                false
            }
        })
        .count()
}
