use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::{ZoneLookup, ZoneMap, parse_map_file};
use crate::error::MapError;

/// Base file plus numbered layers, in load order.
pub const LAYER_SUFFIXES: [&str; 4] = ["", "_1", "_2", "_3"];

/// How many present file names to report when a zone is missing.
const MISSING_SAMPLE_SIZE: usize = 5;

/// Index a directory by lower-cased file name. Map packs mix cases freely
/// (`EastKarana.txt`, `eastkarana_1.txt`).
fn index_directory(dir: &Path) -> Result<HashMap<String, PathBuf>, MapError> {
    let entries = fs::read_dir(dir).map_err(|e| MapError::DirectoryUnreadable {
        path: dir.to_path_buf(),
        source: e,
    })?;

    Ok(entries
        .flatten()
        .filter_map(|entry| {
            let name = entry.file_name().to_str()?.to_lowercase();
            Some((name, entry.path()))
        })
        .collect())
}

/// Load every file for zone `code` in `dir` into one map.
///
/// Fails with [`MapError::ZoneNotFound`] if none of the zone's files exist
/// or they hold no geometry at all.
pub fn load_zone(dir: &Path, code: &str) -> Result<ZoneMap, MapError> {
    let index = index_directory(dir)?;
    let mut map = ZoneMap::new(code);
    let mut found = false;

    for suffix in LAYER_SUFFIXES {
        let target = format!("{}{}.txt", code, suffix).to_lowercase();
        let Some(path) = index.get(&target) else {
            continue;
        };

        match parse_map_file(path, &mut map) {
            Ok(0) => {
                tracing::debug!(file = %path.display(), "Map file has no valid items");
            }
            Ok(added) => {
                tracing::debug!(file = %path.display(), items = added, "Parsed map file");
                found = true;
            }
            Err(e) => {
                tracing::warn!(file = %path.display(), error = %e, "Failed to read map file");
            }
        }
    }

    if !found {
        let mut present: Vec<String> = index
            .values()
            .filter_map(|p| p.file_name())
            .map(|n| n.to_string_lossy().to_string())
            .collect();
        present.sort();
        present.truncate(MISSING_SAMPLE_SIZE);

        return Err(MapError::ZoneNotFound {
            zone: code.to_string(),
            directory: dir.to_path_buf(),
            present,
        });
    }

    tracing::info!(
        zone = %code,
        lines = map.lines.len(),
        labels = map.labels.len(),
        "Map loaded"
    );
    Ok(map)
}

/// Resolve an in-game zone name through `lookup`, then load it. Names with
/// no lookup entry are tried as file codes directly.
///
/// The returned map is named after the in-game zone.
pub fn load_zone_for(dir: &Path, lookup: &ZoneLookup, zone_name: &str) -> Result<ZoneMap, MapError> {
    let code = lookup.file_code_or_name(zone_name);
    if code == zone_name {
        tracing::debug!(zone = %zone_name, "No lookup entry, using zone name as file code");
    }
    let mut map = load_zone(dir, code)?;
    map.name = zone_name.to_string();
    Ok(map)
}
