use std::path::PathBuf;

use thiserror::Error;

/// Failures from loading zone map files.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("could not list map directory {path:?}: {source}")]
    DirectoryUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// None of the zone's files exist, or every one of them parsed empty.
    /// `present` holds a few file names that do exist in `directory`.
    #[error("no map files found for zone '{zone}' in {directory:?} (saw: {})", present.join(", "))]
    ZoneNotFound {
        zone: String,
        directory: PathBuf,
        present: Vec<String>,
    },
}

/// Failures from reading the zone name lookup table.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("IO error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed zone lookup {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(#[source] confy::ConfyError),

    #[error("failed to save config: {0}")]
    Save(#[source] confy::ConfyError),
}
