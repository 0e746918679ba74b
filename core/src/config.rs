//! Config persistence on top of the shared [`AppConfig`] shape.

use std::path::{Path, PathBuf};

use noxmap_types::AppConfig;

use crate::error::ConfigError;

const APP_NAME: &str = "noxmap";

pub trait AppConfigExt: Sized {
    /// Load from the platform config directory, falling back to defaults
    /// if the file is missing or unreadable.
    fn load() -> Self;

    fn try_load() -> Result<Self, ConfigError>;

    fn save(&self) -> Result<(), ConfigError>;
}

impl AppConfigExt for AppConfig {
    fn load() -> Self {
        match Self::try_load() {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(error = %e, "Using default config");
                AppConfig::default()
            }
        }
    }

    fn try_load() -> Result<Self, ConfigError> {
        confy::load(APP_NAME, None).map_err(ConfigError::Load)
    }

    fn save(&self) -> Result<(), ConfigError> {
        confy::store(APP_NAME, None, self).map_err(ConfigError::Save)
    }
}

/// Where [`AppConfigExt::save`] writes, for display purposes.
pub fn config_path() -> Option<PathBuf> {
    confy::get_configuration_file_path(APP_NAME, None).ok()
}

/// Resolve a configured map or lookup path.
///
/// Absolute paths and relative paths that exist from the working directory
/// are used as-is; anything else is looked up under the platform data
/// directory (`~/.local/share/noxmap` on Linux).
pub fn resolve_data_path(configured: &str) -> PathBuf {
    let path = Path::new(configured);
    if path.is_absolute() || path.exists() {
        return path.to_path_buf();
    }
    match dirs::data_dir() {
        Some(dir) => dir.join(APP_NAME).join(path),
        None => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_paths_are_kept() {
        let abs = std::env::temp_dir().join("noxmap-maps");
        let resolved = resolve_data_path(abs.to_str().unwrap());
        assert_eq!(resolved, abs);
    }

    #[test]
    fn missing_relative_paths_move_under_data_dir() {
        let resolved = resolve_data_path("surely/not/here/maps");
        assert!(resolved.ends_with("surely/not/here/maps"));
        if let Some(data) = dirs::data_dir() {
            assert!(resolved.starts_with(data));
        }
    }
}
