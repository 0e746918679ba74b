//! Persisted application configuration.
//!
//! Loading and saving live in `noxmap-core`; this crate only defines the
//! shape so every consumer agrees on field names and defaults.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// EverQuest install directory. `eqlog_*.txt` files are looked up here
    /// first, then in its `Logs` subdirectory.
    pub log_directory: String,
    /// Directory holding zone map files (`<code>.txt`, `<code>_1.txt`, ...).
    pub map_directory: String,
    /// Long zone name to map file code table (`.ini` or `.json`).
    pub zone_lookup_path: String,
    pub tailer: TailerSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_directory: String::new(),
            map_directory: "assets/maps".to_string(),
            zone_lookup_path: "assets/maps/map_keys.json".to_string(),
            tailer: TailerSettings::default(),
        }
    }
}

/// Timing and buffer knobs for the log tailer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TailerSettings {
    /// How often to re-check which log file is newest.
    pub poll_interval_ms: u64,
    /// Sleep between read attempts when the file has no new data.
    pub idle_sleep_ms: u64,
    /// Sleep between discovery attempts while no log file exists.
    pub no_file_sleep_ms: u64,
    /// Bytes re-read from the tail of a log file when switching to it.
    pub switch_seek_back_bytes: u64,
    /// Bytes scanned at startup to find the last zone entered.
    pub initial_scan_bytes: u64,
    pub queue_capacity: usize,
}

impl Default for TailerSettings {
    fn default() -> Self {
        Self {
            poll_interval_ms: 3_000,
            idle_sleep_ms: 100,
            no_file_sleep_ms: 1_000,
            switch_seek_back_bytes: 5_000,
            initial_scan_bytes: 50_000,
            queue_capacity: 1_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_fills_defaults() {
        let toml = r#"
log_directory = "/games/everquest"

[tailer]
poll_interval_ms = 500
"#;
        let config: AppConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.log_directory, "/games/everquest");
        assert_eq!(config.map_directory, "assets/maps");
        assert_eq!(config.tailer.poll_interval_ms, 500);
        assert_eq!(config.tailer.switch_seek_back_bytes, 5_000);
        assert_eq!(config.tailer.queue_capacity, 1_000);
    }

    #[test]
    fn empty_toml_is_default() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
    }
}
