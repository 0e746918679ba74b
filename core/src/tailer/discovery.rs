//! Finding EverQuest log files.
//!
//! The client writes one `eqlog_<Character>_<server>.txt` per character,
//! either in the install root or in its `Logs` subdirectory. The most
//! recently modified one belongs to the character currently logged in.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

#[derive(Debug, Clone, PartialEq)]
pub struct LogFileInfo {
    pub path: PathBuf,
    pub character: Option<String>,
    pub server: Option<String>,
    pub modified: SystemTime,
}

impl LogFileInfo {
    pub fn from_path(path: &Path) -> Option<Self> {
        let file_name = path.file_name()?.to_str()?;
        if !is_log_file_name(file_name) {
            return None;
        }
        let modified = fs::metadata(path)
            .and_then(|m| m.modified())
            .unwrap_or(SystemTime::UNIX_EPOCH);
        let (character, server) = parse_log_filename(file_name);

        Some(Self {
            path: path.to_path_buf(),
            character,
            server,
            modified,
        })
    }

    pub fn display_name(&self) -> String {
        match (&self.character, &self.server) {
            (Some(c), Some(s)) => format!("{} ({})", c, s),
            (Some(c), None) => c.clone(),
            _ => self
                .path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default(),
        }
    }
}

pub fn is_log_file_name(file_name: &str) -> bool {
    file_name.starts_with("eqlog") && file_name.ends_with(".txt")
}

/// Split `eqlog_Character_server.txt` into its character and server parts.
pub fn parse_log_filename(file_name: &str) -> (Option<String>, Option<String>) {
    let Some(stem) = file_name
        .strip_prefix("eqlog_")
        .and_then(|s| s.strip_suffix(".txt"))
    else {
        return (None, None);
    };

    match stem.split_once('_') {
        Some((character, server)) if !character.is_empty() => (
            Some(character.to_string()),
            (!server.is_empty()).then(|| server.to_string()),
        ),
        None if !stem.is_empty() => (Some(stem.to_string()), None),
        _ => (None, None),
    }
}

fn scan_dir(dir: &Path) -> Vec<LogFileInfo> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };

    entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter_map(|path| LogFileInfo::from_path(&path))
        .collect()
}

/// All candidate log files, newest first. The install root wins; `Logs` is
/// only consulted when the root has none.
pub fn list_logs(root: &Path) -> Vec<LogFileInfo> {
    let mut logs = scan_dir(root);
    if logs.is_empty() {
        logs = scan_dir(&root.join("Logs"));
    }
    logs.sort_by(|a, b| b.modified.cmp(&a.modified));
    logs
}

/// The log file currently being written to, if any exist.
pub fn find_latest_log(root: &Path) -> Option<PathBuf> {
    list_logs(root).into_iter().next().map(|info| info.path)
}
