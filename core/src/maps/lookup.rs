use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::LookupError;

/// In-game zone name to map file code (`"The Nexus"` → `"nexus"`).
///
/// Keys are stored lower-cased and trimmed; lookups are case-insensitive.
#[derive(Debug, Clone, Default)]
pub struct ZoneLookup {
    codes: HashMap<String, String>,
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

impl ZoneLookup {
    /// Load from a `.json` object or an `.ini`-style `Name = code` file,
    /// chosen by extension.
    pub fn load(path: &Path) -> Result<Self, LookupError> {
        let contents = fs::read_to_string(path).map_err(|e| LookupError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let lookup = if is_json {
            Self::from_json_str(&contents).map_err(|e| LookupError::Json {
                path: path.to_path_buf(),
                source: e,
            })?
        } else {
            Self::from_ini_str(&contents)
        };

        tracing::info!(path = %path.display(), zones = lookup.len(), "Loaded zone lookup");
        Ok(lookup)
    }

    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        let raw: HashMap<String, String> = serde_json::from_str(json)?;
        Ok(raw.into_iter().collect())
    }

    /// `Long Name = code` per line. Blank lines, `#` comments and `[section]`
    /// headers are skipped, as are lines without `=`.
    pub fn from_ini_str(text: &str) -> Self {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with('['))
            .filter_map(|line| line.split_once('='))
            .map(|(name, code)| (name.to_string(), code.trim().to_string()))
            .collect()
    }

    pub fn insert(&mut self, name: &str, code: impl Into<String>) {
        self.codes.insert(normalize(name), code.into());
    }

    pub fn file_code(&self, zone_name: &str) -> Option<&str> {
        self.codes.get(&normalize(zone_name)).map(String::as_str)
    }

    /// The file code, or the zone name itself when there is no entry.
    pub fn file_code_or_name<'a>(&'a self, zone_name: &'a str) -> &'a str {
        self.file_code(zone_name).unwrap_or(zone_name)
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.codes.values().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

impl FromIterator<(String, String)> for ZoneLookup {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut lookup = Self::default();
        for (name, code) in iter {
            lookup.insert(&name, code);
        }
        lookup
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ini_lookup_is_case_insensitive() {
        let lookup = ZoneLookup::from_ini_str(
            "# zone codes\n\
             [zones]\n\
             The Nexus = nexus\n\
             East Commonlands=ecommons\n\
             not a mapping\n",
        );
        assert_eq!(lookup.len(), 2);
        assert_eq!(lookup.file_code("the nexus"), Some("nexus"));
        assert_eq!(lookup.file_code("  EAST COMMONLANDS "), Some("ecommons"));
        assert_eq!(lookup.file_code("Befallen"), None);
    }

    #[test]
    fn test_json_lookup() {
        let lookup =
            ZoneLookup::from_json_str(r#"{"The Nexus": "nexus", "Greater Faydark": "gfaydark"}"#)
                .unwrap();
        assert_eq!(lookup.file_code("greater faydark"), Some("gfaydark"));
        assert!(ZoneLookup::from_json_str("[1, 2]").is_err());
    }

    #[test]
    fn test_miss_falls_back_to_name() {
        let lookup = ZoneLookup::from_ini_str("The Nexus = nexus");
        assert_eq!(lookup.file_code_or_name("The Nexus"), "nexus");
        assert_eq!(lookup.file_code_or_name("Befallen"), "Befallen");
    }

    #[test]
    fn test_load_by_extension() {
        let dir = tempfile::TempDir::new().unwrap();
        let json = dir.path().join("map_keys.json");
        let ini = dir.path().join("map_keys.ini");
        fs::write(&json, r#"{"The Nexus": "nexus"}"#).unwrap();
        fs::write(&ini, "The Nexus = nexus\n").unwrap();

        assert_eq!(ZoneLookup::load(&json).unwrap().file_code("The Nexus"), Some("nexus"));
        assert_eq!(ZoneLookup::load(&ini).unwrap().file_code("The Nexus"), Some("nexus"));
        assert!(matches!(
            ZoneLookup::load(&dir.path().join("missing.json")),
            Err(LookupError::Io { .. })
        ));
    }
}
