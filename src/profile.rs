//! Named format profiles.
//!
//! A profile stores the column separator, string delimiter and block size
//! for a known input file layout so they do not have to be repeated on the
//! command line. Profiles live in a JSON file (`profiles.dat`) next to the
//! executable, with a fallback in the user config directory. A non-empty
//! profile value takes precedence over the matching command-line flag.

use anyhow::Context;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const PROFILE_FILE_NAME: &str = "profiles.dat";

/// Stored format parameters for one profile.
///
/// Blank fields mean "no override". `block_size` accepts a JSON number, a
/// numeric string, or an empty string for compatibility with hand-edited
/// profile files.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub column_sep: String,
    pub string_sep: String,
    #[serde(deserialize_with = "de_block_size")]
    pub block_size: Option<usize>,
}

fn de_block_size<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => Ok(None),
        serde_json::Value::String(s) if s.is_empty() => Ok(None),
        serde_json::Value::String(s) => s
            .parse::<usize>()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("invalid block_size '{}'", s))),
        serde_json::Value::Number(n) => n
            .as_u64()
            .map(|v| Some(v as usize))
            .ok_or_else(|| D::Error::custom("block_size must be a non-negative integer")),
        other => Err(D::Error::custom(format!(
            "block_size must be a number or string, got {}",
            other
        ))),
    }
}

/// Read-only lookup table of named profiles.
#[derive(Debug, Clone, Default)]
pub struct ProfileStore {
    profiles: BTreeMap<String, Profile>,
}

impl ProfileStore {
    /// Load a profile store from a JSON file.
    ///
    /// The file may start with a UTF-8 byte order mark (some editors write
    /// one); it is stripped before parsing.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("cannot read profile file '{}'", path.display()))?;
        let content = content.trim_start_matches('\u{feff}');

        let profiles: BTreeMap<String, Profile> = serde_json::from_str(content)
            .with_context(|| format!("malformed profile file '{}'", path.display()))?;

        Ok(Self { profiles })
    }

    /// Locate the default profile file: next to the executable first, then
    /// the user config directory.
    pub fn default_path() -> Option<PathBuf> {
        if let Ok(exe) = std::env::current_exe() {
            if let Some(dir) = exe.parent() {
                let candidate = dir.join(PROFILE_FILE_NAME);
                if candidate.exists() {
                    return Some(candidate);
                }
            }
        }

        dirs::config_dir().map(|d| d.join("insgen").join(PROFILE_FILE_NAME))
    }

    pub fn get(&self, name: &str) -> Option<&Profile> {
        self.profiles.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Profile)> {
        self.profiles.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Effective format settings after merging flags with a profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatSettings {
    pub column_sep: String,
    pub string_sep: String,
    pub block_size: usize,
}

impl FormatSettings {
    /// Apply a profile on top of explicit settings. Non-empty profile
    /// values win; blank ones leave the explicit value in place.
    pub fn apply_profile(mut self, profile: &Profile) -> Self {
        if !profile.column_sep.is_empty() {
            self.column_sep = profile.column_sep.clone();
        }
        if !profile.string_sep.is_empty() {
            self.string_sep = profile.string_sep.clone();
        }
        if let Some(block_size) = profile.block_size {
            self.block_size = block_size;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn store_from(json: &str) -> ProfileStore {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file.flush().unwrap();
        ProfileStore::load(file.path()).unwrap()
    }

    #[test]
    fn test_load_profiles() {
        let store = store_from(
            r#"{
                "excel_export": {"column_sep": ";", "string_sep": "\"", "block_size": 50},
                "legacy": {"column_sep": ",", "string_sep": "", "block_size": ""}
            }"#,
        );

        let excel = store.get("excel_export").unwrap();
        assert_eq!(excel.column_sep, ";");
        assert_eq!(excel.block_size, Some(50));

        let legacy = store.get("legacy").unwrap();
        assert_eq!(legacy.string_sep, "");
        assert_eq!(legacy.block_size, None);

        assert!(store.get("missing").is_none());
    }

    #[test]
    fn test_block_size_as_numeric_string() {
        let store = store_from(r#"{"p": {"block_size": "25"}}"#);
        assert_eq!(store.get("p").unwrap().block_size, Some(25));
    }

    #[test]
    fn test_bom_is_stripped() {
        let store = store_from("\u{feff}{\"p\": {\"column_sep\": \"|\"}}");
        assert_eq!(store.get("p").unwrap().column_sep, "|");
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"not json").unwrap();
        file.flush().unwrap();
        assert!(ProfileStore::load(file.path()).is_err());
    }

    #[test]
    fn test_profile_overrides_explicit_settings() {
        let explicit = FormatSettings {
            column_sep: ";".to_string(),
            string_sep: "'".to_string(),
            block_size: 1,
        };
        let profile = Profile {
            column_sep: ",".to_string(),
            string_sep: String::new(),
            block_size: Some(10),
        };

        let effective = explicit.apply_profile(&profile);
        assert_eq!(effective.column_sep, ",");
        // Blank profile field leaves the flag value in effect
        assert_eq!(effective.string_sep, "'");
        assert_eq!(effective.block_size, 10);
    }
}
