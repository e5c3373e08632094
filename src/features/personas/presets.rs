//! # Preset Catalog
//!
//! Named, pre-authored personas loaded once from a JSON file. The file maps
//! a preset name to its fields:
//!
//! ```json
//! {
//!   "Pirate": {
//!     "personality_description": "Boisterous sea dog",
//!     "favorite_topics": "treasure, ships",
//!     "communication_style": "Salty",
//!     "preferred_language": "English",
//!     "avatar_icon": "🏴‍☠️"
//!   }
//! }
//! ```
//!
//! A missing or malformed file degrades to an empty catalog so the custom
//! persona path stays usable.

use anyhow::{Context, Result};
use log::{error, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// One preset entry as stored in the JSON resource
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PresetRecord {
    #[serde(default)]
    pub personality_description: String,
    #[serde(default)]
    pub favorite_topics: String,
    #[serde(default)]
    pub communication_style: String,
    #[serde(default)]
    pub preferred_language: String,
    #[serde(default)]
    pub avatar_icon: Option<String>,
}

/// Read-only mapping from preset name to record, sorted by name
#[derive(Debug, Clone, Default)]
pub struct PresetCatalog {
    presets: BTreeMap<String, PresetRecord>,
}

impl PresetCatalog {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_json(contents: &str) -> Result<Self> {
        let presets: BTreeMap<String, PresetRecord> =
            serde_json::from_str(contents).context("Preset file is not a name -> preset object")?;
        Ok(Self { presets })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read presets from {}", path.display()))?;
        Self::from_json(&contents)
    }

    /// Load the catalog, logging and returning an empty one on any failure
    pub fn load_or_empty(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            info!(
                "📄 No preset file found at {} - only custom personas available",
                path.display()
            );
            return Self::empty();
        }

        match Self::load(path) {
            Ok(catalog) => {
                info!("📄 Loaded {} presets from {}", catalog.len(), path.display());
                catalog
            }
            Err(e) => {
                error!("❌ Failed to load presets from {}: {e:#}", path.display());
                Self::empty()
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&PresetRecord> {
        self.presets.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.presets.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"{
        "Pirate": {
            "personality_description": "Boisterous sea dog",
            "favorite_topics": "treasure, ships",
            "communication_style": "Salty",
            "preferred_language": "English",
            "avatar_icon": "🏴‍☠️"
        },
        "Librarian": {
            "personality_description": "Quiet and precise",
            "favorite_topics": "books",
            "communication_style": "Formal",
            "preferred_language": "French"
        }
    }"#;

    #[test]
    fn test_parse_catalog() {
        let catalog = PresetCatalog::from_json(SAMPLE).unwrap();
        assert_eq!(catalog.len(), 2);

        let pirate = catalog.get("Pirate").unwrap();
        assert_eq!(pirate.favorite_topics, "treasure, ships");
        assert_eq!(pirate.avatar_icon.as_deref(), Some("🏴‍☠️"));

        let librarian = catalog.get("Librarian").unwrap();
        assert!(librarian.avatar_icon.is_none());
    }

    #[test]
    fn test_names_sorted() {
        let catalog = PresetCatalog::from_json(SAMPLE).unwrap();
        let names: Vec<&str> = catalog.names().collect();
        assert_eq!(names, vec!["Librarian", "Pirate"]);
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(PresetCatalog::from_json("[1, 2, 3]").is_err());
        assert!(PresetCatalog::from_json("not json").is_err());
    }

    #[test]
    fn test_load_or_empty_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = PresetCatalog::load_or_empty(dir.path().join("absent.json"));
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_load_or_empty_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ broken").unwrap();
        let catalog = PresetCatalog::load_or_empty(file.path());
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{SAMPLE}").unwrap();
        let catalog = PresetCatalog::load_or_empty(file.path());
        assert_eq!(catalog.len(), 2);
    }
}
