//! # Config Registry
//!
//! Owns the loaded customization records, keyed by entity name.
//!
//! A load pass always replaces the whole registry. Either every record of the
//! document goes in, or exactly the built-in fallback record does.
//!
//! ## Name resolution
//!
//! ```text
//! "Jebediah Kerman"  ->  exact key
//!                    ->  "Jebediah"   ("Kerman" removed, trimmed)
//!                    ->  "Jebediah"   (first whitespace token)
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::document::DocumentParser;
use crate::error::ConfigResult;
use crate::record::CustomizationRecord;

/// Family name stripped during the second resolution step.
const FAMILY_NAME: &str = "Kerman";

/// Where the current registry contents came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigSource {
    /// Nothing loaded yet.
    Empty,
    /// Parsed from a document on disk.
    Document(PathBuf),
    /// Parsed from in-memory text.
    Text,
    /// The built-in record.
    Fallback,
}

/// Name -> record map with display-name fallback lookups.
#[derive(Debug)]
pub struct ConfigRegistry {
    records: HashMap<String, CustomizationRecord>,
    source: ConfigSource,
}

impl Default for ConfigRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: HashMap::new(),
            source: ConfigSource::Empty,
        }
    }

    /// Replaces the contents with the document at `path`.
    ///
    /// A missing, unreadable or malformed document leaves exactly the
    /// built-in record. Returns the number of records now held.
    pub fn load(&mut self, path: &Path, parser: &DocumentParser) -> usize {
        if !path.exists() {
            tracing::warn!("Config document not found at {:?}, using built-in record", path);
            return self.install_fallback(parser);
        }

        match read_document(path, parser) {
            Ok(records) => {
                self.install(records, ConfigSource::Document(path.to_path_buf()));
                tracing::info!("Loaded {} configs from {:?}", self.records.len(), path);
                self.records.len()
            }
            Err(e) => {
                tracing::warn!("Rejected config document {:?}: {}. Using built-in record", path, e);
                self.install_fallback(parser)
            }
        }
    }

    /// Replaces the contents with the records parsed from `text`.
    ///
    /// Same fallback rule as [`Self::load`].
    pub fn load_str(&mut self, text: &str, parser: &DocumentParser) -> usize {
        match parser.parse(text) {
            Ok(records) => {
                self.install(records, ConfigSource::Text);
                self.records.len()
            }
            Err(e) => {
                tracing::warn!("Rejected config document: {}. Using built-in record", e);
                self.install_fallback(parser)
            }
        }
    }

    fn install(&mut self, records: Vec<CustomizationRecord>, source: ConfigSource) {
        self.records.clear();
        for record in records {
            // Later duplicates overwrite earlier ones.
            self.records.insert(record.name.clone(), record);
        }
        self.source = source;
    }

    fn install_fallback(&mut self, parser: &DocumentParser) -> usize {
        self.install(vec![parser.fallback_record()], ConfigSource::Fallback);
        self.records.len()
    }

    /// Record for `name`, trying the exact key, then the name without
    /// "Kerman", then its first word.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&CustomizationRecord> {
        if let Some(record) = self.records.get(name) {
            return Some(record);
        }

        let stripped = name.replace(FAMILY_NAME, "");
        if let Some(record) = self.records.get(stripped.trim()) {
            return Some(record);
        }

        name.split_whitespace()
            .next()
            .and_then(|first| self.records.get(first))
    }

    /// Loaded keys, unordered.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if no records are loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Origin of the current contents.
    #[must_use]
    pub fn source(&self) -> &ConfigSource {
        &self.source
    }

    /// True if the contents are the built-in record.
    #[must_use]
    pub fn used_fallback(&self) -> bool {
        self.source == ConfigSource::Fallback
    }

    /// Drops every record.
    pub fn clear(&mut self) {
        self.records.clear();
        self.source = ConfigSource::Empty;
    }
}

fn read_document(path: &Path, parser: &DocumentParser) -> ConfigResult<Vec<CustomizationRecord>> {
    let text = std::fs::read_to_string(path)?;
    parser.parse(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry(text: &str) -> ConfigRegistry {
        let mut registry = ConfigRegistry::new();
        registry.load_str(text, &DocumentParser::default());
        registry
    }

    #[test]
    fn test_exact_match_first() {
        let registry = registry(
            r#"{"configs": [
                {"kerbalName": "Jebediah Kerman", "trait": "Exact"},
                {"kerbalName": "Jebediah", "trait": "Short"}
            ]}"#,
        );
        let record = registry.get("Jebediah Kerman").unwrap();
        assert_eq!(record.attributes.experience_trait.as_deref(), Some("Exact"));
    }

    #[test]
    fn test_kerman_stripped() {
        let registry = registry(r#"{"configs": [{"kerbalName": "Jebediah"}]}"#);
        assert_eq!(registry.get("Jebediah Kerman").unwrap().name, "Jebediah");
        assert_eq!(registry.get("  Jebediah Kerman ").unwrap().name, "Jebediah");
    }

    #[test]
    fn test_first_token() {
        let registry = registry(r#"{"configs": [{"kerbalName": "Bill"}]}"#);
        assert_eq!(registry.get("Bill Bob Kerman").unwrap().name, "Bill");
        assert_eq!(registry.get("Bill Smith").unwrap().name, "Bill");
    }

    #[test]
    fn test_not_found() {
        let registry = registry(r#"{"configs": [{"kerbalName": "Bill"}]}"#);
        assert!(registry.get("Bob Kerman").is_none());
        assert!(registry.get("").is_none());
        assert!(registry.get("   ").is_none());
    }

    #[test]
    fn test_last_write_wins() {
        let registry = registry(
            r#"{"configs": [
                {"kerbalName": "Val", "courage": 0.1},
                {"kerbalName": "Val", "courage": 0.9}
            ]}"#,
        );
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("Val").unwrap().attributes.courage, 0.9);
    }

    #[test]
    fn test_malformed_document_uses_fallback() {
        let registry = registry(r#"{"configs": [{"kerbalName": "Jeb" ]}"#);
        assert!(registry.used_fallback());
        assert_eq!(registry.len(), 1);
        assert!(registry.get("Valentina Kerman").is_some());
        assert!(registry.get("Jeb").is_none());
    }

    #[test]
    fn test_missing_array_uses_fallback() {
        let registry = registry(r#"{"kerbals": []}"#);
        assert!(registry.used_fallback());
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["Valentina"]);
    }

    #[test]
    fn test_empty_configs_is_empty_registry() {
        let registry = registry(r#"{"configs": []}"#);
        assert!(registry.is_empty());
        assert_eq!(registry.source(), &ConfigSource::Text);
    }

    #[test]
    fn test_reload_replaces_contents() {
        let parser = DocumentParser::default();
        let mut registry = ConfigRegistry::new();
        registry.load_str(r#"{"configs": [{"kerbalName": "A"}, {"kerbalName": "B"}]}"#, &parser);
        assert_eq!(registry.len(), 2);
        registry.load_str(r#"{"configs": [{"kerbalName": "C"}]}"#, &parser);
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["C"]);
    }

    #[test]
    fn test_missing_file_uses_fallback() {
        let mut registry = ConfigRegistry::new();
        let path = std::env::temp_dir().join("kerbonaut_registry_does_not_exist.json");
        assert_eq!(registry.load(&path, &DocumentParser::default()), 1);
        assert!(registry.used_fallback());
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!(
            "kerbonaut_registry_{}.json",
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));
        std::fs::write(&path, r#"{"configs": [{"kerbalName": "Bob Kerman"}]}"#).unwrap();

        let mut registry = ConfigRegistry::new();
        assert_eq!(registry.load(&path, &DocumentParser::default()), 1);
        assert_eq!(registry.source(), &ConfigSource::Document(path.clone()));
        assert!(registry.get("Bob Kerman").is_some());

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_clear() {
        let mut registry = registry(r#"{"configs": [{"kerbalName": "A"}]}"#);
        registry.clear();
        assert!(registry.is_empty());
        assert_eq!(registry.source(), &ConfigSource::Empty);
    }
}
