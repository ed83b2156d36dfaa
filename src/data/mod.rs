//! Startup data feeds
//!
//! Read-only record tables loaded once from JSON files in the data
//! directory. Records only need their expected fields; anything else in
//! the feed is ignored.

use crate::error::{DataError, DataResult};
use crate::i18n::TranslationTable;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Feed file names inside the data directory
pub const ENTRIES_FILE: &str = "scps.json";
pub const PERSONNEL_FILE: &str = "personnel.json";
pub const INCIDENTS_FILE: &str = "incidents.json";
pub const TRANSLATIONS_FILE: &str = "translations.json";

/// An anomaly database entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Designation, e.g. `SCP-173`
    pub number: String,

    /// Object class (`safe`, `euclid`, `keter`, ...)
    #[serde(rename = "class")]
    pub object_class: String,

    pub name: String,
    pub description: String,
    pub containment: String,
    pub procedures: String,
    pub addendum: String,
}

/// A personnel registry row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: String,
    pub name: String,
    pub clearance: String,
    pub department: String,

    /// Status code, also the last segment of its translation key
    pub status: String,
}

/// An incident report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Incident {
    pub id: String,
    pub severity: String,
    pub date: String,
    pub subject: String,
    pub description: String,
}

/// All record tables shown by the interface
#[derive(Debug, Clone, Default)]
pub struct DataFeeds {
    pub entries: Vec<Entry>,
    pub personnel: Vec<Person>,
    pub incidents: Vec<Incident>,
}

impl DataFeeds {
    /// Load every record feed from a data directory
    pub fn load_dir(dir: impl AsRef<Path>) -> DataResult<Self> {
        let dir = dir.as_ref();
        Ok(Self {
            entries: read_feed(&dir.join(ENTRIES_FILE))?,
            personnel: read_feed(&dir.join(PERSONNEL_FILE))?,
            incidents: read_feed(&dir.join(INCIDENTS_FILE))?,
        })
    }

    /// Find an entry by its designation
    pub fn entry(&self, number: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.number.eq_ignore_ascii_case(number))
    }
}

/// Record feeds plus the translation table
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub feeds: DataFeeds,
    pub translations: TranslationTable,
}

impl Catalog {
    /// Load feeds and translations.
    ///
    /// A failing feed degrades to empty tables and is reported back so the
    /// caller can log it; the session still starts.
    pub fn load_or_empty(dir: impl AsRef<Path>) -> (Self, Vec<DataError>) {
        let dir = dir.as_ref();
        let mut errors = Vec::new();

        let feeds = DataFeeds::load_dir(dir).unwrap_or_else(|e| {
            errors.push(e);
            DataFeeds::default()
        });
        let translations =
            TranslationTable::load(dir.join(TRANSLATIONS_FILE)).unwrap_or_else(|e| {
                errors.push(e);
                TranslationTable::new()
            });

        (Self { feeds, translations }, errors)
    }
}

fn read_feed<T: DeserializeOwned>(path: &Path) -> DataResult<Vec<T>> {
    let content = std::fs::read_to_string(path).map_err(|source| DataError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| DataError::ParseError {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Language;

    fn bundled_dir() -> std::path::PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("data")
    }

    #[test]
    fn test_load_bundled_feeds() {
        let feeds = DataFeeds::load_dir(bundled_dir()).unwrap();
        assert!(!feeds.entries.is_empty());
        assert!(!feeds.personnel.is_empty());
        assert!(!feeds.incidents.is_empty());
        assert_eq!(feeds.entry("scp-173").unwrap().object_class, "euclid");
    }

    #[test]
    fn test_record_missing_field_fails() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(ENTRIES_FILE), r#"[{"number": "SCP-1"}]"#).unwrap();
        std::fs::write(dir.path().join(PERSONNEL_FILE), "[]").unwrap();
        std::fs::write(dir.path().join(INCIDENTS_FILE), "[]").unwrap();

        let err = DataFeeds::load_dir(dir.path()).unwrap_err();
        assert!(matches!(err, DataError::ParseError { .. }));
        assert!(err.path().ends_with(ENTRIES_FILE));
    }

    #[test]
    fn test_catalog_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let (catalog, errors) = Catalog::load_or_empty(dir.path());
        assert_eq!(errors.len(), 2);
        assert!(catalog.feeds.entries.is_empty());
        assert_eq!(catalog.translations.resolve(Language::Es, "logs.systemInit"), None);
    }

    #[test]
    fn test_catalog_loads_bundled() {
        let (catalog, errors) = Catalog::load_or_empty(bundled_dir());
        assert!(errors.is_empty());
        assert_eq!(
            catalog.translations.resolve(Language::En, "logs.systemInit"),
            Some("System initialized")
        );
    }
}
