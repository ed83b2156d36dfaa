//! Internationalization (i18n) module for SCP Terminal
//!
//! Translations are a nested JSON tree per language. Keys use dotted
//! namespaces (`"logs.systemInit"`, `"modal.description"`) and are resolved
//! by walking the tree one segment at a time. Missing keys never panic:
//! resolution yields `None` and callers fall back to a literal.

use crate::error::{DataError, DataResult, TranslationError};
use crate::state::Language;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// A node of a language tree: either a leaf string or a nested mapping
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TranslationNode {
    Text(String),
    Branch(BTreeMap<String, TranslationNode>),
}

impl TranslationNode {
    fn child(&self, segment: &str) -> Option<&TranslationNode> {
        match self {
            TranslationNode::Branch(children) => children.get(segment),
            TranslationNode::Text(_) => None,
        }
    }

    fn collect_keys(&self, prefix: &str, out: &mut Vec<String>) {
        match self {
            TranslationNode::Text(_) => out.push(prefix.to_string()),
            TranslationNode::Branch(children) => {
                for (segment, node) in children {
                    let path = if prefix.is_empty() {
                        segment.clone()
                    } else {
                        format!("{}.{}", prefix, segment)
                    };
                    node.collect_keys(&path, out);
                }
            }
        }
    }
}

/// Immutable table of every loaded language, keyed by language code
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct TranslationTable {
    languages: BTreeMap<String, TranslationNode>,
}

impl TranslationTable {
    /// Create an empty table. Every lookup against it yields `None`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a table from JSON text
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load the table from a `translations.json` file
    pub fn load(path: impl AsRef<Path>) -> DataResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| DataError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content).map_err(|source| DataError::ParseError {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Whether the table has a tree for this language
    pub fn has_language(&self, language: Language) -> bool {
        self.languages.contains_key(language.code())
    }

    /// Resolve a dotted key in the given language.
    ///
    /// Walks the language tree segment by segment. Any absent step, a leaf
    /// reached before the last segment, or a branch at the end of the path
    /// yields `None`.
    pub fn resolve(&self, language: Language, key: &str) -> Option<&str> {
        let mut node = self.languages.get(language.code())?;
        for segment in key.split('.') {
            node = node.child(segment)?;
        }
        match node {
            TranslationNode::Text(text) => Some(text.as_str()),
            TranslationNode::Branch(_) => None,
        }
    }

    /// Resolve a key or return the caller-supplied fallback
    pub fn text_or<'a>(&'a self, language: Language, key: &str, fallback: &'a str) -> &'a str {
        self.resolve(language, key).unwrap_or(fallback)
    }

    /// Resolve a key, reporting a missing translation as an error
    pub fn require(&self, language: Language, key: &str) -> Result<&str, TranslationError> {
        self.resolve(language, key)
            .ok_or_else(|| TranslationError::Missing {
                language: language.code().to_string(),
                key: key.to_string(),
            })
    }

    /// Every leaf key of a language, sorted. Empty for unknown languages.
    pub fn keys(&self, language: Language) -> Vec<String> {
        let mut keys = Vec::new();
        if let Some(root) = self.languages.get(language.code()) {
            root.collect_keys("", &mut keys);
        }
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TranslationTable {
        TranslationTable::from_json(
            r#"{
                "es": {"logs": {"systemInit": "Sistema iniciado"}, "a": {"b": "hoja"}},
                "en": {"logs": {"systemInit": "System initialized"}, "a": {"b": "leaf"}}
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_resolve_dotted_key() {
        let table = sample();
        assert_eq!(table.resolve(Language::Es, "logs.systemInit"), Some("Sistema iniciado"));
        assert_eq!(table.resolve(Language::En, "logs.systemInit"), Some("System initialized"));
    }

    #[test]
    fn test_resolve_through_leaf_is_none() {
        let table = sample();
        assert_eq!(table.resolve(Language::En, "a.b.c"), None);
    }

    #[test]
    fn test_resolve_branch_is_none() {
        let table = sample();
        assert_eq!(table.resolve(Language::En, "logs"), None);
        assert_eq!(table.resolve(Language::En, "logs.missing"), None);
        assert_eq!(table.resolve(Language::En, ""), None);
    }

    #[test]
    fn test_missing_language_resolves_nothing() {
        let table = TranslationTable::from_json(r#"{"en": {"x": "y"}}"#).unwrap();
        assert!(!table.has_language(Language::Es));
        assert_eq!(table.resolve(Language::Es, "x"), None);
        assert!(table.keys(Language::Es).is_empty());
        assert_eq!(TranslationTable::new().resolve(Language::En, "x"), None);
    }

    #[test]
    fn test_fallbacks() {
        let table = sample();
        assert_eq!(table.text_or(Language::En, "nope", "literal"), "literal");
        assert_eq!(
            table.require(Language::En, "nope"),
            Err(TranslationError::Missing {
                language: "en".to_string(),
                key: "nope".to_string()
            })
        );
    }

    #[test]
    fn test_non_string_leaf_rejected() {
        assert!(TranslationTable::from_json(r#"{"en": {"count": 3}}"#).is_err());
    }

    #[test]
    fn test_keys_are_leaf_paths() {
        assert_eq!(sample().keys(Language::En), vec!["a.b", "logs.systemInit"]);
    }

    #[test]
    fn test_bundled_languages_have_same_keys() {
        let table = TranslationTable::from_json(include_str!("../data/translations.json")).unwrap();
        let spanish = table.keys(Language::Es);
        assert!(!spanish.is_empty());
        for language in Language::all() {
            assert_eq!(table.keys(*language), spanish, "{} key set differs", language);
            for key in &spanish {
                assert!(table.resolve(*language, key).is_some());
            }
        }
    }
}
