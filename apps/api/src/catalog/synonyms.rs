//! Synonym table — canonical skill tokens mapped to known spellings and abbreviations.
//!
//! Source data lists aliases in one direction only (canonical → aliases).
//! The table is NOT pre-symmetrized; `matching::similarity` checks both directions.

use std::collections::{BTreeMap, BTreeSet};

use serde::Deserialize;

use crate::catalog::CatalogError;

const BUILTIN_SYNONYMS: &str = include_str!("../../data/synonyms.json");

/// Immutable canonical → aliases lookup. Keys and aliases are lowercase.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "BTreeMap<String, Vec<String>>")]
pub struct SynonymTable {
    entries: BTreeMap<String, BTreeSet<String>>,
}

impl From<BTreeMap<String, Vec<String>>> for SynonymTable {
    fn from(raw: BTreeMap<String, Vec<String>>) -> Self {
        let mut entries: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for (canonical, aliases) in raw {
            let canonical = normalize_token(&canonical);
            if canonical.is_empty() {
                continue;
            }
            let set = entries.entry(canonical.clone()).or_default();
            set.extend(
                aliases
                    .iter()
                    .map(|a| normalize_token(a))
                    .filter(|a| !a.is_empty() && *a != canonical),
            );
        }
        Self { entries }
    }
}

impl SynonymTable {
    /// Parses the synonym table embedded in the binary.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_SYNONYMS)
    }

    /// Parses a `{"canonical": ["alias", ...]}` JSON document.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        serde_json::from_str(json).map_err(|e| CatalogError::Parse {
            source_name: "synonym table".to_string(),
            source: e,
        })
    }

    /// Aliases declared for a canonical lowercase token, if any.
    pub fn aliases_of(&self, canonical: &str) -> Option<&BTreeSet<String>> {
        self.entries.get(canonical)
    }

    /// True if `canonical` declares `alias`. One direction only.
    pub fn declares(&self, canonical: &str, alias: &str) -> bool {
        self.aliases_of(canonical)
            .map(|set| set.contains(alias))
            .unwrap_or(false)
    }

    /// Iterates `(canonical, aliases)` in sorted canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub(crate) fn normalize_token(raw: &str) -> String {
    raw.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table_parses() {
        let table = SynonymTable::builtin().unwrap();
        assert!(!table.is_empty());
        assert!(table.declares("kubernetes", "k8s"));
    }

    #[test]
    fn test_lookup_is_one_directional() {
        let table = SynonymTable::from_json(r#"{"kubernetes": ["k8s"]}"#).unwrap();
        assert!(table.declares("kubernetes", "k8s"));
        assert!(!table.declares("k8s", "kubernetes"));
        assert!(table.aliases_of("k8s").is_none());
    }

    #[test]
    fn test_keys_and_aliases_are_lowercased_and_trimmed() {
        let table = SynonymTable::from_json(r#"{" JavaScript ": ["ECMAScript", "  ES6 "]}"#).unwrap();
        let aliases = table.aliases_of("javascript").unwrap();
        assert!(aliases.contains("ecmascript"));
        assert!(aliases.contains("es6"));
    }

    #[test]
    fn test_blank_and_self_aliases_dropped() {
        let table = SynonymTable::from_json(r#"{"git": ["", "Git", "git scm"]}"#).unwrap();
        let aliases = table.aliases_of("git").unwrap();
        assert_eq!(aliases.len(), 1);
        assert!(aliases.contains("git scm"));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = SynonymTable::from_json(r#"["not", "a", "map"]"#).unwrap_err();
        assert!(matches!(err, CatalogError::Parse { .. }));
    }
}
