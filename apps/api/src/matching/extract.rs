//! Skill mention scan — spots catalog skills named in plain résumé text.
//!
//! Keyword spotting only: a skill is found when its name, one of its aliases,
//! or a synonym-table term appears as a whole token sequence in the text.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::catalog::SkillCatalog;

static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-z0-9#+./-]+").expect("token regex is valid"));

/// Returns canonical skill names mentioned in `text`, first-seen catalog order,
/// deduplicated case-insensitively.
///
/// Requirement names come first (roles in catalog order, default role last),
/// then synonym-table hits. A synonym canonical that is also a requirement name
/// or alias is reported under that requirement's display name ("docker" →
/// "Containers"); canonicals the catalog does not list come back lowercase,
/// as the synonym table stores them.
pub fn extract_skills(catalog: &SkillCatalog, text: &str) -> Vec<String> {
    let haystack = normalize_text(text);
    if haystack.trim().is_empty() {
        return Vec::new();
    }

    let requirement_terms: Vec<(&str, Vec<&str>)> = catalog
        .roles
        .all_roles()
        .flat_map(|role| role.requirements())
        .map(|req| {
            let terms: Vec<&str> = std::iter::once(req.name.as_str())
                .chain(req.aliases.iter().map(String::as_str))
                .collect();
            (req.name.as_str(), terms)
        })
        .collect();

    // lowercase requirement term -> display name, first role wins
    let mut display: HashMap<String, &str> = HashMap::new();
    for (name, terms) in &requirement_terms {
        for term in terms {
            display.entry(term.to_lowercase()).or_insert(*name);
        }
    }

    let synonym_terms = catalog.synonyms.iter().map(|(canonical, aliases)| {
        let terms: Vec<&str> = std::iter::once(canonical)
            .chain(aliases.iter().map(String::as_str))
            .collect();
        let name = display.get(canonical).copied().unwrap_or(canonical);
        (name, terms)
    });

    let mut seen = HashSet::new();
    let mut found = Vec::new();
    for (name, terms) in requirement_terms.iter().cloned().chain(synonym_terms) {
        let key = name.to_lowercase();
        if seen.contains(&key) {
            continue;
        }
        if terms.iter().any(|t| mentions(&haystack, t)) {
            seen.insert(key);
            found.push(name.to_string());
        }
    }

    debug!("Skill scan found {} skills in {} chars", found.len(), text.len());
    found
}

/// True if `term` occurs in the padded, normalized haystack as whole tokens.
fn mentions(haystack: &str, term: &str) -> bool {
    let needle = normalize_text(term);
    if needle.trim().is_empty() {
        return false;
    }
    haystack.contains(&needle)
}

/// Lowercases, keeps skill-ish tokens, strips trailing sentence punctuation,
/// and joins with single spaces padded on both ends.
fn normalize_text(text: &str) -> String {
    let lower = text.to_lowercase();
    let tokens: Vec<&str> = TOKEN_RE
        .find_iter(&lower)
        .map(|m| m.as_str().trim_end_matches(['.', '-', '/']))
        .filter(|t| !t.is_empty())
        .collect();
    format!(" {} ", tokens.join(" "))
}
