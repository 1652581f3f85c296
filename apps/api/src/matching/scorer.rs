//! Match scoring — user skills vs a role's requirements.
//!
//! `AppState` holds an `Arc<dyn FitScorer>`; `CatalogFitScorer` is the default.
//! Scoring is pure over the immutable catalog: same inputs, same output.

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::{Importance, RoleDefinition, SkillCatalog};
use crate::matching::similarity::SimilarityMatcher;

// ────────────────────────────────────────────────────────────────────────────
// Output data model
// ────────────────────────────────────────────────────────────────────────────

/// Result of scoring one skill list against one role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    /// Resolved role name (the default role's name when `fallback` is set).
    pub role: String,
    pub fallback: bool,
    pub match_score: u32, // 0 – 100
    /// Original user strings that matched the role's skill pool.
    pub matched_skills: Vec<String>,
    /// Requirement names with no satisfying user skill, catalog order.
    pub missing_skills: Vec<String>,
    pub critical_missing: Vec<String>,
    pub important_missing: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Swappable scoring backend. Carried in `AppState` as `Arc<dyn FitScorer>`.
pub trait FitScorer: Send + Sync {
    fn score(&self, user_skills: &[String], role_name: &str) -> MatchResult;

    /// Label reported to callers, e.g. "catalog".
    fn backend(&self) -> &'static str;
}

/// Default scorer over the shared skill catalog.
pub struct CatalogFitScorer {
    catalog: Arc<SkillCatalog>,
}

impl CatalogFitScorer {
    pub fn new(catalog: Arc<SkillCatalog>) -> Self {
        Self { catalog }
    }
}

impl FitScorer for CatalogFitScorer {
    fn score(&self, user_skills: &[String], role_name: &str) -> MatchResult {
        score_role(&self.catalog, user_skills, role_name)
    }

    fn backend(&self) -> &'static str {
        "catalog"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Core scoring algorithm
// ────────────────────────────────────────────────────────────────────────────

/// Scores `user_skills` against `role_name`. Unknown roles use the catalog's
/// default role; this never fails.
///
/// Two independent passes:
/// - per requirement: is any user skill a match for the name or one of its aliases?
///   Drives `missing_skills`, the tiers and the score.
/// - per user skill: does it match anything in the role's flattened skill pool
///   (names, aliases, and their synonym-table aliases)? Drives `matched_skills`.
///
/// The passes can disagree on edge cases. Both are reported.
pub fn score_role(catalog: &SkillCatalog, user_skills: &[String], role_name: &str) -> MatchResult {
    let resolved = catalog.roles.resolve(role_name);
    if resolved.fallback {
        debug!(
            "Unknown role '{}', scoring against default role '{}'",
            role_name, resolved.role.name
        );
    }

    let matcher = SimilarityMatcher::new(&catalog.synonyms);
    let users = normalize_user_skills(user_skills);

    let mut missing_skills = Vec::new();
    let mut critical_missing = Vec::new();
    let mut important_missing = Vec::new();
    let mut max_score = 0_u32;
    let mut actual_score = 0_u32;

    for req in resolved.role.requirements() {
        let weight = req.importance.weight();
        max_score += weight;

        // display names carry case, aliases are stored lowercase
        let satisfied = users.iter().any(|(_, user)| {
            matcher.is_match(user, &req.name)
                || req.aliases.iter().any(|a| matcher.is_match_lower(user, a))
        });

        if satisfied {
            actual_score += weight;
            continue;
        }

        missing_skills.push(req.name.clone());
        match req.importance {
            Importance::Critical => critical_missing.push(req.name.clone()),
            Importance::Important => important_missing.push(req.name.clone()),
            Importance::NiceToHave => {}
        }
    }

    let pool = skill_pool(resolved.role, catalog);
    let matched_skills: Vec<String> = users
        .iter()
        .filter(|(_, user)| pool.iter().any(|c| matcher.is_match_lower(user, c)))
        .map(|(original, _)| (*original).to_string())
        .collect();

    let match_score = weighted_percentage(actual_score, max_score);

    debug!(
        "Scored {} skills against '{}': {}/100 ({} missing)",
        users.len(),
        resolved.role.name,
        match_score,
        missing_skills.len()
    );

    MatchResult {
        role: resolved.role.name.clone(),
        fallback: resolved.fallback,
        match_score,
        matched_skills,
        missing_skills,
        critical_missing,
        important_missing,
    }
}

/// `round(100 * actual / max)` with round-half-up, or 0 when `max == 0`.
pub fn weighted_percentage(actual: u32, max: u32) -> u32 {
    if max == 0 {
        return 0;
    }
    let actual = actual.min(max) as u64;
    let max = max as u64;
    ((200 * actual + max) / (2 * max)) as u32
}

/// Drops blank strings and exact duplicates, keeping first-seen order.
/// Returns `(original, trimmed lowercase)` pairs.
fn normalize_user_skills(user_skills: &[String]) -> Vec<(&str, String)> {
    let mut seen = HashSet::new();
    user_skills
        .iter()
        .filter(|s| !s.trim().is_empty())
        .filter(|s| seen.insert(s.as_str()))
        .map(|s| (s.as_str(), s.trim().to_lowercase()))
        .collect()
}

/// Every lowercase string related to the role's requirements: names, aliases,
/// and whatever the synonym table declares for any of those.
fn skill_pool(role: &RoleDefinition, catalog: &SkillCatalog) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut pool = Vec::new();

    for req in role.requirements() {
        let name_lower = req.name.to_lowercase();
        for term in std::iter::once(&name_lower).chain(req.aliases.iter()) {
            let related = catalog.synonyms.aliases_of(term).into_iter().flatten();
            for s in std::iter::once(term).chain(related) {
                if seen.insert(s.clone()) {
                    pool.push(s.clone());
                }
            }
        }
    }

    pool
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{RoleCatalog, SynonymTable};

    const SWE_CATALOG: &str = r#"{
        "defaultRole": { "name": "Generic", "requiredSkills": [
            { "name": "Communication", "category": "soft", "importance": "critical" },
            { "name": "Teamwork", "category": "soft", "importance": "important" }
        ] },
        "roles": [
            { "name": "Software Engineer",
              "requiredSkills": [
                { "name": "Programming Languages", "category": "technical", "importance": "critical",
                  "aliases": ["python", "java", "c++", "golang"] },
                { "name": "Version Control", "category": "tool", "importance": "critical",
                  "aliases": ["git", "github", "svn"] }
              ],
              "optionalSkills": [
                { "name": "Testing", "category": "technical", "importance": "important",
                  "aliases": ["unit testing", "pytest", "jest"] }
              ] },
            { "name": "Hobbyist" }
        ]
    }"#;

    fn catalog(synonyms: &str) -> SkillCatalog {
        SkillCatalog {
            roles: RoleCatalog::from_json(SWE_CATALOG).unwrap(),
            synonyms: SynonymTable::from_json(synonyms).unwrap(),
        }
    }

    fn skills(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_software_engineer_scenario() {
        let c = catalog("{}");
        let result = score_role(&c, &skills(&["Python", "Git"]), "Software Engineer");

        assert!(result.matched_skills.contains(&"Python".to_string()));
        assert!(result.matched_skills.contains(&"Git".to_string()));
        assert!(result.critical_missing.is_empty());
        assert_eq!(result.important_missing, vec!["Testing".to_string()]);
        assert_eq!(result.missing_skills, vec!["Testing".to_string()]);
        // 6 of 8 weight points
        assert_eq!(result.match_score, 75);
        assert!(!result.fallback);
    }

    #[test]
    fn test_builtin_software_engineer_scenario() {
        let c = SkillCatalog::builtin().unwrap();
        let result = score_role(&c, &skills(&["Python", "Git"]), "Software Engineer");

        assert!(!result.fallback);
        assert!(result.matched_skills.contains(&"Python".to_string()));
        assert!(result.matched_skills.contains(&"Git".to_string()));
        assert!(result.critical_missing.is_empty());
        assert_eq!(result.important_missing, skills(&["Testing"]));
        assert_eq!(result.missing_skills, skills(&["Testing"]));
        assert_eq!(result.match_score, 75);
    }

    #[test]
    fn test_every_requirement_name_verbatim_scores_100() {
        let c = catalog("{}");
        let all = skills(&["programming languages", "VERSION CONTROL", "Testing"]);
        let result = score_role(&c, &all, "Software Engineer");
        assert_eq!(result.match_score, 100);
        assert!(result.missing_skills.is_empty());
    }

    #[test]
    fn test_every_builtin_role_scores_100_with_its_own_names() {
        let c = SkillCatalog::builtin().unwrap();
        for role in c.roles.all_roles() {
            let names: Vec<String> = role.requirements().map(|r| r.name.clone()).collect();
            let result = score_role(&c, &names, &role.name);
            assert_eq!(result.match_score, 100, "role {}", role.name);
            assert!(result.missing_skills.is_empty(), "role {}", role.name);
        }
    }

    #[test]
    fn test_empty_role_scores_zero() {
        let c = catalog("{}");
        let result = score_role(&c, &skills(&["Python"]), "Hobbyist");
        assert_eq!(result.match_score, 0);
        assert!(result.missing_skills.is_empty());
        assert!(result.matched_skills.is_empty());
    }

    #[test]
    fn test_empty_skill_list_reports_everything_missing() {
        let c = catalog("{}");
        let result = score_role(&c, &[], "Software Engineer");
        assert_eq!(result.match_score, 0);
        assert_eq!(
            result.missing_skills,
            skills(&["Programming Languages", "Version Control", "Testing"])
        );
        assert_eq!(
            result.critical_missing,
            skills(&["Programming Languages", "Version Control"])
        );
        assert_eq!(result.important_missing, skills(&["Testing"]));
    }

    #[test]
    fn test_blank_skills_are_ignored() {
        let c = catalog("{}");
        let result = score_role(&c, &skills(&["", "   ", "\t"]), "Software Engineer");
        assert_eq!(result.match_score, 0);
        assert!(result.matched_skills.is_empty());
    }

    #[test]
    fn test_unknown_role_falls_back_to_default() {
        let c = catalog("{}");
        let result = score_role(&c, &skills(&["communication"]), "Astronaut");
        assert!(result.fallback);
        assert_eq!(result.role, "Generic");
        // Communication (3) of 5
        assert_eq!(result.match_score, 60);
        assert_eq!(result.important_missing, skills(&["Teamwork"]));
    }

    #[test]
    fn test_role_lookup_is_case_sensitive() {
        let c = catalog("{}");
        let result = score_role(&c, &skills(&["Python"]), "software engineer");
        assert!(result.fallback);
    }

    #[test]
    fn test_monotonic_when_critical_gap_filled() {
        let c = catalog("{}");
        let before = score_role(&c, &skills(&["Git"]), "Software Engineer");
        assert!(before.critical_missing.contains(&"Programming Languages".to_string()));

        let after = score_role(&c, &skills(&["Git", "golang"]), "Software Engineer");
        assert!(after.match_score > before.match_score);
        assert!(!after.critical_missing.contains(&"Programming Languages".to_string()));
    }

    #[test]
    fn test_scoring_is_idempotent() {
        let c = SkillCatalog::builtin().unwrap();
        let input = skills(&["Python", "pandas", "Tableau", "k8s", "sql"]);
        let first = score_role(&c, &input, "Data Scientist");
        let second = score_role(&c, &input, "Data Scientist");
        assert_eq!(first, second);
    }

    #[test]
    fn test_matched_skills_keep_original_spelling_and_order() {
        let c = catalog("{}");
        let result = score_role(&c, &skills(&["  GitHub ", "Cooking", "PyTest"]), "Software Engineer");
        assert_eq!(result.matched_skills, skills(&["  GitHub ", "PyTest"]));
    }

    #[test]
    fn test_duplicate_user_skills_reported_once() {
        let c = catalog("{}");
        let result = score_role(&c, &skills(&["Git", "Git"]), "Software Engineer");
        assert_eq!(result.matched_skills, skills(&["Git"]));
    }

    #[test]
    fn test_synonym_expansion_widens_matched_pool_only() {
        // "scm" is only contained in a synonym of "git", so it joins the
        // matched list without satisfying the Version Control requirement.
        let c = catalog(r#"{"git": ["git scm"]}"#);
        let result = score_role(&c, &skills(&["scm"]), "Software Engineer");
        assert_eq!(result.matched_skills, skills(&["scm"]));
        assert!(result.critical_missing.contains(&"Version Control".to_string()));
    }

    #[test]
    fn test_synonym_lookup_satisfies_requirement_by_name() {
        let c = catalog(r#"{"version control": ["source control"]}"#);
        let result = score_role(&c, &skills(&["Source Control"]), "Software Engineer");
        assert!(!result.missing_skills.contains(&"Version Control".to_string()));
    }

    #[test]
    fn test_fuzzy_typo_satisfies_requirement() {
        let c = catalog("{}");
        let result = score_role(&c, &skills(&["Pythn"]), "Software Engineer");
        assert!(!result.critical_missing.contains(&"Programming Languages".to_string()));
    }

    #[test]
    fn test_builtin_data_scientist() {
        let c = SkillCatalog::builtin().unwrap();
        let result = score_role(&c, &skills(&["Python", "SQL"]), "Data Scientist");
        assert!(!result.fallback);
        assert!(!result.critical_missing.contains(&"Python".to_string()));
        assert!(result.critical_missing.contains(&"Machine Learning".to_string()));
        assert!(!result.important_missing.contains(&"SQL".to_string()));
        assert!(result.match_score > 0 && result.match_score < 100);
    }

    #[test]
    fn test_weighted_percentage_rounds_half_up() {
        assert_eq!(weighted_percentage(6, 8), 75);
        assert_eq!(weighted_percentage(1, 8), 13); // 12.5 → 13
        assert_eq!(weighted_percentage(1, 3), 33);
        assert_eq!(weighted_percentage(2, 3), 67);
        assert_eq!(weighted_percentage(0, 0), 0);
        assert_eq!(weighted_percentage(5, 5), 100);
    }

    #[test]
    fn test_catalog_scorer_backend_label() {
        let scorer = CatalogFitScorer::new(Arc::new(catalog("{}")));
        assert_eq!(scorer.backend(), "catalog");
        assert_eq!(scorer.score(&skills(&["git"]), "Software Engineer").match_score, 38);
    }
}
