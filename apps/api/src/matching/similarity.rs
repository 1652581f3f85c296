//! Similarity matcher — decides whether a free-text user skill names the same
//! skill as a catalog string.
//!
//! Checks run in order and short-circuit on the first hit:
//! 1. substring containment (either direction)
//! 2. synonym table membership (either direction)
//! 3. normalized Levenshtein similarity > 0.8
//!
//! Containment deliberately over-matches short strings ("aws" inside a longer
//! alias). Callers rely on that looseness.

use strsim::levenshtein;

use crate::catalog::SynonymTable;

/// Similarity must be strictly greater than this to count as a match.
pub const SIMILARITY_THRESHOLD: f64 = 0.8;

/// Normalized edit-distance similarity: `(max_len - distance) / max_len`, in chars.
/// Two empty strings are identical (1.0).
pub fn similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    let distance = levenshtein(a, b);
    (max_len - distance) as f64 / max_len as f64
}

/// Pairwise skill matcher backed by a synonym table.
#[derive(Debug, Clone, Copy)]
pub struct SimilarityMatcher<'a> {
    synonyms: &'a SynonymTable,
}

impl<'a> SimilarityMatcher<'a> {
    pub fn new(synonyms: &'a SynonymTable) -> Self {
        Self { synonyms }
    }

    /// True if `user_skill` and `candidate` denote the same skill.
    /// Inputs are lowercased here, so callers may pass raw strings.
    pub fn is_match(&self, user_skill: &str, candidate: &str) -> bool {
        let user = user_skill.trim().to_lowercase();
        let candidate = candidate.trim().to_lowercase();
        self.is_match_lower(&user, &candidate)
    }

    /// Same as `is_match` for inputs already trimmed and lowercased.
    pub fn is_match_lower(&self, user: &str, candidate: &str) -> bool {
        // Empty only equals empty; otherwise "" would be a substring of everything.
        if user.is_empty() || candidate.is_empty() {
            return user == candidate;
        }

        if user.contains(candidate) || candidate.contains(user) {
            return true;
        }

        if self.synonyms.declares(candidate, user) || self.synonyms.declares(user, candidate) {
            return true;
        }

        similarity(user, candidate) > SIMILARITY_THRESHOLD
    }
}
