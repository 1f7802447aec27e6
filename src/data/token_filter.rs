// ============================================================
// Layer 4 — Token Filter
// ============================================================
// Removes tokens that would let the classifier read the label
// straight off the word list instead of learning from context.
//
// Two rules, applied to every token:
//   1. Exact match against a set of gendered / kinship terms
//      (he, she, wife, daughter, lady, ...)
//   2. Prefix match against reported-speech markers such as
//      "said-she" or "said-him"
//
// Matching is exact and case-sensitive; the character tables
// are already lowercased upstream.
//
// Reference: Rust Book §8 (Hash Sets)

use std::collections::HashSet;

/// Gender-indicative and gendered-kinship terms dropped by default.
pub const DEFAULT_FORBIDDEN_TERMS: [&str; 26] = [
    "he", "she", "her", "him",
    "manhood", "womanhood", "boyhood", "girlhood",
    "husband", "wife", "lordship", "ladyship",
    "man", "woman", "mistress", "daughter", "son",
    "girl", "boy", "bride", "fiancé", "fiancée",
    "brother", "sister", "lady", "gentleman",
];

/// Prefix marking reported-speech tokens ("said-he", ...)
pub const SAID_PREFIX: &str = "said-";

#[derive(Debug, Clone)]
pub struct TokenFilter {
    /// Tokens dropped on exact match
    terms: HashSet<String>,
    /// Tokens dropped when they start with any of these
    prefixes: Vec<String>,
}

impl TokenFilter {
    /// Build a filter from an explicit term set and prefix list.
    pub fn new<T, P>(terms: T, prefixes: P) -> Self
    where
        T: IntoIterator,
        T::Item: Into<String>,
        P: IntoIterator,
        P::Item: Into<String>,
    {
        Self {
            terms:    terms.into_iter().map(Into::into).collect(),
            prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns true if `token` should be counted as evidence
    pub fn retains(&self, token: &str) -> bool {
        !self.terms.contains(token)
            && !self.prefixes.iter().any(|p| token.starts_with(p.as_str()))
    }

    pub fn term_count(&self) -> usize {
        self.terms.len()
    }
}

/// The anti-leakage policy: the fixed forbidden set plus "said-".
impl Default for TokenFilter {
    fn default() -> Self {
        Self::new(DEFAULT_FORBIDDEN_TERMS, [SAID_PREFIX])
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_drops_every_forbidden_term() {
        let f = TokenFilter::default();
        for term in DEFAULT_FORBIDDEN_TERMS {
            assert!(!f.retains(term), "'{term}' should be dropped");
        }
        assert_eq!(f.term_count(), 26);
    }

    #[test]
    fn test_default_drops_said_prefix() {
        let f = TokenFilter::default();
        assert!(!f.retains("said-she"));
        assert!(!f.retains("said-"));
        // Prefix must be at the start of the token
        assert!(f.retains("unsaid-thing"));
    }

    #[test]
    fn test_matching_is_exact() {
        let f = TokenFilter::default();
        assert!(f.retains("She"));
        assert!(f.retains("hers"));
        assert!(f.retains("manor"));
        assert!(f.retains(""));
    }

    #[test]
    fn test_custom_policy() {
        let f = TokenFilter::new(["apple"], ["x-"]);
        assert!(!f.retains("apple"));
        assert!(!f.retains("x-ray"));
        assert!(f.retains("she"));
    }
}
