// ============================================================
// Layer 4 — Vocabulary Index
// ============================================================
// Maps each vocabulary token to its fixed column in the feature
// vector. Columns are assigned in the order the tokens appear in
// the model bundle, which is the order the scaler means and the
// classifier coefficients were fitted in.
//
// Example:
//   vocabulary = ["apple", "banana", "cherry"]
//   apple → 0, banana → 1, cherry → 2
//
// A token listed twice would have two columns and no single
// answer for position(), so construction rejects it.

use anyhow::Result;
use std::collections::HashMap;

use crate::domain::errors::ScoringError;

#[derive(Debug, Clone)]
pub struct VocabularyIndex {
    positions: HashMap<String, usize>,
}

impl VocabularyIndex {
    /// Build the index from the ordered vocabulary.
    ///
    /// # Errors
    /// `ScoringError::DuplicateToken` if any token appears twice.
    pub fn new(vocabulary: &[String]) -> Result<Self> {
        let mut positions = HashMap::with_capacity(vocabulary.len());

        for (i, token) in vocabulary.iter().enumerate() {
            if let Some(&first) = positions.get(token) {
                return Err(ScoringError::DuplicateToken {
                    token:  token.clone(),
                    first,
                    second: i,
                }
                .into());
            }
            positions.insert(token.clone(), i);
        }

        Ok(Self { positions })
    }

    /// Column of `token`, or None if it is not a feature
    pub fn position(&self, token: &str) -> Option<usize> {
        self.positions.get(token).copied()
    }

    /// Feature-vector width
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_positions_follow_source_order() {
        let idx = VocabularyIndex::new(&vocab(&["pear", "apple", "fig"])).unwrap();
        assert_eq!(idx.position("pear"), Some(0));
        assert_eq!(idx.position("apple"), Some(1));
        assert_eq!(idx.position("fig"), Some(2));
        assert_eq!(idx.len(), 3);
    }

    #[test]
    fn test_unknown_token_has_no_position() {
        let idx = VocabularyIndex::new(&vocab(&["apple"])).unwrap();
        assert_eq!(idx.position("banana"), None);
    }

    #[test]
    fn test_duplicate_token_is_rejected() {
        let err = VocabularyIndex::new(&vocab(&["a", "b", "a"])).unwrap_err();
        let kind = err.downcast_ref::<ScoringError>().unwrap();
        assert_eq!(
            kind,
            &ScoringError::DuplicateToken { token: "a".into(), first: 0, second: 2 }
        );
    }

    #[test]
    fn test_empty_vocabulary() {
        let idx = VocabularyIndex::new(&[]).unwrap();
        assert!(idx.is_empty());
    }
}
