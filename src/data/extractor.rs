// ============================================================
// Layer 4 — Feature Extractor
// ============================================================
// Turns one character row into a dense feature vector aligned
// with the model vocabulary, or decides the row carries too
// little evidence to score.
//
// Steps (applied in order):
//   1. Split `words` on single spaces → raw tokens, numwords
//   2. numwords < min_raw_words            → skip (minor character)
//   3. Drop forbidden terms and "said-" tokens
//   4. retained < min_retained_words       → skip (too little left)
//   5. vector[i] = count(vocab[i]) / retained
//   6. Keep the metadata with the RAW numwords from step 1
//
// Retained tokens outside the vocabulary still count in the
// denominator, so the populated entries can sum to less than 1.
//
// Reference: Rust Book §8 (Hash Maps), §13 (Iterators)

use std::collections::HashMap;

use crate::data::token_filter::TokenFilter;
use crate::data::vocabulary::VocabularyIndex;
use crate::domain::character::{CharacterRecord, RowMeta};

/// Rows with fewer raw tokens than this are minor characters
pub const DEFAULT_MIN_RAW_WORDS: usize = 5;

/// Rows with fewer tokens than this after filtering are dropped
pub const DEFAULT_MIN_RETAINED_WORDS: usize = 5;

/// A surviving character: its feature vector and pass-through metadata
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedFeatures {
    pub vector: Vec<f64>,
    pub meta:   RowMeta,
}

/// Why a row produced no features
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Raw token count below the minimum
    TooFewWords { numwords: usize },
    /// Too few tokens left once forbidden terms were removed
    TooFewRetained { retained: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    Kept(ExtractedFeatures),
    Skipped(SkipReason),
}

#[derive(Debug, Clone)]
pub struct FeatureExtractor {
    index:              VocabularyIndex,
    filter:             TokenFilter,
    min_raw_words:      usize,
    min_retained_words: usize,
}

impl FeatureExtractor {
    /// Extractor with the default thresholds (5 raw, 5 retained)
    pub fn new(index: VocabularyIndex, filter: TokenFilter) -> Self {
        Self {
            index,
            filter,
            min_raw_words:      DEFAULT_MIN_RAW_WORDS,
            min_retained_words: DEFAULT_MIN_RETAINED_WORDS,
        }
    }

    pub fn with_thresholds(mut self, min_raw_words: usize, min_retained_words: usize) -> Self {
        self.min_raw_words      = min_raw_words;
        self.min_retained_words = min_retained_words;
        self
    }

    /// Width of every vector this extractor produces
    pub fn feature_width(&self) -> usize {
        self.index.len()
    }

    /// Extract features from one record. Pure: no I/O, no state.
    pub fn extract(&self, record: CharacterRecord) -> Extraction {
        // ── Step 1: raw tokens ────────────────────────────────────────────────
        // split(' ') rather than split_whitespace(): doubled spaces
        // yield empty tokens and those count toward numwords.
        let numwords = record.words.split(' ').count();

        // ── Step 2: minor characters ──────────────────────────────────────────
        if numwords < self.min_raw_words {
            return Extraction::Skipped(SkipReason::TooFewWords { numwords });
        }

        // ── Step 3: anti-leakage filter + counting ────────────────────────────
        let mut counts: HashMap<&str, usize> = HashMap::new();
        let mut retained = 0usize;

        for token in record.words.split(' ') {
            if self.filter.retains(token) {
                *counts.entry(token).or_insert(0) += 1;
                retained += 1;
            }
        }

        // ── Step 4: minimum evidence after filtering ──────────────────────────
        if retained < self.min_retained_words {
            return Extraction::Skipped(SkipReason::TooFewRetained { retained });
        }

        // ── Step 5: normalised frequencies ────────────────────────────────────
        let mut vector = vec![0.0f64; self.index.len()];
        let total = retained as f64;

        for (token, count) in counts {
            if let Some(i) = self.index.position(token) {
                vector[i] = count as f64 / total;
            }
        }

        // ── Step 6: metadata ──────────────────────────────────────────────────
        let meta = RowMeta::from_record(record, numwords);
        Extraction::Kept(ExtractedFeatures { vector, meta })
    }
}
