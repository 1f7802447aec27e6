// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between a row of the character table and a
// feature vector ready for the scorer.
//
//   character_table.tsv
//       │
//       ▼
//   CharacterTableReader → streams CharacterRecords lazily
//       │
//       ▼
//   FeatureExtractor     → TokenFilter + VocabularyIndex
//       │                  (row → vector + metadata, or skip)
//       ▼
//   ChunkAccumulator     → bounded chunks for batch scoring
//
// Each module is responsible for exactly one step.
//
// Reference: Rust Book §13 (Iterators and Closures)

/// Streams rows from a tab-separated character table
pub mod loader;

/// Anti-leakage filter for gendered terms and "said-" markers
pub mod token_filter;

/// Token → feature column mapping from the model vocabulary
pub mod vocabulary;

/// Row → normalised feature vector, with evidence thresholds
pub mod extractor;

/// Bounded chunk accumulator feeding the batch scorer
pub mod batcher;
