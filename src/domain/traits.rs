// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The chunked pipeline only talks to these two traits, so the
// burn-backed scorer and the TSV writer can be swapped for
// in-memory fakes in tests.
//
//   - BatchScorer      → implements ProbabilityModel
//   - ResultsWriter    → implements ScoredRowSink
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;

use crate::domain::scored_row::ScoredRow;

// ─── ProbabilityModel ─────────────────────────────────────────────────────────
/// Anything that turns a batch of feature vectors into
/// positive-class probabilities.
pub trait ProbabilityModel {
    /// Number of features each input vector must have
    fn feature_width(&self) -> usize;

    /// One probability per row of `batch`, in the same order.
    /// A row of the wrong width is a fatal error.
    fn predict_proba(&self, batch: &[Vec<f64>]) -> Result<Vec<f64>>;
}

// ─── ScoredRowSink ────────────────────────────────────────────────────────────
/// Anything that accepts scored rows, one chunk at a time.
pub trait ScoredRowSink {
    /// Persist all rows of one chunk, in order.
    fn write_chunk(&mut self, rows: Vec<ScoredRow>) -> Result<()>;
}
