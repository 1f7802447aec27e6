// ============================================================
// Layer 3 — Precondition Errors
// ============================================================
// Errors that mean the model bundle and the data do not fit
// together. All of them are fatal; they travel up inside an
// anyhow::Error and callers can downcast when they need the
// exact kind.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScoringError {
    #[error("Duplicate vocabulary token '{token}' at positions {first} and {second}")]
    DuplicateToken {
        token:  String,
        first:  usize,
        second: usize,
    },

    #[error("Dimension mismatch in {what}: expected {expected}, found {found}")]
    DimensionMismatch {
        what:     String,
        expected: usize,
        found:    usize,
    },

    #[error("Malformed model bundle: {0}")]
    MalformedBundle(String),
}
