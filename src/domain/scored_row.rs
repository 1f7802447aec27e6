// ============================================================
// Layer 3 — ScoredRow Domain Type
// ============================================================
// One line of the destination table. Field order here IS the
// column order of the output file, because the csv writer
// serialises struct fields in declaration order:
//
//   docid  charid  gender  pubdate  numwords  probability
//
// Reference: Rust Book §5 (Structs and Methods)

use serde::{Deserialize, Serialize};

use crate::domain::character::RowMeta;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredRow {
    pub docid:       String,
    pub charid:      String,
    pub gender:      String,
    pub pubdate:     String,
    pub numwords:    usize,

    /// Probability of the positive class, in [0, 1]
    pub probability: f64,
}

impl ScoredRow {
    /// Attach a probability to the metadata of a scored character
    pub fn new(meta: RowMeta, probability: f64) -> Self {
        Self {
            docid:    meta.docid,
            charid:   meta.charid,
            gender:   meta.gender,
            pubdate:  meta.pubdate,
            numwords: meta.numwords,
            probability,
        }
    }
}
