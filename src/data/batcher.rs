// ============================================================
// Layer 4 — Chunk Accumulator
// ============================================================
// Collects surviving characters into a bounded in-memory chunk
// and hands the whole chunk back once it grows past the limit.
//
// Why a chunk?
//   Scoring one row at a time pays the per-call cost of the
//   backend for every character. Holding the whole table in
//   memory does not scale. A chunk of ~10,000 rows keeps peak
//   memory at chunk_size × vocabulary width no matter how big
//   the source table is.
//
// Contract:
//   push(features)  → Some(batch) once the buffer holds MORE
//                     than chunk_size rows, else None
//   drain()         → Some(remainder) if anything is left
//
// Rows come back in exactly the order they were pushed.

use crate::data::extractor::ExtractedFeatures;
use crate::domain::character::RowMeta;

/// Flush once a chunk holds more than this many rows
pub const DEFAULT_CHUNK_SIZE: usize = 10_000;

/// One chunk handed to the scorer: feature rows and their
/// metadata, index-aligned.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlushedBatch {
    pub vectors: Vec<Vec<f64>>,
    pub metas:   Vec<RowMeta>,
}

impl FlushedBatch {
    pub fn len(&self) -> usize {
        self.metas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metas.is_empty()
    }
}

#[derive(Debug)]
pub struct ChunkAccumulator {
    chunk_size: usize,
    buffer:     FlushedBatch,
}

impl ChunkAccumulator {
    pub fn new(chunk_size: usize) -> Self {
        Self {
            chunk_size,
            buffer: FlushedBatch::default(),
        }
    }

    /// Add one surviving row; returns the full chunk when the
    /// buffer has grown past `chunk_size`.
    pub fn push(&mut self, features: ExtractedFeatures) -> Option<FlushedBatch> {
        self.buffer.vectors.push(features.vector);
        self.buffer.metas.push(features.meta);

        if self.buffer.len() > self.chunk_size {
            Some(std::mem::take(&mut self.buffer))
        } else {
            None
        }
    }

    /// Hand back whatever is left. None when the buffer is empty.
    pub fn drain(&mut self) -> Option<FlushedBatch> {
        if self.buffer.is_empty() {
            None
        } else {
            Some(std::mem::take(&mut self.buffer))
        }
    }

    /// Rows currently buffered
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }
}

impl Default for ChunkAccumulator {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE)
    }
}
