// ============================================================
// Layer 2 — Chunked Scoring Pipeline
// ============================================================
// Drives one source table through extraction, batch scoring
// and writing:
//
//   Idle → Reading → (Extracting → Scoring → Writing)* → Draining → Done
//
//   for each source row:
//       extract → skip, or push into the chunk accumulator
//       chunk full? → score the whole chunk, write it, carry on
//   source exhausted:
//       score + write whatever is left in the accumulator
//
// Everything runs on one thread, strictly in order, so output
// rows appear in source order across every chunk. Rows of a
// chunk that was written stay on disk even if a later chunk
// fails; there is no rollback.

use anyhow::{bail, Result};

use crate::data::batcher::{ChunkAccumulator, FlushedBatch};
use crate::data::extractor::{Extraction, FeatureExtractor, SkipReason};
use crate::domain::character::CharacterRecord;
use crate::domain::errors::ScoringError;
use crate::domain::scored_row::ScoredRow;
use crate::domain::traits::{ProbabilityModel, ScoredRowSink};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    Reading,
    Extracting,
    Scoring,
    Writing,
    Draining,
    Done,
}

/// Counters for one run of the pipeline
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineStats {
    pub rows_read:            usize,
    pub skipped_few_words:    usize,
    pub skipped_few_retained: usize,
    pub rows_written:         usize,
    pub chunks_flushed:       usize,
}

pub struct ChunkedPipeline<'a, M: ProbabilityModel, S: ScoredRowSink> {
    extractor:   &'a FeatureExtractor,
    model:       &'a M,
    sink:        &'a mut S,
    accumulator: ChunkAccumulator,
    state:       PipelineState,
    stats:       PipelineStats,
}

impl<'a, M: ProbabilityModel, S: ScoredRowSink> ChunkedPipeline<'a, M, S> {
    pub fn new(
        extractor:  &'a FeatureExtractor,
        model:      &'a M,
        sink:       &'a mut S,
        chunk_size: usize,
    ) -> Self {
        Self {
            extractor,
            model,
            sink,
            accumulator: ChunkAccumulator::new(chunk_size),
            state:       PipelineState::Idle,
            stats:       PipelineStats::default(),
        }
    }

    /// Consume `records` to the end, writing every surviving row.
    pub fn run<I>(mut self, records: I) -> Result<PipelineStats>
    where
        I: IntoIterator<Item = Result<CharacterRecord>>,
    {
        // Vectors built from this vocabulary must fit the classifier
        let (expected, found) = (self.model.feature_width(), self.extractor.feature_width());
        if expected != found {
            return Err(ScoringError::DimensionMismatch {
                what: "vocabulary vs classifier".to_string(),
                expected,
                found,
            }
            .into());
        }

        self.enter(PipelineState::Reading);
        for record in records {
            let record = record?;
            self.stats.rows_read += 1;

            self.enter(PipelineState::Extracting);
            match self.extractor.extract(record) {
                Extraction::Kept(features) => {
                    if let Some(batch) = self.accumulator.push(features) {
                        self.flush(batch)?;
                    }
                }
                Extraction::Skipped(reason) => self.record_skip(reason),
            }
            self.enter(PipelineState::Reading);
        }

        // ── Final partial chunk ───────────────────────────────────────────────
        self.enter(PipelineState::Draining);
        if let Some(batch) = self.accumulator.drain() {
            self.flush(batch)?;
        }

        self.enter(PipelineState::Done);
        Ok(self.stats)
    }

    fn flush(&mut self, batch: FlushedBatch) -> Result<()> {
        let resume = self.state;

        self.enter(PipelineState::Scoring);
        let probabilities = self.model.predict_proba(&batch.vectors)?;
        if probabilities.len() != batch.len() {
            bail!(
                "Scorer returned {} probabilities for a chunk of {} rows",
                probabilities.len(),
                batch.len()
            );
        }

        self.enter(PipelineState::Writing);
        let rows: Vec<ScoredRow> = batch
            .metas
            .into_iter()
            .zip(probabilities)
            .map(|(meta, p)| ScoredRow::new(meta, p))
            .collect();
        let written = rows.len();
        self.sink.write_chunk(rows)?;

        tracing::info!("writing chunk {} ({} rows)", self.stats.chunks_flushed, written);
        self.stats.chunks_flushed += 1;
        self.stats.rows_written   += written;

        self.enter(resume);
        Ok(())
    }

    fn record_skip(&mut self, reason: SkipReason) {
        match reason {
            SkipReason::TooFewWords { numwords } => {
                self.stats.skipped_few_words += 1;
                tracing::debug!("Skipping minor character ({} words)", numwords);
            }
            SkipReason::TooFewRetained { retained } => {
                self.stats.skipped_few_retained += 1;
                tracing::debug!("Skipping character with {} usable words", retained);
            }
        }
    }

    fn enter(&mut self, next: PipelineState) {
        tracing::trace!("pipeline {:?} → {:?}", self.state, next);
        self.state = next;
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::token_filter::TokenFilter;
    use crate::data::vocabulary::VocabularyIndex;
    use anyhow::anyhow;

    /// Returns the first feature as the "probability" so tests can
    /// trace which vector produced which row.
    struct FirstFeatureModel {
        width: usize,
    }

    impl ProbabilityModel for FirstFeatureModel {
        fn feature_width(&self) -> usize {
            self.width
        }

        fn predict_proba(&self, batch: &[Vec<f64>]) -> Result<Vec<f64>> {
            Ok(batch.iter().map(|v| v[0]).collect())
        }
    }

    #[derive(Default)]
    struct MemorySink {
        chunks: Vec<Vec<ScoredRow>>,
        fail_on_chunk: Option<usize>,
    }

    impl ScoredRowSink for MemorySink {
        fn write_chunk(&mut self, rows: Vec<ScoredRow>) -> Result<()> {
            if self.fail_on_chunk == Some(self.chunks.len()) {
                return Err(anyhow!("disk full"));
            }
            self.chunks.push(rows);
            Ok(())
        }
    }

    impl MemorySink {
        fn rows(&self) -> Vec<&ScoredRow> {
            self.chunks.iter().flatten().collect()
        }
    }

    fn extractor() -> FeatureExtractor {
        let vocab = vec!["apple".to_string(), "pear".to_string()];
        FeatureExtractor::new(VocabularyIndex::new(&vocab).unwrap(), TokenFilter::default())
    }

    fn rec(id: usize, words: &str) -> Result<CharacterRecord> {
        Ok(CharacterRecord::new(format!("d{id}"), format!("d{id}|c"), "u", "1900", words))
    }

    const FIVE: &str = "apple pear plum fig kiwi";

    #[test]
    fn test_skips_are_counted_not_written() {
        let ex    = extractor();
        let model = FirstFeatureModel { width: 2 };
        let mut sink = MemorySink::default();

        let records = vec![
            rec(0, "one two three"),
            rec(1, FIVE),
            rec(2, "apple she her him wife pear"),
        ];
        let stats = ChunkedPipeline::new(&ex, &model, &mut sink, 10).run(records).unwrap();

        assert_eq!(stats.rows_read, 3);
        assert_eq!(stats.skipped_few_words, 1);
        assert_eq!(stats.skipped_few_retained, 1);
        assert_eq!(stats.rows_written, 1);
        assert_eq!(sink.rows()[0].docid, "d1");
        assert_eq!(sink.rows()[0].numwords, 5);
    }

    #[test]
    fn test_order_is_preserved_across_chunks() {
        let ex    = extractor();
        let model = FirstFeatureModel { width: 2 };
        let mut sink = MemorySink::default();

        let records: Vec<_> = (0..11).map(|i| rec(i, FIVE)).collect();
        let stats = ChunkedPipeline::new(&ex, &model, &mut sink, 3).run(records).unwrap();

        // chunks of 4 (limit 3 exceeded) + final remainder of 3
        assert_eq!(stats.chunks_flushed, 3);
        let sizes: Vec<usize> = sink.chunks.iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![4, 4, 3]);

        let ids: Vec<String> = sink.rows().iter().map(|r| r.docid.clone()).collect();
        let expected: Vec<String> = (0..11).map(|i| format!("d{i}")).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_probability_lines_up_with_its_row() {
        let ex    = extractor();
        let model = FirstFeatureModel { width: 2 };
        let mut sink = MemorySink::default();

        let records = vec![rec(0, "apple apple apple apple plum"), rec(1, FIVE)];
        ChunkedPipeline::new(&ex, &model, &mut sink, 1).run(records).unwrap();

        let rows = sink.rows();
        assert!((rows[0].probability - 0.8).abs() < 1e-6);
        assert!((rows[1].probability - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_threshold_crossing_plus_drain_writes_every_row() {
        let ex    = extractor();
        let model = FirstFeatureModel { width: 2 };
        let mut sink = MemorySink::default();

        let n = crate::data::batcher::DEFAULT_CHUNK_SIZE + 1;
        let records = (0..n).map(|i| rec(i, FIVE));
        let stats = ChunkedPipeline::new(
            &ex,
            &model,
            &mut sink,
            crate::data::batcher::DEFAULT_CHUNK_SIZE,
        )
        .run(records)
        .unwrap();

        // One flush once the limit is exceeded; the drain then finds nothing
        assert_eq!(stats.chunks_flushed, 1);
        assert_eq!(sink.chunks.len(), 1);
        assert_eq!(stats.rows_written, n);
        assert_eq!(sink.rows().len(), n);
        assert_eq!(sink.rows().last().unwrap().docid, format!("d{}", n - 1));
    }

    #[test]
    fn test_empty_source_writes_nothing() {
        let ex    = extractor();
        let model = FirstFeatureModel { width: 2 };
        let mut sink = MemorySink::default();

        let stats = ChunkedPipeline::new(&ex, &model, &mut sink, 10)
            .run(Vec::<Result<CharacterRecord>>::new())
            .unwrap();
        assert_eq!(stats, PipelineStats::default());
        assert!(sink.chunks.is_empty());
    }

    #[test]
    fn test_width_mismatch_fails_before_reading() {
        let ex    = extractor();
        let model = FirstFeatureModel { width: 3 };
        let mut sink = MemorySink::default();

        let err = ChunkedPipeline::new(&ex, &model, &mut sink, 10)
            .run(vec![rec(0, FIVE)])
            .unwrap_err();
        assert!(err.downcast_ref::<ScoringError>().is_some());
        assert!(sink.chunks.is_empty());
    }

    #[test]
    fn test_earlier_chunks_survive_a_failed_write() {
        let ex    = extractor();
        let model = FirstFeatureModel { width: 2 };
        let mut sink = MemorySink { fail_on_chunk: Some(1), ..Default::default() };

        let records: Vec<_> = (0..6).map(|i| rec(i, FIVE)).collect();
        let result = ChunkedPipeline::new(&ex, &model, &mut sink, 1).run(records);

        assert!(result.is_err());
        assert_eq!(sink.chunks.len(), 1);
        assert_eq!(sink.chunks[0].len(), 2);
    }

    #[test]
    fn test_read_error_is_fatal() {
        let ex    = extractor();
        let model = FirstFeatureModel { width: 2 };
        let mut sink = MemorySink::default();

        let records = vec![rec(0, FIVE), Err(anyhow!("bad row"))];
        assert!(ChunkedPipeline::new(&ex, &model, &mut sink, 10).run(records).is_err());
    }
}
