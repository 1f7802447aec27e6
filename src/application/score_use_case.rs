// ============================================================
// Layer 2 — ScoreUseCase
// ============================================================
// Orchestrates one scoring run in order:
//
//   Step 1: Load + validate the model bundle   (Layer 6 - infra)
//   Step 2: Build the vocabulary index         (Layer 4 - data)
//   Step 3: Build the feature extractor        (Layer 4 - data)
//   Step 4: Upload scaler/classifier           (Layer 5 - ml)
//   Step 5: Decide the header rule             (Layer 6 - infra)
//   Step 6: Open the source table              (Layer 4 - data)
//   Step 7: Run the chunked pipeline           (Layer 2)
//
// Steps 1-5 fail before anything is written, so a broken bundle
// never leaves a half-written destination behind.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::application::pipeline::{ChunkedPipeline, PipelineStats};
use crate::data::{
    batcher::DEFAULT_CHUNK_SIZE,
    extractor::{FeatureExtractor, DEFAULT_MIN_RAW_WORDS, DEFAULT_MIN_RETAINED_WORDS},
    loader::CharacterTableReader,
    token_filter::TokenFilter,
    vocabulary::VocabularyIndex,
};
use crate::infra::{bundle_store::load_bundle, results_writer::ResultsWriter};
use crate::ml::scorer::BatchScorer;

// ─── Scoring Configuration ───────────────────────────────────────────────────
// Everything one run needs. The thresholds keep their historical
// values by default; they are fields so tests and callers can
// vary them without touching the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub model_path:         String,
    pub source_path:        String,
    pub dest_path:          String,
    pub chunk_size:         usize,
    pub min_raw_words:      usize,
    pub min_retained_words: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            model_path:         "model.json".to_string(),
            source_path:        "character_table.tsv".to_string(),
            dest_path:          "gender_probabilities.tsv".to_string(),
            chunk_size:         DEFAULT_CHUNK_SIZE,
            min_raw_words:      DEFAULT_MIN_RAW_WORDS,
            min_retained_words: DEFAULT_MIN_RETAINED_WORDS,
        }
    }
}

impl ScoringConfig {
    /// Single-line JSON form, logged at the start of every run so a
    /// destination table can be traced back to the settings behind it
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

// ─── ScoreUseCase ─────────────────────────────────────────────────────────────
pub struct ScoreUseCase {
    config: ScoringConfig,
    filter: TokenFilter,
}

impl ScoreUseCase {
    /// Use case with the default anti-leakage filter
    pub fn new(config: ScoringConfig) -> Self {
        Self { config, filter: TokenFilter::default() }
    }

    pub fn with_filter(mut self, filter: TokenFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Execute the full scoring run end to end
    pub fn execute(&self) -> Result<PipelineStats> {
        let cfg = &self.config;
        tracing::info!("Run configuration: {}", cfg.to_json()?);

        // ── Steps 1-3: bundle, vocabulary, extractor ──────────────────────────
        let bundle    = load_bundle(&cfg.model_path)?;
        let index     = VocabularyIndex::new(bundle.vocabulary())?;
        let extractor = FeatureExtractor::new(index, self.filter.clone())
            .with_thresholds(cfg.min_raw_words, cfg.min_retained_words);

        // ── Step 4: scorer ────────────────────────────────────────────────────
        let scorer = BatchScorer::new(&bundle);

        // ── Step 5: destination ───────────────────────────────────────────────
        // Must be checked before any chunk is flushed
        let mut writer = ResultsWriter::new(&cfg.dest_path);

        // ── Step 6: source ────────────────────────────────────────────────────
        tracing::info!("Scoring characters from '{}'", cfg.source_path);
        let mut table = CharacterTableReader::open(&cfg.source_path)?;

        // ── Step 7: run ───────────────────────────────────────────────────────
        let stats = ChunkedPipeline::new(&extractor, &scorer, &mut writer, cfg.chunk_size)
            .run(table.records())?;

        tracing::info!(
            "Done: {} rows read, {} written in {} chunks ({} minor, {} too sparse after filtering)",
            stats.rows_read,
            stats.rows_written,
            stats.chunks_flushed,
            stats.skipped_few_words,
            stats.skipped_few_retained,
        );

        Ok(stats)
    }
}
