// ============================================================
// Layer 6 — Results Writer
// ============================================================
// Appends scored rows to the destination table, one chunk at a
// time.
//
// Header rule:
//   - destination already exists when the writer is created
//       → it carries a header from an earlier run; never write one
//   - destination does not exist yet
//       → write the header once, in front of the first chunk
//
// This lets several source tables (e.g. one per period) be
// scored into a single destination by running the tool once per
// table. The file is only ever opened in append mode, so rows
// written by earlier chunks or earlier runs are never touched.
//
// Output format (tab separated):
//   docid  charid  gender  pubdate  numwords  probability
//
// Reference: Rust Book §12 (I/O and File Handling)

use anyhow::{Context, Result};
use std::{
    fs::OpenOptions,
    path::{Path, PathBuf},
};

use crate::domain::scored_row::ScoredRow;
use crate::domain::traits::ScoredRowSink;

pub struct ResultsWriter {
    path: PathBuf,

    /// True until a header has been written (or found on disk)
    needs_header: bool,
}

impl ResultsWriter {
    /// Decide the header rule now, from whether `path` exists.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let needs_header = !path.exists();

        if needs_header {
            tracing::debug!("Destination '{}' is new; header will be written", path.display());
        } else {
            tracing::info!("Appending to existing destination '{}'", path.display());
        }

        Self { path, needs_header }
    }

    pub fn needs_header(&self) -> bool {
        self.needs_header
    }
}

impl ScoredRowSink for ResultsWriter {
    fn write_chunk(&mut self, rows: Vec<ScoredRow>) -> Result<()> {
        if rows.is_empty() {
            return Ok(());
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Cannot open destination '{}'", self.path.display()))?;

        // The csv writer emits the header from the struct field names
        // before the first serialised row when has_headers is set.
        let mut writer = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .has_headers(self.needs_header)
            .from_writer(file);

        for row in &rows {
            writer
                .serialize(row)
                .with_context(|| format!("Cannot write to '{}'", self.path.display()))?;
        }
        writer
            .flush()
            .with_context(|| format!("Cannot flush '{}'", self.path.display()))?;

        self.needs_header = false;
        Ok(())
    }
}
