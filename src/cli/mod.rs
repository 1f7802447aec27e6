// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction. Uses `clap` to parse
// the three positional arguments and hands the run to Layer 2.
//
// Typical use, one run per period table into a shared output:
//
//   char-gender-scorer models/1780-1850.json pre1850.tsv gender_probabilities.tsv
//   char-gender-scorer models/1850-1899.json 1850to99.tsv gender_probabilities.tsv
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::ScoreArgs;

#[derive(Parser, Debug)]
#[command(
    name = "char-gender-scorer",
    version = "0.1.0",
    about = "Score a character table with a pre-trained gender classifier."
)]
pub struct Cli {
    #[command(flatten)]
    pub args: ScoreArgs,
}

impl Cli {
    /// Convert args into a ScoringConfig and run the use case.
    /// This layer only routes and reports, never computes.
    pub fn run(self) -> Result<()> {
        use crate::application::score_use_case::ScoreUseCase;

        let config = self.args.into();
        let stats  = ScoreUseCase::new(config).execute()?;

        println!(
            "Scoring complete. {} of {} characters written.",
            stats.rows_written, stats.rows_read
        );
        Ok(())
    }
}
