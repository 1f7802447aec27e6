// ============================================================
// Layer 1 — CLI Arguments
// ============================================================
// Three positional arguments, no flags:
//
//   char-gender-scorer MODEL SOURCE DEST
//
// MODEL and SOURCE must exist; clap rejects the run with a
// usage error before anything is loaded. DEST may or may not
// exist — an existing DEST is appended to.
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::Args;
use std::path::Path;

use crate::application::score_use_case::ScoringConfig;

#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// Model bundle (JSON with itself, scaler, vocabulary)
    #[arg(value_name = "MODEL", value_parser = existing_file)]
    pub model_path: String,

    /// Tab-separated character table to score
    #[arg(value_name = "SOURCE", value_parser = existing_file)]
    pub source_path: String,

    /// Tab-separated output table; appended to if it exists
    #[arg(value_name = "DEST")]
    pub dest_path: String,
}

/// clap value parser: the argument must name an existing file
fn existing_file(s: &str) -> Result<String, String> {
    if Path::new(s).is_file() {
        Ok(s.to_string())
    } else {
        Err(format!("'{s}' is not an existing file"))
    }
}

/// Convert CLI ScoreArgs into the application-layer ScoringConfig.
/// Thresholds keep their defaults; only the paths come from the
/// command line.
impl From<ScoreArgs> for ScoringConfig {
    fn from(a: ScoreArgs) -> Self {
        ScoringConfig {
            model_path:  a.model_path,
            source_path: a.source_path,
            dest_path:   a.dest_path,
            ..ScoringConfig::default()
        }
    }
}
