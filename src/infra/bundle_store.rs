// ============================================================
// Layer 6 — Bundle Store
// ============================================================
// Loads the model bundle from disk.
//
// The bundle is a JSON document with three required fields
// (itself, scaler, vocabulary). Loading happens once per run;
// the resulting ModelBundle is read-only afterwards.
//
// A missing field or a width disagreement between the parts is
// reported here, before a single row of the source is read.
//
// Reference: Rust Book §9 (Error Handling)

use anyhow::{Context, Result};
use std::{fs, path::Path};

use crate::domain::errors::ScoringError;
use crate::ml::model::{ModelBundle, RawModelBundle};

/// Read and validate a model bundle from `path`.
pub fn load_bundle(path: impl AsRef<Path>) -> Result<ModelBundle> {
    let path = path.as_ref();

    let json = fs::read_to_string(path)
        .with_context(|| format!("Cannot read model bundle '{}'", path.display()))?;

    let bundle = parse_bundle(&json)
        .with_context(|| format!("Invalid model bundle '{}'", path.display()))?;

    let classifier = bundle.classifier();
    tracing::info!(
        "Loaded model bundle '{}': {} features, positive class '{}'",
        path.display(),
        bundle.feature_width(),
        classifier.positive_class().unwrap_or("?")
    );

    Ok(bundle)
}

/// Parse and validate a bundle held in memory
pub fn parse_bundle(json: &str) -> Result<ModelBundle> {
    let raw: RawModelBundle = serde_json::from_str(json)
        .map_err(|e| ScoringError::MalformedBundle(e.to_string()))?;
    Ok(ModelBundle::from_raw(raw)?)
}
