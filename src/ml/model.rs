// ============================================================
// Layer 5 — Model Bundle
// ============================================================
// The trained artefact this tool applies. It is produced
// elsewhere and arrives as one JSON document with three
// required fields:
//
//   itself      → logistic-regression classifier (coef, intercept)
//   scaler      → per-feature standardisation (mean, scale)
//   vocabulary  → ordered feature tokens
//
// All three must agree on the feature width D = |vocabulary|.
// from_raw() checks that once, at load time, so nothing later
// in the run has to guess.

use serde::{Deserialize, Serialize};

use crate::domain::errors::ScoringError;

fn default_classes() -> Vec<String> {
    vec!["m".to_string(), "f".to_string()]
}

/// Binary logistic regression: p = sigmoid(x · coef + intercept)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticClassifier {
    pub coef:      Vec<f64>,
    pub intercept: f64,

    /// Class labels in training order; element 1 is the class
    /// whose probability is reported.
    #[serde(default = "default_classes")]
    pub classes:   Vec<String>,
}

impl LogisticClassifier {
    pub fn positive_class(&self) -> Option<&str> {
        self.classes.get(1).map(String::as_str)
    }
}

/// Standardisation fitted at training time: x' = (x - mean) / scale.
/// Either half may be absent (fitted without centring / scaling).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    #[serde(default)]
    pub mean:  Option<Vec<f64>>,
    #[serde(default)]
    pub scale: Option<Vec<f64>>,
}

/// Bundle exactly as it is laid out on disk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawModelBundle {
    pub itself:     LogisticClassifier,
    pub scaler:     StandardScaler,
    pub vocabulary: Vec<String>,
}

/// Validated, immutable model bundle
#[derive(Debug, Clone)]
pub struct ModelBundle {
    classifier: LogisticClassifier,
    scaler:     StandardScaler,
    vocabulary: Vec<String>,
}

impl ModelBundle {
    /// Check that classifier, scaler and vocabulary agree on width.
    pub fn from_raw(raw: RawModelBundle) -> Result<Self, ScoringError> {
        let width = raw.vocabulary.len();
        if width == 0 {
            return Err(ScoringError::MalformedBundle("vocabulary is empty".into()));
        }

        check_width("classifier coefficients", width, raw.itself.coef.len())?;
        if let Some(mean) = &raw.scaler.mean {
            check_width("scaler mean", width, mean.len())?;
        }
        if let Some(scale) = &raw.scaler.scale {
            check_width("scaler scale", width, scale.len())?;
            if let Some(i) = scale.iter().position(|&s| s == 0.0 || !s.is_finite()) {
                return Err(ScoringError::MalformedBundle(format!(
                    "scaler scale at position {} is {}",
                    i, scale[i]
                )));
            }
        }

        Ok(Self {
            classifier: raw.itself,
            scaler:     raw.scaler,
            vocabulary: raw.vocabulary,
        })
    }

    pub fn classifier(&self) -> &LogisticClassifier {
        &self.classifier
    }

    pub fn scaler(&self) -> &StandardScaler {
        &self.scaler
    }

    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// Feature width every vector must have
    pub fn feature_width(&self) -> usize {
        self.vocabulary.len()
    }
}

fn check_width(what: &str, expected: usize, found: usize) -> Result<(), ScoringError> {
    if expected == found {
        Ok(())
    } else {
        Err(ScoringError::DimensionMismatch { what: what.to_string(), expected, found })
    }
}
