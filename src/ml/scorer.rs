// ============================================================
// Layer 5 — Batch Scorer
// ============================================================
// Applies the bundle's scaler and classifier to a whole chunk
// of feature vectors in one pass:
//
//   X        : [n, D]   one row per character
//   X_std    = (X - mean) / scale            (broadcast over rows)
//   logits   = X_std · coef + intercept      [n, 1]
//   p        = sigmoid(logits)               [n]
//
// p is the probability of class index 1 in the classifier's
// class ordering; which label that is was fixed at training.
//
// Parameters are uploaded to the backend once, when the scorer
// is built, and reused for every chunk of the run.
//
// Reference: Burn Book §3 (Tensors)

use anyhow::{anyhow, Result};
use burn::prelude::*;
use burn::tensor::{activation::sigmoid, TensorData};

use crate::domain::errors::ScoringError;
use crate::domain::traits::ProbabilityModel;
use crate::ml::model::ModelBundle;

type ScoreBackend = burn::backend::NdArray<f64>;
type ScoreDevice  = <ScoreBackend as Backend>::Device;

pub struct BatchScorer {
    /// [1, D], absent when the scaler was fitted without centring
    mean:      Option<Tensor<ScoreBackend, 2>>,
    /// [1, D], absent when the scaler was fitted without scaling
    scale:     Option<Tensor<ScoreBackend, 2>>,
    /// [D, 1]
    coef:      Tensor<ScoreBackend, 2>,
    intercept: f64,
    width:     usize,
    device:    ScoreDevice,
}

impl BatchScorer {
    pub fn new(bundle: &ModelBundle) -> Self {
        let device = ScoreDevice::default();
        let width  = bundle.feature_width();

        let row = |values: &[f64]| {
            Tensor::<ScoreBackend, 2>::from_data(
                TensorData::new(values.to_vec(), [1, width]),
                &device,
            )
        };

        let scaler = bundle.scaler();
        let mean   = scaler.mean.as_deref().map(row);
        let scale  = scaler.scale.as_deref().map(row);

        let classifier = bundle.classifier();
        let coef = Tensor::<ScoreBackend, 2>::from_data(
            TensorData::new(classifier.coef.clone(), [width, 1]),
            &device,
        );

        tracing::debug!(
            "Batch scorer ready: width={}, centred={}, scaled={}",
            width,
            mean.is_some(),
            scale.is_some()
        );

        Self {
            mean,
            scale,
            coef,
            intercept: classifier.intercept,
            width,
            device,
        }
    }
}

impl ProbabilityModel for BatchScorer {
    fn feature_width(&self) -> usize {
        self.width
    }

    fn predict_proba(&self, batch: &[Vec<f64>]) -> Result<Vec<f64>> {
        let n = batch.len();
        if n == 0 {
            return Ok(Vec::new());
        }

        // ── Width check ───────────────────────────────────────────────────────
        // A wrong width means the data was vectorised against a
        // different vocabulary than this classifier was fitted on.
        if let Some(bad) = batch.iter().find(|row| row.len() != self.width) {
            return Err(ScoringError::DimensionMismatch {
                what:     "feature batch".to_string(),
                expected: self.width,
                found:    bad.len(),
            }
            .into());
        }

        // ── Build X: [n, D] ───────────────────────────────────────────────────
        let flat: Vec<f64> = batch.iter().flat_map(|row| row.iter().copied()).collect();
        let mut x = Tensor::<ScoreBackend, 2>::from_data(
            TensorData::new(flat, [n, self.width]),
            &self.device,
        );

        // ── Standardise ───────────────────────────────────────────────────────
        if let Some(mean) = &self.mean {
            x = x - mean.clone();
        }
        if let Some(scale) = &self.scale {
            x = x / scale.clone();
        }

        // ── Logistic regression ───────────────────────────────────────────────
        let logits = x.matmul(self.coef.clone()).add_scalar(self.intercept);
        let probs  = sigmoid(logits).reshape([n]);

        probs
            .into_data()
            .to_vec::<f64>()
            .map_err(|e| anyhow!("Cannot read probabilities from backend: {e:?}"))
    }
}
