// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// This layer contains ALL Burn framework specific code.
// No other layer imports from burn directly — only this one.
//
//   model.rs   — The model bundle: logistic classifier,
//                standard scaler and ordered vocabulary,
//                validated for a consistent feature width
//
//   scorer.rs  — The batch scorer: standardises a chunk of
//                feature vectors and returns one positive-class
//                probability per row, on the NdArray CPU backend
//
// Reference: Burn Book §3 (Building Blocks)

/// Classifier + scaler + vocabulary bundle
pub mod model;

/// Chunk-at-a-time probability scoring
pub mod scorer;
