// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Workflow coordination only:
//   - No tensor math here (that's Layer 5)
//   - No printing here (that's Layer 1)
//   - No direct file formats here (Layers 4 and 6)
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// The chunked extract → score → write state machine
pub mod pipeline;

// One scoring run: bundle + source table → destination table
pub mod score_use_case;
