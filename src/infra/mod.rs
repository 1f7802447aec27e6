// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Handles the files around the core pipeline:
//
//   bundle_store.rs   — Model bundle loading
//                       Reads the JSON bundle (classifier,
//                       scaler, vocabulary) and validates that
//                       all three agree on the feature width.
//
//   results_writer.rs — Destination table writer
//                       Appends scored rows chunk by chunk and
//                       writes the header at most once, even
//                       across separate runs into one file.
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling with anyhow)

/// Model bundle loading and validation
pub mod bundle_store;

/// Append-only TSV writer for scored rows
pub mod results_writer;
