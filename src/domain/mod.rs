// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust structs, enums and traits describing what the
// scorer works with: character rows read from the source
// table, the metadata carried through scoring, and the rows
// written to the destination table.
//
// Rules for this layer:
//   - NO Burn framework types allowed here
//   - NO file I/O
//   - Only plain Rust structs, enums, and traits
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// One character row from the source table
pub mod character;

// One scored row written to the destination table
pub mod scored_row;

// Typed precondition errors (bundle and dimensionality problems)
pub mod errors;

// Core abstractions (traits) that other layers implement
pub mod traits;
