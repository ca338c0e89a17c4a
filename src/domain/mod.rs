// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust types describing what a prepared corpus IS:
// labelled (source, target) records, the closed label
// vocabularies, the validated Dataset and its error types.
//
// Rules for this layer:
//   - NO file I/O
//   - NO text cleaning
//   - Only structs, enums, validation and traits

/// The closed label vocabularies (stance / relation)
pub mod kind;

/// One labelled (source, target) pair with optional provenance index
pub mod record;

/// The validated, immutable record collection
pub mod dataset;

/// ValidationError and SkipReason
pub mod error;

/// Abstractions implemented by the corpus loaders
pub mod traits;
