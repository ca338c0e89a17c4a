// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The application layer only ever asks a corpus for a Dataset.
// Each raw corpus layout gets its own implementation:
//
//   FncLoader          → FNC-1 bodies + stances CSVs
//   RumourEvalLoader   → RumourEval 2017 / 2019 tweet trees
//   IndexedTsvLoader   → `index, source, target, stance` TSVs

use anyhow::Result;

use crate::domain::dataset::Dataset;

// ─── DatasetSource ────────────────────────────────────────────────────────────
/// Any component that can assemble a Dataset from raw corpus files.
///
/// Record-level problems (unknown labels, missing lookups) are
/// skipped and logged by the implementation. Only unreadable
/// corpora and invariant violations surface as errors.
pub trait DatasetSource {
    fn load(&self) -> Result<Dataset>;
}
