// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Orchestrates the other layers for one user-visible job.
//
// Rules for this layer:
//   - No text-cleaning or export logic here (Layer 4)
//   - No printing here (that's Layer 1)
//   - Only workflow coordination and error context

// Corpus → folds / full file / STS file
pub mod export_use_case;

// Holdout split, prediction merge, paraphrase conversion
pub mod convert_use_case;

// Prediction scoring
pub mod evaluate_use_case;

// Single-text cleaning for inspection
pub mod normalize_use_case;
