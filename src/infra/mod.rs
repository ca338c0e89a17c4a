// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting concerns used by several layers:
//
//   csv_io.rs   — Delimited file reading and writing
//                 One place decides quoting, terminators and
//                 header handling for every table the tool
//                 touches.
//
//   json_io.rs  — One-document-per-file JSON corpora
//                 Reading, sorted directory listings, ids.
//
//   config.rs   — PrepConfig
//                 Corpus roots and export settings loaded
//                 from JSON, with defaults for every key.
//
//   metrics.rs  — Prediction evaluation
//                 Accuracy / precision / recall / f1 for a
//                 prediction file, written to evaluation.csv.

/// Delimited file I/O shared by loaders and exporters
pub mod csv_io;

/// JSON corpus files and sorted directory walks
pub mod json_io;

/// JSON preparation config
pub mod config;

/// Prediction evaluation report
pub mod metrics;
