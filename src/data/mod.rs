// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between a raw corpus on disk and the prepared
// split files the training scripts read.
//
//   raw corpus (CSV / JSON / TSV / crawl directories)
//       │
//       ▼
//   *_loader          → one Result<Record, SkipReason> per candidate
//       │                (tweets cleaned by TextNormalizer on the way)
//       ▼
//   RecordCollector   → keeps successes, counts and logs skips
//       │
//       ▼
//   Dataset           → validated, see domain::dataset
//       │
//       ▼
//   export            → full file, STS file or k folds
//
// Text cleaning is split into three small pieces so each can be
// tested on its own: TweetParser finds spans, WordSegmenter splits
// glued words, TextNormalizer strings them together.

/// Hashtag / URL / emoji span detection
pub mod tweet_parser;

/// Unigram word segmentation for hashtags and glued tokens
pub mod segmenter;

/// clean_tweet_text and its NormalizerConfig
pub mod normalizer;

/// Stance-target de-duplication (longest common substring)
pub mod dedup;

/// Collects loader output and tallies skipped records
pub mod collector;

/// FNC-1 bodies + stances
pub mod fnc_loader;

/// RumourEval 2017 / 2019 Twitter discourses
pub mod rumoureval_loader;

/// Annotated `index, source, target, stance` tables
pub mod tsv_loader;

/// FakeNewsNet crawl → unannotated (tweet, headline) pairs
pub mod fnn_loader;

/// Twitter paraphrase corpus conversion
pub mod paraphrase;

/// CSI Twitter.txt → FakeNewsNet-style news tables
pub mod csi;

/// MRPC train / val / test split files
pub mod mrpc;

/// Non-shuffled k-fold partitioning
pub mod kfold;

/// Full / STS / cross-validation exporters
pub mod export;

/// Seeded train/test holdout split
pub mod splitter;
