// ============================================================
// Layer 2 — ExportUseCase
// ============================================================
// Turns one raw corpus into prepared split files:
//
//   Step 1: Load the corpus into a Dataset      (Layer 4 - data)
//           RumourEval editions are loaded one by one and
//           concatenated with Dataset::combine; FakeNewsNet
//           and RumourEval tweets go through the TextNormalizer
//   Step 2: Optionally strip headline text
//           copied into the target              (Layer 4 - data)
//   Step 3: Export                              (Layer 4 - data)
//           k folds, one full file, or STS schema

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::data::{
    dedup::clean_stance_target,
    export::FoldOutput,
    fnc_loader::{fnc_root_exists, FncLayout, FncLoader},
    fnn_loader::{FakeNewsNetLoader, NewsLabel},
    normalizer::{NormalizerConfig, TextNormalizer},
    rumoureval_loader::{RumourEdition, RumourEvalLoader},
    tsv_loader::IndexedTsvLoader,
};
use crate::domain::{dataset::Dataset, kind::DatasetKind, traits::DatasetSource};
use crate::infra::config::PrepConfig;

// ─── Request types ────────────────────────────────────────────────────────────

/// Which raw corpus to read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Corpus {
    Fnc { kind: DatasetKind, layout: FncLayout },
    RumourEval { editions: Vec<RumourEdition> },
    FakeNewsNet { label: NewsLabel, clean: bool },
    IndexedTsv { path: PathBuf },
}

/// What to write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportTarget {
    CrossEval { output_dir: PathBuf, num_folds: usize },
    Full { path: PathBuf, delimiter: u8 },
    Sts { path: PathBuf },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRequest {
    pub corpus:        Corpus,
    pub target:        ExportTarget,
    pub dedup_targets: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub records: usize,
    pub folds:   Vec<FoldOutput>,
    pub files:   Vec<PathBuf>,
}

impl Corpus {
    /// Where k folds go when the caller names no directory.
    pub fn default_output_dir(&self, config: &PrepConfig) -> PathBuf {
        match self {
            Corpus::Fnc { kind, layout } => {
                let name = match (kind, layout) {
                    (DatasetKind::Stance, FncLayout::Full)         => "fnc_full",
                    (DatasetKind::Stance, FncLayout::Paragraphs)   => "fnc_split",
                    (DatasetKind::Relation, FncLayout::Full)       => "fnc_relation_full",
                    (DatasetKind::Relation, FncLayout::Paragraphs) => "fnc_relation_split",
                };
                Path::new(&config.fnc_root).join(name)
            }
            Corpus::RumourEval { editions } => match editions.as_slice() {
                [RumourEdition::Y2017] => PathBuf::from(&config.re17_root),
                [RumourEdition::Y2019] => Path::new(&config.re19_root).join("only_twitter"),
                _ => Path::new(&config.re19_root).join("combined"),
            },
            Corpus::FakeNewsNet { .. } => PathBuf::from(&config.fnn_root),
            Corpus::IndexedTsv { .. } => Path::new(&config.fnn_root).join("folds"),
        }
    }
}

// ─── ExportUseCase ────────────────────────────────────────────────────────────
pub struct ExportUseCase {
    config: PrepConfig,
}

impl ExportUseCase {
    pub fn new(config: PrepConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self, request: &ExportRequest) -> Result<ExportSummary> {
        // ── Step 1: Load ──────────────────────────────────────────────────────
        let mut dataset = self.load(&request.corpus)?;
        tracing::info!("Loaded {} {} records", dataset.len(), dataset.kind());

        // ── Step 2: Target de-duplication ─────────────────────────────────────
        if request.dedup_targets {
            dataset = dataset.map_targets(|r| clean_stance_target(&r.target, &r.source));
            tracing::info!("Removed source overlap from {} targets", dataset.len());
        }

        // ── Step 3: Export ────────────────────────────────────────────────────
        let mut summary = ExportSummary {
            records: dataset.len(),
            folds:   Vec::new(),
            files:   Vec::new(),
        };
        match &request.target {
            ExportTarget::CrossEval { output_dir, num_folds } => {
                summary.folds = dataset
                    .export_cross_eval(output_dir, *num_folds)
                    .with_context(|| format!("Cross-validation export to '{}' failed", output_dir.display()))?;
                summary.files = summary
                    .folds
                    .iter()
                    .flat_map(|f| [f.train_path.clone(), f.dev_path.clone()])
                    .collect();
            }
            ExportTarget::Full { path, delimiter } => {
                ensure_parent(path)?;
                dataset
                    .export_full(path, *delimiter)
                    .with_context(|| format!("Export to '{}' failed", path.display()))?;
                summary.files.push(path.clone());
            }
            ExportTarget::Sts { path } => {
                ensure_parent(path)?;
                dataset
                    .export_sts_format(path)
                    .with_context(|| format!("STS export to '{}' failed", path.display()))?;
                summary.files.push(path.clone());
            }
        }

        Ok(summary)
    }

    fn load(&self, corpus: &Corpus) -> Result<Dataset> {
        let cfg = &self.config;
        match corpus {
            Corpus::Fnc { kind, layout } => {
                let root = Path::new(&cfg.fnc_root);
                if !fnc_root_exists(root) {
                    tracing::warn!("'{}' does not look like an FNC-1 checkout", root.display());
                }
                FncLoader::new(root, *kind, *layout)
                    .with_info_every(cfg.info_every)
                    .load()
            }
            Corpus::RumourEval { editions } => {
                let normalizer = load_normalizer(cfg)?;
                let mut merged = Dataset::empty(DatasetKind::Stance);
                for edition in editions {
                    let root = match edition {
                        RumourEdition::Y2017 => &cfg.re17_root,
                        RumourEdition::Y2019 => &cfg.re19_root,
                    };
                    let loaded = RumourEvalLoader::new(root, *edition, &normalizer)
                        .with_info_every(cfg.info_every)
                        .load()?;
                    merged = Dataset::combine(&merged, &loaded)?;
                }
                Ok(merged)
            }
            Corpus::FakeNewsNet { label, clean } => {
                let root = Path::new(&cfg.fnn_root);
                if *clean {
                    let normalizer = load_normalizer(cfg)?;
                    FakeNewsNetLoader::new(root, *label)
                        .cleaned_with(&normalizer)
                        .with_info_every(cfg.info_every)
                        .load()
                } else {
                    FakeNewsNetLoader::new(root, *label)
                        .with_info_every(cfg.info_every)
                        .load()
                }
            }
            Corpus::IndexedTsv { path } => IndexedTsvLoader::new(path, DatasetKind::Stance).load(),
        }
    }
}

/// Build the TextNormalizer from the dictionary files named in `config`.
pub fn load_normalizer(config: &PrepConfig) -> Result<TextNormalizer> {
    let normalizer_config = NormalizerConfig::load(
        Path::new(&config.dictionary_path),
        config.unigram_path.as_deref().map(Path::new),
    )?;
    Ok(TextNormalizer::new(normalizer_config))
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Cannot create '{}'", parent.display()))?;
    }
    Ok(())
}
