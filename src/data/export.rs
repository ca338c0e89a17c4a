// ============================================================
// Layer 4 — Dataset Exporters
// ============================================================
// Materialises a Dataset on disk for the external training code.
//
//   export_full        → one delimited file, header
//                        `index, source, target, stance`
//   export_cross_eval  → outputDir/fold_{1..k}/{train,dev}.tsv
//   export_sts_format  → 10-column STS-compatible TSV
//
// Index column: the record's original index when the dataset
// carries one, otherwise its position in the whole dataset.
//
// Writes are not atomic across folds. A failure half-way leaves
// the folds written so far on disk and aborts the export.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use thiserror::Error;

use crate::data::kfold::{kfold, Fold};
use crate::domain::{dataset::Dataset, record::Record};
use crate::infra::csv_io::{self, TAB};

pub const HEADER: [&str; 4] = ["index", "source", "target", "stance"];

pub const STS_HEADER: [&str; 10] = [
    "index", "genre", "filename", "year", "old_index",
    "source1", "source2", "sentence1", "sentence2", "stance",
];

/// Value written in every STS placeholder column.
pub const STS_PLACEHOLDER: &str = "none";

pub const DEFAULT_FOLDS: usize = 10;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("cannot create '{path}': {source}")]
    Io {
        path:   PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write '{path}': {source}")]
    Csv {
        path:   PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{features} features but {labels} labels")]
    LengthMismatch { features: usize, labels: usize },

    #[error("{rows} rows but {indices} indices")]
    IndexLengthMismatch { rows: usize, indices: usize },

    #[error("cannot split {records} records into {folds} folds")]
    InvalidFolds { folds: usize, records: usize },
}

/// Paths written for one fold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoldOutput {
    pub number:     usize,
    pub train_path: PathBuf,
    pub dev_path:   PathBuf,
    pub train_rows: usize,
    pub dev_rows:   usize,
}

/// Write aligned feature/label columns with the standard header.
///
/// Row `i` is indexed by `indices[i]` when given, else by `i`.
pub fn write_full(
    path:      &Path,
    features:  &[(&str, &str)],
    labels:    &[&str],
    indices:   Option<&[String]>,
    delimiter: u8,
) -> Result<usize, ExportError> {
    if features.len() != labels.len() {
        return Err(ExportError::LengthMismatch {
            features: features.len(),
            labels:   labels.len(),
        });
    }
    if let Some(indices) = indices {
        if indices.len() != features.len() {
            return Err(ExportError::IndexLengthMismatch {
                rows:    features.len(),
                indices: indices.len(),
            });
        }
    }

    let rows = features.iter().zip(labels).enumerate().map(|(i, ((source, target), label))| {
        let index = indices.map_or_else(|| i.to_string(), |ix| ix[i].clone());
        [index, source.to_string(), target.to_string(), label.to_string()]
    });

    csv_io::write_table(path, Some(&HEADER[..]), rows, delimiter).map_err(|source| ExportError::Csv {
        path: path.to_path_buf(),
        source,
    })
}

impl Dataset {
    /// Write the whole dataset to one delimited file.
    pub fn export_full(&self, path: impl AsRef<Path>, delimiter: u8) -> Result<usize, ExportError> {
        let indices: Vec<String> = (0..self.len()).map(|p| self.index_of(p)).collect();
        write_full(path.as_ref(), &self.features(), &self.labels(), Some(&indices), delimiter)
    }

    /// Write the records at `positions` (in that order), keeping each
    /// record's dataset-level index.
    pub fn export_positions(
        &self,
        path:      &Path,
        positions: &[usize],
        delimiter: u8,
    ) -> Result<usize, ExportError> {
        let picked: Vec<(usize, &Record)> = positions
            .iter()
            .filter_map(|&p| self.records().get(p).map(|r| (p, r)))
            .collect();

        let features: Vec<(&str, &str)> =
            picked.iter().map(|(_, r)| (r.source.as_str(), r.target.as_str())).collect();
        let labels: Vec<&str>    = picked.iter().map(|(_, r)| r.label.as_str()).collect();
        let indices: Vec<String> = picked.iter().map(|(p, _)| self.index_of(*p)).collect();

        write_full(path, &features, &labels, Some(&indices), delimiter)
    }

    /// Non-shuffled k-fold export into `output_dir/fold_{f}/`.
    pub fn export_cross_eval(
        &self,
        output_dir: impl AsRef<Path>,
        num_folds:  usize,
    ) -> Result<Vec<FoldOutput>, ExportError> {
        let output_dir = output_dir.as_ref();
        let folds      = kfold(self.len(), num_folds)?;

        let mut outputs = Vec::with_capacity(folds.len());
        for fold in &folds {
            tracing::info!("Creating fold {} at '{}'", fold.number, output_dir.display());
            outputs.push(self.export_fold(output_dir, fold)?);
        }
        Ok(outputs)
    }

    fn export_fold(&self, output_dir: &Path, fold: &Fold) -> Result<FoldOutput, ExportError> {
        let fold_dir = output_dir.join(format!("fold_{}", fold.number));
        fs::create_dir_all(&fold_dir).map_err(|source| ExportError::Io {
            path: fold_dir.clone(),
            source,
        })?;

        let train_path = fold_dir.join("train.tsv");
        let dev_path   = fold_dir.join("dev.tsv");
        let train_rows = self.export_positions(&train_path, &fold.train, TAB)?;
        let dev_rows   = self.export_positions(&dev_path, &fold.dev, TAB)?;

        Ok(FoldOutput {
            number: fold.number,
            train_path,
            dev_path,
            train_rows,
            dev_rows,
        })
    }

    /// Write the STS-compatible 10-column schema (tab-delimited).
    pub fn export_sts_format(&self, path: impl AsRef<Path>) -> Result<usize, ExportError> {
        let path = path.as_ref();
        let rows = self.iter().enumerate().map(|(i, r)| {
            let mut row = Vec::with_capacity(STS_HEADER.len());
            row.push(self.index_of(i));
            row.extend(std::iter::repeat(STS_PLACEHOLDER.to_string()).take(6));
            row.push(r.source.clone());
            row.push(r.target.clone());
            row.push(r.label.clone());
            row
        });

        csv_io::write_table(path, Some(&STS_HEADER[..]), rows, TAB).map_err(|source| {
            ExportError::Csv {
                path: path.to_path_buf(),
                source,
            }
        })
    }
}
