// ============================================================
// Layer 3 — Dataset
// ============================================================
// A validated, immutable sequence of records sharing one label
// vocabulary (its DatasetKind).
//
// Invariants checked at construction:
//   - features, labels and (if given) indices have equal length
//   - every feature is a (source, target) pair
//   - every label belongs to the kind's closed label set
//
// Either every record has an index or none has one.
//
// Nothing here mutates a dataset in place: transformations and
// combination return a new Dataset. Exporting to disk is
// implemented in data::export.

use crate::domain::{error::ValidationError, kind::DatasetKind, record::Record};

#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    kind:    DatasetKind,
    records: Vec<Record>,
}

impl Dataset {
    /// Build a dataset from aligned feature, label and index columns.
    pub fn new(
        kind:     DatasetKind,
        features: Vec<(String, String)>,
        labels:   Vec<String>,
        indices:  Option<Vec<String>>,
    ) -> Result<Self, ValidationError> {
        if features.len() != labels.len() {
            return Err(ValidationError::LengthMismatch {
                features: features.len(),
                labels:   labels.len(),
            });
        }
        if let Some(indices) = &indices {
            if indices.len() != features.len() {
                return Err(ValidationError::IndexLengthMismatch {
                    features: features.len(),
                    indices:  indices.len(),
                });
            }
        }
        validate_labels(kind, labels.iter().map(String::as_str))?;

        let mut indices = indices.map(Vec::into_iter);
        let records = features
            .into_iter()
            .zip(labels)
            .map(|((source, target), label)| Record {
                index: indices.as_mut().and_then(Iterator::next),
                source,
                target,
                label,
            })
            .collect();

        Ok(Self { kind, records })
    }

    /// Build a dataset from untyped rows as produced by a raw reader.
    /// Every row must hold exactly two strings.
    pub fn from_rows(
        kind:     DatasetKind,
        features: Vec<Vec<String>>,
        labels:   Vec<String>,
        indices:  Option<Vec<String>>,
    ) -> Result<Self, ValidationError> {
        let mut pairs = Vec::with_capacity(features.len());
        for (position, row) in features.into_iter().enumerate() {
            let len = row.len();
            match <[String; 2]>::try_from(row) {
                Ok([source, target]) => pairs.push((source, target)),
                Err(_) => return Err(ValidationError::MalformedFeature { position, len }),
            }
        }
        Self::new(kind, pairs, labels, indices)
    }

    /// Build a dataset from already-assembled records.
    pub fn from_records(kind: DatasetKind, records: Vec<Record>) -> Result<Self, ValidationError> {
        let indexed = records.iter().filter(|r| r.index.is_some()).count();
        if indexed != 0 && indexed != records.len() {
            return Err(ValidationError::IndexLengthMismatch {
                features: records.len(),
                indices:  indexed,
            });
        }
        validate_labels(kind, records.iter().map(|r| r.label.as_str()))?;
        Ok(Self { kind, records })
    }

    pub fn empty(kind: DatasetKind) -> Self {
        Self { kind, records: Vec::new() }
    }

    pub fn kind(&self) -> DatasetKind { self.kind }

    pub fn len(&self) -> usize { self.records.len() }

    pub fn is_empty(&self) -> bool { self.records.is_empty() }

    pub fn records(&self) -> &[Record] { &self.records }

    pub fn iter(&self) -> impl Iterator<Item = &Record> { self.records.iter() }

    /// True when records carry their original row identifiers.
    pub fn has_indices(&self) -> bool {
        self.records.first().map_or(false, |r| r.index.is_some())
    }

    /// The identifier written for the record at `position`:
    /// its original index if present, else the position itself.
    pub fn index_of(&self, position: usize) -> String {
        self.records
            .get(position)
            .and_then(|r| r.index.clone())
            .unwrap_or_else(|| position.to_string())
    }

    pub fn features(&self) -> Vec<(&str, &str)> {
        self.records
            .iter()
            .map(|r| (r.source.as_str(), r.target.as_str()))
            .collect()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.label.as_str()).collect()
    }

    /// Concatenate two datasets of the same kind, features and labels alike.
    ///
    /// When only one side carries indices, records from the other side
    /// are indexed by their position in the combined sequence.
    pub fn combine(first: &Dataset, second: &Dataset) -> Result<Dataset, ValidationError> {
        if first.kind != second.kind {
            return Err(ValidationError::KindMismatch {
                left:  first.kind,
                right: second.kind,
            });
        }

        let mixed = first.has_indices() != second.has_indices()
            && !first.is_empty()
            && !second.is_empty();

        let records = first
            .records
            .iter()
            .chain(second.records.iter())
            .cloned()
            .enumerate()
            .map(|(position, mut record)| {
                if mixed && record.index.is_none() {
                    record.index = Some(position.to_string());
                }
                record
            })
            .collect();

        Ok(Dataset { kind: first.kind, records })
    }

    /// New dataset with every source rewritten by `f`.
    pub fn map_sources(&self, f: impl Fn(&str) -> String) -> Dataset {
        let records = self
            .records
            .iter()
            .map(|r| Record { source: f(&r.source), ..r.clone() })
            .collect();
        Dataset { kind: self.kind, records }
    }

    /// New dataset with every target rewritten by `f`, which sees the
    /// whole record (targets are often cleaned against their source).
    pub fn map_targets(&self, f: impl Fn(&Record) -> String) -> Dataset {
        let records = self
            .records
            .iter()
            .map(|r| Record { target: f(r), ..r.clone() })
            .collect();
        Dataset { kind: self.kind, records }
    }

    /// New dataset where each source is split into pieces by `f`,
    /// one record per piece. Pieces keep their parent's label and index.
    pub fn split_sources<F>(&self, f: F) -> Dataset
    where
        F: Fn(&str) -> Vec<String>,
    {
        let records = self
            .records
            .iter()
            .flat_map(|r| {
                f(&r.source)
                    .into_iter()
                    .map(move |piece| Record { source: piece, ..r.clone() })
            })
            .collect();
        Dataset { kind: self.kind, records }
    }
}

/// Check every label against the kind's vocabulary.
pub fn validate_labels<'a>(
    kind:   DatasetKind,
    labels: impl IntoIterator<Item = &'a str>,
) -> Result<(), ValidationError> {
    for (position, label) in labels.into_iter().enumerate() {
        if !kind.accepts(label) {
            return Err(ValidationError::UnsupportedLabel {
                position,
                label: label.to_string(),
                kind,
            });
        }
    }
    Ok(())
}
