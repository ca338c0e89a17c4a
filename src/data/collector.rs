// ============================================================
// Layer 4 — Record Collector
// ============================================================
// Loaders turn each raw candidate into Result<Record, SkipReason>.
// The collector keeps the successes, logs every skip, and counts
// skips per reason so a run ends with one summary line instead of
// a silent partial dataset.

use std::collections::BTreeMap;

use crate::domain::{
    dataset::Dataset,
    error::{SkipReason, ValidationError},
    kind::DatasetKind,
    record::Record,
};

pub struct RecordCollector {
    corpus:  String,
    records: Vec<Record>,
    skipped: BTreeMap<&'static str, usize>,
}

impl RecordCollector {
    pub fn new(corpus: impl Into<String>) -> Self {
        Self {
            corpus:  corpus.into(),
            records: Vec::new(),
            skipped: BTreeMap::new(),
        }
    }

    pub fn push(&mut self, candidate: Result<Record, SkipReason>) {
        match candidate {
            Ok(record) => self.records.push(record),
            Err(reason) => self.skip(reason),
        }
    }

    /// Record a skip that did not come from a candidate record.
    pub fn skip(&mut self, reason: SkipReason) {
        tracing::warn!("{}: skipping record: {}", self.corpus, reason);
        *self.skipped.entry(reason.category()).or_insert(0) += 1;
    }

    pub fn skipped_total(&self) -> usize {
        self.skipped.values().sum()
    }

    /// Validate the collected records into a Dataset of `kind`.
    pub fn finish(self, kind: DatasetKind) -> Result<Dataset, ValidationError> {
        let summary = self
            .skipped
            .iter()
            .map(|(reason, count)| format!("{reason}={count}"))
            .collect::<Vec<_>>()
            .join(", ");

        tracing::info!(
            "{}: collected {} records, skipped {} [{}]",
            self.corpus,
            self.records.len(),
            self.skipped_total(),
            summary,
        );

        Dataset::from_records(kind, self.records)
    }
}
