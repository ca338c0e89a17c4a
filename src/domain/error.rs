// ============================================================
// Layer 3 — Domain Errors
// ============================================================
// Two families of failure exist while assembling a dataset:
//
//   ValidationError — the assembled collection breaks an
//                     invariant. Fatal: construction aborts.
//
//   SkipReason      — one candidate record could not be built
//                     from its raw data. Recoverable: the loader
//                     drops the record, logs it, and moves on.
//
// Filesystem failures during export live next to the exporter
// (data::export::ExportError) because the domain layer does no I/O.

use thiserror::Error;

use crate::domain::kind::DatasetKind;

/// A dataset failed one of its construction invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{features} features but {labels} labels")]
    LengthMismatch { features: usize, labels: usize },

    #[error("{features} features but {indices} indices")]
    IndexLengthMismatch { features: usize, indices: usize },

    #[error("feature {position} has {len} elements, expected a (source, target) pair")]
    MalformedFeature { position: usize, len: usize },

    #[error("label '{label}' at position {position} is not a valid {kind} label")]
    UnsupportedLabel {
        position: usize,
        label:    String,
        kind:     DatasetKind,
    },

    #[error("cannot combine a {left} dataset with a {right} dataset")]
    KindMismatch { left: DatasetKind, right: DatasetKind },
}

/// Why a loader dropped one candidate record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    #[error("unsupported label '{0}'")]
    UnsupportedLabel(String),

    #[error("{what} '{id}' not found")]
    MissingData { what: &'static str, id: String },

    #[error("stances '{parent}' and '{reply}' cannot be propagated to a headline label")]
    UnpropagatableLabel { parent: String, reply: String },

    #[error("row {line} has {fields} fields, expected at least {expected}")]
    MalformedRow {
        line:     usize,
        fields:   usize,
        expected: usize,
    },

    #[error("'{0}' has no text left after cleaning")]
    EmptyText(String),
}

impl SkipReason {
    /// Short stable name used to aggregate skip counts in logs.
    pub fn category(&self) -> &'static str {
        match self {
            SkipReason::UnsupportedLabel(_)         => "unsupported_label",
            SkipReason::MissingData { .. }          => "missing_data",
            SkipReason::UnpropagatableLabel { .. }  => "unpropagatable_label",
            SkipReason::MalformedRow { .. }         => "malformed_row",
            SkipReason::EmptyText(_)                => "empty_text",
        }
    }

    pub fn missing(what: &'static str, id: impl Into<String>) -> Self {
        SkipReason::MissingData { what, id: id.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_names_label_and_kind() {
        let err = ValidationError::UnsupportedLabel {
            position: 3,
            label:    "agree".to_string(),
            kind:     DatasetKind::Stance,
        };
        assert_eq!(
            err.to_string(),
            "label 'agree' at position 3 is not a valid stance label"
        );
    }

    #[test]
    fn test_skip_categories_are_distinct() {
        let reasons = [
            SkipReason::UnsupportedLabel("query".into()),
            SkipReason::missing("tweet", "42"),
            SkipReason::UnpropagatableLabel { parent: "comment".into(), reply: "deny".into() },
            SkipReason::MalformedRow { line: 1, fields: 2, expected: 3 },
            SkipReason::EmptyText("7".into()),
        ];
        let mut names: Vec<_> = reasons.iter().map(SkipReason::category).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), reasons.len());
    }
}
