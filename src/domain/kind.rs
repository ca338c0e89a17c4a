// ============================================================
// Layer 3 — Dataset Kind
// ============================================================
// Every dataset carries exactly one closed label vocabulary.
//
//   Stance   → support | deny | comment | unrelated
//   Relation → related | unrelated
//
// The allowed labels are data on the variant, so validation is a
// single function over any kind rather than per-type overrides.

use std::fmt;

use serde::{Deserialize, Serialize};

const STANCE_LABELS:   &[&str] = &["support", "deny", "comment", "unrelated"];
const RELATION_LABELS: &[&str] = &["related", "unrelated"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetKind {
    Stance,
    Relation,
}

impl DatasetKind {
    /// The closed label set records of this kind may carry.
    pub fn allowed_labels(self) -> &'static [&'static str] {
        match self {
            DatasetKind::Stance   => STANCE_LABELS,
            DatasetKind::Relation => RELATION_LABELS,
        }
    }

    pub fn accepts(self, label: &str) -> bool {
        self.allowed_labels().contains(&label)
    }

    pub fn name(self) -> &'static str {
        match self {
            DatasetKind::Stance   => "stance",
            DatasetKind::Relation => "relation",
        }
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stance_vocabulary() {
        assert!(DatasetKind::Stance.accepts("support"));
        assert!(DatasetKind::Stance.accepts("unrelated"));
        assert!(!DatasetKind::Stance.accepts("related"));
        assert!(!DatasetKind::Stance.accepts("Support"));
    }

    #[test]
    fn test_relation_vocabulary() {
        assert!(DatasetKind::Relation.accepts("related"));
        assert!(!DatasetKind::Relation.accepts("comment"));
    }
}
