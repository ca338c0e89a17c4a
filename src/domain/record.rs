// ============================================================
// Layer 3 — Record Domain Type
// ============================================================
// One labelled (source, target) pair:
//
//   source — the text whose stance is being judged
//            (a tweet, a reply, an article body)
//   target — what the stance is taken towards
//            (a headline, a parent tweet)
//   label  — the stance/relation label
//   index  — optional original row identifier. Kept through
//            transformations and exports so provenance survives
//            splitting and upstream filtering.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub index:  Option<String>,
    pub source: String,
    pub target: String,
    pub label:  String,
}

impl Record {
    /// Create an un-indexed record.
    ///
    /// Example:
    ///   let r = Record::new("fake report", "headline two", "deny");
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        label:  impl Into<String>,
    ) -> Self {
        Self {
            index:  None,
            source: source.into(),
            target: target.into(),
            label:  label.into(),
        }
    }

    /// Attach the original row identifier.
    pub fn with_index(mut self, index: impl Into<String>) -> Self {
        self.index = Some(index.into());
        self
    }
}
