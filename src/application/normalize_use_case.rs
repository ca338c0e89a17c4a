// ============================================================
// Layer 2 — NormalizeUseCase
// ============================================================
// Runs the text cleaning steps over a single post so their
// output can be inspected by hand:
//
//   Step 1: clean_tweet_text(text)
//   Step 2: if a target is given, strip what it shares with
//           the cleaned text (clean_stance_target)

use anyhow::Result;

use crate::application::export_use_case::load_normalizer;
use crate::data::{dedup::clean_stance_target, normalizer::TextNormalizer};
use crate::infra::config::PrepConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedText {
    pub cleaned: String,
    pub target:  Option<String>,
}

pub struct NormalizeUseCase {
    normalizer: TextNormalizer,
}

impl NormalizeUseCase {
    pub fn new(normalizer: TextNormalizer) -> Self {
        Self { normalizer }
    }

    /// Build from the dictionary files named in `config`.
    pub fn from_config(config: &PrepConfig) -> Result<Self> {
        Ok(Self::new(load_normalizer(config)?))
    }

    pub fn run(&self, text: &str, target: Option<&str>) -> NormalizedText {
        let cleaned = self.normalizer.clean_tweet_text(text);
        let target  = target.map(|t| clean_stance_target(t, &cleaned));
        NormalizedText { cleaned, target }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::normalizer::NormalizerConfig;

    #[test]
    fn test_cleans_text_and_target() {
        let uc = NormalizeUseCase::new(TextNormalizer::new(NormalizerConfig::from_word_list([
            "pope", "endorses", "candidate", "wow",
        ])));
        let out = uc.run("wow pope endorses candidate http://x.co/a", Some("Pope endorses candidate"));
        assert_eq!(out.cleaned, "wow pope endorses candidate url$$");
        // matching is case-sensitive: the capital P survives
        assert_eq!(out.target.as_deref(), Some("P"));
    }

    #[test]
    fn test_missing_dictionary_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = PrepConfig {
            dictionary_path: dir.path().join("none.txt").display().to_string(),
            ..PrepConfig::default()
        };
        assert!(NormalizeUseCase::from_config(&cfg).is_err());
    }
}
