// ============================================================
// Layer 4 — FakeNewsNet Loader
// ============================================================
// Reads the FakeNewsNet crawl, one directory per news item:
//
//   <root>/politifact/<fake|real>/<news_id>/
//     news content.json     {"title": .., "meta_data": {"description": ..}}
//     tweets/<id>.json      {"text": ..}
//
// Every tweet is paired with the article title and with its meta
// description (whichever are non-empty). The crawl carries no
// stance annotation, so every pair gets the placeholder label
// "comment"; annotators correct it later.
//
// Uncleaned pairs keep the raw tweet with newlines flattened.
// Cleaned pairs run title, description and tweet through the
// TextNormalizer and strip the text the tweet copies from its
// target.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;

use crate::data::{dedup::clean_stance_target, normalizer::TextNormalizer};
use crate::domain::{dataset::Dataset, kind::DatasetKind, traits::DatasetSource};
use crate::infra::json_io::{read_json, sorted_entries};

/// Sub-collections of the crawl that are read.
pub const FNN_COLLECTIONS: [&str; 1] = ["politifact"];

/// Label given to every unannotated pair.
pub const DEFAULT_STANCE: &str = "comment";

const NEWS_CONTENT_FILE: &str = "news content.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewsLabel {
    Fake,
    Real,
}

impl NewsLabel {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "fake" => Some(Self::Fake),
            "real" => Some(Self::Real),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Fake => "fake",
            Self::Real => "real",
        }
    }
}

/// File name of one full export, e.g. `csi_fake_cleaned.csv`.
pub fn export_file_name(label: NewsLabel, cleaned: bool) -> String {
    let variant = if cleaned { "cleaned" } else { "uncleaned" };
    format!("csi_{}_{}.csv", label.name(), variant)
}

/// Title and description of one news item.
struct Article {
    title:       String,
    description: String,
}

// ─── FakeNewsNetLoader ────────────────────────────────────────────────────────
pub struct FakeNewsNetLoader<'a> {
    root:       PathBuf,
    label:      NewsLabel,
    normalizer: Option<&'a TextNormalizer>,
    info_every: usize,
}

impl<'a> FakeNewsNetLoader<'a> {
    /// Loader producing uncleaned pairs.
    pub fn new(root: impl Into<PathBuf>, label: NewsLabel) -> Self {
        Self {
            root: root.into(),
            label,
            normalizer: None,
            info_every: 10,
        }
    }

    /// Clean every text with `normalizer`.
    pub fn cleaned_with(mut self, normalizer: &'a TextNormalizer) -> Self {
        self.normalizer = Some(normalizer);
        self
    }

    pub fn with_info_every(mut self, info_every: usize) -> Self {
        self.info_every = info_every.max(1);
        self
    }

    fn clean(&self, text: &str) -> String {
        match self.normalizer {
            Some(n) => n.clean_tweet_text(text),
            None => text.replace('\n', " "),
        }
    }

    fn read_article(&self, news_dir: &Path) -> Result<Option<Article>> {
        let path = news_dir.join(NEWS_CONTENT_FILE);
        if !path.is_file() {
            return Ok(None);
        }
        let json  = read_json(&path)?;
        let title = json.get("title").and_then(Value::as_str).unwrap_or_default();
        let description = json
            .pointer("/meta_data/description")
            .and_then(Value::as_str)
            .unwrap_or_default();

        // uncleaned articles keep their text as published
        let (title, description) = match self.normalizer {
            Some(n) => (n.clean_tweet_text(title), n.clean_tweet_text(description)),
            None => (title.to_string(), description.to_string()),
        };
        Ok(Some(Article { title, description }))
    }

    /// Source for a (tweet, target) pair.
    fn pair_source(&self, tweet: &str, target: &str) -> String {
        if self.normalizer.is_some() {
            clean_stance_target(tweet, target)
        } else {
            tweet.to_string()
        }
    }
}

impl DatasetSource for FakeNewsNetLoader<'_> {
    fn load(&self) -> Result<Dataset> {
        let mut features: Vec<Vec<String>> = Vec::new();
        let mut skipped = 0usize;
        let mut tweets  = 0usize;

        for collection in FNN_COLLECTIONS {
            let label_dir = self.root.join(collection).join(self.label.name());
            for news_dir in sorted_entries(&label_dir)? {
                let Some(article) = self.read_article(&news_dir)? else {
                    tracing::warn!("fnn: skipping '{}': no {}", news_dir.display(), NEWS_CONTENT_FILE);
                    skipped += 1;
                    continue;
                };
                let tweet_dir = news_dir.join("tweets");
                if !tweet_dir.is_dir() {
                    tracing::warn!("fnn: skipping '{}': no tweets", news_dir.display());
                    skipped += 1;
                    continue;
                }

                for tweet_path in sorted_entries(&tweet_dir)? {
                    if tweets % self.info_every == 0 {
                        tracing::info!("Loaded {} FakeNewsNet tweets", tweets);
                    }
                    let json = read_json(&tweet_path)?;
                    let text = json
                        .get("text")
                        .and_then(Value::as_str)
                        .with_context(|| format!("'{}' has no tweet text", tweet_path.display()))?;
                    let tweet = self.clean(text);

                    for target in [&article.title, &article.description] {
                        if !target.is_empty() {
                            features.push(vec![self.pair_source(&tweet, target), target.clone()]);
                        }
                    }
                    tweets += 1;
                }
            }
        }

        tracing::info!(
            "fnn: {} pairs from {} {} tweets, skipped {} news items",
            features.len(),
            tweets,
            self.label.name(),
            skipped,
        );
        let labels = vec![DEFAULT_STANCE.to_string(); features.len()];
        Ok(Dataset::from_rows(DatasetKind::Stance, features, labels, None)?)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::normalizer::NormalizerConfig;
    use std::fs;

    fn write(path: PathBuf, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn crawl() -> tempfile::TempDir {
        let dir  = tempfile::tempdir().unwrap();
        let fake = dir.path().join("politifact/fake");
        write(
            fake.join("n1/news content.json"),
            r#"{"title": "Pope endorses candidate", "url": "http://a",
                "meta_data": {"description": "Shocking news"}}"#,
        );
        write(fake.join("n1/tweets/1.json"), r#"{"text": "pope endorses candidate wow\nhttp://x.co/a"}"#);
        // no article
        write(fake.join("n2/tweets/2.json"), r#"{"text": "orphan"}"#);
        // nothing to pair with
        write(fake.join("n3/news content.json"), r#"{"title": "", "meta_data": {}}"#);
        write(fake.join("n3/tweets/3.json"), r#"{"text": "lonely"}"#);
        dir
    }

    fn rows(ds: &Dataset) -> Vec<(String, String, String)> {
        ds.iter().map(|r| (r.source.clone(), r.target.clone(), r.label.clone())).collect()
    }

    #[test]
    fn test_uncleaned_pairs() {
        let dir = crawl();
        let ds  = FakeNewsNetLoader::new(dir.path(), NewsLabel::Fake).load().unwrap();

        let tweet = "pope endorses candidate wow http://x.co/a".to_string();
        assert_eq!(
            rows(&ds),
            vec![
                (tweet.clone(), "Pope endorses candidate".into(), "comment".into()),
                (tweet, "Shocking news".into(), "comment".into()),
            ]
        );
    }

    #[test]
    fn test_cleaned_pairs_drop_copied_title() {
        let dir = crawl();
        let n   = TextNormalizer::new(NormalizerConfig::from_word_list([
            "pope", "endorses", "candidate", "wow", "shocking", "news",
        ]));
        let ds = FakeNewsNetLoader::new(dir.path(), NewsLabel::Fake)
            .cleaned_with(&n)
            .load()
            .unwrap();

        let sources: Vec<&str> = ds.iter().map(|r| r.source.as_str()).collect();
        let targets: Vec<&str> = ds.iter().map(|r| r.target.as_str()).collect();
        assert_eq!(sources, vec!["p wow url", "pope endorses candidate wow url"]);
        assert_eq!(targets, vec!["Pope endorses candidate", "Shocking news"]);
    }

    #[test]
    fn test_missing_label_dir_is_fatal() {
        let dir = crawl();
        assert!(FakeNewsNetLoader::new(dir.path(), NewsLabel::Real).load().is_err());
    }

    #[test]
    fn test_export_names() {
        assert_eq!(NewsLabel::from_name("real"), Some(NewsLabel::Real));
        assert_eq!(NewsLabel::from_name("satire"), None);
        assert_eq!(export_file_name(NewsLabel::Fake, true), "csi_fake_cleaned.csv");
        assert_eq!(export_file_name(NewsLabel::Real, false), "csi_real_uncleaned.csv");
    }
}
