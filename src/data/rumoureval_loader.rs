// ============================================================
// Layer 4 — RumourEval Twitter Loader (2017 / 2019)
// ============================================================
// A RumourEval discourse is one source tweet plus a reply tree:
//
//   <topic>/<discourse>/
//     source-tweet/<id>.json   {"id": .., "text": ..}
//     replies/<id>.json
//     structure.json           {"src": {"reply": {"nested": []}}}
//     urls.dat                 url_id \t short_url \t full_url
//
// Records produced per discourse:
//   (source tweet, headline)  source stance, one per clean headline
//   (reply, parent tweet)     reply stance
//   (reply, headline)         propagated stance, when the parent
//                             already carries one
//
// Headlines come from a pre-built CSV
// (url_id, full_url, headline, media, clean); only clean == "1"
// rows are used. Every tweet is run through the TextNormalizer and
// tweets with no text left are dropped.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::data::{collector::RecordCollector, normalizer::TextNormalizer};
use crate::domain::{
    dataset::Dataset, error::SkipReason, kind::DatasetKind, record::Record,
    traits::DatasetSource,
};
use crate::infra::{
    csv_io::{read_rows, COMMA, TAB},
    json_io::{id_string, read_json, sorted_entries},
};

// ─── Editions ─────────────────────────────────────────────────────────────────
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RumourEdition {
    Y2017,
    Y2019,
}

impl RumourEdition {
    pub fn from_year(year: u16) -> Option<Self> {
        match year {
            2017 => Some(Self::Y2017),
            2019 => Some(Self::Y2019),
            _ => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Y2017 => "rumoureval17",
            Self::Y2019 => "rumoureval19",
        }
    }

    fn traindev(self, root: &Path) -> PathBuf {
        match self {
            Self::Y2017 => root.join("traindev"),
            Self::Y2019 => root.join("rumoureval-2019-training-data"),
        }
    }

    fn data_dir(self, root: &Path) -> PathBuf {
        match self {
            Self::Y2017 => root.join("rumoureval-data"),
            Self::Y2019 => self.traindev(root).join("twitter-english"),
        }
    }

    fn headlines_path(self, root: &Path) -> PathBuf {
        match self {
            Self::Y2017 => root.join("headlines.csv"),
            Self::Y2019 => root.join("headlines_twitter.csv"),
        }
    }

    fn label_paths(self, root: &Path) -> [PathBuf; 2] {
        let traindev = self.traindev(root);
        match self {
            Self::Y2017 => [
                traindev.join("rumoureval-subtaskA-train.json"),
                traindev.join("rumoureval-subtaskA-dev.json"),
            ],
            Self::Y2019 => [traindev.join("train-key.json"), traindev.join("dev-key.json")],
        }
    }

    /// Key of the subtask-A object inside each label file, if nested.
    fn label_section(self) -> Option<&'static str> {
        match self {
            Self::Y2017 => None,
            Self::Y2019 => Some("subtaskaenglish"),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawTweet {
    id:   Value,
    text: String,
}

/// Tweets, headlines and propagated labels of one discourse.
struct Discourse<'l> {
    labels:     &'l HashMap<String, String>,
    tweets:     HashMap<String, String>,
    headlines:  Vec<String>,
    propagated: HashMap<String, &'static str>,
}

// ─── RumourEvalLoader ─────────────────────────────────────────────────────────
pub struct RumourEvalLoader<'a> {
    root:       PathBuf,
    edition:    RumourEdition,
    normalizer: &'a TextNormalizer,
    info_every: usize,
}

impl<'a> RumourEvalLoader<'a> {
    pub fn new(
        root:       impl Into<PathBuf>,
        edition:    RumourEdition,
        normalizer: &'a TextNormalizer,
    ) -> Self {
        Self {
            root: root.into(),
            edition,
            normalizer,
            info_every: 10,
        }
    }

    pub fn with_info_every(mut self, info_every: usize) -> Self {
        self.info_every = info_every.max(1);
        self
    }

    /// Tweet id → raw stance, train and dev merged (dev wins on clashes).
    pub fn load_labels(&self) -> Result<HashMap<String, String>> {
        let mut labels = HashMap::new();
        for path in self.edition.label_paths(&self.root) {
            let json = read_json(&path)?;
            let section = match self.edition.label_section() {
                Some(key) => json
                    .get(key)
                    .with_context(|| format!("'{}' has no '{}' section", path.display(), key))?,
                None => &json,
            };
            let entries = section
                .as_object()
                .with_context(|| format!("'{}' is not a JSON object", path.display()))?;
            for (id, stance) in entries {
                if let Some(stance) = stance.as_str() {
                    labels.insert(id.clone(), stance.to_string());
                }
            }
        }
        tracing::info!("Loaded {} {} labels", labels.len(), self.edition.name());
        Ok(labels)
    }

    /// url_id → headline, clean rows only.
    pub fn load_headlines(&self) -> Result<HashMap<String, String>> {
        let path = self.edition.headlines_path(&self.root);
        let rows = read_rows(&path, COMMA, false).with_context(|| {
            format!(
                "Cannot read headlines '{}' (the headline crawl is not part of this tool)",
                path.display()
            )
        })?;

        Ok(rows
            .iter()
            .filter(|row| row.len() >= 5 && &row[4] == "1")
            .map(|row| (row[0].to_string(), row[2].to_string()))
            .collect())
    }

    /// Tweet id → cleaned text for every JSON file in `folder`.
    fn load_tweet_folder(
        &self,
        folder:    &Path,
        collector: &mut RecordCollector,
    ) -> Result<HashMap<String, String>> {
        let mut tweets = HashMap::new();
        if !folder.is_dir() {
            return Ok(tweets);
        }
        for path in sorted_entries(folder)? {
            let raw: RawTweet = serde_json::from_value(read_json(&path)?)
                .with_context(|| format!("'{}' is not a tweet", path.display()))?;
            let id   = id_string(&raw.id);
            let text = self.normalizer.clean_tweet_text(&raw.text);
            if text.trim().is_empty() {
                collector.skip(SkipReason::EmptyText(id));
            } else {
                tweets.insert(id, text);
            }
        }
        Ok(tweets)
    }

    fn load_discourse_headlines(
        &self,
        dir:       &Path,
        headlines: &HashMap<String, String>,
        collector: &mut RecordCollector,
    ) -> Result<Vec<String>> {
        let path = dir.join("urls.dat");
        if !path.is_file() {
            return Ok(Vec::new());
        }
        let rows = read_rows(&path, TAB, false)
            .with_context(|| format!("Cannot read '{}'", path.display()))?;

        let mut found = Vec::new();
        for (i, row) in rows.iter().enumerate() {
            if row.len() < 3 {
                collector.skip(SkipReason::MalformedRow { line: i + 1, fields: row.len(), expected: 3 });
                continue;
            }
            match headlines.get(&row[0]) {
                Some(headline) => found.push(headline.clone()),
                None => collector.skip(SkipReason::missing("headline", &row[0])),
            }
        }
        Ok(found)
    }

    fn load_discourse(
        &self,
        dir:       &Path,
        labels:    &HashMap<String, String>,
        headlines: &HashMap<String, String>,
        collector: &mut RecordCollector,
    ) -> Result<()> {
        let sources = self.load_tweet_folder(&dir.join("source-tweet"), collector)?;
        let replies = self.load_tweet_folder(&dir.join("replies"), collector)?;

        let mut discourse = Discourse {
            labels,
            tweets:     replies,
            headlines:  self.load_discourse_headlines(dir, headlines, collector)?,
            propagated: HashMap::new(),
        };
        discourse.tweets.extend(sources.iter().map(|(k, v)| (k.clone(), v.clone())));

        // ── Source tweet × headline ──────────────────────────────────────────
        let mut source_ids: Vec<&String> = sources.keys().collect();
        source_ids.sort();
        for id in source_ids {
            let stance = match labels.get(id) {
                Some(raw) => convert_stance(raw),
                None => Err(SkipReason::missing("label", id.as_str())),
            };
            match stance {
                Ok(stance) => {
                    for headline in &discourse.headlines {
                        collector.push(Ok(Record::new(sources[id].clone(), headline.clone(), stance)));
                    }
                    discourse.propagated.insert(id.clone(), stance);
                }
                Err(reason) => collector.skip(reason),
            }
        }

        // ── Reply tree ───────────────────────────────────────────────────────
        let structure_path = dir.join("structure.json");
        let structure      = read_json(&structure_path)?;
        if let Some(tree) = structure.as_object() {
            annotate_tree(tree, &mut discourse, collector);
        }
        Ok(())
    }
}

impl DatasetSource for RumourEvalLoader<'_> {
    fn load(&self) -> Result<Dataset> {
        let headlines = self.load_headlines()?;
        let labels    = self.load_labels()?;
        let data_dir  = self.edition.data_dir(&self.root);

        let mut collector = RecordCollector::new(self.edition.name());
        let mut seen      = 0usize;
        for topic in sorted_entries(&data_dir)? {
            if !topic.is_dir() {
                continue;
            }
            for discourse in sorted_entries(&topic)? {
                if !discourse.is_dir() {
                    continue;
                }
                if seen % self.info_every == 0 {
                    tracing::info!("Loaded {} {} discourses", seen, self.edition.name());
                }
                self.load_discourse(&discourse, &labels, &headlines, &mut collector)?;
                seen += 1;
            }
        }

        Ok(collector.finish(DatasetKind::Stance)?)
    }
}

// ─── Stance rules ─────────────────────────────────────────────────────────────

/// RumourEval raw stance → dataset label. "query" has no counterpart.
pub fn convert_stance(raw: &str) -> Result<&'static str, SkipReason> {
    match raw {
        "support" => Ok("support"),
        "deny"    => Ok("deny"),
        "comment" => Ok("comment"),
        other     => Err(SkipReason::UnsupportedLabel(other.to_string())),
    }
}

/// Stance of a reply toward the headline, given its parent's stance
/// toward that headline and the reply's stance toward the parent.
pub fn propagate_headline_label(parent: &str, reply: &str) -> Result<&'static str, SkipReason> {
    match (parent, reply) {
        ("support", "support") | ("deny", "deny") => Ok("support"),
        ("support", "deny") | ("deny", "support") => Ok("deny"),
        _ => Err(SkipReason::UnpropagatableLabel {
            parent: parent.to_string(),
            reply:  reply.to_string(),
        }),
    }
}

/// Walk `tree` depth-first in file order, emitting reply records for
/// every (tweet → reply) edge before descending into the replies.
fn annotate_tree(tree: &Map<String, Value>, discourse: &mut Discourse<'_>, collector: &mut RecordCollector) {
    for (tweet, replies) in tree {
        let Some(replies) = replies.as_object() else {
            continue;
        };
        for reply in replies.keys() {
            if let Err(reason) = annotate_reply(tweet, reply, discourse, collector) {
                collector.skip(reason);
            }
        }
        annotate_tree(replies, discourse, collector);
    }
}

fn annotate_reply(
    tweet:     &str,
    reply:     &str,
    discourse: &mut Discourse<'_>,
    collector: &mut RecordCollector,
) -> Result<(), SkipReason> {
    let tweet_text = discourse.tweets.get(tweet).ok_or_else(|| SkipReason::missing("tweet text", tweet))?;
    let reply_text = discourse.tweets.get(reply).ok_or_else(|| SkipReason::missing("tweet text", reply))?;
    let raw        = discourse.labels.get(reply).ok_or_else(|| SkipReason::missing("label", reply))?;

    let stance = convert_stance(raw)?;
    collector.push(Ok(Record::new(reply_text.clone(), tweet_text.clone(), stance)));

    if let Some(parent) = discourse.propagated.get(tweet) {
        let headline_stance = propagate_headline_label(parent, stance)?;
        for headline in &discourse.headlines {
            collector.push(Ok(Record::new(reply_text.clone(), headline.clone(), headline_stance)));
        }
        discourse.propagated.insert(reply.to_string(), headline_stance);
    }
    Ok(())
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::normalizer::NormalizerConfig;
    use std::fs;

    fn normalizer() -> TextNormalizer {
        TextNormalizer::new(NormalizerConfig::from_word_list([
            "pope", "endorses", "candidate", "this", "is", "fake", "read", "more", "it", "real",
        ]))
    }

    fn write(path: PathBuf, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn corpus_2017() -> tempfile::TempDir {
        let dir  = tempfile::tempdir().unwrap();
        let root = dir.path();
        write(
            root.join("traindev/rumoureval-subtaskA-train.json"),
            r#"{"100": "support", "101": "deny", "102": "comment"}"#,
        );
        write(root.join("traindev/rumoureval-subtaskA-dev.json"), r#"{"103": "query"}"#);
        write(
            root.join("headlines.csv"),
            "url_id,full_url,headline,media,clean\n\
             u1,http://a,Pope endorses candidate,cnn,1\n\
             u2,http://b,Dirty headline,cnn,0\n",
        );

        let d = root.join("rumoureval-data/topic/100");
        write(d.join("source-tweet/100.json"), r#"{"id": 100, "text": "pope endorses candidate"}"#);
        write(d.join("replies/101.json"), r#"{"id": 101, "text": "this is fake"}"#);
        write(d.join("replies/102.json"), r#"{"id": 102, "text": "read more"}"#);
        write(d.join("replies/103.json"), r#"{"id": "103", "text": "is it real"}"#);
        write(d.join("structure.json"), r#"{"100": {"101": {"102": []}, "103": []}}"#);
        write(d.join("urls.dat"), "u1\thttp://t.co/x\thttp://a\nu2\thttp://t.co/y\thttp://b\n");
        dir
    }

    #[test]
    fn test_propagation_table() {
        assert_eq!(propagate_headline_label("support", "support"), Ok("support"));
        assert_eq!(propagate_headline_label("deny", "deny"), Ok("support"));
        assert_eq!(propagate_headline_label("deny", "support"), Ok("deny"));
        assert!(propagate_headline_label("comment", "deny").is_err());
    }

    #[test]
    fn test_query_is_unsupported() {
        assert!(matches!(convert_stance("query"), Err(SkipReason::UnsupportedLabel(_))));
    }

    #[test]
    fn test_edition_from_year() {
        assert_eq!(RumourEdition::from_year(2019), Some(RumourEdition::Y2019));
        assert_eq!(RumourEdition::from_year(2018), None);
    }

    #[test]
    fn test_load_2017_discourse() {
        let dir = corpus_2017();
        let n   = normalizer();
        let ds  = RumourEvalLoader::new(dir.path(), RumourEdition::Y2017, &n).load().unwrap();

        let rows: Vec<(&str, &str, &str)> = ds
            .iter()
            .map(|r| (r.source.as_str(), r.target.as_str(), r.label.as_str()))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("pope endorses candidate", "Pope endorses candidate", "support"),
                ("this is fake", "pope endorses candidate", "deny"),
                ("this is fake", "Pope endorses candidate", "deny"),
                ("read more", "this is fake", "comment"),
            ]
        );
    }

    #[test]
    fn test_replies_follow_structure_file_order() {
        let dir  = tempfile::tempdir().unwrap();
        let root = dir.path();
        write(
            root.join("traindev/rumoureval-subtaskA-train.json"),
            r#"{"100": "comment", "200": "comment", "1000": "comment"}"#,
        );
        write(root.join("traindev/rumoureval-subtaskA-dev.json"), "{}");
        write(root.join("headlines.csv"), "url_id,full_url,headline,media,clean\n");

        let d = root.join("rumoureval-data/topic/100");
        write(d.join("source-tweet/100.json"), r#"{"id": 100, "text": "pope endorses candidate"}"#);
        write(d.join("replies/200.json"), r#"{"id": 200, "text": "fake"}"#);
        write(d.join("replies/1000.json"), r#"{"id": 1000, "text": "real"}"#);
        // "1000" sorts before "200" as a string
        write(d.join("structure.json"), r#"{"100": {"200": [], "1000": []}}"#);

        let n  = normalizer();
        let ds = RumourEvalLoader::new(root, RumourEdition::Y2017, &n).load().unwrap();
        let sources: Vec<&str> = ds.iter().map(|r| r.source.as_str()).collect();
        assert_eq!(sources, vec!["fake", "real"]);
    }

    #[test]
    fn test_2019_labels_are_nested() {
        let dir  = tempfile::tempdir().unwrap();
        let base = dir.path().join("rumoureval-2019-training-data");
        write(base.join("train-key.json"), r#"{"subtaskaenglish": {"1": "deny"}, "subtaskbenglish": {}}"#);
        write(base.join("dev-key.json"), r#"{"subtaskaenglish": {"2": "comment"}}"#);

        let n      = normalizer();
        let labels = RumourEvalLoader::new(dir.path(), RumourEdition::Y2019, &n).load_labels().unwrap();
        assert_eq!(labels.len(), 2);
        assert_eq!(labels["2"], "comment");
    }

    #[test]
    fn test_missing_headlines_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let n   = normalizer();
        assert!(RumourEvalLoader::new(dir.path(), RumourEdition::Y2017, &n).load().is_err());
    }
}
