// ============================================================
// Layer 4 — FNC-1 Loader
// ============================================================
// Reads the Fake News Challenge training corpus:
//
//   train_bodies.csv   Body ID, articleBody
//   train_stances.csv  Headline, Body ID, Stance
//
// Each stance row becomes (article body, headline, label).
// Raw FNC stances are mapped onto the dataset vocabulary:
//
//   raw        Stance kind   Relation kind
//   agree      support       related
//   disagree   deny          related
//   discuss    comment       related
//   unrelated  unrelated     unrelated
//
// Two layouts:
//   Full        one record per stance row, body newlines → spaces
//   Paragraphs  one record per non-blank body paragraph

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

use crate::data::collector::RecordCollector;
use crate::domain::{
    dataset::Dataset, error::SkipReason, kind::DatasetKind, record::Record,
    traits::DatasetSource,
};
use crate::infra::csv_io::{read_rows, COMMA};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FncLayout {
    Full,
    Paragraphs,
}

pub struct FncLoader {
    root:       PathBuf,
    kind:       DatasetKind,
    layout:     FncLayout,
    info_every: usize,
}

impl FncLoader {
    pub fn new(root: impl Into<PathBuf>, kind: DatasetKind, layout: FncLayout) -> Self {
        Self {
            root: root.into(),
            kind,
            layout,
            info_every: 1000,
        }
    }

    pub fn with_info_every(mut self, info_every: usize) -> Self {
        self.info_every = info_every.max(1);
        self
    }

    fn bodies_path(&self) -> PathBuf { self.root.join("train_bodies.csv") }

    fn stances_path(&self) -> PathBuf { self.root.join("train_stances.csv") }

    /// Body ID → article body.
    fn load_bodies(&self) -> Result<HashMap<String, String>> {
        let path = self.bodies_path();
        let rows = read_rows(&path, COMMA, true)
            .with_context(|| format!("Cannot read FNC bodies '{}'", path.display()))?;

        let mut bodies = HashMap::with_capacity(rows.len());
        for (i, row) in rows.iter().enumerate() {
            if i % self.info_every == 0 {
                tracing::info!("Loaded {} rows of FNC bodies", i);
            }
            if let (Some(id), Some(body)) = (row.get(0), row.get(1)) {
                bodies.insert(id.to_string(), body.to_string());
            }
        }
        Ok(bodies)
    }

    fn candidate(
        &self,
        line:   usize,
        row:    &csv::StringRecord,
        bodies: &HashMap<String, String>,
    ) -> Result<(String, String, &'static str), SkipReason> {
        if row.len() < 3 {
            return Err(SkipReason::MalformedRow { line, fields: row.len(), expected: 3 });
        }
        let (headline, body_id, raw_stance) = (&row[0], &row[1], &row[2]);
        let label = convert_stance(self.kind, raw_stance)?;
        let body  = bodies
            .get(body_id)
            .ok_or_else(|| SkipReason::missing("body", body_id))?;
        Ok((body.clone(), headline.to_string(), label))
    }
}

impl DatasetSource for FncLoader {
    fn load(&self) -> Result<Dataset> {
        let bodies = self.load_bodies()?;
        let path   = self.stances_path();
        let rows   = read_rows(&path, COMMA, true)
            .with_context(|| format!("Cannot read FNC stances '{}'", path.display()))?;

        let mut collector = RecordCollector::new("fnc");
        for (i, row) in rows.iter().enumerate() {
            if i % self.info_every == 0 {
                tracing::info!("Loaded {} rows of FNC stances", i);
            }
            collector.push(
                self.candidate(i + 1, row, &bodies)
                    .map(|(body, headline, label)| Record::new(body, headline, label)),
            );
        }

        let dataset = collector.finish(self.kind)?;
        Ok(match self.layout {
            FncLayout::Full       => dataset.map_sources(|body| body.replace('\n', " ")),
            FncLayout::Paragraphs => dataset.split_sources(split_paragraphs),
        })
    }
}

/// Map a raw FNC stance onto the vocabulary of `kind`.
pub fn convert_stance(kind: DatasetKind, raw: &str) -> Result<&'static str, SkipReason> {
    let label = match (kind, raw) {
        (DatasetKind::Stance, "agree")                          => "support",
        (DatasetKind::Stance, "disagree")                       => "deny",
        (DatasetKind::Stance, "discuss")                        => "comment",
        (DatasetKind::Relation, "agree" | "disagree" | "discuss") => "related",
        (_, "unrelated")                                        => "unrelated",
        _ => return Err(SkipReason::UnsupportedLabel(raw.to_string())),
    };
    Ok(label)
}

/// Non-blank lines of a body, untrimmed.
pub fn split_paragraphs(body: &str) -> Vec<String> {
    body.lines()
        .filter(|p| !p.trim().is_empty())
        .map(str::to_string)
        .collect()
}

/// Convenience used by the application layer.
pub fn fnc_root_exists(root: &Path) -> bool {
    root.join("train_bodies.csv").is_file() && root.join("train_stances.csv").is_file()
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn corpus() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("train_bodies.csv"),
            "Body ID,articleBody\n1,\"First para.\n\nSecond para.\"\n2,Short body\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("train_stances.csv"),
            "Headline,Body ID,Stance\n\
             Big claim,1,agree\n\
             Other claim,2,discuss\n\
             Lost body,99,agree\n\
             Odd stance,2,maybe\n\
             No relation,2,unrelated\n",
        )
        .unwrap();
        dir
    }

    #[test]
    fn test_convert_stance_tables() {
        assert_eq!(convert_stance(DatasetKind::Stance, "disagree"), Ok("deny"));
        assert_eq!(convert_stance(DatasetKind::Relation, "disagree"), Ok("related"));
        assert_eq!(convert_stance(DatasetKind::Relation, "unrelated"), Ok("unrelated"));
        assert!(convert_stance(DatasetKind::Stance, "related").is_err());
    }

    #[test]
    fn test_full_layout() {
        let dir = corpus();
        let ds  = FncLoader::new(dir.path(), DatasetKind::Stance, FncLayout::Full)
            .load()
            .unwrap();

        assert_eq!(ds.len(), 3);
        assert_eq!(ds.labels(), vec!["support", "comment", "unrelated"]);
        assert_eq!(ds.records()[0].source, "First para.  Second para.");
        assert_eq!(ds.records()[0].target, "Big claim");
        assert!(!ds.has_indices());
    }

    #[test]
    fn test_paragraph_layout_relation() {
        let dir = corpus();
        assert!(fnc_root_exists(dir.path()));
        let ds = FncLoader::new(dir.path(), DatasetKind::Relation, FncLayout::Paragraphs)
            .load()
            .unwrap();

        let sources: Vec<&str> = ds.iter().map(|r| r.source.as_str()).collect();
        assert_eq!(sources, vec!["First para.", "Second para.", "Short body", "Short body"]);
        assert_eq!(ds.labels(), vec!["related", "related", "related", "unrelated"]);
    }

    #[test]
    fn test_missing_files_are_fatal() {
        let dir = tempfile::tempdir().unwrap();
        assert!(FncLoader::new(dir.path(), DatasetKind::Stance, FncLayout::Full)
            .load()
            .is_err());
    }
}
