// ============================================================
// Layer 4 — Indexed TSV Loader
// ============================================================
// Reads an already-annotated stance table:
//
//   index \t source \t target \t stance      (header row skipped)
//
// The index column is kept on every record so fold exports point
// back at the annotation rows. Labels lose trailing whitespace
// (spreadsheet exports leave "\r" and blanks behind).

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::data::collector::RecordCollector;
use crate::domain::{
    dataset::Dataset, error::SkipReason, kind::DatasetKind, record::Record,
    traits::DatasetSource,
};
use crate::infra::csv_io::{read_rows, TAB};

pub struct IndexedTsvLoader {
    path: PathBuf,
    kind: DatasetKind,
}

impl IndexedTsvLoader {
    pub fn new(path: impl Into<PathBuf>, kind: DatasetKind) -> Self {
        Self { path: path.into(), kind }
    }
}

impl DatasetSource for IndexedTsvLoader {
    fn load(&self) -> Result<Dataset> {
        let rows = read_rows(&self.path, TAB, true)
            .with_context(|| format!("Cannot read '{}'", self.path.display()))?;

        let mut collector = RecordCollector::new(self.path.display().to_string());
        for (i, row) in rows.iter().enumerate() {
            // +2: one for the header, one for 1-based lines
            collector.push(parse_row(self.kind, i + 2, row));
        }

        Ok(collector.finish(self.kind)?)
    }
}

fn parse_row(kind: DatasetKind, line: usize, row: &csv::StringRecord) -> Result<Record, SkipReason> {
    if row.len() < 4 {
        return Err(SkipReason::MalformedRow { line, fields: row.len(), expected: 4 });
    }
    let label = row[3].trim_end();
    if !kind.accepts(label) {
        return Err(SkipReason::UnsupportedLabel(label.to_string()));
    }
    Ok(Record::new(&row[1], &row[2], label).with_index(&row[0]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_loads_indexed_rows() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("annotated.tsv");
        fs::write(
            &path,
            "idx\tsource\ttarget\tstance\n\
             17\tfirst tweet\tsome headline\tsupport \n\
             18\tsecond tweet\tsome headline\tcomment\n\
             19\tbroken row\n\
             20\tthird tweet\tsome headline\treport\n",
        )
        .unwrap();

        let ds = IndexedTsvLoader::new(&path, DatasetKind::Stance).load().unwrap();
        assert_eq!(ds.len(), 2);
        assert!(ds.has_indices());
        assert_eq!(ds.index_of(1), "18");
        assert_eq!(ds.labels(), vec!["support", "comment"]);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let res = IndexedTsvLoader::new(dir.path().join("nope.tsv"), DatasetKind::Stance).load();
        assert!(res.is_err());
    }
}
