// ============================================================
// Layer 4 — MRPC Conversion
// ============================================================
// Microsoft Research Paraphrase Corpus, as distributed:
//
//   msr_paraphrase_train.txt   Quality \t #1 ID \t #2 ID \t #1 String \t #2 String
//   msr_paraphrase_test.txt    same layout
//   mrpc_dev_ids.tsv           #1 ID \t #2 ID   (train pairs held out for validation)
//
// Output files sit next to the inputs, one pair per line, no header:
//
//   mrpc.train / mrpc.val / mrpc.test    id1-id2 \t s1 \t s2 \t label
//
// The sentences contain bare quote characters, so both sides use
// the raw (unquoted) table functions.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{ensure, Context, Result};
use csv::StringRecord;

use crate::domain::error::SkipReason;
use crate::infra::csv_io::{read_raw_rows, write_raw_table, TAB};

pub const MRPC_TRAIN_FILE: &str = "msr_paraphrase_train.txt";
pub const MRPC_TEST_FILE:  &str = "msr_paraphrase_test.txt";
pub const MRPC_DEV_IDS:    &str = "mrpc_dev_ids.tsv";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MrpcSummary {
    pub train:   usize,
    pub dev:     usize,
    pub test:    usize,
    pub skipped: usize,
}

type Pair = [String; 4];

fn read_dev_ids(path: &Path) -> Result<HashSet<(String, String)>> {
    let rows = read_raw_rows(path, TAB, false)
        .with_context(|| format!("Cannot read MRPC dev ids '{}'", path.display()))?;
    Ok(rows
        .iter()
        .filter(|r| r.len() >= 2)
        .map(|r| (r[0].trim().to_string(), r[1].trim().to_string()))
        .collect())
}

/// `label, id1, id2, s1, s2` → `id1-id2, s1, s2, label`
fn to_pair(row: &StringRecord, line: usize) -> Result<Pair, SkipReason> {
    if row.len() != 5 {
        return Err(SkipReason::MalformedRow { line, fields: row.len(), expected: 5 });
    }
    let f = |i: usize| row[i].trim().to_string();
    Ok([format!("{}-{}", f(1), f(2)), f(3), f(4), f(0)])
}

/// Read one corpus file, skipping its header and any malformed line.
fn read_pairs(path: &Path, skipped: &mut usize) -> Result<Vec<Pair>> {
    let rows = read_raw_rows(path, TAB, true)
        .with_context(|| format!("Cannot read '{}'", path.display()))?;

    let mut pairs = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        match to_pair(row, i + 2) {
            Ok(pair) => pairs.push(pair),
            Err(reason) => {
                tracing::warn!("mrpc: skipping '{}': {}", path.display(), reason);
                *skipped += 1;
            }
        }
    }
    Ok(pairs)
}

fn write_pairs(path: PathBuf, pairs: Vec<Pair>) -> Result<usize> {
    write_raw_table(&path, pairs, TAB).with_context(|| format!("Cannot write '{}'", path.display()))
}

/// Build `mrpc.train`, `mrpc.val` and `mrpc.test` under `root`.
pub fn build_mrpc(root: &Path) -> Result<MrpcSummary> {
    let train_file = root.join(MRPC_TRAIN_FILE);
    let test_file  = root.join(MRPC_TEST_FILE);
    ensure!(train_file.is_file(), "Train data not found at '{}'", train_file.display());
    ensure!(test_file.is_file(), "Test data not found at '{}'", test_file.display());

    let dev_ids     = read_dev_ids(&root.join(MRPC_DEV_IDS))?;
    let mut skipped = 0usize;

    let (dev, train): (Vec<Pair>, Vec<Pair>) = read_pairs(&train_file, &mut skipped)?
        .into_iter()
        .partition(|pair| {
            let (id1, id2) = pair[0].split_once('-').unwrap_or((&pair[0], ""));
            dev_ids.contains(&(id1.to_string(), id2.to_string()))
        });
    let test = read_pairs(&test_file, &mut skipped)?;

    let summary = MrpcSummary {
        train: write_pairs(root.join("mrpc.train"), train)?,
        dev:   write_pairs(root.join("mrpc.val"), dev)?,
        test:  write_pairs(root.join("mrpc.test"), test)?,
        skipped,
    };
    tracing::info!(
        "mrpc: {} train, {} val, {} test pairs, skipped {}",
        summary.train,
        summary.dev,
        summary.test,
        summary.skipped,
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const HEADER: &str = "Quality\t#1 ID\t#2 ID\t#1 String\t#2 String\n";

    fn corpus() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(MRPC_TRAIN_FILE),
            format!(
                "{HEADER}\
                 1\t702876\t702977\t\"Yes,\" he said.\tHe said yes.\n\
                 0\t2108705\t2108831\tA cat sat.\tA dog ran.\n\
                 1\t1\t2\ttoo few\n"
            ),
        )
        .unwrap();
        fs::write(
            dir.path().join(MRPC_TEST_FILE),
            format!("{HEADER}1\t1089874\t1089925\tPCCW 's chief.\tThe chief of PCCW.\n"),
        )
        .unwrap();
        fs::write(dir.path().join(MRPC_DEV_IDS), "2108705\t2108831\n").unwrap();
        dir
    }

    #[test]
    fn test_dev_ids_go_to_validation() {
        let dir = corpus();
        let out = build_mrpc(dir.path()).unwrap();
        assert_eq!(out, MrpcSummary { train: 1, dev: 1, test: 1, skipped: 1 });

        assert_eq!(
            fs::read_to_string(dir.path().join("mrpc.train")).unwrap(),
            "702876-702977\t\"Yes,\" he said.\tHe said yes.\t1\n"
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("mrpc.val")).unwrap(),
            "2108705-2108831\tA cat sat.\tA dog ran.\t0\n"
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("mrpc.test")).unwrap(),
            "1089874-1089925\tPCCW 's chief.\tThe chief of PCCW.\t1\n"
        );
    }

    #[test]
    fn test_missing_test_file_is_fatal() {
        let dir = corpus();
        fs::remove_file(dir.path().join(MRPC_TEST_FILE)).unwrap();
        let err = build_mrpc(dir.path()).unwrap_err();
        assert!(err.to_string().contains("Test data not found"));
    }
}
