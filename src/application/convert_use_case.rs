// ============================================================
// Layer 2 — Conversion Use Cases
// ============================================================
// Small file-to-file jobs that do not need a Dataset:
//
//   holdout     annotated TSV → {name}_all.train + {name}.test
//   combine     stance.tsv + relation.tsv → stance_relation.tsv
//   paraphrase  raw Twitter paraphrase TSV → index, sent1, sent2, label
//   csi         CSI Twitter.txt → twitter_fake.csv + twitter_real.csv
//   mrpc        MRPC release → mrpc.train / mrpc.val / mrpc.test
//
// All inputs are tab-delimited with a header row, except the
// paraphrase corpus and Twitter.txt which have none.

use std::path::{Path, PathBuf};

use anyhow::{ensure, Context, Result};

use crate::data::{
    csi::{convert_csi, CsiSummary},
    mrpc::{build_mrpc, MrpcSummary},
    paraphrase::{convert_tweet_paraphrase, ConversionSummary},
    splitter::{split_holdout, HOLDOUT_SEED},
};
use crate::infra::csv_io::{read_rows, write_table, TAB};

/// Fraction of rows held out by `holdout`.
pub const HOLDOUT_FRACTION: f64 = 0.05;

/// Header of the combined prediction file.
pub const COMBINED_HEADER: [&str; 2] = ["index", "stance"];

// ─── Holdout ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoldoutOutput {
    pub train_path: PathBuf,
    pub test_path:  PathBuf,
    pub train_rows: usize,
    pub test_rows:  usize,
}

/// Keep rows with a non-blank source and target, then hold out a
/// seeded 5% test set. Output files carry no header.
pub fn holdout(input: &Path, output_dir: &Path, name: &str) -> Result<HoldoutOutput> {
    let rows = read_rows(input, TAB, true)
        .with_context(|| format!("Cannot read '{}'", input.display()))?;

    let kept: Vec<[String; 4]> = rows
        .iter()
        .filter(|r| r.len() >= 4 && !r[1].trim().is_empty() && !r[2].trim().is_empty())
        .map(|r| {
            [
                r[0].to_string(),
                r[1].to_string(),
                r[2].to_string(),
                r[3].trim_end().to_string(),
            ]
        })
        .collect();
    tracing::info!("holdout: {} of {} rows usable", kept.len(), rows.len());

    let (train, test) = split_holdout(kept, HOLDOUT_FRACTION, HOLDOUT_SEED);

    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Cannot create '{}'", output_dir.display()))?;
    let train_path = output_dir.join(format!("{name}_all.train"));
    let test_path  = output_dir.join(format!("{name}.test"));

    let train_rows = write_table(&train_path, None, train, TAB)
        .with_context(|| format!("Cannot write '{}'", train_path.display()))?;
    let test_rows = write_table(&test_path, None, test, TAB)
        .with_context(|| format!("Cannot write '{}'", test_path.display()))?;

    Ok(HoldoutOutput { train_path, test_path, train_rows, test_rows })
}

// ─── Combine stance / relation predictions ───────────────────────────────────

/// Merge row-aligned `stance.tsv` and `relation.tsv` under `root`.
/// A relation of "unrelated" overrides the predicted stance.
pub fn combine_stance_relation(root: &Path) -> Result<PathBuf> {
    let stance_path   = root.join("stance.tsv");
    let relation_path = root.join("relation.tsv");
    let stances = read_rows(&stance_path, TAB, true)
        .with_context(|| format!("Cannot read '{}'", stance_path.display()))?;
    let relations = read_rows(&relation_path, TAB, true)
        .with_context(|| format!("Cannot read '{}'", relation_path.display()))?;

    ensure!(
        stances.len() == relations.len(),
        "{} stance rows but {} relation rows",
        stances.len(),
        relations.len()
    );

    let mut combined = Vec::with_capacity(stances.len());
    for (i, (s, r)) in stances.iter().zip(&relations).enumerate() {
        let stance   = s.get(1).with_context(|| format!("stance row {} has no label", i + 1))?;
        let relation = r.get(1).with_context(|| format!("relation row {} has no label", i + 1))?;
        let merged   = if relation == "unrelated" { "unrelated" } else { stance };
        combined.push([i.to_string(), merged.to_string()]);
    }

    let out = root.join("stance_relation.tsv");
    write_table(&out, Some(&COMBINED_HEADER[..]), combined, TAB)
        .with_context(|| format!("Cannot write '{}'", out.display()))?;
    Ok(out)
}

// ─── Paraphrase ───────────────────────────────────────────────────────────────

pub fn paraphrase(input: &Path, output: &Path) -> Result<ConversionSummary> {
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Cannot create '{}'", parent.display()))?;
    }
    convert_tweet_paraphrase(input, output)
}

// ─── CSI / MRPC ───────────────────────────────────────────────────────────────

pub fn csi(input: &Path, output_dir: &Path, tweet_limit: Option<usize>) -> Result<CsiSummary> {
    ensure!(input.is_file(), "CSI events not found at '{}'", input.display());
    if tweet_limit == Some(0) {
        tracing::warn!("csi: tweet limit of 0 leaves every event without tweets");
    }
    convert_csi(input, output_dir, tweet_limit)
}

pub fn mrpc(root: &Path) -> Result<MrpcSummary> {
    ensure!(root.is_dir(), "MRPC root '{}' is not a directory", root.display());
    build_mrpc(root)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_holdout_filters_and_splits() {
        let dir   = tempfile::tempdir().unwrap();
        let input = dir.path().join("stance.tsv");
        let mut text = String::from("index\tsource\ttarget\tstance\n");
        for i in 0..40 {
            text.push_str(&format!("{i}\tsource {i}\ttarget {i}\tcomment \n"));
        }
        text.push_str("40\t  \ttarget\tdeny\n");
        fs::write(&input, text).unwrap();

        let out = holdout(&input, &dir.path().join("split"), "csi").unwrap();
        assert_eq!(out.test_rows, 2);
        assert_eq!(out.train_rows, 38);
        assert!(out.train_path.ends_with("csi_all.train"));

        let test_text = fs::read_to_string(&out.test_path).unwrap();
        assert!(!test_text.contains("index\tsource"));
        assert!(test_text.lines().all(|l| l.ends_with("comment")));
    }

    #[test]
    fn test_holdout_is_reproducible() {
        let dir   = tempfile::tempdir().unwrap();
        let input = dir.path().join("stance.tsv");
        let mut text = String::from("index\tsource\ttarget\tstance\n");
        for i in 0..30 {
            text.push_str(&format!("{i}\ts{i}\tt{i}\tdeny\n"));
        }
        fs::write(&input, text).unwrap();

        let a = holdout(&input, &dir.path().join("a"), "d").unwrap();
        let b = holdout(&input, &dir.path().join("b"), "d").unwrap();
        assert_eq!(
            fs::read_to_string(a.test_path).unwrap(),
            fs::read_to_string(b.test_path).unwrap()
        );
    }

    #[test]
    fn test_relation_overrides_stance() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("stance.tsv"), "index\tprediction\n0\tsupport\n1\tdeny\n").unwrap();
        fs::write(dir.path().join("relation.tsv"), "index\tprediction\n0\tunrelated\n1\trelated\n").unwrap();

        let out  = combine_stance_relation(dir.path()).unwrap();
        let text = fs::read_to_string(out).unwrap();
        assert_eq!(text, "index\tstance\r\n0\tunrelated\r\n1\tdeny\r\n");
    }

    #[test]
    fn test_csi_requires_input_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = csi(&dir.path().join("Twitter.txt"), dir.path(), None).unwrap_err();
        assert!(err.to_string().contains("CSI events not found"));
        assert!(mrpc(&dir.path().join("missing")).is_err());
    }

    #[test]
    fn test_combine_rejects_misaligned_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("stance.tsv"), "h\th\n0\tsupport\n1\tdeny\n").unwrap();
        fs::write(dir.path().join("relation.tsv"), "h\th\n0\trelated\n").unwrap();
        assert!(combine_stance_relation(dir.path()).is_err());
    }
}
