// ============================================================
// Layer 2 — EvaluateUseCase
// ============================================================
// Scores a prediction file against a gold split file:
//
//   predictions: index \t label                      (header skipped)
//   truths:      index \t source \t target \t stance (header skipped)
//
// Rows are matched by position, not by index value.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::infra::{
    csv_io::{read_rows, TAB},
    metrics::{evaluate, EvaluationReport},
};

pub struct EvaluateUseCase {
    predictions: PathBuf,
    truths:      PathBuf,
}

impl EvaluateUseCase {
    pub fn new(predictions: impl Into<PathBuf>, truths: impl Into<PathBuf>) -> Self {
        Self {
            predictions: predictions.into(),
            truths:      truths.into(),
        }
    }

    /// Compute the report and write it to `report_path`.
    pub fn execute(&self, report_path: &Path) -> Result<EvaluationReport> {
        let predictions = read_column(&self.predictions, 1)?;
        let truths      = read_column(&self.truths, 3)?;
        tracing::info!(
            "Evaluating {} predictions from '{}'",
            predictions.len(),
            self.predictions.display()
        );

        let report = evaluate(&predictions, &truths)?;
        report.write_csv(report_path)?;
        Ok(report)
    }
}

fn read_column(path: &Path, column: usize) -> Result<Vec<String>> {
    let rows = read_rows(path, TAB, true)
        .with_context(|| format!("Cannot read '{}'", path.display()))?;
    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            row.get(column)
                .map(|v| v.trim_end().to_string())
                .with_context(|| format!("'{}' row {} has no column {}", path.display(), i + 1, column))
        })
        .collect()
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_evaluates_files() {
        let dir    = tempfile::tempdir().unwrap();
        let preds  = dir.path().join("stance.tsv");
        let truths = dir.path().join("test.tsv");
        fs::write(&preds, "index\tprediction\n0\tsupport\n1\tdeny\n").unwrap();
        fs::write(
            &truths,
            "index\tsource\ttarget\tstance\n0\ta\tb\tsupport\n1\tc\td\tcomment\n",
        )
        .unwrap();

        let report_path = dir.path().join("evaluation.csv");
        let report = EvaluateUseCase::new(&preds, &truths).execute(&report_path).unwrap();

        assert!((report.accuracy - 0.5).abs() < 1e-9);
        assert_eq!(report.per_label.len(), 3);
        assert!(report_path.is_file());
    }

    #[test]
    fn test_short_truth_row_is_an_error() {
        let dir    = tempfile::tempdir().unwrap();
        let preds  = dir.path().join("p.tsv");
        let truths = dir.path().join("t.tsv");
        fs::write(&preds, "i\tp\n0\tsupport\n").unwrap();
        fs::write(&truths, "i\ts\n0\ta\n").unwrap();
        let res = EvaluateUseCase::new(&preds, &truths).execute(&dir.path().join("e.csv"));
        assert!(res.is_err());
    }
}
