// ============================================================
// Layer 6 — Prediction Evaluator
// ============================================================
// Scores a column of predicted labels against the gold column.
//
// Metrics:
//   - accuracy:   correct / total
//   - per label:  precision, recall, f1
//   - macro:      unweighted mean of the per-label scores
//   - micro:      pooled counts over all labels
//
// The label set is the union of predicted and gold labels,
// sorted. Any ratio with a zero denominator is 0.
//
// Output file: evaluation.csv
//   label,accuracy,precision,recall,f1
//   comment,,0.500000,1.000000,0.666667
//   ...
//   macro,0.750000,...
//   micro,,...

use std::{
    collections::{BTreeMap, BTreeSet},
    path::Path,
};

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};

use crate::infra::csv_io::{write_table, COMMA};

pub const EVALUATION_HEADER: [&str; 5] = ["label", "accuracy", "precision", "recall", "f1"];

/// Precision, recall and f1 for one label (or one average).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Scores {
    pub precision: f64,
    pub recall:    f64,
    pub f1:        f64,
}

impl Scores {
    fn from_counts(tp: usize, fp: usize, fn_: usize) -> Self {
        let precision = ratio(tp, tp + fp);
        let recall    = ratio(tp, tp + fn_);
        let f1 = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };
        Self { precision, recall, f1 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub total:     usize,
    pub accuracy:  f64,
    pub per_label: BTreeMap<String, Scores>,
    pub macro_avg: Scores,
    pub micro_avg: Scores,
}

/// Score `predictions` against `truths`, row by row.
pub fn evaluate<P, T>(predictions: &[P], truths: &[T]) -> Result<EvaluationReport>
where
    P: AsRef<str>,
    T: AsRef<str>,
{
    ensure!(
        predictions.len() == truths.len(),
        "{} predictions but {} gold labels",
        predictions.len(),
        truths.len()
    );

    let labels: BTreeSet<&str> = predictions
        .iter()
        .map(|p| p.as_ref())
        .chain(truths.iter().map(|t| t.as_ref()))
        .collect();

    // (tp, fp, fn) per label
    let mut counts: BTreeMap<&str, (usize, usize, usize)> =
        labels.iter().map(|l| (*l, (0, 0, 0))).collect();
    let mut correct = 0usize;

    for (p, t) in predictions.iter().zip(truths) {
        let (p, t) = (p.as_ref(), t.as_ref());
        if p == t {
            correct += 1;
            if let Some(c) = counts.get_mut(p) { c.0 += 1; }
        } else {
            if let Some(c) = counts.get_mut(p) { c.1 += 1; }
            if let Some(c) = counts.get_mut(t) { c.2 += 1; }
        }
    }

    let per_label: BTreeMap<String, Scores> = counts
        .iter()
        .map(|(label, &(tp, fp, fn_))| (label.to_string(), Scores::from_counts(tp, fp, fn_)))
        .collect();

    let n_labels  = per_label.len().max(1) as f64;
    let macro_avg = Scores {
        precision: per_label.values().map(|s| s.precision).sum::<f64>() / n_labels,
        recall:    per_label.values().map(|s| s.recall).sum::<f64>() / n_labels,
        f1:        per_label.values().map(|s| s.f1).sum::<f64>() / n_labels,
    };

    let (tp, fp, fn_) = counts
        .values()
        .fold((0, 0, 0), |acc, c| (acc.0 + c.0, acc.1 + c.1, acc.2 + c.2));

    Ok(EvaluationReport {
        total:     truths.len(),
        accuracy:  ratio(correct, truths.len()),
        per_label,
        macro_avg,
        micro_avg: Scores::from_counts(tp, fp, fn_),
    })
}

impl EvaluationReport {
    /// Rows in evaluation.csv order: labels, then macro, then micro.
    pub fn rows(&self) -> Vec<[String; 5]> {
        let mut rows: Vec<[String; 5]> = self
            .per_label
            .iter()
            .map(|(label, s)| score_row(label, None, s))
            .collect();
        rows.push(score_row("macro", Some(self.accuracy), &self.macro_avg));
        rows.push(score_row("micro", None, &self.micro_avg));
        rows
    }

    pub fn write_csv(&self, path: &Path) -> Result<()> {
        write_table(path, Some(&EVALUATION_HEADER[..]), self.rows(), COMMA)
            .with_context(|| format!("Cannot write evaluation to '{}'", path.display()))?;
        tracing::debug!("Wrote evaluation to '{}'", path.display());
        Ok(())
    }

    /// One console line per label plus the two averages.
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = vec![format!(
            "{} predictions | accuracy={:.4}",
            self.total, self.accuracy
        )];
        let averages = [("macro", &self.macro_avg), ("micro", &self.micro_avg)];
        for (label, s) in self.per_label.iter().map(|(l, s)| (l.as_str(), s)).chain(averages) {
            lines.push(format!(
                "{:<16} | precision={:.4} | recall={:.4} | f1={:.4}",
                label, s.precision, s.recall, s.f1,
            ));
        }
        lines
    }
}

fn score_row(label: &str, accuracy: Option<f64>, s: &Scores) -> [String; 5] {
    [
        label.to_string(),
        accuracy.map(|a| format!("{a:.6}")).unwrap_or_default(),
        format!("{:.6}", s.precision),
        format!("{:.6}", s.recall),
        format!("{:.6}", s.f1),
    ]
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 { 0.0 } else { num as f64 / den as f64 }
}
