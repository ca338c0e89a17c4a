// ============================================================
// Layer 4 — Tweet Paraphrase Conversion
// ============================================================
// The Twitter paraphrase corpus ships one pair per TSV line with
// the annotator votes as a "(yes, no)" tuple in column 5:
//
//   topic_id \t topic \t sent1 \t sent2 \t (yes, no) ...
//
// Votes are mapped to a three-way label:
//   (3, 2) (4, 1) (5, 0)  → paraphrases
//   (1, 4) (0, 5)         → non_paraphrases
//   (2, 3)                → debatable
// Any other value (including a header row) is skipped.

use std::path::Path;

use anyhow::{Context, Result};

use crate::domain::error::SkipReason;
use crate::infra::csv_io::{read_rows, write_table, TAB};

pub const PARAPHRASE_HEADER: [&str; 4] = ["index", "sent1", "sent2", "label"];

/// Rows written and rows skipped by one conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionSummary {
    pub written: usize,
    pub skipped: usize,
}

pub fn paraphrase_label(votes: &str) -> Result<&'static str, SkipReason> {
    match votes {
        "(3, 2)" | "(4, 1)" | "(5, 0)" => Ok("paraphrases"),
        "(1, 4)" | "(0, 5)"            => Ok("non_paraphrases"),
        "(2, 3)"                       => Ok("debatable"),
        other => Err(SkipReason::UnsupportedLabel(other.to_string())),
    }
}

/// Convert a raw paraphrase TSV into `index, sent1, sent2, label`.
/// The index is the 0-based line of the pair in the input.
pub fn convert_tweet_paraphrase(input: &Path, output: &Path) -> Result<ConversionSummary> {
    let rows = read_rows(input, TAB, false)
        .with_context(|| format!("Cannot read paraphrase corpus '{}'", input.display()))?;

    let mut converted = Vec::with_capacity(rows.len());
    let mut skipped   = 0usize;
    for (i, row) in rows.iter().enumerate() {
        if row.len() < 5 {
            tracing::warn!("paraphrase: skipping line {}: {} fields, expected 5", i, row.len());
            skipped += 1;
            continue;
        }
        match paraphrase_label(&row[4]) {
            Ok(label) => converted.push([
                i.to_string(),
                row[2].to_string(),
                row[3].to_string(),
                label.to_string(),
            ]),
            Err(reason) => {
                tracing::warn!("paraphrase: skipping line {}: {}", i, reason);
                skipped += 1;
            }
        }
    }

    let written = write_table(output, Some(&PARAPHRASE_HEADER[..]), converted, TAB)
        .with_context(|| format!("Cannot write '{}'", output.display()))?;
    tracing::info!("paraphrase: wrote {} pairs, skipped {}", written, skipped);

    Ok(ConversionSummary { written, skipped })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_vote_mapping() {
        assert_eq!(paraphrase_label("(4, 1)"), Ok("paraphrases"));
        assert_eq!(paraphrase_label("(0, 5)"), Ok("non_paraphrases"));
        assert_eq!(paraphrase_label("(2, 3)"), Ok("debatable"));
        assert!(paraphrase_label("(3, 3)").is_err());
    }

    #[test]
    fn test_convert_file() {
        let dir    = tempfile::tempdir().unwrap();
        let input  = dir.path().join("train.data");
        let output = dir.path().join("train.tsv");
        fs::write(
            &input,
            "4\tTopic\tfirst a\tfirst b\t(5, 0)\n\
             4\tTopic\tsecond a\tsecond b\t(3, 3)\n\
             9\tOther\tthird a\tthird b\t(1, 4)\n",
        )
        .unwrap();

        let summary = convert_tweet_paraphrase(&input, &output).unwrap();
        assert_eq!(summary, ConversionSummary { written: 2, skipped: 1 });

        let text = fs::read_to_string(&output).unwrap();
        assert_eq!(
            text,
            "index\tsent1\tsent2\tlabel\r\n\
             0\tfirst a\tfirst b\tparaphrases\r\n\
             2\tthird a\tthird b\tnon_paraphrases\r\n"
        );
    }
}
