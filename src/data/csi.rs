// ============================================================
// Layer 4 — CSI Twitter Event Conversion
// ============================================================
// The CSI rumour corpus lists one event per line of Twitter.txt:
//
//   eid:<event id> \t label:<0|1> \t <tweet id> <tweet id> ...
//
// label:1 events are fake, label:0 events are real. Each event is
// rewritten into the FakeNewsNet news table layout so the same
// annotation tooling can fill in the article url and title:
//
//   id, news_url, title, tweet_ids       (tweet ids tab-separated)
//
// The url and title columns hold placeholders for the annotator.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::domain::error::SkipReason;
use crate::infra::csv_io::{read_raw_rows, write_table, COMMA, TAB};

pub const CSI_HEADER: [&str; 4] = ["id", "news_url", "title", "tweet_ids"];

const URL_PLACEHOLDER:   &str = "PLEASE_ENTER_URL";
const TITLE_PLACEHOLDER: &str = "PLEASE_ENTER_TITLE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsiSummary {
    pub fake_path: PathBuf,
    pub real_path: PathBuf,
    pub fake:      usize,
    pub real:      usize,
    pub skipped:   usize,
}

/// Which output table an event goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Veracity {
    Fake,
    Real,
}

fn parse_label(raw: &str) -> Result<Veracity, SkipReason> {
    match raw {
        "label:1" => Ok(Veracity::Fake),
        "label:0" => Ok(Veracity::Real),
        other => Err(SkipReason::UnsupportedLabel(other.to_string())),
    }
}

/// Split `input` into `twitter_fake.csv` and `twitter_real.csv` under
/// `output_dir`, keeping at most `tweet_limit` tweet ids per event.
pub fn convert_csi(input: &Path, output_dir: &Path, tweet_limit: Option<usize>) -> Result<CsiSummary> {
    let rows = read_raw_rows(input, TAB, false)
        .with_context(|| format!("Cannot read CSI events '{}'", input.display()))?;

    let mut fake    = Vec::new();
    let mut real    = Vec::new();
    let mut skipped = 0usize;
    for (i, row) in rows.iter().enumerate() {
        if row.len() < 3 {
            let reason = SkipReason::MalformedRow { line: i + 1, fields: row.len(), expected: 3 };
            tracing::warn!("csi: skipping: {}", reason);
            skipped += 1;
            continue;
        }
        let veracity = match parse_label(&row[1]) {
            Ok(v) => v,
            Err(reason) => {
                tracing::warn!("csi: skipping event {}: {}", &row[0], reason);
                skipped += 1;
                continue;
            }
        };

        let ids   = row[2].split(' ').take(tweet_limit.unwrap_or(usize::MAX));
        let event = [
            row[0].trim_start_matches("eid:").to_string(),
            URL_PLACEHOLDER.to_string(),
            TITLE_PLACEHOLDER.to_string(),
            ids.collect::<Vec<_>>().join("\t"),
        ];
        match veracity {
            Veracity::Fake => fake.push(event),
            Veracity::Real => real.push(event),
        }
    }

    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Cannot create '{}'", output_dir.display()))?;
    let fake_path = output_dir.join("twitter_fake.csv");
    let real_path = output_dir.join("twitter_real.csv");
    let fake = write_table(&fake_path, Some(&CSI_HEADER[..]), fake, COMMA)
        .with_context(|| format!("Cannot write '{}'", fake_path.display()))?;
    let real = write_table(&real_path, Some(&CSI_HEADER[..]), real, COMMA)
        .with_context(|| format!("Cannot write '{}'", real_path.display()))?;
    tracing::info!("csi: {} fake and {} real events, skipped {}", fake, real, skipped);

    Ok(CsiSummary { fake_path, real_path, fake, real, skipped })
}
