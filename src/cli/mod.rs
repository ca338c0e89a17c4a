// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction. Parses arguments with
// `clap`, loads the JSON config once, turns flags into
// application-layer requests and prints the outcome.
// All real work is delegated to Layer 2 (application).

pub mod commands;

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use clap::Parser;
use commands::{
    CombineArgs, Commands, CrossEvalArgs, CsiArgs, EvaluateArgs, ExportArgs, FncArgs, FnnArgs,
    HoldoutArgs, MrpcArgs, NormalizeArgs, ParaphraseArgs, RumourEvalArgs, StsArgs,
};

use crate::application::export_use_case::{
    Corpus, ExportRequest, ExportSummary, ExportTarget, ExportUseCase,
};
use crate::data::{
    fnc_loader::FncLayout,
    fnn_loader::{export_file_name, NewsLabel},
    rumoureval_loader::RumourEdition,
};
use crate::domain::kind::DatasetKind;
use crate::infra::{
    config::{load_config, PrepConfig, DEFAULT_CONFIG_PATH},
    csv_io::COMMA,
};

#[derive(Parser, Debug)]
#[command(
    name = "stance-prep",
    version,
    about = "Prepare stance-detection and fake-news corpora for classifier training."
)]
pub struct Cli {
    /// JSON file with corpus roots and export settings
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config_path: String,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Load the config, then route to the matching handler.
    pub fn run(self) -> Result<()> {
        let config = load_config(Path::new(&self.config_path))?;

        match self.command {
            Commands::Fnc(args)        => run_fnc(config, args),
            Commands::Rumoureval(args) => run_rumoureval(config, args),
            Commands::Fnn(args)        => run_fnn(config, args),
            Commands::CrossEval(args)  => run_cross_eval(config, args),
            Commands::Sts(args)        => run_sts(config, args),
            Commands::Holdout(args)    => run_holdout(args),
            Commands::Combine(args)    => run_combine(args),
            Commands::Paraphrase(args) => run_paraphrase(&config, args),
            Commands::Csi(args)        => run_csi(&config, args),
            Commands::Mrpc(args)       => run_mrpc(&config, args),
            Commands::Evaluate(args)   => run_evaluate(args),
            Commands::Normalize(args)  => run_normalize(&config, args),
        }
    }
}

// ─── Corpus exports ───────────────────────────────────────────────────────────

fn run_fnc(config: PrepConfig, args: FncArgs) -> Result<()> {
    let corpus = Corpus::Fnc {
        kind:   if args.relation { DatasetKind::Relation } else { DatasetKind::Stance },
        layout: if args.split { FncLayout::Paragraphs } else { FncLayout::Full },
    };
    run_export(config, corpus, &args.export)
}

fn run_rumoureval(config: PrepConfig, args: RumourEvalArgs) -> Result<()> {
    let mut editions = Vec::with_capacity(args.years.len());
    for year in &args.years {
        match RumourEdition::from_year(*year) {
            Some(edition) => editions.push(edition),
            None => bail!("RumourEval {year} is not supported (use 2017 or 2019)"),
        }
    }
    run_export(config, Corpus::RumourEval { editions }, &args.export)
}

/// Write the uncleaned and the cleaned pair file for one label.
fn run_fnn(config: PrepConfig, args: FnnArgs) -> Result<()> {
    let Some(label) = NewsLabel::from_name(&args.label) else {
        bail!("unknown news label '{}' (use fake or real)", args.label);
    };
    let output_dir = args.output_dir.map(PathBuf::from).unwrap_or_else(|| PathBuf::from(&config.fnn_root));

    let use_case = ExportUseCase::new(config);
    for clean in [false, true] {
        let request = ExportRequest {
            corpus:        Corpus::FakeNewsNet { label, clean },
            target:        ExportTarget::Full {
                path:      output_dir.join(export_file_name(label, clean)),
                delimiter: COMMA,
            },
            dedup_targets: false,
        };
        tracing::info!("Starting export: {:?}", request);
        print_summary(&use_case.execute(&request)?);
    }
    Ok(())
}

fn run_cross_eval(config: PrepConfig, args: CrossEvalArgs) -> Result<()> {
    let corpus = Corpus::IndexedTsv { path: PathBuf::from(&args.input) };
    run_export(config, corpus, &args.export)
}

fn run_sts(config: PrepConfig, args: StsArgs) -> Result<()> {
    let request = ExportRequest {
        corpus:        Corpus::IndexedTsv { path: PathBuf::from(&args.input) },
        target:        ExportTarget::Sts { path: PathBuf::from(&args.output) },
        dedup_targets: false,
    };
    let summary = ExportUseCase::new(config).execute(&request)?;
    print_summary(&summary);
    Ok(())
}

/// Convert shared export flags into a request and run it.
fn run_export(mut config: PrepConfig, corpus: Corpus, args: &ExportArgs) -> Result<()> {
    if let Some(folds) = args.num_folds {
        config.num_folds = folds;
    }

    let target = match &args.full {
        Some(path) => ExportTarget::Full { path: PathBuf::from(path), delimiter: COMMA },
        None => ExportTarget::CrossEval {
            output_dir: args
                .output
                .as_ref()
                .map(PathBuf::from)
                .unwrap_or_else(|| corpus.default_output_dir(&config)),
            num_folds: config.num_folds,
        },
    };
    let request = ExportRequest { corpus, target, dedup_targets: args.dedup_targets };

    tracing::info!("Starting export: {:?}", request);
    let summary = ExportUseCase::new(config).execute(&request)?;
    print_summary(&summary);
    Ok(())
}

fn print_summary(summary: &ExportSummary) {
    println!("Exported {} records.", summary.records);
    for fold in &summary.folds {
        println!(
            "  fold {}: {} train / {} dev → {}",
            fold.number,
            fold.train_rows,
            fold.dev_rows,
            fold.dev_path.parent().unwrap_or(fold.dev_path.as_path()).display()
        );
    }
    if summary.folds.is_empty() {
        for file in &summary.files {
            println!("  {}", file.display());
        }
    }
}

// ─── File conversions ─────────────────────────────────────────────────────────

fn run_holdout(args: HoldoutArgs) -> Result<()> {
    use crate::application::convert_use_case::holdout;

    let out = holdout(Path::new(&args.input), Path::new(&args.output_dir), &args.name)?;
    println!("{} train rows → {}", out.train_rows, out.train_path.display());
    println!("{} test rows  → {}", out.test_rows, out.test_path.display());
    Ok(())
}

fn run_combine(args: CombineArgs) -> Result<()> {
    use crate::application::convert_use_case::combine_stance_relation;

    let out = combine_stance_relation(Path::new(&args.root))?;
    println!("Combined predictions written to {}", out.display());
    Ok(())
}

fn run_paraphrase(config: &PrepConfig, args: ParaphraseArgs) -> Result<()> {
    use crate::application::convert_use_case::paraphrase;

    let root   = Path::new(&config.tweet_paraphrase_root);
    let input  = args.input.map(PathBuf::from).unwrap_or_else(|| root.join("train.data"));
    let output = args.output.map(PathBuf::from).unwrap_or_else(|| root.join("train.tsv"));

    let summary = paraphrase(&input, &output)?;
    println!(
        "Wrote {} pairs to {} ({} skipped)",
        summary.written,
        output.display(),
        summary.skipped
    );
    Ok(())
}

fn run_csi(config: &PrepConfig, args: CsiArgs) -> Result<()> {
    use crate::application::convert_use_case::csi;

    let root       = Path::new(&config.csi_root);
    let input      = args.input.map(PathBuf::from).unwrap_or_else(|| root.join("Twitter.txt"));
    let output_dir = args.output_dir.map(PathBuf::from).unwrap_or_else(|| root.to_path_buf());

    let out = csi(&input, &output_dir, args.tweet_limit)?;
    println!("{} fake events → {}", out.fake, out.fake_path.display());
    println!("{} real events → {}", out.real, out.real_path.display());
    if out.skipped > 0 {
        println!("{} events skipped", out.skipped);
    }
    Ok(())
}

fn run_mrpc(config: &PrepConfig, args: MrpcArgs) -> Result<()> {
    use crate::application::convert_use_case::mrpc;

    let root = args.root.map(PathBuf::from).unwrap_or_else(|| PathBuf::from(&config.mrpc_root));
    let out  = mrpc(&root)?;
    println!(
        "MRPC: {} train / {} val / {} test pairs in {} ({} skipped)",
        out.train,
        out.dev,
        out.test,
        root.display(),
        out.skipped
    );
    Ok(())
}

// ─── Evaluation / inspection ──────────────────────────────────────────────────

fn run_evaluate(args: EvaluateArgs) -> Result<()> {
    use crate::application::evaluate_use_case::EvaluateUseCase;

    let report = EvaluateUseCase::new(&args.predictions, &args.truths)
        .execute(Path::new(&args.report))?;
    for line in report.summary_lines() {
        println!("{line}");
    }
    println!("Report written to {}", args.report);
    Ok(())
}

fn run_normalize(config: &PrepConfig, args: NormalizeArgs) -> Result<()> {
    use crate::application::normalize_use_case::NormalizeUseCase;

    let use_case = NormalizeUseCase::from_config(config)?;
    let out      = use_case.run(&args.text, args.target.as_deref());
    println!("text:   {}", out.cleaned);
    if let Some(target) = out.target {
        println!("target: {}", target);
    }
    Ok(())
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_fnc_flags() {
        let cli = Cli::try_parse_from([
            "stance-prep", "fnc", "--relation", "--split", "--num-folds", "5",
        ])
        .unwrap();
        assert_eq!(cli.config_path, DEFAULT_CONFIG_PATH);
        match cli.command {
            Commands::Fnc(args) => {
                assert!(args.relation && args.split);
                assert_eq!(args.export.num_folds, Some(5));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_repeated_years() {
        let cli = Cli::try_parse_from([
            "stance-prep", "rumoureval", "--year", "2017", "--year", "2019",
            "--config-path", "other.json",
        ])
        .unwrap();
        assert_eq!(cli.config_path, "other.json");
        match cli.command {
            Commands::Rumoureval(args) => assert_eq!(args.years, vec![2017, 2019]),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parses_corpus_conversions() {
        let cli = Cli::try_parse_from(["stance-prep", "fnn", "--label", "real"]).unwrap();
        match cli.command {
            Commands::Fnn(args) => {
                assert_eq!(args.label, "real");
                assert_eq!(args.output_dir, None);
            }
            other => panic!("unexpected command {other:?}"),
        }
        assert!(Cli::try_parse_from(["stance-prep", "fnn", "--label", "satire"]).is_err());

        let cli = Cli::try_parse_from(["stance-prep", "csi", "--tweet-limit", "50"]).unwrap();
        match cli.command {
            Commands::Csi(args) => {
                assert_eq!(args.tweet_limit, Some(50));
                assert_eq!(args.input, None);
            }
            other => panic!("unexpected command {other:?}"),
        }

        let cli = Cli::try_parse_from(["stance-prep", "mrpc", "--root", "glue/MRPC"]).unwrap();
        match cli.command {
            Commands::Mrpc(args) => assert_eq!(args.root.as_deref(), Some("glue/MRPC")),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_full_conflicts_with_output() {
        let res = Cli::try_parse_from([
            "stance-prep", "cross-eval", "--input", "a.tsv", "--full", "x.csv", "--output", "dir",
        ]);
        assert!(res.is_err());
    }

    #[test]
    fn test_unsupported_year_is_rejected() {
        let args = RumourEvalArgs {
            years:  vec![2018],
            export: ExportArgs { num_folds: None, output: None, full: None, dedup_targets: false },
        };
        assert!(run_rumoureval(PrepConfig::default(), args).is_err());
    }
}
