// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// One subcommand per preparation job. Paths default to the
// corpus roots in the config file when a flag is left out.
//
// clap's derive macros generate --help, missing-argument
// errors and string → number conversion.

use clap::{Args, Subcommand};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export the FNC-1 corpus (stance or relation labels)
    Fnc(FncArgs),

    /// Export RumourEval Twitter data (2017, 2019 or both)
    Rumoureval(RumourEvalArgs),

    /// Export FakeNewsNet pairs, uncleaned and cleaned, for annotation
    Fnn(FnnArgs),

    /// Cross-validation folds from an `index, source, target, stance` TSV
    CrossEval(CrossEvalArgs),

    /// Convert an `index, source, target, stance` TSV to the STS schema
    Sts(StsArgs),

    /// Seeded 95/5 train/test split of an annotated TSV
    Holdout(HoldoutArgs),

    /// Merge stance.tsv and relation.tsv predictions
    Combine(CombineArgs),

    /// Convert the Twitter paraphrase corpus
    Paraphrase(ParaphraseArgs),

    /// Split CSI Twitter.txt into fake / real news tables
    Csi(CsiArgs),

    /// Build MRPC train / val / test files
    Mrpc(MrpcArgs),

    /// Score a prediction file against a gold split
    Evaluate(EvaluateArgs),

    /// Clean one text and print the result
    Normalize(NormalizeArgs),
}

/// Output options shared by the corpus export commands.
#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    /// Number of cross-validation folds (overrides the config)
    #[arg(long)]
    pub num_folds: Option<usize>,

    /// Directory for fold_{n}/ folders
    #[arg(long)]
    pub output: Option<String>,

    /// Write one comma-separated file here instead of folds
    #[arg(long, conflicts_with = "output")]
    pub full: Option<String>,

    /// Remove text the target shares with its source
    #[arg(long)]
    pub dedup_targets: bool,
}

#[derive(Args, Debug)]
pub struct FncArgs {
    /// Use related / unrelated labels
    #[arg(long)]
    pub relation: bool,

    /// One record per body paragraph
    #[arg(long)]
    pub split: bool,

    #[command(flatten)]
    pub export: ExportArgs,
}

#[derive(Args, Debug)]
pub struct RumourEvalArgs {
    /// Edition(s) to load; repeat to concatenate
    #[arg(long = "year", default_value = "2017")]
    pub years: Vec<u16>,

    #[command(flatten)]
    pub export: ExportArgs,
}

#[derive(Args, Debug)]
pub struct FnnArgs {
    /// News label to read: fake or real
    #[arg(long, value_parser = ["fake", "real"])]
    pub label: String,

    /// Directory for csi_{label}_{cleaned,uncleaned}.csv [default: <fnn_root>]
    #[arg(long)]
    pub output_dir: Option<String>,
}

#[derive(Args, Debug)]
pub struct CrossEvalArgs {
    /// Annotated TSV with an index column
    #[arg(long)]
    pub input: String,

    #[command(flatten)]
    pub export: ExportArgs,
}

#[derive(Args, Debug)]
pub struct StsArgs {
    /// Annotated TSV with an index column
    #[arg(long)]
    pub input: String,

    /// Destination TSV
    #[arg(long)]
    pub output: String,
}

#[derive(Args, Debug)]
pub struct HoldoutArgs {
    /// Annotated TSV with a header row
    #[arg(long)]
    pub input: String,

    /// Directory for {name}_all.train and {name}.test
    #[arg(long)]
    pub output_dir: String,

    /// File name stem
    #[arg(long, default_value = "data")]
    pub name: String,
}

#[derive(Args, Debug)]
pub struct CombineArgs {
    /// Directory holding stance.tsv and relation.tsv
    #[arg(long)]
    pub root: String,
}

#[derive(Args, Debug)]
pub struct ParaphraseArgs {
    /// Raw corpus file [default: <tweet_paraphrase_root>/train.data]
    #[arg(long)]
    pub input: Option<String>,

    /// Destination TSV [default: <tweet_paraphrase_root>/train.tsv]
    #[arg(long)]
    pub output: Option<String>,
}

#[derive(Args, Debug)]
pub struct CsiArgs {
    /// Event file [default: <csi_root>/Twitter.txt]
    #[arg(long)]
    pub input: Option<String>,

    /// Directory for twitter_fake.csv and twitter_real.csv [default: <csi_root>]
    #[arg(long)]
    pub output_dir: Option<String>,

    /// Keep at most this many tweet ids per event
    #[arg(long)]
    pub tweet_limit: Option<usize>,
}

#[derive(Args, Debug)]
pub struct MrpcArgs {
    /// Directory with the MRPC release files [default: <mrpc_root>]
    #[arg(long)]
    pub root: Option<String>,
}

#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// Prediction TSV (index, label)
    #[arg(long)]
    pub predictions: String,

    /// Gold TSV (index, source, target, stance)
    #[arg(long)]
    pub truths: String,

    /// Where to write the CSV report
    #[arg(long, default_value = "evaluation.csv")]
    pub report: String,
}

#[derive(Args, Debug)]
pub struct NormalizeArgs {
    /// Text to clean
    #[arg(long)]
    pub text: String,

    /// Optional stance target to de-duplicate against the cleaned text
    #[arg(long)]
    pub target: Option<String>,
}
