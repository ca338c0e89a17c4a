// ============================================================
// Layer 6 — Preparation Config
// ============================================================
// Corpus locations and export settings, read from a JSON file
// (config/config.json by default):
//
//   {
//     "num_folds": 10,
//     "fnc_root": "datasets/fnc",
//     "re17_root": "datasets/rumor_eval_17",
//     "re19_root": "datasets/rumor_eval_19",
//     "fnn_root": "datasets/fnn",
//     "tweet_paraphrase_root": "datasets/tweet_paraphrase",
//     "csi_root": "datasets/csi",
//     "mrpc_root": "datasets/mrpc",
//     "dictionary_path": "config/words_by_frequency.txt",
//     "unigram_path": null,
//     "info_every": 1000
//   }
//
// Every key is optional. A missing file is not an error: the
// defaults below are used and a warning is logged, so commands
// that take explicit paths still work without any config.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::export::DEFAULT_FOLDS;

pub const DEFAULT_CONFIG_PATH: &str = "config/config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrepConfig {
    pub num_folds:             usize,
    pub fnc_root:              String,
    pub re17_root:             String,
    pub re19_root:             String,
    pub fnn_root:              String,
    pub tweet_paraphrase_root: String,
    pub csi_root:              String,
    pub mrpc_root:             String,
    pub dictionary_path:       String,
    pub unigram_path:          Option<String>,
    pub info_every:            usize,
}

impl Default for PrepConfig {
    fn default() -> Self {
        Self {
            num_folds:             DEFAULT_FOLDS,
            fnc_root:              "datasets/fnc".to_string(),
            re17_root:             "datasets/rumor_eval_17".to_string(),
            re19_root:             "datasets/rumor_eval_19".to_string(),
            fnn_root:              "datasets/fnn".to_string(),
            tweet_paraphrase_root: "datasets/tweet_paraphrase".to_string(),
            csi_root:              "datasets/csi".to_string(),
            mrpc_root:             "datasets/mrpc".to_string(),
            dictionary_path:       "config/words_by_frequency.txt".to_string(),
            unigram_path:          None,
            info_every:            1000,
        }
    }
}

/// Read the config at `path`, falling back to defaults if it is absent.
pub fn load_config(path: &Path) -> Result<PrepConfig> {
    if !path.exists() {
        tracing::warn!("No config at '{}', using defaults", path.display());
        return Ok(PrepConfig::default());
    }

    let json = fs::read_to_string(path)
        .with_context(|| format!("Cannot read config from '{}'", path.display()))?;
    let config: PrepConfig = serde_json::from_str(&json)
        .with_context(|| format!("Invalid config in '{}'", path.display()))?;

    tracing::debug!("Loaded config from '{}': {:?}", path.display(), config);
    Ok(config)
}
