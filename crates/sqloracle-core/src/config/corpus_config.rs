//! Corpus location.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub const DEFAULT_CORPUS_PATH: &str = "./corpus.db";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CorpusConfig {
    /// Path to the SQLite corpus database. Default: `./corpus.db`.
    pub path: Option<PathBuf>,
}

impl CorpusConfig {
    pub fn effective_path(&self) -> PathBuf {
        self.path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CORPUS_PATH))
    }
}
