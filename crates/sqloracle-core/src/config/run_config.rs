//! Run parameters: which oracles, which dialect, how much parallelism.

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::types::{Language, PgVersion};

pub const DEFAULT_ORACLE: &str = "sqlparser";
pub const DEFAULT_LANGUAGE: &str = "pgsql";
pub const DEFAULT_VERSION: &str = "14";
pub const DEFAULT_BATCH_SIZE: usize = 1000;
/// SQLite binds at most 32766 parameters per statement and each prediction
/// row binds six of them.
pub const MAX_BATCH_SIZE: usize = 32766 / 6;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RunConfig {
    /// Oracle catalog names to run, in order. Default: `["sqlparser"]`.
    pub oracles: Vec<String>,
    /// Dialect tag of the statements to predict. Default: `pgsql`.
    pub language: Option<String>,
    /// Postgres major versions to run each oracle against. Default: `["14"]`.
    pub versions: Vec<String>,
    /// Explicit worker-count override. `None` or 0 means derive from the host.
    pub parallelism: Option<usize>,
    /// Predictions per multi-row insert. Default: 1000, at most `MAX_BATCH_SIZE`.
    pub batch_size: Option<usize>,
    /// Render progress. `None` means "only when stdout is a terminal".
    pub progress: Option<bool>,
    /// Print what would run without running it.
    pub dry_run: Option<bool>,
}

impl RunConfig {
    pub fn effective_oracles(&self) -> Vec<String> {
        if self.oracles.is_empty() {
            vec![DEFAULT_ORACLE.to_string()]
        } else {
            self.oracles.clone()
        }
    }

    pub fn effective_language(&self) -> Result<Language, ConfigError> {
        self.language.as_deref().unwrap_or(DEFAULT_LANGUAGE).parse()
    }

    pub fn effective_versions(&self) -> Result<Vec<PgVersion>, ConfigError> {
        if self.versions.is_empty() {
            return Ok(vec![DEFAULT_VERSION.parse()?]);
        }
        self.versions.iter().map(|v| v.parse()).collect()
    }

    /// The override, with 0 treated as "not given".
    pub fn effective_parallelism(&self) -> Option<usize> {
        self.parallelism.filter(|n| *n > 0)
    }

    pub fn effective_batch_size(&self) -> usize {
        self.batch_size.unwrap_or(DEFAULT_BATCH_SIZE)
    }

    pub fn effective_dry_run(&self) -> bool {
        self.dry_run.unwrap_or(false)
    }
}
