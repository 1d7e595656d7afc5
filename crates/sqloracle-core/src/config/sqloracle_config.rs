//! Top-level sqloracle configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{CorpusConfig, PsqlConfig, RunConfig, ServiceConfig, MAX_BATCH_SIZE};
use crate::errors::ConfigError;

/// File name looked up in the working directory when no explicit config
/// file is given.
pub const PROJECT_CONFIG_FILE: &str = "sqloracle.toml";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`SQLORACLE_*`)
/// 3. Config file (`--config`, else `sqloracle.toml` in the working directory)
/// 4. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SqloracleConfig {
    pub corpus: CorpusConfig,
    pub run: RunConfig,
    pub service: ServiceConfig,
    pub psql: PsqlConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub corpus: Option<PathBuf>,
    pub oracles: Option<Vec<String>>,
    pub language: Option<String>,
    pub versions: Option<Vec<String>>,
    pub parallelism: Option<usize>,
    pub batch_size: Option<usize>,
    pub progress: Option<bool>,
    pub dry_run: Option<bool>,
}

impl SqloracleConfig {
    /// Load configuration with layered resolution.
    ///
    /// An explicit `config_file` must exist; the implicit project file is
    /// optional.
    pub fn load(
        root: &Path,
        config_file: Option<&Path>,
        cli_overrides: Option<&CliOverrides>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        match config_file {
            Some(path) => Self::merge_toml_file(&mut config, path)?,
            None => {
                let project_config_path = root.join(PROJECT_CONFIG_FILE);
                if project_config_path.exists() {
                    Self::merge_toml_file(&mut config, &project_config_path)?;
                }
            }
        }

        Self::apply_env_overrides(&mut config);

        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &SqloracleConfig) -> Result<(), ConfigError> {
        config.run.effective_language()?;
        config.run.effective_versions()?;
        let batch_size = config.run.effective_batch_size();
        if batch_size == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "run.batch_size".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if batch_size > MAX_BATCH_SIZE {
            return Err(ConfigError::ValidationFailed {
                field: "run.batch_size".to_string(),
                message: format!("must be at most {MAX_BATCH_SIZE}, got {batch_size}"),
            });
        }
        if config.service.effective_ready_attempts() == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "service.ready_attempts".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.service.effective_pool_size() == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "service.pool_size".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.run.oracles.iter().any(|o| o.trim().is_empty()) {
            return Err(ConfigError::ValidationFailed {
                field: "run.oracles".to_string(),
                message: "oracle names must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut SqloracleConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: SqloracleConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`, where `other` values override `base` values
    /// only when `other` has a `Some` (or non-empty) value.
    fn merge(base: &mut SqloracleConfig, other: &SqloracleConfig) {
        // Corpus
        if other.corpus.path.is_some() {
            base.corpus.path = other.corpus.path.clone();
        }

        // Run
        if !other.run.oracles.is_empty() {
            base.run.oracles = other.run.oracles.clone();
        }
        if other.run.language.is_some() {
            base.run.language = other.run.language.clone();
        }
        if !other.run.versions.is_empty() {
            base.run.versions = other.run.versions.clone();
        }
        if other.run.parallelism.is_some() {
            base.run.parallelism = other.run.parallelism;
        }
        if other.run.batch_size.is_some() {
            base.run.batch_size = other.run.batch_size;
        }
        if other.run.progress.is_some() {
            base.run.progress = other.run.progress;
        }
        if other.run.dry_run.is_some() {
            base.run.dry_run = other.run.dry_run;
        }

        // Service
        if other.service.compose_file.is_some() {
            base.service.compose_file = other.service.compose_file.clone();
        }
        if other.service.host.is_some() {
            base.service.host = other.service.host.clone();
        }
        if other.service.user.is_some() {
            base.service.user = other.service.user.clone();
        }
        if other.service.password.is_some() {
            base.service.password = other.service.password.clone();
        }
        if other.service.port_prefix.is_some() {
            base.service.port_prefix = other.service.port_prefix.clone();
        }
        if other.service.ready_attempts.is_some() {
            base.service.ready_attempts = other.service.ready_attempts;
        }
        if other.service.ready_interval_ms.is_some() {
            base.service.ready_interval_ms = other.service.ready_interval_ms;
        }
        if other.service.pool_size.is_some() {
            base.service.pool_size = other.service.pool_size;
        }

        // Psql
        if other.psql.program.is_some() {
            base.psql.program = other.psql.program.clone();
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `SQLORACLE_CORPUS`, `SQLORACLE_VERSIONS=13,14`, etc.
    /// Unparseable numeric values are ignored.
    fn apply_env_overrides(config: &mut SqloracleConfig) {
        if let Ok(val) = std::env::var("SQLORACLE_CORPUS") {
            config.corpus.path = Some(PathBuf::from(val));
        }
        if let Ok(val) = std::env::var("SQLORACLE_ORACLES") {
            config.run.oracles = split_list(&val);
        }
        if let Ok(val) = std::env::var("SQLORACLE_LANGUAGE") {
            config.run.language = Some(val);
        }
        if let Ok(val) = std::env::var("SQLORACLE_VERSIONS") {
            config.run.versions = split_list(&val);
        }
        if let Ok(val) = std::env::var("SQLORACLE_PARALLELISM") {
            if let Ok(v) = val.parse::<usize>() {
                config.run.parallelism = Some(v);
            }
        }
        if let Ok(val) = std::env::var("SQLORACLE_BATCH_SIZE") {
            if let Ok(v) = val.parse::<usize>() {
                config.run.batch_size = Some(v);
            }
        }
        if let Ok(val) = std::env::var("SQLORACLE_PSQL_PROGRAM") {
            config.psql.program = Some(val);
        }
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut SqloracleConfig, cli: &CliOverrides) {
        if let Some(ref v) = cli.corpus {
            config.corpus.path = Some(v.clone());
        }
        if let Some(ref v) = cli.oracles {
            config.run.oracles = v.clone();
        }
        if let Some(ref v) = cli.language {
            config.run.language = Some(v.clone());
        }
        if let Some(ref v) = cli.versions {
            config.run.versions = v.clone();
        }
        if let Some(v) = cli.parallelism {
            config.run.parallelism = Some(v);
        }
        if let Some(v) = cli.batch_size {
            config.run.batch_size = Some(v);
        }
        if let Some(v) = cli.progress {
            config.run.progress = Some(v);
        }
        if let Some(v) = cli.dry_run {
            config.run.dry_run = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
