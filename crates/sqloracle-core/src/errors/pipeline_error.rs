//! Pipeline errors.

use super::error_code::{self, ErrorCode};
use super::{ConfigError, OracleError, StorageError};

/// The first fatal error of a prediction run.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Oracle error: {0}")]
    Oracle(#[from] OracleError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{role} thread panicked")]
    WorkerPanicked { role: &'static str },

    #[error("Failed to spawn {role} thread: {source}")]
    SpawnFailed {
        role: &'static str,
        #[source]
        source: std::io::Error,
    },
}

impl ErrorCode for PipelineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Oracle(e) => e.error_code(),
            Self::Storage(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::WorkerPanicked { .. } => error_code::WORKER_PANICKED,
            Self::SpawnFailed { .. } => error_code::SPAWN_FAILED,
        }
    }
}
