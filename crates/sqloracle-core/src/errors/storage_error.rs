//! Storage errors.

use super::error_code::{self, ErrorCode};

/// Errors from the SQLite corpus store. Any of these during a run aborts
/// the run and loses the uncommitted transaction.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("Corpus database not found: {path}")]
    CorpusNotFound { path: String },

    #[error("Migration to v{version} failed: {message}")]
    MigrationFailed { version: u32, message: String },

    #[error("Batch size {batch_size} exceeds the SQLite limit of {max} rows per insert")]
    BatchTooLarge { batch_size: usize, max: usize },
}

impl StorageError {
    /// Wrap any displayable error as a `SqliteError`.
    pub fn sqlite(e: impl std::fmt::Display) -> Self {
        Self::SqliteError {
            message: e.to_string(),
        }
    }
}

impl ErrorCode for StorageError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::SqliteError { .. } => error_code::STORAGE_ERROR,
            Self::CorpusNotFound { .. } => error_code::CORPUS_NOT_FOUND,
            Self::MigrationFailed { .. } => error_code::MIGRATION_FAILED,
            Self::BatchTooLarge { .. } => error_code::BATCH_TOO_LARGE,
        }
    }
}
