//! Oracle call errors.
//!
//! An `OracleError` means the statement could not even be checked. It is never
//! used for the target system rejecting a statement; that is verdict data.

use super::error_code::{self, ErrorCode};
use super::ServiceError;

#[derive(Debug, thiserror::Error)]
pub enum OracleError {
    #[error("{oracle} does not support language {language}")]
    UnsupportedLanguage { oracle: String, language: String },

    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("{oracle} lost its connection: {message}")]
    Unreachable { oracle: String, message: String },

    #[error("Service error: {0}")]
    Service(#[from] ServiceError),
}

impl ErrorCode for OracleError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnsupportedLanguage { .. } => error_code::UNSUPPORTED_LANGUAGE,
            Self::Spawn { .. } => error_code::ORACLE_ERROR,
            Self::Unreachable { .. } => error_code::ORACLE_UNREACHABLE,
            Self::Service(e) => e.error_code(),
        }
    }
}
