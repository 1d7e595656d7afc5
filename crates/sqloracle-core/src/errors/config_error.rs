//! Configuration errors.

use super::error_code::{self, ErrorCode};

/// Errors detected before a run starts. Always fatal; no partial run is
/// attempted once one of these surfaces.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    FileNotFound { path: String },

    #[error("Config parse error in {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("Config validation failed for {field}: {message}")]
    ValidationFailed { field: String, message: String },

    #[error("Unknown language: {name}")]
    UnknownLanguage { name: String },

    #[error("Unsupported postgres version: {version}")]
    UnsupportedVersion { version: String },

    #[error("Unknown oracle: {name}")]
    UnknownOracle { name: String },
}

impl ErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownLanguage { .. } => error_code::UNSUPPORTED_LANGUAGE,
            Self::UnsupportedVersion { .. } => error_code::UNSUPPORTED_VERSION,
            Self::UnknownOracle { .. } => error_code::UNKNOWN_ORACLE,
            _ => error_code::CONFIG_ERROR,
        }
    }
}
