//! Errors from the containerized database service lifecycle.

use super::error_code::{self, ErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("`{command}` failed: {message}")]
    CommandFailed { command: String, message: String },

    #[error("{service} service startup timed out after {attempts} readiness checks")]
    StartupTimedOut { service: String, attempts: u32 },
}

impl ErrorCode for ServiceError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::CommandFailed { .. } => error_code::SERVICE_ERROR,
            Self::StartupTimedOut { .. } => error_code::SERVICE_TIMEOUT,
        }
    }
}
