//! ErrorCode trait for user-facing error reporting.

/// Structured error code attached to every sqloracle error enum.
///
/// The binary prints errors as `[ERROR_CODE] message` so that scripts driving
/// long corpus runs can grep for the failure class.
pub trait ErrorCode {
    /// Returns the error code string (e.g., "ORACLE_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted error string: `[ERROR_CODE] message`.
    fn coded_message(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const UNSUPPORTED_LANGUAGE: &str = "UNSUPPORTED_LANGUAGE";
pub const UNSUPPORTED_VERSION: &str = "UNSUPPORTED_VERSION";
pub const UNKNOWN_ORACLE: &str = "UNKNOWN_ORACLE";
pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
pub const CORPUS_NOT_FOUND: &str = "CORPUS_NOT_FOUND";
pub const MIGRATION_FAILED: &str = "MIGRATION_FAILED";
pub const BATCH_TOO_LARGE: &str = "BATCH_TOO_LARGE";
pub const ORACLE_ERROR: &str = "ORACLE_ERROR";
pub const ORACLE_UNREACHABLE: &str = "ORACLE_UNREACHABLE";
pub const SERVICE_ERROR: &str = "SERVICE_ERROR";
pub const SERVICE_TIMEOUT: &str = "SERVICE_TIMEOUT";
pub const WORKER_PANICKED: &str = "WORKER_PANICKED";
pub const SPAWN_FAILED: &str = "SPAWN_FAILED";
