//! Error handling for sqloracle.
//! One error enum per subsystem, `thiserror` only.

pub mod config_error;
pub mod error_code;
pub mod oracle_error;
pub mod pipeline_error;
pub mod service_error;
pub mod storage_error;

pub use config_error::ConfigError;
pub use error_code::ErrorCode;
pub use oracle_error::OracleError;
pub use pipeline_error::PipelineError;
pub use service_error::ServiceError;
pub use storage_error::StorageError;
