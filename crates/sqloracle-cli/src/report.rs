//! Rendering errors for the terminal.

use sqloracle_core::errors::{
    ConfigError, ErrorCode, OracleError, PipelineError, ServiceError, StorageError,
};

/// `[CODE] message` for sqloracle errors, the plain chain otherwise.
pub fn render_error(err: &anyhow::Error) -> String {
    if let Some(e) = err.downcast_ref::<PipelineError>() {
        return e.coded_message();
    }
    if let Some(e) = err.downcast_ref::<ConfigError>() {
        return e.coded_message();
    }
    if let Some(e) = err.downcast_ref::<StorageError>() {
        return e.coded_message();
    }
    if let Some(e) = err.downcast_ref::<OracleError>() {
        return e.coded_message();
    }
    if let Some(e) = err.downcast_ref::<ServiceError>() {
        return e.coded_message();
    }
    format!("{err:#}")
}
