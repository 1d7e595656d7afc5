//! Core types, traits, errors, config and tracing for sqloracle.
//!
//! Every other crate in the workspace depends on this one. It owns the data
//! model (statements, verdicts, predictions), the [`traits::Oracle`] seam and
//! the error taxonomy.

pub mod config;
pub mod errors;
pub mod tracing;
pub mod traits;
pub mod types;

pub use traits::Oracle;
pub use types::{
    Language, OracleId, OracleIdentity, PgVersion, Prediction, Statement, StatementId, Verdict,
};
