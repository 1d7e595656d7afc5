//! The oracle contract: the only seam for plugging in a new validator.

use crate::errors::OracleError;
use crate::types::{Language, Prediction, Statement};

/// A ground-truth validator for one dialect implementation.
///
/// One instance is shared by reference across every worker of a run, hence
/// `Sync`. Any per-call resource (a pooled connection, a subprocess) is
/// acquired and released inside a single [`Oracle::predict`] call. A variant
/// that cannot take concurrent calls serializes internally.
pub trait Oracle: Send + Sync {
    /// Stable across restarts; the registry derives the persisted oracle id
    /// from it.
    fn name(&self) -> &str;

    /// Classify one statement as `language`.
    ///
    /// Returns `Err` only when the statement cannot be checked at all (unsupported
    /// language, lost connection, client binary missing). The target
    /// rejecting the statement is a `Prediction`, not an error.
    fn predict(&self, statement: &Statement, language: Language) -> Result<Prediction, OracleError>;
}

impl<T: Oracle + ?Sized> Oracle for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn predict(&self, statement: &Statement, language: Language) -> Result<Prediction, OracleError> {
        (**self).predict(statement, language)
    }
}

impl<T: Oracle + ?Sized> Oracle for std::sync::Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn predict(&self, statement: &Statement, language: Language) -> Result<Prediction, OracleError> {
        (**self).predict(statement, language)
    }
}
