//! Row shape of the predictions table.

use sqloracle_core::types::{OracleId, Prediction, StatementId, Verdict};

/// A prediction stamped with the oracle id it is persisted under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionRow {
    pub statement_id: StatementId,
    pub oracle_id: OracleId,
    pub language_id: i64,
    pub verdict: Verdict,
    pub message: String,
    pub error: String,
}

impl PredictionRow {
    pub fn new(oracle_id: OracleId, prediction: Prediction) -> Self {
        Self {
            statement_id: prediction.statement_id,
            oracle_id,
            language_id: prediction.language.id(),
            verdict: prediction.verdict,
            message: prediction.message,
            error: prediction.error,
        }
    }
}
