//! Verdicts and predictions.

use serde::{Deserialize, Serialize};

use super::{Language, StatementId};

/// What an oracle concluded about a statement.
///
/// There is deliberately no `Valid` member: an oracle can only ever produce
/// positive evidence of invalidity. Statements nested in never-executed
/// branches (`\if false ... \endif`) pass every oracle while being garbage,
/// so "no error" is recorded as `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Invalid,
    Unknown,
}

impl Verdict {
    /// Persisted form of the corpus' nullable `valid` column.
    pub fn to_sql(self) -> Option<bool> {
        match self {
            Self::Invalid => Some(false),
            Self::Unknown => None,
        }
    }

    /// Inverse of [`Verdict::to_sql`]. A stored `true` cannot be produced
    /// by this crate; if one shows up it is read back as `Unknown`.
    pub fn from_sql(valid: Option<bool>) -> Self {
        match valid {
            Some(false) => Self::Invalid,
            _ => Self::Unknown,
        }
    }

    pub fn is_invalid(self) -> bool {
        self == Self::Invalid
    }
}

/// One oracle's testimony on one statement. `message` and `error` hold the
/// raw oracle output verbatim for offline reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prediction {
    pub statement_id: StatementId,
    pub language: Language,
    pub verdict: Verdict,
    pub message: String,
    pub error: String,
}

impl Prediction {
    /// The oracle raised nothing. `message` is whatever it printed.
    pub fn unknown(statement_id: StatementId, language: Language, message: impl Into<String>) -> Self {
        Self {
            statement_id,
            language,
            verdict: Verdict::Unknown,
            message: message.into(),
            error: String::new(),
        }
    }

    /// The oracle failed; `verdict` says whether the failure text proved
    /// invalidity.
    pub fn failed(
        statement_id: StatementId,
        language: Language,
        verdict: Verdict,
        error: impl Into<String>,
    ) -> Self {
        Self {
            statement_id,
            language,
            verdict,
            message: String::new(),
            error: error.into(),
        }
    }
}
