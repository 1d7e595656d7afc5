//! Statements under test.

use serde::{Deserialize, Serialize};

use super::{Language, StatementId};

/// One candidate source fragment, tagged with the dialect it was harvested
/// as. Read-only to the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    pub id: StatementId,
    pub text: String,
    pub language: Language,
}

impl Statement {
    pub fn new(id: StatementId, text: impl Into<String>, language: Language) -> Self {
        Self {
            id,
            text: text.into(),
            language,
        }
    }

    /// Build a statement keyed by the hash of its text.
    pub fn from_text(text: impl Into<String>, language: Language) -> Self {
        let text = text.into();
        Self {
            id: StatementId::of_text(&text),
            text,
            language,
        }
    }
}
