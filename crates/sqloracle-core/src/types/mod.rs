//! Data model shared by every subsystem.

pub mod identifiers;
pub mod language;
pub mod prediction;
pub mod statement;
pub mod version;

pub use identifiers::{OracleId, OracleIdentity, StatementId};
pub use language::Language;
pub use prediction::{Prediction, Verdict};
pub use statement::Statement;
pub use version::PgVersion;
