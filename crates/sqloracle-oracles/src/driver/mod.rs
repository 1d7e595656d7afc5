//! Direct round-trip oracles: hand the statement to a database driver and
//! record whether the server raised anything.

pub mod postgres_driver;

use sqloracle_core::errors::OracleError;
use sqloracle_core::types::{Language, Prediction, Statement, StatementId, Verdict};
use sqloracle_core::Oracle;

pub use postgres_driver::PostgresDriver;

/// Outcome of one round trip that reached the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundTrip {
    /// The server raised nothing.
    Accepted { message: String },
    /// The server raised an error; the text is kept verbatim.
    Rejected { error: String },
    /// The server raised an error caused by how the statement was run
    /// rather than by the statement itself, such as a statement that may
    /// not run inside a transaction block.
    Inconclusive { error: String },
}

/// A database connection capable of executing arbitrary statement text.
///
/// `Err` is reserved for not reaching the server at all; a server-side
/// error is `Ok(RoundTrip::Rejected)` or `Ok(RoundTrip::Inconclusive)`.
/// Implementations must be callable from many workers at once.
pub trait Driver: Send + Sync {
    fn round_trip(&self, sql: &str) -> Result<RoundTrip, OracleError>;
}

impl<D: Driver + ?Sized> Driver for Box<D> {
    fn round_trip(&self, sql: &str) -> Result<RoundTrip, OracleError> {
        (**self).round_trip(sql)
    }
}

impl<D: Driver + ?Sized> Driver for &D {
    fn round_trip(&self, sql: &str) -> Result<RoundTrip, OracleError> {
        (**self).round_trip(sql)
    }
}

/// Runs the statement text as-is through a [`Driver`].
///
/// Any rejection is `Invalid`, including "relation does not exist": this
/// variant trusts the server's verdict wholesale. An inconclusive round trip
/// stays `Unknown` with the server's text kept as the error.
pub struct DriverOracle<D> {
    name: String,
    driver: D,
    languages: &'static [Language],
}

impl<D: Driver> DriverOracle<D> {
    pub fn new(name: impl Into<String>, driver: D, languages: &'static [Language]) -> Self {
        Self {
            name: name.into(),
            driver,
            languages,
        }
    }

    pub fn supports(&self, language: Language) -> bool {
        self.languages.contains(&language)
    }

    pub fn ensure_supported(&self, language: Language) -> Result<(), OracleError> {
        if self.supports(language) {
            Ok(())
        } else {
            Err(OracleError::UnsupportedLanguage {
                oracle: self.name.clone(),
                language: language.to_string(),
            })
        }
    }

    /// Round-trip `sql` (which may be a rewritten form of the statement)
    /// and record the outcome against `statement_id`.
    pub fn predict_sql(
        &self,
        statement_id: StatementId,
        language: Language,
        sql: &str,
    ) -> Result<Prediction, OracleError> {
        Ok(match self.driver.round_trip(sql)? {
            RoundTrip::Accepted { message } => Prediction::unknown(statement_id, language, message),
            RoundTrip::Rejected { error } => {
                Prediction::failed(statement_id, language, Verdict::Invalid, error)
            }
            RoundTrip::Inconclusive { error } => {
                Prediction::failed(statement_id, language, Verdict::Unknown, error)
            }
        })
    }
}

impl<D: Driver> Oracle for DriverOracle<D> {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict(&self, statement: &Statement, language: Language) -> Result<Prediction, OracleError> {
        self.ensure_supported(language)?;
        self.predict_sql(statement.id, language, &statement.text)
    }
}
