//! Do-block oracle: compile the statement as the body of a `DO` block that
//! returns before reaching it.
//!
//! ```text
//! DO $SYNTAX_CHECK$BEGIN RETURN; <statement> END;$SYNTAX_CHECK$;
//! ```
//!
//! With `check_function_bodies` on, plpgsql parses the whole body, so a
//! syntax error anywhere in the statement is reported while nothing in it
//! executes and no referenced object needs to exist.

use sqloracle_core::errors::OracleError;
use sqloracle_core::types::{Language, PgVersion, Prediction, Statement};
use sqloracle_core::Oracle;

use crate::driver::{Driver, DriverOracle};

pub const DEFAULT_DELIMITER: &str = "SYNTAX_CHECK";

pub const LANGUAGES: &[Language] = &[Language::PgSql, Language::PlPgSql];

/// The dollar-quote tag to use for `statement`: `base` unless `$base$`
/// occurs in the statement, else the first of `base_1`, `base_2`, ... that
/// does not. A colliding tag would end the quoted body early and silently
/// test a different statement.
pub fn choose_delimiter(base: &str, statement: &str) -> String {
    if !statement.contains(&format!("${base}$")) {
        return base.to_string();
    }
    (1u64..)
        .map(|n| format!("{base}_{n}"))
        .find(|candidate| !statement.contains(&format!("${candidate}$")))
        .unwrap_or_else(|| base.to_string())
}

/// Embed `statement` in a `DO` block quoted with `delimiter`.
pub fn wrap(statement: &str, delimiter: &str) -> String {
    format!("DO ${delimiter}$BEGIN RETURN; {statement} END;${delimiter}$;")
}

pub struct DoBlockOracle<D> {
    inner: DriverOracle<D>,
    delimiter: String,
}

impl<D: Driver> DoBlockOracle<D> {
    pub fn new(version: PgVersion, driver: D) -> Self {
        Self::with_name(Self::oracle_name(version), driver)
    }

    pub fn with_name(name: impl Into<String>, driver: D) -> Self {
        Self {
            inner: DriverOracle::new(name, driver, LANGUAGES),
            delimiter: DEFAULT_DELIMITER.to_string(),
        }
    }

    /// Use `delimiter` as the base dollar-quote tag.
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    pub fn oracle_name(version: PgVersion) -> String {
        format!("postgres {version} do-block")
    }
}

impl<D: Driver> Oracle for DoBlockOracle<D> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn predict(&self, statement: &Statement, language: Language) -> Result<Prediction, OracleError> {
        self.inner.ensure_supported(language)?;
        let delimiter = choose_delimiter(&self.delimiter, &statement.text);
        if delimiter != self.delimiter {
            tracing::debug!(
                statement_id = statement.id.get(),
                %delimiter,
                "delimiter collided with statement text"
            );
        }
        let wrapped = wrap(&statement.text, &delimiter);
        self.inner.predict_sql(statement.id, language, &wrapped)
    }
}
