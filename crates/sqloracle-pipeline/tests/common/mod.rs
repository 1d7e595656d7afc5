//! Shared fixtures: an in-memory corpus and scriptable in-process oracles.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use rusqlite::Connection;
use sqloracle_core::errors::OracleError;
use sqloracle_core::types::{Language, OracleIdentity, Prediction, Statement, StatementId, Verdict};
use sqloracle_core::Oracle;
use sqloracle_storage::open_in_memory;
use sqloracle_storage::queries::{oracles, statements};

pub fn corpus_with(n: usize, language: Language) -> Connection {
    let conn = open_in_memory().unwrap();
    for i in 0..n {
        let text = if i % 3 == 0 {
            format!("SELEC bad {i}")
        } else {
            format!("SELECT {i}")
        };
        statements::insert_statement(&conn, &text, language).unwrap();
    }
    conn
}

pub fn backlog(conn: &Connection, identity: &OracleIdentity, language: Language) -> Vec<Statement> {
    statements::read_all_unpredicted(conn, language, identity.id).unwrap()
}

pub fn identity(conn: &Connection, name: &str) -> OracleIdentity {
    oracles::derive_id(conn, name).unwrap()
}

/// Counts calls per statement; text containing `bad` is Invalid.
#[derive(Default)]
pub struct CountingOracle {
    pub calls: Mutex<HashMap<StatementId, usize>>,
}

impl CountingOracle {
    pub fn calls_for(&self, id: StatementId) -> usize {
        self.calls.lock().unwrap().get(&id).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().values().sum()
    }
}

impl Oracle for CountingOracle {
    fn name(&self) -> &str {
        "counting"
    }

    fn predict(&self, statement: &Statement, language: Language) -> Result<Prediction, OracleError> {
        *self.calls.lock().unwrap().entry(statement.id).or_default() += 1;
        if statement.text.contains("bad") {
            Ok(Prediction::failed(
                statement.id,
                language,
                Verdict::Invalid,
                "ERROR:  syntax error at or near \"SELEC\"",
            ))
        } else {
            Ok(Prediction::unknown(statement.id, language, ""))
        }
    }
}

/// Fails with a connectivity error on the statement whose text is `poison`.
pub struct FailingOracle {
    pub poison: String,
}

impl Oracle for FailingOracle {
    fn name(&self) -> &str {
        "failing"
    }

    fn predict(&self, statement: &Statement, language: Language) -> Result<Prediction, OracleError> {
        if statement.text == self.poison {
            return Err(OracleError::Unreachable {
                oracle: "failing".into(),
                message: "connection reset".into(),
            });
        }
        Ok(Prediction::unknown(statement.id, language, ""))
    }
}

/// Panics on every call.
pub struct PanickingOracle;

impl Oracle for PanickingOracle {
    fn name(&self) -> &str {
        "panicking"
    }

    fn predict(&self, _statement: &Statement, _language: Language) -> Result<Prediction, OracleError> {
        panic!("oracle bug");
    }
}
