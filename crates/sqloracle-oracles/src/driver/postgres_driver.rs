//! Postgres driver with a fixed round-robin connection pool.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use postgres::error::SqlState;
use postgres::{Client, NoTls};
use sqloracle_core::errors::OracleError;

use super::{Driver, RoundTrip};

const MAX_POOL_SIZE: usize = 16;

/// Connections are opened once at construction. A call takes the next
/// connection in turn and holds its lock only for that call, so at most
/// `pool size` statements are in flight against the server.
pub struct PostgresDriver {
    oracle: String,
    connections: Vec<Mutex<Client>>,
    next: AtomicUsize,
}

impl PostgresDriver {
    /// Open `pool_size` connections to `dsn` with function-body checking on,
    /// so a `DO` block's body is compiled even though it never runs.
    pub fn connect(oracle: &str, dsn: &str, pool_size: usize) -> Result<Self, OracleError> {
        let size = pool_size.clamp(1, MAX_POOL_SIZE);
        let mut connections = Vec::with_capacity(size);
        for _ in 0..size {
            let mut client = Client::connect(dsn, NoTls).map_err(|e| OracleError::Unreachable {
                oracle: oracle.to_string(),
                message: format!("connect failed: {e}"),
            })?;
            client
                .batch_execute("SET check_function_bodies = on;")
                .map_err(|e| OracleError::Unreachable {
                    oracle: oracle.to_string(),
                    message: e.to_string(),
                })?;
            connections.push(Mutex::new(client));
        }
        tracing::debug!(oracle, pool_size = size, "opened postgres pool");
        Ok(Self {
            oracle: oracle.to_string(),
            connections,
            next: AtomicUsize::new(0),
        })
    }

    /// Number of connections in the pool.
    pub fn size(&self) -> usize {
        self.connections.len()
    }

    fn unreachable(&self, e: impl std::fmt::Display) -> OracleError {
        OracleError::Unreachable {
            oracle: self.oracle.clone(),
            message: e.to_string(),
        }
    }
}

impl Driver for PostgresDriver {
    fn round_trip(&self, sql: &str) -> Result<RoundTrip, OracleError> {
        let idx = self.next.fetch_add(1, Ordering::Relaxed) % self.connections.len();
        let mut client = self.connections[idx]
            .lock()
            .map_err(|_| self.unreachable("connection lock poisoned"))?;

        // Every statement runs in a transaction that is rolled back, so
        // nothing it creates leaks into the next one.
        let mut tx = client.transaction().map_err(|e| self.unreachable(e))?;
        let outcome = match tx.batch_execute(sql) {
            Ok(()) => RoundTrip::Accepted {
                message: String::new(),
            },
            Err(e) => match e.as_db_error() {
                Some(db) => classify(
                    db.code(),
                    format!("{}:  {}", db.severity(), db.message()),
                ),
                None => return Err(self.unreachable(e)),
            },
        };
        tx.rollback().map_err(|e| self.unreachable(e))?;
        Ok(outcome)
    }
}

/// Map a server error to a round-trip outcome. Statements such as `VACUUM`
/// or `CREATE DATABASE` fail with `active_sql_transaction` only because the
/// driver wraps every statement in a transaction, which says nothing about
/// their validity.
pub fn classify(code: &SqlState, error: String) -> RoundTrip {
    if *code == SqlState::ACTIVE_SQL_TRANSACTION {
        RoundTrip::Inconclusive { error }
    } else {
        RoundTrip::Rejected { error }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transaction_block_errors_are_inconclusive() {
        let error = "ERROR:  VACUUM cannot run inside a transaction block".to_string();
        assert_eq!(
            classify(&SqlState::ACTIVE_SQL_TRANSACTION, error.clone()),
            RoundTrip::Inconclusive { error }
        );
        assert_eq!(SqlState::ACTIVE_SQL_TRANSACTION.code(), "25001");
    }

    #[test]
    fn statement_errors_are_rejections() {
        for code in [SqlState::SYNTAX_ERROR, SqlState::UNDEFINED_TABLE] {
            let error = format!("ERROR:  {}", code.code());
            assert_eq!(classify(&code, error.clone()), RoundTrip::Rejected { error });
        }
    }
}
