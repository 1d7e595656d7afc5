//! PredictionWriter: accumulates rows and flushes them as multi-row inserts
//! inside a single run-long transaction.
//!
//! Conflicting `(statement_id, oracle_id, language_id)` keys are skipped by
//! `ON CONFLICT DO NOTHING`, so rerunning over a partially predicted backlog
//! never duplicates rows. Nothing is durable until [`PredictionWriter::commit`];
//! dropping the writer rolls the whole run back.

use std::time::Instant;

use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, Statement, Transaction, TransactionBehavior};
use sqloracle_core::config::MAX_BATCH_SIZE;
use sqloracle_core::errors::StorageError;
use sqloracle_core::tracing::fields;

use super::rows::PredictionRow;

/// Rows per multi-row insert.
pub const DEFAULT_BATCH_SIZE: usize = 1000;

const COLUMNS_PER_ROW: usize = 6;
const SQLITE_MAX_VARIABLES: usize = 32766;

const _: () = assert!(MAX_BATCH_SIZE * COLUMNS_PER_ROW <= SQLITE_MAX_VARIABLES);

/// Counters reported when the writer commits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriterStats {
    /// Multi-row INSERT statements executed.
    pub inserts: usize,
    /// Rows handed to the database.
    pub rows_sent: usize,
    /// Rows actually inserted.
    pub rows_inserted: usize,
    /// Rows skipped because the key already existed.
    pub rows_skipped: usize,
}

/// `INSERT ... VALUES (?,?,?,?,?,?),... ON CONFLICT DO NOTHING` for `n` rows.
pub fn insert_sql(n: usize) -> String {
    let mut sql = String::with_capacity(128 + n * 14);
    sql.push_str(
        "INSERT INTO predictions (statement_id, oracle_id, language_id, message, error, valid) VALUES ",
    );
    for i in 0..n {
        if i > 0 {
            sql.push(',');
        }
        sql.push_str("(?,?,?,?,?,?)");
    }
    sql.push_str(" ON CONFLICT DO NOTHING");
    sql
}

pub struct PredictionWriter<'conn> {
    tx: Transaction<'conn>,
    batch_size: usize,
    full_batch_sql: String,
    buffer: Vec<PredictionRow>,
    stats: WriterStats,
}

impl<'conn> PredictionWriter<'conn> {
    /// Begin the run transaction. `BEGIN IMMEDIATE` takes the write lock up
    /// front so the first flush cannot hit SQLITE_BUSY. Batches larger than
    /// `MAX_BATCH_SIZE` would exceed SQLite's bound-parameter limit.
    pub fn begin(conn: &'conn mut Connection, batch_size: usize) -> Result<Self, StorageError> {
        if batch_size > MAX_BATCH_SIZE {
            return Err(StorageError::BatchTooLarge {
                batch_size,
                max: MAX_BATCH_SIZE,
            });
        }
        let batch_size = batch_size.max(1);
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(|e| StorageError::SqliteError {
                message: format!("failed to begin run transaction: {e}"),
            })?;
        Ok(Self {
            tx,
            batch_size,
            full_batch_sql: insert_sql(batch_size),
            buffer: Vec::with_capacity(batch_size),
            stats: WriterStats::default(),
        })
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Rows buffered but not yet flushed.
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    pub fn stats(&self) -> WriterStats {
        self.stats
    }

    /// Buffer one row. When the buffer reaches the batch size it is flushed
    /// and the number of rows flushed is returned.
    pub fn push(&mut self, row: PredictionRow) -> Result<Option<usize>, StorageError> {
        self.buffer.push(row);
        if self.buffer.len() >= self.batch_size {
            return self.flush().map(Some);
        }
        Ok(None)
    }

    /// Insert whatever is buffered as one statement. A full batch reuses the
    /// cached statement; a partial one prepares a statement sized to it.
    /// Returns the number of rows flushed (0 when the buffer was empty).
    pub fn flush(&mut self) -> Result<usize, StorageError> {
        let n = self.buffer.len();
        if n == 0 {
            return Ok(0);
        }
        let span = tracing::debug_span!(
            "flush_predictions",
            batch_rows = n,
            batch_write_ms = tracing::field::Empty
        );
        let _guard = span.enter();
        let started = Instant::now();

        let mut values: Vec<Value> = Vec::with_capacity(n * COLUMNS_PER_ROW);
        for row in self.buffer.drain(..) {
            values.push(Value::Integer(row.statement_id.get()));
            values.push(Value::Integer(row.oracle_id.get()));
            values.push(Value::Integer(row.language_id));
            values.push(Value::Text(row.message));
            values.push(Value::Text(row.error));
            values.push(match row.verdict.to_sql() {
                Some(valid) => Value::Integer(i64::from(valid)),
                None => Value::Null,
            });
        }

        let inserted = if n == self.batch_size {
            let mut stmt = self
                .tx
                .prepare_cached(&self.full_batch_sql)
                .map_err(|e| StorageError::SqliteError {
                    message: format!("failed to prepare batch insert: {}", describe(&e)),
                })?;
            execute_insert(&mut stmt, values)?
        } else {
            let mut stmt = self.tx.prepare(&insert_sql(n)).map_err(|e| {
                StorageError::SqliteError {
                    message: format!("failed to prepare final insert: {}", describe(&e)),
                }
            })?;
            execute_insert(&mut stmt, values)?
        };

        self.stats.inserts += 1;
        self.stats.rows_sent += n;
        self.stats.rows_inserted += inserted;
        self.stats.rows_skipped += n - inserted;
        span.record(fields::BATCH_WRITE_MS, started.elapsed().as_millis() as u64);
        tracing::debug!(inserted, skipped = n - inserted, "flushed prediction batch");
        Ok(n)
    }

    /// Flush the remainder and commit the run.
    pub fn commit(mut self) -> Result<WriterStats, StorageError> {
        self.flush()?;
        let stats = self.stats;
        self.tx.commit().map_err(|e| StorageError::SqliteError {
            message: format!("failed to commit predictions: {e}"),
        })?;
        Ok(stats)
    }
}

fn execute_insert(stmt: &mut Statement<'_>, values: Vec<Value>) -> Result<usize, StorageError> {
    let rows = values.len() / COLUMNS_PER_ROW;
    stmt.execute(params_from_iter(values))
        .map_err(|e| StorageError::SqliteError {
            message: format!("batch insert of {rows} predictions failed: {}", describe(&e)),
        })
}

/// SQLite's message without the statement text. Input errors carry the whole
/// multi-row INSERT, which runs to hundreds of kilobytes at large batch sizes.
fn describe(e: &rusqlite::Error) -> String {
    match e {
        rusqlite::Error::SqlInputError { msg, offset, .. } => format!("{msg} at offset {offset}"),
        other => other.to_string(),
    }
}
