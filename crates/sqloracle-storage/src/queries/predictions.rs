//! Read side of the predictions table.

use rusqlite::{params, Connection};
use sqloracle_core::errors::StorageError;
use sqloracle_core::types::{Language, OracleId, StatementId, Verdict};

use crate::batch::PredictionRow;

/// Invalid/Unknown tallies for one (oracle, language).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VerdictCounts {
    pub invalid: i64,
    pub unknown: i64,
}

/// Count all prediction rows.
pub fn count(conn: &Connection) -> Result<i64, StorageError> {
    conn.query_row("SELECT COUNT(*) FROM predictions", [], |row| row.get(0))
        .map_err(StorageError::sqlite)
}

/// Count prediction rows for one (oracle, language).
pub fn count_for(
    conn: &Connection,
    oracle_id: OracleId,
    language: Language,
) -> Result<i64, StorageError> {
    conn.query_row(
        "SELECT COUNT(*) FROM predictions WHERE oracle_id = ?1 AND language_id = ?2",
        params![oracle_id.get(), language.id()],
        |row| row.get(0),
    )
    .map_err(StorageError::sqlite)
}

pub fn verdict_counts(
    conn: &Connection,
    oracle_id: OracleId,
    language: Language,
) -> Result<VerdictCounts, StorageError> {
    conn.query_row(
        "SELECT
            COALESCE(SUM(CASE WHEN valid = 0 THEN 1 ELSE 0 END), 0),
            COALESCE(SUM(CASE WHEN valid IS NULL THEN 1 ELSE 0 END), 0)
         FROM predictions WHERE oracle_id = ?1 AND language_id = ?2",
        params![oracle_id.get(), language.id()],
        |row| {
            Ok(VerdictCounts {
                invalid: row.get(0)?,
                unknown: row.get(1)?,
            })
        },
    )
    .map_err(StorageError::sqlite)
}

/// Load every prediction for one (oracle, language), by statement id.
pub fn load_for(
    conn: &Connection,
    oracle_id: OracleId,
    language: Language,
) -> Result<Vec<PredictionRow>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT statement_id, oracle_id, language_id, message, error, valid
             FROM predictions
             WHERE oracle_id = ?1 AND language_id = ?2
             ORDER BY statement_id",
        )
        .map_err(StorageError::sqlite)?;

    let rows = stmt
        .query_map(params![oracle_id.get(), language.id()], |row| {
            Ok(PredictionRow {
                statement_id: StatementId(row.get(0)?),
                oracle_id: OracleId(row.get(1)?),
                language_id: row.get(2)?,
                message: row.get(3)?,
                error: row.get(4)?,
                verdict: Verdict::from_sql(row.get(5)?),
            })
        })
        .map_err(StorageError::sqlite)?;

    rows.collect::<Result<Vec<_>, _>>()
        .map_err(StorageError::sqlite)
}
