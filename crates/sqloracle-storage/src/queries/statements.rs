//! The statement source: the backlog a prediction run works through.

use rusqlite::{params, Connection};
use sqloracle_core::errors::StorageError;
use sqloracle_core::types::{Language, OracleId, Statement, StatementId};

/// Every statement tagged `language` that has no prediction yet for
/// `(oracle_id, language)`, ordered by id.
///
/// Read once, up front; the run never re-queries mid-flight.
pub fn read_all_unpredicted(
    conn: &Connection,
    language: Language,
    oracle_id: OracleId,
) -> Result<Vec<Statement>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT s.id, s.text
             FROM statements s
             JOIN statement_languages sl ON sl.statement_id = s.id
             WHERE sl.language_id = ?1
               AND NOT EXISTS (
                   SELECT 1 FROM predictions p
                   WHERE p.statement_id = s.id
                     AND p.oracle_id = ?2
                     AND p.language_id = ?1
               )
             ORDER BY s.id",
        )
        .map_err(StorageError::sqlite)?;

    let rows = stmt
        .query_map(params![language.id(), oracle_id.get()], |row| {
            Ok(Statement {
                id: StatementId(row.get(0)?),
                text: row.get(1)?,
                language,
            })
        })
        .map_err(StorageError::sqlite)?;

    rows.collect::<Result<Vec<_>, _>>()
        .map_err(StorageError::sqlite)
}

/// Add a statement under `language`. Idempotent: the id is the hash of the
/// text, so re-inserting only adds a missing language tag.
pub fn insert_statement(
    conn: &Connection,
    text: &str,
    language: Language,
) -> Result<StatementId, StorageError> {
    let id = StatementId::of_text(text);
    conn.execute(
        "INSERT INTO statements (id, text) VALUES (?1, ?2) ON CONFLICT DO NOTHING",
        params![id.get(), text],
    )
    .map_err(StorageError::sqlite)?;
    conn.execute(
        "INSERT INTO statement_languages (statement_id, language_id) VALUES (?1, ?2)
         ON CONFLICT DO NOTHING",
        params![id.get(), language.id()],
    )
    .map_err(StorageError::sqlite)?;
    Ok(id)
}

/// Count statements tagged `language`.
pub fn count_for_language(conn: &Connection, language: Language) -> Result<i64, StorageError> {
    conn.query_row(
        "SELECT COUNT(*) FROM statement_languages WHERE language_id = ?1",
        params![language.id()],
        |row| row.get(0),
    )
    .map_err(StorageError::sqlite)
}
