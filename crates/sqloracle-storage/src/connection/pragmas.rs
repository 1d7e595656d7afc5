//! PRAGMA configuration applied to every corpus connection.
//!
//! WAL mode, NORMAL sync, 64MB page cache, 5s busy_timeout, temp_store MEMORY.

use rusqlite::Connection;
use sqloracle_core::errors::StorageError;

/// Apply all performance and safety pragmas to a connection.
pub fn apply_pragmas(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA cache_size = -64000;
        PRAGMA busy_timeout = 5000;
        PRAGMA temp_store = MEMORY;
        ",
    )
    .map_err(|e| StorageError::SqliteError {
        message: format!("failed to apply pragmas: {e}"),
    })
}

/// Verify that WAL mode is active. In-memory databases report `memory`.
pub fn verify_wal_mode(conn: &Connection) -> Result<bool, StorageError> {
    let mode: String = conn
        .pragma_query_value(None, "journal_mode", |row| row.get(0))
        .map_err(StorageError::sqlite)?;
    Ok(mode.eq_ignore_ascii_case("wal"))
}
