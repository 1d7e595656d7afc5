//! The languages table. Seeded by migration v001 from `Language::ALL`.

use rusqlite::Connection;
use sqloracle_core::errors::StorageError;

/// `(id, name)` pairs as stored, by id.
pub fn list(conn: &Connection) -> Result<Vec<(i64, String)>, StorageError> {
    let mut stmt = conn
        .prepare_cached("SELECT id, name FROM languages ORDER BY id")
        .map_err(StorageError::sqlite)?;
    let rows = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))
        .map_err(StorageError::sqlite)?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(StorageError::sqlite)
}
