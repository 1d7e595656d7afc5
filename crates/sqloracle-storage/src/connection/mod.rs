//! Opening the corpus database.

pub mod pragmas;

use std::path::Path;

use rusqlite::Connection;
use sqloracle_core::errors::StorageError;

use self::pragmas::apply_pragmas;
use crate::migrations;

/// Open an existing corpus, apply pragmas, run migrations.
///
/// The corpus is produced by the statement splitter; a missing file means a
/// wrong `--corpus` path, so it is reported instead of creating an empty
/// database.
pub fn open_corpus(path: &Path) -> Result<Connection, StorageError> {
    if !path.is_file() {
        return Err(StorageError::CorpusNotFound {
            path: path.display().to_string(),
        });
    }
    let conn = Connection::open(path).map_err(StorageError::sqlite)?;
    apply_pragmas(&conn)?;
    migrations::run_migrations(&conn)?;
    Ok(conn)
}

/// Create a corpus at `path` if it does not exist yet, then open it.
pub fn create_corpus(path: &Path) -> Result<Connection, StorageError> {
    let conn = Connection::open(path).map_err(StorageError::sqlite)?;
    apply_pragmas(&conn)?;
    migrations::run_migrations(&conn)?;
    Ok(conn)
}

/// Open an in-memory corpus (for testing).
pub fn open_in_memory() -> Result<Connection, StorageError> {
    let conn = Connection::open_in_memory().map_err(StorageError::sqlite)?;
    apply_pragmas(&conn)?;
    migrations::run_migrations(&conn)?;
    Ok(conn)
}
