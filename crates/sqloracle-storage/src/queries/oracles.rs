//! Oracle registry: stable name -> small persisted integer id.

use rusqlite::{params, Connection, OptionalExtension};
use sqloracle_core::errors::StorageError;
use sqloracle_core::types::{OracleId, OracleIdentity};

/// Record `identity` unless its id or name is already registered.
pub fn register_if_absent(conn: &Connection, identity: &OracleIdentity) -> Result<(), StorageError> {
    conn.execute(
        "INSERT INTO oracles (id, name) VALUES (?1, ?2) ON CONFLICT DO NOTHING",
        params![identity.id.get(), identity.name],
    )
    .map_err(StorageError::sqlite)?;
    Ok(())
}

/// The id registered for `name`, if any.
pub fn lookup_id(conn: &Connection, name: &str) -> Result<Option<OracleId>, StorageError> {
    conn.query_row(
        "SELECT id FROM oracles WHERE name = ?1",
        params![name],
        |row| row.get::<_, i64>(0),
    )
    .optional()
    .map(|id| id.map(OracleId))
    .map_err(StorageError::sqlite)
}

/// The identity for `name`: the registered id if there is one, otherwise
/// the next free id, registered before returning.
pub fn derive_id(conn: &Connection, name: &str) -> Result<OracleIdentity, StorageError> {
    if let Some(id) = lookup_id(conn, name)? {
        return Ok(OracleIdentity::new(id, name));
    }
    let next: i64 = conn
        .query_row("SELECT COALESCE(MAX(id), -1) + 1 FROM oracles", [], |row| {
            row.get(0)
        })
        .map_err(StorageError::sqlite)?;
    let identity = OracleIdentity::new(OracleId(next), name);
    register_if_absent(conn, &identity)?;
    tracing::info!(oracle = name, oracle_id = next, "registered oracle");
    Ok(identity)
}

/// All registered oracles, by id.
pub fn list(conn: &Connection) -> Result<Vec<OracleIdentity>, StorageError> {
    let mut stmt = conn
        .prepare_cached("SELECT id, name FROM oracles ORDER BY id")
        .map_err(StorageError::sqlite)?;
    let rows = stmt
        .query_map([], |row| {
            Ok(OracleIdentity::new(OracleId(row.get(0)?), row.get::<_, String>(1)?))
        })
        .map_err(StorageError::sqlite)?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(StorageError::sqlite)
}
