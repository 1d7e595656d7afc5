//! Schema migrations using PRAGMA user_version.

pub mod v001_corpus;
pub mod v002_prediction_lookup;

use rusqlite::Connection;
use sqloracle_core::errors::StorageError;
use sqloracle_core::types::Language;

/// Run all pending migrations.
pub fn run_migrations(conn: &Connection) -> Result<(), StorageError> {
    let current_version: u32 = conn
        .pragma_query_value(None, "user_version", |row| row.get(0))
        .map_err(|e| StorageError::MigrationFailed {
            version: 0,
            message: e.to_string(),
        })?;

    let migrations: &[(&str, u32)] = &[
        (v001_corpus::MIGRATION_SQL, 1),
        (v002_prediction_lookup::MIGRATION_SQL, 2),
    ];

    for (sql, version) in migrations {
        if current_version < *version {
            conn.execute_batch(sql).map_err(|e| StorageError::MigrationFailed {
                version: *version,
                message: e.to_string(),
            })?;

            if *version == 1 {
                seed_languages(conn).map_err(|e| StorageError::MigrationFailed {
                    version: *version,
                    message: e.to_string(),
                })?;
            }

            conn.pragma_update(None, "user_version", version)
                .map_err(|e| StorageError::MigrationFailed {
                    version: *version,
                    message: e.to_string(),
                })?;
            tracing::info!(version = version, "applied migration");
        }
    }

    Ok(())
}

/// Get the current schema version.
pub fn current_version(conn: &Connection) -> Result<u32, StorageError> {
    conn.pragma_query_value(None, "user_version", |row| row.get(0))
        .map_err(StorageError::sqlite)
}

fn seed_languages(conn: &Connection) -> rusqlite::Result<()> {
    let mut stmt =
        conn.prepare("INSERT INTO languages (id, name) VALUES (?1, ?2) ON CONFLICT DO NOTHING")?;
    for language in Language::ALL {
        stmt.execute(rusqlite::params![language.id(), language.name()])?;
    }
    Ok(())
}
