//! Statement source, registries and migrations.

use sqloracle_core::types::{Language, OracleId, OracleIdentity, Prediction, Verdict};
use sqloracle_core::errors::StorageError;
use sqloracle_storage::batch::{PredictionRow, PredictionWriter};
use sqloracle_storage::connection::pragmas::verify_wal_mode;
use sqloracle_storage::migrations::{current_version, run_migrations};
use sqloracle_storage::queries::{languages, oracles, statements};
use sqloracle_storage::{create_corpus, open_corpus, open_in_memory};

#[test]
fn migrations_are_idempotent_and_seed_languages() {
    let conn = open_in_memory().unwrap();
    assert_eq!(current_version(&conn).unwrap(), 2);
    run_migrations(&conn).unwrap();
    assert_eq!(current_version(&conn).unwrap(), 2);

    let stored = languages::list(&conn).unwrap();
    let expected: Vec<(i64, String)> = Language::ALL
        .iter()
        .map(|l| (l.id(), l.name().to_string()))
        .collect();
    assert_eq!(stored, expected);
}

#[test]
fn open_corpus_refuses_a_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = open_corpus(&dir.path().join("missing.db")).unwrap_err();
    assert!(matches!(err, StorageError::CorpusNotFound { .. }));
}

#[test]
fn on_disk_corpus_uses_wal() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("corpus.db");
    drop(create_corpus(&path).unwrap());
    let conn = open_corpus(&path).unwrap();
    assert!(verify_wal_mode(&conn).unwrap());
}

#[test]
fn backlog_is_per_language_and_excludes_predicted() {
    let mut conn = open_in_memory().unwrap();
    let a = statements::insert_statement(&conn, "SELECT 1;", Language::PgSql).unwrap();
    let b = statements::insert_statement(&conn, "SELEC 2;", Language::PgSql).unwrap();
    statements::insert_statement(&conn, "\\dt", Language::Psql).unwrap();
    // same text under a second tag
    statements::insert_statement(&conn, "SELECT 1;", Language::PlPgSql).unwrap();

    let oracle = OracleId(5);
    let backlog = statements::read_all_unpredicted(&conn, Language::PgSql, oracle).unwrap();
    let mut ids: Vec<_> = backlog.iter().map(|s| s.id).collect();
    let mut expected = vec![a, b];
    expected.sort();
    ids.sort();
    assert_eq!(ids, expected);
    assert!(backlog.iter().all(|s| s.language == Language::PgSql));

    let mut writer = PredictionWriter::begin(&mut conn, 10).unwrap();
    writer
        .push(PredictionRow::new(
            oracle,
            Prediction::unknown(a, Language::PgSql, ""),
        ))
        .unwrap();
    writer.commit().unwrap();

    let backlog = statements::read_all_unpredicted(&conn, Language::PgSql, oracle).unwrap();
    assert_eq!(backlog.len(), 1);
    assert_eq!(backlog[0].id, b);
    assert_eq!(backlog[0].text, "SELEC 2;");

    // predicted for pgsql does not count for plpgsql
    let plpgsql = statements::read_all_unpredicted(&conn, Language::PlPgSql, oracle).unwrap();
    assert_eq!(plpgsql.len(), 1);
    assert_eq!(plpgsql[0].id, a);

    // another oracle still sees everything
    let other = statements::read_all_unpredicted(&conn, Language::PgSql, OracleId(6)).unwrap();
    assert_eq!(other.len(), 2);
}

#[test]
fn inserting_a_statement_twice_keeps_one_row() {
    let conn = open_in_memory().unwrap();
    let first = statements::insert_statement(&conn, "VACUUM;", Language::PgSql).unwrap();
    let second = statements::insert_statement(&conn, "VACUUM;", Language::PgSql).unwrap();
    assert_eq!(first, second);
    assert_eq!(statements::count_for_language(&conn, Language::PgSql).unwrap(), 1);
}

#[test]
fn oracle_registry_assigns_small_stable_ids() {
    let conn = open_in_memory().unwrap();
    let psql = oracles::derive_id(&conn, "psql 14").unwrap();
    let doblock = oracles::derive_id(&conn, "postgres 14 do-block").unwrap();
    assert_eq!(psql.id, OracleId(0));
    assert_eq!(doblock.id, OracleId(1));

    // same name, same id, no new row
    let again = oracles::derive_id(&conn, "psql 14").unwrap();
    assert_eq!(again, psql);
    assert_eq!(oracles::list(&conn).unwrap().len(), 2);
}

#[test]
fn register_if_absent_does_not_overwrite() {
    let conn = open_in_memory().unwrap();
    oracles::register_if_absent(&conn, &OracleIdentity::new(OracleId(9), "sqlparser postgres")).unwrap();
    oracles::register_if_absent(&conn, &OracleIdentity::new(OracleId(9), "renamed")).unwrap();
    oracles::register_if_absent(&conn, &OracleIdentity::new(OracleId(10), "sqlparser postgres")).unwrap();

    assert_eq!(
        oracles::lookup_id(&conn, "sqlparser postgres").unwrap(),
        Some(OracleId(9))
    );
    assert_eq!(oracles::lookup_id(&conn, "renamed").unwrap(), None);
    assert_eq!(oracles::list(&conn).unwrap().len(), 1);
}

#[test]
fn verdict_column_is_nullable_boolean() {
    let mut conn = open_in_memory().unwrap();
    let id = statements::insert_statement(&conn, "SELECT;", Language::PgSql).unwrap();
    let mut writer = PredictionWriter::begin(&mut conn, 10).unwrap();
    writer
        .push(PredictionRow::new(
            OracleId(1),
            Prediction::failed(id, Language::PgSql, Verdict::Invalid, "boom"),
        ))
        .unwrap();
    writer.commit().unwrap();
    let valid: Option<bool> = conn
        .query_row("SELECT valid FROM predictions", [], |r| r.get(0))
        .unwrap();
    assert_eq!(valid, Some(false));
}
