//! Tests for the sqloracle configuration system.

use std::path::PathBuf;
use std::sync::Mutex;

use sqloracle_core::config::{CliOverrides, SqloracleConfig, MAX_BATCH_SIZE};
use sqloracle_core::errors::ConfigError;
use sqloracle_core::types::{Language, PgVersion};

/// Global mutex to serialize tests that modify environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn tempdir() -> tempfile::TempDir {
    tempfile::TempDir::new().unwrap()
}

/// Clear all SQLORACLE_ env vars to prevent cross-test contamination.
fn clear_env_vars() {
    for key in [
        "SQLORACLE_CORPUS",
        "SQLORACLE_ORACLES",
        "SQLORACLE_LANGUAGE",
        "SQLORACLE_VERSIONS",
        "SQLORACLE_PARALLELISM",
        "SQLORACLE_BATCH_SIZE",
        "SQLORACLE_PSQL_PROGRAM",
    ] {
        std::env::remove_var(key);
    }
}

#[test]
fn defaults_without_any_layer() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env_vars();

    let dir = tempdir();
    let config = SqloracleConfig::load(dir.path(), None, None).unwrap();

    assert_eq!(config.corpus.effective_path(), PathBuf::from("./corpus.db"));
    assert_eq!(config.run.effective_oracles(), vec!["sqlparser".to_string()]);
    assert_eq!(config.run.effective_language().unwrap(), Language::PgSql);
    assert_eq!(config.run.effective_versions().unwrap(), vec![PgVersion::V14]);
    assert_eq!(config.run.effective_batch_size(), 1000);
    assert_eq!(config.run.effective_parallelism(), None);
    assert!(!config.run.effective_dry_run());
    assert_eq!(config.service.effective_ready_attempts(), 15);
}

#[test]
fn cli_beats_env_beats_project_file() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env_vars();

    let dir = tempdir();
    std::fs::write(
        dir.path().join("sqloracle.toml"),
        r#"
[run]
language = "plpgsql"
versions = ["12"]
batch_size = 50

[service]
ready_attempts = 3
"#,
    )
    .unwrap();

    std::env::set_var("SQLORACLE_VERSIONS", "13, 14");
    std::env::set_var("SQLORACLE_BATCH_SIZE", "200");

    let cli = CliOverrides {
        batch_size: Some(7),
        ..Default::default()
    };
    let config = SqloracleConfig::load(dir.path(), None, Some(&cli)).unwrap();
    clear_env_vars();

    // project file
    assert_eq!(config.run.effective_language().unwrap(), Language::PlPgSql);
    assert_eq!(config.service.effective_ready_attempts(), 3);
    // env over project
    assert_eq!(
        config.run.effective_versions().unwrap(),
        vec![PgVersion::V13, PgVersion::V14]
    );
    // cli over env
    assert_eq!(config.run.effective_batch_size(), 7);
}

#[test]
fn explicit_config_file_must_exist() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env_vars();

    let dir = tempdir();
    let missing = dir.path().join("nope.toml");
    let err = SqloracleConfig::load(dir.path(), Some(&missing), None).unwrap_err();
    assert!(matches!(err, ConfigError::FileNotFound { .. }));
}

#[test]
fn unknown_language_is_rejected_before_any_run() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env_vars();

    let dir = tempdir();
    let cli = CliOverrides {
        language: Some("cobol".into()),
        ..Default::default()
    };
    let err = SqloracleConfig::load(dir.path(), None, Some(&cli)).unwrap_err();
    assert!(matches!(err, ConfigError::UnknownLanguage { .. }));
}

#[test]
fn unsupported_version_is_rejected() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env_vars();

    let dir = tempdir();
    let cli = CliOverrides {
        versions: Some(vec!["14".into(), "9.6".into()]),
        ..Default::default()
    };
    let err = SqloracleConfig::load(dir.path(), None, Some(&cli)).unwrap_err();
    assert!(matches!(err, ConfigError::UnsupportedVersion { ref version } if version == "9.6"));
}

#[test]
fn zero_batch_size_fails_validation() {
    let config = SqloracleConfig::from_toml("[run]\nbatch_size = 0\n").unwrap();
    let err = SqloracleConfig::validate(&config).unwrap_err();
    assert!(matches!(err, ConfigError::ValidationFailed { ref field, .. } if field == "run.batch_size"));
}

#[test]
fn batch_size_above_sqlite_variable_limit_fails_validation() {
    let config = SqloracleConfig::from_toml("[run]\nbatch_size = 6000\n").unwrap();
    let err = SqloracleConfig::validate(&config).unwrap_err();
    assert!(matches!(err, ConfigError::ValidationFailed { ref field, .. } if field == "run.batch_size"));

    let at_limit = format!("[run]\nbatch_size = {MAX_BATCH_SIZE}\n");
    let config = SqloracleConfig::from_toml(&at_limit).unwrap();
    SqloracleConfig::validate(&config).unwrap();
    assert_eq!(MAX_BATCH_SIZE, 5461);
}

#[test]
fn zero_parallelism_means_no_override() {
    let config = SqloracleConfig::from_toml("[run]\nparallelism = 0\n").unwrap();
    assert_eq!(config.run.effective_parallelism(), None);
}

#[test]
fn unknown_keys_are_ignored() {
    let config = SqloracleConfig::from_toml(
        r#"
[run]
language = "psql"
future_knob = true
"#,
    )
    .unwrap();
    assert_eq!(config.run.effective_language().unwrap(), Language::Psql);
}

#[test]
fn toml_round_trip_keeps_overrides() {
    let config = SqloracleConfig::from_toml(
        r#"
[corpus]
path = "/data/corpus.db"

[run]
oracles = ["psql", "do-block"]
"#,
    )
    .unwrap();
    let rendered = config.to_toml().unwrap();
    let reparsed = SqloracleConfig::from_toml(&rendered).unwrap();
    assert_eq!(
        reparsed.run.effective_oracles(),
        vec!["psql".to_string(), "do-block".to_string()]
    );
    assert_eq!(
        reparsed.corpus.effective_path(),
        PathBuf::from("/data/corpus.db")
    );
}
