use sqloracle_cli::RunPlan;
use sqloracle_core::config::{CliOverrides, SqloracleConfig};
use sqloracle_core::errors::{ConfigError, OracleError, PipelineError};
use sqloracle_core::types::{Language, PgVersion};
use sqloracle_oracles::OracleKind;

fn config(oracles: &[&str], language: &str, versions: &[&str]) -> SqloracleConfig {
    let mut config = SqloracleConfig::default();
    config.run.oracles = oracles.iter().map(|s| s.to_string()).collect();
    config.run.language = Some(language.to_string());
    config.run.versions = versions.iter().map(|s| s.to_string()).collect();
    config
}

#[test]
fn defaults_plan_a_single_parser_run() {
    let plan = RunPlan::from_config(&SqloracleConfig::default()).unwrap();
    assert_eq!(plan.language, Language::PgSql);
    assert_eq!(plan.runs.len(), 1);
    assert_eq!(plan.runs[0].kind, OracleKind::SqlParser);
    assert_eq!(plan.runs[0].name, "sqlparser postgres");
    assert!(!plan.needs_service());
}

#[test]
fn versions_outer_oracles_inner_in_order() {
    let plan = RunPlan::from_config(&config(&["raw", "do-block"], "pgsql", &["13", "14"])).unwrap();
    let names: Vec<_> = plan.runs.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(
        names,
        [
            "postgres 13 raw",
            "postgres 13 do-block",
            "postgres 14 raw",
            "postgres 14 do-block",
        ]
    );
    assert_eq!(plan.runs[2].version, PgVersion::V14);
    assert!(plan.needs_service());
}

#[test]
fn version_independent_oracle_runs_once() {
    let plan =
        RunPlan::from_config(&config(&["sqlparser", "raw"], "pgsql", &["10", "11", "12"])).unwrap();
    let parser_runs = plan
        .runs
        .iter()
        .filter(|r| r.kind == OracleKind::SqlParser)
        .count();
    assert_eq!(parser_runs, 1);
    assert_eq!(plan.runs.len(), 4);
}

#[test]
fn unsupported_language_fails_before_running() {
    let err = RunPlan::from_config(&config(&["psql"], "pgsql", &["14"])).unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Oracle(OracleError::UnsupportedLanguage { .. })
    ));
}

#[test]
fn unknown_oracle_is_a_config_error() {
    let err = RunPlan::from_config(&config(&["pg_query"], "pgsql", &["14"])).unwrap_err();
    assert!(matches!(err, PipelineError::Config(ConfigError::UnknownOracle { .. })));
}

#[test]
fn cli_overrides_reach_the_plan() {
    let overrides = CliOverrides {
        oracles: Some(vec!["psql".into()]),
        language: Some("psql".into()),
        versions: Some(vec!["12".into()]),
        ..Default::default()
    };
    let dir = tempfile::tempdir().unwrap();
    let config = SqloracleConfig::load(dir.path(), None, Some(&overrides)).unwrap();
    let plan = RunPlan::from_config(&config).unwrap();
    assert_eq!(plan.runs[0].name, "psql 12");
}
