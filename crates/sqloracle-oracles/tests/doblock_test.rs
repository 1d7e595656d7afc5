//! Do-block and raw driver oracles over a recording fake driver.

use std::sync::Mutex;

use sqloracle_core::errors::OracleError;
use sqloracle_core::types::{Language, PgVersion, Statement, Verdict};
use sqloracle_core::Oracle;
use sqloracle_oracles::doblock::{choose_delimiter, wrap, DoBlockOracle, DEFAULT_DELIMITER};
use sqloracle_oracles::driver::{Driver, DriverOracle, RoundTrip};

/// Rejects any SQL containing `reject` and cannot judge `VACUUM`; records
/// everything it sees.
#[derive(Default)]
struct FakeDriver {
    seen: Mutex<Vec<String>>,
    unreachable: bool,
}

impl Driver for FakeDriver {
    fn round_trip(&self, sql: &str) -> Result<RoundTrip, OracleError> {
        if self.unreachable {
            return Err(OracleError::Unreachable {
                oracle: "fake".into(),
                message: "connection refused".into(),
            });
        }
        self.seen.lock().unwrap().push(sql.to_string());
        if sql.starts_with("VACUUM") {
            Ok(RoundTrip::Inconclusive {
                error: "ERROR:  VACUUM cannot run inside a transaction block".into(),
            })
        } else if sql.contains("reject") {
            Ok(RoundTrip::Rejected {
                error: "ERROR:  syntax error at or near \"reject\"".into(),
            })
        } else {
            Ok(RoundTrip::Accepted {
                message: String::new(),
            })
        }
    }
}

#[test]
fn statement_is_wrapped_in_never_executed_block() {
    let oracle = DoBlockOracle::new(PgVersion::V14, FakeDriver::default());
    let stmt = Statement::from_text("SELECT 1", Language::PgSql);
    let p = oracle.predict(&stmt, Language::PgSql).unwrap();
    assert_eq!(p.verdict, Verdict::Unknown);
    assert_eq!(p.statement_id, stmt.id);
    assert_eq!(oracle.name(), "postgres 14 do-block");
}

#[test]
fn wrap_format() {
    assert_eq!(
        wrap("SELECT 1", DEFAULT_DELIMITER),
        "DO $SYNTAX_CHECK$BEGIN RETURN; SELECT 1 END;$SYNTAX_CHECK$;"
    );
}

#[test]
fn rejection_is_invalid_with_error_text() {
    let oracle = DoBlockOracle::new(PgVersion::V12, FakeDriver::default());
    let stmt = Statement::from_text("reject me", Language::PlPgSql);
    let p = oracle.predict(&stmt, Language::PlPgSql).unwrap();
    assert_eq!(p.verdict, Verdict::Invalid);
    assert!(p.error.starts_with("ERROR:  syntax error"));
}

#[test]
fn delimiter_collision_picks_a_fresh_tag() {
    assert_eq!(choose_delimiter("SYNTAX_CHECK", "SELECT 1"), "SYNTAX_CHECK");
    assert_eq!(
        choose_delimiter("SYNTAX_CHECK", "SELECT $SYNTAX_CHECK$x$SYNTAX_CHECK$"),
        "SYNTAX_CHECK_1"
    );
    assert_eq!(
        choose_delimiter("SYNTAX_CHECK", "$SYNTAX_CHECK$ $SYNTAX_CHECK_1$"),
        "SYNTAX_CHECK_2"
    );
}

#[test]
fn colliding_statement_stays_inside_the_block() {
    let driver = FakeDriver::default();
    let oracle = DoBlockOracle::new(PgVersion::V14, &driver);
    let text = "SELECT $SYNTAX_CHECK$body$SYNTAX_CHECK$";
    oracle
        .predict(&Statement::from_text(text, Language::PgSql), Language::PgSql)
        .unwrap();
    assert_eq!(
        driver.seen.lock().unwrap().as_slice(),
        ["DO $SYNTAX_CHECK_1$BEGIN RETURN; SELECT $SYNTAX_CHECK$body$SYNTAX_CHECK$ END;$SYNTAX_CHECK_1$;"]
    );
}

#[test]
fn wrapped_text_reaches_the_driver() {
    let driver = FakeDriver::default();
    let oracle = DriverOracle::new("raw", &driver, &[Language::PgSql]);
    oracle
        .predict(&Statement::from_text("SELECT 2", Language::PgSql), Language::PgSql)
        .unwrap();
    assert_eq!(driver.seen.lock().unwrap().as_slice(), ["SELECT 2"]);
}

#[test]
fn unsupported_languages_are_refused() {
    let oracle = DoBlockOracle::new(PgVersion::V14, FakeDriver::default());
    let err = oracle
        .predict(&Statement::from_text("\\dt", Language::Psql), Language::Psql)
        .unwrap_err();
    assert!(matches!(err, OracleError::UnsupportedLanguage { .. }));
}

#[test]
fn transport_failure_is_an_error_not_a_verdict() {
    let oracle = DoBlockOracle::new(
        PgVersion::V14,
        FakeDriver {
            unreachable: true,
            ..Default::default()
        },
    );
    let err = oracle
        .predict(&Statement::from_text("SELECT 1", Language::PgSql), Language::PgSql)
        .unwrap_err();
    assert!(matches!(err, OracleError::Unreachable { .. }));
}

#[test]
fn transaction_block_failure_is_unknown_not_invalid() {
    let oracle = DriverOracle::new("postgres 14 raw", FakeDriver::default(), &[Language::PgSql]);
    let stmt = Statement::from_text("VACUUM FULL", Language::PgSql);
    let p = oracle.predict(&stmt, Language::PgSql).unwrap();
    assert_eq!(p.verdict, Verdict::Unknown);
    assert_eq!(p.error, "ERROR:  VACUUM cannot run inside a transaction block");
}
