//! Parser oracle: the `sqlparser` crate's PostgreSQL dialect, in process.
//!
//! Needs no service and no version; a parse failure is `Invalid`, a clean
//! parse is `Unknown` like every other variant.

use sqlparser::dialect::PostgreSqlDialect;
use sqlparser::parser::Parser;
use sqloracle_core::errors::OracleError;
use sqloracle_core::types::{Language, Prediction, Statement, Verdict};
use sqloracle_core::Oracle;

pub const ORACLE_NAME: &str = "sqlparser postgres";

pub const LANGUAGES: &[Language] = &[Language::PgSql];

#[derive(Debug, Clone)]
pub struct ParserOracle {
    name: String,
}

impl ParserOracle {
    pub fn new() -> Self {
        Self {
            name: ORACLE_NAME.to_string(),
        }
    }
}

impl Default for ParserOracle {
    fn default() -> Self {
        Self::new()
    }
}

impl Oracle for ParserOracle {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict(&self, statement: &Statement, language: Language) -> Result<Prediction, OracleError> {
        if !LANGUAGES.contains(&language) {
            return Err(OracleError::UnsupportedLanguage {
                oracle: self.name.clone(),
                language: language.to_string(),
            });
        }
        Ok(match Parser::parse_sql(&PostgreSqlDialect {}, &statement.text) {
            Ok(parsed) => Prediction::unknown(
                statement.id,
                language,
                format!("parsed {} statement(s)", parsed.len()),
            ),
            Err(e) => Prediction::failed(statement.id, language, Verdict::Invalid, e.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn predict(text: &str) -> Prediction {
        ParserOracle::new()
            .predict(&Statement::from_text(text, Language::PgSql), Language::PgSql)
            .unwrap()
    }

    #[test]
    fn garbage_is_invalid_with_parser_message() {
        let p = predict("SELEC 1 FROM");
        assert_eq!(p.verdict, Verdict::Invalid);
        assert!(!p.error.is_empty());
        assert!(p.message.is_empty());
    }

    #[test]
    fn clean_parse_is_only_unknown() {
        let p = predict("SELECT a, b FROM t WHERE a = 1; SELECT 2;");
        assert_eq!(p.verdict, Verdict::Unknown);
        assert_eq!(p.message, "parsed 2 statement(s)");
        assert!(p.error.is_empty());
    }

    #[test]
    fn other_languages_are_refused() {
        let err = ParserOracle::new()
            .predict(&Statement::from_text("\\dt", Language::Psql), Language::Psql)
            .unwrap_err();
        assert!(matches!(err, OracleError::UnsupportedLanguage { .. }));
    }
}
