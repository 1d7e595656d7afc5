//! V001: corpus schema.
//! languages, statements, statement_languages, oracles, predictions.

pub const MIGRATION_SQL: &str = r#"
-- Fixed dialect tags. Ids mirror sqloracle_core::types::Language.
CREATE TABLE IF NOT EXISTS languages (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL UNIQUE
);

-- Statements keyed by the xxh3-64 hash of their text.
CREATE TABLE IF NOT EXISTS statements (
    id INTEGER PRIMARY KEY,
    text TEXT NOT NULL
);

-- A statement can be harvested under several dialect tags.
CREATE TABLE IF NOT EXISTS statement_languages (
    statement_id INTEGER NOT NULL,
    language_id INTEGER NOT NULL,
    PRIMARY KEY (statement_id, language_id)
);

CREATE INDEX IF NOT EXISTS idx_statement_languages_language
    ON statement_languages(language_id);

-- Oracle names get a small stable id once; predictions reference the id.
CREATE TABLE IF NOT EXISTS oracles (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL UNIQUE
);

-- One row per (statement, oracle, language), never updated.
-- valid: 0 = proven invalid, NULL = no evidence either way.
CREATE TABLE IF NOT EXISTS predictions (
    statement_id INTEGER NOT NULL,
    oracle_id INTEGER NOT NULL,
    language_id INTEGER NOT NULL,
    message TEXT NOT NULL DEFAULT '',
    error TEXT NOT NULL DEFAULT '',
    valid INTEGER,
    PRIMARY KEY (statement_id, oracle_id, language_id)
);
"#;
