//! V002: index for per-oracle reporting over predictions.

pub const MIGRATION_SQL: &str = r#"
CREATE INDEX IF NOT EXISTS idx_predictions_oracle_language
    ON predictions(oracle_id, language_id, valid);
"#;
