//! Completeness under arbitrary worker counts and batch sizes.

mod common;

use common::{backlog, corpus_with, identity, CountingOracle};
use proptest::prelude::*;
use sqloracle_core::types::Language;
use sqloracle_pipeline::{run_pipeline, NoProgress, PipelineOptions};
use sqloracle_storage::queries::predictions;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn one_call_and_one_row_per_statement(
        n in 1usize..40,
        workers in 1usize..16,
        batch in 1usize..12,
    ) {
        let mut conn = corpus_with(n, Language::PgSql);
        let id = identity(&conn, "counting");
        let stmts = backlog(&conn, &id, Language::PgSql);
        let ids: Vec<_> = stmts.iter().map(|s| s.id).collect();
        let oracle = CountingOracle::default();

        let summary = run_pipeline(
            &oracle,
            &id,
            Language::PgSql,
            stmts,
            &mut conn,
            &PipelineOptions { workers: Some(workers), batch_size: batch },
            &NoProgress,
        ).unwrap();

        prop_assert_eq!(summary.computed, n);
        prop_assert_eq!(summary.writer.inserts, n.div_ceil(batch));
        for sid in ids {
            prop_assert_eq!(oracle.calls_for(sid), 1);
        }
        prop_assert_eq!(predictions::count(&conn).unwrap(), n as i64);
    }
}
