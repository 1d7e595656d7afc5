//! Batched prediction writer: one transaction per run, multi-row
//! conflict-skipping inserts.

pub mod rows;
pub mod writer;

pub use rows::PredictionRow;
pub use writer::{insert_sql, PredictionWriter, WriterStats, DEFAULT_BATCH_SIZE};
