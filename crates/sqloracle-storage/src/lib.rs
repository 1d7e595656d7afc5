//! SQLite persistence for the statement corpus and its predictions.
//!
//! The pipeline reads its backlog once through [`queries::statements`] and
//! hands a single connection to [`batch::PredictionWriter`], which owns all
//! writes for the run.

pub mod batch;
pub mod connection;
pub mod migrations;
pub mod queries;

pub use batch::{PredictionRow, PredictionWriter, WriterStats};
pub use connection::{create_corpus, open_corpus, open_in_memory};
