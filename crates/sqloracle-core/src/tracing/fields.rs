//! Span field names recorded after the span is created.

/// Batch write time in milliseconds.
pub const BATCH_WRITE_MS: &str = "batch_write_ms";

/// Worker count chosen for a run.
pub const WORKERS: &str = "workers";
