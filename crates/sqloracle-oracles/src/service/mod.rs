//! Containerized database service lifecycle: start, wait until ready, stop.

pub mod compose;
pub mod readiness;

pub use compose::{ComposeService, RunningService};
pub use readiness::{poll_until_ready, ReadinessPolicy};
