//! The prediction pipeline.
//!
//! One run takes the backlog for a single `(oracle, language)` pair, fans it
//! out to a pool of workers calling the oracle, and funnels every prediction
//! into one writer that owns the run's transaction:
//!
//! ```text
//! dispatcher ──inputs──▶ worker × W ──outputs──▶ writer ──▶ corpus
//!                            │
//!                            └──done tokens──▶ coordinator
//! ```
//!
//! The coordinator closes the output channel only after all `W` done tokens
//! arrived, so no worker can ever send into a closed queue.

pub mod cancel;
pub mod phase;
pub mod progress;
pub mod run;
pub mod workers;

pub use cancel::CancelFlag;
pub use phase::{PhaseTracker, RunPhase};
pub use progress::{ConsoleProgress, NoProgress, PersistedCounter, ProgressObserver};
pub use run::{run_pipeline, PipelineOptions, RunSummary};
pub use workers::{default_worker_count, host_parallelism, resolve_worker_count};
