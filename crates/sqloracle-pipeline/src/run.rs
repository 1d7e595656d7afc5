//! One prediction run over a backlog.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Instant;

use crossbeam_channel::{bounded, Receiver, Sender};
use rusqlite::Connection;
use sqloracle_core::errors::PipelineError;
use sqloracle_core::tracing::fields;
use sqloracle_core::types::{Language, OracleId, OracleIdentity, Statement};
use sqloracle_core::Oracle;
use sqloracle_storage::batch::DEFAULT_BATCH_SIZE;
use sqloracle_storage::{PredictionRow, PredictionWriter, WriterStats};

use crate::cancel::CancelFlag;
use crate::phase::{PhaseTracker, RunPhase};
use crate::progress::ProgressObserver;
use crate::workers::{host_parallelism, resolve_worker_count};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Explicit worker count; `None` derives it from the host.
    pub workers: Option<usize>,
    /// Rows per multi-row insert.
    pub batch_size: usize,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            workers: None,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub workers: usize,
    /// Oracle calls that returned a prediction.
    pub computed: usize,
    pub writer: WriterStats,
    pub phase: RunPhase,
}

/// Holds the first error of a run; later ones are logged and dropped.
struct FirstError {
    slot: Mutex<Option<PipelineError>>,
    cancel: CancelFlag,
}

impl FirstError {
    fn new(cancel: CancelFlag) -> Self {
        Self {
            slot: Mutex::new(None),
            cancel,
        }
    }

    fn record(&self, error: PipelineError) {
        if self.cancel.cancel() {
            tracing::debug!("cancelling run");
        }
        match self.slot.lock() {
            Ok(mut slot) if slot.is_none() => {
                tracing::error!(error = %error, "run aborted");
                *slot = Some(error);
            }
            _ => tracing::debug!(error = %error, "suppressed follow-up error"),
        }
    }

    fn take(&self) -> Option<PipelineError> {
        match self.slot.lock() {
            Ok(mut slot) => slot.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        }
    }
}

/// Sends the worker's done token when the worker exits, panicking or not.
/// The output sender is released first, so the coordinator's count of
/// tokens also bounds the live output senders.
struct DoneGuard {
    output: Option<Sender<PredictionRow>>,
    done: Sender<()>,
    cancel: CancelFlag,
}

impl Drop for DoneGuard {
    fn drop(&mut self) {
        drop(self.output.take());
        if std::thread::panicking() && self.cancel.cancel() {
            tracing::warn!("worker panicked, cancelling run");
        }
        let _ = self.done.send(());
    }
}

/// Predict every statement in `statements` with `oracle` and persist the
/// results under `identity` in one transaction on `conn`.
///
/// On success every statement has exactly one row for
/// `(statement, identity.id, language)`; rows that already existed are
/// skipped. On failure nothing from this run is committed and the first
/// error is returned.
pub fn run_pipeline<O: Oracle + ?Sized>(
    oracle: &O,
    identity: &OracleIdentity,
    language: Language,
    statements: Vec<Statement>,
    conn: &mut Connection,
    options: &PipelineOptions,
    progress: &dyn ProgressObserver,
) -> Result<RunSummary, PipelineError> {
    let phase = PhaseTracker::new();
    let total = statements.len();
    let span = tracing::info_span!(
        "run_pipeline",
        oracle = %identity.name,
        oracle_id = identity.id.get(),
        language = %language,
        backlog = total,
        workers = tracing::field::Empty,
    );
    let _entered = span.enter();

    if total == 0 {
        phase.advance(RunPhase::Done);
        tracing::info!("backlog empty, nothing to predict");
        return Ok(RunSummary {
            workers: 0,
            computed: 0,
            writer: WriterStats::default(),
            phase: phase.get(),
        });
    }

    let workers = resolve_worker_count(options.workers, total, host_parallelism());
    span.record(fields::WORKERS, workers);
    let started = Instant::now();
    let cancel = CancelFlag::new();
    let first_error = FirstError::new(cancel.clone());
    let computed = AtomicUsize::new(0);
    let oracle_id = identity.id;

    // Inputs hold one statement per worker so dispatch stays just ahead of
    // the workers. Outputs can hold the whole backlog, so a worker never
    // blocks on the writer and the writer can stop reading on error without
    // stranding one.
    let (input_tx, input_rx) = bounded::<Statement>(workers);
    let (output_tx, output_rx) = bounded::<PredictionRow>(total);
    let (done_tx, done_rx) = bounded::<()>(workers);

    progress.on_start(total);
    tracing::info!(batch_size = options.batch_size, "run started");

    let writer_result = std::thread::scope(|scope| {
        let writer = {
            let cancel = cancel.clone();
            let first_error = &first_error;
            let batch_size = options.batch_size;
            std::thread::Builder::new()
                .name("sqloracle-writer".into())
                .spawn_scoped(scope, move || {
                    write_all(conn, batch_size, output_rx, &cancel, first_error, progress)
                })
        };
        let writer = match writer {
            Ok(handle) => handle,
            Err(source) => {
                first_error.record(PipelineError::SpawnFailed {
                    role: "writer",
                    source,
                });
                return None;
            }
        };

        let mut handles = Vec::with_capacity(workers);
        for index in 0..workers {
            let guard = DoneGuard {
                output: Some(output_tx.clone()),
                done: done_tx.clone(),
                cancel: cancel.clone(),
            };
            let input = input_rx.clone();
            let cancel = cancel.clone();
            let first_error = &first_error;
            let computed = &computed;
            let spawned = std::thread::Builder::new()
                .name(format!("sqloracle-worker-{index}"))
                .spawn_scoped(scope, move || {
                    predict_all(
                        index,
                        oracle,
                        oracle_id,
                        language,
                        input,
                        guard,
                        &cancel,
                        first_error,
                        computed,
                    )
                });
            match spawned {
                Ok(handle) => handles.push(handle),
                Err(source) => {
                    first_error.record(PipelineError::SpawnFailed {
                        role: "worker",
                        source,
                    });
                    break;
                }
            }
        }
        drop(input_rx);
        drop(done_tx);

        phase.advance(RunPhase::Dispatching);
        let mut dispatched = 0usize;
        for statement in statements {
            if cancel.is_cancelled() || input_tx.send(statement).is_err() {
                tracing::warn!(dispatched, "run cancelled, dispatch stopped");
                break;
            }
            dispatched += 1;
        }
        drop(input_tx);
        phase.advance(RunPhase::Computing);

        // Two-phase shutdown: every guard releases its output sender before
        // its done sender, so once the done channel disconnects only the
        // coordinator's output sender is left. A guard whose thread failed to
        // spawn is dropped with its closure and counts the same way.
        while done_rx.recv().is_ok() {}
        phase.advance(RunPhase::Draining);
        drop(output_tx);

        for handle in handles {
            if handle.join().is_err() {
                first_error.record(PipelineError::WorkerPanicked { role: "worker" });
            }
        }

        phase.advance(RunPhase::Flushing);
        match writer.join() {
            Ok(stats) => stats,
            Err(_) => {
                first_error.record(PipelineError::WorkerPanicked { role: "writer" });
                None
            }
        }
    });

    if let Some(error) = first_error.take() {
        return Err(error);
    }
    let Some(stats) = writer_result else {
        return Err(PipelineError::WorkerPanicked { role: "writer" });
    };

    phase.advance(RunPhase::Done);
    progress.on_finish();
    let computed = computed.load(Ordering::Relaxed);
    tracing::info!(
        workers,
        computed,
        inserted = stats.rows_inserted,
        skipped = stats.rows_skipped,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "run committed"
    );
    Ok(RunSummary {
        workers,
        computed,
        writer: stats,
        phase: phase.get(),
    })
}

#[allow(clippy::too_many_arguments)]
fn predict_all<O: Oracle + ?Sized>(
    index: usize,
    oracle: &O,
    oracle_id: OracleId,
    language: Language,
    input: Receiver<Statement>,
    guard: DoneGuard,
    cancel: &CancelFlag,
    first_error: &FirstError,
    computed: &AtomicUsize,
) {
    let span = tracing::debug_span!("worker", worker = index);
    let _entered = span.enter();
    let mut handled = 0usize;

    while !cancel.is_cancelled() {
        let Ok(statement) = input.recv() else {
            break;
        };
        match oracle.predict(&statement, language) {
            Ok(prediction) => {
                computed.fetch_add(1, Ordering::Relaxed);
                handled += 1;
                let row = PredictionRow::new(oracle_id, prediction);
                let sent = guard.output.as_ref().map(|out| out.send(row).is_ok());
                if sent != Some(true) {
                    break;
                }
            }
            Err(e) => {
                tracing::warn!(statement_id = statement.id.get(), error = %e, "oracle call failed");
                first_error.record(e.into());
                break;
            }
        }
    }
    tracing::debug!(handled, "worker finished");
    drop(guard);
}

/// Writer routine. Returns `None` when the run was cancelled, leaving the
/// transaction to roll back.
fn write_all(
    conn: &mut Connection,
    batch_size: usize,
    output: Receiver<PredictionRow>,
    cancel: &CancelFlag,
    first_error: &FirstError,
    progress: &dyn ProgressObserver,
) -> Option<WriterStats> {
    let mut writer = match PredictionWriter::begin(conn, batch_size) {
        Ok(w) => w,
        Err(e) => {
            first_error.record(e.into());
            return None;
        }
    };

    for row in output.iter() {
        if cancel.is_cancelled() {
            return None;
        }
        match writer.push(row) {
            Ok(Some(flushed)) => progress.on_persisted(flushed),
            Ok(None) => {}
            Err(e) => {
                first_error.record(e.into());
                return None;
            }
        }
    }
    if cancel.is_cancelled() {
        return None;
    }

    match writer.flush() {
        Ok(0) => {}
        Ok(flushed) => progress.on_persisted(flushed),
        Err(e) => {
            first_error.record(e.into());
            return None;
        }
    }
    match writer.commit() {
        Ok(stats) => Some(stats),
        Err(e) => {
            first_error.record(e.into());
            None
        }
    }
}
