//! The default command: run every planned oracle over its backlog.

use std::io::{self, Write};
use std::time::Instant;

use anyhow::Result;
use sqloracle_core::config::SqloracleConfig;
use sqloracle_core::types::Language;
use sqloracle_oracles::PreparedOracle;
use sqloracle_pipeline::{
    host_parallelism, resolve_worker_count, run_pipeline, ConsoleProgress, NoProgress,
    PipelineOptions, ProgressObserver, RunSummary,
};
use sqloracle_storage::open_corpus;
use sqloracle_storage::queries::{oracles, statements};

use crate::plan::{PlannedRun, RunPlan};

/// Outcome of one planned run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    DryRun,
    NothingToDo,
    Completed(RunSummary),
}

pub fn execute(
    config: &SqloracleConfig,
    progress: bool,
    out: &mut dyn Write,
) -> Result<Vec<(PlannedRun, RunOutcome)>> {
    let plan = RunPlan::from_config(config)?;
    let mut outcomes = Vec::with_capacity(plan.runs.len());

    if config.run.effective_dry_run() {
        for run in plan.runs {
            announce(out, "would run", &run, plan.language)?;
            outcomes.push((run, RunOutcome::DryRun));
        }
        return Ok(outcomes);
    }

    let corpus = config.corpus.effective_path();
    let mut conn = open_corpus(&corpus)?;
    tracing::info!(corpus = %corpus.display(), runs = plan.runs.len(), "corpus opened");

    let options = PipelineOptions {
        workers: config.run.effective_parallelism(),
        batch_size: config.run.effective_batch_size(),
    };

    for run in plan.runs {
        announce(out, "running", &run, plan.language)?;
        let identity = oracles::derive_id(&conn, &run.name)?;
        let backlog = statements::read_all_unpredicted(&conn, plan.language, identity.id)?;
        if backlog.is_empty() {
            writeln!(out, "no unpredicted statements found for language {}", plan.language)?;
            outcomes.push((run, RunOutcome::NothingToDo));
            continue;
        }

        let workers = resolve_worker_count(options.workers, backlog.len(), host_parallelism());
        writeln!(out, "{} statements, {workers} workers", backlog.len())?;

        let prepared = PreparedOracle::prepare(run.kind, run.version, config)?;
        let console;
        let observer: &dyn ProgressObserver = if progress {
            console = ConsoleProgress::new(&run.name);
            &console
        } else {
            &NoProgress
        };

        let started = Instant::now();
        let summary = run_pipeline(
            prepared.oracle.as_ref(),
            &identity,
            plan.language,
            backlog,
            &mut conn,
            &options,
            observer,
        )?;
        drop(prepared);

        writeln!(
            out,
            "predicted {} statements ({} new, {} already present) in {:.1}s",
            summary.computed,
            summary.writer.rows_inserted,
            summary.writer.rows_skipped,
            started.elapsed().as_secs_f64()
        )?;
        outcomes.push((run, RunOutcome::Completed(summary)));
    }
    Ok(outcomes)
}

fn announce(out: &mut dyn Write, verb: &str, run: &PlannedRun, language: Language) -> io::Result<()> {
    writeln!(out, "{verb} oracle `{}` for @language={language}", run.name)
}
