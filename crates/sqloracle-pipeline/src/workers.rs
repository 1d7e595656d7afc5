//! Worker-count selection.

use std::num::NonZeroUsize;

/// Logical CPUs available to this process, at least 1.
pub fn host_parallelism() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

/// Oracle calls mostly wait on a subprocess or a socket, so the pool
/// oversubscribes the host: `2p - 1`, never fewer than two.
pub fn default_worker_count(parallelism: usize) -> usize {
    (parallelism.saturating_mul(2).saturating_sub(1)).max(2)
}

/// Workers for a backlog of `backlog` statements on a host with
/// `parallelism` CPUs.
///
/// An explicit override wins but is clamped to `[1, 3p]`; 0 means "not
/// given". The result never exceeds the backlog.
pub fn resolve_worker_count(requested: Option<usize>, backlog: usize, parallelism: usize) -> usize {
    let parallelism = parallelism.max(1);
    let workers = match requested.filter(|n| *n > 0) {
        Some(n) => n.clamp(1, parallelism.saturating_mul(3)),
        None => default_worker_count(parallelism),
    };
    workers.min(backlog.max(1))
}
