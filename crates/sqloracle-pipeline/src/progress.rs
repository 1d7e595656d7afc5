//! Progress reporting.

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Told about persisted rows by the writer, after each flush.
pub trait ProgressObserver: Send + Sync {
    fn on_start(&self, total: usize);
    fn on_persisted(&self, rows: usize);
    fn on_finish(&self);
}

/// Reports nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn on_start(&self, _total: usize) {}
    fn on_persisted(&self, _rows: usize) {}
    fn on_finish(&self) {}
}

/// Counts persisted rows.
#[derive(Debug, Default)]
pub struct PersistedCounter {
    total: AtomicUsize,
    persisted: AtomicUsize,
    flushes: AtomicUsize,
}

impl PersistedCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total(&self) -> usize {
        self.total.load(Ordering::Relaxed)
    }

    pub fn persisted(&self) -> usize {
        self.persisted.load(Ordering::Relaxed)
    }

    pub fn flushes(&self) -> usize {
        self.flushes.load(Ordering::Relaxed)
    }
}

impl ProgressObserver for PersistedCounter {
    fn on_start(&self, total: usize) {
        self.total.store(total, Ordering::Relaxed);
    }

    fn on_persisted(&self, rows: usize) {
        self.persisted.fetch_add(rows, Ordering::Relaxed);
        self.flushes.fetch_add(1, Ordering::Relaxed);
    }

    fn on_finish(&self) {}
}

/// Single-line `persisted/total` counter redrawn on stderr.
#[derive(Debug)]
pub struct ConsoleProgress {
    label: String,
    counter: PersistedCounter,
    out: Mutex<()>,
}

impl ConsoleProgress {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            counter: PersistedCounter::new(),
            out: Mutex::new(()),
        }
    }

    fn render(&self, end: &str) {
        let Ok(_guard) = self.out.lock() else {
            return;
        };
        let total = self.counter.total();
        let done = self.counter.persisted();
        let pct = if total == 0 { 100 } else { done * 100 / total };
        let mut stderr = std::io::stderr().lock();
        let _ = write!(stderr, "\r{}: {done}/{total} ({pct}%){end}", self.label);
        let _ = stderr.flush();
    }
}

impl ProgressObserver for ConsoleProgress {
    fn on_start(&self, total: usize) {
        self.counter.on_start(total);
        self.render("");
    }

    fn on_persisted(&self, rows: usize) {
        self.counter.on_persisted(rows);
        self.render("");
    }

    fn on_finish(&self) {
        self.render("\n");
    }
}
