//! Run phases.

use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};

/// Where a run is. Phases only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum RunPhase {
    Idle = 0,
    /// Feeding statements to workers.
    Dispatching = 1,
    /// Everything dispatched; workers still predicting.
    Computing = 2,
    /// All workers done; the writer drains the output queue.
    Draining = 3,
    /// Final flush and commit.
    Flushing = 4,
    Done = 5,
}

impl RunPhase {
    fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Self::Idle,
            1 => Self::Dispatching,
            2 => Self::Computing,
            3 => Self::Draining,
            4 => Self::Flushing,
            _ => Self::Done,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Dispatching => "dispatching",
            Self::Computing => "computing",
            Self::Draining => "draining",
            Self::Flushing => "flushing",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Shared, monotonic phase cell.
#[derive(Debug, Default)]
pub struct PhaseTracker {
    phase: AtomicU8,
}

impl PhaseTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> RunPhase {
        RunPhase::from_u8(self.phase.load(Ordering::Acquire))
    }

    /// Move to `next` if it is later than the current phase. Returns whether
    /// the phase changed.
    pub fn advance(&self, next: RunPhase) -> bool {
        let prev = RunPhase::from_u8(self.phase.fetch_max(next as u8, Ordering::AcqRel));
        if prev < next {
            tracing::debug!(from = %prev, to = %next, "run phase");
            true
        } else {
            false
        }
    }
}
