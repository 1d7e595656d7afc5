//! Run-wide cancellation flag.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared by the dispatcher, every worker and the writer of one run. Set by
/// whoever hits the first fatal error; the others poll it between
/// statements and stop taking work. It never resets, so a run that saw it
/// set can only roll back.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag {
    set: Arc<AtomicBool>,
}

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_cancelled(&self) -> bool {
        self.set.load(Ordering::Acquire)
    }

    /// Returns `true` only for the call that actually cancelled the run.
    pub fn cancel(&self) -> bool {
        !self.set.swap(true, Ordering::AcqRel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_first_cancel_reports_it() {
        let flag = CancelFlag::new();
        assert!(!flag.is_cancelled());
        assert!(flag.cancel());
        assert!(!flag.cancel());
        assert!(flag.is_cancelled());
    }

    #[test]
    fn clones_share_the_flag() {
        let flag = CancelFlag::new();
        let worker = flag.clone();
        let tripped = std::thread::spawn(move || worker.cancel()).join().unwrap();
        assert!(tripped);
        assert!(flag.is_cancelled());
        assert!(!flag.cancel());
    }
}
