//! Invocation counter cell.
//!
//! The count is the escalator's only state. Two disciplines are available so
//! callers pick the concurrency semantics deliberately:
//!
//! - [`SerializedCounter`]: one atomic read-modify-write per call. N calls
//!   always end at N.
//! - [`RacyCounter`]: load and store are separate steps, so concurrent calls
//!   can read the same value and one increment is lost. Useful for
//!   fault-injection runs.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::config::CounterDiscipline;

/// A monotonically increasing, never-reset invocation counter.
pub trait InvocationCounter: Send + Sync + std::fmt::Debug {
    /// Increment and return the count after incrementing.
    fn advance(&self) -> u64;

    /// Current count without incrementing.
    fn current(&self) -> u64;
}

/// Build the counter for a configured discipline, starting at zero.
pub fn counter_for(discipline: CounterDiscipline) -> Arc<dyn InvocationCounter> {
    match discipline {
        CounterDiscipline::Serialized => Arc::new(SerializedCounter::default()),
        CounterDiscipline::Racy => Arc::new(RacyCounter::default()),
    }
}

/// Atomic read-modify-write counter. Every call observes a distinct count.
#[derive(Debug, Default)]
pub struct SerializedCounter {
    count: AtomicU64,
}

impl InvocationCounter for SerializedCounter {
    fn advance(&self) -> u64 {
        let previous = self
            .count
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| Some(n.saturating_add(1)))
            .unwrap_or_else(|n| n);
        previous.saturating_add(1)
    }

    fn current(&self) -> u64 {
        self.count.load(Ordering::SeqCst)
    }
}

/// Separate load and store. Concurrent calls can observe the same count
/// and lose increments.
#[derive(Debug, Default)]
pub struct RacyCounter {
    count: AtomicU64,
}

impl InvocationCounter for RacyCounter {
    fn advance(&self) -> u64 {
        let seen = self.count.load(Ordering::Relaxed);
        // Widen the window between read and write.
        std::thread::yield_now();
        let next = seen.saturating_add(1);
        self.count.store(next, Ordering::Relaxed);
        next
    }

    fn current(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }
}
