//! Live handle accounting.
//!
//! Every lock allocation increments a process-wide counter and every
//! deallocation decrements it. Comparing the counters before and after a
//! workload shows whether any handle was leaked.
//!
//! A handle is counted until its platform primitive is freed. A lock
//! dropped while held during unwinding leaks its primitive and therefore
//! stays counted.

use std::sync::atomic::{AtomicUsize, Ordering};

pub(crate) static UNFAIR_LOCKS: Census = Census::new();
pub(crate) static RECURSIVE_LOCKS: Census = Census::new();

/// A counter of live handles of one kind.
pub(crate) struct Census {
    live: AtomicUsize,
}

impl Census {
    const fn new() -> Self {
        Self {
            live: AtomicUsize::new(0),
        }
    }

    /// Records an allocation and returns the new live count.
    pub(crate) fn allocated(&self) -> usize {
        self.live.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Records a deallocation and returns the new live count.
    pub(crate) fn deallocated(&self) -> usize {
        self.live.fetch_sub(1, Ordering::Relaxed) - 1
    }

    fn live(&self) -> usize {
        self.live.load(Ordering::Relaxed)
    }
}

/// Number of [`UnfairLock`](crate::UnfairLock) handles currently allocated.
pub fn live_unfair_locks() -> usize {
    UNFAIR_LOCKS.live()
}

/// Number of [`UnfairRecursiveLock`](crate::UnfairRecursiveLock) handles
/// currently allocated.
pub fn live_recursive_locks() -> usize {
    RECURSIVE_LOCKS.live()
}
