use crate::error::{LockViolation, fatal};

use std::sync::atomic::{AtomicUsize, Ordering};

/// An operation that requires the calling thread to hold the lock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Operation {
    Unlock,
    AssertOwner,
}

impl Operation {
    fn name(self) -> &'static str {
        match self {
            Operation::Unlock => "unlock",
            Operation::AssertOwner => "assert_owner",
        }
    }
}

/// Token stored in an [`OwnerSlot`] when no thread holds the lock.
const NO_OWNER: usize = 0;

thread_local! {
    /// Per-thread marker whose address identifies the thread.
    ///
    /// The address is non-null and unique among live threads.
    static MARKER: u8 = const { 0 };
}

/// Returns the calling thread's owner token.
pub(crate) fn current_thread_token() -> usize {
    MARKER.with(|marker| marker as *const u8 as usize)
}

/// Records which thread currently holds a lock.
///
/// The slot is written only by the thread holding the lock, so a thread
/// that reads its own token is guaranteed to be the owner. Relaxed
/// ordering is enough: the platform mutex orders everything else.
pub(crate) struct OwnerSlot {
    token: AtomicUsize,
}

impl OwnerSlot {
    pub(crate) const fn new() -> Self {
        Self {
            token: AtomicUsize::new(NO_OWNER),
        }
    }

    /// Returns `true` if the calling thread holds the lock.
    pub(crate) fn is_current(&self) -> bool {
        self.token.load(Ordering::Relaxed) == current_thread_token()
    }

    /// Returns `true` if any thread holds the lock.
    pub(crate) fn is_held(&self) -> bool {
        self.token.load(Ordering::Relaxed) != NO_OWNER
    }

    /// Marks the calling thread as owner. Must follow a successful acquire.
    pub(crate) fn claim(&self) {
        self.token.store(current_thread_token(), Ordering::Relaxed);
    }

    /// Clears the owner. Must precede the platform release.
    pub(crate) fn release(&self) {
        self.token.store(NO_OWNER, Ordering::Relaxed);
    }

    /// Raises a fatal violation unless the calling thread is the owner.
    #[track_caller]
    pub(crate) fn ensure_current(&self, lock: &'static str, operation: Operation) {
        match (self.token.load(Ordering::Relaxed), operation) {
            (token, _) if token == current_thread_token() => {}
            (NO_OWNER, Operation::Unlock) => fatal(LockViolation::NotLocked { lock }),
            _ => fatal(LockViolation::NotOwner {
                lock,
                operation: operation.name(),
            }),
        }
    }
}
