//! Contract violations.
//!
//! Nothing in this crate returns a recoverable error. Misuse of a lock
//! (re-entering an unfair lock, unlocking from the wrong thread,
//! deallocating a held lock) means the caller's own invariants are
//! already broken, so every violation ends in [`fatal`].

use std::io;

use thiserror::Error;

/// A broken locking contract.
///
/// The `Display` text of each variant is the panic message produced when
/// the violation is raised, so tests can match on it with
/// `#[should_panic(expected = ...)]`.
#[derive(Debug, Error)]
pub enum LockViolation {
    /// The owning thread tried to acquire a non-reentrant lock again.
    #[error("{lock} re-entered by its owning thread")]
    Reentered { lock: &'static str },

    /// A thread other than the owner operated on a held lock.
    #[error("{lock} {operation} called by a thread that does not own it")]
    NotOwner {
        lock: &'static str,
        operation: &'static str,
    },

    /// The lock was unlocked while nobody held it.
    #[error("{lock} unlocked while not locked")]
    NotLocked { lock: &'static str },

    /// The lock was deallocated while still held.
    #[error("{lock} deallocated while locked")]
    DeallocatedWhileLocked { lock: &'static str },

    /// The platform primitive reported a failure.
    #[error("{lock} platform primitive failed: {source}")]
    Platform {
        lock: &'static str,
        #[source]
        source: io::Error,
    },
}

/// Logs `violation` and panics with its message.
///
/// When reached from an `extern "C"` entry point the panic cannot unwind
/// and the process aborts.
#[cold]
#[track_caller]
pub(crate) fn fatal(violation: LockViolation) -> ! {
    tracing::error!(%violation, "lock contract violated");
    panic!("{violation}");
}

/// Unwraps the result of a raw platform call, treating failure as fatal.
#[track_caller]
pub(crate) fn platform<T>(lock: &'static str, result: io::Result<T>) -> T {
    match result {
        Ok(value) => value,
        Err(source) => fatal(LockViolation::Platform { lock, source }),
    }
}
