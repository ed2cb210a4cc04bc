//! # unfair-sync
//!
//! **unfair-sync** provides the two low-level building blocks a host
//! environment needs but cannot express natively:
//!
//! - a process-wide source of **unique identifiers**, and
//! - two **blocking locks** over the platform's native mutex: a
//!   non-reentrant [`UnfairLock`] and a reentrant [`UnfairRecursiveLock`].
//!
//! The locks do not implement synchronization themselves. Each is a thin
//! facade over the primitive the platform provides (`os_unfair_lock` on
//! Apple targets, `pthread_mutex_t` on other unix targets, `SRWLOCK` and
//! `CRITICAL_SECTION` on Windows) plus the bookkeeping needed to turn
//! misuse into a loud failure.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use std::thread;
//! use unfair_sync::{UnfairLock, next_identifier};
//!
//! let id = next_identifier();
//!
//! let lock = Arc::new(UnfairLock::allocate());
//! let worker = {
//!     let lock = lock.clone();
//!     thread::spawn(move || lock.with(|| id + 1))
//! };
//!
//! assert_eq!(worker.join().unwrap(), id + 1);
//! ```
//!
//! ## Contract violations
//!
//! Nothing here returns a recoverable error. Re-entering an
//! [`UnfairLock`], unlocking a lock the thread does not hold, or dropping
//! a held lock panics with a [`LockViolation`] message. Through the C
//! interface in [`ffi`] the same violations abort the process.
//!
//! ## Modules
//!
//! - [`sync`] — Lock handles, guards, and live-handle accounting
//! - [`ffi`] — `extern "C"` entry points over opaque handles (feature `ffi`)
//!
//! ## Logging
//!
//! Events are emitted through [`tracing`]: allocation and deallocation at
//! `trace` level, violations at `error`. No subscriber is installed.

mod error;
mod identifier;
mod sys;

pub mod sync;

#[cfg(feature = "ffi")]
pub mod ffi;

pub use error::LockViolation;
pub use identifier::{Identifier, next_identifier};
pub use sync::{UnfairLock, UnfairLockGuard, UnfairRecursiveLock, UnfairRecursiveLockGuard};
