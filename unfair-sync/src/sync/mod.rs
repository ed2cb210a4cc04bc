//! Blocking lock primitives.
//!
//! This module wraps the platform's native mutexes in owned handles with
//! an explicit allocate/use/deallocate lifecycle.
//!
//! The current primitives include:
//! - [`UnfairLock`] — a non-reentrant lock with an ownership assertion.
//! - [`UnfairRecursiveLock`] — a lock the owning thread may re-enter.
//!
//! ## Design notes
//!
//! - Neither lock carries data; both guard state the caller keeps
//!   elsewhere.
//! - Dropping a handle deallocates it exactly once.
//! - Both locks track their owning thread so that misuse is reported as a
//!   [`LockViolation`](crate::LockViolation) panic.
//! - No fairness is promised: the platform scheduler decides which waiter
//!   acquires the lock next.
//!
//! Handles are `Send + Sync` and are shared between threads with `Arc`,
//! scoped threads, or statics.

mod owner;
mod recursive;
mod unfair;

pub mod census;

pub use recursive::{UnfairRecursiveLock, UnfairRecursiveLockGuard};
pub use unfair::{UnfairLock, UnfairLockGuard};
