//! Apple backend for the unfair lock.
//!
//! `os_unfair_lock` is the primitive the platform recommends for short
//! critical sections. Waiters are not queued in arrival order and the
//! kernel may hand the lock back to the thread that just released it.

use libc::{OS_UNFAIR_LOCK_INIT, os_unfair_lock, os_unfair_lock_lock, os_unfair_lock_unlock};
use std::cell::UnsafeCell;
use std::io;

/// A boxed `os_unfair_lock`.
///
/// The lock word must keep a stable address while in use, so it lives
/// on the heap.
pub(crate) struct OsUnfairLock {
    inner: Box<UnsafeCell<os_unfair_lock>>,
}

impl OsUnfairLock {
    /// Creates an unlocked `os_unfair_lock`. Never fails.
    pub(crate) fn new() -> io::Result<Self> {
        Ok(Self {
            inner: Box::new(UnsafeCell::new(OS_UNFAIR_LOCK_INIT)),
        })
    }

    pub(crate) fn lock(&self) -> io::Result<()> {
        unsafe { os_unfair_lock_lock(self.inner.get()) };
        Ok(())
    }

    pub(crate) fn unlock(&self) -> io::Result<()> {
        unsafe { os_unfair_lock_unlock(self.inner.get()) };
        Ok(())
    }
}

// Safety: `os_unfair_lock` is a thread-shared lock word manipulated only
// through its atomic API.
unsafe impl Send for OsUnfairLock {}
unsafe impl Sync for OsUnfairLock {}
