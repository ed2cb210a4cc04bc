//! Windows platform backend.
//!
//! This module mirrors the unix backend and exposes identical
//! method names and semantics.
//!
//! - The unfair lock is a slim reader/writer lock used in exclusive mode
//!   only. SRW locks make no fairness guarantee and need no teardown.
//! - The recursive lock is a `CRITICAL_SECTION`, which is reentrant for
//!   the owning thread.

use std::cell::UnsafeCell;
use std::io;
use std::mem;

use windows_sys::Win32::System::Threading::{
    AcquireSRWLockExclusive, CRITICAL_SECTION, DeleteCriticalSection, EnterCriticalSection,
    InitializeCriticalSection, LeaveCriticalSection, ReleaseSRWLockExclusive, SRWLOCK,
    SRWLOCK_INIT,
};

/// A boxed `SRWLOCK` acquired in exclusive mode only.
pub(crate) struct SrwLock {
    inner: Box<UnsafeCell<SRWLOCK>>,
}

impl SrwLock {
    /// Creates an unlocked SRW lock. Never fails.
    pub(crate) fn new() -> io::Result<Self> {
        Ok(Self {
            inner: Box::new(UnsafeCell::new(SRWLOCK_INIT)),
        })
    }

    pub(crate) fn lock(&self) -> io::Result<()> {
        unsafe { AcquireSRWLockExclusive(self.inner.get()) };
        Ok(())
    }

    pub(crate) fn unlock(&self) -> io::Result<()> {
        unsafe { ReleaseSRWLockExclusive(self.inner.get()) };
        Ok(())
    }
}

/// A boxed `CRITICAL_SECTION`.
///
/// A critical section must not be moved after `InitializeCriticalSection`
/// and must be released with `DeleteCriticalSection`.
pub(crate) struct CriticalSection {
    inner: Box<UnsafeCell<CRITICAL_SECTION>>,
}

impl CriticalSection {
    /// Creates and initializes a critical section.
    ///
    /// Since Windows Vista initialization cannot fail.
    pub(crate) fn new() -> io::Result<Self> {
        let section = Self {
            inner: Box::new(UnsafeCell::new(unsafe { mem::zeroed() })),
        };
        unsafe { InitializeCriticalSection(section.inner.get()) };

        Ok(section)
    }

    pub(crate) fn lock(&self) -> io::Result<()> {
        unsafe { EnterCriticalSection(self.inner.get()) };
        Ok(())
    }

    pub(crate) fn unlock(&self) -> io::Result<()> {
        unsafe { LeaveCriticalSection(self.inner.get()) };
        Ok(())
    }
}

impl Drop for CriticalSection {
    fn drop(&mut self) {
        unsafe { DeleteCriticalSection(self.inner.get()) };
    }
}

// Safety: both primitives are designed for cross-thread use and are only
// touched through the Win32 API.
unsafe impl Send for SrwLock {}
unsafe impl Sync for SrwLock {}
unsafe impl Send for CriticalSection {}
unsafe impl Sync for CriticalSection {}
