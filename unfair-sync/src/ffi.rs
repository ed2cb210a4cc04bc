//! C calling convention for hosts that cannot hold Rust values.
//!
//! Each lock is passed across the boundary as a `#[repr(C)]` struct
//! wrapping one non-null opaque pointer. The host owns the handle: it
//! must call the matching `dealloc` exactly once and must not use the
//! handle afterwards.
//!
//! A contract violation panics inside an `extern "C"` function, which
//! cannot unwind, so the process aborts.
//!
//! ```c
//! UnfairSyncUnfairLock lock = unfair_sync_unfair_lock_alloc();
//! unfair_sync_unfair_lock_lock(lock);
//! unfair_sync_unfair_lock_assert_owner(lock);
//! unfair_sync_unfair_lock_unlock(lock);
//! unfair_sync_unfair_lock_dealloc(lock);
//! ```

use crate::identifier::next_identifier;
use crate::sync::{UnfairLock, UnfairRecursiveLock};

use std::ffi::c_void;
use std::ptr::NonNull;

/// Opaque handle to a heap-allocated [`UnfairLock`].
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnfairLockHandle {
    opaque: NonNull<c_void>,
}

impl UnfairLockHandle {
    fn into_handle(lock: UnfairLock) -> Self {
        Self {
            opaque: NonNull::from(Box::leak(Box::new(lock))).cast(),
        }
    }

    /// # Safety
    ///
    /// The handle must come from [`unfair_sync_unfair_lock_alloc`] and must
    /// not have been deallocated.
    unsafe fn as_lock<'a>(self) -> &'a UnfairLock {
        unsafe { self.opaque.cast::<UnfairLock>().as_ref() }
    }
}

/// Opaque handle to a heap-allocated [`UnfairRecursiveLock`].
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnfairRecursiveLockHandle {
    opaque: NonNull<c_void>,
}

impl UnfairRecursiveLockHandle {
    fn into_handle(lock: UnfairRecursiveLock) -> Self {
        Self {
            opaque: NonNull::from(Box::leak(Box::new(lock))).cast(),
        }
    }

    /// # Safety
    ///
    /// The handle must come from [`unfair_sync_recursive_lock_alloc`] and
    /// must not have been deallocated.
    unsafe fn as_lock<'a>(self) -> &'a UnfairRecursiveLock {
        unsafe { self.opaque.cast::<UnfairRecursiveLock>().as_ref() }
    }
}

// Safety: the handles point at `Sync` locks.
unsafe impl Send for UnfairLockHandle {}
unsafe impl Sync for UnfairLockHandle {}
unsafe impl Send for UnfairRecursiveLockHandle {}
unsafe impl Sync for UnfairRecursiveLockHandle {}

#[unsafe(no_mangle)]
pub extern "C" fn unfair_sync_next_identifier() -> u64 {
    next_identifier()
}

/// Allocates an unfair lock. Release it with
/// [`unfair_sync_unfair_lock_dealloc`].
#[unsafe(no_mangle)]
pub extern "C" fn unfair_sync_unfair_lock_alloc() -> UnfairLockHandle {
    UnfairLockHandle::into_handle(UnfairLock::allocate())
}

/// # Safety
///
/// `handle` must be live.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn unfair_sync_unfair_lock_lock(handle: UnfairLockHandle) {
    unsafe { handle.as_lock() }.lock();
}

/// # Safety
///
/// `handle` must be live.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn unfair_sync_unfair_lock_unlock(handle: UnfairLockHandle) {
    unsafe { handle.as_lock() }.unlock();
}

/// Aborts unless the calling thread holds the lock.
///
/// # Safety
///
/// `handle` must be live.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn unfair_sync_unfair_lock_assert_owner(handle: UnfairLockHandle) {
    unsafe { handle.as_lock() }.assert_owner();
}

/// # Safety
///
/// `handle` must be live, unlocked, and not used by any other thread.
/// It is dangling once this returns.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn unfair_sync_unfair_lock_dealloc(handle: UnfairLockHandle) {
    let lock = unsafe { Box::from_raw(handle.opaque.cast::<UnfairLock>().as_ptr()) };
    lock.deallocate();
}

/// Allocates a recursive lock. Release it with
/// [`unfair_sync_recursive_lock_dealloc`].
#[unsafe(no_mangle)]
pub extern "C" fn unfair_sync_recursive_lock_alloc() -> UnfairRecursiveLockHandle {
    UnfairRecursiveLockHandle::into_handle(UnfairRecursiveLock::allocate())
}

/// # Safety
///
/// `handle` must be live.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn unfair_sync_recursive_lock_lock(handle: UnfairRecursiveLockHandle) {
    unsafe { handle.as_lock() }.lock();
}

/// # Safety
///
/// `handle` must be live.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn unfair_sync_recursive_lock_unlock(handle: UnfairRecursiveLockHandle) {
    unsafe { handle.as_lock() }.unlock();
}

/// # Safety
///
/// `handle` must be live, unlocked, and not used by any other thread.
/// It is dangling once this returns.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn unfair_sync_recursive_lock_dealloc(handle: UnfairRecursiveLockHandle) {
    let lock = unsafe { Box::from_raw(handle.opaque.cast::<UnfairRecursiveLock>().as_ptr()) };
    lock.deallocate();
}
