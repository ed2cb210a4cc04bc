use crate::error::{self, LockViolation, fatal};
use crate::sync::census::UNFAIR_LOCKS;
use crate::sync::owner::{Operation, OwnerSlot};
use crate::sys::RawUnfairMutex;

use std::fmt;
use std::marker::PhantomData;
use std::mem::ManuallyDrop;
use std::thread;

const NAME: &str = "UnfairLock";

/// A non-reentrant lock over the platform's unfair mutex.
///
/// `UnfairLock` guards no data of its own: it is a pure synchronization
/// token for state the caller manages separately. Waiting threads are not
/// queued in arrival order, so a thread that just released the lock may
/// win it back ahead of older waiters.
///
/// The lock records its owning thread, which lets it turn misuse into a
/// loud failure instead of a deadlock or silent corruption.
///
/// # Panics
///
/// Every contract violation panics with a [`LockViolation`] message:
/// - [`lock`](Self::lock) from the thread that already holds it,
/// - [`unlock`](Self::unlock) or [`assert_owner`](Self::assert_owner)
///   from a thread that does not hold it,
/// - dropping the lock while it is held.
///
/// # Examples
///
/// ```rust
/// use unfair_sync::UnfairLock;
///
/// let lock = UnfairLock::allocate();
/// lock.lock();
/// lock.assert_owner();
/// lock.unlock();
/// lock.deallocate();
/// ```
pub struct UnfairLock {
    /// Platform primitive. Only dropped when the lock is released.
    raw: ManuallyDrop<RawUnfairMutex>,

    /// Thread currently holding the lock.
    owner: OwnerSlot,
}

impl UnfairLock {
    /// Allocates a new, unlocked lock.
    ///
    /// The platform primitive lives on the heap and keeps a stable address
    /// for the lifetime of the handle.
    pub fn allocate() -> Self {
        let lock = Self {
            raw: ManuallyDrop::new(error::platform(NAME, RawUnfairMutex::new())),
            owner: OwnerSlot::new(),
        };

        let live = UNFAIR_LOCKS.allocated();
        tracing::trace!(live, "unfair lock allocated");

        lock
    }

    /// Same as [`allocate`](Self::allocate).
    pub fn new() -> Self {
        Self::allocate()
    }

    /// Blocks the current thread until it holds the lock.
    ///
    /// # Panics
    ///
    /// Panics if the current thread already holds the lock.
    #[track_caller]
    pub fn lock(&self) {
        if self.owner.is_current() {
            fatal(LockViolation::Reentered { lock: NAME });
        }

        error::platform(NAME, self.raw.lock());
        self.owner.claim();
    }

    /// Releases the lock.
    ///
    /// # Panics
    ///
    /// Panics if the current thread does not hold the lock.
    #[track_caller]
    pub fn unlock(&self) {
        self.owner.ensure_current(NAME, Operation::Unlock);
        self.owner.release();

        error::platform(NAME, self.raw.unlock());
    }

    /// Checks that the current thread holds the lock.
    ///
    /// Has no effect on the lock state.
    ///
    /// # Panics
    ///
    /// Panics if the current thread does not hold the lock.
    #[track_caller]
    pub fn assert_owner(&self) {
        self.owner.ensure_current(NAME, Operation::AssertOwner);
    }

    /// Returns `true` if the current thread holds the lock.
    pub fn is_owned_by_current_thread(&self) -> bool {
        self.owner.is_current()
    }

    /// Locks and returns a guard that unlocks when dropped.
    #[track_caller]
    pub fn guard(&self) -> UnfairLockGuard<'_> {
        self.lock();

        UnfairLockGuard {
            lock: self,
            _not_send: PhantomData,
        }
    }

    /// Runs `body` while holding the lock.
    ///
    /// The lock is released when `body` returns or unwinds.
    pub fn with<R>(&self, body: impl FnOnce() -> R) -> R {
        let _guard = self.guard();
        body()
    }

    /// Releases the lock's resources.
    ///
    /// Equivalent to dropping the handle.
    ///
    /// # Panics
    ///
    /// Panics if the lock is held.
    pub fn deallocate(self) {
        drop(self);
    }
}

impl Default for UnfairLock {
    fn default() -> Self {
        Self::allocate()
    }
}

impl fmt::Debug for UnfairLock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnfairLock")
            .field("locked", &self.owner.is_held())
            .finish_non_exhaustive()
    }
}

impl Drop for UnfairLock {
    fn drop(&mut self) {
        if self.owner.is_held() {
            if thread::panicking() {
                // Destroying a held primitive is undefined; leak it instead.
                tracing::warn!("leaking unfair lock held during unwind");
                return;
            }

            fatal(LockViolation::DeallocatedWhileLocked { lock: NAME });
        }

        unsafe { ManuallyDrop::drop(&mut self.raw) };

        let live = UNFAIR_LOCKS.deallocated();
        tracing::trace!(live, "unfair lock deallocated");
    }
}

/// Guard returned by [`UnfairLock::guard`].
///
/// Unlocks the lock when dropped. The guard stays on the thread that
/// acquired it.
#[must_use = "the lock is released as soon as the guard is dropped"]
pub struct UnfairLockGuard<'a> {
    lock: &'a UnfairLock,
    _not_send: PhantomData<*const ()>,
}

impl Drop for UnfairLockGuard<'_> {
    fn drop(&mut self) {
        self.lock.unlock();
    }
}

impl fmt::Debug for UnfairLockGuard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnfairLockGuard").finish_non_exhaustive()
    }
}
