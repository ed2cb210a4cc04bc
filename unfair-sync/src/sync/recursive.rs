use crate::error::{self, LockViolation, fatal};
use crate::sync::census::RECURSIVE_LOCKS;
use crate::sync::owner::{Operation, OwnerSlot};
use crate::sys::RawRecursiveMutex;

use std::fmt;
use std::marker::PhantomData;
use std::mem::ManuallyDrop;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

const NAME: &str = "UnfairRecursiveLock";

/// A reentrant lock over the platform's recursive mutex.
///
/// The owning thread may call [`lock`](Self::lock) again without blocking.
/// Each acquisition increments a recursion depth, and the lock becomes
/// available to other threads only once [`unlock`](Self::unlock) has been
/// called the same number of times.
///
/// # Panics
///
/// Panics with a [`LockViolation`] message when unlocked by a thread that
/// does not hold it, when unlocked more times than locked, or when dropped
/// while held.
///
/// # Examples
///
/// ```rust
/// use unfair_sync::UnfairRecursiveLock;
///
/// let lock = UnfairRecursiveLock::allocate();
/// lock.lock();
/// lock.lock();
/// assert_eq!(lock.depth(), 2);
/// lock.unlock();
/// lock.unlock();
/// lock.deallocate();
/// ```
pub struct UnfairRecursiveLock {
    raw: ManuallyDrop<RawRecursiveMutex>,
    owner: OwnerSlot,

    /// Nesting depth of the current owner.
    ///
    /// Only read or written by the thread holding the lock.
    depth: AtomicUsize,
}

impl UnfairRecursiveLock {
    /// Allocates a new, unlocked lock.
    pub fn allocate() -> Self {
        let lock = Self {
            raw: ManuallyDrop::new(error::platform(NAME, RawRecursiveMutex::new())),
            owner: OwnerSlot::new(),
            depth: AtomicUsize::new(0),
        };

        let live = RECURSIVE_LOCKS.allocated();
        tracing::trace!(live, "recursive lock allocated");

        lock
    }

    /// Same as [`allocate`](Self::allocate).
    pub fn new() -> Self {
        Self::allocate()
    }

    /// Acquires the lock, or deepens the current thread's hold on it.
    ///
    /// Blocks only when another thread holds the lock.
    #[track_caller]
    pub fn lock(&self) {
        error::platform(NAME, self.raw.lock());

        if self.owner.is_current() {
            self.depth.fetch_add(1, Ordering::Relaxed);
        } else {
            self.owner.claim();
            self.depth.store(1, Ordering::Relaxed);
        }
    }

    /// Releases one level of the current thread's hold.
    ///
    /// The final matching call makes the lock available to other threads.
    ///
    /// # Panics
    ///
    /// Panics if the current thread does not hold the lock.
    #[track_caller]
    pub fn unlock(&self) {
        self.owner.ensure_current(NAME, Operation::Unlock);

        let depth = self.depth.load(Ordering::Relaxed) - 1;
        self.depth.store(depth, Ordering::Relaxed);
        if depth == 0 {
            self.owner.release();
        }

        error::platform(NAME, self.raw.unlock());
    }

    /// Returns how many times the current thread has acquired the lock
    /// without releasing it, or `0` if it does not hold the lock.
    pub fn depth(&self) -> usize {
        if self.owner.is_current() {
            self.depth.load(Ordering::Relaxed)
        } else {
            0
        }
    }

    /// Locks and returns a guard that releases one level when dropped.
    #[track_caller]
    pub fn guard(&self) -> UnfairRecursiveLockGuard<'_> {
        self.lock();

        UnfairRecursiveLockGuard {
            lock: self,
            _not_send: PhantomData,
        }
    }

    /// Runs `body` while holding the lock.
    ///
    /// `body` may itself call `with` on the same lock.
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

impl Default for UnfairRecursiveLock {
    fn default() -> Self {
        Self::allocate()
    }
}

impl fmt::Debug for UnfairRecursiveLock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnfairRecursiveLock")
            .field("locked", &self.owner.is_held())
            .finish_non_exhaustive()
    }
}

impl Drop for UnfairRecursiveLock {
    fn drop(&mut self) {
        if self.owner.is_held() {
            if thread::panicking() {
                tracing::warn!("leaking recursive lock held during unwind");
                return;
            }

            fatal(LockViolation::DeallocatedWhileLocked { lock: NAME });
        }

        unsafe { ManuallyDrop::drop(&mut self.raw) };

        let live = RECURSIVE_LOCKS.deallocated();
        tracing::trace!(live, "recursive lock deallocated");
    }
}

/// Guard returned by [`UnfairRecursiveLock::guard`].
#[must_use = "the lock is released as soon as the guard is dropped"]
pub struct UnfairRecursiveLockGuard<'a> {
    lock: &'a UnfairRecursiveLock,
    _not_send: PhantomData<*const ()>,
}

impl Drop for UnfairRecursiveLockGuard<'_> {
    fn drop(&mut self) {
        self.lock.unlock();
    }
}

impl fmt::Debug for UnfairRecursiveLockGuard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnfairRecursiveLockGuard")
            .finish_non_exhaustive()
    }
}
