use libc::{
    PTHREAD_MUTEX_INITIALIZER, PTHREAD_MUTEX_NORMAL, PTHREAD_MUTEX_RECURSIVE, c_int,
    pthread_mutex_destroy, pthread_mutex_init, pthread_mutex_lock, pthread_mutex_t,
    pthread_mutex_unlock, pthread_mutexattr_destroy, pthread_mutexattr_init,
    pthread_mutexattr_settype, pthread_mutexattr_t,
};
use std::cell::UnsafeCell;
use std::io;
use std::mem::MaybeUninit;

/// Converts a pthread return code into an `io::Result`.
///
/// The pthread family reports failures through its return value
/// rather than `errno`.
fn cvt(rc: c_int) -> io::Result<()> {
    if rc == 0 {
        Ok(())
    } else {
        Err(io::Error::from_raw_os_error(rc))
    }
}

/// Initializes `mutex` in place with the given pthread mutex type.
///
/// # Safety
///
/// `mutex` must point to writable storage that will not move for as
/// long as the mutex is in use.
unsafe fn sys_mutex_init(mutex: *mut pthread_mutex_t, kind: c_int) -> io::Result<()> {
    let mut attr = MaybeUninit::<pthread_mutexattr_t>::uninit();

    cvt(unsafe { pthread_mutexattr_init(attr.as_mut_ptr()) })?;

    let rc = unsafe { pthread_mutexattr_settype(attr.as_mut_ptr(), kind) };
    if rc != 0 {
        unsafe { pthread_mutexattr_destroy(attr.as_mut_ptr()) };
        return cvt(rc);
    }

    let rc = unsafe { pthread_mutex_init(mutex, attr.as_ptr()) };
    unsafe { pthread_mutexattr_destroy(attr.as_mut_ptr()) };

    cvt(rc)
}

/// Heap storage for a `pthread_mutex_t`.
///
/// A pthread mutex must not be moved once initialized, so it is only ever
/// handed out boxed.
struct MutexCell(UnsafeCell<pthread_mutex_t>);

impl MutexCell {
    fn boxed(kind: c_int) -> io::Result<Box<Self>> {
        let cell = Box::new(Self(UnsafeCell::new(PTHREAD_MUTEX_INITIALIZER)));
        unsafe { sys_mutex_init(cell.0.get(), kind)? };

        Ok(cell)
    }

    fn lock(&self) -> io::Result<()> {
        cvt(unsafe { pthread_mutex_lock(self.0.get()) })
    }

    fn unlock(&self) -> io::Result<()> {
        cvt(unsafe { pthread_mutex_unlock(self.0.get()) })
    }
}

impl Drop for MutexCell {
    fn drop(&mut self) {
        let rc = unsafe { pthread_mutex_destroy(self.0.get()) };
        debug_assert_eq!(rc, 0, "pthread_mutex_destroy failed");
    }
}

/// A `PTHREAD_MUTEX_NORMAL` mutex.
///
/// Used as the unfair lock on unix targets without `os_unfair_lock`.
/// Relocking from the owning thread deadlocks at this level.
#[cfg_attr(target_vendor = "apple", allow(dead_code))]
pub(crate) struct PthreadMutex {
    cell: Box<MutexCell>,
}

#[cfg_attr(target_vendor = "apple", allow(dead_code))]
impl PthreadMutex {
    pub(crate) fn new() -> io::Result<Self> {
        Ok(Self {
            cell: MutexCell::boxed(PTHREAD_MUTEX_NORMAL)?,
        })
    }

    pub(crate) fn lock(&self) -> io::Result<()> {
        self.cell.lock()
    }

    pub(crate) fn unlock(&self) -> io::Result<()> {
        self.cell.unlock()
    }
}

/// A `PTHREAD_MUTEX_RECURSIVE` mutex.
///
/// The owning thread may lock it again without blocking; it is released
/// to other threads after a matching number of unlocks.
pub(crate) struct PthreadRecursiveMutex {
    cell: Box<MutexCell>,
}

impl PthreadRecursiveMutex {
    pub(crate) fn new() -> io::Result<Self> {
        Ok(Self {
            cell: MutexCell::boxed(PTHREAD_MUTEX_RECURSIVE)?,
        })
    }

    pub(crate) fn lock(&self) -> io::Result<()> {
        self.cell.lock()
    }

    pub(crate) fn unlock(&self) -> io::Result<()> {
        self.cell.unlock()
    }
}

// Safety: pthread mutexes are designed to be shared between threads;
// the cell is only accessed through the pthread API.
unsafe impl Send for MutexCell {}
unsafe impl Sync for MutexCell {}
