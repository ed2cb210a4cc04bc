//! Platform-specific mutex backends.
//!
//! This module provides a unified interface over the native mutual
//! exclusion primitive of each supported platform.
//!
//! Every backend exposes two types with identical method names:
//! - [`RawUnfairMutex`] — a non-reentrant, unfair mutex,
//! - [`RawRecursiveMutex`] — a mutex the owning thread may re-enter.
//!
//! The raw types perform no ownership bookkeeping. Contract checks live in
//! the safe wrappers of [`crate::sync`].
//!
//! The concrete implementation is selected at compile time
//! depending on the target operating system.

#[cfg(unix)]
mod unix;

#[cfg(target_vendor = "apple")]
mod darwin;

#[cfg(windows)]
mod windows;

#[cfg(target_vendor = "apple")]
pub(crate) type RawUnfairMutex = darwin::OsUnfairLock;

#[cfg(all(unix, not(target_vendor = "apple")))]
pub(crate) type RawUnfairMutex = unix::PthreadMutex;

#[cfg(unix)]
pub(crate) type RawRecursiveMutex = unix::PthreadRecursiveMutex;

#[cfg(windows)]
pub(crate) type RawUnfairMutex = windows::SrwLock;

#[cfg(windows)]
pub(crate) type RawRecursiveMutex = windows::CriticalSection;
