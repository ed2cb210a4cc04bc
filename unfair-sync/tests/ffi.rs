#![cfg(feature = "ffi")]

mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use unfair_sync::ffi::*;

#[test]
fn test_unfair_lock_lifecycle() {
    common::init_tracing();

    let handle = unfair_sync_unfair_lock_alloc();

    unsafe {
        unfair_sync_unfair_lock_lock(handle);
        unfair_sync_unfair_lock_assert_owner(handle);
        unfair_sync_unfair_lock_unlock(handle);
        unfair_sync_unfair_lock_dealloc(handle);
    }
}

#[test]
fn test_unfair_lock_handle_shared_between_threads() {
    let handle = unfair_sync_unfair_lock_alloc();
    let inside = AtomicUsize::new(0);

    thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| {
                for _ in 0..1_000 {
                    unsafe { unfair_sync_unfair_lock_lock(handle) };
                    assert_eq!(inside.fetch_add(1, Ordering::SeqCst), 0);
                    inside.fetch_sub(1, Ordering::SeqCst);
                    unsafe { unfair_sync_unfair_lock_unlock(handle) };
                }
            });
        }
    });

    unsafe { unfair_sync_unfair_lock_dealloc(handle) };
}

#[test]
fn test_recursive_lock_lifecycle() {
    let handle = unfair_sync_recursive_lock_alloc();

    unsafe {
        unfair_sync_recursive_lock_lock(handle);
        unfair_sync_recursive_lock_lock(handle);
        unfair_sync_recursive_lock_unlock(handle);
        unfair_sync_recursive_lock_unlock(handle);
        unfair_sync_recursive_lock_dealloc(handle);
    }
}

#[test]
fn test_identifiers_through_c_abi() {
    let first = unfair_sync_next_identifier();
    let second = unfair_sync_next_identifier();

    assert!(second > first);
}
