mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;
use unfair_sync::{UnfairLock, UnfairRecursiveLock};

#[test]
fn test_lock_unlock_cycle() {
    common::init_tracing();

    let lock = UnfairLock::allocate();

    for _ in 0..100 {
        lock.lock();
        lock.assert_owner();
        lock.unlock();
    }

    lock.deallocate();
}

#[test]
fn test_never_two_owners() {
    common::init_tracing();

    let lock = Arc::new(UnfairLock::allocate());
    let inside = Arc::new(AtomicUsize::new(0));
    let total = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let lock = lock.clone();
            let inside = inside.clone();
            let total = total.clone();

            thread::spawn(move || {
                for _ in 0..1_000 {
                    lock.lock();

                    let before = inside.fetch_add(1, Ordering::SeqCst);
                    assert_eq!(before, 0, "two threads inside the critical section");
                    total.fetch_add(1, Ordering::Relaxed);
                    inside.fetch_sub(1, Ordering::SeqCst);

                    lock.unlock();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(total.load(Ordering::Relaxed), 8_000);
}

#[test]
fn test_contender_blocks_until_unlock() {
    let lock = Arc::new(UnfairLock::allocate());
    let acquired = Arc::new(AtomicBool::new(false));

    lock.lock();

    let contender = {
        let lock = lock.clone();
        let acquired = acquired.clone();

        thread::spawn(move || {
            lock.lock();
            acquired.store(true, Ordering::SeqCst);
            lock.unlock();
        })
    };

    thread::sleep(Duration::from_millis(50));
    assert!(
        !acquired.load(Ordering::SeqCst),
        "second lock must wait for the first unlock"
    );

    lock.unlock();
    contender.join().unwrap();

    assert!(acquired.load(Ordering::SeqCst));
}

#[test]
fn test_assert_owner_from_other_thread_is_fatal() {
    let lock = Arc::new(UnfairLock::allocate());
    lock.lock();

    let result = {
        let lock = lock.clone();
        thread::spawn(move || lock.assert_owner()).join()
    };

    assert!(result.is_err(), "assert_owner must fail on a non-owner");

    lock.assert_owner();
    lock.unlock();
}

#[test]
#[should_panic(expected = "UnfairLock assert_owner called by a thread that does not own it")]
fn test_assert_owner_on_unlocked_lock_is_fatal() {
    let lock = UnfairLock::allocate();
    lock.assert_owner();
}

#[test]
#[should_panic(expected = "UnfairLock re-entered by its owning thread")]
fn test_relock_by_owner_is_fatal() {
    let lock = UnfairLock::allocate();
    lock.lock();
    lock.lock();
}

#[test]
#[should_panic(expected = "UnfairLock unlocked while not locked")]
fn test_unlock_without_lock_is_fatal() {
    let lock = UnfairLock::allocate();
    lock.unlock();
}

#[test]
fn test_unlock_by_non_owner_is_fatal() {
    let lock = Arc::new(UnfairLock::allocate());
    lock.lock();

    let result = {
        let lock = lock.clone();
        thread::spawn(move || lock.unlock()).join()
    };

    let message = result.unwrap_err();
    let message = message.downcast_ref::<String>().unwrap();
    assert_eq!(
        message,
        "UnfairLock unlock called by a thread that does not own it"
    );

    assert!(lock.is_owned_by_current_thread());
    lock.unlock();
}

#[test]
#[should_panic(expected = "UnfairLock deallocated while locked")]
fn test_deallocate_while_locked_is_fatal() {
    let lock = UnfairLock::allocate();
    lock.lock();
    lock.deallocate();
}

#[test]
fn test_guard_releases_on_drop() {
    let lock = UnfairLock::allocate();

    {
        let _guard = lock.guard();
        assert!(lock.is_owned_by_current_thread());
    }

    assert!(!lock.is_owned_by_current_thread());
    lock.lock();
    lock.unlock();
}

#[test]
fn test_with_releases_on_unwind() {
    let lock = Arc::new(UnfairLock::allocate());

    let result = {
        let lock = lock.clone();
        thread::spawn(move || lock.with(|| -> u32 { panic!("boom") })).join()
    };
    assert!(result.is_err());

    let value = lock.with(|| {
        lock.assert_owner();
        7
    });
    assert_eq!(value, 7);
}

#[test]
fn test_debug_reports_lock_state() {
    let lock = UnfairLock::default();
    assert_eq!(format!("{lock:?}"), "UnfairLock { locked: false, .. }");

    lock.lock();
    assert_eq!(format!("{lock:?}"), "UnfairLock { locked: true, .. }");
    lock.unlock();
}

#[test]
fn test_held_locks_dropped_during_unwind_keep_original_panic() {
    common::init_tracing();

    let result: thread::Result<()> = thread::spawn(|| {
        let unfair = UnfairLock::allocate();
        let recursive = UnfairRecursiveLock::allocate();

        unfair.lock();
        recursive.lock();
        recursive.lock();

        panic!("boom");
    })
    .join();

    let payload = result.unwrap_err();
    assert_eq!(payload.downcast_ref::<&str>(), Some(&"boom"));
}
