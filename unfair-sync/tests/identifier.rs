mod common;

use std::collections::HashSet;
use std::thread;
use unfair_sync::{Identifier, next_identifier};

#[test]
fn test_identifiers_increase_on_one_thread() {
    let first = next_identifier();
    let second = next_identifier();
    let third = next_identifier();

    assert!(first < second);
    assert!(second < third);
}

#[test]
fn test_concurrent_identifiers_are_distinct() {
    common::init_tracing();

    const THREADS: usize = 8;
    const PER_THREAD: usize = 10_000;

    let handles: Vec<_> = (0..THREADS)
        .map(|_| thread::spawn(|| (0..PER_THREAD).map(|_| next_identifier()).collect::<Vec<_>>()))
        .collect();

    let mut seen = HashSet::new();
    for handle in handles {
        for id in handle.join().unwrap() {
            assert!(seen.insert(id), "identifier {id} issued twice");
        }
    }

    assert_eq!(seen.len(), THREADS * PER_THREAD);
}

#[test]
fn test_typed_identifiers_share_the_counter() {
    let raw = next_identifier();
    let typed = Identifier::next();

    assert!(typed.as_u64() > raw);
    assert_eq!(u64::from(typed), typed.as_u64());
    assert_ne!(Identifier::next(), typed);
}

#[test]
fn test_identifier_display_is_hex() {
    let id = Identifier::next();
    let rendered = id.to_string();

    assert!(rendered.starts_with("0x"), "got {rendered}");
    assert_eq!(u64::from_str_radix(&rendered[2..], 16).unwrap(), id.as_u64());
}
