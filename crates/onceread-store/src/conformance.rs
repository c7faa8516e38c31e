//! Behaviour every [`EntryStore`] backend must exhibit, shared by the
//! backend test modules.

use std::sync::{Arc, Barrier};
use std::thread;

use onceread_gate::{SanitizedContent, Sanitizer};
use onceread_types::{EntryKey, KeyGenerator};

use crate::error::StoreError;
use crate::traits::EntryStore;

pub fn content(text: &str) -> SanitizedContent {
    Sanitizer::default().sanitize(text)
}

pub fn fill(store: &dyn EntryStore, n: usize) -> Vec<EntryKey> {
    let mut keys = KeyGenerator::os();
    (0..n)
        .map(|i| {
            let key = keys.generate();
            store.insert(&key, &content(&format!("entry {i}"))).unwrap();
            key
        })
        .collect()
}

pub fn insert_then_take_once(store: &dyn EntryStore) {
    let key = KeyGenerator::os().generate();
    store.insert(&key, &content("hello")).unwrap();

    let got = store.take(&key).unwrap().expect("first take should deliver");
    assert_eq!(got.as_str(), "hello");
    for _ in 0..3 {
        assert!(store.take(&key).unwrap().is_none());
    }
    assert!(store.is_empty().unwrap());
}

pub fn unknown_key_misses(store: &dyn EntryStore) {
    fill(store, 2);
    let never = KeyGenerator::os().generate();
    assert!(store.take(&never).unwrap().is_none());
    assert_eq!(store.len().unwrap(), 2);
}

pub fn collision_is_rejected(store: &dyn EntryStore) {
    let key = KeyGenerator::os().generate();
    store.insert(&key, &content("first")).unwrap();
    let err = store.insert(&key, &content("second")).unwrap_err();
    assert!(matches!(err, StoreError::Collision(ref k) if *k == key));
    assert_eq!(store.take(&key).unwrap().unwrap().as_str(), "first");
}

pub fn keys_are_independent(store: &dyn EntryStore) {
    let keys = fill(store, 4);
    assert_eq!(store.take(&keys[1]).unwrap().unwrap().as_str(), "entry 1");
    assert_eq!(store.len().unwrap(), 3);
    for (i, key) in keys.iter().enumerate().filter(|(i, _)| *i != 1) {
        assert_eq!(
            store.take(key).unwrap().unwrap().as_str(),
            format!("entry {i}")
        );
    }
    assert!(store.is_empty().unwrap());
}

/// `readers` threads released together against one live key, repeated
/// `rounds` times. Exactly one reader may win each round.
pub fn concurrent_take_has_single_winner<S: EntryStore + 'static>(
    store: S,
    readers: usize,
    rounds: usize,
) {
    let store = Arc::new(store);
    let mut keys = KeyGenerator::os();
    for round in 0..rounds {
        let key = keys.generate();
        let secret = format!("secret {round}");
        store.insert(&key, &content(&secret)).unwrap();

        let barrier = Arc::new(Barrier::new(readers));
        let handles: Vec<_> = (0..readers)
            .map(|_| {
                let store = Arc::clone(&store);
                let barrier = Arc::clone(&barrier);
                let key = key.clone();
                thread::spawn(move || {
                    barrier.wait();
                    store.take(&key).unwrap()
                })
            })
            .collect();

        let results: Vec<_> = handles
            .into_iter()
            .map(|h| h.join().expect("reader should not panic"))
            .collect();
        let winners: Vec<_> = results.iter().flatten().collect();
        assert_eq!(winners.len(), 1, "round {round}: {} winners", winners.len());
        assert_eq!(winners[0].as_str(), secret);
        assert!(store.take(&key).unwrap().is_none());
    }
}

/// Writers and readers on many keys at once; every entry is delivered
/// exactly once overall.
pub fn concurrent_mixed_keys<S: EntryStore + 'static>(store: S) {
    const KEYS: usize = 32;
    const READERS_PER_KEY: usize = 3;

    let store = Arc::new(store);
    let mut gen = KeyGenerator::os();
    let keys: Vec<_> = (0..KEYS).map(|_| gen.generate()).collect();
    let barrier = Arc::new(Barrier::new(KEYS + KEYS * READERS_PER_KEY));

    let mut handles = Vec::new();
    for (i, key) in keys.iter().enumerate() {
        let w_store = Arc::clone(&store);
        let w_barrier = Arc::clone(&barrier);
        let w_key = key.clone();
        handles.push(thread::spawn(move || {
            w_barrier.wait();
            w_store.insert(&w_key, &content(&format!("v{i}"))).unwrap();
            None
        }));
        for _ in 0..READERS_PER_KEY {
            let store = Arc::clone(&store);
            let barrier = Arc::clone(&barrier);
            let key = key.clone();
            handles.push(thread::spawn(move || {
                barrier.wait();
                // Retry a while: the writer may not have landed yet.
                for _ in 0..500 {
                    if let Some(c) = store.take(&key).unwrap() {
                        return Some(c.into_string());
                    }
                    thread::yield_now();
                }
                None
            }));
        }
    }

    let delivered: Vec<String> = handles
        .into_iter()
        .filter_map(|h| h.join().expect("thread should not panic"))
        .collect();
    // Anything not delivered by the readers must still be live, once.
    let mut all = delivered.clone();
    for key in &keys {
        if let Some(c) = store.take(key).unwrap() {
            all.push(c.into_string());
        }
    }
    all.sort();
    let mut expected: Vec<_> = (0..KEYS).map(|i| format!("v{i}")).collect();
    expected.sort();
    assert_eq!(all, expected);
}
