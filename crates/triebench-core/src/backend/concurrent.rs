//! Thread-safe ordered-tree backend.

use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::ops::Bound;

use super::AlgorithmBackend;

/// `BTreeMap` behind a read-write lock; inserts may come from any thread.
#[derive(Debug, Default)]
pub struct ConcurrentBackend {
    inner: RwLock<BTreeMap<String, Vec<usize>>>,
}

impl ConcurrentBackend {
    /// Creates an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert through a shared reference (write lock).
    pub fn insert_shared(&self, key: &str, value: usize) {
        self.inner
            .write()
            .entry(key.to_string())
            .or_default()
            .push(value);
    }
}

impl AlgorithmBackend for ConcurrentBackend {
    fn insert(&mut self, key: &str, value: usize) {
        self.insert_shared(key, value);
    }

    fn retrieve(&self, prefix: &str) -> Vec<usize> {
        self.inner
            .read()
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .take_while(|(key, _)| key.starts_with(prefix))
            .flat_map(|(_, values)| values.iter().copied())
            .collect()
    }

    fn len(&self) -> usize {
        self.inner.read().values().map(Vec::len).sum()
    }
}
