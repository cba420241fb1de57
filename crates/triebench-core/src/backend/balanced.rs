//! Ordered-tree backend for single-threaded use.

use std::collections::BTreeMap;
use std::ops::Bound;

use super::AlgorithmBackend;

/// Prefix lookup as a range scan over a `BTreeMap`.
#[derive(Debug, Default)]
pub struct BalancedBackend {
    map: BTreeMap<String, Vec<usize>>,
    len: usize,
}

impl BalancedBackend {
    /// Creates an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl AlgorithmBackend for BalancedBackend {
    fn insert(&mut self, key: &str, value: usize) {
        self.map.entry(key.to_string()).or_default().push(value);
        self.len += 1;
    }

    fn retrieve(&self, prefix: &str) -> Vec<usize> {
        self.map
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .take_while(|(key, _)| key.starts_with(prefix))
            .flat_map(|(_, values)| values.iter().copied())
            .collect()
    }

    fn len(&self) -> usize {
        self.len
    }
}
