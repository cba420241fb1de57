//! Path-compressed trie backend.

use radix_trie::{Trie, TrieCommon};

use super::AlgorithmBackend;

/// Delegates to `radix_trie`, whose nodes merge single-child chains.
#[derive(Default)]
pub struct RadixBackend {
    trie: Trie<String, Vec<usize>>,
    len: usize,
}

impl RadixBackend {
    /// Creates an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl AlgorithmBackend for RadixBackend {
    fn insert(&mut self, key: &str, value: usize) {
        match self.trie.get_mut(key) {
            Some(values) => values.push(value),
            None => {
                self.trie.insert(key.to_string(), vec![value]);
            }
        }
        self.len += 1;
    }

    fn retrieve(&self, prefix: &str) -> Vec<usize> {
        if prefix.is_empty() {
            return self.trie.values().flatten().copied().collect();
        }

        // The closest descendant may sit past the prefix inside a compressed
        // edge, so keys are re-checked.
        self.trie
            .get_raw_descendant(prefix)
            .map(|subtrie| {
                subtrie
                    .iter()
                    .filter(|(key, _)| key.starts_with(prefix))
                    .flat_map(|(_, values)| values.iter().copied())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn len(&self) -> usize {
        self.len
    }
}
