//! Comparison backends behind a uniform insert/retrieve contract.
//!
//! Backends store each word's corpus position as the value; [`BackendIndex`]
//! maps retrieved positions back to words so every backend answers through
//! the same [`PrefixIndex`] interface as the hand-built tries.
//!
//! | Kind         | Structure                                |
//! |--------------|------------------------------------------|
//! | `balanced`   | `BTreeMap` range scan                    |
//! | `concurrent` | `parking_lot::RwLock<BTreeMap>`          |
//! | `radix`      | `radix_trie::Trie` (path-compressed)     |
//! | `substring`  | trigram inverted index (substring match) |

mod balanced;
mod concurrent;
mod radix;
mod substring;

pub use balanced::BalancedBackend;
pub use concurrent::ConcurrentBackend;
pub use radix::RadixBackend;
pub use substring::{extract_trigrams, SubstringBackend, Trigram};

use rustc_hash::FxHashSet;

use crate::corpus::Corpus;
use crate::trie::PrefixIndex;

/// Contract every comparison structure satisfies.
pub trait AlgorithmBackend: Send + Sync {
    /// Associates `value` with `key`. Keys may repeat.
    fn insert(&mut self, key: &str, value: usize);

    /// Values of every key matching `prefix`, in no particular order.
    fn retrieve(&self, prefix: &str) -> Vec<usize>;

    /// Number of inserted (key, value) pairs.
    fn len(&self) -> usize;

    /// Returns true if nothing was inserted.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A backend filled from a corpus, answering with words instead of positions.
pub struct BackendIndex<B> {
    backend: B,
    corpus: Corpus,
}

impl<B: AlgorithmBackend> BackendIndex<B> {
    /// Inserts every distinct word of `corpus` into `backend` keyed by itself
    /// with the position of its first occurrence as value.
    ///
    /// Repeated words are skipped, so results and `len` count distinct words
    /// like the tries do.
    #[must_use]
    pub fn build(mut backend: B, corpus: &Corpus) -> Self {
        let mut seen = FxHashSet::default();
        for (position, word) in corpus.iter().enumerate() {
            if seen.insert(word.as_str()) {
                backend.insert(word, position);
            }
        }
        Self {
            backend,
            corpus: corpus.clone(),
        }
    }

    /// The wrapped backend.
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: AlgorithmBackend> PrefixIndex for BackendIndex<B> {
    fn search(&self, prefix: &str) -> Vec<String> {
        self.backend
            .retrieve(prefix)
            .into_iter()
            .filter_map(|position| self.corpus.get(position).map(str::to_string))
            .collect()
    }

    fn len(&self) -> usize {
        self.backend.len()
    }
}

#[cfg(test)]
mod tests;
