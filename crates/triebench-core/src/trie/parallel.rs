//! Concurrent prefix trie.
//!
//! Each node owns a lazily created `DashMap` of children. Descending through
//! an edge uses the map's entry API, so concurrent inserts of the same
//! character at the same node agree on a single child: no lost updates and
//! no duplicate children. There is no trie-wide lock.

use dashmap::DashMap;
use rayon::prelude::*;
use rustc_hash::FxBuildHasher;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

use super::PrefixIndex;
use crate::corpus::Corpus;

/// Shards per child map. Nodes have at most alphabet-size children, so a
/// handful of shards is plenty.
const CHILD_SHARDS: usize = 4;

type Children = DashMap<char, Arc<ParallelNode>, FxBuildHasher>;

#[derive(Debug, Default)]
struct ParallelNode {
    /// Leaves never allocate a map.
    children: OnceLock<Children>,
    terminal: AtomicBool,
}

impl ParallelNode {
    fn children(&self) -> &Children {
        self.children
            .get_or_init(|| DashMap::with_hasher_and_shard_amount(FxBuildHasher, CHILD_SHARDS))
    }

    /// Existing child for `c`, or a freshly inserted one. Atomic per key.
    fn child_or_insert(&self, c: char) -> Arc<ParallelNode> {
        Arc::clone(self.children().entry(c).or_default().value())
    }

    fn child(&self, c: char) -> Option<Arc<ParallelNode>> {
        self.children
            .get()
            .and_then(|children| children.get(&c).map(|child| Arc::clone(child.value())))
    }

    fn child_count(&self) -> usize {
        self.children.get().map_or(0, DashMap::len)
    }

    fn is_terminal(&self) -> bool {
        self.terminal.load(Ordering::Acquire)
    }

    fn count(&self) -> usize {
        1 + self.children.get().map_or(0, |children| {
            children.iter().map(|child| child.value().count()).sum()
        })
    }
}

/// Prefix trie that supports parallel bulk insertion and parallel search.
///
/// Searching while inserts are still running is memory safe but the result
/// is unspecified: in-flight words may or may not be reported.
#[derive(Debug)]
pub struct ParallelPrefixTrie {
    root: Arc<ParallelNode>,
    len: AtomicUsize,
    parallel_threshold: usize,
}

impl Default for ParallelPrefixTrie {
    fn default() -> Self {
        Self::new()
    }
}

impl ParallelPrefixTrie {
    /// Creates an empty trie that fans out at nodes with two or more children.
    #[must_use]
    pub fn new() -> Self {
        Self::with_parallel_threshold(2)
    }

    /// Creates an empty trie that fans subtree enumeration out across the
    /// worker pool at nodes with at least `parallel_threshold` children.
    #[must_use]
    pub fn with_parallel_threshold(parallel_threshold: usize) -> Self {
        Self {
            root: Arc::new(ParallelNode::default()),
            len: AtomicUsize::new(0),
            parallel_threshold: parallel_threshold.max(1),
        }
    }

    /// Builds a trie from `corpus`, inserting every word as an independent
    /// unit of parallel work.
    #[must_use]
    pub fn build(corpus: &Corpus, parallel_threshold: usize) -> Self {
        let trie = Self::with_parallel_threshold(parallel_threshold);
        corpus.words().par_iter().for_each(|word| {
            trie.insert(word);
        });
        trie
    }

    /// Inserts `word`, returning false if it was already present.
    ///
    /// Safe to call from many threads at once.
    pub fn insert(&self, word: &str) -> bool {
        let mut node = Arc::clone(&self.root);
        for c in word.chars() {
            node = node.child_or_insert(c);
        }

        let fresh = !node.terminal.swap(true, Ordering::AcqRel);
        if fresh {
            self.len.fetch_add(1, Ordering::Relaxed);
        }
        fresh
    }

    /// Returns true if `word` itself was inserted.
    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.descend(word).is_some_and(|node| node.is_terminal())
    }

    /// Every inserted word starting with `prefix`.
    #[must_use]
    pub fn search(&self, prefix: &str) -> Vec<String> {
        match self.descend(prefix) {
            Some(node) => self.collect(&node, prefix.to_string()),
            None => Vec::new(),
        }
    }

    /// Number of distinct words.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len.load(Ordering::Relaxed)
    }

    /// Returns true if no word was inserted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of nodes including the root.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.root.count()
    }

    fn descend(&self, prefix: &str) -> Option<Arc<ParallelNode>> {
        prefix
            .chars()
            .try_fold(Arc::clone(&self.root), |node, c| node.child(c))
    }

    /// Gathers every terminal below `node`; `word` spells the path to it.
    fn collect(&self, node: &ParallelNode, word: String) -> Vec<String> {
        let mut found = Vec::new();
        if node.is_terminal() {
            found.push(word.clone());
        }

        let Some(children) = node.children.get() else {
            return found;
        };

        let extend = |c: char| {
            let mut next = String::with_capacity(word.len() + c.len_utf8());
            next.push_str(&word);
            next.push(c);
            next
        };

        if node.child_count() >= self.parallel_threshold {
            found.par_extend(
                children
                    .par_iter()
                    .flat_map_iter(|child| self.collect(child.value(), extend(*child.key()))),
            );
        } else {
            for child in children.iter() {
                found.extend(self.collect(child.value(), extend(*child.key())));
            }
        }

        found
    }
}

impl PrefixIndex for ParallelPrefixTrie {
    fn search(&self, prefix: &str) -> Vec<String> {
        ParallelPrefixTrie::search(self, prefix)
    }

    fn len(&self) -> usize {
        ParallelPrefixTrie::len(self)
    }
}
