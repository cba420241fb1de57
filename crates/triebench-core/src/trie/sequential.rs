//! Single-threaded prefix trie.

use rustc_hash::FxHashMap;

use super::PrefixIndex;
use crate::corpus::Corpus;

/// One character position. Children are keyed by the next character.
#[derive(Debug, Default)]
struct TrieNode {
    children: FxHashMap<char, TrieNode>,
    terminal: bool,
}

impl TrieNode {
    fn count(&self) -> usize {
        1 + self.children.values().map(TrieNode::count).sum::<usize>()
    }

    /// Depth-first walk pushing every terminal below (and at) this node.
    fn collect(&self, word: &mut String, out: &mut Vec<String>) {
        if self.terminal {
            out.push(word.clone());
        }
        for (&c, child) in &self.children {
            word.push(c);
            child.collect(word, out);
            word.pop();
        }
    }
}

/// Prefix trie built on a single thread.
///
/// Insertion is an iterative descent creating missing children on demand,
/// O(|word|) per word.
#[derive(Debug, Default)]
pub struct PrefixTrie {
    root: TrieNode,
    len: usize,
}

impl PrefixTrie {
    /// Creates an empty trie.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a trie holding every word of `corpus`.
    #[must_use]
    pub fn build(corpus: &Corpus) -> Self {
        corpus.iter().map(String::as_str).collect()
    }

    /// Inserts `word`, returning false if it was already present.
    pub fn insert(&mut self, word: &str) -> bool {
        let mut node = &mut self.root;
        for c in word.chars() {
            node = node.children.entry(c).or_default();
        }

        if node.terminal {
            return false;
        }
        node.terminal = true;
        self.len += 1;
        true
    }

    /// Returns true if `word` itself was inserted.
    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.descend(word).is_some_and(|node| node.terminal)
    }

    /// Every inserted word starting with `prefix`.
    #[must_use]
    pub fn search(&self, prefix: &str) -> Vec<String> {
        let Some(node) = self.descend(prefix) else {
            return Vec::new();
        };

        let mut results = Vec::new();
        let mut word = prefix.to_string();
        node.collect(&mut word, &mut results);
        results
    }

    /// Number of distinct words.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if no word was inserted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of nodes including the root.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.root.count()
    }

    fn descend(&self, prefix: &str) -> Option<&TrieNode> {
        prefix
            .chars()
            .try_fold(&self.root, |node, c| node.children.get(&c))
    }
}

impl<'a> FromIterator<&'a str> for PrefixTrie {
    fn from_iter<T: IntoIterator<Item = &'a str>>(iter: T) -> Self {
        let mut trie = Self::new();
        for word in iter {
            trie.insert(word);
        }
        trie
    }
}

impl PrefixIndex for PrefixTrie {
    fn search(&self, prefix: &str) -> Vec<String> {
        PrefixTrie::search(self, prefix)
    }

    fn len(&self) -> usize {
        self.len
    }
}
