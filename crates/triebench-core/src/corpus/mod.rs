//! Synthetic word corpora.
//!
//! A [`Corpus`] is the full Cartesian product of an alphabet taken
//! `word_length` times, shuffled. It is immutable once generated and cheap to
//! clone, so the manager and backends can hold it alongside the caller.

mod generator;

pub use generator::WordGenerator;

use std::sync::Arc;

/// Immutable, shared sequence of generated words.
///
/// Element order is randomized at generation time and carries no meaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Corpus {
    words: Arc<[String]>,
}

impl Default for Corpus {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Corpus {
    /// Wraps an existing word list.
    #[must_use]
    pub fn new(words: Vec<String>) -> Self {
        Self {
            words: Arc::from(words),
        }
    }

    /// Number of words.
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns true if the corpus holds no words.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// All words, in generation order.
    #[must_use]
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Word at `position`, if any.
    #[must_use]
    pub fn get(&self, position: usize) -> Option<&str> {
        self.words.get(position).map(String::as_str)
    }

    /// Iterates over the words.
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.words.iter()
    }

    /// Naive linear scan for words starting with `prefix`.
    ///
    /// This is the reference the indexes are checked against.
    #[must_use]
    pub fn starting_with(&self, prefix: &str) -> Vec<String> {
        self.words
            .iter()
            .filter(|w| w.starts_with(prefix))
            .cloned()
            .collect()
    }
}

impl From<Vec<String>> for Corpus {
    fn from(words: Vec<String>) -> Self {
        Self::new(words)
    }
}

impl FromIterator<String> for Corpus {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
