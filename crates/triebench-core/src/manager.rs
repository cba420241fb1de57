//! Algorithm selection and index lifecycle.
//!
//! [`TrieManager`] holds the currently selected [`AlgorithmKind`] and at most
//! one built index. Every kind answers through [`PrefixIndex`], so searching
//! does not care which structure was built.
//!
//! Changing the selection drops the index; it is never rebuilt implicitly.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::backend::{
    BackendIndex, BalancedBackend, ConcurrentBackend, RadixBackend, SubstringBackend,
};
use crate::config::TrieBenchConfig;
use crate::corpus::Corpus;
use crate::error::{Error, Result};
use crate::timer::{PreciseDuration, PrecisionTimer};
use crate::trie::{ParallelPrefixTrie, PrefixIndex, PrefixTrie};

/// Index structure to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlgorithmKind {
    /// Hand-built trie, single-threaded build and search.
    OwnSequential,
    /// Hand-built trie with `DashMap` children, parallel build and search.
    OwnParallel,
    /// Single-threaded ordered tree (`BTreeMap`).
    Balanced,
    /// Thread-safe ordered tree (`RwLock<BTreeMap>`).
    Concurrent,
    /// Path-compressed trie (`radix_trie`).
    Radix,
    /// Trigram substring index; matches the query anywhere in a word.
    Substring,
}

impl AlgorithmKind {
    /// Every kind, in menu order.
    pub const ALL: [Self; 6] = [
        Self::OwnSequential,
        Self::OwnParallel,
        Self::Balanced,
        Self::Concurrent,
        Self::Radix,
        Self::Substring,
    ];

    /// Kebab-case name, as used in config files and on the command line.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::OwnSequential => "own-sequential",
            Self::OwnParallel => "own-parallel",
            Self::Balanced => "balanced",
            Self::Concurrent => "concurrent",
            Self::Radix => "radix",
            Self::Substring => "substring",
        }
    }

    /// Returns true for the two hand-built tries.
    #[must_use]
    pub const fn is_own(self) -> bool {
        matches!(self, Self::OwnSequential | Self::OwnParallel)
    }
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for AlgorithmKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnsupportedAlgorithm(s.to_string()))
    }
}

/// Result of a timed search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Matching words, in no particular order.
    pub results: Vec<String>,
    /// Time spent in the search itself.
    pub elapsed: PreciseDuration,
}

/// Owns the algorithm selection and the index built for it.
pub struct TrieManager {
    algorithm: AlgorithmKind,
    enabled: Vec<AlgorithmKind>,
    parallel_threshold: usize,
    index: Option<Box<dyn PrefixIndex>>,
}

impl fmt::Debug for TrieManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrieManager")
            .field("algorithm", &self.algorithm)
            .field("enabled", &self.enabled)
            .field("parallel_threshold", &self.parallel_threshold)
            .field("indexed_len", &self.indexed_len())
            .finish()
    }
}

impl Default for TrieManager {
    fn default() -> Self {
        Self::new(&TrieBenchConfig::default())
    }
}

impl TrieManager {
    /// Creates a manager with the configured default algorithm and no index.
    #[must_use]
    pub fn new(config: &TrieBenchConfig) -> Self {
        Self {
            algorithm: config.algorithms.default,
            enabled: config.algorithms.enabled.clone(),
            parallel_threshold: config.search.parallel_threshold.max(1),
            index: None,
        }
    }

    /// Sets the initial selection. Builder-style, before any index exists.
    #[must_use]
    pub fn with_algorithm(mut self, algorithm: AlgorithmKind) -> Self {
        self.select_algorithm(algorithm);
        self
    }

    /// Currently selected algorithm.
    #[must_use]
    pub fn algorithm(&self) -> AlgorithmKind {
        self.algorithm
    }

    /// Changes the selection.
    ///
    /// Selecting a different kind drops the built index; re-selecting the
    /// current kind keeps it. Returns true if the selection changed.
    pub fn select_algorithm(&mut self, algorithm: AlgorithmKind) -> bool {
        if algorithm == self.algorithm {
            return false;
        }
        tracing::debug!(from = %self.algorithm, to = %algorithm, "Algorithm changed, index dropped");
        self.algorithm = algorithm;
        self.index = None;
        true
    }

    /// Returns true if `algorithm` may be built by this manager.
    #[must_use]
    pub fn is_enabled(&self, algorithm: AlgorithmKind) -> bool {
        self.enabled.contains(&algorithm)
    }

    /// Kinds this manager may build.
    #[must_use]
    pub fn enabled(&self) -> &[AlgorithmKind] {
        &self.enabled
    }

    /// Returns true once a build has succeeded for the current selection.
    #[must_use]
    pub fn has_index(&self) -> bool {
        self.index.is_some()
    }

    /// Number of words in the built index, or zero without one.
    #[must_use]
    pub fn indexed_len(&self) -> usize {
        self.index.as_ref().map_or(0, |index| index.len())
    }

    /// Drops the built index, if any.
    pub fn clear_index(&mut self) {
        self.index = None;
    }

    /// Builds an index over `corpus` with the current selection and returns
    /// the construction time.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedAlgorithm`] if the selection is not enabled.
    /// The previous index, if any, is left in place.
    pub fn build_index(&mut self, corpus: &Corpus) -> Result<PreciseDuration> {
        let algorithm = self.algorithm;
        if !self.is_enabled(algorithm) {
            tracing::warn!(algorithm = %algorithm, "Build requested for a disabled algorithm");
            return Err(Error::UnsupportedAlgorithm(algorithm.to_string()));
        }

        tracing::info!(algorithm = %algorithm, words = corpus.len(), "Index build started");

        let threshold = self.parallel_threshold;
        let (index, elapsed) = PrecisionTimer::time(|| -> Box<dyn PrefixIndex> {
            match algorithm {
                AlgorithmKind::OwnSequential => Box::new(PrefixTrie::build(corpus)),
                AlgorithmKind::OwnParallel => {
                    Box::new(ParallelPrefixTrie::build(corpus, threshold))
                }
                AlgorithmKind::Balanced => {
                    Box::new(BackendIndex::build(BalancedBackend::new(), corpus))
                }
                AlgorithmKind::Concurrent => {
                    Box::new(BackendIndex::build(ConcurrentBackend::new(), corpus))
                }
                AlgorithmKind::Radix => Box::new(BackendIndex::build(RadixBackend::new(), corpus)),
                AlgorithmKind::Substring => {
                    Box::new(BackendIndex::build(SubstringBackend::new(), corpus))
                }
            }
        });

        tracing::info!(
            algorithm = %algorithm,
            indexed = index.len(),
            elapsed = %elapsed,
            "Index build finished"
        );

        self.index = Some(index);
        Ok(elapsed)
    }

    /// Selects `algorithm` and builds it over `corpus`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedAlgorithm`] if `algorithm` is not enabled,
    /// in which case neither the selection nor the index changes.
    pub fn build_index_with(
        &mut self,
        corpus: &Corpus,
        algorithm: AlgorithmKind,
    ) -> Result<PreciseDuration> {
        if !self.is_enabled(algorithm) {
            return Err(Error::UnsupportedAlgorithm(algorithm.to_string()));
        }
        self.select_algorithm(algorithm);
        self.build_index(corpus)
    }

    /// Searches the built index for words starting with `query`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoIndexBuilt`] if no index exists for the current
    /// selection.
    pub fn search(&self, query: &str) -> Result<SearchOutcome> {
        let index = self.index.as_ref().ok_or(Error::NoIndexBuilt)?;

        let (results, elapsed) = PrecisionTimer::time(|| index.search(query));

        tracing::debug!(
            algorithm = %self.algorithm,
            query,
            results = results.len(),
            elapsed = %elapsed,
            "Search completed"
        );

        Ok(SearchOutcome { results, elapsed })
    }
}
