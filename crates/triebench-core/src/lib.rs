//! # `triebench` Core
//!
//! Prefix-search benchmarking engine: generates exhaustive word corpora,
//! builds prefix indexes over them and times build and search.
//!
//! ## Features
//!
//! - **Exhaustive corpora**: every word of length *n* over an alphabet,
//!   shuffled, generated sequentially or in parallel with `rayon`
//! - **Hand-built tries**: a sequential `FxHashMap` trie and a parallel trie
//!   with lock-free per-edge upserts on `DashMap`
//! - **Comparison backends**: `BTreeMap`, `RwLock<BTreeMap>`, `radix_trie`
//!   and a trigram substring index, all behind one contract
//! - **Microsecond timing**: [`PrecisionTimer`] and [`PreciseDuration`]
//!
//! ## Quick Start
//!
//! ```rust
//! use triebench_core::{AlgorithmKind, BenchmarkSession, TrieBenchConfig};
//!
//! let mut session = BenchmarkSession::new(&TrieBenchConfig::default())?;
//! session.generate_corpus(2, true)?;
//! session.select_algorithm(AlgorithmKind::OwnParallel);
//!
//! let run = session.run_once("ZZ")?;
//! assert_eq!(run.results, vec!["ZZ".to_string()]);
//! # Ok::<(), triebench_core::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::must_use_candidate)]

pub mod backend;
pub mod config;
pub mod corpus;
pub mod error;
pub mod manager;
pub mod session;
pub mod timer;
pub mod trie;

#[cfg(test)]
mod error_tests;

pub use backend::{AlgorithmBackend, BackendIndex};
pub use config::{ConfigError, TrieBenchConfig};
pub use corpus::{Corpus, WordGenerator};
pub use error::{Error, Result};
pub use manager::{AlgorithmKind, SearchOutcome, TrieManager};
pub use session::{BenchmarkRun, BenchmarkSession, RunStatistics};
pub use timer::{average, PreciseDuration, PrecisionTimer};
pub use trie::{ParallelPrefixTrie, PrefixIndex, PrefixTrie};
