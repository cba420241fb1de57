//! Hand-built prefix tries.
//!
//! Two implementations share the [`PrefixIndex`] contract:
//!
//! - [`PrefixTrie`]: single-threaded build, `FxHashMap` children.
//! - [`ParallelPrefixTrie`]: parallel build and search, `DashMap` children
//!   with atomic get-or-create per edge.
//!
//! Both mark word ends with an explicit terminal flag, so a word that is a
//! strict prefix of another word (`CAT` / `CATS`) is still reported.

mod parallel;
mod sequential;

pub use parallel::ParallelPrefixTrie;
pub use sequential::PrefixTrie;

/// Exact-prefix membership search over an immutable, fully built index.
///
/// Results are logically a set; implementations return them in no
/// particular order.
pub trait PrefixIndex: Send + Sync {
    /// Every indexed word starting with `prefix`.
    ///
    /// An unmatched prefix yields an empty vector, and the empty prefix
    /// yields every indexed word.
    fn search(&self, prefix: &str) -> Vec<String>;

    /// Number of distinct words reachable through this index.
    fn len(&self) -> usize;

    /// Returns true if nothing is indexed.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}


#[cfg(test)]
mod thread_safety_tests;
