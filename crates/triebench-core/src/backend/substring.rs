//! Substring backend: trigram inverted index over Roaring bitmaps.
//!
//! Follows the `pg_trgm` layout:
//! - keys are padded with two spaces on both sides and split into 3-byte
//!   trigrams
//! - inverted index: trigram → `RoaringBitmap` of entry ids
//! - query: intersect the bitmaps of the query's inner trigrams, then verify
//!   each candidate by containment
//!
//! Unlike the other backends, [`SubstringBackend::retrieve`] matches the query
//! anywhere in the key, not only at its start.

#![allow(clippy::cast_possible_truncation)] // RoaringBitmap uses u32 ids, bounds checked on insert

use roaring::RoaringBitmap;
use rustc_hash::FxHashMap;
use std::collections::HashSet;

use super::AlgorithmBackend;

/// Trigram type: 3 bytes of UTF-8.
pub type Trigram = [u8; 3];

/// Extract trigrams from a key with two spaces of padding on each side.
///
/// # Example
///
/// ```
/// use triebench_core::backend::extract_trigrams;
///
/// let trigrams = extract_trigrams("CAT");
/// // "  CAT  " → {"  C", " CA", "CAT", "AT ", "T  "}
/// assert_eq!(trigrams.len(), 5);
/// ```
#[must_use]
pub fn extract_trigrams(text: &str) -> HashSet<Trigram> {
    if text.is_empty() {
        return HashSet::new();
    }

    let bytes = text.as_bytes();
    let total_len = bytes.len() + 4;
    let mut trigrams = HashSet::with_capacity(total_len - 2);

    // Padding is virtual: positions 0..2 and past the text read as spaces.
    for i in 0..total_len - 2 {
        let trigram: Trigram = std::array::from_fn(|j| {
            let pos = i + j;
            if pos < 2 || pos >= 2 + bytes.len() {
                b' '
            } else {
                bytes[pos - 2]
            }
        });
        trigrams.insert(trigram);
    }

    trigrams
}

/// Unpadded trigrams of a query; a substring can sit anywhere in a key.
fn query_trigrams(pattern: &str) -> HashSet<Trigram> {
    pattern
        .as_bytes()
        .windows(3)
        .map(|w| [w[0], w[1], w[2]])
        .collect()
}

/// Trigram-indexed substring search.
#[derive(Debug, Default)]
pub struct SubstringBackend {
    /// Inverted index: trigram → entry ids containing it.
    inverted: FxHashMap<Trigram, RoaringBitmap>,
    /// Entry id → (key, value).
    entries: Vec<(String, usize)>,
    /// Every entry id, for queries too short to filter.
    all_entries: RoaringBitmap,
}

impl SubstringBackend {
    /// Creates an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct trigrams indexed.
    #[must_use]
    pub fn trigram_count(&self) -> usize {
        self.inverted.len()
    }

    /// Candidate entry ids for `pattern` before verification.
    ///
    /// Queries shorter than three bytes cannot be filtered and return every
    /// entry.
    #[must_use]
    pub fn candidates(&self, pattern: &str) -> RoaringBitmap {
        let trigrams = query_trigrams(pattern);
        if trigrams.is_empty() {
            return self.all_entries.clone();
        }

        let mut result: Option<RoaringBitmap> = None;
        for trigram in &trigrams {
            match self.inverted.get(trigram) {
                Some(bitmap) => {
                    result = Some(match result {
                        Some(acc) => acc & bitmap,
                        None => bitmap.clone(),
                    });
                }
                // Trigram never seen: nothing can match
                None => return RoaringBitmap::new(),
            }
        }

        result.unwrap_or_default()
    }
}

impl AlgorithmBackend for SubstringBackend {
    /// # Panics
    ///
    /// Panics past `u32::MAX` entries, the limit of the bitmap ids.
    fn insert(&mut self, key: &str, value: usize) {
        assert!(
            u32::try_from(self.entries.len()).is_ok(),
            "SubstringBackend: entry count exceeds u32::MAX"
        );
        let id = self.entries.len() as u32;

        for trigram in extract_trigrams(key) {
            self.inverted.entry(trigram).or_default().insert(id);
        }
        self.all_entries.insert(id);
        self.entries.push((key.to_string(), value));
    }

    fn retrieve(&self, pattern: &str) -> Vec<usize> {
        self.candidates(pattern)
            .iter()
            .filter_map(|id| self.entries.get(id as usize))
            .filter(|(key, _)| key.contains(pattern))
            .map(|(_, value)| *value)
            .collect()
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
