//! Tests for the comparison backends.

use super::*;
use crate::corpus::{Corpus, WordGenerator};
use std::collections::HashSet;

fn set(words: Vec<String>) -> HashSet<String> {
    words.into_iter().collect()
}

fn sorted(mut values: Vec<usize>) -> Vec<usize> {
    values.sort_unstable();
    values
}

fn fill<B: AlgorithmBackend>(mut backend: B, keys: &[&str]) -> B {
    for (i, key) in keys.iter().enumerate() {
        backend.insert(key, i);
    }
    backend
}

const KEYS: [&str; 5] = ["CAT", "CATS", "CAR", "DOG", "SCAT"];

// ========== Prefix backends ==========

#[test]
fn test_balanced_retrieve_prefix() {
    let backend = fill(BalancedBackend::new(), &KEYS);

    assert_eq!(sorted(backend.retrieve("CA")), vec![0, 1, 2]);
    assert_eq!(sorted(backend.retrieve("CAT")), vec![0, 1]);
    assert_eq!(backend.retrieve("").len(), 5);
    assert!(backend.retrieve("X").is_empty());
    assert_eq!(backend.len(), 5);
}

#[test]
fn test_concurrent_retrieve_prefix() {
    let backend = fill(ConcurrentBackend::new(), &KEYS);

    assert_eq!(sorted(backend.retrieve("CA")), vec![0, 1, 2]);
    assert_eq!(sorted(backend.retrieve("D")), vec![3]);
    assert_eq!(backend.len(), 5);
}

#[test]
fn test_ordered_range_scan_starts_at_prefix() {
    // Keys sorting before, inside and after the "CA" range
    let keys = ["BZZ", "CA", "CAB", "CB", "C"];
    let backends: Vec<Box<dyn AlgorithmBackend>> = vec![
        Box::new(fill(BalancedBackend::new(), &keys)),
        Box::new(fill(ConcurrentBackend::new(), &keys)),
    ];

    for backend in backends {
        assert_eq!(sorted(backend.retrieve("CA")), vec![1, 2]);
        assert_eq!(sorted(backend.retrieve("C")), vec![1, 2, 3, 4]);
        assert_eq!(sorted(backend.retrieve("B")), vec![0]);
        assert!(backend.retrieve("CAC").is_empty());
        assert_eq!(backend.retrieve("").len(), 5);
    }
}

#[test]
fn test_radix_retrieve_prefix() {
    let backend = fill(RadixBackend::new(), &KEYS);

    assert_eq!(sorted(backend.retrieve("CA")), vec![0, 1, 2]);
    assert_eq!(sorted(backend.retrieve("CAT")), vec![0, 1]);
    assert_eq!(sorted(backend.retrieve("CATS")), vec![1]);
    assert_eq!(backend.retrieve("").len(), 5);
    assert!(backend.retrieve("CATX").is_empty());
    assert!(backend.retrieve("Z").is_empty());
}

#[test]
fn test_repeated_keys_keep_all_values() {
    let backends: Vec<Box<dyn AlgorithmBackend>> = vec![
        Box::new(fill(BalancedBackend::new(), &["AB", "AB"])),
        Box::new(fill(ConcurrentBackend::new(), &["AB", "AB"])),
        Box::new(fill(RadixBackend::new(), &["AB", "AB"])),
        Box::new(fill(SubstringBackend::new(), &["AB", "AB"])),
    ];

    for backend in backends {
        assert_eq!(sorted(backend.retrieve("A")), vec![0, 1]);
        assert_eq!(backend.len(), 2);
    }
}

#[test]
fn test_concurrent_insert_shared_from_threads() {
    let backend = std::sync::Arc::new(ConcurrentBackend::new());
    let handles: Vec<_> = (0..4)
        .map(|t| {
            let backend = std::sync::Arc::clone(&backend);
            std::thread::spawn(move || {
                for i in 0..100 {
                    backend.insert_shared(&format!("K{t}-{i}"), t * 100 + i);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    assert_eq!(backend.len(), 400);
    assert_eq!(backend.retrieve("K3-").len(), 100);
}

// ========== Substring backend ==========

#[test]
fn test_extract_trigrams_padded() {
    let trigrams = extract_trigrams("CAT");

    assert!(trigrams.contains(b"  C"));
    assert!(trigrams.contains(b" CA"));
    assert!(trigrams.contains(b"CAT"));
    assert!(trigrams.contains(b"AT "));
    assert!(trigrams.contains(b"T  "));
    assert_eq!(trigrams.len(), 5);
    assert!(extract_trigrams("").is_empty());
}

#[test]
fn test_substring_matches_anywhere() {
    let backend = fill(SubstringBackend::new(), &KEYS);

    // "CAT" is inside CAT, CATS and SCAT
    assert_eq!(sorted(backend.retrieve("CAT")), vec![0, 1, 4]);
    assert_eq!(sorted(backend.retrieve("AT")), vec![0, 1, 4]);
    assert_eq!(sorted(backend.retrieve("OG")), vec![3]);
    assert!(backend.retrieve("CATZ").is_empty());
    assert_eq!(backend.retrieve("").len(), 5);
}

#[test]
fn test_substring_candidates_filter_before_verification() {
    let backend = fill(SubstringBackend::new(), &KEYS);

    // Short queries cannot be filtered
    assert_eq!(backend.candidates("A").len(), 5);
    // Unknown trigram prunes everything
    assert!(backend.candidates("QQQ").is_empty());
    assert!(backend.trigram_count() > 0);
}

// ========== BackendIndex ==========

#[test]
fn test_backend_index_maps_positions_to_words() {
    let corpus = WordGenerator::new().generate(2).unwrap();
    let index = BackendIndex::build(RadixBackend::new(), &corpus);

    assert_eq!(index.len(), 676);
    assert_eq!(set(index.search("Q")), set(corpus.starting_with("Q")));
    assert_eq!(index.search("QQ"), vec!["QQ".to_string()]);
    assert!(index.search("QQQ").is_empty());
    assert_eq!(index.backend().len(), 676);
}

#[test]
fn test_prefix_backends_agree_with_linear_scan() {
    let corpus = WordGenerator::new().generate(3).unwrap();
    let indexes: Vec<Box<dyn PrefixIndex>> = vec![
        Box::new(BackendIndex::build(BalancedBackend::new(), &corpus)),
        Box::new(BackendIndex::build(ConcurrentBackend::new(), &corpus)),
        Box::new(BackendIndex::build(RadixBackend::new(), &corpus)),
    ];

    for index in &indexes {
        for prefix in ["", "A", "JK", "JKL", "JKLM"] {
            assert_eq!(
                set(index.search(prefix)),
                set(corpus.starting_with(prefix)),
                "prefix {prefix:?}"
            );
        }
    }
}

#[test]
fn test_backend_index_skips_repeated_words() {
    let corpus = Corpus::from(vec!["AB".to_string(), "AB".to_string(), "AC".to_string()]);
    let index = BackendIndex::build(BalancedBackend::new(), &corpus);

    let mut hits = index.search("A");
    hits.sort();

    assert_eq!(hits, vec!["AB".to_string(), "AC".to_string()]);
    assert_eq!(index.len(), 2);
    assert_eq!(index.backend().len(), 2);
}

#[test]
fn test_substring_index_is_superset_of_prefix_matches() {
    let corpus = Corpus::from(vec!["AB".to_string(), "BA".to_string(), "BB".to_string()]);
    let index = BackendIndex::build(SubstringBackend::new(), &corpus);

    let hits = set(index.search("A"));

    assert!(hits.is_superset(&set(corpus.starting_with("A"))));
    assert_eq!(hits, set(vec!["AB".to_string(), "BA".to_string()]));
}
