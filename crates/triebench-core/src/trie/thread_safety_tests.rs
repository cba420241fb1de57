//! Thread-safety tests for the parallel trie.
//!
//! Validates that concurrent insertion never loses a word and never creates
//! two children for the same character.

use std::collections::HashSet;
use std::sync::{Arc, Barrier};
use std::thread;

use super::{ParallelPrefixTrie, PrefixTrie};
use crate::corpus::WordGenerator;

#[test]
fn test_concurrent_inserts_of_same_words_create_single_children() {
    let trie = Arc::new(ParallelPrefixTrie::new());
    let words: Arc<Vec<String>> = Arc::new(
        WordGenerator::new()
            .generate(3)
            .unwrap()
            .iter()
            .cloned()
            .collect(),
    );
    let barrier = Arc::new(Barrier::new(8));
    let mut handles = vec![];

    // 8 threads all inserting the full word list, starting together
    for _ in 0..8 {
        let trie = Arc::clone(&trie);
        let words = Arc::clone(&words);
        let barrier = Arc::clone(&barrier);
        handles.push(thread::spawn(move || {
            barrier.wait();
            words.iter().filter(|w| trie.insert(w)).count()
        }));
    }

    let fresh: usize = handles
        .into_iter()
        .map(|h| h.join().expect("Thread panicked"))
        .sum();

    let reference: PrefixTrie = words.iter().map(String::as_str).collect();
    assert_eq!(fresh, words.len(), "each word is fresh for exactly one thread");
    assert_eq!(trie.len(), words.len());
    assert_eq!(trie.node_count(), reference.node_count());
}

#[test]
fn test_concurrent_inserts_of_disjoint_words() {
    let trie = Arc::new(ParallelPrefixTrie::new());
    let mut handles = vec![];

    // 4 threads, each inserting words sharing the prefix "P"
    for t in 0..4u32 {
        let trie = Arc::clone(&trie);
        handles.push(thread::spawn(move || {
            for i in 0..250u32 {
                trie.insert(&format!("P{t}-{i}"));
            }
        }));
    }

    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    assert_eq!(trie.len(), 1_000);
    assert_eq!(trie.search("P").len(), 1_000);
    assert_eq!(trie.search("P2-").len(), 250);
}

#[test]
fn test_concurrent_searches_on_built_trie() {
    let corpus = WordGenerator::new().generate(3).unwrap();
    let trie = Arc::new(ParallelPrefixTrie::build(&corpus, 2));
    let mut handles = vec![];

    for letter in ['A', 'H', 'Z'] {
        let trie = Arc::clone(&trie);
        handles.push(thread::spawn(move || {
            let prefix = letter.to_string();
            let results: HashSet<String> = trie.search(&prefix).into_iter().collect();
            (letter, results)
        }));
    }

    for handle in handles {
        let (letter, results) = handle.join().expect("Thread panicked");
        assert_eq!(results.len(), 676);
        assert!(results.iter().all(|w| w.starts_with(letter)));
    }
}
