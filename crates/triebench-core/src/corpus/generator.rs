//! Fixed-length word enumeration over an alphabet.

use rand::seq::SliceRandom;
use rand::Rng;
use rayon::prelude::*;

use super::Corpus;
use crate::config::{CorpusConfig, DEFAULT_ALPHABET};
use crate::error::{Error, Result};

/// Default cap on word length (26^6 ≈ 309M words).
const DEFAULT_MAX_WORD_LENGTH: usize = 6;

/// Generates corpora and random query words over a fixed alphabet.
#[derive(Debug, Clone)]
pub struct WordGenerator {
    alphabet: Vec<char>,
    max_word_length: usize,
}

impl Default for WordGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl WordGenerator {
    /// Generator over `A..=Z`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            alphabet: DEFAULT_ALPHABET.chars().collect(),
            max_word_length: DEFAULT_MAX_WORD_LENGTH,
        }
    }

    /// Generator over a custom alphabet.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the alphabet is empty or repeats
    /// a character (repeats would break the distinct-words invariant).
    pub fn with_alphabet<I: IntoIterator<Item = char>>(alphabet: I) -> Result<Self> {
        let alphabet: Vec<char> = alphabet.into_iter().collect();
        if alphabet.is_empty() {
            return Err(Error::InvalidArgument("alphabet must not be empty".into()));
        }
        for (i, c) in alphabet.iter().enumerate() {
            if alphabet[..i].contains(c) {
                return Err(Error::InvalidArgument(format!(
                    "alphabet repeats character '{c}'"
                )));
            }
        }

        Ok(Self {
            alphabet,
            max_word_length: DEFAULT_MAX_WORD_LENGTH,
        })
    }

    /// Generator described by a corpus configuration section.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for an invalid alphabet.
    pub fn from_config(config: &CorpusConfig) -> Result<Self> {
        Ok(Self::with_alphabet(config.alphabet.chars())?.with_max_word_length(config.max_word_length))
    }

    /// Overrides the largest accepted word length.
    #[must_use]
    pub fn with_max_word_length(mut self, max_word_length: usize) -> Self {
        self.max_word_length = max_word_length;
        self
    }

    /// The characters words are drawn from.
    #[must_use]
    pub fn alphabet(&self) -> &[char] {
        &self.alphabet
    }

    /// Largest accepted word length.
    #[must_use]
    pub fn max_word_length(&self) -> usize {
        self.max_word_length
    }

    /// Number of words `generate(word_length)` produces.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `word_length` exceeds the
    /// configured maximum or the count overflows `usize`.
    pub fn expected_len(&self, word_length: usize) -> Result<usize> {
        if word_length == 0 {
            return Ok(0);
        }
        if word_length > self.max_word_length {
            return Err(Error::InvalidArgument(format!(
                "word length {word_length} exceeds maximum {}",
                self.max_word_length
            )));
        }

        u32::try_from(word_length)
            .ok()
            .and_then(|exp| self.alphabet.len().checked_pow(exp))
            .ok_or_else(|| {
                Error::InvalidArgument(format!("corpus for word length {word_length} is too large"))
            })
    }

    /// Enumerates every word of `word_length` characters, then shuffles.
    ///
    /// Enumeration is depth-first over character positions on the calling
    /// thread. A length of zero yields an empty corpus.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for an oversized `word_length`.
    pub fn generate(&self, word_length: usize) -> Result<Corpus> {
        let expected = self.expected_len(word_length)?;
        if expected == 0 {
            return Ok(Corpus::default());
        }

        tracing::debug!(word_length, expected, "Generating corpus");
        let mut words = Vec::with_capacity(expected);
        let mut prefix = String::with_capacity(word_length);
        emit_words(&self.alphabet, word_length, &mut prefix, &mut words);

        words.shuffle(&mut rand::thread_rng());
        tracing::debug!(word_length, words = words.len(), "Generated corpus");

        Ok(Corpus::new(words))
    }

    /// Same word set as [`generate`](Self::generate), built in parallel.
    ///
    /// Work is split by first character; each worker enumerates the suffixes
    /// below its character and the partial lists are merged, then shuffled.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for an oversized `word_length`.
    pub fn generate_parallel(&self, word_length: usize) -> Result<Corpus> {
        let expected = self.expected_len(word_length)?;
        if expected == 0 {
            return Ok(Corpus::default());
        }

        tracing::debug!(word_length, expected, "Generating corpus in parallel");
        let per_worker = expected / self.alphabet.len();
        let mut words: Vec<String> = self
            .alphabet
            .par_iter()
            .flat_map_iter(|&first| {
                let mut partial = Vec::with_capacity(per_worker);
                let mut prefix = String::with_capacity(word_length);
                prefix.push(first);
                emit_words(&self.alphabet, word_length - 1, &mut prefix, &mut partial);
                partial
            })
            .collect();

        words.shuffle(&mut rand::thread_rng());
        tracing::debug!(word_length, words = words.len(), "Generated corpus in parallel");

        Ok(Corpus::new(words))
    }

    /// One uniformly sampled word of exactly `max_characters` characters.
    ///
    /// The word need not appear in any generated corpus; callers use it to
    /// synthesize queries, including ones expected to miss.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `max_characters` is zero.
    pub fn random_word(&self, max_characters: usize) -> Result<String> {
        if max_characters == 0 {
            return Err(Error::InvalidArgument(
                "random word needs at least one character".into(),
            ));
        }

        let mut rng = rand::thread_rng();
        Ok((0..max_characters)
            .map(|_| self.alphabet[rng.gen_range(0..self.alphabet.len())])
            .collect())
    }
}

/// Appends every completion of `prefix` with `remaining` more characters.
fn emit_words(alphabet: &[char], remaining: usize, prefix: &mut String, out: &mut Vec<String>) {
    if remaining == 0 {
        out.push(prefix.clone());
        return;
    }

    for &c in alphabet {
        prefix.push(c);
        emit_words(alphabet, remaining - 1, prefix, out);
        prefix.pop();
    }
}
