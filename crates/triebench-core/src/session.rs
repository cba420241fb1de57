//! Benchmark session: the context object a driver creates per benchmark.
//!
//! A session owns the generator, the manager, the current corpus and the
//! runs measured since the last corpus or algorithm change. Nothing here is
//! global; drop the session to discard all of it.

use serde::Serialize;

use crate::config::TrieBenchConfig;
use crate::corpus::{Corpus, WordGenerator};
use crate::error::Result;
use crate::manager::{AlgorithmKind, TrieManager};
use crate::timer::{average, PreciseDuration, PrecisionTimer};

/// One build followed by one search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BenchmarkRun {
    /// Index construction time.
    pub build_time: PreciseDuration,
    /// Search time.
    pub search_time: PreciseDuration,
    /// Query that was searched.
    pub query: String,
    /// Words returned by the search.
    pub results: Vec<String>,
}

/// Running statistics over the recorded runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunStatistics {
    /// Number of runs recorded.
    pub count: usize,
    /// Build time of the most recent run.
    pub last_build: PreciseDuration,
    /// Mean build time.
    pub average_build: PreciseDuration,
    /// Search time of the most recent run.
    pub last_search: PreciseDuration,
    /// Mean search time.
    pub average_search: PreciseDuration,
    /// Result count of the most recent run.
    pub last_result_count: usize,
}

impl RunStatistics {
    /// Computes statistics over `runs`; all zero when empty.
    #[must_use]
    pub fn from_runs(runs: &[BenchmarkRun]) -> Self {
        let Some(last) = runs.last() else {
            return Self::default();
        };

        let builds: Vec<_> = runs.iter().map(|r| r.build_time).collect();
        let searches: Vec<_> = runs.iter().map(|r| r.search_time).collect();

        Self {
            count: runs.len(),
            last_build: last.build_time,
            average_build: average(&builds),
            last_search: last.search_time,
            average_search: average(&searches),
            last_result_count: last.results.len(),
        }
    }
}

/// Explicit benchmark context.
#[derive(Debug)]
pub struct BenchmarkSession {
    generator: WordGenerator,
    manager: TrieManager,
    corpus: Corpus,
    word_length: usize,
    runs: Vec<BenchmarkRun>,
}

impl BenchmarkSession {
    /// Creates a session with an empty corpus.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured alphabet is unusable.
    pub fn new(config: &TrieBenchConfig) -> Result<Self> {
        Ok(Self {
            generator: WordGenerator::from_config(&config.corpus)?,
            manager: TrieManager::new(config),
            corpus: Corpus::default(),
            word_length: 0,
            runs: Vec::new(),
        })
    }

    /// Replaces the corpus with every word of `word_length` characters and
    /// returns the generation time.
    ///
    /// Drops the index and the recorded runs.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidArgument`] for an oversized length. The
    /// previous corpus is kept in that case.
    pub fn generate_corpus(&mut self, word_length: usize, parallel: bool) -> Result<PreciseDuration> {
        let mut timer = PrecisionTimer::started();
        let corpus = if parallel {
            self.generator.generate_parallel(word_length)?
        } else {
            self.generator.generate(word_length)?
        };
        let elapsed = timer.stop();

        tracing::info!(
            words = corpus.len(),
            word_length,
            parallel,
            elapsed = %elapsed,
            "Corpus generated"
        );

        self.corpus = corpus;
        self.word_length = word_length;
        self.manager.clear_index();
        self.runs.clear();
        Ok(elapsed)
    }

    /// Changes the algorithm; recorded runs are cleared when it differs.
    pub fn select_algorithm(&mut self, algorithm: AlgorithmKind) {
        if self.manager.select_algorithm(algorithm) {
            self.runs.clear();
        }
    }

    /// Builds the index over the current corpus, searches `query` and records
    /// the run.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::UnsupportedAlgorithm`] if the selected algorithm
    /// is not enabled. Nothing is recorded in that case.
    pub fn run_once(&mut self, query: &str) -> Result<&BenchmarkRun> {
        let build_time = self.manager.build_index(&self.corpus)?;
        let outcome = self.manager.search(query)?;

        self.runs.push(BenchmarkRun {
            build_time,
            search_time: outcome.elapsed,
            query: query.to_string(),
            results: outcome.results,
        });

        let index = self.runs.len() - 1;
        Ok(&self.runs[index])
    }

    /// Runs `runs` iterations, each searching a fresh random word as long
    /// as the corpus words (one character for an empty corpus).
    ///
    /// # Errors
    ///
    /// Stops at the first failing run and returns its error.
    pub fn run_random(&mut self, runs: usize) -> Result<RunStatistics> {
        let query_length = self.word_length.max(1);
        for _ in 0..runs {
            let query = self.generator.random_word(query_length)?;
            self.run_once(&query)?;
        }
        Ok(self.statistics())
    }

    /// Statistics over the recorded runs.
    #[must_use]
    pub fn statistics(&self) -> RunStatistics {
        RunStatistics::from_runs(&self.runs)
    }

    /// Recorded runs, oldest first.
    #[must_use]
    pub fn runs(&self) -> &[BenchmarkRun] {
        &self.runs
    }

    /// Forgets the recorded runs.
    pub fn clear_runs(&mut self) {
        self.runs.clear();
    }

    /// Current corpus.
    #[must_use]
    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    /// Word length of the current corpus.
    #[must_use]
    pub fn word_length(&self) -> usize {
        self.word_length
    }

    /// The generator used for corpora and queries.
    #[must_use]
    pub fn generator(&self) -> &WordGenerator {
        &self.generator
    }

    /// The index manager.
    #[must_use]
    pub fn manager(&self) -> &TrieManager {
        &self.manager
    }
}
