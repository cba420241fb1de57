//! `triebench` Configuration Module
//!
//! Provides configuration file support via `triebench.toml`, environment
//! variables, and runtime overrides.
//!
//! # Priority (highest to lowest)
//!
//! 1. Runtime overrides (CLI flags)
//! 2. Environment variables (`TRIEBENCH_<SECTION>__<KEY>`)
//! 3. Configuration file (`triebench.toml`)
//! 4. Default values

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

use crate::manager::AlgorithmKind;

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to parse configuration.
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Invalid configuration value.
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue {
        /// Configuration key that failed validation.
        key: String,
        /// Validation error message.
        message: String,
    },
}

/// Default alphabet: the 26 upper-case Latin letters.
pub const DEFAULT_ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Corpus generation section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusConfig {
    /// Characters words are drawn from.
    pub alphabet: String,
    /// Longest word length the generator accepts.
    ///
    /// 26^6 is already ~309M words, so anything larger is refused up front.
    pub max_word_length: usize,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            alphabet: DEFAULT_ALPHABET.to_string(),
            max_word_length: 6,
        }
    }
}

/// Search section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Minimum number of children at which the parallel trie fans out
    /// subtree enumeration instead of walking it inline.
    pub parallel_threshold: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: 2,
        }
    }
}

/// Algorithm selection section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AlgorithmsConfig {
    /// Algorithms the manager is allowed to build.
    pub enabled: Vec<AlgorithmKind>,
    /// Algorithm selected when a manager is created.
    pub default: AlgorithmKind,
}

impl Default for AlgorithmsConfig {
    fn default() -> Self {
        Self {
            enabled: AlgorithmKind::ALL.to_vec(),
            default: AlgorithmKind::OwnSequential,
        }
    }
}

/// Benchmark driver section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchmarkConfig {
    /// Default word length for generated corpora.
    pub word_length: usize,
    /// Default number of build + search iterations.
    pub runs: usize,
    /// Word length at which drivers should ask for explicit confirmation.
    pub dangerous_word_length: usize,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            word_length: 4,
            runs: 10,
            dangerous_word_length: 5,
        }
    }
}

/// Logging section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Main `triebench` configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TrieBenchConfig {
    /// Corpus configuration.
    pub corpus: CorpusConfig,
    /// Search configuration.
    pub search: SearchConfig,
    /// Algorithm configuration.
    pub algorithms: AlgorithmsConfig,
    /// Benchmark configuration.
    pub benchmark: BenchmarkConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

impl TrieBenchConfig {
    /// Loads configuration from default sources.
    ///
    /// Priority: defaults < file < environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration parsing fails.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_path("triebench.toml")
    }

    /// Loads configuration from a specific file path.
    ///
    /// A missing file is not an error; defaults and environment still apply.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration parsing fails.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let figment = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed("TRIEBENCH_").split("__"));

        figment
            .extract()
            .map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Creates a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let figment = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::string(toml_str));

        figment
            .extract()
            .map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.corpus.alphabet.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "corpus.alphabet".to_string(),
                message: "alphabet must not be empty".to_string(),
            });
        }

        let mut seen = HashSet::new();
        if let Some(dup) = self.corpus.alphabet.chars().find(|c| !seen.insert(*c)) {
            return Err(ConfigError::InvalidValue {
                key: "corpus.alphabet".to_string(),
                message: format!("character '{dup}' appears more than once"),
            });
        }

        if self.corpus.max_word_length == 0 {
            return Err(ConfigError::InvalidValue {
                key: "corpus.max_word_length".to_string(),
                message: "value must be at least 1".to_string(),
            });
        }

        if self.search.parallel_threshold == 0 {
            return Err(ConfigError::InvalidValue {
                key: "search.parallel_threshold".to_string(),
                message: "value must be at least 1".to_string(),
            });
        }

        if self.algorithms.enabled.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "algorithms.enabled".to_string(),
                message: "at least one algorithm must be enabled".to_string(),
            });
        }

        if !self.algorithms.enabled.contains(&self.algorithms.default) {
            return Err(ConfigError::InvalidValue {
                key: "algorithms.default".to_string(),
                message: format!("'{}' is not in algorithms.enabled", self.algorithms.default),
            });
        }

        if self.benchmark.runs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "benchmark.runs".to_string(),
                message: "value must be at least 1".to_string(),
            });
        }

        if self.benchmark.word_length > self.corpus.max_word_length {
            return Err(ConfigError::InvalidValue {
                key: "benchmark.word_length".to_string(),
                message: format!(
                    "value {} exceeds corpus.max_word_length {}",
                    self.benchmark.word_length, self.corpus.max_word_length
                ),
            });
        }

        Ok(())
    }

    /// Serializes the configuration to a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}
