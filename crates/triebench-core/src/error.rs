//! Error types for `triebench`.
//!
//! Every failure is reported as an explicit value. None of them is retried
//! internally; the benchmark driver decides whether to correct its input and
//! re-issue the call.

use thiserror::Error;

/// Result type alias for `triebench` operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while generating corpora, building indexes or timing.
///
/// Error codes follow the pattern `TRIE-XXX` for easy grepping in logs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Malformed input such as an oversized word length (TRIE-001).
    #[error("[TRIE-001] Invalid argument: {0}")]
    InvalidArgument(String),

    /// Algorithm is unknown or not enabled for this manager (TRIE-002).
    #[error("[TRIE-002] Unsupported algorithm '{0}'")]
    UnsupportedAlgorithm(String),

    /// Search attempted before any successful build (TRIE-003).
    #[error("[TRIE-003] No index built: call build_index before searching")]
    NoIndexBuilt,

    /// Timer stopped without having been started (TRIE-004).
    #[error("[TRIE-004] Timer was stopped without being started")]
    EmptyTimerState,

    /// Configuration error (TRIE-005).
    #[error("[TRIE-005] Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Returns the error code (e.g., "TRIE-001").
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidArgument(_) => "TRIE-001",
            Self::UnsupportedAlgorithm(_) => "TRIE-002",
            Self::NoIndexBuilt => "TRIE-003",
            Self::EmptyTimerState => "TRIE-004",
            Self::Config(_) => "TRIE-005",
        }
    }
}

impl From<crate::config::ConfigError> for Error {
    fn from(err: crate::config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}
