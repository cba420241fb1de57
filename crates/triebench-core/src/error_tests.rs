//! Tests for `error` module

use super::error::*;

// -------------------------------------------------------------------------
// Error code tests
// -------------------------------------------------------------------------

#[test]
fn test_error_codes_are_unique() {
    // Arrange - create all error variants
    let errors: Vec<Error> = vec![
        Error::InvalidArgument("test".into()),
        Error::UnsupportedAlgorithm("test".into()),
        Error::NoIndexBuilt,
        Error::EmptyTimerState,
        Error::Config("test".into()),
    ];

    // Act - collect all codes
    let codes: Vec<&str> = errors.iter().map(Error::code).collect();

    // Assert - all codes are unique and follow pattern
    let mut unique_codes = codes.clone();
    unique_codes.sort_unstable();
    unique_codes.dedup();
    assert_eq!(codes.len(), unique_codes.len(), "Error codes must be unique");
    for code in codes {
        assert!(code.starts_with("TRIE-"), "Bad code format: {code}");
    }
}

#[test]
fn test_error_display_contains_code() {
    let err = Error::UnsupportedAlgorithm("ukkonen".into());
    let text = err.to_string();

    assert!(text.contains("[TRIE-002]"));
    assert!(text.contains("ukkonen"));
}

#[test]
fn test_no_index_built_message() {
    assert_eq!(
        Error::NoIndexBuilt.to_string(),
        "[TRIE-003] No index built: call build_index before searching"
    );
}

#[test]
fn test_config_error_converts() {
    let config_err = crate::config::ConfigError::InvalidValue {
        key: "benchmark.runs".to_string(),
        message: "must be at least 1".to_string(),
    };

    let err: Error = config_err.into();

    assert_eq!(err.code(), "TRIE-005");
    assert!(err.to_string().contains("benchmark.runs"));
}
