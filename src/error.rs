//! Error types for evictkit.
//!
//! Cache operations themselves never fail: misses are `None` and overflow is
//! handled by eviction. Errors only surface from configuration and from the
//! debug invariant checks.
//!
//! - [`ConfigError`]: rejected construction parameters (zero capacity through
//!   a fallible constructor, unknown policy name).
//! - [`InvariantError`]: returned by `check_invariants` when the mapping and
//!   the policy metadata disagree.
//!
//! ```
//! use evictkit::error::ConfigError;
//! use evictkit::policy::lru::LruCache;
//!
//! let err = LruCache::<u64, u64>::try_new(0).unwrap_err();
//! assert_eq!(err, ConfigError::ZeroCapacity);
//! assert!(err.to_string().contains("capacity"));
//! ```

use thiserror::Error;

/// Invalid cache configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("capacity must be greater than zero")]
    ZeroCapacity,

    #[error("unknown cache policy `{0}` (expected unbounded, lifo, lru, mru or lfu)")]
    UnknownPolicy(String),
}

/// Internal cache invariant violation, carrying a description of what broke.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cache invariant violated: {0}")]
pub struct InvariantError(String);

impl InvariantError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    pub fn message(&self) -> &str {
        &self.0
    }
}

impl From<String> for InvariantError {
    fn from(msg: String) -> Self {
        Self(msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_messages() {
        assert_eq!(
            ConfigError::ZeroCapacity.to_string(),
            "capacity must be greater than zero"
        );
        let err = ConfigError::UnknownPolicy("fifo".into());
        assert!(err.to_string().contains("`fifo`"));
    }

    #[test]
    fn invariant_error_wraps_message() {
        let err = InvariantError::new("stack and map differ");
        assert_eq!(err.message(), "stack and map differ");
        assert_eq!(
            err.to_string(),
            "cache invariant violated: stack and map differ"
        );
        assert_eq!(InvariantError::from(String::from("x")).message(), "x");
    }

    #[test]
    fn errors_implement_std_error() {
        fn assert_error<T: std::error::Error + Send + Sync + 'static>() {}
        assert_error::<ConfigError>();
        assert_error::<InvariantError>();
    }
}
