//! Error types.

use core::num::ParseFloatError;

use thiserror::Error;

/// Errors surfaced by [`LexicalCache`](crate::LexicalCache).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CacheError {
    /// The forward cast was given text that is not a valid decimal literal.
    ///
    /// The cache's entries are left exactly as they were before the call.
    #[error("cannot parse {text:?} as a floating-point number: {source}")]
    Parse {
        /// The rejected input.
        text: String,
        /// Error reported by the parse primitive.
        source: ParseFloatError,
    },

    /// A cache was configured with a capacity below one slot.
    #[error("cache capacity must be at least 1, got {requested}")]
    Capacity {
        /// The capacity that was asked for.
        requested: usize,
    },

    /// The write clock was configured to start too close to `u64::MAX`.
    #[error("clock origin {origin} exceeds the maximum of {max}")]
    ClockOrigin {
        /// The origin that was asked for.
        origin: u64,
        /// Largest accepted origin.
        max: u64,
    },
}

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_parse_error_message_and_source() {
        let source = "abc".parse::<f64>().unwrap_err();
        let err = CacheError::Parse {
            text: "abc".to_string(),
            source: source.clone(),
        };
        assert_eq!(
            err.to_string(),
            format!("cannot parse \"abc\" as a floating-point number: {source}")
        );
        assert!(err.source().is_some());
    }

    #[test]
    fn test_capacity_error_message() {
        let err = CacheError::Capacity { requested: 0 };
        assert_eq!(err.to_string(), "cache capacity must be at least 1, got 0");
        assert!(err.source().is_none());
    }

    #[test]
    fn test_clock_origin_error_message() {
        let err = CacheError::ClockOrigin { origin: 7, max: 5 };
        assert_eq!(err.to_string(), "clock origin 7 exceeds the maximum of 5");
    }
}
