//! Error types for interval arithmetic.
//!
//! Structured errors for interval construction, division and the text
//! interchange format, using `thiserror` with helper methods for error
//! categorization.

use thiserror::Error;

/// Errors that can occur while building or operating on intervals.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntervalError {
    /// The divisor interval contains zero.
    #[error("division by interval containing zero: [{lo};{hi}]")]
    DivisionByZero {
        /// Lower bound of the divisor
        lo: String,
        /// Upper bound of the divisor
        hi: String,
    },

    /// Text could not be read as an interval or an endpoint.
    #[error("cannot parse '{input}' as an interval: {reason}")]
    Parse {
        /// The offending input, after whitespace stripping
        input: String,
        /// Why it was rejected
        reason: String,
    },

    /// Lower bound exceeds upper bound.
    #[error("invalid interval bounds: lower ({lo}) > upper ({hi})")]
    InvalidBounds {
        /// The lower bound as given
        lo: String,
        /// The upper bound as given
        hi: String,
    },

    /// Working precision or output digit count is zero.
    #[error("invalid precision: {digits} digits (must be >= 1)")]
    InvalidPrecision {
        /// The rejected digit count
        digits: usize,
    },
}

/// A specialized `Result` type for interval operations.
pub type Result<T> = std::result::Result<T, IntervalError>;

impl IntervalError {
    pub(crate) fn parse(input: &str, reason: impl Into<String>) -> Self {
        IntervalError::Parse {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    /// Returns `true` if a divisor contained zero.
    pub fn is_division_error(&self) -> bool {
        matches!(self, IntervalError::DivisionByZero { .. })
    }

    /// Returns `true` if this error came from reading text.
    ///
    /// This includes `Parse` and `InvalidBounds`, since reversed bounds are
    /// rejected at the text boundary.
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            IntervalError::Parse { .. } | IntervalError::InvalidBounds { .. }
        )
    }

    /// Returns `true` if this is a context configuration error.
    pub fn is_config_error(&self) -> bool {
        matches!(self, IntervalError::InvalidPrecision { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IntervalError::DivisionByZero {
            lo: "-1".to_string(),
            hi: "2".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "division by interval containing zero: [-1;2]"
        );
    }

    #[test]
    fn test_bounds_error_display() {
        let err = IntervalError::InvalidBounds {
            lo: "3".to_string(),
            hi: "1".to_string(),
        };
        assert!(err.to_string().contains("lower (3) > upper (1)"));
    }

    #[test]
    fn test_classification() {
        let parse = IntervalError::parse("[1;x]", "bad upper bound");
        let bounds = IntervalError::InvalidBounds {
            lo: "2".to_string(),
            hi: "1".to_string(),
        };
        let div = IntervalError::DivisionByZero {
            lo: "0".to_string(),
            hi: "0".to_string(),
        };
        let config = IntervalError::InvalidPrecision { digits: 0 };

        assert!(parse.is_parse_error());
        assert!(bounds.is_parse_error());
        assert!(!div.is_parse_error());
        assert!(div.is_division_error());
        assert!(config.is_config_error());
        assert!(!parse.is_config_error());
    }
}
