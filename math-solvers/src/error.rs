//! Error and status types for the Crout solvers.
//!
//! Fatal conditions (bad shapes, singular pivots, interval division by zero)
//! are [`SolverError`] values. A solve that finishes but yields NaN or an
//! infinity is not an error; it is reported through [`SolveStatus`].

use math_crout_interval::IntervalError;
use std::fmt;
use thiserror::Error;

/// Phase of a solve, attached to singular-pivot errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStage {
    /// Building the triangular factors
    Decomposing,
    /// Solving `L·y = b`
    ForwardSubstituting,
    /// Solving `D·z = y` (symmetric solver only)
    DiagonalScaling,
    /// Solving `U·x = y`
    BackSubstituting,
}

impl fmt::Display for SolveStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SolveStage::Decomposing => "decomposition",
            SolveStage::ForwardSubstituting => "forward substitution",
            SolveStage::DiagonalScaling => "diagonal scaling",
            SolveStage::BackSubstituting => "back substitution",
        };
        f.write_str(name)
    }
}

/// Errors that can occur while factoring or solving a system.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolverError {
    /// Input shapes violate the solver's preconditions.
    #[error("dimension mismatch for {what}: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Which input had the wrong size
        what: &'static str,
        /// Required size
        expected: usize,
        /// Size supplied
        got: usize,
    },

    /// A diagonal pivot failed the representation's validity test.
    #[error("singular pivot at index {index} during {stage}")]
    SingularPivot {
        /// Where the pivot was rejected
        stage: SolveStage,
        /// Row of the rejected pivot
        index: usize,
    },

    /// An interval divisor contained zero.
    #[error("division by interval containing zero: [{lo};{hi}]")]
    DivisionByZeroInterval {
        /// Lower bound of the divisor
        lo: String,
        /// Upper bound of the divisor
        hi: String,
    },

    /// An input value could not be read.
    #[error("parse error: {0}")]
    Parse(String),

    /// Working precision or output digits are unusable.
    #[error("invalid arithmetic context: {0}")]
    InvalidContext(String),
}

/// A specialized `Result` type for solver operations.
pub type Result<T> = std::result::Result<T, SolverError>;

impl SolverError {
    /// Returns `true` if an input had the wrong shape.
    pub fn is_dimension_error(&self) -> bool {
        matches!(self, SolverError::DimensionMismatch { .. })
    }

    /// Returns `true` if the system was found singular.
    ///
    /// An interval divisor containing zero counts as singular.
    pub fn is_singular(&self) -> bool {
        matches!(
            self,
            SolverError::SingularPivot { .. } | SolverError::DivisionByZeroInterval { .. }
        )
    }

    /// Returns `true` if this error came from reading input text.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, SolverError::Parse(_))
    }

    /// Numeric status code: 1 for bad input, 3 for singular systems.
    pub fn code(&self) -> i32 {
        if self.is_singular() { 3 } else { 1 }
    }
}

impl From<IntervalError> for SolverError {
    fn from(err: IntervalError) -> Self {
        match err {
            IntervalError::DivisionByZero { lo, hi } => {
                SolverError::DivisionByZeroInterval { lo, hi }
            }
            IntervalError::InvalidPrecision { .. } => SolverError::InvalidContext(err.to_string()),
            IntervalError::Parse { .. } | IntervalError::InvalidBounds { .. } => {
                SolverError::Parse(err.to_string())
            }
        }
    }
}

/// Outcome of a solve that ran to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    /// Every entry of `x` is finite
    Solved,
    /// `x[index]` is the first NaN or infinite entry
    NonFinite {
        /// Position of the first non-finite entry
        index: usize,
    },
}

impl SolveStatus {
    /// Numeric status code: 0 solved, 2 non-finite result.
    pub fn code(&self) -> i32 {
        match self {
            SolveStatus::Solved => 0,
            SolveStatus::NonFinite { .. } => 2,
        }
    }

    /// Returns `true` for a clean solve.
    pub fn is_solved(&self) -> bool {
        matches!(self, SolveStatus::Solved)
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveStatus::Solved => write!(f, "solved"),
            SolveStatus::NonFinite { index } => {
                write!(f, "non-finite value in solution at index {index}")
            }
        }
    }
}
