//! Arithmetic context: working precision, output digits and rounding mode
//!
//! Every interval operation reads an [`ArithmeticContext`] passed in by the
//! caller. There is no process-wide state, so two solves with different
//! precisions or rounding modes can run side by side without interfering.

use crate::bound::Bound;
use crate::error::{IntervalError, Result};
use serde::{Deserialize, Serialize};

/// Interval arithmetic mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoundingMode {
    /// Ordinary interval arithmetic, endpoints rounded to nearest
    SingleInterval,
    /// Lower endpoint rounded toward -inf, upper toward +inf
    #[default]
    DualInterval,
}

/// Rounding direction for a single endpoint operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Toward negative infinity
    Down,
    /// Toward positive infinity
    Up,
    /// To nearest
    Nearest,
}

impl Direction {
    /// The opposite direction (`Nearest` is its own opposite)
    pub fn reverse(self) -> Self {
        match self {
            Direction::Down => Direction::Up,
            Direction::Up => Direction::Down,
            Direction::Nearest => Direction::Nearest,
        }
    }
}

/// Precision, output digits and rounding mode shared by a solving session
///
/// Deserialization goes through [`ArithmeticContext::new`], so zero precision
/// or zero output digits in a config file is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawContext")]
pub struct ArithmeticContext {
    /// Working precision in significant decimal digits (arbitrary-precision backend)
    pub precision: usize,
    /// Digits printed after the decimal point in scientific output
    pub out_digits: usize,
    /// Single- or dual-rounded interval arithmetic
    #[serde(default)]
    pub mode: RoundingMode,
}

/// Unvalidated wire form of [`ArithmeticContext`]
#[derive(Deserialize)]
struct RawContext {
    precision: usize,
    out_digits: usize,
    #[serde(default)]
    mode: RoundingMode,
}

impl TryFrom<RawContext> for ArithmeticContext {
    type Error = IntervalError;

    fn try_from(raw: RawContext) -> Result<Self> {
        Self::new(raw.precision, raw.out_digits, raw.mode)
    }
}

impl ArithmeticContext {
    /// Re-check a context whose public fields may have been set directly
    pub fn validated(&self) -> Result<()> {
        Self::new(self.precision, self.out_digits, self.mode).map(|_| ())
    }

    /// Create a context, rejecting zero precision or zero output digits
    pub fn new(precision: usize, out_digits: usize, mode: RoundingMode) -> Result<Self> {
        if precision == 0 {
            return Err(IntervalError::InvalidPrecision { digits: precision });
        }
        if out_digits == 0 {
            return Err(IntervalError::InvalidPrecision { digits: out_digits });
        }
        Ok(Self {
            precision,
            out_digits,
            mode,
        })
    }

    /// Context with the precision and output digits suited to backend `B`
    pub fn initialize<B: Bound>() -> Self {
        Self {
            precision: B::DEFAULT_PRECISION,
            out_digits: B::DEFAULT_OUT_DIGITS,
            mode: RoundingMode::default(),
        }
    }

    /// Switch between single- and dual-interval arithmetic
    pub fn set_rounding_mode(&mut self, mode: RoundingMode) {
        if self.mode != mode {
            log::debug!("interval rounding mode {:?} -> {:?}", self.mode, mode);
        }
        self.mode = mode;
    }

    /// Builder form of [`set_rounding_mode`](Self::set_rounding_mode)
    pub fn with_rounding_mode(mut self, mode: RoundingMode) -> Self {
        self.set_rounding_mode(mode);
        self
    }

    /// Replace the working precision
    pub fn with_precision(mut self, precision: usize) -> Result<Self> {
        if precision == 0 {
            return Err(IntervalError::InvalidPrecision { digits: precision });
        }
        self.precision = precision;
        Ok(self)
    }

    /// Replace the number of output digits
    pub fn with_out_digits(mut self, out_digits: usize) -> Result<Self> {
        if out_digits == 0 {
            return Err(IntervalError::InvalidPrecision { digits: out_digits });
        }
        self.out_digits = out_digits;
        Ok(self)
    }

    /// Rounding direction for lower endpoints
    #[inline]
    pub fn lower_direction(&self) -> Direction {
        match self.mode {
            RoundingMode::SingleInterval => Direction::Nearest,
            RoundingMode::DualInterval => Direction::Down,
        }
    }

    /// Rounding direction for upper endpoints
    #[inline]
    pub fn upper_direction(&self) -> Direction {
        match self.mode {
            RoundingMode::SingleInterval => Direction::Nearest,
            RoundingMode::DualInterval => Direction::Up,
        }
    }
}
