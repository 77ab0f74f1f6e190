//! Endpoint scalar backends with directed rounding
//!
//! An interval endpoint is one of:
//! - `f64`: hardware doubles. Rust offers no control over the FPU rounding
//!   mode, so each operation is computed to nearest and its exact error term
//!   (TwoSum for sums, FMA residuals for products and quotients) decides
//!   whether the result is stepped one ulp toward the requested direction.
//! - [`BigFloat`]: an arbitrary-precision decimal float. Directed results use
//!   the backend's native rounding modes at the working precision.

use crate::context::Direction;
use crate::error::{IntervalError, Result};
use dashu_float::round::Round;
use dashu_float::round::mode::{Down, HalfAway, Up};
use dashu_float::{DBig, FBig};
use dashu_int::IBig;
use std::fmt::{Debug, Display};
use std::str::FromStr;

/// Arbitrary-precision decimal float used as the high-precision backend
pub type BigFloat = DBig;

/// Significant digits printed exactly for any finite `f64`
const F64_EXACT_DIGITS: usize = 780;

/// Scalar type usable as an interval endpoint.
///
/// All arithmetic takes a rounding [`Direction`] and a working precision in
/// significant decimal digits. Backends with a fixed precision ignore it.
pub trait Bound: Clone + PartialOrd + Debug + Display + Send + Sync + 'static {
    /// Working precision chosen by `ArithmeticContext::initialize`
    const DEFAULT_PRECISION: usize;
    /// Output digits chosen by `ArithmeticContext::initialize`
    const DEFAULT_OUT_DIGITS: usize;

    /// Additive identity
    fn zero() -> Self;

    /// Multiplicative identity
    fn one() -> Self;

    /// `self + rhs` rounded in `direction`
    fn add_rounded(&self, rhs: &Self, direction: Direction, precision: usize) -> Self;

    /// `self - rhs` rounded in `direction`
    fn sub_rounded(&self, rhs: &Self, direction: Direction, precision: usize) -> Self;

    /// `self * rhs` rounded in `direction`
    fn mul_rounded(&self, rhs: &Self, direction: Direction, precision: usize) -> Self;

    /// `self / rhs` rounded in `direction`.
    ///
    /// The divisor must be nonzero; callers check pivots and interval
    /// divisors before dividing.
    fn div_rounded(&self, rhs: &Self, direction: Direction, precision: usize) -> Self;

    /// Exact negation
    fn negated(&self) -> Self;

    /// Machine epsilon at the given precision
    fn epsilon(precision: usize) -> Self;

    /// Read a decimal or scientific number, rounding in `direction`
    fn parse_directed(text: &str, direction: Direction, precision: usize) -> Result<Self>;

    /// Convert from a double
    fn from_f64(value: f64, precision: usize) -> Result<Self>;

    /// Nearest double
    fn as_f64(&self) -> f64;

    /// `false` for NaN and infinities
    fn is_finite(&self) -> bool {
        true
    }

    /// `true` for an exact zero
    fn is_zero(&self) -> bool;

    /// Uppercase scientific notation with `out_digits` digits after the point
    /// and a signed 3-digit exponent, rounded in `direction`
    fn to_scientific(&self, out_digits: usize, direction: Direction) -> String;
}

// ---------------------------------------------------------------------------
// f64
// ---------------------------------------------------------------------------

/// Step a rounded-to-nearest result toward `direction` given the sign of
/// `exact - value`
#[inline]
fn adjust_f64(value: f64, error: f64, direction: Direction) -> f64 {
    if value.is_infinite() {
        // Overflow: the largest finite double bounds the exact result
        return match direction {
            Direction::Down if value > 0.0 => f64::MAX,
            Direction::Up if value < 0.0 => f64::MIN,
            _ => value,
        };
    }
    match direction {
        Direction::Down if error < 0.0 => value.next_down(),
        Direction::Up if error > 0.0 => value.next_up(),
        _ => value,
    }
}

/// Results in the subnormal range have no exact FMA residual
#[inline]
fn tiny_f64(value: f64) -> bool {
    value.abs() < f64::MIN_POSITIVE
}

#[inline]
fn step_f64(value: f64, direction: Direction) -> f64 {
    match direction {
        Direction::Down => value.next_down(),
        Direction::Up => value.next_up(),
        Direction::Nearest => value,
    }
}

impl Bound for f64 {
    const DEFAULT_PRECISION: usize = 16;
    const DEFAULT_OUT_DIGITS: usize = 16;

    fn zero() -> Self {
        0.0
    }

    fn one() -> Self {
        1.0
    }

    fn add_rounded(&self, rhs: &Self, direction: Direction, _precision: usize) -> Self {
        let (a, b) = (*self, *rhs);
        let sum = a + b;
        if direction == Direction::Nearest {
            return sum;
        }
        // TwoSum
        let bb = sum - a;
        let error = (a - (sum - bb)) + (b - bb);
        adjust_f64(sum, error, direction)
    }

    fn sub_rounded(&self, rhs: &Self, direction: Direction, precision: usize) -> Self {
        self.add_rounded(&-*rhs, direction, precision)
    }

    fn mul_rounded(&self, rhs: &Self, direction: Direction, _precision: usize) -> Self {
        let (a, b) = (*self, *rhs);
        let product = a * b;
        if direction == Direction::Nearest {
            return product;
        }
        if tiny_f64(product) && a != 0.0 && b != 0.0 {
            return step_f64(product, direction);
        }
        let error = a.mul_add(b, -product);
        adjust_f64(product, error, direction)
    }

    fn div_rounded(&self, rhs: &Self, direction: Direction, _precision: usize) -> Self {
        let (a, b) = (*self, *rhs);
        let quotient = a / b;
        if direction == Direction::Nearest || !quotient.is_finite() && b == 0.0 {
            return quotient;
        }
        if tiny_f64(quotient) && a != 0.0 {
            return step_f64(quotient, direction);
        }
        // a - q*b is exact, and a/b - q has the sign of remainder/b
        let remainder = (-quotient).mul_add(b, a);
        let error = if remainder == 0.0 {
            0.0
        } else if (remainder > 0.0) == (b > 0.0) {
            1.0
        } else {
            -1.0
        };
        adjust_f64(quotient, error, direction)
    }

    fn negated(&self) -> Self {
        -*self
    }

    fn epsilon(_precision: usize) -> Self {
        f64::EPSILON
    }

    fn parse_directed(text: &str, direction: Direction, _precision: usize) -> Result<Self> {
        let value: f64 = text
            .parse()
            .map_err(|e: std::num::ParseFloatError| IntervalError::parse(text, e.to_string()))?;
        if !value.is_finite() {
            return Err(IntervalError::parse(text, "endpoint is not finite"));
        }
        if direction == Direction::Nearest {
            return Ok(value);
        }
        let (negative, digits, _) = decimal_parts_text(text)
            .ok_or_else(|| IntervalError::parse(text, "not a decimal number"))?;
        if value == 0.0 {
            // Nonzero input that underflowed keeps its sign side of zero
            return Ok(match (digits == "0", negative, direction) {
                (true, _, _) => value,
                (false, false, Direction::Up) => value.next_up(),
                (false, true, Direction::Down) => (-0.0_f64).next_down(),
                (false, _, _) => 0.0,
            });
        }
        // Decimal input is exact only when its digits match the double's expansion
        let exact = decimal_parts_f64(value)
            .is_some_and(|(neg, digits, exp)| same_decimal(text, neg, &digits, exp));
        Ok(if exact {
            value
        } else {
            step_f64(value, direction)
        })
    }

    fn from_f64(value: f64, _precision: usize) -> Result<Self> {
        Ok(value)
    }

    fn as_f64(&self) -> f64 {
        *self
    }

    fn is_finite(&self) -> bool {
        f64::is_finite(*self)
    }

    fn is_zero(&self) -> bool {
        *self == 0.0
    }

    fn to_scientific(&self, out_digits: usize, direction: Direction) -> String {
        if self.is_nan() {
            return "NAN".to_string();
        }
        if self.is_infinite() {
            return if *self > 0.0 { "INF" } else { "-INF" }.to_string();
        }
        match decimal_parts_f64(*self) {
            Some((negative, digits, exp10)) => {
                render_scientific(negative, &digits, exp10, out_digits, direction)
            }
            None => render_scientific(false, "0", 0, out_digits, direction),
        }
    }
}

/// Exact decimal expansion of a finite nonzero double as
/// `(negative, significant digits, exponent of the first digit)`
fn decimal_parts_f64(value: f64) -> Option<(bool, String, i64)> {
    if value == 0.0 || !value.is_finite() {
        return None;
    }
    let text = format!("{:.*e}", F64_EXACT_DIGITS, value.abs());
    let (mantissa, exponent) = text.split_once('e')?;
    let exp10: i64 = exponent.parse().ok()?;
    let digits: String = mantissa.chars().filter(|c| c.is_ascii_digit()).collect();
    let digits = digits.trim_end_matches('0');
    Some((value < 0.0, digits.to_string(), exp10))
}

/// Compare decimal text against an exact `(negative, digits, exp10)` value
fn same_decimal(text: &str, negative: bool, digits: &str, exp10: i64) -> bool {
    match decimal_parts_text(text) {
        Some((neg, d, e)) => d == digits && (d == "0" || (neg == negative && e == exp10)),
        None => false,
    }
}

/// Normalise decimal text (`-12.50e3`) into `(negative, digits, exp10)`
fn decimal_parts_text(text: &str) -> Option<(bool, String, i64)> {
    let text = text.trim();
    let (negative, body) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let (mantissa, exponent) = match body.find(['e', 'E']) {
        Some(pos) => (&body[..pos], body[pos + 1..].parse::<i64>().ok()?),
        None => (body, 0),
    };
    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    if !int_part.chars().chain(frac_part.chars()).all(|c| c.is_ascii_digit()) {
        return None;
    }
    let all: String = format!("{int_part}{frac_part}");
    let leading = all.len() - all.trim_start_matches('0').len();
    let digits = all.trim_start_matches('0').trim_end_matches('0');
    if digits.is_empty() {
        return Some((negative, "0".to_string(), 0));
    }
    let exp10 = exponent
        .checked_add(i64::try_from(int_part.len()).ok()?)?
        .checked_sub(1)?
        .checked_sub(i64::try_from(leading).ok()?)?;
    Some((negative, digits.to_string(), exp10))
}

// ---------------------------------------------------------------------------
// BigFloat
// ---------------------------------------------------------------------------

#[derive(Clone, Copy)]
enum Op {
    Add,
    Sub,
    Mul,
    Div,
}

/// Raise `x` to at least `precision` digits in rounding mode `R` (never rounds)
fn lift<R: Round>(x: &BigFloat, precision: usize) -> FBig<R, 10> {
    let precision = precision.max(x.precision()).max(1);
    x.clone().with_rounding::<R>().with_precision(precision).value()
}

fn apply<R: Round>(lhs: &BigFloat, rhs: &BigFloat, op: Op, precision: usize) -> BigFloat {
    let a = lift::<R>(lhs, precision);
    let b = lift::<R>(rhs, precision);
    let result = match op {
        Op::Add => a + b,
        Op::Sub => a - b,
        Op::Mul => a * b,
        Op::Div => a / b,
    };
    result
        .with_precision(precision.max(1))
        .value()
        .with_rounding::<HalfAway>()
}

fn directed(lhs: &BigFloat, rhs: &BigFloat, op: Op, direction: Direction, precision: usize) -> BigFloat {
    match direction {
        Direction::Down => apply::<Down>(lhs, rhs, op, precision),
        Direction::Up => apply::<Up>(lhs, rhs, op, precision),
        Direction::Nearest => apply::<HalfAway>(lhs, rhs, op, precision),
    }
}

fn round_to<R: Round>(x: BigFloat, precision: usize) -> BigFloat {
    x.with_rounding::<R>()
        .with_precision(precision.max(1))
        .value()
        .with_rounding::<HalfAway>()
}

/// `(negative, significant digits, exponent of the first digit)` of a big float
fn decimal_parts_big(value: &BigFloat) -> (bool, String, i64) {
    let repr = value.repr();
    let significand = repr.significand().to_string();
    let negative = significand.starts_with('-');
    let digits = significand.trim_start_matches('-');
    if digits.chars().all(|c| c == '0') {
        return (false, "0".to_string(), 0);
    }
    let trimmed = digits.trim_end_matches('0');
    let exp10 = repr.exponent() as i64 + digits.len() as i64 - 1;
    (negative, trimmed.to_string(), exp10)
}

impl Bound for BigFloat {
    const DEFAULT_PRECISION: usize = 40;
    const DEFAULT_OUT_DIGITS: usize = 17;

    fn zero() -> Self {
        BigFloat::ZERO
    }

    fn one() -> Self {
        BigFloat::ONE
    }

    fn add_rounded(&self, rhs: &Self, direction: Direction, precision: usize) -> Self {
        directed(self, rhs, Op::Add, direction, precision)
    }

    fn sub_rounded(&self, rhs: &Self, direction: Direction, precision: usize) -> Self {
        directed(self, rhs, Op::Sub, direction, precision)
    }

    fn mul_rounded(&self, rhs: &Self, direction: Direction, precision: usize) -> Self {
        directed(self, rhs, Op::Mul, direction, precision)
    }

    fn div_rounded(&self, rhs: &Self, direction: Direction, precision: usize) -> Self {
        debug_assert!(!Bound::is_zero(rhs), "division by zero endpoint");
        directed(self, rhs, Op::Div, direction, precision)
    }

    fn negated(&self) -> Self {
        -self.clone()
    }

    fn epsilon(precision: usize) -> Self {
        let exponent = 1 - precision.max(1) as isize;
        BigFloat::from_parts(IBig::ONE, exponent)
    }

    fn parse_directed(text: &str, direction: Direction, precision: usize) -> Result<Self> {
        let (negative, digits, exp10) = decimal_parts_text(text)
            .ok_or_else(|| IntervalError::parse(text, "not a decimal number"))?;
        let magnitude = IBig::from_str(&digits)
            .map_err(|e| IntervalError::parse(text, e.to_string()))?;
        let significand = if negative { -magnitude } else { magnitude };
        let exponent = i64::try_from(digits.len())
            .ok()
            .and_then(|len| exp10.checked_sub(len)?.checked_add(1))
            .and_then(|e| isize::try_from(e).ok())
            .ok_or_else(|| IntervalError::parse(text, "exponent out of range"))?;
        let value = BigFloat::from_parts(significand, exponent);
        Ok(match direction {
            Direction::Down => round_to::<Down>(value, precision),
            Direction::Up => round_to::<Up>(value, precision),
            Direction::Nearest => round_to::<HalfAway>(value, precision),
        })
    }

    fn from_f64(value: f64, precision: usize) -> Result<Self> {
        if !value.is_finite() {
            return Err(IntervalError::parse(&value.to_string(), "value is not finite"));
        }
        Self::parse_directed(&format!("{value:e}"), Direction::Nearest, precision)
    }

    fn as_f64(&self) -> f64 {
        let (negative, digits, exp10) = decimal_parts_big(self);
        let sign = if negative { "-" } else { "" };
        let (head, tail) = digits.split_at(1);
        format!("{sign}{head}.{tail}0e{exp10}")
            .parse()
            .unwrap_or(f64::NAN)
    }

    fn is_zero(&self) -> bool {
        *self == BigFloat::ZERO
    }

    fn to_scientific(&self, out_digits: usize, direction: Direction) -> String {
        let (negative, digits, exp10) = decimal_parts_big(self);
        render_scientific(negative, &digits, exp10, out_digits, direction)
    }
}

// ---------------------------------------------------------------------------
// Scientific rendering
// ---------------------------------------------------------------------------

/// Render `±d.ddd × 10^exp10` (exact `digits`) with `out_digits` fraction
/// digits, rounded in `direction`.
///
/// `Nearest` rounds half away from zero; `Down`/`Up` round toward -inf/+inf.
pub(crate) fn render_scientific(
    negative: bool,
    digits: &str,
    exp10: i64,
    out_digits: usize,
    direction: Direction,
) -> String {
    let significant = out_digits + 1;
    if digits == "0" {
        return format!("0.{}E+000", "0".repeat(out_digits));
    }

    let mut kept: Vec<u8> = digits.bytes().take(significant).collect();
    kept.resize(significant, b'0');
    let rest = digits.as_bytes().get(significant..).unwrap_or(&[]);
    let inexact = rest.iter().any(|&d| d != b'0');

    let bump = match direction {
        Direction::Nearest => rest.first().is_some_and(|&d| d >= b'5'),
        Direction::Down => inexact && negative,
        Direction::Up => inexact && !negative,
    };

    let mut exp10 = exp10;
    if bump {
        let mut carry = true;
        for d in kept.iter_mut().rev() {
            if *d == b'9' {
                *d = b'0';
            } else {
                *d += 1;
                carry = false;
                break;
            }
        }
        if carry {
            kept.insert(0, b'1');
            kept.truncate(significant);
            exp10 += 1;
        }
    }

    let sign = if negative { "-" } else { "" };
    let head = kept[0] as char;
    let tail: String = kept[1..].iter().map(|&d| d as char).collect();
    let exp_sign = if exp10 < 0 { '-' } else { '+' };
    if out_digits == 0 {
        format!("{sign}{head}E{exp_sign}{:03}", exp10.abs())
    } else {
        format!("{sign}{head}.{tail}E{exp_sign}{:03}", exp10.abs())
    }
}
