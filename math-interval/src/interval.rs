//! Closed real intervals `[lo, hi]` with outward-rounded arithmetic
//!
//! Products and quotients take the minimum and maximum over all four corner
//! results. There is no case split on operand signs.

use crate::bound::Bound;
use crate::context::{ArithmeticContext, Direction};
use crate::error::{IntervalError, Result};
use std::fmt;

/// Closed interval `{r : lo <= r <= hi}` over endpoint backend `B`
///
/// The invariant `lo <= hi` holds for every value produced by this module.
#[derive(Debug, Clone, PartialEq)]
pub struct Interval<B: Bound> {
    lo: B,
    hi: B,
}

#[allow(clippy::should_implement_trait)]
impl<B: Bound> Interval<B> {
    /// Create `[lo, hi]`, rejecting `lo > hi`
    pub fn new(lo: B, hi: B) -> Result<Self> {
        if lo > hi {
            return Err(IntervalError::InvalidBounds {
                lo: lo.to_string(),
                hi: hi.to_string(),
            });
        }
        Ok(Self { lo, hi })
    }

    /// Degenerate interval `[v, v]`
    pub fn point(value: B) -> Self {
        Self {
            lo: value.clone(),
            hi: value,
        }
    }

    /// `[v - eps, v + eps]` with `eps` the machine epsilon of the working precision
    pub fn widened_point(value: &B, ctx: &ArithmeticContext) -> Self {
        let eps = B::epsilon(ctx.precision);
        Self {
            lo: value.sub_rounded(&eps, ctx.lower_direction(), ctx.precision),
            hi: value.add_rounded(&eps, ctx.upper_direction(), ctx.precision),
        }
    }

    /// `[0, 0]`
    pub fn zero() -> Self {
        Self::point(B::zero())
    }

    /// `[1, 1]`
    pub fn one() -> Self {
        Self::point(B::one())
    }

    /// Lower endpoint
    #[inline]
    pub fn lo(&self) -> &B {
        &self.lo
    }

    /// Upper endpoint
    #[inline]
    pub fn hi(&self) -> &B {
        &self.hi
    }

    /// Split into `(lo, hi)`
    pub fn into_bounds(self) -> (B, B) {
        (self.lo, self.hi)
    }

    /// `[a + c, b + d]`
    pub fn add(&self, rhs: &Self, ctx: &ArithmeticContext) -> Self {
        Self {
            lo: self.lo.add_rounded(&rhs.lo, ctx.lower_direction(), ctx.precision),
            hi: self.hi.add_rounded(&rhs.hi, ctx.upper_direction(), ctx.precision),
        }
    }

    /// `[a - d, b - c]`
    pub fn sub(&self, rhs: &Self, ctx: &ArithmeticContext) -> Self {
        Self {
            lo: self.lo.sub_rounded(&rhs.hi, ctx.lower_direction(), ctx.precision),
            hi: self.hi.sub_rounded(&rhs.lo, ctx.upper_direction(), ctx.precision),
        }
    }

    /// `[-b, -a]`
    pub fn neg(&self) -> Self {
        Self {
            lo: self.hi.negated(),
            hi: self.lo.negated(),
        }
    }

    /// `[min(ac, ad, bc, bd), max(ac, ad, bc, bd)]`
    pub fn mul(&self, rhs: &Self, ctx: &ArithmeticContext) -> Self {
        let corners = [
            (&self.lo, &rhs.lo),
            (&self.lo, &rhs.hi),
            (&self.hi, &rhs.lo),
            (&self.hi, &rhs.hi),
        ];
        let lo = min_of(
            corners
                .iter()
                .map(|(x, y)| x.mul_rounded(y, ctx.lower_direction(), ctx.precision)),
        );
        let hi = max_of(
            corners
                .iter()
                .map(|(x, y)| x.mul_rounded(y, ctx.upper_direction(), ctx.precision)),
        );
        Self { lo, hi }
    }

    /// Multiply by the degenerate interval `[s, s]`
    pub fn scale(&self, scalar: &B, ctx: &ArithmeticContext) -> Self {
        self.mul(&Self::point(scalar.clone()), ctx)
    }

    /// `[min, max]` of the four corner quotients.
    ///
    /// Fails with [`IntervalError::DivisionByZero`] when `c <= 0 <= d`.
    pub fn div(&self, rhs: &Self, ctx: &ArithmeticContext) -> Result<Self> {
        if rhs.contains_zero() {
            return Err(IntervalError::DivisionByZero {
                lo: rhs.lo.to_string(),
                hi: rhs.hi.to_string(),
            });
        }
        let corners = [
            (&self.lo, &rhs.lo),
            (&self.lo, &rhs.hi),
            (&self.hi, &rhs.lo),
            (&self.hi, &rhs.hi),
        ];
        let lo = min_of(
            corners
                .iter()
                .map(|(x, y)| x.div_rounded(y, ctx.lower_direction(), ctx.precision)),
        );
        let hi = max_of(
            corners
                .iter()
                .map(|(x, y)| x.div_rounded(y, ctx.upper_direction(), ctx.precision)),
        );
        Ok(Self { lo, hi })
    }

    /// `lo <= 0 <= hi`; an interval containing zero is not a usable pivot.
    ///
    /// A NaN endpoint cannot exclude zero, so it counts as containing it.
    #[inline]
    pub fn contains_zero(&self) -> bool {
        if is_unordered(&self.lo) || is_unordered(&self.hi) {
            return true;
        }
        let zero = B::zero();
        self.lo <= zero && zero <= self.hi
    }

    /// `lo <= value <= hi`
    pub fn contains(&self, value: &B) -> bool {
        self.lo <= *value && *value <= self.hi
    }

    /// `self ⊆ other`
    pub fn is_subset_of(&self, other: &Self) -> bool {
        other.lo <= self.lo && self.hi <= other.hi
    }

    /// Smallest interval containing both
    pub fn hull(&self, other: &Self) -> Self {
        let lo = if self.lo <= other.lo { &self.lo } else { &other.lo };
        let hi = if self.hi >= other.hi { &self.hi } else { &other.hi };
        Self {
            lo: lo.clone(),
            hi: hi.clone(),
        }
    }

    /// `lo == hi`
    pub fn is_degenerate(&self) -> bool {
        self.lo == self.hi
    }

    /// Both endpoints finite
    pub fn is_finite(&self) -> bool {
        self.lo.is_finite() && self.hi.is_finite()
    }

    /// `hi - lo`, rounded up
    pub fn width(&self, ctx: &ArithmeticContext) -> B {
        self.hi
            .sub_rounded(&self.lo, ctx.upper_direction(), ctx.precision)
    }

    /// `(lo + hi) / 2`, rounded to nearest
    pub fn midpoint(&self, ctx: &ArithmeticContext) -> B {
        let nearest = Direction::Nearest;
        let two = B::one().add_rounded(&B::one(), nearest, ctx.precision);
        self.lo
            .add_rounded(&self.hi, nearest, ctx.precision)
            .div_rounded(&two, nearest, ctx.precision)
    }
}

/// Unordered with itself, i.e. NaN
#[inline]
fn is_unordered<B: Bound>(value: &B) -> bool {
    value.partial_cmp(value).is_none()
}

/// Smallest value, or the first NaN met
fn min_of<B: Bound>(values: impl Iterator<Item = B>) -> B {
    extreme_of(values, |candidate, best| candidate < best)
}

/// Largest value, or the first NaN met
fn max_of<B: Bound>(values: impl Iterator<Item = B>) -> B {
    extreme_of(values, |candidate, best| candidate > best)
}

fn extreme_of<B: Bound>(mut values: impl Iterator<Item = B>, better: impl Fn(&B, &B) -> bool) -> B {
    let mut best = values.next().unwrap_or_else(B::zero);
    if is_unordered(&best) {
        return best;
    }
    for value in values {
        if is_unordered(&value) {
            return value;
        }
        if better(&value, &best) {
            best = value;
        }
    }
    best
}

impl<B: Bound> fmt::Display for Interval<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{};{}]", self.lo, self.hi)
    }
}
