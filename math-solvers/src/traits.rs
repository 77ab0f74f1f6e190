//! Core traits for the Crout solvers
//!
//! This module defines the scalar abstraction the factorizations are written against:
//! - [`CroutField`]: field operations, pivot validity and rendering for one numeric
//!   representation
//!
//! Each solver family is written once over `CroutField` and instantiated for
//! hardware floats, arbitrary-precision decimals and verified intervals.

use crate::error::{Result, SolverError};
use math_crout_interval::{ArithmeticContext, BigFloat, Bound, Direction, Interval, parse_interval};
use num_traits::{Float, Zero};
use std::fmt::Debug;

/// Trait for scalar types usable in Crout factorization.
///
/// Operations take the representation's context explicitly. Hardware floats use
/// `()`; arbitrary-precision and interval types carry an [`ArithmeticContext`]
/// with the working precision and rounding mode.
///
/// # Implementations
///
/// Provided for:
/// - `f64` and `f32` (pivot valid iff nonzero)
/// - [`BigFloat`] (pivot valid iff nonzero, nearest rounding at the working precision)
/// - [`Interval<f64>`] and [`Interval<BigFloat>`] (pivot valid iff the interval
///   excludes zero)
pub trait CroutField: Clone + Debug + Send + Sync + 'static {
    /// Arithmetic settings shared by every operation of one solve
    type Context: Clone + Debug + Send + Sync;

    /// Additive identity
    fn zero(ctx: &Self::Context) -> Self;

    /// Multiplicative identity
    fn one(ctx: &Self::Context) -> Self;

    /// `self + rhs`
    fn add(&self, rhs: &Self, ctx: &Self::Context) -> Self;

    /// `self - rhs`
    fn sub(&self, rhs: &Self, ctx: &Self::Context) -> Self;

    /// `self * rhs`
    fn mul(&self, rhs: &Self, ctx: &Self::Context) -> Self;

    /// `self / rhs`, or `None` when `rhs` is not a valid pivot
    fn checked_div(&self, rhs: &Self, ctx: &Self::Context) -> Option<Self>;

    /// Whether this value may be used as a divisor
    fn is_valid_pivot(&self) -> bool;

    /// `false` if the value holds NaN or an infinity
    fn is_finite(&self) -> bool;

    /// Text for reports
    fn render(&self, ctx: &Self::Context) -> String;

    /// Read a value from its text form
    fn parse_value(text: &str, ctx: &Self::Context) -> Result<Self>;

    /// `self - Σ aᵢ·bᵢ`, subtracting one product at a time
    fn sub_products<'a, I>(&self, terms: I, ctx: &Self::Context) -> Self
    where
        Self: 'a,
        I: IntoIterator<Item = (&'a Self, &'a Self)>,
    {
        terms
            .into_iter()
            .fold(self.clone(), |acc, (a, b)| acc.sub(&a.mul(b, ctx), ctx))
    }
}

macro_rules! impl_float_field {
    ($t:ty, $digits:expr) => {
        impl CroutField for $t {
            type Context = ();

            #[inline]
            fn zero(_ctx: &()) -> Self {
                <$t as Zero>::zero()
            }

            #[inline]
            fn one(_ctx: &()) -> Self {
                1.0
            }

            #[inline]
            fn add(&self, rhs: &Self, _ctx: &()) -> Self {
                *self + *rhs
            }

            #[inline]
            fn sub(&self, rhs: &Self, _ctx: &()) -> Self {
                *self - *rhs
            }

            #[inline]
            fn mul(&self, rhs: &Self, _ctx: &()) -> Self {
                *self * *rhs
            }

            #[inline]
            fn checked_div(&self, rhs: &Self, _ctx: &()) -> Option<Self> {
                rhs.is_valid_pivot().then(|| *self / *rhs)
            }

            #[inline]
            fn is_valid_pivot(&self) -> bool {
                !Zero::is_zero(self)
            }

            #[inline]
            fn is_finite(&self) -> bool {
                Float::is_finite(*self)
            }

            fn render(&self, _ctx: &()) -> String {
                Bound::to_scientific(&f64::from(*self), $digits, Direction::Nearest)
            }

            fn parse_value(text: &str, _ctx: &()) -> Result<Self> {
                text.trim().parse::<$t>().map_err(|e| {
                    SolverError::Parse(format!("cannot parse '{}' as a number: {e}", text.trim()))
                })
            }
        }
    };
}

impl_float_field!(f64, 16);
impl_float_field!(f32, 7);

impl CroutField for BigFloat {
    type Context = ArithmeticContext;

    fn zero(_ctx: &ArithmeticContext) -> Self {
        <BigFloat as Bound>::zero()
    }

    fn one(_ctx: &ArithmeticContext) -> Self {
        <BigFloat as Bound>::one()
    }

    fn add(&self, rhs: &Self, ctx: &ArithmeticContext) -> Self {
        self.add_rounded(rhs, Direction::Nearest, ctx.precision)
    }

    fn sub(&self, rhs: &Self, ctx: &ArithmeticContext) -> Self {
        self.sub_rounded(rhs, Direction::Nearest, ctx.precision)
    }

    fn mul(&self, rhs: &Self, ctx: &ArithmeticContext) -> Self {
        self.mul_rounded(rhs, Direction::Nearest, ctx.precision)
    }

    fn checked_div(&self, rhs: &Self, ctx: &ArithmeticContext) -> Option<Self> {
        rhs.is_valid_pivot()
            .then(|| self.div_rounded(rhs, Direction::Nearest, ctx.precision))
    }

    fn is_valid_pivot(&self) -> bool {
        !Bound::is_zero(self)
    }

    fn is_finite(&self) -> bool {
        Bound::is_finite(self)
    }

    fn render(&self, ctx: &ArithmeticContext) -> String {
        self.to_scientific(ctx.out_digits, Direction::Nearest)
    }

    fn parse_value(text: &str, ctx: &ArithmeticContext) -> Result<Self> {
        Ok(BigFloat::parse_directed(text.trim(), Direction::Nearest, ctx.precision)?)
    }
}

impl<B: Bound> CroutField for Interval<B> {
    type Context = ArithmeticContext;

    fn zero(_ctx: &ArithmeticContext) -> Self {
        Interval::zero()
    }

    fn one(_ctx: &ArithmeticContext) -> Self {
        Interval::one()
    }

    fn add(&self, rhs: &Self, ctx: &ArithmeticContext) -> Self {
        Interval::add(self, rhs, ctx)
    }

    fn sub(&self, rhs: &Self, ctx: &ArithmeticContext) -> Self {
        Interval::sub(self, rhs, ctx)
    }

    fn mul(&self, rhs: &Self, ctx: &ArithmeticContext) -> Self {
        Interval::mul(self, rhs, ctx)
    }

    fn checked_div(&self, rhs: &Self, ctx: &ArithmeticContext) -> Option<Self> {
        self.div(rhs, ctx).ok()
    }

    fn is_valid_pivot(&self) -> bool {
        !self.contains_zero()
    }

    fn is_finite(&self) -> bool {
        Interval::is_finite(self)
    }

    fn render(&self, ctx: &ArithmeticContext) -> String {
        self.format(ctx)
    }

    fn parse_value(text: &str, ctx: &ArithmeticContext) -> Result<Self> {
        Ok(parse_interval(text, ctx)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_f64_field() {
        let x: f64 = 3.0;
        assert_relative_eq!(x.mul(&2.0, &()), 6.0);
        assert_relative_eq!(x.checked_div(&4.0, &()).unwrap(), 0.75);
        assert!(x.checked_div(&0.0, &()).is_none());
        assert!(!0.0_f64.is_valid_pivot());
        assert!(!f64::NAN.is_finite());
        assert_eq!(1.5_f64.render(&()), "1.5000000000000000E+000");
    }

    #[test]
    fn test_f32_field() {
        let x: f32 = 0.5;
        assert!(x.is_valid_pivot());
        assert_eq!(x.render(&()), "5.0000000E-001");
    }

    #[test]
    fn test_parse_value() {
        assert_relative_eq!(f64::parse_value(" 2.5e-1 ", &()).unwrap(), 0.25);
        let err = f64::parse_value("x", &()).unwrap_err();
        assert!(err.is_parse_error());

        let ctx = ArithmeticContext::initialize::<f64>();
        let iv = Interval::<f64>::parse_value("[1;2]", &ctx).unwrap();
        assert_eq!(iv, Interval::new(1.0, 2.0).unwrap());
        let err = Interval::<f64>::parse_value("[2;1]", &ctx).unwrap_err();
        assert!(err.is_parse_error());

        let big_ctx = ArithmeticContext::initialize::<BigFloat>();
        let big = BigFloat::parse_value("1.5", &big_ctx).unwrap();
        assert_eq!(big.render(&big_ctx), "1.50000000000000000E+000");
    }

    #[test]
    fn test_sub_products() {
        let terms = [(2.0_f64, 3.0), (1.0, 4.0)];
        let r = 10.0_f64.sub_products(terms.iter().map(|(a, b)| (a, b)), &());
        assert_relative_eq!(r, 0.0);
    }

    #[test]
    fn test_big_field_uses_working_precision() {
        let ctx = ArithmeticContext::initialize::<BigFloat>()
            .with_precision(10)
            .unwrap();
        let one = <BigFloat as CroutField>::one(&ctx);
        let three = one.add(&one, &ctx).add(&one, &ctx);
        let third = one.checked_div(&three, &ctx).unwrap();
        assert_eq!(third.render(&ctx), "3.33333333300000000E-001");
        assert!(one.checked_div(&<BigFloat as CroutField>::zero(&ctx), &ctx).is_none());
    }

    #[test]
    fn test_interval_pivot_validity() {
        let ctx = ArithmeticContext::initialize::<f64>();
        let straddles = Interval::new(-1.0, 1.0).unwrap();
        let positive = Interval::new(0.5, 1.0).unwrap();
        assert!(!straddles.is_valid_pivot());
        assert!(positive.is_valid_pivot());
        assert!(Interval::one().checked_div(&straddles, &ctx).is_none());
        let q = Interval::one().checked_div(&positive, &ctx).unwrap();
        assert!(q.contains(&1.0) && q.contains(&2.0));

        // 0·∞ leaves no usable pivot
        let unbounded = Interval::new(1.0, f64::INFINITY).unwrap();
        let product = CroutField::mul(&Interval::new(0.0, 1.0).unwrap(), &unbounded, &ctx);
        assert!(!product.is_valid_pivot());
        assert!(!CroutField::is_finite(&product));
    }
}
