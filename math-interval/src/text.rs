//! Text interchange format for intervals
//!
//! Accepted input: `"[lo;hi]"` or `"lo;hi"`, with `,` as an alias for `;` and
//! all whitespace ignored. A bare number `v` becomes `[v - eps, v + eps]`.
//! Reversed bounds are rejected, never swapped.
//!
//! Output: `"[LO;HI]"` with both endpoints in uppercase scientific notation
//! and a signed 3-digit exponent, e.g. `[1.2500E+000;1.2501E+000]`.

use crate::bound::Bound;
use crate::context::ArithmeticContext;
use crate::error::{IntervalError, Result};
use crate::interval::Interval;

/// Parse an interval from its text form.
///
/// In dual-interval mode the lower bound is rounded down and the upper bound
/// up, so the result encloses the decimal values written in the text.
pub fn parse_interval<B: Bound>(text: &str, ctx: &ArithmeticContext) -> Result<Interval<B>> {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return Err(IntervalError::parse(text, "empty input"));
    }

    let inner = match (compact.strip_prefix('['), compact.ends_with(']')) {
        (Some(rest), true) => &rest[..rest.len() - 1],
        (None, false) => compact.as_str(),
        _ => return Err(IntervalError::parse(&compact, "unbalanced brackets")),
    };
    let normalized = inner.replace(',', ";");
    let fields: Vec<&str> = normalized.split(';').collect();

    match fields.as_slice() {
        [single] => {
            if single.is_empty() {
                return Err(IntervalError::parse(&compact, "missing value"));
            }
            let (down, up) = (ctx.lower_direction(), ctx.upper_direction());
            let eps = B::epsilon(ctx.precision);
            let lo = B::parse_directed(single, down, ctx.precision)?;
            let hi = B::parse_directed(single, up, ctx.precision)?;
            Interval::new(
                lo.sub_rounded(&eps, down, ctx.precision),
                hi.add_rounded(&eps, up, ctx.precision),
            )
        }
        [lo, hi] => {
            if lo.is_empty() || hi.is_empty() {
                return Err(IntervalError::parse(&compact, "missing bound"));
            }
            let lo = B::parse_directed(lo, ctx.lower_direction(), ctx.precision)?;
            let hi = B::parse_directed(hi, ctx.upper_direction(), ctx.precision)?;
            Interval::new(lo, hi)
        }
        _ => Err(IntervalError::parse(
            &compact,
            format!("expected 1 or 2 fields, found {}", fields.len()),
        )),
    }
}

impl<B: Bound> Interval<B> {
    /// Read an interval from text, see [`parse_interval`]
    pub fn parse(text: &str, ctx: &ArithmeticContext) -> Result<Self> {
        parse_interval(text, ctx)
    }

    /// Endpoints in scientific notation, rounded outward in dual mode
    pub fn format_endpoints(&self, ctx: &ArithmeticContext) -> (String, String) {
        (
            self.lo().to_scientific(ctx.out_digits, ctx.lower_direction()),
            self.hi().to_scientific(ctx.out_digits, ctx.upper_direction()),
        )
    }

    /// `[LO;HI]` interchange string
    pub fn format(&self, ctx: &ArithmeticContext) -> String {
        let (lo, hi) = self.format_endpoints(ctx);
        format!("[{lo};{hi}]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bound::BigFloat;
    use crate::context::RoundingMode;

    fn ctx() -> ArithmeticContext {
        ArithmeticContext::initialize::<f64>()
    }

    #[test]
    fn test_parse_bracketed_and_bare_pairs() {
        let ctx = ctx();
        let a: Interval<f64> = parse_interval("[1.5;2.5]", &ctx).unwrap();
        let b: Interval<f64> = parse_interval(" 1.5 ; 2.5 ", &ctx).unwrap();
        let c: Interval<f64> = parse_interval("[1.5, 2.5]", &ctx).unwrap();
        assert_eq!(a, b);
        assert_eq!(a, c);
        assert_eq!(*a.lo(), 1.5);
        assert_eq!(*a.hi(), 2.5);
    }

    #[test]
    fn test_parse_scientific() {
        let ctx = ctx();
        let x: Interval<f64> = parse_interval("[-1.0E+000;2.5e-1]", &ctx).unwrap();
        assert_eq!(*x.lo(), -1.0);
        assert_eq!(*x.hi(), 0.25);
    }

    #[test]
    fn test_parse_single_value_is_widened() {
        let ctx = ctx();
        let x: Interval<f64> = parse_interval("2", &ctx).unwrap();
        assert!(x.contains(&2.0));
        assert!(!x.is_degenerate());
        assert!(*x.lo() >= 2.0 - 4.0 * f64::EPSILON);
    }

    #[test]
    fn test_parse_decimal_is_enclosed() {
        let ctx = ctx();
        let x: Interval<f64> = parse_interval("[0.1;0.1]", &ctx).unwrap();
        assert!(x.contains(&0.1));
        assert!(!x.is_degenerate());

        let single = ctx.with_rounding_mode(RoundingMode::SingleInterval);
        let y: Interval<f64> = parse_interval("[0.1;0.1]", &single).unwrap();
        assert!(y.is_degenerate());
    }

    #[test]
    fn test_parse_underflowing_value_stays_off_zero() {
        let ctx = ctx();
        let x: Interval<f64> = parse_interval("[1e-400;1e-400]", &ctx).unwrap();
        assert_eq!(*x.lo(), 0.0);
        assert!(*x.hi() > 0.0);

        let y: Interval<f64> = parse_interval("[-1e-400;-1e-400]", &ctx).unwrap();
        assert!(*y.lo() < 0.0);
        assert_eq!(*y.hi(), 0.0);
    }

    #[test]
    fn test_parse_huge_exponent_is_error() {
        let ctx = ArithmeticContext::initialize::<BigFloat>();
        for bad in ["1e9223372036854775807", "[1;1e9223372036854775807]", "5.5e-9223372036854775808"] {
            let err = parse_interval::<BigFloat>(bad, &ctx).unwrap_err();
            assert!(err.is_parse_error(), "{bad:?} gave {err}");
        }
    }

    #[test]
    fn test_parse_rejects_malformed_input() {
        let ctx = ctx();
        for bad in ["", "   ", "[]", "[1;2", "1;2]", "[1;2;3]", "[a;2]", "[1;]", ";", "1..2"] {
            let result: Result<Interval<f64>> = parse_interval(bad, &ctx);
            let err = result.unwrap_err();
            assert!(err.is_parse_error(), "{bad:?} gave {err}");
        }
    }

    #[test]
    fn test_parse_rejects_reversed_bounds() {
        let ctx = ctx();
        let err = parse_interval::<f64>("[3;1]", &ctx).unwrap_err();
        assert!(matches!(err, IntervalError::InvalidBounds { .. }));
    }

    #[test]
    fn test_format_three_digit_exponent() {
        let ctx = ctx().with_out_digits(4).unwrap();
        let x = Interval::new(1.25, 2.0).unwrap();
        assert_eq!(x.format(&ctx), "[1.2500E+000;2.0000E+000]");

        let y = Interval::new(-0.001, 1234.0).unwrap();
        let (lo, hi) = y.format_endpoints(&ctx);
        // -0.001 is slightly below -1/1000 in binary, so it rounds away
        assert_eq!(lo, "-1.0001E-003");
        assert_eq!(hi, "1.2340E+003");
    }

    #[test]
    fn test_format_then_parse_encloses_original() {
        let ctx = ctx().with_out_digits(6).unwrap();
        let original = Interval::point(1.0).div(&Interval::point(3.0), &ctx).unwrap();
        let text = original.format(&ctx);
        let parsed: Interval<f64> = parse_interval(&text, &ctx).unwrap();
        assert!(original.is_subset_of(&parsed));
        assert!(parsed.width(&ctx) < 1e-5);
    }

    #[test]
    fn test_big_round_trip() {
        let ctx = ArithmeticContext::initialize::<BigFloat>();
        let x: Interval<BigFloat> = parse_interval("[1;3]", &ctx).unwrap();
        let third = Interval::one().div(&x, &ctx).unwrap();
        let text = third.format(&ctx);
        assert_eq!(text, "[3.33333333333333333E-001;1.00000000000000000E+000]");
        let parsed: Interval<BigFloat> = parse_interval(&text, &ctx).unwrap();
        assert!(third.is_subset_of(&parsed));
    }
}
