//! Verified interval arithmetic with directed rounding
//!
//! This crate provides closed real intervals `[lo, hi]` over two endpoint
//! backends, with every operation driven by an explicit [`ArithmeticContext`].
//!
//! # Features
//!
//! - **Endpoint backends**: hardware `f64` and arbitrary-precision decimal [`BigFloat`]
//! - **Rounding modes**: single-interval (nearest) or dual-interval (outward)
//! - **Four-corner arithmetic**: `+ - * /` with zero-containment checks on division
//! - **Text interchange**: `"[lo;hi]"` parsing and scientific `[LO;HI]` output
//!
//! # Example
//!
//! ```
//! use math_crout_interval::{ArithmeticContext, Interval};
//!
//! let ctx = ArithmeticContext::initialize::<f64>();
//! let x: Interval<f64> = Interval::parse("[1;2]", &ctx).unwrap();
//! let y = Interval::point(3.0);
//! let q = x.div(&y, &ctx).unwrap();
//! assert!(q.contains(&(1.0 / 3.0)));
//! ```

pub mod bound;
pub mod context;
pub mod error;
pub mod interval;
pub mod text;

pub use bound::{BigFloat, Bound};
pub use context::{ArithmeticContext, Direction, RoundingMode};
pub use error::{IntervalError, Result};
pub use interval::Interval;
pub use text::parse_interval;
