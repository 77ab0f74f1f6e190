//! Non-pivoting Crout solvers over floats, big decimals and verified intervals
//!
//! This crate provides three direct solvers for `A·x = b`, each written once
//! against the [`CroutField`] scalar trait and usable with every representation.
//!
//! # Features
//!
//! - **General solver**: `A = L·U`, unit lower `L`
//! - **Symmetric solver**: `A = L·D·Lᵀ`, half the work, no square roots
//! - **Tridiagonal solver**: Thomas algorithm in O(n)
//! - **Scalar types**: `f64`, `f32`, `BigFloat`, `Interval<f64>`, `Interval<BigFloat>`
//! - **Explicit status**: singular pivots are errors, NaN/Inf results are flagged
//!
//! # Example
//!
//! ```
//! use math_crout_solvers::factor_tridiagonal;
//! use ndarray::array;
//!
//! let f = factor_tridiagonal(
//!     &array![1.0_f64],
//!     &array![2.0, 2.0],
//!     &array![1.0],
//!     &array![3.0, 3.0],
//!     &(),
//! )?;
//! assert!((f.x[0] - 1.0).abs() < 1e-12);
//! # Ok::<(), math_crout_solvers::SolverError>(())
//! ```

pub mod config;
pub mod dense;
pub mod direct;
pub mod error;
pub mod report;
pub mod traits;

// Re-export main types
pub use error::{Result, SolveStage, SolveStatus, SolverError};
pub use traits::CroutField;

// Re-export direct solvers
pub use direct::{
    CroutLdlt, CroutLu, CroutTridiagonal, GeneralFactorization, SymmetricFactorization,
    TridiagonalFactorization, crout_factorize, factor_general, factor_symmetric,
    factor_tridiagonal, ldlt_factorize, tridiagonal_factorize,
};

pub use config::{Arithmetic, LinearSystem, Structure, SystemConfig};
pub use report::{Report, Solution, render_solution, run, solve_system};

// Interval types appear in every interval solve
pub use math_crout_interval::{ArithmeticContext, BigFloat, Interval, RoundingMode};
