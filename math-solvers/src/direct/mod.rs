//! Direct solvers for linear systems
//!
//! This module provides the non-pivoting Crout solvers:
//! - [`factor_general`]: `A = L·U` for any square matrix
//! - [`factor_symmetric`]: `A = L·D·Lᵀ` reading only the lower triangle
//! - [`factor_tridiagonal`]: O(n) band factorization (Thomas algorithm)
//!
//! Each family also has a factor-only entry point whose result can solve
//! further right-hand sides.

mod general;
mod symmetric;
mod tridiagonal;

pub use general::{CroutLu, GeneralFactorization, crout_factorize, factor_general};
pub use symmetric::{CroutLdlt, SymmetricFactorization, factor_symmetric, ldlt_factorize};
pub use tridiagonal::{
    CroutTridiagonal, TridiagonalFactorization, factor_tridiagonal, tridiagonal_factorize,
};
