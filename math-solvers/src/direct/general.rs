//! General Crout solver: `A = L·U` without pivoting
//!
//! `L` is unit lower triangular and the pivots sit on the diagonal of `U`.
//! Row `k` of `U` is built before column `k` of `L`, and every pivot is
//! checked as soon as it is formed, so a zero in the last diagonal position
//! is caught during decomposition rather than in back substitution.

use crate::dense::{check_rhs, check_square, first_non_finite};
use crate::error::{Result, SolveStage, SolveStatus, SolverError};
use crate::traits::CroutField;
use ndarray::{Array1, Array2};

/// LU factors of a square matrix
#[derive(Debug, Clone)]
pub struct CroutLu<T: CroutField> {
    /// Unit lower triangular factor
    pub l: Array2<T>,
    /// Upper triangular factor holding the pivots
    pub u: Array2<T>,
    /// Matrix dimension
    pub n: usize,
}

/// Factors, intermediate and final solution of one general solve
#[derive(Debug, Clone)]
pub struct GeneralFactorization<T: CroutField> {
    /// Unit lower triangular factor
    pub l: Array2<T>,
    /// Upper triangular factor
    pub u: Array2<T>,
    /// Solution of `L·y = b`
    pub y: Array1<T>,
    /// Solution of `U·x = y`
    pub x: Array1<T>,
    /// Whether `x` is free of NaN and infinities
    pub status: SolveStatus,
}

impl<T: CroutField> CroutLu<T> {
    /// Solve `A·x = b` with the stored factors, returning `(y, x)`
    pub fn solve(&self, b: &Array1<T>, ctx: &T::Context) -> Result<(Array1<T>, Array1<T>)> {
        check_rhs(b, self.n)?;
        let n = self.n;

        // Forward substitution: L·y = b, unit diagonal
        let mut y: Array1<T> = Array1::from_elem(n, T::zero(ctx));
        for i in 0..n {
            y[i] = b[i].sub_products((0..i).map(|k| (&self.l[[i, k]], &y[k])), ctx);
        }

        // Back substitution: U·x = y
        let mut x: Array1<T> = Array1::from_elem(n, T::zero(ctx));
        for i in (0..n).rev() {
            let rhs = y[i].sub_products(((i + 1)..n).map(|k| (&self.u[[i, k]], &x[k])), ctx);
            x[i] = rhs
                .checked_div(&self.u[[i, i]], ctx)
                .ok_or(SolverError::SingularPivot {
                    stage: SolveStage::BackSubstituting,
                    index: i,
                })?;
        }

        Ok((y, x))
    }
}

/// Compute the Crout factors `L` (unit lower) and `U` of a square matrix
pub fn crout_factorize<T: CroutField>(a: &Array2<T>, ctx: &T::Context) -> Result<CroutLu<T>> {
    let n = check_square(a)?;
    log::debug!("general Crout factorization, n = {n}");

    let mut l = Array2::from_elem((n, n), T::zero(ctx));
    let mut u = Array2::from_elem((n, n), T::zero(ctx));

    for k in 0..n {
        l[[k, k]] = T::one(ctx);

        // U row
        for j in k..n {
            u[[k, j]] = a[[k, j]].sub_products((0..k).map(|m| (&l[[k, m]], &u[[m, j]])), ctx);
        }

        let pivot = u[[k, k]].clone();
        if !pivot.is_valid_pivot() {
            log::warn!("singular pivot at row {k} of {n} in general factorization");
            return Err(SolverError::SingularPivot {
                stage: SolveStage::Decomposing,
                index: k,
            });
        }

        // L column
        for i in (k + 1)..n {
            let num = a[[i, k]].sub_products((0..k).map(|m| (&l[[i, m]], &u[[m, k]])), ctx);
            l[[i, k]] = num
                .checked_div(&pivot, ctx)
                .ok_or(SolverError::SingularPivot {
                    stage: SolveStage::Decomposing,
                    index: k,
                })?;
        }
    }

    Ok(CroutLu { l, u, n })
}

/// Factor `A` and solve `A·x = b` in one call
///
/// On a singular pivot the whole solve fails; no partial factors are returned.
pub fn factor_general<T: CroutField>(
    a: &Array2<T>,
    b: &Array1<T>,
    ctx: &T::Context,
) -> Result<GeneralFactorization<T>> {
    let n = check_square(a)?;
    check_rhs(b, n)?;

    let lu = crout_factorize(a, ctx)?;
    let (y, x) = lu.solve(b, ctx)?;

    let status = match first_non_finite(&x) {
        Some(index) => {
            log::warn!("general solve produced a non-finite value at index {index}");
            SolveStatus::NonFinite { index }
        }
        None => SolveStatus::Solved,
    };

    Ok(GeneralFactorization {
        l: lu.l,
        u: lu.u,
        y,
        x,
        status,
    })
}
