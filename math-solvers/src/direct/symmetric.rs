//! Symmetric Crout solver: `A = L·D·Lᵀ`
//!
//! Only the lower triangle of `A` is read. No square roots are taken, so
//! symmetric indefinite matrices factor as long as every pivot `D[j]` is valid.

use crate::dense::{check_rhs, check_square, first_non_finite};
use crate::error::{Result, SolveStage, SolveStatus, SolverError};
use crate::traits::CroutField;
use ndarray::{Array1, Array2};

/// `L` and `D` factors of a symmetric matrix
#[derive(Debug, Clone)]
pub struct CroutLdlt<T: CroutField> {
    /// Unit lower triangular factor
    pub l: Array2<T>,
    /// Diagonal factor
    pub d: Array1<T>,
    /// Matrix dimension
    pub n: usize,
}

/// Factors and the three stage solutions of one symmetric solve
#[derive(Debug, Clone)]
pub struct SymmetricFactorization<T: CroutField> {
    /// Unit lower triangular factor
    pub l: Array2<T>,
    /// Diagonal factor
    pub d: Array1<T>,
    /// Solution of `L·y = b`
    pub y: Array1<T>,
    /// Solution of `D·z = y`
    pub z: Array1<T>,
    /// Solution of `Lᵀ·x = z`
    pub x: Array1<T>,
    /// Whether `x` is free of NaN and infinities
    pub status: SolveStatus,
}

impl<T: CroutField> CroutLdlt<T> {
    /// Solve `A·x = b`, returning `(y, z, x)`
    pub fn solve(
        &self,
        b: &Array1<T>,
        ctx: &T::Context,
    ) -> Result<(Array1<T>, Array1<T>, Array1<T>)> {
        check_rhs(b, self.n)?;
        let n = self.n;

        let mut y: Array1<T> = Array1::from_elem(n, T::zero(ctx));
        for i in 0..n {
            y[i] = b[i].sub_products((0..i).map(|k| (&self.l[[i, k]], &y[k])), ctx);
        }

        let mut z: Array1<T> = Array1::from_elem(n, T::zero(ctx));
        for i in 0..n {
            z[i] = y[i]
                .checked_div(&self.d[i], ctx)
                .ok_or(SolverError::SingularPivot {
                    stage: SolveStage::DiagonalScaling,
                    index: i,
                })?;
        }

        // Lᵀ has a unit diagonal; column i of L is row i of Lᵀ
        let mut x: Array1<T> = Array1::from_elem(n, T::zero(ctx));
        for i in (0..n).rev() {
            x[i] = z[i].sub_products(((i + 1)..n).map(|k| (&self.l[[k, i]], &x[k])), ctx);
        }

        Ok((y, z, x))
    }

    /// `U = D·Lᵀ`, the upper factor of the equivalent `L·U` split
    pub fn upper(&self, ctx: &T::Context) -> Array2<T> {
        upper_from(&self.l, &self.d, ctx)
    }
}

impl<T: CroutField> SymmetricFactorization<T> {
    /// `U = D·Lᵀ`, materialized for display only
    pub fn upper(&self, ctx: &T::Context) -> Array2<T> {
        upper_from(&self.l, &self.d, ctx)
    }
}

fn upper_from<T: CroutField>(l: &Array2<T>, d: &Array1<T>, ctx: &T::Context) -> Array2<T> {
    let n = d.len();
    let mut u = Array2::from_elem((n, n), T::zero(ctx));
    for i in 0..n {
        for j in i..n {
            u[[i, j]] = d[i].mul(&l[[j, i]], ctx);
        }
    }
    u
}

/// Compute `L` (unit lower) and `D` with `A = L·D·Lᵀ`
pub fn ldlt_factorize<T: CroutField>(a: &Array2<T>, ctx: &T::Context) -> Result<CroutLdlt<T>> {
    let n = check_square(a)?;
    log::debug!("symmetric Crout factorization, n = {n}");

    let mut l = Array2::from_elem((n, n), T::zero(ctx));
    let mut d: Array1<T> = Array1::from_elem(n, T::zero(ctx));

    for j in 0..n {
        // w[k] = L[j][k]·D[k], shared by the pivot and the whole column
        let w: Vec<T> = (0..j).map(|k| l[[j, k]].mul(&d[k], ctx)).collect();

        d[j] = a[[j, j]].sub_products((0..j).map(|k| (&w[k], &l[[j, k]])), ctx);
        if !d[j].is_valid_pivot() {
            log::warn!("singular pivot D[{j}] of {n} in symmetric factorization");
            return Err(SolverError::SingularPivot {
                stage: SolveStage::Decomposing,
                index: j,
            });
        }
        l[[j, j]] = T::one(ctx);

        for i in (j + 1)..n {
            let num = a[[i, j]].sub_products((0..j).map(|k| (&l[[i, k]], &w[k])), ctx);
            l[[i, j]] = num
                .checked_div(&d[j], ctx)
                .ok_or(SolverError::SingularPivot {
                    stage: SolveStage::Decomposing,
                    index: j,
                })?;
        }
    }

    Ok(CroutLdlt { l, d, n })
}

/// Factor a symmetric `A` and solve `A·x = b` in one call
pub fn factor_symmetric<T: CroutField>(
    a: &Array2<T>,
    b: &Array1<T>,
    ctx: &T::Context,
) -> Result<SymmetricFactorization<T>> {
    let n = check_square(a)?;
    check_rhs(b, n)?;

    let ldlt = ldlt_factorize(a, ctx)?;
    let (y, z, x) = ldlt.solve(b, ctx)?;

    let status = match first_non_finite(&x) {
        Some(index) => {
            log::warn!("symmetric solve produced a non-finite value at index {index}");
            SolveStatus::NonFinite { index }
        }
        None => SolveStatus::Solved,
    };

    Ok(SymmetricFactorization {
        l: ldlt.l,
        d: ldlt.d,
        y,
        z,
        x,
        status,
    })
}
