//! Tridiagonal Crout solver (Thomas algorithm)
//!
//! Bands are `sub[0..n-1]`, `diag[0..n]`, `sup[0..n-1]`. The factorization is
//! one forward sweep:
//!
//! ```text
//! D[0] = diag[0]
//! L[i-1] = sub[i-1] / D[i-1]
//! D[i] = diag[i] - L[i-1]·sup[i-1]
//! ```
//!
//! so that `A = L̂·Û` with `L̂` unit lower bidiagonal (multipliers `L`) and
//! `Û` upper bidiagonal (pivots `D`, super-diagonal `sup`). Work and storage
//! are O(n).

use crate::dense::{check_bands, check_rhs, first_non_finite};
use crate::error::{Result, SolveStage, SolveStatus, SolverError};
use crate::traits::CroutField;
use ndarray::{Array1, Array2};

/// Bidiagonal factors of a tridiagonal matrix
#[derive(Debug, Clone)]
pub struct CroutTridiagonal<T: CroutField> {
    /// The `n-1` multipliers below the unit diagonal of `L̂`
    pub l: Array1<T>,
    /// The `n` pivots on the diagonal of `Û`
    pub d: Array1<T>,
    /// The `n-1` super-diagonal entries of `Û`
    pub u: Array1<T>,
    /// Matrix dimension
    pub n: usize,
}

/// Factors and solutions of one tridiagonal solve
#[derive(Debug, Clone)]
pub struct TridiagonalFactorization<T: CroutField> {
    /// Multipliers of the unit lower bidiagonal factor
    pub l: Array1<T>,
    /// Pivots
    pub d: Array1<T>,
    /// Super-diagonal of the upper bidiagonal factor
    pub u: Array1<T>,
    /// Solution of `L̂·y = b`
    pub y: Array1<T>,
    /// Solution of `Û·x = y`
    pub x: Array1<T>,
    /// Whether `x` is free of NaN and infinities
    pub status: SolveStatus,
}

impl<T: CroutField> CroutTridiagonal<T> {
    /// Solve with the stored factors, returning `(y, x)`
    pub fn solve(&self, b: &Array1<T>, ctx: &T::Context) -> Result<(Array1<T>, Array1<T>)> {
        check_rhs(b, self.n)?;
        let n = self.n;

        let mut y: Array1<T> = Array1::from_elem(n, T::zero(ctx));
        y[0] = b[0].clone();
        for i in 1..n {
            y[i] = b[i].sub(&self.l[i - 1].mul(&y[i - 1], ctx), ctx);
        }

        let mut x: Array1<T> = Array1::from_elem(n, T::zero(ctx));
        let back = |i: usize| SolverError::SingularPivot {
            stage: SolveStage::BackSubstituting,
            index: i,
        };
        x[n - 1] = y[n - 1]
            .checked_div(&self.d[n - 1], ctx)
            .ok_or_else(|| back(n - 1))?;
        for i in (0..n - 1).rev() {
            let rhs = y[i].sub(&self.u[i].mul(&x[i + 1], ctx), ctx);
            x[i] = rhs.checked_div(&self.d[i], ctx).ok_or_else(|| back(i))?;
        }

        Ok((y, x))
    }
}

impl<T: CroutField> TridiagonalFactorization<T> {
    /// Dense unit lower bidiagonal factor
    pub fn lower_dense(&self, ctx: &T::Context) -> Array2<T> {
        let n = self.d.len();
        let mut l = Array2::from_elem((n, n), T::zero(ctx));
        for i in 0..n {
            l[[i, i]] = T::one(ctx);
            if i > 0 {
                l[[i, i - 1]] = self.l[i - 1].clone();
            }
        }
        l
    }

    /// Dense upper bidiagonal factor
    pub fn upper_dense(&self, ctx: &T::Context) -> Array2<T> {
        let n = self.d.len();
        let mut u = Array2::from_elem((n, n), T::zero(ctx));
        for i in 0..n {
            u[[i, i]] = self.d[i].clone();
            if i + 1 < n {
                u[[i, i + 1]] = self.u[i].clone();
            }
        }
        u
    }
}

/// Factor a tridiagonal matrix given by its three bands
pub fn tridiagonal_factorize<T: CroutField>(
    sub: &Array1<T>,
    diag: &Array1<T>,
    sup: &Array1<T>,
    ctx: &T::Context,
) -> Result<CroutTridiagonal<T>> {
    let n = check_bands(sub, diag, sup)?;
    log::debug!("tridiagonal Crout factorization, n = {n}");

    let singular = |i: usize| {
        log::warn!("singular pivot D[{i}] of {n} in tridiagonal factorization");
        SolverError::SingularPivot {
            stage: SolveStage::Decomposing,
            index: i,
        }
    };

    let mut l: Array1<T> = Array1::from_elem(n - 1, T::zero(ctx));
    let mut d: Array1<T> = Array1::from_elem(n, T::zero(ctx));

    d[0] = diag[0].clone();
    if !d[0].is_valid_pivot() {
        return Err(singular(0));
    }
    for i in 1..n {
        l[i - 1] = sub[i - 1]
            .checked_div(&d[i - 1], ctx)
            .ok_or_else(|| singular(i - 1))?;
        d[i] = diag[i].sub(&l[i - 1].mul(&sup[i - 1], ctx), ctx);
        if !d[i].is_valid_pivot() {
            return Err(singular(i));
        }
    }

    Ok(CroutTridiagonal {
        l,
        d,
        u: sup.clone(),
        n,
    })
}

/// Factor the bands and solve `A·x = b` in one call
pub fn factor_tridiagonal<T: CroutField>(
    sub: &Array1<T>,
    diag: &Array1<T>,
    sup: &Array1<T>,
    b: &Array1<T>,
    ctx: &T::Context,
) -> Result<TridiagonalFactorization<T>> {
    let n = check_bands(sub, diag, sup)?;
    check_rhs(b, n)?;

    let tri = tridiagonal_factorize(sub, diag, sup, ctx)?;
    let (y, x) = tri.solve(b, ctx)?;

    let status = match first_non_finite(&x) {
        Some(index) => {
            log::warn!("tridiagonal solve produced a non-finite value at index {index}");
            SolveStatus::NonFinite { index }
        }
        None => SolveStatus::Solved,
    };

    Ok(TridiagonalFactorization {
        l: tri.l,
        d: tri.d,
        u: tri.u,
        y,
        x,
        status,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dense::{mat_mul, tridiagonal_to_dense};
    use approx::assert_relative_eq;
    use math_crout_interval::{ArithmeticContext, BigFloat, Bound, Interval};
    use ndarray::array;

    #[test]
    fn test_two_by_two() {
        let f = factor_tridiagonal(
            &array![1.0_f64],
            &array![2.0_f64, 2.0],
            &array![1.0_f64],
            &array![3.0_f64, 3.0],
            &(),
        )
        .unwrap();
        assert_relative_eq!(f.l[0], 0.5);
        assert_relative_eq!(f.d[1], 1.5);
        assert_relative_eq!(f.y[1], 1.5);
        assert_relative_eq!(f.x[0], 1.0, epsilon = 1e-14);
        assert_relative_eq!(f.x[1], 1.0, epsilon = 1e-14);
    }

    #[test]
    fn test_poisson_system() {
        // -1, 2, -1 stencil with x = [1, 2, 3, 4, 5]
        let n = 5;
        let sub = Array1::from_elem(n - 1, -1.0_f64);
        let diag = Array1::from_elem(n, 2.0_f64);
        let sup = Array1::from_elem(n - 1, -1.0_f64);
        let b = array![0.0_f64, 0.0, 0.0, 0.0, 6.0];

        let f = factor_tridiagonal(&sub, &diag, &sup, &b, &()).unwrap();
        for i in 0..n {
            assert_relative_eq!(f.x[i], (i + 1) as f64, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_factors_reconstruct_matrix() {
        let sub = array![1.0_f64, -2.0, 0.5];
        let diag = array![4.0_f64, 5.0, 6.0, 3.0];
        let sup = array![2.0_f64, 1.0, -1.0];
        let b = array![1.0_f64, 1.0, 1.0, 1.0];

        let f = factor_tridiagonal(&sub, &diag, &sup, &b, &()).unwrap();
        let product = mat_mul(&f.lower_dense(&()), &f.upper_dense(&()), &());
        let a = tridiagonal_to_dense(&sub, &diag, &sup, &()).unwrap();
        for (p, e) in product.iter().zip(a.iter()) {
            assert_relative_eq!(*p, *e, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_single_equation() {
        let empty = Array1::<f64>::from(vec![]);
        let f = factor_tridiagonal(&empty, &array![4.0_f64], &empty, &array![2.0_f64], &())
            .unwrap();
        assert_eq!(f.l.len(), 0);
        assert_relative_eq!(f.x[0], 0.5);
    }

    #[test]
    fn test_band_length_mismatch() {
        let err = factor_tridiagonal(
            &array![1.0_f64, 1.0],
            &array![2.0_f64, 2.0],
            &array![1.0_f64],
            &array![3.0_f64, 3.0],
            &(),
        )
        .unwrap_err();
        assert!(err.is_dimension_error());

        let err = factor_tridiagonal(
            &array![1.0_f64],
            &array![2.0_f64, 2.0],
            &array![1.0_f64],
            &array![3.0_f64],
            &(),
        )
        .unwrap_err();
        assert!(err.is_dimension_error());
    }

    #[test]
    fn test_zero_pivot() {
        // D[1] = 1 - 1·1 = 0
        let err = factor_tridiagonal(
            &array![1.0_f64],
            &array![1.0_f64, 1.0],
            &array![1.0_f64],
            &array![1.0_f64, 1.0],
            &(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            SolverError::SingularPivot {
                stage: SolveStage::Decomposing,
                index: 1
            }
        );
    }

    #[test]
    fn test_big_float_bands() {
        let ctx = ArithmeticContext::initialize::<BigFloat>();
        let big = |v: f64| BigFloat::from_f64(v, ctx.precision).unwrap();
        let f = factor_tridiagonal(
            &array![big(1.0)],
            &array![big(3.0), big(3.0)],
            &array![big(1.0)],
            &array![big(1.0), big(0.0)],
            &ctx,
        )
        .unwrap();
        // x = [3/8, -1/8]
        assert_eq!(f.x[0].render(&ctx), "3.75000000000000000E-001");
        assert_eq!(f.x[1].render(&ctx), "-1.25000000000000000E-001");
    }

    #[test]
    fn test_interval_bands_enclose_solution() {
        let ctx = ArithmeticContext::initialize::<f64>();
        let pt = |v: f64| Interval::point(v);
        let f = factor_tridiagonal(
            &array![pt(1.0), pt(1.0)],
            &array![pt(3.0), pt(3.0), pt(3.0)],
            &array![pt(1.0), pt(1.0)],
            &array![pt(1.0), pt(1.0), pt(1.0)],
            &ctx,
        )
        .unwrap();
        // x = [2/7, 1/7, 2/7]
        assert!(f.x[0].contains(&(2.0 / 7.0)));
        assert!(f.x[1].contains(&(1.0 / 7.0)));
        assert!(f.x[2].contains(&(2.0 / 7.0)));
        assert!(f.status.is_solved());
    }
}
