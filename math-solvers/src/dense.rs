//! Dense linear algebra helpers over [`CroutField`]
//!
//! Products and shape checks used by the solvers, the reports and the
//! verification tests. Every operation goes through the field's own
//! arithmetic, so interval products stay outward-rounded.

use crate::error::{Result, SolverError};
use crate::traits::CroutField;
use ndarray::{Array1, Array2, ArrayView1};

/// `Σ xᵢ·yᵢ` accumulated left to right in the field's arithmetic
fn row_dot<T: CroutField>(x: ArrayView1<'_, T>, y: ArrayView1<'_, T>, ctx: &T::Context) -> T {
    x.iter()
        .zip(y.iter())
        .fold(T::zero(ctx), |acc, (xi, yi)| acc.add(&xi.mul(yi, ctx), ctx))
}

/// Matrix-vector product y = A * x
pub fn mat_vec<T: CroutField>(a: &Array2<T>, x: &Array1<T>, ctx: &T::Context) -> Array1<T> {
    assert_eq!(a.ncols(), x.len(), "Matrix columns must match vector length");
    a.rows()
        .into_iter()
        .map(|row| row_dot(row, x.view(), ctx))
        .collect()
}

/// Matrix product C = A * B
pub fn mat_mul<T: CroutField>(a: &Array2<T>, b: &Array2<T>, ctx: &T::Context) -> Array2<T> {
    assert_eq!(a.ncols(), b.nrows(), "Inner dimensions must match");
    Array2::from_shape_fn((a.nrows(), b.ncols()), |(i, j)| {
        row_dot(a.row(i), b.column(j), ctx)
    })
}

/// Embed the three bands of a tridiagonal matrix into a dense `n×n` matrix
pub fn tridiagonal_to_dense<T: CroutField>(
    sub: &Array1<T>,
    diag: &Array1<T>,
    sup: &Array1<T>,
    ctx: &T::Context,
) -> Result<Array2<T>> {
    let n = check_bands(sub, diag, sup)?;
    let mut a = Array2::from_elem((n, n), T::zero(ctx));
    for i in 0..n {
        a[[i, i]] = diag[i].clone();
        if i + 1 < n {
            a[[i + 1, i]] = sub[i].clone();
            a[[i, i + 1]] = sup[i].clone();
        }
    }
    Ok(a)
}

/// Index of the first NaN or infinite entry
pub fn first_non_finite<T: CroutField>(x: &Array1<T>) -> Option<usize> {
    x.iter().position(|v| !v.is_finite())
}

/// Check that `a` is a non-empty square matrix and return its size
pub fn check_square<T>(a: &Array2<T>) -> Result<usize> {
    let n = a.nrows();
    if n == 0 {
        return Err(SolverError::DimensionMismatch {
            what: "matrix size (at least 1)",
            expected: 1,
            got: 0,
        });
    }
    if a.ncols() != n {
        return Err(SolverError::DimensionMismatch {
            what: "matrix columns",
            expected: n,
            got: a.ncols(),
        });
    }
    Ok(n)
}

/// Check a right-hand side against the system size
pub fn check_rhs<T>(b: &Array1<T>, n: usize) -> Result<()> {
    if b.len() != n {
        return Err(SolverError::DimensionMismatch {
            what: "right-hand side",
            expected: n,
            got: b.len(),
        });
    }
    Ok(())
}

/// Check band lengths `n-1, n, n-1` and return `n`
pub fn check_bands<T>(sub: &Array1<T>, diag: &Array1<T>, sup: &Array1<T>) -> Result<usize> {
    let n = diag.len();
    if n == 0 {
        return Err(SolverError::DimensionMismatch {
            what: "main diagonal (at least 1)",
            expected: 1,
            got: 0,
        });
    }
    if sub.len() != n - 1 {
        return Err(SolverError::DimensionMismatch {
            what: "sub-diagonal",
            expected: n - 1,
            got: sub.len(),
        });
    }
    if sup.len() != n - 1 {
        return Err(SolverError::DimensionMismatch {
            what: "super-diagonal",
            expected: n - 1,
            got: sup.len(),
        });
    }
    Ok(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_mat_vec_and_mat_mul() {
        let a = array![[1.0_f64, 2.0], [3.0, 4.0]];
        let x = array![1.0_f64, -1.0];

        let y = mat_vec(&a, &x, &());
        assert_relative_eq!(y[0], -1.0, epsilon = 1e-12);
        assert_relative_eq!(y[1], -1.0, epsilon = 1e-12);

        let c = mat_mul(&a, &a, &());
        let expected = a.dot(&a);
        for (ci, ei) in c.iter().zip(expected.iter()) {
            assert_relative_eq!(*ci, *ei, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_tridiagonal_to_dense() {
        let a = tridiagonal_to_dense(
            &array![1.0_f64, 2.0],
            &array![4.0_f64, 5.0, 6.0],
            &array![7.0_f64, 8.0],
            &(),
        )
        .unwrap();
        assert_eq!(
            a,
            array![[4.0, 7.0, 0.0], [1.0, 5.0, 8.0], [0.0, 2.0, 6.0]]
        );
    }

    #[test]
    fn test_band_length_checks() {
        let err = check_bands(&array![1.0_f64], &array![1.0_f64, 2.0, 3.0], &array![1.0_f64, 2.0])
            .unwrap_err();
        assert!(matches!(
            err,
            SolverError::DimensionMismatch {
                what: "sub-diagonal",
                expected: 2,
                got: 1
            }
        ));

        let empty = Array1::<f64>::from(vec![]);
        let single = check_bands(&empty, &array![2.0], &empty).unwrap();
        assert_eq!(single, 1);
    }

    #[test]
    fn test_check_square() {
        let rect = Array2::<f64>::zeros((2, 3));
        assert!(check_square(&rect).unwrap_err().is_dimension_error());
        let empty = Array2::<f64>::zeros((0, 0));
        assert!(check_square(&empty).is_err());
        assert_eq!(check_square(&Array2::<f64>::eye(3)).unwrap(), 3);
    }

    #[test]
    fn test_first_non_finite() {
        assert_eq!(first_non_finite(&array![1.0_f64, 2.0]), None);
        assert_eq!(first_non_finite(&array![1.0_f64, f64::NAN, f64::INFINITY]), Some(1));
    }
}
