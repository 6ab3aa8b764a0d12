use crate::error::{RegressionError, Result};
use crate::{Matrix, Vector};

/// Checks `len(y) == rows(tx)` and that there is at least one sample.
pub fn check_samples(y: &Vector, tx: &Matrix) -> Result<()> {
    if tx.nrows() != y.len() {
        return Err(RegressionError::DimensionMismatch {
            context: "labels vs design matrix rows",
            expected: tx.nrows(),
            got: y.len(),
        });
    }
    if y.is_empty() {
        return Err(RegressionError::EmptyInput);
    }
    Ok(())
}

/// Checks `len(w) == columns(tx)`.
pub fn check_weights(tx: &Matrix, w: &Vector) -> Result<()> {
    if tx.ncols() != w.len() {
        return Err(RegressionError::DimensionMismatch {
            context: "weights vs design matrix columns",
            expected: tx.ncols(),
            got: w.len(),
        });
    }
    Ok(())
}

/// Residual `y - tx·w`. Shapes must already be validated.
pub(crate) fn residual(y: &Vector, tx: &Matrix, w: &Vector) -> Vector {
    y - &tx.dot(w)
}

/// Builds `(txᵀtx, txᵀy)`.
pub fn normal_equations(tx: &Matrix, y: &Vector) -> (Matrix, Vector) {
    let xt = tx.t();
    (xt.dot(tx), xt.dot(y))
}

/// Solves the square system `a·x = b` by Gaussian elimination with partial
/// pivoting.
///
/// Returns [`RegressionError::SingularSystem`] when the best available pivot
/// is exactly zero or not finite, instead of producing a least-norm
/// approximation. Small but nonzero pivots are accepted, so badly scaled
/// full-rank systems still solve.
pub fn solve(a: &Matrix, b: &Vector) -> Result<Vector> {
    let n = a.nrows();
    if a.ncols() != n {
        return Err(RegressionError::DimensionMismatch {
            context: "square system columns",
            expected: n,
            got: a.ncols(),
        });
    }
    if b.len() != n {
        return Err(RegressionError::DimensionMismatch {
            context: "right-hand side length",
            expected: n,
            got: b.len(),
        });
    }

    let mut aug = Matrix::zeros((n, n + 1));
    aug.slice_mut(ndarray::s![.., ..n]).assign(a);
    aug.column_mut(n).assign(b);

    for i in 0..n {
        let mut max_row = i;
        for k in (i + 1)..n {
            if aug[(k, i)].abs() > aug[(max_row, i)].abs() {
                max_row = k;
            }
        }

        let pivot = aug[(max_row, i)];
        if pivot == 0.0 || !pivot.is_finite() {
            return Err(RegressionError::SingularSystem { pivot: i });
        }

        if max_row != i {
            for j in 0..=n {
                aug.swap((i, j), (max_row, j));
            }
        }

        for k in (i + 1)..n {
            let factor = aug[(k, i)] / aug[(i, i)];
            for j in i..=n {
                aug[(k, j)] -= factor * aug[(i, j)];
            }
        }
    }

    let mut x = Vector::zeros(n);
    for i in (0..n).rev() {
        let mut acc = aug[(i, n)];
        for j in (i + 1)..n {
            acc -= aug[(i, j)] * x[j];
        }
        x[i] = acc / aug[(i, i)];
    }

    Ok(x)
}
