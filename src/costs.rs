//! Loss functions over `(y, tx, w)`.
//!
//! All three losses are computed from the residual `e = y - tx·w`:
//!
//! - [`compute_mse`]: `e·e / (2N)`
//! - [`compute_rmse`]: `sqrt(2 · mse)`, i.e. the root of the mean squared residual
//! - [`compute_mae`]: `mean(e) / N`
//!
//! `compute_mae` is kept with its historical formula: it is signed and divides
//! by `N` twice, so it is **not** the mean absolute error. Use
//! [`crate::metrics::mean_absolute_error`] for the standard metric.
//!
//! ```rust
//! use linreg::costs::{compute_loss, Loss};
//! use ndarray::array;
//!
//! let y = array![1.0, 2.0, 3.0];
//! let tx = array![[1.0, 0.0], [1.0, 1.0], [1.0, 2.0]];
//! let w = array![1.0, 1.0];
//!
//! assert_eq!(compute_loss(&y, &tx, &w, Loss::Mse).unwrap(), 0.0);
//! ```

use crate::error::Result;
use crate::linalg::{check_samples, check_weights, residual};
use crate::{Matrix, Vector};

/// Which loss a solver reports or traces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Loss {
    #[default]
    Mse,
    Rmse,
    Mae,
}

impl Loss {
    pub fn compute(self, y: &Vector, tx: &Matrix, w: &Vector) -> Result<f64> {
        match self {
            Loss::Mse => compute_mse(y, tx, w),
            Loss::Rmse => compute_rmse(y, tx, w),
            Loss::Mae => compute_mae(y, tx, w),
        }
    }
}

pub fn compute_loss(y: &Vector, tx: &Matrix, w: &Vector, loss: Loss) -> Result<f64> {
    loss.compute(y, tx, w)
}

/// Half mean squared error, `(1/(2N)) · Σ (y - tx·w)²`.
pub fn compute_mse(y: &Vector, tx: &Matrix, w: &Vector) -> Result<f64> {
    let e = validated_residual(y, tx, w)?;
    Ok(mse_of_residual(&e))
}

pub fn compute_rmse(y: &Vector, tx: &Matrix, w: &Vector) -> Result<f64> {
    Ok((2.0 * compute_mse(y, tx, w)?).sqrt())
}

/// `mean(y - tx·w) / N`. Signed; see the module docs.
pub fn compute_mae(y: &Vector, tx: &Matrix, w: &Vector) -> Result<f64> {
    let e = validated_residual(y, tx, w)?;
    let n = e.len() as f64;
    Ok(e.sum() / n / n)
}

fn validated_residual(y: &Vector, tx: &Matrix, w: &Vector) -> Result<Vector> {
    check_samples(y, tx)?;
    check_weights(tx, w)?;
    Ok(residual(y, tx, w))
}

pub(crate) fn mse_of_residual(e: &Vector) -> f64 {
    e.dot(e) / (2.0 * e.len() as f64)
}
