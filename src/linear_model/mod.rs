//! Closed-form linear regression solvers.
//!
//! This module provides:
//! - [`least_squares`]: ordinary least squares through the normal equations
//! - [`ridge_regression`]: L2-regularized least squares
//!
//! plus `LeastSquares` and `Ridge` estimators that wrap them in a
//! `fit`/`predict`/`score` interface. Neither adds an intercept; include a
//! bias column in the design matrix (see [`crate::preprocessing::build_poly`]).
//!
//! # Examples
//!
//! ## Least squares
//! ```rust
//! use linreg::least_squares;
//! use ndarray::array;
//!
//! let y = array![1.0, 2.0, 3.0];
//! let tx = array![[1.0, 0.0], [1.0, 1.0], [1.0, 2.0]];
//!
//! let (loss, w) = least_squares(&y, &tx).unwrap();
//! assert!(loss < 1e-12);
//! assert!((w[0] - 1.0).abs() < 1e-9 && (w[1] - 1.0).abs() < 1e-9);
//! ```
//!
//! ## Ridge regression
//! ```rust
//! use linreg::Ridge;
//! use ndarray::array;
//!
//! let tx = array![[1.0, 1.0], [1.0, 2.0], [1.0, 3.0]];
//! let y = array![2.0, 4.1, 5.9];
//!
//! let mut model = Ridge::new().lambda(0.01);
//! model.fit(&tx, &y).unwrap();
//! let predictions = model.predict(&tx).unwrap();
//! assert_eq!(predictions.len(), 3);
//! ```

mod least_squares;
mod ridge;

pub use least_squares::{LeastSquares, least_squares};
pub use ridge::{Ridge, ridge_regression};

use crate::error::Result;
use crate::linalg::check_weights;
use crate::{Matrix, Vector};

fn predict_with(tx: &Matrix, w: &Vector) -> Result<Vector> {
    check_weights(tx, w)?;
    Ok(tx.dot(w))
}
