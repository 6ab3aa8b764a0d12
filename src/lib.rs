//! Elementary regression over dense `f64` arrays: losses, closed-form least
//! squares and ridge solvers, gradient descent with an iteration trace,
//! polynomial features and seeded train/test splitting.
//!
//! ```rust
//! use linreg::{build_poly, least_squares, split_data};
//! use ndarray::array;
//!
//! let x = array![0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
//! let y = x.mapv(|v| 1.0 + 2.0 * v);
//!
//! let split = split_data(&x, &y, 0.5, 1).unwrap();
//! let tx = build_poly(&split.train_x, 1);
//! let (loss, w) = least_squares(&split.train_y, &tx).unwrap();
//!
//! assert!(loss < 1e-12);
//! assert!((w[1] - 2.0).abs() < 1e-9);
//! ```

pub use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

pub mod costs;
pub mod dataset;
pub mod error;
pub mod gradient_descent;
pub mod linalg;
pub mod linear_model;
pub mod metrics;
pub mod preprocessing;

pub type Vector = Array1<f64>;
pub type Matrix = Array2<f64>;

pub use costs::{Loss, compute_loss, compute_mae, compute_mse, compute_rmse};
pub use dataset::{Dataset, Split, make_regression, split_data, split_data_with_rng};
pub use error::{RegressionError, Result};
pub use gradient_descent::{
    GradientDescent, Trace, compute_gradient, compute_stoch_gradient, gradient_descent,
    stochastic_gradient_descent,
};
pub use linear_model::{LeastSquares, Ridge, least_squares, ridge_regression};
pub use preprocessing::{StandardScaler, build_poly};
