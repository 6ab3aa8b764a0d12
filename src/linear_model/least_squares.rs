use crate::costs::mse_of_residual;
use crate::error::{RegressionError, Result};
use crate::linalg::{check_samples, normal_equations, residual, solve};
use crate::{Matrix, Vector};

/// Solves the normal equations `(txᵀtx) w = txᵀy`.
///
/// Returns `(mse, w)`. A rank-deficient `tx` is reported as
/// [`RegressionError::SingularSystem`].
pub fn least_squares(y: &Vector, tx: &Matrix) -> Result<(f64, Vector)> {
    check_samples(y, tx)?;

    let (xtx, xty) = normal_equations(tx, y);
    let w = solve(&xtx, &xty)?;
    let loss = mse_of_residual(&residual(y, tx, &w));

    log::debug!(
        "least squares: {} samples x {} features, mse={:.6e}",
        tx.nrows(),
        tx.ncols(),
        loss
    );
    Ok((loss, w))
}

/// Least-squares estimator over a design matrix that already carries any
/// bias column.
#[derive(Clone, Debug, Default)]
pub struct LeastSquares {
    pub weights: Option<Vector>,
    pub loss: Option<f64>,
}

impl LeastSquares {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fit(&mut self, tx: &Matrix, y: &Vector) -> Result<()> {
        let (loss, w) = least_squares(y, tx)?;
        self.weights = Some(w);
        self.loss = Some(loss);
        Ok(())
    }

    pub fn predict(&self, tx: &Matrix) -> Result<Vector> {
        let w = self.weights.as_ref().ok_or(RegressionError::NotFitted)?;
        super::predict_with(tx, w)
    }

    /// Coefficient of determination on `(tx, y)`.
    pub fn score(&self, tx: &Matrix, y: &Vector) -> Result<f64> {
        let y_pred = self.predict(tx)?;
        crate::metrics::r2_score(y, &y_pred)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn test_least_squares_bias_and_slope() {
        let y = array![1.0, 2.0, 3.0];
        let tx = array![[1.0, 0.0], [1.0, 1.0], [1.0, 2.0]];

        let (loss, w) = least_squares(&y, &tx).unwrap();

        assert_abs_diff_eq!(w[0], 1.0, epsilon = 1e-10);
        assert_abs_diff_eq!(w[1], 1.0, epsilon = 1e-10);
        assert_abs_diff_eq!(loss, 0.0, epsilon = 1e-20);
    }

    #[test]
    fn test_least_squares_recovers_true_weights() {
        let tx = array![
            [1.0, 0.5, -1.0],
            [1.0, 1.5, 2.0],
            [1.0, -2.0, 0.3],
            [1.0, 3.0, 1.0],
            [1.0, 0.0, -0.7]
        ];
        let w_true = array![0.5, -2.0, 3.0];
        let y = tx.dot(&w_true);

        let (loss, w) = least_squares(&y, &tx).unwrap();

        for (got, want) in w.iter().zip(w_true.iter()) {
            assert_abs_diff_eq!(got, want, epsilon = 1e-9);
        }
        assert!(loss < 1e-18);
    }

    #[test]
    fn test_least_squares_noisy_fit_has_positive_loss() {
        let y = array![1.0, 2.5, 2.9, 4.2];
        let tx = array![[1.0, 0.0], [1.0, 1.0], [1.0, 2.0], [1.0, 3.0]];

        let (loss, w) = least_squares(&y, &tx).unwrap();
        assert!(loss > 0.0);
        assert_abs_diff_eq!(loss, crate::costs::compute_mse(&y, &tx, &w).unwrap(), epsilon = 1e-12);
    }

    #[test]
    fn test_least_squares_high_degree_polynomial() {
        let x = Vector::from_shape_fn(50, |i| i as f64 / 49.0);
        let y = x.mapv(|v| (2.0 * std::f64::consts::PI * v).sin());

        for degree in [9, 10, 12] {
            let tx = crate::preprocessing::build_poly(&x, degree);
            let (loss, w) = least_squares(&y, &tx).unwrap();
            assert_eq!(w.len(), degree + 1);
            assert!(w.iter().all(|v| v.is_finite()));
            assert!(loss.is_finite());
        }
    }

    #[test]
    fn test_least_squares_rank_deficient() {
        // Second column duplicates the first.
        let y = array![1.0, 2.0, 3.0];
        let tx = array![[1.0, 1.0], [1.0, 1.0], [1.0, 1.0]];

        assert!(matches!(
            least_squares(&y, &tx),
            Err(RegressionError::SingularSystem { .. })
        ));
    }

    #[test]
    fn test_least_squares_dimension_mismatch() {
        let y = array![1.0, 2.0, 3.0];
        let tx = array![[1.0], [2.0]];

        assert!(matches!(
            least_squares(&y, &tx),
            Err(RegressionError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_estimator_fit_predict() {
        let tx = array![[1.0, 1.0], [1.0, 2.0], [1.0, 3.0], [1.0, 4.0]];
        let y = array![3.0, 5.0, 7.0, 9.0];

        let mut model = LeastSquares::new();
        model.fit(&tx, &y).unwrap();

        let predictions = model.predict(&tx).unwrap();
        for (pred, actual) in predictions.iter().zip(y.iter()) {
            assert_abs_diff_eq!(pred, actual, epsilon = 1e-9);
        }
        assert_abs_diff_eq!(model.score(&tx, &y).unwrap(), 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(model.loss.unwrap(), 0.0, epsilon = 1e-18);
    }

    #[test]
    fn test_predict_without_fit() {
        let tx = array![[1.0], [2.0]];
        let model = LeastSquares::new();

        assert_eq!(model.predict(&tx), Err(RegressionError::NotFitted));
    }

    #[test]
    fn test_predict_feature_mismatch() {
        let tx = array![[1.0, 0.0], [1.0, 1.0], [1.0, 2.0]];
        let y = array![1.0, 2.0, 3.0];

        let mut model = LeastSquares::new();
        model.fit(&tx, &y).unwrap();

        assert!(model.predict(&array![[1.0], [2.0]]).is_err());
    }
}
