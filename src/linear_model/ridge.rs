use crate::costs::mse_of_residual;
use crate::error::{RegressionError, Result};
use crate::linalg::{check_samples, normal_equations, residual, solve};
use crate::{Matrix, Vector};

/// Solves the regularized normal equations
/// `(txᵀtx + 2·N·lambda_·I) w = txᵀy`.
///
/// The returned loss is the plain MSE of the fit; the penalty term is not
/// included. Any `lambda_ > 0` makes the system positive definite.
pub fn ridge_regression(y: &Vector, tx: &Matrix, lambda_: f64) -> Result<(f64, Vector)> {
    if !lambda_.is_finite() || lambda_ < 0.0 {
        return Err(RegressionError::invalid(
            "lambda_",
            format!("must be finite and non-negative, got {}", lambda_),
        ));
    }
    check_samples(y, tx)?;

    let n = tx.nrows() as f64;
    let (mut regularized_xtx, xty) = normal_equations(tx, y);
    regularized_xtx.diag_mut().map_inplace(|d| *d += 2.0 * n * lambda_);

    let w = solve(&regularized_xtx, &xty)?;
    let loss = mse_of_residual(&residual(y, tx, &w));

    log::debug!(
        "ridge regression: {} samples x {} features, lambda={}, mse={:.6e}",
        tx.nrows(),
        tx.ncols(),
        lambda_,
        loss
    );
    Ok((loss, w))
}

#[derive(Clone, Debug)]
pub struct Ridge {
    pub weights: Option<Vector>,
    pub loss: Option<f64>,
    lambda: f64,
}

impl Ridge {
    pub fn new() -> Self {
        Self {
            weights: None,
            loss: None,
            lambda: 1e-3,
        }
    }

    pub fn lambda(mut self, lambda: f64) -> Self {
        if !(lambda >= 0.0) || !lambda.is_finite() {
            panic!("lambda must be finite and non-negative, got {}", lambda);
        }
        self.lambda = lambda;
        self
    }

    pub fn penalty(&self) -> f64 {
        self.lambda
    }

    pub fn fit(&mut self, tx: &Matrix, y: &Vector) -> Result<()> {
        let (loss, w) = ridge_regression(y, tx, self.lambda)?;
        self.weights = Some(w);
        self.loss = Some(loss);
        Ok(())
    }

    pub fn predict(&self, tx: &Matrix) -> Result<Vector> {
        let w = self.weights.as_ref().ok_or(RegressionError::NotFitted)?;
        super::predict_with(tx, w)
    }

    pub fn score(&self, tx: &Matrix, y: &Vector) -> Result<f64> {
        let y_pred = self.predict(tx)?;
        crate::metrics::r2_score(y, &y_pred)
    }
}

impl Default for Ridge {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linear_model::least_squares;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    fn noisy_line() -> (Vector, Matrix) {
        let y = array![2.1, 3.9, 6.1, 7.9, 10.2];
        let tx = array![[1.0, 1.0], [1.0, 2.0], [1.0, 3.0], [1.0, 4.0], [1.0, 5.0]];
        (y, tx)
    }

    #[test]
    fn test_ridge_zero_lambda_matches_least_squares() {
        let (y, tx) = noisy_line();

        let (ridge_loss, ridge_w) = ridge_regression(&y, &tx, 0.0).unwrap();
        let (ls_loss, ls_w) = least_squares(&y, &tx).unwrap();

        assert_abs_diff_eq!(ridge_loss, ls_loss, epsilon = 1e-12);
        for (a, b) in ridge_w.iter().zip(ls_w.iter()) {
            assert_abs_diff_eq!(a, b, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_ridge_shrinks_weights() {
        let (y, tx) = noisy_line();

        let (_, w_small) = ridge_regression(&y, &tx, 0.01).unwrap();
        let (_, w_large) = ridge_regression(&y, &tx, 10.0).unwrap();

        assert!(w_large.dot(&w_large) < w_small.dot(&w_small));
    }

    #[test]
    fn test_ridge_loss_is_unregularized_mse() {
        let (y, tx) = noisy_line();

        let (loss, w) = ridge_regression(&y, &tx, 0.5).unwrap();
        assert_abs_diff_eq!(
            loss,
            crate::costs::compute_mse(&y, &tx, &w).unwrap(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_ridge_solves_rank_deficient_design() {
        let y = array![1.0, 2.0, 3.0];
        let tx = array![[1.0, 1.0], [1.0, 1.0], [1.0, 1.0]];

        assert!(least_squares(&y, &tx).is_err());

        let (_, w) = ridge_regression(&y, &tx, 0.1).unwrap();
        // Symmetric columns get equal weight.
        assert_abs_diff_eq!(w[0], w[1], epsilon = 1e-12);
    }

    #[test]
    fn test_ridge_large_scale_polynomial_design() {
        // Entries of txᵀtx span roughly 50 to 1e18.
        let x = Vector::from_shape_fn(50, |i| 0.1 + 5.0 * i as f64 / 49.0);
        let y = x.mapv(f64::sin);
        let tx = crate::preprocessing::build_poly(&x, 12);

        for lambda in [1e-8, 1e-4, 1e-2, 1.0] {
            let (loss, w) = ridge_regression(&y, &tx, lambda).unwrap();
            assert_eq!(w.len(), 13);
            assert!(w.iter().all(|v| v.is_finite()));
            assert!(loss.is_finite());
        }
    }

    #[test]
    fn test_ridge_diagonal_scaling() {
        // txᵀtx = [3], txᵀy = [6]; penalty = 2 * 3 * 0.5 = 3, so w = 6 / 6.
        let y = array![2.0, 2.0, 2.0];
        let tx = array![[1.0], [1.0], [1.0]];

        let (_, w) = ridge_regression(&y, &tx, 0.5).unwrap();
        assert_abs_diff_eq!(w[0], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_ridge_invalid_lambda() {
        let (y, tx) = noisy_line();
        assert!(matches!(
            ridge_regression(&y, &tx, -1.0),
            Err(RegressionError::InvalidParameter { name: "lambda_", .. })
        ));
        assert!(ridge_regression(&y, &tx, f64::NAN).is_err());
    }

    #[test]
    fn test_ridge_estimator() {
        let (y, tx) = noisy_line();

        let mut model = Ridge::new().lambda(0.001);
        model.fit(&tx, &y).unwrap();

        let score = model.score(&tx, &y).unwrap();
        assert!(score > 0.95);
        assert_eq!(model.penalty(), 0.001);
    }

    #[test]
    fn test_ridge_estimator_invalid_lambda() {
        std::panic::catch_unwind(|| {
            Ridge::new().lambda(-1.0);
        })
        .expect_err("Should panic on negative lambda");
    }

    #[test]
    fn test_ridge_predict_without_fit() {
        let tx = array![[1.0], [2.0]];
        let model = Ridge::new();

        assert!(model.predict(&tx).is_err());
    }

    #[test]
    fn test_ridge_dimension_mismatch() {
        let tx = array![[1.0], [2.0]];
        let y = array![1.0, 2.0, 3.0];

        let mut model = Ridge::new();
        assert!(model.fit(&tx, &y).is_err());
    }
}
