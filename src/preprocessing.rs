use crate::error::{RegressionError, Result};
use crate::{Matrix, Vector};

/// Polynomial basis `[1, x, x², …, x^degree]`, one row per sample.
pub fn build_poly(x: &Vector, degree: usize) -> Matrix {
    let mut poly = Matrix::ones((x.len(), degree + 1));
    for j in 1..=degree {
        let prev = poly.column(j - 1).to_owned();
        poly.column_mut(j).assign(&(prev * x));
    }
    poly
}

/// Column-wise standardization. Constant columns (such as a bias column) are
/// centred but not scaled.
#[derive(Clone, Debug, Default)]
pub struct StandardScaler {
    mean: Option<Vector>,
    std: Option<Vector>,
}

impl StandardScaler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fit(&mut self, data: &Matrix) -> Result<()> {
        let mean = data
            .mean_axis(ndarray::Axis(0))
            .ok_or(RegressionError::EmptyInput)?;
        let std = data
            .std_axis(ndarray::Axis(0), 0.0)
            .mapv(|s| if s > 1e-12 { s } else { 1.0 });

        self.mean = Some(mean);
        self.std = Some(std);
        Ok(())
    }

    pub fn transform(&self, data: &Matrix) -> Result<Matrix> {
        let (mean, std) = match (self.mean.as_ref(), self.std.as_ref()) {
            (Some(mean), Some(std)) => (mean, std),
            _ => return Err(RegressionError::NotFitted),
        };
        if data.ncols() != mean.len() {
            return Err(RegressionError::DimensionMismatch {
                context: "scaler feature count",
                expected: mean.len(),
                got: data.ncols(),
            });
        }

        let mut result = data.clone();
        for mut row in result.axis_iter_mut(ndarray::Axis(0)) {
            row -= mean;
            row /= std;
        }

        Ok(result)
    }

    pub fn fit_transform(&mut self, data: &Matrix) -> Result<Matrix> {
        self.fit(data)?;
        self.transform(data)
    }

    pub fn mean(&self) -> Option<&Vector> {
        self.mean.as_ref()
    }

    pub fn std(&self) -> Option<&Vector> {
        self.std.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn test_build_poly_degree_zero() {
        let x = array![0.5, -2.0, 3.0];
        assert_eq!(build_poly(&x, 0), array![[1.0], [1.0], [1.0]]);
    }

    #[test]
    fn test_build_poly_degree_one() {
        let x = array![0.5, -2.0, 3.0];
        assert_eq!(build_poly(&x, 1), array![[1.0, 0.5], [1.0, -2.0], [1.0, 3.0]]);
    }

    #[test]
    fn test_build_poly_columns_are_powers() {
        let x = array![0.5, -2.0, 3.0, 0.0];
        let degree = 5;
        let poly = build_poly(&x, degree);

        assert_eq!(poly.shape(), &[4, degree + 1]);
        for j in 0..=degree {
            for (i, &xi) in x.iter().enumerate() {
                assert_abs_diff_eq!(poly[(i, j)], xi.powi(j as i32), epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_build_poly_empty_input() {
        let poly = build_poly(&Vector::zeros(0), 3);
        assert_eq!(poly.shape(), &[0, 4]);
    }

    #[test]
    fn test_standard_scaler() {
        let data = array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]];
        let mut scaler = StandardScaler::new();

        let scaled = scaler.fit_transform(&data).unwrap();
        assert_eq!(scaled.shape(), data.shape());
        for col in scaled.columns() {
            assert_abs_diff_eq!(col.mean().unwrap(), 0.0, epsilon = 1e-12);
            assert_abs_diff_eq!(col.std(0.0), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_standard_scaler_constant_column() {
        let data = array![[1.0, 2.0], [1.0, 4.0], [1.0, 6.0]];
        let mut scaler = StandardScaler::new();

        let scaled = scaler.fit_transform(&data).unwrap();
        assert!(scaled.iter().all(|v| v.is_finite()));
        assert_eq!(scaler.std().unwrap()[0], 1.0);
    }

    #[test]
    fn test_standard_scaler_errors() {
        let scaler = StandardScaler::new();
        assert_eq!(
            scaler.transform(&array![[1.0]]),
            Err(RegressionError::NotFitted)
        );

        let mut scaler = StandardScaler::new();
        scaler.fit(&array![[1.0, 2.0], [3.0, 4.0]]).unwrap();
        assert!(scaler.transform(&array![[1.0]]).is_err());

        assert_eq!(
            StandardScaler::new().fit(&Matrix::zeros((0, 2))),
            Err(RegressionError::EmptyInput)
        );
    }
}
