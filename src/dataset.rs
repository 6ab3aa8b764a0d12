use ndarray::{Array, ArrayBase, Axis, Data, RemoveAxis};
use ndarray_rand::RandomExt;
use ndarray_rand::rand_distr::{Normal, Uniform};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::error::{RegressionError, Result};
use crate::{Matrix, Vector};

/// Train/test partition produced by [`split_data`].
#[derive(Clone, Debug, PartialEq)]
pub struct Split<X> {
    pub train_x: X,
    pub train_y: Vector,
    pub test_x: X,
    pub test_y: Vector,
}

/// Shuffles sample indices with a generator seeded from `seed` and puts the
/// first `floor(N * ratio)` of them in the training set.
///
/// `x` may be one- or two-dimensional; rows are indexed along axis 0. The same
/// seed and sample count always give the same partition.
pub fn split_data<S, D>(
    x: &ArrayBase<S, D>,
    y: &Vector,
    ratio: f64,
    seed: u64,
) -> Result<Split<Array<f64, D>>>
where
    S: Data<Elem = f64>,
    D: RemoveAxis,
{
    let mut rng = StdRng::seed_from_u64(seed);
    split_data_with_rng(x, y, ratio, &mut rng)
}

/// [`split_data`] drawing the permutation from a caller-owned generator.
pub fn split_data_with_rng<S, D, R>(
    x: &ArrayBase<S, D>,
    y: &Vector,
    ratio: f64,
    rng: &mut R,
) -> Result<Split<Array<f64, D>>>
where
    S: Data<Elem = f64>,
    D: RemoveAxis,
    R: Rng + ?Sized,
{
    if !(0.0..=1.0).contains(&ratio) {
        return Err(RegressionError::invalid(
            "ratio",
            format!("must be within [0, 1], got {}", ratio),
        ));
    }
    let n = y.len();
    let n_x = x.len_of(Axis(0));
    if n_x != n {
        return Err(RegressionError::DimensionMismatch {
            context: "samples in x vs y",
            expected: n_x,
            got: n,
        });
    }

    let mut idx: Vec<usize> = (0..n).collect();
    idx.shuffle(rng);

    let n_train = (n as f64 * ratio).floor() as usize;
    let (idx_tr, idx_te) = idx.split_at(n_train);
    log::debug!("split {} samples into {} train / {} test", n, idx_tr.len(), idx_te.len());

    Ok(Split {
        train_x: x.select(Axis(0), idx_tr),
        train_y: y.select(Axis(0), idx_tr),
        test_x: x.select(Axis(0), idx_te),
        test_y: y.select(Axis(0), idx_te),
    })
}

/// Noisy linear data: a bias column followed by features drawn uniformly
/// from `[-1, 1)`, and labels `tx·w_true` plus Gaussian noise.
pub fn make_regression<R: Rng + ?Sized>(
    n_samples: usize,
    w_true: &Vector,
    noise_std: f64,
    rng: &mut R,
) -> Result<(Vector, Matrix)> {
    if w_true.is_empty() {
        return Err(RegressionError::invalid("w_true", "must have at least one weight"));
    }
    let noise = Normal::new(0.0, noise_std).map_err(|e| {
        RegressionError::invalid("noise_std", format!("{} (got {})", e, noise_std))
    })?;

    let mut tx = Matrix::ones((n_samples, w_true.len()));
    if w_true.len() > 1 {
        let features = Matrix::random_using(
            (n_samples, w_true.len() - 1),
            Uniform::new(-1.0, 1.0),
            rng,
        );
        tx.slice_mut(ndarray::s![.., 1..]).assign(&features);
    }
    let y = tx.dot(w_true) + Vector::random_using(n_samples, noise, rng);

    Ok((y, tx))
}

#[derive(Clone, Debug)]
pub struct Dataset {
    pub features: Matrix,
    pub labels: Vector,
}

impl Dataset {
    pub fn new(features: Matrix, labels: Vector) -> Result<Self> {
        if features.nrows() != labels.len() {
            return Err(RegressionError::DimensionMismatch {
                context: "samples in features vs labels",
                expected: features.nrows(),
                got: labels.len(),
            });
        }

        Ok(Self { features, labels })
    }

    pub fn n_samples(&self) -> usize {
        self.features.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.features.ncols()
    }

    /// Seeded split keeping `floor(n_samples * ratio)` rows for training.
    pub fn train_test_split(&self, ratio: f64, seed: u64) -> Result<(Self, Self)> {
        let split = split_data(&self.features, &self.labels, ratio, seed)?;

        let train_dataset = Dataset::new(split.train_x, split.train_y)?;
        let test_dataset = Dataset::new(split.test_x, split.test_y)?;

        Ok((train_dataset, test_dataset))
    }
}
