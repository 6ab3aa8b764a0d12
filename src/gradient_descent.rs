//! Full-batch and mini-batch gradient descent on the least-squares objective.
//!
//! Every update step records the loss at the weights *before* the step and
//! the weights *after* it, so a run of `k` steps yields `k` losses and `k + 1`
//! weight vectors (the first one is the initial guess). There is no
//! convergence test: the loop always performs `max_iters` epochs.
//!
//! ```rust
//! use linreg::gradient_descent::gradient_descent;
//! use ndarray::array;
//!
//! let y = array![1.0, 2.0, 3.0];
//! let tx = array![[1.0, 0.0], [1.0, 1.0], [1.0, 2.0]];
//!
//! let trace = gradient_descent(&y, &tx, &array![0.0, 0.0], 100, 0.5).unwrap();
//! assert_eq!(trace.ws.len(), 101);
//! assert_eq!(trace.losses.len(), 100);
//! ```

use ndarray::Axis;
use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::costs::Loss;
use crate::error::{RegressionError, Result};
use crate::linalg::{check_samples, check_weights, residual};
use crate::{Matrix, Vector};

/// Losses and weight snapshots recorded by a descent run.
#[derive(Clone, Debug, PartialEq)]
pub struct Trace {
    pub losses: Vec<f64>,
    pub ws: Vec<Vector>,
}

impl Trace {
    fn new(initial_w: Vector) -> Self {
        Self {
            losses: Vec::new(),
            ws: vec![initial_w],
        }
    }

    fn push(&mut self, loss: f64, w: Vector) {
        self.losses.push(loss);
        self.ws.push(w);
    }

    /// Weights after the last update (the initial weights if no step ran).
    pub fn final_weights(&self) -> Option<&Vector> {
        self.ws.last()
    }

    pub fn final_loss(&self) -> Option<f64> {
        self.losses.last().copied()
    }

    /// Number of update steps.
    pub fn len(&self) -> usize {
        self.losses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.losses.is_empty()
    }

    /// `(loss, weights)` pairs where the loss was measured at those weights.
    pub fn iter(&self) -> impl Iterator<Item = (f64, &Vector)> {
        self.losses.iter().copied().zip(self.ws.iter())
    }
}

/// `-(1/N) · txᵀ (y - tx·w)`.
pub fn compute_gradient(y: &Vector, tx: &Matrix, w: &Vector) -> Result<Vector> {
    check_samples(y, tx)?;
    check_weights(tx, w)?;
    let e = residual(y, tx, w);
    Ok(tx.t().dot(&e) / -(y.len() as f64))
}

/// Gradient over a mini-batch `(b_y, b_tx)`; same formula as
/// [`compute_gradient`] with `N` the batch size.
pub fn compute_stoch_gradient(b_y: &Vector, b_tx: &Matrix, w: &Vector) -> Result<Vector> {
    compute_gradient(b_y, b_tx, w)
}

/// One epoch of mini-batches over a shuffled row order.
#[derive(Debug)]
pub struct BatchIter<'a> {
    y: &'a Vector,
    tx: &'a Matrix,
    order: Vec<usize>,
    batch_size: usize,
    cursor: usize,
}

impl BatchIter<'_> {
    pub fn num_batches(&self) -> usize {
        self.order.len().div_ceil(self.batch_size)
    }
}

impl Iterator for BatchIter<'_> {
    type Item = (Vector, Matrix);

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.order.len() {
            return None;
        }
        let end = (self.cursor + self.batch_size).min(self.order.len());
        let indices = &self.order[self.cursor..end];
        self.cursor = end;

        Some((self.y.select(Axis(0), indices), self.tx.select(Axis(0), indices)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.order.len() - self.cursor).div_ceil(self.batch_size);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for BatchIter<'_> {}

/// Shuffles the rows once and splits them into consecutive batches of
/// `batch_size`; the last batch holds the remainder.
pub fn batch_iter<'a, R: Rng + ?Sized>(
    y: &'a Vector,
    tx: &'a Matrix,
    batch_size: usize,
    rng: &mut R,
) -> Result<BatchIter<'a>> {
    if batch_size == 0 {
        return Err(RegressionError::invalid("batch_size", "must be at least 1"));
    }
    check_samples(y, tx)?;

    let mut order: Vec<usize> = (0..y.len()).collect();
    order.shuffle(rng);

    Ok(BatchIter {
        y,
        tx,
        order,
        batch_size,
        cursor: 0,
    })
}

enum Batches<'r, R: ?Sized> {
    Full,
    Mini { batch_size: usize, rng: &'r mut R },
}

/// Descent configuration.
#[derive(Clone, Debug)]
pub struct GradientDescent {
    gamma: f64,
    max_iters: usize,
    batch_size: Option<usize>,
    loss: Loss,
}

impl GradientDescent {
    pub fn new() -> Self {
        Self {
            gamma: 0.1,
            max_iters: 100,
            batch_size: None,
            loss: Loss::Mse,
        }
    }

    /// Fixed step size.
    pub fn gamma(mut self, gamma: f64) -> Self {
        if !gamma.is_finite() {
            panic!("gamma must be finite, got {}", gamma);
        }
        self.gamma = gamma;
        self
    }

    /// Number of epochs.
    pub fn max_iters(mut self, max_iters: usize) -> Self {
        self.max_iters = max_iters;
        self
    }

    /// `None` runs full-batch descent.
    pub fn batch_size(mut self, batch_size: Option<usize>) -> Self {
        if batch_size == Some(0) {
            panic!("batch_size must be at least 1");
        }
        self.batch_size = batch_size;
        self
    }

    /// Loss recorded in the trace.
    pub fn loss(mut self, loss: Loss) -> Self {
        self.loss = loss;
        self
    }

    /// Runs the configured descent. `rng` is only drawn from for mini-batch
    /// shuffling.
    pub fn run<R: Rng + ?Sized>(
        &self,
        y: &Vector,
        tx: &Matrix,
        initial_w: &Vector,
        rng: &mut R,
    ) -> Result<Trace> {
        match self.batch_size {
            None => self.descend(y, tx, initial_w, Batches::<R>::Full),
            Some(batch_size) => {
                self.descend(y, tx, initial_w, Batches::Mini { batch_size, rng })
            }
        }
    }

    fn validate(&self) -> Result<()> {
        if !self.gamma.is_finite() {
            return Err(RegressionError::invalid(
                "gamma",
                format!("must be finite, got {}", self.gamma),
            ));
        }
        if self.batch_size == Some(0) {
            return Err(RegressionError::invalid("batch_size", "must be at least 1"));
        }
        Ok(())
    }

    fn descend<R: Rng + ?Sized>(
        &self,
        y: &Vector,
        tx: &Matrix,
        initial_w: &Vector,
        mut batches: Batches<'_, R>,
    ) -> Result<Trace> {
        self.validate()?;
        check_samples(y, tx)?;
        check_weights(tx, initial_w)?;

        let mut trace = Trace::new(initial_w.clone());
        let mut w = initial_w.clone();

        for epoch in 0..self.max_iters {
            match &mut batches {
                Batches::Full => {
                    w = self.step(&mut trace, y, tx, w, y, tx)?;
                }
                Batches::Mini { batch_size, rng } => {
                    for (b_y, b_tx) in batch_iter(y, tx, *batch_size, &mut **rng)? {
                        w = self.step(&mut trace, y, tx, w, &b_y, &b_tx)?;
                    }
                }
            }
            log::debug!(
                "epoch {}/{}: loss={:?}",
                epoch + 1,
                self.max_iters,
                trace.final_loss()
            );
        }

        Ok(trace)
    }

    fn step(
        &self,
        trace: &mut Trace,
        y: &Vector,
        tx: &Matrix,
        w: Vector,
        b_y: &Vector,
        b_tx: &Matrix,
    ) -> Result<Vector> {
        let loss = self.loss.compute(y, tx, &w)?;
        if !loss.is_finite() && trace.losses.last().is_none_or(|l| l.is_finite()) {
            log::warn!(
                "loss became non-finite at step {}; gamma={} may be too large",
                trace.len(),
                self.gamma
            );
        }

        let grad = compute_stoch_gradient(b_y, b_tx, &w)?;
        let w_next = w - grad * self.gamma;
        log::trace!("step {}: loss={}", trace.len(), loss);

        trace.push(loss, w_next.clone());
        Ok(w_next)
    }
}

impl Default for GradientDescent {
    fn default() -> Self {
        Self::new()
    }
}

/// Full-batch gradient descent for `max_iters` steps.
pub fn gradient_descent(
    y: &Vector,
    tx: &Matrix,
    initial_w: &Vector,
    max_iters: usize,
    gamma: f64,
) -> Result<Trace> {
    let config = GradientDescent {
        gamma,
        max_iters,
        batch_size: None,
        loss: Loss::Mse,
    };
    config.descend(y, tx, initial_w, Batches::<StdRng>::Full)
}

/// Mini-batch gradient descent: `max_iters` epochs, each a fresh shuffle of
/// the rows split into `ceil(N / batch_size)` batches.
pub fn stochastic_gradient_descent<R: Rng + ?Sized>(
    y: &Vector,
    tx: &Matrix,
    initial_w: &Vector,
    batch_size: usize,
    max_iters: usize,
    gamma: f64,
    rng: &mut R,
) -> Result<Trace> {
    let config = GradientDescent {
        gamma,
        max_iters,
        batch_size: Some(batch_size),
        loss: Loss::Mse,
    };
    config.descend(y, tx, initial_w, Batches::Mini { batch_size, rng })
}
