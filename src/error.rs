use thiserror::Error;

/// Errors returned by the solvers, loss functions and data utilities.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegressionError {
    #[error("dimension mismatch in {context}: expected {expected}, got {got}")]
    DimensionMismatch {
        context: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("linear system is singular (vanishing pivot at column {pivot})")]
    SingularSystem { pivot: usize },

    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("input must contain at least one sample")]
    EmptyInput,

    #[error("model not fitted, call fit() first")]
    NotFitted,
}

pub type Result<T> = std::result::Result<T, RegressionError>;

impl RegressionError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
