//! Walk-forward regression trait definitions.

use cartagena_primitives::{RegressionResult, RegressionWindow};

/// Errors that can occur during window estimation.
#[derive(Debug, thiserror::Error)]
pub enum EstimatorError {
    /// Dimension mismatch in input data.
    #[error("dimension mismatch for {context}: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimension.
        expected: usize,
        /// Actual dimension.
        actual: usize,
        /// Context description.
        context: String,
    },

    /// Insufficient observations for estimation.
    #[error("insufficient data: need at least {required} observations, got {actual}")]
    InsufficientData {
        /// Required number of observations.
        required: usize,
        /// Actual number of observations.
        actual: usize,
    },

    /// Rank-deficient design matrix. Never absorbed silently: the caller
    /// decides whether to drop a factor and retry or skip the date.
    #[error("singular design matrix: {detail}")]
    SingularDesign {
        /// What made the design unsolvable.
        detail: String,
    },

    /// Invalid estimator configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl EstimatorError {
    /// Returns whether this error is recoverable.
    ///
    /// Insufficient data recovers with more history; a singular design
    /// recovers with a different factor set. Everything else is caller
    /// error.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::InsufficientData { .. } | Self::SingularDesign { .. })
    }
}

/// Trait for walk-forward regression over a trailing window.
pub trait WindowRegressor: Send + Sync {
    /// Configuration type for this regressor.
    type Config: Default + Clone + Send + Sync;

    /// Create a new regressor with the given configuration.
    fn with_config(config: Self::Config) -> Self;

    /// Fit one window of complete-case observations.
    ///
    /// # Arguments
    /// * `window` - Snapshot of target returns and the factor design matrix
    ///
    /// # Returns
    /// Betas, intercept, residual standard deviation, and HAC standard
    /// errors for the window.
    ///
    /// # Errors
    /// Returns `EstimatorError` if the window is too small or the design
    /// matrix is rank deficient.
    fn fit(&self, window: &RegressionWindow) -> Result<RegressionResult, EstimatorError>;
}
