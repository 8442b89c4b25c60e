//! Error types for mathematical operations.

/// Errors from mathematical operations.
#[derive(Debug, thiserror::Error)]
pub enum MathError {
    /// Input data is empty.
    #[error("input data is empty")]
    EmptyData,

    /// Dimension mismatch between inputs.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimension.
        expected: usize,
        /// Actual dimension.
        actual: usize,
    },

    /// Singular or nearly singular system.
    #[error("singular system: {detail}")]
    Singular {
        /// What made the system unsolvable.
        detail: String,
    },

    /// Invalid parameter.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}
