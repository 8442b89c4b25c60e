//! Error types for the attribution engine.

use cartagena_math::MathError;
use cartagena_panel::PanelError;
use cartagena_primitives::{Date, InstrumentId, SkipReason};
use cartagena_traits::EstimatorError;

/// Errors that can occur while configuring or running the engine.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// Estimator error.
    #[error("estimator error: {0}")]
    Estimator(#[from] EstimatorError),

    /// Math error.
    #[error("math error: {0}")]
    Math(#[from] MathError),

    /// Panel construction error.
    #[error("panel error: {0}")]
    Panel(#[from] PanelError),

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Instrument referenced by the configuration is not in the panel.
    #[error("instrument not in panel: {0}")]
    UnknownInstrument(InstrumentId),

    /// The panel has no usable row for the requested date.
    #[error("no data for date: {0}")]
    NoDataForDate(Date),

    /// A factor had no usable data for the evaluation date. Recorded as a
    /// skip, not fatal to the run.
    #[error("factor {factor} unusable: {reason}")]
    MissingFactorData {
        /// Derived factor column id.
        factor: String,
        /// Why the factor is unusable.
        reason: SkipReason,
    },

    /// Every configured factor was skipped for the evaluation date.
    #[error("no usable factors on {0}")]
    NoUsableFactors(Date),

    /// Explained plus unexplained drifted from the target return.
    #[error("attribution identity violated: target return {target}, rows sum to {actual}")]
    AttributionInconsistency {
        /// Realized target return.
        target: f64,
        /// What the assembled rows actually sum to.
        actual: f64,
    },
}

impl ModelError {
    /// Returns whether a caller can recover by waiting for more data,
    /// choosing another date, or changing the factor set.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        match self {
            Self::Estimator(err) => err.is_recoverable(),
            Self::Panel(err) => matches!(err, PanelError::InsufficientData { .. }),
            Self::NoDataForDate(_) | Self::MissingFactorData { .. } | Self::NoUsableFactors(_) => {
                true
            }
            _ => false,
        }
    }
}
