//! Error types for panel construction.

use cartagena_primitives::{Date, InstrumentId};

/// Errors that can occur while building a panel.
#[derive(Debug, thiserror::Error)]
pub enum PanelError {
    /// Polars error.
    #[error("polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// No price points were supplied.
    #[error("no price points supplied")]
    EmptyInput,

    /// Two observations for the same instrument and date. Never resolved by
    /// last-wins.
    #[error("duplicate price point for {instrument} on {date}")]
    DuplicatePricePoint {
        /// Instrument with the duplicate row.
        instrument: InstrumentId,
        /// Date of the duplicate row.
        date: Date,
    },

    /// An instrument required by the caller is absent from the input.
    #[error("unknown instrument: {0}")]
    UnknownInstrument(InstrumentId),

    /// An instrument has too little usable history.
    #[error("insufficient data for {instrument}: need {required} closes, got {actual}")]
    InsufficientData {
        /// Instrument with too little history.
        instrument: InstrumentId,
        /// Required number of non-missing closes.
        required: usize,
        /// Actual number of non-missing closes.
        actual: usize,
    },
}
