//! Raw close-price observations.

use serde::{Deserialize, Serialize};

use crate::{Date, InstrumentId};

/// A single close-price observation for one instrument on one date.
///
/// Panel construction ingests a flat sequence of these, in any order and
/// possibly with gaps in the date axis; absent dates become explicit
/// missingness, never zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Instrument the close belongs to.
    pub instrument: InstrumentId,
    /// Trading date of the observation.
    pub date: Date,
    /// Closing price in the instrument's quote units.
    pub close: f64,
}

impl PricePoint {
    /// Create a new price point.
    pub fn new(instrument: impl Into<InstrumentId>, date: Date, close: f64) -> Self {
        Self { instrument: instrument.into(), date, close }
    }
}
