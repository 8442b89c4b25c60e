//! The aligned wide panel.

use cartagena_primitives::{Date, InstrumentId, ReturnHorizon};
use ndarray::{Array2, ArrayView1};

/// Aligned close prices and derived returns on a shared trading-date axis.
///
/// Rows are dates (sorted, deduplicated union of the input dates), columns
/// are instruments (sorted by id). Missing values are NaN. A panel is
/// read-only after construction and safe to share across threads.
#[derive(Debug, Clone)]
pub struct Panel {
    dates: Vec<Date>,
    instruments: Vec<InstrumentId>,
    closes: Array2<f64>,
    ret1d: Array2<f64>,
    ret5d: Array2<f64>,
}

impl Panel {
    pub(crate) fn new(
        dates: Vec<Date>,
        instruments: Vec<InstrumentId>,
        closes: Array2<f64>,
        ret1d: Array2<f64>,
        ret5d: Array2<f64>,
    ) -> Self {
        debug_assert_eq!(closes.nrows(), dates.len());
        debug_assert_eq!(closes.ncols(), instruments.len());
        debug_assert_eq!(closes.dim(), ret1d.dim());
        debug_assert_eq!(closes.dim(), ret5d.dim());
        Self { dates, instruments, closes, ret1d, ret5d }
    }

    /// Shared trading-date axis, ascending.
    #[must_use]
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Instrument columns, sorted by id.
    #[must_use]
    pub fn instruments(&self) -> &[InstrumentId] {
        &self.instruments
    }

    /// Number of trading dates.
    #[must_use]
    pub fn n_dates(&self) -> usize {
        self.dates.len()
    }

    /// Number of instrument columns.
    #[must_use]
    pub fn n_instruments(&self) -> usize {
        self.instruments.len()
    }

    /// Row index of `date`, if it is on the axis.
    #[must_use]
    pub fn date_index(&self, date: Date) -> Option<usize> {
        self.dates.binary_search(&date).ok()
    }

    /// Column index of `instrument`, if present.
    #[must_use]
    pub fn instrument_index(&self, instrument: &InstrumentId) -> Option<usize> {
        self.instruments.binary_search(instrument).ok()
    }

    /// Whether `instrument` has a column in the panel.
    #[must_use]
    pub fn contains(&self, instrument: &InstrumentId) -> bool {
        self.instrument_index(instrument).is_some()
    }

    /// Gap-filled close series for `instrument`; NaN marks missing.
    #[must_use]
    pub fn close_series(&self, instrument: &InstrumentId) -> Option<ArrayView1<'_, f64>> {
        self.instrument_index(instrument).map(|j| self.closes.column(j))
    }

    /// Simple return series for `instrument` at `horizon`; NaN marks missing.
    #[must_use]
    pub fn return_series(
        &self,
        instrument: &InstrumentId,
        horizon: ReturnHorizon,
    ) -> Option<ArrayView1<'_, f64>> {
        let matrix = match horizon {
            ReturnHorizon::OneDay => &self.ret1d,
            ReturnHorizon::FiveDay => &self.ret5d,
        };
        self.instrument_index(instrument).map(|j| matrix.column(j))
    }

    /// Number of non-missing closes for `instrument`.
    #[must_use]
    pub fn non_missing_closes(&self, instrument: &InstrumentId) -> Option<usize> {
        self.close_series(instrument).map(|col| col.iter().filter(|v| v.is_finite()).count())
    }
}
