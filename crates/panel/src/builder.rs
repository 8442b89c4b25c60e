//! Long-to-wide panel construction.

use std::collections::{BTreeMap, BTreeSet};

use cartagena_primitives::{Date, InstrumentId, PricePoint};
use ndarray::{Array1, Array2};
use polars::prelude::*;

use crate::fill::fill_limited_gaps;
use crate::panel::Panel;
use crate::PanelError;

/// Builds an aligned [`Panel`] from a flat sequence of price points.
///
/// Alignment is explicit outer-join semantics: every instrument's closes are
/// left-joined onto the sorted union of all input dates, so absence shows up
/// as missingness rather than being dropped or zero-filled.
#[derive(Debug, Clone)]
pub struct PanelBuilder {
    max_fill_gap: usize,
    min_target_history: usize,
}

impl PanelBuilder {
    /// Create a builder that bridges missing runs of at most `max_fill_gap`
    /// trading days.
    #[must_use]
    pub const fn new(max_fill_gap: usize) -> Self {
        Self { max_fill_gap, min_target_history: 0 }
    }

    /// Require at least `min` non-missing closes for the target instrument.
    #[must_use]
    pub const fn with_min_target_history(mut self, min: usize) -> Self {
        self.min_target_history = min;
        self
    }

    /// Build the panel.
    ///
    /// # Errors
    /// Returns `PanelError::EmptyInput` when no prices are supplied,
    /// `DuplicatePricePoint` on a repeated (instrument, date) pair,
    /// `UnknownInstrument` when `target` never appears in the input, and
    /// `InsufficientData` when the target's usable history is shorter than
    /// the configured minimum.
    pub fn build(&self, prices: &[PricePoint], target: &InstrumentId) -> Result<Panel, PanelError> {
        if prices.is_empty() {
            return Err(PanelError::EmptyInput);
        }

        // Group closes per instrument, rejecting duplicate rows outright.
        let mut by_instrument: BTreeMap<InstrumentId, BTreeMap<Date, f64>> = BTreeMap::new();
        let mut spine: BTreeSet<Date> = BTreeSet::new();
        for point in prices {
            spine.insert(point.date);
            let series = by_instrument.entry(point.instrument.clone()).or_default();
            if series.insert(point.date, point.close).is_some() {
                return Err(PanelError::DuplicatePricePoint {
                    instrument: point.instrument.clone(),
                    date: point.date,
                });
            }
        }

        if !by_instrument.contains_key(target) {
            return Err(PanelError::UnknownInstrument(target.clone()));
        }

        let dates: Vec<Date> = spine.into_iter().collect();
        let instruments: Vec<InstrumentId> = by_instrument.keys().cloned().collect();

        // Left-join every instrument's observations onto the date spine.
        let spine_df = DataFrame::new(vec![Column::new("date".into(), dates.clone())])?;
        let mut wide = spine_df.lazy();
        for (id, series) in &by_instrument {
            let obs_dates: Vec<Date> = series.keys().copied().collect();
            let obs_closes: Vec<f64> = series.values().copied().collect();
            let instrument_df = DataFrame::new(vec![
                Column::new("date".into(), obs_dates),
                Column::new(id.as_str().into(), obs_closes),
            ])?;
            wide = wide.join(
                instrument_df.lazy(),
                [col("date")],
                [col("date")],
                JoinArgs::new(JoinType::Left),
            );
        }
        let wide = wide
            .sort(["date"], SortMultipleOptions::new().with_maintain_order(true))
            .collect()?;

        // Extract each column, normalize non-finite closes to missing, and
        // apply the gap-limited fill.
        let n_dates = dates.len();
        let mut closes = Array2::from_elem((n_dates, instruments.len()), f64::NAN);
        for (j, id) in instruments.iter().enumerate() {
            let mut values: Vec<Option<f64>> = wide
                .column(id.as_str())?
                .f64()?
                .into_iter()
                .map(|opt| opt.filter(|v| v.is_finite()))
                .collect();
            fill_limited_gaps(&mut values, self.max_fill_gap);
            for (i, value) in values.into_iter().enumerate() {
                if let Some(v) = value {
                    closes[[i, j]] = v;
                }
            }
        }

        if self.min_target_history > 0
            && let Ok(j) = instruments.binary_search(target)
        {
            let actual = closes.column(j).iter().filter(|v| v.is_finite()).count();
            if actual < self.min_target_history {
                return Err(PanelError::InsufficientData {
                    instrument: target.clone(),
                    required: self.min_target_history,
                    actual,
                });
            }
        }

        let ret1d = return_matrix(&closes, 1);
        let ret5d = return_matrix(&closes, 5);

        Ok(Panel::new(dates, instruments, closes, ret1d, ret5d))
    }
}

/// Simple returns over `span` rows; missing when either endpoint is missing
/// or the base close is zero.
fn return_matrix(closes: &Array2<f64>, span: usize) -> Array2<f64> {
    let (n_dates, n_cols) = closes.dim();
    let mut out = Array2::from_elem((n_dates, n_cols), f64::NAN);
    for j in 0..n_cols {
        let column = closes.column(j);
        let mut returns = Array1::from_elem(n_dates, f64::NAN);
        for t in span..n_dates {
            let now = column[t];
            let base = column[t - span];
            if now.is_finite() && base.is_finite() && base != 0.0 {
                returns[t] = now / base - 1.0;
            }
        }
        out.column_mut(j).assign(&returns);
    }
    out
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use cartagena_primitives::ReturnHorizon;

    use super::*;

    fn day(d: u32) -> Date {
        Date::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn points(rows: &[(&str, u32, f64)]) -> Vec<PricePoint> {
        rows.iter().map(|&(id, d, close)| PricePoint::new(id, day(d), close)).collect()
    }

    #[test]
    fn aligns_disjoint_calendars_onto_the_union() {
        let prices = points(&[
            ("COP", 1, 4000.0),
            ("COP", 2, 4040.0),
            ("COP", 3, 4020.0),
            ("DXY", 2, 104.0),
            ("DXY", 3, 105.0),
            ("DXY", 4, 103.0),
        ]);

        let panel = PanelBuilder::new(0).build(&prices, &"COP".into()).unwrap();

        assert_eq!(panel.dates().to_vec(), vec![day(1), day(2), day(3), day(4)]);
        assert_eq!(
            panel.instruments().to_vec(),
            vec![InstrumentId::from("COP"), InstrumentId::from("DXY")]
        );

        let cop = panel.close_series(&"COP".into()).unwrap();
        assert_relative_eq!(cop[0], 4000.0);
        assert!(cop[3].is_nan());

        let dxy = panel.close_series(&"DXY".into()).unwrap();
        assert!(dxy[0].is_nan());
        assert_relative_eq!(dxy[3], 103.0);
    }

    #[test]
    fn duplicate_rows_are_rejected() {
        let prices = points(&[("COP", 1, 4000.0), ("COP", 1, 4001.0)]);

        let err = PanelBuilder::new(0).build(&prices, &"COP".into()).unwrap_err();
        assert!(matches!(err, PanelError::DuplicatePricePoint { .. }));
    }

    #[test]
    fn short_gaps_fill_and_long_gaps_stay_missing() {
        // COP trades every day; DXY misses days 3-4 (short) and 6-12 (long).
        let mut rows: Vec<(&str, u32, f64)> = (1..=14).map(|d| ("COP", d, 4000.0 + d as f64)).collect();
        rows.push(("DXY", 1, 100.0));
        rows.push(("DXY", 2, 101.0));
        rows.push(("DXY", 5, 102.0));
        rows.push(("DXY", 13, 103.0));
        rows.push(("DXY", 14, 104.0));
        let prices = points(&rows);

        let panel = PanelBuilder::new(2).build(&prices, &"COP".into()).unwrap();
        let dxy = panel.close_series(&"DXY".into()).unwrap();

        // Days 3 and 4 bridge from day 2.
        assert_relative_eq!(dxy[2], 101.0);
        assert_relative_eq!(dxy[3], 101.0);
        // The seven-day run stays entirely missing.
        for t in 5..12 {
            assert!(dxy[t].is_nan(), "day {} should be missing", t + 1);
        }
        assert_relative_eq!(dxy[12], 103.0);
    }

    #[test]
    fn returns_derive_from_filled_closes() {
        let prices = points(&[
            ("COP", 1, 4000.0),
            ("COP", 2, 4040.0),
            ("COP", 3, 4020.0),
            ("COP", 4, 4060.0),
            ("COP", 5, 4100.0),
            ("COP", 6, 4080.0),
        ]);

        let panel = PanelBuilder::new(0).build(&prices, &"COP".into()).unwrap();
        let ret1d = panel.return_series(&"COP".into(), ReturnHorizon::OneDay).unwrap();
        let ret5d = panel.return_series(&"COP".into(), ReturnHorizon::FiveDay).unwrap();

        assert!(ret1d[0].is_nan());
        assert_relative_eq!(ret1d[1], 4040.0 / 4000.0 - 1.0, epsilon = 1e-12);
        assert_relative_eq!(ret1d[2], 4020.0 / 4040.0 - 1.0, epsilon = 1e-12);

        for t in 0..5 {
            assert!(ret5d[t].is_nan());
        }
        assert_relative_eq!(ret5d[5], 4080.0 / 4000.0 - 1.0, epsilon = 1e-12);
    }

    #[test]
    fn returns_stay_missing_across_unbridged_gaps() {
        let prices = points(&[
            ("COP", 1, 4000.0),
            ("COP", 2, 4040.0),
            ("COP", 5, 4100.0),
            ("COP", 6, 4080.0),
            ("DXY", 1, 100.0),
            ("DXY", 2, 101.0),
            ("DXY", 3, 102.0),
            ("DXY", 4, 103.0),
            ("DXY", 5, 104.0),
            ("DXY", 6, 105.0),
        ]);

        let panel = PanelBuilder::new(0).build(&prices, &"COP".into()).unwrap();
        let ret1d = panel.return_series(&"COP".into(), ReturnHorizon::OneDay).unwrap();

        // Day 3 and 4 closes are missing, so day 3, 4, and 5 returns are too.
        assert!(ret1d[2].is_nan());
        assert!(ret1d[3].is_nan());
        assert!(ret1d[4].is_nan());
        assert_relative_eq!(ret1d[5], 4080.0 / 4100.0 - 1.0, epsilon = 1e-12);
    }

    #[test]
    fn target_history_minimum_is_enforced() {
        let prices = points(&[("COP", 1, 4000.0), ("COP", 2, 4040.0), ("DXY", 1, 100.0)]);

        let err = PanelBuilder::new(0)
            .with_min_target_history(5)
            .build(&prices, &"COP".into())
            .unwrap_err();

        match err {
            PanelError::InsufficientData { required, actual, .. } => {
                assert_eq!(required, 5);
                assert_eq!(actual, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unknown_target_is_rejected() {
        let prices = points(&[("DXY", 1, 100.0)]);

        let err = PanelBuilder::new(0).build(&prices, &"COP".into()).unwrap_err();
        assert!(matches!(err, PanelError::UnknownInstrument(_)));
    }

    #[test]
    fn shuffled_input_builds_an_identical_panel() {
        let ordered = points(&[
            ("COP", 1, 4000.0),
            ("COP", 2, 4040.0),
            ("COP", 3, 4020.0),
            ("DXY", 1, 100.0),
            ("DXY", 2, 101.0),
            ("DXY", 3, 102.0),
        ]);
        let mut shuffled = ordered.clone();
        shuffled.reverse();
        shuffled.swap(0, 3);

        let a = PanelBuilder::new(1).build(&ordered, &"COP".into()).unwrap();
        let b = PanelBuilder::new(1).build(&shuffled, &"COP".into()).unwrap();

        assert_eq!(a.dates(), b.dates());
        assert_eq!(a.instruments(), b.instruments());
        for id in a.instruments() {
            let ca = a.close_series(id).unwrap();
            let cb = b.close_series(id).unwrap();
            for (x, y) in ca.iter().zip(cb.iter()) {
                assert_eq!(x.to_bits(), y.to_bits());
            }
        }
    }

    #[test]
    fn date_lookup_is_exact() {
        let prices = points(&[("COP", 1, 4000.0), ("COP", 3, 4020.0)]);
        let panel = PanelBuilder::new(0).build(&prices, &"COP".into()).unwrap();

        assert_eq!(panel.date_index(day(1)), Some(0));
        assert_eq!(panel.date_index(day(3)), Some(1));
        assert_eq!(panel.date_index(day(2)), None);
        assert!(panel.contains(&"COP".into()));
        assert!(!panel.contains(&"BZ=F".into()));
        assert_eq!(panel.non_missing_closes(&"COP".into()), Some(2));
    }
}
