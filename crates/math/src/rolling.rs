//! Trailing rolling statistics and series alignment helpers.

use cartagena_primitives::StandardizedSeries;
use ndarray::{Array1, s};

use crate::MathError;

/// Standardize a series with trailing rolling statistics.
///
/// The mean and sample standard deviation at index `t` come from the
/// `window` observations ending at `t - 1`, so `values[t]` never feeds its
/// own statistics. NaN entries in the input are treated as missing and
/// skipped.
///
/// An entry is left undefined (NaN in all three output arrays) when fewer
/// than `ceil(window * min_coverage)` finite observations fall in the
/// trailing window, or when the rolling standard deviation is zero or
/// non-finite. The z-score alone is additionally undefined when `values[t]`
/// itself is missing.
///
/// # Errors
/// Returns `MathError::InvalidParameter` when `window < 2` or
/// `min_coverage` lies outside `(0, 1]`.
pub fn rolling_standardize(
    values: &Array1<f64>,
    window: usize,
    min_coverage: f64,
) -> Result<StandardizedSeries, MathError> {
    if window < 2 {
        return Err(MathError::InvalidParameter("window must be at least 2".to_string()));
    }
    if !(min_coverage > 0.0 && min_coverage <= 1.0) {
        return Err(MathError::InvalidParameter("min_coverage must lie in (0, 1]".to_string()));
    }

    let n = values.len();
    let mut zscores = Array1::from_elem(n, f64::NAN);
    let mut mean = Array1::from_elem(n, f64::NAN);
    let mut std = Array1::from_elem(n, f64::NAN);

    let required = ((window as f64 * min_coverage).ceil() as usize).max(2);

    for t in window..n {
        let trailing = values.slice(s![t - window..t]);
        let finite: Vec<f64> = trailing.iter().copied().filter(|v| v.is_finite()).collect();
        if finite.len() < required {
            continue;
        }

        let count = finite.len() as f64;
        let m = finite.iter().sum::<f64>() / count;
        let ss: f64 = finite.iter().map(|v| (v - m).powi(2)).sum();
        let s = (ss / (count - 1.0)).sqrt();
        if !s.is_finite() || s <= 0.0 {
            continue;
        }

        mean[t] = m;
        std[t] = s;
        if values[t].is_finite() {
            zscores[t] = (values[t] - m) / s;
        }
    }

    Ok(StandardizedSeries::new(zscores, mean, std))
}

/// Shift a series forward by `lag` positions, padding the front with NaN.
///
/// `lag_series(v, k)[t] == v[t - k]` for `t >= k`. A zero lag clones the
/// input.
#[must_use]
pub fn lag_series(values: &Array1<f64>, lag: usize) -> Array1<f64> {
    let n = values.len();
    let mut out = Array1::from_elem(n, f64::NAN);
    for t in lag..n {
        out[t] = values[t - lag];
    }
    out
}
