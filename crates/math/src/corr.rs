//! Pearson correlation.

use ndarray::ArrayView1;

/// Pearson correlation of two equal-length series.
///
/// Returns None when the lengths differ, fewer than two observations are
/// given, or either series has zero variance.
#[must_use]
pub fn pearson(a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> Option<f64> {
    let n = a.len();
    if n != b.len() || n < 2 {
        return None;
    }

    let n_f = n as f64;
    let mean_a = a.sum() / n_f;
    let mean_b = b.sum() / n_f;

    let mut cov = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for (&x, &y) in a.iter().zip(b.iter()) {
        let dx = x - mean_a;
        let dy = y - mean_b;
        cov += dx * dy;
        var_a += dx * dx;
        var_b += dy * dy;
    }

    let denom = (var_a * var_b).sqrt();
    if denom > 0.0 && denom.is_finite() { Some(cov / denom) } else { None }
}
