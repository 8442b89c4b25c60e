//! Newey-West heteroskedasticity and autocorrelation consistent errors.

use ndarray::{Array1, Array2};

use crate::ols::OlsFit;

/// Bartlett kernel weight for `lag` at truncation `max_lag`.
#[must_use]
pub fn bartlett_weight(lag: usize, max_lag: usize) -> f64 {
    if lag > max_lag { 0.0 } else { 1.0 - lag as f64 / (max_lag as f64 + 1.0) }
}

/// Data-driven lag truncation: floor(4 * (n / 100)^(2/9)).
#[must_use]
pub fn default_lag_truncation(n_obs: usize) -> usize {
    if n_obs == 0 {
        return 0;
    }
    (4.0 * (n_obs as f64 / 100.0).powf(2.0 / 9.0)).floor() as usize
}

/// Newey-West standard errors for an OLS fit.
///
/// Sandwich estimator `(X'X)^-1 M (X'X)^-1` where
/// `M = G_0 + sum_{l=1..L} w_l (G_l + G_l')` is built from the score series
/// `u_t = x_t e_t` with Bartlett weights `w_l`. The truncation is clamped to
/// `n - 1`. Element 0 of the result is the intercept's standard error.
#[must_use]
pub fn newey_west_se(fit: &OlsFit, max_lag: usize) -> Array1<f64> {
    let n = fit.residuals.len();
    let p = fit.design.ncols();
    debug_assert_eq!(fit.design.nrows(), n);
    debug_assert!(n > 0);

    // Score series u_t = x_t e_t.
    let mut scores = Array2::zeros((n, p));
    for t in 0..n {
        for j in 0..p {
            scores[[t, j]] = fit.design[[t, j]] * fit.residuals[t];
        }
    }

    let max_lag = max_lag.min(n - 1);

    // G_0, then weighted symmetric autocovariances.
    let mut meat = scores.t().dot(&scores);
    for lag in 1..=max_lag {
        let w = bartlett_weight(lag, max_lag);
        let mut gamma = Array2::<f64>::zeros((p, p));
        for t in lag..n {
            for i in 0..p {
                for j in 0..p {
                    gamma[[i, j]] += scores[[t, i]] * scores[[t - lag, j]];
                }
            }
        }
        let gamma_t = gamma.t().to_owned();
        meat.scaled_add(w, &(&gamma + &gamma_t));
    }

    let cov = fit.xtx_inv.dot(&meat).dot(&fit.xtx_inv);
    Array1::from_iter((0..p).map(|j| cov[[j, j]].max(0.0).sqrt()))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use ndarray::{Array1, Array2, array};
    use rstest::rstest;

    use super::*;
    use crate::ols::ols;

    #[rstest]
    #[case(0, 2, 1.0)]
    #[case(1, 2, 2.0 / 3.0)]
    #[case(2, 2, 1.0 / 3.0)]
    #[case(3, 2, 0.0)]
    fn bartlett_weights(#[case] lag: usize, #[case] max_lag: usize, #[case] expected: f64) {
        assert_relative_eq!(bartlett_weight(lag, max_lag), expected);
    }

    #[rstest]
    #[case(0, 0)]
    #[case(30, 3)]
    #[case(50, 3)]
    #[case(90, 3)]
    #[case(100, 4)]
    #[case(252, 4)]
    #[case(500, 5)]
    fn lag_truncation_floors(#[case] n: usize, #[case] expected: usize) {
        assert_eq!(default_lag_truncation(n), expected);
    }

    /// At lag 0 the sandwich reduces to the White estimator; rebuild that by
    /// hand and compare.
    #[test]
    fn lag_zero_matches_closed_form() {
        let x = Array2::from_shape_vec(
            (8, 1),
            vec![0.3, -0.2, 0.5, -0.4, 0.1, -0.3, 0.4, -0.1],
        )
        .unwrap();
        let y = array![0.02, -0.01, 0.03, -0.02, 0.01, -0.015, 0.025, -0.005];

        let fit = ols(&y, &x).unwrap();
        let se = newey_west_se(&fit, 0);

        // With lag 0, M = X' diag(e^2) X; spot-check the intercept entry.
        let mut meat = Array2::<f64>::zeros((2, 2));
        for t in 0..8 {
            for i in 0..2 {
                for j in 0..2 {
                    meat[[i, j]] +=
                        fit.design[[t, i]] * fit.design[[t, j]] * fit.residuals[t].powi(2);
                }
            }
        }
        let cov = fit.xtx_inv.dot(&meat).dot(&fit.xtx_inv);
        assert_relative_eq!(se[0], cov[[0, 0]].sqrt(), epsilon = 1e-12);
        assert_relative_eq!(se[1], cov[[1, 1]].sqrt(), epsilon = 1e-12);
        assert_eq!(se.len(), 2);
    }

    /// Persistent residual blocks have positive first-order autocovariance,
    /// so widening the truncation must inflate the standard error.
    #[test]
    fn positive_autocorrelation_inflates_errors() {
        let n = 48;
        let mut x = Array2::zeros((n, 1));
        let mut y = Array1::zeros(n);
        for t in 0..n {
            // Slowly rotating regressor plus block-persistent noise.
            x[[t, 0]] = if t % 2 == 0 { 0.5 } else { -0.5 };
            let block = if (t / 6) % 2 == 0 { 0.01 } else { -0.01 };
            y[t] = 0.3 * x[[t, 0]] + block;
        }

        let fit = ols(&y, &x).unwrap();
        let se_white = newey_west_se(&fit, 0);
        let se_hac = newey_west_se(&fit, 4);

        assert!(se_hac[0] > se_white[0]);
    }

    #[test]
    fn truncation_is_clamped_to_sample_size() {
        let x = Array2::from_shape_vec((5, 1), vec![0.1, -0.2, 0.3, -0.1, 0.2]).unwrap();
        let y = array![0.01, -0.01, 0.02, -0.005, 0.015];

        let fit = ols(&y, &x).unwrap();
        let clamped = newey_west_se(&fit, 100);
        let explicit = newey_west_se(&fit, 4);

        for j in 0..2 {
            assert_relative_eq!(clamped[j], explicit[j], epsilon = 1e-14);
        }
    }
}
