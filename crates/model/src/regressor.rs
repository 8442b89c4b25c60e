//! OLS window regressor with Newey-West standard errors.

use cartagena_math::{MathError, default_lag_truncation, newey_west_se, ols};
use cartagena_primitives::{RegressionResult, RegressionWindow};
use cartagena_traits::{EstimatorError, WindowRegressor};
use ndarray::s;

/// Configuration for the HAC OLS regressor.
#[derive(Debug, Clone, Default)]
pub struct HacOlsConfig {
    /// Newey-West lag override; `floor(4 * (n/100)^(2/9))` when `None`.
    pub lags: Option<usize>,
}

/// OLS with an intercept, reporting Bartlett-kernel HAC standard errors.
///
/// Spherical OLS standard errors are never exposed.
#[derive(Debug, Clone)]
pub struct HacOlsRegressor {
    config: HacOlsConfig,
}

impl HacOlsRegressor {
    /// Regressor with the n-based default lag truncation.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(HacOlsConfig::default())
    }

    /// The configured lag override, if any.
    #[must_use]
    pub const fn lags(&self) -> Option<usize> {
        self.config.lags
    }
}

impl Default for HacOlsRegressor {
    fn default() -> Self {
        Self::new()
    }
}

impl WindowRegressor for HacOlsRegressor {
    type Config = HacOlsConfig;

    fn with_config(config: Self::Config) -> Self {
        Self { config }
    }

    fn fit(&self, window: &RegressionWindow) -> Result<RegressionResult, EstimatorError> {
        // n_factors slopes plus an intercept, with at least one residual
        // degree of freedom
        let required = window.n_factors() + 2;
        if window.n_obs() < required {
            return Err(EstimatorError::InsufficientData { required, actual: window.n_obs() });
        }

        let fit = ols(&window.target, &window.design).map_err(|err| match err {
            MathError::Singular { detail } => EstimatorError::SingularDesign { detail },
            MathError::DimensionMismatch { expected, actual } => EstimatorError::DimensionMismatch {
                expected,
                actual,
                context: "design matrix".to_string(),
            },
            MathError::EmptyData => EstimatorError::InsufficientData { required, actual: 0 },
            MathError::InvalidParameter(detail) => EstimatorError::InvalidConfig(detail),
        })?;

        let max_lag = self.config.lags.unwrap_or_else(|| default_lag_truncation(fit.n_obs()));
        let se = newey_west_se(&fit, max_lag);

        Ok(RegressionResult {
            betas: fit.slopes(),
            intercept: fit.intercept(),
            residual_std: fit.residual_std,
            hac_se: se.slice(s![1..]).to_owned(),
            r_squared: fit.r_squared,
            n_obs: fit.n_obs(),
        })
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use cartagena_primitives::Date;
    use ndarray::{Array1, Array2};

    use super::*;

    fn window_from(target: Array1<f64>, design: Array2<f64>) -> RegressionWindow {
        let ids = (0..design.ncols()).map(|j| format!("f{j}")).collect();
        RegressionWindow::new(Date::from_ymd_opt(2024, 6, 3).unwrap(), ids, target, design)
    }

    fn noiseless_two_factor_window(n: usize) -> RegressionWindow {
        let mut design = Array2::zeros((n, 2));
        let mut target = Array1::zeros(n);
        for i in 0..n {
            let x1 = (i as f64).sin();
            let x2 = (i as f64 * 0.7).cos();
            design[[i, 0]] = x1;
            design[[i, 1]] = x2;
            target[i] = 0.001 + 0.5 * x1 - 0.2 * x2;
        }
        window_from(target, design)
    }

    #[test]
    fn recovers_known_coefficients() {
        let window = noiseless_two_factor_window(40);
        let result = HacOlsRegressor::new().fit(&window).unwrap();

        assert_relative_eq!(result.betas[0], 0.5, epsilon = 1e-10);
        assert_relative_eq!(result.betas[1], -0.2, epsilon = 1e-10);
        assert_relative_eq!(result.intercept, 0.001, epsilon = 1e-10);
        assert_relative_eq!(result.r_squared, 1.0, epsilon = 1e-10);
        assert_eq!(result.n_obs, 40);
        assert_eq!(result.hac_se.len(), 2);
        assert!(result.hac_se.iter().all(|se| se.is_finite()));
    }

    #[test]
    fn too_few_rows_is_insufficient_data() {
        let window = noiseless_two_factor_window(3);
        let err = HacOlsRegressor::new().fit(&window).unwrap_err();

        assert!(matches!(err, EstimatorError::InsufficientData { required: 4, actual: 3 }));
        assert!(err.is_recoverable());
    }

    #[test]
    fn duplicated_column_is_singular() {
        let n = 30;
        let mut design = Array2::zeros((n, 2));
        let mut target = Array1::zeros(n);
        for i in 0..n {
            let x = (i as f64).sin();
            design[[i, 0]] = x;
            design[[i, 1]] = x;
            target[i] = 2.0 * x;
        }

        let err = HacOlsRegressor::new().fit(&window_from(target, design)).unwrap_err();
        assert!(matches!(err, EstimatorError::SingularDesign { .. }));
        assert!(err.is_recoverable());
    }

    #[test]
    fn lag_override_changes_standard_errors() {
        // Alternating noise that is not collinear with the regressor leaves
        // residuals with negative lag-one autocovariance, so weighting one
        // lag must move the sandwich away from White.
        let n = 60;
        let mut design = Array2::zeros((n, 1));
        let mut target = Array1::zeros(n);
        for i in 0..n {
            let x = (i as f64).sin();
            let e = if i % 2 == 0 { 0.01 } else { -0.01 };
            design[[i, 0]] = x;
            target[i] = 0.3 * x + e;
        }
        let window = window_from(target, design);

        let white = HacOlsRegressor::with_config(HacOlsConfig { lags: Some(0) })
            .fit(&window)
            .unwrap();
        let one_lag = HacOlsRegressor::with_config(HacOlsConfig { lags: Some(1) })
            .fit(&window)
            .unwrap();

        assert!((white.hac_se[0] - one_lag.hac_se[0]).abs() > 1e-12);
    }

    #[test]
    fn oversized_lag_override_is_clamped() {
        let window = noiseless_two_factor_window(25);
        let result = HacOlsRegressor::with_config(HacOlsConfig { lags: Some(10_000) })
            .fit(&window)
            .unwrap();

        assert!(result.hac_se.iter().all(|se| se.is_finite()));
    }
}
