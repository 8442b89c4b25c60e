//! Regression window snapshots and fit results.

use ndarray::{Array1, Array2};

use crate::Date;

/// Immutable snapshot of the complete-case rows behind one walk-forward fit.
///
/// Rows are the trading days inside the trailing window ending at `end_date`
/// on which the target return and every candidate factor z-score are
/// present. Column order of `design` matches `factor_ids`; the intercept
/// column is the estimator's concern, not the snapshot's.
#[derive(Debug, Clone)]
pub struct RegressionWindow {
    /// Evaluation date the window ends at.
    pub end_date: Date,
    /// Derived factor column ids, in design-matrix order.
    pub factor_ids: Vec<String>,
    /// Target returns, one per complete row.
    pub target: Array1<f64>,
    /// Standardized factor returns, rows x factors.
    pub design: Array2<f64>,
}

impl RegressionWindow {
    /// Snapshot a window.
    ///
    /// # Panics
    /// In debug builds, panics if dimensions disagree.
    #[must_use]
    pub fn new(
        end_date: Date,
        factor_ids: Vec<String>,
        target: Array1<f64>,
        design: Array2<f64>,
    ) -> Self {
        debug_assert_eq!(target.len(), design.nrows());
        debug_assert_eq!(factor_ids.len(), design.ncols());
        Self { end_date, factor_ids, target, design }
    }

    /// Number of complete-case observations.
    #[must_use]
    pub fn n_obs(&self) -> usize {
        self.target.len()
    }

    /// Number of candidate factors.
    #[must_use]
    pub fn n_factors(&self) -> usize {
        self.factor_ids.len()
    }
}

/// Result of one walk-forward OLS fit with Newey-West standard errors.
#[derive(Debug, Clone)]
pub struct RegressionResult {
    /// Estimated factor betas, aligned with the window's factor ids.
    pub betas: Array1<f64>,
    /// Estimated intercept.
    pub intercept: f64,
    /// Residual standard deviation, sqrt(SSR / (n - k - 1)).
    pub residual_std: f64,
    /// Newey-West standard errors, aligned with `betas`.
    pub hac_se: Array1<f64>,
    /// Coefficient of determination of the fit.
    pub r_squared: f64,
    /// Number of observations used.
    pub n_obs: usize,
}

impl RegressionResult {
    /// Number of estimated factor coefficients.
    #[must_use]
    pub fn n_factors(&self) -> usize {
        self.betas.len()
    }
}
