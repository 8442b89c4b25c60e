//! Engine configuration.

use cartagena_primitives::{InstrumentId, ReturnHorizon};

use crate::ModelError;

/// Smallest accepted regression or standardization window, in trading days.
pub const MIN_WINDOW: usize = 20;

/// Fraction of a standardization window that must hold finite observations
/// before z-scores are defined.
pub const STANDARDIZE_MIN_COVERAGE: f64 = 0.8;

/// Non-missing target closes required beyond the regression window before a
/// panel is accepted.
pub const MIN_EXTRA_OBS: usize = 10;

/// A candidate factor instrument with an optional lag in trading days.
///
/// A lagged factor contributes its series shifted forward by `lag`, under a
/// derived column id distinct from the unlagged one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactorSpec {
    /// Factor instrument.
    pub instrument: InstrumentId,
    /// Lag in trading days; zero means contemporaneous.
    pub lag: usize,
}

impl FactorSpec {
    /// Unlagged factor.
    #[must_use]
    pub const fn new(instrument: InstrumentId) -> Self {
        Self { instrument, lag: 0 }
    }

    /// Factor lagged by `lag` trading days.
    #[must_use]
    pub const fn lagged(instrument: InstrumentId, lag: usize) -> Self {
        Self { instrument, lag }
    }

    /// Derived column id: the instrument id, suffixed `_lag<k>` when lagged.
    #[must_use]
    pub fn column_id(&self) -> String {
        if self.lag == 0 {
            self.instrument.as_str().to_string()
        } else {
            format!("{}_lag{}", self.instrument, self.lag)
        }
    }
}

/// Inclusive output range for attribution scores.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBounds {
    /// Lower bound.
    pub lower: f64,
    /// Upper bound; must exceed `lower`.
    pub upper: f64,
}

impl ScoreBounds {
    /// Bounds spanning `lower..=upper`.
    #[must_use]
    pub const fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// Width of the range.
    #[must_use]
    pub const fn span(self) -> f64 {
        self.upper - self.lower
    }
}

impl Default for ScoreBounds {
    fn default() -> Self {
        Self::new(0.0, 100.0)
    }
}

/// Full configuration of an attribution run.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Target instrument whose returns get explained.
    pub target: InstrumentId,
    /// Candidate factors; non-empty, never containing the target.
    pub factors: Vec<FactorSpec>,
    /// Return horizon for the target and every factor.
    pub horizon: ReturnHorizon,
    /// Trailing regression window in trading days.
    pub regression_window: usize,
    /// Trailing standardization window in trading days.
    pub standardization_window: usize,
    /// Longest run of missing closes the panel builder may fill.
    pub max_fill_gap_days: usize,
    /// Newey-West lag override; the n-based default applies when `None`.
    pub hac_lags: Option<usize>,
    /// Per-row contribution cap as a fraction of the day's absolute target
    /// return.
    pub cap_fraction: f64,
    /// Score output range.
    pub score_bounds: ScoreBounds,
}

impl EngineConfig {
    /// Configuration with defaults for everything but the instruments.
    #[must_use]
    pub fn new(target: impl Into<InstrumentId>, factors: Vec<FactorSpec>) -> Self {
        Self {
            target: target.into(),
            factors,
            horizon: ReturnHorizon::default(),
            regression_window: 90,
            standardization_window: 90,
            max_fill_gap_days: 5,
            hac_lags: None,
            cap_fraction: 0.6,
            score_bounds: ScoreBounds::default(),
        }
    }

    /// Check every field against its documented range.
    ///
    /// # Errors
    /// Returns `ModelError::InvalidConfig` naming the offending field.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.factors.is_empty() {
            return Err(ModelError::InvalidConfig("factors must be non-empty".to_string()));
        }
        if self.factors.iter().any(|spec| spec.instrument == self.target) {
            return Err(ModelError::InvalidConfig(format!(
                "target {} must not appear among the factors",
                self.target
            )));
        }
        let mut ids: Vec<String> = self.factors.iter().map(FactorSpec::column_id).collect();
        ids.sort_unstable();
        ids.dedup();
        if ids.len() != self.factors.len() {
            return Err(ModelError::InvalidConfig(
                "factor column ids must be unique".to_string(),
            ));
        }
        if self.regression_window < MIN_WINDOW {
            return Err(ModelError::InvalidConfig(format!(
                "regression_window must be at least {MIN_WINDOW}"
            )));
        }
        if self.standardization_window < MIN_WINDOW {
            return Err(ModelError::InvalidConfig(format!(
                "standardization_window must be at least {MIN_WINDOW}"
            )));
        }
        if let Some(lags) = self.hac_lags
            && lags >= self.regression_window
        {
            return Err(ModelError::InvalidConfig(
                "hac_lags must be smaller than the regression window".to_string(),
            ));
        }
        if !(self.cap_fraction > 0.0 && self.cap_fraction <= 1.0) {
            return Err(ModelError::InvalidConfig("cap_fraction must lie in (0, 1]".to_string()));
        }
        if self.score_bounds.lower >= self.score_bounds.upper {
            return Err(ModelError::InvalidConfig(
                "score bounds must satisfy lower < upper".to_string(),
            ));
        }
        Ok(())
    }

    /// Complete-case rows a fit over `n_factors` candidates needs.
    #[must_use]
    pub const fn min_fit_rows(&self, n_factors: usize) -> usize {
        let floor = self.regression_window / 3;
        if n_factors + 2 > floor { n_factors + 2 } else { floor }
    }
}
