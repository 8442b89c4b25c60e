//! The attribution engine: per-date runs and range backfills.

use cartagena_math::{lag_series, pearson, rolling_standardize};
use cartagena_panel::{Panel, PanelBuilder, PanelError};
use cartagena_primitives::{
    DailyReport, Date, FitDiagnostics, PricePoint, RegressionWindow, SkipReason, SkippedFactor,
    StandardizedSeries,
};
use cartagena_traits::{EstimatorError, WindowRegressor};
use ndarray::{Array1, Array2, s};

use crate::{
    AttributionCalculator, EngineConfig, FactorRealization, HacOlsConfig, HacOlsRegressor,
    MIN_EXTRA_OBS, ModelError, STANDARDIZE_MIN_COVERAGE, assemble_report,
};

/// A factor's series, precomputed once and aligned with the panel's dates.
#[derive(Debug, Clone)]
struct PreparedFactor {
    column: String,
    native: Array1<f64>,
    standardized: StandardizedSeries,
}

/// Walk-forward attribution engine over an immutable panel.
///
/// Construction validates the configuration, checks every referenced
/// instrument against the panel, and precomputes native and standardized
/// return series per configured horizon and lag. After that, `run` only
/// reads.
#[derive(Debug)]
pub struct AttributionEngine {
    config: EngineConfig,
    panel: Panel,
    regressor: HacOlsRegressor,
    calculator: AttributionCalculator,
    target_native: Array1<f64>,
    target_std: StandardizedSeries,
    factors: Vec<PreparedFactor>,
}

impl AttributionEngine {
    /// Build an engine over an existing panel.
    ///
    /// # Errors
    /// `InvalidConfig` for a bad configuration, `UnknownInstrument` when the
    /// target or a factor is not in the panel, and a panel error when the
    /// target's non-missing history is shorter than the regression window
    /// plus a margin.
    pub fn new(panel: Panel, config: EngineConfig) -> Result<Self, ModelError> {
        config.validate()?;

        if !panel.contains(&config.target) {
            return Err(ModelError::UnknownInstrument(config.target.clone()));
        }
        for spec in &config.factors {
            if !panel.contains(&spec.instrument) {
                return Err(ModelError::UnknownInstrument(spec.instrument.clone()));
            }
        }

        let required = config.regression_window + MIN_EXTRA_OBS;
        let actual = panel.non_missing_closes(&config.target).unwrap_or(0);
        if actual < required {
            return Err(ModelError::Panel(PanelError::InsufficientData {
                instrument: config.target.clone(),
                required,
                actual,
            }));
        }

        let target_native = panel
            .return_series(&config.target, config.horizon)
            .map(|view| view.to_owned())
            .ok_or_else(|| ModelError::UnknownInstrument(config.target.clone()))?;
        let target_std = rolling_standardize(
            &target_native,
            config.standardization_window,
            STANDARDIZE_MIN_COVERAGE,
        )?;

        let mut factors = Vec::with_capacity(config.factors.len());
        for spec in &config.factors {
            let native = panel
                .return_series(&spec.instrument, config.horizon)
                .map(|view| view.to_owned())
                .ok_or_else(|| ModelError::UnknownInstrument(spec.instrument.clone()))?;
            let standardized = rolling_standardize(
                &native,
                config.standardization_window,
                STANDARDIZE_MIN_COVERAGE,
            )?;

            // Standardize first, then lag: a lagged column carries the
            // z-score computed as of its own observation date.
            let (native, standardized) = if spec.lag == 0 {
                (native, standardized)
            } else {
                (
                    lag_series(&native, spec.lag),
                    StandardizedSeries::new(
                        lag_series(&standardized.zscores, spec.lag),
                        lag_series(&standardized.mean, spec.lag),
                        lag_series(&standardized.std, spec.lag),
                    ),
                )
            };

            factors.push(PreparedFactor { column: spec.column_id(), native, standardized });
        }

        let regressor = HacOlsRegressor::with_config(HacOlsConfig { lags: config.hac_lags });
        let calculator = AttributionCalculator::new(config.cap_fraction, config.score_bounds);

        Ok(Self { config, panel, regressor, calculator, target_native, target_std, factors })
    }

    /// Build the panel from raw prices, then the engine on top of it.
    ///
    /// # Errors
    /// Panel construction errors (empty input, duplicate rows, unknown
    /// target, short target history) surface as `ModelError::Panel`, plus
    /// everything `new` can return.
    pub fn from_prices(prices: &[PricePoint], config: EngineConfig) -> Result<Self, ModelError> {
        config.validate()?;
        let panel = PanelBuilder::new(config.max_fill_gap_days)
            .with_min_target_history(config.regression_window + MIN_EXTRA_OBS)
            .build(prices, &config.target)?;
        Self::new(panel, config)
    }

    /// The engine's configuration.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The underlying panel.
    #[must_use]
    pub const fn panel(&self) -> &Panel {
        &self.panel
    }

    /// Explain the target's return on `date`.
    ///
    /// # Errors
    /// `NoDataForDate` when `date` is off the panel's axis or the target
    /// return is missing, `NoUsableFactors` when every factor got skipped,
    /// and estimator errors when the surviving window cannot support a fit.
    pub fn run(&self, date: Date) -> Result<DailyReport, ModelError> {
        let idx = self.panel.date_index(date).ok_or(ModelError::NoDataForDate(date))?;

        let target_return = self.target_native[idx];
        if !target_return.is_finite() {
            return Err(ModelError::NoDataForDate(date));
        }

        let target_sigma = self.target_std.std_at(idx).ok_or_else(|| {
            let window = self.config.standardization_window;
            let start = idx.saturating_sub(window);
            let have = self
                .target_native
                .slice(s![start..idx])
                .iter()
                .filter(|v| v.is_finite())
                .count();
            ModelError::Estimator(EstimatorError::InsufficientData {
                required: coverage_floor(window),
                actual: have,
            })
        })?;

        let window_start = (idx + 1).saturating_sub(self.config.regression_window);
        let mut kept: Vec<&PreparedFactor> = Vec::with_capacity(self.factors.len());
        let mut skipped = Vec::new();
        for factor in &self.factors {
            match screen(factor, window_start, idx) {
                Ok(()) => kept.push(factor),
                Err(ModelError::MissingFactorData { factor: column, reason }) => {
                    skipped.push(SkippedFactor { factor: column, reason });
                }
                Err(other) => return Err(other),
            }
        }
        if kept.is_empty() {
            return Err(ModelError::NoUsableFactors(date));
        }

        // Complete cases only: the target return and every kept factor's
        // z-score present on the same row.
        let rows: Vec<usize> = (window_start..=idx)
            .filter(|&t| {
                self.target_native[t].is_finite()
                    && kept.iter().all(|f| f.standardized.zscore_at(t).is_some())
            })
            .collect();

        let required = self.config.min_fit_rows(kept.len());
        if rows.len() < required {
            return Err(ModelError::Estimator(EstimatorError::InsufficientData {
                required,
                actual: rows.len(),
            }));
        }

        let target = Array1::from_iter(rows.iter().map(|&t| self.target_native[t]));
        let mut design = Array2::zeros((rows.len(), kept.len()));
        for (j, factor) in kept.iter().enumerate() {
            for (i, &t) in rows.iter().enumerate() {
                design[[i, j]] = factor.standardized.zscores[t];
            }
        }

        let factor_ids: Vec<String> = kept.iter().map(|f| f.column.clone()).collect();
        let snapshot = RegressionWindow::new(date, factor_ids, target, design);
        let result = self.regressor.fit(&snapshot)?;

        let realizations: Vec<FactorRealization> = kept
            .iter()
            .enumerate()
            .map(|(j, factor)| FactorRealization {
                factor: factor.column.clone(),
                beta: result.betas[j],
                zscore: factor.standardized.zscores[idx],
                native_return: factor.native[idx],
                correlation: pearson(snapshot.design.column(j), snapshot.target.view())
                    .unwrap_or(0.0),
            })
            .collect();

        let attribution = self.calculator.attribute(&realizations, target_return, target_sigma);
        let diagnostics = FitDiagnostics {
            n_obs: result.n_obs,
            r_squared: result.r_squared,
            residual_std: result.residual_std,
        };

        assemble_report(
            date,
            self.config.horizon,
            self.config.target.clone(),
            target_return,
            attribution,
            skipped,
            diagnostics,
        )
    }

    /// Run every panel date in `from..=to`, isolating per-date failures.
    #[must_use]
    pub fn backfill(&self, from: Date, to: Date) -> Vec<(Date, Result<DailyReport, ModelError>)> {
        self.panel
            .dates()
            .iter()
            .copied()
            .filter(|date| *date >= from && *date <= to)
            .map(|date| (date, self.run(date)))
            .collect()
    }
}

/// Check one factor's usability for the window ending at `idx`.
fn screen(factor: &PreparedFactor, window_start: usize, idx: usize) -> Result<(), ModelError> {
    let usable =
        (window_start..=idx).filter(|&t| factor.standardized.zscore_at(t).is_some()).count();
    if usable == 0 {
        return Err(ModelError::MissingFactorData {
            factor: factor.column.clone(),
            reason: SkipReason::NoObservationInWindow,
        });
    }
    if factor.standardized.zscore_at(idx).is_none() {
        return Err(ModelError::MissingFactorData {
            factor: factor.column.clone(),
            reason: SkipReason::NoRealizedReturn,
        });
    }
    Ok(())
}

/// Finite observations a standardization window must hold, mirroring the
/// rolling standardizer's coverage rule.
fn coverage_floor(window: usize) -> usize {
    ((window as f64 * STANDARDIZE_MIN_COVERAGE).ceil() as usize).max(2)
}
