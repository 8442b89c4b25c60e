//! Capping, scoring, and ordering of per-factor contributions.

use cartagena_primitives::AttributionRow;

use crate::ScoreBounds;

/// Weight of the contribution share in the composite score.
const SHARE_WEIGHT: f64 = 0.6;
/// Weight of the absolute correlation in the composite score.
const CORR_WEIGHT: f64 = 0.4;

/// One factor's inputs to a day's attribution.
#[derive(Debug, Clone)]
pub struct FactorRealization {
    /// Derived factor column id.
    pub factor: String,
    /// Rolling regression beta.
    pub beta: f64,
    /// Z-score of the factor's return on the evaluation date.
    pub zscore: f64,
    /// The factor's realized native return on the evaluation date.
    pub native_return: f64,
    /// Pearson correlation with the target over the regression rows.
    pub correlation: f64,
}

/// Sorted attribution rows plus the residual they leave unexplained.
#[derive(Debug, Clone)]
pub struct Attribution {
    /// Rows sorted by descending absolute capped contribution.
    pub rows: Vec<AttributionRow>,
    /// Target return minus the capped row sum.
    pub unexplained: f64,
}

/// Converts betas and realized z-scores into capped, scored rows.
///
/// A raw contribution is `beta * zscore * target_std`, de-standardized into
/// the target's native return units. Each row is clamped to
/// `cap_fraction * |target_return|`, and the unexplained residual absorbs
/// whatever the capped rows do not cover, so the accounting identity holds
/// by construction.
#[derive(Debug, Clone)]
pub struct AttributionCalculator {
    cap_fraction: f64,
    score_bounds: ScoreBounds,
}

impl AttributionCalculator {
    /// Calculator with the given cap fraction and score bounds.
    #[must_use]
    pub const fn new(cap_fraction: f64, score_bounds: ScoreBounds) -> Self {
        Self { cap_fraction, score_bounds }
    }

    /// Absolute cap for a day with `target_return`.
    #[must_use]
    pub fn cap(&self, target_return: f64) -> f64 {
        self.cap_fraction * target_return.abs()
    }

    /// Attribute `target_return` across `realizations`.
    ///
    /// `target_std` is the target's trailing rolling standard deviation on
    /// the evaluation date. Rows come back sorted by descending absolute
    /// capped contribution, then descending absolute score, then ascending
    /// factor id.
    #[must_use]
    pub fn attribute(
        &self,
        realizations: &[FactorRealization],
        target_return: f64,
        target_std: f64,
    ) -> Attribution {
        let cap = self.cap(target_return);

        let raw: Vec<f64> = realizations.iter().map(|r| r.beta * r.zscore * target_std).collect();
        let total_abs: f64 = raw.iter().map(|v| v.abs()).sum();

        let mut rows: Vec<AttributionRow> = realizations
            .iter()
            .zip(&raw)
            .map(|(real, &raw_contribution)| {
                let share =
                    if total_abs > 0.0 { raw_contribution.abs() / total_abs } else { 0.0 };
                let blend =
                    (SHARE_WEIGHT * share + CORR_WEIGHT * real.correlation.abs()).clamp(0.0, 1.0);
                AttributionRow {
                    factor: real.factor.clone(),
                    raw_return: real.native_return,
                    beta: real.beta,
                    raw_contribution,
                    capped_contribution: raw_contribution.clamp(-cap, cap),
                    correlation: real.correlation,
                    score: self.score_bounds.lower + blend * self.score_bounds.span(),
                }
            })
            .collect();

        rows.sort_by(|a, b| {
            b.capped_contribution
                .abs()
                .total_cmp(&a.capped_contribution.abs())
                .then_with(|| b.score.abs().total_cmp(&a.score.abs()))
                .then_with(|| a.factor.cmp(&b.factor))
        });

        let explained: f64 = rows.iter().map(|r| r.capped_contribution).sum();
        Attribution { rows, unexplained: target_return - explained }
    }
}
