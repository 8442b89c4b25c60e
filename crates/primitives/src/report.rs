//! Assembled per-date attribution reports.

use serde::{Deserialize, Serialize};

use crate::{AttributionRow, Date, InstrumentId, ReturnHorizon, SkippedFactor};

/// Quality diagnostics of the regression behind a report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitDiagnostics {
    /// Complete-case observations used by the fit.
    pub n_obs: usize,
    /// Coefficient of determination.
    pub r_squared: f64,
    /// Residual standard deviation.
    pub residual_std: f64,
}

/// One evaluation date's attribution of the target's return.
///
/// `target_return == explained + unexplained` holds within the assembly
/// tolerance, and rows are sorted by descending absolute capped
/// contribution, score breaking ties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyReport {
    /// Evaluation date.
    pub date: Date,
    /// Return horizon of the run.
    pub horizon: ReturnHorizon,
    /// Target instrument.
    pub target: InstrumentId,
    /// Realized target return on the evaluation date.
    pub target_return: f64,
    /// Per-factor attribution rows, sorted.
    pub rows: Vec<AttributionRow>,
    /// Sum of capped contributions.
    pub explained: f64,
    /// Residual the factor set does not explain.
    pub unexplained: f64,
    /// Factors excluded from this date, with reasons.
    pub skipped: Vec<SkippedFactor>,
    /// Fit quality diagnostics.
    pub diagnostics: FitDiagnostics,
}

impl DailyReport {
    /// The `n` largest rows by absolute capped contribution.
    #[must_use]
    pub fn top_rows(&self, n: usize) -> &[AttributionRow] {
        &self.rows[..self.rows.len().min(n)]
    }

    /// Ratio of explained to realized return (1.0 = fully explained, 0.0
    /// when the target return is zero).
    #[must_use]
    pub fn explained_ratio(&self) -> f64 {
        if self.target_return == 0.0 { 0.0 } else { self.explained / self.target_return }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report_with_rows(rows: Vec<AttributionRow>) -> DailyReport {
        DailyReport {
            date: Date::from_ymd_opt(2024, 6, 3).unwrap(),
            horizon: ReturnHorizon::OneDay,
            target: "USDCOP=X".into(),
            target_return: 0.0074,
            explained: rows.iter().map(|r| r.capped_contribution).sum(),
            unexplained: 0.0074 - rows.iter().map(|r| r.capped_contribution).sum::<f64>(),
            rows,
            skipped: Vec::new(),
            diagnostics: FitDiagnostics { n_obs: 90, r_squared: 0.4, residual_std: 0.002 },
        }
    }

    fn row(factor: &str, capped: f64) -> AttributionRow {
        AttributionRow {
            factor: factor.to_string(),
            raw_return: 0.01,
            beta: 0.5,
            raw_contribution: capped,
            capped_contribution: capped,
            correlation: 0.2,
            score: 50.0,
        }
    }

    #[test]
    fn top_rows_never_overruns() {
        let report = report_with_rows(vec![row("a", 0.004), row("b", 0.002)]);

        assert_eq!(report.top_rows(1).len(), 1);
        assert_eq!(report.top_rows(5).len(), 2);
        assert_eq!(report.top_rows(1)[0].factor, "a");
    }

    #[test]
    fn explained_ratio_handles_flat_days() {
        let mut report = report_with_rows(vec![row("a", 0.0037)]);
        assert!((report.explained_ratio() - 0.5).abs() < 1e-12);

        report.target_return = 0.0;
        assert_eq!(report.explained_ratio(), 0.0);
    }

    #[test]
    fn report_serializes_round_trip() {
        let report = report_with_rows(vec![row("a", 0.004)]);
        let json = serde_json::to_string(&report).unwrap();
        let back: DailyReport = serde_json::from_str(&json).unwrap();

        assert_eq!(back, report);
    }
}
