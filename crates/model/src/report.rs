//! Report assembly and the accounting identity check.

use cartagena_primitives::{
    DailyReport, Date, FitDiagnostics, InstrumentId, ReturnHorizon, SkippedFactor,
};

use crate::{Attribution, ModelError};

/// Relative tolerance of the accounting identity check.
const IDENTITY_REL_TOL: f64 = 1e-6;
/// Absolute floor so a zero target return still validates.
const IDENTITY_ABS_FLOOR: f64 = 1e-12;

/// Assemble a dated report, enforcing the accounting identity.
///
/// Recomputes the explained sum from the rows and validates that explained
/// plus unexplained reproduces `target_return` within
/// `1e-6 * max(|target_return|, 1e-12)`.
///
/// # Errors
/// Returns `ModelError::AttributionInconsistency` on a tolerance violation.
/// That is always a defect in the attribution inputs, never recoverable.
pub fn assemble_report(
    date: Date,
    horizon: ReturnHorizon,
    target: InstrumentId,
    target_return: f64,
    attribution: Attribution,
    skipped: Vec<SkippedFactor>,
    diagnostics: FitDiagnostics,
) -> Result<DailyReport, ModelError> {
    let explained: f64 = attribution.rows.iter().map(|row| row.capped_contribution).sum();
    let actual = explained + attribution.unexplained;
    let tolerance = IDENTITY_REL_TOL * target_return.abs().max(IDENTITY_ABS_FLOOR);
    if (actual - target_return).abs() > tolerance {
        return Err(ModelError::AttributionInconsistency { target: target_return, actual });
    }

    Ok(DailyReport {
        date,
        horizon,
        target,
        target_return,
        rows: attribution.rows,
        explained,
        unexplained: attribution.unexplained,
        skipped,
        diagnostics,
    })
}

#[cfg(test)]
mod tests {
    use cartagena_primitives::AttributionRow;

    use super::*;

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

    fn diagnostics() -> FitDiagnostics {
        FitDiagnostics { n_obs: 90, r_squared: 0.4, residual_std: 0.002 }
    }

    fn june_third() -> Date {
        Date::from_ymd_opt(2024, 6, 3).unwrap()
    }

    #[test]
    fn consistent_rows_assemble() {
        let attribution = Attribution {
            rows: vec![row("a", 0.004), row("b", -0.001)],
            unexplained: 0.0044,
        };

        let report = assemble_report(
            june_third(),
            ReturnHorizon::OneDay,
            "USDCOP=X".into(),
            0.0074,
            attribution,
            Vec::new(),
            diagnostics(),
        )
        .unwrap();

        assert_eq!(report.date, june_third());
        assert!((report.explained - 0.003).abs() < 1e-15);
        assert!((report.unexplained - 0.0044).abs() < 1e-15);
        assert_eq!(report.rows.len(), 2);
    }

    #[test]
    fn drifted_residual_is_rejected() {
        let attribution =
            Attribution { rows: vec![row("a", 0.004)], unexplained: 0.0041 };

        let err = assemble_report(
            june_third(),
            ReturnHorizon::OneDay,
            "USDCOP=X".into(),
            0.0074,
            attribution,
            Vec::new(),
            diagnostics(),
        )
        .unwrap_err();

        match err {
            ModelError::AttributionInconsistency { target, actual } => {
                assert!((target - 0.0074).abs() < 1e-15);
                assert!((actual - 0.0081).abs() < 1e-15);
            }
            other => panic!("expected inconsistency, got {other}"),
        }
        assert!(!ModelError::AttributionInconsistency { target: 0.0074, actual: 0.0081 }
            .is_recoverable());
    }

    #[test]
    fn flat_day_with_empty_rows_validates() {
        let attribution = Attribution { rows: Vec::new(), unexplained: 0.0 };

        let report = assemble_report(
            june_third(),
            ReturnHorizon::FiveDay,
            "USDCOP=X".into(),
            0.0,
            attribution,
            Vec::new(),
            diagnostics(),
        )
        .unwrap();

        assert_eq!(report.explained, 0.0);
        assert_eq!(report.unexplained, 0.0);
        assert_eq!(report.horizon, ReturnHorizon::FiveDay);
    }
}
