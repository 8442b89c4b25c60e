//! Per-factor attribution rows and skip records.

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// One factor's contribution to a day's target return.
///
/// `raw_contribution` is beta times the factor's z-score times the target's
/// trailing standard deviation, in the target's native return units;
/// `capped_contribution` is the raw value clamped to the configured cap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributionRow {
    /// Derived factor column id (includes any lag suffix).
    pub factor: String,
    /// The factor's realized native return on the evaluation date.
    pub raw_return: f64,
    /// Rolling regression beta.
    pub beta: f64,
    /// De-standardized contribution before capping.
    pub raw_contribution: f64,
    /// Contribution after clamping to the cap.
    pub capped_contribution: f64,
    /// Pearson correlation with the target over the regression rows.
    pub correlation: f64,
    /// Composite rank score inside the configured bounds.
    pub score: f64,
}

impl AttributionRow {
    /// Whether capping actually clipped this row.
    #[must_use]
    pub fn is_capped(&self) -> bool {
        self.capped_contribution.abs() + f64::EPSILON < self.raw_contribution.abs()
    }
}

/// Why a configured factor was left out of a day's attribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
pub enum SkipReason {
    /// No usable z-score anywhere in the regression window.
    #[display("no usable observation in the regression window")]
    NoObservationInWindow,
    /// Window observations exist but the evaluation date's z-score is
    /// missing.
    #[display("no realized return on the evaluation date")]
    NoRealizedReturn,
}

/// Record of a factor excluded from a day's attribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedFactor {
    /// Derived factor column id.
    pub factor: String,
    /// Why it was excluded.
    pub reason: SkipReason,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(raw: f64, capped: f64) -> AttributionRow {
        AttributionRow {
            factor: "DX-Y.NYB".to_string(),
            raw_return: 0.004,
            beta: 0.5,
            raw_contribution: raw,
            capped_contribution: capped,
            correlation: 0.3,
            score: 70.0,
        }
    }

    #[test]
    fn capped_detection() {
        assert!(row(0.006, 0.00444).is_capped());
        assert!(row(-0.006, -0.00444).is_capped());
        assert!(!row(-0.0006, -0.0006).is_capped());
    }

    #[test]
    fn skip_reasons_render() {
        assert_eq!(
            SkipReason::NoObservationInWindow.to_string(),
            "no usable observation in the regression window"
        );
        assert_eq!(
            SkipReason::NoRealizedReturn.to_string(),
            "no realized return on the evaluation date"
        );
    }
}
