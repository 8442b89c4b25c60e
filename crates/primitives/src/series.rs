//! Return horizons and rolling-standardized series.

use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Return horizon for the target and factor series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReturnHorizon {
    /// One-trading-day simple returns.
    #[default]
    OneDay,
    /// Five-trading-day simple returns.
    FiveDay,
}

impl ReturnHorizon {
    /// Number of trading days the horizon spans.
    #[must_use]
    pub const fn days(self) -> usize {
        match self {
            Self::OneDay => 1,
            Self::FiveDay => 5,
        }
    }

    /// Short label used in report headers and file names.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::OneDay => "1d",
            Self::FiveDay => "5d",
        }
    }
}

/// Rolling z-scores of a return series, together with the trailing mean and
/// standard deviation that produced them.
///
/// Statistics at index `t` come from the window ending at `t - 1`, so a
/// value never feeds its own standardization. Entries are NaN until the
/// trailing window holds enough observations or where the rolling standard
/// deviation is zero.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardizedSeries {
    /// Z-scores aligned with the source series; NaN where undefined.
    pub zscores: Array1<f64>,
    /// Trailing rolling mean; NaN where undefined.
    pub mean: Array1<f64>,
    /// Trailing rolling sample standard deviation; NaN where undefined.
    pub std: Array1<f64>,
}

impl StandardizedSeries {
    /// Bundle z-scores with their trailing statistics.
    ///
    /// # Panics
    /// In debug builds, panics if the arrays disagree on length.
    #[must_use]
    pub fn new(zscores: Array1<f64>, mean: Array1<f64>, std: Array1<f64>) -> Self {
        debug_assert_eq!(zscores.len(), mean.len());
        debug_assert_eq!(zscores.len(), std.len());
        Self { zscores, mean, std }
    }

    /// Length of the underlying series.
    #[must_use]
    pub fn len(&self) -> usize {
        self.zscores.len()
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.zscores.is_empty()
    }

    /// Z-score at `index`, or None when out of range or undefined.
    #[must_use]
    pub fn zscore_at(&self, index: usize) -> Option<f64> {
        self.zscores.get(index).copied().filter(|z| z.is_finite())
    }

    /// Trailing standard deviation at `index`, or None when undefined.
    #[must_use]
    pub fn std_at(&self, index: usize) -> Option<f64> {
        self.std.get(index).copied().filter(|s| s.is_finite())
    }
}
