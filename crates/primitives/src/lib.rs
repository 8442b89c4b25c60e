#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/cartagena/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod attribution;
pub use attribution::{AttributionRow, SkipReason, SkippedFactor};

mod instrument;
pub use instrument::{Instrument, InstrumentId, InstrumentRole};

mod price;
pub use price::PricePoint;

mod report;
pub use report::{DailyReport, FitDiagnostics};

mod series;
pub use series::{ReturnHorizon, StandardizedSeries};

mod window;
pub use window::{RegressionResult, RegressionWindow};

/// Re-export common date type.
pub type Date = chrono::NaiveDate;
