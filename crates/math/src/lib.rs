#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/cartagena/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod corr;
pub use corr::pearson;

mod hac;
pub use hac::{bartlett_weight, default_lag_truncation, newey_west_se};

mod ols;
pub use ols::{OlsFit, ols};

mod rolling;
pub use rolling::{lag_series, rolling_standardize};

mod error;
pub use error::MathError;
