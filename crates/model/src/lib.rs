#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/cartagena/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod attribution;
pub use attribution::{Attribution, AttributionCalculator, FactorRealization};

mod config;
pub use config::{
    EngineConfig, FactorSpec, MIN_EXTRA_OBS, MIN_WINDOW, STANDARDIZE_MIN_COVERAGE, ScoreBounds,
};

mod engine;
pub use engine::AttributionEngine;

mod error;
pub use error::ModelError;

mod regressor;
pub use regressor::{HacOlsConfig, HacOlsRegressor};

mod report;
pub use report::assemble_report;

/// Re-export commonly used types.
pub mod prelude {
    pub use cartagena_traits::WindowRegressor;

    pub use super::{AttributionEngine, EngineConfig, FactorSpec, ModelError};
}
