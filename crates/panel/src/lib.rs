#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/cartagena/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod builder;
pub use builder::PanelBuilder;

mod fill;
pub use fill::fill_limited_gaps;

mod panel;
pub use panel::Panel;

mod error;
pub use error::PanelError;
