//! # cartagena
//!
//! Daily factor attribution for a target instrument: each day's return is
//! explained as capped, scored per-factor contributions plus an unexplained
//! residual.
//!
//! This crate provides a unified interface to the cartagena attribution
//! ecosystem. Individual components can be enabled via feature flags.
//!
//! ## Features
//!
//! - `full` (default): Enables all components
//! - `primitives`: Core type definitions
//! - `traits`: Trait abstractions
//! - `math`: Rolling statistics and regression numerics
//! - `panel`: Price alignment and return panels
//! - `model`: The walk-forward attribution engine
//! - `output`: Report export and console rendering
//!
//! ## Example
//!
//! ```rust,ignore
//! // With default features (all components):
//! use cartagena::model;
//! use cartagena::output;
//!
//! // Or with specific features only:
//! // [dependencies]
//! // cartagena = { version = "0.1", default-features = false, features = ["model"] }
//! ```

#![doc(
    html_logo_url = "https://raw.githubusercontent.com/factordynamics/cartagena/main/assets/logo.png",
    html_favicon_url = "https://raw.githubusercontent.com/factordynamics/cartagena/main/assets/favicon.ico"
)]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

#[cfg(feature = "primitives")]
#[doc(inline)]
pub use cartagena_primitives as primitives;
#[cfg(feature = "traits")]
#[doc(inline)]
pub use cartagena_traits as traits;
#[cfg(feature = "math")]
#[doc(inline)]
pub use cartagena_math as math;
#[cfg(feature = "panel")]
#[doc(inline)]
pub use cartagena_panel as panel;
#[cfg(feature = "model")]
#[doc(inline)]
pub use cartagena_model as model;
#[cfg(feature = "output")]
#[doc(inline)]
pub use cartagena_output as output;
