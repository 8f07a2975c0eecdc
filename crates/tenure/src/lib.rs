#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tenure/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod config;
pub mod dates;
pub mod schema;

pub use config::PipelineConfig;

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
