#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tenure/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod aggregate;
pub mod error;
pub mod matrix;
pub mod split;
pub mod window;

pub use aggregate::{aggregate_employees, distinct_months, global_max_month};
pub use error::{FeatureError, Result};
pub use matrix::FeatureMatrix;
pub use split::split_by_ids;
pub use window::filter_before;

#[cfg(test)]
pub(crate) mod testing;

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
