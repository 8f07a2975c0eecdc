#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tenure/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod forest;
pub mod metrics;
pub mod split;
pub mod trainer;

mod tree;

pub use error::{ModelError, Result};
pub use forest::RandomForestClassifier;
pub use metrics::{ClassificationMetrics, ConfusionMatrix};
pub use split::{TrainTestSplit, stratified_split};
pub use trainer::{CutoffReport, LabelCounts, WarmStartTrainer};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
