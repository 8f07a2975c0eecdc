#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tenure/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod dates;
pub mod error;
pub mod sheets;

pub use dates::normalize_dates;
pub use error::{DataError, Result};
pub use sheets::{SheetClient, parse_records, parse_test_ids};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
