//! # Tweetgraph Common
//!
//! Shared types, errors and infrastructure for tweetgraph.
//!
//! This crate provides the foundational pieces used across the workspace:
//! the error type, logging bootstrap, the account/record domain types and
//! the remote timeline client that supplies records to the chart pipeline.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod logging;
pub mod source;
pub mod twitter;
pub mod types;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

// Re-export commonly used types
pub use error::{Result, TweetGraphError};
pub use logging::{init_logging, LoggingConfig};
pub use source::TimelineSource;
pub use twitter::{TwitterClient, TwitterConfig};
pub use types::*;
