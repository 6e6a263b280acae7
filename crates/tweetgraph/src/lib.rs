//! # Tweetgraph
//!
//! Batch tool that fetches the recent timeline of every account listed in an
//! input file and writes one per-day post count bar chart per account.
//!
//! This is the main binary crate: it reads the handle list, wires the timeline
//! client to the chart pipeline and drives the accounts one at a time.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod app;
pub mod error;
pub mod input;
pub mod runner;

pub use app::{chart_config, run, run_with_source};
pub use error::*;
pub use input::{parse_handles, read_handles};
pub use runner::{BatchRunner, RunSummary};
