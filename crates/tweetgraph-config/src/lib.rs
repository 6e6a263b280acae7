//! # Tweetgraph Config
//!
//! Type-safe configuration management for tweetgraph.
//!
//! Configuration comes from an optional TOML file overlaid with environment
//! variables, and is validated before anything touches the network.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod defaults;
pub mod loader;
pub mod schema;
pub mod validator;

pub use loader::*;
pub use schema::*;
pub use validator::*;
