//! Default values for every configuration section.

use crate::schema::*;
use std::path::PathBuf;
use tweetgraph_common::twitter::{DEFAULT_API_BASE_URL, DEFAULT_TOKEN_URL, MAX_PAGE_SIZE};

/// Handle list read when nothing else is configured.
pub const DEFAULT_INPUT_PATH: &str = "input.csv";
/// Directory charts are written to when nothing else is configured.
pub const DEFAULT_OUTPUT_DIR: &str = "output";
/// Largest chart side accepted, in pixels.
pub const MAX_CHART_SIDE: u32 = 8192;
/// Height taken by the day labels and margins; the canvas must be taller.
pub const RESERVED_CHART_HEIGHT: u32 = 128;
/// Width taken by the count labels and margins; the canvas must be wider.
pub const RESERVED_CHART_WIDTH: u32 = 80;

impl Default for Config {
    fn default() -> Self {
        Self {
            twitter: TwitterSection::default(),
            input: InputConfig::default(),
            output: OutputConfig::default(),
            run: RunConfig::default(),
            logging: LoggingSection::default(),
        }
    }
}

impl Default for TwitterSection {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            page_size: MAX_PAGE_SIZE,
            timeout_secs: 30,
            max_retries: 3,
            rate_limit_per_sec: 1,
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_INPUT_PATH),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(DEFAULT_OUTPUT_DIR),
            width: 1024,
            height: 512,
            bar_width: 0.5,
            caption: false,
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            failure_policy: FailurePolicy::Abort,
        }
    }
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}
