//! Configuration schema definitions using serde.

use serde::{Deserialize, Serialize};
use std::{fmt, path::PathBuf, str::FromStr};
use tweetgraph_common::{LoggingConfig, TweetGraphError, TwitterConfig};

/// Main configuration structure for tweetgraph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Timeline API configuration.
    pub twitter: TwitterSection,
    /// Handle list configuration.
    pub input: InputConfig,
    /// Chart output configuration.
    pub output: OutputConfig,
    /// Batch behaviour.
    pub run: RunConfig,
    /// Logging configuration.
    pub logging: LoggingSection,
}

/// Timeline API configuration.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TwitterSection {
    /// OAuth client identifier.
    pub client_id: String,
    /// OAuth client secret.
    pub client_secret: String,
    /// Client-credentials token endpoint.
    pub token_url: String,
    /// REST API root.
    pub api_base_url: String,
    /// Posts requested per account (1..=200).
    pub page_size: u32,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Maximum retry attempts for transient failures.
    pub max_retries: usize,
    /// Requests per second.
    pub rate_limit_per_sec: u32,
}

impl fmt::Debug for TwitterSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TwitterSection")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("token_url", &self.token_url)
            .field("api_base_url", &self.api_base_url)
            .field("page_size", &self.page_size)
            .field("timeout_secs", &self.timeout_secs)
            .field("max_retries", &self.max_retries)
            .field("rate_limit_per_sec", &self.rate_limit_per_sec)
            .finish()
    }
}

/// Handle list configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputConfig {
    /// File with one handle per line.
    pub path: PathBuf,
}

/// Chart output configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Directory receiving `<handle>.png`.
    pub directory: PathBuf,
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Bar width as a fraction of one day slot, in (0, 1].
    pub bar_width: f64,
    /// Whether to title each chart with the account handle.
    pub caption: bool,
}

/// Batch behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// What to do when one account fails.
    pub failure_policy: FailurePolicy,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSection {
    /// `EnvFilter` directive, e.g. "info" or "tweetgraph=debug".
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

/// Whether the batch stops at the first failing account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Stop the whole run at the first failure.
    #[default]
    Abort,
    /// Record the failure and move on to the next account.
    Continue,
}

impl FromStr for FailurePolicy {
    type Err = TweetGraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "abort" => Ok(Self::Abort),
            "continue" => Ok(Self::Continue),
            other => Err(TweetGraphError::validation_field(
                format!("unknown failure policy {other:?}, expected \"abort\" or \"continue\""),
                "run.failure_policy",
            )),
        }
    }
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Abort => write!(f, "abort"),
            Self::Continue => write!(f, "continue"),
        }
    }
}

impl Config {
    /// Validates the configuration.
    pub fn validate(&self) -> tweetgraph_common::Result<()> {
        crate::validator::ConfigValidator::validate(self)
    }

    /// Settings for the timeline client.
    #[must_use]
    pub fn twitter_config(&self) -> TwitterConfig {
        let section = &self.twitter;
        TwitterConfig::new(&section.client_id, &section.client_secret)
            .with_endpoints(&section.api_base_url, &section.token_url)
            .with_page_size(section.page_size)
            .with_timeout(section.timeout_secs)
            .with_rate_limit(section.rate_limit_per_sec)
            .with_max_retries(section.max_retries)
    }

    /// Settings for the tracing subscriber.
    #[must_use]
    pub fn logging_config(&self) -> LoggingConfig {
        LoggingConfig {
            level: self.logging.level.clone(),
            json_format: self.logging.json,
            ..LoggingConfig::default()
        }
    }
}
