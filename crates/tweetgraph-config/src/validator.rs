//! Runtime validation of a loaded configuration.

use crate::{
    defaults::{MAX_CHART_SIDE, RESERVED_CHART_HEIGHT, RESERVED_CHART_WIDTH},
    schema::Config,
};
use tweetgraph_common::{twitter::MAX_PAGE_SIZE, Result, TweetGraphError};
use url::Url;

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates a configuration, reporting the first offending field.
    pub fn validate(config: &Config) -> Result<()> {
        let twitter = &config.twitter;

        if twitter.client_id.trim().is_empty() {
            return Err(TweetGraphError::validation_field(
                "client id cannot be empty (set TWITTER_CLIENTID)",
                "twitter.client_id",
            ));
        }
        if twitter.client_secret.trim().is_empty() {
            return Err(TweetGraphError::validation_field(
                "client secret cannot be empty (set TWITTER_CLIENTSECRET)",
                "twitter.client_secret",
            ));
        }
        Self::validate_url(&twitter.token_url, "twitter.token_url")?;
        Self::validate_url(&twitter.api_base_url, "twitter.api_base_url")?;

        if !(1..=MAX_PAGE_SIZE).contains(&twitter.page_size) {
            return Err(TweetGraphError::validation_field(
                format!("page size must be between 1 and {MAX_PAGE_SIZE}"),
                "twitter.page_size",
            ));
        }
        if twitter.rate_limit_per_sec == 0 {
            return Err(TweetGraphError::validation_field(
                "rate limit must be greater than 0",
                "twitter.rate_limit_per_sec",
            ));
        }

        let output = &config.output;
        for (value, reserved, field) in [
            (output.width, RESERVED_CHART_WIDTH, "output.width"),
            (output.height, RESERVED_CHART_HEIGHT, "output.height"),
        ] {
            if value <= reserved {
                return Err(TweetGraphError::validation_field(
                    format!("{value} pixels leaves no room for the plot (need more than {reserved})"),
                    field,
                ));
            }
            if value > MAX_CHART_SIDE {
                return Err(TweetGraphError::validation_field(
                    format!("{value} pixels exceeds the {MAX_CHART_SIDE} pixel limit"),
                    field,
                ));
            }
        }
        if !(output.bar_width > 0.0 && output.bar_width <= 1.0) {
            return Err(TweetGraphError::validation_field(
                "bar width must be in (0, 1]",
                "output.bar_width",
            ));
        }

        Ok(())
    }

    fn validate_url(value: &str, field: &str) -> Result<()> {
        let url = Url::parse(value).map_err(|e| {
            TweetGraphError::validation_field(format!("{value:?} is not a valid URL: {e}"), field)
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(TweetGraphError::validation_field(
                format!("{value:?} must use http or https"),
                field,
            ));
        }
        Ok(())
    }
}
