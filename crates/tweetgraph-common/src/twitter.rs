//! Timeline API client with client-credentials OAuth, rate limiting and retries
//!
//! The client exchanges the application's id/secret for a bearer token once,
//! then fetches a single page of an account's timeline per call.

use crate::{
    error::{Result, TweetGraphError},
    source::TimelineSource,
    types::{Handle, Record},
};
use async_trait::async_trait;
use governor::{DefaultDirectRateLimiter, Quota};
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::{fmt, num::NonZeroU32, sync::Arc, time::Duration};
use tokio::sync::OnceCell;
use tokio_retry::{strategy::ExponentialBackoff, RetryIf};
use tracing::{debug, error, info, instrument, warn};

/// Default OAuth2 token endpoint
pub const DEFAULT_TOKEN_URL: &str = "https://api.twitter.com/oauth2/token";
/// Default REST API root
pub const DEFAULT_API_BASE_URL: &str = "https://api.twitter.com";
/// Largest page the timeline endpoint serves
pub const MAX_PAGE_SIZE: u32 = 200;

/// Configuration for the timeline client
#[derive(Clone)]
pub struct TwitterConfig {
    /// OAuth client identifier
    pub client_id: String,
    /// OAuth client secret
    pub client_secret: String,
    /// Token endpoint for the client-credentials grant
    pub token_url: String,
    /// API root, e.g. "https://api.twitter.com"
    pub api_base_url: String,
    /// Posts requested per timeline call (default: 200)
    pub page_size: u32,
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
    /// Rate limit: requests per second (default: 1)
    pub rate_limit_per_sec: u32,
    /// Maximum number of retry attempts (default: 3)
    pub max_retries: usize,
}

impl Default for TwitterConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            page_size: MAX_PAGE_SIZE,
            timeout_secs: 30,
            rate_limit_per_sec: 1,
            max_retries: 3,
        }
    }
}

impl fmt::Debug for TwitterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TwitterConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("token_url", &self.token_url)
            .field("api_base_url", &self.api_base_url)
            .field("page_size", &self.page_size)
            .field("timeout_secs", &self.timeout_secs)
            .field("rate_limit_per_sec", &self.rate_limit_per_sec)
            .field("max_retries", &self.max_retries)
            .finish()
    }
}

impl TwitterConfig {
    /// Create a new configuration with the required credentials
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            ..Default::default()
        }
    }

    /// Point the client at another API root and token endpoint
    #[must_use]
    pub fn with_endpoints(
        mut self,
        api_base_url: impl Into<String>,
        token_url: impl Into<String>,
    ) -> Self {
        self.api_base_url = api_base_url.into();
        self.token_url = token_url.into();
        self
    }

    /// Set the number of posts requested per call
    #[must_use]
    pub const fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set the request timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Set the rate limit
    #[must_use]
    pub const fn with_rate_limit(mut self, rate_limit_per_sec: u32) -> Self {
        self.rate_limit_per_sec = rate_limit_per_sec;
        self
    }

    /// Set the maximum retry attempts
    #[must_use]
    pub const fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }
}

/// Response body of the client-credentials grant
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TokenResponse {
    /// Always "bearer" for this grant
    pub token_type: String,
    /// The application-only access token
    pub access_token: String,
}

/// Timeline client with a cached bearer token and rate limiting
#[derive(Clone)]
pub struct TwitterClient {
    client: Client,
    config: TwitterConfig,
    rate_limiter: Arc<DefaultDirectRateLimiter>,
    token: Arc<OnceCell<String>>,
}

impl fmt::Debug for TwitterClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TwitterClient")
            .field("config", &self.config)
            .field("has_token", &self.token.initialized())
            .finish_non_exhaustive()
    }
}

impl TwitterClient {
    /// Create a new client with the given configuration
    pub fn new(config: TwitterConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TweetGraphError::fetch_with_source("Failed to create HTTP client", e))?;

        let quota = Quota::per_second(
            NonZeroU32::new(config.rate_limit_per_sec)
                .ok_or_else(|| TweetGraphError::config("Rate limit must be greater than 0"))?,
        );
        let rate_limiter = Arc::new(DefaultDirectRateLimiter::direct(quota));

        Ok(Self {
            client,
            config,
            rate_limiter,
            token: Arc::new(OnceCell::new()),
        })
    }

    /// URL of the user timeline endpoint
    fn timeline_url(&self) -> String {
        format!(
            "{}/1.1/statuses/user_timeline.json",
            self.config.api_base_url.trim_end_matches('/')
        )
    }

    /// The bearer token, exchanging credentials on first use
    async fn bearer_token(&self) -> Result<&str> {
        let token = self
            .token
            .get_or_try_init(|| self.request_token())
            .await?;
        Ok(token.as_str())
    }

    /// Perform the client-credentials grant
    #[instrument(skip(self), fields(token_url = %self.config.token_url))]
    async fn request_token(&self) -> Result<String> {
        if self.config.client_id.is_empty() || self.config.client_secret.is_empty() {
            return Err(TweetGraphError::auth("client id and secret must be set"));
        }

        self.rate_limiter.until_ready().await;
        debug!("Requesting application bearer token");

        let response = self
            .client
            .post(&self.config.token_url)
            .basic_auth(&self.config.client_id, Some(&self.config.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|e| TweetGraphError::auth_with_source("Token request failed", e))?;

        let status = response.status();
        if !status.is_success() {
            error!("Token endpoint rejected credentials: {}", status);
            return Err(TweetGraphError::auth(format!(
                "token endpoint returned {status}"
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| TweetGraphError::auth_with_source("Failed to read token response", e))?;
        let token = parse_token_response(&body)?;

        info!("Obtained application bearer token");
        Ok(token)
    }

    /// Fetch one page of the timeline with retry logic
    #[instrument(skip_all, fields(handle = %handle))]
    async fn make_request(&self, handle: &Handle) -> Result<Response> {
        let token = self.bearer_token().await?;
        let url = self.timeline_url();
        let page_size = self.config.page_size.to_string();
        let query_params = [
            ("screen_name", handle.as_str()),
            ("exclude_replies", "true"),
            ("include_rts", "false"),
            ("count", page_size.as_str()),
        ];

        let url = url.as_str();
        let query_params = &query_params;
        let response = RetryIf::start(
            retry_delays(self.config.max_retries),
            move || async move {
                self.rate_limiter.until_ready().await;
                debug!("Requesting timeline from {}", url);

                match self
                    .client
                    .get(url)
                    .bearer_auth(token)
                    .query(query_params)
                    .send()
                    .await
                {
                    Ok(response) if response.status().is_success() => Ok(response),
                    Ok(response) => Err(status_error(response.status())),
                    Err(e) => Err(TweetGraphError::from(e)),
                }
            },
            |e: &TweetGraphError| {
                let retry = is_retryable(e);
                if retry {
                    warn!("Timeline request failed, will retry: {}", e);
                }
                retry
            },
        )
        .await?;

        Ok(response)
    }

    /// Parse a timeline body into records
    async fn parse_response(&self, response: Response) -> Result<Vec<Record>> {
        let text = response
            .text()
            .await
            .map_err(|e| TweetGraphError::fetch_with_source("Failed to read response body", e))?;

        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl TimelineSource for TwitterClient {
    #[instrument(skip_all, fields(handle = %handle))]
    async fn fetch_timeline(&self, handle: &Handle) -> Result<Vec<Record>> {
        let response = self.make_request(handle).await?;
        let records = self.parse_response(response).await?;
        info!("Fetched {} posts", records.len());
        Ok(records)
    }
}

/// Extract the bearer token from a grant response body
fn parse_token_response(body: &str) -> Result<String> {
    let token: TokenResponse = serde_json::from_str(body)
        .map_err(|e| TweetGraphError::auth_with_source("Malformed token response", e))?;

    if !token.token_type.eq_ignore_ascii_case("bearer") {
        return Err(TweetGraphError::auth(format!(
            "unexpected token type {:?}",
            token.token_type
        )));
    }
    if token.access_token.is_empty() {
        return Err(TweetGraphError::auth("token response contained no access token"));
    }

    Ok(token.access_token)
}

/// Map a non-success timeline status to an error
fn status_error(status: StatusCode) -> TweetGraphError {
    if status == StatusCode::UNAUTHORIZED {
        TweetGraphError::auth("bearer token was rejected")
    } else {
        TweetGraphError::fetch_with_status(format!("got bad response: {status}"), status.as_u16())
    }
}

/// Delays between timeline attempts: 100ms doubling per retry, capped at 10s
fn retry_delays(max_retries: usize) -> impl Iterator<Item = Duration> {
    ExponentialBackoff::from_millis(2)
        .factor(50)
        .max_delay(Duration::from_secs(10))
        .take(max_retries)
}

/// Timeouts, connection failures and 5xx responses are worth another attempt
fn is_retryable(error: &TweetGraphError) -> bool {
    match error {
        TweetGraphError::Fetch {
            status_code: Some(code),
            ..
        } => *code >= 500,
        TweetGraphError::Fetch {
            status_code: None, ..
        } => true,
        _ => false,
    }
}
