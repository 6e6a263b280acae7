//! Error types and utilities for tweetgraph

use thiserror::Error;

/// Result type alias for tweetgraph operations
pub type Result<T> = std::result::Result<T, TweetGraphError>;

/// Boxed error used as the `source` of wrapped failures
type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for tweetgraph operations
#[derive(Error, Debug)]
pub enum TweetGraphError {
    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        /// What is wrong with the configuration
        message: String,
        /// Underlying loader or parser failure
        #[source]
        source: Option<BoxedSource>,
    },

    /// I/O related errors (output directory, chart file, input file)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A provider timestamp did not match the expected layout
    #[error("Parse error: {message} (input: {input:?})")]
    Parse {
        /// Why the input was rejected
        message: String,
        /// The offending input, verbatim
        input: String,
        /// Underlying parser failure
        #[source]
        source: Option<BoxedSource>,
    },

    /// Chart construction or encoding failed
    #[error("Render error: {message}")]
    Render {
        /// What went wrong while drawing or encoding
        message: String,
        /// Underlying drawing or encoder failure
        #[source]
        source: Option<BoxedSource>,
    },

    /// Timeline retrieval failed
    #[error("Fetch error: {message}")]
    Fetch {
        /// What went wrong while fetching
        message: String,
        /// HTTP status of the rejected response, if one was received
        status_code: Option<u16>,
        /// Underlying transport or decoding failure
        #[source]
        source: Option<BoxedSource>,
    },

    /// Client-credential exchange or bearer token rejected
    #[error("Auth error: {message}")]
    Auth {
        /// Why authentication failed
        message: String,
        /// Underlying transport or decoding failure
        #[source]
        source: Option<BoxedSource>,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Validation errors for user input or data
    #[error("Validation error: {message}")]
    Validation {
        /// What constraint was violated
        message: String,
        /// Dotted path of the offending setting, if any
        field: Option<String>,
    },

    /// A failure attributed to one account of the batch
    #[error("account @{handle}: {source}")]
    Account {
        /// Handle of the account being processed
        handle: String,
        /// The failure itself
        #[source]
        source: Box<TweetGraphError>,
    },
}

impl TweetGraphError {
    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source
    pub fn config_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new parse error for the given raw input
    pub fn parse(msg: impl Into<String>, input: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
            input: input.into(),
            source: None,
        }
    }

    /// Create a new parse error with source
    pub fn parse_with_source(
        msg: impl Into<String>,
        input: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Parse {
            message: msg.into(),
            input: input.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new render error
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new render error with source
    pub fn render_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Render {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new fetch error
    pub fn fetch(msg: impl Into<String>) -> Self {
        Self::Fetch {
            message: msg.into(),
            status_code: None,
            source: None,
        }
    }

    /// Create a new fetch error with HTTP status code
    pub fn fetch_with_status(msg: impl Into<String>, status: u16) -> Self {
        Self::Fetch {
            message: msg.into(),
            status_code: Some(status),
            source: None,
        }
    }

    /// Create a new fetch error with source
    pub fn fetch_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Fetch {
            message: msg.into(),
            status_code: None,
            source: Some(Box::new(source)),
        }
    }

    /// Create a new auth error
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Auth {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new auth error with source
    pub fn auth_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Auth {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: None,
        }
    }

    /// Create a new validation error with field name
    pub fn validation_field(msg: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: Some(field.into()),
        }
    }

    /// Attach the account this failure belongs to
    #[must_use]
    pub fn for_account(self, handle: impl Into<String>) -> Self {
        Self::Account {
            handle: handle.into(),
            source: Box::new(self),
        }
    }

    /// The underlying error with every account wrapper removed
    #[must_use]
    pub fn inner(&self) -> &Self {
        match self {
            Self::Account { source, .. } => source.inner(),
            other => other,
        }
    }

    /// The account this failure was attributed to, if any
    #[must_use]
    pub fn account(&self) -> Option<&str> {
        match self {
            Self::Account { handle, .. } => Some(handle),
            _ => None,
        }
    }

    /// HTTP status code attached to a fetch failure
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self.inner() {
            Self::Fetch { status_code, .. } => *status_code,
            _ => None,
        }
    }
}

// Error conversion implementations for external types

/// Convert from reqwest::Error to TweetGraphError
impl From<reqwest::Error> for TweetGraphError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::fetch_with_source("Request timeout", err)
        } else if err.is_connect() {
            Self::fetch_with_source("Connection failed", err)
        } else if let Some(status) = err.status() {
            Self::Fetch {
                message: format!("HTTP error: {}", status.as_u16()),
                status_code: Some(status.as_u16()),
                source: Some(Box::new(err)),
            }
        } else {
            Self::fetch_with_source("Network request failed", err)
        }
    }
}

/// Convert from toml::de::Error to TweetGraphError
impl From<toml::de::Error> for TweetGraphError {
    fn from(err: toml::de::Error) -> Self {
        Self::config_with_source("TOML parsing error", err)
    }
}

#[cfg(feature = "plotters")]
/// Convert from plotters drawing errors to TweetGraphError
impl<T> From<plotters::drawing::DrawingAreaErrorKind<T>> for TweetGraphError
where
    T: std::error::Error + Send + Sync + 'static,
{
    fn from(err: plotters::drawing::DrawingAreaErrorKind<T>) -> Self {
        Self::render_with_source("Chart rendering failed", err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{error::Error, io};

    #[test]
    fn test_error_creation() {
        let config_error = TweetGraphError::config("config issue");
        assert!(config_error.to_string().contains("Configuration error"));
        assert!(config_error.to_string().contains("config issue"));

        let fetch_error = TweetGraphError::fetch_with_status("bad response", 503);
        assert!(fetch_error.to_string().contains("Fetch error"));
        assert_eq!(fetch_error.status_code(), Some(503));

        let validation_error = TweetGraphError::validation_field("Invalid handle", "handle");
        assert!(validation_error.to_string().contains("Validation error"));
        assert!(validation_error.to_string().contains("Invalid handle"));
    }

    #[test]
    fn test_parse_error_names_the_raw_input() {
        let error = TweetGraphError::parse("timestamp does not match layout", "not-a-date");
        assert_eq!(
            error.to_string(),
            "Parse error: timestamp does not match layout (input: \"not-a-date\")"
        );
    }

    #[test]
    fn test_error_with_source() {
        let render_error = TweetGraphError::render_with_source(
            "PNG encoding failed",
            io::Error::new(io::ErrorKind::Other, "encoder"),
        );

        assert!(render_error.to_string().contains("Render error"));
        assert!(render_error.source().is_some());
    }

    #[test]
    fn test_named_fields_carry_their_context() {
        match TweetGraphError::validation_field("must be positive", "output.width") {
            TweetGraphError::Validation { message, field } => {
                assert_eq!(message, "must be positive");
                assert_eq!(field.as_deref(), Some("output.width"));
            }
            other => panic!("unexpected variant {other:?}"),
        }

        match TweetGraphError::parse("bad layout", "Fri Jan 5") {
            TweetGraphError::Parse { input, source, .. } => {
                assert_eq!(input, "Fri Jan 5");
                assert!(source.is_none());
            }
            other => panic!("unexpected variant {other:?}"),
        }
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error: TweetGraphError = io_error.into();

        assert!(error.to_string().contains("I/O error"));
        assert!(error.source().is_some());
    }

    #[test]
    fn test_serde_error_conversion() {
        let serde_error = serde_json::from_str::<serde_json::Value>(r#"{"invalid": json}"#)
            .unwrap_err();
        let error: TweetGraphError = serde_error.into();

        assert!(error.to_string().contains("Serialization error"));
    }

    #[test]
    fn test_account_wrapper_keeps_kind_and_handle() {
        let error = TweetGraphError::parse("bad layout", "not-a-date").for_account("jack");

        assert_eq!(error.account(), Some("jack"));
        assert!(matches!(error.inner(), TweetGraphError::Parse { .. }));

        let display = error.to_string();
        assert!(display.starts_with("account @jack: "));
        assert!(display.contains("not-a-date"));
        assert!(error.source().is_some());
    }

    #[test]
    fn test_inner_peels_nested_wrappers() {
        let error = TweetGraphError::auth("token rejected")
            .for_account("a")
            .for_account("b");

        assert_eq!(error.account(), Some("b"));
        assert!(matches!(error.inner(), TweetGraphError::Auth { .. }));
    }

    #[test]
    fn test_error_chain_preservation() {
        let root_error = io::Error::new(io::ErrorKind::NotFound, "Root cause");
        let middle_error = TweetGraphError::config_with_source("Middle layer", root_error);
        let top_error = middle_error.for_account("someone");

        let mut current_error: &dyn std::error::Error = &top_error;
        let mut error_count = 0;

        while let Some(source) = current_error.source() {
            current_error = source;
            error_count += 1;
        }

        assert_eq!(error_count, 2);
    }
}
