//! Application-wide error types using thiserror.

use tweetgraph_common::TweetGraphError;

/// Main application error type.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// A failure from configuration, fetching or charting.
    #[error(transparent)]
    TweetGraph(#[from] TweetGraphError),

    /// The run finished but some accounts could not be charted.
    #[error("{failed} of {total} accounts failed")]
    Incomplete {
        /// Accounts that failed.
        failed: usize,
        /// Accounts attempted.
        total: usize,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the application.
pub type AppResult<T> = Result<T, AppError>;
