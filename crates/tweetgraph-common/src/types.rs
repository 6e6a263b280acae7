//! Common type definitions and newtype wrappers for domain modeling.

use crate::error::{Result, TweetGraphError};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Longest handle the provider accepts.
pub const MAX_HANDLE_LEN: usize = 15;

/// A public account handle, without the leading `@`.
///
/// Only ASCII alphanumerics and `_` are accepted, so a handle is always a
/// safe file stem.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Handle(String);

impl Handle {
    /// Validates and normalizes a raw handle such as `@jack` or `jack`.
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        let name = trimmed.strip_prefix('@').unwrap_or(trimmed);

        if name.is_empty() {
            return Err(TweetGraphError::validation_field(
                "handle cannot be empty",
                "handle",
            ));
        }
        if name.len() > MAX_HANDLE_LEN {
            return Err(TweetGraphError::validation_field(
                format!("handle {name:?} is longer than {MAX_HANDLE_LEN} characters"),
                "handle",
            ));
        }
        if let Some(bad) = name.chars().find(|c| !(c.is_ascii_alphanumeric() || *c == '_')) {
            return Err(TweetGraphError::validation_field(
                format!("handle {name:?} contains invalid character {bad:?}"),
                "handle",
            ));
        }

        Ok(Self(name.to_string()))
    }

    /// The handle text without `@`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name of the chart rendered for this account.
    #[must_use]
    pub fn chart_file_name(&self) -> String {
        format!("{}.png", self.0)
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Handle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for Handle {
    type Err = TweetGraphError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Handle {
    type Error = TweetGraphError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<Handle> for String {
    fn from(handle: Handle) -> Self {
        handle.0
    }
}

/// One post as returned by the timeline endpoint.
///
/// Only `created_at` matters to the chart pipeline; `id` and `text` are kept
/// for logging and debugging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Provider-assigned post id.
    pub id: u64,
    /// Post body.
    #[serde(default)]
    pub text: String,
    /// Creation time in the provider's layout, e.g. `Wed Oct 10 20:19:24 +0000 2018`.
    pub created_at: String,
}

impl Record {
    /// Creates a record.
    pub fn new(id: u64, text: impl Into<String>, created_at: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            created_at: created_at.into(),
        }
    }
}
