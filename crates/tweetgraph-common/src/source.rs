//! The seam between the batch runner and whatever supplies timelines.

use crate::{error::Result, types::Handle, types::Record};
use async_trait::async_trait;

/// Something that can return the recent posts of an account.
#[async_trait]
pub trait TimelineSource: Send + Sync {
    /// Fetches a single page of the account's timeline.
    async fn fetch_timeline(&self, handle: &Handle) -> Result<Vec<Record>>;
}
