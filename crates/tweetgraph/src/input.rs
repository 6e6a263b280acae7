//! The handle list: one account per line.

use std::{fs, io, path::Path};
use tracing::debug;
use tweetgraph_common::{Handle, Result, TweetGraphError};
use tweetgraph_config::INPUT_PATH_ENV;

/// Parses a handle list.
///
/// Lines are trimmed. Blank lines and lines starting with `#` are skipped.
/// Every other line must be a valid handle, otherwise the whole list is
/// rejected with the offending line number.
pub fn parse_handles(text: &str) -> Result<Vec<Handle>> {
    let mut handles = Vec::new();

    for (index, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let handle = Handle::parse(line).map_err(|e| {
            TweetGraphError::validation_field(format!("line {}: {e}", index + 1), "handle")
        })?;
        handles.push(handle);
    }

    Ok(handles)
}

/// Reads and parses the handle list at `path`.
pub fn read_handles(path: &Path) -> Result<Vec<Handle>> {
    let text = fs::read_to_string(path).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            TweetGraphError::config_with_source(
                format!(
                    "input file {} not found; create it with one handle per line or set {INPUT_PATH_ENV}",
                    path.display()
                ),
                e,
            )
        } else {
            TweetGraphError::Io(e)
        }
    })?;

    let handles = parse_handles(&text)?;
    debug!("Read {} handles from {}", handles.len(), path.display());
    Ok(handles)
}
