//! Chart destinations

use crate::renderer::ChartArtifact;
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};
use tempfile::NamedTempFile;
use tracing::{debug, info};
use tweetgraph_common::{Handle, Result, TweetGraphError};

/// Permissions of a freshly created output directory
#[cfg(unix)]
pub const OUTPUT_DIR_MODE: u32 = 0o744;

/// Somewhere rendered charts can be stored
pub trait ChartSink: Send + Sync {
    /// Store the chart for `handle` and return where it went
    fn persist(&self, handle: &Handle, artifact: &ChartArtifact) -> Result<PathBuf>;
}

/// Writes `<handle>.png` files into one directory.
///
/// The directory is created on first use. Each file is written to a temporary
/// sibling first and renamed into place, so a failed write never leaves a
/// truncated chart behind. Existing charts are overwritten.
#[derive(Debug, Clone)]
pub struct OutputDirectory {
    root: PathBuf,
}

impl OutputDirectory {
    /// Use `root` as the output directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The output directory
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Where the chart for `handle` is written
    #[must_use]
    pub fn chart_path(&self, handle: &Handle) -> PathBuf {
        self.root.join(handle.chart_file_name())
    }

    /// Create the directory if it does not exist yet
    pub fn ensure_exists(&self) -> Result<()> {
        if self.root.is_dir() {
            return Ok(());
        }

        let mut builder = fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(OUTPUT_DIR_MODE);
        }
        builder.create(&self.root)?;

        info!("Created output directory {}", self.root.display());
        Ok(())
    }
}

impl ChartSink for OutputDirectory {
    fn persist(&self, handle: &Handle, artifact: &ChartArtifact) -> Result<PathBuf> {
        self.ensure_exists()?;

        let path = self.chart_path(handle);
        let mut file = NamedTempFile::new_in(&self.root)?;
        file.write_all(&artifact.png)?;
        file.as_file().sync_all()?;
        file.persist(&path)
            .map_err(|e| TweetGraphError::Io(e.error))?;

        debug!("Wrote {} bytes to {}", artifact.png.len(), path.display());
        Ok(path)
    }
}
