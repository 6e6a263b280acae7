//! Drives every account through fetch, aggregation, rendering and persistence.

use std::path::PathBuf;
use tracing::{error, info, instrument};
use tweetgraph_common::{Handle, Result, TimelineSource, TweetGraphError};
use tweetgraph_config::FailurePolicy;
use tweetgraph_graphs::{ChartPipeline, ChartSink};

/// Outcome of a batch run.
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Charted accounts and where their charts went.
    pub succeeded: Vec<(Handle, PathBuf)>,
    /// Failures, each wrapped with its account.
    pub failed: Vec<TweetGraphError>,
}

impl RunSummary {
    /// Whether every account was charted.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Number of accounts attempted.
    #[must_use]
    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }
}

/// Processes accounts strictly one after another.
#[derive(Debug)]
pub struct BatchRunner<S, K> {
    source: S,
    pipeline: ChartPipeline<K>,
    policy: FailurePolicy,
}

impl<S, K> BatchRunner<S, K>
where
    S: TimelineSource,
    K: ChartSink,
{
    /// Creates a runner.
    pub const fn new(source: S, pipeline: ChartPipeline<K>, policy: FailurePolicy) -> Self {
        Self {
            source,
            pipeline,
            policy,
        }
    }

    /// The timeline source.
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Charts every handle in order.
    ///
    /// Under [`FailurePolicy::Abort`] the first failure is returned and no
    /// later handle is touched. Under [`FailurePolicy::Continue`] failures
    /// are collected in the summary.
    #[instrument(skip_all, fields(accounts = handles.len(), policy = %self.policy))]
    pub async fn run(&self, handles: &[Handle]) -> Result<RunSummary> {
        let mut summary = RunSummary::default();

        for handle in handles {
            match self.process(handle).await {
                Ok(path) => summary.succeeded.push((handle.clone(), path)),
                Err(e) => match self.policy {
                    FailurePolicy::Abort => return Err(e),
                    FailurePolicy::Continue => {
                        error!("{e}");
                        summary.failed.push(e);
                    }
                },
            }
        }

        info!(
            "Charted {} of {} accounts",
            summary.succeeded.len(),
            summary.total()
        );
        Ok(summary)
    }

    /// Fetches and charts one account.
    #[instrument(skip_all, fields(handle = %handle))]
    pub async fn process(&self, handle: &Handle) -> Result<PathBuf> {
        info!("Processing @{handle}");

        let records = self
            .source
            .fetch_timeline(handle)
            .await
            .map_err(|e| e.for_account(handle.as_str()))?;

        self.pipeline
            .chart_account(handle, &records)
            .map_err(|e| e.for_account(handle.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tweetgraph_common::test_utils::{record_on, StaticTimelineSource};
    use tweetgraph_graphs::{ChartArtifact, HistogramRenderer};

    /// Sink that remembers handles instead of writing files.
    #[derive(Default)]
    struct MemorySink {
        handles: std::sync::Mutex<Vec<String>>,
    }

    impl ChartSink for MemorySink {
        fn persist(&self, handle: &Handle, _artifact: &ChartArtifact) -> Result<PathBuf> {
            self.handles.lock().unwrap().push(handle.to_string());
            Ok(PathBuf::from(handle.chart_file_name()))
        }
    }

    fn handle(raw: &str) -> Handle {
        Handle::parse(raw).unwrap()
    }

    #[test]
    fn test_summary_counts() {
        let mut summary = RunSummary::default();
        assert!(summary.is_success());
        summary
            .failed
            .push(TweetGraphError::fetch("boom").for_account("jack"));
        assert!(!summary.is_success());
        assert_eq!(summary.total(), 1);
    }

    #[tokio::test]
    async fn test_fetch_error_is_wrapped_with_account() {
        let pipeline = ChartPipeline::new(HistogramRenderer::default(), MemorySink::default());
        let runner = BatchRunner::new(StaticTimelineSource::default(), pipeline, FailurePolicy::Abort);

        let error = runner.process(&handle("ghost")).await.unwrap_err();
        assert_eq!(error.account(), Some("ghost"));
        assert_eq!(error.status_code(), Some(404));
    }

    #[tokio::test]
    async fn test_parse_error_keeps_raw_timestamp() {
        let source = StaticTimelineSource::default().with_timeline(
            "jack",
            vec![
                record_on(1, 2024, 1, 5),
                tweetgraph_common::Record::new(2, "", "not-a-date"),
            ],
        );
        let pipeline = ChartPipeline::new(HistogramRenderer::default(), MemorySink::default());
        let runner = BatchRunner::new(source, pipeline, FailurePolicy::Abort);

        let error = runner.run(&[handle("jack")]).await.unwrap_err();
        assert_eq!(error.account(), Some("jack"));
        assert!(matches!(
            error.inner(),
            TweetGraphError::Parse { input, .. } if input == "not-a-date"
        ));
        assert!(error.to_string().starts_with("account @jack: "));
    }
}
