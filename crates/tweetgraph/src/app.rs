//! Wiring of configuration, timeline client and chart pipeline.

use crate::{
    error::{AppError, AppResult},
    input::read_handles,
    runner::{BatchRunner, RunSummary},
};
use tracing::{info, warn};
use tweetgraph_common::{TimelineSource, TwitterClient};
use tweetgraph_config::{Config, OutputConfig};
use tweetgraph_graphs::{ChartConfig, ChartPipeline, HistogramRenderer, OutputDirectory};

/// Chart settings for the configured output.
#[must_use]
pub fn chart_config(output: &OutputConfig) -> ChartConfig {
    ChartConfig::default()
        .with_size(output.width, output.height)
        .with_bar_width(output.bar_width)
}

/// Runs a whole batch against the remote timeline API.
pub async fn run(config: &Config) -> AppResult<RunSummary> {
    let client = TwitterClient::new(config.twitter_config())?;
    run_with_source(config, client).await
}

/// Runs a whole batch against `source`.
///
/// Fails before any fetch when the configuration, the fonts or the handle
/// list are unusable.
pub async fn run_with_source<S: TimelineSource>(config: &Config, source: S) -> AppResult<RunSummary> {
    config.validate()?;

    let chart = chart_config(&config.output);
    chart.validate()?;
    let renderer = HistogramRenderer::new(chart);
    renderer.check_fonts()?;

    let handles = read_handles(&config.input.path)?;
    if handles.is_empty() {
        warn!("No handles found in {}", config.input.path.display());
    }

    let output = OutputDirectory::new(&config.output.directory);
    info!(
        "Charting {} accounts into {}",
        handles.len(),
        output.root().display()
    );

    let pipeline = ChartPipeline::new(renderer, output).with_captions(config.output.caption);
    let runner = BatchRunner::new(source, pipeline, config.run.failure_policy);
    let summary = runner.run(&handles).await?;

    if summary.is_success() {
        Ok(summary)
    } else {
        Err(AppError::Incomplete {
            failed: summary.failed.len(),
            total: summary.total(),
        })
    }
}
