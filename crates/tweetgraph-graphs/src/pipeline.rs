//! Records in, chart file out

use crate::{
    aggregator::DayAggregator,
    output::ChartSink,
    renderer::HistogramRenderer,
    series::OrderedSeries,
    timestamp::Timestamped,
};
use std::path::PathBuf;
use tracing::{info, instrument};
use tweetgraph_common::{Handle, Result};

/// Aggregate records by day and order the days chronologically
pub fn build_series<I>(records: I) -> Result<OrderedSeries>
where
    I: IntoIterator,
    I::Item: Timestamped,
{
    let histogram = DayAggregator::new().aggregate(records)?;
    Ok(OrderedSeries::from_histogram(&histogram))
}

/// Runs one account's records through aggregation, ordering, rendering and
/// persistence. Holds no state between accounts.
#[derive(Debug, Clone)]
pub struct ChartPipeline<K> {
    renderer: HistogramRenderer,
    sink: K,
    captions: bool,
}

impl<K: ChartSink> ChartPipeline<K> {
    /// Create a pipeline writing through `sink`
    pub const fn new(renderer: HistogramRenderer, sink: K) -> Self {
        Self {
            renderer,
            sink,
            captions: false,
        }
    }

    /// Title each chart with `@handle`
    #[must_use]
    pub const fn with_captions(mut self, captions: bool) -> Self {
        self.captions = captions;
        self
    }

    /// The renderer in use
    pub const fn renderer(&self) -> &HistogramRenderer {
        &self.renderer
    }

    /// The sink charts are written to
    pub const fn sink(&self) -> &K {
        &self.sink
    }

    /// Chart one account and return where the chart was stored
    #[instrument(skip_all, fields(handle = %handle))]
    pub fn chart_account<I>(&self, handle: &Handle, records: I) -> Result<PathBuf>
    where
        I: IntoIterator,
        I::Item: Timestamped,
    {
        let series = build_series(records)?;
        let caption = self.captions.then(|| format!("@{handle}"));
        let artifact = self.renderer.render(&series, caption.as_deref())?;
        let path = self.sink.persist(handle, &artifact)?;

        info!(
            "Charted {} posts over {} days to {}",
            series.total(),
            series.len(),
            path.display()
        );
        Ok(path)
    }
}
