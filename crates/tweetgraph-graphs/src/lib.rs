//! Per-day post histograms and bar chart rendering for tweetgraph
//!
//! Records flow through [`parse_created_at`] into a [`DayHistogram`], are
//! ordered into an [`OrderedSeries`] and drawn by a [`HistogramRenderer`]
//! before a [`ChartSink`] stores the PNG.

pub mod aggregator;
pub mod day;
pub mod layout;
pub mod output;
pub mod pipeline;
pub mod renderer;
pub mod series;
pub mod timestamp;

pub use aggregator::{DayAggregator, DayHistogram};
pub use day::CalendarDay;
pub use layout::{BarGeometry, ChartConfig, ChartLayout, Tick, MAX_CANVAS_SIDE};
pub use output::{ChartSink, OutputDirectory};
pub use pipeline::{build_series, ChartPipeline};
pub use renderer::{encode_png, ChartArtifact, HistogramRenderer};
pub use series::{DayCount, OrderedSeries};
pub use timestamp::{parse_created_at, Timestamped, TIMESTAMP_LAYOUT};
