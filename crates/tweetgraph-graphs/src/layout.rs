//! Chart configuration and the backend-independent chart geometry

use crate::series::OrderedSeries;
use plotters::style::RGBColor;
use tweetgraph_common::{Result, TweetGraphError};

/// Canvas width of a chart in pixels
pub const DEFAULT_WIDTH: u32 = 1024;
/// Canvas height of a chart in pixels
pub const DEFAULT_HEIGHT: u32 = 512;
/// Largest canvas side accepted, in pixels
pub const MAX_CANVAS_SIDE: u32 = 8192;

/// Chart rendering configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    pub width: u32,
    pub height: u32,
    /// Bar width as a fraction of one day slot, in (0, 1]
    pub bar_width: f64,
    /// Space below the plot reserved for the rotated day labels
    pub x_label_area: u32,
    pub y_label_area: u32,
    pub margin: u32,
    pub font_family: String,
    pub label_font_size: u32,
    pub caption_font_size: u32,
    pub bar_color: RGBColor,
    pub background_color: RGBColor,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            bar_width: 0.5,
            x_label_area: 96,
            y_label_area: 48,
            margin: 16,
            font_family: "sans-serif".to_string(),
            label_font_size: 14,
            caption_font_size: 24,
            bar_color: RGBColor(31, 119, 180),
            background_color: RGBColor(255, 255, 255),
        }
    }
}

impl ChartConfig {
    /// Set custom dimensions
    #[must_use]
    pub const fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the bar width as a fraction of one day slot
    #[must_use]
    pub const fn with_bar_width(mut self, bar_width: f64) -> Self {
        self.bar_width = bar_width;
        self
    }

    /// Reject settings no chart can be built from
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(TweetGraphError::render(format!(
                "canvas must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }
        if self.width > MAX_CANVAS_SIDE || self.height > MAX_CANVAS_SIDE {
            return Err(TweetGraphError::render(format!(
                "canvas {}x{} exceeds {MAX_CANVAS_SIDE} pixels per side",
                self.width, self.height
            )));
        }
        if !(self.bar_width > 0.0 && self.bar_width <= 1.0) {
            return Err(TweetGraphError::render(format!(
                "invalid bar width {}: must be in (0, 1]",
                self.bar_width
            )));
        }
        if self.x_label_area + 2 * self.margin >= self.height {
            return Err(TweetGraphError::render(format!(
                "canvas height {} leaves no room for the plot",
                self.height
            )));
        }
        if self.y_label_area + 2 * self.margin >= self.width {
            return Err(TweetGraphError::render(format!(
                "canvas width {} leaves no room for the plot",
                self.width
            )));
        }
        Ok(())
    }
}

/// One bar in data coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarGeometry {
    /// Slot index, 0 for the earliest day
    pub index: usize,
    pub left: f64,
    pub right: f64,
    pub count: u64,
}

impl BarGeometry {
    /// Horizontal center of the bar
    #[must_use]
    pub fn center(&self) -> f64 {
        (self.left + self.right) / 2.0
    }

    /// Width in data units
    #[must_use]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }
}

/// One x-axis tick
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub position: f64,
    pub label: String,
}

/// Everything the renderer draws, in data coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    pub x_range: (f64, f64),
    pub y_range: (u64, u64),
    pub bars: Vec<BarGeometry>,
    pub ticks: Vec<Tick>,
    pub caption: Option<String>,
}

impl ChartLayout {
    /// Lay out one bar and one tick per day, left to right.
    ///
    /// Day `i` sits at x = `i`. An empty series keeps a one-slot x range and a
    /// `0..1` y range so the axes can still be drawn.
    pub fn compute(
        series: &OrderedSeries,
        config: &ChartConfig,
        caption: Option<&str>,
    ) -> Result<Self> {
        config.validate()?;

        let slots = series.len().max(1);
        let x_range = (-0.5, slots as f64 - 0.5);

        let max_count = series.max_count().max(1);
        let headroom = (max_count / 10).max(1);
        let y_range = (0, max_count + headroom);

        let half = config.bar_width / 2.0;
        let bars = series
            .iter()
            .enumerate()
            .map(|(index, point)| {
                let center = index as f64;
                BarGeometry {
                    index,
                    left: center - half,
                    right: center + half,
                    count: point.count,
                }
            })
            .collect();

        let ticks = series
            .iter()
            .enumerate()
            .map(|(index, point)| Tick {
                position: index as f64,
                label: point.day.to_string(),
            })
            .collect();

        Ok(Self {
            x_range,
            y_range,
            bars,
            ticks,
            caption: caption.map(str::to_string),
        })
    }

    /// Whether there is nothing to draw besides the axes
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{day::CalendarDay, series::DayCount};

    fn series(points: &[((i32, u32, u32), u64)]) -> OrderedSeries {
        OrderedSeries::try_from_points(
            points
                .iter()
                .map(|((y, m, d), count)| DayCount::new(CalendarDay::from_ymd(*y, *m, *d).unwrap(), *count))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_one_bar_and_tick_per_day() {
        let series = series(&[((2024, 1, 5), 2), ((2024, 2, 1), 1)]);
        let layout = ChartLayout::compute(&series, &ChartConfig::default(), None).unwrap();

        assert_eq!(layout.bars.len(), 2);
        assert_eq!(layout.ticks.len(), 2);
        assert_eq!(layout.ticks[0].label, "5.1.2024");
        assert_eq!(layout.ticks[1].label, "1.2.2024");
        assert_eq!(layout.ticks[0].position, 0.0);
        assert_eq!(layout.ticks[1].position, 1.0);

        assert_eq!(layout.bars[0].count, 2 * layout.bars[1].count);
        assert!(layout.bars[0].center() < layout.bars[1].center());
        assert!((layout.bars[0].width() - 0.5).abs() < 1e-9);
        assert_eq!(layout.x_range, (-0.5, 1.5));
        assert!(layout.y_range.1 > 2);
    }

    #[test]
    fn test_empty_series_still_has_axes() {
        let layout =
            ChartLayout::compute(&OrderedSeries::default(), &ChartConfig::default(), Some("@nobody"))
                .unwrap();

        assert!(layout.is_empty());
        assert!(layout.ticks.is_empty());
        assert_eq!(layout.x_range, (-0.5, 0.5));
        assert_eq!(layout.y_range, (0, 2));
        assert_eq!(layout.caption.as_deref(), Some("@nobody"));
    }

    #[test]
    fn test_invalid_bar_width_is_a_render_error() {
        let series = series(&[((2024, 1, 5), 1)]);
        for width in [0.0, -0.1, 1.5, f64::NAN, f64::INFINITY] {
            let config = ChartConfig::default().with_bar_width(width);
            let result = ChartLayout::compute(&series, &config, None);
            assert!(
                matches!(result, Err(TweetGraphError::Render { .. })),
                "bar width {width} should be rejected"
            );
        }
    }

    #[test]
    fn test_degenerate_canvas_is_a_render_error() {
        let series = OrderedSeries::default();
        let zero = ChartConfig::default().with_size(0, 512);
        assert!(ChartLayout::compute(&series, &zero, None).is_err());

        let too_short = ChartConfig::default().with_size(1024, 100);
        assert!(ChartLayout::compute(&series, &too_short, None).is_err());

        let too_narrow = ChartConfig::default().with_size(64, 512);
        assert!(too_narrow.validate().is_err());
    }

    #[test]
    fn test_oversized_canvas_is_rejected_before_allocation() {
        let huge = ChartConfig::default().with_size(100_000, 100_000);
        assert!(matches!(huge.validate(), Err(TweetGraphError::Render { .. })));

        let tall = ChartConfig::default().with_size(1024, MAX_CANVAS_SIDE + 1);
        assert!(tall.validate().is_err());

        let largest = ChartConfig::default().with_size(MAX_CANVAS_SIDE, MAX_CANVAS_SIDE);
        assert!(largest.validate().is_ok());
    }

    #[test]
    fn test_default_canvas_size() {
        let config = ChartConfig::default();
        assert_eq!((config.width, config.height), (1024, 512));
        assert!(config.validate().is_ok());
    }
}
