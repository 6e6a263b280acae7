//! Bar chart rendering into an in-memory bitmap and PNG encoding

use crate::{
    layout::{ChartConfig, ChartLayout},
    series::OrderedSeries,
};
use image::{codecs::png::PngEncoder, ColorType, ImageEncoder};
use plotters::{prelude::*, style::FontTransform};
use tracing::{debug, instrument};
use tweetgraph_common::{Result, TweetGraphError};

/// Gap between the x axis and the top of a rotated day label
const TICK_LABEL_OFFSET: i32 = 8;
const TICK_LENGTH: i32 = 5;

/// A rendered chart: the geometry that was drawn and its PNG encoding
#[derive(Debug, Clone)]
pub struct ChartArtifact {
    pub layout: ChartLayout,
    pub width: u32,
    pub height: u32,
    pub png: Vec<u8>,
}

/// Renders an [`OrderedSeries`] as a bar chart, one bar per day
#[derive(Debug, Clone, Default)]
pub struct HistogramRenderer {
    config: ChartConfig,
}

impl HistogramRenderer {
    /// Create a renderer with the given chart configuration
    #[must_use]
    pub const fn new(config: ChartConfig) -> Self {
        Self { config }
    }

    /// The chart configuration in use
    #[must_use]
    pub const fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// Render the series and encode it as PNG
    #[instrument(skip(self, series), fields(days = series.len()))]
    pub fn render(&self, series: &OrderedSeries, caption: Option<&str>) -> Result<ChartArtifact> {
        let layout = ChartLayout::compute(series, &self.config, caption)?;
        let rgb = self.draw(&layout)?;
        let png = encode_png(&rgb, self.config.width, self.config.height)?;

        debug!(
            "Rendered {} bars into {} PNG bytes",
            layout.bars.len(),
            png.len()
        );

        Ok(ChartArtifact {
            layout,
            width: self.config.width,
            height: self.config.height,
            png,
        })
    }

    /// Render the series into a raw 8-bit RGB buffer of `width * height * 3` bytes
    pub fn render_rgb(&self, series: &OrderedSeries, caption: Option<&str>) -> Result<Vec<u8>> {
        let layout = ChartLayout::compute(series, &self.config, caption)?;
        self.draw(&layout)
    }

    /// Check that the configured font can be rasterized.
    ///
    /// Drawing text fails when no matching system font is installed, so
    /// callers check once before starting a batch.
    pub fn check_fonts(&self) -> Result<()> {
        const SAMPLE_WIDTH: u32 = 64;
        const SAMPLE_HEIGHT: u32 = 32;

        let mut buffer = vec![0u8; (SAMPLE_WIDTH * SAMPLE_HEIGHT * 3) as usize];
        let root = BitMapBackend::with_buffer(&mut buffer, (SAMPLE_WIDTH, SAMPLE_HEIGHT))
            .into_drawing_area();

        let font = (
            self.config.font_family.as_str(),
            self.config.label_font_size,
        )
            .into_font()
            .color(&BLACK);
        root.draw(&Text::new("31.12.2024", (0, 0), font))
            .map_err(|e| {
                TweetGraphError::render_with_source(
                    format!("font {:?} is not available", self.config.font_family),
                    e,
                )
            })?;
        root.present()?;
        Ok(())
    }

    fn draw(&self, layout: &ChartLayout) -> Result<Vec<u8>> {
        let config = &self.config;
        let mut buffer = vec![0u8; config.width as usize * config.height as usize * 3];

        {
            let root = BitMapBackend::with_buffer(&mut buffer, (config.width, config.height))
                .into_drawing_area();
            root.fill(&config.background_color)?;

            let family = config.font_family.as_str();
            let mut builder = ChartBuilder::on(&root);
            builder
                .margin(config.margin)
                .x_label_area_size(config.x_label_area)
                .y_label_area_size(config.y_label_area);
            if let Some(caption) = &layout.caption {
                builder.caption(caption, (family, config.caption_font_size));
            }

            let (x_start, x_end) = layout.x_range;
            let (y_start, y_end) = layout.y_range;
            let mut chart = builder.build_cartesian_2d(x_start..x_end, y_start..y_end)?;

            // Day labels are drawn below, rotated, so the mesh only labels y.
            chart
                .configure_mesh()
                .disable_x_mesh()
                .x_labels(0)
                .y_desc("posts")
                .label_style((family, config.label_font_size))
                .axis_desc_style((family, config.label_font_size))
                .draw()?;

            chart.draw_series(layout.bars.iter().map(|bar| {
                Rectangle::new(
                    [(bar.left, 0), (bar.right, bar.count)],
                    config.bar_color.filled(),
                )
            }))?;

            let label_font = (family, config.label_font_size)
                .into_font()
                .transform(FontTransform::Rotate90)
                .color(&BLACK);
            for tick in &layout.ticks {
                let (x, y) = chart.backend_coord(&(tick.position, y_start));
                root.draw(&PathElement::new(
                    vec![(x, y), (x, y + TICK_LENGTH)],
                    BLACK,
                ))?;
                root.draw(&Text::new(
                    tick.label.as_str(),
                    (x + config.label_font_size as i32 / 2, y + TICK_LABEL_OFFSET),
                    label_font.clone(),
                ))?;
            }

            root.present()?;
        }

        Ok(buffer)
    }
}

/// Encode a raw RGB buffer as PNG
pub fn encode_png(rgb: &[u8], width: u32, height: u32) -> Result<Vec<u8>> {
    let mut png = Vec::new();
    PngEncoder::new(&mut png)
        .write_image(rgb, width, height, ColorType::Rgb8)
        .map_err(|e| TweetGraphError::render_with_source("PNG encoding failed", e))?;
    Ok(png)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{day::CalendarDay, series::DayCount};

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

    fn fonts_ready(renderer: &HistogramRenderer) -> bool {
        match renderer.check_fonts() {
            Ok(()) => true,
            Err(e) => {
                eprintln!("skipping raster assertions: {e}");
                false
            }
        }
    }

    /// Tallest run of `color` pixels in each group of adjacent columns containing it
    fn bar_heights(rgb: &[u8], width: usize, height: usize, color: RGBColor) -> Vec<usize> {
        let target = [color.0, color.1, color.2];
        let mut bars: Vec<usize> = Vec::new();
        let mut in_bar = false;

        for x in 0..width {
            let filled = (0..height)
                .filter(|y| {
                    let i = (y * width + x) * 3;
                    rgb[i..i + 3] == target
                })
                .count();
            match (filled > 0, in_bar) {
                (true, true) => {
                    let last = bars.last_mut().unwrap();
                    *last = (*last).max(filled);
                }
                (true, false) => bars.push(filled),
                (false, _) => {}
            }
            in_bar = filled > 0;
        }
        bars
    }

    #[test]
    fn test_encode_png_signature() {
        let rgb = vec![255u8; 4 * 2 * 3];
        let png = encode_png(&rgb, 4, 2).unwrap();
        assert_eq!(&png[..8], &PNG_SIGNATURE);
    }

    #[test]
    fn test_invalid_config_fails_before_drawing() {
        let renderer = HistogramRenderer::new(ChartConfig::default().with_bar_width(2.0));
        let result = renderer.render(&OrderedSeries::default(), None);
        assert!(matches!(result, Err(TweetGraphError::Render { .. })));

        let oversized = HistogramRenderer::new(ChartConfig::default().with_size(60_000, 60_000));
        let result = oversized.render_rgb(&OrderedSeries::default(), None);
        assert!(matches!(result, Err(TweetGraphError::Render { .. })));
    }

    #[test]
    fn test_empty_series_renders_axes_only() {
        let renderer = HistogramRenderer::default();
        if !fonts_ready(&renderer) {
            return;
        }

        let artifact = renderer.render(&OrderedSeries::default(), None).unwrap();
        assert!(artifact.layout.is_empty());
        assert_eq!((artifact.width, artifact.height), (1024, 512));
        assert_eq!(&artifact.png[..8], &PNG_SIGNATURE);

        let rgb = renderer.render_rgb(&OrderedSeries::default(), None).unwrap();
        let bar_color = renderer.config().bar_color;
        assert!(bar_heights(&rgb, 1024, 512, bar_color).is_empty());
    }

    #[test]
    fn test_rgb_buffer_size() {
        let renderer = HistogramRenderer::new(ChartConfig::default().with_size(320, 240));
        if !fonts_ready(&renderer) {
            return;
        }

        let rgb = renderer.render_rgb(&OrderedSeries::default(), Some("@someone")).unwrap();
        assert_eq!(rgb.len(), 320 * 240 * 3);
    }

    #[test]
    fn test_bar_pixels_are_proportional_to_counts() {
        let renderer = HistogramRenderer::default();
        if !fonts_ready(&renderer) {
            return;
        }

        let series = OrderedSeries::try_from_points(vec![
            DayCount::new(CalendarDay::from_ymd(2024, 1, 5).unwrap(), 2),
            DayCount::new(CalendarDay::from_ymd(2024, 2, 1).unwrap(), 1),
        ])
        .unwrap();
        let rgb = renderer.render_rgb(&series, None).unwrap();

        let config = renderer.config();
        let bars = bar_heights(
            &rgb,
            config.width as usize,
            config.height as usize,
            config.bar_color,
        );
        assert_eq!(bars.len(), 2, "expected two bars, got {bars:?}");
        assert!(bars[1] > 0);

        let ratio = bars[0] as f64 / bars[1] as f64;
        assert!((ratio - 2.0).abs() < 0.05, "bar heights {bars:?}");
    }
}
