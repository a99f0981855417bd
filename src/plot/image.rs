//! PNG rendering with plotters.

use anyhow::{anyhow, Result};
use plotters::prelude::*;
use plotters::style::{FontDesc, FontFamily, FontStyle};
use tracing::info;

use super::series::{format_offset, Series};
use super::{PlotRequest, Plotter};

/// Renders the chart to the request's export path as a PNG.
#[derive(Debug, Clone, Copy)]
pub struct ImagePlotter {
    size: (u32, u32),
}

impl Default for ImagePlotter {
    fn default() -> Self {
        Self { size: (1280, 760) }
    }
}

impl ImagePlotter {
    /// Image size in pixels.
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            size: (width, height),
        }
    }
}

impl Plotter for ImagePlotter {
    fn plot(&mut self, request: &PlotRequest) -> Result<()> {
        let path = request
            .export
            .as_deref()
            .ok_or_else(|| anyhow!("No image path to render to"))?;
        let series = Series::load(&request.data_path, request.time_format)?;

        let root = BitMapBackend::new(path, self.size).into_drawing_area();
        draw_chart(root, &series, request)?;

        info!(path = %path.display(), points = series.len(), "Rendered plot image");
        Ok(())
    }
}

fn draw_chart<DB>(
    root: DrawingArea<DB, plotters::coord::Shift>,
    series: &Series,
    request: &PlotRequest,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;

    let x_max = series.span_secs();
    let (y_min, y_max) = request.y_range;
    let origin = series.time_bounds().map(|(min, _)| min);
    let time_format = request.time_format;

    let mut chart = ChartBuilder::on(&root)
        .caption(&request.x_label, ("sans-serif", 22))
        .margin(25)
        .set_label_area_size(LabelAreaPosition::Left, 90)
        .set_label_area_size(LabelAreaPosition::Bottom, 60)
        .build_cartesian_2d(0.0..x_max, y_min..y_max)?;

    chart
        .configure_mesh()
        .x_desc(&request.x_label)
        .y_desc(&request.y_label)
        .x_labels(6)
        .x_label_formatter(&|v| match origin {
            Some(origin) => format_offset(origin, *v, time_format),
            None => String::new(),
        })
        .y_label_formatter(&|v| format!("{:.6}", v))
        .label_style(FontDesc::new(FontFamily::SansSerif, 14.0, FontStyle::Normal))
        .draw()?;

    // Points outside the fixed y range are clipped, not rescaled.
    chart.draw_series(
        series
            .offsets()
            .into_iter()
            .filter(|(_, v)| *v >= y_min && *v <= y_max)
            .map(|point| Circle::new(point, 1, RGBColor(30, 144, 255).filled())),
    )?;

    root.present()?;
    Ok(())
}
