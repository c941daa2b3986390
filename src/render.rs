use chrono::{DateTime, Utc};
use image::{ExtendedColorType, ImageEncoder, codecs::png::PngEncoder};
use itertools::{Itertools, MinMaxResult};
use plotters::prelude::{
    BitMapBackend,
    ChartBuilder,
    Color,
    DashedLineSeries,
    IntoDrawingArea,
    LineSeries,
    RGBColor,
    WHITE,
};

use crate::{
    error::AnalyticsError,
    forecast::ForecastPoint,
    normalizer::NormalizedSeries,
    prelude::*,
};

const WIDTH: u32 = 1000;
const HEIGHT: u32 = 500;

const HISTORY_COLOR: RGBColor = RGBColor(16, 185, 129);
const FORECAST_COLOR: RGBColor = RGBColor(59, 130, 246);
const GRID_COLOR: RGBColor = RGBColor(229, 231, 235);

/// PNG-encoded chart.
#[must_use]
#[derive(Clone, Debug, derive_more::AsRef, derive_more::Deref, derive_more::Into)]
pub struct Chart(Vec<u8>);

/// Plot the history as a solid line and the forecast as a dashed one.
pub fn render_forecast_chart(
    history: &NormalizedSeries,
    forecast: &[ForecastPoint],
) -> Result<Chart, AnalyticsError> {
    let mut pixels = vec![0; WIDTH as usize * HEIGHT as usize * 3];
    draw(history, forecast, &mut pixels)
        .map_err(|error| AnalyticsError::Render { message: format!("{error:#}") })?;
    let mut png = Vec::new();
    PngEncoder::new(&mut png)
        .write_image(&pixels, WIDTH, HEIGHT, ExtendedColorType::Rgb8)
        .map_err(|error| AnalyticsError::Render { message: error.to_string() })?;
    debug!(n_bytes = png.len(), "rendered the chart");
    Ok(Chart(png))
}

fn draw(history: &NormalizedSeries, forecast: &[ForecastPoint], pixels: &mut [u8]) -> Result {
    let origin = history.first().context("nothing to plot")?.time;
    let hours_since_origin =
        |time: DateTime<Utc>| (time - origin).as_seconds_f64() / 3600.0;

    let history_line =
        history.iter().map(|point| (hours_since_origin(point.time), point.value)).collect_vec();
    // The forecast continues from the last observed bucket:
    let forecast_line = history_line
        .last()
        .copied()
        .into_iter()
        .chain(
            forecast
                .iter()
                .map(|point| (hours_since_origin(point.timestamp), point.predicted_value)),
        )
        .collect_vec();

    let x_max = forecast_line.last().map_or(1.0, |&(x, _)| x.max(1.0));
    let (y_min, y_max) =
        match history_line.iter().chain(&forecast_line).map(|(_, y)| *y).minmax() {
            MinMaxResult::NoElements => (0.0, 1.0),
            MinMaxResult::OneElement(y) => (y, y),
            MinMaxResult::MinMax(min, max) => (min, max),
        };
    let margin = ((y_max - y_min) * 0.1).max(1.0);

    let root = BitMapBackend::with_buffer(pixels, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .build_cartesian_2d(0.0..x_max, (y_min - margin)..(y_max + margin))?;
    // No font backend is compiled in: grid lines only, no label areas.
    chart
        .configure_mesh()
        .disable_axes()
        .bold_line_style(GRID_COLOR.stroke_width(1))
        .light_line_style(WHITE.stroke_width(1))
        .draw()?;
    chart.draw_series(LineSeries::new(history_line, HISTORY_COLOR.stroke_width(2)))?;
    chart.draw_series(DashedLineSeries::new(
        forecast_line,
        10,
        6,
        FORECAST_COLOR.stroke_width(2),
    ))?;
    root.present()?;
    Ok(())
}
