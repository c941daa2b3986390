use bon::bon;
use chrono::{DateTime, TimeDelta, Utc};
use itertools::Itertools;

use crate::{
    core::regression::LinearTrend,
    error::AnalyticsError,
    normalizer::NormalizedSeries,
    prelude::*,
    render::{Chart, render_forecast_chart},
};

/// Number of hours to forecast, `1..=168`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, derive_more::Display)]
pub struct Horizon(u32);

impl Horizon {
    /// One week.
    pub const MAX: u32 = 168;

    #[must_use]
    pub const fn hours(self) -> u32 {
        self.0
    }
}

impl TryFrom<i64> for Horizon {
    type Error = AnalyticsError;

    fn try_from(hours: i64) -> Result<Self, Self::Error> {
        match u32::try_from(hours) {
            Ok(hours) if (1..=Self::MAX).contains(&hours) => Ok(Self(hours)),
            _ => Err(AnalyticsError::invalid_horizon(hours)),
        }
    }
}

#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, serde::Serialize)]
pub struct ForecastPoint {
    /// Hours after the last observed bucket, starting from 1.
    pub offset: u32,

    pub timestamp: DateTime<Utc>,

    /// Straight from the fitted line: may be negative or exceed physical bounds.
    pub predicted_value: f64,
}

#[must_use]
#[derive(Clone, Debug, serde::Serialize)]
pub struct Forecast {
    pub trend: LinearTrend,
    pub points: Vec<ForecastPoint>,

    #[serde(skip)]
    pub chart: Option<Chart>,
}

#[bon]
impl Forecast {
    /// Fit the trend over the bucket indices and extrapolate it `horizon` hours ahead.
    #[builder]
    pub fn new(
        series: &NormalizedSeries,
        horizon: Horizon,
        #[builder(default)] with_chart: bool,
    ) -> Result<Self, AnalyticsError> {
        let (trend, points) = project(series, horizon)?;
        let chart =
            if with_chart { Some(render_forecast_chart(series, &points)?) } else { None };
        Ok(Self { trend, points, chart })
    }
}

#[instrument(skip_all, fields(n_buckets = series.len(), horizon = horizon.hours()))]
fn project(
    series: &NormalizedSeries,
    horizon: Horizon,
) -> Result<(LinearTrend, Vec<ForecastPoint>), AnalyticsError> {
    let last_bucket = series.last().ok_or(AnalyticsError::DataUnavailable)?.time;
    let values = series.values().collect_vec();
    let trend = LinearTrend::fit(&values).ok_or(AnalyticsError::DataUnavailable)?;

    #[expect(clippy::cast_precision_loss)]
    let last_index = (values.len() - 1) as f64;
    let points = (1..=horizon.hours())
        .map(|offset| ForecastPoint {
            offset,
            timestamp: last_bucket + TimeDelta::hours(offset.into()),
            predicted_value: trend.at(last_index + f64::from(offset)),
        })
        .collect_vec();

    info!(intercept = trend.intercept, slope = trend.slope, "fitted");
    Ok((trend, points))
}
