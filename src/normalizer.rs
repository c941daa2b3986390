use itertools::Itertools;

use crate::{
    core::series::{ResampleHourly, Series},
    error::AnalyticsError,
    prelude::*,
    sensor::{SensorDocument, TIMESTAMP_FIELD, VALUE_FIELD},
};

/// Hour-aligned bucket means in chronological order.
pub type NormalizedSeries = Series<f64>;

/// Clean the raw documents and average them per clock hour.
///
/// Documents with an unparseable timestamp or a missing or non-numeric value are dropped.
#[instrument(skip_all, fields(n_documents = documents.len()))]
pub fn normalize(documents: &[SensorDocument]) -> Result<NormalizedSeries, AnalyticsError> {
    if documents.is_empty() {
        return Err(AnalyticsError::DataUnavailable);
    }
    if !documents.iter().any(SensorDocument::has_timestamp) {
        return Err(AnalyticsError::MissingColumns { column: TIMESTAMP_FIELD });
    }
    if !documents.iter().any(SensorDocument::has_value) {
        return Err(AnalyticsError::MissingColumns { column: VALUE_FIELD });
    }

    let readings = documents.iter().filter_map(SensorDocument::to_reading).collect_vec();
    let n_dropped = documents.len() - readings.len();
    if n_dropped != 0 {
        debug!(n_dropped, "dropped unusable documents");
    }
    if readings.is_empty() {
        return Err(AnalyticsError::DataUnavailable);
    }

    let series =
        readings.into_iter().map(|reading| (reading.timestamp, reading.value)).mean_hourly();
    if series.is_empty() {
        return Err(AnalyticsError::DataUnavailable);
    }
    info!(n_readings = documents.len() - n_dropped, n_buckets = series.len(), "normalized");
    Ok(series)
}
