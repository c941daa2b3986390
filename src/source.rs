use std::{fs, path::Path};

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    prelude::*,
    production::{CacaoType, ProductionRecord},
    sensor::SensorDocument,
};

/// Load up to `limit` sensor documents from a JSON array, as the store would return them.
#[instrument(skip_all, fields(path = %path.display(), limit = limit))]
pub fn load_sensor_documents(path: &Path, limit: usize) -> Result<Vec<SensorDocument>> {
    let mut documents = read_array(path)?;
    documents.truncate(limit);
    let documents: Vec<SensorDocument> = parse_items(documents);
    info!(n_documents = documents.len(), "loaded the sensor documents");
    Ok(documents)
}

/// Load the production records matching the filter.
///
/// Records the store would have rejected are skipped.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn load_production_records(
    path: &Path,
    filter: &RecordFilter,
) -> Result<Vec<ProductionRecord>> {
    let records: Vec<ProductionRecord> = parse_items(read_array(path)?);
    let n_records = records.len();
    let records = records.into_iter().filter(ProductionRecord::is_valid).collect::<Vec<_>>();
    if records.len() != n_records {
        warn!(n_invalid = n_records - records.len(), "skipped invalid records");
    }
    let records =
        records.into_iter().filter(|record| filter.matches(record)).collect::<Vec<_>>();
    info!(n_records = records.len(), "loaded the production records");
    Ok(records)
}

fn read_array(path: &Path) -> Result<Vec<Value>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read `{}`", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("`{}` is not a JSON array", path.display()))
}

/// Deserialize the items one by one, skipping the malformed ones.
fn parse_items<T: DeserializeOwned>(items: Vec<Value>) -> Vec<T> {
    let n_items = items.len();
    let parsed = items
        .into_iter()
        .filter_map(|item| {
            serde_json::from_value(item)
                .inspect_err(|error| debug!("skipping a malformed item: {error:#}"))
                .ok()
        })
        .collect::<Vec<T>>();
    if parsed.len() != n_items {
        warn!(n_malformed = n_items - parsed.len(), "skipped malformed items");
    }
    parsed
}

/// Record selection applied before the aggregation.
#[must_use]
#[derive(Clone, Debug, Default, bon::Builder)]
pub struct RecordFilter {
    #[builder(into)]
    pub parcel: Option<String>,

    pub cacao_type: Option<CacaoType>,

    /// Inclusive.
    pub since: Option<DateTime<Utc>>,

    /// Inclusive.
    pub until: Option<DateTime<Utc>>,
}

impl RecordFilter {
    #[must_use]
    pub fn matches(&self, record: &ProductionRecord) -> bool {
        self.parcel.as_ref().is_none_or(|parcel| *parcel == record.parcel)
            && self.cacao_type.is_none_or(|cacao_type| cacao_type == record.cacao_type)
            && self.since.is_none_or(|since| record.date >= since)
            && self.until.is_none_or(|until| record.date <= until)
    }
}
