mod timestamp;

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

pub use self::timestamp::parse_timestamp;

/// Name of the timestamp field in the sensor documents.
pub const TIMESTAMP_FIELD: &str = "fecha";

/// Name of the measured value field in the sensor documents.
pub const VALUE_FIELD: &str = "valor";

/// Raw sensor document as exported from the store.
///
/// The outer `Option` tells whether the field is present at all,
/// the inner one whether it is `null`.
#[must_use]
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize)]
pub struct SensorDocument {
    #[serde(rename = "fecha", default, with = "serde_with::rust::double_option")]
    pub timestamp: Option<Option<Value>>,

    #[serde(rename = "valor", default, with = "serde_with::rust::double_option")]
    pub value: Option<Option<Value>>,

    /// Everything else (`_id`, `nodo`, other metrics…), ignored by the pipeline.
    #[serde(flatten)]
    #[allow(dead_code)]
    pub extra: Map<String, Value>,
}

/// Validated reading.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SensorReading {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

impl SensorDocument {
    pub const fn has_timestamp(&self) -> bool {
        self.timestamp.is_some()
    }

    pub const fn has_value(&self) -> bool {
        self.value.is_some()
    }

    /// Validate the document, `None` if it is unusable.
    pub fn to_reading(&self) -> Option<SensorReading> {
        let timestamp = parse_timestamp(self.timestamp.as_ref()?.as_ref()?)?;
        let value = parse_value(self.value.as_ref()?.as_ref()?)?;
        Some(SensorReading { timestamp, value })
    }
}

fn parse_value(value: &Value) -> Option<f64> {
    let value = match value {
        Value::Number(number) => number.as_f64()?,
        Value::String(text) => text.trim().parse().ok()?,
        _ => return None,
    };
    value.is_finite().then_some(value)
}
