use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::{Map, Value};

const OFFSET_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%z"];

const NAIVE_FORMATS: &[&str] =
    &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"];

/// Parse a document timestamp.
///
/// Accepts RFC 3339 and ISO-like strings (naive ones are taken as UTC),
/// Mongo Extended JSON dates, and bare epoch milliseconds.
pub fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(text) => parse_text(text),
        Value::Number(number) => DateTime::from_timestamp_millis(number.as_i64()?),
        Value::Object(object) => parse_extended_json(object),
        _ => None,
    }
}

fn parse_text(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(text) {
        return Some(timestamp.to_utc());
    }
    if let Some(timestamp) =
        OFFSET_FORMATS.iter().find_map(|format| DateTime::parse_from_str(text, format).ok())
    {
        return Some(timestamp.to_utc());
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()?.and_hms_opt(0, 0, 0))
        .map(|timestamp| timestamp.and_utc())
}

/// `{"$date": …}` as produced by `mongoexport`.
fn parse_extended_json(object: &Map<String, Value>) -> Option<DateTime<Utc>> {
    match object.get("$date")? {
        Value::Object(inner) => {
            DateTime::from_timestamp_millis(inner.get("$numberLong")?.as_str()?.parse().ok()?)
        }
        Value::Null | Value::Bool(_) | Value::Array(_) => None,
        other => parse_timestamp(other),
    }
}
