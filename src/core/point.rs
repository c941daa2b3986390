use chrono::{DateTime, Utc};

/// A time series point.
#[derive(Clone, Copy, Debug, PartialEq, derive_more::Constructor, serde::Serialize)]
pub struct Point<V> {
    pub time: DateTime<Utc>,
    pub value: V,
}
