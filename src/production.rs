use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, de::Error as _};
use serde_json::{Map, Value};

use crate::sensor::parse_timestamp;

#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    Hash,
    derive_more::Display,
    serde::Deserialize,
    serde::Serialize,
    clap::ValueEnum,
)]
pub enum CacaoType {
    Trinitario,
    Forastero,
    Criollo,
    Nacional,
}

#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    Hash,
    derive_more::Display,
    serde::Deserialize,
    serde::Serialize,
)]
pub enum Quality {
    Premium,

    #[display("Estándar")]
    #[serde(rename = "Estándar")]
    Standard,

    #[display("Segunda")]
    #[serde(rename = "Segunda")]
    Second,
}

/// Harvest record as stored by the production log.
#[must_use]
#[derive(Clone, Debug, PartialEq, serde::Deserialize, bon::Builder)]
pub struct ProductionRecord {
    #[serde(deserialize_with = "deserialize_date")]
    pub date: DateTime<Utc>,

    #[builder(into)]
    pub parcel: String,

    pub cacao_type: CacaoType,

    /// Kilograms.
    pub quantity: f64,

    #[serde(default)]
    pub quality: Option<Quality>,

    /// Price per kilogram.
    pub price: f64,

    /// Bean humidity, percent.
    #[serde(default)]
    pub humidity: Option<f64>,

    /// Notes and store bookkeeping (`_id`, `created_at`, …), not used in the statistics.
    #[serde(flatten)]
    #[builder(default)]
    #[allow(dead_code)]
    pub extra: Map<String, Value>,
}

impl ProductionRecord {
    /// Whether the record satisfies the store's constraints.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.quantity.is_finite()
            && self.quantity > 0.0
            && self.price.is_finite()
            && self.price > 0.0
            && self.humidity.is_none_or(|humidity| (0.0..=100.0).contains(&humidity))
    }

    #[must_use]
    pub fn revenue(&self) -> f64 {
        self.quantity * self.price
    }
}

fn deserialize_date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    parse_timestamp(&value).ok_or_else(|| D::Error::custom(format!("invalid date: {value}")))
}
