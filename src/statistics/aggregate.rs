use std::collections::BTreeMap;

use average::{Estimate, Mean};
use chrono::Datelike;
use itertools::Itertools;

use crate::{
    production::{CacaoType, ProductionRecord},
    statistics::palette::{Palette, Swatch},
};

/// Calendar month, displayed as `YYYY-MM`.
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    derive_more::Display,
    serde_with::SerializeDisplay,
)]
#[display("{year:04}-{month:02}")]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, serde::Serialize)]
pub struct MonthlyProduction {
    pub month: YearMonth,
    pub quantity: f64,

    /// Summed quantity times the month's mean price.
    ///
    /// This is not the summed per-record revenue when prices vary within a month.
    /// Kept as is for compatibility with the existing dashboards.
    pub revenue: f64,
}

#[must_use]
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ParcelProduction {
    pub name: String,
    pub quantity: f64,

    #[serde(flatten)]
    pub swatch: Swatch,
}

#[must_use]
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TypeShare {
    pub name: CacaoType,

    /// Share of the records, `0..=100`.
    pub percentage: f64,

    #[serde(flatten)]
    pub swatch: Swatch,
}

/// Quantity and revenue per calendar month, chronologically.
pub fn monthly(records: &[ProductionRecord]) -> Vec<MonthlyProduction> {
    let mut months = BTreeMap::<YearMonth, (f64, Mean)>::new();
    for record in records {
        let month = YearMonth { year: record.date.year(), month: record.date.month() };
        let (quantity, price) = months.entry(month).or_insert_with(|| (0.0, Mean::new()));
        *quantity += record.quantity;
        price.add(record.price);
    }
    months
        .into_iter()
        .map(|(month, (quantity, price))| MonthlyProduction {
            month,
            quantity,
            revenue: quantity * price.mean(),
        })
        .collect()
}

/// Total quantity per parcel in the order of first appearance.
pub fn by_parcel(records: &[ProductionRecord]) -> Vec<ParcelProduction> {
    let totals = records
        .iter()
        .into_grouping_map_by(|record| record.parcel.as_str())
        .fold(0.0, |total, _, record| total + record.quantity);
    records
        .iter()
        .map(|record| record.parcel.as_str())
        .unique()
        .enumerate()
        .map(|(position, name)| ParcelProduction {
            name: name.to_owned(),
            quantity: totals.get(name).copied().unwrap_or_default(),
            swatch: Palette::PARCELS.swatch(position),
        })
        .collect()
}

/// Share of the records per cacao type in the order of first appearance.
#[expect(clippy::cast_precision_loss)]
pub fn by_type(records: &[ProductionRecord]) -> Vec<TypeShare> {
    let counts = records.iter().counts_by(|record| record.cacao_type);
    let n_records = records.len() as f64;
    records
        .iter()
        .map(|record| record.cacao_type)
        .unique()
        .enumerate()
        .map(|(position, cacao_type)| TypeShare {
            name: cacao_type,
            percentage: counts.get(&cacao_type).copied().unwrap_or_default() as f64 / n_records
                * 100.0,
            swatch: Palette::CACAO_TYPES.swatch(position),
        })
        .collect()
}
