use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::{
    fmt::{FormattedKilograms, FormattedPercentage},
    forecast::Forecast,
    statistics::{ProductionStats, palette::Swatch},
};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table
}

fn swatch_color(swatch: Swatch) -> Color {
    swatch.rgb().map_or(Color::Reset, |(r, g, b)| Color::Rgb { r, g, b })
}

#[must_use]
pub fn build_forecast_table(forecast: &Forecast) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        Cell::new("+h").set_alignment(CellAlignment::Right),
        Cell::new("Time"),
        Cell::new("Predicted").set_alignment(CellAlignment::Right),
    ]);
    let trend_color = if forecast.trend.slope >= 0.0 { Color::Green } else { Color::Red };
    for point in &forecast.points {
        table.add_row(vec![
            Cell::new(point.offset).set_alignment(CellAlignment::Right),
            Cell::new(point.timestamp.format("%Y-%m-%d %H:%M")).add_attribute(Attribute::Dim),
            Cell::new(format!("{:.2}", point.predicted_value))
                .set_alignment(CellAlignment::Right)
                .fg(trend_color),
        ]);
    }
    table
}

#[must_use]
pub fn build_summary_table(stats: &ProductionStats) -> Table {
    let mut table = new_table();
    table
        .set_header(vec![
            Cell::new("Production").add_attribute(Attribute::Bold),
            Cell::new("Revenue"),
            Cell::new("Average price"),
            Cell::new("Premium"),
        ])
        .add_row(vec![
            Cell::new(FormattedKilograms(stats.total_quantity)).add_attribute(Attribute::Bold),
            Cell::new(format!("{:.2}", stats.total_revenue)),
            Cell::new(format!("{:.2}", stats.average_price)),
            Cell::new(format!("{:.1}%", stats.premium_percentage())).fg(Color::Magenta),
        ]);
    table
}

#[must_use]
pub fn build_monthly_table(stats: &ProductionStats) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        Cell::new("Month"),
        Cell::new("Quantity").set_alignment(CellAlignment::Right),
        Cell::new("Revenue").set_alignment(CellAlignment::Right),
    ]);
    for month in &stats.monthly {
        table.add_row(vec![
            Cell::new(month.month),
            Cell::new(FormattedKilograms(month.quantity)).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.2}", month.revenue)).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

#[must_use]
pub fn build_distribution_table(stats: &ProductionStats) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        Cell::new("Parcel"),
        Cell::new("Quantity").set_alignment(CellAlignment::Right),
        Cell::new("Cacao type"),
        Cell::new("Share").set_alignment(CellAlignment::Right),
    ]);
    let n_rows = stats.by_parcel.len().max(stats.by_type.len());
    for index in 0..n_rows {
        let parcel = stats.by_parcel.get(index);
        let share = stats.by_type.get(index);
        table.add_row(vec![
            parcel.map_or_else(|| Cell::new(""), |parcel| {
                Cell::new(&parcel.name).fg(swatch_color(parcel.swatch))
            }),
            parcel.map_or_else(|| Cell::new(""), |parcel| {
                Cell::new(FormattedKilograms(parcel.quantity)).set_alignment(CellAlignment::Right)
            }),
            share.map_or_else(|| Cell::new(""), |share| {
                Cell::new(share.name).fg(swatch_color(share.swatch))
            }),
            share.map_or_else(|| Cell::new(""), |share| {
                Cell::new(FormattedPercentage(share.percentage / 100.0))
                    .set_alignment(CellAlignment::Right)
            }),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::production::{CacaoType, ProductionRecord, Quality};

    #[test]
    fn test_stats_tables_render() {
        let records = [
            ProductionRecord::builder()
                .date(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
                .parcel("Lote Norte")
                .cacao_type(CacaoType::Criollo)
                .quantity(10.0)
                .price(2.0)
                .quality(Quality::Premium)
                .build(),
        ];
        let stats = ProductionStats::from_records(&records);
        assert!(build_summary_table(&stats).to_string().contains("100.0%"));
        assert!(build_monthly_table(&stats).to_string().contains("2024-01"));
        assert!(build_distribution_table(&stats).to_string().contains("Lote Norte"));
    }
}
