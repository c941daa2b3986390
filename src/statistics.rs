pub mod aggregate;
pub mod palette;

use crate::{
    prelude::*,
    production::{ProductionRecord, Quality},
    statistics::aggregate::{
        MonthlyProduction,
        ParcelProduction,
        TypeShare,
        by_parcel,
        by_type,
        monthly,
    },
};

/// Summary of a production record set.
#[must_use]
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct ProductionStats {
    /// Kilograms.
    pub total_quantity: f64,

    /// Summed per-record `quantity × price`.
    pub total_revenue: f64,

    /// Quantity-weighted, zero when nothing was produced.
    pub average_price: f64,

    /// Share of premium records among the graded ones, `0..=1`.
    pub premium_ratio: f64,

    pub monthly: Vec<MonthlyProduction>,
    pub by_parcel: Vec<ParcelProduction>,
    pub by_type: Vec<TypeShare>,
}

impl ProductionStats {
    /// Aggregate the records, which are expected to be filtered already.
    ///
    /// An empty record set yields all-zero statistics.
    #[instrument(skip_all, fields(n_records = records.len()))]
    pub fn from_records(records: &[ProductionRecord]) -> Self {
        if records.is_empty() {
            info!("no records, returning empty statistics");
            return Self::default();
        }

        let total_quantity = records.iter().map(|record| record.quantity).sum::<f64>();
        let total_revenue = records.iter().map(ProductionRecord::revenue).sum::<f64>();
        let average_price =
            if total_quantity > 0.0 { total_revenue / total_quantity } else { 0.0 };

        let this = Self {
            total_quantity,
            total_revenue,
            average_price,
            premium_ratio: premium_ratio(records),
            monthly: monthly(records),
            by_parcel: by_parcel(records),
            by_type: by_type(records),
        };
        info!(
            total_quantity,
            total_revenue,
            n_months = this.monthly.len(),
            n_parcels = this.by_parcel.len(),
            "crunched",
        );
        this
    }

    /// Premium share in percent, as the dashboards display it.
    #[must_use]
    pub fn premium_percentage(&self) -> f64 {
        self.premium_ratio * 100.0
    }
}

#[expect(clippy::cast_precision_loss)]
fn premium_ratio(records: &[ProductionRecord]) -> f64 {
    let (n_premium, n_graded) = records
        .iter()
        .filter_map(|record| record.quality)
        .fold((0_usize, 0_usize), |(n_premium, n_graded), quality| {
            (n_premium + usize::from(quality == Quality::Premium), n_graded + 1)
        });
    if n_graded == 0 { 0.0 } else { n_premium as f64 / n_graded as f64 }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::production::CacaoType;

    fn record(
        parcel: &str,
        quantity: f64,
        price: f64,
        quality: Option<Quality>,
    ) -> ProductionRecord {
        ProductionRecord::builder()
            .date(Utc.with_ymd_and_hms(2024, 5, 10, 0, 0, 0).unwrap())
            .parcel(parcel)
            .cacao_type(CacaoType::Trinitario)
            .quantity(quantity)
            .price(price)
            .maybe_quality(quality)
            .build()
    }

    #[test]
    fn test_from_records() {
        let records = [
            record("A", 10.0, 2.0, Some(Quality::Premium)),
            record("B", 5.0, 4.0, Some(Quality::Standard)),
        ];
        let stats = ProductionStats::from_records(&records);
        assert_abs_diff_eq!(stats.total_quantity, 15.0);
        assert_abs_diff_eq!(stats.total_revenue, 40.0);
        assert_abs_diff_eq!(stats.average_price, 40.0 / 15.0);
        assert_abs_diff_eq!(stats.premium_ratio, 0.5);
        assert_abs_diff_eq!(stats.premium_percentage(), 50.0);
        assert_eq!(stats.monthly.len(), 1);
        assert_eq!(stats.by_parcel.len(), 2);
        assert_eq!(stats.by_type.len(), 1);
        assert_abs_diff_eq!(stats.by_type[0].percentage, 100.0);
    }

    #[test]
    fn test_premium_ratio_ignores_ungraded() {
        let records = [
            record("A", 1.0, 1.0, Some(Quality::Premium)),
            record("A", 1.0, 1.0, None),
            record("A", 1.0, 1.0, Some(Quality::Second)),
            record("A", 1.0, 1.0, Some(Quality::Second)),
        ];
        assert_abs_diff_eq!(ProductionStats::from_records(&records).premium_ratio, 1.0 / 3.0);
    }

    #[test]
    fn test_premium_ratio_without_grades() {
        let records = [record("A", 1.0, 1.0, None)];
        assert_abs_diff_eq!(ProductionStats::from_records(&records).premium_ratio, 0.0);
    }

    #[test]
    fn test_from_records_empty() {
        let stats = ProductionStats::from_records(&[]);
        assert_eq!(stats, ProductionStats::default());
        assert!(stats.monthly.is_empty());
        assert!(stats.by_parcel.is_empty());
        assert!(stats.by_type.is_empty());
    }

    #[test]
    fn test_from_records_is_idempotent() {
        let records = [
            record("A", 3.0, 2.5, Some(Quality::Premium)),
            record("C", 7.0, 1.5, None),
            record("B", 2.0, 3.0, Some(Quality::Standard)),
        ];
        let lhs = ProductionStats::from_records(&records);
        let rhs = ProductionStats::from_records(&records);
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn test_from_records_ignores_order() {
        let harvest = |month, parcel: &str, cacao_type, quantity, price, quality| {
            ProductionRecord::builder()
                .date(Utc.with_ymd_and_hms(2024, month, 1, 0, 0, 0).unwrap())
                .parcel(parcel)
                .cacao_type(cacao_type)
                .quantity(quantity)
                .price(price)
                .maybe_quality(quality)
                .build()
        };
        let mut records = vec![
            harvest(1, "A", CacaoType::Criollo, 3.0, 2.5, Some(Quality::Premium)),
            harvest(3, "B", CacaoType::Nacional, 7.0, 1.5, None),
            harvest(1, "C", CacaoType::Criollo, 2.0, 3.0, Some(Quality::Second)),
            harvest(2, "A", CacaoType::Forastero, 4.5, 2.0, Some(Quality::Premium)),
        ];
        let forward = ProductionStats::from_records(&records);
        records.reverse();
        let backward = ProductionStats::from_records(&records);

        assert_abs_diff_eq!(forward.total_quantity, backward.total_quantity, epsilon = 1e-9);
        assert_abs_diff_eq!(forward.total_revenue, backward.total_revenue, epsilon = 1e-9);
        assert_abs_diff_eq!(forward.average_price, backward.average_price, epsilon = 1e-9);
        assert_abs_diff_eq!(forward.premium_ratio, backward.premium_ratio, epsilon = 1e-9);
        assert_eq!(forward.monthly.len(), backward.monthly.len());
        for (lhs, rhs) in forward.monthly.iter().zip(&backward.monthly) {
            assert_eq!(lhs.month, rhs.month);
            assert_abs_diff_eq!(lhs.quantity, rhs.quantity, epsilon = 1e-9);
            assert_abs_diff_eq!(lhs.revenue, rhs.revenue, epsilon = 1e-9);
        }

        let parcels = |stats: &ProductionStats| {
            stats.by_parcel.iter().map(|parcel| parcel.name.clone()).collect::<Vec<_>>()
        };
        assert_eq!(parcels(&forward), ["A", "B", "C"]);
        assert_eq!(parcels(&backward), ["A", "C", "B"]);
        assert_abs_diff_eq!(backward.by_parcel[0].quantity, 7.5);

        let types = |stats: &ProductionStats| {
            stats.by_type.iter().map(|share| share.name).collect::<Vec<_>>()
        };
        assert_eq!(
            types(&forward),
            [CacaoType::Criollo, CacaoType::Nacional, CacaoType::Forastero],
        );
        assert_eq!(
            types(&backward),
            [CacaoType::Forastero, CacaoType::Criollo, CacaoType::Nacional],
        );
        assert_abs_diff_eq!(backward.by_type[1].percentage, 50.0);
    }

    #[test]
    fn test_serialize() -> Result {
        let stats =
            ProductionStats::from_records(&[record("A", 10.0, 2.0, Some(Quality::Premium))]);
        let json = serde_json::to_value(&stats)?;
        assert_eq!(json["monthly"][0]["month"], "2024-05");
        assert_eq!(json["by_parcel"][0]["name"], "A");
        assert_eq!(json["by_parcel"][0]["color_index"], 0);
        assert_eq!(json["by_parcel"][0]["color"], "#10b981");
        assert_eq!(json["by_type"][0]["name"], "Trinitario");
        assert_eq!(json["by_type"][0]["color"], "#8b5cf6");
        Ok(())
    }
}
