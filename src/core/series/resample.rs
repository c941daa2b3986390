use std::collections::BTreeMap;

use average::{Estimate, Mean};
use chrono::{DateTime, NaiveTime, TimeDelta, Timelike, Utc};

use crate::core::{point::Point, series::Series};

impl<T> ResampleHourly for T where T: ?Sized {}

pub trait ResampleHourly {
    /// Average the values within each clock hour.
    ///
    /// Hours without samples are omitted rather than filled.
    fn mean_hourly(self) -> Series<f64>
    where
        Self: Sized + Iterator<Item = (DateTime<Utc>, f64)>,
    {
        let mut buckets = BTreeMap::<DateTime<Utc>, Mean>::new();
        for (timestamp, value) in self {
            buckets.entry(hour_start(timestamp)).or_insert_with(Mean::new).add(value);
        }
        Series(
            buckets
                .into_iter()
                .map(|(bucket_start, mean)| Point::new(bucket_start, mean.mean()))
                .collect(),
        )
    }
}

/// Start of the clock hour, valid over the whole `DateTime` range.
fn hour_start(timestamp: DateTime<Utc>) -> DateTime<Utc> {
    timestamp.date_naive().and_time(NaiveTime::MIN).and_utc()
        + TimeDelta::hours(timestamp.hour().into())
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use chrono::TimeZone;

    use super::*;

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, hour, minute, 0).unwrap()
    }

    #[test]
    fn test_mean_hourly() {
        let series = vec![(at(0, 5), 10.0), (at(1, 10), 40.0), (at(0, 45), 20.0)]
            .into_iter()
            .mean_hourly();
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].time, at(0, 0));
        assert_abs_diff_eq!(series[0].value, 15.0);
        assert_eq!(series[1].time, at(1, 0));
        assert_abs_diff_eq!(series[1].value, 40.0);
    }

    #[test]
    fn test_mean_hourly_skips_gaps() {
        let series = vec![(at(5, 0), 1.0), (at(2, 59), 3.0)].into_iter().mean_hourly();
        let times: Vec<_> = series.iter().map(|point| point.time).collect();
        assert_eq!(times, [at(2, 0), at(5, 0)]);
    }

    #[test]
    fn test_mean_hourly_far_from_epoch() {
        let early = Utc.with_ymd_and_hms(1650, 1, 1, 0, 30, 0).unwrap();
        let late = Utc.with_ymd_and_hms(2300, 1, 1, 23, 59, 59).unwrap();
        let series = vec![(late, 5.0), (early, 1000.0)].into_iter().mean_hourly();
        let times: Vec<_> = series.iter().map(|point| point.time).collect();
        assert_eq!(
            times,
            [
                Utc.with_ymd_and_hms(1650, 1, 1, 0, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2300, 1, 1, 23, 0, 0).unwrap(),
            ],
        );
    }

    #[test]
    fn test_mean_hourly_empty() {
        let series = std::iter::empty::<(DateTime<Utc>, f64)>().mean_hourly();
        assert!(series.is_empty());
    }
}
