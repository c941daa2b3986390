mod resample;

use itertools::Itertools;

pub use self::resample::ResampleHourly;
use crate::{core::point::Point, prelude::*};

/// Chronologically ordered points with unique timestamps.
#[must_use]
#[derive(Clone, Debug, PartialEq, derive_more::Deref, derive_more::IntoIterator, serde::Serialize)]
#[into_iterator(owned, ref)]
pub struct Series<V>(Vec<Point<V>>);

impl<V> Series<V> {
    pub fn try_from_points(points: Vec<Point<V>>) -> Result<Self> {
        if let Some((lhs, rhs)) =
            points.iter().tuple_windows().find(|(lhs, rhs)| lhs.time >= rhs.time)
        {
            bail!("points are not strictly increasing: {} → {}", lhs.time, rhs.time);
        }
        Ok(Self(points))
    }
}

impl<V: Copy> Series<V> {
    pub fn values(&self) -> impl Iterator<Item = V> + '_ {
        self.0.iter().map(|point| point.value)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    #[test]
    fn test_try_from_points_rejects_duplicates() {
        let time = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let points = vec![Point::new(time, 1.0), Point::new(time, 2.0)];
        assert!(Series::try_from_points(points).is_err());
    }

    #[test]
    fn test_try_from_points_ok() -> Result {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 1, 1, 3, 0, 0).unwrap();
        let series = Series::try_from_points(vec![Point::new(start, 1.0), Point::new(end, 2.0)])?;
        assert_eq!(series.values().collect_vec(), [1.0, 2.0]);
        Ok(())
    }
}
