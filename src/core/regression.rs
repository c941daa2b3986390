/// Straight line `value = intercept + slope × index` fitted by ordinary least squares.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, serde::Serialize)]
pub struct LinearTrend {
    pub intercept: f64,
    pub slope: f64,
}

impl LinearTrend {
    /// Fit the values against their 0-based indices.
    ///
    /// A single value fits a flat line through that value, which is why this is not delegated
    /// to a regression crate: those reject a rank-deficient design matrix.
    #[expect(clippy::cast_precision_loss)]
    pub fn fit(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let n = values.len() as f64;
        let index_mean = (n - 1.0) / 2.0;
        let value_mean = values.iter().sum::<f64>() / n;
        let (covariance, variance) =
            values.iter().enumerate().fold((0.0, 0.0), |(covariance, variance), (index, value)| {
                let index_delta = index as f64 - index_mean;
                (
                    index_delta.mul_add(value - value_mean, covariance),
                    index_delta.mul_add(index_delta, variance),
                )
            });
        let slope = if variance > 0.0 { covariance / variance } else { 0.0 };
        Some(Self { intercept: value_mean - slope * index_mean, slope })
    }

    #[must_use]
    pub fn at(&self, index: f64) -> f64 {
        self.slope.mul_add(index, self.intercept)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_fit_two_points() {
        let trend = LinearTrend::fit(&[15.0, 40.0]).unwrap();
        assert_abs_diff_eq!(trend.intercept, 15.0);
        assert_abs_diff_eq!(trend.slope, 25.0);
        assert_abs_diff_eq!(trend.at(2.0), 65.0);
        assert_abs_diff_eq!(trend.at(3.0), 90.0);
    }

    #[test]
    fn test_fit_single_point_is_flat() {
        let trend = LinearTrend::fit(&[42.5]).unwrap();
        assert_abs_diff_eq!(trend.slope, 0.0);
        assert_abs_diff_eq!(trend.at(7.0), 42.5);
    }

    #[test]
    fn test_fit_noisy() {
        let trend = LinearTrend::fit(&[1.5, 2.5, 5.5, 6.5]).unwrap();
        assert_abs_diff_eq!(trend.slope, 1.8, epsilon = 1e-12);
        assert_abs_diff_eq!(trend.intercept, 1.3, epsilon = 1e-12);
    }

    #[test]
    fn test_fit_empty() {
        assert!(LinearTrend::fit(&[]).is_none());
    }
}
