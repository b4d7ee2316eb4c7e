//! Simple period returns, the bridge from value series to risk metrics.

use quiver_core::ValueSeries;

/// Simple returns between consecutive values.
///
/// Intervals whose starting value is not positive are skipped, so the
/// output may be shorter than `values.len() − 1`.
#[must_use]
pub fn period_returns(values: &[f64]) -> Vec<f64> {
    values
        .windows(2)
        .filter(|pair| pair[0] > 0.0)
        .map(|pair| (pair[1] - pair[0]) / pair[0])
        .collect()
}

/// Total return from the first to the last point: `V_last / V_first − 1`.
///
/// `None` with fewer than 2 points or a non-positive first value.
#[must_use]
pub fn cumulative_return(series: &ValueSeries) -> Option<f64> {
    if series.len() < 2 {
        return None;
    }
    let (first, last) = (series.first()?, series.last()?);
    (first.value > 0.0).then(|| last.value / first.value - 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use quiver_core::ValuePoint;

    #[test]
    fn test_period_returns() {
        let r = period_returns(&[100.0, 110.0, 99.0]);
        assert_eq!(r.len(), 2);
        assert_relative_eq!(r[0], 0.10, epsilon = 1e-12);
        assert_relative_eq!(r[1], -0.10, epsilon = 1e-12);

        assert_eq!(period_returns(&[0.0, 5.0, 10.0]), vec![1.0]);
        assert!(period_returns(&[100.0]).is_empty());
    }

    #[test]
    fn test_cumulative_return() {
        let s: ValueSeries = [("2024-01-01", 200.0), ("2024-06-01", 250.0)]
            .iter()
            .map(|(d, v)| ValuePoint::from_iso(d, *v).unwrap())
            .collect();
        assert_relative_eq!(cumulative_return(&s).unwrap(), 0.25, epsilon = 1e-12);
        assert!(cumulative_return(&ValueSeries::new()).is_none());
    }
}
