//! Descriptive statistics over return samples.
//!
//! All functions are total: an empty or too-short sample yields `0.0`
//! rather than NaN, so callers can apply their own "not computable" policy.

mod confidence;

pub use confidence::*;

use crate::error::{MathError, MathResult};

/// Arithmetic mean. Returns 0 for an empty sample.
#[must_use]
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample variance (`n − 1` denominator). Returns 0 for fewer than 2 values.
#[must_use]
pub fn variance(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (n - 1) as f64
}

/// Sample standard deviation.
#[must_use]
pub fn std_dev(values: &[f64]) -> f64 {
    variance(values).sqrt()
}

/// Downside deviation relative to `target`.
///
/// Only observations strictly below the target contribute:
///
/// ```text
/// DD = sqrt( Σ (r − target)² / count(r < target) )
/// ```
///
/// Returns 0 when no observation falls below the target.
#[must_use]
pub fn downside_deviation(values: &[f64], target: f64) -> f64 {
    let (sum_sq, count) = values
        .iter()
        .filter(|&&r| r < target)
        .fold((0.0, 0usize), |(s, c), &r| (s + (r - target).powi(2), c + 1));

    if count == 0 {
        0.0
    } else {
        (sum_sq / count as f64).sqrt()
    }
}

/// Sample skewness (adjusted Fisher-Pearson). 0 for fewer than 3 values or
/// zero dispersion.
#[must_use]
pub fn skewness(values: &[f64]) -> f64 {
    let n = values.len();
    let sd = std_dev(values);
    if n < 3 || sd == 0.0 {
        return 0.0;
    }
    let m = mean(values);
    let nf = n as f64;
    let third: f64 = values.iter().map(|v| ((v - m) / sd).powi(3)).sum();
    nf / ((nf - 1.0) * (nf - 2.0)) * third
}

/// Sample excess kurtosis. 0 for fewer than 4 values or zero dispersion.
#[must_use]
pub fn excess_kurtosis(values: &[f64]) -> f64 {
    let n = values.len();
    let sd = std_dev(values);
    if n < 4 || sd == 0.0 {
        return 0.0;
    }
    let m = mean(values);
    let nf = n as f64;
    let fourth: f64 = values.iter().map(|v| ((v - m) / sd).powi(4)).sum();
    let lead = nf * (nf + 1.0) / ((nf - 1.0) * (nf - 2.0) * (nf - 3.0));
    let tail = 3.0 * (nf - 1.0).powi(2) / ((nf - 2.0) * (nf - 3.0));
    lead * fourth - tail
}

/// Sample covariance of two equal-length series.
///
/// Returns 0 for fewer than 2 paired observations.
///
/// # Errors
///
/// Returns `MathError::DimensionMismatch` if the lengths differ.
pub fn covariance(a: &[f64], b: &[f64]) -> MathResult<f64> {
    if a.len() != b.len() {
        return Err(MathError::dimension_mismatch(a.len(), b.len()));
    }
    let n = a.len();
    if n < 2 {
        return Ok(0.0);
    }
    let (ma, mb) = (mean(a), mean(b));
    let sum: f64 = a.iter().zip(b).map(|(x, y)| (x - ma) * (y - mb)).sum();
    Ok(sum / (n - 1) as f64)
}

/// Pearson correlation of two equal-length series.
///
/// Returns 0 when either series has zero standard deviation.
///
/// # Errors
///
/// Returns `MathError::DimensionMismatch` if the lengths differ.
pub fn correlation(a: &[f64], b: &[f64]) -> MathResult<f64> {
    let cov = covariance(a, b)?;
    let denom = std_dev(a) * std_dev(b);
    if denom == 0.0 {
        Ok(0.0)
    } else {
        Ok(cov / denom)
    }
}

/// Standard score of `value`. Returns 0 when `sd` is 0.
#[must_use]
pub fn z_score(value: f64, mean: f64, sd: f64) -> f64 {
    if sd == 0.0 {
        0.0
    } else {
        (value - mean) / sd
    }
}

/// Standard scores of every observation against the sample's own moments.
#[must_use]
pub fn standardize(values: &[f64]) -> Vec<f64> {
    let m = mean(values);
    let sd = std_dev(values);
    values.iter().map(|&v| z_score(v, m, sd)).collect()
}

/// Sorts a copy of the sample ascending. NaNs compare as equal.
#[must_use]
pub fn sorted_ascending(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mean_and_std_dev() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(mean(&values), 5.0);
        // Sample variance: 32 / 7
        assert_relative_eq!(variance(&values), 32.0 / 7.0, epsilon = 1e-12);
        assert_relative_eq!(std_dev(&values), (32.0_f64 / 7.0).sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_degenerate_samples() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(variance(&[1.0]), 0.0);
        assert_eq!(std_dev(&[]), 0.0);
        assert_eq!(skewness(&[1.0, 2.0]), 0.0);
        assert_eq!(excess_kurtosis(&[1.0, 1.0, 1.0, 1.0]), 0.0);
    }

    #[test]
    fn test_downside_deviation() {
        let returns = [0.02, -0.01, 0.03, -0.03, 0.0];
        // Below 0: -0.01, -0.03 → sqrt((0.0001 + 0.0009) / 2)
        assert_relative_eq!(
            downside_deviation(&returns, 0.0),
            (0.0005_f64).sqrt(),
            epsilon = 1e-12
        );
        assert_eq!(downside_deviation(&[0.01, 0.02], 0.0), 0.0);
    }

    #[test]
    fn test_covariance_and_correlation() {
        let a = [1.0, 2.0, 3.0, 4.0];
        let b = [2.0, 4.0, 6.0, 8.0];
        let c = [4.0, 3.0, 2.0, 1.0];

        assert_relative_eq!(covariance(&a, &b).unwrap(), 2.0 * variance(&a), epsilon = 1e-12);
        assert_relative_eq!(correlation(&a, &b).unwrap(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(correlation(&a, &c).unwrap(), -1.0, epsilon = 1e-12);
        assert_eq!(correlation(&a, &[1.0, 1.0, 1.0, 1.0]).unwrap(), 0.0);
        assert!(covariance(&a, &[1.0]).is_err());
    }

    #[test]
    fn test_skewness_sign() {
        let right_tail = [1.0, 1.0, 1.0, 1.0, 10.0];
        let left_tail = [-10.0, 1.0, 1.0, 1.0, 1.0];
        assert!(skewness(&right_tail) > 0.0);
        assert!(skewness(&left_tail) < 0.0);
    }

    #[test]
    fn test_standardize() {
        let z = standardize(&[1.0, 2.0, 3.0]);
        assert_relative_eq!(z[0], -1.0, epsilon = 1e-12);
        assert_relative_eq!(z[1], 0.0, epsilon = 1e-12);
        assert_relative_eq!(z[2], 1.0, epsilon = 1e-12);
        assert_eq!(z_score(5.0, 1.0, 0.0), 0.0);
    }

    #[test]
    fn test_sorted_ascending_leaves_input() {
        let values = [0.3, -0.1, 0.2];
        let sorted = sorted_ascending(&values);
        assert_eq!(sorted, vec![-0.1, 0.2, 0.3]);
        assert_eq!(values, [0.3, -0.1, 0.2]);
    }
}
