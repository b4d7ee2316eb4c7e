//! Drawdown analysis of a value series.

use serde::{Deserialize, Serialize};

/// Drawdown statistics of a value series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawdownMetrics {
    /// Largest peak-to-trough decline as a fraction of the peak.
    pub max_drawdown: f64,
    /// `max_drawdown × 100`.
    pub max_drawdown_pct: f64,
    /// Longest run of consecutive periods below the running peak.
    pub max_duration: usize,
    /// Whether the last value is below the running peak.
    pub is_underwater: bool,
    /// Length of the underwater run at the end of the series.
    pub current_duration: usize,
    /// Ulcer index: `sqrt(mean(dd_pct²))` over every period.
    pub ulcer_index: f64,
}

/// Computes drawdown statistics against the running peak.
///
/// Periods where the running peak is not positive count as drawdown 0.
/// An empty series gives all zeros.
#[must_use]
pub fn drawdown_metrics(values: &[f64]) -> DrawdownMetrics {
    let Some(&first) = values.first() else {
        return DrawdownMetrics::default();
    };

    let mut peak = first;
    let mut max_drawdown = 0.0_f64;
    let mut run = 0usize;
    let mut max_duration = 0usize;
    let mut sum_sq_pct = 0.0;

    for &value in values {
        peak = peak.max(value);
        let drawdown = if peak > 0.0 {
            ((peak - value) / peak).max(0.0)
        } else {
            0.0
        };

        if drawdown > 0.0 {
            run += 1;
            max_duration = max_duration.max(run);
        } else {
            run = 0;
        }

        max_drawdown = max_drawdown.max(drawdown);
        sum_sq_pct += (drawdown * 100.0).powi(2);
    }

    DrawdownMetrics {
        max_drawdown,
        max_drawdown_pct: max_drawdown * 100.0,
        max_duration,
        is_underwater: run > 0,
        current_duration: run,
        ulcer_index: (sum_sq_pct / values.len() as f64).sqrt(),
    }
}

/// Net profit over the worst drawdown.
///
/// ```text
/// RF = |net_profit_pct| / max_drawdown_pct
/// net_profit_pct = (V_last / V_first − 1) × 100
/// ```
///
/// Returns 0 without a drawdown or with a non-positive starting value.
#[must_use]
pub fn recovery_factor(values: &[f64]) -> f64 {
    let (Some(&first), Some(&last)) = (values.first(), values.last()) else {
        return 0.0;
    };
    let max_drawdown_pct = drawdown_metrics(values).max_drawdown_pct;
    if max_drawdown_pct == 0.0 || first <= 0.0 {
        return 0.0;
    }
    let net_profit_pct = (last / first - 1.0) * 100.0;
    net_profit_pct.abs() / max_drawdown_pct
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_drawdown_metrics() {
        let values = [100.0, 120.0, 90.0, 96.0, 130.0, 117.0];
        let dd = drawdown_metrics(&values);

        assert_relative_eq!(dd.max_drawdown, 0.25, epsilon = 1e-12);
        assert_relative_eq!(dd.max_drawdown_pct, 25.0, epsilon = 1e-9);
        assert_eq!(dd.max_duration, 2);
        assert!(dd.is_underwater);
        assert_eq!(dd.current_duration, 1);

        // dd_pct: 0, 0, 25, 20, 0, 10
        let expected = ((625.0 + 400.0 + 100.0) / 6.0_f64).sqrt();
        assert_relative_eq!(dd.ulcer_index, expected, epsilon = 1e-9);
    }

    #[test]
    fn test_no_drawdown() {
        let dd = drawdown_metrics(&[1.0, 2.0, 3.0]);
        assert_eq!(dd.max_drawdown, 0.0);
        assert_eq!(dd.max_duration, 0);
        assert!(!dd.is_underwater);
        assert_eq!(dd.ulcer_index, 0.0);
        assert_eq!(drawdown_metrics(&[]), DrawdownMetrics::default());
    }

    #[test]
    fn test_recovered_series() {
        let dd = drawdown_metrics(&[100.0, 80.0, 100.0]);
        assert!(!dd.is_underwater);
        assert_eq!(dd.current_duration, 0);
        assert_eq!(dd.max_duration, 1);
    }

    #[test]
    fn test_recovery_factor() {
        // net +17%, max drawdown 25%
        let values = [100.0, 120.0, 90.0, 96.0, 130.0, 117.0];
        assert_relative_eq!(recovery_factor(&values), 17.0 / 25.0, epsilon = 1e-9);
        assert_eq!(recovery_factor(&[1.0, 2.0]), 0.0);
        assert_eq!(recovery_factor(&[]), 0.0);
    }
}
