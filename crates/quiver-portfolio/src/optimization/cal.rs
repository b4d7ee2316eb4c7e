//! Capital allocation line.

use serde::{Deserialize, Serialize};

use super::candidate::PortfolioCandidate;

/// One point on the capital allocation line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalPoint {
    /// Portfolio volatility.
    pub risk: f64,
    /// Expected return at that volatility.
    pub expected_return: f64,
}

/// Points on the line from the risk-free asset through `portfolio`.
///
/// ```text
/// E[r](σ) = rf + (μ_p − rf) / σ_p × σ,   σ ∈ [0, 2σ_p]
/// ```
///
/// `points` evenly spaced volatilities from 0 to twice the portfolio's
/// volatility. A zero-volatility portfolio yields the single point
/// `(0, rf)`; `points == 0` yields nothing.
#[must_use]
pub fn capital_allocation_line(
    portfolio: &PortfolioCandidate,
    risk_free_rate: f64,
    points: usize,
) -> Vec<CalPoint> {
    if points == 0 {
        return Vec::new();
    }
    let sigma = portfolio.volatility;
    if sigma <= 0.0 || points == 1 {
        return vec![CalPoint {
            risk: 0.0,
            expected_return: risk_free_rate,
        }];
    }

    let slope = (portfolio.expected_return - risk_free_rate) / sigma;
    let max_risk = 2.0 * sigma;
    let step = max_risk / (points - 1) as f64;

    (0..points)
        .map(|i| {
            let risk = step * i as f64;
            CalPoint {
                risk,
                expected_return: risk_free_rate + slope * risk,
            }
        })
        .collect()
}
