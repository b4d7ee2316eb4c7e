//! Risk-adjusted return ratios.
//!
//! Inputs are fractional periodic returns; `periods_per_year` annualizes
//! them (252 for daily data). Every ratio returns `0.0` when its
//! denominator is zero.

use quiver_math::statistics::{covariance, downside_deviation, mean, std_dev, variance};

use super::drawdown::drawdown_metrics;
use crate::error::{AnalyticsError, AnalyticsResult};
use crate::returns::period_returns;

/// Annualized standard deviation: `σ × √periods`.
#[must_use]
pub fn annualized_volatility(returns: &[f64], periods_per_year: f64) -> f64 {
    std_dev(returns) * periods_per_year.sqrt()
}

/// Annualized Sharpe ratio.
///
/// ```text
/// Sharpe = (μ × P − rf) / (σ × √P)
/// ```
#[must_use]
pub fn sharpe_ratio(returns: &[f64], risk_free_rate: f64, periods_per_year: f64) -> f64 {
    let vol = annualized_volatility(returns, periods_per_year);
    if vol == 0.0 {
        return 0.0;
    }
    (mean(returns) * periods_per_year - risk_free_rate) / vol
}

/// Annualized Sortino ratio.
///
/// ```text
/// Sortino = (μ × P − rf) / (DD(target) × √P)
/// ```
///
/// Downside deviation only counts returns below `target`.
#[must_use]
pub fn sortino_ratio(
    returns: &[f64],
    risk_free_rate: f64,
    target: f64,
    periods_per_year: f64,
) -> f64 {
    let dd = downside_deviation(returns, target);
    if dd == 0.0 {
        return 0.0;
    }
    (mean(returns) * periods_per_year - risk_free_rate) / (dd * periods_per_year.sqrt())
}

/// Calmar ratio of a value series.
///
/// Annualized return (mean period return × P) over the maximum drawdown
/// fraction.
#[must_use]
pub fn calmar_ratio(values: &[f64], periods_per_year: f64) -> f64 {
    let max_drawdown = drawdown_metrics(values).max_drawdown;
    if max_drawdown == 0.0 {
        return 0.0;
    }
    mean(&period_returns(values)) * periods_per_year / max_drawdown
}

/// Omega ratio at threshold `tau`.
///
/// ```text
/// Ω = Σ max(r − τ, 0) / Σ max(τ − r, 0)
/// ```
///
/// Without any shortfall the ratio is the fraction of returns above `tau`;
/// an empty sample gives 0.
#[must_use]
pub fn omega_ratio(returns: &[f64], tau: f64) -> f64 {
    if returns.is_empty() {
        return 0.0;
    }
    let gains: f64 = returns.iter().map(|r| (r - tau).max(0.0)).sum();
    let losses: f64 = returns.iter().map(|r| (tau - r).max(0.0)).sum();

    if losses == 0.0 {
        let gains_count = returns.iter().filter(|&&r| r > tau).count();
        return gains_count as f64 / returns.len() as f64;
    }
    gains / losses
}

fn excess_returns(portfolio: &[f64], benchmark: &[f64]) -> AnalyticsResult<Vec<f64>> {
    if portfolio.len() != benchmark.len() {
        return Err(AnalyticsError::validation(
            "benchmark",
            format!(
                "must have the same length as the portfolio returns ({} vs {})",
                benchmark.len(),
                portfolio.len()
            ),
        ));
    }
    Ok(portfolio.iter().zip(benchmark).map(|(p, b)| p - b).collect())
}

/// Periodic tracking error: standard deviation of excess returns.
///
/// # Errors
///
/// Returns a validation error if the series lengths differ.
pub fn tracking_error(portfolio: &[f64], benchmark: &[f64]) -> AnalyticsResult<f64> {
    Ok(std_dev(&excess_returns(portfolio, benchmark)?))
}

/// Information ratio: mean excess return over tracking error.
///
/// # Errors
///
/// Returns a validation error if the series lengths differ.
pub fn information_ratio(portfolio: &[f64], benchmark: &[f64]) -> AnalyticsResult<f64> {
    let excess = excess_returns(portfolio, benchmark)?;
    let te = std_dev(&excess);
    if te == 0.0 {
        return Ok(0.0);
    }
    Ok((mean(portfolio) - mean(benchmark)) / te)
}

/// Beta against a benchmark: `cov(p, b) / var(b)`.
///
/// # Errors
///
/// Returns a validation error if the series lengths differ.
pub fn beta(portfolio: &[f64], benchmark: &[f64]) -> AnalyticsResult<f64> {
    excess_returns(portfolio, benchmark)?;
    let var_b = variance(benchmark);
    if var_b == 0.0 {
        return Ok(0.0);
    }
    Ok(covariance(portfolio, benchmark)? / var_b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const P: f64 = 252.0;

    #[test]
    fn test_sharpe_ratio() {
        let returns = [0.01, -0.005, 0.002, 0.004];
        let expected = (mean(&returns) * P - 0.02) / (std_dev(&returns) * P.sqrt());
        assert_relative_eq!(sharpe_ratio(&returns, 0.02, P), expected, epsilon = 1e-12);
        assert_eq!(sharpe_ratio(&[0.01, 0.01], 0.02, P), 0.0);
    }

    #[test]
    fn test_sortino_ratio() {
        let returns = [0.02, -0.01, 0.03, -0.03, 0.0];
        let dd = (0.0005_f64).sqrt();
        let expected = (mean(&returns) * P - 0.02) / (dd * P.sqrt());
        assert_relative_eq!(sortino_ratio(&returns, 0.02, 0.0, P), expected, epsilon = 1e-12);
        assert_eq!(sortino_ratio(&[0.01, 0.02], 0.02, 0.0, P), 0.0);
    }

    #[test]
    fn test_calmar_ratio() {
        let values = [100.0, 110.0, 99.0, 105.0];
        let annual = mean(&period_returns(&values)) * P;
        // max drawdown 11 / 110 = 0.1
        assert_relative_eq!(calmar_ratio(&values, P), annual / 0.1, epsilon = 1e-9);
        assert_eq!(calmar_ratio(&[100.0, 101.0, 102.0], P), 0.0);
    }

    #[test]
    fn test_omega_ratio() {
        let returns = [0.02, -0.01, 0.03, -0.02];
        assert_relative_eq!(omega_ratio(&returns, 0.0), 0.05 / 0.03, epsilon = 1e-12);
        // no losses: fraction of gains
        assert_relative_eq!(omega_ratio(&[0.01, 0.0, 0.02, 0.03], 0.0), 0.75);
        assert_eq!(omega_ratio(&[], 0.0), 0.0);
    }

    #[test]
    fn test_information_ratio() {
        let p = [0.02, 0.01, 0.03, 0.00];
        let b = [0.01, 0.01, 0.01, 0.01];
        let te = tracking_error(&p, &b).unwrap();
        assert_relative_eq!(
            information_ratio(&p, &b).unwrap(),
            (mean(&p) - mean(&b)) / te,
            epsilon = 1e-12
        );
        assert_eq!(information_ratio(&b, &b).unwrap(), 0.0);
        assert!(information_ratio(&p, &b[..3]).unwrap_err().is_validation());
    }

    #[test]
    fn test_beta() {
        let b = [0.01, -0.02, 0.015, 0.005];
        let p: Vec<f64> = b.iter().map(|r| 2.0 * r).collect();
        assert_relative_eq!(beta(&p, &b).unwrap(), 2.0, epsilon = 1e-12);
        assert_eq!(beta(&p, &[0.0; 4]).unwrap(), 0.0);
        assert!(beta(&p, &b[..2]).is_err());
    }

    #[test]
    fn test_annualized_volatility() {
        let returns = [0.01, -0.01, 0.01, -0.01];
        assert_relative_eq!(
            annualized_volatility(&returns, P),
            std_dev(&returns) * P.sqrt(),
            epsilon = 1e-15
        );
    }
}
