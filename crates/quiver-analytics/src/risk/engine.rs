//! Risk engine service object and the bundled risk report.

use log::{debug, warn};
use quiver_config::{RiskConfig, Validate};
use quiver_math::rounding::round2;
use quiver_math::sampling::{resolve_seed, rng_from_seed};
use quiver_math::statistics::{excess_kurtosis, mean, skewness};
use serde::{Deserialize, Serialize};

use super::drawdown::{drawdown_metrics, recovery_factor, DrawdownMetrics};
use super::ratios::{
    annualized_volatility, beta, calmar_ratio, information_ratio, omega_ratio, sharpe_ratio,
    sortino_ratio, tracking_error,
};
use super::var::{conditional_var, historical_var, monte_carlo_var, parametric_var, VarMethod};
use crate::error::AnalyticsResult;
use crate::returns::period_returns;

/// Every risk metric of one value series, rounded for presentation.
///
/// Percentages and ratios are rounded to 2 decimals (half away from zero on
/// the decimal value). Benchmark-relative fields are `None` unless a
/// benchmark was supplied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskReport {
    /// Number of period returns analysed.
    pub observations: usize,
    /// Whether the sample met the minimum size for tail metrics.
    pub sample_sufficient: bool,
    /// Confidence level used for VaR/CVaR.
    pub confidence_level: f64,
    /// Seed used for the Monte Carlo VaR draws.
    pub seed: u64,
    /// Mean period return × periods per year, in percent.
    pub annualized_return_pct: f64,
    /// Annualized volatility, in percent.
    pub annualized_volatility_pct: f64,
    /// Parametric VaR, in percent.
    pub parametric_var: f64,
    /// Historical VaR, in percent.
    pub historical_var: f64,
    /// Monte Carlo VaR, in percent.
    pub monte_carlo_var: f64,
    /// Historical CVaR, in percent.
    pub cvar: f64,
    /// Annualized Sharpe ratio.
    pub sharpe_ratio: f64,
    /// Annualized Sortino ratio.
    pub sortino_ratio: f64,
    /// Calmar ratio.
    pub calmar_ratio: f64,
    /// Omega ratio at the downside target.
    pub omega_ratio: f64,
    /// Maximum drawdown, in percent.
    pub max_drawdown_pct: f64,
    /// Longest underwater run, in periods.
    pub max_drawdown_duration: usize,
    /// Whether the series ends below its peak.
    pub is_underwater: bool,
    /// Underwater run at the end of the series, in periods.
    pub current_drawdown_duration: usize,
    /// Ulcer index.
    pub ulcer_index: f64,
    /// Recovery factor.
    pub recovery_factor: f64,
    /// Sample skewness of the period returns.
    pub skewness: f64,
    /// Sample excess kurtosis of the period returns.
    pub excess_kurtosis: f64,
    /// Information ratio against the benchmark.
    pub information_ratio: Option<f64>,
    /// Beta against the benchmark.
    pub beta: Option<f64>,
    /// Periodic tracking error against the benchmark, in percent.
    pub tracking_error_pct: Option<f64>,
}

/// Risk metrics engine.
///
/// Holds only configuration; every method is a pure function of its
/// inputs (plus the configured seed for Monte Carlo draws).
///
/// # Example
///
/// ```rust
/// use quiver_analytics::risk::RiskEngine;
/// use quiver_config::RiskConfig;
///
/// let engine = RiskEngine::new(RiskConfig::default().with_seed(7)).unwrap();
/// let values: Vec<f64> = (0..60).map(|i| 100.0 + (f64::from(i) * 0.7).sin() * 3.0).collect();
/// let report = engine.report(&values);
/// assert_eq!(report.observations, 59);
/// assert!(report.sample_sufficient);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RiskEngine {
    config: RiskConfig,
}

impl RiskEngine {
    /// Creates an engine after validating the configuration.
    pub fn new(config: RiskConfig) -> AnalyticsResult<Self> {
        config.validate_or_error()?;
        Ok(Self { config })
    }

    /// The engine configuration.
    #[must_use]
    pub fn config(&self) -> &RiskConfig {
        &self.config
    }

    fn periods(&self) -> f64 {
        self.config.periods_per_year()
    }

    /// Parametric VaR of periodic returns, in percent.
    #[must_use]
    pub fn parametric_var(&self, returns: &[f64]) -> f64 {
        parametric_var(
            returns,
            self.config.confidence_level,
            self.config.min_sample_size,
        )
    }

    /// Historical VaR of periodic returns, in percent.
    #[must_use]
    pub fn historical_var(&self, returns: &[f64]) -> f64 {
        historical_var(
            returns,
            self.config.confidence_level,
            self.config.min_sample_size,
        )
    }

    /// Monte Carlo VaR of periodic returns, in percent, using the
    /// configured seed.
    #[must_use]
    pub fn monte_carlo_var(&self, returns: &[f64]) -> f64 {
        let mut rng = rng_from_seed(self.config.seed);
        self.monte_carlo_var_with(returns, &mut rng)
    }

    fn monte_carlo_var_with(&self, returns: &[f64], rng: &mut rand::rngs::StdRng) -> f64 {
        monte_carlo_var(
            returns,
            self.config.confidence_level,
            self.config.monte_carlo_simulations,
            self.config.min_sample_size,
            rng,
        )
    }

    /// VaR of periodic returns by `method`, in percent.
    #[must_use]
    pub fn var(&self, method: VarMethod, returns: &[f64]) -> f64 {
        match method {
            VarMethod::Parametric => self.parametric_var(returns),
            VarMethod::Historical => self.historical_var(returns),
            VarMethod::MonteCarlo => self.monte_carlo_var(returns),
        }
    }

    /// Historical CVaR of periodic returns, in percent.
    #[must_use]
    pub fn cvar(&self, returns: &[f64]) -> f64 {
        conditional_var(
            returns,
            self.config.confidence_level,
            self.config.min_sample_size,
        )
    }

    /// Annualized Sharpe ratio.
    #[must_use]
    pub fn sharpe_ratio(&self, returns: &[f64]) -> f64 {
        sharpe_ratio(returns, self.config.risk_free_rate, self.periods())
    }

    /// Annualized Sortino ratio at the configured downside target.
    #[must_use]
    pub fn sortino_ratio(&self, returns: &[f64]) -> f64 {
        sortino_ratio(
            returns,
            self.config.risk_free_rate,
            self.config.downside_target,
            self.periods(),
        )
    }

    /// Calmar ratio of a value series.
    #[must_use]
    pub fn calmar_ratio(&self, values: &[f64]) -> f64 {
        calmar_ratio(values, self.periods())
    }

    /// Omega ratio at the configured downside target.
    #[must_use]
    pub fn omega_ratio(&self, returns: &[f64]) -> f64 {
        omega_ratio(returns, self.config.downside_target)
    }

    /// Information ratio against benchmark returns.
    pub fn information_ratio(&self, returns: &[f64], benchmark: &[f64]) -> AnalyticsResult<f64> {
        information_ratio(returns, benchmark)
    }

    /// Drawdown statistics of a value series.
    #[must_use]
    pub fn drawdown(&self, values: &[f64]) -> DrawdownMetrics {
        drawdown_metrics(values)
    }

    /// Recovery factor of a value series.
    #[must_use]
    pub fn recovery_factor(&self, values: &[f64]) -> f64 {
        recovery_factor(values)
    }

    /// Full risk report of a value series.
    #[must_use]
    pub fn report(&self, values: &[f64]) -> RiskReport {
        self.build_report(values, &period_returns(values))
    }

    /// Full risk report including benchmark-relative metrics.
    ///
    /// `benchmark_returns` must align with the period returns of `values`.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the benchmark length differs from the
    /// number of period returns.
    pub fn report_against(
        &self,
        values: &[f64],
        benchmark_returns: &[f64],
    ) -> AnalyticsResult<RiskReport> {
        let returns = period_returns(values);
        let information = information_ratio(&returns, benchmark_returns)?;
        let beta = beta(&returns, benchmark_returns)?;
        let tracking = tracking_error(&returns, benchmark_returns)?;

        let mut report = self.build_report(values, &returns);
        report.information_ratio = Some(round2(information));
        report.beta = Some(round2(beta));
        report.tracking_error_pct = Some(round2(tracking * 100.0));
        Ok(report)
    }

    fn build_report(&self, values: &[f64], returns: &[f64]) -> RiskReport {
        let sample_sufficient = returns.len() >= self.config.min_sample_size;
        if !sample_sufficient {
            warn!(
                "risk report: {} returns below minimum sample size {}; tail metrics set to 0",
                returns.len(),
                self.config.min_sample_size
            );
        }

        let seed = resolve_seed(self.config.seed);
        let mut rng = rng_from_seed(Some(seed));
        let drawdown = drawdown_metrics(values);

        let report = RiskReport {
            observations: returns.len(),
            sample_sufficient,
            confidence_level: self.config.confidence_level,
            seed,
            annualized_return_pct: round2(mean(returns) * self.periods() * 100.0),
            annualized_volatility_pct: round2(
                annualized_volatility(returns, self.periods()) * 100.0,
            ),
            parametric_var: round2(self.var(VarMethod::Parametric, returns)),
            historical_var: round2(self.var(VarMethod::Historical, returns)),
            monte_carlo_var: round2(self.monte_carlo_var_with(returns, &mut rng)),
            cvar: round2(self.cvar(returns)),
            sharpe_ratio: round2(self.sharpe_ratio(returns)),
            sortino_ratio: round2(self.sortino_ratio(returns)),
            calmar_ratio: round2(self.calmar_ratio(values)),
            omega_ratio: round2(self.omega_ratio(returns)),
            max_drawdown_pct: round2(drawdown.max_drawdown_pct),
            max_drawdown_duration: drawdown.max_duration,
            is_underwater: drawdown.is_underwater,
            current_drawdown_duration: drawdown.current_duration,
            ulcer_index: round2(drawdown.ulcer_index),
            recovery_factor: round2(recovery_factor(values)),
            skewness: round2(skewness(returns)),
            excess_kurtosis: round2(excess_kurtosis(returns)),
            information_ratio: None,
            beta: None,
            tracking_error_pct: None,
        };

        debug!(
            "risk report: n={}, hVaR={}%, CVaR={}%, maxDD={}%",
            report.observations, report.historical_var, report.cvar, report.max_drawdown_pct
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wave(n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| 100.0 * (1.0 + 0.002 * i as f64) + (i as f64 * 0.9).sin() * 2.0)
            .collect()
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = RiskConfig::default().with_confidence_level(1.5);
        assert!(RiskEngine::new(config).unwrap_err().is_validation());
    }

    #[test]
    fn test_report_is_reproducible_with_seed() {
        let engine = RiskEngine::new(RiskConfig::default().with_seed(42)).unwrap();
        let values = wave(120);
        let a = engine.report(&values);
        let b = engine.report(&values);
        assert_eq!(a, b);
        assert_eq!(a.seed, 42);
        assert_eq!(a.observations, 119);
        assert!(a.sample_sufficient);
        assert!(a.historical_var > 0.0);
        assert!(a.cvar >= a.historical_var);
        assert!(a.information_ratio.is_none());
    }

    #[test]
    fn test_report_values_are_rounded() {
        let engine = RiskEngine::new(RiskConfig::default().with_seed(1)).unwrap();
        let report = engine.report(&wave(80));
        for value in [
            report.parametric_var,
            report.historical_var,
            report.sharpe_ratio,
            report.ulcer_index,
            report.max_drawdown_pct,
        ] {
            assert_eq!(round2(value), value);
        }
    }

    #[test]
    fn test_short_sample_zeroes_tail_metrics() {
        let engine = RiskEngine::default();
        let report = engine.report(&wave(10));
        assert!(!report.sample_sufficient);
        assert_eq!(report.parametric_var, 0.0);
        assert_eq!(report.historical_var, 0.0);
        assert_eq!(report.monte_carlo_var, 0.0);
        assert_eq!(report.cvar, 0.0);
    }

    #[test]
    fn test_report_against_benchmark() {
        let engine = RiskEngine::new(RiskConfig::default().with_seed(3)).unwrap();
        let values = wave(61);
        let benchmark = vec![0.0; 60];
        let report = engine.report_against(&values, &benchmark).unwrap();
        assert!(report.information_ratio.is_some());
        assert_eq!(report.beta, Some(0.0));
        assert!(report.tracking_error_pct.unwrap() > 0.0);

        assert!(engine.report_against(&values, &benchmark[..10]).is_err());
    }

    #[test]
    fn test_var_dispatches_by_method() {
        let engine = RiskEngine::new(RiskConfig::default().with_seed(9)).unwrap();
        let returns = period_returns(&wave(120));
        assert_eq!(
            engine.var(VarMethod::Parametric, &returns),
            engine.parametric_var(&returns)
        );
        assert_eq!(
            engine.var(VarMethod::Historical, &returns),
            engine.historical_var(&returns)
        );
        assert_eq!(
            engine.var(VarMethod::MonteCarlo, &returns),
            engine.monte_carlo_var(&returns)
        );
        assert!(engine.var(VarMethod::Historical, &returns) > 0.0);
    }
}
