//! Stress tester service object.

use quiver_config::{StressConfig, Validate};
use quiver_core::{AssetType, Holding};

use super::analysis::{
    correlation_shock, sensitivity_analysis, CorrelationShockResult, SensitivityPoint,
};
use super::impact::{stress_test, summarize_results, StressReport, StressSummary};
use super::scenarios::{standard, StressScenario};
use crate::error::{PortfolioError, PortfolioResult};

/// Runs predefined and custom scenarios against holdings.
///
/// Holds only thresholds; every method is a pure function of its inputs.
///
/// # Example
///
/// ```rust
/// use quiver_core::{AssetType, Holding};
/// use quiver_portfolio::stress::StressTester;
///
/// let tester = StressTester::default();
/// let holdings = vec![Holding::new("Stocks", AssetType::Equity, 1000.0)];
///
/// let report = tester.run(&holdings, "2008_financial_crisis").unwrap();
/// assert_eq!(report.result.stressed_value, 500.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct StressTester {
    config: StressConfig,
}

impl StressTester {
    /// Creates a tester.
    ///
    /// # Errors
    ///
    /// Returns `PortfolioError::Config` if the thresholds are invalid.
    pub fn new(config: StressConfig) -> PortfolioResult<Self> {
        config.validate_or_error()?;
        Ok(Self { config })
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &StressConfig {
        &self.config
    }

    /// Runs the standard scenario with id `id`.
    ///
    /// # Errors
    ///
    /// Returns `PortfolioError::UnknownScenario` for an unknown id, or a
    /// validation error for an invalid holding.
    pub fn run(&self, holdings: &[Holding], id: &str) -> PortfolioResult<StressReport> {
        let scenario = standard::by_id(id).ok_or_else(|| PortfolioError::unknown_scenario(id))?;
        self.run_scenario(holdings, &scenario)
    }

    /// Runs a custom scenario.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an invalid scenario or holding.
    pub fn run_scenario(
        &self,
        holdings: &[Holding],
        scenario: &StressScenario,
    ) -> PortfolioResult<StressReport> {
        stress_test(holdings, scenario, &self.config)
    }

    /// Runs every standard scenario, in catalog order.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an invalid holding.
    pub fn run_all(&self, holdings: &[Holding]) -> PortfolioResult<Vec<StressReport>> {
        standard::all()
            .iter()
            .map(|scenario| self.run_scenario(holdings, scenario))
            .collect()
    }

    /// Sweeps one asset type's shock; see [`sensitivity_analysis`].
    ///
    /// # Errors
    ///
    /// Same conditions as [`sensitivity_analysis`].
    pub fn sensitivity(
        &self,
        holdings: &[Holding],
        base: &StressScenario,
        asset_type: AssetType,
        from: f64,
        to: f64,
        steps: usize,
    ) -> PortfolioResult<Vec<SensitivityPoint>> {
        sensitivity_analysis(holdings, base, asset_type, from, to, steps, &self.config)
    }

    /// Runs both correlation extremes; see [`correlation_shock`].
    ///
    /// # Errors
    ///
    /// Same conditions as [`correlation_shock`].
    pub fn correlation_shock(
        &self,
        holdings: &[Holding],
    ) -> PortfolioResult<CorrelationShockResult> {
        correlation_shock(holdings, &self.config)
    }

    /// Summarizes reports; `None` for an empty slice.
    #[must_use]
    pub fn summarize(&self, reports: &[StressReport]) -> Option<StressSummary> {
        summarize_results(reports)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn holdings() -> Vec<Holding> {
        vec![
            Holding::new("Stocks", AssetType::Equity, 7000.0),
            Holding::new("Bonds", AssetType::Bond, 2000.0),
            Holding::new("Cash", AssetType::Cash, 1000.0),
        ]
    }

    #[test]
    fn test_unknown_scenario() {
        let err = StressTester::default().run(&holdings(), "1929_crash").unwrap_err();
        assert!(matches!(err, PortfolioError::UnknownScenario { ref id } if id == "1929_crash"));
    }

    #[test]
    fn test_rejects_invalid_thresholds() {
        let config = StressConfig {
            trading_days_per_month: 0.0,
            ..StressConfig::default()
        };
        assert!(StressTester::new(config).is_err());
    }

    #[test]
    fn test_run_all_and_summarize() {
        let tester = StressTester::default();
        let reports = tester.run_all(&holdings()).unwrap();
        assert_eq!(reports.len(), standard::all().len());
        assert_eq!(reports[0].result.scenario_id, "2008_financial_crisis");

        let summary = tester.summarize(&reports).unwrap();
        assert_eq!(summary.scenario_count, reports.len());
        assert!(summary.worst_loss >= summary.average_loss);
        assert!(summary.average_loss >= summary.best_loss);
    }

    #[test]
    fn test_custom_threshold_changes_recommendations() {
        let strict = StressTester::new(StressConfig::default().with_hedging_loss_pct(5.0)).unwrap();
        let report = strict.run(&holdings(), "2022_rate_shock").unwrap();
        assert!(report
            .recommendations
            .iter()
            .any(|r| r.kind == crate::stress::RecommendationKind::Hedging));
    }
}
