//! Sensitivity sweeps and correlation shocks.

use quiver_config::StressConfig;
use quiver_core::{AssetType, Holding};
use serde::{Deserialize, Serialize};

use super::impact::{stress_test, StressReport};
use super::scenarios::{Severity, StressScenario};
use crate::error::{PortfolioError, PortfolioResult};

/// One step of a sensitivity sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensitivityPoint {
    /// Shock applied to the swept asset type.
    pub impact: f64,
    /// Total value after the shock.
    pub stressed_value: f64,
    /// Total loss.
    pub total_loss: f64,
    /// Total loss percentage.
    pub total_loss_percent: f64,
    /// Recovery estimate in days.
    pub recovery_days: f64,
}

/// Sweeps the shock of one asset type from `from` to `to` in `steps`
/// evenly spaced points (both ends included), re-running the full stress
/// pipeline on `base` at each step.
///
/// One step evaluates `from` only; zero steps yields nothing.
///
/// # Errors
///
/// Returns a validation error if the bounds are not finite or a swept
/// shock is invalid (below -1).
pub fn sensitivity_analysis(
    holdings: &[Holding],
    base: &StressScenario,
    asset_type: AssetType,
    from: f64,
    to: f64,
    steps: usize,
    config: &StressConfig,
) -> PortfolioResult<Vec<SensitivityPoint>> {
    if !(from.is_finite() && to.is_finite()) {
        return Err(PortfolioError::validation(
            "sensitivity range",
            "bounds must be finite",
        ));
    }

    let step = if steps > 1 {
        (to - from) / (steps - 1) as f64
    } else {
        0.0
    };

    (0..steps)
        .map(|i| {
            let impact = from + step * i as f64;
            let scenario = base.clone().with_impact(asset_type, impact);
            let report = stress_test(holdings, &scenario, config)?;
            Ok(SensitivityPoint {
                impact,
                stressed_value: report.result.stressed_value,
                total_loss: report.result.total_loss,
                total_loss_percent: report.result.total_loss_percent,
                recovery_days: report.recovery.days,
            })
        })
        .collect()
}

/// Every asset type moves down together.
#[must_use]
pub fn perfect_correlation_scenario() -> StressScenario {
    let shocked = AssetType::ALL
        .into_iter()
        .filter(|t| *t != AssetType::Cash)
        .fold(
            StressScenario::new("perfect_correlation", "Perfect Correlation"),
            |s, t| s.with_impact(t, -0.25),
        );
    shocked
        .with_description("All risky assets fall together; diversification fails")
        .with_correlation_shift(2.0)
        .with_volatility_multiplier(2.5)
        .with_duration_months(6.0)
        .with_severity(Severity::High)
}

/// Asset types decouple and partly offset each other.
#[must_use]
pub fn correlation_collapse_scenario() -> StressScenario {
    StressScenario::new("correlation_collapse", "Correlation Collapse")
        .with_description("Cross-asset correlations break down; losses are partly offset")
        .with_impact(AssetType::Equity, -0.15)
        .with_impact(AssetType::Bond, 0.05)
        .with_impact(AssetType::Derivative, -0.10)
        .with_impact(AssetType::Structured, -0.05)
        .with_impact(AssetType::Commodity, 0.05)
        .with_impact(AssetType::RealEstate, -0.05)
        .with_correlation_shift(0.0)
        .with_volatility_multiplier(1.5)
        .with_duration_months(3.0)
        .with_severity(Severity::Medium)
}

/// Outcome of the two correlation extremes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrelationShockResult {
    /// Everything falls together.
    pub perfect_correlation: StressReport,
    /// Correlations break down.
    pub correlation_collapse: StressReport,
    /// `perfect.total_loss − collapse.total_loss`.
    pub loss_spread: f64,
}

/// Runs both correlation extremes to bound diversification-failure risk.
///
/// # Errors
///
/// Same conditions as [`stress_test`].
pub fn correlation_shock(
    holdings: &[Holding],
    config: &StressConfig,
) -> PortfolioResult<CorrelationShockResult> {
    let perfect_correlation = stress_test(holdings, &perfect_correlation_scenario(), config)?;
    let correlation_collapse = stress_test(holdings, &correlation_collapse_scenario(), config)?;
    let loss_spread =
        perfect_correlation.result.total_loss - correlation_collapse.result.total_loss;

    Ok(CorrelationShockResult {
        perfect_correlation,
        correlation_collapse,
        loss_spread,
    })
}
