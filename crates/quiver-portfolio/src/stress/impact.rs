//! Scenario application, recovery estimates and recommendations.

use log::debug;
use quiver_config::StressConfig;
use quiver_core::{AssetType, CoreError, Holding};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::f64::consts::LN_2;

use super::scenarios::{Severity, StressScenario};
use crate::error::PortfolioResult;

/// Effect of a scenario on one holding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldingImpact {
    /// Holding name.
    pub name: String,
    /// Holding symbol.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    /// Asset type used for the shock lookup.
    pub asset_type: AssetType,
    /// Shock applied (0 if the scenario does not map the type).
    pub impact: f64,
    /// Value before the shock.
    pub original_value: f64,
    /// `original × (1 + impact)`.
    pub stressed_value: f64,
    /// `original − stressed`; negative for a gain.
    pub loss: f64,
    /// Loss as a percentage of the original value, 0 for a zero value.
    pub loss_percent: f64,
}

/// Result of applying a scenario to a set of holdings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StressResult {
    /// Scenario id.
    pub scenario_id: String,
    /// Scenario name.
    pub scenario_name: String,
    /// Scenario severity.
    pub severity: Severity,
    /// Per-holding impacts, in input order.
    pub holdings: Vec<HoldingImpact>,
    /// Total value before the shock.
    pub original_value: f64,
    /// Total value after the shock.
    pub stressed_value: f64,
    /// `original − stressed`.
    pub total_loss: f64,
    /// Total loss as a percentage of the original value, 0 for a zero value.
    pub total_loss_percent: f64,
    /// Largest single-holding loss, 0 without holdings.
    pub max_loss: f64,
    /// Mean single-holding loss, 0 without holdings.
    pub average_loss: f64,
}

impl StressResult {
    /// Returns true if the scenario reduces the total value.
    #[must_use]
    pub fn is_loss(&self) -> bool {
        self.total_loss > 0.0
    }

    /// Asset type with the largest aggregate loss, if any type lost value.
    #[must_use]
    pub fn hardest_hit(&self) -> Option<AssetType> {
        let mut by_type: BTreeMap<AssetType, f64> = BTreeMap::new();
        for h in &self.holdings {
            *by_type.entry(h.asset_type).or_insert(0.0) += h.loss;
        }
        by_type
            .into_iter()
            .filter(|(_, loss)| *loss > 0.0)
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(asset_type, _)| asset_type)
    }
}

fn percent_of(part: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        0.0
    } else {
        part / whole * 100.0
    }
}

/// Applies a scenario to holdings.
///
/// ```text
/// stressed = value × (1 + impact[asset_type])
/// loss     = value − stressed
/// ```
///
/// # Errors
///
/// Returns a validation error if the scenario is invalid or a holding value
/// is not finite (attributed to the holding's index).
pub fn apply_scenario(
    holdings: &[Holding],
    scenario: &StressScenario,
) -> PortfolioResult<StressResult> {
    scenario.validate()?;

    let mut impacts = Vec::with_capacity(holdings.len());
    for (index, holding) in holdings.iter().enumerate() {
        if !holding.value.is_finite() {
            return Err(CoreError::invalid_row(index, "value", "must be finite").into());
        }
        let impact = scenario.impact(holding.asset_type);
        let stressed_value = holding.value * (1.0 + impact);
        let loss = holding.value - stressed_value;
        impacts.push(HoldingImpact {
            name: holding.name.clone(),
            symbol: holding.symbol.clone(),
            asset_type: holding.asset_type,
            impact,
            original_value: holding.value,
            stressed_value,
            loss,
            loss_percent: percent_of(loss, holding.value),
        });
    }

    let original_value: f64 = impacts.iter().map(|h| h.original_value).sum();
    let stressed_value: f64 = impacts.iter().map(|h| h.stressed_value).sum();
    let total_loss = original_value - stressed_value;
    let max_loss = impacts
        .iter()
        .map(|h| h.loss)
        .reduce(f64::max)
        .unwrap_or(0.0);
    let average_loss = if impacts.is_empty() {
        0.0
    } else {
        total_loss / impacts.len() as f64
    };

    Ok(StressResult {
        scenario_id: scenario.id.clone(),
        scenario_name: scenario.name.clone(),
        severity: scenario.severity,
        holdings: impacts,
        original_value,
        stressed_value,
        total_loss,
        total_loss_percent: percent_of(total_loss, original_value),
        max_loss,
        average_loss,
    })
}

/// Heuristic recovery estimate for a scenario.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecoveryEstimate {
    /// Estimated trading days to recover.
    pub days: f64,
    /// Confidence in the estimate, in percent.
    pub confidence_percent: f64,
}

/// Estimates recovery time from the scenario's duration and volatility.
///
/// ```text
/// days       = max(min_days, duration × days_per_month × ln 2 / ln(vm + 1))
/// confidence = clamp(100 − (vm − 1) × 20, 10, 95)
/// ```
#[must_use]
pub fn estimate_recovery(scenario: &StressScenario, config: &StressConfig) -> RecoveryEstimate {
    let vm = scenario.volatility_multiplier;
    let raw = scenario.duration_months * config.trading_days_per_month * LN_2 / (vm + 1.0).ln();
    let days = if raw.is_finite() {
        raw.max(config.min_recovery_days)
    } else {
        config.min_recovery_days
    };

    RecoveryEstimate {
        days,
        confidence_percent: (100.0 - (vm - 1.0) * 20.0).clamp(10.0, 95.0),
    }
}

/// What a recommendation addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecommendationKind {
    /// Correlations rise; diversification may fail.
    Diversification,
    /// Volatility spikes; hold liquidity.
    CashReserve,
    /// Severe scenario; reduce the hardest-hit exposure.
    Rebalancing,
    /// Large total loss; consider protection.
    Hedging,
}

/// A qualitative recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    /// Topic.
    pub kind: RecommendationKind,
    /// Human-readable advice.
    pub message: String,
}

impl Recommendation {
    fn new(kind: RecommendationKind, message: String) -> Self {
        Self { kind, message }
    }
}

/// Recommendations triggered by a scenario and its result.
///
/// Thresholds come from [`StressConfig`]: correlation shift above
/// `correlation_warning`, volatility multiplier above
/// `cash_reserve_volatility`, HIGH or CRITICAL severity, and total loss
/// above `hedging_loss_pct`.
#[must_use]
pub fn recommendations(
    scenario: &StressScenario,
    result: &StressResult,
    config: &StressConfig,
) -> Vec<Recommendation> {
    let mut out = Vec::new();

    if scenario.correlation_shift > config.correlation_warning {
        out.push(Recommendation::new(
            RecommendationKind::Diversification,
            format!(
                "Correlations rise {:.1}x in this scenario; diversification benefits may \
                 disappear. Add assets that historically decouple in crises.",
                scenario.correlation_shift
            ),
        ));
    }

    if scenario.volatility_multiplier > config.cash_reserve_volatility {
        out.push(Recommendation::new(
            RecommendationKind::CashReserve,
            format!(
                "Volatility rises {:.1}x; keep a cash reserve to avoid forced selling.",
                scenario.volatility_multiplier
            ),
        ));
    }

    if scenario.severity.is_severe() {
        let message = match result.hardest_hit().or_else(|| scenario.most_shocked()) {
            Some(asset_type) => format!(
                "{} scenario: {asset_type} exposure is hit hardest; consider rebalancing \
                 away from it.",
                scenario.severity
            ),
            None => format!(
                "{} scenario: review allocation limits and rebalancing rules.",
                scenario.severity
            ),
        };
        out.push(Recommendation::new(RecommendationKind::Rebalancing, message));
    }

    if result.total_loss_percent > config.hedging_loss_pct {
        out.push(Recommendation::new(
            RecommendationKind::Hedging,
            format!(
                "Estimated loss of {:.1}% exceeds {:.1}%; consider protective hedges.",
                result.total_loss_percent, config.hedging_loss_pct
            ),
        ));
    }

    out
}

/// Full stress test of one scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StressReport {
    /// Loss figures.
    pub result: StressResult,
    /// Recovery estimate.
    pub recovery: RecoveryEstimate,
    /// Triggered recommendations.
    pub recommendations: Vec<Recommendation>,
}

/// Applies a scenario, then derives the recovery estimate and
/// recommendations.
///
/// # Errors
///
/// Same conditions as [`apply_scenario`].
pub fn stress_test(
    holdings: &[Holding],
    scenario: &StressScenario,
    config: &StressConfig,
) -> PortfolioResult<StressReport> {
    let result = apply_scenario(holdings, scenario)?;
    let recovery = estimate_recovery(scenario, config);
    let recommendations = recommendations(scenario, &result, config);

    debug!(
        "stress scenario {}: loss {:.2} ({:.2}%), recovery {:.0} days, {} recommendations",
        scenario.id,
        result.total_loss,
        result.total_loss_percent,
        recovery.days,
        recommendations.len()
    );

    Ok(StressReport {
        result,
        recovery,
        recommendations,
    })
}

/// Report with the largest total loss.
#[must_use]
pub fn worst_case(reports: &[StressReport]) -> Option<&StressReport> {
    reports.iter().max_by(|a, b| {
        a.result
            .total_loss
            .partial_cmp(&b.result.total_loss)
            .unwrap_or(std::cmp::Ordering::Equal)
    })
}

/// Report with the smallest total loss.
#[must_use]
pub fn best_case(reports: &[StressReport]) -> Option<&StressReport> {
    reports.iter().min_by(|a, b| {
        a.result
            .total_loss
            .partial_cmp(&b.result.total_loss)
            .unwrap_or(std::cmp::Ordering::Equal)
    })
}

/// Summary of several stress tests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StressSummary {
    /// Number of scenarios tested.
    pub scenario_count: usize,
    /// Worst-case scenario id.
    pub worst_scenario: String,
    /// Worst-case loss.
    pub worst_loss: f64,
    /// Worst-case loss percentage.
    pub worst_loss_percent: f64,
    /// Best-case scenario id.
    pub best_scenario: String,
    /// Best-case loss.
    pub best_loss: f64,
    /// Best-case loss percentage.
    pub best_loss_percent: f64,
    /// Mean loss across scenarios.
    pub average_loss: f64,
    /// Mean loss percentage across scenarios.
    pub average_loss_percent: f64,
}

/// Summarizes stress reports; `None` for an empty slice.
#[must_use]
pub fn summarize_results(reports: &[StressReport]) -> Option<StressSummary> {
    let worst = worst_case(reports)?;
    let best = best_case(reports)?;
    let n = reports.len() as f64;

    Some(StressSummary {
        scenario_count: reports.len(),
        worst_scenario: worst.result.scenario_id.clone(),
        worst_loss: worst.result.total_loss,
        worst_loss_percent: worst.result.total_loss_percent,
        best_scenario: best.result.scenario_id.clone(),
        best_loss: best.result.total_loss,
        best_loss_percent: best.result.total_loss_percent,
        average_loss: reports.iter().map(|r| r.result.total_loss).sum::<f64>() / n,
        average_loss_percent: reports
            .iter()
            .map(|r| r.result.total_loss_percent)
            .sum::<f64>()
            / n,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stress::standard;
    use approx::assert_relative_eq;

    fn equity_scenario() -> StressScenario {
        StressScenario::new("equity_down", "Equity Down").with_impact(AssetType::Equity, -0.5)
    }

    #[test]
    fn test_single_equity_holding() {
        let holdings = vec![Holding::new("Index fund", AssetType::Equity, 1000.0)];
        let result = apply_scenario(&holdings, &equity_scenario()).unwrap();

        let h = &result.holdings[0];
        assert_eq!(h.stressed_value, 500.0);
        assert_eq!(h.loss, 500.0);
        assert_eq!(h.loss_percent, 50.0);
        assert_eq!(result.total_loss, 500.0);
        assert_eq!(result.total_loss_percent, 50.0);
        assert_eq!(result.max_loss, 500.0);
        assert_eq!(result.average_loss, 500.0);
    }

    #[test]
    fn test_unmapped_and_zero_value_holdings() {
        let holdings = vec![
            Holding::new("Stocks", AssetType::Equity, 600.0),
            Holding::new("Cash", AssetType::Cash, 400.0),
            Holding::new("Worthless", AssetType::Equity, 0.0),
        ];
        let result = apply_scenario(&holdings, &equity_scenario()).unwrap();

        assert_eq!(result.holdings[1].loss, 0.0);
        assert_eq!(result.holdings[2].loss_percent, 0.0);
        assert_relative_eq!(result.total_loss, 300.0);
        assert_relative_eq!(result.total_loss_percent, 30.0);
        assert_relative_eq!(result.average_loss, 100.0);
        assert_eq!(result.hardest_hit(), Some(AssetType::Equity));
    }

    #[test]
    fn test_empty_holdings() {
        let result = apply_scenario(&[], &equity_scenario()).unwrap();
        assert_eq!(result.total_loss, 0.0);
        assert_eq!(result.total_loss_percent, 0.0);
        assert_eq!(result.max_loss, 0.0);
        assert_eq!(result.average_loss, 0.0);
        assert!(!result.is_loss());
    }

    #[test]
    fn test_invalid_inputs() {
        let bad_value = vec![
            Holding::new("a", AssetType::Bond, 1.0),
            Holding::new("b", AssetType::Bond, f64::NAN),
        ];
        let err = apply_scenario(&bad_value, &equity_scenario()).unwrap_err();
        assert!(err.is_validation());

        let bad_scenario = equity_scenario().with_volatility_multiplier(-1.0);
        assert!(apply_scenario(&[], &bad_scenario).is_err());
    }

    #[test]
    fn test_recovery_estimate() {
        let config = StressConfig::default();

        // 18 × 21 × ln2 / ln4 = 189
        let gfc = estimate_recovery(&standard::financial_crisis_2008(), &config);
        assert_relative_eq!(gfc.days, 189.0, epsilon = 1e-9);
        assert_relative_eq!(gfc.confidence_percent, 60.0);

        let blip = StressScenario::new("blip", "Blip")
            .with_duration_months(0.1)
            .with_volatility_multiplier(1.0);
        let est = estimate_recovery(&blip, &config);
        assert_eq!(est.days, 10.0);
        assert_eq!(est.confidence_percent, 95.0);

        let wild = blip.with_volatility_multiplier(9.0);
        assert_eq!(estimate_recovery(&wild, &config).confidence_percent, 10.0);
    }

    #[test]
    fn test_recommendations() {
        let config = StressConfig::default();
        let holdings = vec![
            Holding::new("Stocks", AssetType::Equity, 500.0),
            Holding::new("Notes", AssetType::Structured, 500.0),
        ];
        let scenario = standard::financial_crisis_2008();
        let result = apply_scenario(&holdings, &scenario).unwrap();
        let recs = recommendations(&scenario, &result, &config);
        let kinds: Vec<RecommendationKind> = recs.iter().map(|r| r.kind).collect();

        assert_eq!(
            kinds,
            vec![
                RecommendationKind::Diversification,
                RecommendationKind::CashReserve,
                RecommendationKind::Rebalancing,
                RecommendationKind::Hedging,
            ]
        );
        assert!(recs[2].message.contains("STRUCTURED"));

        let calm = StressScenario::new("calm", "Calm").with_severity(Severity::Low);
        let result = apply_scenario(&holdings, &calm).unwrap();
        assert!(recommendations(&calm, &result, &config).is_empty());
    }

    #[test]
    fn test_summarize() {
        let config = StressConfig::default();
        let holdings = vec![Holding::new("Stocks", AssetType::Equity, 1000.0)];
        let reports: Vec<StressReport> = standard::all()
            .iter()
            .map(|s| stress_test(&holdings, s, &config).unwrap())
            .collect();

        let summary = summarize_results(&reports).unwrap();
        assert_eq!(summary.scenario_count, 6);
        assert_eq!(summary.worst_scenario, "2008_financial_crisis");
        assert_relative_eq!(summary.worst_loss, 500.0, epsilon = 1e-9);
        assert_eq!(summary.best_scenario, "2022_rate_shock");
        assert!(summary.average_loss <= summary.worst_loss);
        assert!(summarize_results(&[]).is_none());
    }
}
