//! Stress scenario definitions.
//!
//! A scenario is a set of fractional shocks keyed by asset type plus the
//! market regime around them: correlation shift, volatility multiplier,
//! expected duration and severity.

use quiver_core::AssetType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{PortfolioError, PortfolioResult};

/// Severity tag of a scenario.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    /// Routine market stress.
    Low,
    /// Significant correction.
    #[default]
    Medium,
    /// Severe crisis.
    High,
    /// Systemic crisis.
    Critical,
}

impl Severity {
    /// Returns true for `High` and `Critical`.
    #[must_use]
    pub fn is_severe(self) -> bool {
        matches!(self, Self::High | Self::Critical)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        })
    }
}

/// A stress scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StressScenario {
    /// Catalog key.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Fractional shock per asset type (`-0.3` = 30% loss).
    #[serde(default)]
    pub asset_impacts: BTreeMap<AssetType, f64>,

    /// Multiplier on cross-asset correlation (1.0 = unchanged).
    pub correlation_shift: f64,

    /// Multiplier on volatility (1.0 = unchanged).
    pub volatility_multiplier: f64,

    /// Expected duration in months.
    pub duration_months: f64,

    /// Severity tag.
    #[serde(default)]
    pub severity: Severity,
}

impl StressScenario {
    /// Creates a scenario with no shocks and an unchanged regime.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            asset_impacts: BTreeMap::new(),
            correlation_shift: 1.0,
            volatility_multiplier: 1.0,
            duration_months: 0.0,
            severity: Severity::default(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    /// Sets the shock for one asset type.
    #[must_use]
    pub fn with_impact(mut self, asset_type: AssetType, impact: f64) -> Self {
        self.asset_impacts.insert(asset_type, impact);
        self
    }

    /// Sets the correlation shift.
    #[must_use]
    pub fn with_correlation_shift(mut self, shift: f64) -> Self {
        self.correlation_shift = shift;
        self
    }

    /// Sets the volatility multiplier.
    #[must_use]
    pub fn with_volatility_multiplier(mut self, multiplier: f64) -> Self {
        self.volatility_multiplier = multiplier;
        self
    }

    /// Sets the expected duration in months.
    #[must_use]
    pub fn with_duration_months(mut self, months: f64) -> Self {
        self.duration_months = months;
        self
    }

    /// Sets the severity.
    #[must_use]
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Shock for `asset_type`; 0 when the scenario does not map it.
    #[must_use]
    pub fn impact(&self, asset_type: AssetType) -> f64 {
        self.asset_impacts.get(&asset_type).copied().unwrap_or(0.0)
    }

    /// Asset type with the most negative shock, if any shock is negative.
    #[must_use]
    pub fn most_shocked(&self) -> Option<AssetType> {
        self.asset_impacts
            .iter()
            .filter(|(_, impact)| **impact < 0.0)
            .min_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(asset_type, _)| *asset_type)
    }

    /// Checks a custom scenario.
    ///
    /// # Errors
    ///
    /// Returns a validation error if an impact is non-finite or below -1,
    /// the volatility multiplier is not positive, or the correlation shift
    /// or duration is negative.
    pub fn validate(&self) -> PortfolioResult<()> {
        if let Some((asset_type, impact)) = self
            .asset_impacts
            .iter()
            .find(|(_, i)| !i.is_finite() || **i < -1.0)
        {
            return Err(PortfolioError::validation(
                format!("asset_impacts.{asset_type}"),
                format!("{impact} must be finite and >= -1"),
            ));
        }
        if !(self.volatility_multiplier.is_finite() && self.volatility_multiplier > 0.0) {
            return Err(PortfolioError::validation(
                "volatility_multiplier",
                "must be finite and > 0",
            ));
        }
        if !(self.correlation_shift.is_finite() && self.correlation_shift >= 0.0) {
            return Err(PortfolioError::validation(
                "correlation_shift",
                "must be finite and >= 0",
            ));
        }
        if !(self.duration_months.is_finite() && self.duration_months >= 0.0) {
            return Err(PortfolioError::validation(
                "duration_months",
                "must be finite and >= 0",
            ));
        }
        Ok(())
    }
}

/// Predefined historical and hypothetical scenarios.
pub mod standard {
    use super::*;

    /// 2008 global financial crisis.
    #[must_use]
    pub fn financial_crisis_2008() -> StressScenario {
        StressScenario::new("2008_financial_crisis", "2008 Financial Crisis")
            .with_description(
                "Credit freeze and bank failures; equities lost over half their value",
            )
            .with_impact(AssetType::Equity, -0.50)
            .with_impact(AssetType::Bond, -0.10)
            .with_impact(AssetType::Derivative, -0.60)
            .with_impact(AssetType::Structured, -0.70)
            .with_impact(AssetType::Commodity, -0.35)
            .with_impact(AssetType::RealEstate, -0.40)
            .with_impact(AssetType::Alternative, -0.25)
            .with_correlation_shift(1.5)
            .with_volatility_multiplier(3.0)
            .with_duration_months(18.0)
            .with_severity(Severity::Critical)
    }

    /// 2020 COVID-19 crash.
    #[must_use]
    pub fn covid_crash_2020() -> StressScenario {
        StressScenario::new("2020_covid_crash", "2020 COVID-19 Crash")
            .with_description("Pandemic lockdowns; fast sell-off followed by a fast recovery")
            .with_impact(AssetType::Equity, -0.34)
            .with_impact(AssetType::Bond, -0.05)
            .with_impact(AssetType::Derivative, -0.40)
            .with_impact(AssetType::Structured, -0.25)
            .with_impact(AssetType::Commodity, -0.30)
            .with_impact(AssetType::RealEstate, -0.25)
            .with_impact(AssetType::Alternative, -0.15)
            .with_correlation_shift(1.4)
            .with_volatility_multiplier(4.0)
            .with_duration_months(2.0)
            .with_severity(Severity::High)
    }

    /// 2000–2002 dot-com bust.
    #[must_use]
    pub fn dot_com_bust_2000() -> StressScenario {
        StressScenario::new("2000_dot_com_bust", "2000 Dot-Com Bust")
            .with_description("Technology bubble unwinds over two and a half years")
            .with_impact(AssetType::Equity, -0.45)
            .with_impact(AssetType::Bond, 0.08)
            .with_impact(AssetType::Derivative, -0.50)
            .with_impact(AssetType::Structured, -0.20)
            .with_impact(AssetType::Alternative, -0.10)
            .with_correlation_shift(1.1)
            .with_volatility_multiplier(2.0)
            .with_duration_months(30.0)
            .with_severity(Severity::High)
    }

    /// 19 October 1987.
    #[must_use]
    pub fn black_monday_1987() -> StressScenario {
        StressScenario::new("1987_black_monday", "1987 Black Monday")
            .with_description("Single-day equity crash of over 20%")
            .with_impact(AssetType::Equity, -0.22)
            .with_impact(AssetType::Bond, 0.02)
            .with_impact(AssetType::Derivative, -0.35)
            .with_impact(AssetType::Structured, -0.15)
            .with_correlation_shift(1.8)
            .with_volatility_multiplier(5.0)
            .with_duration_months(1.0)
            .with_severity(Severity::Critical)
    }

    /// 2022 inflation-driven rate shock.
    #[must_use]
    pub fn rate_shock_2022() -> StressScenario {
        StressScenario::new("2022_rate_shock", "2022 Rate Shock")
            .with_description("Fastest hiking cycle in decades; stocks and bonds fall together")
            .with_impact(AssetType::Equity, -0.20)
            .with_impact(AssetType::Bond, -0.15)
            .with_impact(AssetType::Derivative, -0.25)
            .with_impact(AssetType::Structured, -0.12)
            .with_impact(AssetType::Commodity, 0.15)
            .with_impact(AssetType::RealEstate, -0.25)
            .with_impact(AssetType::Alternative, -0.30)
            .with_correlation_shift(1.3)
            .with_volatility_multiplier(1.8)
            .with_duration_months(12.0)
            .with_severity(Severity::High)
    }

    /// Prolonged high inflation with weak growth.
    #[must_use]
    pub fn stagflation() -> StressScenario {
        StressScenario::new("stagflation", "Stagflation")
            .with_description("Persistent inflation with stagnant growth, 1970s style")
            .with_impact(AssetType::Equity, -0.25)
            .with_impact(AssetType::Bond, -0.20)
            .with_impact(AssetType::Derivative, -0.15)
            .with_impact(AssetType::Structured, -0.15)
            .with_impact(AssetType::Cash, -0.05)
            .with_impact(AssetType::Commodity, 0.25)
            .with_impact(AssetType::RealEstate, 0.05)
            .with_correlation_shift(1.2)
            .with_volatility_multiplier(1.5)
            .with_duration_months(24.0)
            .with_severity(Severity::Medium)
    }

    /// Returns all standard scenarios.
    #[must_use]
    pub fn all() -> Vec<StressScenario> {
        vec![
            financial_crisis_2008(),
            covid_crash_2020(),
            dot_com_bust_2000(),
            black_monday_1987(),
            rate_shock_2022(),
            stagflation(),
        ]
    }

    /// Looks up a standard scenario by id.
    #[must_use]
    pub fn by_id(id: &str) -> Option<StressScenario> {
        all().into_iter().find(|s| s.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unmapped_impact_is_zero() {
        let scenario = StressScenario::new("custom", "Custom").with_impact(AssetType::Equity, -0.5);
        assert_eq!(scenario.impact(AssetType::Equity), -0.5);
        assert_eq!(scenario.impact(AssetType::Cash), 0.0);
    }

    #[test]
    fn test_most_shocked() {
        let scenario = standard::financial_crisis_2008();
        assert_eq!(scenario.most_shocked(), Some(AssetType::Structured));

        let rally = StressScenario::new("rally", "Rally").with_impact(AssetType::Equity, 0.1);
        assert_eq!(rally.most_shocked(), None);
    }

    #[test]
    fn test_validate() {
        assert!(StressScenario::new("ok", "Ok").validate().is_ok());
        assert!(StressScenario::new("x", "X")
            .with_impact(AssetType::Bond, -1.5)
            .validate()
            .is_err());
        assert!(StressScenario::new("x", "X")
            .with_impact(AssetType::Bond, f64::NAN)
            .validate()
            .is_err());
        assert!(StressScenario::new("x", "X")
            .with_volatility_multiplier(0.0)
            .validate()
            .is_err());
        assert!(StressScenario::new("x", "X")
            .with_correlation_shift(-0.1)
            .validate()
            .is_err());
        assert!(StressScenario::new("x", "X")
            .with_duration_months(f64::INFINITY)
            .validate()
            .is_err());
    }

    #[test]
    fn test_standard_scenarios() {
        let scenarios = standard::all();
        assert_eq!(scenarios.len(), 6);
        assert!(scenarios.iter().all(|s| s.validate().is_ok()));

        let mut ids: Vec<&str> = scenarios.iter().map(|s| s.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 6);

        let gfc = standard::by_id("2008_financial_crisis").unwrap();
        assert_eq!(gfc.severity, Severity::Critical);
        assert!(standard::by_id("1929_crash").is_none());
    }

    #[test]
    fn test_scenario_json_shape() {
        let json = serde_json::to_value(standard::black_monday_1987()).unwrap();
        assert_eq!(json["severity"], "CRITICAL");
        assert_eq!(json["assetImpacts"]["EQUITY"], -0.22);
        assert_eq!(json["volatilityMultiplier"], 5.0);
    }
}
