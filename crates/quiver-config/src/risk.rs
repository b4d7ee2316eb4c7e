//! Risk metric configuration.

use serde::{Deserialize, Serialize};

use crate::error::{check_finite, check_positive, Validate, ValidationError};

/// Configuration for the risk metrics engine.
///
/// Every field has a serde default, so a partial JSON document such as
/// `{"confidence_level": 0.99}` deserializes into a complete config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskConfig {
    /// Annual risk-free rate used by Sharpe and Sortino (fraction).
    #[serde(default = "default_risk_free_rate")]
    pub risk_free_rate: f64,

    /// Periods per year used for annualization.
    #[serde(default = "default_trading_days")]
    pub trading_days_per_year: u32,

    /// Confidence level for VaR and CVaR.
    #[serde(default = "default_confidence_level")]
    pub confidence_level: f64,

    /// Number of draws for Monte Carlo VaR.
    #[serde(default = "default_simulations")]
    pub monte_carlo_simulations: usize,

    /// Minimum number of returns before VaR/CVaR are computed.
    #[serde(default = "default_min_sample_size")]
    pub min_sample_size: usize,

    /// Target return for downside deviation, Sortino and Omega.
    #[serde(default)]
    pub downside_target: f64,

    /// Random seed for reproducibility (None = system entropy).
    #[serde(default)]
    pub seed: Option<u64>,
}

pub(crate) fn default_risk_free_rate() -> f64 {
    0.02
}

pub(crate) fn default_trading_days() -> u32 {
    252
}

fn default_confidence_level() -> f64 {
    0.95
}

fn default_simulations() -> usize {
    10_000
}

fn default_min_sample_size() -> usize {
    30
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            risk_free_rate: default_risk_free_rate(),
            trading_days_per_year: default_trading_days(),
            confidence_level: default_confidence_level(),
            monte_carlo_simulations: default_simulations(),
            min_sample_size: default_min_sample_size(),
            downside_target: 0.0,
            seed: None,
        }
    }
}

impl RiskConfig {
    /// Creates a config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the annual risk-free rate.
    #[must_use]
    pub fn with_risk_free_rate(mut self, rate: f64) -> Self {
        self.risk_free_rate = rate;
        self
    }

    /// Sets the number of periods per year.
    #[must_use]
    pub fn with_trading_days(mut self, days: u32) -> Self {
        self.trading_days_per_year = days;
        self
    }

    /// Sets the VaR confidence level.
    #[must_use]
    pub fn with_confidence_level(mut self, confidence: f64) -> Self {
        self.confidence_level = confidence;
        self
    }

    /// Sets the number of Monte Carlo draws.
    #[must_use]
    pub fn with_simulations(mut self, simulations: usize) -> Self {
        self.monte_carlo_simulations = simulations;
        self
    }

    /// Sets the minimum sample size for tail metrics.
    #[must_use]
    pub fn with_min_sample_size(mut self, size: usize) -> Self {
        self.min_sample_size = size;
        self
    }

    /// Sets the downside target return.
    #[must_use]
    pub fn with_downside_target(mut self, target: f64) -> Self {
        self.downside_target = target;
        self
    }

    /// Fixes the random seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Periods per year as a float.
    #[must_use]
    pub fn periods_per_year(&self) -> f64 {
        f64::from(self.trading_days_per_year)
    }
}

impl Validate for RiskConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        check_finite(&mut errors, "risk_free_rate", self.risk_free_rate);
        check_finite(&mut errors, "downside_target", self.downside_target);

        if self.trading_days_per_year == 0 {
            errors.push(ValidationError::with_rule(
                "trading_days_per_year",
                "must be greater than zero",
                "positive",
            ));
        }

        if !(self.confidence_level > 0.0 && self.confidence_level < 1.0) {
            errors.push(ValidationError::with_rule(
                "confidence_level",
                "Confidence level must be between 0 and 1 (exclusive)",
                "valid_confidence",
            ));
        }

        check_positive(
            &mut errors,
            "monte_carlo_simulations",
            self.monte_carlo_simulations,
        );

        if self.min_sample_size < 2 {
            errors.push(ValidationError::with_rule(
                "min_sample_size",
                "At least 2 observations are required",
                "min_sample",
            ));
        }

        errors
    }
}
