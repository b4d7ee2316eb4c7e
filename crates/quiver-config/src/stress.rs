//! Stress testing configuration.

use serde::{Deserialize, Serialize};

use crate::error::{check_finite, Validate, ValidationError};

/// Thresholds used when turning a stress result into recovery estimates and
/// recommendations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StressConfig {
    /// Correlation shift above which a diversification warning is issued.
    #[serde(default = "default_correlation_warning")]
    pub correlation_warning: f64,

    /// Volatility multiplier above which a cash reserve is recommended.
    #[serde(default = "default_cash_reserve_volatility")]
    pub cash_reserve_volatility: f64,

    /// Total loss (percent) above which hedging is suggested.
    #[serde(default = "default_hedging_loss_pct")]
    pub hedging_loss_pct: f64,

    /// Floor for the recovery estimate, in days.
    #[serde(default = "default_min_recovery_days")]
    pub min_recovery_days: f64,

    /// Trading days per month used by the recovery estimate.
    #[serde(default = "default_trading_days_per_month")]
    pub trading_days_per_month: f64,
}

fn default_correlation_warning() -> f64 {
    1.2
}

fn default_cash_reserve_volatility() -> f64 {
    2.5
}

fn default_hedging_loss_pct() -> f64 {
    20.0
}

fn default_min_recovery_days() -> f64 {
    10.0
}

fn default_trading_days_per_month() -> f64 {
    21.0
}

impl Default for StressConfig {
    fn default() -> Self {
        Self {
            correlation_warning: default_correlation_warning(),
            cash_reserve_volatility: default_cash_reserve_volatility(),
            hedging_loss_pct: default_hedging_loss_pct(),
            min_recovery_days: default_min_recovery_days(),
            trading_days_per_month: default_trading_days_per_month(),
        }
    }
}

impl StressConfig {
    /// Creates a config with default thresholds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the correlation-shift warning threshold.
    #[must_use]
    pub fn with_correlation_warning(mut self, threshold: f64) -> Self {
        self.correlation_warning = threshold;
        self
    }

    /// Sets the volatility multiplier that triggers a cash reserve note.
    #[must_use]
    pub fn with_cash_reserve_volatility(mut self, threshold: f64) -> Self {
        self.cash_reserve_volatility = threshold;
        self
    }

    /// Sets the loss percentage that triggers a hedging note.
    #[must_use]
    pub fn with_hedging_loss_pct(mut self, threshold: f64) -> Self {
        self.hedging_loss_pct = threshold;
        self
    }
}

impl Validate for StressConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        check_finite(&mut errors, "correlation_warning", self.correlation_warning);
        check_finite(
            &mut errors,
            "cash_reserve_volatility",
            self.cash_reserve_volatility,
        );
        check_finite(&mut errors, "hedging_loss_pct", self.hedging_loss_pct);

        if !(self.min_recovery_days.is_finite() && self.min_recovery_days >= 0.0) {
            errors.push(ValidationError::with_rule(
                "min_recovery_days",
                "must be a non-negative number",
                "non_negative",
            ));
        }

        if !(self.trading_days_per_month.is_finite() && self.trading_days_per_month > 0.0) {
            errors.push(ValidationError::with_rule(
                "trading_days_per_month",
                "must be greater than zero",
                "positive",
            ));
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StressConfig::default();
        assert_eq!(config.correlation_warning, 1.2);
        assert_eq!(config.cash_reserve_volatility, 2.5);
        assert_eq!(config.hedging_loss_pct, 20.0);
        assert_eq!(config.min_recovery_days, 10.0);
        assert_eq!(config.trading_days_per_month, 21.0);
        assert!(config.is_valid());
    }

    #[test]
    fn test_validation() {
        let mut config = StressConfig::new();
        config.trading_days_per_month = 0.0;
        config.min_recovery_days = -1.0;
        assert_eq!(config.validate().len(), 2);
    }
}
