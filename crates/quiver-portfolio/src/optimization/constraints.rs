//! Weight constraints for constrained optimization.

use serde::{Deserialize, Serialize};

use crate::error::{PortfolioError, PortfolioResult};

/// What a constrained search optimizes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Objective {
    /// Highest Sharpe ratio.
    #[default]
    MaxSharpe,
    /// Lowest volatility.
    MinVariance,
}

/// Per-asset bounds and the target sum of weights.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightConstraints {
    /// Lower bound for every weight.
    pub min_weight: f64,
    /// Upper bound for every weight.
    pub max_weight: f64,
    /// Target sum of weights.
    pub total_weight: f64,
}

impl Default for WeightConstraints {
    fn default() -> Self {
        Self {
            min_weight: 0.0,
            max_weight: 1.0,
            total_weight: 1.0,
        }
    }
}

impl WeightConstraints {
    /// Creates constraints with the given bounds and a total of 1.
    #[must_use]
    pub fn new(min_weight: f64, max_weight: f64) -> Self {
        Self {
            min_weight,
            max_weight,
            total_weight: 1.0,
        }
    }

    /// Sets the target sum of weights.
    #[must_use]
    pub fn with_total_weight(mut self, total_weight: f64) -> Self {
        self.total_weight = total_weight;
        self
    }

    /// Checks the bounds for `n_assets` assets.
    ///
    /// Requires finite values, `0 <= min <= max`, `total > 0`, and that the
    /// total is reachable: `n × min <= total <= n × max`.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the offending bound.
    pub fn validate(&self, n_assets: usize) -> PortfolioResult<()> {
        let Self {
            min_weight,
            max_weight,
            total_weight,
        } = *self;

        if !(min_weight.is_finite() && max_weight.is_finite() && total_weight.is_finite()) {
            return Err(PortfolioError::validation("constraints", "bounds must be finite"));
        }
        if min_weight < 0.0 {
            return Err(PortfolioError::validation("min_weight", "must be >= 0"));
        }
        if max_weight < min_weight {
            return Err(PortfolioError::validation("max_weight", "must be >= min_weight"));
        }
        if total_weight <= 0.0 {
            return Err(PortfolioError::validation("total_weight", "must be > 0"));
        }

        let n = n_assets as f64;
        if n * min_weight > total_weight + 1e-12 || n * max_weight < total_weight - 1e-12 {
            return Err(PortfolioError::validation(
                "total_weight",
                format!(
                    "{total_weight} is unreachable with {n_assets} assets in \
                     [{min_weight}, {max_weight}]"
                ),
            ));
        }
        Ok(())
    }

    /// Scales a unit-sum draw to the total, then clamps each weight into
    /// the bounds. Clamping can move the sum away from the total.
    #[must_use]
    pub fn apply(&self, weights: &[f64]) -> Vec<f64> {
        weights
            .iter()
            .map(|w| (w * self.total_weight).clamp(self.min_weight, self.max_weight))
            .collect()
    }
}
