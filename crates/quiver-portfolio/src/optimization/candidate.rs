//! Optimization result records.

use serde::{Deserialize, Serialize};

/// How a candidate portfolio was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CandidateKind {
    /// Deterministic `1/N` weights.
    EqualWeight,
    /// Lowest-volatility sample.
    MinimumVariance,
    /// Highest-Sharpe sample.
    Tangency,
    /// Lowest-volatility sample near a frontier target return.
    Frontier,
    /// Best sample under weight constraints.
    Constrained,
    /// Unselected random draw (frontier fallback).
    Random,
}

/// A weight vector with its derived metrics.
///
/// `expected_return`, `volatility` and `sharpe_ratio` are always computed
/// from `weights`; the record is never mutated after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioCandidate {
    /// One weight per asset, in universe order.
    pub weights: Vec<f64>,
    /// Annualized expected return `wᵀμ`.
    pub expected_return: f64,
    /// Annualized volatility `sqrt(wᵀΣw)`.
    pub volatility: f64,
    /// `(return − rf) / volatility`, 0 when volatility is 0.
    pub sharpe_ratio: f64,
    /// Producing method.
    pub kind: CandidateKind,
}

impl PortfolioCandidate {
    /// Sum of the weights.
    #[must_use]
    pub fn weight_sum(&self) -> f64 {
        self.weights.iter().sum()
    }
}
