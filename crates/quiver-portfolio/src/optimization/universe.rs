//! Investable universe: expected returns and covariance.

use nalgebra::DMatrix;
use quiver_analytics::returns::period_returns;
use quiver_math::linear_algebra::{correlation_matrix, covariance_matrix, dot, quadratic_form};
use quiver_math::statistics::mean;
use serde::{Deserialize, Serialize};

use super::candidate::{CandidateKind, PortfolioCandidate};
use crate::error::{PortfolioError, PortfolioResult};

/// Assets with annualized expected returns and covariance.
///
/// Built once per optimization session; every candidate's return,
/// volatility and Sharpe ratio are computed from its weights against this
/// universe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetUniverse {
    names: Vec<String>,
    expected_returns: Vec<f64>,
    covariance: DMatrix<f64>,
}

impl AssetUniverse {
    /// Creates a universe from annualized inputs.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the lengths disagree, the matrix is not
    /// square, or any input is non-finite.
    pub fn new(
        names: Vec<String>,
        expected_returns: Vec<f64>,
        covariance: DMatrix<f64>,
    ) -> PortfolioResult<Self> {
        let n = names.len();
        if expected_returns.len() != n {
            return Err(PortfolioError::validation(
                "expected_returns",
                format!("has {} entries for {n} assets", expected_returns.len()),
            ));
        }
        if covariance.nrows() != n || covariance.ncols() != n {
            return Err(PortfolioError::validation(
                "covariance",
                format!(
                    "is {}x{} for {n} assets",
                    covariance.nrows(),
                    covariance.ncols()
                ),
            ));
        }
        if !expected_returns.iter().all(|r| r.is_finite())
            || !covariance.iter().all(|c| c.is_finite())
        {
            return Err(PortfolioError::validation(
                "universe",
                "expected returns and covariance must be finite",
            ));
        }

        Ok(Self {
            names,
            expected_returns,
            covariance,
        })
    }

    /// Builds a universe from per-asset periodic returns.
    ///
    /// Means and sample covariance are annualized by `periods_per_year`:
    /// `μ = mean × T`, `Σ = cov × T`.
    ///
    /// # Errors
    ///
    /// Returns an error if the series have different lengths, fewer than 2
    /// observations, or do not match `names`.
    pub fn from_returns(
        names: Vec<String>,
        returns: &[Vec<f64>],
        periods_per_year: f64,
    ) -> PortfolioResult<Self> {
        if names.len() != returns.len() {
            return Err(PortfolioError::validation(
                "returns",
                format!("has {} series for {} assets", returns.len(), names.len()),
            ));
        }
        let covariance = covariance_matrix(returns)? * periods_per_year;
        let expected_returns = returns
            .iter()
            .map(|series| mean(series) * periods_per_year)
            .collect();
        Self::new(names, expected_returns, covariance)
    }

    /// Builds a universe from per-asset value (price) histories.
    ///
    /// # Errors
    ///
    /// Same conditions as [`AssetUniverse::from_returns`], applied to the
    /// derived period returns.
    pub fn from_values(
        names: Vec<String>,
        values: &[Vec<f64>],
        periods_per_year: f64,
    ) -> PortfolioResult<Self> {
        let returns: Vec<Vec<f64>> = values.iter().map(|v| period_returns(v)).collect();
        Self::from_returns(names, &returns, periods_per_year)
    }

    /// Number of assets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if the universe has no assets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Asset names in matrix order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Annualized expected returns.
    #[must_use]
    pub fn expected_returns(&self) -> &[f64] {
        &self.expected_returns
    }

    /// Annualized covariance matrix.
    #[must_use]
    pub fn covariance(&self) -> &DMatrix<f64> {
        &self.covariance
    }

    /// Correlation matrix derived from the covariance.
    ///
    /// # Errors
    ///
    /// Never fails for a universe built through the constructors; the
    /// matrix is square by construction.
    pub fn correlation(&self) -> PortfolioResult<DMatrix<f64>> {
        Ok(correlation_matrix(&self.covariance)?)
    }

    /// Lowest and highest single-asset expected return.
    #[must_use]
    pub fn return_range(&self) -> Option<(f64, f64)> {
        let first = *self.expected_returns.first()?;
        Some(
            self.expected_returns
                .iter()
                .fold((first, first), |(lo, hi), &r| (lo.min(r), hi.max(r))),
        )
    }

    /// Portfolio expected return `wᵀμ`.
    pub(crate) fn portfolio_return(&self, weights: &[f64]) -> PortfolioResult<f64> {
        Ok(dot(weights, &self.expected_returns)?)
    }

    /// Portfolio volatility `sqrt(wᵀΣw)`.
    pub(crate) fn portfolio_volatility(&self, weights: &[f64]) -> PortfolioResult<f64> {
        Ok(quadratic_form(weights, &self.covariance)?.max(0.0).sqrt())
    }

    /// Evaluates a weight vector into a candidate.
    ///
    /// Sharpe is `(return − rf) / volatility`, or 0 when volatility is 0.
    ///
    /// # Errors
    ///
    /// Returns an error if `weights` does not have one entry per asset.
    pub fn evaluate(
        &self,
        weights: Vec<f64>,
        risk_free_rate: f64,
        kind: CandidateKind,
    ) -> PortfolioResult<PortfolioCandidate> {
        let expected_return = self.portfolio_return(&weights)?;
        let volatility = self.portfolio_volatility(&weights)?;
        let sharpe_ratio = if volatility > 0.0 {
            (expected_return - risk_free_rate) / volatility
        } else {
            0.0
        };

        Ok(PortfolioCandidate {
            weights,
            expected_return,
            volatility,
            sharpe_ratio,
            kind,
        })
    }
}
