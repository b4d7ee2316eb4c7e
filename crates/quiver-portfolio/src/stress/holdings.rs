//! Holdings built from optimized weights.

use quiver_core::{AssetType, Holding};

use crate::error::{PortfolioError, PortfolioResult};
use crate::optimization::{AssetUniverse, PortfolioCandidate};

/// Maps an optimized candidate to holdings worth `weight × portfolio_value`.
///
/// `asset_types` runs parallel to `universe.names()`. Universes are usually
/// keyed by ticker, so the asset class has to be supplied by the caller.
///
/// # Errors
///
/// Returns a validation error if the candidate or `asset_types` does not
/// have one entry per asset, or `portfolio_value` is negative or not finite.
pub fn holdings_from_weights(
    candidate: &PortfolioCandidate,
    universe: &AssetUniverse,
    asset_types: &[AssetType],
    portfolio_value: f64,
) -> PortfolioResult<Vec<Holding>> {
    if candidate.weights.len() != universe.len() {
        return Err(PortfolioError::validation(
            "weights",
            format!(
                "has {} entries for {} assets",
                candidate.weights.len(),
                universe.len()
            ),
        ));
    }
    if asset_types.len() != universe.len() {
        return Err(PortfolioError::validation(
            "asset_types",
            format!(
                "has {} entries for {} assets",
                asset_types.len(),
                universe.len()
            ),
        ));
    }
    if !(portfolio_value.is_finite() && portfolio_value >= 0.0) {
        return Err(PortfolioError::validation(
            "portfolio_value",
            "must be finite and >= 0",
        ));
    }

    Ok(universe
        .names()
        .iter()
        .zip(asset_types)
        .zip(&candidate.weights)
        .map(|((name, &asset_type), weight)| {
            Holding::new(name.clone(), asset_type, weight * portfolio_value)
                .with_symbol(name.clone())
        })
        .collect())
}
