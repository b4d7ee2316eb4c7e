//! Position records supplied by the import layer.

use serde::{Deserialize, Serialize};

/// A quantity of one ticker held in a portfolio snapshot.
///
/// The ticker identifies the row within a snapshot by convention only;
/// duplicates are not rejected. Positions are validated once by the
/// valuation layer's `normalize` and treated as immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    /// Instrument ticker (non-empty).
    pub ticker: String,

    /// Units held (finite, >= 0).
    pub quantity: f64,

    /// Average cost per unit (finite, >= 0) when a cost basis is known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_cost: Option<f64>,

    /// Asset class label used for allocation grouping.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_class: Option<String>,
}

impl Position {
    /// Creates a position without cost basis or asset class.
    #[must_use]
    pub fn new(ticker: impl Into<String>, quantity: f64) -> Self {
        Self {
            ticker: ticker.into(),
            quantity,
            avg_cost: None,
            asset_class: None,
        }
    }

    /// Sets the average cost per unit.
    #[must_use]
    pub fn with_avg_cost(mut self, avg_cost: f64) -> Self {
        self.avg_cost = Some(avg_cost);
        self
    }

    /// Sets the asset class.
    #[must_use]
    pub fn with_asset_class(mut self, asset_class: impl Into<String>) -> Self {
        self.asset_class = Some(asset_class.into());
        self
    }

    /// Allocation grouping key: the asset class, or the ticker when absent.
    #[must_use]
    pub fn allocation_key(&self) -> &str {
        self.asset_class.as_deref().unwrap_or(&self.ticker)
    }

    /// Cost basis of the position (`avg_cost × quantity`, zero without a cost).
    #[must_use]
    pub fn cost_basis(&self) -> f64 {
        self.avg_cost.unwrap_or(0.0) * self.quantity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let p = Position::new("AAPL", 10.0)
            .with_avg_cost(150.0)
            .with_asset_class("Equity");
        assert_eq!(p.ticker, "AAPL");
        assert_eq!(p.allocation_key(), "Equity");
        assert!((p.cost_basis() - 1500.0).abs() < 1e-12);
    }

    #[test]
    fn test_allocation_key_falls_back_to_ticker() {
        let p = Position::new("BND", 5.0);
        assert_eq!(p.allocation_key(), "BND");
        assert_eq!(p.cost_basis(), 0.0);
    }

    #[test]
    fn test_serde_camel_case() {
        let json = r#"{"ticker":"MSFT","quantity":2,"avgCost":300.5}"#;
        let p: Position = serde_json::from_str(json).unwrap();
        assert_eq!(p.avg_cost, Some(300.5));
        assert!(p.asset_class.is_none());

        let out = serde_json::to_string(&p).unwrap();
        assert!(out.contains("avgCost"));
        assert!(!out.contains("assetClass"));
    }
}
