//! Profit and loss against cost basis.

use quiver_core::{CoreResult, Position, PriceMap};
use serde::{Deserialize, Serialize};

use super::market_value::value_normalized;
use super::normalize::normalize;

/// Profit and loss of one position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PnlItem {
    /// Normalized ticker.
    pub ticker: String,
    /// Market value.
    pub market_value: f64,
    /// `avg_cost × quantity` (0 without a cost).
    pub cost: f64,
    /// `market_value − cost`.
    pub pnl: f64,
    /// `pnl / cost`; `None` when the cost is not positive.
    pub pnl_pct: Option<f64>,
}

/// Profit and loss of a position list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PnlReport {
    /// One item per input position, in input order.
    pub items: Vec<PnlItem>,
    /// Sum of item costs.
    pub total_cost: f64,
    /// Sum of item market values.
    pub total_mv: f64,
    /// `total_mv − total_cost`.
    pub total_pnl: f64,
    /// `total_pnl / total_cost`; `None` when the total cost is not positive.
    pub total_pnl_pct: Option<f64>,
}

fn ratio(pnl: f64, cost: f64) -> Option<f64> {
    (cost > 0.0).then(|| pnl / cost)
}

/// Computes per-position and aggregate profit and loss.
///
/// # Errors
///
/// Same conditions as [`super::market_value`].
pub fn pnl(positions: &[Position], prices: &PriceMap) -> CoreResult<PnlReport> {
    let positions = normalize(positions)?;
    let report = value_normalized(&positions, prices)?;

    let items: Vec<PnlItem> = positions
        .iter()
        .zip(report.items)
        .map(|(position, item)| {
            let cost = position.cost_basis();
            let pnl = item.market_value - cost;
            PnlItem {
                ticker: item.ticker,
                market_value: item.market_value,
                cost,
                pnl,
                pnl_pct: ratio(pnl, cost),
            }
        })
        .collect();

    let total_cost: f64 = items.iter().map(|item| item.cost).sum();
    let total_mv = report.total;
    let total_pnl = total_mv - total_cost;

    Ok(PnlReport {
        items,
        total_cost,
        total_mv,
        total_pnl,
        total_pnl_pct: ratio(total_pnl, total_cost),
    })
}
