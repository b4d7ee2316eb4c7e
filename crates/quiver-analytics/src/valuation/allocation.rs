//! Allocation by asset class.

use std::collections::BTreeMap;

use quiver_core::{CoreResult, Position, PriceMap};
use serde::{Deserialize, Serialize};

use super::market_value::value_normalized;
use super::normalize::normalize;

/// Market value and weight of one allocation bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationBucket {
    /// Sum of market values in the bucket.
    pub market_value: f64,
    /// Share of the portfolio total, or 0 when the total is 0.
    pub weight: f64,
}

/// Portfolio allocation keyed by asset class (or ticker when unclassified).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Allocation {
    /// Buckets in key order.
    pub by_key: BTreeMap<String, AllocationBucket>,
    /// Portfolio market value.
    pub total: f64,
}

impl Allocation {
    /// Sum of bucket weights: 1 when the total is positive, otherwise 0.
    #[must_use]
    pub fn weight_sum(&self) -> f64 {
        self.by_key.values().map(|bucket| bucket.weight).sum()
    }
}

/// Groups market value by allocation key and computes weights.
///
/// # Errors
///
/// Same conditions as [`super::market_value`].
pub fn allocation(positions: &[Position], prices: &PriceMap) -> CoreResult<Allocation> {
    let positions = normalize(positions)?;
    let report = value_normalized(&positions, prices)?;

    let mut grouped: BTreeMap<String, f64> = BTreeMap::new();
    for (position, item) in positions.iter().zip(&report.items) {
        *grouped
            .entry(position.allocation_key().to_string())
            .or_insert(0.0) += item.market_value;
    }

    let total = report.total;
    let by_key = grouped
        .into_iter()
        .map(|(key, market_value)| {
            let weight = if total > 0.0 { market_value / total } else { 0.0 };
            (
                key,
                AllocationBucket {
                    market_value,
                    weight,
                },
            )
        })
        .collect();

    Ok(Allocation { by_key, total })
}
