//! Bridge from valued positions to risk-domain holdings.

use quiver_core::{AssetType, CoreResult, Holding, Position, PriceMap};

use super::market_value::value_normalized;
use super::normalize::normalize;

/// Converts positions into holdings valued at `prices`.
///
/// The asset type is parsed from the asset class label; unclassified or
/// unrecognized labels become [`AssetType::Other`]. Name and symbol are
/// both the ticker.
///
/// # Errors
///
/// Same conditions as [`super::market_value`].
pub fn holdings_from_positions(
    positions: &[Position],
    prices: &PriceMap,
) -> CoreResult<Vec<Holding>> {
    let positions = normalize(positions)?;
    let report = value_normalized(&positions, prices)?;

    Ok(positions
        .iter()
        .zip(report.items)
        .map(|(position, item)| {
            let asset_type = position
                .asset_class
                .as_deref()
                .map_or(AssetType::Other, AssetType::from_label);
            Holding::new(item.ticker.clone(), asset_type, item.market_value)
                .with_symbol(item.ticker)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_holdings_from_positions() {
        let positions = vec![
            Position::new("SPY", 2.0).with_asset_class("equities"),
            Position::new("TLT", 1.0).with_asset_class("Fixed Income"),
            Position::new("XYZ", 1.0),
        ];
        let prices = PriceMap::new()
            .with_price("SPY", 500.0)
            .with_price("TLT", 90.0)
            .with_price("XYZ", 10.0);

        let holdings = holdings_from_positions(&positions, &prices).unwrap();
        assert_eq!(holdings[0].asset_type, AssetType::Equity);
        assert_eq!(holdings[0].value, 1000.0);
        assert_eq!(holdings[0].symbol.as_deref(), Some("SPY"));
        assert_eq!(holdings[1].asset_type, AssetType::Bond);
        assert_eq!(holdings[2].asset_type, AssetType::Other);
    }
}
