//! Market value of position lists.
//!
//! Every entry point normalizes its positions first, so callers may pass
//! raw import rows directly.

use log::debug;
use quiver_core::{CoreResult, Position, PriceMap, PriceSeries, ValuePoint, ValueSeries};
use serde::{Deserialize, Serialize};

use super::normalize::normalize;

/// Market value of one position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketValueItem {
    /// Normalized ticker.
    pub ticker: String,
    /// Units held.
    pub quantity: f64,
    /// Price used.
    pub price: f64,
    /// `quantity × price`.
    pub market_value: f64,
}

/// Market values of a position list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketValueReport {
    /// One item per input position, in input order.
    pub items: Vec<MarketValueItem>,
    /// Sum of item market values.
    pub total: f64,
}

/// Values positions against a price snapshot.
///
/// Empty portfolios and zero prices are valid and produce `total = 0`.
///
/// # Errors
///
/// - `CoreError::Validation` if a position fails normalization.
/// - `CoreError::MissingPrice` if a ticker has no finite price.
pub fn market_value(positions: &[Position], prices: &PriceMap) -> CoreResult<MarketValueReport> {
    let positions = normalize(positions)?;
    value_normalized(&positions, prices)
}

/// Values positions that have already been normalized.
pub(crate) fn value_normalized(
    positions: &[Position],
    prices: &PriceMap,
) -> CoreResult<MarketValueReport> {
    let items = positions
        .iter()
        .map(|position| {
            let price = prices.price(&position.ticker)?;
            Ok(MarketValueItem {
                ticker: position.ticker.clone(),
                quantity: position.quantity,
                price,
                market_value: position.quantity * price,
            })
        })
        .collect::<CoreResult<Vec<_>>>()?;

    let total = items.iter().map(|item| item.market_value).sum();
    Ok(MarketValueReport { items, total })
}

/// Day-over-day change in portfolio value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyChange {
    /// Market value at today's prices.
    pub today: f64,
    /// Market value at yesterday's prices.
    pub yesterday: f64,
    /// `today − yesterday`.
    pub delta: f64,
    /// `delta / yesterday`; `None` when yesterday's value is not positive.
    pub delta_pct: Option<f64>,
}

/// Change in value between two price snapshots, holding quantities fixed.
///
/// # Errors
///
/// Same conditions as [`market_value`], for either snapshot.
pub fn daily_change(
    positions: &[Position],
    today: &PriceMap,
    yesterday: &PriceMap,
) -> CoreResult<DailyChange> {
    let positions = normalize(positions)?;
    let today = value_normalized(&positions, today)?.total;
    let yesterday = value_normalized(&positions, yesterday)?.total;
    let delta = today - yesterday;

    Ok(DailyChange {
        today,
        yesterday,
        delta,
        delta_pct: (yesterday > 0.0).then(|| delta / yesterday),
    })
}

/// Portfolio value at every dated snapshot, ascending by date.
///
/// # Errors
///
/// Same conditions as [`market_value`]; a snapshot lacking a price for any
/// position fails the whole series.
pub fn time_series_value(positions: &[Position], series: &PriceSeries) -> CoreResult<ValueSeries> {
    let positions = normalize(positions)?;
    let points = series
        .iter()
        .map(|(date, prices)| {
            value_normalized(&positions, prices).map(|report| ValuePoint::new(*date, report.total))
        })
        .collect::<CoreResult<Vec<_>>>()?;

    debug!(
        "valued {} positions over {} snapshots",
        positions.len(),
        points.len()
    );
    Ok(ValueSeries::from_points(points))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use quiver_core::Date;

    fn book() -> Vec<Position> {
        vec![
            Position::new("AAPL", 10.0).with_avg_cost(150.0),
            Position::new("BND", 20.0).with_avg_cost(75.0),
        ]
    }

    #[test]
    fn test_market_value() {
        let prices = PriceMap::new().with_price("AAPL", 190.0).with_price("BND", 72.5);
        let report = market_value(&book(), &prices).unwrap();

        assert_eq!(report.items.len(), 2);
        assert_relative_eq!(report.items[0].market_value, 1900.0);
        assert_relative_eq!(report.items[1].market_value, 1450.0);
        assert_relative_eq!(report.total, 3350.0);
    }

    #[test]
    fn test_empty_portfolio() {
        let report = market_value(&[], &PriceMap::new()).unwrap();
        assert!(report.items.is_empty());
        assert_eq!(report.total, 0.0);
    }

    #[test]
    fn test_missing_and_non_finite_prices() {
        let prices = PriceMap::new().with_price("AAPL", 190.0);
        let err = market_value(&book(), &prices).unwrap_err();
        assert!(err.is_missing_price());
        assert!(err.to_string().contains("BND"));

        let prices = PriceMap::new()
            .with_price("AAPL", f64::NAN)
            .with_price("BND", 1.0);
        assert!(market_value(&book(), &prices).unwrap_err().is_missing_price());
    }

    #[test]
    fn test_zero_prices_are_valid() {
        let prices = PriceMap::new().with_price("AAPL", 0.0).with_price("BND", 0.0);
        assert_eq!(market_value(&book(), &prices).unwrap().total, 0.0);
    }

    #[test]
    fn test_daily_change() {
        let today = PriceMap::new().with_price("AAPL", 110.0).with_price("BND", 50.0);
        let yesterday = PriceMap::new().with_price("AAPL", 100.0).with_price("BND", 50.0);
        let change = daily_change(&book(), &today, &yesterday).unwrap();

        assert_relative_eq!(change.today, 2100.0);
        assert_relative_eq!(change.yesterday, 2000.0);
        assert_relative_eq!(change.delta, 100.0);
        assert_relative_eq!(change.delta_pct.unwrap(), 0.05);
    }

    #[test]
    fn test_daily_change_from_zero() {
        let today = PriceMap::new().with_price("AAPL", 1.0).with_price("BND", 1.0);
        let yesterday = PriceMap::new().with_price("AAPL", 0.0).with_price("BND", 0.0);
        let change = daily_change(&book(), &today, &yesterday).unwrap();
        assert!(change.delta_pct.is_none());
        assert_relative_eq!(change.delta, 30.0);
    }

    #[test]
    fn test_time_series_value() {
        let series = PriceSeries::from_iso([
            ("2024-01-03", PriceMap::new().with_price("AAPL", 2.0).with_price("BND", 1.0)),
            ("2024-01-02", PriceMap::new().with_price("AAPL", 1.0).with_price("BND", 1.0)),
        ])
        .unwrap();
        let values = time_series_value(&book(), &series).unwrap();

        assert_eq!(values.len(), 2);
        assert_eq!(values[0].date, Date::parse("2024-01-02").unwrap());
        assert_relative_eq!(values[0].value, 30.0);
        assert_relative_eq!(values[1].value, 40.0);
    }

    #[test]
    fn test_time_series_missing_price() {
        let series = PriceSeries::from_iso([(
            "2024-01-02",
            PriceMap::new().with_price("AAPL", 1.0),
        )])
        .unwrap();
        assert!(time_series_value(&book(), &series)
            .unwrap_err()
            .is_missing_price());
        assert!(time_series_value(&book(), &PriceSeries::new())
            .unwrap()
            .is_empty());
    }
}
