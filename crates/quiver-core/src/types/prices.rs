//! Price snapshots and dated price series.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use super::Date;
use crate::error::{CoreError, CoreResult};

/// Ticker → price at a single point in time.
///
/// Prices may be zero. A price that is absent, NaN, or infinite is unusable
/// and surfaces as [`CoreError::MissingPrice`] when a valuation needs it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceMap(HashMap<String, f64>);

impl PriceMap {
    /// Creates an empty price map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the price of a ticker, returning the map for chaining.
    #[must_use]
    pub fn with_price(mut self, ticker: impl Into<String>, price: f64) -> Self {
        self.0.insert(ticker.into(), price);
        self
    }

    /// Sets the price of a ticker.
    pub fn insert(&mut self, ticker: impl Into<String>, price: f64) {
        self.0.insert(ticker.into(), price);
    }

    /// Raw lookup without validation.
    #[must_use]
    pub fn get(&self, ticker: &str) -> Option<f64> {
        self.0.get(ticker).copied()
    }

    /// Usable price for a ticker.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::MissingPrice` if the price is absent or non-finite.
    pub fn price(&self, ticker: &str) -> CoreResult<f64> {
        match self.0.get(ticker) {
            Some(price) if price.is_finite() => Ok(*price),
            _ => Err(CoreError::missing_price(ticker)),
        }
    }

    /// Number of tickers in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the map has no prices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over `(ticker, price)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(t, p)| (t.as_str(), *p))
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for PriceMap {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Date → [`PriceMap`], ordered ascending by date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceSeries(BTreeMap<Date, PriceMap>);

impl PriceSeries {
    /// Creates an empty series.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a series from ISO date keys (`YYYY-MM-DD`).
    ///
    /// A later duplicate key replaces an earlier one.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` on the first key that does not parse.
    pub fn from_iso<'a, I>(entries: I) -> CoreResult<Self>
    where
        I: IntoIterator<Item = (&'a str, PriceMap)>,
    {
        let mut series = BTreeMap::new();
        for (key, prices) in entries {
            series.insert(Date::parse(key)?, prices);
        }
        Ok(Self(series))
    }

    /// Adds or replaces the snapshot for a date.
    pub fn insert(&mut self, date: Date, prices: PriceMap) {
        self.0.insert(date, prices);
    }

    /// Adds a snapshot, returning the series for chaining.
    #[must_use]
    pub fn with_snapshot(mut self, date: Date, prices: PriceMap) -> Self {
        self.0.insert(date, prices);
        self
    }

    /// Snapshot for a date.
    #[must_use]
    pub fn get(&self, date: &Date) -> Option<&PriceMap> {
        self.0.get(date)
    }

    /// Number of dated snapshots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the series has no snapshots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over snapshots in ascending date order.
    pub fn iter(&self) -> impl Iterator<Item = (&Date, &PriceMap)> {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_lookup() {
        let prices = PriceMap::new()
            .with_price("AAPL", 190.0)
            .with_price("ZERO", 0.0)
            .with_price("BAD", f64::NAN)
            .with_price("INF", f64::INFINITY);

        assert_eq!(prices.price("AAPL").unwrap(), 190.0);
        assert_eq!(prices.price("ZERO").unwrap(), 0.0);
        assert!(prices.price("BAD").unwrap_err().is_missing_price());
        assert!(prices.price("INF").unwrap_err().is_missing_price());
        assert!(prices.price("MSFT").unwrap_err().is_missing_price());
    }

    #[test]
    fn test_series_sorted_by_date() {
        let series = PriceSeries::from_iso([
            ("2024-03-01", PriceMap::new().with_price("A", 3.0)),
            ("2024-01-01", PriceMap::new().with_price("A", 1.0)),
            ("2024-02-01", PriceMap::new().with_price("A", 2.0)),
        ])
        .unwrap();

        let prices: Vec<f64> = series
            .iter()
            .map(|(_, p)| p.get("A").unwrap())
            .collect();
        assert_eq!(prices, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_series_rejects_bad_key() {
        let err = PriceSeries::from_iso([("01/02/2024", PriceMap::new())]).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_price_map_serde() {
        let prices: PriceMap = serde_json::from_str(r#"{"SPY": 500.25}"#).unwrap();
        assert_eq!(prices.get("SPY"), Some(500.25));
    }
}
