//! Dated portfolio value series.

use serde::{Deserialize, Serialize};
use std::ops::Deref;

use super::Date;
use crate::error::CoreResult;

/// Portfolio value at a date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValuePoint {
    /// Observation date.
    pub date: Date,
    /// Portfolio value on that date.
    pub value: f64,
}

impl ValuePoint {
    /// Creates a new value point.
    #[must_use]
    pub fn new(date: Date, value: f64) -> Self {
        Self { date, value }
    }

    /// Creates a value point from an ISO date string.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` if the date does not parse.
    pub fn from_iso(date: &str, value: f64) -> CoreResult<Self> {
        Ok(Self::new(Date::parse(date)?, value))
    }
}

/// Value points sorted ascending by date.
///
/// Decoding goes through [`ValueSeries::from_points`], so serialized input
/// may arrive in any order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<ValuePoint>", into = "Vec<ValuePoint>")]
pub struct ValueSeries(Vec<ValuePoint>);

impl ValueSeries {
    /// Creates an empty series.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a series, sorting the points by date (stable for equal dates).
    #[must_use]
    pub fn from_points(mut points: Vec<ValuePoint>) -> Self {
        points.sort_by_key(|p| p.date);
        Self(points)
    }

    /// The values in date order.
    #[must_use]
    pub fn values(&self) -> Vec<f64> {
        self.0.iter().map(|p| p.value).collect()
    }

    /// Consumes the series, returning the points.
    #[must_use]
    pub fn into_points(self) -> Vec<ValuePoint> {
        self.0
    }
}

impl Deref for ValueSeries {
    type Target = [ValuePoint];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<ValuePoint>> for ValueSeries {
    fn from(points: Vec<ValuePoint>) -> Self {
        Self::from_points(points)
    }
}

impl From<ValueSeries> for Vec<ValuePoint> {
    fn from(series: ValueSeries) -> Self {
        series.0
    }
}

impl FromIterator<ValuePoint> for ValueSeries {
    fn from_iter<I: IntoIterator<Item = ValuePoint>>(iter: I) -> Self {
        Self::from_points(iter.into_iter().collect())
    }
}
