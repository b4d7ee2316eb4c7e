//! Core domain types.

mod date;
mod holding;
mod position;
mod prices;
mod series;

pub use date::{Date, DAYS_PER_YEAR};
pub use holding::{AssetType, Holding};
pub use position::Position;
pub use prices::{PriceMap, PriceSeries};
pub use series::{ValuePoint, ValueSeries};
