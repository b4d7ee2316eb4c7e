//! Valuation and allocation engine.
//!
//! Turns raw positions and price snapshots into market values, allocation
//! weights, profit and loss, day-over-day changes and value time series.
//! Every operation validates its positions through [`normalize`] first.

mod allocation;
mod holdings;
mod market_value;
mod normalize;
mod pnl;

pub use allocation::{allocation, Allocation, AllocationBucket};
pub use holdings::holdings_from_positions;
pub use market_value::{
    daily_change, market_value, time_series_value, DailyChange, MarketValueItem,
    MarketValueReport,
};
pub use normalize::{normalize, normalize_json};
pub use pnl::{pnl, PnlItem, PnlReport};
