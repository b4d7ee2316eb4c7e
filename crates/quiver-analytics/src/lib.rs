//! # Quiver Analytics
//!
//! Valuation, return and risk analytics for the Quiver portfolio analytics
//! library.
//!
//! This crate provides:
//!
//! - **Valuation**: position validation, market value, allocation, P&L,
//!   daily change, value time series, holdings for stress testing
//! - **Returns**: annualized (CAGR), time-weighted average, period and
//!   cumulative returns
//! - **Risk**: parametric/historical/Monte Carlo VaR, CVaR, Sharpe,
//!   Sortino, Calmar, Omega, information ratio, drawdowns, [`RiskEngine`]
//!
//! ## Example
//!
//! ```rust
//! use quiver_analytics::prelude::*;
//! use quiver_core::{Position, PriceMap};
//!
//! let positions = vec![
//!     Position::new("VTI", 10.0).with_avg_cost(200.0).with_asset_class("Equity"),
//!     Position::new("BND", 20.0).with_avg_cost(75.0).with_asset_class("Bond"),
//! ];
//! let prices = PriceMap::new().with_price("VTI", 250.0).with_price("BND", 75.0);
//!
//! let alloc = allocation(&positions, &prices).unwrap();
//! assert!((alloc.weight_sum() - 1.0).abs() < 1e-9);
//!
//! let report = pnl(&positions, &prices).unwrap();
//! assert_eq!(report.total_pnl, 500.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]

pub mod error;
pub mod returns;
pub mod risk;
pub mod valuation;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{AnalyticsError, AnalyticsResult};
    pub use crate::returns::{
        annualized_return, cumulative_return, period_returns, weighted_average_return,
    };
    pub use crate::risk::{DrawdownMetrics, RiskEngine, RiskReport};
    pub use crate::valuation::{
        allocation, daily_change, holdings_from_positions, market_value, normalize,
        normalize_json, pnl, time_series_value,
    };
}

pub use error::{AnalyticsError, AnalyticsResult};
pub use risk::{RiskEngine, RiskReport};
