//! # Quiver Core
//!
//! Core domain types and errors for the Quiver portfolio analytics library.
//!
//! This crate provides the building blocks shared by the analytics and
//! portfolio crates:
//!
//! - **Positions**: ticker, quantity, cost basis, asset class
//! - **Prices**: point-in-time [`PriceMap`]s and dated [`PriceSeries`]
//! - **Value series**: dated portfolio values for return and risk analytics
//! - **Holdings**: priced assets with an [`AssetType`] for stress testing
//! - **Errors**: validation and missing-price failures
//!
//! ## Design Philosophy
//!
//! - **Immutable inputs**: every computation builds new records
//! - **Explicit absence**: "not applicable" is `Option::None`, never a sentinel
//! - **Fail fast on bad input**: validation errors carry the row or ticker
//!
//! ## Example
//!
//! ```rust
//! use quiver_core::prelude::*;
//!
//! let position = Position::new("AAPL", 10.0).with_avg_cost(150.0);
//! let prices = PriceMap::new().with_price("AAPL", 190.0);
//! assert_eq!(prices.price(&position.ticker).unwrap(), 190.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::doc_markdown)]

pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::types::{
        AssetType, Date, Holding, Position, PriceMap, PriceSeries, ValuePoint, ValueSeries,
    };
}

// Re-export commonly used types at crate root
pub use error::{CoreError, CoreResult};
pub use types::{
    AssetType, Date, Holding, Position, PriceMap, PriceSeries, ValuePoint, ValueSeries,
};
