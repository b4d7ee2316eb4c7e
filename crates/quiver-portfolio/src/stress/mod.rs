//! Stress testing for portfolios.
//!
//! This module provides:
//! - Scenario definitions and the [`standard`] catalog
//! - Scenario application with recovery estimates and recommendations
//! - Sensitivity sweeps and correlation shocks
//! - [`StressTester`], the service object tying them together
//!
//! Shocks are fractional value changes per asset type; no repricing model
//! sits behind them.

mod analysis;
mod holdings;
mod impact;
mod scenarios;
mod tester;

pub use analysis::*;
pub use holdings::*;
pub use impact::*;
pub use scenarios::*;
pub use tester::*;
