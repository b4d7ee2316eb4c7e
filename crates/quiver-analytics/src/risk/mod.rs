//! Risk metrics engine.
//!
//! Tail risk (VaR, CVaR), risk-adjusted ratios and drawdown analysis over
//! periodic returns and value series. The free functions return unrounded
//! values; [`RiskEngine::report`] bundles and rounds them.

mod drawdown;
mod engine;
mod ratios;
mod var;

pub use drawdown::{drawdown_metrics, recovery_factor, DrawdownMetrics};
pub use engine::{RiskEngine, RiskReport};
pub use ratios::{
    annualized_volatility, beta, calmar_ratio, information_ratio, omega_ratio, sharpe_ratio,
    sortino_ratio, tracking_error,
};
pub use var::{
    conditional_var, historical_var, monte_carlo_var, parametric_var, VarMethod,
    DEFAULT_MIN_SAMPLE_SIZE,
};
