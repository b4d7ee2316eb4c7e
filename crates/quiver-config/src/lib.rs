//! Quiver Configuration Layer
//!
//! This crate provides configuration for the Quiver portfolio analytics
//! library.
//!
//! # Features
//!
//! - **Risk Configuration**: confidence level, Monte Carlo draws, sample
//!   floor, risk-free rate, annualization
//! - **Optimizer Configuration**: sample counts, frontier resolution,
//!   batching, parallelism, timeouts
//! - **Stress Configuration**: recommendation and recovery thresholds
//! - **Validation**: every section reports all violations at once
//!
//! # Example
//!
//! ```rust
//! use quiver_config::{OptimizerConfig, QuiverConfig, RiskConfig, Validate};
//!
//! let config = QuiverConfig::new()
//!     .with_risk(RiskConfig::new().with_confidence_level(0.99))
//!     .with_optimizer(OptimizerConfig::new().with_seed(42).with_samples(5_000));
//!
//! assert!(config.is_valid());
//! assert_eq!(config.optimizer.seed, Some(42));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod error;
mod optimizer;
mod risk;
mod settings;
mod stress;

// Re-export core types
pub use error::{ConfigError, ConfigResult, Validate, ValidationError};
pub use optimizer::OptimizerConfig;
pub use risk::RiskConfig;
pub use settings::QuiverConfig;
pub use stress::StressConfig;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{ConfigError, ConfigResult, Validate};
    pub use crate::optimizer::OptimizerConfig;
    pub use crate::risk::RiskConfig;
    pub use crate::settings::QuiverConfig;
    pub use crate::stress::StressConfig;
}
