//! Error types for portfolio optimization and stress testing.
//!
//! This module defines the error types used throughout the portfolio crate.

use quiver_config::ConfigError;
use quiver_core::CoreError;
use quiver_math::MathError;
use thiserror::Error;

/// Result type for portfolio operations.
pub type PortfolioResult<T> = Result<T, PortfolioError>;

/// Errors that can occur during portfolio operations.
#[derive(Error, Debug)]
pub enum PortfolioError {
    /// Validation or missing-price failure.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Numerical failure (dimension mismatch, too few observations).
    #[error("math error: {0}")]
    Math(#[from] MathError),

    /// Service configuration rejected.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// A sampling run was stopped through its cancellation token.
    #[error("Optimization cancelled")]
    Cancelled,

    /// A sampling run exceeded its configured time limit.
    #[error("Optimization timed out after {timeout_ms} ms")]
    TimedOut {
        /// The configured limit.
        timeout_ms: u64,
    },

    /// No predefined scenario has this id.
    #[error("Unknown stress scenario: {id}")]
    UnknownScenario {
        /// The requested id.
        id: String,
    },
}

impl PortfolioError {
    /// Creates a validation error not tied to a row.
    #[must_use]
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Core(CoreError::invalid_input(field, reason))
    }

    /// Creates an unknown scenario error.
    #[must_use]
    pub fn unknown_scenario(id: impl Into<String>) -> Self {
        Self::UnknownScenario { id: id.into() }
    }

    /// Returns true for malformed or out-of-range input.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        match self {
            Self::Core(err) => err.is_validation(),
            Self::Math(_) | Self::Config(_) => true,
            _ => false,
        }
    }

    /// Returns true if a run was cancelled or timed out.
    #[must_use]
    pub fn is_interrupted(&self) -> bool {
        matches!(self, Self::Cancelled | Self::TimedOut { .. })
    }
}

impl From<quiver_analytics::AnalyticsError> for PortfolioError {
    fn from(err: quiver_analytics::AnalyticsError) -> Self {
        use quiver_analytics::AnalyticsError;
        match err {
            AnalyticsError::Core(e) => Self::Core(e),
            AnalyticsError::Math(e) => Self::Math(e),
            AnalyticsError::Config(e) => Self::Config(e),
        }
    }
}
