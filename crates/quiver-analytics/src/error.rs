//! Error types for the analytics layer.
//!
//! Input failures from the domain layer ([`CoreError`]) pass through
//! unchanged so callers can still distinguish validation failures from
//! missing prices.

use quiver_config::ConfigError;
use quiver_core::CoreError;
use quiver_math::MathError;
use thiserror::Error;

/// Unified error type for analytics operations.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// Validation or missing-price failure.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Numerical failure (dimension mismatch, too few observations).
    #[error("math error: {0}")]
    Math(#[from] MathError),

    /// Engine configuration rejected.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for analytics operations.
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

impl AnalyticsError {
    /// Creates a validation error not tied to a row.
    #[must_use]
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Core(CoreError::invalid_input(field, reason))
    }

    /// Returns true for malformed or out-of-range input.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        match self {
            Self::Core(err) => err.is_validation(),
            Self::Math(_) | Self::Config(_) => true,
        }
    }

    /// Returns true when a required price was absent or non-finite.
    #[must_use]
    pub fn is_missing_price(&self) -> bool {
        matches!(self, Self::Core(err) if err.is_missing_price())
    }
}
