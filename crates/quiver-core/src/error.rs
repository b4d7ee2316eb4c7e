//! Error types for the Quiver library.
//!
//! Two input failures exist at this layer: malformed input
//! ([`CoreError::Validation`]) and prices that cannot be used
//! ([`CoreError::MissingPrice`]). Both are raised immediately so the caller
//! can attribute the failure to a row or ticker.
//!
//! "Not computable" statistical outcomes are never errors; those functions
//! return `Option` or `0.0` instead.

use std::fmt;
use thiserror::Error;

/// A specialized Result type for Quiver core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// The main error type for Quiver core operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// Malformed or out-of-range input.
    #[error("Validation failed{location}: {field} {reason}")]
    Validation {
        /// Row index of the offending record, when the input is a list.
        location: RowIndex,
        /// The offending field.
        field: String,
        /// What is wrong with it.
        reason: String,
    },

    /// Price absent or non-finite for a ticker required by a valuation.
    #[error("Missing price for ticker '{ticker}'")]
    MissingPrice {
        /// The ticker without a usable price.
        ticker: String,
    },

    /// Error parsing or constructing a date.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },
}

/// Optional row index carried by validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RowIndex(pub Option<usize>);

impl fmt::Display for RowIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(index) => write!(f, " at index {index}"),
            None => Ok(()),
        }
    }
}

impl CoreError {
    /// Creates a validation error attributed to a row.
    #[must_use]
    pub fn invalid_row(index: usize, field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            location: RowIndex(Some(index)),
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates a validation error that is not tied to a row.
    #[must_use]
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            location: RowIndex(None),
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates a missing price error.
    #[must_use]
    pub fn missing_price(ticker: impl Into<String>) -> Self {
        Self::MissingPrice {
            ticker: ticker.into(),
        }
    }

    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Returns true for validation failures (including unparseable dates).
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. } | Self::InvalidDate { .. })
    }

    /// Returns true for missing-price failures.
    #[must_use]
    pub fn is_missing_price(&self) -> bool {
        matches!(self, Self::MissingPrice { .. })
    }

    /// Row index of a validation failure, if any.
    #[must_use]
    pub fn row_index(&self) -> Option<usize> {
        match self {
            Self::Validation { location, .. } => location.0,
            _ => None,
        }
    }
}
