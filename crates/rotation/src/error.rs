//! Error types for rotation analytics.

use thiserror::Error;

/// Result type for rotation operations.
pub type Result<T> = std::result::Result<T, RotationError>;

/// Errors that can occur during rotation analysis.
#[derive(Debug, Error)]
pub enum RotationError {
    /// Non-positive reporting period
    #[error("Invalid period: {days} days (must be at least 1)")]
    InvalidPeriod {
        /// Period length supplied by the caller
        days: i64,
    },

    /// Invalid date range
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// Start date of the range
        start: String,
        /// End date of the range
        end: String,
    },

    /// Input row rejected under strict validation
    #[error("Malformed record for ({product}, {store}): {reason}")]
    MalformedRecord {
        /// Product key of the offending row
        product: String,
        /// Store key of the offending row
        store: String,
        /// What made the row invalid
        reason: String,
    },

    /// Polars DataFrame error
    #[error("DataFrame error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Computation error
    #[error("Computation error: {0}")]
    Computation(String),
}
