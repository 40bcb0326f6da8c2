//! Error types for the demand_forecast crate

use crate::horizon::Horizon;
use thiserror::Error;

/// Custom error types for the demand_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Caller-supplied input failed validation (unknown horizon, bad period
    /// count, malformed date)
    #[error("Validation error: {0}")]
    Validation(String),

    /// No data exists for the request (e.g. none of the product ids match)
    #[error("No matching data: {0}")]
    DataAbsent(String),

    /// The artifact for a horizon never loaded; the horizon is unusable
    #[error("Model for {0} predictions not available")]
    ModelUnavailable(Horizon),

    /// An artifact was present but inconsistent (schema mismatch, bad tree)
    #[error("Artifact configuration error: {0}")]
    Configuration(String),

    /// Failure inside feature building or model invocation
    #[error("Computation error: {0}")]
    Computation(String),

    /// Error from IO operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error decoding a serialized artifact
    #[error("Artifact decode error: {0}")]
    ArtifactDecode(#[from] serde_json::Error),

    /// Error from the transactional store
    #[error("Store error: {0}")]
    Store(#[from] store_data::StoreError),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;
