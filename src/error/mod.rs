//! Error handling for the aggregation and forecasting core.

/// Specialized error type for aggregation and forecasting operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An unknown grouping dimension was requested
    #[error("unknown aggregation dimension: '{0}'")]
    InvalidDimension(String),

    /// A location filter referenced an id with no matching location
    #[error("location {0} not found")]
    LocationNotFound(u32),

    /// A disease filter referenced an id with no matching disease
    #[error("disease {0} not found")]
    DiseaseNotFound(u32),

    /// Malformed numeric input passed to a model fit
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, Error>;
