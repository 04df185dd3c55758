//! Aggregation and forecasting core for a health-surveillance reporting
//! dashboard: grouped counts over stored health records, and a simple
//! regression-based extrapolation of the daily case series.
//!
//! The persistence layer that produces records and the web layer that
//! renders charts are external collaborators; everything in this crate is a
//! pure, synchronous function over a supplied record collection.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod forecast;
pub mod models;
pub mod report;

// Re-export the most common types for easier use
// Core types
pub use config::{AggregateConfig, FilterFallback};
pub use error::{Error, Result};

// Aggregation
pub use aggregate::{
    Aggregator, CategorySeries, ChartSeries, DailyBreakdown, DateRange, Dimension, RecordFilter,
};

// Forecasting
pub use forecast::{
    correlation_line, fit_linear, forecast_counts, future_dates, ForestConfig, ForestRegressor,
    LinearModel, Point,
};

// Domain models
pub use models::{
    AgeBucket, Catalog, Demographics, Disease, EntityResolver, EnvironmentalReading, Gender,
    HealthRecord, Location, LocationKind, OutbreakStatus, RiskLevel, Severity,
};
