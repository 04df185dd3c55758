//! Domain models for the surveillance reporting core
//!
//! This module contains the entity models consumed by the aggregation and
//! forecasting components, plus the catalog seam towards the persistence
//! layer.

pub mod catalog;
pub mod record;
pub mod types;

// Re-export commonly used types
pub use catalog::{Catalog, Disease, EntityResolver, Location, LocationKind};
pub use record::{Demographics, EnvironmentalReading, HealthRecord};
pub use types::{AgeBucket, Gender, OutbreakStatus, RiskLevel, Severity};
