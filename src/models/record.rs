//! Health record entity model
//!
//! This module contains the `HealthRecord` model, a point-in-time observation
//! linking one subject to one diagnosed condition. Records are produced by
//! the persistence layer and consumed read-only by the aggregation and
//! forecasting core.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::types::{Gender, OutbreakStatus, RiskLevel, Severity};

/// Demographic attributes of the subject behind a record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Demographics {
    /// Age in whole years
    pub age: u32,
    /// Gender of the subject
    pub gender: Gender,
    /// Socioeconomic status label (e.g. "Low", "Middle", "High")
    pub socioeconomic_status: String,
    /// Whether the subject is vaccinated
    pub vaccination_status: bool,
    /// Id of the location the subject belongs to
    pub location_id: u32,
}

impl Demographics {
    /// Create demographics for a subject
    #[must_use]
    pub fn new(age: u32, gender: Gender, socioeconomic_status: impl Into<String>) -> Self {
        Self {
            age,
            gender,
            socioeconomic_status: socioeconomic_status.into(),
            vaccination_status: false,
            location_id: 0,
        }
    }

    /// Set the vaccination status
    #[must_use]
    pub const fn vaccinated(mut self, status: bool) -> Self {
        self.vaccination_status = status;
        self
    }

    /// Set the subject's location
    #[must_use]
    pub const fn at_location(mut self, location_id: u32) -> Self {
        self.location_id = location_id;
        self
    }
}

/// Environmental reading attached to a record
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentalReading {
    /// Air quality index at collection time
    pub air_quality_index: i32,
    /// Temperature in degrees Celsius
    pub temperature: f64,
    /// Relative humidity percentage
    pub humidity: f64,
}

impl EnvironmentalReading {
    /// Create a new environmental reading
    #[must_use]
    pub const fn new(air_quality_index: i32, temperature: f64, humidity: f64) -> Self {
        Self {
            air_quality_index,
            temperature,
            humidity,
        }
    }
}

/// A point-in-time health observation for one subject and one condition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthRecord {
    /// Calendar date the observation was collected
    pub collection_date: NaiveDate,
    /// Id of the diagnosed disease
    pub disease_id: u32,
    /// Name of the diagnosed disease
    pub disease_name: String,
    /// Disease type (e.g. "Viral", "Bacterial")
    pub disease_type: String,
    /// Severity of the condition at collection time
    pub severity: Severity,
    /// Infection risk level
    pub risk_level: RiskLevel,
    /// Outbreak status
    pub outbreak_status: OutbreakStatus,
    /// Whether the subject required hospitalization
    pub hospitalization_required: bool,
    /// Demographic attributes of the subject
    pub demographics: Demographics,
    /// Environmental reading at collection, when available
    pub environment: Option<EnvironmentalReading>,
}

impl HealthRecord {
    /// Create a new record with the neutral category for every
    /// classification field
    #[must_use]
    pub fn new(
        collection_date: NaiveDate,
        disease_id: u32,
        disease_name: impl Into<String>,
        disease_type: impl Into<String>,
        demographics: Demographics,
    ) -> Self {
        Self {
            collection_date,
            disease_id,
            disease_name: disease_name.into(),
            disease_type: disease_type.into(),
            severity: Severity::None,
            risk_level: RiskLevel::Low,
            outbreak_status: OutbreakStatus::None,
            hospitalization_required: false,
            demographics,
            environment: None,
        }
    }

    /// Set the severity classification
    #[must_use]
    pub const fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Set the infection risk level
    #[must_use]
    pub const fn with_risk_level(mut self, risk_level: RiskLevel) -> Self {
        self.risk_level = risk_level;
        self
    }

    /// Set the outbreak status
    #[must_use]
    pub const fn with_outbreak_status(mut self, status: OutbreakStatus) -> Self {
        self.outbreak_status = status;
        self
    }

    /// Mark the record as requiring hospitalization
    #[must_use]
    pub const fn hospitalized(mut self, required: bool) -> Self {
        self.hospitalization_required = required;
        self
    }

    /// Attach an environmental reading
    #[must_use]
    pub const fn with_environment(mut self, reading: EnvironmentalReading) -> Self {
        self.environment = Some(reading);
        self
    }
}
