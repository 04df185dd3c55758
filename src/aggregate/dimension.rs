//! Grouping dimensions for record aggregation
//!
//! The original dashboard dispatched on ad hoc query-string parameters; here
//! the grouping key is an explicit tagged choice.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// The categorical or derived field records are grouped by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    /// Disease severity distribution
    Severity,
    /// Infection risk level distribution
    RiskLevel,
    /// Outbreak status distribution
    OutbreakStatus,
    /// Disease prevalence (top-K by count for chart display)
    DiseaseName,
    /// Records by disease type
    DiseaseType,
    /// Age distribution over the six fixed buckets
    AgeBucket,
    /// Gender distribution
    Gender,
    /// Socioeconomic status distribution
    SocioeconomicStatus,
    /// Vaccinated vs. not vaccinated
    VaccinationStatus,
    /// Hospitalized vs. not hospitalized
    Hospitalization,
    /// Records per calendar day
    CollectionDate,
}

impl Dimension {
    /// Canonical query key for this dimension
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Severity => "severity",
            Self::RiskLevel => "risk_level",
            Self::OutbreakStatus => "outbreak_status",
            Self::DiseaseName => "disease_name",
            Self::DiseaseType => "disease_type",
            Self::AgeBucket => "age_bucket",
            Self::Gender => "gender",
            Self::SocioeconomicStatus => "socioeconomic_status",
            Self::VaccinationStatus => "vaccination_status",
            Self::Hospitalization => "hospitalization",
            Self::CollectionDate => "collection_date",
        }
    }
}

impl FromStr for Dimension {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "severity" | "disease_severity" => Ok(Self::Severity),
            "risk_level" | "infection_risk_level" => Ok(Self::RiskLevel),
            "outbreak_status" => Ok(Self::OutbreakStatus),
            "disease_name" | "disease" => Ok(Self::DiseaseName),
            "disease_type" => Ok(Self::DiseaseType),
            "age_bucket" | "age_group" | "age" => Ok(Self::AgeBucket),
            "gender" => Ok(Self::Gender),
            "socioeconomic_status" | "socioeconomic" => Ok(Self::SocioeconomicStatus),
            "vaccination_status" | "vaccination" => Ok(Self::VaccinationStatus),
            "hospitalization" | "hospitalization_required" => Ok(Self::Hospitalization),
            "collection_date" | "date" => Ok(Self::CollectionDate),
            other => Err(Error::InvalidDimension(other.to_string())),
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}
