//! Catalog entities and filter-id resolution
//!
//! Locations and diseases are owned by the persistence layer; the core only
//! needs to resolve the ids referenced by record filters. The
//! `EntityResolver` trait is the seam towards that layer, with an in-memory
//! `Catalog` implementation for tests and self-contained callers.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Location category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocationKind {
    /// Dense urban area
    Urban,
    /// Suburban area
    Suburban,
    /// Rural area
    Rural,
}

impl From<&str> for LocationKind {
    fn from(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "urban" | "1" => Self::Urban,
            "suburban" | "2" => Self::Suburban,
            _ => Self::Rural,
        }
    }
}

/// A geographic location records can be filtered by
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Location id
    pub id: u32,
    /// Display name
    pub name: String,
    /// Location category
    pub kind: LocationKind,
    /// Resident population
    pub population: u32,
}

impl Location {
    /// Create a new location
    #[must_use]
    pub fn new(id: u32, name: impl Into<String>, kind: LocationKind, population: u32) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            population,
        }
    }
}

/// A disease records can be filtered by
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Disease {
    /// Disease id
    pub id: u32,
    /// Display name
    pub name: String,
    /// Disease type (e.g. "Viral", "Bacterial", "Parasitic")
    pub kind: String,
    /// Contagion rate in [0, 1]
    pub contagion_rate: f64,
    /// Incubation period in days
    pub incubation_days: u32,
}

impl Disease {
    /// Create a new disease
    #[must_use]
    pub fn new(
        id: u32,
        name: impl Into<String>,
        kind: impl Into<String>,
        contagion_rate: f64,
        incubation_days: u32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            kind: kind.into(),
            contagion_rate,
            incubation_days,
        }
    }
}

/// Resolution of filter ids to catalog entities
///
/// A failed lookup is reported as `NotFound`; implementations must never
/// substitute a different entity for a missing id.
pub trait EntityResolver {
    /// Resolve a location id
    fn resolve_location(&self, id: u32) -> Result<&Location>;

    /// Resolve a disease id
    fn resolve_disease(&self, id: u32) -> Result<&Disease>;
}

impl<T: EntityResolver + ?Sized> EntityResolver for &T {
    fn resolve_location(&self, id: u32) -> Result<&Location> {
        (**self).resolve_location(id)
    }

    fn resolve_disease(&self, id: u32) -> Result<&Disease> {
        (**self).resolve_disease(id)
    }
}

/// In-memory catalog of locations and diseases
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    locations: FxHashMap<u32, Location>,
    diseases: FxHashMap<u32, Disease>,
}

impl Catalog {
    /// Create a new empty catalog
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a location, replacing any previous entry with the same id
    pub fn add_location(&mut self, location: Location) {
        self.locations.insert(location.id, location);
    }

    /// Add a disease, replacing any previous entry with the same id
    pub fn add_disease(&mut self, disease: Disease) {
        self.diseases.insert(disease.id, disease);
    }

    /// Number of locations in the catalog
    #[must_use]
    pub fn location_count(&self) -> usize {
        self.locations.len()
    }

    /// Number of diseases in the catalog
    #[must_use]
    pub fn disease_count(&self) -> usize {
        self.diseases.len()
    }

    /// Iterate over all diseases
    pub fn diseases(&self) -> impl Iterator<Item = &Disease> {
        self.diseases.values()
    }

    /// Iterate over all locations
    pub fn locations(&self) -> impl Iterator<Item = &Location> {
        self.locations.values()
    }
}

impl EntityResolver for Catalog {
    fn resolve_location(&self, id: u32) -> Result<&Location> {
        self.locations.get(&id).ok_or(Error::LocationNotFound(id))
    }

    fn resolve_disease(&self, id: u32) -> Result<&Disease> {
        self.diseases.get(&id).ok_or(Error::DiseaseNotFound(id))
    }
}
