//! Record filtering for aggregation queries
//!
//! Filters narrow the input collection before grouping: an inclusive date
//! range, a location, a disease, an age range, and a gender. All matching
//! happens in memory against already-loaded records.

use chrono::{Days, Local, NaiveDate};

use crate::error::{Error, Result};
use crate::models::record::HealthRecord;
use crate::models::types::Gender;

/// An inclusive calendar date range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    /// First day of the range (inclusive)
    pub start: NaiveDate,
    /// Last day of the range (inclusive)
    pub end: NaiveDate,
}

impl DateRange {
    /// Create a range from `start` to `end`, both inclusive
    ///
    /// # Errors
    /// Returns `InvalidInput` if `start` is after `end`
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(Error::InvalidInput(format!(
                "date range start {start} is after end {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// The range of `days` consecutive days ending at `end`
    #[must_use]
    pub fn trailing(end: NaiveDate, days: u32) -> Self {
        let span = u64::from(days.saturating_sub(1));
        Self {
            start: end - Days::new(span),
            end,
        }
    }

    /// The default reporting window: the 30 days ending today
    #[must_use]
    pub fn default_window() -> Self {
        Self::trailing(Local::now().date_naive(), 30)
    }

    /// Whether `date` falls inside the range
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Every day of the range in ascending order
    #[must_use]
    pub fn days(&self) -> Vec<NaiveDate> {
        let span = self.end.signed_duration_since(self.start).num_days();
        (0..=span)
            .map(|offset| self.start + Days::new(offset as u64))
            .collect()
    }
}

/// Optional narrowing criteria applied before grouping
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordFilter {
    /// Keep records collected inside this range
    pub date_range: Option<DateRange>,
    /// Keep records whose subject belongs to this location
    pub location: Option<u32>,
    /// Keep records for this disease
    pub disease: Option<u32>,
    /// Keep subjects at least this old
    pub min_age: Option<u32>,
    /// Keep subjects at most this old
    pub max_age: Option<u32>,
    /// Keep subjects of this gender
    pub gender: Option<Gender>,
}

impl RecordFilter {
    /// Create an empty filter matching every record
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to a date range
    #[must_use]
    pub const fn in_range(mut self, range: DateRange) -> Self {
        self.date_range = Some(range);
        self
    }

    /// Restrict to one location
    #[must_use]
    pub const fn at_location(mut self, location_id: u32) -> Self {
        self.location = Some(location_id);
        self
    }

    /// Restrict to one disease
    #[must_use]
    pub const fn for_disease(mut self, disease_id: u32) -> Self {
        self.disease = Some(disease_id);
        self
    }

    /// Restrict to an age range, both bounds inclusive and optional
    #[must_use]
    pub const fn aged(mut self, min: Option<u32>, max: Option<u32>) -> Self {
        self.min_age = min;
        self.max_age = max;
        self
    }

    /// Restrict to one gender
    #[must_use]
    pub const fn of_gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender);
        self
    }

    /// Whether a record satisfies every criterion
    #[must_use]
    pub fn matches(&self, record: &HealthRecord) -> bool {
        if let Some(range) = &self.date_range {
            if !range.contains(record.collection_date) {
                return false;
            }
        }
        if let Some(location) = self.location {
            if record.demographics.location_id != location {
                return false;
            }
        }
        if let Some(disease) = self.disease {
            if record.disease_id != disease {
                return false;
            }
        }
        if let Some(min) = self.min_age {
            if record.demographics.age < min {
                return false;
            }
        }
        if let Some(max) = self.max_age {
            if record.demographics.age > max {
                return false;
            }
        }
        if let Some(gender) = self.gender {
            if record.demographics.gender != gender {
                return false;
            }
        }
        true
    }
}
