//! The aggregation engine
//!
//! A pure, request-scoped computation: the `Aggregator` reads a supplied
//! record collection, applies filters, groups by the requested dimension,
//! and emits a chart-ready series. It holds no mutable state and performs
//! no I/O.

use chrono::NaiveDate;
use log::{debug, warn};

use crate::aggregate::dimension::Dimension;
use crate::aggregate::filters::{DateRange, RecordFilter};
use crate::aggregate::series::{
    boolean_series, counted_series, daily_count_series, date_series, CategorySeries, ChartSeries,
    DailyBreakdown,
};
use crate::config::{AggregateConfig, FilterFallback};
use crate::error::Result;
use crate::models::catalog::EntityResolver;
use crate::models::record::HealthRecord;
use crate::models::types::{AgeBucket, Severity};

/// Fixed label order for the vaccination-status dimension
pub const VACCINATION_LABELS: [&str; 2] = ["Vaccinated", "Not Vaccinated"];

/// Fixed label order for the hospitalization dimension
pub const HOSPITALIZATION_LABELS: [&str; 2] = ["Hospitalized", "Not Hospitalized"];

/// Groups health records into chart-ready series
#[derive(Debug, Clone)]
pub struct Aggregator<R> {
    resolver: R,
    config: AggregateConfig,
}

impl<R: EntityResolver> Aggregator<R> {
    /// Create an aggregator with the default configuration
    #[must_use]
    pub fn new(resolver: R) -> Self {
        Self {
            resolver,
            config: AggregateConfig::default(),
        }
    }

    /// Replace the configuration
    #[must_use]
    pub fn with_config(mut self, config: AggregateConfig) -> Self {
        self.config = config;
        self
    }

    /// The active configuration
    #[must_use]
    pub const fn config(&self) -> &AggregateConfig {
        &self.config
    }

    /// Group `records` by `dimension` after applying `filter`
    ///
    /// # Errors
    /// `NotFound` when a location or disease filter id does not resolve and
    /// the configured fallback is `FilterFallback::Error`.
    pub fn aggregate(
        &self,
        records: &[HealthRecord],
        dimension: Dimension,
        filter: &RecordFilter,
    ) -> Result<ChartSeries> {
        let filter = self.effective_filter(filter)?;
        let selected = self.select(records, &filter);

        let series = match dimension {
            Dimension::Severity => {
                counted_series(&selected, |r| r.severity.label().to_string())
            }
            Dimension::RiskLevel => {
                counted_series(&selected, |r| r.risk_level.label().to_string())
            }
            Dimension::OutbreakStatus => {
                counted_series(&selected, |r| r.outbreak_status.label().to_string())
            }
            Dimension::DiseaseName => {
                let mut series = counted_series(&selected, |r| r.disease_name.clone());
                if let Some(k) = self.config.top_diseases {
                    series.truncate(k);
                }
                series
            }
            Dimension::DiseaseType => counted_series(&selected, |r| r.disease_type.clone()),
            Dimension::AgeBucket => counted_series(&selected, |r| {
                AgeBucket::from_age(r.demographics.age).label().to_string()
            }),
            Dimension::Gender => {
                counted_series(&selected, |r| r.demographics.gender.label().to_string())
            }
            Dimension::SocioeconomicStatus => {
                counted_series(&selected, |r| r.demographics.socioeconomic_status.clone())
            }
            Dimension::VaccinationStatus => boolean_series(&selected, VACCINATION_LABELS, |r| {
                r.demographics.vaccination_status
            }),
            Dimension::Hospitalization => {
                boolean_series(&selected, HOSPITALIZATION_LABELS, |r| {
                    r.hospitalization_required
                })
            }
            Dimension::CollectionDate => date_series(&selected, filter.date_range.as_ref()),
        };

        debug!(
            "aggregated {} records into {} groups by {dimension}",
            selected.len(),
            series.len()
        );
        Ok(series)
    }

    /// Records per day as an ascending `(date, count)` sequence, the input
    /// shape the forecaster consumes
    ///
    /// The axis is densified over the filter's date range when one is set.
    pub fn daily_series(
        &self,
        records: &[HealthRecord],
        filter: &RecordFilter,
    ) -> Result<Vec<(NaiveDate, u64)>> {
        let filter = self.effective_filter(filter)?;
        let selected = self.select(records, &filter);
        Ok(daily_count_series(&selected, filter.date_range.as_ref()))
    }

    /// Day-by-day totals over a bounded range, broken down by severity
    ///
    /// Every day of `range` appears in every severity's sub-series, with
    /// zero-filled entries for days without records in that category.
    pub fn daily_breakdown(
        &self,
        records: &[HealthRecord],
        range: DateRange,
        filter: &RecordFilter,
    ) -> Result<DailyBreakdown> {
        let mut filter = self.effective_filter(filter)?;
        filter.date_range = Some(range);
        let selected = self.select(records, &filter);

        let dates = range.days();
        let day_index = |date: NaiveDate| -> Option<usize> {
            let offset = date.signed_duration_since(range.start).num_days();
            usize::try_from(offset).ok()
        };

        let mut totals = vec![0_u64; dates.len()];
        let mut matrix: Vec<Vec<u64>> = vec![vec![0_u64; dates.len()]; Severity::ALL.len()];
        for record in &selected {
            let Some(day) = day_index(record.collection_date) else {
                continue;
            };
            totals[day] += 1;
            matrix[record.severity.ordinal() as usize][day] += 1;
        }

        let series = Severity::ALL
            .iter()
            .zip(matrix)
            .map(|(severity, values)| CategorySeries {
                label: severity.label().to_string(),
                values,
            })
            .collect();

        Ok(DailyBreakdown {
            dates,
            totals,
            series,
        })
    }

    /// Resolve entity filter ids, applying the configured fallback
    fn effective_filter(&self, filter: &RecordFilter) -> Result<RecordFilter> {
        let mut filter = filter.clone();

        if let Some(id) = filter.location {
            if let Err(err) = self.resolver.resolve_location(id) {
                match self.config.missing_entity {
                    FilterFallback::Error => return Err(err),
                    FilterFallback::IgnoreFilter => {
                        warn!("ignoring unresolvable location filter: {err}");
                        filter.location = None;
                    }
                }
            }
        }

        if let Some(id) = filter.disease {
            if let Err(err) = self.resolver.resolve_disease(id) {
                match self.config.missing_entity {
                    FilterFallback::Error => return Err(err),
                    FilterFallback::IgnoreFilter => {
                        warn!("ignoring unresolvable disease filter: {err}");
                        filter.disease = None;
                    }
                }
            }
        }

        Ok(filter)
    }

    /// Apply the filter and the configured record cap
    fn select<'a>(&self, records: &'a [HealthRecord], filter: &RecordFilter) -> Vec<&'a HealthRecord> {
        let mut selected: Vec<&HealthRecord> =
            records.iter().filter(|record| filter.matches(record)).collect();

        if let Some(cap) = self.config.record_cap {
            if selected.len() > cap {
                warn!(
                    "record cap {cap} truncated {} matching records",
                    selected.len()
                );
                selected.truncate(cap);
            }
        }

        selected
    }
}
