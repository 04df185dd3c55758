//! Chart payload builders for the presentation layer
//!
//! Each function assembles one dashboard payload from raw records: summary
//! distributions, daily trends with a severity breakdown, the case-count
//! forecast, and the environmental correlation. Everything returned here is
//! `Serialize` and goes straight into whatever transport the caller uses.

use chrono::NaiveDate;
use rustc_hash::FxHashSet;
use serde::Serialize;

use crate::aggregate::{Aggregator, ChartSeries, DailyBreakdown, DateRange, Dimension, RecordFilter};
use crate::error::Result;
use crate::forecast::{correlation_line, forecast_counts, future_dates, Point, DEFAULT_STEP};
use crate::models::catalog::EntityResolver;
use crate::models::record::HealthRecord;

/// Headline numbers and the three distribution charts of the landing page
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    /// Total number of stored records
    pub total_records: usize,
    /// Number of distinct diseases across the records
    pub distinct_diseases: usize,
    /// Number of distinct locations across the records
    pub distinct_locations: usize,
    /// Number of records that required hospitalization
    pub hospitalized: usize,
    /// Severity distribution
    pub severity: ChartSeries,
    /// Risk level distribution
    pub risk: ChartSeries,
    /// Outbreak status distribution
    pub outbreak: ChartSeries,
}

/// Build the landing-page summary
pub fn dashboard_summary<R: EntityResolver>(
    aggregator: &Aggregator<R>,
    records: &[HealthRecord],
) -> Result<DashboardSummary> {
    let filter = RecordFilter::new();

    let diseases: FxHashSet<u32> = records.iter().map(|r| r.disease_id).collect();
    let locations: FxHashSet<u32> = records
        .iter()
        .map(|r| r.demographics.location_id)
        .collect();

    Ok(DashboardSummary {
        total_records: records.len(),
        distinct_diseases: diseases.len(),
        distinct_locations: locations.len(),
        hospitalized: records.iter().filter(|r| r.hospitalization_required).count(),
        severity: aggregator.aggregate(records, Dimension::Severity, &filter)?,
        risk: aggregator.aggregate(records, Dimension::RiskLevel, &filter)?,
        outbreak: aggregator.aggregate(records, Dimension::OutbreakStatus, &filter)?,
    })
}

/// Daily totals plus dense per-severity sub-series over a reporting window
///
/// Without an explicit range the window defaults to the 30 days ending
/// today.
pub fn trend_report<R: EntityResolver>(
    aggregator: &Aggregator<R>,
    records: &[HealthRecord],
    range: Option<DateRange>,
) -> Result<DailyBreakdown> {
    let range = range.unwrap_or_else(DateRange::default_window);
    aggregator.daily_breakdown(records, range, &RecordFilter::new())
}

/// Observed daily series extended with future predictions
#[derive(Debug, Clone, Serialize)]
pub struct ForecastReport {
    /// Observed dates in ascending order
    pub dates: Vec<NaiveDate>,
    /// Observed counts, aligned with `dates`
    pub counts: Vec<u64>,
    /// Future dates continuing from the last observed day
    pub prediction_dates: Vec<NaiveDate>,
    /// Predicted counts, aligned with `prediction_dates`
    pub prediction_counts: Vec<u64>,
}

/// Build the case-count forecast payload
///
/// A bounded window densifies the observed axis, so gap days forecast as
/// zeros rather than being skipped. With no observed days at all there is
/// no last date to extend from and the payload is empty on both sides.
pub fn forecast_report<R: EntityResolver>(
    aggregator: &Aggregator<R>,
    records: &[HealthRecord],
    range: Option<DateRange>,
    horizon: usize,
) -> Result<ForecastReport> {
    let mut filter = RecordFilter::new();
    filter.date_range = range;
    let series = aggregator.daily_series(records, &filter)?;

    let Some((last_date, _)) = series.last().copied() else {
        return Ok(ForecastReport {
            dates: Vec::new(),
            counts: Vec::new(),
            prediction_dates: Vec::new(),
            prediction_counts: Vec::new(),
        });
    };

    let prediction_counts = forecast_counts(&series, horizon);
    let (dates, counts) = series.into_iter().unzip();

    Ok(ForecastReport {
        dates,
        counts,
        prediction_dates: future_dates(last_date, horizon),
        prediction_counts,
    })
}

/// One record's environmental context for scatter analysis
#[derive(Debug, Clone, Copy, Serialize)]
pub struct EnvironmentalSample {
    /// Air quality index
    pub air_quality_index: i32,
    /// Temperature in degrees Celsius
    pub temperature: f64,
    /// Relative humidity percentage
    pub humidity: f64,
    /// Severity ordinal of the record
    pub severity: u8,
    /// Collection date
    pub date: NaiveDate,
}

/// Extract environmental samples from records that carry a reading
///
/// Records without an environmental reading are skipped. `cap` bounds the
/// number of samples for cost control; `None` keeps them all.
#[must_use]
pub fn environmental_impact(
    records: &[HealthRecord],
    cap: Option<usize>,
) -> Vec<EnvironmentalSample> {
    let samples = records.iter().filter_map(|record| {
        record.environment.map(|env| EnvironmentalSample {
            air_quality_index: env.air_quality_index,
            temperature: env.temperature,
            humidity: env.humidity,
            severity: record.severity.ordinal(),
            date: record.collection_date,
        })
    });

    match cap {
        Some(cap) => samples.take(cap).collect(),
        None => samples.collect(),
    }
}

/// Scatter points and fitted prediction line for the AQI/severity chart
#[derive(Debug, Clone, Serialize)]
pub struct CorrelationReport {
    /// Observed (AQI, severity ordinal) points
    pub scatter: Vec<Point>,
    /// Evenly stepped OLS prediction line
    pub line: Vec<Point>,
}

/// Relate air quality to severity across records with a reading
///
/// Returns `None` when fewer than 2 records carry an environmental
/// reading — the caller omits the chart entirely.
pub fn aqi_correlation(records: &[HealthRecord]) -> Result<Option<CorrelationReport>> {
    let points: Vec<(f64, f64)> = records
        .iter()
        .filter_map(|record| {
            record.environment.map(|env| {
                (
                    f64::from(env.air_quality_index),
                    f64::from(record.severity.ordinal()),
                )
            })
        })
        .collect();

    let line = correlation_line(&points, DEFAULT_STEP)?;
    if line.is_empty() {
        return Ok(None);
    }

    Ok(Some(CorrelationReport {
        scatter: points.into_iter().map(|(x, y)| Point { x, y }).collect(),
        line,
    }))
}
