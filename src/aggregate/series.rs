//! Chart-ready series construction
//!
//! Grouped counts are emitted as parallel `labels`/`values` sequences,
//! aligned by construction: labels are produced by a single pass over the
//! grouped rows and never re-sorted independently of their counts.

use chrono::NaiveDate;
use itertools::Itertools;
use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::aggregate::filters::DateRange;
use crate::models::record::HealthRecord;

/// An aligned `(labels, values)` pair ready for a charting payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartSeries {
    /// Group labels, one per value
    pub labels: Vec<String>,
    /// Group counts, one per label
    pub values: Vec<u64>,
}

impl ChartSeries {
    /// Number of groups in the series
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the series has no groups
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Total count across all groups
    #[must_use]
    pub fn total(&self) -> u64 {
        self.values.iter().sum()
    }

    /// Keep only the first `k` groups
    pub fn truncate(&mut self, k: usize) {
        self.labels.truncate(k);
        self.values.truncate(k);
    }
}

/// One category's zero-filled sub-series in a daily breakdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySeries {
    /// Category label
    pub label: String,
    /// One count per day of the date axis
    pub values: Vec<u64>,
}

/// A dense day-by-day matrix: totals plus one sub-series per category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyBreakdown {
    /// Completed date axis, every day of the bounded range
    pub dates: Vec<NaiveDate>,
    /// Total records per day
    pub totals: Vec<u64>,
    /// Zero-filled per-category sub-series, each as long as `dates`
    pub series: Vec<CategorySeries>,
}

/// Count records per label, ordered descending by count with ties broken
/// by first-encountered order
pub(crate) fn counted_series<F>(records: &[&HealthRecord], key: F) -> ChartSeries
where
    F: Fn(&HealthRecord) -> String,
{
    let mut first_seen: Vec<String> = Vec::new();
    let mut counts: FxHashMap<String, u64> = FxHashMap::default();

    for &record in records {
        let label = key(record);
        if !counts.contains_key(&label) {
            first_seen.push(label.clone());
        }
        *counts.entry(label).or_insert(0) += 1;
    }

    let rows = first_seen
        .into_iter()
        .enumerate()
        .map(|(order, label)| {
            let count = counts[&label];
            (label, count, order)
        })
        .sorted_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)))
        .collect_vec();

    let mut labels = Vec::with_capacity(rows.len());
    let mut values = Vec::with_capacity(rows.len());
    for (label, count, _) in rows {
        labels.push(label);
        values.push(count);
    }

    ChartSeries { labels, values }
}

/// Count a boolean discriminant into exactly two fixed-order groups
pub(crate) fn boolean_series<F>(
    records: &[&HealthRecord],
    labels: [&str; 2],
    predicate: F,
) -> ChartSeries
where
    F: Fn(&HealthRecord) -> bool,
{
    let truthy = records.iter().filter(|&&record| predicate(record)).count() as u64;
    let falsy = records.len() as u64 - truthy;

    ChartSeries {
        labels: vec![labels[0].to_string(), labels[1].to_string()],
        values: vec![truthy, falsy],
    }
}

/// Count records per collection day
///
/// With a bounded range the axis is dense (every day of the range appears,
/// gap days zero-filled); without one it is the ascending list of days that
/// actually carry records.
pub(crate) fn date_series(records: &[&HealthRecord], range: Option<&DateRange>) -> ChartSeries {
    let counts = daily_counts(records);

    let dates: Vec<NaiveDate> = match range {
        Some(range) => range.days(),
        None => counts.keys().copied().sorted().collect_vec(),
    };

    let mut labels = Vec::with_capacity(dates.len());
    let mut values = Vec::with_capacity(dates.len());
    for date in dates {
        labels.push(date.format("%Y-%m-%d").to_string());
        values.push(counts.get(&date).copied().unwrap_or(0));
    }

    ChartSeries { labels, values }
}

/// Records per day as an ascending `(date, count)` sequence, densified over
/// the range when one is given
pub(crate) fn daily_count_series(
    records: &[&HealthRecord],
    range: Option<&DateRange>,
) -> Vec<(NaiveDate, u64)> {
    let counts = daily_counts(records);

    let dates: Vec<NaiveDate> = match range {
        Some(range) => range.days(),
        None => counts.keys().copied().sorted().collect_vec(),
    };

    dates
        .into_iter()
        .map(|date| (date, counts.get(&date).copied().unwrap_or(0)))
        .collect()
}

fn daily_counts(records: &[&HealthRecord]) -> FxHashMap<NaiveDate, u64> {
    let mut counts: FxHashMap<NaiveDate, u64> = FxHashMap::default();
    for &record in records {
        *counts.entry(record.collection_date).or_insert(0) += 1;
    }
    counts
}
