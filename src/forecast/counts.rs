//! Daily case-count extrapolation
//!
//! Consumes the aggregator's daily series and extends it with future
//! predictions. Forecast quality is demonstrative: the point is a plausible
//! trend line for the dashboard, not an epidemiological model.

use chrono::{Days, NaiveDate};
use itertools::Itertools;
use log::debug;

use crate::forecast::forest::{ForestConfig, ForestRegressor};

/// Predict the next `horizon` daily counts from an observed series
///
/// The sequence index is the explanatory variable and the count the
/// response. Fewer than 2 observed points fall back to repeating the last
/// known count (0 for an empty series) — a defined degenerate-case policy,
/// not an error. Predictions are clamped at 0 and truncated to integers.
#[must_use]
pub fn forecast_counts(series: &[(NaiveDate, u64)], horizon: usize) -> Vec<u64> {
    let last = series.last().map_or(0, |(_, count)| *count);
    if series.len() < 2 {
        return vec![last; horizon];
    }

    let xs = (0..series.len()).map(|i| i as f64).collect_vec();
    let ys = series.iter().map(|(_, count)| *count as f64).collect_vec();

    // Counts are always finite, so this fit only fails on impossible input
    let Ok(forest) = ForestRegressor::fit(&xs, &ys, &ForestConfig::default()) else {
        return vec![last; horizon];
    };

    let predictions = (series.len()..series.len() + horizon)
        .map(|index| forest.predict(index as f64).max(0.0) as u64)
        .collect_vec();

    debug!(
        "forecast {horizon} days from {} observed points",
        series.len()
    );
    predictions
}

/// The `horizon` consecutive calendar days following `last`
#[must_use]
pub fn future_dates(last: NaiveDate, horizon: usize) -> Vec<NaiveDate> {
    (1..=horizon)
        .map(|offset| last + Days::new(offset as u64))
        .collect()
}
