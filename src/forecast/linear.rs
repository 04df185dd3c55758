//! Ordinary least-squares correlation model
//!
//! Relates one explanatory variable to one response — in the dashboard, an
//! environmental index to the severity ordinal — and produces an evenly
//! stepped prediction line for scatter charts.

use serde::Serialize;

use crate::error::{Error, Result};

/// How far past the largest x the prediction line extends
pub const RANGE_EXTENSION: f64 = 10.0;

/// Default step between prediction-line points
pub const DEFAULT_STEP: f64 = 5.0;

/// A fitted `y = slope * x + intercept` model
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearModel {
    /// Slope of the fit line
    pub slope: f64,
    /// Intercept of the fit line
    pub intercept: f64,
}

impl LinearModel {
    /// Predict the response at `x`
    #[must_use]
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// A single chart point
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    /// Explanatory value
    pub x: f64,
    /// Predicted or observed response
    pub y: f64,
}

/// Fit y on x by ordinary least squares
///
/// Fewer than 2 points produce no model (`Ok(None)`), a defined fallback
/// rather than an error: the caller omits the correlation chart. Zero
/// variance in x fits a flat line through the mean response.
///
/// # Errors
/// `InvalidInput` when any coordinate is non-finite.
pub fn fit_linear(points: &[(f64, f64)]) -> Result<Option<LinearModel>> {
    if points
        .iter()
        .any(|(x, y)| !x.is_finite() || !y.is_finite())
    {
        return Err(Error::InvalidInput(
            "non-finite regression point".to_string(),
        ));
    }
    if points.len() < 2 {
        return Ok(None);
    }

    let n = points.len() as f64;
    let mean_x = points.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = points.iter().map(|(_, y)| y).sum::<f64>() / n;

    let sxx: f64 = points.iter().map(|(x, _)| (x - mean_x).powi(2)).sum();
    let sxy: f64 = points
        .iter()
        .map(|(x, y)| (x - mean_x) * (y - mean_y))
        .sum();

    let slope = if sxx == 0.0 { 0.0 } else { sxy / sxx };
    let intercept = mean_y - slope * mean_x;

    Ok(Some(LinearModel { slope, intercept }))
}

/// Build the evenly stepped prediction line for a scatter chart
///
/// X values span `[min(x), max(x) + RANGE_EXTENSION]` inclusive, stepped by
/// `step`; each carries the model's predicted response. Fewer than 2 input
/// points produce an empty line.
///
/// # Errors
/// `InvalidInput` when a coordinate is non-finite or `step` is not positive.
pub fn correlation_line(points: &[(f64, f64)], step: f64) -> Result<Vec<Point>> {
    if !(step.is_finite() && step > 0.0) {
        return Err(Error::InvalidInput(format!(
            "correlation step must be positive, got {step}"
        )));
    }
    let Some(model) = fit_linear(points)? else {
        return Ok(Vec::new());
    };

    let min_x = points.iter().map(|(x, _)| *x).fold(f64::INFINITY, f64::min);
    let max_x = points
        .iter()
        .map(|(x, _)| *x)
        .fold(f64::NEG_INFINITY, f64::max);

    let span = max_x + RANGE_EXTENSION - min_x;
    let steps = (span / step).floor() as usize;
    let line = (0..=steps)
        .map(|i| {
            let x = min_x + i as f64 * step;
            Point {
                x,
                y: model.predict(x),
            }
        })
        .collect();

    Ok(line)
}
