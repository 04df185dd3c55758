//! Case-count forecasting and correlation models
//!
//! Two small, deterministic model fits over aggregator output: a bagged
//! regression-tree extrapolation of the daily count series, and an
//! ordinary least-squares correlation between one environmental variable
//! and the severity ordinal.

pub mod counts;
pub mod forest;
pub mod linear;

pub use counts::{forecast_counts, future_dates};
pub use forest::{ForestConfig, ForestRegressor, RegressionTree};
pub use linear::{correlation_line, fit_linear, LinearModel, Point, DEFAULT_STEP, RANGE_EXTENSION};
