//! # clima-climatology
//!
//! Time aggregation of daily model series: calendar-month climatology, annual
//! series, anomalies against a historical baseline, and wind-rose frequencies.
//!
//! Every function takes parallel `&[ModelDate]` / `&[f64]` slices, so callers
//! keep ownership of the loaded series. Missing values (`NaN`) are skipped in
//! every reduction.
//!
//! ## Aggregation policy
//!
//! Accumulative variables (precipitation-like) aggregate over a month or year
//! by **sum**; all other variables by **mean**. [`AggregationPolicy`] decides
//! from the variable name.

mod aggregation;
mod annual;
mod anomaly;
mod error;
mod monthly;
mod wind;

pub use aggregation::{Aggregation, AggregationPolicy};
pub use annual::{AnnualValue, annual_aggregate, annual_maxima, series_mean};
pub use anomaly::{annual_anomaly, monthly_anomaly};
pub use error::ClimatologyError;
pub use monthly::{MonthlyClimatology, MonthlyValue, monthly_aggregate, monthly_climatology};
pub use wind::{WindRose, wind_direction};

use clima_calendar::ModelDate;

/// Reject date/value slices of different lengths.
pub(crate) fn check_lengths(dates: &[ModelDate], values: &[f64]) -> Result<(), ClimatologyError> {
    if dates.len() != values.len() {
        return Err(ClimatologyError::LengthMismatch {
            left: dates.len(),
            right: values.len(),
        });
    }
    Ok(())
}
