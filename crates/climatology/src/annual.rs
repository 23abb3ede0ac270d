//! Calendar-year aggregation.

use std::collections::BTreeMap;

use clima_calendar::ModelDate;

use crate::aggregation::Aggregation;
use crate::check_lengths;
use crate::error::ClimatologyError;

/// Aggregate of one calendar year.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnnualValue {
    pub year: i32,
    pub value: f64,
}

/// One aggregate per calendar year, in chronological order.
///
/// # Errors
///
/// Returns [`ClimatologyError::LengthMismatch`] if `dates` and `values`
/// differ in length.
pub fn annual_aggregate(
    dates: &[ModelDate],
    values: &[f64],
    aggregation: Aggregation,
) -> Result<Vec<AnnualValue>, ClimatologyError> {
    reduce_by_year(dates, values, |group| aggregation.apply(group))
}

/// Largest finite value of each calendar year (block maxima for extreme-value
/// fitting).
///
/// # Errors
///
/// Returns [`ClimatologyError::LengthMismatch`] if `dates` and `values`
/// differ in length.
pub fn annual_maxima(
    dates: &[ModelDate],
    values: &[f64],
) -> Result<Vec<AnnualValue>, ClimatologyError> {
    reduce_by_year(dates, values, clima_stats::nan_max)
}

/// Mean of the finite annual values; `NaN` if there are none.
pub fn series_mean(annual: &[AnnualValue]) -> f64 {
    let values: Vec<f64> = annual.iter().map(|a| a.value).collect();
    clima_stats::nan_mean(&values)
}

fn reduce_by_year(
    dates: &[ModelDate],
    values: &[f64],
    reduce: impl Fn(&[f64]) -> f64,
) -> Result<Vec<AnnualValue>, ClimatologyError> {
    check_lengths(dates, values)?;

    let mut groups: BTreeMap<i32, Vec<f64>> = BTreeMap::new();
    for (date, &value) in dates.iter().zip(values) {
        groups.entry(date.year()).or_default().push(value);
    }

    Ok(groups
        .into_iter()
        .map(|(year, group)| AnnualValue {
            year,
            value: reduce(&group),
        })
        .collect())
}
