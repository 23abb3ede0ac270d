//! Per-month aggregation and the calendar-month climatology.

use std::collections::BTreeMap;

use clima_calendar::ModelDate;

use crate::aggregation::Aggregation;
use crate::check_lengths;
use crate::error::ClimatologyError;

/// Aggregate of one `(year, month)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyValue {
    pub year: i32,
    /// 1..=12
    pub month: u8,
    pub value: f64,
}

/// Twelve calendar-month values, January first.
///
/// Months with no data hold `NaN`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyClimatology([f64; 12]);

impl MonthlyClimatology {
    pub fn new(values: [f64; 12]) -> Self {
        Self(values)
    }

    /// Value for `month` (1..=12). Out-of-range months give `NaN`.
    pub fn get(&self, month: u8) -> f64 {
        match month {
            1..=12 => self.0[usize::from(month) - 1],
            _ => f64::NAN,
        }
    }

    pub fn values(&self) -> &[f64; 12] {
        &self.0
    }

    /// `(month, value)` pairs, January first.
    pub fn iter(&self) -> impl Iterator<Item = (u8, f64)> + '_ {
        self.0.iter().enumerate().map(|(i, &v)| (i as u8 + 1, v))
    }
}

/// Aggregate a daily series into one value per `(year, month)`.
///
/// Results are in chronological order regardless of the input order.
///
/// # Errors
///
/// Returns [`ClimatologyError::LengthMismatch`] if `dates` and `values`
/// differ in length.
pub fn monthly_aggregate(
    dates: &[ModelDate],
    values: &[f64],
    aggregation: Aggregation,
) -> Result<Vec<MonthlyValue>, ClimatologyError> {
    check_lengths(dates, values)?;

    let mut groups: BTreeMap<(i32, u8), Vec<f64>> = BTreeMap::new();
    for (date, &value) in dates.iter().zip(values) {
        groups
            .entry((date.year(), date.month()))
            .or_default()
            .push(value);
    }

    Ok(groups
        .into_iter()
        .map(|((year, month), group)| MonthlyValue {
            year,
            month,
            value: aggregation.apply(&group),
        })
        .collect())
}

/// Long-term seasonal cycle: each calendar month is the mean, across years,
/// of that month's aggregate.
///
/// # Errors
///
/// Returns [`ClimatologyError::LengthMismatch`] if `dates` and `values`
/// differ in length.
pub fn monthly_climatology(
    dates: &[ModelDate],
    values: &[f64],
    aggregation: Aggregation,
) -> Result<MonthlyClimatology, ClimatologyError> {
    let monthly = monthly_aggregate(dates, values, aggregation)?;

    let mut by_month: [Vec<f64>; 12] = Default::default();
    for m in &monthly {
        by_month[usize::from(m.month) - 1].push(m.value);
    }

    let mut clim = [f64::NAN; 12];
    for (slot, group) in clim.iter_mut().zip(by_month.iter()) {
        *slot = clima_stats::nan_mean(group);
    }
    Ok(MonthlyClimatology(clim))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use clima_calendar::{CfCalendar, daily_sequence};

    fn two_years() -> Vec<ModelDate> {
        daily_sequence(ModelDate::new(2001, 1, 1).unwrap(), 730, CfCalendar::NoLeap).unwrap()
    }

    #[test]
    fn sum_equals_total_of_days() {
        let dates = two_years();
        let values: Vec<f64> = (0..dates.len()).map(|i| (i % 7) as f64).collect();

        let monthly = monthly_aggregate(&dates, &values, Aggregation::Sum).unwrap();
        assert_eq!(monthly.len(), 24);

        let jan_2001: f64 = values[..31].iter().sum();
        assert_relative_eq!(monthly[0].value, jan_2001, epsilon = 1e-12);
        assert_eq!((monthly[0].year, monthly[0].month), (2001, 1));
    }

    #[test]
    fn mean_equals_average_of_days() {
        let dates = two_years();
        let values: Vec<f64> = (0..dates.len()).map(|i| i as f64).collect();

        let monthly = monthly_aggregate(&dates, &values, Aggregation::Mean).unwrap();
        // Feb 2001 = indices 31..59
        let feb: f64 = values[31..59].iter().sum::<f64>() / 28.0;
        assert_relative_eq!(monthly[1].value, feb, epsilon = 1e-12);
    }

    #[test]
    fn climatology_averages_across_years() {
        let dates = two_years();
        // Year 2001 all 1.0, year 2002 all 3.0
        let values: Vec<f64> = dates
            .iter()
            .map(|d| if d.year() == 2001 { 1.0 } else { 3.0 })
            .collect();

        let clim = monthly_climatology(&dates, &values, Aggregation::Mean).unwrap();
        for (_, v) in clim.iter() {
            assert_relative_eq!(v, 2.0, epsilon = 1e-12);
        }

        let clim = monthly_climatology(&dates, &values, Aggregation::Sum).unwrap();
        // January: (31 * 1 + 31 * 3) / 2
        assert_relative_eq!(clim.get(1), 62.0, epsilon = 1e-12);
        // February in a noleap calendar: (28 + 84) / 2
        assert_relative_eq!(clim.get(2), 56.0, epsilon = 1e-12);
    }

    #[test]
    fn missing_month_is_nan() {
        let dates = daily_sequence(ModelDate::new(2001, 1, 1).unwrap(), 31, CfCalendar::NoLeap)
            .unwrap();
        let values = vec![1.0; 31];
        let clim = monthly_climatology(&dates, &values, Aggregation::Mean).unwrap();
        assert_eq!(clim.get(1), 1.0);
        assert!(clim.get(2).is_nan());
        assert!(clim.get(13).is_nan());
    }

    #[test]
    fn unsorted_input_grouped_chronologically() {
        let dates = vec![
            ModelDate::new(2002, 1, 1).unwrap(),
            ModelDate::new(2001, 1, 1).unwrap(),
        ];
        let monthly = monthly_aggregate(&dates, &[2.0, 1.0], Aggregation::Mean).unwrap();
        assert_eq!(monthly[0].year, 2001);
        assert_eq!(monthly[1].year, 2002);
    }

    #[test]
    fn length_mismatch() {
        let dates = two_years();
        assert!(matches!(
            monthly_aggregate(&dates, &[1.0], Aggregation::Mean),
            Err(ClimatologyError::LengthMismatch { .. })
        ));
    }
}
