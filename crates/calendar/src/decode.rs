//! Conversion of CF time offsets into model dates.

use chrono::{Datelike, NaiveDate, TimeDelta};

use crate::calendar::CfCalendar;
use crate::date::ModelDate;
use crate::error::CalendarError;
use crate::units::TimeUnits;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Decode raw time-coordinate values into dates.
///
/// Each offset is converted to elapsed seconds since the reference instant
/// (reference time of day included), floored to whole days, and added to the
/// reference date in `calendar`. A daily CMIP value stamped at `0.5` days
/// therefore lands on the reference day itself.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidOffset`] for NaN or infinite offsets,
/// [`CalendarError::InvalidDay`] if the reference date does not exist in
/// `calendar`, and [`CalendarError::OutOfRange`] on overflow.
pub fn decode_offsets(
    units: &TimeUnits,
    calendar: CfCalendar,
    offsets: &[f64],
) -> Result<Vec<ModelDate>, CalendarError> {
    let (year, month, day) = units.reference();
    let reference = ModelDate::new_in(calendar, year, month, day)?;
    let unit_seconds = units.unit().seconds();
    let base = units.seconds_of_day();

    offsets
        .iter()
        .map(|&offset| {
            if !offset.is_finite() {
                return Err(CalendarError::InvalidOffset { value: offset });
            }
            let days = ((offset * unit_seconds + base) / SECONDS_PER_DAY).floor();
            if days.abs() > i32::MAX as f64 {
                return Err(CalendarError::OutOfRange {
                    reason: format!("offset {offset} is too far from {reference}"),
                });
            }
            shift_days(calendar, reference, days as i64)
        })
        .collect()
}

/// Move `date` by `days` (negative moves backwards) in `calendar`.
///
/// # Errors
///
/// Returns [`CalendarError::OutOfRange`] if the result cannot be represented,
/// or a day/month error if `date` does not exist in `calendar`.
pub fn shift_days(calendar: CfCalendar, date: ModelDate, days: i64) -> Result<ModelDate, CalendarError> {
    if calendar.is_gregorian() {
        shift_gregorian(date, days)
    } else {
        let ordinal = fixed_ordinal(calendar, date)?;
        fixed_from_ordinal(calendar, ordinal + days)
    }
}

fn shift_gregorian(date: ModelDate, days: i64) -> Result<ModelDate, CalendarError> {
    let out_of_range = || CalendarError::OutOfRange {
        reason: format!("cannot move {date} by {days} days"),
    };
    let start = NaiveDate::from_ymd_opt(date.year(), date.month().into(), date.day().into())
        .ok_or(CalendarError::InvalidDay {
            day: date.day(),
            month: date.month(),
            max_day: CfCalendar::Standard.days_in_month(date.year(), date.month())?,
        })?;
    let shifted = TimeDelta::try_days(days)
        .and_then(|delta| start.checked_add_signed(delta))
        .ok_or_else(out_of_range)?;
    // chrono months and days always fit in u8
    ModelDate::new(shifted.year(), shifted.month() as u8, shifted.day() as u8)
}

/// Days since year 0 for calendars whose year length never varies.
fn fixed_ordinal(calendar: CfCalendar, date: ModelDate) -> Result<i64, CalendarError> {
    let checked = ModelDate::new_in(calendar, date.year(), date.month(), date.day())?;
    let year_len = i64::from(calendar.days_in_year(0));
    let mut days_before_month = 0i64;
    for m in 1..checked.month() {
        days_before_month += i64::from(calendar.days_in_month(0, m)?);
    }
    Ok(i64::from(checked.year()) * year_len + days_before_month + i64::from(checked.day()) - 1)
}

fn fixed_from_ordinal(calendar: CfCalendar, ordinal: i64) -> Result<ModelDate, CalendarError> {
    let year_len = i64::from(calendar.days_in_year(0));
    let year = i32::try_from(ordinal.div_euclid(year_len)).map_err(|_| CalendarError::OutOfRange {
        reason: format!("day ordinal {ordinal} overflows the year range"),
    })?;
    let mut remaining = ordinal.rem_euclid(year_len);
    for month in 1..=12u8 {
        let len = i64::from(calendar.days_in_month(year, month)?);
        if remaining < len {
            return ModelDate::new(year, month, (remaining + 1) as u8);
        }
        remaining -= len;
    }
    Err(CalendarError::OutOfRange {
        reason: format!("day ordinal {ordinal} does not fall in a month"),
    })
}
