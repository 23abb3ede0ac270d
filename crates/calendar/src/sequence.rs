//! Daily date sequences.

use crate::calendar::CfCalendar;
use crate::date::ModelDate;
use crate::error::CalendarError;

/// Generates `n_days` consecutive dates starting at `start` in `calendar`.
///
/// # Example
///
/// ```ignore
/// let start = ModelDate::new(2000, 2, 28).unwrap();
/// let dates = daily_sequence(start, 3, CfCalendar::NoLeap).unwrap();
/// // Feb 28, Mar 1, Mar 2
/// ```
///
/// # Errors
///
/// Returns [`CalendarError::InvalidDay`] if `start` does not exist in
/// `calendar`.
pub fn daily_sequence(
    start: ModelDate,
    n_days: usize,
    calendar: CfCalendar,
) -> Result<Vec<ModelDate>, CalendarError> {
    let mut current = ModelDate::new_in(calendar, start.year(), start.month(), start.day())?;
    let mut dates = Vec::with_capacity(n_days);
    for _ in 0..n_days {
        dates.push(current);
        current = current.next(calendar)?;
    }
    Ok(dates)
}
