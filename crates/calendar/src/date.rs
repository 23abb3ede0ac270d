//! Calendar-agnostic date.

use std::fmt;

use crate::calendar::CfCalendar;
use crate::error::CalendarError;

/// A `(year, month, day)` triple decoded from a model time axis.
///
/// The type itself only checks that the month is in 1..=12 and the day in
/// 1..=31; whether the day exists depends on the calendar and is checked by
/// [`ModelDate::new_in`]. Ordering is chronological within one calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ModelDate {
    year: i32,
    month: u8,
    day: u8,
}

impl ModelDate {
    /// Creates a new `ModelDate`.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError`] if the month is outside 1..=12 or the day is
    /// outside 1..=31.
    pub fn new(year: i32, month: u8, day: u8) -> Result<Self, CalendarError> {
        if !(1..=12).contains(&month) {
            return Err(CalendarError::InvalidMonth { month });
        }
        if !(1..=31).contains(&day) {
            return Err(CalendarError::InvalidDay {
                day,
                month,
                max_day: 31,
            });
        }
        Ok(Self { year, month, day })
    }

    /// Creates a `ModelDate` that must exist in `calendar`.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidDay`] for dates such as February 29 in
    /// a `noleap` calendar.
    pub fn new_in(calendar: CfCalendar, year: i32, month: u8, day: u8) -> Result<Self, CalendarError> {
        let max_day = calendar.days_in_month(year, month)?;
        if day == 0 || day > max_day {
            return Err(CalendarError::InvalidDay {
                day,
                month,
                max_day,
            });
        }
        Ok(Self { year, month, day })
    }

    pub fn year(self) -> i32 {
        self.year
    }

    /// Month (1..=12).
    pub fn month(self) -> u8 {
        self.month
    }

    /// Day within the month (1..=31).
    pub fn day(self) -> u8 {
        self.day
    }

    /// The following day in `calendar`.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidMonth`] only if the date was built with
    /// an out-of-range month, which the constructors prevent.
    pub fn next(self, calendar: CfCalendar) -> Result<Self, CalendarError> {
        let last = calendar.days_in_month(self.year, self.month)?;
        Ok(if self.day < last {
            Self {
                day: self.day + 1,
                ..self
            }
        } else if self.month < 12 {
            Self {
                month: self.month + 1,
                day: 1,
                ..self
            }
        } else {
            Self {
                year: self.year + 1,
                month: 1,
                day: 1,
            }
        })
    }
}

impl fmt::Display for ModelDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_valid() {
        let d = ModelDate::new(1980, 1, 31).unwrap();
        assert_eq!((d.year(), d.month(), d.day()), (1980, 1, 31));
    }

    #[test]
    fn new_invalid_month() {
        assert_eq!(
            ModelDate::new(2000, 0, 1).unwrap_err(),
            CalendarError::InvalidMonth { month: 0 }
        );
    }

    #[test]
    fn new_in_rejects_feb29_noleap() {
        assert!(ModelDate::new_in(CfCalendar::NoLeap, 2000, 2, 29).is_err());
        assert!(ModelDate::new_in(CfCalendar::Standard, 2000, 2, 29).is_ok());
        assert!(ModelDate::new_in(CfCalendar::Day360, 2001, 2, 30).is_ok());
    }

    #[test]
    fn next_wraps_month_and_year() {
        let d = ModelDate::new(2014, 12, 31).unwrap();
        assert_eq!(
            d.next(CfCalendar::Standard).unwrap(),
            ModelDate::new(2015, 1, 1).unwrap()
        );

        let feb = ModelDate::new(2000, 2, 28).unwrap();
        assert_eq!(feb.next(CfCalendar::Standard).unwrap().day(), 29);
        assert_eq!(feb.next(CfCalendar::NoLeap).unwrap().month(), 3);
    }

    #[test]
    fn ordering_is_chronological() {
        let a = ModelDate::new(1999, 12, 31).unwrap();
        let b = ModelDate::new(2000, 1, 1).unwrap();
        let c = ModelDate::new(2000, 2, 1).unwrap();
        assert!(a < b && b < c);
    }

    #[test]
    fn display_zero_padded() {
        assert_eq!(ModelDate::new(980, 3, 7).unwrap().to_string(), "0980-03-07");
    }
}
