//! Supported CF calendars.

use std::fmt;
use std::str::FromStr;

use crate::error::CalendarError;

/// Number of days in each month of a common year (index 0 unused).
pub(crate) const DAYS_PER_MONTH: [u8; 13] = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// A CF calendar that time coordinates can be decoded under.
///
/// `standard` and `gregorian` are decoded as proleptic Gregorian. The two only
/// differ before October 1582, far outside any CMIP experiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CfCalendar {
    /// `standard` / `gregorian`.
    #[default]
    Standard,
    /// `proleptic_gregorian`.
    ProlepticGregorian,
    /// `noleap` / `365_day`: February always has 28 days.
    NoLeap,
    /// `all_leap` / `366_day`: February always has 29 days.
    AllLeap,
    /// `360_day`: twelve 30-day months.
    Day360,
}

impl CfCalendar {
    /// Parse a CF `calendar` attribute value (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::UnsupportedCalendar`] for `julian` and for any
    /// name outside the CF vocabulary.
    pub fn parse(name: &str) -> Result<Self, CalendarError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "standard" | "gregorian" | "" => Ok(Self::Standard),
            "proleptic_gregorian" => Ok(Self::ProlepticGregorian),
            "noleap" | "no_leap" | "365_day" => Ok(Self::NoLeap),
            "all_leap" | "366_day" => Ok(Self::AllLeap),
            "360_day" => Ok(Self::Day360),
            _ => Err(CalendarError::UnsupportedCalendar {
                name: name.to_string(),
            }),
        }
    }

    /// Canonical CF name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::ProlepticGregorian => "proleptic_gregorian",
            Self::NoLeap => "noleap",
            Self::AllLeap => "all_leap",
            Self::Day360 => "360_day",
        }
    }

    /// Whether the calendar follows Gregorian leap-year rules.
    pub fn is_gregorian(self) -> bool {
        matches!(self, Self::Standard | Self::ProlepticGregorian)
    }

    /// Whether `year` has a February 29 in this calendar.
    pub fn is_leap_year(self, year: i32) -> bool {
        match self {
            Self::Standard | Self::ProlepticGregorian => {
                (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
            }
            Self::NoLeap | Self::Day360 => false,
            Self::AllLeap => true,
        }
    }

    /// Number of days in `month` of `year`.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidMonth`] if `month` is outside 1..=12.
    pub fn days_in_month(self, year: i32, month: u8) -> Result<u8, CalendarError> {
        if !(1..=12).contains(&month) {
            return Err(CalendarError::InvalidMonth { month });
        }
        if self == Self::Day360 {
            return Ok(30);
        }
        if month == 2 && self.is_leap_year(year) {
            return Ok(29);
        }
        Ok(DAYS_PER_MONTH[month as usize])
    }

    /// Number of days in `year`.
    pub fn days_in_year(self, year: i32) -> u16 {
        match self {
            Self::Day360 => 360,
            _ if self.is_leap_year(year) => 366,
            _ => 365,
        }
    }
}

impl FromStr for CfCalendar {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for CfCalendar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
