//! Error types for the clima-calendar crate.

/// Error type for all fallible operations in the clima-calendar crate.
///
/// Covers unsupported calendar names, malformed CF time units, and dates
/// that do not exist in the calendar they are decoded under.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalendarError {
    /// Returned when a CF `calendar` attribute names a calendar we do not decode.
    #[error("unsupported calendar: '{name}'")]
    UnsupportedCalendar {
        /// The calendar name as found in the file.
        name: String,
    },

    /// Returned when a month number is outside the valid range 1..=12.
    #[error("invalid month: {month} (must be 1..=12)")]
    InvalidMonth {
        /// The invalid month number that was provided.
        month: u8,
    },

    /// Returned when a day number exceeds the number of days in the given month.
    #[error("invalid day: {day} for month {month} (max {max_day})")]
    InvalidDay {
        /// The invalid day number that was provided.
        day: u8,
        /// The month for which the day is invalid.
        month: u8,
        /// The maximum valid day for the given month.
        max_day: u8,
    },

    /// Returned when a CF `units` string cannot be parsed.
    #[error("invalid time units '{units}': {reason}")]
    InvalidUnits {
        /// The units string as found in the file.
        units: String,
        /// What was wrong with it.
        reason: String,
    },

    /// Returned when a time offset is NaN or infinite.
    #[error("non-finite time offset: {value}")]
    InvalidOffset {
        /// The offending offset.
        value: f64,
    },

    /// Returned when date arithmetic leaves the representable range.
    #[error("date out of range: {reason}")]
    OutOfRange {
        /// Description of the overflow.
        reason: String,
    },
}
