//! Parsing of CF `"<unit> since <reference>"` time units.

use crate::error::CalendarError;

/// Time step unit of a CF time coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Days,
    Hours,
    Minutes,
    Seconds,
}

impl TimeUnit {
    /// Length of one unit in seconds.
    pub fn seconds(self) -> f64 {
        match self {
            Self::Days => 86_400.0,
            Self::Hours => 3_600.0,
            Self::Minutes => 60.0,
            Self::Seconds => 1.0,
        }
    }

    fn parse(token: &str) -> Option<Self> {
        match token {
            "days" | "day" | "d" => Some(Self::Days),
            "hours" | "hour" | "hrs" | "hr" | "h" => Some(Self::Hours),
            "minutes" | "minute" | "mins" | "min" => Some(Self::Minutes),
            "seconds" | "second" | "secs" | "sec" | "s" => Some(Self::Seconds),
            _ => None,
        }
    }
}

/// Parsed CF time units.
///
/// The reference is kept as raw fields rather than a [`crate::ModelDate`]
/// because whether it exists depends on the calendar, which is only known
/// when decoding.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeUnits {
    unit: TimeUnit,
    year: i32,
    month: u8,
    day: u8,
    /// Seconds after midnight on the reference day.
    seconds_of_day: f64,
}

impl TimeUnits {
    /// Parse a units string such as `"days since 1850-01-01"` or
    /// `"hours since 1900-1-1 00:00:00.0"`.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidUnits`] when the string does not follow
    /// the `<unit> since <date> [<time>] [UTC]` layout.
    pub fn parse(units: &str) -> Result<Self, CalendarError> {
        let invalid = |reason: &str| CalendarError::InvalidUnits {
            units: units.to_string(),
            reason: reason.to_string(),
        };

        let lowered = units.trim().to_ascii_lowercase();
        let mut tokens = lowered.split_whitespace();

        let unit = tokens
            .next()
            .and_then(TimeUnit::parse)
            .ok_or_else(|| invalid("unknown time unit"))?;
        if tokens.next() != Some("since") {
            return Err(invalid("missing 'since'"));
        }

        let stamp = tokens.next().ok_or_else(|| invalid("missing reference date"))?;
        // ISO form: 1850-01-01T00:00:00
        let (date_part, mut time_part) = match stamp.split_once('t') {
            Some((d, t)) => (d, Some(t.to_string())),
            None => (stamp, None),
        };

        for token in tokens {
            if is_timezone(token) {
                continue;
            }
            if time_part.is_none() {
                time_part = Some(token.to_string());
            } else {
                return Err(invalid("unexpected trailing text"));
            }
        }

        let (year, month, day) = parse_date(date_part).ok_or_else(|| invalid("bad reference date"))?;
        let seconds_of_day = match time_part {
            Some(t) => parse_time(t.trim_end_matches('z')).ok_or_else(|| invalid("bad reference time"))?,
            None => 0.0,
        };

        Ok(Self {
            unit,
            year,
            month,
            day,
            seconds_of_day,
        })
    }

    pub fn unit(&self) -> TimeUnit {
        self.unit
    }

    /// Reference date as `(year, month, day)`.
    pub fn reference(&self) -> (i32, u8, u8) {
        (self.year, self.month, self.day)
    }

    /// Seconds after midnight on the reference day.
    pub fn seconds_of_day(&self) -> f64 {
        self.seconds_of_day
    }
}

fn is_timezone(token: &str) -> bool {
    matches!(token, "utc" | "z" | "gmt") || token.starts_with('+')
}

fn parse_date(s: &str) -> Option<(i32, u8, u8)> {
    let mut parts = s.split('-');
    let year = parts.next()?.parse::<i32>().ok()?;
    let month = parts.next()?.parse::<u8>().ok()?;
    let day = parts.next()?.parse::<u8>().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((year, month, day))
}

fn parse_time(s: &str) -> Option<f64> {
    let mut parts = s.split(':');
    let hours = parts.next()?.parse::<f64>().ok()?;
    let minutes = match parts.next() {
        Some(m) => m.parse::<f64>().ok()?,
        None => 0.0,
    };
    let seconds = match parts.next() {
        Some(sec) => sec.parse::<f64>().ok()?,
        None => 0.0,
    };
    if parts.next().is_some() || !(0.0..24.0).contains(&hours) {
        return None;
    }
    Some(hours * 3_600.0 + minutes * 60.0 + seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_days_since_date() {
        let u = TimeUnits::parse("days since 1850-01-01").unwrap();
        assert_eq!(u.unit(), TimeUnit::Days);
        assert_eq!(u.reference(), (1850, 1, 1));
        assert_eq!(u.seconds_of_day(), 0.0);
    }

    #[test]
    fn parse_hours_with_time_and_fraction() {
        let u = TimeUnits::parse("hours since 1900-1-1 06:30:00.0").unwrap();
        assert_eq!(u.unit(), TimeUnit::Hours);
        assert_eq!(u.reference(), (1900, 1, 1));
        assert_eq!(u.seconds_of_day(), 6.0 * 3600.0 + 30.0 * 60.0);
    }

    #[test]
    fn parse_iso_t_separator_and_utc() {
        let u = TimeUnits::parse("seconds since 1970-01-01T12:00:00Z").unwrap();
        assert_eq!(u.unit(), TimeUnit::Seconds);
        assert_eq!(u.seconds_of_day(), 43_200.0);

        let u = TimeUnits::parse("Days since 2015-01-01 00:00:00 UTC").unwrap();
        assert_eq!(u.reference(), (2015, 1, 1));
    }

    #[test]
    fn parse_rejects_missing_since() {
        assert!(matches!(
            TimeUnits::parse("days 1850-01-01"),
            Err(CalendarError::InvalidUnits { .. })
        ));
    }

    #[test]
    fn parse_rejects_unknown_unit() {
        assert!(TimeUnits::parse("fortnights since 1850-01-01").is_err());
    }

    #[test]
    fn parse_rejects_bad_date() {
        assert!(TimeUnits::parse("days since 1850/01/01").is_err());
        assert!(TimeUnits::parse("days since").is_err());
    }
}
