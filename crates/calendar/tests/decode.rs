use clima_calendar::{CalendarError, CfCalendar, ModelDate, TimeUnits, daily_sequence, decode_offsets};

/// Offsets the way CMIP6 daily files store them: mid-day stamps.
fn midday_offsets(first_day: i64, n: usize) -> Vec<f64> {
    (0..n).map(|i| (first_day + i as i64) as f64 + 0.5).collect()
}

#[test]
fn cmip_daily_axis_matches_daily_sequence() {
    // 1980-01-01 is day 47_481 after 1850-01-01 in the Gregorian calendar.
    let units = TimeUnits::parse("days since 1850-01-01").unwrap();
    let offsets = midday_offsets(47_481, 1_000);
    let decoded = decode_offsets(&units, CfCalendar::Standard, &offsets).unwrap();

    let expected =
        daily_sequence(ModelDate::new(1980, 1, 1).unwrap(), 1_000, CfCalendar::Standard).unwrap();
    assert_eq!(decoded, expected);
}

#[test]
fn noleap_axis_matches_daily_sequence() {
    // 1850 → 2015 is 165 years of 365 days.
    let units = TimeUnits::parse("days since 1850-01-01 00:00:00").unwrap();
    let offsets = midday_offsets(165 * 365, 800);
    let decoded = decode_offsets(&units, CfCalendar::NoLeap, &offsets).unwrap();

    let expected =
        daily_sequence(ModelDate::new(2015, 1, 1).unwrap(), 800, CfCalendar::NoLeap).unwrap();
    assert_eq!(decoded, expected);
}

#[test]
fn hourly_axis_collapses_to_days() {
    let units = TimeUnits::parse("hours since 1900-01-01").unwrap();
    let offsets: Vec<f64> = (0..48).map(|h| h as f64).collect();
    let dates = decode_offsets(&units, CfCalendar::ProlepticGregorian, &offsets).unwrap();

    assert!(dates[..24].iter().all(|d| d.day() == 1));
    assert!(dates[24..].iter().all(|d| d.day() == 2));
}

#[test]
fn calendar_attribute_is_case_insensitive() {
    assert_eq!("GREGORIAN".parse::<CfCalendar>().unwrap(), CfCalendar::Standard);
    assert_eq!(
        CfCalendar::parse("julian").unwrap_err(),
        CalendarError::UnsupportedCalendar {
            name: "julian".to_string()
        }
    );
}
