use chrono::{NaiveDate, NaiveDateTime};

use crate::error::NormalizeError;

/// Parses a broker export timestamp into a canonical `NaiveDateTime`.
///
/// Broker exports mix 12-hour and 24-hour clocks and sometimes omit the
/// time entirely, so three forms are tried in order:
///
/// 1. `MM/DD/YYYY hh:mm AM|PM` when an AM/PM marker appears anywhere in
///    the string (case-insensitive)
/// 2. `MM/DD/YYYY HH:MM` (24-hour)
/// 3. `MM/DD/YYYY` with the time defaulting to midnight
pub fn parse_trade_date(raw: &str) -> Result<NaiveDateTime, NormalizeError> {
    let trimmed = raw.trim();
    let upper = trimmed.to_uppercase();

    if upper.contains("AM") || upper.contains("PM") {
        // Parse the uppercased string so lowercase markers ("pm") work too.
        if let Ok(dt) = NaiveDateTime::parse_from_str(&upper, "%m/%d/%Y %I:%M %p") {
            return Ok(dt);
        }
    } else if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%m/%d/%Y %H:%M") {
        return Ok(dt);
    }

    if let Ok(d) = NaiveDate::parse_from_str(trimmed, "%m/%d/%Y") {
        return Ok(d.and_hms_opt(0, 0, 0).unwrap());
    }

    Err(NormalizeError::BadDate(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn test_twelve_hour_pm() {
        assert_eq!(
            parse_trade_date("01/31/2025 11:53 PM").unwrap(),
            dt(2025, 1, 31, 23, 53, 0)
        );
    }

    #[test]
    fn test_twelve_hour_am() {
        assert_eq!(
            parse_trade_date("01/31/2025 12:05 AM").unwrap(),
            dt(2025, 1, 31, 0, 5, 0)
        );
    }

    #[test]
    fn test_lowercase_marker() {
        assert_eq!(
            parse_trade_date("03/04/2025 9:15 am").unwrap(),
            dt(2025, 3, 4, 9, 15, 0)
        );
    }

    #[test]
    fn test_twenty_four_hour() {
        assert_eq!(
            parse_trade_date("01/31/2025 14:30").unwrap(),
            dt(2025, 1, 31, 14, 30, 0)
        );
    }

    #[test]
    fn test_date_only_defaults_to_midnight() {
        assert_eq!(
            parse_trade_date("01/31/2025").unwrap(),
            dt(2025, 1, 31, 0, 0, 0)
        );
    }

    #[test]
    fn test_surrounding_whitespace() {
        assert_eq!(
            parse_trade_date("  02/14/2025 08:00  ").unwrap(),
            dt(2025, 2, 14, 8, 0, 0)
        );
    }

    #[test]
    fn test_marker_without_time_is_rejected() {
        assert!(parse_trade_date("01/31/2025 PM").is_err());
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        assert!(matches!(
            parse_trade_date("2025-01-31 10:00:00"),
            Err(NormalizeError::BadDate(_))
        ));
        assert!(parse_trade_date("not a date").is_err());
    }
}
