//! Coercers for date, time and datetime values.
//!
//! Each coercer tries the configured chrono format patterns in declared
//! order; the first successful parse wins.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::value::Value;

use super::CoercionError;

pub(super) fn coerce_date(raw: &str, formats: &[String]) -> Result<Value, CoercionError> {
    for format in formats {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return Ok(Value::Date(date));
        }
    }
    Err(malformed(raw, "date"))
}

pub(super) fn coerce_time(raw: &str, formats: &[String]) -> Result<Value, CoercionError> {
    for format in formats {
        if let Ok(time) = NaiveTime::parse_from_str(raw, format) {
            return Ok(Value::Time(time));
        }
    }
    Err(malformed(raw, "time"))
}

pub(super) fn coerce_datetime(raw: &str, formats: &[String]) -> Result<Value, CoercionError> {
    for format in formats {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(Value::DateTime(datetime));
        }
    }
    Err(malformed(raw, "datetime"))
}

fn malformed(raw: &str, target: &'static str) -> CoercionError {
    CoercionError::MalformedDateTime {
        raw: raw.to_string(),
        target,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn formats(patterns: &[&str]) -> Vec<String> {
        patterns.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn test_date_first_format_wins() {
        // 03/04 is ambiguous; the declared order decides.
        let dmy_first = formats(&["%d/%m/%Y", "%m/%d/%Y"]);
        assert_eq!(
            coerce_date("03/04/2024", &dmy_first).unwrap(),
            Value::Date(NaiveDate::from_ymd_opt(2024, 4, 3).unwrap())
        );

        let mdy_first = formats(&["%m/%d/%Y", "%d/%m/%Y"]);
        assert_eq!(
            coerce_date("03/04/2024", &mdy_first).unwrap(),
            Value::Date(NaiveDate::from_ymd_opt(2024, 3, 4).unwrap())
        );
    }

    #[test]
    fn test_date_fallback_to_later_format() {
        let fs = formats(&["%Y-%m-%d", "%d/%m/%Y"]);
        assert_eq!(
            coerce_date("25/12/2023", &fs).unwrap(),
            Value::Date(NaiveDate::from_ymd_opt(2023, 12, 25).unwrap())
        );
    }

    #[test]
    fn test_invalid_calendar_date_rejected() {
        let fs = formats(&["%Y-%m-%d"]);
        assert!(matches!(
            coerce_date("2023-02-30", &fs),
            Err(CoercionError::MalformedDateTime { .. })
        ));
    }

    #[test]
    fn test_time_parse() {
        let fs = formats(&["%H:%M:%S", "%H:%M"]);
        assert_eq!(
            coerce_time("09:30", &fs).unwrap(),
            Value::Time(NaiveTime::from_hms_opt(9, 30, 0).unwrap())
        );
    }

    #[test]
    fn test_datetime_parse() {
        let fs = formats(&["%Y-%m-%dT%H:%M:%S"]);
        let expected = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(10, 20, 30)
            .unwrap();
        assert_eq!(
            coerce_datetime("2024-01-02T10:20:30", &fs).unwrap(),
            Value::DateTime(expected)
        );
    }

    #[test]
    fn test_no_formats_always_fails() {
        assert!(coerce_date("2024-01-01", &[]).is_err());
    }
}
