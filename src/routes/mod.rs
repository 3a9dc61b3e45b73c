use chrono::{DateTime, NaiveDate, Utc};

pub mod activity;
pub mod geo;
pub mod place;
pub mod stop;
pub mod trip;
pub mod user;

/// Parse a client-supplied date, accepting RFC 3339 timestamps or bare
/// `YYYY-MM-DD` dates (interpreted as midnight UTC).
pub(crate) fn parse_datetime(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    let date = value.parse::<NaiveDate>().ok()?;
    let midnight = date.and_hms_opt(0, 0, 0)?;
    Some(DateTime::from_naive_utc_and_offset(midnight, Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_datetime_accepts_both_forms() {
        assert_eq!(
            parse_datetime("2026-05-01"),
            Some(Utc.with_ymd_and_hms(2026, 5, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(
            parse_datetime("2026-05-01T09:30:00Z"),
            Some(Utc.with_ymd_and_hms(2026, 5, 1, 9, 30, 0).unwrap())
        );
        assert_eq!(parse_datetime("yesterday"), None);
    }
}
