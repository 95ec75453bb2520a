//! SQLite storage layer.
//!
//! Repository implementations backed by SQLite with WAL mode and split
//! read/write connection pools.

pub mod chat;
pub mod pool;
pub mod user;

use chrono::{DateTime, SecondsFormat, Utc};

use careerguide_types::error::RepositoryError;

pub(crate) fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

/// Fixed-width RFC 3339 (microseconds, `Z`), so string order is time order.
pub(crate) fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_datetime_is_fixed_width() {
        let whole = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(format_datetime(&whole), "2025-01-02T03:04:05.000000Z");

        let later = whole + chrono::TimeDelta::microseconds(1);
        assert!(format_datetime(&later) > format_datetime(&whole));
        assert_eq!(parse_datetime(&format_datetime(&later)).unwrap(), later);
    }

    #[test]
    fn test_parse_datetime_rejects_garbage() {
        assert!(matches!(
            parse_datetime("yesterday"),
            Err(RepositoryError::Query(_))
        ));
    }
}
