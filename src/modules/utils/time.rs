use chrono::{DateTime, SecondsFormat, Utc};
use std::time::{SystemTime, UNIX_EPOCH};

/// Current UTC time as an ISO-8601 string (millisecond precision).
pub fn iso_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Current Unix timestamp in milliseconds, used for generated record ids.
pub fn current_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

/// Format an ISO timestamp as a short readable date, falling back to the raw
/// string when it does not parse.
pub fn format_date(iso: &str) -> String {
    match DateTime::parse_from_rfc3339(iso) {
        Ok(dt) => dt.format("%Y-%m-%d").to_string(),
        Err(_) => iso.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iso_timestamp_parses_back() {
        let stamp = iso_timestamp();
        assert!(DateTime::parse_from_rfc3339(&stamp).is_ok());
    }

    #[test]
    fn test_current_millis_is_recent() {
        let millis = current_millis();
        assert!(millis > 1_600_000_000_000); // after Sep 2020
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2021-01-01T00:00:00.000Z"), "2021-01-01");
        assert_eq!(format_date("not a date"), "not a date");
    }
}
